use std::collections::HashSet;

use crate::value::Value;

/// Depth-first post-order walk from `out`: every node comes after all of its
/// parents, and a node reachable along several paths is listed once.
///
/// Parents are visited in operand order. The walk keeps its own stack, so deep
/// chains do not exhaust the call stack.
pub fn topo_sort(out: &Value) -> Vec<Value> {
    let mut order = Vec::new();
    let mut visited = HashSet::new();
    // (node, index of the next parent to visit)
    let mut stack: Vec<(Value, usize)> = Vec::new();

    visited.insert(out.id());
    stack.push((out.clone(), 0));

    while let Some((node, next)) = stack.last_mut() {
        let parent = node.parent(*next).cloned();
        match parent {
            Some(parent) => {
                *next += 1;
                if visited.insert(parent.id()) {
                    stack.push((parent, 0));
                }
            }
            None => {
                if let Some((node, _)) = stack.pop() {
                    order.push(node);
                }
            }
        }
    }

    order
}

/// Computes `d(out)/d(node)` for every node `out` depends on and stores it in
/// that node's gradient. Gradients left over from an earlier pass are cleared
/// first, so calling this twice gives the same result.
pub fn backward(out: &Value) {
    let order = topo_sort(out);
    log::trace!("backward: {} nodes", order.len());

    for node in &order {
        node.zero_grad();
    }

    out.set_grad(1.);

    // Reverse order: a node's consumers have all propagated before it does.
    for node in order.iter().rev() {
        node.propagate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{add, make_leaf, mul, vtanh};

    fn position(order: &[Value], node: &Value) -> usize {
        order
            .iter()
            .position(|v| v.ptr_eq(node))
            .expect("node is in the order")
    }

    #[test]
    fn leaf_alone() {
        let a = make_leaf(1.);
        let order = topo_sort(&a);
        assert_eq!(order.len(), 1);
        assert!(order[0].ptr_eq(&a));
    }

    #[test]
    fn parents_before_children() {
        let a = make_leaf(1.);
        let b = make_leaf(2.);
        let ab = mul(&a, &b);
        let t = vtanh(&a);
        let out = add(&ab, &t);

        let order = topo_sort(&out);
        assert_eq!(order.len(), 5);
        // Operand order decides the walk: a, b, a*b, tanh(a), out.
        assert!(order[0].ptr_eq(&a));
        assert!(order[1].ptr_eq(&b));
        assert!(order[2].ptr_eq(&ab));
        assert!(order[3].ptr_eq(&t));
        assert!(order[4].ptr_eq(&out));
        for node in &order {
            for parent in node.parents() {
                assert!(position(&order, &parent) < position(&order, node));
            }
        }
    }

    #[test]
    fn shared_nodes_appear_once() {
        let a = make_leaf(3.);
        let sq = mul(&a, &a);
        let out = add(&sq, &sq);
        let order = topo_sort(&out);
        assert_eq!(order.len(), 3);
    }

    #[test]
    fn deep_chain() {
        let x = make_leaf(1.);
        let mut acc = x.clone();
        for _ in 0..200_000 {
            acc = add(&acc, &x);
        }
        let order = topo_sort(&acc);
        assert_eq!(order.len(), 200_001);
        drop(order);
        backward(&acc);
        assert_eq!(x.grad(), 200_001.);
        drop(acc);
        assert_eq!(x.data(), 1.);
    }

    #[test]
    fn backward_clears_stale_gradients() {
        let a = make_leaf(2.);
        let b = make_leaf(5.);
        let out = mul(&a, &b);
        a.set_grad(42.);
        out.set_grad(-7.);
        backward(&out);
        assert_eq!(out.grad(), 1.);
        assert_eq!(a.grad(), 5.);
        assert_eq!(b.grad(), 2.);
    }
}
