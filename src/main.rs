use scalargrad::{backward, fit_line, make_leaf, vtanh, TrainConfig};

fn main() -> scalargrad::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("=== Demo 1: Simple graph z = x * y + tanh(x) ===");
    let x = make_leaf(2.);
    let y = make_leaf(3.);
    let xy = &x * &y;
    let t = vtanh(&x);
    let z = &xy + &t;
    backward(&z);
    println!("x.data = {}, y.data = {}", x.data(), y.data());
    println!("z.data = {}", z.data());
    println!("dz/dx (x.grad) = {}", x.grad());
    println!("dz/dy (y.grad) = {}", y.grad());
    println!();

    println!("=== Demo 2: Fit y = 2x + 1 with gradient descent ===");
    let xs = [-1., 0., 1., 2., 3.];
    let ys: Vec<f64> = xs.iter().map(|x| 2. * x + 1.).collect();
    let config = TrainConfig::from_env()?;
    let fit = fit_line(&xs, &ys, &config)?;
    for report in &fit.history {
        println!(
            "Epoch {} | loss = {} | w = {} | b = {}",
            report.epoch, report.loss, report.w, report.b
        );
    }
    println!();
    println!("Final parameters:");
    println!("w ≈ {} (target 2.0)", fit.w);
    println!("b ≈ {} (target 1.0)", fit.b);
    Ok(())
}
