use sobel_edges::{OutputPaths, PipelineParams, SobelPipeline};
use std::env;
use std::path::Path;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 5 {
        let program = args.first().map(String::as_str).unwrap_or("sobel");
        eprintln!("{}", usage(program));
        process::exit(2);
    }
    env_logger::init();

    if let Err(err) = run(&args[1], &args[2], &args[3], &args[4]) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(input: &str, magnitude: &str, gx: &str, gy: &str) -> sobel_edges::Result<()> {
    let pipeline = SobelPipeline::new(PipelineParams::default())?;
    let outputs = OutputPaths::from_destinations(magnitude, gx, gy);
    let report = pipeline.run(Path::new(input), &outputs)?;

    println!(
        "{} {}x{} (max level {})",
        report.input.format.tag(),
        report.input.width,
        report.input.height,
        report.input.max_level
    );
    println!("Gradient saved: {}", report.outputs.magnitude.display());
    println!("Gradient X saved: {}", report.outputs.gx.display());
    println!("Gradient Y saved: {}", report.outputs.gy.display());
    Ok(())
}

fn usage(program: &str) -> String {
    format!("Usage: {program} <input_file> <output_G> <output_GX> <output_GY>")
}
