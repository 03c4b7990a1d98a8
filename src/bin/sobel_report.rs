use sobel_edges::config::load_config;
use sobel_edges::diagnostics::write_json_file;
use sobel_edges::SobelPipeline;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path)).map_err(|e| e.to_string())?;

    let pipeline = SobelPipeline::new(config.pipeline.clone()).map_err(|e| e.to_string())?;
    let outputs = config.output_paths();
    let report = pipeline
        .run(&config.input, &outputs)
        .map_err(|e| e.to_string())?;

    let saved = report.outputs.labeled();
    for ((label, path), (_, stats)) in saved.into_iter().zip(report.normalization.labeled()) {
        println!(
            "Saved {label} to {} (stretched from [{}, {}])",
            path.display(),
            stats.min,
            stats.max
        );
    }
    for stage in &report.timings.stages {
        println!("{:>20}: {:8.3} ms", stage.label, stage.elapsed_ms);
    }
    println!("{:>20}: {:8.3} ms", "total", report.timings.total_ms);

    if let Some(report_path) = &config.report {
        write_json_file(report_path, &report).map_err(|e| e.to_string())?;
        println!("Saved run report to {}", report_path.display());
    }
    Ok(())
}

fn usage() -> String {
    "Usage: sobel_report <config.json>".to_string()
}
