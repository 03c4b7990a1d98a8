mod common;

use common::synthetic_image::{bright_column, checkerboard, noise, write_pgm};
use sobel_edges::edges::{pad, sobel_gradients};
use sobel_edges::image::io::decode;
use sobel_edges::image::{Raster, RasterFormat};
use sobel_edges::parallel::Executor;
use sobel_edges::{Error, OutputPaths, PipelineParams, SobelPipeline};
use std::fs;
use std::path::Path;

fn pipeline(workers: usize) -> SobelPipeline {
    let _ = env_logger::builder().is_test(true).try_init();
    SobelPipeline::new(PipelineParams { workers }).unwrap()
}

fn outputs_in(dir: &Path) -> OutputPaths {
    let base = dir.join("edges.pgm");
    OutputPaths::from_destinations(&base, &base, &base)
}

#[test]
fn uniform_ascii_5x5_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let input = Raster::from_samples(RasterFormat::Ascii, 5, 5, 255, vec![100; 25]);
    let input_path = write_pgm(dir.path(), "flat.pgm", &input);

    // Raw stage: zero frame, zero response where the window is uniform.
    let mut padded = input.clone();
    pad(&mut padded);
    for (i, &v) in padded.data.iter().enumerate() {
        let (x, y) = (i % 5, i / 5);
        let border = x == 0 || y == 0 || x == 4 || y == 4;
        assert_eq!(v, if border { 0 } else { 100 });
    }
    let raw = sobel_gradients(&padded, &Executor::new(2).unwrap());
    assert_eq!(raw.gx.get(1, 1), 0);
    assert_eq!(raw.gy.get(1, 1), 0);
    assert_eq!(raw.magnitude.get(1, 1), 0);

    let outputs = outputs_in(dir.path());
    let report = pipeline(3).run(&input_path, &outputs).unwrap();
    assert_eq!(report.input.width, 5);
    assert_eq!(report.input.format, RasterFormat::Ascii);
    assert_eq!(report.normalization.magnitude.min, 0);
    assert_eq!(report.normalization.magnitude.max, 424);

    let g = decode(&dir.path().join("edges.G.pgm")).unwrap();
    assert_eq!(g.format, RasterFormat::Ascii);
    assert_eq!(g.max_level, 255);
    #[rustfmt::skip]
    let expected_g = vec![
        0,   0,   0,  0, 0,
        0,   0, 240, 60, 0,
        0, 240, 255, 60, 0,
        0,  60,  60, 60, 0,
        0,   0,   0,  0, 0,
    ];
    assert_eq!(g.data, expected_g);

    let gx = decode(&dir.path().join("edges.GX.pgm")).unwrap();
    #[rustfmt::skip]
    let expected_gx = vec![
        204, 204, 204, 204, 204,
        204, 204,   0, 255, 204,
        204, 204,  51, 255, 204,
        204, 255, 255, 255, 204,
        204, 204, 204, 204, 204,
    ];
    assert_eq!(gx.data, expected_gx);

    let gy = decode(&dir.path().join("edges.GY.pgm")).unwrap();
    #[rustfmt::skip]
    let expected_gy = vec![
        204, 204, 204, 204, 204,
        204, 204, 204, 255, 204,
        204,   0,  51, 255, 204,
        204, 255, 255, 255, 204,
        204, 204, 204, 204, 204,
    ];
    assert_eq!(gy.data, expected_gy);
}

#[test]
fn all_dark_input_hits_constant_grid_policy() {
    let dir = tempfile::tempdir().unwrap();
    let input = Raster::new(RasterFormat::Binary, 6, 6, 255);
    let input_path = write_pgm(dir.path(), "dark.pgm", &input);

    let report = pipeline(2).run(&input_path, &outputs_in(dir.path())).unwrap();
    for (label, stats) in report.normalization.labeled() {
        assert!(stats.is_degenerate(), "{label} should be constant");
    }
    for (_, path) in report.outputs.labeled() {
        let out = decode(path).unwrap();
        assert!(out.data.iter().all(|&v| v == 0));
    }
}

#[test]
fn bright_column_binary_7x7_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let input = bright_column(7, 7, 3, RasterFormat::Binary);
    let input_path = write_pgm(dir.path(), "column.pgm", &input);

    let mut padded = input.clone();
    pad(&mut padded);
    let raw = sobel_gradients(&padded, &Executor::new(1).unwrap());
    for y in 1..5 {
        assert!(raw.gx.get(1, y) > 0, "left edge of the column at row {y}");
        assert!(raw.gx.get(3, y) < 0, "right edge of the column at row {y}");
        assert_eq!(raw.gx.get(2, y), 0);
        assert_eq!(raw.gx.get(4, y), 0);
    }
    for y in 1..4 {
        for x in 1..5 {
            assert_eq!(raw.gy.get(x, y), 0, "rows are uniform at ({x},{y})");
        }
    }

    let report = pipeline(4).run(&input_path, &outputs_in(dir.path())).unwrap();
    assert_eq!(report.normalization.gx.min, -1020);
    assert_eq!(report.normalization.gx.max, 1020);

    let gx = decode(&dir.path().join("edges.GX.pgm")).unwrap();
    assert_eq!(gx.format, RasterFormat::Binary);
    #[rustfmt::skip]
    let expected_gx = vec![
        127, 127, 127, 127, 127, 127, 127,
        127, 255, 127,   0, 127, 127, 127,
        127, 255, 127,   0, 127, 127, 127,
        127, 255, 127,   0, 127, 127, 127,
        127, 223, 127,  31, 127, 127, 127,
        127, 127, 127, 159, 127, 127, 127,
        127, 127, 127, 127, 127, 127, 127,
    ];
    assert_eq!(gx.data, expected_gx);

    let g = decode(&dir.path().join("edges.G.pgm")).unwrap();
    assert_eq!(&g.data[7..14], &[0, 255, 0, 255, 0, 0, 0]);
    assert_eq!(&g.data[28..35], &[0, 201, 127, 201, 0, 0, 0]);
}

#[test]
fn worker_count_does_not_change_written_files() {
    let dir = tempfile::tempdir().unwrap();
    let input = noise(41, 37, 7, RasterFormat::Binary);
    let input_path = write_pgm(dir.path(), "noise.pgm", &input);

    let mut reference: Option<Vec<Vec<u8>>> = None;
    for workers in [1, 2, 3, 5, 8, 34] {
        let run_dir = dir.path().join(format!("w{workers}"));
        fs::create_dir(&run_dir).unwrap();
        let report = pipeline(workers).run(&input_path, &outputs_in(&run_dir)).unwrap();
        let bytes: Vec<Vec<u8>> = report
            .outputs
            .labeled()
            .iter()
            .map(|(_, p)| fs::read(p).unwrap())
            .collect();
        match &reference {
            None => reference = Some(bytes),
            Some(expected) => assert_eq!(&bytes, expected, "{workers} workers"),
        }
    }
}

#[test]
fn ascii_and_binary_inputs_agree() {
    let dir = tempfile::tempdir().unwrap();
    let ascii = checkerboard(20, 16, 4, RasterFormat::Ascii);
    let mut binary = ascii.clone();
    binary.format = RasterFormat::Binary;

    let p = pipeline(2);
    let a = p.process(ascii.clone()).unwrap();
    let b = p.process(binary).unwrap();
    assert_eq!(a.gradients, b.gradients);

    let path = write_pgm(dir.path(), "board.pgm", &ascii);
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("P2\n20 16\n255\n"));
}

#[test]
fn failed_encode_does_not_stop_other_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = write_pgm(dir.path(), "in.pgm", &noise(9, 9, 1, RasterFormat::Binary));
    let outputs = OutputPaths {
        magnitude: dir.path().join("m.G.pgm"),
        gx: dir.path().join("no_such_dir").join("x.GX.pgm"),
        gy: dir.path().join("y.GY.pgm"),
    };

    let err = pipeline(3).run(&input_path, &outputs).unwrap_err();
    match err {
        Error::Encode { path, .. } => assert_eq!(path, outputs.gx),
        other => panic!("unexpected error {other}"),
    }
    assert!(decode(&outputs.magnitude).is_ok());
    assert!(decode(&outputs.gy).is_ok());
}

#[test]
fn decode_failure_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("bad.pgm");
    fs::write(&input_path, b"P5\n4 4\n255\n\x01\x02").unwrap();
    let outputs = outputs_in(dir.path());

    let err = pipeline(2).run(&input_path, &outputs).unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
    for (_, path) in outputs.labeled() {
        assert!(!path.exists(), "{} should not exist", path.display());
    }
}

#[test]
fn too_small_input_is_a_dimension_error() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = write_pgm(
        dir.path(),
        "thin.pgm",
        &Raster::new(RasterFormat::Ascii, 2, 8, 255),
    );
    let outputs = outputs_in(dir.path());

    let err = pipeline(1).run(&input_path, &outputs).unwrap_err();
    assert!(matches!(err, Error::Dimension { width: 2, height: 8 }));
    assert!(!outputs.magnitude.exists());
}

#[test]
fn run_report_serializes_to_json() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = write_pgm(dir.path(), "in.pgm", &checkerboard(12, 10, 3, RasterFormat::Binary));
    let report = pipeline(2).run(&input_path, &outputs_in(dir.path())).unwrap();

    let report_path = dir.path().join("reports").join("run.json");
    sobel_edges::diagnostics::write_json_file(&report_path, &report).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(json["input"]["format"], "binary");
    assert_eq!(json["input"]["maxLevel"], 255);
    assert_eq!(json["workers"], 2);
    assert!(json["timings"]["stages"].as_array().unwrap().len() >= 7);
    assert!(json["outputs"]["gx"].as_str().unwrap().ends_with("edges.GX.pgm"));
}

#[test]
fn low_max_level_input_still_writes_full_range_headers() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("dim.pgm");
    fs::write(
        &input_path,
        b"P2\n# sixteen levels\n5 4\n15\n0 3 6 9 12\n15 12 9 6 3\n0 0 15 15 0\n7 7 7 7 7\n",
    )
    .unwrap();

    let report = pipeline(2).run(&input_path, &outputs_in(dir.path())).unwrap();
    assert_eq!(report.input.max_level, 15);
    for (label, path) in report.outputs.labeled() {
        let out = decode(path).unwrap();
        assert_eq!(out.max_level, 255, "{label} header");
        assert_eq!(out.format, RasterFormat::Ascii);
        assert!(out.data.iter().any(|&v| v > 15), "{label} uses the full range");
    }
}
