#![cfg(feature = "cli")]

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn paint_strip(img: &mut image::RgbImage, center: (i32, i32), long: f64, short: f64, angle_deg: f64) {
    let (s, c) = angle_deg.to_radians().sin_cos();
    let (w, h) = img.dimensions();
    for y in 0..h {
        for x in 0..w {
            let dx = x as f64 - center.0 as f64;
            let dy = y as f64 - center.1 as f64;
            if (dx * c + dy * s).abs() <= 0.5 * long && (-dx * s + dy * c).abs() <= 0.5 * short {
                img.put_pixel(x, y, image::Rgb([0, 255, 0]));
            }
        }
    }
}

fn write_pair_frame(path: &Path) {
    let mut img = image::RgbImage::new(426, 240);
    paint_strip(&mut img, (150, 120), 60.0, 16.0, 16.0);
    paint_strip(&mut img, (280, 120), 60.0, 16.0, 166.0);
    img.save(path).unwrap();
}

fn cli() -> Command {
    Command::cargo_bin("retro-targets").unwrap()
}

#[test]
fn detect_prints_offset_and_writes_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let frame = dir.path().join("frame.png");
    let mask = dir.path().join("mask.png");
    let report = dir.path().join("out/report.json");
    write_pair_frame(&frame);

    cli()
        .args(["--log-level", "off", "detect"])
        .arg(&frame)
        .arg("--mask-out")
        .arg(&mask)
        .arg("--report")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("offset: -2.000"));

    let mask = image::open(&mask).unwrap().to_luma8();
    assert_eq!(mask.dimensions(), (426, 240));
    assert_eq!(mask.get_pixel(150, 120).0, [255]);

    let raw = std::fs::read_to_string(&report).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["offset"]["status"], "found");
    assert_eq!(json["width"], 426);
    assert_eq!(json["candidates"].as_array().unwrap().len(), 2);
}

#[test]
fn reference_column_override_shifts_offset() {
    let dir = tempfile::tempdir().unwrap();
    let frame = dir.path().join("frame.png");
    write_pair_frame(&frame);

    cli()
        .args(["--log-level", "off", "detect"])
        .arg(&frame)
        .args(["--reference-column", "225"])
        .assert()
        .success()
        .stdout(predicate::str::contains("offset: 10.000"));
}

#[test]
fn empty_frame_is_not_found_but_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let frame = dir.path().join("black.png");
    image::RgbImage::new(64, 48).save(&frame).unwrap();

    cli()
        .args(["--log-level", "off", "detect"])
        .arg(&frame)
        .assert()
        .success()
        .stdout(predicate::str::contains("offset: not found"));
}

#[test]
fn run_uses_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let frame = dir.path().join("frame.png");
    let out = dir.path().join("report.json");
    write_pair_frame(&frame);

    let cfg = serde_json::json!({
        "image_path": frame,
        "output_path": out,
        "params": { "reference_column": 213.0 }
    });
    let cfg_path = dir.path().join("cfg.json");
    std::fs::write(&cfg_path, cfg.to_string()).unwrap();

    cli()
        .args(["--log-level", "off", "run"])
        .arg(&cfg_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("offset: -2.000"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let pixels = json["offset"]["pixels"].as_f64().unwrap();
    approx::assert_abs_diff_eq!(pixels, -2.0, epsilon = 1e-6);
    assert!(json["error"].is_null());
}

#[test]
fn log_level_controls_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let frame = dir.path().join("frame.png");
    write_pair_frame(&frame);

    cli()
        .env_remove("RUST_LOG")
        .args(["--log-level", "debug", "detect"])
        .arg(&frame)
        .assert()
        .success()
        .stderr(predicate::str::contains("filter_contours"));

    cli()
        .env_remove("RUST_LOG")
        .args(["--log-level", "off", "detect"])
        .arg(&frame)
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn missing_image_fails() {
    let dir = tempfile::tempdir().unwrap();
    cli()
        .args(["--log-level", "off", "detect"])
        .arg(dir.path().join("nope.png"))
        .assert()
        .failure();
}
