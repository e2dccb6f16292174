use std::{fs, path::PathBuf, process::Command};

use image::ImageReader;
use tempfile::TempDir;

fn level_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("levels")
        .join(name)
}

#[test]
fn demo_level_runs_and_writes_a_frame() {
    let dir = TempDir::new().expect("temp dir");
    let output = dir.path().join("frame.png");

    let result = Command::new(env!("CARGO_BIN_EXE_tile-defence"))
        .arg(level_path("demo.toml"))
        .args(["--config"])
        .arg(level_path("config.toml"))
        .args(["--ticks", "250", "--input", "r*10,d*5"])
        .arg("--output")
        .arg(&output)
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to run tile-defence");

    assert!(
        result.status.success(),
        "run failed: {}",
        String::from_utf8_lossy(&result.stderr)
    );
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(
        stdout.contains("tick=250 enemies=4/8 rejected_spawns=0"),
        "unexpected summary: {stdout}"
    );

    let frame = ImageReader::open(&output)
        .expect("frame written")
        .decode()
        .expect("frame decodes")
        .to_rgba8();
    assert_eq!((frame.width(), frame.height()), (320, 128));
    // The camera ends at (170, 80): the top-left pixel lies on the grid and the
    // bottom rows lie below it, where only the background shows.
    let background = [18, 18, 26, 255];
    assert_ne!(frame.get_pixel(0, 0).0, background);
    assert_eq!(frame.get_pixel(319, 127).0, background);
}

#[test]
fn malformed_level_stops_before_the_first_tick() {
    let dir = TempDir::new().expect("temp dir");
    let level = dir.path().join("ragged.toml");
    fs::write(
        &level,
        "enemy_visual = 1\nrows = [\"..\", \".\"]\n[legend.\".\"]\nvisual = 0\n",
    )
    .expect("write level");

    let result = Command::new(env!("CARGO_BIN_EXE_tile-defence"))
        .arg(&level)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run tile-defence");

    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(
        stderr.contains("configuration fault"),
        "unexpected error output: {stderr}"
    );
}
