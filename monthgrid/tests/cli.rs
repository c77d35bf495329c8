use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const FONT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../assets/fonts/DejaVuSansMono.ttf");

fn run(dir: &Path, args: &[&str]) -> Output {
    let config = dir.join("monthgrid.toml");
    fs::write(&config, format!("font_path = {FONT:?}\n")).unwrap();
    Command::new(env!("CARGO_BIN_EXE_monthgrid"))
        .arg("--config")
        .arg(&config)
        .args(args)
        .current_dir(dir)
        .env("RUST_LOG", "warn")
        .output()
        .unwrap()
}

#[test]
fn renders_consecutive_months_with_maps() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(
        dir.path(),
        &[
            "month", "--group", "1", "--year", "2024", "--month", "12", "--months", "2",
            "--out-dir", "cal",
        ],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let cal = dir.path().join("cal");
    for stem in ["2024-12", "2025-01"] {
        let png = fs::read(cal.join(format!("{stem}.png"))).unwrap();
        assert_eq!(&png[1..4], b"PNG");
        let html = fs::read_to_string(cal.join(format!("{stem}.map.html"))).unwrap();
        assert!(html.starts_with("<map name="));
        assert!(html.contains("/absences/create/1/"));
    }

    let json = fs::read_to_string(cal.join("2025-01.regions.json")).unwrap();
    let map: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(map["name"], "12025");
    let regions = map["regions"].as_array().unwrap();
    // New Year tooltip, then 31 free cells of the admin's object
    assert_eq!(regions[0]["title"], "New Year");
    assert!(regions[0]["href"].is_null());
    assert_eq!(regions.len(), 32);
}

#[test]
fn legend_and_sample_data() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(dir.path(), &["sample-data", "--out", "data.json"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let data: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("data.json")).unwrap()).unwrap();
    assert_eq!(data["absence_types"].as_array().unwrap().len(), 5);

    let out = run(
        dir.path(),
        &["--data", "data.json", "legend", "--out", "legend.png"],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let png = fs::read(dir.path().join("legend.png")).unwrap();
    assert_eq!(&png[1..4], b"PNG");
}

#[test]
fn bad_month_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(dir.path(), &["month", "--year", "2024", "--month", "13"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("no such month"));
}
