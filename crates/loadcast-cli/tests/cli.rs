use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn loadcast() -> Command {
    Command::cargo_bin("loadcast").unwrap()
}

#[test]
fn etl_builds_partitioned_features() {
    let dir = tempfile::tempdir().unwrap();

    let mut csv = String::from("Datetime,AEP_MW\n");
    for hour in 0..48i64 {
        let day = hour / 24 + 1;
        csv.push_str(&format!(
            "2018-01-{day:02} {:02}:00:00,{}\n",
            hour % 24,
            1_000.0 + hour as f64
        ));
    }
    fs::write(dir.path().join("AEP_hourly.csv"), csv).unwrap();

    let output = dir.path().join("features");
    let config = format!(
        "[[sources]]\npath = \"{}\"\nregion = \"AEP\"\n\n[output]\npath = \"{}\"\n",
        dir.path().join("AEP_hourly.csv").display(),
        output.display()
    );
    let config_path = dir.path().join("pipeline.toml");
    fs::write(&config_path, config).unwrap();

    loadcast()
        .args(["etl", "--config", config_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("feature build complete"));

    assert!(output
        .join("region=AEP/year=2018/month=1/part-0000.parquet")
        .exists());
}

#[test]
fn prepare_reports_shapes_and_writes_artifact() {
    let dir = tempfile::tempdir().unwrap();

    let mut csv = String::from("timestamp,load_mw\n");
    for hour in 0..30i64 {
        csv.push_str(&format!("{},{}\n", hour * 3_600, 1_000 + hour));
    }
    let input = dir.path().join("features.csv");
    fs::write(&input, csv).unwrap();

    let artifact = dir.path().join("saved_model/scaler.json");
    loadcast()
        .args([
            "prepare",
            "--input",
            input.to_str().unwrap(),
            "--artifact-out",
            artifact.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("prepared sequences: X=(6, 24, 1)"));

    let saved = fs::read_to_string(&artifact).unwrap();
    assert!(saved.contains("data_min"));
    assert!(saved.contains("data_max"));
}

#[test]
fn prepare_rejects_short_series() {
    let dir = tempfile::tempdir().unwrap();

    let mut csv = String::from("timestamp,load_mw\n");
    for hour in 0..10i64 {
        csv.push_str(&format!("{},{}\n", hour * 3_600, 1_000 + hour));
    }
    let input = dir.path().join("features.csv");
    fs::write(&input, csv).unwrap();

    loadcast()
        .args(["prepare", "--input", input.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("insufficient data"));
}
