//! Integration tests for the one-shot commands.
//!
//! Every test reads the road network from the saved Overpass response in
//! `docs/fixtures`, so no network access is needed.

use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

fn fixture_overpass() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures/ottawa_overpass.json")
        .canonicalize()
        .expect("fixture response present")
}

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("citypath");
    cmd.env("RUST_LOG", "error")
        .env("NO_COLOR", "1")
        .arg("--overpass-file")
        .arg(fixture_overpass());
    cmd
}

fn json_stdout(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("command runs");
    assert!(output.status.success(), "command failed: {output:?}");
    serde_json::from_slice(&output.stdout).expect("valid JSON on stdout")
}

#[test]
fn cities_lists_the_catalog() {
    cli()
        .arg("cities")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ottawa"))
        .stdout(predicate::str::contains("Vancouver"));
}

#[test]
fn cities_json_is_an_array_of_names() {
    let value = json_stdout(cli().args(["--format", "json", "cities"]));
    let cities = value.as_array().expect("array");
    assert_eq!(cities.len(), 72);
    assert!(cities.iter().any(|city| city == "Ottawa"));
}

#[test]
fn nodes_lists_every_intersection() {
    cli()
        .args(["nodes", "--city", "Ottawa"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ottawa, Canada: 5 intersections"))
        .stdout(predicate::str::contains("45.4200, -75.7000"))
        .stdout(predicate::str::contains("45.4100, -75.6900"))
        .stdout(predicate::str::contains("warning").not());
}

#[test]
fn nodes_respects_limit() {
    cli()
        .args(["nodes", "--city", "ottawa", "--limit", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("... and 3 more"));
}

#[test]
fn nodes_json_reports_counts() {
    let value = json_stdout(cli().args(["nodes", "--city", "Ottawa", "--format", "json"]));
    assert_eq!(value["place"], "Ottawa, Canada");
    assert_eq!(value["node_count"], 5);
    let ids: Vec<i64> = value["nodes"]
        .as_array()
        .expect("nodes array")
        .iter()
        .map(|node| node["id"].as_i64().expect("numeric id"))
        .collect();
    assert_eq!(ids, vec![1, 3, 4, 5, 7]);
    assert_eq!(value["ambiguous"].as_array().map(Vec::len), Some(0));
}

#[test]
fn route_by_id_prints_summary() {
    cli()
        .args(["route", "--city", "Ottawa", "--from", "1", "--to", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Route in Ottawa, Canada: 45.4200, -75.7000 -> 45.4250, -75.6900",
        ))
        .stdout(predicate::str::contains("2 hops"))
        .stdout(predicate::str::contains("1.34 km"))
        .stdout(predicate::str::contains("Completed in"));
}

#[test]
fn route_json_contains_steps() {
    let value = json_stdout(cli().args([
        "route", "--city", "Ottawa", "--from", "1", "--to", "4", "--format", "json",
    ]));
    assert_eq!(value["hops"], 2);
    assert_eq!(value["heuristic"], "great-circle");
    let steps: Vec<i64> = value["steps"]
        .as_array()
        .expect("steps array")
        .iter()
        .map(|step| step["id"].as_i64().expect("numeric id"))
        .collect();
    assert_eq!(steps, vec![1, 5, 4]);
    assert_eq!(value["maps"].as_array().map(Vec::len), Some(0));
}

#[test]
fn route_by_label_writes_map_files() {
    let dir = tempdir().expect("temp dir");
    let html = dir.path().join("route.html");
    let geojson = dir.path().join("route.geojson");

    cli()
        .args([
            "route",
            "--city",
            "Ottawa",
            "--from",
            "45.4200, -75.7000",
            "--to",
            "45.4100, -75.6900",
        ])
        .arg("--output")
        .arg(&html)
        .arg("--geojson")
        .arg(&geojson)
        .assert()
        .success()
        .stdout(predicate::str::contains("Map written to"));

    let page = fs::read_to_string(&html).expect("html written");
    assert!(page.contains("leaflet"));

    let collection: Value =
        serde_json::from_str(&fs::read_to_string(&geojson).expect("geojson written"))
            .expect("valid GeoJSON");
    assert_eq!(collection["type"], "FeatureCollection");
    let features = collection["features"].as_array().expect("features");
    // Two markers and one segment per hop of 1 -> 3 -> 7.
    assert_eq!(features.len(), 4);
}

#[test]
fn route_against_one_way_street_fails() {
    cli()
        .args(["route", "--city", "Ottawa", "--from", "7", "--to", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no path found between 7 and 1"));
}

#[test]
fn unknown_node_label_fails() {
    cli()
        .args([
            "route",
            "--city",
            "Ottawa",
            "--from",
            "1.0000, 2.0000",
            "--to",
            "4",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no node is labelled '1.0000, 2.0000'"));
}

#[test]
fn unknown_node_id_fails() {
    cli()
        .args(["route", "--city", "Ottawa", "--from", "2", "--to", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "node 2 is not part of the road network",
        ));
}

#[test]
fn unknown_city_suggests_alternatives() {
    cli()
        .args(["nodes", "--city", "Otawa"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown city: Otawa"))
        .stderr(predicate::str::contains("Ottawa"));
}

#[test]
fn missing_overpass_file_is_an_acquisition_failure() {
    let dir = tempdir().expect("temp dir");
    cargo_bin_cmd!("citypath")
        .env("RUST_LOG", "error")
        .arg("--overpass-file")
        .arg(dir.path().join("missing.json"))
        .args(["nodes", "--city", "Ottawa"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "failed to acquire road network for Ottawa, Canada",
        ));
}
