use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

const TWO_SYSTEM_CATALOG: &str = r#"[
  {
    "name": "Start",
    "jumpLinks": [
      {"destination": "End", "jumpLevel": "Alpha", "discovered": 2000, "distance": 0.6}
    ]
  },
  {
    "name": "End",
    "jumpLinks": [
      {"destination": "Start", "jumpLevel": "Alpha", "discovered": 2000, "distance": 0.6}
    ]
  }
]"#;

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("navigator-cli");
    cmd.env("RUST_LOG", "error");
    cmd.env_remove("NAVIGATOR_CATALOG");
    cmd
}

fn write_fixture(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("catalog.json");
    fs::write(&path, TWO_SYSTEM_CATALOG).expect("write catalog fixture");
    path
}

#[test]
fn route_lists_every_shortest_path() {
    let mut cmd = cli();
    cmd.arg("route")
        .arg("--from")
        .arg("Alpha Hydri")
        .arg("--to")
        .arg("Nu Octantis");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "Routes from Alpha Hydri to Nu Octantis (4 jumps",
        ))
        .stdout(predicate::str::contains(
            "Alpha Hydri -> Gamma Hydri -> Epsilon Hydri -> Eta Hydri -> Nu Octantis",
        ))
        .stdout(predicate::str::contains(" 4. "));
}

#[test]
fn route_renders_json() {
    let mut cmd = cli();
    cmd.arg("--format")
        .arg("json")
        .arg("route")
        .arg("--from")
        .arg("Alpha Hydri")
        .arg("--to")
        .arg("Nu Octantis");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"jumps\": 4"))
        .stdout(predicate::str::contains("\"routes\""))
        .stdout(predicate::str::contains("\"Nu Octantis\""));
}

#[test]
fn route_respects_level_restrictions() {
    let mut cmd = cli();
    cmd.arg("route")
        .arg("--from")
        .arg("Alpha Hydri")
        .arg("--to")
        .arg("Epsilon Hydri")
        .arg("--levels")
        .arg("alpha,beta");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("levels: Alpha, Beta"))
        .stdout(predicate::str::contains(
            "Alpha Hydri -> Beta Hydri -> Delta Hydri -> Epsilon Hydri",
        ));
}

#[test]
fn reflexive_route_is_a_single_entry() {
    let mut cmd = cli();
    cmd.arg("route")
        .arg("--from")
        .arg("Alpha Hydri")
        .arg("--to")
        .arg("Alpha Hydri");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("(0 jumps"))
        .stdout(predicate::str::contains(" 1. Alpha Hydri"));
}

#[test]
fn unknown_system_suggests_corrections() {
    let mut cmd = cli();
    cmd.arg("route")
        .arg("--from")
        .arg("Alpa Hydri")
        .arg("--to")
        .arg("Nu Octantis");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown system name: Alpa Hydri"))
        .stderr(predicate::str::contains("Did you mean"))
        .stderr(predicate::str::contains("Alpha Hydri"));
}

#[test]
fn route_not_found_is_reported() {
    let mut cmd = cli();
    cmd.arg("route")
        .arg("--from")
        .arg("Alpha Hydri")
        .arg("--to")
        .arg("Theta Hydri")
        .arg("--levels")
        .arg("alpha,beta,gamma");

    cmd.assert().failure().stderr(predicate::str::contains(
        "no route found between Alpha Hydri and Theta Hydri",
    ));
}

#[test]
fn invalid_level_is_rejected() {
    let mut cmd = cli();
    cmd.arg("route")
        .arg("--from")
        .arg("Alpha Hydri")
        .arg("--to")
        .arg("Nu Octantis")
        .arg("--levels")
        .arg("omega");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown jump level"));
}

#[test]
fn systems_lists_names_alphabetically() {
    let mut cmd = cli();
    cmd.arg("systems");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("systems in the catalog"))
        .stdout(predicate::function(|out: &str| {
            let hydri = out.find("Alpha Hydri");
            let mensae = out.find("Alpha Mensae");
            matches!((hydri, mensae), (Some(h), Some(m)) if h < m)
        }));
}

#[test]
fn links_hide_uncharted_by_default() {
    let mut cmd = cli();
    cmd.arg("links").arg("Zeta Hydri");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Jump links from Zeta Hydri"))
        .stdout(predicate::str::contains("Theta Hydri"))
        .stdout(predicate::str::contains("Epsilon Hydri").not());
}

#[test]
fn links_all_includes_uncharted() {
    let mut cmd = cli();
    cmd.arg("links").arg("Zeta Hydri").arg("--all");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Epsilon Hydri"))
        .stdout(predicate::str::contains("uncharted"));
}

#[test]
fn data_flag_loads_a_catalog_from_disk() {
    let dir = tempdir().expect("create temp dir");
    let path = write_fixture(&dir);

    let mut cmd = cli();
    cmd.arg("--data")
        .arg(&path)
        .arg("route")
        .arg("--from")
        .arg("Start")
        .arg("--to")
        .arg("End");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Start -> End"));
}

#[test]
fn environment_variable_overrides_the_bundled_catalog() {
    let dir = tempdir().expect("create temp dir");
    let path = write_fixture(&dir);

    let mut cmd = cli();
    cmd.env("NAVIGATOR_CATALOG", &path)
        .arg("systems");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("2 systems in the catalog"))
        .stdout(predicate::str::contains("Start"));
}

#[test]
fn missing_data_file_is_reported() {
    let mut cmd = cli();
    cmd.arg("--data")
        .arg("/nonexistent/star_systems.json")
        .arg("systems");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains(
            "failed to load the star-system catalog",
        ))
        .stderr(predicate::str::contains("catalog not found at"));
}
