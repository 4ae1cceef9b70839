use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn write_inputs(dir: &std::path::Path) -> (std::path::PathBuf, std::path::PathBuf) {
    let network = dir.join("network.csv");
    let seeds = dir.join("seeds.txt");
    // Path A-B-C-D-E plus a detached pair that is dropped with the smaller component.
    fs::write(
        &network,
        "# gene1,gene2\nA,B\nB,C\nC,D\nD,E\nY,Z\n",
    )
    .unwrap();
    fs::write(&seeds, "#seed\tsource\nA\tomim\nE\tomim\nghost\tomim\n").unwrap();
    (network, seeds)
}

#[test]
fn writes_module_named_after_settings() {
    let dir = tempfile::tempdir().unwrap();
    let (network, seeds) = write_inputs(dir.path());

    Command::cargo_bin("netprop-rwr")
        .unwrap()
        .arg("--network")
        .arg(&network)
        .arg("--seeds")
        .arg(&seeds)
        .arg("--out-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("5 nodes in connected module"));

    let out = dir
        .path()
        .join("connected_module_rwr_no_scaling_columnwise_0.8.txt");
    let text = fs::read_to_string(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "rank\tnode\tprobability");
    assert_eq!(lines.len(), 6);
    assert!(lines[1].starts_with("1\t"));
}

#[test]
fn symmetric_scaled_run_and_full_ranking() {
    let dir = tempfile::tempdir().unwrap();
    let (network, seeds) = write_inputs(dir.path());
    let ranking = dir.path().join("ranking.tsv");

    Command::cargo_bin("netprop-rwr")
        .unwrap()
        .args(["--scaling", "--symmetrical", "-r", "0.5"])
        .arg("-n")
        .arg(&network)
        .arg("-s")
        .arg(&seeds)
        .arg("-o")
        .arg(dir.path())
        .arg("--ranking")
        .arg(&ranking)
        .assert()
        .success();

    assert!(dir
        .path()
        .join("connected_module_rwr_scaling_symmetrical_0.5.txt")
        .exists());
    let text = fs::read_to_string(ranking).unwrap();
    // Header plus the five nodes of the largest component.
    assert_eq!(text.lines().count(), 6);
}

#[test]
fn seeds_missing_from_network_fail_with_message() {
    let dir = tempfile::tempdir().unwrap();
    let (network, _) = write_inputs(dir.path());
    let seeds = dir.path().join("other.txt");
    fs::write(&seeds, "ghost1\nghost2\n").unwrap();

    Command::cargo_bin("netprop-rwr")
        .unwrap()
        .arg("--network")
        .arg(&network)
        .arg("--seeds")
        .arg(&seeds)
        .arg("--out-dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no seeds found in network"));
}

#[test]
fn missing_arguments_print_usage() {
    Command::cargo_bin("netprop-rwr")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn missing_network_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let (_, seeds) = write_inputs(dir.path());

    Command::cargo_bin("netprop-rwr")
        .unwrap()
        .arg("--network")
        .arg(dir.path().join("absent.tsv"))
        .arg("--seeds")
        .arg(&seeds)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load network"));
}
