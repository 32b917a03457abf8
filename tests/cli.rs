use std::fs;

use assert_cmd::Command;
use tempfile::tempdir;

#[test]
fn writes_per_hit_outputs() {
    let dir = tempdir().expect("temp dir");
    let clusterfile = dir.path().join("clusterblast_output.txt");
    fs::copy("tests/data/clusterblast_output.txt", &clusterfile).expect("copy fixture");

    Command::cargo_bin("mgbparser-rs")
        .expect("binary")
        .arg("--clusterfile")
        .arg(&clusterfile)
        .args(["-o", "run", "-q", "-s", "-b", "-m", "2"])
        .assert()
        .success();

    let query = fs::read_to_string(dir.path().join("run_queryinfo.tsv")).expect("query output");
    assert!(query.starts_with("Details of query sequence:NRPS_cluster.gbk\n"));

    let sighits = fs::read_to_string(dir.path().join("run_sighitinfo.tsv")).expect("sighit output");
    assert_eq!(sighits.lines().count(), 3);

    let coords = fs::read_to_string(dir.path().join("run_CP000001_c3_coords.tsv")).expect("coords output");
    assert_eq!(
        coords,
        "2\tCP000001_c3\tSTR_0411\tSTR_0409\t816000\t808900\t-\tStreptomyces sp. ATCC 700974 chromosome"
    );
    assert!(dir.path().join("run_NC_003888.3_c12_blastinfo.tsv").exists());
    assert!(dir.path().join("run_NC_003888.3_c12_locationinfo.tsv").exists());

    // only the top two hits are exported
    assert!(!dir.path().join("run_WP_012345_c1_coords.tsv").exists());
}

#[test]
fn max_result_accepts_underscore_spelling() {
    let dir = tempdir().expect("temp dir");
    let clusterfile = dir.path().join("clusterblast_output.txt");
    fs::copy("tests/data/clusterblast_output.txt", &clusterfile).expect("copy fixture");

    Command::cargo_bin("mgbparser-rs")
        .expect("binary")
        .arg("--clusterfile")
        .arg(&clusterfile)
        .args(["-o", "run", "--max_result", "1"])
        .assert()
        .success();

    assert!(dir.path().join("run_NC_003888.3_c12_coords.tsv").exists());
    assert!(!dir.path().join("run_CP000001_c3_coords.tsv").exists());
}

#[test]
fn references_flag_prints_citation() {
    let output = Command::cargo_bin("mgbparser-rs")
        .expect("binary")
        .arg("-r")
        .output()
        .expect("run binary");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Medema MH"));
}

#[test]
fn missing_report_fails() {
    Command::cargo_bin("mgbparser-rs")
        .expect("binary")
        .args(["--clusterfile", "does/not/exist.txt"])
        .assert()
        .failure();
}
