use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

const DUMP: &str = "\
/c/slb/real 1
\tena
\trip 192.0.2.1
/c/slb/real 5
\tena
\trip 192.0.2.5
/c/slb/group 7
\tadd 1
/c/slb/virt 3
\tena
\tvip 10.0.0.3
/c/slb/virt 3/service 80
\tgroup 7
";

fn write_dump(dir: &std::path::Path) -> PathBuf {
    let path = dir.join("alteon.cfg");
    fs::write(&path, DUMP).expect("dump write");
    path
}

#[test]
fn scan_lists_defined_ids_per_element_kind() {
    let dir = tempdir().expect("tempdir");
    let dump = write_dump(dir.path());

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("alteon-convert"));
    cmd.arg("scan")
        .arg(&dump)
        .assert()
        .success()
        .stdout(predicate::str::contains("/c/slb/virt: 1 defined"))
        .stdout(predicate::str::contains("/c/slb/group: 1 defined"))
        .stdout(predicate::str::contains("/c/slb/real: 2 defined"))
        .stdout(predicate::str::contains("ids: 1, 5"));
}

#[test]
fn scan_of_empty_dump_reports_zero_everywhere() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("empty.cfg");
    fs::write(&path, "").expect("dump write");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("alteon-convert"));
    cmd.arg("scan")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("/c/slb/virt: 0 defined"));
}
