use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const STABLE: &str = "indicator--0c7b5b88-8ff7-4a4d-aa9d-feb398cd0061";
const OLDER: &str = "indicator--00000001-0000-1000-8000-00005e005301";
const NEWER: &str = "indicator--00000002-0000-1000-8000-00005e005301";

fn stixmap(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("stixmap").unwrap();
    cmd.env("STIXMAP_CONFIG", dir.path().join("config.toml"))
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn check_allowed_relationship() {
    let dir = TempDir::new().unwrap();
    stixmap(&dir)
        .args(["check", "Indicator", "Malware", "indicates"])
        .assert()
        .success()
        .stdout(predicate::str::contains("allowed: Indicator -[indicates]-> Malware"));
}

#[test]
fn check_denied_relationship_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    stixmap(&dir)
        .args(["check", "Malware", "Indicator", "indicates"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("denied"));
}

#[test]
fn check_related_to_always_allowed() {
    let dir = TempDir::new().unwrap();
    stixmap(&dir)
        .args(["check", "Region", "Tool", "related-to"])
        .assert()
        .success();
}

#[test]
fn check_unknown_type_fails() {
    let dir = TempDir::new().unwrap();
    stixmap(&dir)
        .args(["check", "Dragon", "Malware", "uses"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown entity type: Dragon"));
}

#[test]
fn check_observable_table() {
    let dir = TempDir::new().unwrap();
    stixmap(&dir)
        .args(["check", "--observable", "Domain-Name", "IPv4-Addr", "obs_resolves-to"])
        .assert()
        .success();
}

#[test]
fn allowed_json_lists_always_allowed_first() {
    let dir = TempDir::new().unwrap();
    let output = stixmap(&dir)
        .args(["--format", "json", "allowed", "Indicator", "Malware"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let names: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(names[0], "related-to");
    assert_eq!(names[1], "revoked-by");
    assert!(names.contains(&"indicates".to_string()));
}

#[test]
fn fields_for_one_type() {
    let dir = TempDir::new().unwrap();
    stixmap(&dir)
        .args(["fields", "Malware"])
        .assert()
        .success()
        .stdout(predicate::str::contains("samples"))
        .stdout(predicate::str::contains("operatingSystems"));
}

#[test]
fn fields_full_index() {
    let dir = TempDir::new().unwrap();
    stixmap(&dir)
        .arg("fields")
        .assert()
        .success()
        .stdout(predicate::str::contains("StixFile: "));
}

#[test]
fn clean_ids_keeps_newest_transients() {
    let dir = TempDir::new().unwrap();
    stixmap(&dir)
        .args(["clean-ids", "--capacity", "1", OLDER, STABLE, NEWER])
        .assert()
        .success()
        .stdout(format!("{}\n{}\n", STABLE, NEWER));
}

#[test]
fn clean_ids_reads_stdin() {
    let dir = TempDir::new().unwrap();
    stixmap(&dir)
        .args(["clean-ids", "--stable-only"])
        .write_stdin(format!("{}\n\n{}\n", NEWER, STABLE))
        .assert()
        .success()
        .stdout(format!("{}\n", STABLE));
}

#[test]
fn clean_ids_rejects_malformed_id() {
    let dir = TempDir::new().unwrap();
    stixmap(&dir)
        .args(["clean-ids", "not-an-id"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed identifier"));
}

#[test]
fn clean_ids_uses_configured_capacity() {
    let dir = TempDir::new().unwrap();
    stixmap(&dir)
        .args(["config", "set", "default_capacity", "0"])
        .assert()
        .success();

    stixmap(&dir)
        .args(["clean-ids", OLDER, NEWER, STABLE])
        .assert()
        .success()
        .stdout(format!("{}\n", STABLE));
}

#[test]
fn config_set_then_get() {
    let dir = TempDir::new().unwrap();
    stixmap(&dir)
        .args(["config", "set", "format", "json"])
        .assert()
        .success();

    stixmap(&dir)
        .args(["config", "get", "format"])
        .assert()
        .success()
        .stdout("json\n");

    stixmap(&dir)
        .args(["config", "get", "colour"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn config_init_refuses_overwrite() {
    let dir = TempDir::new().unwrap();
    stixmap(&dir).args(["config", "init"]).assert().success();
    stixmap(&dir)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
    stixmap(&dir)
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn types_by_category() {
    let dir = TempDir::new().unwrap();
    stixmap(&dir)
        .args(["types", "--category", "container"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Report"))
        .stdout(predicate::str::contains("Case-Rft"))
        .stdout(predicate::str::contains("Malware").not());
}

#[test]
fn types_observable_relationships() {
    let dir = TempDir::new().unwrap();
    stixmap(&dir)
        .args(["types", "observable-relationships"])
        .assert()
        .success()
        .stdout(predicate::str::contains("x_opencti_linked-to"));
}

#[test]
fn out_of_range_capacity_only_affects_clean_ids() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.toml"), "default_capacity = 100000000\n").unwrap();

    stixmap(&dir)
        .args(["check", "Indicator", "Malware", "indicates"])
        .assert()
        .success();
    stixmap(&dir).arg("types").assert().success();

    stixmap(&dir)
        .args(["clean-ids", STABLE])
        .assert()
        .failure()
        .stderr(predicate::str::contains("capacity too large"));

    stixmap(&dir)
        .args(["clean-ids", "--capacity", "5", STABLE])
        .assert()
        .success()
        .stdout(format!("{}\n", STABLE));
}

#[test]
fn unknown_format_flag_is_rejected() {
    let dir = TempDir::new().unwrap();
    stixmap(&dir)
        .args(["--format", "xml", "types"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("xml"));

    stixmap(&dir)
        .args(["config", "set", "format", "xml"])
        .assert()
        .failure();
}

#[test]
fn check_unregistered_pair_with_always_allowed_relationship() {
    let dir = TempDir::new().unwrap();
    stixmap(&dir)
        .args(["check", "Dragon", "Tool", "related-to"])
        .assert()
        .success();
}
