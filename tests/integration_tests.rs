//! Integration tests for the FEC CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const HALL: &str = "3f2a9c1e-0000-4000-8000-000000000001";
const KITCHEN: &str = "7b8d4e2f-0000-4000-8000-000000000002";

/// Helper to get an fec command isolated from the user's config and env
fn fec(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("fec").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("FEC_BACKUP_DIR")
        .env_remove("FEC_SHOW_SERIAL")
        .env_remove("FEC_LOG");
    cmd
}

/// Helper to create a JSON inventory with two extinguishers
fn setup_inventory() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let inventory = format!(
        r#"[
  {{"id": "{HALL}", "Location": "Main Hall", "Barcode": "B-100", "Serial Number": "SN-1", "Pass Y/N": "Pass"}},
  {{"id": "{KITCHEN}", "Location": "Kitchen", "Barcode": "B-200", "Serial Number": "SN-2", "Pass Y/N": null, "Notes": "by the door"}}
]
"#
    );
    fs::write(tmp.path().join("inventory.json"), inventory).unwrap();
    tmp
}

fn read_json(path: &Path) -> Vec<Value> {
    let content = fs::read_to_string(path).unwrap();
    serde_json::from_str::<Value>(&content)
        .unwrap()
        .as_array()
        .unwrap()
        .clone()
}

fn backup_files(dir: &Path) -> Vec<String> {
    match fs::read_dir(dir) {
        Ok(entries) => entries
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect(),
        Err(_) => Vec::new(),
    }
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    let tmp = TempDir::new().unwrap();
    fec(tmp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Fire Extinguisher Checker"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("reset"));
}

#[test]
fn test_version_displays() {
    let tmp = TempDir::new().unwrap();
    fec(tmp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("fec"));
}

#[test]
fn test_unknown_command_fails() {
    let tmp = TempDir::new().unwrap();
    fec(tmp.path()).arg("inspect").assert().failure();
}

#[test]
fn test_completions_bash() {
    let tmp = TempDir::new().unwrap();
    fec(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fec"));
}

// ============================================================================
// List / Show Tests
// ============================================================================

#[test]
fn test_list_shows_records_and_counts() {
    let tmp = setup_inventory();
    fec(tmp.path())
        .args(["list", "inventory.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Main Hall"))
        .stdout(predicate::str::contains("Kitchen"))
        .stdout(predicate::str::contains("3f2a9c1e"))
        .stdout(predicate::str::contains(
            "2 extinguishers shown: 1 pass, 0 fail, 1 unchecked",
        ));
}

#[test]
fn test_list_search_is_case_insensitive() {
    let tmp = setup_inventory();
    fec(tmp.path())
        .args(["list", "inventory.json", "--search", "kitch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Kitchen"))
        .stdout(predicate::str::contains("Main Hall").not());
}

#[test]
fn test_list_search_matches_barcode() {
    let tmp = setup_inventory();
    fec(tmp.path())
        .args(["list", "inventory.json", "-s", "b-100", "-f", "id"])
        .assert()
        .success()
        .stdout(format!("{HALL}\n"));
}

#[test]
fn test_list_count_with_status_filter() {
    let tmp = setup_inventory();
    fec(tmp.path())
        .args(["list", "inventory.json", "--status", "unchecked", "--count"])
        .assert()
        .success()
        .stdout("1\n");
}

#[test]
fn test_list_serial_column_is_optional() {
    let tmp = setup_inventory();
    fec(tmp.path())
        .args(["list", "inventory.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SN-1").not());

    fec(tmp.path())
        .args(["list", "inventory.json", "--serial"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SERIAL NUMBER"))
        .stdout(predicate::str::contains("SN-1"));
}

#[test]
fn test_list_json_keeps_all_fields() {
    let tmp = setup_inventory();
    let output = fec(tmp.path())
        .args(["list", "inventory.json", "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let records: Vec<Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1]["Notes"], "by the door");
    assert_eq!(records[1]["id"], KITCHEN);
}

#[test]
fn test_list_csv_source() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("sheet.csv"),
        "Location,Barcode,Serial Number,Pass Y/N\nBoiler Room,B-9,SN-9,N\n",
    )
    .unwrap();

    fec(tmp.path())
        .args(["list", "sheet.csv", "-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Boiler Room,B-9,Fail"));
}

#[test]
fn test_show_by_prefix() {
    let tmp = setup_inventory();
    fec(tmp.path())
        .args(["show", "inventory.json", "7b8d"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Kitchen"))
        .stdout(predicate::str::contains("by the door"));
}

#[test]
fn test_show_ambiguous_prefix_fails() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("inventory.json"),
        r#"[{"id": "abcd1111", "Location": "A"}, {"id": "abcd2222", "Location": "B"}]"#,
    )
    .unwrap();

    fec(tmp.path())
        .args(["show", "inventory.json", "abcd"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ambiguous"));
}

// ============================================================================
// Pass / Fail Tests
// ============================================================================

#[test]
fn test_fail_saves_and_backs_up() {
    let tmp = setup_inventory();
    fec(tmp.path())
        .args(["fail", "inventory.json", KITCHEN])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved"));

    let records = read_json(&tmp.path().join("inventory.json"));
    assert_eq!(records[1]["Pass Y/N"], "Fail");
    assert_eq!(records[1]["id"], KITCHEN);
    assert_eq!(records[0]["Pass Y/N"], "Pass");

    let backups = backup_files(&tmp.path().join("backup"));
    assert_eq!(backups.len(), 1);
    assert!(backups[0].starts_with("inventory_backup_"));
    assert!(backups[0].ends_with(".json"));
}

#[test]
fn test_pass_keeps_key_order() {
    let tmp = setup_inventory();
    fec(tmp.path())
        .args(["pass", "inventory.json", "7b8d4e2f"])
        .assert()
        .success();

    let content = fs::read_to_string(tmp.path().join("inventory.json")).unwrap();
    let status_at = content.rfind("\"Pass Y/N\": \"Pass\"").unwrap();
    let notes_at = content.rfind("\"Notes\"").unwrap();
    assert!(status_at < notes_at);
}

#[test]
fn test_pass_multiple_ids() {
    let tmp = setup_inventory();
    fec(tmp.path())
        .args(["pass", "inventory.json", HALL, KITCHEN, "-q"])
        .assert()
        .success()
        .stdout("");

    let records = read_json(&tmp.path().join("inventory.json"));
    assert!(records.iter().all(|r| r["Pass Y/N"] == "Pass"));
}

#[test]
fn test_dry_run_does_not_save() {
    let tmp = setup_inventory();
    let before = fs::read_to_string(tmp.path().join("inventory.json")).unwrap();

    fec(tmp.path())
        .args(["fail", "inventory.json", HALL, "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"));

    let after = fs::read_to_string(tmp.path().join("inventory.json")).unwrap();
    assert_eq!(before, after);
    assert!(!tmp.path().join("backup").exists());
}

#[test]
fn test_unknown_id_fails_without_writing() {
    let tmp = setup_inventory();
    let before = fs::read_to_string(tmp.path().join("inventory.json")).unwrap();

    fec(tmp.path())
        .args(["pass", "inventory.json", KITCHEN, "ffffffff-missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no extinguisher with id"));

    let after = fs::read_to_string(tmp.path().join("inventory.json")).unwrap();
    assert_eq!(before, after);
    assert!(!tmp.path().join("backup").exists());
}

#[test]
fn test_pass_on_csv_asks_for_convert() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("sheet.csv"), "Location,Barcode\nLobby,B-1\n").unwrap();

    let output = fec(tmp.path())
        .args(["list", "sheet.csv", "-f", "id"])
        .output()
        .unwrap();
    let id = String::from_utf8(output.stdout).unwrap().trim().to_string();

    fec(tmp.path())
        .args(["pass", "sheet.csv", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no stable ids"));
    assert!(!tmp.path().join("sheet.json").exists());
}

#[test]
fn test_backup_dir_flag_and_env() {
    let tmp = setup_inventory();
    fec(tmp.path())
        .args(["pass", "inventory.json", HALL, "--backup-dir", "from-flag"])
        .assert()
        .success();
    assert_eq!(backup_files(&tmp.path().join("from-flag")).len(), 1);

    fec(tmp.path())
        .env("FEC_BACKUP_DIR", "from-env")
        .args(["pass", "inventory.json", HALL])
        .assert()
        .success();
    assert_eq!(backup_files(&tmp.path().join("from-env")).len(), 1);
    assert!(!tmp.path().join("backup").exists());
}

// ============================================================================
// Reset / Summary Tests
// ============================================================================

#[test]
fn test_reset_with_yes() {
    let tmp = setup_inventory();
    fec(tmp.path())
        .args(["fail", "inventory.json", KITCHEN])
        .assert()
        .success();

    fec(tmp.path())
        .args(["reset", "inventory.json", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reset 2 extinguishers"));

    let records = read_json(&tmp.path().join("inventory.json"));
    assert!(records.iter().all(|r| r["Pass Y/N"] == "Unchecked"));
    assert_eq!(records[0]["id"], HALL);
}

#[test]
fn test_reset_csv_writes_sibling_json() {
    let tmp = TempDir::new().unwrap();
    let csv = "Location,Barcode,Pass Y/N\nLobby,B-1,Y\nGarage,B-2,\n";
    fs::write(tmp.path().join("sheet.csv"), csv).unwrap();

    fec(tmp.path())
        .args(["reset", "sheet.csv", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sheet.json"));

    let records = read_json(&tmp.path().join("sheet.json"));
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["Location"], "Lobby");
    assert!(records.iter().all(|r| r["Pass Y/N"] == "Unchecked"));
    assert_eq!(records[0]["id"].as_str().unwrap().len(), 36);
    assert_eq!(fs::read_to_string(tmp.path().join("sheet.csv")).unwrap(), csv);
}

#[test]
fn test_reset_csv_keeps_existing_sibling_json() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("sheet.csv"),
        "Location,Barcode,Pass Y/N\nLobby,B-1,Y\n",
    )
    .unwrap();
    let json = format!(
        r#"[{{"id": "{HALL}", "Location": "Lobby", "Barcode": "B-1", "Pass Y/N": "Pass", "Notes": "seal replaced"}}]"#
    );
    fs::write(tmp.path().join("sheet.json"), &json).unwrap();

    fec(tmp.path())
        .args(["reset", "sheet.csv", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"))
        .stderr(predicate::str::contains("--output"));

    assert_eq!(
        fs::read_to_string(tmp.path().join("sheet.json")).unwrap(),
        json
    );
    assert!(backup_files(&tmp.path().join("backup")).is_empty());

    // The JSON inventory itself resets in place and keeps its ids
    fec(tmp.path())
        .args(["reset", "sheet.json", "--yes"])
        .assert()
        .success();
    let records = read_json(&tmp.path().join("sheet.json"));
    assert_eq!(records[0]["id"], HALL);
    assert_eq!(records[0]["Notes"], "seal replaced");
    assert_eq!(records[0]["Pass Y/N"], "Unchecked");
}

#[test]
fn test_reset_without_terminal_requires_yes() {
    let tmp = setup_inventory();
    let before = fs::read_to_string(tmp.path().join("inventory.json")).unwrap();

    fec(tmp.path())
        .args(["reset", "inventory.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));

    let after = fs::read_to_string(tmp.path().join("inventory.json")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_summary_reports_progress() {
    let tmp = setup_inventory();
    fec(tmp.path())
        .args(["summary", "inventory.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unchecked"))
        .stdout(predicate::str::contains("50.0%"));
}

#[test]
fn test_summary_json() {
    let tmp = setup_inventory();
    let output = fec(tmp.path())
        .args(["summary", "inventory.json", "-f", "json"])
        .output()
        .unwrap();
    let summary: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["total"], 2);
    assert_eq!(summary["pass"], 1);
    assert_eq!(summary["unchecked"], 1);
}

// ============================================================================
// Convert / Load Error Tests
// ============================================================================

#[test]
fn test_convert_tsv_to_json_assigns_ids() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("sheet.tsv"),
        "Location\tBarcode\tid\nLobby\tB-1\told\nGarage\t\told\n",
    )
    .unwrap();

    fec(tmp.path())
        .args(["convert", "sheet.tsv", "out.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Converted 2 extinguishers"));

    let records = read_json(&tmp.path().join("out.json"));
    assert_eq!(records.len(), 2);
    let first = records[0]["id"].as_str().unwrap();
    let second = records[1]["id"].as_str().unwrap();
    assert_eq!(first.len(), 36);
    assert_ne!(first, second);
    assert_eq!(records[1]["Barcode"], Value::Null);
}

#[test]
fn test_convert_to_csv_fails() {
    let tmp = setup_inventory();
    fec(tmp.path())
        .args(["convert", "inventory.json", "out.csv"])
        .assert()
        .failure();
    assert!(!tmp.path().join("out.csv").exists());
}

fn copy_xlsx_fixture(dir: &Path) {
    let fixture = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/inventory.xlsx");
    fs::copy(fixture, dir.join("inventory.xlsx")).unwrap();
}

#[test]
fn test_list_xlsx_inventory() {
    let tmp = TempDir::new().unwrap();
    copy_xlsx_fixture(tmp.path());

    fec(tmp.path())
        .args(["list", "inventory.xlsx"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Main Hall"))
        .stdout(predicate::str::contains("Kitchen"))
        .stdout(predicate::str::contains("00123"))
        .stdout(predicate::str::contains("Archived").not());
}

#[test]
fn test_convert_xlsx_to_json() {
    let tmp = TempDir::new().unwrap();
    copy_xlsx_fixture(tmp.path());

    fec(tmp.path())
        .args(["convert", "inventory.xlsx", "out.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Converted 2 extinguishers"));

    let records = read_json(&tmp.path().join("out.json"));
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["Pass Y/N"], "Y");
    assert_eq!(records[1]["Barcode"], "124");
    assert_eq!(records[1]["Notes"], "by the door");
    assert_eq!(records[0]["id"].as_str().unwrap().len(), 36);
}

#[test]
fn test_pass_on_xlsx_asks_for_convert() {
    let tmp = TempDir::new().unwrap();
    copy_xlsx_fixture(tmp.path());

    fec(tmp.path())
        .args(["pass", "inventory.xlsx", "abcd"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("fec convert"));
}

#[test]
fn test_unsupported_extension_fails() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("sheet.txt"), "Location\nHall\n").unwrap();

    fec(tmp.path())
        .args(["list", "sheet.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported file type"));
}

#[test]
fn test_malformed_json_fails() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("broken.json"), "[{\"Location\": \"Hall\",}]").unwrap();

    fec(tmp.path())
        .args(["list", "broken.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON syntax error"));
}

#[test]
fn test_missing_file_fails() {
    let tmp = TempDir::new().unwrap();
    fec(tmp.path())
        .args(["list", "nowhere.json"])
        .assert()
        .failure();
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn test_config_set_local_show_serial() {
    let tmp = setup_inventory();
    fec(tmp.path())
        .args(["config", "set", "show_serial", "true"])
        .assert()
        .success();
    assert!(tmp.path().join(".fec.yaml").exists());

    fec(tmp.path())
        .args(["list", "inventory.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SN-2"));

    fec(tmp.path())
        .args(["config", "show", "show_serial"])
        .assert()
        .success()
        .stdout("true\n");

    fec(tmp.path())
        .args(["config", "unset", "show_serial"])
        .assert()
        .success();
    fec(tmp.path())
        .args(["config", "show", "show_serial"])
        .assert()
        .failure();
}

#[test]
fn test_config_rejects_unknown_key() {
    let tmp = TempDir::new().unwrap();
    fec(tmp.path())
        .args(["config", "set", "author", "someone"])
        .assert()
        .failure();
    assert!(!tmp.path().join(".fec.yaml").exists());
}

#[test]
fn test_config_keys_lists_backup_dir() {
    let tmp = TempDir::new().unwrap();
    fec(tmp.path())
        .args(["config", "keys"])
        .assert()
        .success()
        .stdout(predicate::str::contains("backup_dir"));
}
