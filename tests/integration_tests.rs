//! Integration tests for the pbin CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd. Each
//! test works in its own temp directory against the default ./inventory.db.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper to get a pbin command with a clean environment
fn pbin() -> Command {
    let mut cmd = Command::cargo_bin("pbin").unwrap();
    cmd.env_remove("PBIN_DB").env_remove("PBIN_FORMAT");
    cmd
}

/// Helper to create an initialized database in a temp directory
fn setup_db() -> TempDir {
    let tmp = TempDir::new().unwrap();
    pbin().current_dir(tmp.path()).arg("init").assert().success();
    tmp
}

/// Helper to seed location "204.1" and part "PN001"
fn seed_catalog(tmp: &TempDir) {
    pbin()
        .current_dir(tmp.path())
        .args(["loc", "add", "204.1", "-d", "Shelf"])
        .assert()
        .success();
    pbin()
        .current_dir(tmp.path())
        .args(["part", "add", "PN001", "-d", "O-RING"])
        .assert()
        .success();
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    pbin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("inventory"));
}

#[test]
fn test_version_displays() {
    pbin()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pbin"));
}

#[test]
fn test_unknown_command_fails() {
    pbin()
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_completions_generate() {
    pbin()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pbin"));
}

// ============================================================================
// Init Command Tests
// ============================================================================

#[test]
fn test_init_creates_database() {
    let tmp = TempDir::new().unwrap();

    pbin()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created inventory database"));

    assert!(tmp.path().join("inventory.db").exists());
}

#[test]
fn test_init_is_idempotent() {
    let tmp = setup_db();

    pbin()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already present"));
}

// ============================================================================
// Location and Part Tests
// ============================================================================

#[test]
fn test_loc_add_and_readd() {
    let tmp = setup_db();

    pbin()
        .current_dir(tmp.path())
        .args(["loc", "add", "204.1", "-d", "Shelf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added location"));

    pbin()
        .current_dir(tmp.path())
        .args(["loc", "add", "204.1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    pbin()
        .current_dir(tmp.path())
        .args(["loc", "list", "--count"])
        .assert()
        .success()
        .stdout(predicate::str::diff("1\n"));
}

#[test]
fn test_loc_resolve_prints_id() {
    let tmp = setup_db();
    seed_catalog(&tmp);

    pbin()
        .current_dir(tmp.path())
        .args(["loc", "resolve", "204.1"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\d+\n$").unwrap());
}

#[test]
fn test_part_lookup_not_found() {
    let tmp = setup_db();

    pbin()
        .current_dir(tmp.path())
        .args(["part", "show", "PN999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_part_list_json() {
    let tmp = setup_db();
    seed_catalog(&tmp);

    pbin()
        .current_dir(tmp.path())
        .args(["part", "list", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"part_number\": \"PN001\""));
}

// ============================================================================
// Box Tests
// ============================================================================

#[test]
fn test_box_add_requires_location() {
    let tmp = setup_db();

    pbin()
        .current_dir(tmp.path())
        .args(["box", "add", "BOX_A1", "--location", "nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("location 'nowhere' not found"));

    pbin()
        .current_dir(tmp.path())
        .args(["box", "list", "--count"])
        .assert()
        .success()
        .stdout(predicate::str::diff("0\n"));
}

#[test]
fn test_box_code_conflict_across_locations() {
    let tmp = setup_db();
    seed_catalog(&tmp);
    pbin()
        .current_dir(tmp.path())
        .args(["loc", "add", "204.2"])
        .assert()
        .success();
    pbin()
        .current_dir(tmp.path())
        .args(["box", "add", "BOX_A1", "-l", "204.1"])
        .assert()
        .success();

    pbin()
        .current_dir(tmp.path())
        .args(["box", "add", "BOX_A1", "-l", "204.2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already registered at location"));
}

// ============================================================================
// Inventory Workflow Tests
// ============================================================================

#[test]
fn test_inventory_add_is_idempotent() {
    let tmp = setup_db();
    seed_catalog(&tmp);

    pbin()
        .current_dir(tmp.path())
        .args([
            "inv", "add", "-b", "BOX_A1", "-p", "PN001", "-l", "204.1", "-n", "5", "-d", "O-RING",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 5 x PN001"));

    // Identical re-add returns the stored row: quantity stays 5.
    pbin()
        .current_dir(tmp.path())
        .args([
            "inv", "add", "-b", "BOX_A1", "-p", "PN001", "-l", "204.1", "-n", "5", "-d", "O-RING",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("already holds 5 x PN001"));

    pbin()
        .current_dir(tmp.path())
        .args(["inv", "list", "--count"])
        .assert()
        .success()
        .stdout(predicate::str::diff("1\n"));
}

#[test]
fn test_inventory_add_unknown_part_leaves_no_box() {
    let tmp = setup_db();
    seed_catalog(&tmp);

    pbin()
        .current_dir(tmp.path())
        .args(["inv", "add", "-b", "BOX_A1", "-p", "PN999", "-l", "204.1", "-n", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("part 'PN999' not found"));

    pbin()
        .current_dir(tmp.path())
        .args(["box", "list", "--count"])
        .assert()
        .success()
        .stdout(predicate::str::diff("0\n"));
}

#[test]
fn test_inventory_rejects_negative_quantity() {
    let tmp = setup_db();
    seed_catalog(&tmp);

    pbin()
        .current_dir(tmp.path())
        .args(["inv", "add", "-b", "BOX_A1", "-p", "PN001", "-l", "204.1", "--qty=-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid quantity"));
}

#[test]
fn test_two_parts_share_one_box() {
    let tmp = setup_db();
    seed_catalog(&tmp);
    pbin()
        .current_dir(tmp.path())
        .args(["part", "add", "PN002", "-d", "WASHER"])
        .assert()
        .success();

    for part in ["PN001", "PN002"] {
        pbin()
            .current_dir(tmp.path())
            .args(["inv", "add", "-b", "BOX_A1", "-p", part, "-l", "204.1", "-n", "3"])
            .assert()
            .success();
    }

    pbin()
        .current_dir(tmp.path())
        .args(["box", "list", "--count"])
        .assert()
        .success()
        .stdout(predicate::str::diff("1\n"));
    pbin()
        .current_dir(tmp.path())
        .args(["inv", "list", "-b", "BOX_A1", "--count"])
        .assert()
        .success()
        .stdout(predicate::str::diff("2\n"));
}

#[test]
fn test_inventory_update_replaces_fields() {
    let tmp = setup_db();
    seed_catalog(&tmp);
    pbin()
        .current_dir(tmp.path())
        .args(["part", "add", "PN002"])
        .assert()
        .success();
    pbin()
        .current_dir(tmp.path())
        .args(["inv", "add", "-b", "BOX_A1", "-p", "PN001", "-l", "204.1", "-n", "5"])
        .assert()
        .success();

    // The first item gets id 1 in a fresh database.
    pbin()
        .current_dir(tmp.path())
        .args(["inv", "update", "1", "-p", "PN002", "-n", "7", "-d", "new desc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("7 x PN002"));

    pbin()
        .current_dir(tmp.path())
        .args(["inv", "update", "42", "-p", "PN002", "-n", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_box_rm_cascades_to_items() {
    let tmp = setup_db();
    seed_catalog(&tmp);
    pbin()
        .current_dir(tmp.path())
        .args(["part", "add", "PN002"])
        .assert()
        .success();
    for part in ["PN001", "PN002"] {
        pbin()
            .current_dir(tmp.path())
            .args(["inv", "add", "-b", "BOX_A1", "-p", part, "-l", "204.1", "-n", "1"])
            .assert()
            .success();
    }

    pbin()
        .current_dir(tmp.path())
        .args(["box", "rm", "1", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 inventory item(s)"));

    pbin()
        .current_dir(tmp.path())
        .args(["inv", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No inventory found."));
}

#[test]
fn test_loc_rm_blocked_while_boxes_remain() {
    let tmp = setup_db();
    seed_catalog(&tmp);
    pbin()
        .current_dir(tmp.path())
        .args(["box", "add", "BOX_A1", "-l", "204.1"])
        .assert()
        .success();

    pbin()
        .current_dir(tmp.path())
        .args(["loc", "rm", "1", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("still has"));

    pbin()
        .current_dir(tmp.path())
        .args(["loc", "list", "--count"])
        .assert()
        .success()
        .stdout(predicate::str::diff("1\n"));
}

#[test]
fn test_inv_export_writes_csv() {
    let tmp = setup_db();
    seed_catalog(&tmp);
    pbin()
        .current_dir(tmp.path())
        .args(["inv", "add", "-b", "BOX_A1", "-p", "PN001", "-l", "204.1", "-n", "5"])
        .assert()
        .success();

    pbin()
        .current_dir(tmp.path())
        .args(["inv", "export"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "inventory_id,box_code,part_number",
        ))
        .stdout(predicate::str::contains("BOX_A1,PN001"));
}

#[test]
fn test_db_flag_overrides_default_path() {
    let tmp = TempDir::new().unwrap();
    let db = tmp.path().join("elsewhere.db");

    pbin()
        .current_dir(tmp.path())
        .args(["--db", db.to_str().unwrap(), "loc", "add", "204.1"])
        .assert()
        .success();

    assert!(db.exists());
    assert!(!tmp.path().join("inventory.db").exists());
}
