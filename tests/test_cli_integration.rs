//! CLI Integration Tests for pwmigrate
//!
//! These tests execute the binary and verify correct behavior for:
//! - Dry-run summaries, in-place rewriting and JSON reports
//! - Project config discovery and overrides
//! - The config and commands companions
//! - Error handling and exit status

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const LOGIN_SPEC: &str = "describe('Login', () => {\n  it('logs in', () => {\n    cy.visit('/login');\n    cy.get('#email').type('a@b.c');\n    cy.get('form').submit();\n  });\n});\n";

const JEST_SPEC: &str = "describe('sum', () => {\n  it('adds', () => {\n    expect(1 + 1).toBe(2);\n  });\n});\n";

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Helper to create a small Cypress project
fn create_test_project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "cypress/e2e/login.cy.ts", LOGIN_SPEC);
    write(root, "cypress/e2e/unit.cy.js", JEST_SPEC);
    write(root, "src/app.ts", "cy.visit('/');\n");
    write(root, "node_modules/lib/x.cy.js", "cy.visit('/');\n");
    temp_dir
}

fn pwmigrate() -> Command {
    let mut cmd = Command::cargo_bin("pwmigrate").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Basics
// ============================================================================

#[test]
fn test_version_flag() {
    pwmigrate()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_lists_subcommands() {
    pwmigrate()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("tests"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("commands"))
        .stdout(predicate::str::contains("EXAMPLES:"));
}

// ============================================================================
// tests subcommand
// ============================================================================

#[test]
fn test_dry_run_summary_leaves_files_alone() {
    let project = create_test_project();
    let root = project.path();

    pwmigrate()
        .current_dir(root)
        .args(["tests", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("migrated"))
        .stdout(predicate::str::contains("login.cy.ts"))
        .stdout(predicate::str::contains("unchanged  ./cypress/e2e/unit.cy.js"))
        .stdout(predicate::str::contains("1 migrated, 1 unchanged, 0 failed"))
        .stdout(predicate::str::contains("--write"))
        .stdout(predicate::str::contains("node_modules").not())
        .stdout(predicate::str::contains("app.ts").not());

    let spec = fs::read_to_string(root.join("cypress/e2e/login.cy.ts")).unwrap();
    assert_eq!(spec, LOGIN_SPEC);
}

#[test]
fn test_write_rewrites_in_place() {
    let project = create_test_project();
    let root = project.path();

    pwmigrate()
        .current_dir(root)
        .args(["tests", "cypress", "--write"])
        .assert()
        .success();

    let spec = fs::read_to_string(root.join("cypress/e2e/login.cy.ts")).unwrap();
    assert_eq!(
        spec,
        "import { test, expect } from '@playwright/test';\n\n\
         test.describe('Login', () => {\n  test('logs in', async ({ page }) => {\n    \
         await page.goto('/login');\n    await page.locator('#email').fill('a@b.c');\n    \
         await page.locator('form').evaluate((form) => form.submit());\n  });\n});\n"
    );
    let untouched = fs::read_to_string(root.join("cypress/e2e/unit.cy.js")).unwrap();
    assert_eq!(untouched, JEST_SPEC);
}

#[test]
fn test_verbose_write_logs_each_file() {
    let project = create_test_project();

    pwmigrate()
        .current_dir(project.path())
        .args(["-v", "tests", "cypress", "--write"])
        .assert()
        .success()
        .stderr(predicate::str::contains("rewrote file"))
        .stderr(predicate::str::contains("login.cy.ts"));
}

#[test]
fn test_stdout_prints_migrated_source() {
    let project = create_test_project();
    let spec = project.path().join("cypress/e2e/login.cy.ts");

    pwmigrate()
        .args(["tests", "--stdout", "--no-import"])
        .arg(&spec)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("test.describe('Login'"))
        .stdout(predicate::str::contains("await page.goto('/login');"))
        .stdout(predicate::str::contains("@playwright/test").not());
}

#[test]
fn test_explicit_file_bypasses_include_globs() {
    let project = create_test_project();

    pwmigrate()
        .args(["tests", "--stdout"])
        .arg(project.path().join("src/app.ts"))
        .assert()
        .success()
        .stdout(predicate::str::contains("await page.goto('/');"));
}

#[test]
fn test_json_report() {
    let project = create_test_project();

    let output = pwmigrate()
        .current_dir(project.path())
        .args(["tests", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["migrated"], 1);
    assert_eq!(report["unchanged"], 1);
    assert_eq!(report["failed"], 0);
    assert_eq!(report["totals"]["chains_rewritten"], 3);
    assert_eq!(report["totals"]["test_blocks_rewritten"], 2);

    let files = report["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    let migrated = files
        .iter()
        .find(|f| f["status"] == "migrated")
        .unwrap();
    assert!(migrated["path"].as_str().unwrap().ends_with("login.cy.ts"));
    assert!(files.iter().all(|f| f.get("error").is_none()));
}

#[test]
fn test_stdout_conflicts_with_json() {
    pwmigrate()
        .args(["tests", "--stdout", "--json"])
        .assert()
        .failure();
}

#[test]
fn test_missing_path_fails() {
    pwmigrate()
        .args(["tests", "/definitely/not/here.cy.js"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_failed_file_sets_exit_status() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("broken.cy.js"), [0xff, 0xfe, 0x00]).unwrap();
    write(temp.path(), "ok.cy.js", "cy.reload();\n");

    pwmigrate()
        .current_dir(temp.path())
        .args(["tests", "."])
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.cy.js"))
        .stdout(predicate::str::contains("failed     ./broken.cy.js"))
        .stdout(predicate::str::contains("1 migrated, 0 unchanged, 1 failed"));
}

// ============================================================================
// Project config
// ============================================================================

#[test]
fn test_project_config_is_discovered() {
    let project = create_test_project();
    let root = project.path();
    write(
        root,
        ".pwmigrate.json",
        r#"{ "include": ["src/**/*.ts"], "inject_import": false }"#,
    );

    pwmigrate()
        .current_dir(root)
        .args(["tests", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("app.ts"))
        .stdout(predicate::str::contains("login.cy.ts").not());

    pwmigrate()
        .current_dir(root)
        .args(["tests", "--write"])
        .assert()
        .success();
    let app = fs::read_to_string(root.join("src/app.ts")).unwrap();
    assert_eq!(app, "await page.goto('/');\n");
}

#[test]
fn test_explicit_config_flag() {
    let project = create_test_project();
    let root = project.path();
    write(root, "settings/pw.json", r#"{ "ignore": ["**/login.cy.ts"] }"#);

    pwmigrate()
        .current_dir(root)
        .args(["-c", "settings/pw.json", "tests"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 migrated, 1 unchanged, 0 failed"));
}

#[test]
fn test_invalid_config_fails() {
    let project = create_test_project();
    let root = project.path();
    write(root, ".pwmigrate.json", r#"{ "includes": [] }"#);

    pwmigrate()
        .current_dir(root)
        .arg("tests")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

// ============================================================================
// Companions
// ============================================================================

#[test]
fn test_config_subcommand() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "cypress.config.ts",
        "import { defineConfig } from 'cypress';\nexport default defineConfig({\n  e2e: { baseUrl: 'http://localhost:3000' },\n});\n",
    );

    pwmigrate()
        .current_dir(temp.path())
        .args(["config", "cypress.config.ts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("import { defineConfig, devices } from '@playwright/test';"))
        .stdout(predicate::str::contains("    baseURL: 'http://localhost:3000',"))
        .stdout(predicate::str::contains("  // webServer: {"));
}

#[test]
fn test_config_subcommand_output_file() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "cypress.config.js",
        "module.exports = defineConfig({ retries: 1 });\n",
    );

    pwmigrate()
        .current_dir(temp.path())
        .args(["config", "cypress.config.js", "--output", "playwright.config.js"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = fs::read_to_string(temp.path().join("playwright.config.js")).unwrap();
    assert!(written.contains("  retries: 1,"));
    assert!(written.ends_with("});\n"));
}

#[test]
fn test_config_subcommand_rejects_other_files() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "util.ts", "export const x = 1;\n");

    pwmigrate()
        .current_dir(temp.path())
        .args(["config", "util.ts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a Cypress config file"));
}

#[test]
fn test_commands_subcommand() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "commands.js",
        "Cypress.Commands.add('login', (user) => {\n  cy.visit('/login');\n});\n",
    );

    pwmigrate()
        .current_dir(temp.path())
        .args(["commands", "commands.js"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CUSTOM CYPRESS COMMANDS DETECTED"))
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("// ORIGINAL CYPRESS COMMANDS FILE:"))
        .stdout(predicate::str::contains("Cypress.Commands.add('login'"));
}

#[test]
fn test_commands_subcommand_unsupported_extension() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "notes.md", "# nothing\n");

    pwmigrate()
        .current_dir(temp.path())
        .args(["commands", "notes.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a JavaScript or TypeScript file"));
}
