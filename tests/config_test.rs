//! Integration tests for Settings config loading with layered merge semantics.
//!
//! Merge Semantics:
//! - Defaults → Global: REPLACE where the file sets a key
//! - Global → Explicit (`--config`): REPLACE, except `[endpoints]` which merges per service id
//!
//! Environment overrides are left out (`with_env = false`) so tests do not
//! depend on the caller's AWSOPS_* variables.

use std::fs;

use tempfile::TempDir;

use awsops::config::{OutputFormat, Settings};
use awsops::domain::{ConfirmImpact, PartialFailure};

#[test]
fn given_endpoint_tables_in_both_files_when_load_then_merges_per_service() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let global = dir.path().join("global.toml");
    let explicit = dir.path().join("project.toml");
    fs::write(
        &global,
        r#"
[endpoints]
kms = "http://localhost:4566"
kendra-ranking = "http://localhost:9000"
"#,
    )
    .unwrap();
    fs::write(
        &explicit,
        r#"
[endpoints]
kms = "http://localhost:4599"
"#,
    )
    .unwrap();

    // Act
    let settings = Settings::load_from(Some(&global), Some(&explicit), false).unwrap();

    // Assert
    assert_eq!(settings.endpoint_for("kms"), Some("http://localhost:4599"));
    assert_eq!(settings.endpoint_for("kendra-ranking"), Some("http://localhost:9000"));
    assert_eq!(settings.endpoint_for("partnercentral-channel"), None);
}

#[test]
fn given_pagination_and_prompt_settings_when_load_then_parses_enums() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("awsops.toml");
    fs::write(
        &path,
        r#"
output = "text"
confirm_impact = "high"

[pagination]
partial_failure = "fail"
"#,
    )
    .unwrap();

    // Act
    let settings = Settings::load_from(None, Some(&path), false).unwrap();

    // Assert
    assert_eq!(settings.output, OutputFormat::Text);
    assert_eq!(settings.confirm_impact, ConfirmImpact::High);
    assert_eq!(settings.pagination.partial_failure, PartialFailure::Fail);
}

#[test]
fn given_global_only_when_load_then_unset_keys_keep_defaults() {
    let dir = TempDir::new().unwrap();
    let global = dir.path().join("global.toml");
    fs::write(&global, "region = \"eu-west-1\"\n").unwrap();

    let settings = Settings::load_from(Some(&global), None, false).unwrap();

    assert_eq!(settings.region.as_deref(), Some("eu-west-1"));
    assert_eq!(settings.confirm_impact, ConfirmImpact::Medium);
    assert_eq!(settings.pagination.partial_failure, PartialFailure::ReturnCollected);
    assert_eq!(settings.timeout_secs, 60);
}

#[test]
fn given_absent_global_file_when_load_then_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");

    let settings = Settings::load_from(Some(&missing), None, false).unwrap();

    assert_eq!(settings, Settings::default());
}
