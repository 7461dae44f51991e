use anyhow::{Context, Result};
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["backend"], "i18n");
    assert_eq!(parsed["magicTranslations"], true);
    assert_eq!(parsed["escapeHtml"], false);
    assert!(parsed["includes"].is_array());
    assert!(parsed["ignores"].is_array());

    assert!(
        content.contains("  "),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "\u{2713} Created .hamli18nrc.json\n");
    assert!(test.root().join(".hamli18nrc.json").exists());

    let content = test.read_file(".hamli18nrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".hamli18nrc.json", "{}")?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr(&output), "error: .hamli18nrc.json already exists\n");
    assert_eq!(test.read_file(".hamli18nrc.json")?, "{}");

    Ok(())
}
