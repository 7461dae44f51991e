use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_extract_json() -> Result<()> {
    let test = CliTest::with_file("a.haml", "%p Hello #{name}!\nWelcome\n")?;
    test.write_file("b.haml", "%span= _('Welcome')\n")?;
    test.write_file("notes.erb", "Ignored\n")?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "[[\"Hello %s!\",\"./a.haml:1\"],[\"Welcome\",\"./a.haml:2\",\"./b.haml:1\"]]\n"
    );
    assert_eq!(stderr(&output), "\u{2713} Extracted 2 msgids from 2 templates\n");
    Ok(())
}

#[test]
fn test_extract_text_explicit_path() -> Result<()> {
    let test = CliTest::with_file(
        "views/page.haml",
        ":markdown\n  First paragraph\n\n  Second paragraph\n%p Bye\n",
    )?;
    test.write_file("views/other.haml", "Not asked for\n")?;

    let output = test
        .extract_command()
        .args(["views/page.haml", "--format", "text"])
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "Bye\n  views/page.haml:5\nFirst paragraph\\n\\nSecond paragraph\n  views/page.haml:1\n"
    );
    Ok(())
}

#[test]
fn test_extract_empty_project() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "[]\n");
    Ok(())
}

#[test]
fn test_extract_reports_unbalanced_interpolation() -> Result<()> {
    let test = CliTest::with_file("good.haml", "Hello\n")?;
    test.write_file("bad.haml", "Fine\n%p Hi #{name\n")?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "[[\"Hello\",\"./good.haml:1\"]]\n");
    let err = stderr(&output);
    assert!(err.contains("error: unterminated interpolation starting at byte 3  parse-error"));
    assert!(err.contains("--> ./bad.haml:2:7"));
    assert!(err.contains("1 file(s) could not be processed"));
    Ok(())
}

#[test]
fn test_extract_malformed_literal_is_warning() -> Result<()> {
    let test = CliTest::with_file(
        "page.haml",
        ":javascript\n  a(_('bad \\x41'));\n  b(_('good'));\n",
    )?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "[[\"good\",\"./page.haml:3\"]]\n");
    assert!(stderr(&output).contains("malformed-literal"));
    Ok(())
}

#[test]
fn test_extract_respects_config_ignores() -> Result<()> {
    let test = CliTest::with_file(".hamli18nrc.json", r#"{ "ignores": ["**/legacy/**"] }"#)?;
    test.write_file("app/index.haml", "Kept\n")?;
    test.write_file("app/legacy/old.haml", "Dropped\n")?;

    let output = test.extract_command().output()?;

    assert_eq!(stdout(&output), "[[\"Kept\",\"./app/index.haml:1\"]]\n");
    Ok(())
}

#[test]
fn test_extract_source_root() -> Result<()> {
    let test = CliTest::with_file("site/index.haml", "Welcome\n")?;
    test.write_file("index.haml", "Outside\n")?;

    let output = test
        .extract_command()
        .args(["--source-root", "site"])
        .output()?;

    assert_eq!(stdout(&output), "[[\"Welcome\",\"site/index.haml:1\"]]\n");
    Ok(())
}

#[test]
fn test_extract_invalid_config() -> Result<()> {
    let test = CliTest::with_file(".hamli18nrc.json", r#"{ "backend": "yaml" }"#)?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).starts_with("Error: Invalid value for 'backend'"));
    Ok(())
}
