use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, run_with_stdin, stderr, stdout};

#[test]
fn test_rewrite_file_with_default_backend() -> Result<()> {
    let test = CliTest::with_file("page.haml", "%h1 Title\n%p Hello #{name}!\n")?;

    let output = test.rewrite_command().arg("page.haml").output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "- extend I18n::Gettext::Helpers\n%h1 #{_('Title') % []}\n%p #{_('Hello %s!') % [name]}\n"
    );
    assert_eq!(stderr(&output), "");
    Ok(())
}

#[test]
fn test_rewrite_stdin_with_custom_backend() -> Result<()> {
    let test = CliTest::new()?;
    let mut cmd = test.rewrite_command();
    cmd.args(["-", "--backend", "custom", "--escape-html"]);

    let output = run_with_stdin(cmd, "Hi #{user}\n%p= _('Kept')\n")?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "!= _('Hi %s') % [Haml::Helpers.html_escape(user)]\n%p= _('Kept')\n"
    );
    Ok(())
}

#[test]
fn test_rewrite_no_magic_keeps_template() -> Result<()> {
    let source = "%p Hello #{name}!\n";
    let test = CliTest::with_file("page.haml", source)?;

    let output = test
        .rewrite_command()
        .args(["page.haml", "--no-magic"])
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), source);
    Ok(())
}

#[test]
fn test_rewrite_disabled_in_config() -> Result<()> {
    let source = "%p Hello\n";
    let test = CliTest::with_file(".hamli18nrc.json", r#"{ "magicTranslations": false }"#)?;
    test.write_file("page.haml", source)?;

    let output = test.rewrite_command().arg("page.haml").output()?;

    assert_eq!(stdout(&output), source);
    Ok(())
}

#[test]
fn test_rewrite_unknown_backend() -> Result<()> {
    let test = CliTest::with_file("page.haml", "%p Hello\n")?;

    let output = test
        .rewrite_command()
        .args(["page.haml", "--backend", "yaml"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert_eq!(
        stderr(&output),
        "Error: translation backend 'yaml' is not available (expected one of: i18n, gettext, fast_gettext, custom)\n"
    );
    Ok(())
}

#[test]
fn test_rewrite_unbalanced_interpolation() -> Result<()> {
    let test = CliTest::new()?;
    let mut cmd = test.rewrite_command();
    cmd.arg("-");

    let output = run_with_stdin(cmd, "%p Hello #{name\n")?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "");
    let err = stderr(&output);
    assert!(err.contains("error: unterminated interpolation starting at byte 6"));
    assert!(err.contains("--> (haml):1:10"));
    Ok(())
}

#[test]
fn test_rewrite_missing_file() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.rewrite_command().arg("missing.haml").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).starts_with("Error: Failed to read file: missing.haml"));
    Ok(())
}
