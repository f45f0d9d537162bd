use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

const SAMPLE: &str = r#"<?xml version="1.0"?>
<opml version="2.0">
  <head>
    <title>Subscriptions</title>
    <dateCreated>Thu, 27 Jul 2000 03:24:18 GMT</dateCreated>
    <ownerName>Dave Winer</ownerName>
    <ownerEmail>dave@userland.com</ownerEmail>
  </head>
  <body>
    <outline text="News">
      <outline text="Example" type="rss" xmlUrl="https://example.com/feed.xml"/>
    </outline>
    <outline text="Music"/>
  </body>
</opml>
"#;

fn opml() -> Result<Command, Box<dyn std::error::Error>> {
    Ok(Command::cargo_bin("opml")?)
}

#[test]
fn tree_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("feeds.opml");
    fs::write(&input, SAMPLE)?;

    opml()?
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("title: Subscriptions"))
        .stdout(predicate::str::contains("owner: Dave Winer <dave@userland.com>"))
        .stdout(predicate::str::contains("created: Thu, 27 Jul 2000 03:24:18 +0000"))
        .stdout(predicate::str::contains("News\n  Example\nMusic\n"));
    Ok(())
}

#[test]
fn flatten_from_stdin() -> Result<(), Box<dyn std::error::Error>> {
    opml()?
        .arg("--flatten")
        .write_stdin(SAMPLE)
        .assert()
        .success()
        .stdout("News\nExample\nMusic\n");
    Ok(())
}

#[test]
fn json_output() -> Result<(), Box<dyn std::error::Error>> {
    let output = opml()?
        .args(["--format", "json"])
        .write_stdin(SAMPLE)
        .output()?;
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["version"], "2.0");
    assert_eq!(value["head"]["fields"]["title"], "Subscriptions");
    assert_eq!(
        value["outlines"][0]["outlines"][0]["attributes"]["xmlUrl"],
        "https://example.com/feed.xml"
    );
    Ok(())
}

#[test]
fn malformed_input_is_empty_by_default() -> Result<(), Box<dyn std::error::Error>> {
    opml()?
        .write_stdin("<opml><body><outline text='x'>")
        .assert()
        .success()
        .stdout("");
    Ok(())
}

#[test]
fn strict_rejects_malformed_input() -> Result<(), Box<dyn std::error::Error>> {
    opml()?
        .arg("--strict")
        .write_stdin("<opml><body></head></opml>")
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed OPML"));
    Ok(())
}

#[test]
fn max_depth_limits_nesting() -> Result<(), Box<dyn std::error::Error>> {
    opml()?
        .args(["--strict", "--max-depth", "2"])
        .write_stdin(SAMPLE)
        .assert()
        .failure();
    Ok(())
}

#[test]
fn missing_file_reports_path() -> Result<(), Box<dyn std::error::Error>> {
    opml()?
        .arg("does-not-exist.opml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist.opml"));
    Ok(())
}
