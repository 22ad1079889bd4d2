use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

fn zoneglance() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("zoneglance"))
}

#[test]
fn convert_labels_day_rollover() {
    // 5pm EST = 22:00 UTC = 7:00 AM next day in Tokyo.
    zoneglance()
        .args([
            "--reference",
            "2023-01-04T04:00:00Z",
            "convert",
            "5pm EST",
            "--to",
            "Asia/Tokyo",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("7:00 AM"))
        .stdout(predicate::str::contains("JST (+09:00)"))
        .stdout(predicate::str::contains("(Next Day)"));
}

#[test]
fn convert_24h_format() {
    // Epoch input is zone-independent, so the output does not depend on the
    // test machine's timezone.
    zoneglance()
        .args(["convert", "1672531200000", "--to", "Asia/Tokyo", "--24h"])
        .assert()
        .success()
        .stdout(predicate::str::contains("09:00 JST (+09:00)"));
}

#[test]
fn convert_rejects_unknown_zone() {
    zoneglance()
        .args(["convert", "1672531200000", "--to", "Mars/Phobos"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown timezone"));
}

#[test]
fn parse_emits_json() {
    let assert = zoneglance()
        .args(["parse", "1672531200000"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(json["matched_text"], "1672531200000");
    assert_eq!(json["instant"], "2023-01-01T00:00:00Z");
    assert_eq!(json["source_offset_minutes"], serde_json::Value::Null);
}

#[test]
fn parse_respects_language_tag() {
    let assert = zoneglance()
        .args([
            "--lang",
            "en-GB",
            "--reference",
            "2023-01-01T12:00:00Z",
            "parse",
            "01/02/2023",
        ])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    // Day-first: 1 February, not 2 January. The date resolves at local
    // midnight, so in UTC it lands on Feb 1 or the evening of Jan 31
    // depending on the machine's zone.
    let instant = json["instant"].as_str().expect("instant string");
    assert!(
        instant.starts_with("2023-02-01") || instant.starts_with("2023-01-31"),
        "instant: {instant}"
    );
}

#[test]
fn lang_env_var_is_a_fallback() {
    let assert = zoneglance()
        .env("LANG", "en_GB.UTF-8")
        .args(["--reference", "2023-01-01T12:00:00Z", "parse", "01/02/2023"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    let instant = json["instant"].as_str().expect("instant string");
    assert!(
        instant.starts_with("2023-02-01") || instant.starts_with("2023-01-31"),
        "instant: {instant}"
    );
}

#[test]
fn parse_fails_on_unrecognized_text() {
    zoneglance()
        .args(["parse", "nothing datelike here"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "no date or time expression recognized",
        ));
}

#[test]
fn zone_normalizes_aliases() {
    zoneglance()
        .args(["zone", "US/Eastern"])
        .assert()
        .success()
        .stdout("America/New_York\n");
}

#[test]
fn zone_without_argument_prints_system_zone() {
    let assert = zoneglance().arg("zone").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(!stdout.trim().is_empty());
}

#[test]
fn bad_reference_is_an_error() {
    zoneglance()
        .args(["--reference", "yesterday", "parse", "1400"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid --reference"));
}
