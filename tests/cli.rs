use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

const ENV_VARS: [&str; 6] = [
    "TROVE_API_KEY",
    "TROVE_API_HOST",
    "TROVE_CONFIG",
    "TROVE_OUTPUT_DIR",
    "TROVE_FORMAT",
    "RUST_LOG",
];

fn write_config(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("config.yaml");
    fs::write(&path, body).expect("failed to write config");
    path
}

fn command() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("trove-contributors"));
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn version_prints_package_version() {
    command()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn status_uses_custom_config_path() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(
        temp.path(),
        "api_key: test-key\napi_host: http://example.invalid\noutput_dir: harvests\n",
    );

    let assert = command()
        .arg("status")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains(&config_path.to_string_lossy().to_string()));
    assert!(stdout.contains("API key configured"));
    assert!(stdout.contains("http://example.invalid"));
    assert!(stdout.contains("harvests"));

    Ok(())
}

#[test]
fn status_without_config_reports_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let missing = temp.path().join("missing.yaml");

    command()
        .arg("status")
        .arg("--config")
        .arg(&missing)
        .assert()
        .success()
        .stdout(predicate::str::contains("not found, using defaults"))
        .stdout(predicate::str::contains("API key not configured"))
        .stdout(predicate::str::contains("https://api.trove.nla.gov.au"));

    Ok(())
}

#[test]
fn harvest_without_api_key_fails_before_network() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    command()
        .arg("harvest")
        .arg("--config")
        .arg(temp.path().join("missing.yaml"))
        .arg("--output-dir")
        .arg(temp.path().join("out"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("API key not configured"));

    assert!(!temp.path().join("out").exists());
    Ok(())
}

#[test]
fn bare_invocation_runs_harvest() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    command()
        .arg("--config")
        .arg(temp.path().join("missing.yaml"))
        .arg("--output-dir")
        .arg(temp.path().join("out"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("API key not configured"));

    Ok(())
}

#[test]
fn invalid_config_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "retry: [not, a, map\n");

    command()
        .arg("status")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse configuration"));

    Ok(())
}

const LISTING: &str = r#"{
    "contributor": [
        {
            "id": "1",
            "name": "Adelaide City Libraries",
            "totalHoldings": "120",
            "nucCode": ["SACL"],
            "children": [
                { "id": "2", "name": "City Library", "totalHoldings": "80" }
            ]
        },
        { "id": "3", "name": "State Library", "totalHoldings": "5" }
    ]
}"#;

fn csv_files(dir: &Path) -> Vec<PathBuf> {
    match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "csv"))
            .collect(),
        Err(_) => Vec::new(),
    }
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn harvest_writes_raw_snapshot_and_flat_csv() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/v3/contributor")
        .match_query(mockito::Matcher::Any)
        .match_header("x-api-key", "test-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(LISTING)
        .create();

    let temp = tempdir()?;
    let out = temp.path().join("out");

    command()
        .arg("harvest")
        .arg("--config")
        .arg(temp.path().join("missing.yaml"))
        .arg("--output-dir")
        .arg(&out)
        .env("TROVE_API_KEY", "test-key")
        .env("TROVE_API_HOST", server.url())
        .assert()
        .success()
        .stdout(predicate::str::contains("Fetched 3 contributors (2 top-level)"));

    mock.assert();

    let csvs = csv_files(&out);
    assert_eq!(csvs.len(), 1);
    let contents = fs::read_to_string(&csvs[0])?;
    assert_eq!(
        contents,
        "id,nucCode,name,parentId,totalItems\n\
         1,SACL,Adelaide City Libraries,,120\n\
         2,,Adelaide City Libraries City Library,1,80\n\
         3,,State Library,,5\n"
    );

    let raw_count = fs::read_dir(&out)?
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().starts_with("contributors-raw-"))
        .count();
    assert_eq!(raw_count, 1);

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn harvest_gives_up_after_retries_without_flat_output() -> Result<(), Box<dyn std::error::Error>>
{
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/v3/contributor")
        .match_query(mockito::Matcher::Any)
        .with_status(503)
        .expect(2)
        .create();

    let temp = tempdir()?;
    let out = temp.path().join("out");
    let config_path = write_config(
        temp.path(),
        "retry:\n  max_attempts: 2\n  initial_delay_ms: 10\n  max_delay_ms: 20\n",
    );

    command()
        .arg("harvest")
        .arg("--config")
        .arg(&config_path)
        .arg("--output-dir")
        .arg(&out)
        .env("TROVE_API_KEY", "test-key")
        .env("TROVE_API_HOST", server.url())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Giving up after 2 attempts"));

    mock.assert();
    assert!(csv_files(&out).is_empty());

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn harvest_with_malformed_holdings_fails_without_flat_output()
-> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/v3/contributor")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(r#"{"contributor": [{"id": "9", "name": "Broken", "totalHoldings": "abc"}]}"#)
        .create();

    let temp = tempdir()?;
    let out = temp.path().join("out");

    command()
        .arg("harvest")
        .arg("--config")
        .arg(temp.path().join("missing.yaml"))
        .arg("--output-dir")
        .arg(&out)
        .env("TROVE_API_KEY", "test-key")
        .env("TROVE_API_HOST", server.url())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Contributor 9 has invalid totalHoldings 'abc'"));

    assert!(csv_files(&out).is_empty());
    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn bare_invocation_writes_both_artifacts() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/v3/contributor")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(LISTING)
        .create();

    let temp = tempdir()?;
    let out = temp.path().join("out");

    command()
        .arg("--config")
        .arg(temp.path().join("missing.yaml"))
        .arg("--output-dir")
        .arg(&out)
        .env("TROVE_API_KEY", "test-key")
        .env("TROVE_API_HOST", server.url())
        .assert()
        .success();

    assert_eq!(csv_files(&out).len(), 1);
    assert_eq!(fs::read_dir(&out)?.count(), 2);
    Ok(())
}
