//! End-to-end tests driving the `sysreq` binary against fixture archives.

use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// Test context holding a fixture ruleset archive in a temp dir.
struct TestContext {
    _temp_dir: TempDir,
    rules_path: PathBuf,
}

const CURL_RULE: &str = r#"{
    "description": "curl headers",
    "regexp": "libcurl",
    "dependencies": [{
        "sysConstraints": [{"os": "linux"}],
        "sysPkgs": ["libcurl4-openssl-dev"],
        "scripts": ["update-ca-certificates"]
    }]
}"#;

const BROKEN_RULE: &str = r#"{
    "description": "broken",
    "regexp": "lib(oops",
    "dependencies": []
}"#;

impl TestContext {
    fn new(rules: &[(&str, &str)]) -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let rules_path = temp_dir.path().join("rules.tar.gz");

        let encoder = flate2::write::GzEncoder::new(
            std::fs::File::create(&rules_path).expect("failed to create archive"),
            flate2::Compression::default(),
        );
        let mut builder = tar::Builder::new(encoder);
        for (name, contents) in rules {
            let mut header = tar::Header::new_gnu();
            header.set_size(contents.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder
                .append_data(
                    &mut header,
                    format!("rules-master/deps/{name}"),
                    contents.as_bytes(),
                )
                .expect("failed to append entry");
        }
        builder
            .into_inner()
            .expect("failed to finish tar")
            .finish()
            .expect("failed to finish gzip");

        Self {
            _temp_dir: temp_dir,
            rules_path,
        }
    }
}

#[test]
fn test_help_command() {
    let output = Command::new(env!("CARGO_BIN_EXE_sysreq"))
        .arg("--help")
        .output()
        .expect("failed to run sysreq");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("resolve"));
}

#[test]
fn test_resolve_matching_environment() {
    let ctx = TestContext::new(&[("curl.json", CURL_RULE)]);
    let output = Command::new(env!("CARGO_BIN_EXE_sysreq"))
        .args(["resolve", "libcurl", "--os", "linux", "--arch", "amd64"])
        .arg("--rules")
        .arg(&ctx.rules_path)
        .output()
        .expect("failed to run sysreq");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("libcurl4-openssl-dev"));
    assert!(stdout.contains("update-ca-certificates"));
    assert!(stdout.contains("RESOLVE COMPLETE 1 action(s)"));
}

#[test]
fn test_resolve_non_matching_environment() {
    let ctx = TestContext::new(&[("curl.json", CURL_RULE)]);
    let output = Command::new(env!("CARGO_BIN_EXE_sysreq"))
        .args(["resolve", "libcurl", "--os", "darwin", "--arch", "arm64"])
        .arg("--rules")
        .arg(&ctx.rules_path)
        .output()
        .expect("failed to run sysreq");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No actions required"));
}

#[test]
fn test_resolve_json_output() {
    let ctx = TestContext::new(&[("curl.json", CURL_RULE)]);
    let output = Command::new(env!("CARGO_BIN_EXE_sysreq"))
        .args(["resolve", "libcurl", "--os", "linux", "--json"])
        .arg("--rules")
        .arg(&ctx.rules_path)
        .output()
        .expect("failed to run sysreq");

    assert!(output.status.success());
    let actions: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is not valid JSON");
    assert_eq!(actions[0]["systemPackages"][0], "libcurl4-openssl-dev");
}

#[test]
fn test_check_reports_broken_rule() {
    let ctx = TestContext::new(&[("curl.json", CURL_RULE), ("broken.json", BROKEN_RULE)]);
    let output = Command::new(env!("CARGO_BIN_EXE_sysreq"))
        .arg("check")
        .arg("--rules")
        .arg(&ctx.rules_path)
        .output()
        .expect("failed to run sysreq");

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("rules:        2"));
    assert!(stdout.contains("warning:"));
}

#[test]
fn test_check_healthy_ruleset() {
    let ctx = TestContext::new(&[("curl.json", CURL_RULE)]);
    let output = Command::new(env!("CARGO_BIN_EXE_sysreq"))
        .arg("check")
        .arg("--rules")
        .arg(&ctx.rules_path)
        .output()
        .expect("failed to run sysreq");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("OK"));
}
