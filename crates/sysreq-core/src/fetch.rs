//! Ruleset ingestion: retrieving a rules archive and extracting the rule
//! records from it.
//!
//! The ruleset lives in a repository whose archive tarball contains one
//! JSON file per rule under a `deps/` directory; every regular entry whose
//! path matches `/deps/.*\.json$` is decoded as one [`RuleRecord`]. The
//! remote path streams the HTTP body through a gzip decoder straight into
//! the tar reader without buffering the whole archive; the local path
//! does the same synchronously for offline use. Either way the engine
//! only ever sees a fully built record list.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use sysreq_schema::RuleRecord;
use thiserror::Error;

use crate::diagnostics::Diagnostic;

/// Default location of the ruleset archive.
pub const DEFAULT_RULES_URL: &str =
    "https://github.com/trestletech/rdeps/archive/master.tar.gz";

// Matches rule files anywhere under a deps/ directory, independent of the
// archive's top-level prefix (GitHub tarballs prepend `<repo>-<ref>/`).
static RULE_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/deps/.*\.json$").expect("static pattern compiles"));

/// Errors raised while retrieving or reading a ruleset archive.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Network-level failure or non-success HTTP status.
    #[cfg(feature = "network")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Archive or filesystem failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The archive contained no rule entries at all, which almost always
    /// means the wrong URL or a changed repository layout.
    #[error("no rule entries found in archive from {url}")]
    NoRules {
        /// The archive location that was read.
        url: String,
    },
}

/// The outcome of reading a ruleset archive: the decoded records plus a
/// diagnostic for every entry that looked like a rule file but did not
/// decode.
#[derive(Debug, Default)]
pub struct FetchedRules {
    /// Rule records in archive order.
    pub records: Vec<RuleRecord>,
    /// One [`Diagnostic::MalformedEntry`] per skipped entry.
    pub diagnostics: Vec<Diagnostic>,
}

fn decode_entry(path: &str, data: &[u8], out: &mut FetchedRules) {
    match serde_json::from_slice::<RuleRecord>(data) {
        Ok(record) => {
            tracing::debug!(path, pattern = %record.regexp, "loaded rule entry");
            out.records.push(record);
        }
        Err(err) => {
            tracing::warn!(path, error = %err, "skipping malformed rule entry");
            out.diagnostics.push(Diagnostic::MalformedEntry {
                path: path.to_string(),
                message: err.to_string(),
            });
        }
    }
}

/// Fetch the ruleset archive from `url` and extract its rule records.
///
/// The response body is streamed: bytes flow through gzip decompression
/// into the tar reader as they arrive. A malformed rule entry is skipped
/// with a diagnostic; only transport and archive errors are fatal.
///
/// # Errors
///
/// Returns [`FetchError::Http`] for request or status failures,
/// [`FetchError::Io`] for a corrupt archive, and [`FetchError::NoRules`]
/// if no entry matched the rule-file pattern.
#[cfg(feature = "network")]
pub async fn fetch_rules(
    client: &reqwest::Client,
    url: &str,
) -> Result<FetchedRules, FetchError> {
    use futures::TryStreamExt;
    use tokio::io::AsyncReadExt;
    use tokio_util::io::StreamReader;

    let response = client
        .get(url)
        .header(reqwest::header::USER_AGENT, crate::USER_AGENT)
        .send()
        .await?
        .error_for_status()?;

    let stream = response.bytes_stream().map_err(std::io::Error::other);
    let decoder = async_compression::tokio::bufread::GzipDecoder::new(StreamReader::new(stream));
    let mut archive = tokio_tar::Archive::new(decoder);

    let mut out = FetchedRules::default();
    let mut entries = archive.entries()?;
    while let Some(mut entry) = entries.try_next().await? {
        if !entry.header().entry_type().is_file() {
            continue;
        }
        let path = entry.path()?.to_string_lossy().into_owned();
        if !RULE_ENTRY.is_match(&path) {
            continue;
        }

        let mut data = Vec::new();
        entry.read_to_end(&mut data).await?;
        decode_entry(&path, &data, &mut out);
    }

    if out.records.is_empty() && out.diagnostics.is_empty() {
        return Err(FetchError::NoRules {
            url: url.to_string(),
        });
    }

    tracing::info!(
        url,
        rules = out.records.len(),
        skipped = out.diagnostics.len(),
        "fetched ruleset archive"
    );
    Ok(out)
}

/// Stream the ruleset archive from `url` to a file on disk, for later
/// offline use with [`load_rules_archive`]. Returns the byte count.
///
/// # Errors
///
/// Returns [`FetchError::Http`] for request or status failures and
/// [`FetchError::Io`] if the destination cannot be written.
#[cfg(feature = "network")]
pub async fn download_archive(
    client: &reqwest::Client,
    url: &str,
    dest: &Path,
) -> Result<u64, FetchError> {
    use futures::StreamExt;
    use tokio::io::AsyncWriteExt;

    let response = client
        .get(url)
        .header(reqwest::header::USER_AGENT, crate::USER_AGENT)
        .send()
        .await?
        .error_for_status()?;

    let mut file = tokio::fs::File::create(dest).await?;
    let mut stream = response.bytes_stream();
    let mut written: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;

    tracing::info!(url, bytes = written, dest = %dest.display(), "downloaded ruleset archive");
    Ok(written)
}

/// Extract rule records from a local `.tar.gz` ruleset archive.
///
/// Same entry filter and decode behavior as [`fetch_rules`], reading
/// synchronously from disk.
///
/// # Errors
///
/// Returns [`FetchError::Io`] if the file cannot be opened or is not a
/// valid gzip tarball, and [`FetchError::NoRules`] if no entry matched.
pub fn load_rules_archive(path: &Path) -> Result<FetchedRules, FetchError> {
    use std::io::Read;

    let file = std::fs::File::open(path)?;
    let mut archive = tar::Archive::new(flate2::read::GzDecoder::new(file));

    let mut out = FetchedRules::default();
    for entry in archive.entries()? {
        let mut entry = entry?;
        if !entry.header().entry_type().is_file() {
            continue;
        }
        let entry_path = entry.path()?.to_string_lossy().into_owned();
        if !RULE_ENTRY.is_match(&entry_path) {
            continue;
        }

        let mut data = Vec::new();
        entry.read_to_end(&mut data)?;
        decode_entry(&entry_path, &data, &mut out);
    }

    if out.records.is_empty() && out.diagnostics.is_empty() {
        return Err(FetchError::NoRules {
            url: path.display().to_string(),
        });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build an in-memory gzipped tarball from (path, contents) pairs.
    fn build_archive(entries: &[(&str, &str)]) -> Vec<u8> {
        let encoder =
            flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        let mut builder = tar::Builder::new(encoder);

        for (path, contents) in entries {
            let mut header = tar::Header::new_gnu();
            header.set_size(contents.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder
                .append_data(&mut header, path, contents.as_bytes())
                .unwrap();
        }

        builder.into_inner().unwrap().finish().unwrap()
    }

    const CURL_RULE: &str = r#"{
        "description": "curl headers",
        "regexp": "libcurl",
        "dependencies": [{
            "sysConstraints": [{"os": "linux"}],
            "sysPkgs": ["libcurl4-openssl-dev"]
        }]
    }"#;

    #[test]
    fn test_load_local_archive() {
        let bytes = build_archive(&[
            ("rdeps-master/README.md", "not a rule"),
            ("rdeps-master/deps/curl.json", CURL_RULE),
            ("rdeps-master/deps/notes.txt", "also not a rule"),
        ]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.tar.gz");
        std::fs::write(&path, bytes).unwrap();

        let fetched = load_rules_archive(&path).unwrap();
        assert_eq!(fetched.records.len(), 1);
        assert_eq!(fetched.records[0].regexp, "libcurl");
        assert!(fetched.diagnostics.is_empty());
    }

    #[test]
    fn test_load_archive_without_rules() {
        let bytes = build_archive(&[("rdeps-master/README.md", "nothing here")]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.tar.gz");
        std::fs::write(&path, bytes).unwrap();

        assert!(matches!(
            load_rules_archive(&path),
            Err(FetchError::NoRules { .. })
        ));
    }

    #[test]
    fn test_malformed_entry_is_skipped_with_diagnostic() {
        let bytes = build_archive(&[
            ("rdeps-master/deps/bad.json", "{ not json"),
            ("rdeps-master/deps/curl.json", CURL_RULE),
        ]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.tar.gz");
        std::fs::write(&path, bytes).unwrap();

        let fetched = load_rules_archive(&path).unwrap();
        assert_eq!(fetched.records.len(), 1);
        assert_eq!(fetched.diagnostics.len(), 1);
        assert!(matches!(
            &fetched.diagnostics[0],
            Diagnostic::MalformedEntry { path, .. } if path.ends_with("bad.json")
        ));
    }

    #[cfg(feature = "network")]
    mod network {
        use super::{CURL_RULE, build_archive};
        use crate::fetch::{FetchError, download_archive, fetch_rules, load_rules_archive};

        #[tokio::test]
        async fn test_fetch_rules_from_http() {
            let mut server = mockito::Server::new_async().await;
            let body = build_archive(&[
                ("rdeps-master/deps/curl.json", CURL_RULE),
                ("rdeps-master/other/skip.json", "{}"),
            ]);
            let mock = server
                .mock("GET", "/archive/master.tar.gz")
                .with_status(200)
                .with_body(body)
                .create_async()
                .await;

            let client = reqwest::Client::new();
            let url = format!("{}/archive/master.tar.gz", server.url());
            let fetched = fetch_rules(&client, &url).await.unwrap();

            mock.assert_async().await;
            assert_eq!(fetched.records.len(), 1);
            assert_eq!(fetched.records[0].description, "curl headers");
        }

        #[tokio::test]
        async fn test_fetch_propagates_http_status() {
            let mut server = mockito::Server::new_async().await;
            server
                .mock("GET", "/archive/master.tar.gz")
                .with_status(404)
                .create_async()
                .await;

            let client = reqwest::Client::new();
            let url = format!("{}/archive/master.tar.gz", server.url());
            assert!(matches!(
                fetch_rules(&client, &url).await,
                Err(FetchError::Http(_))
            ));
        }

        #[tokio::test]
        async fn test_download_archive_writes_file() {
            let mut server = mockito::Server::new_async().await;
            let body = build_archive(&[("rdeps-master/deps/curl.json", CURL_RULE)]);
            server
                .mock("GET", "/archive/master.tar.gz")
                .with_status(200)
                .with_body(body.clone())
                .create_async()
                .await;

            let dir = tempfile::tempdir().unwrap();
            let dest = dir.path().join("rules.tar.gz");
            let client = reqwest::Client::new();
            let url = format!("{}/archive/master.tar.gz", server.url());

            let written = download_archive(&client, &url, &dest).await.unwrap();
            assert_eq!(written, body.len() as u64);

            // The downloaded file round-trips through the offline loader.
            let fetched = load_rules_archive(&dest).unwrap();
            assert_eq!(fetched.records.len(), 1);
        }
    }
}
