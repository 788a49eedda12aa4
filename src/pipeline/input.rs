//! Input resolution: turn a user-supplied path or URL into submission text.
//!
//! Submissions are read whole into memory; the pipeline works on one buffer.
//! EDGAR full-text files are nominally ASCII but older ones carry stray
//! Latin-1 bytes, so bytes are decoded lossily rather than rejected. The
//! replacement characters are non-ASCII and become spaces in the
//! normalisation stage.

use crate::config::ExtractionConfig;
use crate::error::EdgarError;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Check if the input string looks like a URL.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Read the submission named by `input`.
///
/// If the input is a URL it is downloaded with the configured timeout and
/// user agent; otherwise it is read from the local file system.
pub async fn resolve_input(input: &str, config: &ExtractionConfig) -> Result<String, EdgarError> {
    if input.trim().is_empty() {
        return Err(EdgarError::InvalidInput {
            input: input.to_string(),
        });
    }
    if is_url(input) {
        download_url(input, config).await
    } else {
        read_local(input).await
    }
}

/// Read a local file, mapping I/O failures to input errors.
async fn read_local(path_str: &str) -> Result<String, EdgarError> {
    let path = PathBuf::from(path_str);

    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(EdgarError::PermissionDenied { path });
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(EdgarError::FileNotFound { path });
        }
        Err(e) => {
            return Err(EdgarError::Internal(format!(
                "Failed to read '{}': {e}",
                path.display()
            )));
        }
    };

    debug!("Read local submission: {} ({} bytes)", path.display(), bytes.len());
    Ok(decode_bytes(&bytes))
}

/// Download a URL into memory.
async fn download_url(url: &str, config: &ExtractionConfig) -> Result<String, EdgarError> {
    info!("Downloading submission from: {}", url);
    let timeout_secs = config.download_timeout_secs;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(|e| EdgarError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            EdgarError::DownloadTimeout {
                url: url.to_string(),
                secs: timeout_secs,
            }
        } else {
            EdgarError::DownloadFailed {
                url: url.to_string(),
                reason: e.to_string(),
            }
        }
    })?;

    if !response.status().is_success() {
        return Err(EdgarError::DownloadFailed {
            url: url.to_string(),
            reason: format!("HTTP {}", response.status()),
        });
    }

    let bytes = response.bytes().await.map_err(|e| {
        if e.is_timeout() {
            EdgarError::DownloadTimeout {
                url: url.to_string(),
                secs: timeout_secs,
            }
        } else {
            EdgarError::DownloadFailed {
                url: url.to_string(),
                reason: e.to_string(),
            }
        }
    })?;

    info!("Downloaded {} bytes from {}", bytes.len(), url);
    Ok(decode_bytes(&bytes))
}

/// Decode raw bytes as UTF-8, replacing invalid sequences.
pub fn decode_bytes(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// A file name for the cleaned text of `input`: its last path or URL
/// segment with the extension replaced by `.txt`.
pub fn output_file_name(input: &str) -> String {
    let last = if is_url(input) {
        reqwest::Url::parse(input)
            .ok()
            .and_then(|u| {
                u.path_segments()
                    .and_then(|mut s| s.next_back().map(str::to_string))
            })
            .unwrap_or_default()
    } else {
        std::path::Path::new(input)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    };

    let stem = match last.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => last,
    };
    if stem.is_empty() {
        "submission.txt".to_string()
    } else {
        format!("{stem}.txt")
    }
}

/// One target path in `dir` per input, in input order.
///
/// Inputs that share a file name get `-2`, `-3`, … suffixes so no output
/// overwrites another. A target that is one of the inputs themselves (for
/// example `--output-dir raw/ raw/*.txt`) is an error.
pub fn output_paths(inputs: &[String], dir: &Path) -> Result<Vec<PathBuf>, EdgarError> {
    let input_files: HashSet<PathBuf> = inputs
        .iter()
        .filter(|i| !is_url(i))
        .map(|i| resolved(Path::new(i)))
        .collect();
    let dir = resolved(dir);

    let mut used = HashSet::new();
    let mut paths = Vec::with_capacity(inputs.len());
    for input in inputs {
        let name = output_file_name(input);
        let mut candidate = name.clone();
        let stem = name.strip_suffix(".txt").unwrap_or(&name).to_string();
        let mut n = 2;
        while used.contains(&candidate) {
            candidate = format!("{stem}-{n}.txt");
            n += 1;
        }

        let path = dir.join(&candidate);
        if input_files.contains(&path) {
            return Err(EdgarError::InvalidConfig(format!(
                "Output '{}' would overwrite input '{}'; choose another output directory",
                path.display(),
                input
            )));
        }
        used.insert(candidate);
        paths.push(path);
    }
    Ok(paths)
}

/// Canonical form of `path` when it exists, the path as given otherwise.
fn resolved(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
