//! Turn a tool-call source into a [`Document`]

use crate::error::{Error, Result};
use crate::pdf::validate_pdf_header;
use crate::pipeline::Document;
use base64::Engine;
use std::path::{Path, PathBuf};

/// Name given to base64 documents when the caller supplies none
pub const BASE64_DEFAULT_NAME: &str = "<base64>";

/// Whether `canonical` lies under one of `resource_dirs`
///
/// Directories that cannot be canonicalized are skipped.
pub fn is_within_resource_dirs(canonical: &Path, resource_dirs: &[PathBuf]) -> bool {
    resource_dirs.iter().any(|dir| {
        std::fs::canonicalize(dir)
            .map(|cd| canonical.starts_with(&cd))
            .unwrap_or(false)
    })
}

/// Check that `path` is inside the configured resource directories
///
/// With no directories configured every path is allowed and returned as-is.
/// Otherwise the path is canonicalized first so `..` and symlinks cannot
/// escape the sandbox.
pub fn validate_path_access(path: &str, resource_dirs: &[PathBuf]) -> Result<PathBuf> {
    if resource_dirs.is_empty() {
        return Ok(PathBuf::from(path));
    }

    let canonical = std::fs::canonicalize(path).map_err(|_| Error::PathAccessDenied {
        path: path.to_string(),
    })?;

    if is_within_resource_dirs(&canonical, resource_dirs) {
        Ok(canonical)
    } else {
        Err(Error::PathAccessDenied {
            path: path.to_string(),
        })
    }
}

fn check_size(size: u64, max_bytes: u64) -> Result<()> {
    if size > max_bytes {
        return Err(Error::DocumentTooLarge {
            size,
            max_size: max_bytes,
        });
    }
    Ok(())
}

/// Read a PDF file from disk
pub fn resolve_path<P: AsRef<Path>>(path: P, max_bytes: u64) -> Result<Document> {
    let path = path.as_ref();

    if !path.is_file() {
        return Err(Error::DocumentNotFound {
            path: path.display().to_string(),
        });
    }

    check_size(std::fs::metadata(path)?.len(), max_bytes)?;

    let data = std::fs::read(path)?;
    check_size(data.len() as u64, max_bytes)?;
    validate_pdf_header(&data)?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    Ok(Document::new(name, data))
}

/// Decode base64 (standard alphabet) PDF data
pub fn resolve_base64(encoded: &str, name: Option<&str>, max_bytes: u64) -> Result<Document> {
    // Decoded length is at most 3/4 of the encoded length
    check_size((encoded.len() as u64 / 4) * 3, max_bytes)?;

    let data = base64::engine::general_purpose::STANDARD.decode(encoded.trim())?;
    check_size(data.len() as u64, max_bytes)?;
    validate_pdf_header(&data)?;

    let name = name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(BASE64_DEFAULT_NAME);

    Ok(Document::new(name, data))
}
