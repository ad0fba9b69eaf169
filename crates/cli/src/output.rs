//! Reading pages from and writing records to disk.

use std::path::Path;

use anyhow::{Context, Result};
use partscope_core::Error;
use serde::Serialize;

pub async fn read_html(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(Error::Io)
        .with_context(|| format!("reading {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write `bytes` to `path`, creating parent directories as needed.
pub async fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(Error::Io)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    tokio::fs::write(path, bytes)
        .await
        .map_err(Error::Io)
        .with_context(|| format!("writing {}", path.display()))
}

/// Pretty JSON to `path`, or stdout when no path is given.
pub async fn emit_json<T: Serialize>(value: &T, path: Option<&Path>) -> Result<()> {
    let mut json = serde_json::to_string_pretty(value).map_err(Error::Serialize)?;
    json.push('\n');
    match path {
        Some(path) => write_file(path, json.as_bytes()).await,
        None => {
            print!("{json}");
            Ok(())
        }
    }
}
