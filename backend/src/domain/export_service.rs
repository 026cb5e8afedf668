//! Export and import of the whole training log as one JSON document.
//!
//! Export renders `{ "menus": [...], "records": [...] }` pretty-printed.
//! Import accepts any object with optional `menus`/`records` arrays and runs
//! them through the same repair rules used when loading from storage.

use anyhow::Result;
use chrono::NaiveDate;
use serde_json::Value;
use shared::{ExportData, ExportFile, ExportToPathResponse, Record};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::domain::sanitize::{sanitize_menus, sanitize_records};

/// Why an import was rejected. State is never touched when one of these is returned.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read/parse JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read/parse JSON: {0}")]
    Read(#[from] std::io::Error),
    #[error("invalid JSON shape: expected an object with \"menus\" and \"records\"")]
    InvalidShape,
}

/// A fully normalized import payload, ready to replace both stores
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedData {
    pub menus: Vec<String>,
    pub records: Vec<Record>,
    pub discarded_records: usize,
}

/// Export service that handles rendering and parsing of export files
#[derive(Clone)]
pub struct ExportService {}

impl ExportService {
    pub fn new() -> Self {
        Self {}
    }

    /// `training-data-<YYYY-MM-DD>.json`
    pub fn export_filename(date: NaiveDate) -> String {
        format!("training-data-{}.json", date.format("%Y-%m-%d"))
    }

    /// Render menus and records (in stored order) as the export document
    pub fn export(&self, menus: &[String], records: &[Record], export_date: NaiveDate) -> Result<ExportFile> {
        let data = ExportData {
            menus: menus.to_vec(),
            records: records.to_vec(),
        };
        // serde_json's pretty printer indents with two spaces
        let content = serde_json::to_string_pretty(&data)?;

        let file = ExportFile {
            filename: Self::export_filename(export_date),
            content,
            menu_count: data.menus.len(),
            record_count: data.records.len(),
        };
        info!(
            "Exported {} menus and {} records ({} bytes) as {}",
            file.menu_count,
            file.record_count,
            file.content.len(),
            file.filename
        );
        Ok(file)
    }

    /// Parse and normalize an export document.
    ///
    /// Records without a usable menu get the first menu of the imported set.
    pub fn import(&self, raw_json: &str) -> Result<ImportedData, ImportError> {
        let value: Value = serde_json::from_str(raw_json)?;
        let Value::Object(object) = value else {
            return Err(ImportError::InvalidShape);
        };

        let menus = sanitize_menus(object.get("menus"));
        let fallback_menu = menus.first().map(String::as_str);
        let (records, discarded_records) = sanitize_records(object.get("records"), fallback_menu);

        if discarded_records > 0 {
            warn!("Import dropped {} invalid records", discarded_records);
        }
        info!("Parsed import with {} menus and {} records", menus.len(), records.len());

        Ok(ImportedData {
            menus,
            records,
            discarded_records,
        })
    }

    /// Write an export file into `custom_dir`, or the documents directory
    /// (falling back to home) when no directory is given
    pub fn export_to_path(&self, file: &ExportFile, custom_dir: Option<&str>) -> Result<ExportToPathResponse> {
        let export_dir = match custom_dir {
            Some(dir) if !dir.trim().is_empty() => dir_from_input(dir),
            _ => dirs::document_dir()
                .or_else(dirs::home_dir)
                .ok_or_else(|| anyhow::anyhow!("Could not determine a default export directory"))?,
        };

        if let Err(e) = fs::create_dir_all(&export_dir) {
            error!("Failed to create export directory {:?}: {}", export_dir, e);
            return Err(e.into());
        }

        let file_path = export_dir.join(&file.filename);
        fs::write(&file_path, &file.content)?;

        let file_path = file_path.to_string_lossy().to_string();
        info!("Wrote export to {}", file_path);
        Ok(ExportToPathResponse {
            file_path,
            menu_count: file.menu_count,
            record_count: file.record_count,
        })
    }
}

/// Turn a user-typed directory into a path. Surrounding quotes go, `\ `
/// becomes a space, trailing separators are dropped and a leading `~` is
/// the home directory.
fn dir_from_input(input: &str) -> PathBuf {
    let trimmed = input.trim();
    let unquoted = ['"', '\'']
        .iter()
        .find_map(|quote| trimmed.strip_prefix(*quote)?.strip_suffix(*quote))
        .map_or(trimmed, str::trim);
    let unescaped = unquoted.replace("\\ ", " ");

    let mut dir = unescaped.trim_end_matches(&['/', '\\'][..]);
    if dir.is_empty() && !unescaped.is_empty() {
        // Only separators: keep the root
        dir = &unescaped[..1];
    }

    if let Some(home) = dirs::home_dir() {
        if dir == "~" {
            return home;
        }
        if let Some(rest) = dir.strip_prefix("~/").or_else(|| dir.strip_prefix("~\\")) {
            return home.join(rest);
        }
    }
    PathBuf::from(dir)
}

impl Default for ExportService {
    fn default() -> Self {
        Self::new()
    }
}
