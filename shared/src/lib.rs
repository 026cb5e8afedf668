use serde::{Deserialize, Serialize};

/// Storage key holding the JSON array of menu names
pub const MENUS_STORAGE_KEY: &str = "training-menus";

/// Storage key holding the JSON array of records
pub const RECORDS_STORAGE_KEY: &str = "training-records";

/// Menus used whenever the stored set is missing, corrupt or empty
pub const DEFAULT_MENUS: [&str; 3] = ["ベンチプレス", "スクワット", "デッドリフト"];

/// The default menu set as owned strings, in display order
pub fn default_menus() -> Vec<String> {
    DEFAULT_MENUS.iter().map(|m| m.to_string()).collect()
}

/// One logged set.
///
/// Serialized with camelCase keys so the stored and exported shape is
/// `{ id, date, menu, weight, reps, createdAt }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Opaque unique identifier
    pub id: String,
    /// Calendar date of the set (YYYY-MM-DD)
    pub date: String,
    /// Exercise name; free text, not required to exist in the menu list
    pub menu: String,
    /// Weight lifted, always > 0
    pub weight: f64,
    /// Repetitions, always > 0
    pub reps: u32,
    /// Creation time in epoch milliseconds, used to break date ties
    pub created_at: i64,
}

/// Form input for a new record. Numeric fields are kept as raw text so that
/// every validation failure can be reported together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddRecordRequest {
    pub date: String,
    pub menu: String,
    pub weight: String,
    pub reps: String,
}

/// The export document: `{ "menus": [...], "records": [...] }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportData {
    pub menus: Vec<String>,
    pub records: Vec<Record>,
}

/// A rendered export ready to be written or downloaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportFile {
    /// `training-data-<YYYY-MM-DD>.json`
    pub filename: String,
    /// Pretty-printed JSON with 2-space indentation
    pub content: String,
    pub menu_count: usize,
    pub record_count: usize,
}

/// Result of writing an export file to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportToPathResponse {
    pub file_path: String,
    pub menu_count: usize,
    pub record_count: usize,
}

/// Summary of a completed import
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub menu_count: usize,
    pub record_count: usize,
    /// Record entries in the payload that were dropped during repair
    pub discarded_records: usize,
}
