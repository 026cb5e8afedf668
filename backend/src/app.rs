//! # App Controller
//!
//! [`TrainingLog`] owns the current [`AppState`] and the storage handle.
//! Every mutating operation computes a new snapshot with the pure domain
//! functions, mirrors whatever changed to storage, and only then swaps the
//! snapshot in. A failed write leaves the in-memory state untouched.
//!
//! Persist order is fixed: menus first, then records. If the records write
//! fails after the menus were written, the previous menus are written back.
//! The two writes are still independent, so a crash between them leaves each
//! key well-formed but possibly out of step with the other.

use chrono::NaiveDate;
use shared::{AddRecordRequest, ExportFile, ImportSummary, Record, MENUS_STORAGE_KEY, RECORDS_STORAGE_KEY};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::{
    menu_service, record_service, AppState, ExportService, ImportError, ImportedData, ValidationErrors,
};
use crate::storage::KeyValueStorage;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub struct TrainingLog<S: KeyValueStorage> {
    storage: S,
    state: AppState,
    export_service: ExportService,
}

impl<S: KeyValueStorage> TrainingLog<S> {
    /// Load both collections from storage.
    ///
    /// Corrupt or missing data falls back to defaults / empty. The loaded
    /// snapshot is then written back, so seeded defaults and repaired
    /// records are what storage holds from here on.
    ///
    /// A storage read that fails is an error, never an empty log: treating
    /// it as absent data would overwrite the stored log on write-back.
    pub async fn open(storage: S) -> Result<Self, AppError> {
        let raw_menus = storage.get_value(MENUS_STORAGE_KEY).await?;
        let raw_records = storage.get_value(RECORDS_STORAGE_KEY).await?;

        let state = AppState::new(
            menu_service::load(raw_menus.as_deref()),
            record_service::load(raw_records.as_deref()),
        );
        info!(
            "Loaded {} menus and {} records",
            state.menus.len(),
            state.records.len()
        );

        let log = Self {
            storage,
            state,
            export_service: ExportService::new(),
        };
        log.persist(&log.state, None).await?;
        Ok(log)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn menus(&self) -> &[String] {
        &self.state.menus
    }

    pub fn active_menu(&self) -> &str {
        &self.state.active_menu
    }

    /// Records in stored (insertion) order
    pub fn records(&self) -> &[Record] {
        &self.state.records
    }

    /// Records in display order
    pub fn sorted_records(&self) -> Vec<Record> {
        record_service::sort_for_display(&self.state.records)
    }

    pub async fn add_menu(&mut self, name: &str) -> Result<(), AppError> {
        let next = menu_service::add(&self.state, name)?;
        info!("Added menu {}", next.active_menu);
        self.commit(next).await
    }

    pub async fn remove_menu(&mut self, name: &str) -> Result<(), AppError> {
        let next = menu_service::remove(&self.state, name);
        info!("Removed menu {}", name);
        self.commit(next).await
    }

    pub async fn select_menu(&mut self, name: &str) -> Result<(), AppError> {
        let next = menu_service::select(&self.state, name)?;
        self.commit(next).await
    }

    /// Add a record. A blank menu in the request means the active selection.
    pub async fn add_record(&mut self, mut request: AddRecordRequest) -> Result<Record, AppError> {
        if request.menu.trim().is_empty() {
            request.menu = self.state.active_menu.clone();
        }
        let (next, record) = record_service::add(&self.state, &request)?;
        self.commit(next).await?;
        Ok(record)
    }

    /// Returns whether a record with `id` existed
    pub async fn remove_record(&mut self, id: &str) -> Result<bool, AppError> {
        let next = record_service::remove(&self.state, id);
        let removed = next.records.len() != self.state.records.len();
        if removed {
            info!("Removed record {}", id);
        }
        self.commit(next).await?;
        Ok(removed)
    }

    pub fn export(&self, export_date: NaiveDate) -> Result<ExportFile, AppError> {
        Ok(self
            .export_service
            .export(&self.state.menus, &self.state.records, export_date)?)
    }

    pub fn export_service(&self) -> &ExportService {
        &self.export_service
    }

    /// Replace both stores with the normalized contents of `raw_json`.
    /// On any error the current state is left exactly as it was.
    pub async fn import_json(&mut self, raw_json: &str) -> Result<ImportSummary, AppError> {
        let ImportedData {
            menus,
            records,
            discarded_records,
        } = self.export_service.import(raw_json)?;

        let summary = ImportSummary {
            menu_count: menus.len(),
            record_count: records.len(),
            discarded_records,
        };
        self.commit(AppState::new(menus, records)).await?;
        info!(
            "Imported {} menus and {} records",
            summary.menu_count, summary.record_count
        );
        Ok(summary)
    }

    /// Read `path` and import it. If several imports are started, whichever
    /// finishes last determines the final state.
    pub async fn import_file<P: AsRef<Path>>(&mut self, path: P) -> Result<ImportSummary, AppError> {
        let raw = tokio::fs::read_to_string(path.as_ref())
            .await
            .map_err(ImportError::from)?;
        self.import_json(&raw).await
    }

    async fn commit(&mut self, next: AppState) -> Result<(), AppError> {
        self.persist(&next, Some(&self.state)).await?;
        self.state = next;
        Ok(())
    }

    /// Mirror the collections of `next` that differ from `previous` to
    /// storage, menus before records. With no previous snapshot both are written.
    async fn persist(&self, next: &AppState, previous: Option<&AppState>) -> Result<(), AppError> {
        let menus_changed = previous.map_or(true, |p| p.menus != next.menus);
        let records_changed = previous.map_or(true, |p| p.records != next.records);

        if menus_changed {
            menu_service::save(&self.storage, &next.menus).await?;
            debug!("Persisted {} menus", next.menus.len());
        }
        if records_changed {
            if let Err(e) = record_service::save(&self.storage, &next.records).await {
                if let Some(previous) = previous.filter(|_| menus_changed) {
                    if let Err(restore) = menu_service::save(&self.storage, &previous.menus).await {
                        warn!("Failed to restore menus after a failed records write: {}", restore);
                    }
                }
                return Err(e.into());
            }
            debug!("Persisted {} records", next.records.len());
        }
        Ok(())
    }
}
