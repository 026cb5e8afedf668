//! Menu store: the ordered list of exercise names.
use anyhow::Result;
use serde_json::Value;
use shared::{default_menus, MENUS_STORAGE_KEY};
use tracing::{info, warn};

use crate::domain::{
    models::AppState,
    sanitize::sanitize_menus,
    validation::{ValidationError, ValidationErrors},
};
use crate::storage::KeyValueStorage;

/// Parse the persisted menu list.
/// Missing, corrupt or empty data yields the default menus.
pub fn load(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        info!("No stored menus, using defaults");
        return default_menus();
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(value) => sanitize_menus(Some(&value)),
        Err(e) => {
            warn!("Stored menus are not valid JSON, using defaults: {}", e);
            default_menus()
        }
    }
}

/// Append a new menu and make it the active selection
pub fn add(state: &AppState, name: &str) -> Result<AppState, ValidationErrors> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::MenuNameRequired.into());
    }
    if state.menus.iter().any(|m| m == name) {
        return Err(ValidationError::DuplicateMenu(name.to_string()).into());
    }

    let mut menus = state.menus.clone();
    menus.push(name.to_string());
    Ok(AppState {
        menus,
        active_menu: name.to_string(),
        records: state.records.clone(),
    })
}

/// Remove a menu. Records that reference it are left untouched.
///
/// Removing the last menu restores the defaults; removing the active menu
/// moves the selection to the new first menu.
pub fn remove(state: &AppState, name: &str) -> AppState {
    let mut menus: Vec<String> = state.menus.iter().filter(|m| *m != name).cloned().collect();
    if menus.is_empty() {
        menus = default_menus();
    }

    let active_menu = if state.active_menu == name {
        menus.first().cloned().unwrap_or_default()
    } else {
        state.active_menu.clone()
    };

    AppState {
        menus,
        active_menu,
        records: state.records.clone(),
    }
}

/// Make an existing menu the active selection
pub fn select(state: &AppState, name: &str) -> Result<AppState, ValidationErrors> {
    if !state.menus.iter().any(|m| m == name) {
        return Err(ValidationError::UnknownMenu(name.to_string()).into());
    }
    Ok(AppState {
        active_menu: name.to_string(),
        ..state.clone()
    })
}

/// Persist the menu list.
/// An empty list is never written, so a transient empty state cannot wipe stored menus.
/// Returns whether anything was written.
pub async fn save<S: KeyValueStorage + ?Sized>(storage: &S, menus: &[String]) -> Result<bool> {
    if menus.is_empty() {
        warn!("Refusing to persist an empty menu list");
        return Ok(false);
    }
    let json = serde_json::to_string(menus)?;
    storage.put_value(MENUS_STORAGE_KEY, &json).await?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn state_with(menus: &[&str]) -> AppState {
        AppState::new(menus.iter().map(|m| m.to_string()).collect(), Vec::new())
    }

    #[test]
    fn test_load_without_data_returns_defaults() {
        assert_eq!(load(None), default_menus());
    }

    #[test]
    fn test_load_corrupt_or_empty_returns_defaults() {
        assert_eq!(load(Some("{not json")), default_menus());
        assert_eq!(load(Some("[]")), default_menus());
        assert_eq!(load(Some(r#"{"menus": ["a"]}"#)), default_menus());
    }

    #[test]
    fn test_load_cleans_entries() {
        assert_eq!(
            load(Some(r#"[" 懸垂 ", "", "ディップス"]"#)),
            vec!["懸垂".to_string(), "ディップス".to_string()]
        );
    }

    #[test]
    fn test_add_appends_and_selects() {
        let state = AppState::default();
        let next = add(&state, "  懸垂 ").unwrap();

        assert_eq!(next.menus.len(), 4);
        assert_eq!(next.menus.last().map(String::as_str), Some("懸垂"));
        assert_eq!(next.active_menu, "懸垂");
        // Snapshot passed in is untouched
        assert_eq!(state.menus, default_menus());
    }

    #[test]
    fn test_add_rejects_blank_name() {
        let state = AppState::default();
        let err = add(&state, "   ").unwrap_err();
        assert_eq!(err.errors(), &[ValidationError::MenuNameRequired]);
    }

    #[test]
    fn test_add_rejects_duplicate() {
        let state = AppState::default();
        let err = add(&state, "スクワット").unwrap_err();
        assert_eq!(err.errors(), &[ValidationError::DuplicateMenu("スクワット".to_string())]);
        assert_eq!(state.menus, default_menus());
    }

    #[test]
    fn test_add_duplicate_check_is_case_sensitive() {
        let state = state_with(&["Squat"]);
        let next = add(&state, "squat").unwrap();
        assert_eq!(next.menus, vec!["Squat".to_string(), "squat".to_string()]);
    }

    #[test]
    fn test_remove_last_menu_restores_defaults() {
        let state = state_with(&["懸垂"]);
        let next = remove(&state, "懸垂");
        assert_eq!(next.menus, default_menus());
        assert_eq!(next.active_menu, "ベンチプレス");
    }

    #[test]
    fn test_remove_active_menu_selects_new_first() {
        let state = state_with(&["A", "B", "C"]);
        assert_eq!(state.active_menu, "A");

        let next = remove(&state, "A");
        assert_eq!(next.menus, vec!["B".to_string(), "C".to_string()]);
        assert_eq!(next.active_menu, "B");
    }

    #[test]
    fn test_remove_inactive_menu_keeps_selection() {
        let state = select(&state_with(&["A", "B", "C"]), "C").unwrap();
        let next = remove(&state, "A");
        assert_eq!(next.active_menu, "C");
    }

    #[test]
    fn test_remove_keeps_records() {
        let mut state = state_with(&["A", "B"]);
        state.records.push(shared::Record {
            id: "r1".to_string(),
            date: "2024-01-10".to_string(),
            menu: "A".to_string(),
            weight: 20.0,
            reps: 5,
            created_at: 1,
        });

        let next = remove(&state, "A");
        assert_eq!(next.records, state.records);
    }

    #[test]
    fn test_select_unknown_menu() {
        let err = select(&AppState::default(), "懸垂").unwrap_err();
        assert_eq!(err.errors(), &[ValidationError::UnknownMenu("懸垂".to_string())]);
    }

    #[tokio::test]
    async fn test_save_skips_empty_list() {
        let storage = MemoryStorage::new();
        assert!(!save(&storage, &[]).await.unwrap());
        assert!(storage.get_value(MENUS_STORAGE_KEY).await.unwrap().is_none());

        assert!(save(&storage, &default_menus()).await.unwrap());
        let stored = storage.get_value(MENUS_STORAGE_KEY).await.unwrap().unwrap();
        assert_eq!(load(Some(&stored)), default_menus());
    }
}
