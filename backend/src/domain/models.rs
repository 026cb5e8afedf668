//! Application state snapshot.
use shared::{default_menus, Record};

/// Everything the training log holds in memory.
///
/// Snapshots are never mutated in place by the domain: each operation
/// clones what it needs and returns a new `AppState`.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    /// Exercise names in display order; never empty once loaded
    pub menus: Vec<String>,
    /// Menu preselected for new records
    pub active_menu: String,
    /// Records in insertion order, newest first
    pub records: Vec<Record>,
}

impl AppState {
    /// Build a state whose active selection is the first menu
    pub fn new(menus: Vec<String>, records: Vec<Record>) -> Self {
        let active_menu = menus.first().cloned().unwrap_or_default();
        Self {
            menus,
            active_menu,
            records,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(default_menus(), Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_selects_first_menu() {
        let state = AppState::new(vec!["A".to_string(), "B".to_string()], Vec::new());
        assert_eq!(state.active_menu, "A");
    }

    #[test]
    fn test_new_with_no_menus_selects_nothing() {
        let state = AppState::new(Vec::new(), Vec::new());
        assert_eq!(state.active_menu, "");
    }

    #[test]
    fn test_default_uses_default_menus() {
        let state = AppState::default();
        assert_eq!(state.menus, default_menus());
        assert_eq!(state.active_menu, "ベンチプレス");
        assert!(state.records.is_empty());
    }
}
