//! Record store: logged sets, their validation and display order.
use anyhow::Result;
use serde_json::Value;
use shared::{AddRecordRequest, Record, RECORDS_STORAGE_KEY};
use tracing::{info, warn};

use crate::domain::{
    models::AppState,
    sanitize::{generate_record_id, now_millis, parse_number_text, reps_from_number, sanitize_records},
    validation::{ValidationError, ValidationErrors},
};
use crate::storage::KeyValueStorage;

/// Parse the persisted record list, repairing what can be repaired.
/// Missing or corrupt data yields an empty list.
pub fn load(raw: Option<&str>) -> Vec<Record> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    let value = match serde_json::from_str::<Value>(raw) {
        Ok(value) => value,
        Err(e) => {
            warn!("Stored records are not valid JSON, starting empty: {}", e);
            return Vec::new();
        }
    };

    let (records, discarded) = sanitize_records(Some(&value), None);
    if discarded > 0 {
        warn!("Dropped {} invalid stored records", discarded);
    }
    records
}

/// Fields of an add request that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidRecordInput {
    pub date: String,
    pub menu: String,
    pub weight: f64,
    pub reps: u32,
}

/// Run every check and report all failures together
pub fn validate(request: &AddRecordRequest) -> Result<ValidRecordInput, ValidationErrors> {
    let mut errors = Vec::new();

    let date = request.date.trim();
    if date.is_empty() {
        errors.push(ValidationError::DateRequired);
    }

    let menu = request.menu.trim();
    if menu.is_empty() {
        errors.push(ValidationError::MenuRequired);
    }

    let weight = parse_number_text(&request.weight);
    if !(weight.is_finite() && weight > 0.0) {
        errors.push(ValidationError::InvalidWeight);
    }

    let reps_value = parse_number_text(&request.reps);
    let reps = if !(reps_value.is_finite() && reps_value > 0.0) {
        errors.push(ValidationError::InvalidReps);
        None
    } else if reps_value.fract() != 0.0 {
        errors.push(ValidationError::FractionalReps);
        None
    } else {
        let reps = reps_from_number(reps_value);
        if reps.is_none() {
            errors.push(ValidationError::TooManyReps);
        }
        reps
    };

    ValidationErrors::check(errors)?;
    Ok(ValidRecordInput {
        date: date.to_string(),
        menu: menu.to_string(),
        weight,
        reps: reps.unwrap_or_default(),
    })
}

/// Validate `request` and prepend the new record.
/// Returns the new snapshot and the record that was created.
pub fn add(state: &AppState, request: &AddRecordRequest) -> Result<(AppState, Record), ValidationErrors> {
    add_with(state, request, generate_record_id(), now_millis())
}

/// [`add`] with an explicit id and creation time
pub fn add_with(
    state: &AppState,
    request: &AddRecordRequest,
    id: String,
    created_at: i64,
) -> Result<(AppState, Record), ValidationErrors> {
    let input = validate(request)?;
    let record = Record {
        id,
        date: input.date,
        menu: input.menu,
        weight: input.weight,
        reps: input.reps,
        created_at,
    };

    let mut records = Vec::with_capacity(state.records.len() + 1);
    records.push(record.clone());
    records.extend(state.records.iter().cloned());

    info!("Logged {} {}x{} on {}", record.menu, record.weight, record.reps, record.date);
    Ok((
        AppState {
            records,
            ..state.clone()
        },
        record,
    ))
}

/// Drop the record with `id`. Unknown ids leave the records as they were.
pub fn remove(state: &AppState, id: &str) -> AppState {
    AppState {
        records: state.records.iter().filter(|r| r.id != id).cloned().collect(),
        ..state.clone()
    }
}

/// Records ordered for display: date descending, then most recently created first.
/// The sort is stable, so full ties keep their stored order.
pub fn sort_for_display(records: &[Record]) -> Vec<Record> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
    sorted
}

/// Persist the record list in insertion order
pub async fn save<S: KeyValueStorage + ?Sized>(storage: &S, records: &[Record]) -> Result<()> {
    let json = serde_json::to_string(records)?;
    storage.put_value(RECORDS_STORAGE_KEY, &json).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn request(date: &str, menu: &str, weight: &str, reps: &str) -> AddRecordRequest {
        AddRecordRequest {
            date: date.to_string(),
            menu: menu.to_string(),
            weight: weight.to_string(),
            reps: reps.to_string(),
        }
    }

    fn record(id: &str, date: &str, created_at: i64) -> Record {
        Record {
            id: id.to_string(),
            date: date.to_string(),
            menu: "スクワット".to_string(),
            weight: 60.0,
            reps: 8,
            created_at,
        }
    }

    #[test]
    fn test_load_missing_or_corrupt() {
        assert!(load(None).is_empty());
        assert!(load(Some("not json")).is_empty());
        assert!(load(Some(r#"{"id": "x"}"#)).is_empty());
    }

    #[test]
    fn test_load_drops_invalid_records() {
        let raw = r#"[
            {"id": "a", "date": "2024-01-10", "menu": "スクワット", "weight": 60, "reps": 8, "createdAt": 2},
            {"id": "b", "date": "2024-01-11", "menu": "スクワット", "weight": 0, "reps": 8, "createdAt": 3}
        ]"#;
        let records = load(Some(raw));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "a");
    }

    #[test]
    fn test_add_prepends_record() {
        let state = AppState::default();
        let (state, first) =
            add_with(&state, &request("2024-01-10", "スクワット", "60", "8"), "a".into(), 1).unwrap();
        let (state, second) =
            add_with(&state, &request("2024-01-09", "スクワット", "62.5", "5"), "b".into(), 2).unwrap();

        assert_eq!(state.records, vec![second.clone(), first]);
        assert_eq!(second.weight, 62.5);
        assert_eq!(second.reps, 5);
    }

    #[test]
    fn test_add_generates_id_and_timestamp() {
        let before = now_millis();
        let (_, record) = add(&AppState::default(), &request("2024-01-10", "スクワット", "60", "8")).unwrap();
        assert!(!record.id.is_empty());
        assert!(record.created_at >= before);
    }

    #[test]
    fn test_each_invalid_field_is_reported() {
        let state = AppState::default();
        let cases = [
            (request("", "スクワット", "60", "8"), ValidationError::DateRequired),
            (request("2024-01-10", "", "60", "8"), ValidationError::MenuRequired),
            (request("2024-01-10", "スクワット", "0", "8"), ValidationError::InvalidWeight),
            (request("2024-01-10", "スクワット", "60", "0"), ValidationError::InvalidReps),
            (request("2024-01-10", "スクワット", "abc", "8"), ValidationError::InvalidWeight),
            (request("2024-01-10", "スクワット", "60", "8.5"), ValidationError::FractionalReps),
            (request("2024-01-10", "スクワット", "60", "5000000000"), ValidationError::TooManyReps),
        ];

        for (req, expected) in cases {
            let err = add(&state, &req).unwrap_err();
            assert_eq!(err.errors(), &[expected]);
        }
    }

    #[test]
    fn test_errors_are_combined() {
        let state = AppState::default();
        let err = add(&state, &request("2024-01-10", "スクワット", "0", "0")).unwrap_err();
        assert_eq!(
            err.errors(),
            &[ValidationError::InvalidWeight, ValidationError::InvalidReps]
        );

        let err = add(&state, &request(" ", "", "", "")).unwrap_err();
        assert_eq!(err.errors().len(), 4);
    }

    #[test]
    fn test_remove_record() {
        let state = AppState::new(Vec::new(), vec![record("a", "2024-01-10", 1), record("b", "2024-01-11", 2)]);
        let next = remove(&state, "a");
        assert_eq!(next.records.len(), 1);
        assert_eq!(next.records[0].id, "b");

        let unchanged = remove(&next, "missing");
        assert_eq!(unchanged.records, next.records);
    }

    #[test]
    fn test_sort_for_display() {
        let records = vec![
            record("old", "2024-01-09", 50),
            record("same-day-early", "2024-01-10", 10),
            record("newest-day", "2024-01-11", 5),
            record("same-day-late", "2024-01-10", 20),
        ];

        let ids: Vec<String> = sort_for_display(&records).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["newest-day", "same-day-late", "same-day-early", "old"]);
        // Stored order is not touched
        assert_eq!(records[0].id, "old");
    }

    #[test]
    fn test_sort_for_display_is_stable_on_full_ties() {
        let records = vec![record("first", "2024-01-10", 7), record("second", "2024-01-10", 7)];
        let ids: Vec<String> = sort_for_display(&records).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[test]
    fn test_later_created_record_sorts_first_on_same_date() {
        let state = AppState::default();
        let (state, _) =
            add_with(&state, &request("2024-01-10", "スクワット", "60", "8"), "squat".into(), 1000).unwrap();
        let (state, _) =
            add_with(&state, &request("2024-01-10", "ベンチプレス", "40", "10"), "bench".into(), 2000).unwrap();

        let sorted = sort_for_display(&state.records);
        assert_eq!(sorted[0].menu, "ベンチプレス");
        assert_eq!(sorted[1].menu, "スクワット");
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let storage = MemoryStorage::new();
        let records = vec![record("a", "2024-01-10", 1)];
        save(&storage, &records).await.unwrap();

        let raw = storage.get_value(RECORDS_STORAGE_KEY).await.unwrap();
        assert_eq!(load(raw.as_deref()), records);
    }
}
