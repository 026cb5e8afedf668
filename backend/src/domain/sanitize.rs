//! Best-effort repair of menu and record JSON.
//!
//! Stored data and imported files go through the same functions here, so a
//! record that survives a load also survives an import and vice versa.
//! Wrong-typed fields are coerced to defaults rather than rejected; only
//! entities that still break an invariant afterwards are discarded.

use serde_json::Value;
use shared::{default_menus, Record};
use uuid::Uuid;

/// Outcome of repairing one record entry
#[derive(Debug, Clone, PartialEq)]
pub enum Sanitized {
    Valid(Record),
    Discard,
}

/// Generate an opaque record identifier
pub fn generate_record_id() -> String {
    Uuid::new_v4().to_string()
}

/// Current time in epoch milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Loose numeric coercion.
///
/// Numbers pass through; strings are parsed after trimming, with the empty
/// string meaning 0; booleans are 1/0 and null is 0. Anything that ends up
/// non-finite (unparseable text, arrays, objects, a missing field) becomes 0.
pub fn coerce_number(value: Option<&Value>) -> f64 {
    let number = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => parse_number_text(s),
        Some(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Some(Value::Null) => 0.0,
        _ => f64::NAN,
    };

    if number.is_finite() {
        number
    } else {
        0.0
    }
}

/// Parse form or JSON text as a number. Blank text is 0; garbage is NaN.
pub fn parse_number_text(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Reps as a positive whole number, if `value` is one
pub fn reps_from_number(value: f64) -> Option<u32> {
    if value.is_finite() && value > 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX) {
        Some(value as u32)
    } else {
        None
    }
}

/// Clean a menu list: trim entries, drop blanks, non-strings and repeats.
/// Falls back to the default menus when nothing usable is left.
pub fn sanitize_menus(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        return default_menus();
    };

    let mut menus: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let Some(name) = item.as_str().map(str::trim) else {
            continue;
        };
        if name.is_empty() || menus.iter().any(|m| m == name) {
            continue;
        }
        menus.push(name.to_string());
    }

    if menus.is_empty() {
        default_menus()
    } else {
        menus
    }
}

/// Repair a single record entry.
///
/// `fallback_menu` is only supplied on import, where a record without a
/// usable menu is assigned the first imported menu.
pub fn sanitize_record(value: &Value, fallback_menu: Option<&str>, now_ms: i64) -> Sanitized {
    let id = text_field(value, "id").unwrap_or_else(generate_record_id);
    let date = text_field(value, "date").unwrap_or_default();
    let mut menu = text_field(value, "menu").unwrap_or_default();
    if menu.trim().is_empty() {
        if let Some(fallback) = fallback_menu {
            menu = fallback.to_string();
        }
    }
    let weight = coerce_number(value.get("weight"));
    let reps = coerce_number(value.get("reps"));
    let created_at = match value.get("createdAt") {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(now_ms),
        _ => now_ms,
    };

    if date.trim().is_empty() || menu.trim().is_empty() || weight <= 0.0 {
        return Sanitized::Discard;
    }
    let Some(reps) = reps_from_number(reps) else {
        return Sanitized::Discard;
    };

    Sanitized::Valid(Record {
        id,
        date,
        menu,
        weight,
        reps,
        created_at,
    })
}

fn text_field(value: &Value, name: &str) -> Option<String> {
    value.get(name).and_then(Value::as_str).map(str::to_string)
}

/// Repair a record list. Anything other than an array yields no records.
/// Returns the surviving records and how many entries were discarded.
pub fn sanitize_records(value: Option<&Value>, fallback_menu: Option<&str>) -> (Vec<Record>, usize) {
    let Some(Value::Array(items)) = value else {
        return (Vec::new(), 0);
    };

    let now_ms = now_millis();
    let mut records = Vec::with_capacity(items.len());
    let mut discarded = 0;
    for item in items {
        match sanitize_record(item, fallback_menu, now_ms) {
            Sanitized::Valid(record) => records.push(record),
            Sanitized::Discard => discarded += 1,
        }
    }
    (records, discarded)
}
