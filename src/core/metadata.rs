// Normalization of free-form key=value annotations

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A typed annotation value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

pub type Metadata = BTreeMap<String, MetaValue>;

/// Classifies an already-trimmed value.
///
/// Only plain decimal literals are coerced: ASCII digits with at most one `.`.
/// Anything else, including signs and exponents, stays text. A literal that
/// fails to coerce (an integer wider than `i64`) also stays text.
pub fn classify_value(value: &str) -> MetaValue {
    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    let dots = value.chars().filter(|&c| c == '.').count();
    let numeric = digits > 0 && dots <= 1 && digits + dots == value.chars().count();

    if numeric {
        if dots == 1 {
            if let Ok(f) = value.parse::<f64>() {
                return MetaValue::Float(f);
            }
        } else if let Ok(i) = value.parse::<i64>() {
            return MetaValue::Integer(i);
        }
    }

    MetaValue::Text(value.to_string())
}

/// Parses `key=value` entries. Entries without `=` are dropped, later keys win.
pub fn parse_metadata<I, S>(entries: I) -> Metadata
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut metadata = Metadata::new();

    for entry in entries {
        let Some((key, value)) = entry.as_ref().split_once('=') else {
            continue;
        };
        metadata.insert(key.trim().to_string(), classify_value(value.trim()));
    }

    metadata
}
