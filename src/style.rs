//! Style overrides.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ChartError, ChartResult};

/// Deep-merges `overrides` into `base`.
///
/// Objects merge key by key, recursively. Arrays are replaced wholesale. A
/// `null` override keeps an object base; any other override value replaces
/// the base value.
#[must_use]
pub fn assign_style(base: &Value, overrides: &Value) -> Value {
    match (base, overrides) {
        (Value::Object(base_map), Value::Object(override_map)) => {
            let mut merged = base_map.clone();
            for (key, value) in override_map {
                let next = match merged.get(key) {
                    Some(existing) => assign_style(existing, value),
                    None => value.clone(),
                };
                merged.insert(key.clone(), next);
            }
            Value::Object(merged)
        }
        (Value::Object(_), Value::Null) => base.clone(),
        (_, value) => value.clone(),
    }
}

/// [`assign_style`] for typed style structs.
pub fn merge_style<T>(base: &T, overrides: &Value) -> ChartResult<T>
where
    T: Serialize + DeserializeOwned,
{
    let base = serde_json::to_value(base)
        .map_err(|e| ChartError::InvalidData(format!("failed to serialize style: {e}")))?;
    serde_json::from_value(assign_style(&base, overrides))
        .map_err(|e| ChartError::InvalidData(format!("failed to apply style override: {e}")))
}
