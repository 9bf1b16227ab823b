//! Lenient deserializers for authored list payloads.
//!
//! Generated content is loosely shaped: bullets arrive as strings, numbers,
//! objects with sub-bullets, or occasionally junk. Items that can be read as
//! text are coerced; the rest are skipped so one bad item never costs the
//! whole slide.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::types::BulletItem;

/// Read a scalar JSON value as text.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Read a JSON value as a single text item.
///
/// Objects are accepted when they carry a `text` or `title` field.
fn text_item(value: &Value) -> Option<String> {
    match value {
        Value::Object(map) => map
            .get("text")
            .or_else(|| map.get("title"))
            .and_then(scalar_text),
        other => scalar_text(other),
    }
}

fn text_items(values: &[Value]) -> Vec<String> {
    values.iter().filter_map(text_item).collect()
}

fn bullet_item(value: &Value) -> Option<BulletItem> {
    let Value::Object(map) = value else {
        return scalar_text(value).map(BulletItem::new);
    };

    let text = map
        .get("text")
        .or_else(|| map.get("title"))
        .and_then(scalar_text)
        .unwrap_or_default();

    let sub_items = map
        .get("sub_items")
        .or_else(|| map.get("sub_bullets"))
        .and_then(Value::as_array)
        .map(|values| text_items(values))
        .unwrap_or_default();

    if text.trim().is_empty() && sub_items.is_empty() {
        return None;
    }

    Some(BulletItem { text, sub_items })
}

/// Deserialize a list of text items, coercing scalars and skipping the rest.
pub(crate) fn lenient_text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(text_items(&values))
}

/// Deserialize a bullet list, coercing scalars and skipping malformed items.
pub(crate) fn lenient_bullets<'de, D>(deserializer: D) -> Result<Vec<BulletItem>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    let bullets: Vec<BulletItem> = values.iter().filter_map(bullet_item).collect();
    if bullets.len() < values.len() {
        log::debug!(
            "Skipped {} malformed bullet item(s)",
            values.len() - bullets.len()
        );
    }
    Ok(bullets)
}

/// Deserialize table rows, coercing every cell to text.
///
/// A row that is not an array is skipped; non-scalar cells become empty text
/// so column alignment is preserved.
pub(crate) fn lenient_rows<'de, D>(deserializer: D) -> Result<Vec<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(values
        .iter()
        .filter_map(Value::as_array)
        .map(|cells| {
            cells
                .iter()
                .map(|cell| scalar_text(cell).unwrap_or_default())
                .collect()
        })
        .collect())
}
