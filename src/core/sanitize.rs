//! Normalizes raw provider records into [`SanitizedEmployee`] rows.
//!
//! Validation is all-or-nothing: one malformed record rejects the whole batch.

use crate::domain::model::SanitizedEmployee;
use crate::utils::error::{EtlError, Result};
use serde_json::Value;

pub fn sanitize(records: &Value) -> Result<Vec<SanitizedEmployee>> {
    let items = records
        .as_array()
        .ok_or_else(|| EtlError::invalid_shape("Data is not an array", None))?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| sanitize_record(index, item))
        .collect()
}

fn sanitize_record(index: usize, item: &Value) -> Result<SanitizedEmployee> {
    let name = item
        .as_object()
        .and_then(|obj| obj.get("name"))
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| EtlError::invalid_shape("Invalid data format", Some(index)))?;

    // 只取前兩段，"Mrs. Dennis Schulist" 之類的第三段會被丟掉
    let mut parts = name.split(' ');
    let firstname = parts.next().unwrap_or_default();
    let lastname = parts.next().unwrap_or_default();

    let address = item.get("address");

    Ok(SanitizedEmployee {
        firstname: firstname.to_string(),
        lastname: lastname.to_string(),
        email: string_field(Some(item), "email"),
        street: string_field(address, "street"),
        city: string_field(address, "city"),
        zipcode: string_field(address, "zipcode"),
        phone: string_field(Some(item), "phone"),
        website: string_field(Some(item), "website"),
    })
}

/// Returns the field when it is a JSON string, `""` for anything else.
fn string_field(parent: Option<&Value>, key: &str) -> String {
    parent
        .and_then(|v| v.get(key))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
