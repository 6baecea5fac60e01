//! Structural reconciliation of stored preferences against the schema.
//!
//! The template decides which keys exist and what JSON type each must
//! have. Anything the user supplied that does not fit is replaced by the
//! template's default; anything the template does not know is dropped.

use serde_json::{Map, Value};
use std::mem::discriminant;

use super::{default_template, PreferenceDocument};
use crate::ioc::is_valid_url;

/// Reconciles `user` against `template`, returning a value with exactly
/// the template's shape.
///
/// - object fields recurse when the user value is an object, else take the
///   whole default subtree;
/// - array fields keep only string entries that pass [`is_valid_url`], in
///   order, and fall back to the default array when none survive;
/// - scalar fields keep the user value only if its JSON type matches.
///
/// A missing or non-object `user` is treated as `{}`. Never fails.
pub fn reconcile(user: Option<&Value>, template: &Value) -> Value {
    let Some(template_fields) = template.as_object() else {
        return template.clone();
    };
    let empty = Map::new();
    let user_fields = user.and_then(Value::as_object).unwrap_or(&empty);

    let mut result = Map::with_capacity(template_fields.len());
    for (key, default_val) in template_fields {
        let input_val = user_fields.get(key);
        let value = match default_val {
            Value::Object(_) => match input_val {
                Some(v @ Value::Object(_)) => reconcile(Some(v), default_val),
                _ => default_val.clone(),
            },
            Value::Array(_) => reconcile_url_list(input_val, default_val),
            _ => match input_val {
                Some(v) if discriminant(v) == discriminant(default_val) => v.clone(),
                _ => default_val.clone(),
            },
        };
        result.insert(key.clone(), value);
    }
    Value::Object(result)
}

fn reconcile_url_list(input: Option<&Value>, default_val: &Value) -> Value {
    let Some(entries) = input.and_then(Value::as_array) else {
        return default_val.clone();
    };
    let valid: Vec<Value> = entries
        .iter()
        .filter(|entry| entry.as_str().is_some_and(is_valid_url))
        .cloned()
        .collect();
    if valid.is_empty() {
        default_val.clone()
    } else {
        Value::Array(valid)
    }
}

/// Reconciles arbitrary stored JSON into a typed [`PreferenceDocument`].
pub fn reconcile_document(user: Option<&Value>) -> PreferenceDocument {
    let cleaned = reconcile(user, &default_template());
    match serde_json::from_value(cleaned) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::warn!("reconciled preferences did not fit the schema: {e}");
            PreferenceDocument::default()
        }
    }
}
