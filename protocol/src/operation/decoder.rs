//! The structured decoder: generic JSON values in, typed operations out.
//!
//! Decoding is pure and deterministic — the same input value always yields
//! the same [`Operation`], and a failure never yields a partial one. The
//! shape rule is the chain's standard encoding: every operation is an
//! object with exactly one key (the variant name) whose value is the
//! payload object. Nested extension lists follow the same single-key rule,
//! enforced during payload deserialization.
//!
//! Failure kinds are kept distinct so callers can diagnose without
//! re-parsing:
//! - wrong top-level shape → [`ProtocolError::MalformedInput`]
//! - unregistered variant key → [`ProtocolError::UnknownVariant`]
//! - recognized variant, bad payload → [`ProtocolError::SchemaMismatch`]

use serde_json::Value;

use super::registry;
use super::types::Operation;
use crate::error::ProtocolError;

/// Decodes one single-key tagged map into a typed [`Operation`].
pub fn decode_operation(value: &Value) -> Result<Operation, ProtocolError> {
    let map = value.as_object().ok_or_else(|| ProtocolError::MalformedInput {
        reason: format!("expected a single-key tagged object, got {}", json_kind(value)),
    })?;

    let mut entries = map.iter();
    let (name, payload) = match (entries.next(), entries.next()) {
        (Some(entry), None) => entry,
        (None, _) => {
            return Err(ProtocolError::MalformedInput {
                reason: "tagged object has no variant key".to_string(),
            })
        }
        (Some(_), Some(_)) => {
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            return Err(ProtocolError::MalformedInput {
                reason: format!(
                    "tagged object must have exactly one variant key, got {}: {}",
                    keys.len(),
                    keys.join(", ")
                ),
            });
        }
    };

    let schema = registry::lookup(name)?;
    schema.decode_payload(payload)
}

/// Decodes an ordered JSON array of tagged maps, preserving order.
///
/// Fails on the first bad entry, reporting its index alongside the
/// underlying error so the caller can point at the offending element.
pub fn decode_operations(value: &Value) -> Result<Vec<Operation>, ProtocolError> {
    let entries = value.as_array().ok_or_else(|| ProtocolError::MalformedInput {
        reason: format!("expected an array of operations, got {}", json_kind(value)),
    })?;

    let mut operations = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let op = decode_operation(entry).map_err(|err| annotate_index(err, index))?;
        operations.push(op);
    }
    Ok(operations)
}

fn annotate_index(err: ProtocolError, index: usize) -> ProtocolError {
    match err {
        ProtocolError::MalformedInput { reason } => ProtocolError::MalformedInput {
            reason: format!("operation {index}: {reason}"),
        },
        other => other,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
