//! Frame dump codec.
//!
//! Thin wrappers around `rmp-serde` and `serde_json` for handing evaluated
//! frames to an external renderer. MessagePack is the compact form; JSON is
//! for inspection.

use serde::{Deserialize, Serialize};

use crate::error::SceneError;

/// Encode a value to MessagePack bytes.
///
/// Structs are encoded as maps so field names survive.
///
/// # Errors
///
/// Returns [`SceneError::Encode`] if serialisation fails.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, SceneError> {
    rmp_serde::to_vec_named(value).map_err(SceneError::Encode)
}

/// Decode a value from MessagePack bytes.
///
/// # Errors
///
/// Returns [`SceneError::Decode`] if deserialisation fails.
pub fn decode<'a, T: Deserialize<'a>>(bytes: &'a [u8]) -> Result<T, SceneError> {
    rmp_serde::from_slice(bytes).map_err(SceneError::Decode)
}

/// Pretty-printed JSON.
///
/// # Errors
///
/// Returns [`SceneError::Json`] if serialisation fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, SceneError> {
    Ok(serde_json::to_string_pretty(value)?)
}
