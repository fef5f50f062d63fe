//! Project record encoding.
//!
//! JSON is the interchange format with the persistence backend and the
//! browser. MessagePack is the compact form for local caches; it is written
//! with named fields so tagged payloads survive the round trip.

use crate::model::Project;

/// Failure to encode or decode a project record.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("invalid project JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot encode project as MessagePack: {0}")]
    MsgpackEncode(#[from] rmp_serde::encode::Error),
    #[error("invalid project MessagePack: {0}")]
    MsgpackDecode(#[from] rmp_serde::decode::Error),
}

/// Serialize a project as a JSON document.
///
/// # Errors
/// Returns [`CodecError::Json`] if serialization fails.
pub fn project_to_json(project: &Project) -> Result<String, CodecError> {
    Ok(serde_json::to_string(project)?)
}

/// Parse a project from a JSON document.
///
/// # Errors
/// Returns [`CodecError::Json`] on malformed input or missing required fields.
pub fn project_from_json(json: &str) -> Result<Project, CodecError> {
    Ok(serde_json::from_str(json)?)
}

/// Serialize a project as MessagePack (maps with field names).
///
/// # Errors
/// Returns [`CodecError::MsgpackEncode`] if the writer fails.
pub fn project_to_msgpack(project: &Project) -> Result<Vec<u8>, CodecError> {
    Ok(rmp_serde::to_vec_named(project)?)
}

/// Parse a project from MessagePack bytes.
///
/// # Errors
/// Returns [`CodecError::MsgpackDecode`] on malformed input.
pub fn project_from_msgpack(bytes: &[u8]) -> Result<Project, CodecError> {
    Ok(rmp_serde::from_slice(bytes)?)
}
