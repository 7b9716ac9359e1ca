//! IPC message protocol for Facet
//!
//! Defines the messages exchanged between the interactive layer (gizmos,
//! hotkeys, panels) and the mesh editing core. Messages are plain serde
//! types; [`encode`] and [`decode`] give the JSON wire form.

mod commands;
mod error;
mod messages;

pub use commands::*;
pub use error::IpcError;
pub use messages::*;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Serialize a message to its JSON wire form
pub fn encode<T: Serialize>(message: &T) -> Result<String, IpcError> {
    Ok(serde_json::to_string(message)?)
}

/// Parse a message from its JSON wire form
pub fn decode<T: DeserializeOwned>(json: &str) -> Result<T, IpcError> {
    if json.trim().is_empty() {
        return Err(IpcError::InvalidFormat("empty message".to_string()));
    }
    Ok(serde_json::from_str(json)?)
}
