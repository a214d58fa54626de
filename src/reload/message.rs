//! Live reload message protocol.
//!
//! Messages are JSON objects tagged by `type`:
//!
//! ```json
//! {"type":"connected","version":"0.1.0"}
//! {"type":"reload","reason":"rebuilt"}
//! ```

use serde::{Deserialize, Serialize};

/// Message pushed to a preview session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HotReloadMessage {
    /// Sent once when a session is accepted.
    Connected {
        /// Server version
        version: String,
    },

    /// Full page reload.
    Reload {
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
}

impl HotReloadMessage {
    pub fn connected() -> Self {
        Self::Connected {
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn reload(reason: impl Into<String>) -> Self {
        Self::Reload {
            reason: Some(reason.into()),
        }
    }

    pub fn to_json(&self) -> String {
        // Both variants serialize infallibly.
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connected_json() {
        let json = HotReloadMessage::connected().to_json();
        assert_eq!(
            json,
            format!(r#"{{"type":"connected","version":"{}"}}"#, env!("CARGO_PKG_VERSION"))
        );
    }

    #[test]
    fn test_reload_json() {
        assert_eq!(
            HotReloadMessage::reload("rebuilt").to_json(),
            r#"{"type":"reload","reason":"rebuilt"}"#
        );
        assert_eq!(
            HotReloadMessage::Reload { reason: None }.to_json(),
            r#"{"type":"reload"}"#
        );
    }

    #[test]
    fn test_parse_from_client_side_shape() {
        let msg: HotReloadMessage = serde_json::from_str(r#"{"type":"reload"}"#).unwrap();
        assert_eq!(msg, HotReloadMessage::Reload { reason: None });
    }
}
