//! Vehicle commands and their acknowledgements

use std::fmt;

use serde::{Deserialize, Serialize};

/// Message reported when the API acknowledges a command without one
pub const COMMAND_SENT_MESSAGE: &str = "Successfully sent request to vehicle";

/// Start or stop charging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChargeAction {
    Start,
    Stop,
}

impl ChargeAction {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ChargeAction::Start => "START",
            ChargeAction::Stop => "STOP",
        }
    }
}

impl fmt::Display for ChargeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lock or unlock the doors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SecurityAction {
    Lock,
    Unlock,
}

impl SecurityAction {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityAction::Lock => "LOCK",
            SecurityAction::Unlock => "UNLOCK",
        }
    }
}

impl fmt::Display for SecurityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Acknowledgement of a command by the vehicle-data API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandAck {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CommandAck {
    /// The API's message, or a generic one when it sent none
    pub fn message(&self) -> &str {
        self.message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(COMMAND_SENT_MESSAGE)
    }
}
