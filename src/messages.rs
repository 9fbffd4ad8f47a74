//! Message types for chat conversations
//!
//! A conversation is an ordered slice of [`Message`]s. Roles travel as plain
//! strings so callers can pass through whatever their wire format carries;
//! [`Role`] names the labels the fold algorithms recognize and [`Turn`]
//! collapses them into human and model turns.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{PromptError, Result};

/// Recognized message roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "system")]
    System,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "AI")]
    Ai,
}

/// Normalized turn category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// `user` and `system` content, accumulated until a model turn closes it
    Human,
    /// `assistant` and `AI` content
    Model,
}

impl Role {
    /// The label as it appears on the wire
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::System => "system",
            Self::Assistant => "assistant",
            Self::Ai => "AI",
        }
    }

    /// Collapse the role into its turn category
    #[must_use]
    pub const fn turn(&self) -> Turn {
        match self {
            Self::User | Self::System => Turn::Human,
            Self::Assistant | Self::Ai => Turn::Model,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = PromptError;

    /// Labels are matched exactly; `"User"` or `"ai"` are unknown roles.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "user" => Ok(Self::User),
            "system" => Ok(Self::System),
            "assistant" => Ok(Self::Assistant),
            "AI" => Ok(Self::Ai),
            _ => Err(PromptError::UnknownRole(s.to_string())),
        }
    }
}

/// A single message in the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    /// Create a message with an arbitrary role label
    #[must_use]
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    /// Create a new user message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User.as_str(), content)
    }

    /// Create a new system message
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System.as_str(), content)
    }

    /// Create a new assistant message
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant.as_str(), content)
    }

    /// Parse the role label
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::UnknownRole`] if the label is not recognized
    pub fn parsed_role(&self) -> Result<Role> {
        self.role.parse()
    }

    /// Turn category of this message
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::UnknownRole`] if the label is not recognized
    pub fn turn(&self) -> Result<Turn> {
        self.parsed_role().map(|role| role.turn())
    }
}
