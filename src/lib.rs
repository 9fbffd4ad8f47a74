//! promptfold: model-specific prompt assembly
//!
//! Converts an ordered list of role-tagged chat messages into the flat prompt
//! text a particular model family was trained on. An [`AdapterRegistry`]
//! picks the first [`PromptAdapter`] whose matcher accepts the model name,
//! and the adapter folds the conversation with its templates.
//!
//! ```
//! use promptfold::{AdapterRegistry, Message};
//!
//! let registry = AdapterRegistry::builtin()?;
//! let prompt = registry.format("chatglm", &[Message::user("你好")])?;
//! assert_eq!(prompt.text, "[Round 0]\n问：你好\n答：");
//! # Ok::<(), promptfold::PromptError>(())
//! ```

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::too_many_lines)]

pub mod adapters;
pub mod cli;
pub mod config;
pub mod error;
pub mod messages;
pub mod registry;
pub mod template;

// Re-exports for convenience
pub use adapters::{FoldStyle, FormattedPrompt, Matcher, PromptAdapter};
pub use error::{PromptError, Result};
pub use messages::{Message, Role, Turn};
pub use registry::{AdapterRegistry, RegistryBuilder};
pub use template::Template;
