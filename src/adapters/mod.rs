//! Prompt adapters for different model families
//!
//! A [`PromptAdapter`] pairs a name [`Matcher`] with three templates and a
//! [`FoldStyle`]. Adapters are immutable once built; every template is
//! validated by [`AdapterBuilder::build`].

pub mod builtin;
pub mod fold;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

pub use self::fold::{fold, Templates};
use crate::{
    error::{PromptError, Result},
    messages::Message,
    template::Template,
};

/// Preamble of the catch-all adapter
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant!\n";
/// User template of the catch-all adapter
pub const DEFAULT_USER_PROMPT: &str = "Human: {}\nAssistant: ";
/// Assistant template of the catch-all adapter
pub const DEFAULT_ASSISTANT_PROMPT: &str = "{}\n";

/// Predicate over model names
///
/// All comparisons are case sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Matcher {
    /// Accepts every name
    Any,
    /// Accepts exactly this name
    Exact(String),
    /// Accepts names containing any of these substrings
    Contains(Vec<String>),
}

impl Matcher {
    #[must_use]
    pub fn exact(name: impl Into<String>) -> Self {
        Self::Exact(name.into())
    }

    #[must_use]
    pub fn contains<I, S>(needles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Contains(needles.into_iter().map(Into::into).collect())
    }

    /// Check whether `model_name` is accepted
    #[must_use]
    pub fn matches(&self, model_name: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(name) => model_name == name,
            Self::Contains(needles) => needles.iter().any(|n| model_name.contains(n.as_str())),
        }
    }

    /// Whether this matcher accepts every name
    #[must_use]
    pub const fn is_catch_all(&self) -> bool {
        matches!(self, Self::Any)
    }
}

fn default_separator() -> String {
    "\n".to_string()
}

/// How an adapter turns a conversation into text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum FoldStyle {
    /// Group consecutive human turns, close them on each model turn
    #[default]
    Default,
    /// Like [`FoldStyle::Default`], with a `[Round N]` marker before each user block
    RoundIndexed {
        /// Number of the first round (0 or 1)
        first_round: u32,
        /// Text between the round marker and the user block
        #[serde(default = "default_separator")]
        separator: String,
    },
    /// One block per message; system messages go through the system template
    SystemLed,
    /// One block per message after a fixed preamble
    PreambleFixed {
        /// Literal emitted before any message
        preamble: String,
    },
}

impl FoldStyle {
    /// Whether the style buffers human turns (and so treats the system
    /// template as a literal preamble)
    #[must_use]
    pub const fn is_grouped(&self) -> bool {
        matches!(self, Self::Default | Self::RoundIndexed { .. })
    }
}

/// A prompt produced for one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedPrompt {
    /// Name of the adapter that produced the text
    pub adapter: String,
    /// The folded prompt
    pub text: String,
    /// Stop markers for the generation loop
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<IndexSet<String>>,
}

/// A named formatting rule
#[derive(Debug, Clone)]
pub struct PromptAdapter {
    name: String,
    templates: Templates,
    stop: Option<IndexSet<String>>,
    matcher: Matcher,
    style: FoldStyle,
}

impl PromptAdapter {
    /// Start building an adapter; unset fields take the catch-all defaults
    #[must_use]
    pub fn builder(name: impl Into<String>) -> AdapterBuilder {
        AdapterBuilder::new(name)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn templates(&self) -> &Templates {
        &self.templates
    }

    #[must_use]
    pub const fn stop(&self) -> Option<&IndexSet<String>> {
        self.stop.as_ref()
    }

    #[must_use]
    pub const fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    #[must_use]
    pub const fn style(&self) -> &FoldStyle {
        &self.style
    }

    /// Check whether this adapter handles `model_name`
    #[must_use]
    pub fn matches(&self, model_name: &str) -> bool {
        self.matcher.matches(model_name)
    }

    /// Fold `messages` into prompt text
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::UnknownRole`] if a grouped style meets a role
    /// outside the recognized set
    pub fn generate_prompt(&self, messages: &[Message]) -> Result<String> {
        fold(&self.style, &self.templates, messages)
    }

    /// Fold `messages` and attach this adapter's name and stop markers
    ///
    /// # Errors
    ///
    /// See [`PromptAdapter::generate_prompt`]
    pub fn render(&self, messages: &[Message]) -> Result<FormattedPrompt> {
        Ok(FormattedPrompt {
            adapter: self.name.clone(),
            text: self.generate_prompt(messages)?,
            stop: self.stop.clone(),
        })
    }
}

/// Builder for [`PromptAdapter`]
#[derive(Debug, Clone)]
pub struct AdapterBuilder {
    name: String,
    system_prompt: String,
    user_prompt: String,
    assistant_prompt: String,
    stop: Option<Vec<String>>,
    matcher: Matcher,
    style: FoldStyle,
}

impl AdapterBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            user_prompt: DEFAULT_USER_PROMPT.to_string(),
            assistant_prompt: DEFAULT_ASSISTANT_PROMPT.to_string(),
            stop: None,
            matcher: Matcher::Any,
            style: FoldStyle::Default,
        }
    }

    #[must_use]
    pub fn system_prompt(mut self, template: impl Into<String>) -> Self {
        self.system_prompt = template.into();
        self
    }

    #[must_use]
    pub fn user_prompt(mut self, template: impl Into<String>) -> Self {
        self.user_prompt = template.into();
        self
    }

    #[must_use]
    pub fn assistant_prompt(mut self, template: impl Into<String>) -> Self {
        self.assistant_prompt = template.into();
        self
    }

    #[must_use]
    pub fn stop<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop = Some(markers.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn matcher(mut self, matcher: Matcher) -> Self {
        self.matcher = matcher;
        self
    }

    #[must_use]
    pub fn style(mut self, style: FoldStyle) -> Self {
        self.style = style;
        self
    }

    /// Validate the templates and produce the adapter
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::InvalidTemplate`] if the user or assistant
    /// template lacks exactly one placeholder, or if an immediate style's
    /// system template does. Grouped styles take the system prompt as
    /// verbatim preamble text. Returns [`PromptError::InvalidAdapter`] for
    /// an empty name, a `contains` matcher with no or empty substrings, or
    /// a round base other than 0 or 1.
    pub fn build(self) -> Result<PromptAdapter> {
        if self.name.trim().is_empty() {
            return Err(PromptError::InvalidAdapter(
                "adapter name must not be empty".to_string(),
            ));
        }

        if let Matcher::Contains(needles) = &self.matcher {
            if needles.is_empty() {
                return Err(PromptError::InvalidAdapter(format!(
                    "{}: `contains` matcher needs at least one substring",
                    self.name
                )));
            }
            if needles.iter().any(String::is_empty) {
                return Err(PromptError::InvalidAdapter(format!(
                    "{}: `contains` substrings must not be empty; use `any` to match every name",
                    self.name
                )));
            }
        }

        if let FoldStyle::RoundIndexed { first_round, .. } = &self.style {
            if *first_round > 1 {
                return Err(PromptError::InvalidAdapter(format!(
                    "{}: first round must be 0 or 1, got {first_round}",
                    self.name
                )));
            }
        }

        // grouped folds emit the preamble verbatim
        let system = if self.style.is_grouped() {
            Template::literal(&self.system_prompt)
        } else {
            Template::parse_single(&self.system_prompt)?
        };

        let templates = Templates {
            system,
            user: Template::parse_single(&self.user_prompt)?,
            assistant: Template::parse_single(&self.assistant_prompt)?,
        };

        Ok(PromptAdapter {
            name: self.name,
            templates,
            stop: self.stop.map(|markers| markers.into_iter().collect()),
            matcher: self.matcher,
            style: self.style,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_matcher_semantics() {
        assert!(Matcher::Any.matches(""));
        assert!(Matcher::exact("chatglm").matches("chatglm"));
        assert!(!Matcher::exact("chatglm").matches("chatglm2"));

        let m = Matcher::contains(["alpaca", "tiger"]);
        assert!(m.matches("chinese-alpaca-plus"));
        assert!(m.matches("tigerbot-7b"));
        assert!(!m.matches("Alpaca"));
    }

    #[test]
    fn test_builder_defaults() {
        let adapter = PromptAdapter::builder("default").build().unwrap();
        assert_eq!(adapter.templates().system.as_str(), DEFAULT_SYSTEM_PROMPT);
        assert_eq!(adapter.templates().user.as_str(), DEFAULT_USER_PROMPT);
        assert!(adapter.matcher().is_catch_all());
        assert!(adapter.stop().is_none());
        assert_eq!(adapter.style(), &FoldStyle::Default);
    }

    #[test]
    fn test_stop_markers_deduplicate_in_order() {
        let adapter = PromptAdapter::builder("x")
            .stop(["b", "a", "b"])
            .build()
            .unwrap();
        let stop: Vec<&str> = adapter.stop().unwrap().iter().map(String::as_str).collect();
        assert_eq!(stop, vec!["b", "a"]);
    }

    #[test]
    fn test_build_rejects_bad_templates() {
        let err = PromptAdapter::builder("x")
            .user_prompt("Human: ")
            .build()
            .unwrap_err();
        assert!(matches!(err, PromptError::InvalidTemplate { .. }));

        let err = PromptAdapter::builder("x")
            .assistant_prompt("{}{}")
            .build()
            .unwrap_err();
        assert!(matches!(err, PromptError::InvalidTemplate { .. }));

        // immediate folds format system messages through it
        let err = PromptAdapter::builder("x")
            .style(FoldStyle::SystemLed)
            .system_prompt("plain")
            .build()
            .unwrap_err();
        assert!(matches!(err, PromptError::InvalidTemplate { .. }));
    }

    #[test]
    fn test_build_rejects_bad_adapters() {
        let err = PromptAdapter::builder("glm")
            .style(FoldStyle::RoundIndexed {
                first_round: 2,
                separator: "\n".into(),
            })
            .build()
            .unwrap_err();
        assert!(matches!(err, PromptError::InvalidAdapter(_)));

        let err = PromptAdapter::builder("none")
            .matcher(Matcher::Contains(Vec::new()))
            .build()
            .unwrap_err();
        assert!(matches!(err, PromptError::InvalidAdapter(_)));

        let err = PromptAdapter::builder("everything")
            .matcher(Matcher::contains([""]))
            .build()
            .unwrap_err();
        assert!(matches!(err, PromptError::InvalidAdapter(_)));

        let err = PromptAdapter::builder("mixed")
            .matcher(Matcher::contains(["glm", ""]))
            .build()
            .unwrap_err();
        assert!(matches!(err, PromptError::InvalidAdapter(_)));

        assert!(PromptAdapter::builder(" ").build().is_err());
    }

    #[test]
    fn test_grouped_preamble_is_verbatim() {
        for preamble in [
            "Reply as {\"a\": 1}\n",
            "Reply as {{\"a\": 1}}\n",
            "System: {}\n",
        ] {
            for style in [
                FoldStyle::Default,
                FoldStyle::RoundIndexed {
                    first_round: 0,
                    separator: "\n".into(),
                },
            ] {
                let adapter = PromptAdapter::builder("json")
                    .style(style.clone())
                    .system_prompt(preamble)
                    .build()
                    .unwrap();
                assert_eq!(adapter.generate_prompt(&[]).unwrap(), preamble);
                assert_eq!(
                    fold::fold(&style, adapter.templates(), &[]).unwrap(),
                    preamble
                );
                let prompt = adapter
                    .generate_prompt(&[Message::user("hi"), Message::assistant("{}")])
                    .unwrap();
                assert!(prompt.starts_with(preamble), "{prompt}");
            }
        }
    }

    #[test]
    fn test_render_carries_stop_markers() {
        let adapter = PromptAdapter::builder("qa")
            .system_prompt("")
            .user_prompt("Q: {}\nA: ")
            .stop(["Q:"])
            .build()
            .unwrap();
        let prompt = adapter.render(&[Message::user("hi")]).unwrap();
        assert_eq!(prompt.adapter, "qa");
        assert_eq!(prompt.text, "Q: hi\nA: ");
        assert!(prompt.stop.unwrap().contains("Q:"));
    }

    #[test]
    fn test_fold_style_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            fold: FoldStyle,
            #[serde(rename = "match")]
            matcher: Matcher,
        }

        let w: Wrapper = toml::from_str(
            r#"
            fold = { style = "round_indexed", first_round = 1 }
            match = { contains = ["glm"] }
            "#,
        )
        .unwrap();
        assert_eq!(
            w.fold,
            FoldStyle::RoundIndexed {
                first_round: 1,
                separator: "\n".into()
            }
        );
        assert_eq!(w.matcher, Matcher::contains(["glm"]));
    }
}
