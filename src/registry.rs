//! Adapter registry
//!
//! An [`AdapterRegistry`] is an ordered, immutable list of adapters. Lookup
//! is a linear scan in registration order and the first adapter whose
//! matcher accepts the model name wins, so registration order is the
//! precedence list. Registries are assembled with [`RegistryBuilder`] and
//! never change afterwards; share one by reference across threads.

use once_cell::sync::OnceCell;
use tracing::{debug, warn};

use crate::{
    adapters::{
        builtin::{builtin_adapters, default_adapter},
        FormattedPrompt, PromptAdapter,
    },
    error::{PromptError, Result},
    messages::Message,
};

static BUILTIN: OnceCell<AdapterRegistry> = OnceCell::new();

/// Ordered collection of prompt adapters
#[derive(Debug, Clone)]
pub struct AdapterRegistry {
    adapters: Vec<PromptAdapter>,
}

impl AdapterRegistry {
    /// Start assembling a registry
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// The built-in model families followed by the catch-all adapter
    ///
    /// Built once per process on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in adapter fails validation
    pub fn builtin() -> Result<&'static Self> {
        BUILTIN.get_or_try_init(|| Self::with_builtins(Vec::new()))
    }

    /// Register `adapters` ahead of the built-in families and the catch-all
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in adapter fails validation
    pub fn with_builtins(adapters: Vec<PromptAdapter>) -> Result<Self> {
        Self::builder()
            .register_all(adapters)
            .register_all(builtin_adapters()?)
            .build_with_default(default_adapter()?)
    }

    /// Find the first adapter that accepts `model_name`
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::NoAdapterFound`] if no adapter matches
    pub fn resolve(&self, model_name: &str) -> Result<&PromptAdapter> {
        let adapter = self
            .adapters
            .iter()
            .find(|adapter| adapter.matches(model_name))
            .ok_or_else(|| PromptError::NoAdapterFound(model_name.to_string()))?;

        debug!(model = model_name, adapter = adapter.name(), "resolved prompt adapter");
        Ok(adapter)
    }

    /// Resolve the adapter for `model_name` and fold `messages` with it
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::NoAdapterFound`] or [`PromptError::UnknownRole`]
    pub fn format(&self, model_name: &str, messages: &[Message]) -> Result<FormattedPrompt> {
        self.resolve(model_name)?.render(messages)
    }

    /// Adapters in precedence order
    pub fn iter(&self) -> impl Iterator<Item = &PromptAdapter> {
        self.adapters.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    /// Whether the last adapter accepts every name, so lookup cannot fail
    #[must_use]
    pub fn has_catch_all(&self) -> bool {
        self.adapters
            .last()
            .is_some_and(|adapter| adapter.matcher().is_catch_all())
    }
}

/// Builder for [`AdapterRegistry`]
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    adapters: Vec<PromptAdapter>,
}

impl RegistryBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an adapter; earlier registrations take precedence
    #[must_use]
    pub fn register(mut self, adapter: PromptAdapter) -> Self {
        self.adapters.push(adapter);
        self
    }

    /// Append several adapters in order
    #[must_use]
    pub fn register_all(mut self, adapters: impl IntoIterator<Item = PromptAdapter>) -> Self {
        self.adapters.extend(adapters);
        self
    }

    /// Finish with `default` as the last entry
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::InvalidAdapter`] unless `default` accepts
    /// every model name
    pub fn build_with_default(mut self, default: PromptAdapter) -> Result<AdapterRegistry> {
        if !default.matcher().is_catch_all() {
            return Err(PromptError::InvalidAdapter(format!(
                "default adapter {} must match every model name",
                default.name()
            )));
        }
        self.adapters.push(default);
        Ok(self.build())
    }

    /// Finish without adding a fallback
    ///
    /// Lookups fail with [`PromptError::NoAdapterFound`] when nothing
    /// matches.
    #[must_use]
    pub fn build(self) -> AdapterRegistry {
        let registry = AdapterRegistry {
            adapters: self.adapters,
        };
        if !registry.has_catch_all() {
            warn!(
                adapters = registry.len(),
                "prompt adapter registry has no catch-all; unmatched models will fail"
            );
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::Matcher;
    use pretty_assertions::assert_eq;

    fn named(name: &str, matcher: Matcher) -> PromptAdapter {
        PromptAdapter::builder(name).matcher(matcher).build().unwrap()
    }

    #[test]
    fn test_first_match_wins() {
        let registry = AdapterRegistry::builder()
            .register(named("first", Matcher::Any))
            .register(named("second", Matcher::Any))
            .build();
        assert_eq!(registry.resolve("anything").unwrap().name(), "first");
    }

    #[test]
    fn test_duplicates_are_kept() {
        let registry = AdapterRegistry::builder()
            .register(named("a", Matcher::exact("m")))
            .register(named("a", Matcher::exact("m")))
            .build();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_empty_registry_fails() {
        let registry = RegistryBuilder::new().build();
        assert!(registry.is_empty());
        let err = registry.resolve("chatglm").unwrap_err();
        assert!(matches!(err, PromptError::NoAdapterFound(ref name) if name == "chatglm"));
    }

    #[test]
    fn test_no_match_without_catch_all() {
        let registry = AdapterRegistry::builder()
            .register(named("glm", Matcher::exact("chatglm")))
            .build();
        assert!(!registry.has_catch_all());
        assert!(registry.resolve("llama").is_err());
        assert_eq!(registry.resolve("chatglm").unwrap().name(), "glm");
    }

    #[test]
    fn test_default_must_be_catch_all() {
        let err = AdapterRegistry::builder()
            .build_with_default(named("narrow", Matcher::exact("x")))
            .unwrap_err();
        assert!(matches!(err, PromptError::InvalidAdapter(_)));
    }

    #[test]
    fn test_default_is_pinned_last() {
        let registry = AdapterRegistry::builder()
            .register(named("glm", Matcher::exact("chatglm")))
            .build_with_default(named("fallback", Matcher::Any))
            .unwrap();
        assert!(registry.has_catch_all());
        let names: Vec<&str> = registry.iter().map(PromptAdapter::name).collect();
        assert_eq!(names, vec!["glm", "fallback"]);
        assert_eq!(registry.resolve("llama").unwrap().name(), "fallback");
    }

    #[test]
    fn test_builtin_resolution() {
        let registry = AdapterRegistry::builtin().unwrap();
        assert!(registry.has_catch_all());

        let cases = [
            ("chatglm", "chatglm"),
            ("chatglm2", "chatglm2"),
            ("chatglm-6b", "default"),
            ("moss-moon-003-sft", "moss"),
            ("chinese-alpaca-plus-7b", "alpaca"),
            ("tigerbot-7b-sft", "alpaca"),
            ("anima-33b", "alpaca"),
            ("baichuan-7b", "firefly"),
            ("baichuan-13b-chat", "baichuan"),
            ("Baichuan-13B-Chat", "default"),
            ("starcoder", "starchat"),
            ("AquilaChat-7b", "aquila"),
            ("llama-2-7b", "default"),
        ];
        for (model, expected) in cases {
            assert_eq!(registry.resolve(model).unwrap().name(), expected, "{model}");
        }
    }

    #[test]
    fn test_builtin_is_shared() {
        let a = AdapterRegistry::builtin().unwrap();
        let b = AdapterRegistry::builtin().unwrap();
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn test_user_adapters_take_precedence() {
        let custom = named("my-glm", Matcher::exact("chatglm"));
        let registry = AdapterRegistry::with_builtins(vec![custom]).unwrap();
        assert_eq!(registry.resolve("chatglm").unwrap().name(), "my-glm");
        assert_eq!(registry.resolve("chatglm2").unwrap().name(), "chatglm2");
    }

    #[test]
    fn test_format() {
        let registry = AdapterRegistry::builtin().unwrap();
        let prompt = registry
            .format("internlm-chat-7b", &[Message::user("hi")])
            .unwrap();
        assert_eq!(prompt.adapter, "internlm");
        assert_eq!(prompt.text, "<|User|>:hi<eoh>\n<|Bot|>:");
        let stop_set = prompt.stop.unwrap();
        let stop: Vec<&str> = stop_set.iter().map(String::as_str).collect();
        assert_eq!(stop, vec!["<|User|>", "<|Bot|>", "<eoa>"]);
    }
}
