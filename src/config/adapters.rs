//! User-defined adapter records

use serde::{Deserialize, Serialize};

use crate::{
    adapters::{FoldStyle, Matcher, PromptAdapter},
    error::{PromptError, Result},
};

/// An adapter as written in a config file
///
/// Omitted templates fall back to the catch-all adapter's templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterSpec {
    /// Adapter name, reported by `resolve`
    pub name: String,

    /// Model name predicate
    #[serde(rename = "match")]
    pub matcher: Matcher,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_prompt: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assistant_prompt: Option<String>,

    /// Stop markers for the generation loop
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,

    /// Fold algorithm
    #[serde(default)]
    pub fold: FoldStyle,
}

impl TryFrom<AdapterSpec> for PromptAdapter {
    type Error = PromptError;

    fn try_from(spec: AdapterSpec) -> Result<Self> {
        let mut builder = PromptAdapter::builder(spec.name)
            .matcher(spec.matcher)
            .style(spec.fold);

        if let Some(system) = spec.system_prompt {
            builder = builder.system_prompt(system);
        }
        if let Some(user) = spec.user_prompt {
            builder = builder.user_prompt(user);
        }
        if let Some(assistant) = spec.assistant_prompt {
            builder = builder.assistant_prompt(assistant);
        }
        if let Some(stop) = spec.stop {
            builder = builder.stop(stop);
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Message;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_declared_adapter_inherits_defaults() {
        let spec: AdapterSpec = toml::from_str(
            r#"
            name = "qa"
            match = { contains = ["qa-"] }
            system_prompt = ""
            user_prompt = "Q: {}\nA: "
            stop = ["Q:"]
            "#,
        )
        .unwrap();
        assert_eq!(spec.fold, FoldStyle::Default);

        let adapter = PromptAdapter::try_from(spec).unwrap();
        assert!(adapter.matches("qa-7b"));
        let prompt = adapter
            .generate_prompt(&[Message::user("1+1?"), Message::assistant("2")])
            .unwrap();
        // assistant template is inherited from the catch-all
        assert_eq!(prompt, "Q: 1+1?\nA: 2\n");
    }

    #[test]
    fn test_declared_adapter_validation_errors_surface() {
        let spec: AdapterSpec = serde_json::from_str(
            r#"{"name": "broken", "match": "any", "user_prompt": "no placeholder"}"#,
        )
        .unwrap();
        assert!(matches!(
            PromptAdapter::try_from(spec),
            Err(PromptError::InvalidTemplate { .. })
        ));
    }

    #[test]
    fn test_declared_system_led_adapter() {
        let spec: AdapterSpec = toml::from_str(
            r#"
            name = "tagged"
            match = { exact = "tagged" }
            system_prompt = "<s>{}</s>"
            user_prompt = "<u>{}</u>"
            assistant_prompt = "<a>{}</a>"
            fold = { style = "system_led" }
            "#,
        )
        .unwrap();
        let adapter = PromptAdapter::try_from(spec).unwrap();
        let prompt = adapter.generate_prompt(&[Message::user("x")]).unwrap();
        assert_eq!(prompt, "<s></s><u>x</u><a>");
    }
}
