//! Fold algorithms: conversation in, prompt text out
//!
//! Grouped styles ([`FoldStyle::Default`], [`FoldStyle::RoundIndexed`])
//! buffer human turns and emit one user block per model turn, plus a final
//! open user block for unanswered input. Immediate styles
//! ([`FoldStyle::SystemLed`], [`FoldStyle::PreambleFixed`]) emit one block
//! per message and always end on an open assistant marker.

use tracing::{debug, trace};

use super::FoldStyle;
use crate::{
    error::Result,
    messages::{Message, Role, Turn},
    template::Template,
};

/// The three templates an adapter folds with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Templates {
    pub system: Template,
    pub user: Template,
    pub assistant: Template,
}

/// Fold `messages` according to `style`
///
/// # Errors
///
/// Returns [`crate::PromptError::UnknownRole`] when a grouped style meets a
/// role outside `user`, `system`, `assistant` and `AI`. Nothing is returned
/// on that path. Immediate styles never fail.
pub fn fold(style: &FoldStyle, templates: &Templates, messages: &[Message]) -> Result<String> {
    trace!(?style, messages = messages.len(), "folding conversation");

    match style {
        FoldStyle::Default => fold_grouped(templates, messages, None),
        FoldStyle::RoundIndexed {
            first_round,
            separator,
        } => fold_grouped(
            templates,
            messages,
            Some(RoundMarker {
                index: *first_round,
                separator,
            }),
        ),
        FoldStyle::SystemLed => {
            let lead = templates.system.format("");
            Ok(fold_immediate(&lead, templates, messages))
        }
        FoldStyle::PreambleFixed { preamble } => Ok(fold_immediate(preamble, templates, messages)),
    }
}

#[derive(Debug, Clone, Copy)]
struct RoundMarker<'a> {
    index: u32,
    separator: &'a str,
}

fn push_user_block(
    prompt: &mut String,
    user: &Template,
    pending: &[&str],
    round: Option<RoundMarker<'_>>,
) {
    if let Some(RoundMarker { index, separator }) = round {
        prompt.push_str(&format!("[Round {index}]"));
        prompt.push_str(separator);
    }
    prompt.push_str(&user.format(&pending.join("\n")));
}

fn fold_grouped(
    templates: &Templates,
    messages: &[Message],
    mut round: Option<RoundMarker<'_>>,
) -> Result<String> {
    let mut prompt = templates.system.as_str().to_string();
    let mut pending: Vec<&str> = Vec::new();

    for message in messages {
        match message.turn()? {
            Turn::Human => pending.push(&message.content),
            Turn::Model => {
                push_user_block(&mut prompt, &templates.user, &pending, round);
                prompt.push_str(&templates.assistant.format(&message.content));
                pending.clear();
                if let Some(marker) = round.as_mut() {
                    marker.index += 1;
                }
            }
        }
    }

    // the open turn reuses the current round number
    if !pending.is_empty() {
        push_user_block(&mut prompt, &templates.user, &pending, round);
    }

    Ok(prompt)
}

fn fold_immediate(lead: &str, templates: &Templates, messages: &[Message]) -> String {
    let mut prompt = lead.to_string();

    for message in messages {
        let block = match message.parsed_role() {
            Ok(Role::System) => templates.system.format(&message.content),
            Ok(Role::User) => templates.user.format(&message.content),
            Ok(_) => templates.assistant.format(&message.content),
            Err(_) => {
                debug!(role = %message.role, "treating unrecognized role as a model turn");
                templates.assistant.format(&message.content)
            }
        };
        prompt.push_str(&block);
    }

    prompt.push_str(templates.assistant.prefix());
    prompt
}
