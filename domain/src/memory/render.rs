//! Plain-text rendering of transcript slices for summarization.

use crate::session::entities::{Message, Role};
use regex::Regex;
use std::sync::LazyLock;

/// Byte length of the JSON serialization of `messages`.
pub fn serialized_size(messages: &[Message]) -> usize {
    serde_json::to_vec(messages)
        .map(|bytes| bytes.len())
        .unwrap_or_else(|_| messages.iter().map(|m| m.content.len()).sum())
}

/// Remove markdown emphasis, headers, code and list markers from `text`.
pub fn strip_markdown(text: &str) -> String {
    static RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
        [
            (r"(?s)```[^`]*```", ""),
            (r"\*\*([^*]+)\*\*", "$1"),
            (r"__([^_]+)__", "$1"),
            (r"\*([^*\n]+)\*", "$1"),
            (r"\b_([^_\n]+)_\b", "$1"),
            (r"(?m)^#+[ \t]+", ""),
            (r"`([^`]+)`", "$1"),
            (r"(?m)^[ \t]*[*\-][ \t]+", ""),
            (r"(?m)^[ \t]*\d+\.[ \t]+", ""),
            (r"\n{3,}", "\n\n"),
        ]
        .into_iter()
        .map(|(pattern, replacement)| {
            (
                Regex::new(pattern).expect("invalid markdown pattern"),
                replacement,
            )
        })
        .collect()
    });

    let mut out = text.to_string();
    for (pattern, replacement) in RULES.iter() {
        out = pattern.replace_all(&out, *replacement).into_owned();
    }
    out.trim().to_string()
}

fn label(role: Role) -> &'static str {
    match role {
        Role::System => "System",
        Role::User => "User",
        Role::Assistant => "Assistant",
        Role::ToolCall => "Tool call",
        Role::ToolResult => "Tool result",
        Role::Developer => "Context",
    }
}

/// Render messages as `Role: text` lines with markdown removed.
pub fn render_for_summary(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|m| format!("{}: {}", label(m.role), strip_markdown(&m.content)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::entities::ToolCall;

    #[test]
    fn test_strips_emphasis_headers_and_code() {
        let text = "## Han Solo\n**Captain** of the *Falcon*.\nUses `blaster`.\n```rust\nfn main() {}\n```";
        assert_eq!(
            strip_markdown(text),
            "Han Solo\nCaptain of the Falcon.\nUses blaster."
        );
    }

    #[test]
    fn test_strips_lists_and_collapses_blank_lines() {
        let text = "- Chewbacca\n* Leia\n1. Luke\n\n\n\nEnd";
        assert_eq!(strip_markdown(text), "Chewbacca\nLeia\nLuke\n\nEnd");
    }

    #[test]
    fn test_keeps_snake_case_identifiers() {
        assert_eq!(strip_markdown("called champion_details"), "called champion_details");
    }

    #[test]
    fn test_renders_role_tagged_lines() {
        let call = ToolCall::new("c1", "champion_lore").with_arg("name", "Han Solo");
        let messages = vec![
            Message::user("Tell me about **Han**"),
            Message::tool_call(call),
            Message::assistant("He is a smuggler."),
        ];
        assert_eq!(
            render_for_summary(&messages),
            "User: Tell me about Han\nTool call: champion_lore({\"name\":\"Han Solo\"})\nAssistant: He is a smuggler."
        );
    }

    #[test]
    fn test_serialized_size_grows_with_content() {
        let small = serialized_size(&[Message::user("a")]);
        let large = serialized_size(&[Message::user("a".repeat(100))]);
        assert_eq!(large - small, 99);
        assert_eq!(serialized_size(&[]), 2);
    }
}
