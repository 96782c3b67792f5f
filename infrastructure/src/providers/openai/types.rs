//! Type conversions between the chat completions wire format and domain types
//!
//! Converts domain transcripts to request messages, and completion responses
//! to domain `LlmResponse`.

use droidmind_application::GatewayError;
use droidmind_domain::tool::canonical_json;
use droidmind_domain::{ContentBlock, LlmResponse, Message, Role, StopReason};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ─── Wire types ──────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<&'a [Value]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct WireMessage {
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<WireToolCall>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct WireToolCall {
    pub id: String,
    #[serde(rename = "type", default = "function_type")]
    pub call_type: String,
    pub function: WireFunction,
}

fn function_type() -> String {
    "function".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct WireFunction {
    pub name: String,
    /// JSON text; kept raw so argument errors surface per call
    #[serde(default)]
    pub arguments: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
    pub model: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoice {
    pub message: WireMessage,
    pub finish_reason: Option<String>,
}

// ─── Domain → Wire ───────────────────────────────────────────────

/// Convert one transcript message to its wire form.
pub(crate) fn to_wire_message(message: &Message) -> WireMessage {
    match message.role {
        Role::ToolCall => {
            let tool_calls = message.tool_call.as_ref().map(|call| {
                vec![WireToolCall {
                    id: call.id.clone(),
                    call_type: function_type(),
                    function: WireFunction {
                        name: call.tool_name.clone(),
                        arguments: canonical_json(&call.arguments),
                    },
                }]
            });
            WireMessage {
                role: "assistant".to_string(),
                content: None,
                tool_call_id: None,
                tool_calls,
            }
        }
        Role::ToolResult => WireMessage {
            role: "tool".to_string(),
            content: Some(message.content.clone()),
            tool_call_id: message.tool_result.as_ref().map(|r| r.call_id.clone()),
            tool_calls: None,
        },
        role => WireMessage {
            role: role.as_str().to_string(),
            content: Some(message.content.clone()),
            tool_call_id: None,
            tool_calls: None,
        },
    }
}

pub(crate) fn to_wire_messages(transcript: &[Message]) -> Vec<WireMessage> {
    transcript.iter().map(to_wire_message).collect()
}

// ─── Wire → Domain ───────────────────────────────────────────────

/// Convert a completion response to a domain `LlmResponse`.
pub(crate) fn convert_response(response: ChatResponse) -> Result<LlmResponse, GatewayError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| GatewayError::InvalidResponse("response has no choices".to_string()))?;

    let mut content = Vec::new();
    if let Some(text) = choice.message.content.filter(|t| !t.is_empty()) {
        content.push(ContentBlock::text(text));
    }
    for call in choice.message.tool_calls.unwrap_or_default() {
        content.push(ContentBlock::tool_use(
            call.id,
            call.function.name,
            Value::String(call.function.arguments),
        ));
    }

    Ok(LlmResponse {
        content,
        stop_reason: choice
            .finish_reason
            .as_deref()
            .map(StopReason::from_finish_reason),
        model: response.model,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use droidmind_domain::{ToolCall, ToolResult};
    use serde_json::json;

    #[test]
    fn test_role_mapping() {
        let call = ToolCall::new("call_1", "champion_lore").with_arg("name", "Leia");
        let result = ToolResult::new(&call, json!("Princess of Alderaan"));
        let transcript = vec![
            Message::system("You are a droid."),
            Message::developer("Greet the user."),
            Message::user("Who is Leia?"),
            Message::tool_call(call),
            Message::tool_result(result),
            Message::assistant("A princess."),
        ];
        let wire = to_wire_messages(&transcript);
        let roles: Vec<&str> = wire.iter().map(|m| m.role.as_str()).collect();

        assert_eq!(
            roles,
            vec!["system", "developer", "user", "assistant", "tool", "assistant"]
        );
        let calls = wire[3].tool_calls.as_ref().unwrap();
        assert_eq!(calls[0].id, "call_1");
        assert_eq!(calls[0].function.arguments, r#"{"name":"Leia"}"#);
        assert_eq!(wire[3].content, None);
        assert_eq!(wire[4].tool_call_id.as_deref(), Some("call_1"));
        assert_eq!(wire[4].content.as_deref(), Some("Princess of Alderaan"));
    }

    #[test]
    fn test_convert_tool_call_response() {
        let response: ChatResponse = serde_json::from_value(json!({
            "model": "gpt-4o-mini",
            "choices": [{
                "finish_reason": "tool_calls",
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_9",
                        "type": "function",
                        "function": {"name": "champion_details", "arguments": "{\"name\":\"Han Solo\"}"}
                    }]
                }
            }]
        }))
        .unwrap();
        let response = convert_response(response).unwrap();

        assert_eq!(response.stop_reason, Some(StopReason::ToolUse));
        assert_eq!(response.model.as_deref(), Some("gpt-4o-mini"));
        let calls = response.tool_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name, "champion_details");
        assert_eq!(calls[0].arguments, json!("{\"name\":\"Han Solo\"}"));
        assert_eq!(calls[0].parse().unwrap().get_string("name"), Some("Han Solo"));
    }

    #[test]
    fn test_convert_text_response() {
        let response: ChatResponse = serde_json::from_value(json!({
            "choices": [{"finish_reason": "stop", "message": {"role": "assistant", "content": "Hello, cadet."}}]
        }))
        .unwrap();
        let response = convert_response(response).unwrap();
        assert_eq!(response.text_content(), "Hello, cadet.");
        assert!(!response.has_tool_calls());
    }

    #[test]
    fn test_no_choices_is_invalid() {
        let response: ChatResponse = serde_json::from_value(json!({"choices": []})).unwrap();
        assert!(matches!(
            convert_response(response),
            Err(GatewayError::InvalidResponse(_))
        ));
    }
}
