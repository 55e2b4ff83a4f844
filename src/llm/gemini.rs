//! Google Generative Language API client.
//!
//! Thin HTTP wrapper for `models/{model}:generateContent`. Conversion between
//! the provider-neutral types and the Gemini wire format is kept in pure
//! functions for testability. Gemini does not assign tool-call ids, so the
//! function name is used as the id on the neutral side and a `tool_result`
//! block's `tool_use_id` is sent back as the `functionResponse` name.

use std::time::Duration;

use super::config::LlmTimeouts;
use super::types::{ChatResponse, Content, ContentBlock, LlmError, Message, Tool};

// =============================================================================
// CLIENT
// =============================================================================

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// # Errors
    ///
    /// Returns `HttpClientBuild` if the reqwest client cannot be constructed.
    pub fn new(api_key: String, base_url: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key, base_url })
    }

    /// Send one `generateContent` request.
    ///
    /// # Errors
    ///
    /// Returns `ApiRequest` on transport failure, `ApiResponse` on a non-200
    /// status, and `ApiParse` when the body cannot be interpreted.
    pub async fn chat(
        &self,
        model: &str,
        max_tokens: u32,
        system: &str,
        messages: &[Message],
        tools: Option<&[Tool]>,
    ) -> Result<ChatResponse, LlmError> {
        let body = build_request(max_tokens, system, messages, tools);
        let url = format!("{}/models/{model}:generateContent", self.base_url);

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        if status != 200 {
            return Err(LlmError::ApiResponse { status, body: text });
        }

        parse_response(model, &text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiRequest {
    system_instruction: WireContent,
    contents: Vec<WireContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<WireToolGroup>>,
    generation_config: GenerationConfig,
}

#[derive(serde::Serialize, serde::Deserialize)]
struct WireContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<WirePart>,
}

#[derive(serde::Serialize, serde::Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct WirePart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    function_call: Option<WireFunctionCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    function_response: Option<WireFunctionResponse>,
}

#[derive(serde::Serialize, serde::Deserialize)]
struct WireFunctionCall {
    name: String,
    #[serde(default)]
    args: serde_json::Value,
}

#[derive(serde::Serialize, serde::Deserialize)]
struct WireFunctionResponse {
    name: String,
    response: serde_json::Value,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct WireToolGroup {
    function_declarations: Vec<WireFunctionDecl>,
}

#[derive(serde::Serialize)]
struct WireFunctionDecl {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
    #[serde(default)]
    model_version: Option<String>,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<WireContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(serde::Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
}

// =============================================================================
// CONVERSION
// =============================================================================

fn build_request(max_tokens: u32, system: &str, messages: &[Message], tools: Option<&[Tool]>) -> ApiRequest {
    let contents = messages.iter().map(to_wire_content).collect();

    let tools = tools.map(|tools| {
        vec![WireToolGroup {
            function_declarations: tools
                .iter()
                .map(|t| WireFunctionDecl {
                    name: t.name.clone(),
                    description: t.description.clone(),
                    parameters: t.input_schema.clone(),
                })
                .collect(),
        }]
    });

    ApiRequest {
        system_instruction: WireContent {
            role: None,
            parts: vec![WirePart { text: Some(system.to_string()), ..WirePart::default() }],
        },
        contents,
        tools,
        generation_config: GenerationConfig { max_output_tokens: max_tokens },
    }
}

fn to_wire_content(message: &Message) -> WireContent {
    let role = if message.role == "assistant" { "model" } else { "user" };

    let parts = match &message.content {
        Content::Text(text) => vec![WirePart { text: Some(text.clone()), ..WirePart::default() }],
        Content::Blocks(blocks) => blocks.iter().filter_map(to_wire_part).collect(),
    };

    WireContent { role: Some(role.to_string()), parts }
}

fn to_wire_part(block: &ContentBlock) -> Option<WirePart> {
    match block {
        ContentBlock::Text { text } => Some(WirePart { text: Some(text.clone()), ..WirePart::default() }),
        ContentBlock::ToolUse { name, input, .. } => Some(WirePart {
            function_call: Some(WireFunctionCall { name: name.clone(), args: input.clone() }),
            ..WirePart::default()
        }),
        ContentBlock::ToolResult { tool_use_id, content, .. } => {
            // Tool output travels back as a functionResponse named after the
            // originating call.
            let result = serde_json::from_str::<serde_json::Value>(content)
                .unwrap_or_else(|_| serde_json::Value::String(content.clone()));
            Some(WirePart {
                function_response: Some(WireFunctionResponse {
                    name: tool_use_id.clone(),
                    response: serde_json::json!({ "result": result }),
                }),
                ..WirePart::default()
            })
        }
        ContentBlock::Unknown => None,
    }
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_response(model: &str, json: &str) -> Result<ChatResponse, LlmError> {
    let api: ApiResponse = serde_json::from_str(json).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    let Some(candidate) = api.candidates.into_iter().next() else {
        return Err(LlmError::ApiParse("response contained no candidates".into()));
    };

    let mut content = Vec::new();
    if let Some(wire) = candidate.content {
        for part in wire.parts {
            if let Some(text) = part.text {
                content.push(ContentBlock::Text { text });
            } else if let Some(call) = part.function_call {
                content.push(ContentBlock::ToolUse { id: call.name.clone(), name: call.name, input: call.args });
            }
        }
    }

    let has_tool_call = content
        .iter()
        .any(|b| matches!(b, ContentBlock::ToolUse { .. }));
    let stop_reason = if has_tool_call {
        "tool_use".to_string()
    } else {
        match candidate.finish_reason.as_deref() {
            Some("STOP") | None => "end_turn".to_string(),
            Some(other) => other.to_ascii_lowercase(),
        }
    };

    let usage = api.usage_metadata.unwrap_or_default();

    Ok(ChatResponse {
        content,
        model: api.model_version.unwrap_or_else(|| model.to_string()),
        stop_reason,
        input_tokens: usage.prompt_token_count,
        output_tokens: usage.candidates_token_count,
    })
}

#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;
