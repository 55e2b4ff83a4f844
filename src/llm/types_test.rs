use super::*;
use crate::error::ErrorCode;

// =============================================================================
// LlmError::error_code
// =============================================================================

#[test]
fn error_code_config_parse() {
    let err = LlmError::ConfigParse("bad".into());
    assert_eq!(err.error_code(), "E_CONFIG_PARSE");
}

#[test]
fn error_code_missing_api_key() {
    let err = LlmError::MissingApiKey { var: "KEY".into() };
    assert_eq!(err.error_code(), "E_MISSING_API_KEY");
}

#[test]
fn error_code_api_request() {
    let err = LlmError::ApiRequest("timeout".into());
    assert_eq!(err.error_code(), "E_API_REQUEST");
}

#[test]
fn error_code_api_response() {
    let err = LlmError::ApiResponse { status: 500, body: "oops".into() };
    assert_eq!(err.error_code(), "E_API_RESPONSE");
}

#[test]
fn error_code_api_parse() {
    let err = LlmError::ApiParse("json".into());
    assert_eq!(err.error_code(), "E_API_PARSE");
}

#[test]
fn error_code_http_client_build() {
    let err = LlmError::HttpClientBuild("tls".into());
    assert_eq!(err.error_code(), "E_HTTP_CLIENT_BUILD");
}

// =============================================================================
// LlmError::retryable
// =============================================================================

#[test]
fn retryable_api_request() {
    assert!(LlmError::ApiRequest("conn refused".into()).retryable());
}

#[test]
fn retryable_api_response_429_and_5xx() {
    assert!(LlmError::ApiResponse { status: 429, body: "rate limited".into() }.retryable());
    assert!(LlmError::ApiResponse { status: 500, body: "internal".into() }.retryable());
    assert!(LlmError::ApiResponse { status: 503, body: "unavailable".into() }.retryable());
}

#[test]
fn not_retryable_client_errors() {
    assert!(!LlmError::ApiResponse { status: 400, body: "bad request".into() }.retryable());
    assert!(!LlmError::ApiResponse { status: 401, body: "unauthorized".into() }.retryable());
    assert!(!LlmError::ConfigParse("bad".into()).retryable());
    assert!(!LlmError::MissingApiKey { var: "K".into() }.retryable());
    assert!(!LlmError::ApiParse("json".into()).retryable());
    assert!(!LlmError::HttpClientBuild("tls".into()).retryable());
}

// =============================================================================
// ContentBlock serde round-trips
// =============================================================================

#[test]
fn content_block_text_round_trip() {
    let block = ContentBlock::Text { text: "hello".into() };
    let json = serde_json::to_string(&block).unwrap();
    let restored: ContentBlock = serde_json::from_str(&json).unwrap();
    match restored {
        ContentBlock::Text { text } => assert_eq!(text, "hello"),
        other => panic!("expected Text, got {other:?}"),
    }
}

#[test]
fn content_block_tool_use_round_trip() {
    let block = ContentBlock::ToolUse {
        id: "getStockLevel".into(),
        name: "getStockLevel".into(),
        input: serde_json::json!({"item": "Mouse"}),
    };
    let json = serde_json::to_string(&block).unwrap();
    let restored: ContentBlock = serde_json::from_str(&json).unwrap();
    match restored {
        ContentBlock::ToolUse { id, name, input } => {
            assert_eq!(id, "getStockLevel");
            assert_eq!(name, "getStockLevel");
            assert_eq!(input["item"], "Mouse");
        }
        other => panic!("expected ToolUse, got {other:?}"),
    }
}

#[test]
fn content_block_tool_result_is_error_none_skipped() {
    let block = ContentBlock::ToolResult { tool_use_id: "getStockLevel".into(), content: "42".into(), is_error: None };
    let json = serde_json::to_string(&block).unwrap();
    assert!(!json.contains("is_error"));
}

#[test]
fn content_block_unknown_variant() {
    let json = r#"{"type": "some_future_type", "data": 123}"#;
    let block: ContentBlock = serde_json::from_str(json).unwrap();
    assert!(matches!(block, ContentBlock::Unknown));
}

// =============================================================================
// Content / Message serde
// =============================================================================

#[test]
fn content_text_variant_round_trip() {
    let content = Content::Text("how many mice?".into());
    let json = serde_json::to_string(&content).unwrap();
    let restored: Content = serde_json::from_str(&json).unwrap();
    match restored {
        Content::Text(s) => assert_eq!(s, "how many mice?"),
        other => panic!("expected Text, got {other:?}"),
    }
}

#[test]
fn message_text_round_trip() {
    let msg = Message { role: "user".into(), content: Content::Text("stock of Mouse?".into()) };
    let json = serde_json::to_string(&msg).unwrap();
    let restored: Message = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.role, "user");
    match restored.content {
        Content::Text(s) => assert_eq!(s, "stock of Mouse?"),
        other => panic!("expected Text, got {other:?}"),
    }
}

// =============================================================================
// ChatResponse serde
// =============================================================================

#[test]
fn chat_response_round_trip() {
    let resp = ChatResponse {
        content: vec![ContentBlock::Text { text: "Stock looks healthy.".into() }],
        model: "gemini-test".into(),
        stop_reason: "end_turn".into(),
        input_tokens: 100,
        output_tokens: 50,
    };
    let json = serde_json::to_string(&resp).unwrap();
    let restored: ChatResponse = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.model, "gemini-test");
    assert_eq!(restored.stop_reason, "end_turn");
    assert_eq!(restored.input_tokens, 100);
    assert_eq!(restored.output_tokens, 50);
    assert_eq!(restored.content.len(), 1);
}
