//! 文本生成后端客户端

use reqwest::Client;
use tracing::{debug, error};

use super::format::fix_base_url;
use super::types::{BackendError, GenerationRequest, GenerationResponse};

/// 文本生成客户端
///
/// 封装单个远程生成接口，对外只暴露 `complete(prompt) -> text`。
/// 客户端本身不做重试，重试策略由调用方决定。
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    endpoint: String,
    model: String,
}

impl LlmClient {
    /// 创建新的客户端
    pub fn new(endpoint: impl AsRef<str>, model: impl Into<String>) -> Result<Self, BackendError> {
        let endpoint = fix_base_url(endpoint.as_ref());
        if endpoint.is_empty() {
            return Err(BackendError::ConfigError("LLM URL is required".to_string()));
        }

        let model = model.into();
        if model.trim().is_empty() {
            return Err(BackendError::ConfigError("Model name is required".to_string()));
        }

        // 不设置整体超时，沿用传输层默认行为
        let client = Client::builder()
            .pool_max_idle_per_host(2)
            .build()
            .map_err(BackendError::HttpError)?;

        Ok(Self {
            client,
            endpoint,
            model,
        })
    }

    /// 后端地址
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// 模型名称
    pub fn model(&self) -> &str {
        &self.model
    }

    /// 发送一次非流式生成请求，返回 `response` 字段内容
    pub async fn complete(&self, prompt: &str) -> Result<String, BackendError> {
        let result = self.send(prompt).await;
        if let Err(e) = &result {
            error!("LLM request failed: endpoint={}, error={}", self.endpoint, e);
        }
        result
    }

    async fn send(&self, prompt: &str) -> Result<String, BackendError> {
        let payload = GenerationRequest::new(&self.model, prompt);

        debug!(
            "LLM request: endpoint={}, model={}, prompt_chars={}",
            self.endpoint,
            self.model,
            prompt.chars().count()
        );

        let response = self.client.post(&self.endpoint).json(&payload).send().await?;

        // 检查状态码
        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(BackendError::ApiError {
                status: status.as_u16(),
                message: error_text.chars().take(500).collect(),
            });
        }

        let body = response.bytes().await?;
        let parsed: GenerationResponse = serde_json::from_slice(&body)?;

        parsed.response.ok_or(BackendError::MissingField("response"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_new_rejects_empty_url() {
        assert!(matches!(
            LlmClient::new("   ", "mistral"),
            Err(BackendError::ConfigError(_))
        ));
        assert!(matches!(
            LlmClient::new("http://localhost:11434/api/generate", ""),
            Err(BackendError::ConfigError(_))
        ));
    }

    #[tokio::test]
    async fn test_complete_sends_non_streaming_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_json(json!({
                "model": "mistral-8192",
                "prompt": "explain this",
                "stream": false
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "response": "an explanation", "done": true })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client =
            LlmClient::new(format!("{}/api/generate/", server.uri()), "mistral-8192").unwrap();
        let text = client.complete("explain this").await.unwrap();

        assert_eq!(text, "an explanation");
    }

    #[tokio::test]
    async fn test_complete_missing_response_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "done": true })))
            .mount(&server)
            .await;

        let client = LlmClient::new(server.uri(), "mistral").unwrap();
        let err = client.complete("hi").await.unwrap_err();

        assert!(matches!(err, BackendError::MissingField("response")));
    }

    #[tokio::test]
    async fn test_complete_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = LlmClient::new(server.uri(), "mistral").unwrap();
        let err = client.complete("hi").await.unwrap_err();

        assert!(matches!(err, BackendError::JsonError(_)));
    }

    #[tokio::test]
    async fn test_complete_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("model loading"))
            .mount(&server)
            .await;

        let client = LlmClient::new(server.uri(), "mistral").unwrap();
        match client.complete("hi").await {
            Err(BackendError::ApiError { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "model loading");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_complete_connection_refused() {
        // 端口 1 上没有服务监听
        let client = LlmClient::new("http://127.0.0.1:1/api/generate", "mistral").unwrap();
        let err = client.complete("hi").await.unwrap_err();

        assert!(matches!(err, BackendError::HttpError(_)));
    }
}
