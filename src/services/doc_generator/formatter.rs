//! Markdown 格式化器
//!
//! 二次调用 LLM，把项目讲解整理成可直接发布的 Markdown

use tracing::{info, warn};

use super::prompts;
use crate::llm::LlmClient;

/// Markdown 格式化器
pub struct MarkdownFormatter {
    max_attempts: u32,
}

impl MarkdownFormatter {
    /// 创建新的格式化器，`max_attempts` 至少为 1
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    /// 格式化文档
    ///
    /// 每次尝试都是独立的完整请求，成功即返回，不校验返回内容的结构
    pub async fn format(&self, raw_doc: &str, llm_client: &LlmClient) -> Result<String, FormatError> {
        let prompt = prompts::format_markdown_prompt(raw_doc);
        let mut last_error = None;

        for attempt in 1..=self.max_attempts {
            match llm_client.complete(&prompt).await {
                Ok(formatted) => {
                    if attempt > 1 {
                        info!("Formatting succeeded on attempt {}", attempt);
                    }
                    return Ok(formatted);
                }
                Err(e) => {
                    warn!("Error while formatting (attempt {}): {}", attempt, e);
                    last_error = Some(e);
                }
            }
        }

        Err(FormatError::Exhausted {
            attempts: self.max_attempts,
            last_error: last_error.map(|e| e.to_string()).unwrap_or_default(),
        })
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new(2)
    }
}

/// 格式化错误类型
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("格式化在 {attempts} 次尝试后仍失败: {last_error}")]
    Exhausted { attempts: u32, last_error: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_format_retries_after_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("busy"))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "response": "# Formatted" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = LlmClient::new(server.uri(), "mistral").unwrap();
        let formatted = MarkdownFormatter::new(2)
            .format("raw doc", &client)
            .await
            .unwrap();

        assert_eq!(formatted, "# Formatted");
    }

    #[tokio::test]
    async fn test_format_gives_up_after_max_attempts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502))
            .expect(2)
            .mount(&server)
            .await;

        let client = LlmClient::new(server.uri(), "mistral").unwrap();
        let result = MarkdownFormatter::default().format("raw doc", &client).await;

        match result {
            Err(FormatError::Exhausted { attempts, last_error }) => {
                assert_eq!(attempts, 2);
                assert!(last_error.contains("502"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_format_single_attempt_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "ok" })))
            .expect(1)
            .mount(&server)
            .await;

        let client = LlmClient::new(server.uri(), "mistral").unwrap();
        let formatted = MarkdownFormatter::new(5).format("raw", &client).await.unwrap();

        assert_eq!(formatted, "ok");
    }

    #[test]
    fn test_zero_attempts_clamped() {
        assert_eq!(MarkdownFormatter::new(0).max_attempts, 1);
    }
}
