//! 应用配置
//!
//! 后端地址与模型名称在启动时确定，作为显式的配置值传入客户端，
//! 业务代码不直接读取进程环境变量。

use crate::error::AppError;
use crate::llm::LlmClient;

/// 默认模型名称
pub const DEFAULT_MODEL: &str = "mistral-8192";

/// 默认格式化最大尝试次数
pub const DEFAULT_FORMAT_ATTEMPTS: u32 = 2;

/// 应用配置结构体
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// 生成后端 URL
    pub llm_url: String,

    /// 模型名称
    pub model: String,

    /// Markdown 格式化最大尝试次数
    pub format_max_attempts: u32,
}

impl AppConfig {
    pub fn new(llm_url: impl Into<String>) -> Self {
        Self {
            llm_url: llm_url.into(),
            model: DEFAULT_MODEL.to_string(),
            format_max_attempts: DEFAULT_FORMAT_ATTEMPTS,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_format_attempts(mut self, attempts: u32) -> Self {
        self.format_max_attempts = attempts;
        self
    }

    /// 根据配置构建生成客户端
    pub fn build_client(&self) -> Result<LlmClient, AppError> {
        if self.format_max_attempts == 0 {
            return Err(AppError::Config(
                "format attempts must be at least 1".to_string(),
            ));
        }

        LlmClient::new(&self.llm_url, self.model.clone())
            .map_err(|e| AppError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::new("http://localhost:11434/api/generate");
        assert_eq!(config.model, "mistral-8192");
        assert_eq!(config.format_max_attempts, 2);
    }

    #[test]
    fn test_build_client() {
        let client = AppConfig::new("http://localhost:11434/api/generate/")
            .with_model("llama3")
            .build_client()
            .unwrap();

        assert_eq!(client.endpoint(), "http://localhost:11434/api/generate");
        assert_eq!(client.model(), "llama3");
    }

    #[test]
    fn test_build_client_rejects_invalid() {
        assert!(AppConfig::new("").build_client().is_err());
        assert!(AppConfig::new("http://localhost")
            .with_format_attempts(0)
            .build_client()
            .is_err());
    }
}
