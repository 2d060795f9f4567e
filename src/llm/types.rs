//! LLM 类型定义

use serde::{Deserialize, Serialize};

/// 生成请求载荷
///
/// 对应后端接口 `{ "model": ..., "prompt": ..., "stream": false }`
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest<'a> {
    /// 模型名称
    pub model: &'a str,
    /// 完整 Prompt
    pub prompt: &'a str,
    /// 是否流式返回（固定为 false）
    pub stream: bool,
}

impl<'a> GenerationRequest<'a> {
    pub fn new(model: &'a str, prompt: &'a str) -> Self {
        Self {
            model,
            prompt,
            stream: false,
        }
    }
}

/// 生成响应
///
/// 只关心 `response` 字段，其余字段忽略
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationResponse {
    pub response: Option<String>,
}

/// 后端调用错误类型
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// HTTP 请求错误
    #[error("HTTP 请求失败: {0}")]
    HttpError(#[from] reqwest::Error),

    /// API 返回错误
    #[error("API 错误 ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// JSON 解析错误
    #[error("JSON 解析失败: {0}")]
    JsonError(#[from] serde_json::Error),

    /// 响应缺少字段
    #[error("响应缺少字段: {0}")]
    MissingField(&'static str),

    /// 配置错误
    #[error("配置错误: {0}")]
    ConfigError(String),
}
