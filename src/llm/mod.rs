//! LLM 模块
//!
//! 提供文本生成后端的统一客户端。

mod client;
mod format;
mod types;

pub use client::LlmClient;
pub use types::*;
