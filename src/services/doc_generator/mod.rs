//! 文档生成器模块
//!
//! 为根目录下的每个项目生成一份 Markdown 文档
//!
//! # 流程
//!
//! - 枚举根目录的一级子目录，每个子目录是一个项目
//! - 检查忽略名单，扫描项目生成摘要、目录树和文件内容
//! - 调用 LLM 生成项目讲解
//! - 再次调用 LLM 整理为 Markdown（失败可重试）
//! - 写入 `<输出目录>/<项目名>_doc.md`
//!
//! # 使用示例
//!
//! ```ignore
//! use crate::llm::LlmClient;
//! use crate::services::doc_generator::{DocGenConfig, PipelineDriver};
//!
//! let client = LlmClient::new("http://localhost:11434/api/generate", "mistral-8192")?;
//! let driver = PipelineDriver::new(DocGenConfig::default(), client, 2);
//! let stats = driver.run(Path::new("projects"), Path::new("docs")).await?;
//! println!("documented {} projects", stats.documented);
//! ```

mod analyzer;
mod formatter;
mod generator;
pub mod prompts;
mod processor;
mod scanner;
pub mod types;

pub use processor::PipelineDriver;
pub use types::{DocGenConfig, RunStats};
