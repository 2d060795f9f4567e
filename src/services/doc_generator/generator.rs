//! 文档生成器
//!
//! 根据项目摘要构建 Prompt，调用 LLM 生成项目讲解文本

use tracing::{debug, info};

use super::prompts;
use super::types::{DocGenConfig, ProjectSummary};
use crate::llm::{BackendError, LlmClient};

/// 没有分析结果时返回的占位文本
pub const ANALYSIS_UNAVAILABLE: &str = "Analysis not available";

/// 文档生成器
pub struct DocumentGenerator {
    config: DocGenConfig,
}

impl DocumentGenerator {
    /// 创建新的文档生成器
    pub fn new(config: DocGenConfig) -> Self {
        Self { config }
    }

    /// 构建项目讲解 Prompt，文件内容按字符数截断
    pub fn build_prompt(&self, summary: &ProjectSummary) -> String {
        let content = prompts::truncate_chars(&summary.content, self.config.content_char_limit);
        if content.len() < summary.content.len() {
            debug!(
                "Content truncated to {} chars for {}",
                self.config.content_char_limit,
                summary.directory.display()
            );
        }

        prompts::format_project_analysis_prompt(&summary.summary, &summary.tree, content)
    }

    /// 生成项目讲解
    ///
    /// 只调用一次 LLM，失败直接返回错误，不做重试
    pub async fn generate(
        &self,
        summary: Option<&ProjectSummary>,
        llm_client: &LlmClient,
    ) -> Result<String, BackendError> {
        let Some(summary) = summary else {
            return Ok(ANALYSIS_UNAVAILABLE.to_string());
        };

        info!("Generating documentation for: {}", summary.directory.display());

        let prompt = self.build_prompt(summary);
        llm_client.complete(&prompt).await
    }
}
