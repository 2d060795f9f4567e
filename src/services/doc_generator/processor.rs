//! 流水线驱动
//!
//! 枚举根目录下的一级子目录，每个子目录视为一个项目，
//! 依次执行 分析 → 生成 → 格式化 → 写入，一个项目完成后再处理下一个。

use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{error, info, warn};

use super::analyzer::ProjectAnalyzer;
use super::formatter::{FormatError, MarkdownFormatter};
use super::generator::DocumentGenerator;
use super::scanner::ScanError;
use super::types::{AnalysisOutcome, DocGenConfig, RunStats};
use crate::error::{AppError, AppResult};
use crate::llm::{BackendError, LlmClient};

/// 单个项目的处理结果
#[derive(Debug)]
pub enum ProjectOutcome {
    /// 文档已写入
    Documented(PathBuf),
    /// 命中忽略目录
    Skipped,
    /// 处理失败，未写入文档
    Failed(ProcessorError),
}

/// 流水线驱动
pub struct PipelineDriver {
    config: DocGenConfig,
    analyzer: ProjectAnalyzer,
    generator: DocumentGenerator,
    formatter: MarkdownFormatter,
    llm_client: LlmClient,
}

impl PipelineDriver {
    /// 创建新的流水线驱动
    pub fn new(config: DocGenConfig, llm_client: LlmClient, format_max_attempts: u32) -> Self {
        Self {
            analyzer: ProjectAnalyzer::new(config.clone()),
            generator: DocumentGenerator::new(config.clone()),
            formatter: MarkdownFormatter::new(format_max_attempts),
            config,
            llm_client,
        }
    }

    /// 处理根目录下的所有项目
    ///
    /// 只有输出目录无法创建或根目录无法读取时返回错误，
    /// 单个项目的失败记录日志后继续处理下一个。
    pub async fn run(&self, root_dir: &Path, output_dir: &Path) -> AppResult<RunStats> {
        fs::create_dir_all(output_dir)
            .await
            .map_err(|e| AppError::Io(output_dir.to_path_buf(), e))?;

        let subdirs = list_subdirectories(root_dir).await?;
        info!("Subdirectories found: {}", subdirs.len());

        let mut stats = RunStats {
            discovered: subdirs.len(),
            ..Default::default()
        };

        for subdir in &subdirs {
            match self.process_project(subdir, output_dir).await {
                ProjectOutcome::Documented(path) => {
                    info!("Documentation generated: {}", path.display());
                    stats.documented += 1;
                }
                ProjectOutcome::Skipped => {
                    stats.skipped += 1;
                }
                ProjectOutcome::Failed(e) => {
                    error!("No documentation produced for {}: {}", subdir.display(), e);
                    stats.failed += 1;
                }
            }
        }

        info!(
            "Run finished: {} discovered, {} documented, {} skipped, {} failed",
            stats.discovered, stats.documented, stats.skipped, stats.failed
        );

        Ok(stats)
    }

    /// 处理单个项目
    pub async fn process_project(&self, project_dir: &Path, output_dir: &Path) -> ProjectOutcome {
        let summary = match self.analyzer.analyze(project_dir).await {
            AnalysisOutcome::Success(summary) => summary,
            AnalysisOutcome::Skipped => return ProjectOutcome::Skipped,
            AnalysisOutcome::Failed(e) => return ProjectOutcome::Failed(e.into()),
        };

        let raw_doc = match self.generator.generate(Some(&summary), &self.llm_client).await {
            Ok(doc) => doc,
            Err(e) => return ProjectOutcome::Failed(e.into()),
        };

        let formatted = match self.formatter.format(&raw_doc, &self.llm_client).await {
            Ok(doc) => doc,
            Err(e) => {
                warn!("Formatting gave up for {}", project_dir.display());
                return ProjectOutcome::Failed(e.into());
            }
        };

        let name = project_name(project_dir);
        let doc_path = self.get_doc_path(output_dir, &name);
        let content = self.format_project_doc(&name, &formatted);

        match save_document(&doc_path, &content).await {
            Ok(()) => ProjectOutcome::Documented(doc_path),
            Err(e) => ProjectOutcome::Failed(e),
        }
    }

    /// 获取项目的文档路径
    ///
    /// 例如: projects/alpha -> output/alpha_doc.md
    pub fn get_doc_path(&self, output_dir: &Path, name: &str) -> PathBuf {
        output_dir.join(format!("{}{}", name, self.config.doc_suffix))
    }

    /// 格式化项目文档
    fn format_project_doc(&self, name: &str, body: &str) -> String {
        format!("# {} {}\n\n{}", self.config.title_prefix, name, body)
    }
}

/// 列出根目录下的一级子目录（按名称排序）
pub async fn list_subdirectories(root_dir: &Path) -> AppResult<Vec<PathBuf>> {
    let metadata = fs::metadata(root_dir)
        .await
        .map_err(|e| AppError::Io(root_dir.to_path_buf(), e))?;
    if !metadata.is_dir() {
        return Err(AppError::NotADirectory(root_dir.to_path_buf()));
    }

    let mut entries = fs::read_dir(root_dir)
        .await
        .map_err(|e| AppError::Io(root_dir.to_path_buf(), e))?;

    let mut subdirs = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AppError::Io(root_dir.to_path_buf(), e))?
    {
        let path = entry.path();
        if fs::metadata(&path).await.map(|m| m.is_dir()).unwrap_or(false) {
            subdirs.push(path);
        }
    }

    subdirs.sort();
    Ok(subdirs)
}

fn project_name(project_dir: &Path) -> String {
    project_dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| project_dir.to_string_lossy().to_string())
}

/// 保存文档到文件（UTF-8）
///
/// 先写入同目录下的临时文件再重命名，失败时清理临时文件，不留下半截文档
async fn save_document(path: &Path, content: &str) -> Result<(), ProcessorError> {
    let tmp_path = temp_path(path);

    let result = write_then_rename(&tmp_path, path, content).await;
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path).await;
    }
    result
}

async fn write_then_rename(tmp_path: &Path, path: &Path, content: &str) -> Result<(), ProcessorError> {
    let mut file = fs::File::create(tmp_path)
        .await
        .map_err(|e| ProcessorError::IoError(tmp_path.to_path_buf(), e))?;

    file.write_all(content.as_bytes())
        .await
        .map_err(|e| ProcessorError::IoError(tmp_path.to_path_buf(), e))?;

    file.flush()
        .await
        .map_err(|e| ProcessorError::IoError(tmp_path.to_path_buf(), e))?;
    drop(file);

    fs::rename(tmp_path, path)
        .await
        .map_err(|e| ProcessorError::IoError(path.to_path_buf(), e))
}

/// 例如: out/alpha_doc.md -> out/alpha_doc.md.tmp
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// 项目处理错误类型
#[derive(Debug, thiserror::Error)]
pub enum ProcessorError {
    #[error("分析失败: {0}")]
    Ingestion(#[from] ScanError),

    #[error("生成失败: {0}")]
    Generation(#[from] BackendError),

    #[error("{0}")]
    Formatting(#[from] FormatError),

    #[error("IO错误 ({0}): {1}")]
    IoError(PathBuf, #[source] std::io::Error),
}
