//! 项目分析器
//!
//! 判断项目目录是否需要跳过，否则调用扫描器生成项目摘要

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use walkdir::WalkDir;

use super::scanner::{ingest, IngestOutput, ScanError};
use super::types::{AnalysisOutcome, DocGenConfig, ProjectSummary};

/// 项目分析器
pub struct ProjectAnalyzer {
    config: DocGenConfig,
    skip_dirs: HashSet<String>,
}

impl ProjectAnalyzer {
    /// 创建新的项目分析器
    pub fn new(config: DocGenConfig) -> Self {
        let skip_dirs = config.skip_dirs.iter().cloned().collect();
        Self { config, skip_dirs }
    }

    /// 分析项目目录
    pub async fn analyze(&self, directory: &Path) -> AnalysisOutcome {
        info!("Analyzing folder: {}", directory.display());

        match self.scan(directory.to_path_buf()).await {
            Ok(Some(output)) => AnalysisOutcome::Success(ProjectSummary {
                directory: directory.to_path_buf(),
                summary: output.summary,
                tree: output.tree,
                content: output.content,
            }),
            Ok(None) => {
                info!("Folder ignored: {}", directory.display());
                AnalysisOutcome::Skipped
            }
            Err(e) => {
                error!("Error analyzing {}: {}", directory.display(), e);
                AnalysisOutcome::Failed(e)
            }
        }
    }

    /// 在阻塞线程池中执行跳过检查和目录扫描，命中忽略名单时返回 `None`
    async fn scan(&self, directory: PathBuf) -> Result<Option<IngestOutput>, ScanError> {
        let skip_dirs = self.skip_dirs.clone();
        let max_file_size = self.config.max_file_size;
        let patterns = self.config.exclude_patterns.clone();

        tokio::task::spawn_blocking(move || {
            if contains_skip_dir(&directory, &skip_dirs) {
                return Ok(None);
            }
            ingest(&directory, max_file_size, &patterns).map(Some)
        })
        .await
        .map_err(|e| ScanError::TaskFailed(e.to_string()))?
    }
}

/// 目录本身或其任意子目录命中忽略名单时返回 true
///
/// 遇到第一个命中即停止遍历
fn contains_skip_dir(directory: &Path, skip_dirs: &HashSet<String>) -> bool {
    WalkDir::new(directory)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_dir())
        .any(|entry| skip_dirs.contains(entry.file_name().to_string_lossy().as_ref()))
}
