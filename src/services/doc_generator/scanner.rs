//! 目录扫描器
//!
//! 扫描项目目录，生成摘要、目录树和拼接后的文件内容三段文本

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::types::FileNode;

/// 文件内容分隔线
const SEPARATOR: &str = "================================================";

/// 摄取结果
#[derive(Debug, Clone, Default)]
pub struct IngestOutput {
    pub summary: String,
    pub tree: String,
    pub content: String,
}

/// 扫描并渲染目录
///
/// `max_file_size` 以字节为单位，超过的文件不纳入结果；
/// `exclude_patterns` 同时匹配条目名称和相对路径。
pub fn ingest(
    path: &Path,
    max_file_size: u64,
    exclude_patterns: &[String],
) -> Result<IngestOutput, ScanError> {
    let scanner = DirectoryScanner::new(exclude_patterns, max_file_size);
    let root = scanner.scan(path)?;

    let tree = render_tree(&root);
    let content = render_content(&root);
    let summary = render_summary(&root, &tree, &content);

    Ok(IngestOutput {
        summary,
        tree,
        content,
    })
}

/// 目录扫描器
pub struct DirectoryScanner {
    max_file_size: u64,
    /// 编译后的排除模式（glob patterns）
    exclude_patterns: Vec<glob::Pattern>,
}

impl DirectoryScanner {
    /// 创建新的目录扫描器
    pub fn new(patterns: &[String], max_file_size: u64) -> Self {
        let exclude_patterns = patterns
            .iter()
            .filter_map(|p| match glob::Pattern::new(p) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    warn!("Invalid exclude pattern '{}': {}", p, e);
                    None
                }
            })
            .collect();

        Self {
            max_file_size,
            exclude_patterns,
        }
    }

    /// 扫描目录，构建文件树
    pub fn scan(&self, root_path: &Path) -> Result<FileNode, ScanError> {
        if !root_path.exists() {
            return Err(ScanError::PathNotFound(root_path.to_path_buf()));
        }

        if !root_path.is_dir() {
            return Err(ScanError::NotADirectory(root_path.to_path_buf()));
        }

        debug!("Starting directory scan: {}", root_path.display());
        let root = self.scan_dir(root_path, root_path)?;
        let total_bytes: u64 = root.get_all_files().iter().filter_map(|f| f.size).sum();
        info!(
            "Scan completed: {} ({} files, {} bytes)",
            root_path.display(),
            root.file_count(),
            total_bytes
        );

        Ok(root)
    }

    /// 递归扫描目录
    fn scan_dir(&self, path: &Path, root_path: &Path) -> Result<FileNode, ScanError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());

        let mut node = FileNode::new_dir(name, path.to_path_buf(), relative_path(path, root_path));

        let entries = fs::read_dir(path).map_err(|e| ScanError::IoError(path.to_path_buf(), e))?;

        let mut children = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| ScanError::IoError(path.to_path_buf(), e))?;
            let entry_path = entry.path();
            let entry_name = entry.file_name().to_string_lossy().to_string();
            let entry_relative = relative_path(&entry_path, root_path);

            if self.should_exclude(&entry_relative, &entry_name) {
                debug!("Excluding: {}", entry_path.display());
                continue;
            }

            // 不跟随符号链接，避免循环
            let file_type = entry
                .file_type()
                .map_err(|e| ScanError::IoError(entry_path.clone(), e))?;

            if file_type.is_dir() {
                children.push(self.scan_dir(&entry_path, root_path)?);
            } else if file_type.is_file() {
                let size = entry
                    .metadata()
                    .map_err(|e| ScanError::IoError(entry_path.clone(), e))?
                    .len();

                // 跳过过大的文件
                if size > self.max_file_size {
                    debug!(
                        "Skipping oversized file: {} ({} bytes)",
                        entry_path.display(),
                        size
                    );
                    continue;
                }

                children.push(FileNode::new_file(entry_name, entry_path, entry_relative, size));
            }
        }

        // 排序：目录在前，文件在后，按名称排序
        children.sort_by(|a, b| match (a.is_file, b.is_file) {
            (false, true) => std::cmp::Ordering::Less,
            (true, false) => std::cmp::Ordering::Greater,
            _ => a.name.cmp(&b.name),
        });

        node.children = children;
        Ok(node)
    }

    /// 检查是否应该排除该条目
    fn should_exclude(&self, relative_path: &str, name: &str) -> bool {
        self.exclude_patterns
            .iter()
            .any(|pattern| pattern.matches(name) || pattern.matches(relative_path))
    }
}

fn relative_path(path: &Path, root_path: &Path) -> String {
    path.strip_prefix(root_path)
        .map(|p| p.to_string_lossy().to_string().replace('\\', "/"))
        .unwrap_or_default()
}

/// 渲染目录树
fn render_tree(root: &FileNode) -> String {
    let mut out = String::from("Directory structure:\n");
    out.push_str(&format!("└── {}/\n", root.name));
    render_children(root, "    ", &mut out);
    out
}

fn render_children(node: &FileNode, prefix: &str, out: &mut String) {
    let count = node.children.len();
    for (index, child) in node.children.iter().enumerate() {
        let is_last = index + 1 == count;
        let connector = if is_last { "└── " } else { "├── " };
        let suffix = if child.is_file { "" } else { "/" };
        out.push_str(&format!("{}{}{}{}\n", prefix, connector, child.name, suffix));

        if !child.is_file {
            let extension = if is_last { "    " } else { "│   " };
            render_children(child, &format!("{}{}", prefix, extension), out);
        }
    }
}

/// 渲染所有文件内容
fn render_content(root: &FileNode) -> String {
    let mut out = String::new();

    for file in root.get_all_files() {
        let text = match fs::read(&file.path) {
            Ok(bytes) => String::from_utf8(bytes).unwrap_or_else(|_| "[Non-text file]".to_string()),
            Err(e) => {
                warn!("Failed to read {}: {}", file.path.display(), e);
                format!("Error reading file: {}", e)
            }
        };

        out.push_str(SEPARATOR);
        out.push('\n');
        out.push_str(&format!("FILE: {}\n", file.relative_path));
        out.push_str(SEPARATOR);
        out.push('\n');
        out.push_str(&text);
        out.push_str("\n\n");
    }

    out
}

/// 渲染摘要
fn render_summary(root: &FileNode, tree: &str, content: &str) -> String {
    let chars = tree.chars().count() + content.chars().count();
    format!(
        "Directory: {}\nFiles analyzed: {}\n\nEstimated tokens: {}",
        root.name,
        root.file_count(),
        format_token_count(chars / 4)
    )
}

/// 以 k/M 后缀展示 token 数
fn format_token_count(tokens: usize) -> String {
    if tokens >= 1_000_000 {
        format!("{:.1}M", tokens as f64 / 1_000_000.0)
    } else if tokens >= 1_000 {
        format!("{:.1}k", tokens as f64 / 1_000.0)
    } else {
        tokens.to_string()
    }
}

/// 扫描错误类型
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("路径不存在: {0}")]
    PathNotFound(PathBuf),

    #[error("路径不是目录: {0}")]
    NotADirectory(PathBuf),

    #[error("IO错误 ({0}): {1}")]
    IoError(PathBuf, #[source] std::io::Error),

    #[error("扫描任务异常终止: {0}")]
    TaskFailed(String),
}
