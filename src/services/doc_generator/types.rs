//! 文档生成器类型定义
//!
//! 定义项目摘要、分析结果、文件节点和运行统计等核心类型

use std::path::PathBuf;

use super::scanner::ScanError;

/// 项目摘要
///
/// 每个被分析的目录产生一份，生成文档后即丢弃
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummary {
    /// 项目目录
    pub directory: PathBuf,
    /// 摘要文本
    pub summary: String,
    /// 目录树文本
    pub tree: String,
    /// 拼接后的文件内容
    pub content: String,
}

/// 项目分析结果
#[derive(Debug)]
pub enum AnalysisOutcome {
    /// 分析成功
    Success(ProjectSummary),
    /// 命中忽略目录，未分析
    Skipped,
    /// 摄取失败
    Failed(ScanError),
}

/// 文件/目录节点
#[derive(Debug, Clone)]
pub struct FileNode {
    /// 节点名称（文件名或目录名）
    pub name: String,
    /// 完整路径
    pub path: PathBuf,
    /// 相对于项目根目录的路径（使用 `/` 分隔）
    pub relative_path: String,
    /// 是否为文件（否则为目录）
    pub is_file: bool,
    /// 子节点（仅目录有效）
    pub children: Vec<FileNode>,
    /// 文件大小（字节）
    pub size: Option<u64>,
}

impl FileNode {
    /// 创建新的文件节点
    pub fn new_file(name: String, path: PathBuf, relative_path: String, size: u64) -> Self {
        Self {
            name,
            path,
            relative_path,
            is_file: true,
            children: Vec::new(),
            size: Some(size),
        }
    }

    /// 创建新的目录节点
    pub fn new_dir(name: String, path: PathBuf, relative_path: String) -> Self {
        Self {
            name,
            path,
            relative_path,
            is_file: false,
            children: Vec::new(),
            size: None,
        }
    }

    /// 获取所有文件节点（递归，保持树的顺序）
    pub fn get_all_files(&self) -> Vec<&FileNode> {
        let mut files = Vec::new();
        self.collect_files(&mut files);
        files
    }

    fn collect_files<'a>(&'a self, files: &mut Vec<&'a FileNode>) {
        if self.is_file {
            files.push(self);
        } else {
            for child in &self.children {
                child.collect_files(files);
            }
        }
    }

    /// 统计文件数量
    pub fn file_count(&self) -> usize {
        if self.is_file {
            1
        } else {
            self.children.iter().map(|c| c.file_count()).sum()
        }
    }
}

/// 文档生成配置
#[derive(Debug, Clone)]
pub struct DocGenConfig {
    /// 命中即跳过整个项目的目录名
    pub skip_dirs: Vec<String>,

    /// 摄取时排除的 glob 模式
    pub exclude_patterns: Vec<String>,

    /// 单个文件大小上限（字节，默认 10MB）
    pub max_file_size: u64,

    /// 传给生成 Prompt 的文件内容字符上限
    pub content_char_limit: usize,

    /// 输出文件名后缀
    pub doc_suffix: String,

    /// 文档标题前缀
    pub title_prefix: String,
}

fn default_skip_dirs() -> Vec<String> {
    [
        ".git",
        "__pycache__",
        "node_modules",
        "venv",
        ".DS_Store",
        "docs",
        "env",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_exclude_patterns() -> Vec<String> {
    [
        "*.pyc",
        "__pycache__",
        ".git",
        "node_modules",
        "venv",
        ".DS_Store",
        "docs",
        "*.log",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for DocGenConfig {
    fn default() -> Self {
        Self {
            skip_dirs: default_skip_dirs(),
            exclude_patterns: default_exclude_patterns(),
            max_file_size: 10 * 1024 * 1024,
            content_char_limit: 100_000,
            doc_suffix: "_doc.md".to_string(),
            title_prefix: "Project Documentation".to_string(),
        }
    }
}

/// 运行统计信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// 发现的子目录数
    pub discovered: usize,
    /// 已生成文档数
    pub documented: usize,
    /// 跳过数量
    pub skipped: usize,
    /// 失败数量
    pub failed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DocGenConfig::default();
        assert_eq!(config.max_file_size, 10_485_760);
        assert_eq!(config.content_char_limit, 100_000);
        for name in [".git", "__pycache__", "node_modules", "venv", "docs", "env"] {
            assert!(config.skip_dirs.iter().any(|d| d == name), "missing {}", name);
        }
        assert!(config.exclude_patterns.iter().any(|p| p == "*.log"));
    }

    #[test]
    fn test_file_count() {
        let mut root = FileNode::new_dir("alpha".into(), PathBuf::from("/p/alpha"), String::new());
        let mut src = FileNode::new_dir("src".into(), PathBuf::from("/p/alpha/src"), "src".into());
        src.children.push(FileNode::new_file(
            "lib.rs".into(),
            PathBuf::from("/p/alpha/src/lib.rs"),
            "src/lib.rs".into(),
            10,
        ));
        root.children.push(src);
        root.children.push(FileNode::new_file(
            "main.py".into(),
            PathBuf::from("/p/alpha/main.py"),
            "main.py".into(),
            5,
        ));

        assert_eq!(root.file_count(), 2);
        let names: Vec<_> = root.get_all_files().iter().map(|f| f.relative_path.as_str()).collect();
        assert_eq!(names, vec!["src/lib.rs", "main.py"]);
    }
}
