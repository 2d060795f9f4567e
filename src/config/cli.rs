//! 命令行参数

use clap::Parser;
use std::path::{Path, PathBuf};

use super::app_config::{AppConfig, DEFAULT_FORMAT_ATTEMPTS, DEFAULT_MODEL};

/// Automatic project documentation generator
#[derive(Debug, Parser)]
#[command(name = "project-docgen", version)]
#[command(about = "Generate one Markdown document per project subdirectory", long_about = None)]
pub struct Cli {
    /// Root folder containing the projects to document
    pub root_dir: PathBuf,

    /// Output folder for the documentation
    #[arg(short, long, default_value = "./docs")]
    pub output: PathBuf,

    /// Generation backend URL
    #[arg(long, env = "LLM_URL")]
    pub llm_url: String,

    /// Model identifier sent to the backend
    #[arg(long, env = "LLM_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Maximum attempts for the Markdown formatting pass
    #[arg(long, default_value_t = DEFAULT_FORMAT_ATTEMPTS, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attempts: u32,
}

impl Cli {
    pub fn app_config(&self) -> AppConfig {
        AppConfig::new(self.llm_url.clone())
            .with_model(self.model.clone())
            .with_format_attempts(self.max_attempts)
    }
}

/// 从 `.env` 文件加载环境变量，已存在的变量不会被覆盖
///
/// `path` 为空时从当前目录向上查找 `.env`。需在 `Cli::parse()` 之前调用，
/// 这样 `LLM_URL` 等参数才能从文件中取值。
pub fn load_env_file(path: Option<&Path>) -> Option<PathBuf> {
    let result = match path {
        Some(p) => dotenvy::from_path(p).map(|_| p.to_path_buf()),
        None => dotenvy::dotenv(),
    };
    result.ok()
}
