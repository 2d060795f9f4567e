//! 统一错误处理模块
//!
//! 定义应用级错误类型。只有启动阶段的错误会终止整个运行，
//! 单个项目的失败在流水线内部记录后跳过。

use std::path::PathBuf;
use thiserror::Error;

/// 应用错误枚举
#[derive(Error, Debug)]
pub enum AppError {
    /// 配置相关错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 根目录无效
    #[error("路径不是目录: {0}")]
    NotADirectory(PathBuf),

    /// 文件系统错误
    #[error("IO错误 ({0}): {1}")]
    Io(PathBuf, #[source] std::io::Error),
}

/// 便捷类型别名
pub type AppResult<T> = Result<T, AppError>;
