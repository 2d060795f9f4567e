//! 配置模块

mod app_config;
mod cli;

pub use cli::{load_env_file, Cli};
