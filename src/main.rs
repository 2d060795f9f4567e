//! Project Documentation Generator
//!
//! 遍历根目录下的每个项目，调用文本生成后端生成讲解，
//! 再整理为 Markdown，每个项目写出一份文档。

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod llm;
mod services;

use config::{load_env_file, Cli};
use services::doc_generator::{DocGenConfig, PipelineDriver, RunStats};

/// 在 Windows 上设置控制台代码页为 UTF-8
#[cfg(windows)]
fn setup_console_encoding() {
    unsafe {
        // 设置控制台输出代码页为 UTF-8 (65001)
        extern "system" {
            fn SetConsoleOutputCP(code_page: u32) -> i32;
        }
        SetConsoleOutputCP(65001);
    }
}

#[cfg(not(windows))]
fn setup_console_encoding() {}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_console_encoding();

    // 初始化日志
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "project_docgen=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 先加载 .env，clap 的 env 回退才能读到其中的 LLM_URL
    if let Some(path) = load_env_file(None) {
        info!("Loaded environment from {}", path.display());
    }

    let cli = Cli::parse();
    let app_config = cli.app_config();
    let llm_client = app_config.build_client()?;

    info!(
        "Starting documentation run: root={}, output={}, backend={}, model={}",
        cli.root_dir.display(),
        cli.output.display(),
        llm_client.endpoint(),
        llm_client.model()
    );

    let driver = PipelineDriver::new(
        DocGenConfig::default(),
        llm_client,
        app_config.format_max_attempts,
    );

    let RunStats {
        discovered,
        documented,
        ..
    } = driver.run(&cli.root_dir, &cli.output).await?;

    info!("{} of {} projects documented", documented, discovered);
    Ok(())
}
