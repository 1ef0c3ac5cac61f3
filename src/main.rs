mod api;
mod app;
mod form;
mod logger;
mod render;
mod submission;
mod ui;
mod utils;

use anyhow::{Context, Result};
use api::HttpTransport;
use app::AppConfig;
use form::{FormFields, ResultContent, SubmissionPage, ValidationRules};
use std::path::PathBuf;
use std::process::ExitCode;
use submission::{SubmissionHandler, SubmitOutcome};
use tracing::{error, info};
use ui::TerminalUi;

// ============================================================================
// 主函数
// ============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    logger::init();

    match run().await {
        Ok(SubmitOutcome::Evaluated) => ExitCode::SUCCESS,
        Ok(outcome) => {
            info!("提交未完成: {:?}", outcome);
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("❌ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<SubmitOutcome> {
    // 第一个参数为配置文件路径，缺省为 config.toml
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref())?;

    let transport = HttpTransport::new(config.evaluate_url()?, None);
    info!("🔌 评估接口: {}", transport.url());

    let rules = ValidationRules {
        allowed_extensions: config.allowed_extensions.clone(),
    };
    let handler = SubmissionHandler::new(TerminalUi, transport, rules);

    let mut page = SubmissionPage::new(FormFields::from(config.form.clone()));
    let outcome = handler.on_click(&mut page).await;

    if outcome == SubmitOutcome::Evaluated {
        info!("🔒 文件和提交按钮已禁用: {}", page.controls.is_locked());
        if let (Some(path), ResultContent::Html(html)) = (&config.html_output, &page.result) {
            tokio::fs::write(path, html)
                .await
                .with_context(|| format!("写入结果文件失败: {}", path.display()))?;
            info!("📄 结果已保存到 {}", path.display());
        }
    }

    Ok(outcome)
}
