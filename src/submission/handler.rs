use crate::api::{EvaluationReply, EvaluationTransport, load_payload};
use crate::form::{
    ResultContent, SubmissionPage, ValidatedForm, ValidationError, ValidationRules, validate,
};
use crate::render::{PROCESSING_TEXT, render_success, render_transport_error};
use crate::ui::Ui;
use anyhow::Result;
use tracing::{info, warn};
use uuid::Uuid;

pub const CONFIRM_TEXT: &str =
    "Ești sigur că acesta este fișierul final pe care vrei să îl trimiți?";

/// 一次点击的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 提交按钮已禁用
    Ignored,
    Blocked(ValidationError),
    Declined,
    Evaluated,
    Rejected,
    Failed,
}

/// 提交按钮的点击处理器
pub struct SubmissionHandler<U, T> {
    ui: U,
    transport: T,
    rules: ValidationRules,
}

impl<U: Ui, T: EvaluationTransport> SubmissionHandler<U, T> {
    pub fn new(ui: U, transport: T, rules: ValidationRules) -> Self {
        Self { ui, transport, rules }
    }

    #[cfg(test)]
    pub fn ui(&self) -> &U {
        &self.ui
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// 处理一次点击：校验 → 确认 → 提交 → 渲染
    pub async fn on_click(&self, page: &mut SubmissionPage) -> SubmitOutcome {
        if page.controls.send_disabled {
            return SubmitOutcome::Ignored;
        }

        let form = match validate(&page.fields, &self.rules) {
            Ok(form) => form,
            Err(e) => {
                warn!("表单校验未通过: {:?}", e);
                self.ui.alert(&e.to_string());
                return SubmitOutcome::Blocked(e);
            }
        };

        if !self.ui.confirm(CONFIRM_TEXT) {
            info!("用户取消提交");
            return SubmitOutcome::Declined;
        }

        let submission_id = Uuid::new_v4();
        info!(%submission_id, "🚀 提交 {} ({}, {})", form.nume, form.clasa, form.data_test);

        self.show(page, ResultContent::Text(PROCESSING_TEXT.to_string()));

        match self.submit(&form).await {
            Ok(EvaluationReply::Evaluated(result)) => {
                info!(
                    %submission_id,
                    "✅ 评估完成: {} / {}", result.scor, result.punctaj_maxim
                );
                self.show(page, ResultContent::Html(render_success(&result)));
                page.controls.lock();
                SubmitOutcome::Evaluated
            }
            Ok(EvaluationReply::Rejected { status, message }) => {
                warn!(%submission_id, "❌ 服务端拒绝 (HTTP {}): {}", status, message);
                self.show(page, ResultContent::Text(message));
                SubmitOutcome::Rejected
            }
            Err(e) => {
                warn!(%submission_id, "❌ 请求失败: {:#}", e);
                self.show(page, ResultContent::Text(render_transport_error(&e)));
                SubmitOutcome::Failed
            }
        }
    }

    async fn submit(&self, form: &ValidatedForm) -> Result<EvaluationReply> {
        let payload = load_payload(form).await?;
        let raw = self.transport.send(payload).await?;
        EvaluationReply::from_raw(raw)
    }

    fn show(&self, page: &mut SubmissionPage, content: ResultContent) {
        page.result = content;
        self.ui.render(&page.result);
    }
}
