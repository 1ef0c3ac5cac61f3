use crate::app::config::FormConfig;
use std::path::PathBuf;

// ============================================================================
// 页面状态
// ============================================================================

/// 表单四个必填项
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub nume: String,
    /// 下拉框未选择时为 None
    pub clasa: Option<String>,
    pub data_test: String,
    pub file: Option<PathBuf>,
}

impl From<FormConfig> for FormFields {
    fn from(cfg: FormConfig) -> Self {
        Self {
            nume: cfg.nume,
            clasa: cfg.clasa,
            data_test: cfg.data_test,
            file: cfg.file,
        }
    }
}

/// 文件选择框和提交按钮的禁用状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub file_disabled: bool,
    pub send_disabled: bool,
}

impl Controls {
    pub fn lock(&mut self) {
        self.file_disabled = true;
        self.send_disabled = true;
    }

    pub fn is_locked(&self) -> bool {
        self.file_disabled && self.send_disabled
    }
}

/// 结果区域的内容：纯文本对应 innerText，HTML 对应 innerHTML
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResultContent {
    #[default]
    Empty,
    Text(String),
    Html(String),
}

/// 整个提交页面
#[derive(Debug, Clone, Default)]
pub struct SubmissionPage {
    pub fields: FormFields,
    pub controls: Controls,
    pub result: ResultContent,
}

impl SubmissionPage {
    pub fn new(fields: FormFields) -> Self {
        Self {
            fields,
            ..Default::default()
        }
    }
}
