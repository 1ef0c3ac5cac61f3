use crate::form::model::FormFields;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 校验失败，Display 即弹窗文字
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Completează numele!")]
    MissingName,
    #[error("Alege clasa!")]
    MissingClass,
    #[error("Completează data testului!")]
    MissingDate,
    #[error("Data testului trebuie să fie în formatul AAAA-LL-ZZ!")]
    InvalidDate,
    #[error("Selectează un fișier .docx")]
    MissingFile,
    #[error("Selectează un fișier .docx")]
    UnsupportedFile,
}

/// 校验规则
#[derive(Debug, Clone)]
pub struct ValidationRules {
    /// 允许的扩展名，带点，如 ".docx"
    pub allowed_extensions: Vec<String>,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            allowed_extensions: vec![".docx".to_string()],
        }
    }
}

/// 通过校验的表单
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedForm {
    pub nume: String,
    pub clasa: String,
    pub data_test: String,
    pub file: PathBuf,
}

/// 按顺序校验，遇到第一个失败项即返回
///
/// 只有姓名会去除首尾空白，班级和日期原样提交
pub fn validate(
    fields: &FormFields,
    rules: &ValidationRules,
) -> Result<ValidatedForm, ValidationError> {
    let nume = fields.nume.trim();
    if nume.is_empty() {
        return Err(ValidationError::MissingName);
    }

    let clasa = match fields.clasa.as_deref() {
        Some(c) if !c.is_empty() => c,
        _ => return Err(ValidationError::MissingClass),
    };

    let data_test = fields.data_test.as_str();
    if data_test.is_empty() {
        return Err(ValidationError::MissingDate);
    }
    if NaiveDate::parse_from_str(data_test, "%Y-%m-%d").is_err() {
        return Err(ValidationError::InvalidDate);
    }

    let file = match &fields.file {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => return Err(ValidationError::MissingFile),
    };
    if !has_allowed_extension(file, &rules.allowed_extensions) {
        return Err(ValidationError::UnsupportedFile);
    }

    Ok(ValidatedForm {
        nume: nume.to_string(),
        clasa: clasa.to_string(),
        data_test: data_test.to_string(),
        file: file.clone(),
    })
}

fn has_allowed_extension(path: &Path, allowed: &[String]) -> bool {
    // 空列表表示不限制
    if allowed.is_empty() {
        return true;
    }
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    let ext = ext.to_lowercase();
    allowed
        .iter()
        .any(|a| a.trim_start_matches('.').to_lowercase() == ext)
}
