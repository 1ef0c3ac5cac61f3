use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// 评估接口的请求和响应结构体
// ============================================================================

/// 评估成功时返回的数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub scor: f64,
    pub punctaj_maxim: f64,
    pub nr_cuvinte: f64,
    pub feedback: Vec<String>,
}

/// multipart 请求体的各个字段
#[derive(Debug, Clone)]
pub struct SubmissionPayload {
    pub file_name: String,
    pub file_bytes: Vec<u8>,
    pub nume: String,
    pub clasa: String,
    pub data_test: String,
}

/// 未经解析的 HTTP 响应
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 解析后的服务端答复
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationReply {
    Evaluated(EvaluationResult),
    /// 服务端拒绝，message 为 error 字段或整个响应体
    Rejected { status: u16, message: String },
}

impl EvaluationReply {
    /// 响应体不是 JSON，或成功响应缺少字段时返回 Err
    pub fn from_raw(raw: RawResponse) -> Result<Self> {
        let body: Value = serde_json::from_str(&raw.body)
            .with_context(|| format!("响应不是有效的 JSON (HTTP {})", raw.status))?;

        if raw.is_success() {
            let result: EvaluationResult =
                serde_json::from_value(body).context("评估结果格式不正确")?;
            return Ok(EvaluationReply::Evaluated(result));
        }

        let message = match body.get("error") {
            Some(Value::String(msg)) if !msg.is_empty() => msg.clone(),
            _ => serde_json::to_string(&body)?,
        };
        Ok(EvaluationReply::Rejected {
            status: raw.status,
            message,
        })
    }
}
