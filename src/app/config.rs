use anyhow::{Context, Result};
use reqwest::Url;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_evaluate_path")]
    pub evaluate_path: String,
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
    /// 评估成功后额外写出的 HTML 文件
    #[serde(default)]
    pub html_output: Option<PathBuf>,
    #[serde(default)]
    pub form: FormConfig,
}

/// 页面上预先填写的表单内容
#[derive(Debug, Deserialize, Clone, Default)]
pub struct FormConfig {
    #[serde(default)]
    pub nume: String,
    #[serde(default)]
    pub clasa: Option<String>,
    #[serde(default)]
    pub data_test: String,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl AppConfig {
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let path = config_path.unwrap_or_else(|| Path::new("config.toml"));
        if path.exists() {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("读取配置文件失败: {}", path.display()))?;
            return Self::from_toml(&raw)
                .with_context(|| format!("解析配置文件失败: {}", path.display()));
        }
        Ok(AppConfig::default())
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// 拼接评估接口的完整地址
    pub fn evaluate_url(&self) -> Result<Url> {
        let base = Url::parse(&self.base_url)
            .with_context(|| format!("base_url 无效: {}", self.base_url))?;
        base.join(&self.evaluate_path)
            .with_context(|| format!("evaluate_path 无效: {}", self.evaluate_path))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            evaluate_path: default_evaluate_path(),
            allowed_extensions: default_allowed_extensions(),
            html_output: None,
            form: FormConfig::default(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_evaluate_path() -> String {
    "/evaluate".to_string()
}

fn default_allowed_extensions() -> Vec<String> {
    vec![".docx".to_string()]
}
