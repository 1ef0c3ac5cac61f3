use crate::api::EvaluationResult;
use crate::utils::text::{escape_html, format_js_number};
use anyhow::{Result, anyhow};
use scraper::{Html, Selector};

/// 请求进行中的占位文字
pub const PROCESSING_TEXT: &str = "Se evaluează...";

/// 渲染评估结果
pub fn render_success(result: &EvaluationResult) -> String {
    let mut html = format!(
        "<h3>Scor: {} / {}</h3>",
        format_js_number(result.scor),
        format_js_number(result.punctaj_maxim)
    );
    html.push_str(&format!(
        "<p>Număr cuvinte: {}</p>",
        format_js_number(result.nr_cuvinte)
    ));
    html.push_str("<h4>Feedback</h4><ul>");
    for item in &result.feedback {
        html.push_str(&format!("<li>{}</li>", escape_html(item)));
    }
    html.push_str("</ul>");
    html
}

pub fn render_transport_error(err: &anyhow::Error) -> String {
    format!("Eroare: {:#}", err)
}

/// 把结果 HTML 转成终端可读的纯文本
pub fn html_to_outline(html: &str) -> Result<String> {
    let fragment = Html::parse_fragment(html);
    let selector =
        Selector::parse("h3, h4, p, li").map_err(|e| anyhow!("选择器解析失败: {}", e))?;

    let lines: Vec<String> = fragment
        .select(&selector)
        .map(|el| {
            let text = el.text().collect::<String>().trim().to_string();
            if el.value().name() == "li" {
                format!("  - {}", text)
            } else {
                text
            }
        })
        .collect();
    Ok(lines.join("\n"))
}
