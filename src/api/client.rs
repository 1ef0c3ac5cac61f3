use crate::api::models::{RawResponse, SubmissionPayload};
use crate::form::ValidatedForm;
use anyhow::{Context, Result, anyhow};
use reqwest::Url;
use reqwest::multipart::{Form, Part};
use std::future::Future;
use std::sync::OnceLock;
use tracing::{debug, info};

/// 评估请求的传输层，测试中可替换
pub trait EvaluationTransport {
    /// 发送一次请求，不重试
    fn send(
        &self,
        payload: SubmissionPayload,
    ) -> impl Future<Output = Result<RawResponse>> + Send;
}

static BUILT_IN_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

/// 基于 reqwest 的 HTTP 传输
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    url: Url,
}

impl HttpTransport {
    pub fn new(url: Url, client: Option<reqwest::Client>) -> Self {
        let client = client
            .unwrap_or_else(|| BUILT_IN_CLIENT.get_or_init(reqwest::Client::new).clone());
        Self { client, url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl EvaluationTransport for HttpTransport {
    async fn send(&self, payload: SubmissionPayload) -> Result<RawResponse> {
        let size = payload.file_bytes.len();
        let form = build_multipart(payload)?;

        info!("📤 正在提交到 {} ({} 字节)", self.url, size);
        let response = self
            .client
            .post(self.url.clone())
            .multipart(form)
            .send()
            .await
            .with_context(|| format!("请求 {} 失败", self.url))?;

        let status = response.status().as_u16();
        let body = response.text().await.context("读取响应内容失败")?;
        debug!("HTTP {} 响应: {}", status, body);
        Ok(RawResponse { status, body })
    }
}

/// 组装 multipart 表单：file, nume, clasa, data_test
pub fn build_multipart(payload: SubmissionPayload) -> Result<Form> {
    let file_part = Part::bytes(payload.file_bytes)
        .file_name(payload.file_name)
        .mime_str("application/octet-stream")?;
    Ok(Form::new()
        .part("file", file_part)
        .text("nume", payload.nume)
        .text("clasa", payload.clasa)
        .text("data_test", payload.data_test))
}

/// 读取选中的文件并生成请求体，文件名原样发送
pub async fn load_payload(form: &ValidatedForm) -> Result<SubmissionPayload> {
    let file_bytes = tokio::fs::read(&form.file)
        .await
        .with_context(|| format!("无法读取文件 {}", form.file.display()))?;
    let file_name = form
        .file
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .ok_or_else(|| anyhow!("文件名无效: {}", form.file.display()))?;

    Ok(SubmissionPayload {
        file_name,
        file_bytes,
        nume: form.nume.clone(),
        clasa: form.clasa.clone(),
        data_test: form.data_test.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn temp_file(name: &str, content: &[u8]) -> PathBuf {
        let dir = std::env::temp_dir().join(uuid::Uuid::new_v4().to_string());
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn payload(file_name: &str, file_bytes: &[u8]) -> SubmissionPayload {
        SubmissionPayload {
            file_name: file_name.to_string(),
            file_bytes: file_bytes.to_vec(),
            nume: "Ana Pop".to_string(),
            clasa: "7B".to_string(),
            data_test: "2024-05-20".to_string(),
        }
    }

    /// 请求头和请求体是否已读完
    fn request_complete(buf: &[u8]) -> bool {
        let text = String::from_utf8_lossy(buf);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let headers = text[..header_end].to_lowercase();
        let content_length = headers
            .lines()
            .find_map(|l| l.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok());
        match content_length {
            Some(len) => buf.len() >= header_end + 4 + len,
            None => text.ends_with("--\r\n") || text.ends_with("0\r\n\r\n"),
        }
    }

    /// 接收一个请求，返回固定的 JSON 响应，并交回原始请求内容
    async fn serve_once(
        listener: TcpListener,
        status_line: &'static str,
        body: &'static str,
    ) -> String {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if request_complete(&buf) {
                break;
            }
        }
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\
             Connection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        String::from_utf8_lossy(&buf).into_owned()
    }

    #[tokio::test]
    async fn test_load_payload_keeps_file_name_as_is() {
        let path = temp_file("lucrare finala (1).docx", b"PK\x03\x04");
        let form = ValidatedForm {
            nume: "Ana Pop".to_string(),
            clasa: "7B".to_string(),
            data_test: "2024-05-20".to_string(),
            file: path.clone(),
        };

        let payload = load_payload(&form).await.unwrap();
        assert_eq!(payload.file_bytes, b"PK\x03\x04".to_vec());
        assert_eq!(payload.file_name, "lucrare finala (1).docx");
        assert_eq!(payload.nume, "Ana Pop");
        assert_eq!(payload.clasa, "7B");
        assert_eq!(payload.data_test, "2024-05-20");

        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[tokio::test]
    async fn test_load_payload_missing_file_is_error() {
        let form = ValidatedForm {
            nume: "Ana".to_string(),
            clasa: "7B".to_string(),
            data_test: "2024-05-20".to_string(),
            file: PathBuf::from("/nonexistent/lucrare.docx"),
        };
        let err = load_payload(&form).await.unwrap_err();
        assert!(err.to_string().contains("lucrare.docx"));
    }

    #[tokio::test]
    async fn test_send_posts_multipart_fields_and_returns_rejection() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = tokio::spawn(serve_once(
            listener,
            "400 Bad Request",
            r#"{"error":"fișier invalid"}"#,
        ));

        let url = Url::parse(&format!("http://127.0.0.1:{}/evaluate", port)).unwrap();
        let transport = HttpTransport::new(url, Some(reqwest::Client::new()));
        let reply = transport
            .send(payload("compunere.docx", b"continut docx"))
            .await
            .unwrap();
        let request = server.await.unwrap();

        assert_eq!(
            reply,
            RawResponse {
                status: 400,
                body: r#"{"error":"fișier invalid"}"#.to_string(),
            }
        );
        assert!(request.starts_with("POST /evaluate HTTP/1.1\r\n"), "{}", request);
        assert!(request
            .to_lowercase()
            .contains("content-type: multipart/form-data; boundary="));
        assert!(request.contains(r#"name="file"; filename="compunere.docx""#));
        assert!(request.contains("continut docx"));
        assert!(request.contains("name=\"nume\"\r\n\r\nAna Pop\r\n"));
        assert!(request.contains("name=\"clasa\"\r\n\r\n7B\r\n"));
        assert!(request.contains("name=\"data_test\"\r\n\r\n2024-05-20\r\n"));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let url = Url::parse("http://127.0.0.1:9/evaluate").unwrap();
        let transport = HttpTransport::new(url, None);
        let result = transport.send(payload("lucrare.docx", &[0])).await;
        assert!(result.is_err());
    }
}
