//! Local HTTP endpoint receiving the API key from the browser

use std::collections::HashMap;
use std::time::Duration;

use log::debug;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use crate::config::auth;
use crate::error::{CliError, Result};

const SUCCESS_PAGE: &str = "<html><body><p>Login succeeded. You may now close this page \
     and return to the terminal.</p></body></html>";

const MAX_REQUEST_BYTES: usize = 64 * 1024;

/// What the confirm page posts back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackToken {
    pub api_key: String,
    pub state: String,
}

/// One-shot server on a random loopback port
pub struct CallbackServer {
    listener: TcpListener,
}

impl CallbackServer {
    pub async fn bind() -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        Ok(Self { listener })
    }

    pub fn port(&self) -> Result<u16> {
        Ok(self.listener.local_addr()?.port())
    }

    pub fn callback_url(&self) -> Result<String> {
        Ok(format!("http://localhost:{}{}", self.port()?, auth::CALLBACK_PATH))
    }

    /// Serve until a form is posted to the callback path, or `timeout`
    /// passes. Other requests get a 404 and are otherwise ignored.
    pub async fn wait_for_token(&self, timeout: Duration) -> Result<CallbackToken> {
        tokio::time::timeout(timeout, self.accept_callback())
            .await
            .map_err(|_| CliError::Auth("timed out waiting for the browser".to_string()))?
    }

    async fn accept_callback(&self) -> Result<CallbackToken> {
        loop {
            let (mut stream, peer) = self.listener.accept().await?;
            debug!("Callback connection from {}", peer);

            let request = match read_request(&mut stream).await {
                Ok(request) => request,
                Err(e) => {
                    debug!("Ignoring unreadable request: {}", e);
                    continue;
                }
            };

            if request.method == "POST" && request.path == auth::CALLBACK_PATH {
                let form = parse_form(&request.body);
                respond(&mut stream, "200 OK", SUCCESS_PAGE).await;
                return Ok(CallbackToken {
                    api_key: form.get("api_key").cloned().unwrap_or_default(),
                    state: form.get("state").cloned().unwrap_or_default(),
                });
            }

            debug!("Unexpected request {} {}", request.method, request.path);
            respond(&mut stream, "404 Not Found", "").await;
        }
    }
}

#[derive(Debug)]
struct Request {
    method: String,
    path: String,
    body: String,
}

async fn read_request(stream: &mut TcpStream) -> Result<Request> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Err(CliError::Auth("connection closed mid-request".to_string()));
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find_header_end(&buf) {
            break pos;
        }
        if buf.len() > MAX_REQUEST_BYTES {
            return Err(CliError::Auth("request headers too large".to_string()));
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let (method, path, content_length) = parse_head(&head)?;

    let body_start = header_end + 4;
    let wanted = body_start + content_length.min(MAX_REQUEST_BYTES);
    while buf.len() < wanted {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let body_end = wanted.min(buf.len());
    let body = String::from_utf8_lossy(&buf[body_start.min(body_end)..body_end]).to_string();
    Ok(Request { method, path, body })
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

/// Method, path without query, and Content-Length from a request head
fn parse_head(head: &str) -> Result<(String, String, usize)> {
    let mut lines = head.lines();
    let request_line = lines
        .next()
        .ok_or_else(|| CliError::Auth("empty request".to_string()))?;

    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default();
    let path = target.split('?').next().unwrap_or_default().to_string();

    let content_length = lines
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse().ok())
        .unwrap_or(0);

    Ok((method, path, content_length))
}

/// Decode an `application/x-www-form-urlencoded` body
fn parse_form(body: &str) -> HashMap<String, String> {
    body.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .unwrap_or(spaced)
}

async fn respond(stream: &mut TcpStream, status: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    if let Err(e) = stream.write_all(response.as_bytes()).await {
        debug!("Failed to answer callback request: {}", e);
    }
    let _ = stream.shutdown().await;
}
