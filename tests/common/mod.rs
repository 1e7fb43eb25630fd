//! Loopback HTTP/1.1 stub for integration tests.
//!
//! Each connection serves exactly one request and closes. The handler maps a
//! recorded request to `(status, body)`.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub const ACCOUNT: &str = "0x71c7656ec7ab88b098defb751b7401b5f6d8976f";
pub const OTHER: &str = "0x00000000000000000000000000000000000000bb";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub body: String,
}

impl Recorded {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap_or(serde_json::Value::Null)
    }

    /// The first JSON-RPC param carries `fromAddress` (sent query).
    pub fn is_sent_query(&self) -> bool {
        self.json()["params"][0].get("fromAddress").is_some()
    }
}

type Handler = Arc<dyn Fn(&Recorded) -> (u16, String) + Send + Sync>;

pub struct StubServer {
    pub url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
    task: tokio::task::JoinHandle<()>,
}

impl StubServer {
    pub async fn start(
        handler: impl Fn(&Recorded) -> (u16, String) + Send + Sync + 'static,
    ) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let handler: Handler = Arc::new(handler);

        let recorded = requests.clone();
        let task = tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                let handler = handler.clone();
                let recorded = recorded.clone();
                tokio::spawn(serve(socket, handler, recorded));
            }
        });

        Self {
            url,
            requests,
            task,
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    /// Base URL for `indexer_endpoint`; requests land on `/v2/<key>`.
    pub fn indexer_base(&self) -> String {
        format!("{}/v2/", self.url)
    }

    pub fn price_endpoint(&self) -> String {
        format!("{}/simple/price", self.url)
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn serve(mut socket: TcpStream, handler: Handler, recorded: Arc<Mutex<Vec<Recorded>>>) {
    let Some(request) = read_request(&mut socket).await else {
        return;
    };
    let (status, body) = handler(&request);
    recorded.lock().unwrap().push(request);

    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason(status),
        body.len(),
        body
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

async fn read_request(socket: &mut TcpStream) -> Option<Recorded> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let head_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let body_start = head_end + 4;
    while buf.len() < body_start + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let mut request_line = head.lines().next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();
    let end = buf.len().min(body_start + content_length);
    let body = String::from_utf8_lossy(&buf[body_start..end]).to_string();

    Some(Recorded { method, path, body })
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Status",
    }
}

// ─── Fixtures ────────────────────────────────────────────────────────────────

pub fn rpc_result(transfers: Vec<serde_json::Value>) -> String {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": 1,
        "result": { "transfers": transfers }
    })
    .to_string()
}

pub fn rpc_error(code: i64, message: &str) -> String {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": 1,
        "error": { "code": code, "message": message }
    })
    .to_string()
}

pub fn transfer(hash: &str, block: &str, from: &str, to: &str, value: f64, asset: &str) -> serde_json::Value {
    serde_json::json!({
        "blockNum": block,
        "uniqueId": format!("{}:log:0", hash),
        "hash": hash,
        "from": from,
        "to": to,
        "value": value,
        "erc721TokenId": null,
        "erc1155Metadata": null,
        "tokenId": null,
        "asset": asset,
        "category": "external",
        "rawContract": { "value": null, "address": null, "decimal": "0x12" },
        "metadata": { "blockTimestamp": "2024-01-15T10:30:00.000Z" }
    })
}

pub fn prices_body() -> String {
    serde_json::json!({
        "ethereum": { "usd": 2000.0 },
        "matic-network": { "usd": 0.5 },
        "arbitrum": { "usd": 1.25 }
    })
    .to_string()
}
