//! Minimal HTTP/1.1 server for the site API.
//!
//! One thread per connection, one request per connection
//! (`Connection: close`). Only what the routes need is parsed: the request
//! line, headers, and a `Content-Length` body.
//!
//! At most `max_connections` handler threads run at once. Connections
//! accepted beyond that are answered with `503` on the accept thread and
//! closed.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use folio_web::contact::EmailTransport;

use crate::bookmarks::BookmarkProxy;
use crate::config::{DEFAULT_BIND_ADDR, SiteConfig};
use crate::contact::{ContactRequest, EmailJsTransport, relay};
use crate::content::SiteContent;
use crate::error::{Result, SiteError};

const JSON: &str = "application/json";

/// Listener settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// Per-connection read timeout.
    pub read_timeout: Duration,
    pub max_header_bytes: usize,
    pub max_body_bytes: usize,
    /// Concurrent connections served before new ones get `503`.
    pub max_connections: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            read_timeout: Duration::from_secs(5),
            max_header_bytes: 16 * 1024,
            max_body_bytes: 64 * 1024,
            max_connections: 64,
        }
    }
}

/// Shared state behind every route.
pub struct SiteState {
    bookmarks: BookmarkProxy,
    transport: Box<dyn EmailTransport + Send + Sync>,
    content_body: String,
    started: Instant,
}

impl std::fmt::Debug for SiteState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteState")
            .field("bookmarks", &self.bookmarks)
            .field("content_bytes", &self.content_body.len())
            .finish_non_exhaustive()
    }
}

impl SiteState {
    pub fn new(
        bookmarks: BookmarkProxy,
        transport: Box<dyn EmailTransport + Send + Sync>,
        content: &SiteContent,
    ) -> Result<Self> {
        Ok(Self {
            bookmarks,
            transport,
            content_body: serde_json::to_string(content)?,
            started: Instant::now(),
        })
    }

    /// Production state: upstream proxy, EmailJS relay, static content.
    pub fn from_config(config: &SiteConfig) -> Result<Self> {
        Self::new(
            BookmarkProxy::new(config.bookmarks.clone())?,
            Box::new(EmailJsTransport::new(config.emailjs.clone())?),
            &SiteContent::new(&config.socials),
        )
    }
}

/// A parsed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: String,
    /// Path without the query string.
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Request {
    /// Case-insensitive header lookup.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A response ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub content_type: &'static str,
    pub cache_control: Option<String>,
    pub allow: Option<&'static str>,
    pub body: String,
}

impl Response {
    #[must_use]
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: JSON,
            cache_control: None,
            allow: None,
            body: body.into(),
        }
    }

    fn not_found() -> Self {
        Self::json(404, r#"{"error":"not found"}"#)
    }

    fn method_not_allowed(allow: &'static str) -> Self {
        Self {
            allow: Some(allow),
            ..Self::json(405, r#"{"error":"method not allowed"}"#)
        }
    }

    fn bad_request(message: &str) -> Self {
        Self::json(
            400,
            serde_json::json!({ "status": "invalid", "error": message }).to_string(),
        )
    }

    /// Serialise status line, headers, and body.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut head = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\n",
            self.status,
            reason_phrase(self.status),
            self.content_type,
            self.body.len()
        );
        if let Some(cache_control) = &self.cache_control {
            head.push_str(&format!("Cache-Control: {cache_control}\r\n"));
        }
        if let Some(allow) = self.allow {
            head.push_str(&format!("Allow: {allow}\r\n"));
        }
        head.push_str("Connection: close\r\n\r\n");
        writer.write_all(head.as_bytes())?;
        writer.write_all(self.body.as_bytes())?;
        writer.flush()
    }
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        413 => "Payload Too Large",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "",
    }
}

/// Dispatch one request.
pub fn route(state: &SiteState, request: &Request) -> Response {
    let method = request.method.as_str();
    match request.path.as_str() {
        "/api/meechum-thoughts" => match method {
            "GET" => {
                let proxied = state.bookmarks.fetch();
                Response {
                    cache_control: proxied.cache_control,
                    ..Response::json(proxied.status, proxied.body)
                }
            }
            _ => Response::method_not_allowed("GET"),
        },
        "/api/content" => match method {
            "GET" => Response::json(200, state.content_body.clone()),
            _ => Response::method_not_allowed("GET"),
        },
        "/api/contact" => match method {
            "POST" => contact(state, request),
            _ => Response::method_not_allowed("POST"),
        },
        "/healthz" => match method {
            "GET" => Response::json(200, r#"{"status":"ok"}"#),
            _ => Response::method_not_allowed("GET"),
        },
        _ => Response::not_found(),
    }
}

fn contact(state: &SiteState, request: &Request) -> Response {
    let parsed = match serde_json::from_slice::<ContactRequest>(&request.body) {
        Ok(parsed) => parsed,
        Err(error) => {
            tracing::info!(%error, "malformed contact body");
            return Response::bad_request("body must be a JSON object");
        }
    };
    let reply = relay(state.transport.as_ref(), parsed, state.started.elapsed());
    match serde_json::to_string(&reply) {
        Ok(body) => Response::json(reply.http_status, body),
        Err(error) => {
            tracing::error!(%error, "failed to encode contact reply");
            Response::json(500, r#"{"status":"error"}"#)
        }
    }
}

fn find_header_end(bytes: &[u8]) -> Option<usize> {
    bytes.windows(4).position(|window| window == b"\r\n\r\n")
}

fn bad_request(message: impl Into<String>) -> SiteError {
    SiteError::BadRequest {
        message: message.into(),
    }
}

/// Read and parse one request from `reader`.
pub fn read_request<R: Read>(reader: &mut R, config: &ServerConfig) -> Result<Request> {
    let mut bytes = Vec::new();
    let mut buf = [0_u8; 4096];

    let header_end = loop {
        if let Some(pos) = find_header_end(&bytes) {
            break pos;
        }
        if bytes.len() > config.max_header_bytes {
            return Err(bad_request("request headers too large"));
        }
        let read = reader.read(&mut buf)?;
        if read == 0 {
            return Err(bad_request("connection closed before headers ended"));
        }
        bytes.extend_from_slice(&buf[..read]);
    };

    let head = std::str::from_utf8(&bytes[..header_end])
        .map_err(|_| bad_request("request head is not UTF-8"))?;
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default();
    let mut parts = request_line.split_whitespace();
    let (Some(method), Some(target), Some(version)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(bad_request(format!("malformed request line: {request_line:?}")));
    };
    if !version.starts_with("HTTP/1.") {
        return Err(bad_request(format!("unsupported protocol: {version}")));
    }

    let mut headers = Vec::new();
    for line in lines.filter(|line| !line.is_empty()) {
        let Some((name, value)) = line.split_once(':') else {
            return Err(bad_request(format!("malformed header: {line:?}")));
        };
        headers.push((name.trim().to_string(), value.trim().to_string()));
    }

    let content_length = match headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
    {
        Some((_, value)) => value
            .parse::<usize>()
            .map_err(|_| bad_request(format!("invalid Content-Length: {value}")))?,
        None => 0,
    };
    if content_length > config.max_body_bytes {
        return Err(SiteError::PayloadTooLarge {
            limit: config.max_body_bytes,
        });
    }

    let method = method.to_ascii_uppercase();
    let path = target.split(['?', '#']).next().unwrap_or("/").to_string();
    let mut body = bytes.split_off(header_end + 4);
    while body.len() < content_length {
        let read = reader.read(&mut buf)?;
        if read == 0 {
            return Err(bad_request("connection closed before body ended"));
        }
        body.extend_from_slice(&buf[..read]);
    }
    body.truncate(content_length);

    Ok(Request {
        method,
        path,
        headers,
        body,
    })
}

/// Serve one connection: read, route, write, close.
pub fn handle_connection(
    mut stream: TcpStream,
    state: &SiteState,
    config: &ServerConfig,
) -> Result<()> {
    stream.set_read_timeout(Some(config.read_timeout))?;
    let response = match read_request(&mut stream, config) {
        Ok(request) => {
            let response = route(state, &request);
            tracing::info!(
                method = %request.method,
                path = %request.path,
                status = response.status,
                "request"
            );
            response
        }
        Err(SiteError::PayloadTooLarge { limit }) => {
            tracing::warn!(limit, "request body too large");
            Response::json(413, r#"{"error":"payload too large"}"#)
        }
        Err(SiteError::BadRequest { message }) => {
            tracing::warn!(%message, "bad request");
            Response::bad_request(&message)
        }
        Err(error) => return Err(error),
    };
    response.write_to(&mut stream)?;
    Ok(())
}

/// Counts live connection handlers against a fixed cap.
#[derive(Debug)]
pub struct ConnectionLimit {
    active: AtomicUsize,
    max: usize,
}

impl ConnectionLimit {
    #[must_use]
    pub fn new(max: usize) -> Self {
        Self {
            active: AtomicUsize::new(0),
            max,
        }
    }

    #[must_use]
    pub fn active(&self) -> usize {
        self.active.load(Ordering::Acquire)
    }

    /// Reserve a slot, or `None` when every slot is taken.
    pub fn try_acquire(self: &Arc<Self>) -> Option<ConnectionSlot> {
        self.active
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |active| {
                (active < self.max).then_some(active + 1)
            })
            .ok()
            .map(|_| ConnectionSlot {
                limit: Arc::clone(self),
            })
    }
}

/// One reserved connection slot, released on drop.
#[derive(Debug)]
pub struct ConnectionSlot {
    limit: Arc<ConnectionLimit>,
}

impl Drop for ConnectionSlot {
    fn drop(&mut self) {
        self.limit.active.fetch_sub(1, Ordering::AcqRel);
    }
}

fn reject_busy(mut stream: TcpStream) -> std::io::Result<()> {
    Response::json(503, r#"{"error":"server busy"}"#).write_to(&mut stream)
}

/// Bound listener plus the state it serves.
#[derive(Debug)]
pub struct Server {
    listener: TcpListener,
    config: ServerConfig,
    state: Arc<SiteState>,
    limit: Arc<ConnectionLimit>,
}

impl Server {
    pub fn bind(config: ServerConfig, state: SiteState) -> Result<Self> {
        let listener = TcpListener::bind(&config.bind_addr)?;
        let limit = Arc::new(ConnectionLimit::new(config.max_connections));
        Ok(Self {
            listener,
            config,
            state: Arc::new(state),
            limit,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections until the listener fails.
    pub fn run(self) -> Result<()> {
        let config = Arc::new(self.config);
        tracing::info!(addr = %self.listener.local_addr()?, "listening");

        loop {
            let (stream, peer) = match self.listener.accept() {
                Ok(accepted) => accepted,
                Err(error) if error.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(error) => return Err(error.into()),
            };
            let Some(slot) = self.limit.try_acquire() else {
                tracing::warn!(%peer, limit = self.limit.max, "connection limit reached");
                if let Err(error) = reject_busy(stream) {
                    tracing::debug!(%peer, %error, "failed to send busy response");
                }
                continue;
            };
            let state = Arc::clone(&self.state);
            let config = Arc::clone(&config);
            thread::spawn(move || {
                let _slot = slot;
                if let Err(error) = handle_connection(stream, &state, &config) {
                    tracing::debug!(%peer, %error, "connection ended with error");
                }
            });
        }
    }
}
