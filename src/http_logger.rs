//! Optional transcript of generation calls
//!
//! When `PROMPT_FORGE_HTTP_LOG` is `1`, `true`, `yes` or `on`, each call to the
//! generation service is appended to `<data dir>/http_requests.log`.
//! Credential headers are masked and long bodies are clipped.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use chrono::Local;
use tracing::warn;

use crate::utils::data_dir::ensure_data_dir;

const ENV_HTTP_LOG: &str = "PROMPT_FORGE_HTTP_LOG";

const LOG_FILE_NAME: &str = "http_requests.log";

/// Bodies longer than this many bytes are clipped
const MAX_BODY_BYTES: usize = 10_000;

const SENSITIVE_HEADERS: [&str; 6] = [
    "authorization",
    "proxy-authorization",
    "cookie",
    "set-cookie",
    "x-api-key",
    "x-goog-api-key",
];

static WRITE_LOCK: Mutex<()> = Mutex::new(());

/// Whether the transcript is switched on. Read once per process.
pub fn is_enabled() -> bool {
    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(|| match std::env::var(ENV_HTTP_LOG) {
        Ok(v) => matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        Err(_) => false,
    })
}

/// The outbound half of a call
pub struct RequestRecord {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl RequestRecord {
    /// Record of a generateContent POST with the headers it carries
    pub fn generation(url: &str, request_id: &str, api_key: &str, body: Option<String>) -> Self {
        Self {
            method: "POST".to_string(),
            url: url.to_string(),
            headers: vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                ("x-goog-api-key".to_string(), api_key.to_string()),
                ("x-request-id".to_string(), request_id.to_string()),
            ],
            body,
        }
    }
}

/// The inbound half of a call
pub struct ResponseRecord {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl ResponseRecord {
    /// Copy status and headers off a live response; the body is added later
    pub fn from_response(response: &reqwest::Response) -> Self {
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or("<binary>").to_string(),
                )
            })
            .collect();

        Self {
            status: response.status().as_u16(),
            headers,
            body: None,
        }
    }
}

/// How a call ended
pub enum Outcome<'a> {
    Response(&'a ResponseRecord),
    Failed(&'a str),
}

/// One log entry
pub struct Transcript<'a> {
    pub request: &'a RequestRecord,
    pub outcome: Outcome<'a>,
    pub elapsed_ms: u64,
}

impl fmt::Display for Transcript<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(80);
        writeln!(f)?;
        writeln!(f, "{}", rule)?;
        writeln!(
            f,
            "[{}] {} {}",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            self.request.method,
            self.request.url
        )?;
        writeln!(f, "{}", rule)?;

        write_headers(f, "Request Headers", &self.request.headers)?;
        if let Some(body) = &self.request.body {
            write_body(f, "Request Body", body)?;
        }

        match &self.outcome {
            Outcome::Response(response) => {
                writeln!(f, "\n--- Response ({}ms) ---", self.elapsed_ms)?;
                writeln!(f, "Status: {}", response.status)?;
                write_headers(f, "Response Headers", &response.headers)?;
                if let Some(body) = &response.body {
                    write_body(f, "Response Body", body)?;
                }
            }
            Outcome::Failed(reason) => {
                writeln!(f, "\n--- Error ({}ms) ---", self.elapsed_ms)?;
                writeln!(f, "{}", reason)?;
            }
        }

        writeln!(f, "\n{}", rule)
    }
}

fn write_headers(f: &mut fmt::Formatter<'_>, title: &str, headers: &[(String, String)]) -> fmt::Result {
    writeln!(f, "\n--- {} ---", title)?;
    for (name, value) in headers {
        if is_sensitive_header(name) {
            writeln!(f, "{}: {}", name, mask_token(value))?;
        } else {
            writeln!(f, "{}: {}", name, value)?;
        }
    }
    Ok(())
}

fn write_body(f: &mut fmt::Formatter<'_>, title: &str, body: &str) -> fmt::Result {
    // JSON bodies are pretty-printed before clipping
    let pretty = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| serde_json::to_string_pretty(&v).ok());
    let text = pretty.as_deref().unwrap_or(body);

    writeln!(f, "\n--- {} ---", title)?;
    writeln!(f, "{}", truncate_utf8_safe(text, MAX_BODY_BYTES))
}

/// Append a transcript entry when logging is enabled. Write failures are only warned about.
pub fn record(data_dir: &Path, transcript: &Transcript<'_>) {
    if !is_enabled() {
        return;
    }

    let path = ensure_data_dir(data_dir).join(LOG_FILE_NAME);
    let entry = transcript.to_string();

    let _guard = WRITE_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let written = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .and_then(|mut file| file.write_all(entry.as_bytes()));

    if let Err(e) = written {
        warn!("Failed to write HTTP log {:?}: {}", path, e);
    }
}

pub fn is_sensitive_header(name: &str) -> bool {
    SENSITIVE_HEADERS
        .iter()
        .any(|h| h.eq_ignore_ascii_case(name))
}

/// Keep four characters at each end of a credential longer than eight
/// characters; shorter ones are hidden entirely. A `Bearer ` prefix is kept.
pub fn mask_token(value: &str) -> String {
    let (scheme, secret) = value
        .strip_prefix("Bearer ")
        .map_or(("", value), |rest| ("Bearer ", rest));

    let count = secret.chars().count();
    if count <= 8 {
        return format!("{}****", scheme);
    }

    let head: String = secret.chars().take(4).collect();
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("{}{}...{}", scheme, head, tail)
}

/// Clip `s` to at most `max_len` bytes without splitting a character
pub fn truncate_utf8_safe(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }

    let cut = s
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= max_len)
        .last()
        .unwrap_or(0);

    format!("{}...\n[truncated, total {} bytes]", &s[..cut], s.len())
}
