//! Logging setup shared by the calculator services
//!
//! Console output always uses the bracketed format
//! (`2026-01-05T09:12:44.809123Z [INFO] message`). A daily rolling file can be
//! added, plain or JSON. HTTP access lines go to the `api_access` target.

use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

use anyhow::{anyhow, Result};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, format::Writer, FmtContext, FormatEvent, FormatFields},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Target used by [`http_request_logger`]
pub const API_ACCESS_TARGET: &str = "api_access";

/// Largest request body [`http_request_logger`] buffers for debug output
///
/// Matches axum's default `DefaultBodyLimit`.
pub const MAX_BUFFERED_BODY: usize = 2 * 1024 * 1024;

fn format_level(level: &Level) -> &'static str {
    match *level {
        Level::TRACE => "[TRACE]",
        Level::DEBUG => "[DEBUG]",
        Level::INFO => "[INFO]",
        Level::WARN => "[WARN]",
        Level::ERROR => "[ERROR]",
    }
}

/// Event formatter producing `timestamp [LEVEL] message fields`
struct BracketedLevelFormat;

impl<S, N> FormatEvent<S, N> for BracketedLevelFormat
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let now = chrono::Utc::now();
        write!(writer, "{} ", now.format("%Y-%m-%dT%H:%M:%S%.6fZ"))?;

        let level = *event.metadata().level();
        if writer.has_ansi_escapes() {
            let color = match level {
                Level::TRACE => "\x1b[35m",
                Level::DEBUG => "\x1b[34m",
                Level::INFO => "\x1b[32m",
                Level::WARN => "\x1b[33m",
                Level::ERROR => "\x1b[31m",
            };
            write!(writer, "{}{}\x1b[0m ", color, format_level(&level))?;
        } else {
            write!(writer, "{} ", format_level(&level))?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

// Keeps the non-blocking file writer flushing for the life of the process
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Service name, used as the file prefix and the default crate filter
    pub service_name: String,
    /// Default level when `RUST_LOG` is unset
    pub level: String,
    pub log_dir: PathBuf,
    /// Write `{log_dir}/{service_name}.log.YYYY-MM-DD` in addition to the console
    pub enable_file: bool,
    /// JSON lines for the file layer
    pub enable_json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            service_name: "unknown".to_string(),
            level: "info".to_string(),
            log_dir: PathBuf::from("logs"),
            enable_file: false,
            enable_json: false,
        }
    }
}

/// Build the filter: `RUST_LOG` wins, `api_access` is appended when absent
fn build_filter(config: &LogConfig) -> Result<EnvFilter> {
    let spec = match std::env::var("RUST_LOG") {
        Ok(env_str) if env_str.contains(API_ACCESS_TARGET) => env_str,
        Ok(env_str) => format!("{},{}=info", env_str, API_ACCESS_TARGET),
        Err(_) => format!(
            "{level},{service}={level},{target}=info",
            level = config.level,
            service = config.service_name,
            target = API_ACCESS_TARGET
        ),
    };
    EnvFilter::try_new(&spec).map_err(|e| anyhow!("Invalid log filter '{}': {}", spec, e))
}

/// Install the global subscriber
pub fn init_with_config(config: LogConfig) -> Result<()> {
    let env_filter = build_filter(&config)?;

    let console_layer = fmt::layer()
        .with_ansi(true)
        .event_format(BracketedLevelFormat)
        .boxed();

    let file_layer = if config.enable_file {
        fs::create_dir_all(&config.log_dir)?;
        let appender = tracing_appender::rolling::daily(
            &config.log_dir,
            format!("{}.log", config.service_name),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let _ = FILE_GUARD.set(guard);

        let layer = if config.enable_json {
            fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_level(true)
                .with_target(true)
                .boxed()
        } else {
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .event_format(BracketedLevelFormat)
                .boxed()
        };
        Some(layer)
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))?;

    tracing::info!(
        "Logging: {} (file: {})",
        config.service_name,
        if config.enable_file {
            config.log_dir.display().to_string()
        } else {
            "off".to_string()
        }
    );

    Ok(())
}

/// Cut `body` to `max_length` bytes on a char boundary
#[cfg_attr(not(feature = "axum"), allow(dead_code))]
fn truncate_body(body: &str, max_length: usize) -> String {
    if body.len() <= max_length {
        return body.to_string();
    }
    let mut end = max_length;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}[truncated {} bytes]", &body[..end], body.len() - end)
}

/// HTTP access logger middleware
///
/// POST and DELETE requests are logged at INFO on the `api_access` target;
/// everything else at DEBUG. With DEBUG enabled the JSON request body is
/// included, truncated to 500 bytes.
///
/// Add it before `.with_state()`:
/// ```rust,ignore
/// Router::new()
///     .route(...)
///     .layer(axum::middleware::from_fn(common::logging::http_request_logger))
///     .with_state(state)
/// ```
#[cfg(feature = "axum")]
pub async fn http_request_logger(
    req: axum::extract::Request,
    next: axum::middleware::Next,
) -> axum::response::Response {
    use axum::body::Body;
    use axum::response::IntoResponse;
    use std::time::Instant;
    use tracing::{debug, info, level_enabled};

    const MAX_BODY_LENGTH: usize = 500;

    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let is_write = matches!(method.as_str(), "POST" | "PUT" | "PATCH" | "DELETE");
    let is_json = req
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"));
    let start = Instant::now();

    let (req, body_str) = if is_write && is_json && level_enabled!(Level::DEBUG) {
        let (parts, body) = req.into_parts();
        match axum::body::to_bytes(body, MAX_BUFFERED_BODY).await {
            Ok(bytes) => {
                let body_str = match std::str::from_utf8(&bytes) {
                    Ok(s) => truncate_body(s, MAX_BODY_LENGTH),
                    Err(_) => "<binary data>".to_string(),
                };
                (
                    axum::extract::Request::from_parts(parts, Body::from(bytes)),
                    Some(body_str),
                )
            },
            Err(e) => {
                tracing::warn!(
                    target: "api_access",
                    method = %method,
                    path = %path,
                    "Failed to read request body: {}",
                    e
                );
                return axum::http::StatusCode::PAYLOAD_TOO_LARGE.into_response();
            },
        }
    } else {
        (req, None)
    };

    let response = next.run(req).await;
    let status = response.status().as_u16();
    let duration_ms = start.elapsed().as_millis();

    match (is_write, body_str) {
        (_, Some(body)) => debug!(
            target: "api_access",
            method = %method,
            path = %path,
            status,
            duration_ms = %duration_ms,
            request_body = %body,
            "HTTP request"
        ),
        (true, None) => info!(
            target: "api_access",
            method = %method,
            path = %path,
            status,
            duration_ms = %duration_ms,
            "HTTP request"
        ),
        (false, None) => debug!(
            target: "api_access",
            method = %method,
            path = %path,
            status,
            duration_ms = %duration_ms,
            "HTTP request"
        ),
    }

    response
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_body() {
        assert_eq!(truncate_body("short", 10), "short");
        assert_eq!(truncate_body("abcdef", 3), "abc[truncated 3 bytes]");
        // Multi-byte char straddling the cut
        assert_eq!(truncate_body("aé", 2), "a[truncated 2 bytes]");
    }

    #[cfg(feature = "axum")]
    #[tokio::test]
    #[tracing_test::traced_test]
    async fn test_request_logger_caps_buffered_body() {
        use axum::{body::Body, http::Request, http::StatusCode, routing::post, Router};
        use tower::ServiceExt;

        let app = Router::new()
            .route("/echo", post(|body: String| async move { body.len().to_string() }))
            .layer(axum::middleware::from_fn(http_request_logger));

        let small = Request::builder()
            .method("POST")
            .uri("/echo")
            .header("content-type", "application/json")
            .body(Body::from("{\"a\":1}"))
            .unwrap();
        let response = app.clone().oneshot(small).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let oversized = Request::builder()
            .method("POST")
            .uri("/echo")
            .header("content-type", "application/json")
            .body(Body::from(vec![b' '; MAX_BUFFERED_BODY + 1]))
            .unwrap();
        let response = app.oneshot(oversized).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert_eq!(config.level, "info");
        assert!(!config.enable_file);
    }
}
