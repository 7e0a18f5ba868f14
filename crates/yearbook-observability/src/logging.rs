use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

fn parse_enabled(raw: Option<&str>) -> bool {
    raw.map(|v| v.to_lowercase() != "false" && v != "0")
        .unwrap_or(true)
}

/// Reads `OBSERVABILITY_ENABLED` once. Anything but `false`/`0` keeps it on.
pub fn is_observability_enabled() -> bool {
    *OBSERVABILITY_ENABLED.get_or_init(|| {
        parse_enabled(std::env::var("OBSERVABILITY_ENABLED").ok().as_deref())
    })
}

/// Default console directives for a given `LOG_LEVEL`.
fn default_directives(level: &str) -> String {
    format!("yearbook={level},tower_http=warn,hyper=info")
}

fn console_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        EnvFilter::new(default_directives(&level))
    })
}

pub async fn logging_middleware(req: Request, next: Next) -> Response {
    if !is_observability_enabled() {
        return next.run(req).await;
    }

    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let matched_path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    let request_id = uuid::Uuid::new_v4().to_string();

    info!(
        request_id = %request_id,
        method = %method,
        path = %matched_path,
        "Incoming request"
    );

    let response = next.run(req).await;
    let latency = start.elapsed();
    let status = response.status().as_u16();

    match status {
        400..=499 => {
            warn!(
                request_id = %request_id,
                method = %method,
                path = %matched_path,
                status = %status,
                latency_ms = %latency.as_millis(),
                "Client error"
            );
        }
        500..=599 => {
            error!(
                request_id = %request_id,
                method = %method,
                path = %matched_path,
                status = %status,
                latency_ms = %latency.as_millis(),
                "Server error"
            );
        }
        _ => {
            info!(
                request_id = %request_id,
                method = %method,
                path = %matched_path,
                status = %status,
                latency_ms = %latency.as_millis(),
                "Request completed"
            );
        }
    }

    response
}

/// Installs the global subscriber.
///
/// The console layer honours `RUST_LOG`, falling back to `LOG_LEVEL`
/// (default `info`) for the yearbook crates. `LOG_FORMAT=json` switches the
/// console to JSON lines. When `LOG_DIR` is set, errors go to a daily
/// `yearbook.log` and info-level JSON to a daily `yearbook.json` there.
pub fn init_tracing() {
    use std::fs;
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::fmt;

    let json_console = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let console_layer = if json_console {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_filter(console_filter())
            .boxed()
    } else {
        fmt::layer()
            .with_target(false)
            .with_file(true)
            .with_line_number(true)
            .compact()
            .with_filter(console_filter())
            .boxed()
    };

    let log_dir = std::env::var("LOG_DIR")
        .ok()
        .filter(|dir| !dir.trim().is_empty())
        .and_then(|dir| match fs::create_dir_all(&dir) {
            Ok(()) => Some(dir),
            Err(e) => {
                eprintln!("Failed to create log directory {dir}: {e}. File logging disabled.");
                None
            }
        });

    let file_layers = log_dir.map(|dir| {
        let error_appender = RollingFileAppender::new(Rotation::DAILY, &dir, "yearbook.log");
        let error_layer = fmt::layer()
            .with_writer(error_appender)
            .with_target(false)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .with_filter(EnvFilter::new("error"));

        let json_appender = RollingFileAppender::new(Rotation::DAILY, &dir, "yearbook.json");
        let json_layer = fmt::layer()
            .json()
            .with_writer(json_appender)
            .with_current_span(true)
            .with_span_list(true)
            .with_filter(EnvFilter::new("info"));

        error_layer.and_then(json_layer)
    });

    if let Err(e) = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layers)
        .try_init()
    {
        eprintln!("Tracing already initialized: {e}");
        return;
    }

    info!(json = json_console, "Tracing initialized");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_enabled_defaults_on() {
        assert!(parse_enabled(None));
        assert!(parse_enabled(Some("true")));
        assert!(parse_enabled(Some("yes")));
    }

    #[test]
    fn test_parse_enabled_switches_off() {
        assert!(!parse_enabled(Some("false")));
        assert!(!parse_enabled(Some("FALSE")));
        assert!(!parse_enabled(Some("0")));
    }

    #[test]
    fn test_default_directives_cover_workspace_crates() {
        let directives = default_directives("debug");
        assert!(directives.starts_with("yearbook=debug"));
        assert!(directives.contains("tower_http=warn"));
    }
}
