//! `env_logger` setup with the correlation id in every line.

use std::io::Write;

use actix_web::middleware::Logger;
use env_logger::{Builder, Env};

use crate::middleware::{CORRELATION_ID_HEADER, RequestContext};

/// Placeholder printed for lines emitted outside a request.
const NO_CORRELATION_ID: &str = "-";

fn correlation_label() -> String {
    RequestContext::current_correlation_id()
        .map_or_else(|| NO_CORRELATION_ID.to_string(), |id| id.to_string())
}

/// Logger configured from `RUST_LOG`, defaulting to `info`.
pub fn builder() -> Builder {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} [{}] {} {}: {}",
            buf.timestamp_millis(),
            correlation_label(),
            record.level(),
            record.target(),
            record.args()
        )
    });
    builder
}

/// Access log with the correlation id read from the response header.
///
/// The line is written after the request scope has ended, so this must wrap
/// outside [`crate::middleware::CorrelationId`].
pub fn access_logger() -> Logger {
    Logger::new(&format!("%a \"%r\" %s %b %T cid=%{{{CORRELATION_ID_HEADER}}}o"))
}

/// Installs the global logger. Calling it twice is a no-op.
pub fn init() {
    let _ = builder().try_init();
}
