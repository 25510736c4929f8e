/*!
 * Structured Tracing
 * Subscriber setup and per-command spans using the tracing crate
 *
 * Log output goes to stderr so that the shell's stdout carries only command output.
 */

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::{debug, span, Level};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

static COMMAND_SEQ: AtomicU64 = AtomicU64::new(0);

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
///
/// `json` selects JSON output (also driven by BLOCKSIM_TRACE_JSON via the config).
/// Calling this twice is harmless; the second subscriber is ignored.
pub fn init_tracing(json: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()
    };

    if installed.is_ok() {
        debug!(json, "Structured tracing initialized");
    }
}

/// Span covering one shell command
pub struct CommandSpan {
    span: tracing::Span,
    start: Instant,
}

impl CommandSpan {
    pub fn new(verb: &str) -> Self {
        let seq = COMMAND_SEQ.fetch_add(1, Ordering::Relaxed);
        let span = span!(
            Level::DEBUG,
            "command",
            seq,
            verb = verb,
            duration_us = tracing::field::Empty,
            result = tracing::field::Empty,
        );
        Self {
            span,
            start: Instant::now(),
        }
    }

    /// Enter the span for the duration of `f`
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        self.span.in_scope(f)
    }

    pub fn record_result(&self, success: bool) {
        self.span
            .record("result", if success { "success" } else { "error" });
    }
}

impl Drop for CommandSpan {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed().as_micros() as u64;
        self.span.record("duration_us", elapsed);
    }
}

/// Helper to create a command span
#[inline]
pub fn span_command(verb: &str) -> CommandSpan {
    CommandSpan::new(verb)
}
