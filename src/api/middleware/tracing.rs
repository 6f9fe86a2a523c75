//! HTTP request/response tracing middleware.

use axum::http::Request;
use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, MakeSpan, TraceLayer};
use tracing::{Level, Span};

/// Span field filled in by the link handlers once the short code is known.
pub const SHORT_CODE_FIELD: &str = "short_code";

/// Builds the per-request span.
///
/// Carries method, path and version like the default span, plus an empty
/// `short_code` slot. The redirect and creation handlers record into it via
/// [`record_short_code`], so cache HIT/MISS events logged below the handler
/// can be traced back to the code they concern.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkMakeSpan;

impl<B> MakeSpan<B> for LinkMakeSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri().path(),
            version = ?request.version(),
            short_code = tracing::field::Empty,
        )
    }
}

/// Records `code` on the current request span.
pub fn record_short_code(code: &str) {
    Span::current().record(SHORT_CODE_FIELD, code);
}

/// Creates a tracing middleware for HTTP requests.
///
/// # Example Logs
///
/// ```text
/// DEBUG request{method=GET uri=/2dE2aE version=HTTP/1.1 short_code=2dE2aE}: Cache HIT for 2dE2aE
/// INFO request{method=GET uri=/2dE2aE version=HTTP/1.1 short_code=2dE2aE}: finished processing request latency=1 ms status=302
/// ```
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, LinkMakeSpan> {
    TraceLayer::new_for_http()
        .make_span_with(LinkMakeSpan)
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}
