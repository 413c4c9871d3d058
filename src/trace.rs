//! W3C trace-context header generation.
//!
//! Every outgoing attempt carries a `traceparent` header so the backend can
//! correlate its spans with the originating call. The trace id doubles as
//! the operation id; the span id becomes the parent of the server's first
//! span.

use rand::rngs::OsRng;
use rand::RngCore;

/// Header name for the trace context.
pub const TRACEPARENT: &str = "traceparent";

/// Correlation identifiers for a single outgoing attempt.
///
/// Generated fresh per attempt, including the 401 retry: a retried request
/// gets a new context, never a reused one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    trace_id: [u8; 16],
    span_id: [u8; 8],
}

impl TraceContext {
    /// Draw a fresh trace/span id pair from the OS entropy source.
    pub fn generate() -> Self {
        let mut trace_id = [0u8; 16];
        let mut span_id = [0u8; 8];
        OsRng.fill_bytes(&mut trace_id);
        OsRng.fill_bytes(&mut span_id);
        Self { trace_id, span_id }
    }

    /// Render the header value: `00-<32 hex chars>-<16 hex chars>-01`.
    pub fn header_value(&self) -> String {
        format!("00-{}-{}-01", hex(&self.trace_id), hex(&self.span_id))
    }
}

/// Lowercase hex, two zero-padded digits per byte.
fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
