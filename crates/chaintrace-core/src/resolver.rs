//! The `TraceResolver` trait — implemented by each trace-format crate.

use crate::types::ResolutionResult;
use thiserror::Error;

/// Errors surfaced to callers of a resolver.
///
/// Rejected lines and unclassifiable parameters are never errors; they are
/// dropped from the result. Only a structurally invalid invocation fails.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Registry load failed: {0}")]
    Registry(#[from] serde_json::Error),
}

impl ResolveError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput { reason: reason.into() }
    }
}

/// A resolver from tracer text output to structured call records.
///
/// Implementations must be pure: the same text always yields the same
/// result, and no state is shared between invocations.
pub trait TraceResolver: Send + Sync {
    /// Returns the trace format this resolver understands (e.g. `"evm-text"`).
    fn format(&self) -> &'static str;

    /// Resolve a complete trace text blob.
    ///
    /// Never fails: an input with no recognisable frames yields an empty
    /// `ResolutionResult`.
    fn resolve(&self, trace: &str) -> ResolutionResult;

    /// Convenience: resolve raw bytes captured from a tracer process.
    ///
    /// Returns `InvalidInput` when the bytes are not text (invalid UTF-8 or
    /// embedded NUL bytes).
    fn resolve_bytes(&self, raw: &[u8]) -> Result<ResolutionResult, ResolveError> {
        let text = std::str::from_utf8(raw)
            .map_err(|e| ResolveError::invalid_input(format!("trace is not UTF-8 text: {e}")))?;
        if let Some(pos) = text.find('\0') {
            return Err(ResolveError::invalid_input(format!(
                "trace contains a NUL byte at offset {pos}"
            )));
        }
        Ok(self.resolve(text))
    }
}
