//! `EvmTraceResolver` — the top-level resolver for EVM tracer text output.
//!
//! Per line:
//! 1. Line matcher      → frame, or the line is skipped
//! 2. Parameter classes → full type list, or the call is dropped
//! 3. Signature/selector, depth → `CallRecord`
//!
//! Finally records are aggregated into a `ResolutionResult`.

use chaintrace_core::resolver::TraceResolver;
use chaintrace_core::types::ResolutionResult;
use tracing::debug;

use crate::aggregate::Aggregator;
use crate::classify::classify_params;
use crate::line::{inspect_line, LineMatch};

/// Resolver for the tree-rendered call traces printed by EVM tracers.
///
/// Stateless; one instance can be shared across threads.
///
/// # Usage
/// ```rust
/// use chaintrace_core::TraceResolver;
/// use chaintrace_evm::EvmTraceResolver;
///
/// let trace = "├─ [2300] 0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48::transfer(0x1111111111111111111111111111111111111111, 1000000000000000000 [1e18]) [CALL]";
/// let result = EvmTraceResolver::new().resolve(trace);
/// assert_eq!(result.contract_calls[0].selector, "0xa9059cbb");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EvmTraceResolver;

impl EvmTraceResolver {
    pub fn new() -> Self {
        Self
    }
}

impl TraceResolver for EvmTraceResolver {
    fn format(&self) -> &'static str {
        "evm-text"
    }

    fn resolve(&self, trace: &str) -> ResolutionResult {
        let mut agg = Aggregator::new();
        let mut dropped = 0usize;

        for (idx, line) in trace.lines().enumerate() {
            let line_no = idx + 1;
            let frame = match inspect_line(line) {
                LineMatch::Frame(frame) => frame,
                LineMatch::NotAFrame => continue,
                LineMatch::UndecodedCalldata { hex_len } => {
                    debug!(line = line_no, hex_len, "dropping call with undecoded calldata");
                    dropped += 1;
                    continue;
                }
            };

            match classify_params(&frame.raw_params) {
                Ok(types) => agg.push_frame(&frame, &types),
                Err(reason) => {
                    debug!(
                        line = line_no,
                        function = %frame.function_name,
                        %reason,
                        "dropping call with unclassifiable parameters"
                    );
                    dropped += 1;
                }
            }
        }

        let result = agg.finish();
        debug!(
            calls = result.total_calls,
            functions = result.total_functions,
            dropped,
            "trace resolved"
        );
        result
    }
}
