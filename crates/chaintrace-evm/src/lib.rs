//! chaintrace-evm — resolve EVM tracer call-trace text into call records.
//!
//! # Quick Start
//!
//! ```rust
//! use chaintrace_core::TraceResolver;
//! use chaintrace_evm::EvmTraceResolver;
//!
//! let trace = "\
//! [24523] 0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48::approve(0x1111111111111111111111111111111111111111, 5)
//!   └─ [2300] 0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48::paused() [STATICCALL]";
//!
//! let result = EvmTraceResolver::new().resolve(trace);
//! assert_eq!(result.total_calls, 2);
//! assert_eq!(result.contract_calls[1].depth, 1);
//! ```

pub mod aggregate;
pub mod classify;
pub mod depth;
pub mod known;
pub mod line;
pub mod resolver;
pub mod selector;

pub use classify::{classify_params, ParamType, Rejection};
pub use known::KnownSignatureTable;
pub use resolver::EvmTraceResolver;
pub use selector::selector_of;
