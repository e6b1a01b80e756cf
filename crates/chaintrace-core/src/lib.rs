//! chaintrace-core — foundation types and traits for the ChainTrace library.
//!
//! This crate defines:
//! - [`CallRecord`] / [`ResolutionResult`] — the output of resolving a trace
//! - [`RecognizedFrame`] — one matched trace line before classification
//! - [`TraceResolver`] — the resolver trait every trace format implements
//! - [`SignatureRegistry`] — the trait for looking up function signatures
//! - [`tree`] — optional reconstruction of nesting from depth tags

pub mod registry;
pub mod resolver;
pub mod tree;
pub mod types;

pub use registry::{KnownSignature, MemorySignatureRegistry, SignatureRegistry};
pub use resolver::{ResolveError, TraceResolver};
pub use tree::{build_call_tree, CallNode};
pub use types::{CallRecord, CallType, FunctionSignature, RecognizedFrame, ResolutionResult};
