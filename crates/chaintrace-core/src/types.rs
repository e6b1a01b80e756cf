//! Core types for the ChainTrace resolution pipeline.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::fmt;

// ─── CallType ─────────────────────────────────────────────────────────────────

/// The EVM call opcode a frame was entered with, as tagged by the tracer.
///
/// Serialised as its upper-case text (`"STATICCALL"`), so tags the tracer
/// invents later survive a round trip through [`CallType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CallType {
    #[default]
    Call,
    StaticCall,
    DelegateCall,
    CallCode,
    Create,
    Create2,
    /// Any other tag, stored upper-cased.
    Other(String),
}

impl CallType {
    /// Parse a tracer tag such as `call` or `[STATICCALL]`'s inner text.
    /// Matching is case-insensitive; unknown tags are kept upper-cased.
    pub fn from_tag(tag: &str) -> Self {
        let upper = tag.trim().to_ascii_uppercase();
        match upper.as_str() {
            "CALL" => Self::Call,
            "STATICCALL" => Self::StaticCall,
            "DELEGATECALL" => Self::DelegateCall,
            "CALLCODE" => Self::CallCode,
            "CREATE" => Self::Create,
            "CREATE2" => Self::Create2,
            _ => Self::Other(upper),
        }
    }

    /// The canonical upper-case tag text.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Call => "CALL",
            Self::StaticCall => "STATICCALL",
            Self::DelegateCall => "DELEGATECALL",
            Self::CallCode => "CALLCODE",
            Self::Create => "CREATE",
            Self::Create2 => "CREATE2",
            Self::Other(tag) => tag,
        }
    }
}

impl fmt::Display for CallType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for CallType {
    fn from(s: String) -> Self {
        Self::from_tag(&s)
    }
}

impl From<CallType> for String {
    fn from(ct: CallType) -> Self {
        ct.as_str().to_string()
    }
}

// ─── RecognizedFrame ──────────────────────────────────────────────────────────

/// One call frame recognised on a single trace line, before parameter
/// classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizedFrame {
    /// Leading whitespace / tree-glyph run, verbatim.
    pub indentation_prefix: String,
    /// Gas figure from the `[gas]` bracket.
    pub gas: u64,
    /// Callee address.
    pub address: Address,
    /// Function identifier, always `[A-Za-z_][A-Za-z0-9_]*`.
    pub function_name: String,
    /// Text between the argument parentheses, untrimmed.
    pub raw_params: String,
    pub call_type: CallType,
}

// ─── CallRecord ───────────────────────────────────────────────────────────────

/// A fully resolved call: one per recognised and classifiable trace line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRecord {
    /// Nesting depth inferred from the tree glyphs; 0 is the top-level call.
    pub depth: usize,
    pub call_type: CallType,
    /// `0x` + 40 lowercase hex digits.
    pub address: String,
    pub function_name: String,
    /// Canonical `name(type,type,...)` text the selector was hashed from.
    pub full_signature: String,
    /// `0x` + 8 lowercase hex digits.
    pub selector: String,
    /// Gas re-encoded as `0x`-prefixed lowercase hex.
    pub gas: String,
    /// The original parameter text, trimmed, for display.
    pub params: String,
}

impl fmt::Display for CallRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}::{}({}) {} {}",
            self.call_type, self.address, self.function_name, self.params, self.selector, self.gas
        )
    }
}

// ─── FunctionSignature ────────────────────────────────────────────────────────

/// One entry of the deduplicated selector catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSignature {
    /// `0x` + 8 lowercase hex digits.
    pub selector: String,
    /// Full signature text of the first call seen with this selector.
    pub name: String,
}

// ─── ResolutionResult ─────────────────────────────────────────────────────────

/// The output of one resolver invocation over a complete trace.
///
/// An empty result is a valid outcome; callers decide how to surface it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionResult {
    /// Unique selectors in first-seen order.
    pub function_signatures: Vec<FunctionSignature>,
    /// Every resolved call in source order.
    pub contract_calls: Vec<CallRecord>,
    /// Number of unique selectors.
    pub total_functions: usize,
    /// Number of calls, duplicates included.
    pub total_calls: usize,
}

impl ResolutionResult {
    /// Returns `true` if the trace produced no resolvable calls.
    pub fn is_empty(&self) -> bool {
        self.contract_calls.is_empty()
    }

    /// Catalog lookup by `0x`-prefixed selector (case-insensitive).
    pub fn signature_for(&self, selector: &str) -> Option<&str> {
        self.function_signatures
            .iter()
            .find(|sig| sig.selector.eq_ignore_ascii_case(selector))
            .map(|sig| sig.name.as_str())
    }
}

impl fmt::Display for ResolutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} calls, {} unique functions",
            self.total_calls, self.total_functions
        )
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
