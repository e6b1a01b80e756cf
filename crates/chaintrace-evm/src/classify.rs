//! Infer ABI parameter types from the tracer's textual value renderings.
//!
//! Classification priority, per comma-separated token (first match wins):
//! 1. 32+ bare hex digits          → reject (undecoded data)
//! 2. `0x` prefix                  → `address` / `bytes32` / `bytes` by length, else reject
//! 3. `true` / `false`             → `bool`
//! 4. decimal, optional `[1e18]`   → `uint256`
//! 5. `[...]`                      → `uint256[]`
//! 6. type-name-shaped token       → passed through verbatim
//! 7. leading identifier run       → best-effort type, else reject
//!
//! A rejection anywhere discards the whole parameter list. There is no
//! partially typed outcome.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ─── Types ────────────────────────────────────────────────────────────────────

/// One inferred ABI type token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    Address,
    Uint256,
    Bool,
    Bytes32,
    Bytes,
    Uint256Array,
    /// A token that already looked like a type name, or the best-effort
    /// identifier extracted from it.
    Verbatim(String),
}

impl ParamType {
    /// The canonical ABI spelling used in signatures.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Address => "address",
            Self::Uint256 => "uint256",
            Self::Bool => "bool",
            Self::Bytes32 => "bytes32",
            Self::Bytes => "bytes",
            Self::Uint256Array => "uint256[]",
            Self::Verbatim(text) => text,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a parameter list was discarded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("token of {len} bare hex digits looks like undecoded data")]
    UndecodedData { len: usize },

    #[error("0x-prefixed token has unsupported length {len}")]
    HexLength { len: usize },

    #[error("no type can be inferred from token {token:?}")]
    NoTypeGuess { token: String },

    #[error("assembled type list {types:?} starts with a digit")]
    LeadingDigit { types: String },
}

/// The result of applying one rule to one token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    Matched(ParamType),
    Reject(Rejection),
    /// The rule does not apply; try the next one.
    Skip,
}

/// A single classification rule over a trimmed token.
pub type Rule = fn(&str) -> RuleOutcome;

/// The ordered rule list. Earlier rules shadow later ones.
pub const RULES: &[(&str, Rule)] = &[
    ("undecoded-hex", rule_undecoded_hex),
    ("hex-literal", rule_hex_literal),
    ("bool", rule_bool),
    ("decimal", rule_decimal),
    ("array", rule_array),
    ("type-name", rule_type_name),
    ("identifier-prefix", rule_identifier_prefix),
];

/// Minimum run of bare hex digits treated as undecoded data inside a token.
pub const UNDECODED_TOKEN_HEX_LEN: usize = 32;

static DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+(?:\s*\[[^\]]*\])?$").expect("valid regex"));
static TYPE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_\[\]]*$").expect("valid regex"));
static IDENT_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*").expect("valid regex"));

// ─── Rules ────────────────────────────────────────────────────────────────────

pub fn rule_undecoded_hex(token: &str) -> RuleOutcome {
    if token.len() >= UNDECODED_TOKEN_HEX_LEN && token.bytes().all(|b| b.is_ascii_hexdigit()) {
        RuleOutcome::Reject(Rejection::UndecodedData { len: token.len() })
    } else {
        RuleOutcome::Skip
    }
}

pub fn rule_hex_literal(token: &str) -> RuleOutcome {
    if !token.starts_with("0x") {
        return RuleOutcome::Skip;
    }
    match token.len() {
        42 => RuleOutcome::Matched(ParamType::Address),
        66 => RuleOutcome::Matched(ParamType::Bytes32),
        3..=10 => RuleOutcome::Matched(ParamType::Bytes),
        len => RuleOutcome::Reject(Rejection::HexLength { len }),
    }
}

pub fn rule_bool(token: &str) -> RuleOutcome {
    match token {
        "true" | "false" => RuleOutcome::Matched(ParamType::Bool),
        _ => RuleOutcome::Skip,
    }
}

/// The bracketed magnitude annotation (`[1e18]`) is display-only and dropped.
pub fn rule_decimal(token: &str) -> RuleOutcome {
    if DECIMAL.is_match(token) {
        RuleOutcome::Matched(ParamType::Uint256)
    } else {
        RuleOutcome::Skip
    }
}

/// Element types are not inferred; every array literal is `uint256[]`.
pub fn rule_array(token: &str) -> RuleOutcome {
    if token.len() >= 2 && token.starts_with('[') && token.ends_with(']') {
        RuleOutcome::Matched(ParamType::Uint256Array)
    } else {
        RuleOutcome::Skip
    }
}

pub fn rule_type_name(token: &str) -> RuleOutcome {
    if TYPE_NAME.is_match(token) {
        RuleOutcome::Matched(ParamType::Verbatim(token.to_string()))
    } else {
        RuleOutcome::Skip
    }
}

/// Terminal rule: never skips.
pub fn rule_identifier_prefix(token: &str) -> RuleOutcome {
    match IDENT_PREFIX.find(token) {
        Some(m) => RuleOutcome::Matched(ParamType::Verbatim(m.as_str().to_string())),
        None => RuleOutcome::Reject(Rejection::NoTypeGuess {
            token: token.to_string(),
        }),
    }
}

// ─── Classification ───────────────────────────────────────────────────────────

/// Split on commas that are not nested inside `[]`, `()` or `{}`.
/// Each piece is trimmed.
pub fn split_top_level(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut nesting = 0usize;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '[' | '(' | '{' => nesting += 1,
            ']' | ')' | '}' => nesting = nesting.saturating_sub(1),
            ',' if nesting == 0 => {
                pieces.push(text[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    pieces.push(text[start..].trim());
    pieces
}

/// Classify a single trimmed token against [`RULES`].
pub fn classify_token(token: &str) -> Result<ParamType, Rejection> {
    for (_, rule) in RULES {
        match rule(token) {
            RuleOutcome::Matched(ty) => return Ok(ty),
            RuleOutcome::Reject(why) => return Err(why),
            RuleOutcome::Skip => continue,
        }
    }
    Err(Rejection::NoTypeGuess {
        token: token.to_string(),
    })
}

/// Classify a raw parameter list into a complete type sequence.
///
/// Whitespace-only text is a zero-argument call. Any rejected token
/// discards the whole list.
pub fn classify_params(raw_params: &str) -> Result<Vec<ParamType>, Rejection> {
    if raw_params.trim().is_empty() {
        return Ok(Vec::new());
    }

    let types = split_top_level(raw_params)
        .into_iter()
        .map(classify_token)
        .collect::<Result<Vec<_>, _>>()?;

    let joined = types
        .iter()
        .map(ParamType::as_str)
        .collect::<Vec<_>>()
        .join(",");
    if joined.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(Rejection::LeadingDigit { types: joined });
    }
    Ok(types)
}

// ─── Tests ────────────────────────────────────────────────────────────────────
