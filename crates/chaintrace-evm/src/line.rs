//! Recognise one call frame per trace line.
//!
//! Accepted shape:
//! `<indent>[<gas>] 0x<40 hex>::<identifier>(<params>) [<CALL_TYPE>]`
//!
//! Anything else (headers, `← [Return]` lines, emitted events, value
//! transfers) is noise and produces no frame.

use std::str::FromStr;

use alloy_primitives::Address;
use chaintrace_core::types::{CallType, RecognizedFrame};
use once_cell::sync::Lazy;
use regex::Regex;

static FRAME_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?P<prefix>[\s│├└─]*)",
        r"\[(?P<gas>[0-9]+)\]\s+",
        r"(?P<address>0x[0-9a-fA-F]{40})::",
        r"(?P<name>[A-Za-z_][A-Za-z0-9_]*)",
        r"\((?P<params>.*)\)",
        r"(?:\s*\[(?P<tag>[A-Za-z0-9_]+)\])?\s*$",
    ))
    .expect("valid regex")
});

/// Parameter text of this many bare hex digits (or more) is raw calldata.
pub const CALLDATA_HEX_LEN: usize = 64;

/// What the matcher made of a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineMatch {
    Frame(RecognizedFrame),
    /// The line does not have the call-frame shape.
    NotAFrame,
    /// The shape matched but the parameters are an undecoded hex blob.
    UndecodedCalldata { hex_len: usize },
}

impl LineMatch {
    pub fn into_frame(self) -> Option<RecognizedFrame> {
        match self {
            Self::Frame(frame) => Some(frame),
            _ => None,
        }
    }
}

/// Match a line and report why it was not a frame.
pub fn inspect_line(line: &str) -> LineMatch {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let Some(caps) = FRAME_LINE.captures(line) else {
        return LineMatch::NotAFrame;
    };

    let Ok(gas) = caps["gas"].parse::<u64>() else {
        return LineMatch::NotAFrame;
    };
    let Ok(address) = Address::from_str(&caps["address"]) else {
        return LineMatch::NotAFrame;
    };

    let raw_params = caps["params"].to_string();
    if let Some(hex_len) = calldata_blob_len(&raw_params) {
        return LineMatch::UndecodedCalldata { hex_len };
    }

    let call_type = caps
        .name("tag")
        .map(|tag| CallType::from_tag(tag.as_str()))
        .unwrap_or_default();

    LineMatch::Frame(RecognizedFrame {
        indentation_prefix: caps["prefix"].to_string(),
        gas,
        address,
        function_name: caps["name"].to_string(),
        raw_params,
        call_type,
    })
}

/// Match a line, discarding the reason for a miss.
pub fn match_line(line: &str) -> Option<RecognizedFrame> {
    inspect_line(line).into_frame()
}

/// Length of the whitespace-stripped parameter text if it is a bare hex run
/// of at least [`CALLDATA_HEX_LEN`] digits.
fn calldata_blob_len(raw_params: &str) -> Option<usize> {
    let mut len = 0;
    for c in raw_params.chars().filter(|c| !c.is_whitespace()) {
        if !c.is_ascii_hexdigit() {
            return None;
        }
        len += 1;
    }
    (len >= CALLDATA_HEX_LEN).then_some(len)
}
