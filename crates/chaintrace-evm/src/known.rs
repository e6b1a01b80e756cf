//! Bundled table of well-known function selectors.
//!
//! Covers ERC-20, OpenZeppelin Ownable and Pausable. The table is a
//! standalone lookup: the trace resolver never consults it, since every
//! trace line already names its function.

use std::collections::HashMap;

use chaintrace_core::registry::{
    parse_selector, KnownSignature, MemorySignatureRegistry, SignatureRegistry,
};
use chaintrace_core::resolver::ResolveError;
use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::selector::selector_bytes;

/// (group, canonical signature)
pub const KNOWN_SIGNATURES: &[(&str, &str)] = &[
    // ─── ERC-20 ───────────────────────────────────────────────────────
    ("erc20", "name()"),
    ("erc20", "symbol()"),
    ("erc20", "decimals()"),
    ("erc20", "totalSupply()"),
    ("erc20", "balanceOf(address)"),
    ("erc20", "transfer(address,uint256)"),
    ("erc20", "transferFrom(address,address,uint256)"),
    ("erc20", "approve(address,uint256)"),
    ("erc20", "allowance(address,address)"),
    ("erc20", "increaseAllowance(address,uint256)"),
    ("erc20", "decreaseAllowance(address,uint256)"),
    // ─── OpenZeppelin Ownable ─────────────────────────────────────────
    ("ownable", "owner()"),
    ("ownable", "transferOwnership(address)"),
    ("ownable", "renounceOwnership()"),
    // ─── OpenZeppelin Pausable ────────────────────────────────────────
    ("pausable", "paused()"),
    ("pausable", "pause()"),
    ("pausable", "unpause()"),
];

static BY_SELECTOR: Lazy<HashMap<[u8; 4], &'static str>> = Lazy::new(|| {
    KNOWN_SIGNATURES
        .iter()
        .map(|(_, sig)| (selector_bytes(sig), *sig))
        .collect()
});

/// Signature text for a selector, if it is one of the bundled ones.
pub fn lookup(selector: [u8; 4]) -> Option<&'static str> {
    BY_SELECTOR.get(&selector).copied()
}

/// Like [`lookup`], from selector text with or without `0x`.
///
/// Malformed text is `InvalidInput`; an unknown selector is `Ok(None)`.
pub fn lookup_hex(selector: &str) -> Result<Option<&'static str>, ResolveError> {
    let bytes = parse_selector(selector).ok_or_else(|| {
        ResolveError::invalid_input(format!("selector must be 4 hex bytes, got {selector:?}"))
    })?;
    Ok(lookup(bytes))
}

/// The bundled table as a [`SignatureRegistry`].
#[derive(Debug, Clone, Copy, Default)]
pub struct KnownSignatureTable;

impl SignatureRegistry for KnownSignatureTable {
    fn get_by_selector(&self, selector: [u8; 4]) -> Vec<KnownSignature> {
        let Some(signature) = lookup(selector) else {
            return Vec::new();
        };
        let group = KNOWN_SIGNATURES
            .iter()
            .find(|(_, sig)| *sig == signature)
            .map_or("bundled", |(group, _)| *group);
        vec![KnownSignature {
            name: function_name(signature).to_string(),
            signature: signature.to_string(),
            selector,
            source: format!("bundled:{group}"),
        }]
    }

    fn len(&self) -> usize {
        BY_SELECTOR.len()
    }
}

// ─── User signature files ─────────────────────────────────────────────────────

/// One entry of a user signature file. The selector may be omitted and is
/// then computed from the signature.
#[derive(Debug, Deserialize)]
struct SignatureEntry {
    signature: String,
    #[serde(default)]
    selector: Option<String>,
}

/// Load a JSON array of `{ "signature": "...", "selector": "0x..." }` objects
/// into a registry tagged with source `"user"`.
pub fn load_registry_json(json: &str) -> Result<MemorySignatureRegistry, ResolveError> {
    let entries: Vec<SignatureEntry> = serde_json::from_str(json)?;
    let mut registry = MemorySignatureRegistry::new();

    for entry in entries {
        let signature = entry.signature.trim();
        if !looks_like_signature(signature) {
            return Err(ResolveError::invalid_input(format!(
                "not a canonical signature: {signature:?}"
            )));
        }
        let computed = selector_bytes(signature);
        if let Some(claimed) = entry.selector.as_deref() {
            match parse_selector(claimed) {
                Some(bytes) if bytes == computed => {}
                _ => {
                    return Err(ResolveError::invalid_input(format!(
                        "selector {claimed} does not match {signature} (0x{})",
                        hex::encode(computed)
                    )))
                }
            }
        }
        registry.register(KnownSignature {
            name: function_name(signature).to_string(),
            signature: signature.to_string(),
            selector: computed,
            source: "user".to_string(),
        });
    }

    tracing::debug!(signatures = registry.len(), "loaded user signature registry");
    Ok(registry)
}

fn function_name(signature: &str) -> &str {
    signature.split('(').next().unwrap_or(signature)
}

/// `name(types)` with a non-empty name and no whitespace.
pub fn looks_like_signature(text: &str) -> bool {
    match text.find('(') {
        Some(open) => open > 0 && text.ends_with(')') && !text.contains(char::is_whitespace),
        None => false,
    }
}
