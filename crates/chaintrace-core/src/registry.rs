//! Function signature registry — maps 4-byte selectors to known signatures.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A known function signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownSignature {
    /// Function name (e.g. `"transfer"`).
    pub name: String,
    /// Full signature string (e.g. `"transfer(address,uint256)"`).
    pub signature: String,
    /// 4-byte selector (keccak256 of signature, first 4 bytes).
    #[serde(with = "selector_hex")]
    pub selector: [u8; 4],
    /// Source of this signature (e.g. `"bundled"`, `"user"`).
    pub source: String,
}

impl KnownSignature {
    /// Selector as `0x`-prefixed lowercase hex.
    pub fn selector_hex(&self) -> String {
        format!("0x{}", hex::encode(self.selector))
    }
}

/// Trait for looking up function signatures by 4-byte selector.
pub trait SignatureRegistry: Send + Sync {
    /// Look up all known signatures matching a 4-byte selector.
    /// Returns multiple signatures when there are collisions.
    fn get_by_selector(&self, selector: [u8; 4]) -> Vec<KnownSignature>;

    /// Total number of registered signatures.
    fn len(&self) -> usize;

    /// Returns `true` if the registry is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parse selector text (`0xa9059cbb` or `A9059CBB`) into bytes.
pub fn parse_selector(text: &str) -> Option<[u8; 4]> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if digits.len() != 8 {
        return None;
    }
    hex::decode(digits).ok()?.try_into().ok()
}

// ─── Layered lookup ───────────────────────────────────────────────────────────

/// Query registries in order and return the first non-empty answer.
pub fn lookup_layered(
    registries: &[&dyn SignatureRegistry],
    selector: [u8; 4],
) -> Vec<KnownSignature> {
    registries
        .iter()
        .map(|reg| reg.get_by_selector(selector))
        .find(|hits| !hits.is_empty())
        .unwrap_or_default()
}

// ─── In-memory registry ───────────────────────────────────────────────────────

/// A simple in-memory registry backed by `HashMap`.
#[derive(Debug, Default)]
pub struct MemorySignatureRegistry {
    /// selector → list of signatures (handle collisions)
    by_selector: HashMap<[u8; 4], Vec<KnownSignature>>,
}

impl MemorySignatureRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a signature. Re-registering an identical signature is a no-op.
    pub fn register(&mut self, sig: KnownSignature) {
        let entries = self.by_selector.entry(sig.selector).or_default();
        if !entries.iter().any(|s| s.signature == sig.signature) {
            entries.push(sig);
        }
    }
}

impl SignatureRegistry for MemorySignatureRegistry {
    fn get_by_selector(&self, selector: [u8; 4]) -> Vec<KnownSignature> {
        self.by_selector.get(&selector).cloned().unwrap_or_default()
    }

    fn len(&self) -> usize {
        self.by_selector.values().map(|v| v.len()).sum()
    }
}

mod selector_hex {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(sel: &[u8; 4], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format!("0x{}", hex::encode(sel)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[u8; 4], D::Error> {
        let text = String::deserialize(d)?;
        super::parse_selector(&text)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid selector: {text}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_sig(name: &str, sig_str: &str, selector: [u8; 4]) -> KnownSignature {
        KnownSignature {
            name: name.to_string(),
            signature: sig_str.to_string(),
            selector,
            source: "test".to_string(),
        }
    }

    #[test]
    fn register_and_lookup() {
        let mut reg = MemorySignatureRegistry::new();
        let selector = [0xa9, 0x05, 0x9c, 0xbb];
        reg.register(make_sig("transfer", "transfer(address,uint256)", selector));

        let results = reg.get_by_selector(selector);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "transfer");
        assert_eq!(results[0].selector_hex(), "0xa9059cbb");
    }

    #[test]
    fn collisions_keep_registration_order() {
        let mut reg = MemorySignatureRegistry::new();
        let selector = [0, 0, 0, 1];
        reg.register(make_sig("a", "a()", selector));
        reg.register(make_sig("b", "b(uint256)", selector));
        reg.register(make_sig("a", "a()", selector));

        let names: Vec<_> = reg
            .get_by_selector(selector)
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn empty_registry() {
        let reg = MemorySignatureRegistry::new();
        assert!(reg.is_empty());
        assert!(reg.get_by_selector([1, 2, 3, 4]).is_empty());
    }

    #[test]
    fn parse_selector_forms() {
        assert_eq!(parse_selector("0xa9059cbb"), Some([0xa9, 0x05, 0x9c, 0xbb]));
        assert_eq!(parse_selector("A9059CBB"), Some([0xa9, 0x05, 0x9c, 0xbb]));
        assert_eq!(parse_selector(" 0Xa9059cbb "), Some([0xa9, 0x05, 0x9c, 0xbb]));
        assert_eq!(parse_selector("0xa9059c"), None);
        assert_eq!(parse_selector("0xzz059cbb"), None);
    }

    #[test]
    fn layered_lookup_prefers_earlier_registries() {
        let selector = [0xde, 0xad, 0xbe, 0xef];
        let mut first = MemorySignatureRegistry::new();
        let mut second = MemorySignatureRegistry::new();
        second.register(make_sig("late", "late()", selector));

        let hits = lookup_layered(&[&first, &second], selector);
        assert_eq!(hits[0].name, "late");

        first.register(make_sig("early", "early()", selector));
        let hits = lookup_layered(&[&first, &second], selector);
        assert_eq!(hits[0].name, "early");
    }

    #[test]
    fn signature_serde_uses_hex_selector() {
        let sig = make_sig("owner", "owner()", [0x8d, 0xa5, 0xcb, 0x5b]);
        let json = serde_json::to_value(&sig).unwrap();
        assert_eq!(json["selector"], "0x8da5cb5b");
        let back: KnownSignature = serde_json::from_value(json).unwrap();
        assert_eq!(back, sig);
    }
}
