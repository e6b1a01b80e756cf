//! Canonical signature assembly and 4-byte selector computation.
//!
//! The selector of a function is the first four bytes of the keccak256 hash
//! of its canonical signature string, e.g.:
//!   keccak256("transfer(address,uint256)")[..4] → 0xa9059cbb

use tiny_keccak::{Hasher, Keccak};

use crate::classify::ParamType;

/// keccak256 over arbitrary bytes.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut output = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut output);
    output
}

/// First four bytes of `keccak256(signature)`.
pub fn selector_bytes(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Selector of a canonical signature as `0x` + 8 lowercase hex digits.
pub fn selector_of(signature: &str) -> String {
    format!("0x{}", hex::encode(selector_bytes(signature)))
}

/// Build `name(type1,type2,...)` with no whitespace.
pub fn build_signature(function_name: &str, types: &[ParamType]) -> String {
    let joined = types
        .iter()
        .map(ParamType::as_str)
        .collect::<Vec<_>>()
        .join(",");
    format!("{function_name}({joined})")
}

/// Signature text and its selector, computed together.
pub fn signature_and_selector(function_name: &str, types: &[ParamType]) -> (String, String) {
    let signature = build_signature(function_name, types);
    let selector = selector_of(&signature);
    (signature, selector)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn erc20_transfer_selector() {
        assert_eq!(selector_of("transfer(address,uint256)"), "0xa9059cbb");
    }

    #[test]
    fn erc20_balance_of_selector() {
        assert_eq!(selector_bytes("balanceOf(address)"), [0x70, 0xa0, 0x82, 0x31]);
    }

    #[test]
    fn transfer_event_hash() {
        let hash = keccak256(b"Transfer(address,address,uint256)");
        assert_eq!(
            hex::encode(hash),
            "ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"
        );
    }

    #[test]
    fn builds_signature_without_spaces() {
        let types = [ParamType::Address, ParamType::Uint256];
        assert_eq!(build_signature("transfer", &types), "transfer(address,uint256)");
        assert_eq!(build_signature("paused", &[]), "paused()");
    }

    #[test]
    fn signature_and_selector_agree() {
        let (sig, sel) =
            signature_and_selector("approve", &[ParamType::Address, ParamType::Uint256]);
        assert_eq!(sig, "approve(address,uint256)");
        assert_eq!(sel, "0x095ea7b3");
    }

    #[test]
    fn selector_is_lowercase_hex() {
        let sel = selector_of("totalSupply()");
        assert_eq!(sel, "0x18160ddd");
        assert_eq!(sel.len(), 10);
        assert!(sel[2..].chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }
}
