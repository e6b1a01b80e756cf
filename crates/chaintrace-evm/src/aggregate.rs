//! Assemble classified frames into a `ResolutionResult`.

use chaintrace_core::types::{CallRecord, FunctionSignature, RecognizedFrame, ResolutionResult};
use indexmap::IndexMap;

use crate::classify::ParamType;
use crate::depth::depth_of;
use crate::selector::signature_and_selector;

/// Turn one classified frame into an immutable call record.
pub fn build_record(frame: &RecognizedFrame, types: &[ParamType]) -> CallRecord {
    let (full_signature, selector) = signature_and_selector(&frame.function_name, types);
    CallRecord {
        depth: depth_of(&frame.indentation_prefix),
        call_type: frame.call_type.clone(),
        address: format!("0x{}", hex::encode(frame.address.as_slice())),
        function_name: frame.function_name.clone(),
        full_signature,
        selector,
        gas: format!("{:#x}", frame.gas),
        params: frame.raw_params.trim().to_string(),
    }
}

/// Collects records in source order and the first signature per selector.
#[derive(Debug, Default)]
pub struct Aggregator {
    calls: Vec<CallRecord>,
    /// selector → full signature of its first occurrence
    catalog: IndexMap<String, String>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: CallRecord) {
        self.catalog
            .entry(record.selector.clone())
            .or_insert_with(|| record.full_signature.clone());
        self.calls.push(record);
    }

    pub fn push_frame(&mut self, frame: &RecognizedFrame, types: &[ParamType]) {
        self.push(build_record(frame, types));
    }

    pub fn finish(self) -> ResolutionResult {
        let function_signatures: Vec<FunctionSignature> = self
            .catalog
            .into_iter()
            .map(|(selector, name)| FunctionSignature { selector, name })
            .collect();
        ResolutionResult {
            total_functions: function_signatures.len(),
            total_calls: self.calls.len(),
            function_signatures,
            contract_calls: self.calls,
        }
    }
}

/// Aggregate an ordered sequence of records.
pub fn aggregate<I>(records: I) -> ResolutionResult
where
    I: IntoIterator<Item = CallRecord>,
{
    let mut agg = Aggregator::new();
    for record in records {
        agg.push(record);
    }
    agg.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::Address;
    use chaintrace_core::types::CallType;
    use std::str::FromStr;

    fn frame(prefix: &str, name: &str, params: &str) -> RecognizedFrame {
        RecognizedFrame {
            indentation_prefix: prefix.into(),
            gas: 2300,
            address: Address::from_str("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48").unwrap(),
            function_name: name.into(),
            raw_params: params.into(),
            call_type: CallType::DelegateCall,
        }
    }

    #[test]
    fn record_fields_are_normalised() {
        let r = build_record(
            &frame("│   ├─ ", "approve", "  0x01, 5 "),
            &[ParamType::Bytes, ParamType::Uint256],
        );
        assert_eq!(r.depth, 2);
        assert_eq!(r.address, "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48");
        assert_eq!(r.gas, "0x8fc");
        assert_eq!(r.params, "0x01, 5");
        assert_eq!(r.full_signature, "approve(bytes,uint256)");
        assert_eq!(r.call_type, CallType::DelegateCall);
    }

    #[test]
    fn first_signature_wins_per_selector() {
        let types = [ParamType::Address, ParamType::Uint256];
        let a = build_record(&frame("", "approve", "x"), &types);
        let mut b = build_record(&frame("├─ ", "approve", "y"), &types);
        b.full_signature = "shadowed(uint256)".into();

        let result = aggregate(vec![a, b]);
        assert_eq!(result.total_calls, 2);
        assert_eq!(result.total_functions, 1);
        assert_eq!(result.function_signatures[0].name, "approve(address,uint256)");
        assert_eq!(result.function_signatures[0].selector, "0x095ea7b3");
    }

    #[test]
    fn catalog_keeps_first_seen_order() {
        let mut agg = Aggregator::new();
        agg.push_frame(&frame("", "totalSupply", ""), &[]);
        agg.push_frame(&frame("", "decimals", ""), &[]);
        agg.push_frame(&frame("", "totalSupply", ""), &[]);
        let result = agg.finish();

        let names: Vec<_> = result
            .function_signatures
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, ["totalSupply()", "decimals()"]);
        assert_eq!(result.total_calls, 3);
    }

    #[test]
    fn empty_aggregate_is_valid() {
        let result = aggregate(Vec::new());
        assert_eq!(result, ResolutionResult::default());
    }
}
