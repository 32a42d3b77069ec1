//! Fuzz target for CBOR envelope decoding
//!
//! # Invariants
//!
//! - Decoding arbitrary bytes NEVER panics
//! - Any envelope that decodes and re-encodes within the size cap decodes to
//!   the same value (positional CBOR input may grow when re-encoded as a map)
//! - Decoded calls dispatch without panicking

#![no_main]

use libfuzzer_sys::fuzz_target;
use maison_core::{CallOutcome, CodecError, FixedHeight, RegistryCall, RegistryService};

fuzz_target!(|data: &[u8]| {
    if let Ok(call) = RegistryCall::decode(data) {
        match call.encode() {
            Ok(bytes) => assert_eq!(RegistryCall::decode(&bytes).ok(), Some(call.clone())),
            Err(CodecError::TooLarge { .. }) => {},
            Err(e) => panic!("decoded call failed to re-encode: {e}"),
        }

        let mut registry = RegistryService::with_admin("ST1ADMIN", FixedHeight(0));
        let _ = registry.dispatch(call);
    }

    if let Ok(outcome) = CallOutcome::decode(data) {
        match outcome.encode() {
            Ok(bytes) => assert_eq!(CallOutcome::decode(&bytes).ok(), Some(outcome)),
            Err(CodecError::TooLarge { .. }) => {},
            Err(e) => panic!("decoded outcome failed to re-encode: {e}"),
        }
    }
});
