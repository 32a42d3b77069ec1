//! Tagged call envelope.
//!
//! `RegistryCall` names one public operation with its arguments;
//! `CallOutcome` is its result as a tagged value, either
//! `{ "value": .. }` or `{ "error": code }`. Both are CBOR-encodable so a
//! transport can carry them without knowing the registry types.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

use crate::{
    env::HeightOracle,
    error::{ErrorCode, RegistryError},
    registry::RegistryService,
    store::MaisonStore,
    types::{AccountKey, Maison},
};

/// Upper bound on encoded envelope size, enforced by both `encode` and
/// `decode`.
pub const MAX_ENCODED_SIZE: usize = 64 * 1024;

/// Errors from envelope encoding/decoding.
#[derive(Debug, Error)]
pub enum CodecError {
    /// CBOR serialization failed.
    #[error("CBOR encode failed: {0}")]
    Encode(String),

    /// CBOR deserialization failed.
    #[error("CBOR decode failed: {0}")]
    Decode(String),

    /// Envelope larger than `MAX_ENCODED_SIZE`.
    #[error("envelope too large: {size} bytes (max {max})")]
    TooLarge {
        /// Actual envelope size.
        size: usize,
        /// Maximum accepted size.
        max: usize,
    },
}

/// One public registry operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum RegistryCall {
    /// Register a maison for `caller`.
    RegisterMaison {
        /// Owner of the new record.
        caller: AccountKey,
        /// Display name.
        name: String,
        /// Content identifier.
        cid: String,
    },

    /// Replace `caller`'s record.
    UpdateMaison {
        /// Owner of the record.
        caller: AccountKey,
        /// New display name.
        name: String,
        /// New content identifier.
        cid: String,
    },

    /// Reject `target`'s record.
    RejectMaison {
        /// Must be the admin.
        caller: AccountKey,
        /// Record to reject.
        target: AccountKey,
    },

    /// Hand admin rights to `new_admin`.
    TransferAdmin {
        /// Must be the admin.
        caller: AccountKey,
        /// Next admin.
        new_admin: AccountKey,
    },

    /// Query active status.
    IsRegistered {
        /// Account to query.
        account: AccountKey,
    },

    /// Query rejected status.
    IsRejected {
        /// Account to query.
        account: AccountKey,
    },

    /// Fetch a record.
    GetMaison {
        /// Account to query.
        account: AccountKey,
    },
}

impl RegistryCall {
    /// Operation name as it appears in the external interface.
    pub fn name(&self) -> &'static str {
        match self {
            Self::RegisterMaison { .. } => "register-maison",
            Self::UpdateMaison { .. } => "update-maison",
            Self::RejectMaison { .. } => "reject-maison",
            Self::TransferAdmin { .. } => "transfer-admin",
            Self::IsRegistered { .. } => "is-registered",
            Self::IsRejected { .. } => "is-rejected",
            Self::GetMaison { .. } => "get-maison",
        }
    }

    /// Whether the call can change registry state.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Self::RegisterMaison { .. }
                | Self::UpdateMaison { .. }
                | Self::RejectMaison { .. }
                | Self::TransferAdmin { .. }
        )
    }

    /// Encode as CBOR.
    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        encode_cbor(self)
    }

    /// Decode from CBOR.
    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        decode_cbor(bytes)
    }
}

/// Success payload of a call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CallValue {
    /// Boolean result. Mutations report `true`.
    Bool(bool),
    /// Record returned by `GetMaison`.
    Maison(Maison),
}

/// Tagged result of a call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallOutcome {
    /// Call succeeded.
    Value(CallValue),
    /// Call failed with a stable code.
    Error(ErrorCode),
}

impl CallOutcome {
    /// Outcome of a successful mutation.
    pub fn ok() -> Self {
        Self::Value(CallValue::Bool(true))
    }

    /// Check if the call succeeded.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// Error code, if the call failed.
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            Self::Value(_) => None,
            Self::Error(code) => Some(*code),
        }
    }

    /// Encode as CBOR.
    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        encode_cbor(self)
    }

    /// Decode from CBOR.
    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        decode_cbor(bytes)
    }
}

impl From<Result<(), RegistryError>> for CallOutcome {
    fn from(result: Result<(), RegistryError>) -> Self {
        match result {
            Ok(()) => Self::ok(),
            Err(err) => Self::Error(err.code()),
        }
    }
}

impl std::fmt::Display for CallOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(CallValue::Bool(b)) => write!(f, "value {b}"),
            Self::Value(CallValue::Maison(m)) => write!(
                f,
                "value {{name: {:?}, cid: {:?}, registered: {}, rejected: {}, updated_at: {}}}",
                m.name, m.cid, m.registered, m.rejected, m.updated_at
            ),
            Self::Error(code) => write!(f, "error {}", code.as_u16()),
        }
    }
}

impl<H, S> RegistryService<H, S>
where
    H: HeightOracle,
    S: MaisonStore,
{
    /// Execute one call and report its outcome as a tagged value.
    pub fn dispatch(&mut self, call: RegistryCall) -> CallOutcome {
        match call {
            RegistryCall::RegisterMaison { caller, name, cid } => {
                self.register_maison(&caller, name, cid).into()
            },
            RegistryCall::UpdateMaison { caller, name, cid } => {
                self.update_maison(&caller, name, cid).into()
            },
            RegistryCall::RejectMaison { caller, target } => {
                self.reject_maison(&caller, &target).into()
            },
            RegistryCall::TransferAdmin { caller, new_admin } => {
                self.transfer_admin(&caller, new_admin).into()
            },
            RegistryCall::IsRegistered { account } => {
                CallOutcome::Value(CallValue::Bool(self.is_registered(&account)))
            },
            RegistryCall::IsRejected { account } => {
                CallOutcome::Value(CallValue::Bool(self.is_rejected(&account)))
            },
            RegistryCall::GetMaison { account } => match self.get_maison(&account) {
                Ok(maison) => CallOutcome::Value(CallValue::Maison(maison)),
                Err(err) => CallOutcome::Error(err.code()),
            },
        }
    }
}

fn encode_cbor<T: Serialize>(value: &T) -> Result<Vec<u8>, CodecError> {
    let mut buf = Vec::new();
    ciborium::ser::into_writer(value, &mut buf).map_err(|e| CodecError::Encode(e.to_string()))?;
    if buf.len() > MAX_ENCODED_SIZE {
        return Err(CodecError::TooLarge { size: buf.len(), max: MAX_ENCODED_SIZE });
    }
    Ok(buf)
}

fn decode_cbor<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    if bytes.len() > MAX_ENCODED_SIZE {
        return Err(CodecError::TooLarge { size: bytes.len(), max: MAX_ENCODED_SIZE });
    }
    ciborium::de::from_reader(bytes).map_err(|e| CodecError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::env::FixedHeight;

    fn registry() -> RegistryService<FixedHeight> {
        RegistryService::with_admin("ST1ADMIN", FixedHeight(1234))
    }

    fn register(caller: &str, name: &str, cid: &str) -> RegistryCall {
        RegistryCall::RegisterMaison {
            caller: caller.into(),
            name: name.to_string(),
            cid: cid.to_string(),
        }
    }

    #[test]
    fn dispatch_reports_codes() {
        let mut registry = registry();

        assert_eq!(registry.dispatch(register("U1", "Maison X", "Qm1")), CallOutcome::ok());
        assert_eq!(
            registry.dispatch(register("U1", "Maison Y", "Qm2")),
            CallOutcome::Error(ErrorCode::AlreadyRegistered)
        );
        assert_eq!(
            registry.dispatch(RegistryCall::RejectMaison {
                caller: "U1".into(),
                target: "U1".into()
            }),
            CallOutcome::Error(ErrorCode::Unauthorized)
        );
        assert_eq!(
            registry.dispatch(RegistryCall::GetMaison { account: "U2".into() }),
            CallOutcome::Error(ErrorCode::NotFound)
        );
    }

    #[test]
    fn dispatch_returns_records_and_flags() {
        let mut registry = registry();
        registry.dispatch(register("U1", "Maison X", "Qm1"));

        assert_eq!(
            registry.dispatch(RegistryCall::GetMaison { account: "U1".into() }),
            CallOutcome::Value(CallValue::Maison(Maison::active("Maison X", "Qm1", 1234)))
        );
        assert_eq!(
            registry.dispatch(RegistryCall::IsRegistered { account: "U1".into() }),
            CallOutcome::Value(CallValue::Bool(true))
        );
        assert_eq!(
            registry.dispatch(RegistryCall::IsRejected { account: "U1".into() }),
            CallOutcome::Value(CallValue::Bool(false))
        );
    }

    #[test]
    fn error_outcome_carries_numeric_code() {
        let outcome = CallOutcome::Error(ErrorCode::Rejected);
        let decoded: ciborium::Value =
            ciborium::de::from_reader(outcome.encode().unwrap().as_slice()).unwrap();

        let map = decoded.as_map().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map[0].0.as_text(), Some("error"));
        assert_eq!(map[0].1.as_integer(), Some(ciborium::value::Integer::from(103u16)));
    }

    #[test]
    fn call_survives_encoding() {
        let call = RegistryCall::UpdateMaison {
            caller: "ST2USER".into(),
            name: "Maison d'Avant".to_string(),
            cid: "Qm123abc".to_string(),
        };

        let bytes = call.encode().unwrap();
        assert_eq!(RegistryCall::decode(&bytes).unwrap(), call);
    }

    #[test]
    fn maison_outcome_survives_encoding() {
        let outcome = CallOutcome::Value(CallValue::Maison(
            Maison::active("Maison X", "Qm1", 5).into_rejected(6),
        ));

        let bytes = outcome.encode().unwrap();
        assert_eq!(CallOutcome::decode(&bytes).unwrap(), outcome);
    }

    #[test]
    fn oversized_input_is_refused() {
        let bytes = vec![0u8; MAX_ENCODED_SIZE + 1];

        assert!(matches!(RegistryCall::decode(&bytes), Err(CodecError::TooLarge { .. })));
    }

    #[test]
    fn oversized_call_is_refused_on_encode() {
        let call = register("U1", &"x".repeat(MAX_ENCODED_SIZE), "Qm1");

        let err = call.encode().unwrap_err();

        let CodecError::TooLarge { size, max } = err else {
            panic!("expected TooLarge, got {err}");
        };
        assert_eq!(max, MAX_ENCODED_SIZE);
        assert!(size > max);
    }

    #[test]
    fn largest_encodable_call_decodes() {
        let overhead = register("U1", "", "Qm1").encode().unwrap().len();
        // Text header grows from 1 to 3 bytes once the name needs a u16 length.
        let call = register("U1", &"x".repeat(MAX_ENCODED_SIZE - overhead - 2), "Qm1");

        let bytes = call.encode().unwrap();

        assert_eq!(bytes.len(), MAX_ENCODED_SIZE);
        assert_eq!(RegistryCall::decode(&bytes).unwrap(), call);
    }

    #[test]
    fn unknown_error_code_is_refused() {
        let mut buf = Vec::new();
        ciborium::ser::into_writer(
            &ciborium::Value::Map(vec![(
                ciborium::Value::Text("error".into()),
                ciborium::Value::Integer(999.into()),
            )]),
            &mut buf,
        )
        .unwrap();

        assert!(matches!(CallOutcome::decode(&buf), Err(CodecError::Decode(_))));
    }

    proptest! {
        #[test]
        fn decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
            let _ = RegistryCall::decode(&bytes);
            let _ = CallOutcome::decode(&bytes);
        }
    }
}
