//! Shared types for Steem transactions

use crate::coerce::parse_float;
use crate::error::WasmSteemError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Raw operation payload: field name to whatever the producer supplied
pub type Payload = serde_json::Map<String, Value>;

/// Account-key tier required to authorize an operation
///
/// Ordered so that `Option<Authority>` reads as `none < posting < active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Authority {
    Posting,
    Active,
}

impl Authority {
    pub fn as_str(self) -> &'static str {
        match self {
            Authority::Posting => "posting",
            Authority::Active => "active",
        }
    }
}

/// Anything that carries an operation name
pub trait NamedOperation {
    fn name(&self) -> &str;
}

/// Raw operation, serialized as `[name, payload]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation(pub String, pub Payload);

impl Operation {
    pub fn new(name: impl Into<String>, payload: Payload) -> Self {
        Operation(name.into(), payload)
    }

    pub fn payload(&self) -> &Payload {
        &self.1
    }
}

impl NamedOperation for Operation {
    fn name(&self) -> &str {
        &self.0
    }
}

/// Operation whose payload has been coerced against its schema
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedOperation(pub String, pub IndexMap<String, FieldValue>);

impl ProcessedOperation {
    pub fn payload(&self) -> &IndexMap<String, FieldValue> {
        &self.1
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.1.get(field)
    }
}

impl NamedOperation for ProcessedOperation {
    fn name(&self) -> &str {
        &self.0
    }
}

/// A coerced field value
///
/// `Missing` and `NotANumber` stand in for JavaScript's `undefined` and `NaN`,
/// which have no JSON representation.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Missing,
    NotANumber,
    Value(Value),
}

impl FieldValue {
    pub fn from_raw(raw: Option<&Value>) -> Self {
        match raw {
            Some(v) => FieldValue::Value(v.clone()),
            None => FieldValue::Missing,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            FieldValue::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, FieldValue::NotANumber)
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        FieldValue::Value(value)
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Missing => serializer.serialize_none(),
            // serde_json writes this as null, serde-wasm-bindgen as NaN
            FieldValue::NotANumber => serializer.serialize_f64(f64::NAN),
            FieldValue::Value(v) => v.serialize(serializer),
        }
    }
}

/// Transaction body; everything besides `operations` is kept verbatim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction<O = Operation> {
    pub operations: Vec<O>,
    #[serde(flatten)]
    pub extra: Payload,
}

impl<O> Transaction<O> {
    pub fn new(operations: Vec<O>) -> Self {
        Transaction {
            operations,
            extra: Payload::new(),
        }
    }
}

/// Transaction plus request metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionEnvelope<O = Operation> {
    pub tx: Transaction<O>,
    #[serde(flatten)]
    pub extra: Payload,
}

/// Chain dynamic global properties needed to derive a conversion context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DynamicGlobalProperties {
    /// e.g. "186337470.139 STEEM"
    pub total_vesting_fund_steem: String,
    /// e.g. "378466197326.408327 VESTS"
    pub total_vesting_shares: String,
}

/// Monetary conversion context used by amount coercion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionContext {
    /// STEEM per VESTS; an SP amount divided by this gives VESTS
    #[serde(rename = "vestsToSP", alias = "vestsToSp")]
    pub vests_to_sp: f64,
}

impl ConversionContext {
    pub fn new(vests_to_sp: f64) -> Self {
        ConversionContext { vests_to_sp }
    }

    /// Derive the ratio as `total_vesting_fund_steem / total_vesting_shares`
    pub fn from_global_properties(
        props: &DynamicGlobalProperties,
    ) -> Result<ConversionContext, WasmSteemError> {
        let fund = parse_float(&props.total_vesting_fund_steem);
        let shares = parse_float(&props.total_vesting_shares);
        if !fund.is_finite() || !shares.is_finite() || shares == 0.0 {
            return Err(WasmSteemError::InvalidInput(format!(
                "Cannot derive vesting ratio from fund {:?} and shares {:?}",
                props.total_vesting_fund_steem, props.total_vesting_shares
            )));
        }
        Ok(ConversionContext::new(fund / shares))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_authority_order() {
        assert!(Authority::Posting < Authority::Active);
        assert!(None < Some(Authority::Posting));
    }

    #[test]
    fn test_operation_wire_shape() {
        let op: Operation = serde_json::from_value(json!(["vote", { "voter": "alice" }])).unwrap();
        assert_eq!(op.name(), "vote");
        assert_eq!(op.payload()["voter"], "alice");
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!(["vote", { "voter": "alice" }])
        );
    }

    #[test]
    fn test_envelope_keeps_unknown_fields() {
        let raw = json!({
            "tx": { "operations": [], "expiration": "__expiration" },
            "params": { "callback": "https://example.com" }
        });
        let envelope: TransactionEnvelope = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(envelope.tx.extra["expiration"], "__expiration");
        assert_eq!(serde_json::to_value(&envelope).unwrap(), raw);
    }

    #[test]
    fn test_field_value_serialization() {
        assert_eq!(serde_json::to_value(FieldValue::Missing).unwrap(), Value::Null);
        assert_eq!(serde_json::to_value(FieldValue::NotANumber).unwrap(), Value::Null);
        assert_eq!(
            serde_json::to_value(FieldValue::Value(json!(5))).unwrap(),
            json!(5)
        );
    }

    #[test]
    fn test_conversion_context_from_global_properties() {
        let props = DynamicGlobalProperties {
            total_vesting_fund_steem: "500.000 STEEM".to_string(),
            total_vesting_shares: "1000.000000 VESTS".to_string(),
        };
        let ctx = ConversionContext::from_global_properties(&props).unwrap();
        assert_eq!(ctx.vests_to_sp, 0.5);
    }

    #[test]
    fn test_conversion_context_wire_name() {
        let ctx: ConversionContext = serde_json::from_value(json!({ "vestsToSP": 0.25 })).unwrap();
        assert_eq!(ctx, ConversionContext::new(0.25));
        let legacy: ConversionContext = serde_json::from_value(json!({ "vestsToSp": 0.25 })).unwrap();
        assert_eq!(legacy, ctx);
        assert_eq!(serde_json::to_value(ctx).unwrap(), json!({ "vestsToSP": 0.25 }));
    }

    #[test]
    fn test_conversion_context_rejects_zero_shares() {
        let props = DynamicGlobalProperties {
            total_vesting_fund_steem: "500.000 STEEM".to_string(),
            total_vesting_shares: "0.000000 VESTS".to_string(),
        };
        assert!(ConversionContext::from_global_properties(&props).is_err());
    }
}
