//! Call context supplied by the host runtime

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::address::Address;
use crate::error::{LasrError, Result};
use crate::numeric::{parse_base_units, U256};

/// Everything the host hands a program for one call.
///
/// Read-only to programs. Keys this crate does not model are kept in `extra`
/// so the echo in [`crate::Outputs`] is faithful.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeInputs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_info: Option<Value>,
    pub transaction: Transaction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub op: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<Value>,
    pub from: Address,
    pub to: Address,
    pub program_id: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub op: Option<String>,
    /// Method parameters, usually an embedded JSON string.
    #[serde(default, alias = "inputs", skip_serializing_if = "Option::is_none")]
    pub transaction_inputs: Option<Value>,
    /// Attached value in the smallest sub-unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Transaction {
    pub fn value(&self) -> Result<U256> {
        parse_base_units(self.value.as_ref())
    }
}

impl ComputeInputs {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Operation name: the top-level `op`, else the transaction's.
    pub fn op(&self) -> Result<&str> {
        self.op
            .as_deref()
            .or(self.transaction.op.as_deref())
            .filter(|op| !op.is_empty())
            .ok_or_else(|| LasrError::InvalidInputs("call does not name an op".to_string()))
    }

    /// Method parameters: `transaction.transactionInputs`, else the top-level
    /// `inputs`. Embedded JSON strings are decoded.
    pub fn payload(&self) -> Result<Value> {
        self.try_payload()?
            .ok_or_else(|| LasrError::InvalidInputs("call carries no inputs".to_string()))
    }

    /// Like [`ComputeInputs::payload`], but `None` when the call carries no
    /// inputs at all.
    pub fn try_payload(&self) -> Result<Option<Value>> {
        let raw = match self
            .transaction
            .transaction_inputs
            .as_ref()
            .or(self.inputs.as_ref())
        {
            None | Some(Value::Null) => return Ok(None),
            Some(raw) => raw,
        };

        match raw {
            Value::String(text) => Ok(Some(serde_json::from_str(text)?)),
            Value::Object(_) => Ok(Some(raw.clone())),
            other => Err(LasrError::InvalidInputs(format!(
                "inputs must be a JSON object or an embedded JSON string, got {}",
                other
            ))),
        }
    }

    pub fn payload_as<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.payload()?)?)
    }
}
