//! Mutable token/program fields and the typed payloads each action carries

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::address::Address;
use crate::error::{LasrError, Result};
use crate::numeric::Amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenField {
    Metadata,
    Approvals,
    Data,
    Status,
}

impl TokenField {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenField::Metadata => "metadata",
            TokenField::Approvals => "approvals",
            TokenField::Data => "data",
            TokenField::Status => "status",
        }
    }
}

impl FromStr for TokenField {
    type Err = LasrError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "metadata" => Ok(TokenField::Metadata),
            "approvals" => Ok(TokenField::Approvals),
            "data" => Ok(TokenField::Data),
            "status" => Ok(TokenField::Status),
            other => Err(LasrError::UnknownField(other.to_string())),
        }
    }
}

impl fmt::Display for TokenField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProgramField {
    Metadata,
    Data,
    LinkedPrograms,
    Status,
}

impl ProgramField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgramField::Metadata => "metadata",
            ProgramField::Data => "data",
            ProgramField::LinkedPrograms => "linkedPrograms",
            ProgramField::Status => "status",
        }
    }
}

impl FromStr for ProgramField {
    type Err = LasrError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "metadata" => Ok(ProgramField::Metadata),
            "data" => Ok(ProgramField::Data),
            "linkedPrograms" => Ok(ProgramField::LinkedPrograms),
            "status" => Ok(ProgramField::Status),
            other => Err(LasrError::UnknownField(other.to_string())),
        }
    }
}

impl fmt::Display for ProgramField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Update verb. Which verbs apply depends on the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldAction {
    Extend,
    Insert,
    Remove,
    Lock,
    Unlock,
}

impl FieldAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldAction::Extend => "extend",
            FieldAction::Insert => "insert",
            FieldAction::Remove => "remove",
            FieldAction::Lock => "lock",
            FieldAction::Unlock => "unlock",
        }
    }
}

impl FromStr for FieldAction {
    type Err = LasrError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "extend" => Ok(FieldAction::Extend),
            "insert" => Ok(FieldAction::Insert),
            "remove" => Ok(FieldAction::Remove),
            "lock" => Ok(FieldAction::Lock),
            "unlock" => Ok(FieldAction::Unlock),
            other => Err(LasrError::InvalidInputs(format!(
                "unknown field action '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for FieldAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn unsupported(field: &str, action: FieldAction) -> LasrError {
    LasrError::UnsupportedAction {
        field: field.to_string(),
        action: action.to_string(),
    }
}

/// Key/value payload shared by the `metadata` and `data` fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MapUpdate {
    Extend(BTreeMap<String, String>),
    Insert(String, String),
    Remove(String),
}

impl MapUpdate {
    pub fn action(&self) -> FieldAction {
        match self {
            MapUpdate::Extend(_) => FieldAction::Extend,
            MapUpdate::Insert(..) => FieldAction::Insert,
            MapUpdate::Remove(_) => FieldAction::Remove,
        }
    }

    /// Build from a JSON payload: an object for `extend`, a single-entry
    /// object for `insert`, a key string for `remove`.
    pub fn from_json(field: &str, action: FieldAction, value: &Value) -> Result<Self> {
        match action {
            FieldAction::Extend => Ok(MapUpdate::Extend(string_map(field, value)?)),
            FieldAction::Insert => {
                let mut entries = string_map(field, value)?.into_iter();
                match (entries.next(), entries.next()) {
                    (Some((key, val)), None) => Ok(MapUpdate::Insert(key, val)),
                    _ => Err(LasrError::InvalidInputs(format!(
                        "{} insert expects exactly one key",
                        field
                    ))),
                }
            }
            FieldAction::Remove => match value {
                Value::String(key) => Ok(MapUpdate::Remove(key.clone())),
                _ => Err(LasrError::InvalidInputs(format!(
                    "{} remove expects a key string",
                    field
                ))),
            },
            other => Err(unsupported(field, other)),
        }
    }
}

/// Flatten a JSON object into string values; non-string values keep their
/// JSON text.
pub fn string_map(field: &str, value: &Value) -> Result<BTreeMap<String, String>> {
    let object = value.as_object().ok_or_else(|| {
        LasrError::InvalidInputs(format!("{} payload must be a JSON object", field))
    })?;
    Ok(object
        .iter()
        .map(|(key, val)| {
            let text = match val {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), text)
        })
        .collect())
}

/// Permission for `address` to move up to `amount` of the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalGrant {
    pub address: Address,
    pub amount: Amount,
}

#[derive(Deserialize)]
struct RawApprovalGrant {
    address: Address,
    amount: Value,
}

impl ApprovalGrant {
    pub fn new(address: Address, amount: Amount) -> Self {
        Self { address, amount }
    }

    /// Parse `{"address": "0x..", "amount": "<verse>"}` as sent by a caller.
    pub fn from_json(value: &Value) -> Result<Self> {
        let raw: RawApprovalGrant = serde_json::from_value(value.clone())?;
        Ok(Self {
            address: raw.address,
            amount: Amount::from_verse(&raw.amount)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ApprovalsValue {
    Extend(Vec<ApprovalGrant>),
    Insert(ApprovalGrant),
    Remove(Address),
}

impl ApprovalsValue {
    pub fn action(&self) -> FieldAction {
        match self {
            ApprovalsValue::Extend(_) => FieldAction::Extend,
            ApprovalsValue::Insert(_) => FieldAction::Insert,
            ApprovalsValue::Remove(_) => FieldAction::Remove,
        }
    }

    /// `extend` accepts a single grant object or an array of them.
    pub fn from_json(action: FieldAction, value: &Value) -> Result<Self> {
        match action {
            FieldAction::Extend => {
                let grants = match value {
                    Value::Array(items) => items
                        .iter()
                        .map(ApprovalGrant::from_json)
                        .collect::<Result<Vec<_>>>()?,
                    single => vec![ApprovalGrant::from_json(single)?],
                };
                Ok(ApprovalsValue::Extend(grants))
            }
            FieldAction::Insert => Ok(ApprovalsValue::Insert(ApprovalGrant::from_json(value)?)),
            FieldAction::Remove => Ok(ApprovalsValue::Remove(address_from_json(value)?)),
            other => Err(unsupported(TokenField::Approvals.as_str(), other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LinkedProgramsValue {
    Extend(Vec<Address>),
    Insert(Address),
    Remove(Address),
}

impl LinkedProgramsValue {
    pub fn action(&self) -> FieldAction {
        match self {
            LinkedProgramsValue::Extend(_) => FieldAction::Extend,
            LinkedProgramsValue::Insert(_) => FieldAction::Insert,
            LinkedProgramsValue::Remove(_) => FieldAction::Remove,
        }
    }

    pub fn from_json(action: FieldAction, value: &Value) -> Result<Self> {
        match action {
            FieldAction::Extend => {
                let items = value.as_array().ok_or_else(|| {
                    LasrError::InvalidInputs("linkedPrograms extend expects an array".to_string())
                })?;
                let addresses = items
                    .iter()
                    .map(address_from_json)
                    .collect::<Result<Vec<_>>>()?;
                Ok(LinkedProgramsValue::Extend(addresses))
            }
            FieldAction::Insert => Ok(LinkedProgramsValue::Insert(address_from_json(value)?)),
            FieldAction::Remove => Ok(LinkedProgramsValue::Remove(address_from_json(value)?)),
            other => Err(unsupported(ProgramField::LinkedPrograms.as_str(), other)),
        }
    }
}

fn address_from_json(value: &Value) -> Result<Address> {
    match value {
        Value::String(raw) => Address::new(raw),
        other => Err(LasrError::InvalidAddress(other.to_string())),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusValue {
    Lock,
    Unlock,
}

impl StatusValue {
    pub fn action(&self) -> FieldAction {
        match self {
            StatusValue::Lock => FieldAction::Lock,
            StatusValue::Unlock => FieldAction::Unlock,
        }
    }

    pub fn from_action(field: &str, action: FieldAction) -> Result<Self> {
        match action {
            FieldAction::Lock => Ok(StatusValue::Lock),
            FieldAction::Unlock => Ok(StatusValue::Unlock),
            other => Err(unsupported(field, other)),
        }
    }
}

/// A token field payload. The variant names the field it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenFieldValue {
    Metadata(MapUpdate),
    Approvals(ApprovalsValue),
    Data(MapUpdate),
    Status(StatusValue),
}

impl TokenFieldValue {
    pub fn field(&self) -> TokenField {
        match self {
            TokenFieldValue::Metadata(_) => TokenField::Metadata,
            TokenFieldValue::Approvals(_) => TokenField::Approvals,
            TokenFieldValue::Data(_) => TokenField::Data,
            TokenFieldValue::Status(_) => TokenField::Status,
        }
    }

    pub fn action(&self) -> FieldAction {
        match self {
            TokenFieldValue::Metadata(v) | TokenFieldValue::Data(v) => v.action(),
            TokenFieldValue::Approvals(v) => v.action(),
            TokenFieldValue::Status(v) => v.action(),
        }
    }

    pub fn from_json(field: TokenField, action: FieldAction, value: &Value) -> Result<Self> {
        let name = field.as_str();
        Ok(match field {
            TokenField::Metadata => TokenFieldValue::Metadata(MapUpdate::from_json(name, action, value)?),
            TokenField::Data => TokenFieldValue::Data(MapUpdate::from_json(name, action, value)?),
            TokenField::Approvals => {
                TokenFieldValue::Approvals(ApprovalsValue::from_json(action, value)?)
            }
            TokenField::Status => TokenFieldValue::Status(StatusValue::from_action(name, action)?),
        })
    }
}

/// A program field payload. The variant names the field it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProgramFieldValue {
    Metadata(MapUpdate),
    Data(MapUpdate),
    LinkedPrograms(LinkedProgramsValue),
    Status(StatusValue),
}

impl ProgramFieldValue {
    pub fn field(&self) -> ProgramField {
        match self {
            ProgramFieldValue::Metadata(_) => ProgramField::Metadata,
            ProgramFieldValue::Data(_) => ProgramField::Data,
            ProgramFieldValue::LinkedPrograms(_) => ProgramField::LinkedPrograms,
            ProgramFieldValue::Status(_) => ProgramField::Status,
        }
    }

    pub fn action(&self) -> FieldAction {
        match self {
            ProgramFieldValue::Metadata(v) | ProgramFieldValue::Data(v) => v.action(),
            ProgramFieldValue::LinkedPrograms(v) => v.action(),
            ProgramFieldValue::Status(v) => v.action(),
        }
    }

    pub fn from_json(field: ProgramField, action: FieldAction, value: &Value) -> Result<Self> {
        let name = field.as_str();
        Ok(match field {
            ProgramField::Metadata => {
                ProgramFieldValue::Metadata(MapUpdate::from_json(name, action, value)?)
            }
            ProgramField::Data => ProgramFieldValue::Data(MapUpdate::from_json(name, action, value)?),
            ProgramField::LinkedPrograms => {
                ProgramFieldValue::LinkedPrograms(LinkedProgramsValue::from_json(action, value)?)
            }
            ProgramField::Status => {
                ProgramFieldValue::Status(StatusValue::from_action(name, action)?)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_names_round_trip() {
        for name in ["metadata", "approvals", "data", "status"] {
            assert_eq!(name.parse::<TokenField>().unwrap().as_str(), name);
        }
        assert_eq!(
            "linkedPrograms".parse::<ProgramField>().unwrap(),
            ProgramField::LinkedPrograms
        );
        assert!(matches!(
            "balance".parse::<TokenField>(),
            Err(LasrError::UnknownField(_))
        ));
    }

    #[test]
    fn test_metadata_extend_stringifies_values() {
        let value = TokenFieldValue::from_json(
            TokenField::Metadata,
            FieldAction::Extend,
            &json!({ "symbol": "SNK", "decimals": 18 }),
        )
        .unwrap();
        let TokenFieldValue::Metadata(MapUpdate::Extend(map)) = value else {
            panic!("expected metadata extend");
        };
        assert_eq!(map.get("symbol").map(String::as_str), Some("SNK"));
        assert_eq!(map.get("decimals").map(String::as_str), Some("18"));
    }

    #[test]
    fn test_unsupported_pairs_are_rejected() {
        let err = TokenFieldValue::from_json(TokenField::Status, FieldAction::Extend, &json!({}))
            .unwrap_err();
        assert_eq!(
            err,
            LasrError::UnsupportedAction {
                field: "status".to_string(),
                action: "extend".to_string()
            }
        );
        assert!(
            TokenFieldValue::from_json(TokenField::Approvals, FieldAction::Lock, &json!(null))
                .is_err()
        );
    }

    #[test]
    fn test_approvals_accept_single_or_many() {
        let single = ApprovalsValue::from_json(
            FieldAction::Extend,
            &json!({ "address": "0xB", "amount": "50" }),
        )
        .unwrap();
        let many = ApprovalsValue::from_json(
            FieldAction::Extend,
            &json!([{ "address": "0xB", "amount": "50" }]),
        )
        .unwrap();
        assert_eq!(single, many);
    }

    #[test]
    fn test_field_value_wire_shape() {
        let value = TokenFieldValue::Status(StatusValue::Lock);
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!({ "status": "lock" })
        );

        let value = ProgramFieldValue::Data(MapUpdate::Remove("score".to_string()));
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!({ "data": { "remove": "score" } })
        );
    }
}
