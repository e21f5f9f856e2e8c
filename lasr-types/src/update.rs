//! Field mutations grouped per token or per program

use serde::{Deserialize, Serialize};

use crate::address::AddressOrNamespace;
use crate::error::{LasrError, Result};
use crate::fields::{ProgramField, ProgramFieldValue, TokenField, TokenFieldValue};

/// One mutation of one token field. The payload always matches the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTokenUpdateField")]
pub struct TokenUpdateField {
    field: TokenField,
    value: TokenFieldValue,
}

impl TokenUpdateField {
    pub fn new(field: TokenField, value: TokenFieldValue) -> Result<Self> {
        if value.field() != field {
            return Err(LasrError::FieldMismatch {
                field: field.to_string(),
                value: value.field().to_string(),
            });
        }
        Ok(Self { field, value })
    }

    pub fn field(&self) -> TokenField {
        self.field
    }

    pub fn value(&self) -> &TokenFieldValue {
        &self.value
    }
}

impl From<TokenFieldValue> for TokenUpdateField {
    fn from(value: TokenFieldValue) -> Self {
        Self {
            field: value.field(),
            value,
        }
    }
}

#[derive(Deserialize)]
struct RawTokenUpdateField {
    field: TokenField,
    value: TokenFieldValue,
}

impl TryFrom<RawTokenUpdateField> for TokenUpdateField {
    type Error = LasrError;

    fn try_from(raw: RawTokenUpdateField) -> Result<Self> {
        TokenUpdateField::new(raw.field, raw.value)
    }
}

/// One mutation of one program field. The payload always matches the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawProgramUpdateField")]
pub struct ProgramUpdateField {
    field: ProgramField,
    value: ProgramFieldValue,
}

impl ProgramUpdateField {
    pub fn new(field: ProgramField, value: ProgramFieldValue) -> Result<Self> {
        if value.field() != field {
            return Err(LasrError::FieldMismatch {
                field: field.to_string(),
                value: value.field().to_string(),
            });
        }
        Ok(Self { field, value })
    }

    pub fn field(&self) -> ProgramField {
        self.field
    }

    pub fn value(&self) -> &ProgramFieldValue {
        &self.value
    }
}

impl From<ProgramFieldValue> for ProgramUpdateField {
    fn from(value: ProgramFieldValue) -> Self {
        Self {
            field: value.field(),
            value,
        }
    }
}

#[derive(Deserialize)]
struct RawProgramUpdateField {
    field: ProgramField,
    value: ProgramFieldValue,
}

impl TryFrom<RawProgramUpdateField> for ProgramUpdateField {
    type Error = LasrError;

    fn try_from(raw: RawProgramUpdateField) -> Result<Self> {
        ProgramUpdateField::new(raw.field, raw.value)
    }
}

/// Ordered field mutations `caller` applies to `token`.
///
/// Entries are independent; the runtime folds them in order, so a later
/// entry for the same field does not replace an earlier one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUpdate {
    caller: AddressOrNamespace,
    token: AddressOrNamespace,
    updates: Vec<TokenUpdateField>,
}

impl TokenUpdate {
    pub fn new(
        caller: AddressOrNamespace,
        token: AddressOrNamespace,
        updates: Vec<TokenUpdateField>,
    ) -> Result<Self> {
        if updates.is_empty() {
            return Err(LasrError::incomplete("tokenUpdate", "updates"));
        }
        Ok(Self {
            caller,
            token,
            updates,
        })
    }

    pub fn caller(&self) -> &AddressOrNamespace {
        &self.caller
    }

    pub fn token(&self) -> &AddressOrNamespace {
        &self.token
    }

    pub fn updates(&self) -> &[TokenUpdateField] {
        &self.updates
    }
}

/// Ordered field mutations applied to `program`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramUpdate {
    program: AddressOrNamespace,
    updates: Vec<ProgramUpdateField>,
}

impl ProgramUpdate {
    pub fn new(program: AddressOrNamespace, updates: Vec<ProgramUpdateField>) -> Result<Self> {
        if updates.is_empty() {
            return Err(LasrError::incomplete("programUpdate", "updates"));
        }
        Ok(Self { program, updates })
    }

    pub fn program(&self) -> &AddressOrNamespace {
        &self.program
    }

    pub fn updates(&self) -> &[ProgramUpdateField] {
        &self.updates
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenOrProgramUpdate {
    TokenUpdate(TokenUpdate),
    ProgramUpdate(ProgramUpdate),
}

impl From<TokenUpdate> for TokenOrProgramUpdate {
    fn from(update: TokenUpdate) -> Self {
        TokenOrProgramUpdate::TokenUpdate(update)
    }
}

impl From<ProgramUpdate> for TokenOrProgramUpdate {
    fn from(update: ProgramUpdate) -> Self {
        TokenOrProgramUpdate::ProgramUpdate(update)
    }
}
