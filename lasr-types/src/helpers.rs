//! Builders over loosely-typed parameters
//!
//! Programs receive field names, actions and values as strings; these helpers
//! validate them into the typed model.

use serde_json::Value;

use crate::address::{Address, AddressOrNamespace};
use crate::builders::TransferInstructionBuilder;
use crate::error::{LasrError, Result};
use crate::fields::{FieldAction, ProgramField, ProgramFieldValue, TokenField, TokenFieldValue};
use crate::instruction::Instruction;
use crate::numeric::{Amount, U256};
use crate::update::{ProgramUpdateField, TokenUpdateField};

/// Field payloads arrive as JSON text; anything that is not JSON is taken as
/// a bare string (e.g. a key to remove).
fn payload(value: &str) -> Value {
    serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()))
}

pub fn build_token_update_field(field: &str, action: &str, value: &str) -> Result<TokenUpdateField> {
    let field: TokenField = field.parse()?;
    let action: FieldAction = action.parse()?;
    let value = TokenFieldValue::from_json(field, action, &payload(value))?;
    TokenUpdateField::new(field, value)
}

pub fn build_program_update_field(
    field: &str,
    action: &str,
    value: &str,
) -> Result<ProgramUpdateField> {
    let field: ProgramField = field.parse()?;
    let action: FieldAction = action.parse()?;
    let value = ProgramFieldValue::from_json(field, action, &payload(value))?;
    ProgramUpdateField::new(field, value)
}

/// A purchase of `minted_token` paid for in `payment_token`.
#[derive(Debug, Clone)]
pub struct MintRequest {
    pub caller: Address,
    pub minted_token: Address,
    pub payment_token: Address,
    pub payment_value: U256,
    /// Payment units per minted unit.
    pub conversion_rate: U256,
}

/// Returns `[proceeds-out, payment-in]`.
///
/// Proceeds are `payment_value / conversion_rate`, floored.
pub fn build_mint_instructions(request: MintRequest) -> Result<Vec<Instruction>> {
    if request.conversion_rate.is_zero() {
        return Err(LasrError::InvalidAmount(
            "conversion rate must be non-zero".to_string(),
        ));
    }
    let proceeds = request.payment_value / request.conversion_rate;

    let proceeds_out = TransferInstructionBuilder::new()
        .transfer_from(AddressOrNamespace::this())
        .transfer_to(request.caller.clone())
        .amount(Amount::new(proceeds))
        .token_address(request.minted_token)
        .build()?;

    let payment_in = TransferInstructionBuilder::new()
        .transfer_from(request.caller)
        .transfer_to(AddressOrNamespace::this())
        .amount(Amount::new(request.payment_value))
        .token_address(request.payment_token)
        .build()?;

    Ok(vec![proceeds_out, payment_in])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{ApprovalsValue, MapUpdate, StatusValue};

    #[test]
    fn test_build_token_update_field() {
        let field =
            build_token_update_field("metadata", "extend", r#"{"symbol":"SNK","name":"Snake"}"#)
                .unwrap();
        assert_eq!(field.field(), TokenField::Metadata);
        assert!(matches!(
            field.value(),
            TokenFieldValue::Metadata(MapUpdate::Extend(map)) if map.len() == 2
        ));

        let field = build_token_update_field("approvals", "remove", "0xb").unwrap();
        assert_eq!(
            field.value(),
            &TokenFieldValue::Approvals(ApprovalsValue::Remove(Address::new("0xb").unwrap()))
        );
    }

    #[test]
    fn test_build_program_update_field() {
        let field = build_program_update_field("status", "lock", "").unwrap();
        assert_eq!(field.value(), &ProgramFieldValue::Status(StatusValue::Lock));

        let field =
            build_program_update_field("linkedPrograms", "extend", r#"["0x1","0x2"]"#).unwrap();
        assert_eq!(field.field(), ProgramField::LinkedPrograms);
    }

    #[test]
    fn test_loose_builders_reject_bad_names() {
        assert!(matches!(
            build_token_update_field("owner", "extend", "{}"),
            Err(LasrError::UnknownField(_))
        ));
        assert!(matches!(
            build_token_update_field("metadata", "append", "{}"),
            Err(LasrError::InvalidInputs(_))
        ));
        assert!(matches!(
            build_program_update_field("metadata", "lock", "{}"),
            Err(LasrError::UnsupportedAction { .. })
        ));
    }

    #[test]
    fn test_mint_floors_and_orders_transfers() {
        let instructions = build_mint_instructions(MintRequest {
            caller: Address::new("0xa").unwrap(),
            minted_token: Address::new("0xf").unwrap(),
            payment_token: Address::new("0xe").unwrap(),
            payment_value: U256::from(101u64),
            conversion_rate: U256::from(2u64),
        })
        .unwrap();

        let amounts: Vec<_> = instructions
            .iter()
            .map(|i| match i {
                Instruction::Transfer(t) => t.amount().value(),
                other => panic!("unexpected {}", other.kind()),
            })
            .collect();
        assert_eq!(amounts, vec![U256::from(50u64), U256::from(101u64)]);
    }

    #[test]
    fn test_mint_rejects_zero_rate() {
        let result = build_mint_instructions(MintRequest {
            caller: Address::new("0xa").unwrap(),
            minted_token: Address::this(),
            payment_token: Address::new("0xe").unwrap(),
            payment_value: U256::from(1u64),
            conversion_rate: U256::ZERO,
        });
        assert!(matches!(result, Err(LasrError::InvalidAmount(_))));
    }
}
