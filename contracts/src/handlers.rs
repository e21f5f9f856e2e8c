//! Method handlers shared by the reference programs
//!
//! Every handler validates the whole call before building anything, so a
//! failure never yields a partial instruction list.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use lasr_types::{
    build_mint_instructions, string_map, Address, AddressOrNamespace, Amount, ApprovalsValue,
    BurnInstructionBuilder, ComputeInputs, CreateInstructionBuilder, FieldAction, LasrError,
    MapUpdate, MintRequest, Outputs, ProgramFieldValue, ProgramUpdateBuilder,
    ProgramUpdateField, Result, TokenDistributionBuilder, TokenFieldValue, TokenUpdateBuilder,
    TokenUpdateField, Transaction, UpdateInstructionBuilder, U256,
};

/// Where a handler takes a token address from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    /// The executing program itself (`this`).
    This,
    /// `transaction.programId`
    ProgramId,
    /// `transaction.to`
    Recipient,
    Fixed(Address),
}

impl TokenSource {
    pub fn resolve(&self, transaction: &Transaction) -> Address {
        match self {
            TokenSource::This => Address::this(),
            TokenSource::ProgramId => transaction.program_id.clone(),
            TokenSource::Recipient => transaction.to.clone(),
            TokenSource::Fixed(address) => address.clone(),
        }
    }
}

/// How `mint` prices the minted token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintPolicy {
    pub payment_token: TokenSource,
    pub minted_token: TokenSource,
    /// Payment units per minted unit; proceeds are floored.
    pub conversion_rate: U256,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatePayload {
    #[serde(default)]
    total_supply: Option<Value>,
    #[serde(default)]
    initialized_supply: Option<Value>,
    #[serde(default)]
    to: Option<Value>,
    #[serde(default)]
    symbol: Option<Value>,
    #[serde(default)]
    name: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct UpdatePayload {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    metadata: Option<Value>,
}

fn is_negative(value: &Value) -> bool {
    match value {
        Value::String(text) => text.trim_start().starts_with('-'),
        Value::Number(n) => n.as_f64().is_some_and(|v| v < 0.0),
        _ => false,
    }
}

/// Missing, zero or negative supplies are `InvalidSupply`; anything that is
/// not a number at all is `InvalidAmount`.
fn required_supply(field: &str, value: Option<&Value>) -> Result<Amount> {
    let value = match value {
        None | Some(Value::Null) => {
            return Err(LasrError::InvalidSupply(format!("{} is missing", field)))
        }
        Some(value) => value,
    };
    if is_negative(value) {
        return Err(LasrError::InvalidSupply(format!("{} must be positive", field)));
    }
    let amount = Amount::from_verse(value)?;
    if amount.is_zero() {
        return Err(LasrError::InvalidSupply(format!("{} must be positive", field)));
    }
    Ok(amount)
}

fn required_text<'a>(field: &str, value: Option<&'a Value>) -> Result<&'a str> {
    match value {
        Some(Value::String(text)) if !text.trim().is_empty() => Ok(text.trim()),
        Some(Value::String(_)) | None | Some(Value::Null) => {
            Err(LasrError::InvalidMetadata(format!("{} is missing", field)))
        }
        Some(other) => Err(LasrError::InvalidMetadata(format!(
            "{} must be a string, got {}",
            field, other
        ))),
    }
}

fn optional_address(value: Option<&Value>) -> Result<Option<Address>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(raw)) => Address::new(raw).map(Some),
        Some(other) => Err(LasrError::InvalidAddress(other.to_string())),
    }
}

fn token_metadata(metadata: BTreeMap<String, String>) -> TokenUpdateField {
    TokenUpdateField::from(TokenFieldValue::Metadata(MapUpdate::Extend(metadata)))
}

fn base_metadata(symbol: &str, name: &str, total_supply: Amount) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("symbol".to_string(), symbol.to_string()),
        ("name".to_string(), name.to_string()),
        ("totalSupply".to_string(), total_supply.to_hex()),
    ])
}

/// Register the program and distribute `initializedSupply` to `to` (default:
/// the caller), then write the program's metadata.
pub fn create(inputs: &ComputeInputs) -> Result<Outputs> {
    let transaction = &inputs.transaction;
    let payload: CreatePayload = inputs.payload_as()?;

    let total_supply = required_supply("totalSupply", payload.total_supply.as_ref())?;
    let initialized_supply =
        required_supply("initializedSupply", payload.initialized_supply.as_ref())?;
    let symbol = required_text("symbol", payload.symbol.as_ref())?;
    let name = required_text("name", payload.name.as_ref())?;
    let receiver =
        optional_address(payload.to.as_ref())?.unwrap_or_else(|| transaction.from.clone());

    let metadata = base_metadata(symbol, name, total_supply);

    let distribution = TokenDistributionBuilder::new()
        .program_id(AddressOrNamespace::this())
        .amount(initialized_supply)
        .receiver(receiver)
        .add_update_field(token_metadata(metadata.clone()))
        .build()?;

    let create = CreateInstructionBuilder::new()
        .program_id(AddressOrNamespace::this())
        .total_supply(total_supply)
        .initialized_supply(initialized_supply)
        .program_owner(transaction.from.clone())
        .program_namespace(AddressOrNamespace::this())
        .add_token_distribution(distribution)
        .build()?;

    let program_metadata = ProgramUpdateBuilder::new()
        .program_address(AddressOrNamespace::this())
        .add_update_field(ProgramUpdateField::from(ProgramFieldValue::Metadata(
            MapUpdate::Extend(metadata),
        )))
        .build()?;
    let update = UpdateInstructionBuilder::new()
        .add_update(program_metadata)
        .build()?;

    Ok(Outputs::new(inputs.clone(), vec![create, update]))
}

/// Create the token with a single distribution of the attached value to the
/// caller. Every payload key is written to the token's metadata.
pub fn create_and_distribute(inputs: &ComputeInputs) -> Result<Outputs> {
    let transaction = &inputs.transaction;
    let raw = inputs.payload()?;
    let payload: CreatePayload = serde_json::from_value(raw.clone())?;

    let total_supply = required_supply("totalSupply", payload.total_supply.as_ref())?;
    let initialized_supply = Amount::new(transaction.value()?);
    if initialized_supply.is_zero() {
        return Err(LasrError::InvalidSupply(
            "attached value must be positive".to_string(),
        ));
    }
    let symbol = required_text("symbol", payload.symbol.as_ref())?;
    let name = required_text("name", payload.name.as_ref())?;

    let mut metadata = string_map("metadata", &raw)?;
    metadata.extend(base_metadata(symbol, name, total_supply));

    let distribution = TokenDistributionBuilder::new()
        .program_id(AddressOrNamespace::this())
        .amount(initialized_supply)
        .receiver(transaction.from.clone())
        .add_update_field(token_metadata(metadata))
        .build()?;

    let create = CreateInstructionBuilder::new()
        .program_id(AddressOrNamespace::this())
        .total_supply(total_supply)
        .initialized_supply(initialized_supply)
        .program_owner(transaction.from.clone())
        .program_namespace(AddressOrNamespace::this())
        .add_token_distribution(distribution)
        .build()?;

    Ok(Outputs::new(inputs.clone(), vec![create]))
}

/// Extend the program's `metadata` and/or `data`. With neither present, or
/// with no payload at all, the call succeeds with no instructions.
pub fn update(inputs: &ComputeInputs) -> Result<Outputs> {
    let payload: UpdatePayload = match inputs.try_payload()? {
        Some(raw) => serde_json::from_value(raw)?,
        None => UpdatePayload::default(),
    };

    let mut fields = Vec::new();
    if let Some(metadata) = &payload.metadata {
        fields.push(ProgramUpdateField::from(ProgramFieldValue::Metadata(
            MapUpdate::Extend(string_map("metadata", metadata)?),
        )));
    }
    if let Some(data) = &payload.data {
        fields.push(ProgramUpdateField::from(ProgramFieldValue::Data(
            MapUpdate::Extend(string_map("data", data)?),
        )));
    }

    if fields.is_empty() {
        tracing::debug!("Update carries neither metadata nor data");
        return Ok(Outputs::new(inputs.clone(), Vec::new()));
    }

    let program_update = fields
        .into_iter()
        .fold(
            ProgramUpdateBuilder::new().program_address(AddressOrNamespace::this()),
            ProgramUpdateBuilder::add_update_field,
        )
        .build()?;
    let instruction = UpdateInstructionBuilder::new()
        .add_update(program_update)
        .build()?;

    Ok(Outputs::new(inputs.clone(), vec![instruction]))
}

/// Extend the approvals of the program's token (`transaction.programId`)
/// with the grant(s) in the payload.
pub fn approve(inputs: &ComputeInputs) -> Result<Outputs> {
    let transaction = &inputs.transaction;
    let approvals = ApprovalsValue::from_json(FieldAction::Extend, &inputs.payload()?)?;

    let token_update = TokenUpdateBuilder::new()
        .caller(transaction.from.clone())
        .token_address(transaction.program_id.clone())
        .add_update_field(TokenUpdateField::from(TokenFieldValue::Approvals(approvals)))
        .build()?;
    let instruction = UpdateInstructionBuilder::new()
        .add_update(token_update)
        .build()?;

    Ok(Outputs::new(inputs.clone(), vec![instruction]))
}

/// Burn the attached value from the caller's balance of `token`.
pub fn burn(inputs: &ComputeInputs, token: &TokenSource) -> Result<Outputs> {
    let transaction = &inputs.transaction;
    let caller = transaction.from.clone();

    let instruction = BurnInstructionBuilder::new()
        .program_id(AddressOrNamespace::this())
        .caller(caller.clone())
        .token_address(token.resolve(transaction))
        .burn_from_address(caller)
        .amount(Amount::new(transaction.value()?))
        .build()?;

    Ok(Outputs::new(inputs.clone(), vec![instruction]))
}

/// Take the attached value as payment and send back the minted proceeds:
/// `[proceeds-out, payment-in]`.
pub fn mint(inputs: &ComputeInputs, policy: &MintPolicy) -> Result<Outputs> {
    let transaction = &inputs.transaction;
    let instructions = build_mint_instructions(MintRequest {
        caller: transaction.from.clone(),
        minted_token: policy.minted_token.resolve(transaction),
        payment_token: policy.payment_token.resolve(transaction),
        payment_value: transaction.value()?,
        conversion_rate: policy.conversion_rate,
    })?;

    Ok(Outputs::new(inputs.clone(), instructions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lasr_types::{Instruction, TokenOrProgramUpdate};
    use serde_json::json;

    fn call(op: &str, inputs: Value, value: Value) -> ComputeInputs {
        serde_json::from_value(json!({
            "op": op,
            "transaction": {
                "from": "0xa11ce",
                "to": "0x70",
                "programId": "0xbeef",
                "transactionInputs": inputs.to_string(),
                "value": value
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_create_emits_create_then_program_update() {
        let inputs = call(
            "create",
            json!({ "totalSupply": "1000", "initializedSupply": "10", "symbol": "SNK", "name": "Snake" }),
            json!(null),
        );
        let outputs = create(&inputs).unwrap();
        let kinds: Vec<_> = outputs.instructions().iter().map(Instruction::kind).collect();
        assert_eq!(kinds, vec!["create", "update"]);

        let Instruction::Create(create) = &outputs.instructions()[0] else {
            panic!("expected create");
        };
        assert_eq!(create.total_supply(), Amount::from_verse("1000").unwrap());
        assert_eq!(create.distribution().len(), 1);
        assert_eq!(
            create.distribution()[0].receiver(),
            &AddressOrNamespace::from(Address::new("0xa11ce").unwrap())
        );
    }

    #[test]
    fn test_create_distributes_to_requested_receiver() {
        let inputs = call(
            "create",
            json!({ "totalSupply": 5, "initializedSupply": 1, "symbol": "S", "name": "N", "to": "0xf00d" }),
            json!(null),
        );
        let outputs = create(&inputs).unwrap();
        let Instruction::Create(create) = &outputs.instructions()[0] else {
            panic!("expected create");
        };
        assert_eq!(
            create.distribution()[0].receiver(),
            &AddressOrNamespace::from(Address::new("0xf00d").unwrap())
        );
    }

    #[test]
    fn test_create_validates_supply_before_metadata() {
        let inputs = call("create", json!({ "initializedSupply": "1" }), json!(null));
        assert!(matches!(create(&inputs), Err(LasrError::InvalidSupply(_))));

        let inputs = call(
            "create",
            json!({ "totalSupply": "0", "initializedSupply": "1", "symbol": "S", "name": "N" }),
            json!(null),
        );
        assert!(matches!(create(&inputs), Err(LasrError::InvalidSupply(_))));

        let inputs = call(
            "create",
            json!({ "totalSupply": "1", "initializedSupply": "1", "name": "N" }),
            json!(null),
        );
        assert!(matches!(create(&inputs), Err(LasrError::InvalidMetadata(_))));

        let inputs = call(
            "create",
            json!({ "totalSupply": "1", "initializedSupply": "1", "symbol": " ", "name": "N" }),
            json!(null),
        );
        assert!(matches!(create(&inputs), Err(LasrError::InvalidMetadata(_))));
    }

    #[test]
    fn test_create_rejects_negative_supply() {
        let inputs = call(
            "create",
            json!({ "totalSupply": "-5", "initializedSupply": "1", "symbol": "S", "name": "N" }),
            json!(null),
        );
        assert!(matches!(create(&inputs), Err(LasrError::InvalidSupply(_))));

        let inputs = call(
            "create",
            json!({ "totalSupply": 5, "initializedSupply": -1, "symbol": "S", "name": "N" }),
            json!(null),
        );
        assert!(matches!(create(&inputs), Err(LasrError::InvalidSupply(_))));
    }

    #[test]
    fn test_create_mistyped_symbol_is_invalid_metadata() {
        let inputs = call(
            "create",
            json!({ "symbol": 5, "name": "N", "totalSupply": "5", "initializedSupply": "1" }),
            json!(null),
        );
        assert!(matches!(create(&inputs), Err(LasrError::InvalidMetadata(_))));
    }

    #[test]
    fn test_create_checks_supply_before_receiver() {
        let inputs = call(
            "create",
            json!({ "to": "nope", "symbol": "S", "name": "N" }),
            json!(null),
        );
        assert!(matches!(create(&inputs), Err(LasrError::InvalidSupply(_))));

        let inputs = call(
            "create",
            json!({ "to": "nope", "totalSupply": "5", "initializedSupply": "1", "symbol": "S", "name": "N" }),
            json!(null),
        );
        assert!(matches!(create(&inputs), Err(LasrError::InvalidAddress(_))));
    }

    #[test]
    fn test_create_rejects_malformed_supply() {
        let inputs = call(
            "create",
            json!({ "totalSupply": "lots", "initializedSupply": "1", "symbol": "S", "name": "N" }),
            json!(null),
        );
        assert!(matches!(create(&inputs), Err(LasrError::InvalidAmount(_))));
    }

    #[test]
    fn test_update_touches_present_fields_in_order() {
        let inputs = call(
            "update",
            json!({ "data": { "score": 10 }, "metadata": { "name": "Snake" } }),
            json!(null),
        );
        let outputs = update(&inputs).unwrap();
        assert_eq!(outputs.instructions().len(), 1);

        let Instruction::Update(instruction) = &outputs.instructions()[0] else {
            panic!("expected update");
        };
        let TokenOrProgramUpdate::ProgramUpdate(program_update) = &instruction.updates()[0] else {
            panic!("expected program update");
        };
        let fields: Vec<_> = program_update
            .updates()
            .iter()
            .map(|f| f.field().as_str())
            .collect();
        assert_eq!(fields, vec!["metadata", "data"]);
    }

    #[test]
    fn test_empty_update_is_not_an_error() {
        let inputs = call("update", json!({}), json!(null));
        let outputs = update(&inputs).unwrap();
        assert!(outputs.instructions().is_empty());
    }

    #[test]
    fn test_update_without_payload_is_not_an_error() {
        let inputs: ComputeInputs = serde_json::from_value(json!({
            "op": "update",
            "transaction": { "from": "0xa11ce", "to": "0x70", "programId": "0xbeef" }
        }))
        .unwrap();
        let outputs = update(&inputs).unwrap();
        assert!(outputs.instructions().is_empty());
    }

    #[test]
    fn test_burn_uses_attached_value() {
        let inputs = call("burn", json!({}), json!("0x2a"));
        let outputs = burn(&inputs, &TokenSource::This).unwrap();
        let Instruction::Burn(burn) = &outputs.instructions()[0] else {
            panic!("expected burn");
        };
        assert_eq!(burn.amount(), Amount::from(42u64));
        assert!(burn.token_address().is_this());
        assert_eq!(burn.caller().as_str(), "0xa11ce");
    }

    #[test]
    fn test_token_source_resolution() {
        let inputs = call("mint", json!({}), json!(null));
        let tx = &inputs.transaction;
        assert_eq!(TokenSource::ProgramId.resolve(tx).as_str(), "0xbeef");
        assert_eq!(TokenSource::Recipient.resolve(tx).as_str(), "0x70");
        assert!(TokenSource::This.resolve(tx).is_this());
    }
}
