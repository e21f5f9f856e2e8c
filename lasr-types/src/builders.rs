//! Validating builders for instructions and their parts
//!
//! Setters may be called in any order; `build` fails with
//! [`LasrError::IncompleteInstruction`] naming the first missing field.
//! Repeatable adders keep call order.

use crate::address::{Address, AddressOrNamespace};
use crate::error::{LasrError, Result};
use crate::instruction::{
    BurnInstruction, CreateInstruction, Instruction, TokenDistribution, TransferInstruction,
    UpdateInstruction,
};
use crate::numeric::Amount;
use crate::update::{
    ProgramUpdate, ProgramUpdateField, TokenOrProgramUpdate, TokenUpdate, TokenUpdateField,
};

fn required<T>(value: Option<T>, kind: &'static str, field: &'static str) -> Result<T> {
    value.ok_or_else(|| LasrError::incomplete(kind, field))
}

/// Builder for [`CreateInstruction`]
#[derive(Debug, Clone, Default)]
pub struct CreateInstructionBuilder {
    program_id: Option<AddressOrNamespace>,
    program_owner: Option<Address>,
    program_namespace: Option<AddressOrNamespace>,
    total_supply: Option<Amount>,
    initialized_supply: Option<Amount>,
    distribution: Vec<TokenDistribution>,
}

impl CreateInstructionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn program_id(mut self, program_id: impl Into<AddressOrNamespace>) -> Self {
        self.program_id = Some(program_id.into());
        self
    }

    pub fn program_owner(mut self, owner: Address) -> Self {
        self.program_owner = Some(owner);
        self
    }

    pub fn program_namespace(mut self, namespace: impl Into<AddressOrNamespace>) -> Self {
        self.program_namespace = Some(namespace.into());
        self
    }

    pub fn total_supply(mut self, supply: impl Into<Amount>) -> Self {
        self.total_supply = Some(supply.into());
        self
    }

    pub fn initialized_supply(mut self, supply: impl Into<Amount>) -> Self {
        self.initialized_supply = Some(supply.into());
        self
    }

    pub fn add_token_distribution(mut self, distribution: TokenDistribution) -> Self {
        self.distribution.push(distribution);
        self
    }

    pub fn extend_token_distributions(
        mut self,
        distributions: impl IntoIterator<Item = TokenDistribution>,
    ) -> Self {
        self.distribution.extend(distributions);
        self
    }

    pub fn build(self) -> Result<Instruction> {
        const KIND: &str = "create";
        let instruction = CreateInstruction {
            program_id: required(self.program_id, KIND, "programId")?,
            total_supply: required(self.total_supply, KIND, "totalSupply")?,
            initialized_supply: required(self.initialized_supply, KIND, "initializedSupply")?,
            program_owner: required(self.program_owner, KIND, "programOwner")?,
            program_namespace: required(self.program_namespace, KIND, "programNamespace")?,
            distribution: self.distribution,
        };
        tracing::trace!(
            distributions = instruction.distribution.len(),
            "Built create instruction"
        );
        Ok(Instruction::Create(instruction))
    }
}

/// Builder for [`TokenDistribution`]
#[derive(Debug, Clone, Default)]
pub struct TokenDistributionBuilder {
    program_id: Option<AddressOrNamespace>,
    amount: Option<Amount>,
    receiver: Option<AddressOrNamespace>,
    updates: Vec<TokenUpdateField>,
}

impl TokenDistributionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn program_id(mut self, program_id: impl Into<AddressOrNamespace>) -> Self {
        self.program_id = Some(program_id.into());
        self
    }

    pub fn amount(mut self, amount: impl Into<Amount>) -> Self {
        self.amount = Some(amount.into());
        self
    }

    pub fn receiver(mut self, receiver: impl Into<AddressOrNamespace>) -> Self {
        self.receiver = Some(receiver.into());
        self
    }

    pub fn add_update_field(mut self, field: TokenUpdateField) -> Self {
        self.updates.push(field);
        self
    }

    pub fn extend_update_fields(
        mut self,
        fields: impl IntoIterator<Item = TokenUpdateField>,
    ) -> Self {
        self.updates.extend(fields);
        self
    }

    pub fn build(self) -> Result<TokenDistribution> {
        const KIND: &str = "distribution";
        Ok(TokenDistribution {
            program_id: required(self.program_id, KIND, "programId")?,
            amount: required(self.amount, KIND, "amount")?,
            receiver: required(self.receiver, KIND, "receiver")?,
            updates: self.updates,
        })
    }
}

/// Builder for [`TokenUpdate`]
#[derive(Debug, Clone, Default)]
pub struct TokenUpdateBuilder {
    caller: Option<AddressOrNamespace>,
    token: Option<AddressOrNamespace>,
    updates: Vec<TokenUpdateField>,
}

impl TokenUpdateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn caller(mut self, caller: impl Into<AddressOrNamespace>) -> Self {
        self.caller = Some(caller.into());
        self
    }

    pub fn token_address(mut self, token: impl Into<AddressOrNamespace>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn add_update_field(mut self, field: TokenUpdateField) -> Self {
        self.updates.push(field);
        self
    }

    pub fn build(self) -> Result<TokenUpdate> {
        const KIND: &str = "tokenUpdate";
        let caller = required(self.caller, KIND, "caller")?;
        let token = required(self.token, KIND, "token")?;
        TokenUpdate::new(caller, token, self.updates)
    }
}

/// Builder for [`ProgramUpdate`]
#[derive(Debug, Clone, Default)]
pub struct ProgramUpdateBuilder {
    program: Option<AddressOrNamespace>,
    updates: Vec<ProgramUpdateField>,
}

impl ProgramUpdateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn program_address(mut self, program: impl Into<AddressOrNamespace>) -> Self {
        self.program = Some(program.into());
        self
    }

    pub fn add_update_field(mut self, field: ProgramUpdateField) -> Self {
        self.updates.push(field);
        self
    }

    pub fn build(self) -> Result<ProgramUpdate> {
        let program = required(self.program, "programUpdate", "program")?;
        ProgramUpdate::new(program, self.updates)
    }
}

/// Builder for an [`UpdateInstruction`]
#[derive(Debug, Clone, Default)]
pub struct UpdateInstructionBuilder {
    updates: Vec<TokenOrProgramUpdate>,
}

impl UpdateInstructionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_update(mut self, update: impl Into<TokenOrProgramUpdate>) -> Self {
        self.updates.push(update.into());
        self
    }

    pub fn build(self) -> Result<Instruction> {
        if self.updates.is_empty() {
            return Err(LasrError::incomplete("update", "updates"));
        }
        tracing::trace!(updates = self.updates.len(), "Built update instruction");
        Ok(Instruction::Update(UpdateInstruction {
            updates: self.updates,
        }))
    }
}

/// Builder for [`TransferInstruction`]
///
/// `from == to` is accepted; whether a self-transfer is meaningful is up to
/// the runtime.
#[derive(Debug, Clone, Default)]
pub struct TransferInstructionBuilder {
    token_address: Option<Address>,
    from: Option<AddressOrNamespace>,
    to: Option<AddressOrNamespace>,
    amount: Option<Amount>,
}

impl TransferInstructionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transfer_from(mut self, from: impl Into<AddressOrNamespace>) -> Self {
        self.from = Some(from.into());
        self
    }

    pub fn transfer_to(mut self, to: impl Into<AddressOrNamespace>) -> Self {
        self.to = Some(to.into());
        self
    }

    pub fn amount(mut self, amount: impl Into<Amount>) -> Self {
        self.amount = Some(amount.into());
        self
    }

    pub fn token_address(mut self, token: Address) -> Self {
        self.token_address = Some(token);
        self
    }

    pub fn build(self) -> Result<Instruction> {
        const KIND: &str = "transfer";
        let instruction = TransferInstruction {
            from: required(self.from, KIND, "transferFrom")?,
            to: required(self.to, KIND, "transferTo")?,
            amount: required(self.amount, KIND, "amount")?,
            token_address: required(self.token_address, KIND, "tokenAddress")?,
        };
        tracing::trace!(amount = %instruction.amount, "Built transfer instruction");
        Ok(Instruction::Transfer(instruction))
    }
}

/// Builder for [`BurnInstruction`]
#[derive(Debug, Clone, Default)]
pub struct BurnInstructionBuilder {
    program_id: Option<AddressOrNamespace>,
    caller: Option<Address>,
    token_address: Option<Address>,
    burn_from_address: Option<AddressOrNamespace>,
    amount: Option<Amount>,
}

impl BurnInstructionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn program_id(mut self, program_id: impl Into<AddressOrNamespace>) -> Self {
        self.program_id = Some(program_id.into());
        self
    }

    pub fn caller(mut self, caller: Address) -> Self {
        self.caller = Some(caller);
        self
    }

    pub fn token_address(mut self, token: Address) -> Self {
        self.token_address = Some(token);
        self
    }

    pub fn burn_from_address(mut self, from: impl Into<AddressOrNamespace>) -> Self {
        self.burn_from_address = Some(from.into());
        self
    }

    pub fn amount(mut self, amount: impl Into<Amount>) -> Self {
        self.amount = Some(amount.into());
        self
    }

    pub fn build(self) -> Result<Instruction> {
        const KIND: &str = "burn";
        let instruction = BurnInstruction {
            program_id: required(self.program_id, KIND, "programId")?,
            caller: required(self.caller, KIND, "caller")?,
            token_address: required(self.token_address, KIND, "tokenAddress")?,
            burn_from_address: required(self.burn_from_address, KIND, "burnFromAddress")?,
            amount: required(self.amount, KIND, "amount")?,
        };
        tracing::trace!(amount = %instruction.amount, "Built burn instruction");
        Ok(Instruction::Burn(instruction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{MapUpdate, TokenFieldValue};
    use serde_json::json;

    fn addr(raw: &str) -> Address {
        Address::new(raw).unwrap()
    }

    fn metadata_field(key: &str, value: &str) -> TokenUpdateField {
        TokenUpdateField::from(TokenFieldValue::Metadata(MapUpdate::Insert(
            key.to_string(),
            value.to_string(),
        )))
    }

    #[test]
    fn test_create_requires_every_identity_field() {
        let err = CreateInstructionBuilder::new()
            .program_id(AddressOrNamespace::this())
            .total_supply(10u64)
            .initialized_supply(0u64)
            .program_owner(addr("0xa1"))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            LasrError::IncompleteInstruction {
                kind: "create",
                field: "programNamespace"
            }
        );
    }

    #[test]
    fn test_create_keeps_distribution_order() {
        let first = TokenDistributionBuilder::new()
            .program_id(AddressOrNamespace::this())
            .amount(1u64)
            .receiver(addr("0x1"))
            .build()
            .unwrap();
        let second = TokenDistributionBuilder::new()
            .program_id(AddressOrNamespace::this())
            .amount(2u64)
            .receiver(addr("0x2"))
            .build()
            .unwrap();

        let Instruction::Create(create) = CreateInstructionBuilder::new()
            .program_id(AddressOrNamespace::this())
            .total_supply(3u64)
            .initialized_supply(3u64)
            .program_owner(addr("0xa1"))
            .program_namespace(AddressOrNamespace::this())
            .add_token_distribution(first)
            .add_token_distribution(second)
            .build()
            .unwrap()
        else {
            panic!("expected create");
        };

        let amounts: Vec<_> = create.distribution().iter().map(|d| d.amount()).collect();
        assert_eq!(amounts, vec![Amount::from(1u64), Amount::from(2u64)]);
    }

    #[test]
    fn test_distribution_requires_receiver() {
        let err = TokenDistributionBuilder::new()
            .program_id(AddressOrNamespace::this())
            .amount(5u64)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            LasrError::IncompleteInstruction {
                kind: "distribution",
                field: "receiver"
            }
        );
    }

    #[test]
    fn test_token_update_keeps_repeated_fields() {
        let update = TokenUpdateBuilder::new()
            .caller(addr("0xa"))
            .token_address(addr("0xb"))
            .add_update_field(metadata_field("name", "first"))
            .add_update_field(metadata_field("name", "second"))
            .build()
            .unwrap();
        assert_eq!(update.updates().len(), 2);
        assert_eq!(update.updates()[1], metadata_field("name", "second"));
    }

    #[test]
    fn test_token_update_requires_fields() {
        let err = TokenUpdateBuilder::new()
            .caller(addr("0xa"))
            .token_address(addr("0xb"))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            LasrError::IncompleteInstruction { field: "updates", .. }
        ));

        let err = TokenUpdateBuilder::new()
            .caller(addr("0xa"))
            .add_update_field(metadata_field("k", "v"))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            LasrError::IncompleteInstruction { field: "token", .. }
        ));
    }

    #[test]
    fn test_update_instruction_requires_an_update() {
        assert!(UpdateInstructionBuilder::new().build().is_err());
    }

    #[test]
    fn test_transfer_allows_self_transfer() {
        let instruction = TransferInstructionBuilder::new()
            .transfer_from(addr("0xa"))
            .transfer_to(addr("0xa"))
            .amount(7u64)
            .token_address(addr("0xc"))
            .build()
            .unwrap();
        assert_eq!(
            serde_json::to_value(&instruction).unwrap(),
            json!({
                "kind": "transfer",
                "tokenAddress": "0xc",
                "from": "0xa",
                "to": "0xa",
                "amount": "0x7"
            })
        );
    }

    #[test]
    fn test_transfer_reports_missing_amount() {
        let err = TransferInstructionBuilder::new()
            .transfer_from(addr("0xa"))
            .transfer_to(addr("0xb"))
            .token_address(addr("0xc"))
            .build()
            .unwrap_err();
        assert_eq!(err.to_string(), "Incomplete transfer instruction: missing amount");
    }

    #[test]
    fn test_burn_wire_shape() {
        let caller = addr("0xa");
        let instruction = BurnInstructionBuilder::new()
            .program_id(AddressOrNamespace::this())
            .caller(caller.clone())
            .token_address(Address::this())
            .burn_from_address(caller)
            .amount(16u64)
            .build()
            .unwrap();
        assert_eq!(
            serde_json::to_value(&instruction).unwrap(),
            json!({
                "kind": "burn",
                "programId": "this",
                "caller": "0xa",
                "tokenAddress": "this",
                "burnFromAddress": "0xa",
                "amount": "0x10"
            })
        );
    }

    #[test]
    fn test_instruction_deserializes_by_kind() {
        let raw = json!({
            "kind": "create",
            "programId": "this",
            "programOwner": "0xa",
            "programNamespace": "this",
            "totalSupply": "0x64",
            "initializedSupply": "0x0",
            "distribution": []
        });
        let instruction: Instruction = serde_json::from_value(raw).unwrap();
        assert_eq!(instruction.kind(), "create");
    }

    #[test]
    fn test_empty_update_instruction_fails_deserialization() {
        let raw = json!({ "kind": "update", "updates": [] });
        assert!(serde_json::from_value::<Instruction>(raw).is_err());
    }
}
