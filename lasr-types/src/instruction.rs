//! Ledger-bound instructions
//!
//! Each instruction is a declarative description of one effect the runtime
//! applies. Values are produced by the builders in [`crate::builders`];
//! deserialization re-checks the invariants serde alone cannot express.

use serde::{Deserialize, Serialize};

use crate::address::{Address, AddressOrNamespace};
use crate::error::{LasrError, Result};
use crate::numeric::Amount;
use crate::update::{TokenOrProgramUpdate, TokenUpdateField};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Instruction {
    Create(CreateInstruction),
    Update(UpdateInstruction),
    Transfer(TransferInstruction),
    Burn(BurnInstruction),
}

impl Instruction {
    pub fn kind(&self) -> &'static str {
        match self {
            Instruction::Create(_) => "create",
            Instruction::Update(_) => "update",
            Instruction::Transfer(_) => "transfer",
            Instruction::Burn(_) => "burn",
        }
    }
}

/// Registers a program/token and optionally hands out initial supply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInstruction {
    pub(crate) program_id: AddressOrNamespace,
    pub(crate) program_owner: Address,
    pub(crate) program_namespace: AddressOrNamespace,
    pub(crate) total_supply: Amount,
    pub(crate) initialized_supply: Amount,
    pub(crate) distribution: Vec<TokenDistribution>,
}

impl CreateInstruction {
    pub fn program_id(&self) -> &AddressOrNamespace {
        &self.program_id
    }

    pub fn program_owner(&self) -> &Address {
        &self.program_owner
    }

    pub fn program_namespace(&self) -> &AddressOrNamespace {
        &self.program_namespace
    }

    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    pub fn initialized_supply(&self) -> Amount {
        self.initialized_supply
    }

    pub fn distribution(&self) -> &[TokenDistribution] {
        &self.distribution
    }
}

/// Supply handed to `receiver` at creation, with accompanying field writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenDistribution {
    pub(crate) program_id: AddressOrNamespace,
    pub(crate) amount: Amount,
    pub(crate) receiver: AddressOrNamespace,
    pub(crate) updates: Vec<TokenUpdateField>,
}

impl TokenDistribution {
    pub fn program_id(&self) -> &AddressOrNamespace {
        &self.program_id
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn receiver(&self) -> &AddressOrNamespace {
        &self.receiver
    }

    pub fn updates(&self) -> &[TokenUpdateField] {
        &self.updates
    }
}

/// Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawUpdateInstruction")]
pub struct UpdateInstruction {
    pub(crate) updates: Vec<TokenOrProgramUpdate>,
}

#[derive(Deserialize)]
struct RawUpdateInstruction {
    updates: Vec<TokenOrProgramUpdate>,
}

impl TryFrom<RawUpdateInstruction> for UpdateInstruction {
    type Error = LasrError;

    fn try_from(raw: RawUpdateInstruction) -> Result<Self> {
        if raw.updates.is_empty() {
            return Err(LasrError::incomplete("update", "updates"));
        }
        Ok(Self {
            updates: raw.updates,
        })
    }
}

impl UpdateInstruction {
    pub fn updates(&self) -> &[TokenOrProgramUpdate] {
        &self.updates
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferInstruction {
    pub(crate) token_address: Address,
    pub(crate) from: AddressOrNamespace,
    pub(crate) to: AddressOrNamespace,
    pub(crate) amount: Amount,
}

impl TransferInstruction {
    pub fn token_address(&self) -> &Address {
        &self.token_address
    }

    pub fn from(&self) -> &AddressOrNamespace {
        &self.from
    }

    pub fn to(&self) -> &AddressOrNamespace {
        &self.to
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnInstruction {
    pub(crate) program_id: AddressOrNamespace,
    pub(crate) caller: Address,
    pub(crate) token_address: Address,
    pub(crate) burn_from_address: AddressOrNamespace,
    pub(crate) amount: Amount,
}

impl BurnInstruction {
    pub fn program_id(&self) -> &AddressOrNamespace {
        &self.program_id
    }

    pub fn caller(&self) -> &Address {
        &self.caller
    }

    pub fn token_address(&self) -> &Address {
        &self.token_address
    }

    pub fn burn_from_address(&self) -> &AddressOrNamespace {
        &self.burn_from_address
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }
}
