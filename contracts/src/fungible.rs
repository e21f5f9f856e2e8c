//! Fungible token program

use lasr_types::{ComputeInputs, Outputs, Result, U256};

use crate::dispatch::{Method, Program};
use crate::handlers::{self, MintPolicy, TokenSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FungibleTokenMethod {
    Approve,
    Burn,
    Create,
    CreateAndDistribute,
    Mint,
    Update,
}

impl Method for FungibleTokenMethod {
    const ALL: &'static [Self] = &[
        FungibleTokenMethod::Approve,
        FungibleTokenMethod::Burn,
        FungibleTokenMethod::Create,
        FungibleTokenMethod::CreateAndDistribute,
        FungibleTokenMethod::Mint,
        FungibleTokenMethod::Update,
    ];

    fn name(&self) -> &'static str {
        match self {
            FungibleTokenMethod::Approve => "approve",
            FungibleTokenMethod::Burn => "burn",
            FungibleTokenMethod::Create => "create",
            FungibleTokenMethod::CreateAndDistribute => "createAndDistribute",
            FungibleTokenMethod::Mint => "mint",
            FungibleTokenMethod::Update => "update",
        }
    }
}

/// A token whose units are bought one-for-one with the program's own token
/// and burned from the caller's balance of `this`.
#[derive(Debug, Clone)]
pub struct FungibleTokenProgram {
    mint_policy: MintPolicy,
}

impl Default for FungibleTokenProgram {
    fn default() -> Self {
        Self {
            mint_policy: MintPolicy {
                payment_token: TokenSource::ProgramId,
                minted_token: TokenSource::Recipient,
                conversion_rate: U256::from(1u64),
            },
        }
    }
}

impl FungibleTokenProgram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mint_policy(mut self, policy: MintPolicy) -> Self {
        self.mint_policy = policy;
        self
    }

    pub fn mint_policy(&self) -> &MintPolicy {
        &self.mint_policy
    }
}

impl Program for FungibleTokenProgram {
    type Method = FungibleTokenMethod;

    fn name(&self) -> &'static str {
        "fungible-token"
    }

    fn call(&self, method: FungibleTokenMethod, inputs: &ComputeInputs) -> Result<Outputs> {
        match method {
            FungibleTokenMethod::Approve => handlers::approve(inputs),
            FungibleTokenMethod::Burn => handlers::burn(inputs, &TokenSource::This),
            FungibleTokenMethod::Create => handlers::create(inputs),
            FungibleTokenMethod::CreateAndDistribute => handlers::create_and_distribute(inputs),
            FungibleTokenMethod::Mint => handlers::mint(inputs, &self.mint_policy),
            FungibleTokenMethod::Update => handlers::update(inputs),
        }
    }
}
