//! The snake game's token program
//!
//! Points are bought with ETH at two wei per point and burned on play.

use lasr_types::{Address, ComputeInputs, Outputs, Result, U256};

use crate::dispatch::{Method, Program};
use crate::handlers::{self, MintPolicy, TokenSource};

const WEI_PER_POINT: u64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakeMethod {
    Create,
    Update,
    Burn,
    Mint,
}

impl Method for SnakeMethod {
    const ALL: &'static [Self] = &[
        SnakeMethod::Create,
        SnakeMethod::Update,
        SnakeMethod::Burn,
        SnakeMethod::Mint,
    ];

    fn name(&self) -> &'static str {
        match self {
            SnakeMethod::Create => "create",
            SnakeMethod::Update => "update",
            SnakeMethod::Burn => "burn",
            SnakeMethod::Mint => "mint",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SnakeProgram {
    mint_policy: MintPolicy,
}

impl Default for SnakeProgram {
    fn default() -> Self {
        Self {
            mint_policy: MintPolicy {
                payment_token: TokenSource::Fixed(Address::eth_program()),
                minted_token: TokenSource::ProgramId,
                conversion_rate: U256::from(WEI_PER_POINT),
            },
        }
    }
}

impl SnakeProgram {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Program for SnakeProgram {
    type Method = SnakeMethod;

    fn name(&self) -> &'static str {
        "snake"
    }

    fn call(&self, method: SnakeMethod, inputs: &ComputeInputs) -> Result<Outputs> {
        match method {
            SnakeMethod::Create => handlers::create(inputs),
            SnakeMethod::Update => handlers::update(inputs),
            SnakeMethod::Burn => handlers::burn(inputs, &TokenSource::ProgramId),
            SnakeMethod::Mint => handlers::mint(inputs, &self.mint_policy),
        }
    }
}
