//! Runtime selection among the bundled programs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use lasr_types::{ComputeInputs, LasrError, Outputs, Result};

use crate::dispatch::Program;
use crate::fungible::FungibleTokenProgram;
use crate::program::BaseProgram;
use crate::snake::SnakeProgram;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProgramKind {
    Program,
    #[default]
    FungibleToken,
    Snake,
}

impl ProgramKind {
    pub const ALL: [ProgramKind; 3] = [
        ProgramKind::Program,
        ProgramKind::FungibleToken,
        ProgramKind::Snake,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProgramKind::Program => "program",
            ProgramKind::FungibleToken => "fungible-token",
            ProgramKind::Snake => "snake",
        }
    }

    /// Run one call against a default-configured program of this kind.
    pub fn start(&self, inputs: &ComputeInputs) -> Result<Outputs> {
        match self {
            ProgramKind::Program => BaseProgram::new().start(inputs),
            ProgramKind::FungibleToken => FungibleTokenProgram::new().start(inputs),
            ProgramKind::Snake => SnakeProgram::new().start(inputs),
        }
    }

    pub fn methods(&self) -> Vec<&'static str> {
        match self {
            ProgramKind::Program => BaseProgram::new().methods(),
            ProgramKind::FungibleToken => FungibleTokenProgram::new().methods(),
            ProgramKind::Snake => SnakeProgram::new().methods(),
        }
    }
}

impl FromStr for ProgramKind {
    type Err = LasrError;

    fn from_str(s: &str) -> Result<Self> {
        ProgramKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| LasrError::InvalidInputs(format!("unknown program kind '{}'", s)))
    }
}

impl fmt::Display for ProgramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
