//! Instruction model for LASR programs
//!
//! This crate provides the typed data model a program uses to describe ledger
//! effects (create, update, transfer, burn), the builders that validate and
//! assemble those instructions, the numeric codec for amounts, and the
//! call-context / response envelope exchanged with the host runtime.

pub mod address;
pub mod builders;
pub mod consts;
pub mod error;
pub mod fields;
pub mod helpers;
pub mod inputs;
pub mod instruction;
pub mod numeric;
pub mod outputs;
pub mod update;

pub use address::*;
pub use builders::*;
pub use error::*;
pub use fields::*;
pub use helpers::*;
pub use inputs::*;
pub use instruction::*;
pub use numeric::*;
pub use outputs::*;
pub use update::*;
