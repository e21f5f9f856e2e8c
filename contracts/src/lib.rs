//! Programs for the LASR runtime
//!
//! A program maps an incoming operation name to a handler that reads the call
//! payload and returns the ordered instructions for the runtime to apply.
//! Calls are stateless: identical inputs always produce identical outputs.

pub mod dispatch;
pub mod fungible;
pub mod handlers;
pub mod kind;
pub mod program;
pub mod snake;

pub use dispatch::{Method, Program};
pub use fungible::{FungibleTokenMethod, FungibleTokenProgram};
pub use handlers::{MintPolicy, TokenSource};
pub use kind::ProgramKind;
pub use program::{BaseProgram, BaseProgramMethod};
pub use snake::{SnakeMethod, SnakeProgram};
