//! Protocol constants shared by every program

/// Reserved self-reference, resolved by the runtime to the executing program.
pub const THIS: &str = "this";

/// Number of decimal places in one verse.
pub const VERSE_DECIMALS: usize = 18;

pub const ETH_PROGRAM_ADDRESS: &str = "0x0000000000000000000000000000000000000000";
pub const VERSE_PROGRAM_ADDRESS: &str = "0x9f85fb953179fb2418faf4e5560c1ee3b4a5cd6e";

/// Longest accepted address body (after the `0x` prefix).
pub const MAX_ADDRESS_LEN: usize = 64;
