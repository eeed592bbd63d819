use soroban_sdk::{contracterror, contracttype, Address, BytesN, String};

/// Deepest node level; nodes at this depth receive no further children.
/// The root namespace sits at depth 1, top-level names at 2, sub-names at 3.
pub const MAX_DEPTH: u32 = 3;
/// Maximum direct children per node through `create_subnode`.
pub const MAX_SUBNODES: u32 = 9;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Node {
    pub owner: Address,
    pub resolver: Option<Address>,
    pub ttl: u64,
    /// Parent namespace hash, or the zero sentinel for parentless nodes.
    pub parent: BytesN<32>,
    pub label: String,
    pub depth: u32,
    /// Record validity timestamp, maintained by the registrar.
    pub expiry: u64,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    Unauthorized = 1,
    DepthExceeded = 2,
    FanoutExceeded = 3,
    NotFound = 4,
    AlreadyInitialized = 5,
    LabelTooLong = 6,
}
