use soroban_sdk::{contracterror, contracttype, Address, BytesN, String};

/// One registration year, in seconds.
pub const YEAR: u64 = 365 * 24 * 60 * 60;
/// Grace period between a name's expiry and the moment its label becomes
/// registrable again. The registry node's expiry always carries the grace.
pub const GRACE: u64 = 30 * 24 * 60 * 60;

/// A registered top-level name, keyed by the hash of its label.
/// `nft_owner` is the canonical owner; the registry node's owner is a cache
/// re-synchronized through `reclaim`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NameRecord {
    pub label: String,
    pub duration: u32,
    /// Node hash of the referring name, or the zero sentinel.
    pub recommender: BytesN<32>,
    /// Absolute expiry timestamp; 0 while a beforehand allocation is
    /// pending its claim.
    pub expiry: u64,
    pub nft_owner: Address,
}

/// Fee table entry: labels up to `char_num` characters cost `amount` per
/// year. The last tier is the floor for every longer label.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeTier {
    pub char_num: u32,
    pub amount: i128,
}

/// Rebate table entry: referrals numbered up to `up_to` earn `rate` percent.
/// The last tier is the catch-all.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RebateTier {
    pub up_to: u64,
    pub rate: u32,
}

/// A phase is open iff now is in [start, end).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TimeWindow {
    pub start: u64,
    pub end: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SpecialPhase {
    pub start: u64,
    pub end: u64,
    pub limit: u32,
    pub enabled: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecommendStatistics {
    pub referral_count: u64,
    pub total_rebate_earned: i128,
    pub total_rebate_claimed: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecommendDetail {
    pub label: String,
    pub label_hash: BytesN<32>,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    Unauthorized = 1,
    NotInTime = 2,
    InvalidSignature = 3,
    NoPermission = 4,
    NotOpen = 5,
    Using = 6,
    RegistrationFull = 7,
    NotFound = 8,
    InvalidConfig = 9,
    AlreadyInitialized = 10,
    LabelTooLong = 11,
}
