use soroban_sdk::{contracttype, Address, BytesN, String};

/// Longest favorite color accepted, in bytes.
pub const MAX_COLOR_LEN: u32 = 50;

// Persistent entries are bumped to ~30 days whenever they fall under ~7 days.
pub const RECORD_TTL_THRESHOLD: u32 = 120_960;
pub const RECORD_TTL_EXTEND: u32 = 518_400;

pub const INSTANCE_TTL_THRESHOLD: u32 = 120_960;
pub const INSTANCE_TTL_EXTEND: u32 = 518_400;

/// Type tag prepended to every stored record.
const RECORD_TAG_SIZE: u32 = 8;
const ADDRESS_SIZE: u32 = 32;
const STRING_PREFIX_SIZE: u32 = 4;

/// Favorite number and color of a single user, keyed by [`DataKey::Favorites`].
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Favorites {
    pub owner: Address,
    pub number: u64,
    pub color: String,
}

impl Favorites {
    /// Upper bound of the serialized record, used to size its deposit.
    pub const SPACE: u32 =
        RECORD_TAG_SIZE + ADDRESS_SIZE + 8 + STRING_PREFIX_SIZE + MAX_COLOR_LEN;
}

/// A pending proposal from `requester` to change the favorites of `user`.
///
/// The requester pays the deposit and gets it back when the request is
/// closed. Only `user` may accept it.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChangeRequest {
    /// Who created the request and receives the refund.
    pub requester: Address,
    /// Whose favorites the request would change.
    pub user: Address,
    pub target: ChangeRequestTarget,
    /// Amount escrowed at creation, refunded as is.
    pub deposit: i128,
}

impl ChangeRequest {
    /// Upper bound of the serialized record. The target is sized by its
    /// largest variant, so the deposit does not depend on the proposed value.
    pub const SPACE: u32 = RECORD_TAG_SIZE
        + ADDRESS_SIZE
        + ADDRESS_SIZE
        + ChangeRequestTarget::SPACE
        + 16;
}

/// Which field of [`Favorites`] a request changes, and to what.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ChangeRequestTarget {
    Number(u64),
    Color(String),
}

impl ChangeRequestTarget {
    const SPACE: u32 = 1 + STRING_PREFIX_SIZE + MAX_COLOR_LEN;
}

/// Token and rate used to collateralize stored records.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositConfig {
    pub token: Address,
    pub rate_per_byte: i128,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    DepositConfig,
    Favorites(Address),
    ChangeRequest(BytesN<32>),
}
