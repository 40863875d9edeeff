//! Who may act on a [`ChangeRequest`].
//!
//! The requester pays for a request and the target user decides on it. The
//! two rights are checked against different fields of the record and never
//! collapse into a single owner check.

use soroban_sdk::Address;

use crate::{storage_types::ChangeRequest, Error};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    /// Created the request and owns its deposit.
    Requester,
    /// Owns the favorites the request targets.
    Approver,
}

impl Role {
    pub fn holder(self, request: &ChangeRequest) -> &Address {
        match self {
            Role::Requester => &request.requester,
            Role::Approver => &request.user,
        }
    }
}

/// Requires `signer` to have signed the invocation and to hold one of
/// `allowed` on `request`. Returns the role that matched.
pub fn authorize(signer: &Address, request: &ChangeRequest, allowed: &[Role]) -> Result<Role, Error> {
    signer.require_auth();

    allowed
        .iter()
        .copied()
        .find(|role| role.holder(request) == signer)
        .ok_or(Error::Unauthorized)
}
