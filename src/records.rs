//! Persistent record access. Every key is derived from the identities that
//! own the record, so nothing here keeps an index.

use soroban_sdk::{xdr::ToXdr, Address, Bytes, BytesN, Env, String};

use crate::{
    storage_types::{
        ChangeRequest, DataKey, Favorites, MAX_COLOR_LEN, RECORD_TTL_EXTEND,
        RECORD_TTL_THRESHOLD,
    },
    Error,
};

const CHANGE_REQUEST_SEED: &[u8] = b"change_request";

/// Id of the single request `requester` may have open against `user`.
pub fn change_request_id(e: &Env, requester: &Address, user: &Address) -> BytesN<32> {
    let mut seed = Bytes::from_slice(e, CHANGE_REQUEST_SEED);
    seed.append(&requester.clone().to_xdr(e));
    seed.append(&user.clone().to_xdr(e));
    e.crypto().sha256(&seed).into()
}

pub fn validate_color(color: &String) -> Result<(), Error> {
    if color.len() > MAX_COLOR_LEN {
        return Err(Error::InvalidMutation);
    }
    Ok(())
}

pub fn has_favorites(e: &Env, user: &Address) -> bool {
    e.storage()
        .persistent()
        .has(&DataKey::Favorites(user.clone()))
}

pub fn read_favorites(e: &Env, user: &Address) -> Option<Favorites> {
    let key = DataKey::Favorites(user.clone());
    let favorites = e.storage().persistent().get(&key)?;
    e.storage()
        .persistent()
        .extend_ttl(&key, RECORD_TTL_THRESHOLD, RECORD_TTL_EXTEND);
    Some(favorites)
}

pub fn write_favorites(e: &Env, favorites: &Favorites) {
    let key = DataKey::Favorites(favorites.owner.clone());
    e.storage().persistent().set(&key, favorites);
    e.storage()
        .persistent()
        .extend_ttl(&key, RECORD_TTL_THRESHOLD, RECORD_TTL_EXTEND);
}

pub fn has_change_request(e: &Env, id: &BytesN<32>) -> bool {
    e.storage()
        .persistent()
        .has(&DataKey::ChangeRequest(id.clone()))
}

pub fn read_change_request(e: &Env, id: &BytesN<32>) -> Option<ChangeRequest> {
    let key = DataKey::ChangeRequest(id.clone());
    let request = e.storage().persistent().get(&key)?;
    e.storage()
        .persistent()
        .extend_ttl(&key, RECORD_TTL_THRESHOLD, RECORD_TTL_EXTEND);
    Some(request)
}

pub fn write_change_request(e: &Env, id: &BytesN<32>, request: &ChangeRequest) {
    let key = DataKey::ChangeRequest(id.clone());
    e.storage().persistent().set(&key, request);
    e.storage()
        .persistent()
        .extend_ttl(&key, RECORD_TTL_THRESHOLD, RECORD_TTL_EXTEND);
}

pub fn remove_change_request(e: &Env, id: &BytesN<32>) {
    e.storage()
        .persistent()
        .remove(&DataKey::ChangeRequest(id.clone()));
}
