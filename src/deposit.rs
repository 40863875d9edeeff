//! Deposits that collateralize stored records.
//!
//! A record's deposit depends only on its byte size. It is held by the
//! contract while the record exists and is returned in full when the record
//! is closed.

use soroban_sdk::{token, Address, Env};

use crate::{
    storage_types::{DataKey, DepositConfig},
    Error,
};

/// Bytes charged for every record on top of its payload.
pub const STORAGE_OVERHEAD: u32 = 128;

pub fn read_config(e: &Env) -> Result<DepositConfig, Error> {
    e.storage()
        .instance()
        .get(&DataKey::DepositConfig)
        .ok_or(Error::NotInitialized)
}

pub fn write_config(e: &Env, config: &DepositConfig) {
    e.storage().instance().set(&DataKey::DepositConfig, config);
}

/// Smallest deposit that keeps a record of `space` bytes allocated.
pub fn minimum_deposit(config: &DepositConfig, space: u32) -> Result<i128, Error> {
    let bytes = i128::from(STORAGE_OVERHEAD) + i128::from(space);
    bytes
        .checked_mul(config.rate_per_byte)
        .ok_or(Error::ArithmeticOverflow)
}

/// Moves `amount` from `from` into the contract.
pub fn escrow(e: &Env, config: &DepositConfig, from: &Address, amount: i128) -> Result<(), Error> {
    if amount == 0 {
        return Ok(());
    }

    let client = token::Client::new(e, &config.token);
    if client.balance(from) < amount {
        return Err(Error::InsufficientFunds);
    }
    client.transfer(from, &e.current_contract_address(), &amount);
    Ok(())
}

/// Pays `amount` held by the contract back to `to`.
pub fn refund(e: &Env, config: &DepositConfig, to: &Address, amount: i128) {
    if amount == 0 {
        return;
    }

    token::Client::new(e, &config.token).transfer(&e.current_contract_address(), to, &amount);
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::testutils::Address as _;

    #[test]
    fn deposit_depends_on_size_only() {
        let env = Env::default();
        let config = DepositConfig {
            token: Address::generate(&env),
            rate_per_byte: 10,
        };

        assert_eq!(minimum_deposit(&config, 0), Ok(1_280));
        assert_eq!(minimum_deposit(&config, 143), Ok(2_710));
    }

    #[test]
    fn deposit_overflow_is_reported() {
        let env = Env::default();
        let config = DepositConfig {
            token: Address::generate(&env),
            rate_per_byte: i128::MAX,
        };

        assert_eq!(
            minimum_deposit(&config, 1),
            Err(Error::ArithmeticOverflow)
        );
    }
}
