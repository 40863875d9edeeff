#![no_std]
use soroban_sdk::{
    contract, contracterror, contractimpl, log, symbol_short, Address, BytesN, Env, String,
};

mod deposit;
mod records;
mod roles;
mod storage_types;

use roles::Role;
pub use storage_types::{ChangeRequest, ChangeRequestTarget, DepositConfig, Favorites};
use storage_types::{DataKey, INSTANCE_TTL_EXTEND, INSTANCE_TTL_THRESHOLD};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    DuplicateRequest = 4,
    NotFound = 5,
    RecordMissing = 6,
    InsufficientFunds = 7,
    InvalidMutation = 8,
    FavoritesAlreadyExist = 9,
    InvalidConfig = 10,
    ArithmeticOverflow = 11,
}

#[contract]
pub struct FavoritesContract;

#[contractimpl]
impl FavoritesContract {
    /// Initialize the contract with an admin and the deposit settings. Only
    /// can be called once.
    ///
    /// # Arguments
    /// * `admin` - May change the deposit rate later on
    /// * `token` - Token deposits are escrowed in
    /// * `rate_per_byte` - Deposit charged per stored byte
    pub fn initialize(
        e: Env,
        admin: Address,
        token: Address,
        rate_per_byte: i128,
    ) -> Result<(), Error> {
        if e.storage().instance().has(&DataKey::Admin) {
            return Err(Error::AlreadyInitialized);
        }
        if rate_per_byte < 0 {
            return Err(Error::InvalidConfig);
        }

        e.storage().instance().set(&DataKey::Admin, &admin);
        deposit::write_config(&e, &DepositConfig { token, rate_per_byte });
        bump_instance(&e);
        Ok(())
    }

    /// Change the deposit rate. Requests that are already open keep the
    /// deposit they were created with.
    pub fn set_deposit_rate(e: Env, rate_per_byte: i128) -> Result<(), Error> {
        let admin: Address = e
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;
        admin.require_auth();

        if rate_per_byte < 0 {
            return Err(Error::InvalidConfig);
        }

        let mut config = deposit::read_config(&e)?;
        config.rate_per_byte = rate_per_byte;
        deposit::write_config(&e, &config);
        bump_instance(&e);

        log!(&e, "Deposit rate set to {}", rate_per_byte);
        Ok(())
    }

    pub fn get_deposit_config(e: Env) -> Result<DepositConfig, Error> {
        deposit::read_config(&e)
    }

    /// Deposit a new change request would escrow right now.
    pub fn change_request_deposit(e: Env) -> Result<i128, Error> {
        let config = deposit::read_config(&e)?;
        deposit::minimum_deposit(&config, ChangeRequest::SPACE)
    }

    /// Create the favorites record of `user`. The user pays its deposit.
    pub fn set_favorites(e: Env, user: Address, number: u64, color: String) -> Result<(), Error> {
        user.require_auth();
        records::validate_color(&color)?;

        if records::has_favorites(&e, &user) {
            return Err(Error::FavoritesAlreadyExist);
        }

        let config = deposit::read_config(&e)?;
        let amount = deposit::minimum_deposit(&config, Favorites::SPACE)?;
        deposit::escrow(&e, &config, &user, amount)?;

        log!(
            &e,
            "User {}'s favorite number is {} and favorite color is: {}",
            user,
            number,
            color
        );

        records::write_favorites(
            &e,
            &Favorites {
                owner: user.clone(),
                number,
                color: color.clone(),
            },
        );
        e.events()
            .publish((symbol_short!("favs"), symbol_short!("set"), user), (number, color));
        Ok(())
    }

    /// Overwrite both favorites of `user` directly.
    pub fn update_favorites(
        e: Env,
        user: Address,
        number: u64,
        color: String,
    ) -> Result<(), Error> {
        user.require_auth();
        records::validate_color(&color)?;

        let mut favorites = records::read_favorites(&e, &user).ok_or(Error::RecordMissing)?;
        favorites.number = number;
        favorites.color = color.clone();
        records::write_favorites(&e, &favorites);

        e.events()
            .publish((symbol_short!("favs"), symbol_short!("updated"), user), (number, color));
        Ok(())
    }

    pub fn get_favorites(e: Env, user: Address) -> Option<Favorites> {
        records::read_favorites(&e, &user)
    }

    /// Id under which a request from `requester` against `user` is stored.
    pub fn change_request_id(e: Env, requester: Address, user: Address) -> BytesN<32> {
        records::change_request_id(&e, &requester, &user)
    }

    /// Propose a change to the favorites of `user`. The requester escrows a
    /// deposit that is returned once the request is closed.
    ///
    /// # Arguments
    /// * `requester` - Signer, pays the deposit
    /// * `user` - Owner of the favorites to change
    /// * `target` - The field to change and its new value
    pub fn create_change_request(
        e: Env,
        requester: Address,
        user: Address,
        target: ChangeRequestTarget,
    ) -> Result<BytesN<32>, Error> {
        // Only the requester can commit their own funds
        requester.require_auth();

        if let ChangeRequestTarget::Color(new_color) = &target {
            records::validate_color(new_color)?;
        }

        let config = deposit::read_config(&e)?;
        if !records::has_favorites(&e, &user) {
            return Err(Error::RecordMissing);
        }

        // One open request per requester and user
        let id = records::change_request_id(&e, &requester, &user);
        if records::has_change_request(&e, &id) {
            return Err(Error::DuplicateRequest);
        }

        // Escrow the deposit before anything is stored
        let amount = deposit::minimum_deposit(&config, ChangeRequest::SPACE)?;
        deposit::escrow(&e, &config, &requester, amount)?;

        match &target {
            ChangeRequestTarget::Number(new_number) => {
                log!(&e, "Request for user {} to change number to {}", user, *new_number)
            }
            ChangeRequestTarget::Color(new_color) => {
                log!(&e, "Request for user {} to change color to {}", user, new_color.clone())
            }
        }

        records::write_change_request(
            &e,
            &id,
            &ChangeRequest {
                requester: requester.clone(),
                user: user.clone(),
                target: target.clone(),
                deposit: amount,
            },
        );
        e.events().publish(
            (symbol_short!("request"), symbol_short!("created"), id.clone()),
            (requester, user, target, amount),
        );

        Ok(id)
    }

    /// Apply a pending request to the favorites of its target user and
    /// refund the deposit to the requester. Only the target user may accept.
    pub fn accept_change_request(
        e: Env,
        approver: Address,
        request_id: BytesN<32>,
    ) -> Result<(), Error> {
        let request = records::read_change_request(&e, &request_id).ok_or(Error::NotFound)?;

        // The requester's signature does not count here
        roles::authorize(&approver, &request, &[Role::Approver])?;

        let mut favorites =
            records::read_favorites(&e, &request.user).ok_or(Error::RecordMissing)?;
        let config = deposit::read_config(&e)?;

        // Apply the change to the current favorites
        match &request.target {
            ChangeRequestTarget::Number(new_number) => {
                log!(
                    &e,
                    "Updating user {} to have a new favorite number: {}",
                    request.user,
                    *new_number
                );
                favorites.number = *new_number;
            }
            ChangeRequestTarget::Color(new_color) => {
                records::validate_color(new_color)?;
                log!(
                    &e,
                    "Updating user {} to have a new favorite color: {}",
                    request.user,
                    new_color.clone()
                );
                favorites.color = new_color.clone();
            }
        }

        // Store the favorites, then drop the request and refund its deposit
        records::write_favorites(&e, &favorites);
        close_request(&e, &config, &request_id, &request);

        e.events().publish(
            (symbol_short!("request"), symbol_short!("accepted"), request_id),
            (request.requester, request.user, request.target),
        );
        Ok(())
    }

    /// Close a pending request without applying it. Either the requester or
    /// the target user may cancel; the deposit always goes to the requester.
    pub fn cancel_change_request(
        e: Env,
        caller: Address,
        request_id: BytesN<32>,
    ) -> Result<(), Error> {
        let request = records::read_change_request(&e, &request_id).ok_or(Error::NotFound)?;
        let role = roles::authorize(&caller, &request, &[Role::Requester, Role::Approver])?;
        let config = deposit::read_config(&e)?;

        close_request(&e, &config, &request_id, &request);

        let by = match role {
            Role::Requester => symbol_short!("requester"),
            Role::Approver => symbol_short!("user"),
        };
        e.events().publish(
            (symbol_short!("request"), symbol_short!("cancelled"), request_id),
            (request.requester, request.user, by),
        );
        Ok(())
    }

    pub fn get_change_request(e: Env, request_id: BytesN<32>) -> Option<ChangeRequest> {
        records::read_change_request(&e, &request_id)
    }
}

/// Drops the request and returns its deposit to the requester.
fn close_request(
    e: &Env,
    config: &DepositConfig,
    request_id: &BytesN<32>,
    request: &ChangeRequest,
) {
    records::remove_change_request(e, request_id);
    deposit::refund(e, config, &request.requester, request.deposit);
    log!(
        e,
        "Refunded {} to {} for closed request",
        request.deposit,
        request.requester.clone()
    );
}

fn bump_instance(e: &Env) {
    e.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}
