use cosmwasm_std::{Addr, Event, MessageInfo, Response, StdError, StdResult, Storage};
use cw_storage_plus::Item;

const OWNER: Item<Addr> = Item::new("_owner");

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum OwnershipError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized")]
    Unauthorized,
}

/// Store the owner of the contract.
/// Internal, no sender checks are done: call it from `instantiate` only.
pub fn set_owner(storage: &mut dyn Storage, owner: &Addr) -> Result<(), OwnershipError> {
    OWNER.save(storage, owner)?;
    Ok(())
}

/// Returns [StdError::NotFound] if [set_owner] was never called.
pub fn get_owner(storage: &dyn Storage) -> StdResult<Addr> {
    OWNER.may_load(storage)?.ok_or(StdError::not_found("owner"))
}

/// Hand the contract over to `new_owner`, the sender must be the current owner.
///
/// The CosmWasm admin can always override this through `migrate`,
/// so a single-step transfer is sufficient here.
pub fn transfer_ownership(
    storage: &mut dyn Storage,
    info: MessageInfo,
    new_owner: Addr,
) -> Result<Response, OwnershipError> {
    let old_owner = get_owner(storage)?;
    if info.sender != old_owner {
        return Err(OwnershipError::Unauthorized);
    }

    OWNER.save(storage, &new_owner)?;
    Ok(Response::new().add_event(
        Event::new("TransferredOwnership")
            .add_attribute("old_owner", old_owner.as_str())
            .add_attribute("new_owner", new_owner.as_str()),
    ))
}

/// Fails with [OwnershipError::Unauthorized] unless `info.sender` is the owner.
pub fn assert_owner(storage: &dyn Storage, info: &MessageInfo) -> Result<(), OwnershipError> {
    if info.sender != get_owner(storage)? {
        return Err(OwnershipError::Unauthorized);
    }
    Ok(())
}
