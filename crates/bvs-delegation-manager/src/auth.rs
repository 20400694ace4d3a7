use crate::ContractError;
use bvs_library::ownership;
use cosmwasm_std::{Addr, Deps, DepsMut, Event, MessageInfo, Response, Storage};
use cw_storage_plus::Item;

const CUSTODY: Item<Addr> = Item::new("custody");
const FREEZE_ORACLE: Item<Addr> = Item::new("freeze_oracle");

/// Contract Control Plane, it defines how the contract messages get routed.
/// While instantiate creates the contract: gives the contract an address.
/// This sets up the contract for routing and access control management.
/// It can be called more than once to set new values but only by the owner.
pub fn set_routing(
    deps: DepsMut,
    info: MessageInfo,
    custody: Addr,
    freeze_oracle: Addr,
) -> Result<Response, ContractError> {
    ownership::assert_owner(deps.storage, &info)?;

    CUSTODY.save(deps.storage, &custody)?;
    FREEZE_ORACLE.save(deps.storage, &freeze_oracle)?;

    Ok(Response::new().add_event(
        Event::new("SetRouting")
            .add_attribute("custody", custody.as_str())
            .add_attribute("freeze_oracle", freeze_oracle.as_str()),
    ))
}

/// Get the custody contract address.
/// If SetRouting has not been called, it will return an Unauthorized error
pub fn get_custody(storage: &dyn Storage) -> Result<Addr, ContractError> {
    CUSTODY
        .may_load(storage)?
        .ok_or(ContractError::Unauthorized)
}

pub fn assert_custody(deps: Deps, info: &MessageInfo) -> Result<(), ContractError> {
    let custody = get_custody(deps.storage)?;
    if info.sender != custody {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

/// Get the freeze oracle address.
/// If SetRouting has not been called, it will return an Unauthorized error
pub fn get_freeze_oracle(storage: &dyn Storage) -> Result<Addr, ContractError> {
    FREEZE_ORACLE
        .may_load(storage)?
        .ok_or(ContractError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bvs_library::ownership::OwnershipError;
    use cosmwasm_std::testing::{message_info, mock_dependencies};

    #[test]
    fn test_set_routing() {
        let mut deps = mock_dependencies();

        let owner = deps.api.addr_make("owner");
        ownership::set_owner(&mut deps.storage, &owner).unwrap();

        let custody = deps.api.addr_make("custody");
        let freeze_oracle = deps.api.addr_make("freeze_oracle");

        let res = set_routing(
            deps.as_mut(),
            message_info(&owner, &[]),
            custody.clone(),
            freeze_oracle.clone(),
        )
        .unwrap();

        assert_eq!(
            res,
            Response::new().add_event(
                Event::new("SetRouting")
                    .add_attribute("custody", custody.as_str())
                    .add_attribute("freeze_oracle", freeze_oracle.as_str())
            )
        );
        assert_eq!(get_custody(&deps.storage).unwrap(), custody);
        assert_eq!(get_freeze_oracle(&deps.storage).unwrap(), freeze_oracle);
    }

    #[test]
    fn test_set_routing_not_authorized() {
        let mut deps = mock_dependencies();

        let owner = deps.api.addr_make("owner");
        ownership::set_owner(&mut deps.storage, &owner).unwrap();

        let sender = deps.api.addr_make("random_sender");
        let custody = deps.api.addr_make("custody");
        let freeze_oracle = deps.api.addr_make("freeze_oracle");
        let err = set_routing(
            deps.as_mut(),
            message_info(&sender, &[]),
            custody,
            freeze_oracle,
        )
        .unwrap_err();

        assert_eq!(err, ContractError::Ownership(OwnershipError::Unauthorized));
    }

    #[test]
    fn test_routing_not_set() {
        let deps = mock_dependencies();

        assert_eq!(
            get_custody(&deps.storage),
            Err(ContractError::Unauthorized)
        );
        assert_eq!(
            get_freeze_oracle(&deps.storage),
            Err(ContractError::Unauthorized)
        );

        let info = message_info(&deps.api.addr_make("custody"), &[]);
        assert_eq!(
            assert_custody(deps.as_ref(), &info),
            Err(ContractError::Unauthorized)
        );
    }

    #[test]
    fn test_assert_custody() {
        let mut deps = mock_dependencies();

        let custody = deps.api.addr_make("custody");
        CUSTODY.save(&mut deps.storage, &custody).unwrap();

        assert!(assert_custody(deps.as_ref(), &message_info(&custody, &[])).is_ok());

        let not_custody = deps.api.addr_make("not_custody");
        assert_eq!(
            assert_custody(deps.as_ref(), &message_info(&not_custody, &[])),
            Err(ContractError::Unauthorized)
        );
    }
}
