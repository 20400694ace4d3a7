#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::state::PAUSED;
use bvs_library::ownership;
use cosmwasm_std::{to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult};
use cw2::set_contract_version;

const CONTRACT_NAME: &str = concat!("crates.io:", env!("CARGO_PKG_NAME"));
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let owner = deps.api.addr_validate(&msg.owner)?;
    ownership::set_owner(deps.storage, &owner)?;

    PAUSED.save(deps.storage, &msg.initial_paused)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", msg.owner))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Pause {} => execute::pause(deps, info),
        ExecuteMsg::Unpause {} => execute::unpause(deps, info),
        ExecuteMsg::PauseMethod { contract, method } => {
            let contract = deps.api.addr_validate(&contract)?;
            execute::pause_method(deps, env, info, contract, method)
        }
        ExecuteMsg::UnpauseMethod { contract, method } => {
            let contract = deps.api.addr_validate(&contract)?;
            execute::unpause_method(deps, info, contract, method)
        }
        ExecuteMsg::TransferOwnership { new_owner } => {
            let new_owner = deps.api.addr_validate(&new_owner)?;
            ownership::transfer_ownership(deps.storage, info, new_owner)
                .map_err(ContractError::Ownership)
        }
    }
}

mod execute {
    use super::*;
    use crate::state::PAUSED_METHODS;
    use cosmwasm_std::Addr;

    pub fn pause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
        ownership::assert_owner(deps.storage, &info)?;

        PAUSED.save(deps.storage, &true)?;
        Ok(Response::new()
            .add_attribute("method", "pause")
            .add_attribute("sender", info.sender))
    }

    pub fn unpause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
        ownership::assert_owner(deps.storage, &info)?;

        PAUSED.save(deps.storage, &false)?;
        Ok(Response::new()
            .add_attribute("method", "unpause")
            .add_attribute("sender", info.sender))
    }

    pub fn pause_method(
        deps: DepsMut,
        env: Env,
        info: MessageInfo,
        contract: Addr,
        method: String,
    ) -> Result<Response, ContractError> {
        ownership::assert_owner(deps.storage, &info)?;

        PAUSED_METHODS.save(deps.storage, (&contract, method.as_str()), &env.block.height)?;
        Ok(Response::new()
            .add_attribute("method", "pause_method")
            .add_attribute("contract", contract)
            .add_attribute("paused_method", method))
    }

    pub fn unpause_method(
        deps: DepsMut,
        info: MessageInfo,
        contract: Addr,
        method: String,
    ) -> Result<Response, ContractError> {
        ownership::assert_owner(deps.storage, &info)?;

        PAUSED_METHODS.remove(deps.storage, (&contract, method.as_str()));
        Ok(Response::new()
            .add_attribute("method", "unpause_method")
            .add_attribute("contract", contract)
            .add_attribute("paused_method", method))
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::IsPaused { contract, method } => {
            let contract = deps.api.addr_validate(&contract)?;
            to_json_binary(&query::is_paused(deps, contract, method)?)
        }
        QueryMsg::CanExecute {
            contract,
            sender,
            method,
        } => {
            let contract = deps.api.addr_validate(&contract)?;
            let sender = deps.api.addr_validate(&sender)?;
            to_json_binary(&query::can_execute(deps, contract, sender, method)?)
        }
    }
}

mod query {
    use super::*;
    use crate::msg::{CanExecuteFlag, CanExecuteResponse, IsPausedResponse};
    use crate::state::{PAUSED, PAUSED_METHODS};
    use cosmwasm_std::Addr;

    fn paused(deps: Deps, contract: &Addr, method: &str) -> StdResult<bool> {
        if PAUSED.load(deps.storage)? {
            return Ok(true);
        }
        Ok(PAUSED_METHODS.has(deps.storage, (contract, method)))
    }

    /// A method is paused if the pauser is globally paused
    /// or the (contract, method) pair was paused with `PauseMethod`.
    pub fn is_paused(deps: Deps, contract: Addr, method: String) -> StdResult<IsPausedResponse> {
        Ok(IsPausedResponse::new(paused(deps, &contract, &method)?))
    }

    /// TODO(future): `_sender` is not used yet, reserved for per-sender allow lists.
    pub fn can_execute(
        deps: Deps,
        contract: Addr,
        _sender: Addr,
        method: String,
    ) -> StdResult<CanExecuteResponse> {
        if paused(deps, &contract, &method)? {
            return Ok(CanExecuteFlag::Paused.into());
        }
        Ok(CanExecuteFlag::CanExecute.into())
    }
}
