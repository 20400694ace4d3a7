#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;

use crate::auth;
use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::state::HOOK_ISOLATION;
use bvs_library::addr::validate_addrs;
use bvs_library::ownership;
use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response, StdError, StdResult,
};
use cw2::set_contract_version;

const CONTRACT_NAME: &str = concat!("crates.io:", env!("CARGO_PKG_NAME"));
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reply id of operator hook calls dispatched with `reply_on_error`.
const HOOK_REPLY_ID: u64 = 1;

/// Methods checked against the pauser, rendered in snake_case (e.g. `new_delegation`).
#[derive(bvs_pauser::api::Display)]
#[strum(serialize_all = "snake_case")]
enum Pausable {
    NewDelegation,
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let owner = deps.api.addr_validate(&msg.owner)?;
    ownership::set_owner(deps.storage, &owner)?;

    let pauser = deps.api.addr_validate(&msg.pauser)?;
    bvs_pauser::api::set_pauser(deps.storage, &pauser)?;

    HOOK_ISOLATION.save(deps.storage, &msg.isolate_hook_failures)?;

    let separator = crate::domain::init(deps.storage, &env)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", owner)
        .add_attribute("pauser", pauser)
        .add_attribute("domain_separator", separator.to_hex()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::RegisterAsOperator {
            operator_details,
            metadata_uri,
        } => execute::register_as_operator(deps, info, operator_details, metadata_uri),
        ExecuteMsg::ModifyOperatorDetails {
            new_operator_details,
        } => execute::modify_operator_details(deps, info, new_operator_details),
        ExecuteMsg::UpdateOperatorMetadataUri { metadata_uri } => {
            execute::update_operator_metadata_uri(deps, info, metadata_uri)
        }
        ExecuteMsg::DelegateTo {
            operator,
            approver_signature,
        } => {
            bvs_pauser::api::assert_can_execute(
                deps.as_ref(),
                &env,
                &info,
                &Pausable::NewDelegation,
            )?;
            let operator = deps.api.addr_validate(&operator)?;
            execute::delegate_to(deps, env, info, operator, approver_signature)
        }
        ExecuteMsg::DelegateToBySignature {
            staker,
            operator,
            staker_signature,
            approver_signature,
        } => {
            bvs_pauser::api::assert_can_execute(
                deps.as_ref(),
                &env,
                &info,
                &Pausable::NewDelegation,
            )?;
            let staker = deps.api.addr_validate(&staker)?;
            let operator = deps.api.addr_validate(&operator)?;
            execute::delegate_to_by_signature(
                deps,
                env,
                info,
                staker,
                operator,
                staker_signature,
                approver_signature,
            )
        }
        ExecuteMsg::Undelegate { staker } => {
            let staker = deps.api.addr_validate(&staker)?;
            execute::undelegate(deps, info, staker)
        }
        ExecuteMsg::ForceUndelegation { staker, operator } => {
            let staker = deps.api.addr_validate(&staker)?;
            let operator = deps.api.addr_validate(&operator)?;
            execute::force_undelegation(deps, info, staker, operator)
        }
        ExecuteMsg::IncreaseDelegatedShares {
            staker,
            strategy,
            shares,
        } => {
            let staker = deps.api.addr_validate(&staker)?;
            let strategy = deps.api.addr_validate(&strategy)?;
            execute::increase_delegated_shares(deps, info, staker, strategy, shares)
        }
        ExecuteMsg::DecreaseDelegatedShares {
            staker,
            strategies,
            shares,
        } => {
            let staker = deps.api.addr_validate(&staker)?;
            let strategies = validate_addrs(deps.api, &strategies)?;
            execute::decrease_delegated_shares(deps, info, staker, strategies, shares)
        }
        ExecuteMsg::TransferOwnership { new_owner } => {
            let new_owner = deps.api.addr_validate(&new_owner)?;
            ownership::transfer_ownership(deps.storage, info, new_owner)
                .map_err(ContractError::Ownership)
        }
        ExecuteMsg::SetRouting {
            custody,
            freeze_oracle,
        } => {
            let custody = deps.api.addr_validate(&custody)?;
            let freeze_oracle = deps.api.addr_validate(&freeze_oracle)?;
            auth::set_routing(deps, info, custody, freeze_oracle)
        }
    }
}

mod execute {
    use super::*;
    use crate::msg::{
        custody, delegation_terms, freeze_oracle, OperatorDetails, SignatureWithExpiry,
    };
    use crate::signature::{
        consume_and_verify, delegation_approval_struct_hash, staker_delegation_struct_hash,
    };
    use crate::state::{
        Operator, Relationship, APPROVER_NONCES, DELEGATED_TO, OPERATORS, OPERATOR_SHARES,
        STAKER_NONCES,
    };
    use cosmwasm_std::{Addr, Event, Storage, SubMsg, Uint128, WasmMsg};
    use std::collections::BTreeMap;

    fn operator_event(name: &str, operator: &Addr, details: &Operator) -> Event {
        let mut event = Event::new(name)
            .add_attribute("operator", operator.as_str())
            .add_attribute("earnings_receiver", details.earnings_receiver.as_str())
            .add_attribute(
                "staker_opt_out_window_blocks",
                details.staker_opt_out_window_blocks.to_string(),
            );
        if let Some(approver) = &details.delegation_approver {
            event = event.add_attribute("delegation_approver", approver.as_str());
        }
        if let Some(terms) = &details.delegation_terms {
            event = event.add_attribute("delegation_terms", terms.as_str());
        }
        event
    }

    /// Register the sender as an operator, the operator is delegated to itself from then on.
    pub fn register_as_operator(
        deps: DepsMut,
        info: MessageInfo,
        details: OperatorDetails,
        metadata_uri: String,
    ) -> Result<Response, ContractError> {
        let operator = info.sender;

        if OPERATORS.has(deps.storage, &operator) {
            return Err(ContractError::AlreadyRegistered);
        }
        if DELEGATED_TO.has(deps.storage, &operator) {
            return Err(ContractError::AlreadyDelegated);
        }
        let details = details.validate(deps.api)?;

        OPERATORS.save(deps.storage, &operator, &details)?;

        Ok(Response::new()
            .add_event(operator_event("OperatorRegistered", &operator, &details))
            .add_event(
                Event::new("StakerDelegated")
                    .add_attribute("staker", operator.as_str())
                    .add_attribute("operator", operator.as_str()),
            )
            .add_event(
                Event::new("OperatorMetadataURIUpdated")
                    .add_attribute("operator", operator.as_str())
                    .add_attribute("metadata_uri", metadata_uri),
            ))
    }

    /// Replace the sender's operator details.
    ///
    /// Only registered operators may call this; any other sender gets `UnregisteredOperator`,
    /// so details never exist for an address that is not self-delegated.
    pub fn modify_operator_details(
        deps: DepsMut,
        info: MessageInfo,
        details: OperatorDetails,
    ) -> Result<Response, ContractError> {
        let operator = info.sender;

        let current = OPERATORS
            .may_load(deps.storage, &operator)?
            .ok_or(ContractError::UnregisteredOperator)?;
        let details = details.validate(deps.api)?;
        if details.staker_opt_out_window_blocks < current.staker_opt_out_window_blocks {
            return Err(ContractError::CannotBeDecreased);
        }

        OPERATORS.save(deps.storage, &operator, &details)?;

        Ok(Response::new().add_event(operator_event(
            "OperatorDetailsModified",
            &operator,
            &details,
        )))
    }

    pub fn update_operator_metadata_uri(
        deps: DepsMut,
        info: MessageInfo,
        metadata_uri: String,
    ) -> Result<Response, ContractError> {
        if !OPERATORS.has(deps.storage, &info.sender) {
            return Err(ContractError::UnregisteredOperator);
        }

        Ok(Response::new().add_event(
            Event::new("OperatorMetadataURIUpdated")
                .add_attribute("operator", info.sender.as_str())
                .add_attribute("metadata_uri", metadata_uri),
        ))
    }

    pub fn delegate_to(
        deps: DepsMut,
        env: Env,
        info: MessageInfo,
        operator: Addr,
        approver_signature: Option<SignatureWithExpiry>,
    ) -> Result<Response, ContractError> {
        let staker = info.sender.clone();
        delegate(deps, &env, &info.sender, staker, operator, approver_signature)
    }

    /// The staker authorizes the delegation with `staker_signature`,
    /// the sender takes the place of the caller for the approver check.
    pub fn delegate_to_by_signature(
        mut deps: DepsMut,
        env: Env,
        info: MessageInfo,
        staker: Addr,
        operator: Addr,
        staker_signature: SignatureWithExpiry,
        approver_signature: Option<SignatureWithExpiry>,
    ) -> Result<Response, ContractError> {
        consume_and_verify(
            &mut deps,
            &env,
            &STAKER_NONCES,
            &staker,
            &staker_signature,
            |nonce| staker_delegation_struct_hash(&staker, &operator, nonce, staker_signature.expiry),
        )?;

        delegate(deps, &env, &info.sender, staker, operator, approver_signature)
    }

    fn delegate(
        mut deps: DepsMut,
        env: &Env,
        caller: &Addr,
        staker: Addr,
        operator: Addr,
        approver_signature: Option<SignatureWithExpiry>,
    ) -> Result<Response, ContractError> {
        if Relationship::load(deps.storage, &staker)?.is_delegated() {
            return Err(ContractError::AlreadyDelegated);
        }

        let details = OPERATORS
            .may_load(deps.storage, &operator)?
            .ok_or(ContractError::UnregisteredOperator)?;

        let oracle = auth::get_freeze_oracle(deps.storage)?;
        let freeze_oracle::IsFrozenResponse(frozen) = deps.querier.query_wasm_smart(
            oracle,
            &freeze_oracle::QueryMsg::IsFrozen {
                operator: operator.to_string(),
            },
        )?;
        if frozen {
            return Err(ContractError::FrozenOperator);
        }

        // the approver and the operator approve implicitly
        if let Some(approver) = details.delegation_approver {
            if *caller != approver && *caller != operator {
                let signature =
                    approver_signature.ok_or(ContractError::ApproverSignatureRequired)?;
                consume_and_verify(
                    &mut deps,
                    env,
                    &APPROVER_NONCES,
                    &approver,
                    &signature,
                    |nonce| {
                        delegation_approval_struct_hash(
                            &approver,
                            &staker,
                            &operator,
                            nonce,
                            signature.expiry,
                        )
                    },
                )?;
            }
        }

        DELEGATED_TO.save(deps.storage, &staker, &operator)?;

        Ok(Response::new().add_event(
            Event::new("StakerDelegated")
                .add_attribute("staker", staker.as_str())
                .add_attribute("operator", operator.as_str()),
        ))
    }

    /// Custody only. Undelegating a staker that is not delegated does nothing.
    pub fn undelegate(
        deps: DepsMut,
        info: MessageInfo,
        staker: Addr,
    ) -> Result<Response, ContractError> {
        auth::assert_custody(deps.as_ref(), &info)?;

        match Relationship::load(deps.storage, &staker)? {
            Relationship::SelfDelegatedOperator => Err(ContractError::OperatorCannotUndelegateSelf),
            Relationship::Undelegated => Ok(Response::new()),
            Relationship::DelegatedTo(operator) => {
                DELEGATED_TO.remove(deps.storage, &staker);

                Ok(Response::new().add_event(
                    Event::new("StakerUndelegated")
                        .add_attribute("staker", staker.as_str())
                        .add_attribute("operator", operator.as_str()),
                ))
            }
        }
    }

    /// The operator (or its approver) asks custody to withdraw everything of `staker`,
    /// custody then calls back [undelegate].
    pub fn force_undelegation(
        deps: DepsMut,
        info: MessageInfo,
        staker: Addr,
        operator: Addr,
    ) -> Result<Response, ContractError> {
        let details = OPERATORS
            .may_load(deps.storage, &operator)?
            .ok_or(ContractError::UnregisteredOperator)?;

        if info.sender != operator && Some(&info.sender) != details.delegation_approver.as_ref() {
            return Err(ContractError::Unauthorized);
        }

        match Relationship::load(deps.storage, &staker)? {
            Relationship::SelfDelegatedOperator => {
                return Err(ContractError::OperatorCannotUndelegateSelf)
            }
            Relationship::DelegatedTo(current) if current == operator => {}
            _ => return Err(ContractError::NotCurrentlyDelegated),
        }

        let custody_addr = auth::get_custody(deps.storage)?;
        let msg = WasmMsg::Execute {
            contract_addr: custody_addr.to_string(),
            msg: to_json_binary(&custody::ExecuteMsg::ForceTotalWithdrawal {
                staker: staker.to_string(),
            })?,
            funds: vec![],
        };

        Ok(Response::new()
            .add_event(
                Event::new("StakerForceUndelegated")
                    .add_attribute("staker", staker.as_str())
                    .add_attribute("operator", operator.as_str())
                    .add_attribute("sender", info.sender.as_str()),
            )
            .add_message(msg))
    }

    /// Custody only. No-op for undelegated stakers.
    pub fn increase_delegated_shares(
        deps: DepsMut,
        info: MessageInfo,
        staker: Addr,
        strategy: Addr,
        shares: Uint128,
    ) -> Result<Response, ContractError> {
        auth::assert_custody(deps.as_ref(), &info)?;

        let Some(operator) = Relationship::load(deps.storage, &staker)?.operator(&staker) else {
            return Ok(Response::new());
        };

        let key = (&operator, &strategy);
        let current = OPERATOR_SHARES
            .may_load(deps.storage, key)?
            .unwrap_or_default();
        let new_shares = current.checked_add(shares)?;
        OPERATOR_SHARES.save(deps.storage, key, &new_shares)?;

        let mut response = Response::new().add_event(
            Event::new("OperatorSharesIncreased")
                .add_attribute("operator", operator.as_str())
                .add_attribute("staker", staker.as_str())
                .add_attribute("strategy", strategy.as_str())
                .add_attribute("shares", shares.to_string()),
        );

        let details = OPERATORS.may_load(deps.storage, &operator)?;
        if let Some(terms) = details.and_then(|d| d.delegation_terms) {
            let hook_msg = delegation_terms::ExecuteMsg::OnSharesReceived {
                staker: staker.to_string(),
                strategies: vec![strategy.to_string()],
                shares: vec![shares],
            };
            response = response.add_submessage(hook(deps.storage, &operator, &terms, &hook_msg)?);
        }

        Ok(response)
    }

    /// Custody only. No-op for undelegated stakers.
    /// Every strategy is checked for underflow before anything is written.
    pub fn decrease_delegated_shares(
        deps: DepsMut,
        info: MessageInfo,
        staker: Addr,
        strategies: Vec<Addr>,
        shares: Vec<Uint128>,
    ) -> Result<Response, ContractError> {
        auth::assert_custody(deps.as_ref(), &info)?;

        if strategies.len() != shares.len() {
            return Err(ContractError::InputLengthMismatch);
        }

        let Some(operator) = Relationship::load(deps.storage, &staker)?.operator(&staker) else {
            return Ok(Response::new());
        };

        // a strategy may be listed more than once
        let mut updated: BTreeMap<&Addr, Uint128> = BTreeMap::new();
        for (strategy, amount) in strategies.iter().zip(shares.iter()) {
            let current = match updated.get(strategy) {
                Some(value) => *value,
                None => OPERATOR_SHARES
                    .may_load(deps.storage, (&operator, strategy))?
                    .unwrap_or_default(),
            };
            let next = current
                .checked_sub(*amount)
                .map_err(|_| ContractError::LedgerUnderflow)?;
            updated.insert(strategy, next);
        }

        for (strategy, value) in &updated {
            OPERATOR_SHARES.save(deps.storage, (&operator, *strategy), value)?;
        }

        let mut response = Response::new();
        for (strategy, amount) in strategies.iter().zip(shares.iter()) {
            response = response.add_event(
                Event::new("OperatorSharesDecreased")
                    .add_attribute("operator", operator.as_str())
                    .add_attribute("staker", staker.as_str())
                    .add_attribute("strategy", strategy.as_str())
                    .add_attribute("shares", amount.to_string()),
            );
        }

        let details = OPERATORS.may_load(deps.storage, &operator)?;
        if let Some(terms) = details.and_then(|d| d.delegation_terms) {
            let hook_msg = delegation_terms::ExecuteMsg::OnSharesWithdrawn {
                staker: staker.to_string(),
                strategies: strategies.iter().map(Addr::to_string).collect(),
                shares,
            };
            response = response.add_submessage(hook(deps.storage, &operator, &terms, &hook_msg)?);
        }

        Ok(response)
    }

    /// Hook call to the operator's `delegation_terms` contract.
    /// With hook isolation, a failure is caught by [reply](super::reply) instead of
    /// reverting the message.
    fn hook(
        storage: &dyn Storage,
        operator: &Addr,
        terms: &Addr,
        msg: &delegation_terms::ExecuteMsg,
    ) -> Result<SubMsg, ContractError> {
        let wasm_msg = WasmMsg::Execute {
            contract_addr: terms.to_string(),
            msg: to_json_binary(msg)?,
            funds: vec![],
        };

        if HOOK_ISOLATION.load(storage)? {
            return Ok(SubMsg::reply_on_error(wasm_msg, HOOK_REPLY_ID)
                .with_payload(to_json_binary(operator)?));
        }
        Ok(SubMsg::new(wasm_msg))
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(_deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        HOOK_REPLY_ID => reply::hook_failed(msg),
        id => Err(StdError::generic_err(format!("Unknown reply id: {id}")).into()),
    }
}

mod reply {
    use super::*;
    use cosmwasm_std::{from_json, Addr, Event, SubMsgResult};

    pub fn hook_failed(msg: Reply) -> Result<Response, ContractError> {
        let SubMsgResult::Err(error) = msg.result else {
            return Ok(Response::new());
        };
        let operator: Addr = from_json(&msg.payload)?;

        Ok(Response::new().add_event(
            Event::new("OperatorHookFailed")
                .add_attribute("operator", operator.as_str())
                .add_attribute("error", error),
        ))
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::IsDelegated { staker } => {
            let staker = deps.api.addr_validate(&staker)?;
            to_json_binary(&query::is_delegated(deps, staker)?)
        }
        QueryMsg::IsNotDelegated { staker } => {
            let staker = deps.api.addr_validate(&staker)?;
            to_json_binary(&query::is_not_delegated(deps, staker)?)
        }
        QueryMsg::DelegatedTo { staker } => {
            let staker = deps.api.addr_validate(&staker)?;
            to_json_binary(&query::delegated_to(deps, staker)?)
        }
        QueryMsg::IsOperator { operator } => {
            let operator = deps.api.addr_validate(&operator)?;
            to_json_binary(&query::is_operator(deps, operator)?)
        }
        QueryMsg::OperatorDetails { operator } => {
            let operator = deps.api.addr_validate(&operator)?;
            to_json_binary(&query::operator_details(deps, operator)?)
        }
        QueryMsg::DelegationApprover { operator } => {
            let operator = deps.api.addr_validate(&operator)?;
            to_json_binary(&query::delegation_approver(deps, operator)?)
        }
        QueryMsg::OperatorShares {
            operator,
            strategies,
        } => {
            let operator = deps.api.addr_validate(&operator)?;
            let strategies = validate_addrs(deps.api, &strategies)?;
            to_json_binary(&query::operator_shares(deps, operator, strategies)?)
        }
        QueryMsg::StakerNonce { staker } => {
            let staker = deps.api.addr_validate(&staker)?;
            to_json_binary(&query::staker_nonce(deps, staker)?)
        }
        QueryMsg::ApproverNonce { approver } => {
            let approver = deps.api.addr_validate(&approver)?;
            to_json_binary(&query::approver_nonce(deps, approver)?)
        }
        QueryMsg::DomainSeparator {} => to_json_binary(&query::domain_separator(deps, env)?),
        QueryMsg::StakerDelegationDigestHash {
            staker,
            operator,
            expiry,
        } => {
            let staker = deps.api.addr_validate(&staker)?;
            let operator = deps.api.addr_validate(&operator)?;
            to_json_binary(&query::staker_delegation_digest_hash(
                deps, env, staker, operator, expiry,
            )?)
        }
        QueryMsg::DelegationApprovalDigestHash {
            approver,
            staker,
            operator,
            expiry,
        } => {
            let approver = deps.api.addr_validate(&approver)?;
            let staker = deps.api.addr_validate(&staker)?;
            let operator = deps.api.addr_validate(&operator)?;
            to_json_binary(&query::delegation_approval_digest_hash(
                deps, env, approver, staker, operator, expiry,
            )?)
        }
    }
}

mod query {
    use super::*;
    use crate::domain::typed_digest;
    use crate::msg::{
        DelegatedResponse, DelegatedToResponse, DelegationApproverResponse, DigestResponse,
        IsOperatorResponse, NonceResponse, OperatorDetails, OperatorDetailsResponse,
        OperatorSharesResponse,
    };
    use crate::signature::{delegation_approval_struct_hash, staker_delegation_struct_hash};
    use crate::state::{Relationship, APPROVER_NONCES, OPERATORS, OPERATOR_SHARES, STAKER_NONCES};
    use cosmwasm_std::{Addr, HexBinary};

    pub fn is_delegated(deps: Deps, staker: Addr) -> StdResult<DelegatedResponse> {
        let relationship = Relationship::load(deps.storage, &staker)?;
        Ok(DelegatedResponse(relationship.is_delegated()))
    }

    pub fn is_not_delegated(deps: Deps, staker: Addr) -> StdResult<DelegatedResponse> {
        let DelegatedResponse(delegated) = is_delegated(deps, staker)?;
        Ok(DelegatedResponse(!delegated))
    }

    pub fn delegated_to(deps: Deps, staker: Addr) -> StdResult<DelegatedToResponse> {
        let relationship = Relationship::load(deps.storage, &staker)?;
        Ok(DelegatedToResponse(relationship.operator(&staker)))
    }

    pub fn is_operator(deps: Deps, operator: Addr) -> StdResult<IsOperatorResponse> {
        Ok(IsOperatorResponse(OPERATORS.has(deps.storage, &operator)))
    }

    pub fn operator_details(deps: Deps, operator: Addr) -> StdResult<OperatorDetailsResponse> {
        let details = OPERATORS.may_load(deps.storage, &operator)?;
        Ok(OperatorDetailsResponse(details.map(OperatorDetails::from)))
    }

    pub fn delegation_approver(
        deps: Deps,
        operator: Addr,
    ) -> StdResult<DelegationApproverResponse> {
        let details = OPERATORS.may_load(deps.storage, &operator)?;
        Ok(DelegationApproverResponse(
            details.and_then(|d| d.delegation_approver),
        ))
    }

    pub fn operator_shares(
        deps: Deps,
        operator: Addr,
        strategies: Vec<Addr>,
    ) -> StdResult<OperatorSharesResponse> {
        let shares = strategies
            .iter()
            .map(|strategy| {
                OPERATOR_SHARES
                    .may_load(deps.storage, (&operator, strategy))
                    .map(Option::unwrap_or_default)
            })
            .collect::<StdResult<Vec<_>>>()?;
        Ok(OperatorSharesResponse(shares))
    }

    pub fn staker_nonce(deps: Deps, staker: Addr) -> StdResult<NonceResponse> {
        let nonce = STAKER_NONCES.may_load(deps.storage, &staker)?;
        Ok(NonceResponse(nonce.unwrap_or_default()))
    }

    pub fn approver_nonce(deps: Deps, approver: Addr) -> StdResult<NonceResponse> {
        let nonce = APPROVER_NONCES.may_load(deps.storage, &approver)?;
        Ok(NonceResponse(nonce.unwrap_or_default()))
    }

    pub fn domain_separator(deps: Deps, env: Env) -> StdResult<DigestResponse> {
        Ok(DigestResponse(crate::domain::separator(deps.storage, &env)?))
    }

    pub fn staker_delegation_digest_hash(
        deps: Deps,
        env: Env,
        staker: Addr,
        operator: Addr,
        expiry: u64,
    ) -> StdResult<DigestResponse> {
        let NonceResponse(nonce) = staker_nonce(deps, staker.clone())?;
        let struct_hash = staker_delegation_struct_hash(&staker, &operator, nonce, expiry);
        let separator = crate::domain::separator(deps.storage, &env)?;
        Ok(DigestResponse(HexBinary::from(typed_digest(
            &separator,
            &struct_hash,
        ))))
    }

    pub fn delegation_approval_digest_hash(
        deps: Deps,
        env: Env,
        approver: Addr,
        staker: Addr,
        operator: Addr,
        expiry: u64,
    ) -> StdResult<DigestResponse> {
        let NonceResponse(nonce) = approver_nonce(deps, approver.clone())?;
        let struct_hash =
            delegation_approval_struct_hash(&approver, &staker, &operator, nonce, expiry);
        let separator = crate::domain::separator(deps.storage, &env)?;
        Ok(DigestResponse(HexBinary::from(typed_digest(
            &separator,
            &struct_hash,
        ))))
    }
}
