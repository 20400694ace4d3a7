use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, HexBinary, StdResult, Storage, Uint128};
use cw_storage_plus::{Item, Map};

/// 180 days of 12 second blocks.
pub const MAX_STAKER_OPT_OUT_WINDOW_BLOCKS: u64 = 180 * 24 * 60 * 60 / 12;

#[cw_serde]
pub struct Operator {
    pub earnings_receiver: Addr,
    pub delegation_approver: Option<Addr>,
    pub delegation_terms: Option<Addr>,
    pub staker_opt_out_window_blocks: u64,
}

/// Domain separator computed at instantiate, with the chain it was computed for.
#[cw_serde]
pub struct Domain {
    pub chain_id: String,
    pub separator: HexBinary,
}

/// Registered operators, an operator is never removed.
pub const OPERATORS: Map<&Addr, Operator> = Map::new("operators");

/// Staker => Operator, for stakers that are not operators themselves.
pub const DELEGATED_TO: Map<&Addr, Addr> = Map::new("delegated_to");

/// (Operator, Strategy) => Shares delegated to the operator.
pub const OPERATOR_SHARES: Map<(&Addr, &Addr), Uint128> = Map::new("operator_shares");

pub const STAKER_NONCES: Map<&Addr, u64> = Map::new("staker_nonces");

pub const APPROVER_NONCES: Map<&Addr, u64> = Map::new("approver_nonces");

pub const DOMAIN: Item<Domain> = Item::new("domain");

pub const HOOK_ISOLATION: Item<bool> = Item::new("hook_isolation");

/// Relationship of an address with the registry.
/// Registered operators are always delegated to themselves,
/// regardless of what is stored in [DELEGATED_TO].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relationship {
    Undelegated,
    DelegatedTo(Addr),
    SelfDelegatedOperator,
}

impl Relationship {
    pub fn load(storage: &dyn Storage, staker: &Addr) -> StdResult<Self> {
        if OPERATORS.has(storage, staker) {
            return Ok(Relationship::SelfDelegatedOperator);
        }

        Ok(match DELEGATED_TO.may_load(storage, staker)? {
            Some(operator) => Relationship::DelegatedTo(operator),
            None => Relationship::Undelegated,
        })
    }

    pub fn is_delegated(&self) -> bool {
        !matches!(self, Relationship::Undelegated)
    }

    /// The operator whose share ledger `staker`'s shares count towards.
    pub fn operator(self, staker: &Addr) -> Option<Addr> {
        match self {
            Relationship::Undelegated => None,
            Relationship::DelegatedTo(operator) => Some(operator),
            Relationship::SelfDelegatedOperator => Some(staker.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::mock_dependencies;

    fn operator(receiver: Addr) -> Operator {
        Operator {
            earnings_receiver: receiver,
            delegation_approver: None,
            delegation_terms: None,
            staker_opt_out_window_blocks: 0,
        }
    }

    #[test]
    fn relationship() {
        let mut deps = mock_dependencies();
        let staker = deps.api.addr_make("staker");
        let op = deps.api.addr_make("operator");

        let rel = Relationship::load(&deps.storage, &staker).unwrap();
        assert_eq!(rel, Relationship::Undelegated);
        assert!(!rel.is_delegated());
        assert_eq!(rel.operator(&staker), None);

        DELEGATED_TO.save(&mut deps.storage, &staker, &op).unwrap();
        let rel = Relationship::load(&deps.storage, &staker).unwrap();
        assert_eq!(rel, Relationship::DelegatedTo(op.clone()));
        assert!(rel.is_delegated());
        assert_eq!(rel.operator(&staker), Some(op.clone()));

        OPERATORS.save(&mut deps.storage, &op, &operator(op.clone())).unwrap();
        let rel = Relationship::load(&deps.storage, &op).unwrap();
        assert_eq!(rel, Relationship::SelfDelegatedOperator);
        assert_eq!(rel.operator(&op), Some(op.clone()));
    }

    #[test]
    fn registry_membership_wins() {
        let mut deps = mock_dependencies();
        let op = deps.api.addr_make("operator");
        let other = deps.api.addr_make("other");

        DELEGATED_TO.save(&mut deps.storage, &op, &other).unwrap();
        OPERATORS.save(&mut deps.storage, &op, &operator(op.clone())).unwrap();

        let rel = Relationship::load(&deps.storage, &op).unwrap();
        assert_eq!(rel, Relationship::SelfDelegatedOperator);
    }
}
