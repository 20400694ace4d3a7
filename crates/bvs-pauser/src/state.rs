use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};

/// Global switch, when `true` every method of every contract is paused.
pub(crate) const PAUSED: Item<bool> = Item::new("paused");

/// Per-method pauses.
/// Key (composite): (contract_addr, method)
/// Value: the block height at which the method was paused
pub(crate) const PAUSED_METHODS: Map<(&Addr, &str), u64> = Map::new("paused_methods");
