pub mod contract;
mod error;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;

pub mod testing;

#[cfg(feature = "library")]
pub mod api {
    use crate::msg::{CanExecuteFlag, CanExecuteResponse, QueryMsg};
    use cosmwasm_std::{Addr, Deps, Env, MessageInfo, StdError, StdResult, Storage};
    use cw_storage_plus::Item;

    pub use strum::Display;

    /// Errors surfaced to contracts that consult the BVS Pauser.
    #[derive(thiserror::Error, Debug, PartialEq)]
    pub enum PauserError {
        #[error("{0}")]
        Std(#[from] StdError),

        #[error("The contract is paused")]
        IsPaused,

        #[error("Not authorized to execute the method")]
        Unauthorized,
    }

    impl CanExecuteResponse {
        pub fn assert(&self) -> Result<(), PauserError> {
            match CanExecuteFlag::try_from(self.clone())? {
                CanExecuteFlag::CanExecute => Ok(()),
                CanExecuteFlag::Paused => Err(PauserError::IsPaused),
                CanExecuteFlag::Unauthorized => Err(PauserError::Unauthorized),
            }
        }
    }

    pub const PAUSER: Item<Addr> = Item::new("_pauser");

    /// Set the address of the pauser contract in the storage slot `_pauser`.
    /// [`assert_can_execute`] will query the pauser contract at this address.
    pub fn set_pauser(store: &mut dyn Storage, addr: &Addr) -> StdResult<()> {
        PAUSER.save(store, addr)
    }

    /// Assert that `method` can be executed by `info.sender` on this contract.
    /// `method` is usually the `ExecuteMsg` itself (via [`Display`]) or a named category
    /// shared by several messages.
    /// Requires [`set_pauser`] to be set in the `instantiate()` message.
    pub fn assert_can_execute(
        deps: Deps,
        env: &Env,
        info: &MessageInfo,
        method: &dyn ToString,
    ) -> Result<(), PauserError> {
        let addr = PAUSER.load(deps.storage)?;

        let query_msg = QueryMsg::CanExecute {
            contract: env.contract.address.to_string(),
            sender: info.sender.to_string(),
            method: method.to_string(),
        };
        let response: CanExecuteResponse = deps.querier.query_wasm_smart(addr, &query_msg)?;
        response.assert()
    }
}
