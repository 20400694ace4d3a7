use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::StdError;

#[cw_serde]
pub struct InstantiateMsg {
    /// Owner of this contract, who can pause and unpause
    pub owner: String,
    /// Initial global pause state
    pub initial_paused: bool,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Pause every method of every contract consulting this pauser.
    Pause {},

    Unpause {},

    /// Pause a single `method` of `contract`.
    PauseMethod { contract: String, method: String },

    UnpauseMethod { contract: String, method: String },

    TransferOwnership {
        /// See [`bvs_library::ownership::transfer_ownership`] for more information on this field
        new_owner: String,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(IsPausedResponse)]
    IsPaused {
        /// The (contract: Addr) calling this
        #[serde(rename = "c")]
        contract: String,
        /// The (method: ExecuteMsg) to check if it is paused
        #[serde(rename = "m")]
        method: String,
    },

    #[returns(CanExecuteResponse)]
    CanExecute {
        /// The (contract: Addr) calling this
        #[serde(rename = "c")]
        contract: String,
        /// The (sender: Addr) of the message
        #[serde(rename = "s")]
        sender: String,
        /// The (method: ExecuteMsg) to check if it is paused
        #[serde(rename = "m")]
        method: String,
    },
}

#[cw_serde]
pub struct IsPausedResponse(pub u32);

impl IsPausedResponse {
    pub fn new(paused: bool) -> Self {
        Self(paused as u32)
    }

    pub fn is_paused(&self) -> bool {
        self.0 == 1
    }
}

#[cw_serde]
pub struct CanExecuteResponse(pub u32);

impl CanExecuteResponse {
    pub fn can_execute(&self) -> bool {
        self.0 == CanExecuteFlag::CanExecute as u32
    }
}

#[derive(Debug, PartialEq)]
pub enum CanExecuteFlag {
    CanExecute = 0,
    Paused = 1,
    Unauthorized = 2,
}

impl From<CanExecuteFlag> for CanExecuteResponse {
    fn from(flag: CanExecuteFlag) -> Self {
        Self(flag as u32)
    }
}

impl TryFrom<CanExecuteResponse> for CanExecuteFlag {
    type Error = StdError;

    fn try_from(value: CanExecuteResponse) -> Result<Self, StdError> {
        match value.0 {
            0 => Ok(Self::CanExecute),
            1 => Ok(Self::Paused),
            2 => Ok(Self::Unauthorized),
            _ => Err(StdError::generic_err("Unknown flag in CanExecuteResponse")),
        }
    }
}
