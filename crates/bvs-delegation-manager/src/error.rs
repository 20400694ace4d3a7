use cosmwasm_std::{OverflowError, StdError};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Ownership(#[from] bvs_library::ownership::OwnershipError),

    #[error("{0}")]
    Pauser(#[from] bvs_pauser::api::PauserError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Operator already registered")]
    AlreadyRegistered,

    #[error("Earnings receiver cannot be empty")]
    ZeroEarningsReceiver,

    #[error("Staker opt out window blocks cannot exceed {max}")]
    CannotExceedMaxStakerOptOutWindowBlocks { max: u64 },

    #[error("Staker opt out window blocks cannot be decreased")]
    CannotBeDecreased,

    #[error("Input length mismatch")]
    InputLengthMismatch,

    #[error("Staker is already delegated")]
    AlreadyDelegated,

    #[error("Operator is not registered")]
    UnregisteredOperator,

    #[error("Operator is frozen")]
    FrozenOperator,

    #[error("Staker is not delegated to the operator")]
    NotCurrentlyDelegated,

    #[error("Operators cannot undelegate from themselves")]
    OperatorCannotUndelegateSelf,

    #[error("Signature expired")]
    ExpiredSignature,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Approver signature is required")]
    ApproverSignatureRequired,

    #[error("Nonce overflow")]
    NonceOverflow,

    #[error("Operator shares underflow")]
    LedgerUnderflow,
}

/// Broad category of a [ContractError], independent of the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input: empty fields, out of range values, mismatched lists.
    Validation,
    /// The request conflicts with the current registry or delegation state.
    StateConflict,
    /// Wrong caller, bad or expired signature, frozen operator or paused method.
    Authorization,
    /// Checked arithmetic failed.
    Arithmetic,
    /// Storage, serialization or querier failure surfaced by the host.
    Host,
}

impl ContractError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContractError::Std(_) => ErrorKind::Host,
            ContractError::ZeroEarningsReceiver
            | ContractError::CannotExceedMaxStakerOptOutWindowBlocks { .. }
            | ContractError::CannotBeDecreased
            | ContractError::InputLengthMismatch => ErrorKind::Validation,
            ContractError::AlreadyRegistered
            | ContractError::AlreadyDelegated
            | ContractError::UnregisteredOperator
            | ContractError::NotCurrentlyDelegated
            | ContractError::OperatorCannotUndelegateSelf => ErrorKind::StateConflict,
            ContractError::Ownership(_)
            | ContractError::Pauser(_)
            | ContractError::Unauthorized
            | ContractError::FrozenOperator
            | ContractError::ExpiredSignature
            | ContractError::InvalidSignature
            | ContractError::ApproverSignatureRequired => ErrorKind::Authorization,
            ContractError::Overflow(_)
            | ContractError::NonceOverflow
            | ContractError::LedgerUnderflow => ErrorKind::Arithmetic,
        }
    }
}
