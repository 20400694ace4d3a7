use crate::state::{Operator, MAX_STAKER_OPT_OUT_WINDOW_BLOCKS};
use crate::ContractError;
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Api, Binary, HexBinary, Uint128};

#[cw_serde]
pub struct InstantiateMsg {
    pub owner: String,
    pub pauser: String,
    /// When set, a failing operator hook no longer reverts the share notification,
    /// an `OperatorHookFailed` event is emitted instead.
    #[serde(default)]
    pub isolate_hook_failures: bool,
}

#[cw_serde]
pub enum ExecuteMsg {
    RegisterAsOperator {
        operator_details: OperatorDetails,
        metadata_uri: String,
    },
    ModifyOperatorDetails {
        new_operator_details: OperatorDetails,
    },
    UpdateOperatorMetadataUri {
        metadata_uri: String,
    },
    /// Delegate the sender's stake to `operator`.
    DelegateTo {
        operator: String,
        approver_signature: Option<SignatureWithExpiry>,
    },
    /// Delegate `staker` to `operator` on behalf of the staker, authorized by `staker_signature`.
    DelegateToBySignature {
        staker: String,
        operator: String,
        staker_signature: SignatureWithExpiry,
        approver_signature: Option<SignatureWithExpiry>,
    },
    /// Called by the custody contract only.
    Undelegate {
        staker: String,
    },
    /// Called by the operator or its delegation approver,
    /// asks the custody contract to withdraw everything and undelegate `staker`.
    ForceUndelegation {
        staker: String,
        operator: String,
    },
    IncreaseDelegatedShares {
        staker: String,
        strategy: String,
        shares: Uint128,
    },
    DecreaseDelegatedShares {
        staker: String,
        strategies: Vec<String>,
        shares: Vec<Uint128>,
    },
    TransferOwnership {
        /// See [`bvs_library::ownership::transfer_ownership`] for more information on this field
        new_owner: String,
    },
    SetRouting {
        custody: String,
        freeze_oracle: String,
    },
}

/// Public delegation parameters of an operator, addresses as strings.
#[cw_serde]
pub struct OperatorDetails {
    /// Must not be empty: a non-empty receiver is what marks an operator as registered.
    pub earnings_receiver: String,
    /// When set, delegations made by anyone but the approver or the operator
    /// need a signature from this address.
    pub delegation_approver: Option<String>,
    /// Contract notified with `OnSharesReceived`/`OnSharesWithdrawn`.
    pub delegation_terms: Option<String>,
    pub staker_opt_out_window_blocks: u64,
}

impl OperatorDetails {
    pub fn validate(&self, api: &dyn Api) -> Result<Operator, ContractError> {
        if self.earnings_receiver.is_empty() {
            return Err(ContractError::ZeroEarningsReceiver);
        }
        if self.staker_opt_out_window_blocks > MAX_STAKER_OPT_OUT_WINDOW_BLOCKS {
            return Err(ContractError::CannotExceedMaxStakerOptOutWindowBlocks {
                max: MAX_STAKER_OPT_OUT_WINDOW_BLOCKS,
            });
        }

        Ok(Operator {
            earnings_receiver: api.addr_validate(&self.earnings_receiver)?,
            delegation_approver: self
                .delegation_approver
                .as_deref()
                .map(|addr| api.addr_validate(addr))
                .transpose()?,
            delegation_terms: self
                .delegation_terms
                .as_deref()
                .map(|addr| api.addr_validate(addr))
                .transpose()?,
            staker_opt_out_window_blocks: self.staker_opt_out_window_blocks,
        })
    }
}

impl From<Operator> for OperatorDetails {
    fn from(operator: Operator) -> Self {
        OperatorDetails {
            earnings_receiver: operator.earnings_receiver.to_string(),
            delegation_approver: operator.delegation_approver.map(String::from),
            delegation_terms: operator.delegation_terms.map(String::from),
            staker_opt_out_window_blocks: operator.staker_opt_out_window_blocks,
        }
    }
}

/// 65 bytes `r ‖ s ‖ v` for accounts, opaque bytes for contract signers.
/// `expiry` is a unix timestamp in seconds, the signature is valid up to and including it.
#[cw_serde]
pub struct SignatureWithExpiry {
    pub signature: Binary,
    pub expiry: u64,
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(DelegatedResponse)]
    IsDelegated { staker: String },

    #[returns(DelegatedResponse)]
    IsNotDelegated { staker: String },

    /// Operator the staker is delegated to, the operator itself for registered operators.
    #[returns(DelegatedToResponse)]
    DelegatedTo { staker: String },

    #[returns(IsOperatorResponse)]
    IsOperator { operator: String },

    #[returns(OperatorDetailsResponse)]
    OperatorDetails { operator: String },

    #[returns(DelegationApproverResponse)]
    DelegationApprover { operator: String },

    #[returns(OperatorSharesResponse)]
    OperatorShares {
        operator: String,
        strategies: Vec<String>,
    },

    #[returns(NonceResponse)]
    StakerNonce { staker: String },

    #[returns(NonceResponse)]
    ApproverNonce { approver: String },

    #[returns(DigestResponse)]
    DomainSeparator {},

    /// Digest a staker signs for `DelegateToBySignature`, at the staker's current nonce.
    #[returns(DigestResponse)]
    StakerDelegationDigestHash {
        staker: String,
        operator: String,
        expiry: u64,
    },

    /// Digest an approver signs to approve `staker` delegating to `operator`,
    /// at the approver's current nonce.
    #[returns(DigestResponse)]
    DelegationApprovalDigestHash {
        approver: String,
        staker: String,
        operator: String,
        expiry: u64,
    },
}

#[cw_serde]
pub struct DelegatedResponse(pub bool);

#[cw_serde]
pub struct DelegatedToResponse(pub Option<Addr>);

#[cw_serde]
pub struct IsOperatorResponse(pub bool);

#[cw_serde]
pub struct OperatorDetailsResponse(pub Option<OperatorDetails>);

#[cw_serde]
pub struct DelegationApproverResponse(pub Option<Addr>);

#[cw_serde]
pub struct OperatorSharesResponse(pub Vec<Uint128>);

#[cw_serde]
pub struct NonceResponse(pub u64);

#[cw_serde]
pub struct DigestResponse(pub HexBinary);

/// Messages the delegation manager sends to the custody contract.
pub mod custody {
    use cosmwasm_schema::cw_serde;

    #[cw_serde]
    pub enum ExecuteMsg {
        /// Withdraw all of `staker`'s shares and undelegate it,
        /// the custody contract calls back `Undelegate { staker }`.
        ForceTotalWithdrawal { staker: String },
    }
}

/// Queries the delegation manager sends to the freeze oracle.
pub mod freeze_oracle {
    use cosmwasm_schema::{cw_serde, QueryResponses};

    #[cw_serde]
    #[derive(QueryResponses)]
    pub enum QueryMsg {
        #[returns(IsFrozenResponse)]
        IsFrozen { operator: String },
    }

    #[cw_serde]
    pub struct IsFrozenResponse(pub bool);
}

/// Notifications sent to an operator's `delegation_terms` contract.
pub mod delegation_terms {
    use cosmwasm_schema::cw_serde;
    use cosmwasm_std::Uint128;

    #[cw_serde]
    pub enum ExecuteMsg {
        OnSharesReceived {
            staker: String,
            strategies: Vec<String>,
            shares: Vec<Uint128>,
        },
        OnSharesWithdrawn {
            staker: String,
            strategies: Vec<String>,
            shares: Vec<Uint128>,
        },
    }
}

/// Query a contract signer must answer to authorize a digest.
pub mod signature_validator {
    use cosmwasm_schema::{cw_serde, QueryResponses};
    use cosmwasm_std::{Binary, HexBinary};

    /// Returned by a contract signer that accepts the signature.
    pub const MAGIC_VALUE: [u8; 4] = [0x16, 0x26, 0xba, 0x7e];

    #[cw_serde]
    #[derive(QueryResponses)]
    pub enum QueryMsg {
        #[returns(IsValidSignatureResponse)]
        IsValidSignature {
            digest: HexBinary,
            signature: Binary,
        },
    }

    #[cw_serde]
    pub struct IsValidSignatureResponse(pub HexBinary);
}
