use crate::domain::{hash_words, typed_digest, uint_word, word};
use crate::msg::signature_validator::{IsValidSignatureResponse, QueryMsg, MAGIC_VALUE};
use crate::msg::SignatureWithExpiry;
use crate::ContractError;
use bvs_library::addr::canonical_addr_from_public_key;
use cosmwasm_std::{Addr, Binary, Deps, DepsMut, Env, HexBinary, Storage};
use cw_storage_plus::Map;

const STAKER_DELEGATION_TYPE: &str =
    "StakerDelegation(address staker,address operator,uint256 nonce,uint256 expiry)";

const DELEGATION_APPROVAL_TYPE: &str = "DelegationApproval(address delegationApprover,address staker,address operator,uint256 nonce,uint256 expiry)";

pub fn staker_delegation_struct_hash(
    staker: &Addr,
    operator: &Addr,
    nonce: u64,
    expiry: u64,
) -> [u8; 32] {
    hash_words(&[
        word(STAKER_DELEGATION_TYPE),
        word(staker.as_str()),
        word(operator.as_str()),
        uint_word(nonce),
        uint_word(expiry),
    ])
}

pub fn delegation_approval_struct_hash(
    approver: &Addr,
    staker: &Addr,
    operator: &Addr,
    nonce: u64,
    expiry: u64,
) -> [u8; 32] {
    hash_words(&[
        word(DELEGATION_APPROVAL_TYPE),
        word(approver.as_str()),
        word(staker.as_str()),
        word(operator.as_str()),
        uint_word(nonce),
        uint_word(expiry),
    ])
}

/// How a signer proves it authorized a digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureVerifier {
    /// Key-holding account: secp256k1 recovery must yield the signer's address.
    Account,
    /// Contract account: must answer `IsValidSignature` with [MAGIC_VALUE].
    Contract,
}

impl SignatureVerifier {
    /// An address with contract info is a contract, anything else is an account.
    pub fn resolve(deps: Deps, signer: &Addr) -> Self {
        match deps.querier.query_wasm_contract_info(signer) {
            Ok(_) => SignatureVerifier::Contract,
            Err(_) => SignatureVerifier::Account,
        }
    }

    pub fn verify(
        &self,
        deps: Deps,
        signer: &Addr,
        digest: &[u8; 32],
        signature: &Binary,
    ) -> Result<(), ContractError> {
        let valid = match self {
            SignatureVerifier::Account => recovers_to(deps, signer, digest, signature)?,
            SignatureVerifier::Contract => {
                let msg = QueryMsg::IsValidSignature {
                    digest: HexBinary::from(digest.as_slice()),
                    signature: signature.clone(),
                };
                deps.querier
                    .query_wasm_smart::<IsValidSignatureResponse>(signer, &msg)
                    .map(|res| res.0.as_slice() == MAGIC_VALUE)
                    .unwrap_or(false)
            }
        };

        if !valid {
            return Err(ContractError::InvalidSignature);
        }
        Ok(())
    }
}

/// `signature` is `r ‖ s ‖ v` with `v` in `{0, 1, 27, 28}`.
fn recovers_to(
    deps: Deps,
    signer: &Addr,
    digest: &[u8; 32],
    signature: &Binary,
) -> Result<bool, ContractError> {
    if signature.len() != 65 {
        return Ok(false);
    }
    let recovery_param = match signature[64] {
        v @ (0 | 1) => v,
        v @ (27 | 28) => v - 27,
        _ => return Ok(false),
    };

    let Ok(public_key) =
        deps.api
            .secp256k1_recover_pubkey(digest, &signature[..64], recovery_param)
    else {
        return Ok(false);
    };
    let Ok(recovered) = canonical_addr_from_public_key(&public_key) else {
        return Ok(false);
    };

    let expected = deps.api.addr_canonicalize(signer.as_str())?;
    Ok(recovered == expected)
}

/// Check the expiry, consume the signer's nonce, then verify the signature over the digest
/// built from the consumed nonce by `struct_hash`.
/// The nonce is incremented whether or not the signature verifies.
pub fn consume_and_verify<'a>(
    deps: &mut DepsMut,
    env: &Env,
    nonces: &Map<&'a Addr, u64>,
    signer: &'a Addr,
    signature: &SignatureWithExpiry,
    struct_hash: impl FnOnce(u64) -> [u8; 32],
) -> Result<(), ContractError> {
    if signature.expiry < env.block.time.seconds() {
        return Err(ContractError::ExpiredSignature);
    }

    let nonce = consume_nonce(deps.storage, nonces, signer)?;
    let separator = crate::domain::separator(deps.storage, env)?;
    let digest = typed_digest(&separator, &struct_hash(nonce));

    SignatureVerifier::resolve(deps.as_ref(), signer).verify(
        deps.as_ref(),
        signer,
        &digest,
        &signature.signature,
    )
}

/// Increment the stored nonce, returns the nonce value before the increment.
pub fn consume_nonce<'a>(
    storage: &mut dyn Storage,
    nonces: &Map<&'a Addr, u64>,
    signer: &'a Addr,
) -> Result<u64, ContractError> {
    let nonce = nonces.may_load(storage, signer)?.unwrap_or_default();
    let next = nonce.checked_add(1).ok_or(ContractError::NonceOverflow)?;
    nonces.save(storage, signer, &next)?;
    Ok(nonce)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{APPROVER_NONCES, STAKER_NONCES};
    use bvs_library::testing::Account;
    use cosmwasm_std::testing::{mock_dependencies, mock_env};
    use cosmwasm_std::Timestamp;

    #[test]
    fn struct_hashes_bind_every_field() {
        let deps = mock_dependencies();
        let staker = deps.api.addr_make("staker");
        let operator = deps.api.addr_make("operator");
        let approver = deps.api.addr_make("approver");

        let base = staker_delegation_struct_hash(&staker, &operator, 0, 100);
        assert_ne!(base, staker_delegation_struct_hash(&operator, &staker, 0, 100));
        assert_ne!(base, staker_delegation_struct_hash(&staker, &operator, 1, 100));
        assert_ne!(base, staker_delegation_struct_hash(&staker, &operator, 0, 101));

        let approval = delegation_approval_struct_hash(&approver, &staker, &operator, 0, 100);
        assert_ne!(approval, base);
        let other_staker = deps.api.addr_make("other_staker");
        assert_ne!(
            approval,
            delegation_approval_struct_hash(&approver, &other_staker, &operator, 0, 100)
        );
    }

    #[test]
    fn consume_nonce_increments() {
        let mut deps = mock_dependencies();
        let signer = deps.api.addr_make("signer");

        assert_eq!(consume_nonce(&mut deps.storage, &STAKER_NONCES, &signer), Ok(0));
        assert_eq!(consume_nonce(&mut deps.storage, &STAKER_NONCES, &signer), Ok(1));
        assert_eq!(STAKER_NONCES.load(&deps.storage, &signer).unwrap(), 2);

        // counters are independent
        assert!(!APPROVER_NONCES.has(&deps.storage, &signer));
    }

    #[test]
    fn consume_nonce_overflow() {
        let mut deps = mock_dependencies();
        let signer = deps.api.addr_make("signer");

        STAKER_NONCES
            .save(&mut deps.storage, &signer, &u64::MAX)
            .unwrap();
        assert_eq!(
            consume_nonce(&mut deps.storage, &STAKER_NONCES, &signer),
            Err(ContractError::NonceOverflow)
        );
        assert_eq!(STAKER_NONCES.load(&deps.storage, &signer).unwrap(), u64::MAX);
    }

    #[test]
    fn account_signature() {
        let deps = mock_dependencies();
        let account = Account::new("staker");
        let signer = account.addr(&deps.api);
        let digest: [u8; 32] = word("message");

        assert_eq!(
            SignatureVerifier::resolve(deps.as_ref(), &signer),
            SignatureVerifier::Account
        );

        let signature = account.sign(&digest);
        SignatureVerifier::Account
            .verify(deps.as_ref(), &signer, &digest, &signature)
            .unwrap();

        // v as 27/28
        let mut legacy = signature.to_vec();
        legacy[64] += 27;
        SignatureVerifier::Account
            .verify(deps.as_ref(), &signer, &digest, &Binary::from(legacy))
            .unwrap();

        // other digest
        let err = SignatureVerifier::Account
            .verify(deps.as_ref(), &signer, &word("other"), &signature)
            .unwrap_err();
        assert_eq!(err, ContractError::InvalidSignature);

        // other signer
        let other = Account::new("other").addr(&deps.api);
        let err = SignatureVerifier::Account
            .verify(deps.as_ref(), &other, &digest, &signature)
            .unwrap_err();
        assert_eq!(err, ContractError::InvalidSignature);
    }

    #[test]
    fn account_signature_malformed() {
        let deps = mock_dependencies();
        let account = Account::new("staker");
        let signer = account.addr(&deps.api);
        let digest = word("message");
        let signature = account.sign(&digest);

        let short = Binary::from(&signature[..64]);
        assert_eq!(
            SignatureVerifier::Account.verify(deps.as_ref(), &signer, &digest, &short),
            Err(ContractError::InvalidSignature)
        );

        let mut bad_v = signature.to_vec();
        bad_v[64] = 2;
        assert_eq!(
            SignatureVerifier::Account.verify(
                deps.as_ref(),
                &signer,
                &digest,
                &Binary::from(bad_v)
            ),
            Err(ContractError::InvalidSignature)
        );

        assert_eq!(
            SignatureVerifier::Account.verify(
                deps.as_ref(),
                &signer,
                &digest,
                &Binary::from(vec![0u8; 65])
            ),
            Err(ContractError::InvalidSignature)
        );
    }

    #[test]
    fn consume_and_verify_expiry() {
        let mut deps = mock_dependencies();
        let mut env = mock_env();
        env.block.time = Timestamp::from_seconds(1_000);

        let account = Account::new("staker");
        let staker = account.addr(&deps.api);
        let operator = deps.api.addr_make("operator");
        crate::domain::init(&mut deps.storage, &env).unwrap();

        let sign = |nonce: u64, expiry: u64, env: &Env, storage: &dyn Storage| {
            let separator = crate::domain::separator(storage, env).unwrap();
            let digest = typed_digest(
                &separator,
                &staker_delegation_struct_hash(&staker, &operator, nonce, expiry),
            );
            SignatureWithExpiry {
                signature: account.sign(&digest),
                expiry,
            }
        };

        // expired: nonce untouched
        let signature = sign(0, 999, &env, &deps.storage);
        let err = consume_and_verify(
            &mut deps.as_mut(),
            &env,
            &STAKER_NONCES,
            &staker,
            &signature,
            |nonce| staker_delegation_struct_hash(&staker, &operator, nonce, 999),
        )
        .unwrap_err();
        assert_eq!(err, ContractError::ExpiredSignature);
        assert!(!STAKER_NONCES.has(&deps.storage, &staker));

        // expiry equal to block time is accepted
        let signature = sign(0, 1_000, &env, &deps.storage);
        consume_and_verify(
            &mut deps.as_mut(),
            &env,
            &STAKER_NONCES,
            &staker,
            &signature,
            |nonce| staker_delegation_struct_hash(&staker, &operator, nonce, 1_000),
        )
        .unwrap();
        assert_eq!(STAKER_NONCES.load(&deps.storage, &staker).unwrap(), 1);

        // replay: the digest is rebuilt with nonce 1
        let err = consume_and_verify(
            &mut deps.as_mut(),
            &env,
            &STAKER_NONCES,
            &staker,
            &signature,
            |nonce| staker_delegation_struct_hash(&staker, &operator, nonce, 1_000),
        )
        .unwrap_err();
        assert_eq!(err, ContractError::InvalidSignature);
    }
}
