use crate::state::{Domain, DOMAIN};
use cosmwasm_std::{Addr, Env, HexBinary, StdResult, Storage, Uint256};
use sha2::{Digest, Sha256};

/// Name mixed into the domain separator.
pub const DOMAIN_NAME: &str = "BVS Delegation Manager";

const DOMAIN_TYPE: &str = "EIP712Domain(string name,string chainId,address verifyingContract)";

/// Dynamic values (strings, addresses) are hashed into a single 32-byte word.
pub fn word(value: impl AsRef<[u8]>) -> [u8; 32] {
    Sha256::digest(value.as_ref()).into()
}

/// Integers are 32-byte big endian words.
pub fn uint_word(value: u64) -> [u8; 32] {
    Uint256::from(value).to_be_bytes()
}

/// `sha256` of the concatenated 32-byte words.
pub fn hash_words(words: &[[u8; 32]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for w in words {
        hasher.update(w);
    }
    hasher.finalize().into()
}

pub fn compute_separator(chain_id: &str, contract: &Addr) -> HexBinary {
    let separator = hash_words(&[
        word(DOMAIN_TYPE),
        word(DOMAIN_NAME),
        word(chain_id),
        word(contract.as_str()),
    ]);
    HexBinary::from(separator)
}

/// Compute and cache the separator for the chain this contract is instantiated on.
pub fn init(storage: &mut dyn Storage, env: &Env) -> StdResult<HexBinary> {
    let separator = compute_separator(&env.block.chain_id, &env.contract.address);
    DOMAIN.save(
        storage,
        &Domain {
            chain_id: env.block.chain_id.clone(),
            separator: separator.clone(),
        },
    )?;
    Ok(separator)
}

/// The cached separator while the chain id is unchanged,
/// recomputed for the live chain id otherwise (e.g. after a fork).
pub fn separator(storage: &dyn Storage, env: &Env) -> StdResult<HexBinary> {
    let domain = DOMAIN.load(storage)?;
    if domain.chain_id == env.block.chain_id {
        return Ok(domain.separator);
    }
    Ok(compute_separator(
        &env.block.chain_id,
        &env.contract.address,
    ))
}

/// `sha256(0x19 ‖ 0x01 ‖ separator ‖ struct_hash)`
pub fn typed_digest(separator: &[u8], struct_hash: &[u8; 32]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update([0x19, 0x01]);
    hasher.update(separator);
    hasher.update(struct_hash);
    hasher.finalize().into()
}
