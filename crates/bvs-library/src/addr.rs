use cosmwasm_std::{Addr, Api, CanonicalAddr, StdError, StdResult};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Validate a list of addresses
/// Return a vector of validated addresses
pub fn validate_addrs(api: &dyn Api, addr: &[String]) -> StdResult<Vec<Addr>> {
    addr.iter().map(|addr| api.addr_validate(addr)).collect()
}

/// Compress a SEC1 encoded secp256k1 public key.
/// Accepts the 65-byte uncompressed form (`0x04 ‖ x ‖ y`), as returned by
/// `Api::secp256k1_recover_pubkey`, or an already compressed 33-byte key.
pub fn compress_public_key(public_key: &[u8]) -> StdResult<[u8; 33]> {
    let mut compressed = [0u8; 33];
    match (public_key.len(), public_key.first()) {
        (33, Some(0x02 | 0x03)) => compressed.copy_from_slice(public_key),
        (65, Some(0x04)) => {
            // prefix encodes the parity of y
            compressed[0] = 0x02 | (public_key[64] & 1);
            compressed[1..].copy_from_slice(&public_key[1..33]);
        }
        _ => return Err(StdError::generic_err("Invalid secp256k1 public key")),
    }
    Ok(compressed)
}

/// Cosmos SDK account address of a secp256k1 key: `ripemd160(sha256(compressed_key))`.
pub fn canonical_addr_from_public_key(public_key: &[u8]) -> StdResult<CanonicalAddr> {
    let compressed = compress_public_key(public_key)?;
    let hash = Ripemd160::digest(Sha256::digest(compressed));
    Ok(CanonicalAddr::from(hash.as_slice()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::MockApi;
    use cosmwasm_std::HexBinary;

    #[test]
    fn validate_addrs_fails_on_first_invalid() {
        let api = MockApi::default();
        let valid = api.addr_make("valid");

        let addrs = validate_addrs(&api, &[valid.to_string()]).unwrap();
        assert_eq!(addrs, vec![valid.clone()]);

        let err = validate_addrs(&api, &[valid.to_string(), "invalid".to_string()]);
        assert!(err.is_err());
    }

    #[test]
    fn cosmos_address_from_compressed_key() {
        let public_key = HexBinary::from_hex(
            "02c8f031561c4758c9551cff47246f2c347189fe684c04da35cf88e813f810e3c2",
        )
        .unwrap();

        let canonical = canonical_addr_from_public_key(&public_key).unwrap();
        assert_eq!(canonical.len(), 20);

        let api = MockApi::default().with_prefix("bbn");
        let addr = api.addr_humanize(&canonical).unwrap();
        assert_eq!(addr.as_str(), "bbn1efqyslkz34qurfjajpruzwv5v22c65kq3uugqf");
    }

    #[test]
    fn compress_rejects_malformed_keys() {
        assert!(compress_public_key(&[0x04; 33]).is_err());
        assert!(compress_public_key(&[0x02; 65]).is_err());
        assert!(compress_public_key(&[]).is_err());
    }

    #[test]
    fn compress_uses_y_parity() {
        let mut uncompressed = [0u8; 65];
        uncompressed[0] = 0x04;
        uncompressed[1..33].copy_from_slice(&[7u8; 32]);

        uncompressed[64] = 0x10;
        let even = compress_public_key(&uncompressed).unwrap();
        assert_eq!(even[0], 0x02);
        assert_eq!(&even[1..], &[7u8; 32]);

        uncompressed[64] = 0x11;
        let odd = compress_public_key(&uncompressed).unwrap();
        assert_eq!(odd[0], 0x03);
    }
}
