use crate::addr::canonical_addr_from_public_key;
use cosmwasm_std::{Addr, Api, Binary, CanonicalAddr};
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey};
use sha2::{Digest, Sha256};

/// A deterministic secp256k1 account for signing typed-data digests in tests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    secret_key: SecretKey,
    pub public_key: PublicKey,
}

impl Account {
    /// Derive the secret key from `sha256(seed)`, the same seed always yields the same account.
    pub fn new(seed: &str) -> Self {
        let secp = Secp256k1::new();
        let secret_key = SecretKey::from_slice(&Sha256::digest(seed.as_bytes())).unwrap();
        let public_key = PublicKey::from_secret_key(&secp, &secret_key);

        Account {
            secret_key,
            public_key,
        }
    }

    pub fn canonical_addr(&self) -> CanonicalAddr {
        canonical_addr_from_public_key(&self.public_key.serialize()).unwrap()
    }

    /// Human readable address with the `api` prefix (e.g. `cosmwasm1...` for MockApi).
    pub fn addr(&self, api: &dyn Api) -> Addr {
        api.addr_humanize(&self.canonical_addr()).unwrap()
    }

    /// Sign a 32-byte digest, returns `r ‖ s ‖ v` (65 bytes) with `v` in `{0, 1}`.
    pub fn sign(&self, digest: &[u8]) -> Binary {
        let secp = Secp256k1::signing_only();
        let hash: [u8; 32] = digest.try_into().expect("digest length is not 32 bytes");
        let rs = secp
            .sign_ecdsa(&Message::from_digest(hash), &self.secret_key)
            .serialize_compact();

        let expected = self.public_key.serialize_uncompressed();
        let v = (0u8..2)
            .find(|v| {
                cosmwasm_crypto::secp256k1_recover_pubkey(&hash, &rs, *v)
                    .map(|recovered| recovered.as_slice() == expected.as_slice())
                    .unwrap_or(false)
            })
            .expect("signature is not recoverable");

        let mut signature = rs.to_vec();
        signature.push(v);
        Binary::from(signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::MockApi;

    #[test]
    fn deterministic_from_seed() {
        let account = Account::new("seed");
        assert_eq!(
            account.public_key.to_string(),
            "02c8f031561c4758c9551cff47246f2c347189fe684c04da35cf88e813f810e3c2"
        );
        assert_eq!(account, Account::new("seed"));
        assert_ne!(account, Account::new("other"));
    }

    #[test]
    fn sign_is_recoverable_to_address() {
        let api = MockApi::default();
        let account = Account::new("signer");
        let digest = Sha256::digest(b"hello").to_vec();

        let signature = account.sign(&digest);
        assert_eq!(signature.len(), 65);

        let recovered = api
            .secp256k1_recover_pubkey(&digest, &signature[..64], signature[64])
            .unwrap();
        let canonical = canonical_addr_from_public_key(&recovered).unwrap();
        assert_eq!(api.addr_humanize(&canonical).unwrap(), account.addr(&api));
    }
}
