pub mod testing;

/// Single-owner access control shared by every BVS contract.
/// - `set_owner` is called once during `instantiate`.
/// - `assert_owner` checks if the current message sender is the owner.
/// - `transfer_ownership` only allows the current owner to hand over to a new owner.
pub mod ownership;

/// Address helpers: bulk validation and Cosmos account address derivation from a
/// secp256k1 public key.
pub mod addr;
