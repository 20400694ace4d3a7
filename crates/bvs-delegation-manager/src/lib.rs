pub mod contract;
pub mod msg;
pub mod state;
pub mod testing;

mod auth;
mod domain;
mod error;
mod signature;

pub use crate::error::{ContractError, ErrorKind};
