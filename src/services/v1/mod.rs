pub mod account;
pub mod transfer;
pub mod user;
