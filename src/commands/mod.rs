//! Backend Request Wrappers
//!
//! Bindings for the account routes. The item routes are handled by
//! `list_sync::HttpRemote`.

mod account;

pub use account::*;
