//! Clients for services outside the process.

pub mod account;
