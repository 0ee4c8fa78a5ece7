//! Command implementations for the Action Scout CLI

pub mod common;
pub mod compat;
pub mod records;
pub mod team;
pub mod teams;
pub mod watchlist;
