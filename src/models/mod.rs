//! Data models representing database entities.
//!
//! This module contains all data structures that map to database tables,
//! plus the request/response types the API exchanges with clients.

/// Session token model and login request/response types
pub mod auth_token;
/// Staff directory model
pub mod staff;
/// Ledger transaction model and projections
pub mod transaction;
/// Wallet balance model
pub mod wallet;
