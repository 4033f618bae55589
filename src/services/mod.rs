//! Business logic services.
//!
//! Services contain core business logic separated from HTTP handlers.
//! They handle database transactions, validation, and complex operations.

pub mod directory;
pub mod ledger;
pub mod reference;
pub mod transfer;
