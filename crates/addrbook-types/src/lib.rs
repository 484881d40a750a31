//! Addrbook Types - Pure type definitions
//!
//! Row and payload types shared between the store and the HTTP surface.
//! Rows serialize with the lowercase column names of their tables;
//! request payloads use the PascalCase keys clients send.

pub mod address;
pub mod customer;

pub use address::*;
pub use customer::*;
