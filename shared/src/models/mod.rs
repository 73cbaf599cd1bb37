//! Payment models shared across crates

pub mod payment;

pub use payment::*;
