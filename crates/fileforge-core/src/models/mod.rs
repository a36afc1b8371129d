//! Domain models shared across components.

pub mod batch;
pub mod format;
pub mod sniff;
