//! External-channel services.

pub mod handoff;
