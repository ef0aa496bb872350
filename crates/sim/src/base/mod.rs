//! Base value types shared by every model.
//!
//! This module provides the environmental snapshot (`Conditions`) that is
//! handed read-only to every expression model during a generation.

pub mod conditions;

pub use conditions::Conditions;
