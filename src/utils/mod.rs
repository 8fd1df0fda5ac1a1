//! Shared helpers for model designations.

pub mod validation;
