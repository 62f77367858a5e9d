//! Shared CLI helpers.

pub mod input;
