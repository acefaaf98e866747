//! Shared low-level byte and text utilities

pub mod synchsafe;
pub mod text;
