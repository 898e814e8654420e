//! Implementation of `#[derive(Record)]`.
//!
//! Generates `keyseek::Record::field_value` and column-name constants from
//! `#[column(...)]` field annotations.

mod attrs;
mod derive;

pub use derive::record_derive_impl;
