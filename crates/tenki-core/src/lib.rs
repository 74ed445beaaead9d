//! Core weather text handling for the forecast viewer
//!
//! Turns the feed's numeric weather codes into phrases, short display text
//! and icon tokens. Everything in this crate is pure and synchronous.

pub mod dictionary;
pub mod normalize;
pub mod tokens;
pub mod types;

pub use dictionary::*;
pub use normalize::*;
pub use tokens::*;
pub use types::*;
