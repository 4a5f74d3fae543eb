//! # Inkwell Shared
//!
//! Wire types of the blog's JSON API.
//! Kept free of server dependencies so a client can reuse them as-is.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
