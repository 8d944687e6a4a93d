//! Data Transfer Objects for the HTTP layer.

pub mod response;

pub use response::*;
