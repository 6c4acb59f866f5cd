//! Shared domain contracts for the personal finance application.
//!
//! Everything here is serde-serializable and consumed both by the WASM
//! frontend and by the backend API.

pub mod domain;
pub mod enums;
