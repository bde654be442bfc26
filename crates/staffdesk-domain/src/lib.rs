//! Domain types shared across Staffdesk crates.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; `infra/` and `handlers/` only convert to and from them.

pub mod filter;
pub mod id;
pub mod pagination;
