//! Auth types shared across Staffdesk crates.
//!
//! Provides the opaque bearer-token format and the `BearerToken` extractor.

pub mod bearer;
pub mod token;
