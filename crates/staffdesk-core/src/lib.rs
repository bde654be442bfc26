//! Ambient HTTP and persistence plumbing shared by Staffdesk services.

pub mod config;
pub mod envelope;
pub mod health;
pub mod middleware;
pub mod sea_ext;
pub mod tracing;
