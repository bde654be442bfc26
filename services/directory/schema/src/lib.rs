pub mod access_tokens;
pub mod admins;
pub mod divisions;
pub mod employees;
