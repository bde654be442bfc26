pub mod division;
pub mod employee;
pub mod health;
pub mod session;
