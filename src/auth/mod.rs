//! User login and registration.
//!
//! Users live in the `"user"` table. A user without a role can register
//! but cannot log in until an administrator assigns one.

pub mod models;
pub mod queries;
pub mod services;

pub use models::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, User};
