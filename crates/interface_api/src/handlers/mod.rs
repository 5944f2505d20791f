//! Request handlers

pub mod admin;
pub mod health;
pub mod kyc;
pub mod token;
