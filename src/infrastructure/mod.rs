//! Infrastructure layer - Storage, keys, signing and services

pub mod auth;
pub mod clock;
pub mod config;
pub mod keys;
pub mod logging;
pub mod observability;
pub mod role;
pub mod services;
pub mod storage;
pub mod token_id;
