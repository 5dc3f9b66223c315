pub mod api;
pub mod authenticator;
pub mod config;
pub mod content;
pub mod crypto;
pub mod db;
pub mod error;
pub mod identity;
