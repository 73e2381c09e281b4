pub mod config;
pub mod error;
pub mod github;
pub mod http;
pub mod paperless;
pub mod platform;
pub mod release;
pub mod runtime;
pub mod system;
