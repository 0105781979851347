// crates/portal-client/src/lib.rs
// Portal - paginated resource browser for the language portal and haiku backends

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod api;
pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod http;
pub mod notify;
pub mod view;

pub use client::ResourceClient;
pub use error::{PortalError, Result};
