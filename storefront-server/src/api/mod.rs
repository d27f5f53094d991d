//! API route modules
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`auth`] - login
//! - [`users`] - back-office user management (admin)
//! - [`categories`] - category management
//! - [`products`] - product catalog
//! - [`config`] - site-wide configuration store

use serde::Serialize;

pub mod auth;
pub mod categories;
pub mod config;
pub mod health;
pub mod products;
pub mod users;

/// Plain confirmation body for delete endpoints
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
