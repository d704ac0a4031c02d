//! HTTP protocol for the player API
//!
//! This module provides request routing, the per-operation handlers and the
//! reply encoding. Nothing here depends on the transport; the server feeds
//! requests in and writes replies out.

pub mod error;
pub mod handler;
pub mod player;
pub mod reply;
pub mod route;

pub use handler::{HandlerFactory, Request};
pub use reply::Reply;
pub use route::Route;
