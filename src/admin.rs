//! Admin portal
//!
//! A single stateless credential check against the configured password.
//! It shares nothing with the player store.

use async_trait::async_trait;

use crate::protocol::error::ApiError;
use crate::protocol::handler::{Handler, Request};
use crate::protocol::reply::Reply;
use crate::store::PlayerStore;

/// The only user allowed into the portal
pub const ADMIN_USER: &str = "admin";

const ADMIN_PAGE: &str = "<html><h1>Admin Portal</h1></html>";

/// HTTP Basic credentials sent with a request
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

#[derive(Clone)]
pub struct AdminPortal {
    password: String,
}

impl AdminPortal {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }

    /// Allow `admin` with the configured password, deny everything else
    pub fn authorize(&self, username: &str, attempt: &str) -> bool {
        username == ADMIN_USER && attempt == self.password
    }
}

/// GET /admin
pub struct AdminCmd {
    portal: AdminPortal,
}

impl AdminCmd {
    pub fn new(portal: AdminPortal) -> Self {
        Self { portal }
    }
}

#[async_trait]
impl Handler for AdminCmd {
    async fn handle(&self, request: &Request, _store: &PlayerStore) -> Result<Reply, ApiError> {
        match &request.credentials {
            Some(c) if self.portal.authorize(&c.username, &c.password) => Ok(Reply::html(ADMIN_PAGE)),
            _ => Err(ApiError::Unauthorized),
        }
    }
}
