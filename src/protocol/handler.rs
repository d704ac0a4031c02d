use std::collections::HashMap;

use async_trait::async_trait;
use axum::body::Bytes;
use tracing::{debug, error, warn};

use crate::admin::{AdminCmd, AdminPortal, Credentials};
use crate::protocol::error::ApiError;
use crate::protocol::player::{
    ByCreatedCmd, ByTagCmd, CreateCmd, DeletePlayerCmd, DeletePlayersCmd, GetAllCmd, GetPlayerCmd, RandomCmd,
};
use crate::protocol::reply::Reply;
use crate::protocol::route::{Operation, Target};
use crate::store::PlayerStore;

/// A request as seen by the handlers, already routed
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub target: Target,
    pub content_type: Option<String>,
    pub credentials: Option<Credentials>,
    pub body: Bytes,
}

impl Request {
    pub fn new(target: Target) -> Self {
        Self {
            target,
            content_type: None,
            credentials: None,
            body: Bytes::new(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }
}

/// Executes one operation against the store
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, request: &Request, store: &PlayerStore) -> Result<Reply, ApiError>;
}

/// Registry of handlers, one per operation
pub struct HandlerFactory {
    handlers: HashMap<Operation, Box<dyn Handler>>,
}

impl HandlerFactory {
    /// Create a factory with every operation registered
    pub fn init(admin: AdminPortal) -> Self {
        let mut factory = Self {
            handlers: HashMap::new(),
        };
        factory.register(Operation::CreatePlayer, CreateCmd);
        factory.register(Operation::GetAllPlayers, GetAllCmd);
        factory.register(Operation::DeletePlayers, DeletePlayersCmd);
        factory.register(Operation::GetPlayer, GetPlayerCmd);
        factory.register(Operation::DeletePlayer, DeletePlayerCmd);
        factory.register(Operation::RandomPlayer, RandomCmd);
        factory.register(Operation::PlayersByTag, ByTagCmd);
        factory.register(Operation::PlayersByCreated, ByCreatedCmd);
        factory.register(Operation::AdminPortal, AdminCmd::new(admin));
        factory
    }

    fn register(&mut self, operation: Operation, handler: impl Handler + 'static) {
        self.handlers.insert(operation, Box::new(handler));
    }

    /// Run the handler for `operation` and turn any failure into a reply
    pub async fn execute(&self, operation: Operation, request: &Request, store: &PlayerStore) -> Reply {
        debug!("Dispatching {:?} on {:?}", operation, request.target);
        let result = match self.handlers.get(&operation) {
            Some(handler) => handler.handle(request, store).await,
            None => Err(ApiError::internal(format!("no handler registered for {:?}", operation))),
        };

        match result {
            Ok(reply) => reply,
            Err(e) => {
                match &e {
                    ApiError::Internal(detail) => error!("{:?} failed: {}", operation, detail),
                    ApiError::NotFound(_) => debug!("{:?}: {}", operation, e),
                    _ => warn!("{:?} rejected: {}", operation, e),
                }
                Reply::error(&e)
            }
        }
    }
}
