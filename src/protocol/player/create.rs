use async_trait::async_trait;
use axum::http::{StatusCode, header};
use chrono::Utc;
use serde::Serialize;
use tracing::info;

use crate::player::{NewPlayer, PlayerId};
use crate::protocol::error::ApiError;
use crate::protocol::handler::{Handler, Request};
use crate::protocol::reply::Reply;
use crate::protocol::route::item_path;
use crate::store::PlayerStore;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Body returned by a successful create
#[derive(Debug, Serialize)]
struct Created {
    id: PlayerId,
}

/// Parameters for a create request
struct CreateParams;

impl CreateParams {
    /// Check the content type, then decode the body
    fn parse(request: &Request) -> Result<NewPlayer, ApiError> {
        let content_type = request.content_type.as_deref().unwrap_or("");
        if content_type != JSON_CONTENT_TYPE {
            return Err(ApiError::UnsupportedMediaType(content_type.to_string()));
        }

        serde_json::from_slice(&request.body)
            .map_err(|e| ApiError::bad_request(format!("invalid player body: {}", e)))
    }
}

/// POST on the collection
pub struct CreateCmd;

#[async_trait]
impl Handler for CreateCmd {
    async fn handle(&self, request: &Request, store: &PlayerStore) -> Result<Reply, ApiError> {
        let new = CreateParams::parse(request)?;
        let id = store.create_player(new, Utc::now());
        info!("Created player {} ({} stored)", id, store.len());

        Ok(Reply::json(StatusCode::CREATED, &Created { id })?.with_header(header::LOCATION, item_path(None, id)))
    }
}
