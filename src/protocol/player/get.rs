use async_trait::async_trait;
use axum::http::StatusCode;

use crate::protocol::error::ApiError;
use crate::protocol::handler::{Handler, Request};
use crate::protocol::reply::Reply;
use crate::store::PlayerStore;

/// GET on an item
pub struct GetPlayerCmd;

#[async_trait]
impl Handler for GetPlayerCmd {
    async fn handle(&self, request: &Request, store: &PlayerStore) -> Result<Reply, ApiError> {
        let id = request.target.player_id()?;
        let player = store.get_player(id)?;
        Reply::json(StatusCode::OK, &player)
    }
}

/// GET on the collection
pub struct GetAllCmd;

#[async_trait]
impl Handler for GetAllCmd {
    async fn handle(&self, _request: &Request, store: &PlayerStore) -> Result<Reply, ApiError> {
        Reply::json(StatusCode::OK, &store.get_all_players())
    }
}
