use async_trait::async_trait;
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::debug;

use crate::player::PlayerId;
use crate::protocol::error::ApiError;
use crate::protocol::handler::{Handler, Request};
use crate::protocol::reply::Reply;
use crate::protocol::route::{Target, item_path};
use crate::store::PlayerStore;

/// Pick one ID uniformly at random
pub fn pick<R: Rng + ?Sized>(ids: &[PlayerId], rng: &mut R) -> Option<PlayerId> {
    match ids {
        [] => None,
        [only] => Some(*only),
        _ => ids.choose(rng).copied(),
    }
}

/// GET /players/random: redirect to a random existing player.
///
/// The IDs are snapshotted under the store lock and the draw happens after it
/// is released, so the chosen player may be gone by the time the client
/// follows the redirect. That GET then answers 404.
pub struct RandomCmd;

#[async_trait]
impl Handler for RandomCmd {
    async fn handle(&self, request: &Request, store: &PlayerStore) -> Result<Reply, ApiError> {
        let root = match &request.target {
            Target::Random { root } => Some(*root),
            _ => None,
        };

        let ids = store.player_ids();
        let chosen = {
            let mut rng = rand::rng();
            pick(&ids, &mut rng)
        };
        let id = chosen.ok_or_else(|| ApiError::not_found("no players stored"))?;

        debug!("Picked player {} out of {}", id, ids.len());
        Ok(Reply::redirect(item_path(root, id)))
    }
}
