use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::player::{NewPlayer, Player, PlayerId};

/// Errors returned by the player store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("player {0} not found")]
    NotFound(PlayerId),
}

/// Data guarded by the store lock. The counter lives next to the map so that
/// assigning an ID and inserting the record happen in one critical section.
struct Players {
    entries: HashMap<PlayerId, Player>,
    next_id: PlayerId,
}

/// In-memory player store
///
/// Mutations take the write lock; reads take the read lock and clone what
/// they return before releasing it, so every scan is a point-in-time view.
pub struct PlayerStore {
    data: RwLock<Players>,
}

impl PlayerStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            data: RwLock::new(Players {
                entries: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    // Records are plain values that are never left half-written, so a
    // poisoned lock still guards consistent data.
    fn read(&self) -> RwLockReadGuard<'_, Players> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Players> {
        self.data.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert a new player and return its freshly assigned ID
    pub fn create_player(&self, new: NewPlayer, created: DateTime<Utc>) -> PlayerId {
        let mut data = self.write();
        let id = data.next_id;
        data.next_id += 1;
        data.entries.insert(id, new.into_player(id, created));
        id
    }

    /// Get a player by ID
    pub fn get_player(&self, id: PlayerId) -> Result<Player, StoreError> {
        let data = self.read();
        data.entries.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    /// Get all players, ordered by ID
    pub fn get_all_players(&self) -> Vec<Player> {
        self.select(|_| true)
    }

    /// Get all players carrying the given tag
    pub fn get_players_by_tag(&self, tag: &str) -> Vec<Player> {
        self.select(|p| p.has_tag(tag))
    }

    /// Get all players created at exactly the given instant
    pub fn get_players_by_created(&self, created: DateTime<Utc>) -> Vec<Player> {
        self.select(|p| p.created == created)
    }

    /// Delete a player by ID
    pub fn delete_player(&self, id: PlayerId) -> Result<(), StoreError> {
        let mut data = self.write();
        match data.entries.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(id)),
        }
    }

    /// Delete all players. The ID counter is left untouched.
    pub fn delete_players(&self) {
        self.write().entries.clear();
    }

    /// Snapshot of the IDs currently held
    pub fn player_ids(&self) -> Vec<PlayerId> {
        let data = self.read();
        data.entries.keys().copied().collect()
    }

    /// Number of players currently held
    pub fn len(&self) -> usize {
        self.read().entries.len()
    }

    fn select(&self, pred: impl Fn(&Player) -> bool) -> Vec<Player> {
        let mut players: Vec<Player> = {
            let data = self.read();
            data.entries.values().filter(|p| pred(p)).cloned().collect()
        };
        players.sort_by_key(|p| p.id);
        players
    }
}

impl Default for PlayerStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    fn tags(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_create_and_get() {
        let store = PlayerStore::new();
        let created = Utc::now();
        let id = store.create_player(NewPlayer::new("Ada", tags(&["admin", "core"])), created);

        let player = store.get_player(id).unwrap();
        assert_eq!(player.id, id);
        assert_eq!(player.text, "Ada");
        assert_eq!(player.tags, tags(&["admin", "core"]));
        assert_eq!(player.created, created);
    }

    #[test]
    fn test_get_not_found() {
        let store = PlayerStore::new();
        assert_eq!(store.get_player(42), Err(StoreError::NotFound(42)));
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let store = PlayerStore::new();
        let first = store.create_player(NewPlayer::new("a", vec![]), Utc::now());
        store.delete_player(first).unwrap();
        let second = store.create_player(NewPlayer::new("b", vec![]), Utc::now());
        assert!(second > first);

        store.delete_players();
        let third = store.create_player(NewPlayer::new("c", vec![]), Utc::now());
        assert!(third > second);
    }

    #[test]
    fn test_delete_is_final() {
        let store = PlayerStore::new();
        let id = store.create_player(NewPlayer::new("Ada", vec![]), Utc::now());
        store.delete_player(id).unwrap();

        for _ in 0..3 {
            assert_eq!(store.get_player(id), Err(StoreError::NotFound(id)));
        }
        assert_eq!(store.delete_player(id), Err(StoreError::NotFound(id)));
    }

    #[test]
    fn test_get_by_tag() {
        let store = PlayerStore::new();
        let now = Utc::now();
        let a = store.create_player(NewPlayer::new("a", tags(&["red", "blue"])), now);
        let _b = store.create_player(NewPlayer::new("b", tags(&["green"])), now);
        let c = store.create_player(NewPlayer::new("c", tags(&["blue"])), now);

        let ids: Vec<_> = store.get_players_by_tag("blue").iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![a, c]);
        assert!(store.get_players_by_tag("purple").is_empty());
        assert!(store.get_players_by_tag("").is_empty());
    }

    #[test]
    fn test_get_by_created_exact_match() {
        let store = PlayerStore::new();
        let t1 = Utc::now();
        let t2 = t1 + chrono::Duration::nanoseconds(1);
        let a = store.create_player(NewPlayer::new("a", vec![]), t1);
        let b = store.create_player(NewPlayer::new("b", vec![]), t2);

        assert_eq!(store.get_players_by_created(t1)[0].id, a);
        assert_eq!(store.get_players_by_created(t2)[0].id, b);
        assert!(store.get_players_by_created(t1 - chrono::Duration::seconds(1)).is_empty());
    }

    #[test]
    fn test_delete_players() {
        let store = PlayerStore::new();
        store.delete_players();
        assert_eq!(store.len(), 0);

        for i in 0..5 {
            store.create_player(NewPlayer::new(format!("p{}", i), vec![]), Utc::now());
        }
        assert_eq!(store.len(), 5);

        store.delete_players();
        assert!(store.get_all_players().is_empty());
        assert!(store.player_ids().is_empty());
    }

    #[test]
    fn test_concurrent_creates_assign_unique_ids() {
        let store = Arc::new(PlayerStore::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    (0..200)
                        .map(|i| {
                            store.create_player(NewPlayer::new(format!("{}-{}", t, i), vec![]), Utc::now())
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(ids.insert(id), "duplicate id {}", id);
            }
        }
        assert_eq!(ids.len(), 1600);
        assert_eq!(store.len(), 1600);
    }

    #[test]
    fn test_get_all_during_concurrent_mutation() {
        let store = Arc::new(PlayerStore::new());
        let writer = {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..500 {
                    let id = store.create_player(NewPlayer::new(format!("{}", i), tags(&["x"])), Utc::now());
                    if i % 2 == 0 {
                        store.delete_player(id).unwrap();
                    }
                }
            })
        };

        for _ in 0..200 {
            let players = store.get_all_players();
            for pair in players.windows(2) {
                assert!(pair[0].id < pair[1].id);
            }
            assert!(players.iter().all(|p| p.tags == tags(&["x"])));
        }
        writer.join().unwrap();
        assert_eq!(store.len(), 250);
    }
}
