//! Player resource handlers
//!
//! One handler per operation. Each reads its parameters from the routed
//! request, calls into the store and encodes the result.

pub mod create;
pub mod delete;
pub mod get;
pub mod query;
pub mod random;

pub use create::CreateCmd;
pub use delete::{DeletePlayerCmd, DeletePlayersCmd};
pub use get::{GetAllCmd, GetPlayerCmd};
pub use query::{ByCreatedCmd, ByTagCmd};
pub use random::RandomCmd;
