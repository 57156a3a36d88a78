//! Profile persistence
//!
//! The progression profile model, user ids and the stores that keep them.

pub mod model;
pub mod user_id;
pub mod storage;
pub mod store;

pub use model::UserProfile;
pub use user_id::UserId;
pub use storage::LocalStorage;
pub use store::{
    ProfileStore, JsonProfileStore, MemoryProfileStore, StoreError,
    PROFILE_RECORD,
};
