//! Document shapes persisted in the store.

mod repo;

pub use repo::{parse_object_id, RepoDocument};
