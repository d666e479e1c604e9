//! Service layer for the placement portal.
//! - `storage`: string key-value backends standing in for browser local storage.
//! - `store`: the document store (load/save/seed, session slot) over a backend.
//! - `portal`: registration, login, applications and admin moderation.

pub mod errors;
pub mod storage;
pub mod store;
pub mod seed;
pub mod portal;
#[cfg(test)]
pub mod test_support;
