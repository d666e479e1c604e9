//! The portal document store.

pub mod document_store;

pub use document_store::{DocumentStore, StoreKeys};
