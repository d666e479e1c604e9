#![cfg(test)]
use std::sync::Arc;

use models::user::Profile;

use crate::portal::{domain::RegisterInput, PortalService};
use crate::storage::memory_kv::MemoryKvStore;
use crate::store::DocumentStore;

/// Service over a fresh in-memory backend. The seed document appears on first access.
pub fn memory_service() -> PortalService {
    let store = DocumentStore::with_backend(Arc::new(MemoryKvStore::default()));
    PortalService::new(Arc::new(store))
}

pub fn student_input(name: &str, email: &str, password: &str) -> RegisterInput {
    RegisterInput {
        name: name.into(),
        email: email.into(),
        password: password.into(),
        profile: Profile::new_student("CSE", "2", "rust, sql"),
    }
}
