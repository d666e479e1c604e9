use serde::{Deserialize, Serialize};

use crate::ids::UserId;

/// Persisted pointer to the logged-in user. Holds nothing but the id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPointer {
    pub id: UserId,
}
