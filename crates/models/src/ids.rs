//! Opaque string identifiers.
//!
//! Stored documents may carry ids produced by older clients (`id_k3x9a1b`), so ids are
//! kept as arbitrary strings and only freshly generated ones follow the `id_<uuid>` form.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a fresh random id.
            pub fn generate() -> Self {
                Self(format!("id_{}", Uuid::new_v4().simple()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self { Self(value) }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self { Self(value.to_string()) }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

opaque_id!(
    /// Identifier of a [`crate::user::User`].
    UserId
);
opaque_id!(
    /// Identifier of a [`crate::job::Job`].
    JobId
);
opaque_id!(
    /// Identifier of an [`crate::application::Application`].
    ApplicationId
);
