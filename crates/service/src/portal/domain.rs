use serde::{Deserialize, Serialize};

use models::job::Job;
use models::user::Profile;

/// Registration input. Name and email are trimmed before use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub profile: Profile,
}

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Job paired with the name of the company that posted it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobSummary {
    pub job: Job,
    pub company_name: String,
}

/// What a cascading delete removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CascadeReport {
    pub users_removed: usize,
    pub jobs_removed: usize,
    pub applications_removed: usize,
}

impl CascadeReport {
    pub fn is_empty(&self) -> bool {
        self.users_removed == 0 && self.jobs_removed == 0 && self.applications_removed == 0
    }
}
