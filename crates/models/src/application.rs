use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ApplicationId, JobId, UserId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Applied,
}

/// A student's application to a job.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub student_id: UserId,
    pub applied_at: DateTime<Utc>,
    pub status: ApplicationStatus,
}

impl Application {
    /// New application in the `Applied` state.
    pub fn submit(job_id: JobId, student_id: UserId, applied_at: DateTime<Utc>) -> Self {
        Self {
            id: ApplicationId::generate(),
            job_id,
            student_id,
            applied_at,
            status: ApplicationStatus::Applied,
        }
    }

    pub fn is_for(&self, job_id: &JobId, student_id: &UserId) -> bool {
        &self.job_id == job_id && &self.student_id == student_id
    }
}
