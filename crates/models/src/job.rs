use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{JobId, UserId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobType {
    Internship,
    #[serde(rename = "Full-Time")]
    FullTime,
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobType::Internship => f.write_str("Internship"),
            JobType::FullTime => f.write_str("Full-Time"),
        }
    }
}

/// A posting owned by a company user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub company_id: UserId,
    pub title: String,
    pub desc: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    /// Yearly compensation; `0` means unpaid or stipend-only. Any JSON number is accepted.
    #[serde(default)]
    pub ctc: f64,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub logo: String,
    pub created_at: DateTime<Utc>,
}

impl Job {
    pub fn is_stipend(&self) -> bool {
        self.ctc <= 0.0
    }
}
