use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::application::Application;
use crate::ids::{JobId, UserId};
use crate::job::Job;
use crate::user::{Role, User};

/// The whole portal state, persisted as one JSON blob.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub applications: Vec<Application>,
}

/// Result of decoding a stored document entry by entry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LenientDecode {
    pub document: Document,
    /// One description per entry that was left out, e.g. `users[3]: unknown variant ...`.
    pub skipped: Vec<String>,
}

fn decode_collection<T: DeserializeOwned>(
    obj: &mut Map<String, Value>,
    key: &str,
    skipped: &mut Vec<String>,
) -> Vec<T> {
    match obj.remove(key) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .into_iter()
            .enumerate()
            .filter_map(|(i, item)| match serde_json::from_value(item) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    skipped.push(format!("{key}[{i}]: {e}"));
                    None
                }
            })
            .collect(),
        Some(_) => {
            skipped.push(format!("{key}: not an array"));
            Vec::new()
        }
    }
}

impl Document {
    /// Decode a stored document without letting one bad entry discard the rest.
    ///
    /// Entries that don't fit their collection's shape are dropped and listed in
    /// `skipped`. Returns `None` only when `value` is not a JSON object at all.
    pub fn from_value_lenient(value: Value) -> Option<LenientDecode> {
        let Value::Object(mut obj) = value else {
            return None;
        };
        let mut skipped = Vec::new();
        let document = Document {
            users: decode_collection(&mut obj, "users", &mut skipped),
            jobs: decode_collection(&mut obj, "jobs", &mut skipped),
            applications: decode_collection(&mut obj, "applications", &mut skipped),
        };
        Some(LenientDecode { document, skipped })
    }

    pub fn find_user(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|u| &u.id == id)
    }

    /// First user whose email matches case-insensitively.
    pub fn find_user_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email_matches(email))
    }

    pub fn find_job(&self, id: &JobId) -> Option<&Job> {
        self.jobs.iter().find(|j| &j.id == id)
    }

    pub fn has_application(&self, job_id: &JobId, student_id: &UserId) -> bool {
        self.applications.iter().any(|a| a.is_for(job_id, student_id))
    }

    pub fn users_with_role(&self, role: Role) -> impl Iterator<Item = &User> {
        self.users.iter().filter(move |u| u.role() == role)
    }

    /// Jobs ordered by `created_at`, newest first. Ties keep document order.
    pub fn jobs_newest_first(&self) -> Vec<Job> {
        let mut jobs = self.jobs.clone();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        jobs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::JobType;
    use chrono::{Duration, Utc};

    fn job(id: &str, offset_mins: i64) -> Job {
        Job {
            id: JobId::from(id),
            company_id: UserId::from("id_c1"),
            title: id.to_string(),
            desc: String::new(),
            job_type: JobType::Internship,
            ctc: 0.0,
            skills: vec![],
            logo: String::new(),
            created_at: Utc::now() + Duration::minutes(offset_mins),
        }
    }

    #[test]
    fn jobs_sort_newest_first() {
        let doc = Document { jobs: vec![job("old", -10), job("new", 5), job("mid", 0)], ..Default::default() };
        let titles: Vec<_> = doc.jobs_newest_first().into_iter().map(|j| j.title).collect();
        assert_eq!(titles, vec!["new", "mid", "old"]);
    }

    #[test]
    fn lenient_decode_drops_only_bad_entries() {
        let raw = serde_json::json!({
            "users": [
                { "id": "id_k", "role": "Student", "name": "Keep Me", "email": "keep@x.com", "password": "pw",
                  "branch": "ME", "year": 4 },
                { "id": "id_r", "role": "Recruiter", "name": "Nope", "email": "r@x.com", "password": "pw" }
            ],
            "jobs": [
                { "id": "id_j", "companyId": "id_gone", "title": "Tutor", "desc": "", "type": "Internship",
                  "ctc": 1500.5, "createdAt": "2024-07-01T10:00:00Z" }
            ],
            "applications": "oops"
        });
        let decoded = Document::from_value_lenient(raw).unwrap();
        assert_eq!(decoded.document.users.len(), 1);
        assert_eq!(decoded.document.users[0].name, "Keep Me");
        assert_eq!(decoded.document.jobs[0].ctc, 1500.5);
        assert!(decoded.document.applications.is_empty());
        assert_eq!(decoded.skipped.len(), 2);
        assert!(decoded.skipped[0].starts_with("users[1]"));
    }

    #[test]
    fn non_object_is_not_a_document() {
        assert!(Document::from_value_lenient(serde_json::json!([1, 2])).is_none());
        assert!(Document::from_value_lenient(serde_json::Value::Null).is_none());
    }

    #[test]
    fn empty_object_decodes_to_empty_document() {
        let doc: Document = serde_json::from_str("{}").unwrap();
        assert_eq!(doc, Document::default());
    }
}
