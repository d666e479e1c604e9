use std::collections::HashSet;

use models::application::Application;
use models::document::Document;
use models::ids::{JobId, UserId};

use super::domain::CascadeReport;

/// Everything one delete removes, computed up front from the document.
///
/// Applications go if they reference a removed user (as student) or a removed job, so a
/// company's deletion also clears applications to its postings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadePlan {
    pub users: HashSet<UserId>,
    pub jobs: HashSet<JobId>,
}

impl CascadePlan {
    /// Plan for deleting a user together with every job it owns.
    pub fn for_user(doc: &Document, user_id: &UserId) -> Self {
        let jobs = doc
            .jobs
            .iter()
            .filter(|j| &j.company_id == user_id)
            .map(|j| j.id.clone())
            .collect();
        Self { users: HashSet::from([user_id.clone()]), jobs }
    }

    pub fn for_job(job_id: &JobId) -> Self {
        Self { users: HashSet::new(), jobs: HashSet::from([job_id.clone()]) }
    }

    pub fn touches(&self, app: &Application) -> bool {
        self.users.contains(&app.student_id) || self.jobs.contains(&app.job_id)
    }

    pub fn apply(&self, doc: &mut Document) -> CascadeReport {
        let (users_before, jobs_before, apps_before) =
            (doc.users.len(), doc.jobs.len(), doc.applications.len());

        doc.users.retain(|u| !self.users.contains(&u.id));
        doc.jobs.retain(|j| !self.jobs.contains(&j.id));
        doc.applications.retain(|a| !self.touches(a));

        CascadeReport {
            users_removed: users_before - doc.users.len(),
            jobs_removed: jobs_before - doc.jobs.len(),
            applications_removed: apps_before - doc.applications.len(),
        }
    }
}
