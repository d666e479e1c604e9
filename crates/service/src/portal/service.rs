use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};

use models::application::Application;
use models::ids::{JobId, UserId};
use models::job::Job;
use models::user::{self, Role, User};

use super::cascade::CascadePlan;
use super::domain::{CascadeReport, JobSummary, LoginInput, RegisterInput};
use super::errors::PortalError;
use crate::store::DocumentStore;

/// Company name shown for jobs whose owner no longer resolves.
pub const UNKNOWN_COMPANY: &str = "Unknown";

/// Portal business service over a document store handle.
pub struct PortalService {
    store: Arc<DocumentStore>,
}

impl PortalService {
    pub fn new(store: Arc<DocumentStore>) -> Self { Self { store } }

    pub fn store(&self) -> &DocumentStore { &self.store }

    /// Seed the store on first run. Returns whether seeding happened.
    pub async fn init(&self) -> Result<bool, PortalError> {
        Ok(self.store.ensure_defaults().await?)
    }

    /// Register a new user. Emails are unique case-insensitively.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use models::user::Profile;
    /// use service::portal::{PortalService, PortalError, domain::RegisterInput};
    /// use service::storage::memory_kv::MemoryKvStore;
    /// use service::store::DocumentStore;
    /// let store = Arc::new(DocumentStore::with_backend(Arc::new(MemoryKvStore::default())));
    /// let svc = PortalService::new(store);
    /// let input = RegisterInput { name: "Alice".into(), email: "alice@x.com".into(), password: "pw123".into(), profile: Profile::new_student("CSE", "2", "rust, sql") };
    /// let user = tokio_test::block_on(svc.register(input.clone())).unwrap();
    /// assert_eq!(user.email, "alice@x.com");
    /// let again = RegisterInput { email: "ALICE@x.com".into(), ..input };
    /// assert!(matches!(tokio_test::block_on(svc.register(again)), Err(PortalError::DuplicateEmail)));
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email, role = %input.profile.role()))]
    pub async fn register(&self, input: RegisterInput) -> Result<User, PortalError> {
        let name = input.name.trim();
        let email = input.email.trim();
        user::validate_required(name, email, &input.password)?;

        let new_user = User {
            id: UserId::generate(),
            name: name.to_string(),
            email: email.to_string(),
            password: input.password,
            profile: input.profile,
        };
        let created = self
            .store
            .update(|doc| {
                if let Some(existing) = doc.find_user_by_email(&new_user.email) {
                    debug!(existing_id = %existing.id, "email already registered");
                    return Err(PortalError::DuplicateEmail);
                }
                doc.users.push(new_user.clone());
                Ok(new_user)
            })
            .await?;

        info!(user_id = %created.id, role = %created.role(), "user_registered");
        Ok(created)
    }

    /// User whose email matches case-insensitively and whose password matches exactly.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>, PortalError> {
        let doc = self.store.snapshot().await?;
        let email = email.trim();
        Ok(doc.users.into_iter().find(|u| u.email_matches(email) && u.password == password))
    }

    /// Authenticate and record the user in the session slot.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<User, PortalError> {
        let user = self
            .authenticate(&input.email, &input.password)
            .await?
            .ok_or(PortalError::InvalidCredentials)?;
        self.store.set_session(&user.id).await?;
        info!(user_id = %user.id, role = %user.role(), "user_logged_in");
        Ok(user)
    }

    pub async fn logout(&self) -> Result<(), PortalError> {
        self.store.clear_session().await?;
        Ok(())
    }

    /// The logged-in user, or `None` if no session exists or its id no longer resolves.
    pub async fn current_user(&self) -> Result<Option<User>, PortalError> {
        let Some(id) = self.store.session_user_id().await? else {
            return Ok(None);
        };
        let doc = self.store.snapshot().await?;
        Ok(doc.find_user(&id).cloned())
    }

    /// Record an application of `student_id` to `job_id`; one per pair.
    #[instrument(skip(self), fields(job_id = %job_id, student_id = %student_id))]
    pub async fn apply_to_job(&self, job_id: &JobId, student_id: &UserId) -> Result<Application, PortalError> {
        let app = self
            .store
            .update(|doc| {
                if doc.find_job(job_id).is_none() {
                    return Err(PortalError::not_found("job"));
                }
                match doc.find_user(student_id) {
                    Some(u) if u.role() == Role::Student => {}
                    _ => return Err(PortalError::not_found("student")),
                }
                if doc.has_application(job_id, student_id) {
                    return Err(PortalError::AlreadyApplied);
                }
                let app = Application::submit(job_id.clone(), student_id.clone(), Utc::now());
                doc.applications.push(app.clone());
                Ok(app)
            })
            .await?;

        info!(application_id = %app.id, "application_submitted");
        Ok(app)
    }

    /// Apply on behalf of the logged-in user, who must be a student.
    pub async fn apply_as_current_user(&self, job_id: &JobId) -> Result<Application, PortalError> {
        let user = self.current_user().await?.ok_or(PortalError::NotAuthenticated)?;
        if user.role() != Role::Student {
            return Err(PortalError::Forbidden("only students can apply".into()));
        }
        self.apply_to_job(job_id, &user.id).await
    }

    /// Delete a user with its jobs and every application tied to either.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn delete_user(&self, user_id: &UserId) -> Result<CascadeReport, PortalError> {
        let report = self
            .store
            .update(|doc| Ok::<_, PortalError>(CascadePlan::for_user(doc, user_id).apply(doc)))
            .await?;
        info!(
            users = report.users_removed,
            jobs = report.jobs_removed,
            applications = report.applications_removed,
            "user_deleted"
        );
        Ok(report)
    }

    /// Delete a job and every application to it.
    #[instrument(skip(self), fields(job_id = %job_id))]
    pub async fn delete_job(&self, job_id: &JobId) -> Result<CascadeReport, PortalError> {
        let report = self
            .store
            .update(|doc| Ok::<_, PortalError>(CascadePlan::for_job(job_id).apply(doc)))
            .await?;
        info!(jobs = report.jobs_removed, applications = report.applications_removed, "job_deleted");
        Ok(report)
    }

    /// All jobs, newest first.
    pub async fn list_jobs(&self) -> Result<Vec<Job>, PortalError> {
        Ok(self.store.snapshot().await?.jobs_newest_first())
    }

    /// The `limit` newest jobs.
    pub async fn recent_jobs(&self, limit: usize) -> Result<Vec<Job>, PortalError> {
        let mut jobs = self.list_jobs().await?;
        jobs.truncate(limit);
        Ok(jobs)
    }

    /// Jobs in stored order, each with its company's name or [`UNKNOWN_COMPANY`].
    pub async fn list_job_summaries(&self) -> Result<Vec<JobSummary>, PortalError> {
        let doc = self.store.snapshot().await?;
        Ok(doc
            .jobs
            .iter()
            .map(|job| JobSummary {
                company_name: doc
                    .find_user(&job.company_id)
                    .map(|u| u.name.clone())
                    .unwrap_or_else(|| UNKNOWN_COMPANY.to_string()),
                job: job.clone(),
            })
            .collect())
    }

    pub async fn list_users_by_role(&self, role: Role) -> Result<Vec<User>, PortalError> {
        let doc = self.store.snapshot().await?;
        Ok(doc.users_with_role(role).cloned().collect())
    }

    pub async fn list_applications(&self) -> Result<Vec<Application>, PortalError> {
        Ok(self.store.snapshot().await?.applications)
    }

    pub async fn find_user(&self, id: &UserId) -> Result<Option<User>, PortalError> {
        Ok(self.store.snapshot().await?.find_user(id).cloned())
    }

    pub async fn find_job(&self, id: &JobId) -> Result<Option<Job>, PortalError> {
        Ok(self.store.snapshot().await?.find_job(id).cloned())
    }

    /// The user with this id, only if it is a company.
    pub async fn find_company(&self, id: &UserId) -> Result<Option<User>, PortalError> {
        Ok(self.find_user(id).await?.filter(|u| u.role() == Role::Company))
    }
}
