use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::ModelError;
use crate::ids::UserId;

/// Logo assigned to companies that register without one.
pub const DEFAULT_COMPANY_LOGO: &str = "assets/company1.svg";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Company,
    Student,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Admin => "Admin",
            Role::Company => "Company",
            Role::Student => "Student",
        };
        f.write_str(s)
    }
}

/// Role-specific payload of a user.
///
/// Serialized with the `role` tag inline, so a student reads as
/// `{"role": "Student", "branch": "CSE", "year": "3", "skills": [..]}` once flattened
/// into [`User`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role")]
pub enum Profile {
    Admin,
    Company {
        #[serde(default)]
        logo: String,
        #[serde(rename = "companyProfile", default)]
        company_profile: String,
    },
    Student {
        #[serde(default)]
        branch: String,
        #[serde(default, deserialize_with = "string_or_number")]
        year: String,
        #[serde(default)]
        skills: Vec<String>,
    },
}

impl Profile {
    pub fn role(&self) -> Role {
        match self {
            Profile::Admin => Role::Admin,
            Profile::Company { .. } => Role::Company,
            Profile::Student { .. } => Role::Student,
        }
    }

    /// Company profile as created by self-registration: default logo, empty description.
    pub fn new_company() -> Self {
        Profile::Company { logo: DEFAULT_COMPANY_LOGO.to_string(), company_profile: String::new() }
    }

    /// Student profile with skills taken from a comma-separated list.
    pub fn new_student(branch: &str, year: &str, skills_csv: &str) -> Self {
        Profile::Student {
            branch: branch.to_string(),
            year: year.to_string(),
            skills: parse_skills(skills_csv),
        }
    }
}

/// A registered account.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(flatten)]
    pub profile: Profile,
}

impl User {
    pub fn role(&self) -> Role {
        self.profile.role()
    }

    /// Case-insensitive email comparison.
    pub fn email_matches(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.to_lowercase()
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("profile", &self.profile)
            .finish()
    }
}

/// Older clients stored the study year as a number; keep it as text either way.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }
    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(f) => f.to_string(),
    })
}

/// Split a comma-separated skill list, trimming entries and dropping blanks.
pub fn parse_skills(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Name, email and password must all be non-empty after trimming name and email.
pub fn validate_required(name: &str, email: &str, password: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        return Err(ModelError::Validation("fill required fields".into()));
    }
    Ok(())
}
