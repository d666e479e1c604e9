use chrono::{DateTime, Utc};

use models::document::Document;
use models::ids::{JobId, UserId};
use models::job::{Job, JobType};
use models::user::{Profile, User, DEFAULT_COMPANY_LOGO};

fn skills(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Build the first-run document: one admin, one company, one student and two jobs
/// posted by that company at `now`. No applications.
pub fn seed_document(now: DateTime<Utc>) -> Document {
    let admin = User {
        id: UserId::generate(),
        name: "Admin".into(),
        email: "admin@college.edu".into(),
        password: "admin123".into(),
        profile: Profile::Admin,
    };
    let company = User {
        id: UserId::generate(),
        name: "BlueSoft".into(),
        email: "hr@bluesoft.com".into(),
        password: "comp123".into(),
        profile: Profile::Company { logo: DEFAULT_COMPANY_LOGO.into(), company_profile: String::new() },
    };
    let student = User {
        id: UserId::generate(),
        name: "Rohit Sharma".into(),
        email: "rohit@college.edu".into(),
        password: "stud123".into(),
        profile: Profile::Student {
            branch: "CSE".into(),
            year: "3".into(),
            skills: skills(&["javascript", "html", "css"]),
        },
    };

    let jobs = vec![
        Job {
            id: JobId::generate(),
            company_id: company.id.clone(),
            title: "Frontend Developer Intern".into(),
            desc: "Work on UI components and web pages".into(),
            job_type: JobType::Internship,
            ctc: 0.0,
            skills: skills(&["html", "css", "javascript"]),
            logo: DEFAULT_COMPANY_LOGO.into(),
            created_at: now,
        },
        Job {
            id: JobId::generate(),
            company_id: company.id.clone(),
            title: "Junior Web Developer".into(),
            desc: "Full-time role building SPA".into(),
            job_type: JobType::FullTime,
            ctc: 350_000.0,
            skills: skills(&["javascript", "react"]),
            logo: DEFAULT_COMPANY_LOGO.into(),
            created_at: now,
        },
    ];

    Document { users: vec![admin, company, student], jobs, applications: vec![] }
}
