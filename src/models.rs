use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Company {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub verified: bool,
}

/// Backends send salary either as a display string ("$90k - $120k")
/// or as a structured amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Salary {
    Text(String),
    Amount { amount: i64, currency: String },
}

impl Salary {
    pub fn display(&self) -> String {
        match self {
            Salary::Text(s) => s.clone(),
            Salary::Amount { amount, currency } => format!("{} {}", amount, currency),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    #[serde(default, alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub company: Company,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, alias = "employmentType")]
    pub employment_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub salary: Option<Salary>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, alias = "postedAt", alias = "createdAt")]
    pub posted_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bookmark {
    #[serde(default, alias = "_id")]
    pub id: String,
    #[serde(alias = "jobId")]
    pub job_id: String,
    #[serde(default)]
    pub job: Option<Job>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApplicationStatus::Pending => write!(f, "pending"),
            ApplicationStatus::Accepted => write!(f, "accepted"),
            ApplicationStatus::Rejected => write!(f, "rejected"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    #[serde(default, alias = "_id")]
    pub id: String,
    #[serde(alias = "jobId")]
    pub job_id: String,
    pub status: ApplicationStatus,
    #[serde(default, alias = "coverLetter")]
    pub cover_letter: Option<String>,
    #[serde(default)]
    pub job: Option<Job>,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(default, alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserStats {
    #[serde(default)]
    pub applications: u64,
    #[serde(default)]
    pub bookmarks: u64,
    #[serde(default, alias = "profileViews")]
    pub profile_views: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_salary_deserializes_both_shapes() {
        let text: Salary = serde_json::from_str(r#""$90k - $120k""#).unwrap();
        assert_eq!(text.display(), "$90k - $120k");

        let amount: Salary =
            serde_json::from_str(r#"{"amount": 95000, "currency": "USD"}"#).unwrap();
        assert_eq!(amount.display(), "95000 USD");
    }

    #[test]
    fn test_job_missing_lists_default_empty() {
        let job: Job = serde_json::from_str(
            r#"{"_id": "j1", "title": "Backend Engineer", "company": {"name": "Acme"}}"#,
        )
        .unwrap();
        assert_eq!(job.id, "j1");
        assert_eq!(job.company.name, "Acme");
        assert!(!job.company.verified);
        assert!(job.requirements.is_empty());
        assert!(job.skills.is_empty());
        assert!(job.salary.is_none());
    }

    #[test]
    fn test_application_status_lowercase() {
        let app: Application =
            serde_json::from_str(r#"{"_id": "a1", "jobId": "j1", "status": "pending"}"#).unwrap();
        assert_eq!(app.status, ApplicationStatus::Pending);
        assert_eq!(app.status.to_string(), "pending");
    }
}
