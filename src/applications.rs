use anyhow::{Result, anyhow};
use serde_json::{Value, json};

use crate::client::ApiClient;
use crate::models::{Application, ApplicationStatus};

pub fn list(api: &ApiClient) -> Vec<Application> {
    match api.get("/applications", &[]) {
        Ok(value) => application_list(&value),
        Err(e) => {
            tracing::warn!("Application listing failed: {e}");
            Vec::new()
        }
    }
}

pub fn apply(api: &ApiClient, job_id: &str, cover_letter: Option<&str>) -> Result<Application> {
    let mut body = json!({ "jobId": job_id });
    if let Some(letter) = cover_letter {
        body["coverLetter"] = json!(letter);
    }
    let value = api
        .post("/applications", &body)
        .inspect_err(|e| tracing::error!("Application submit failed: {e}"))?;
    let body = value.get("application").cloned().unwrap_or(value);
    serde_json::from_value(body).map_err(|e| anyhow!("Unexpected application shape: {e}"))
}

/// Withdrawal is only allowed while the application is still pending.
pub fn can_withdraw(status: ApplicationStatus) -> bool {
    status == ApplicationStatus::Pending
}

/// The pending check happens client-side before the request goes out.
pub fn withdraw(api: &ApiClient, application: &Application) -> Result<()> {
    if !can_withdraw(application.status) {
        return Err(anyhow!(
            "Cannot withdraw an application with status '{}'",
            application.status
        ));
    }
    api.delete(&format!("/applications/{}", application.id))
        .inspect_err(|e| tracing::error!("Application withdraw failed: {e}"))?;
    Ok(())
}

fn application_list(value: &Value) -> Vec<Application> {
    let items = value
        .as_array()
        .or_else(|| value.get("applications").and_then(Value::as_array));
    match items {
        Some(items) => items
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .collect(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_withdraw_only_while_pending() {
        assert!(can_withdraw(ApplicationStatus::Pending));
        assert!(!can_withdraw(ApplicationStatus::Accepted));
        assert!(!can_withdraw(ApplicationStatus::Rejected));
    }

    #[test]
    fn test_application_list_shapes() {
        let wrapped = json!({
            "applications": [{"_id": "a1", "jobId": "j1", "status": "pending"}]
        });
        let apps = application_list(&wrapped);
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].status, ApplicationStatus::Pending);

        assert!(application_list(&json!({})).is_empty());
    }

    #[test]
    fn test_application_list_drops_unknown_status() {
        let value = json!({
            "applications": [
                {"_id": "a1", "jobId": "j1", "status": "pending"},
                {"_id": "a2", "jobId": "j2", "status": "ghosted"}
            ]
        });
        assert_eq!(application_list(&value).len(), 1);
    }
}
