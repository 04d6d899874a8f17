use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

use crate::client::ApiClient;
use crate::models::Job;

/// Search parameters as the UI supplies them. `title` is the caller's
/// name for what the backend calls `search`.
#[derive(Debug, Clone, Default)]
pub struct JobQuery {
    pub title: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub sort: Option<String>,
}

impl JobQuery {
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(title) = &self.title {
            params.push(("search", title.clone()));
        }
        if let Some(category) = &self.category {
            params.push(("category", category.clone()));
        }
        if let Some(location) = &self.location {
            params.push(("location", location.clone()));
        }
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(sort) = &self.sort {
            params.push(("sort", sort.clone()));
        }
        params
    }
}

#[derive(Debug, Clone)]
pub struct JobPage {
    pub jobs: Vec<Job>,
    pub total: u64,
    pub page: u32,
    pub total_pages: u32,
}

impl JobPage {
    /// The fallback shown when a listing request fails outright. Note
    /// the page resets to 1 rather than echoing the requested page.
    pub fn fallback() -> Self {
        Self {
            jobs: Vec::new(),
            total: 0,
            page: 1,
            total_pages: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "employmentType", skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
}

// --- Read paths: failures are logged and collapse to a fallback ---

pub fn list(api: &ApiClient, query: &JobQuery) -> JobPage {
    match api.get("/jobs", &query.to_params()) {
        Ok(value) => normalize_page(&value),
        Err(e) => {
            tracing::warn!("Job listing failed: {e}");
            JobPage::fallback()
        }
    }
}

pub fn featured(api: &ApiClient) -> Vec<Job> {
    match api.get("/jobs/featured", &[]) {
        Ok(value) => job_list(&value),
        Err(e) => {
            tracing::warn!("Featured jobs fetch failed: {e}");
            Vec::new()
        }
    }
}

pub fn by_company(api: &ApiClient, company_id: &str) -> Vec<Job> {
    match api.get(&format!("/jobs/company/{}", company_id), &[]) {
        Ok(value) => job_list(&value),
        Err(e) => {
            tracing::warn!("Company jobs fetch failed: {e}");
            Vec::new()
        }
    }
}

pub fn suggestions(api: &ApiClient, q: &str) -> Vec<String> {
    match api.get("/jobs/search/suggestions", &[("q", q.to_string())]) {
        Ok(value) => suggestion_list(&value),
        Err(e) => {
            tracing::warn!("Search suggestions failed: {e}");
            Vec::new()
        }
    }
}

// --- Detail and write paths: failures propagate to the caller ---

pub fn get(api: &ApiClient, id: &str) -> Result<Job> {
    let value = api.get(&format!("/jobs/{}", id), &[])?;
    let body = value.get("job").cloned().unwrap_or(value);
    serde_json::from_value(body).context("Unexpected job shape from backend")
}

pub fn post(api: &ApiClient, new_job: &NewJob) -> Result<Job> {
    let body = serde_json::to_value(new_job)?;
    let value = api.post("/jobs", &body)?;
    let body = value.get("job").cloned().unwrap_or(value);
    serde_json::from_value(body).context("Unexpected job shape from backend")
}

// --- Response normalization ---

fn normalize_page(value: &Value) -> JobPage {
    let jobs = job_list(value);
    let total = value.get("total").and_then(Value::as_u64).unwrap_or(0);
    let page = value
        .get("page")
        .and_then(Value::as_u64)
        .unwrap_or(1)
        .min(u32::MAX as u64) as u32;
    let total_pages = value
        .get("totalPages")
        .and_then(Value::as_u64)
        .unwrap_or(1)
        .min(u32::MAX as u64) as u32;
    JobPage {
        jobs,
        total,
        page,
        total_pages,
    }
}

/// Accepts either a bare array or a `{jobs: [...]}` envelope; records
/// that fail to deserialize are dropped rather than failing the page.
fn job_list(value: &Value) -> Vec<Job> {
    let items = value
        .as_array()
        .or_else(|| value.get("jobs").and_then(Value::as_array));
    match items {
        Some(items) => items
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .collect(),
        None => Vec::new(),
    }
}

fn suggestion_list(value: &Value) -> Vec<String> {
    let items = value
        .as_array()
        .or_else(|| value.get("suggestions").and_then(Value::as_array));
    match items {
        Some(items) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        None => Vec::new(),
    }
}
