use anyhow::{Context, Result};
use serde_json::{Value, json};

use crate::client::ApiClient;
use crate::models::Category;

/// Read-only reference data used for filtering job listings.
pub fn list(api: &ApiClient) -> Vec<Category> {
    match api.get("/categories", &[]) {
        Ok(value) => category_list(&value),
        Err(e) => {
            tracing::warn!("Category listing failed: {e}");
            Vec::new()
        }
    }
}

pub fn create(api: &ApiClient, name: &str) -> Result<Category> {
    let value = api
        .post("/categories", &json!({ "name": name }))
        .inspect_err(|e| tracing::error!("Category create failed: {e}"))?;
    let body = value.get("category").cloned().unwrap_or(value);
    serde_json::from_value(body).context("Unexpected category shape from backend")
}

fn category_list(value: &Value) -> Vec<Category> {
    let items = value
        .as_array()
        .or_else(|| value.get("categories").and_then(Value::as_array));
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
    fn test_category_list_shapes() {
        let wrapped = json!({
            "categories": [{"_id": "c1", "name": "Engineering", "slug": "engineering"}]
        });
        let cats = category_list(&wrapped);
        assert_eq!(cats.len(), 1);
        assert_eq!(cats[0].slug, "engineering");

        let bare = json!([{"_id": "c2", "name": "Design"}]);
        let cats = category_list(&bare);
        assert_eq!(cats.len(), 1);
        assert_eq!(cats[0].slug, "");

        assert!(category_list(&json!(null)).is_empty());
    }
}
