use anyhow::{Result, anyhow};
use serde_json::{Value, json};

use crate::client::ApiClient;
use crate::mock::RecommendedJob;
use crate::parse;

/// Thin wrappers over the backend AI endpoints. Every endpoint
/// returns one unstructured text blob inside a loosely-shaped JSON
/// envelope; the parsing that turns blobs into display data lives in
/// `parse` and `mock`.

pub fn analyze_resume(api: &ApiClient, resume_text: &str) -> Result<parse::Analysis> {
    let value = api
        .post("/ai/analyze-resume", &json!({ "resumeText": resume_text }))
        .inspect_err(|e| tracing::error!("Resume analysis failed: {e}"))?;
    let blob = text_blob(&value, &["analysis", "result", "text"])?;
    Ok(parse::parse_analysis(&blob))
}

pub fn recommend_jobs(
    api: &ApiClient,
    skills: &[String],
    interests: Option<&str>,
) -> Result<Vec<RecommendedJob>> {
    let mut body = json!({ "skills": skills });
    if let Some(interests) = interests {
        body["interests"] = json!(interests);
    }
    let value = api
        .post("/ai/recommend-jobs", &body)
        .inspect_err(|e| tracing::error!("Job recommendation failed: {e}"))?;

    let blob = recommendation_text(&value)?;
    let sections = parse::split_recommendations(&blob);
    let mut rng = rand::thread_rng();
    Ok(crate::mock::synthesize_jobs(&sections, skills, &mut rng))
}

pub fn generate_cover_letter(
    api: &ApiClient,
    job_title: &str,
    company: &str,
    highlights: &str,
) -> Result<String> {
    let value = api
        .post(
            "/ai/generate-cover-letter",
            &json!({
                "jobTitle": job_title,
                "company": company,
                "highlights": highlights,
            }),
        )
        .inspect_err(|e| tracing::error!("Cover letter generation failed: {e}"))?;
    text_blob(&value, &["coverLetter", "result", "text"])
}

pub fn smart_job_post(api: &ApiClient, prompt: &str) -> Result<String> {
    let value = api
        .post("/ai/smart-job-post", &json!({ "prompt": prompt }))
        .inspect_err(|e| tracing::error!("Smart job post failed: {e}"))?;
    text_blob(&value, &["post", "result", "text"])
}

pub fn chat(api: &ApiClient, message: &str) -> Result<String> {
    let value = api
        .post("/ai/chat", &json!({ "message": message }))
        .inspect_err(|e| tracing::error!("Chat request failed: {e}"))?;
    text_blob(&value, &["reply", "response", "text"])
}

/// Find the text payload in a response envelope: a bare string, or
/// the first of the given keys holding a string.
fn text_blob(value: &Value, keys: &[&str]) -> Result<String> {
    if let Some(s) = value.as_str() {
        return Ok(s.to_string());
    }
    for key in keys {
        if let Some(s) = value.get(key).and_then(Value::as_str) {
            return Ok(s.to_string());
        }
    }
    Err(anyhow!("AI response was not in a recognized shape"))
}

/// Recommendations may arrive as a string or as an array of strings;
/// anything else is a shape mismatch reported to the caller.
fn recommendation_text(value: &Value) -> Result<String> {
    let body = value
        .get("recommendations")
        .or_else(|| value.get("result"))
        .unwrap_or(value);

    if let Some(s) = body.as_str() {
        return Ok(s.to_string());
    }
    if let Some(items) = body.as_array() {
        let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
        if parts.len() == items.len() {
            return Ok(parts.join("\n\n"));
        }
    }
    tracing::error!("Recommendation response was neither string nor string array");
    Err(anyhow!(
        "Recommendations arrived in an unexpected shape; try again"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_blob_bare_string() {
        let value = json!("Dear hiring manager,");
        assert_eq!(text_blob(&value, &["text"]).unwrap(), "Dear hiring manager,");
    }

    #[test]
    fn test_text_blob_first_matching_key() {
        let value = json!({"result": "analysis body", "other": 1});
        assert_eq!(
            text_blob(&value, &["analysis", "result"]).unwrap(),
            "analysis body"
        );
    }

    #[test]
    fn test_text_blob_shape_mismatch() {
        let value = json!({"analysis": {"nested": true}});
        assert!(text_blob(&value, &["analysis"]).is_err());
    }

    #[test]
    fn test_recommendation_text_string_or_array() {
        let s = json!({"recommendations": "Role: desc"});
        assert_eq!(recommendation_text(&s).unwrap(), "Role: desc");

        let arr = json!({"recommendations": ["Role A: a", "Role B: b"]});
        assert_eq!(recommendation_text(&arr).unwrap(), "Role A: a\n\nRole B: b");
    }

    #[test]
    fn test_recommendation_text_rejects_other_shapes() {
        assert!(recommendation_text(&json!({"recommendations": 42})).is_err());
        assert!(recommendation_text(&json!({"recommendations": [1, 2]})).is_err());
    }
}
