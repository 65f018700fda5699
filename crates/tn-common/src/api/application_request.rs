use serde::Deserialize;

/// Body for `POST /api/jobs/:job_id/applications`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplyRequest {
    #[serde(default)]
    pub resume_url: Option<String>,
    #[serde(default)]
    pub cover_letter: Option<String>,
    /// Free-form screening question answers, stored verbatim.
    #[serde(default)]
    pub answers: Option<serde_json::Value>,
}

/// Body for `POST /api/applications/:id/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_request_fields_all_default() {
        let request: ApplyRequest = serde_json::from_str("{}").unwrap();
        assert!(request.resume_url.is_none());
        assert!(request.cover_letter.is_none());
        assert!(request.answers.is_none());
    }

    #[test]
    fn status_update_requires_a_status() {
        let parsed: Result<StatusUpdateRequest, _> = serde_json::from_str("{}");
        assert!(parsed.is_err());

        let request: StatusUpdateRequest =
            serde_json::from_str(r#"{"status":"shortlisted","notes":"strong portfolio"}"#).unwrap();
        assert_eq!(request.status, "shortlisted");
        assert_eq!(request.notes.as_deref(), Some("strong portfolio"));
    }
}
