#[cfg(test)]
mod openapi_tests {
    use crate::schemas::ApiDoc;
    use utoipa::OpenApi;

    #[test]
    fn test_openapi_document_builds() {
        let doc = ApiDoc::openapi();
        let json = doc.to_json().expect("OpenAPI document should serialize");

        // Every surface the router exposes is documented
        assert!(json.contains("/health"));
        assert!(json.contains("/api/v1/projects/{project_id}/budget-lines"));
        assert!(json.contains("/api/v1/projects/{project_id}/budget/breakdown"));
        assert!(json.contains("/api/v1/projects/{project_id}/budget/daily-series"));
    }

    #[test]
    fn test_openapi_document_carries_schemas() {
        let doc = ApiDoc::openapi();
        let json = doc.to_json().expect("OpenAPI document should serialize");

        assert!(json.contains("BudgetSeriesPoint"));
        assert!(json.contains("BreakdownEntry"));
        assert!(json.contains("ValidationErrorResponse"));
    }
}
