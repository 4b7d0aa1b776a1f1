//! Tests for the typed error handling system
//!
//! These tests verify that:
//! - Errors return correct HTTP status codes
//! - Error responses are properly formatted
//! - Error conversions work correctly

use axum::body::to_bytes;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use estyle::prelude::*;

// =============================================================================
// HTTP Status Code Tests
// =============================================================================

mod status_code_tests {
    use super::*;

    #[test]
    fn test_login_failures_return_401() {
        let missing = EstyleError::Auth(AuthError::IdentifierNotFound {
            identifier: "ghost".to_string(),
        });
        let mismatch = EstyleError::Auth(AuthError::SecretMismatch {
            username: "alice".to_string(),
        });
        assert_eq!(missing.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(mismatch.status_code(), StatusCode::UNAUTHORIZED);
        assert_ne!(missing.error_code(), mismatch.error_code());
    }

    #[test]
    fn test_conflicts_return_409() {
        let taken = EstyleError::Auth(AuthError::AlreadyExists {
            field: "email",
            value: "a@example.com".to_string(),
        });
        let rented = EstyleError::Catalog(CatalogError::ItemNotAvailable {
            id: 1,
            status: "rented".to_string(),
        });
        assert_eq!(taken.status_code(), StatusCode::CONFLICT);
        assert_eq!(rented.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_bad_input_returns_400() {
        let errors = [
            EstyleError::Auth(AuthError::InvalidInput {
                field: "username",
                message: "must not be empty".to_string(),
            }),
            EstyleError::Catalog(CatalogError::InvalidItem {
                message: "price is negative".to_string(),
            }),
            EstyleError::Donation(DonationError::Invalid {
                message: "quantity must be at least 1".to_string(),
            }),
            EstyleError::Request(RequestError::InvalidQuery {
                message: "unknown column 'size'".to_string(),
            }),
            EstyleError::Request(RequestError::InvalidPath {
                message: "cannot parse 'abc'".to_string(),
            }),
        ];
        for err in errors {
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST, "{err}");
        }
    }

    #[test]
    fn test_storage_failures() {
        let unavailable = EstyleError::Store(StoreError::DataUnavailable {
            table: "catalog".to_string(),
            message: "missing".to_string(),
        });
        let io = EstyleError::Store(StoreError::Io {
            table: "users".to_string(),
            message: "disk full".to_string(),
        });
        assert_eq!(unavailable.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(io.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(io.error_code(), "STORAGE_IO");

        let exhausted = EstyleError::Store(StoreError::KeysExhausted {
            table: "catalog".to_string(),
            last: u64::MAX,
        });
        assert_eq!(exhausted.status_code(), StatusCode::INSUFFICIENT_STORAGE);
        assert_eq!(exhausted.error_code(), "KEYS_EXHAUSTED");
    }
}

// =============================================================================
// Response Format Tests
// =============================================================================

mod response_tests {
    use super::*;

    #[tokio::test]
    async fn test_into_response_body() {
        let err = EstyleError::Catalog(CatalogError::ItemNotAvailable {
            id: 7,
            status: "rented".to_string(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "ITEM_NOT_AVAILABLE");
        assert_eq!(body["details"], serde_json::json!({ "id": 7, "status": "rented" }));
        assert!(body["message"].as_str().unwrap().contains('7'));
    }

    #[test]
    fn test_details_omitted_when_absent() {
        let err = EstyleError::Request(RequestError::Unauthorized {
            message: "missing Authorization header".to_string(),
        });
        let json = serde_json::to_value(err.to_response()).unwrap();
        assert_eq!(json["code"], "UNAUTHORIZED");
        assert!(json.get("details").is_none());
    }
}

// =============================================================================
// Conversion Tests
// =============================================================================

mod conversion_tests {
    use super::*;

    fn rent_missing() -> EstyleResult<()> {
        Err(CatalogError::ItemNotFound { id: 42 })?
    }

    #[test]
    fn test_question_mark_converts() {
        let err = rent_missing().unwrap_err();
        assert!(matches!(
            err,
            EstyleError::Catalog(CatalogError::ItemNotFound { id: 42 })
        ));
    }

    #[test]
    fn test_config_error_from_yaml() {
        let yaml_err = serde_yaml::from_str::<AppConfig>("server: [1, 2]").unwrap_err();
        let err: ConfigError = yaml_err.into();
        assert!(matches!(err, ConfigError::ParseError { file: None, .. }));
    }
}
