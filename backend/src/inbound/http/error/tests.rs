//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use rstest::rstest;
use serde_json::{Value, json};

async fn body_of(error: &DomainError) -> Value {
    let response = ResponseError::error_response(error);
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    serde_json::from_slice(&bytes).expect("error JSON")
}

#[rstest]
#[case(DomainError::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(DomainError::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(DomainError::conflict("taken"), StatusCode::CONFLICT)]
#[case(DomainError::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(DomainError::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: DomainError, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
    assert_eq!(ResponseError::error_response(&error).status(), status);
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted() {
    let error = DomainError::internal("subscription store error: relation users missing")
        .with_details(json!({ "sql": "SELECT 1" }));

    let body = body_of(&error).await;

    assert_eq!(
        body,
        json!({ "code": "internal_error", "message": "Internal server error" })
    );
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_message_and_details() {
    let error = DomainError::conflict("username already taken: bob")
        .with_details(json!({ "field": "userId", "code": "username_taken" }));

    let body = body_of(&error).await;

    assert_eq!(body["code"], "conflict");
    assert_eq!(body["message"], "username already taken: bob");
    assert_eq!(body["details"]["code"], "username_taken");
}
