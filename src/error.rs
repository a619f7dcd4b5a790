use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => {
                log::warn!("Not found error: {}", msg);
                (StatusCode::NOT_FOUND, msg.clone())
            }
            AppError::BadRequest(msg) => {
                log::warn!("Bad request error: {}", msg);
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            AppError::InternalServerError(msg) => {
                log::error!("Internal server error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            AppError::SerializationError(err) => {
                log::warn!("Serialization error: {}", err);
                (StatusCode::BAD_REQUEST, err.to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<serde_dynamo::Error> for AppError {
    fn from(err: serde_dynamo::Error) -> Self {
        AppError::InternalServerError(format!("DynamoDB serialization error: {}", err))
    }
}

// Helper function to map general DynamoDB errors
pub fn map_dynamo_error<E>(operation: &str, err: SdkError<E>) -> AppError {
    AppError::InternalServerError(format!("DynamoDB {} error: {}", operation, err))
}

// Helper function to map GetItem errors
pub fn map_get_dynamo_error(err: SdkError<GetItemError>, id: &str) -> AppError {
    match &err {
        SdkError::ServiceError(service_err) => {
            if service_err.err().is_resource_not_found_exception() {
                AppError::NotFound(format!("Resource not found with ID: {}", id))
            } else {
                AppError::InternalServerError(format!("DynamoDB get_item error: {}", err))
            }
        }
        _ => AppError::InternalServerError(format!("DynamoDB get_item error: {}", err)),
    }
}

// Helper function to map DeleteItem errors
pub fn map_delete_dynamo_error(err: SdkError<DeleteItemError>) -> AppError {
    AppError::InternalServerError(format!("DynamoDB delete_item error: {}", err))
}

// Helper function to map Query errors
pub fn map_query_dynamo_error(err: SdkError<QueryError>) -> AppError {
    AppError::InternalServerError(format!("DynamoDB query error: {}", err))
}

// Helper function to map Scan errors
pub fn map_scan_dynamo_error(err: SdkError<ScanError>) -> AppError {
    AppError::InternalServerError(format!("DynamoDB scan error: {}", err))
}
