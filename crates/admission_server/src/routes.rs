//! Request handlers.

use crate::form::read_submission;
use crate::AppState;
use admission_core::{
    AdmissionError, AdmissionRecord, AdmissionService, Fee, RatingError, RatingService,
    RatingSubmission, RATING_SAVED_MESSAGE,
};
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use log::{debug, error};
use serde::Serialize;
use serde_json::Value;

pub const WELCOME_HTML: &str = "<h1>Welcome to the Admission Server</h1>\
<p>Use the API to submit or manage admissions.</p>";
pub const SUBMIT_SUCCESS_MESSAGE: &str = "Admission submitted successfully!";

#[derive(Debug, Serialize)]
struct SubmitResponse {
    message: &'static str,
    fees: Fee,
}

#[derive(Debug, Serialize)]
struct AdminResponse {
    students: Vec<AdmissionRecord>,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub async fn home() -> Html<&'static str> {
    Html(WELCOME_HTML)
}

pub async fn submit(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            return failure(AdmissionError::MalformedForm(rejection.body_text()));
        }
    };
    let form = match read_submission(multipart).await {
        Ok(form) => form,
        Err(err) => return failure(err),
    };

    let config = state.config;
    let outcome =
        tokio::task::spawn_blocking(move || AdmissionService::from_config(&config).submit(form))
            .await;

    match outcome {
        Ok(Ok(receipt)) => (
            StatusCode::OK,
            Json(SubmitResponse {
                message: SUBMIT_SUCCESS_MESSAGE,
                fees: receipt.fees,
            }),
        )
            .into_response(),
        Ok(Err(err)) => failure(err),
        Err(join_err) => internal_failure(join_err.to_string()),
    }
}

pub async fn admin(State(state): State<AppState>) -> Response {
    let config = state.config;
    let outcome =
        tokio::task::spawn_blocking(move || AdmissionService::from_config(&config).list()).await;

    match outcome {
        Ok(Ok(students)) => (StatusCode::OK, Json(AdminResponse { students })).into_response(),
        Ok(Err(err)) => failure(err),
        Err(join_err) => internal_failure(join_err.to_string()),
    }
}

pub async fn submit_rating(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    // Bodies that are not JSON read as empty and fail rating validation.
    let submission = match body {
        Ok(Json(value)) => RatingSubmission::from_json(value),
        Err(rejection) => {
            debug!(
                "event=rating_submit module=server status=rejected reason=unreadable_body error={}",
                rejection.body_text()
            );
            RatingSubmission::default()
        }
    };

    let ratings = state.ratings;
    let outcome =
        tokio::task::spawn_blocking(move || RatingService::new(&ratings).submit(submission)).await;

    match outcome {
        Ok(Ok(_entry)) => message_body(StatusCode::OK, RATING_SAVED_MESSAGE.to_string()),
        Ok(Err(err)) => rating_failure(err),
        Err(join_err) => internal_failure(join_err.to_string()),
    }
}

pub async fn list_ratings(State(state): State<AppState>) -> Response {
    let ratings = state.ratings;
    let outcome = tokio::task::spawn_blocking(move || RatingService::new(&ratings).list()).await;

    match outcome {
        Ok(Ok(entries)) => (StatusCode::OK, Json(entries)).into_response(),
        Ok(Err(err)) => rating_failure(err),
        Err(join_err) => internal_failure(join_err.to_string()),
    }
}

fn rating_failure(err: RatingError) -> Response {
    match err {
        RatingError::InvalidRating => message_body(StatusCode::BAD_REQUEST, err.to_string()),
        RatingError::Storage(_) => {
            error!(
                "event=http_response module=server status=error error_code={}",
                err.code()
            );
            error_body(err.to_string())
        }
    }
}

fn message_body(status: StatusCode, message: String) -> Response {
    (status, Json(MessageResponse { message })).into_response()
}

// Clients get the same status for bad input and broken storage; the
// distinction only reaches the logs.
fn failure(err: AdmissionError) -> Response {
    error!(
        "event=http_response module=server status=error error_code={} client_error={}",
        err.code(),
        err.is_client_error()
    );
    error_body(err.to_string())
}

fn internal_failure(message: String) -> Response {
    error!(
        "event=http_response module=server status=error error_code=task_failed error={}",
        message
    );
    error_body(message)
}

fn error_body(message: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse { error: message }),
    )
        .into_response()
}
