use axum::extract::{rejection::JsonRejection, FromRequest};

use crate::errors::AppError;

/// `Json` extractor whose rejections become `AppError::Validation`, so a
/// malformed body gets the same 400 error shape as any other bad input.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}
