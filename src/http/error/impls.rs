use actix_web::{body::BoxBody, http::StatusCode, HttpResponse};
use serde_json::json;

use super::Error;
use crate::registry;

impl actix_web::ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Registry(registry::Error::Validation(..)) => StatusCode::BAD_REQUEST,
            Self::Registry(registry::Error::NotFound(..)) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        HttpResponse::build(self.status_code()).json(json!({
            "message": self.to_string(),
        }))
    }
}
