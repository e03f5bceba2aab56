//! Response bodies shared by several handlers.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::Employee;

/// Message-only response
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Planning entry deleted")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Message plus the number of rows a bulk operation touched
#[derive(Debug, Serialize, ToSchema)]
pub struct CountResponse {
    pub message: String,
    pub count: u64,
}

impl CountResponse {
    pub fn new(message: impl Into<String>, count: u64) -> Self {
        Self {
            message: message.into(),
            count,
        }
    }
}

/// Returned with 200 when an assignment targets an occupied position
/// and the caller has not asked for a swap. Nothing was written.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequiredResponse {
    pub message: String,
    pub existing_employee: Employee,
    pub requires_swap: bool,
}

impl SwapRequiredResponse {
    pub fn new(existing_employee: Employee) -> Self {
        Self {
            message: format!(
                "Position is held by {}. Resend with swap=true to exchange positions",
                existing_employee.name
            ),
            existing_employee,
            requires_swap: true,
        }
    }
}

/// 201 with the created resource as the body
pub struct Created<T: Serialize>(pub T);

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}
