use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::catalog::ObjectId;
use crate::geometry::GeodeticCoordinates;
use crate::time::{format_utc, Iso8601Validator, TimestampValidator};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Deserialize, IntoParams)]
pub struct PositionQuery {
    /// ISO 8601 instant, e.g. `2024-01-01T00:00:00Z`
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct PositionResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl From<GeodeticCoordinates> for PositionResponse {
    fn from(c: GeodeticCoordinates) -> Self {
        Self {
            latitude: c.latitude_deg,
            longitude: c.longitude_deg,
            altitude: c.altitude_km,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/satellites/{id}/position",
    tag = "position",
    params(
        ("id" = u32, Path, description = "Object ID"),
        PositionQuery
    ),
    responses(
        (status = 200, description = "Geodetic position at the instant", body = PositionResponse),
        (status = 400, description = "Malformed timestamp or object not yet introduced", body = ErrorResponse),
        (status = 404, description = "Object or its orbit not found", body = ErrorResponse),
        (status = 422, description = "Orbit cannot be propagated", body = ErrorResponse)
    )
)]
pub async fn get_position(
    State(state): State<AppState>,
    Path(id): Path<ObjectId>,
    Query(query): Query<PositionQuery>,
) -> ApiResult<Json<PositionResponse>> {
    let at = Iso8601Validator.validate_timestamp(&query.timestamp)?;

    match state.positions.lookup(&*state.catalog, id, at)? {
        Some(position) => Ok(Json(position.into())),
        None => Err(ApiError::NotYetIntroduced(format!(
            "object {id} has no position before its introduction (requested {})",
            format_utc(&at)
        ))),
    }
}
