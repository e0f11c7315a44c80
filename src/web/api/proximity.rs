use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::catalog::ObjectId;
use crate::proximity::{sort_events, LogSink, ProximityEvent};
use crate::time::{format_utc, Iso8601Validator, Precision, TimestampValidator};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::api::position::PositionResponse;
use crate::web::state::AppState;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ProximityQuery {
    pub start_date: String,
    pub end_date: String,
    /// Grid step such as `30s`, `1m`, `2h`
    #[serde(default = "default_precision")]
    pub precision: String,
}

fn default_precision() -> String {
    "1m".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProximityEntry {
    pub satellite1: ObjectId,
    pub satellite2: ObjectId,
    pub time: String,
    pub position: PositionResponse,
    pub distance: f64,
}

impl From<ProximityEvent> for ProximityEntry {
    fn from(event: ProximityEvent) -> Self {
        Self {
            satellite1: event.object_a,
            satellite2: event.object_b,
            time: format_utc(&event.at),
            position: event.location.into(),
            distance: event.distance_km,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProximityListResponse {
    pub proximities: Vec<ProximityEntry>,
}

#[utoipa::path(
    get,
    path = "/api/proximities",
    tag = "proximity",
    params(ProximityQuery),
    responses(
        (status = 200, description = "Proximity events ordered by time then ids", body = ProximityListResponse),
        (status = 400, description = "Invalid window, timestamp or precision", body = ErrorResponse),
        (status = 500, description = "Scan task failed", body = ErrorResponse)
    )
)]
pub async fn list_proximities(
    State(state): State<AppState>,
    Query(query): Query<ProximityQuery>,
) -> ApiResult<Json<ProximityListResponse>> {
    let validator = Iso8601Validator;
    let start = validator.validate_timestamp(&query.start_date)?;
    let end = validator.validate_timestamp(&query.end_date)?;
    if start >= end {
        return Err(ApiError::Validation(format!(
            "start_date {} must be before end_date {}",
            format_utc(&start),
            format_utc(&end)
        )));
    }
    let precision: Precision = query.precision.parse()?;

    let step = precision.step();
    let mut events = tokio::task::spawn_blocking(move || {
        state
            .detector
            .scan(&*state.catalog, start, end, step, &mut LogSink)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("proximity scan did not complete: {e}")))??;
    sort_events(&mut events);

    Ok(Json(ProximityListResponse {
        proximities: events.into_iter().map(Into::into).collect(),
    }))
}
