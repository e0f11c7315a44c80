use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::catalog::{ObjectId, Orbit, OrbitId, TrackedObject};
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct OrbitFilter {
    /// Case-insensitive substring of the orbit name
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ObjectFilter {
    /// Case-insensitive substring of the operator
    #[serde(default)]
    pub operator: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrbitList {
    pub orbits: Vec<Orbit>,
    pub total: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ObjectList {
    pub satellites: Vec<TrackedObject>,
    pub total: usize,
}

fn contains_ignore_case(haystack: &str, needle: Option<&str>) -> bool {
    needle.is_none_or(|n| haystack.to_lowercase().contains(&n.to_lowercase()))
}

#[utoipa::path(
    get,
    path = "/api/orbits",
    tag = "catalog",
    params(OrbitFilter),
    responses((status = 200, description = "Orbits in the catalog", body = OrbitList))
)]
pub async fn list_orbits(
    State(state): State<AppState>,
    Query(filter): Query<OrbitFilter>,
) -> Json<OrbitList> {
    let orbits: Vec<_> = state
        .catalog
        .orbits()
        .into_iter()
        .filter(|o| contains_ignore_case(&o.name, filter.name.as_deref()))
        .collect();
    Json(OrbitList {
        total: orbits.len(),
        orbits,
    })
}

#[utoipa::path(
    get,
    path = "/api/orbits/{id}",
    tag = "catalog",
    params(("id" = u32, Path, description = "Orbit ID")),
    responses(
        (status = 200, description = "Orbit", body = Orbit),
        (status = 404, description = "Orbit not found", body = ErrorResponse)
    )
)]
pub async fn get_orbit(
    State(state): State<AppState>,
    Path(id): Path<OrbitId>,
) -> ApiResult<Json<Orbit>> {
    Ok(Json(state.catalog.orbit(id)?))
}

#[utoipa::path(
    get,
    path = "/api/satellites",
    tag = "catalog",
    params(ObjectFilter),
    responses((status = 200, description = "Tracked objects in the catalog", body = ObjectList))
)]
pub async fn list_satellites(
    State(state): State<AppState>,
    Query(filter): Query<ObjectFilter>,
) -> Json<ObjectList> {
    let satellites: Vec<_> = state
        .catalog
        .objects()
        .into_iter()
        .filter(|o| contains_ignore_case(&o.operator, filter.operator.as_deref()))
        .collect();
    Json(ObjectList {
        total: satellites.len(),
        satellites,
    })
}

#[utoipa::path(
    get,
    path = "/api/satellites/{id}",
    tag = "catalog",
    params(("id" = u32, Path, description = "Object ID")),
    responses(
        (status = 200, description = "Tracked object", body = TrackedObject),
        (status = 404, description = "Object not found", body = ErrorResponse)
    )
)]
pub async fn get_satellite(
    State(state): State<AppState>,
    Path(id): Path<ObjectId>,
) -> ApiResult<Json<TrackedObject>> {
    Ok(Json(state.catalog.object(id)?))
}
