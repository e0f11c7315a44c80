use utoipa::OpenApi;

use super::api::catalog::{ObjectList, OrbitList};
use super::api::error::ErrorResponse;
use super::api::position::PositionResponse;
use super::api::proximity::{ProximityEntry, ProximityListResponse};
use super::api::status::{ServiceInfo, StatusResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::status::root,
        super::api::status::status,
        super::api::catalog::list_orbits,
        super::api::catalog::get_orbit,
        super::api::catalog::list_satellites,
        super::api::catalog::get_satellite,
        super::api::position::get_position,
        super::api::proximity::list_proximities,
    ),
    components(
        schemas(
            ServiceInfo,
            StatusResponse,
            OrbitList,
            ObjectList,
            PositionResponse,
            ProximityEntry,
            ProximityListResponse,
            ErrorResponse,
            crate::catalog::Orbit,
            crate::catalog::TrackedObject,
            crate::catalog::OperationalState,
        )
    ),
    info(
        title = "orbit-watch API",
        description = "Circular-orbit propagation and proximity detection for a satellite catalog",
        version = "0.1.0"
    ),
    tags(
        (name = "status", description = "Service health"),
        (name = "catalog", description = "Orbits and tracked objects"),
        (name = "position", description = "Object positions"),
        (name = "proximity", description = "Close approaches between objects")
    )
)]
pub struct ApiDoc;
