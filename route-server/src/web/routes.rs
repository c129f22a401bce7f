//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tracing::{error, warn};

use crate::domain::{Leg, LegId, LocationId};
use crate::planner::{Page, PageRequest, Planner, SearchConfig, SearchError, SearchRequest};
use crate::store::{Store, StoreError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/routes", get(find_routes))
        .route(
            "/api/v1/locations",
            get(list_locations).post(create_location),
        )
        .route("/api/v1/locations/search", get(search_locations))
        .route(
            "/api/v1/locations/:id",
            get(get_location).put(update_location).delete(delete_location),
        )
        .route(
            "/api/v1/transportations",
            get(list_transportations).post(create_transportation),
        )
        .route(
            "/api/v1/transportations/:id",
            get(get_transportation)
                .put(update_transportation)
                .delete(delete_transportation),
        )
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

fn page_request(
    config: &SearchConfig,
    page: Option<usize>,
    size: Option<usize>,
) -> Result<PageRequest, AppError> {
    Ok(PageRequest::new(page.unwrap_or(0), config.page_size(size))?)
}

/// Find every route between two locations.
async fn find_routes(
    State(state): State<AppState>,
    query: Result<Query<RouteSearchQuery>, QueryRejection>,
) -> Result<Json<Page<RouteDto>>, AppError> {
    let Query(query) = query?;
    let (from, to) = query
        .endpoints()
        .map_err(|messages| AppError::BadRequest { messages })?;
    let page = page_request(&state.config, query.page, query.size)?;

    let planner = Planner::new(&state.store, state.transportations.as_ref(), &state.config);
    let result = planner
        .search(&SearchRequest::new(from, to, page))
        .await?;

    let locations = state
        .store
        .locations_by_id(result.page.content.iter().flat_map(|r| r.locations()))
        .await;

    let page = result.page.try_map(|route| {
        RouteDto::from_route(&route, |id| locations.get(&id)).ok_or_else(|| AppError::Internal {
            message: format!("route {} refers to a missing location", route.describe()),
        })
    })?;

    Ok(Json(page))
}

async fn list_locations(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Page<LocationDto>>, AppError> {
    let Query(query) = query?;
    let page = page_request(&state.config, query.page, query.size)?;

    let locations = state.store.list_locations(&page).await;
    Ok(Json(locations.map(|l| LocationDto::from(&l))))
}

/// Search locations by name, ignoring case.
async fn search_locations(
    State(state): State<AppState>,
    query: Result<Query<LocationSearchQuery>, QueryRejection>,
) -> Result<Json<Page<LocationDto>>, AppError> {
    let Query(query) = query?;
    let page = page_request(&state.config, query.page, query.size)?;

    let locations = state.store.search_locations(&query.query, &page).await;
    Ok(Json(locations.map(|l| LocationDto::from(&l))))
}

async fn get_location(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<LocationDto>, AppError> {
    let Path(id) = id?;
    let location = state.store.get_location(LocationId(id)).await?;
    Ok(Json(LocationDto::from(&location)))
}

async fn create_location(
    State(state): State<AppState>,
    body: Result<Json<LocationRequest>, JsonRejection>,
) -> Result<Json<LocationDto>, AppError> {
    let Json(body) = body?;
    let location = body
        .validate()
        .map_err(|messages| AppError::BadRequest { messages })?;

    let created = state.store.create_location(location).await?;
    Ok(Json(LocationDto::from(&created)))
}

async fn update_location(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
    body: Result<Json<LocationRequest>, JsonRejection>,
) -> Result<Json<LocationDto>, AppError> {
    let Path(id) = id?;
    let Json(body) = body?;
    let location = body
        .validate()
        .map_err(|messages| AppError::BadRequest { messages })?;

    let updated = state
        .store
        .update_location(LocationId(id), location)
        .await?;
    Ok(Json(LocationDto::from(&updated)))
}

async fn delete_location(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    state.store.delete_location(LocationId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Expand a leg's endpoints into full locations.
async fn transportation_dto(store: &Store, leg: &Leg) -> Result<TransportationDto, AppError> {
    let from = store.get_location(leg.origin).await?;
    let to = store.get_location(leg.destination).await?;
    Ok(TransportationDto::new(leg, &from, &to))
}

async fn list_transportations(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Page<TransportationDto>>, AppError> {
    let Query(query) = query?;
    let page = page_request(&state.config, query.page, query.size)?;

    let legs = state.store.list_legs(&page).await;
    let locations = state
        .store
        .locations_by_id(legs.content.iter().flat_map(|l| [l.origin, l.destination]))
        .await;

    let page = legs.try_map(|leg| {
        match (locations.get(&leg.origin), locations.get(&leg.destination)) {
            (Some(from), Some(to)) => Ok(TransportationDto::new(&leg, from, to)),
            _ => Err(AppError::Internal {
                message: format!("transportation {} refers to a missing location", leg.id),
            }),
        }
    })?;

    Ok(Json(page))
}

async fn get_transportation(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<TransportationDto>, AppError> {
    let Path(id) = id?;
    let leg = state.store.get_leg(LegId(id)).await?;
    Ok(Json(transportation_dto(&state.store, &leg).await?))
}

async fn create_transportation(
    State(state): State<AppState>,
    body: Result<Json<TransportationRequest>, JsonRejection>,
) -> Result<Json<TransportationDto>, AppError> {
    let Json(body) = body?;
    let leg = body
        .validate()
        .map_err(|messages| AppError::BadRequest { messages })?;

    let created = state.store.create_leg(leg).await?;
    state.transportations.invalidate();

    Ok(Json(transportation_dto(&state.store, &created).await?))
}

async fn update_transportation(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
    body: Result<Json<TransportationRequest>, JsonRejection>,
) -> Result<Json<TransportationDto>, AppError> {
    let Path(id) = id?;
    let Json(body) = body?;
    let leg = body
        .validate()
        .map_err(|messages| AppError::BadRequest { messages })?;

    let updated = state.store.update_leg(LegId(id), leg).await?;
    state.transportations.invalidate();

    Ok(Json(transportation_dto(&state.store, &updated).await?))
}

async fn delete_transportation(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    state.store.delete_leg(LegId(id)).await?;
    state.transportations.invalidate();
    Ok(StatusCode::NO_CONTENT)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { messages: Vec<String> },
    /// A write would break uniqueness or a reference
    Integrity { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::LocationNotFound(_) => AppError::NotFound {
                message: e.to_string(),
            },
            SearchError::InvalidRequest(msg) => AppError::BadRequest {
                messages: vec![msg],
            },
            SearchError::Source { .. } => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { .. } | StoreError::UnknownLocation(_) => AppError::NotFound {
                message: e.to_string(),
            },
            StoreError::Invalid(_) => AppError::BadRequest {
                messages: vec![e.to_string()],
            },
            StoreError::DuplicateName(_) | StoreError::LocationInUse { .. } => {
                AppError::Integrity {
                    message: e.to_string(),
                }
            }
            StoreError::Seed { .. } => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        AppError::BadRequest {
            messages: vec![e.body_text()],
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(e: PathRejection) -> Self {
        AppError::BadRequest {
            messages: vec![e.body_text()],
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::BadRequest {
            messages: vec![e.body_text()],
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, messages) = match self {
            AppError::BadRequest { messages } => (StatusCode::BAD_REQUEST, "Bad Request", messages),
            AppError::Integrity { message } => (
                StatusCode::BAD_REQUEST,
                "Data Integrity Violation",
                vec![message],
            ),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, "Not Found", vec![message]),
            AppError::Internal { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
                vec![message],
            ),
        };

        if status.is_server_error() {
            error!(%status, ?messages, "request failed");
        } else {
            warn!(%status, ?messages, "request rejected");
        }

        let body = Json(ErrorResponse::new(status.as_u16(), error, messages));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::cache::CacheConfig;
    use crate::domain::{LegKind, NewLeg, NewLocation};

    /// Taksim -O-> Istanbul Airport -F-> Heathrow -O-> Wembley
    async fn seeded_state() -> AppState {
        let store = Store::new();
        let mut ids = Vec::new();
        for (name, lat, lon) in [
            ("Taksim Square", 41.0369, 28.985),
            ("Istanbul Airport", 41.2753, 28.7519),
            ("Heathrow Airport", 51.47, -0.4543),
            ("Wembley Stadium", 51.556, -0.2796),
        ] {
            let location = store
                .create_location(NewLocation::new(name, lat, lon))
                .await
                .unwrap();
            ids.push(location.id);
        }

        for (name, kind, from, to, price) in [
            ("Havaist", LegKind::Other, 0, 1, 8.5),
            ("TK1986", LegKind::Flight, 1, 2, 320.0),
            ("Uber", LegKind::Other, 2, 3, 45.0),
        ] {
            store
                .create_leg(NewLeg {
                    name: name.to_string(),
                    kind,
                    origin: ids[from],
                    destination: ids[to],
                    price: Some(price),
                    duration_mins: Some(60.0),
                })
                .await
                .unwrap();
        }

        AppState::new(store, &CacheConfig::default(), SearchConfig::default())
    }

    async fn send(state: &AppState, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = create_router(state.clone())
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn get(state: &AppState, uri: &str) -> (StatusCode, Value) {
        send(state, Method::GET, uri, None).await
    }

    #[tokio::test]
    async fn health_is_ok() {
        let state = seeded_state().await;
        let response = create_router(state)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn finds_route_with_expanded_locations() {
        let state = seeded_state().await;
        let (status, body) = get(&state, "/api/v1/routes?fromLocationId=1&toLocationId=4").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalElements"], 1);
        let route = &body["content"][0];
        assert_eq!(route["totalPrice"], 373.5);
        assert_eq!(route["totalDuration"], 180.0);
        assert_eq!(route["transportations"][1]["type"], "FLIGHT");
        assert_eq!(
            route["transportations"][2]["toLocation"]["name"],
            "Wembley Stadium"
        );
    }

    #[tokio::test]
    async fn no_routes_is_empty_page() {
        let state = seeded_state().await;
        let (status, body) = get(&state, "/api/v1/routes?fromLocationId=4&toLocationId=1").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalElements"], 0);
        assert_eq!(body["content"], json!([]));
    }

    #[tokio::test]
    async fn unknown_route_endpoint_is_404() {
        let state = seeded_state().await;
        let (status, body) = get(&state, "/api/v1/routes?fromLocationId=99&toLocationId=1").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], 404);
        assert_eq!(body["error"], "Not Found");
        assert_eq!(body["messages"][0], "Location not found with id: 99");
    }

    #[tokio::test]
    async fn missing_route_parameter_is_400() {
        let state = seeded_state().await;
        let (status, body) = get(&state, "/api/v1/routes?fromLocationId=1").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["messages"][0], "To location id is required");
    }

    #[tokio::test]
    async fn malformed_route_parameter_is_400() {
        let state = seeded_state().await;
        let (status, body) = get(&state, "/api/v1/routes?fromLocationId=abc&toLocationId=1").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Bad Request");
    }

    #[tokio::test]
    async fn location_crud() {
        let state = seeded_state().await;

        let (status, created) = send(
            &state,
            Method::POST,
            "/api/v1/locations",
            Some(json!({ "name": "Sabiha Gokcen", "latitude": 40.9, "longitude": 29.3 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["id"], 5);

        let (status, updated) = send(
            &state,
            Method::PUT,
            "/api/v1/locations/5",
            Some(json!({ "name": "SAW", "latitude": 40.9, "longitude": 29.3 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["name"], "SAW");

        let (status, _) = send(&state, Method::DELETE, "/api/v1/locations/5", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = get(&state, "/api/v1/locations/5").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn invalid_location_body_lists_messages() {
        let state = seeded_state().await;
        let (status, body) = send(
            &state,
            Method::POST,
            "/api/v1/locations",
            Some(json!({ "latitude": 40.9 })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["messages"],
            json!(["Location name is required", "Longitude is required"])
        );
    }

    #[tokio::test]
    async fn duplicate_location_is_integrity_violation() {
        let state = seeded_state().await;
        let (status, body) = send(
            &state,
            Method::POST,
            "/api/v1/locations",
            Some(json!({ "name": "Taksim Square", "latitude": 41.0, "longitude": 29.0 })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Data Integrity Violation");
    }

    #[tokio::test]
    async fn location_in_use_cannot_be_deleted() {
        let state = seeded_state().await;
        let (status, body) = send(&state, Method::DELETE, "/api/v1/locations/2", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Data Integrity Violation");
    }

    #[tokio::test]
    async fn location_search_and_list() {
        let state = seeded_state().await;

        let (status, body) = get(&state, "/api/v1/locations/search?query=airport").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalElements"], 2);

        let (status, body) = get(&state, "/api/v1/locations?page=1&size=3").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["content"][0]["name"], "Wembley Stadium");
        assert_eq!(body["totalPages"], 2);
    }

    #[tokio::test]
    async fn transportation_writes_change_routes() {
        let state = seeded_state().await;
        let (_, before) = get(&state, "/api/v1/routes?fromLocationId=2&toLocationId=3").await;
        assert_eq!(before["totalElements"], 1);

        let (status, created) = send(
            &state,
            Method::POST,
            "/api/v1/transportations",
            Some(json!({
                "name": "BA677",
                "type": "FLIGHT",
                "fromLocationId": 2,
                "toLocationId": 3,
                "price": 280.0
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["fromLocation"]["name"], "Istanbul Airport");
        assert_eq!(created["durationInMinutes"], Value::Null);

        let (_, after) = get(&state, "/api/v1/routes?fromLocationId=2&toLocationId=3").await;
        assert_eq!(after["totalElements"], 2);

        let (status, _) = send(&state, Method::DELETE, "/api/v1/transportations/4", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, last) = get(&state, "/api/v1/routes?fromLocationId=2&toLocationId=3").await;
        assert_eq!(last["totalElements"], 1);
    }

    #[tokio::test]
    async fn transportation_with_unknown_location_is_404() {
        let state = seeded_state().await;
        let (status, body) = send(
            &state,
            Method::POST,
            "/api/v1/transportations",
            Some(json!({
                "name": "Ferry",
                "type": "OTHER",
                "fromLocationId": 1,
                "toLocationId": 42
            })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["messages"][0], "Location not found with id: 42");
    }

    #[tokio::test]
    async fn transportation_list_and_update() {
        let state = seeded_state().await;

        let (status, body) = get(&state, "/api/v1/transportations?size=2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalElements"], 3);
        assert_eq!(body["content"][1]["name"], "TK1986");

        let (status, body) = send(
            &state,
            Method::PUT,
            "/api/v1/transportations/1",
            Some(json!({
                "name": "Metro",
                "type": "other",
                "fromLocationId": 1,
                "toLocationId": 2,
                "price": 1.5,
                "durationInMinutes": 75.0
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Metro");

        let (_, route) = get(&state, "/api/v1/routes?fromLocationId=1&toLocationId=3").await;
        assert_eq!(route["content"][0]["totalPrice"], 321.5);
    }

    #[tokio::test]
    async fn non_numeric_id_is_400() {
        let state = seeded_state().await;
        let (status, _) = get(&state, "/api/v1/transportations/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
