
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{
    extract::{FromRef, Path, Query, Request, State},
    http::{header::USER_AGENT, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json,
    Router,
};
use chrono::NaiveDate;

mod data;
mod helpers;
pub use data::{Canteen, Day, Fixtures, Meal, Menu};
pub use helpers::{distance_km, Paging};

/// default `near[dist]` in km
const DEFAULT_DISTANCE: f64 = 10.0;

type ApiError = (StatusCode, Json<String>);

#[derive(Clone, FromRef)]
struct AppState {
    fixtures: Arc<Fixtures>,
    paging: Paging,
}

/// requests seen by the mock, in arrival order
#[derive(Debug, Clone, Default)]
pub struct RequestLog(Arc<Mutex<Vec<RecordedRequest>>>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// path and query, query still percent-encoded
    pub uri: String,
    pub user_agent: Option<String>,
}

impl RequestLog {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    fn push(&self, request: RecordedRequest) {
        self.lock().push(request);
    }

    // a panicking test thread must not hide what was recorded
    fn lock(&self) -> MutexGuard<'_, Vec<RecordedRequest>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub fn make_router(fixtures: Fixtures, paging: Paging, log: RequestLog) -> Router {
    let state = AppState { fixtures: Arc::new(fixtures), paging };

    Router::new()
        .route("/api/v2/canteens", get(canteens))
        .route("/api/v2/canteens/:id", get(canteen))
        .route("/api/v2/canteens/:id/days", get(days))
        .route("/api/v2/canteens/:id/days/:date", get(day))
        .route("/api/v2/canteens/:id/days/:date/meals", get(meals))
        .route("/api/v2/canteens/:id/days/:date/meals/:meal_id", get(meal))
        .route("/api/v2/canteens/:id/meals", get(menus))
        .with_state(state)
    .layer(middleware::from_fn_with_state(log, record))
}

async fn record(State(log): State<RequestLog>, req: Request, next: Next) -> Response {
    log.push(RecordedRequest {
        uri: req.uri()
            .path_and_query()
            .map(ToString::to_string)
            .unwrap_or_default(),
        user_agent: req.headers()
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned),
    });
    tracing::debug!("{} {}", req.method(), req.uri());
    next.run(req).await
}

fn not_found(what: &str) -> ApiError {
    (StatusCode::NOT_FOUND, Json(format!("{what}_not_found")))
}

#[derive(Debug, Default, serde::Deserialize)]
struct CanteenQuery {
    page: Option<u32>,
    #[serde(rename = "near[lat]")]
    lat: Option<f64>,
    #[serde(rename = "near[lng]")]
    lng: Option<f64>,
    #[serde(rename = "near[dist]")]
    dist: Option<f64>,
    ids: Option<String>,
}

async fn canteens(
    Query(q): Query<CanteenQuery>,
    State(fixtures): State<Arc<Fixtures>>,
    State(paging): State<Paging>,
) -> Result<Response, ApiError> {
    let page_no = q.page.unwrap_or(1);
    if paging.failing_page == Some(page_no) {
        return Err((StatusCode::INTERNAL_SERVER_ERROR, Json(format!("page_failed"))));
    }

    let ids = q.ids.as_deref()
        .map(|ids| ids
            .split(',')
            .map(|v| v.trim().parse::<u64>())
        .collect::<Result<Vec<_>, _>>())
        .transpose()
    .map_err(|_| (StatusCode::BAD_REQUEST, Json(format!("invalid_ids"))))?;

    let near = match (q.lat, q.lng) {
        (Some(lat), Some(lng)) => Some(([lat, lng], q.dist.unwrap_or(DEFAULT_DISTANCE))),
        _ => None,
    };

    let selected: Vec<Canteen> = fixtures.canteens.iter()
        .filter(|c| ids.as_ref().map_or(true, |ids| ids.contains(&c.id)))
        .filter(|c| near.map_or(true, |(point, dist)| c.coordinates
            .is_some_and(|at| distance_km(point, at) <= dist)
        ))
        .cloned()
    .collect();

    let (headers, page) = paging.page(&selected, q.page);
    if paging.garbled_page == Some(page_no) {
        return Ok((headers, "<html>maintenance</html>").into_response());
    }
    Ok((headers, Json(page.to_vec())).into_response())
}

async fn canteen(
    Path(id): Path<u64>,
    State(fixtures): State<Arc<Fixtures>>,
) -> Result<Json<Canteen>, ApiError> {
    fixtures.canteen(id)
        .cloned()
        .map(Json)
    .ok_or_else(|| not_found("canteen"))
}

async fn days(
    Path(id): Path<u64>,
    State(fixtures): State<Arc<Fixtures>>,
) -> Result<Json<Vec<Day>>, ApiError> {
    fixtures.days(id)
        .map(|v| Json(v.to_vec()))
    .ok_or_else(|| not_found("canteen"))
}

async fn day(
    Path((id, date)): Path<(u64, NaiveDate)>,
    State(fixtures): State<Arc<Fixtures>>,
) -> Result<Json<Day>, ApiError> {
    fixtures.day(id, date)
        .cloned()
        .map(Json)
    .ok_or_else(|| not_found("day"))
}

async fn meals(
    Path((id, date)): Path<(u64, NaiveDate)>,
    State(fixtures): State<Arc<Fixtures>>,
) -> Result<Json<Vec<Meal>>, ApiError> {
    fixtures.meals(id, date)
        .map(|v| Json(v.to_vec()))
    .ok_or_else(|| not_found("day"))
}

async fn meal(
    Path((id, date, meal_id)): Path<(u64, NaiveDate, u64)>,
    State(fixtures): State<Arc<Fixtures>>,
) -> Result<Json<Meal>, ApiError> {
    fixtures.meals(id, date)
        .and_then(|v| v.iter().find(|m| m.id == meal_id))
        .cloned()
        .map(Json)
    .ok_or_else(|| not_found("meal"))
}

async fn menus(
    Path(id): Path<u64>,
    State(fixtures): State<Arc<Fixtures>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let menus = fixtures.menus(id).ok_or_else(|| not_found("canteen"))?;
    serde_json::to_value(menus)
        .map(Json)
    .map_err(|err| (StatusCode::INTERNAL_SERVER_ERROR, Json(err.to_string())))
}
