//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::domain::{Fare, Route, RouteNum, Terminal, TerminalName, TravelTime};
use crate::planner::{PlanRequest, Planner, SearchError};
use crate::schedule::{self, ScheduleError};
use crate::store::StoreError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/terminals", post(create_terminal))
        .route("/terminals/:name", get(get_terminal))
        .route("/routes", post(create_route))
        .route("/routes/:num", get(get_route))
        .route("/routes/:num/departures", post(create_departure))
        .route("/districts", get(list_districts))
        .route("/itineraries/direct", get(find_routes))
        .route("/itineraries/plan", get(plan_itineraries))
        .route("/network", delete(clear_network))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Add a terminal.
async fn create_terminal(
    State(state): State<AppState>,
    Json(req): Json<CreateTerminalRequest>,
) -> Result<(StatusCode, Json<TerminalResult>), AppError> {
    let name = TerminalName::parse(&req.name).map_err(AppError::bad_request)?;
    let terminal = Terminal::new(name.clone(), &req.district).map_err(AppError::bad_request)?;

    let mut network = state.network.write().await;
    network.add_terminal(terminal)?;
    state.persist(&network);

    let summary = network
        .terminal_summary(&name)
        .ok_or_else(|| AppError::not_found(format!("terminal {name} not found")))?;
    Ok((StatusCode::CREATED, Json(TerminalResult::from_summary(&summary))))
}

/// Describe a terminal and the routes that use it.
async fn get_terminal(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<TerminalResult>, AppError> {
    let network = state.network.read().await;
    TerminalName::parse(&name)
        .ok()
        .and_then(|n| network.terminal_summary(&n))
        .map(|summary| Json(TerminalResult::from_summary(&summary)))
        .ok_or_else(|| AppError::not_found(format!("terminal '{name}' not found")))
}

/// Add a route.
async fn create_route(
    State(state): State<AppState>,
    Json(req): Json<CreateRouteRequest>,
) -> Result<(StatusCode, Json<RouteResult>), AppError> {
    let route = Route {
        num: RouteNum::new(req.route).map_err(AppError::bad_request)?,
        source: TerminalName::parse(&req.source).map_err(AppError::bad_request)?,
        destination: TerminalName::parse(&req.destination).map_err(AppError::bad_request)?,
        travel_time: TravelTime::new(req.travel_time).map_err(AppError::bad_request)?,
        fare: Fare::parse(&req.fare).map_err(AppError::bad_request)?,
    };
    let result = RouteResult::from_route(&route, Vec::new());

    let mut network = state.network.write().await;
    network.add_route(route)?;
    state.persist(&network);

    Ok((StatusCode::CREATED, Json(result)))
}

/// Describe a route and its leave times.
async fn get_route(
    State(state): State<AppState>,
    Path(num): Path<String>,
) -> Result<Json<RouteResult>, AppError> {
    let network = state.network.read().await;
    let route = RouteNum::parse(&num)
        .ok()
        .and_then(|n| network.route(n))
        .ok_or_else(|| AppError::not_found(format!("route '{num}' not found")))?;

    let departures = network.departures(route.num).map(|t| t.to_string());
    Ok(Json(RouteResult::from_route(route, departures)))
}

/// Register a departure on a route.
async fn create_departure(
    State(state): State<AppState>,
    Path(num): Path<String>,
    Json(req): Json<CreateDepartureRequest>,
) -> Result<(StatusCode, Json<DepartureResult>), AppError> {
    let mut network = state.network.write().await;
    let departure = schedule::register_departure(&mut network, &num, &req.time, &state.schedule)?;
    state.persist(&network);

    Ok((
        StatusCode::CREATED,
        Json(DepartureResult {
            route: departure.route.get(),
            leaves: departure.leaves.to_string(),
        }),
    ))
}

/// Route counts per district.
async fn list_districts(State(state): State<AppState>) -> Json<DistrictsResponse> {
    let network = state.network.read().await;
    let districts = network
        .district_summaries()
        .iter()
        .map(DistrictResult::from_summary)
        .collect();
    Json(DistrictsResponse { districts })
}

/// Direct and one-transfer route combinations.
async fn find_routes(
    State(state): State<AppState>,
    Query(query): Query<FindRoutesQuery>,
) -> Result<Json<FindRoutesResponse>, AppError> {
    let source = TerminalName::parse(&query.source).map_err(AppError::bad_request)?;
    let destination = TerminalName::parse(&query.destination).map_err(AppError::bad_request)?;

    let network = state.network.read().await;
    let planner = Planner::new(&*network, &state.planner);
    let options = planner.find_routes(&source, &destination)?;

    Ok(Json(FindRoutesResponse {
        options: options.iter().map(RouteOptionResult::from_option).collect(),
    }))
}

/// Itineraries whose first leg leaves within the window after `time`.
async fn plan_itineraries(
    State(state): State<AppState>,
    Query(query): Query<PlanQuery>,
) -> Result<Json<PlanResponse>, AppError> {
    let request = PlanRequest::parse(&query.source, &query.destination, &query.time)?;

    let network = state.network.read().await;
    let planner = Planner::new(&*network, &state.planner);
    let result = planner.plan(&request)?;

    Ok(Json(PlanResponse {
        itineraries: result
            .itineraries
            .iter()
            .map(ItineraryResult::from_itinerary)
            .collect(),
        legs_explored: result.legs_explored,
    }))
}

/// Remove every departure, route and terminal.
async fn clear_network(State(state): State<AppState>) -> StatusCode {
    let mut network = state.network.write().await;
    network.clear();
    state.persist(&network);
    StatusCode::NO_CONTENT
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Conflict { message: String },
    Internal { message: String },
}

impl AppError {
    fn bad_request(e: impl std::fmt::Display) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }

    fn not_found(message: String) -> Self {
        AppError::NotFound { message }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateTerminal(_) | StoreError::DuplicateRoute(_) => {
                AppError::Conflict {
                    message: e.to_string(),
                }
            }
            StoreError::UnknownTerminal(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            StoreError::Departure(e) => e.into(),
            StoreError::Io(_) | StoreError::Json(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<ScheduleError> for AppError {
    fn from(e: ScheduleError) -> Self {
        let message = e.to_string();
        match e {
            ScheduleError::InvalidRoute(_) | ScheduleError::InvalidTime(_) => {
                AppError::BadRequest { message }
            }
            ScheduleError::UnknownRoute(_) => AppError::NotFound { message },
            ScheduleError::Conflict(_) => AppError::Conflict { message },
        }
    }
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::InvalidStartTime(_) | SearchError::InvalidTerminal(_) => {
                AppError::BadRequest {
                    message: e.to_string(),
                }
            }
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            warn!(%status, %message, "request failed");
        } else {
            debug!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
