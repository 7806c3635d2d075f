use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::InvalidHeaderValue;
use axum::http::HeaderValue;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::AllowHeaders;
use tower_http::cors::AllowMethods;
use tower_http::cors::CorsLayer;
use tower_http::request_id::MakeRequestUuid;
use tower_http::request_id::PropagateRequestIdLayer;
use tower_http::request_id::SetRequestIdLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_todo::create_todo;
use super::handlers::delete_todo::delete_todo;
use super::handlers::get_todo::get_todo;
use super::handlers::health::health;
use super::handlers::list_todos::list_todos;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::update_todo::update_todo;
use super::middleware::authenticate as auth_middleware;
use super::middleware::process_time;
use crate::domain::todo::ports::TodoServicePort;
use crate::domain::user::ports::AuthServicePort;

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub todo_service: Arc<dyn TodoServicePort>,
}

/// CORS policy: a single trusted origin with credentials, or permissive when
/// no origin is configured.
pub fn cors_layer(allowed_origin: Option<&str>) -> Result<CorsLayer, InvalidHeaderValue> {
    match allowed_origin {
        Some(origin) => Ok(CorsLayer::new()
            .allow_origin(HeaderValue::from_str(origin)?)
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true)),
        None => Ok(CorsLayer::permissive()),
    }
}

pub fn create_router(
    auth_service: Arc<dyn AuthServicePort>,
    todo_service: Arc<dyn TodoServicePort>,
    cors: CorsLayer,
) -> Router {
    let state = AppState {
        auth_service,
        todo_service,
    };

    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/api/v1/auth/register", post(register))
        .route("/api/v1/auth/login", post(login));

    let protected_routes = Router::new()
        .route("/api/v1/todos", post(create_todo).get(list_todos))
        .route(
            "/api/v1/todos/:todo_id",
            get(get_todo).patch(update_todo).delete(delete_todo),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            let request_id = request
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|value| value.to_str().ok())
                .unwrap_or("-");

            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
                request_id = %request_id,
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    let request_layers = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(trace_layer)
        .layer(PropagateRequestIdLayer::x_request_id());

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(middleware::from_fn(process_time))
        .layer(request_layers)
        .layer(cors)
        .with_state(state)
}
