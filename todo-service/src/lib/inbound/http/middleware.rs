use std::time::Instant;

use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::user::models::UserId;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

const PROCESS_TIME_HEADER: &str = "x-process-time";

/// Extension type to store the authenticated user in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that resolves the bearer token to a user and adds it to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    // Owned so that no borrow of the request is held across the await.
    let token = extract_token_from_header(&req)?.to_owned();

    let user = state.auth_service.identify(&token).await.map_err(|e| {
        tracing::warn!(error = %e, "Bearer token rejected");
        ApiError::from(e).into_response()
    })?;

    req.extensions_mut()
        .insert(AuthenticatedUser { user_id: user.id });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let not_authenticated =
        || ApiError::Unauthorized("Not authenticated".to_string()).into_response();

    let auth_str = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(not_authenticated)?
        .to_str()
        .map_err(|_| not_authenticated())?;

    match auth_str.split_once(' ') {
        Some((scheme, token))
            if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() =>
        {
            Ok(token.trim())
        }
        _ => Err(not_authenticated()),
    }
}

/// Reports the handling time in seconds in an `x-process-time` header.
pub async fn process_time(req: Request, next: Next) -> Response {
    let started = Instant::now();
    let mut response = next.run(req).await;

    let elapsed = started.elapsed().as_secs_f64();
    if let Ok(value) = HeaderValue::from_str(&elapsed.to_string()) {
        response.headers_mut().insert(PROCESS_TIME_HEADER, value);
    }

    response
}
