//! Axum integration for [`SessionTimeoutGuard`].

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    Router,
};

use super::{Access, SessionTimeoutGuard};
use crate::session::SessionId;

/// Session timeout middleware for axum.
///
/// Expects an upstream layer to have inserted the request's [`SessionId`]
/// as an extension; requests without one pass through untouched. On a live
/// session the refreshed [`crate::SessionState`] and the guard's
/// [`crate::SessionTimeoutPolicy`] are inserted as extensions for the
/// handler. Expired and unknown sessions are rejected with `401`.
pub async fn session_timeout_middleware(
    State(guard): State<Arc<SessionTimeoutGuard>>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(id) = request.extensions().get::<SessionId>().copied() else {
        return Ok(next.run(request).await);
    };

    match guard.check(&id) {
        Ok(Access::Granted(state)) => {
            request.extensions_mut().insert(state);
            request.extensions_mut().insert(guard.policy());
            Ok(next.run(request).await)
        }
        Ok(Access::Expired) | Ok(Access::Unknown) => Err(StatusCode::UNAUTHORIZED),
        Err(e) => {
            tracing::error!(session = %id, error = %e, "session timeout check failed");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Wrap every route currently in `router` with `guard`.
///
/// Routes added afterwards are not covered, which lets different route
/// groups carry different policies before being merged.
pub fn with_session_timeout<S>(router: Router<S>, guard: Arc<SessionTimeoutGuard>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn_with_state(
        guard,
        session_timeout_middleware,
    ))
}
