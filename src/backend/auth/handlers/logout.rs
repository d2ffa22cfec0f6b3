/**
 * Logout Handler
 *
 * /register/logout revokes the token the request was made with. Other
 * tokens held by the same user stay valid.
 */

use axum::extract::State;

use crate::backend::auth::state::AuthState;
use crate::backend::middleware::AuthUser;

pub async fn logout(State(auth): State<AuthState>, user: AuthUser) -> &'static str {
    auth.revoke(&user.0.claims).await;
    tracing::info!("{} logged out", user.identity());
    "Logged out"
}
