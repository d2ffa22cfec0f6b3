/**
 * User Info Handler
 *
 * GET /register/userinfo returns the logged-in username.
 */

use axum::response::Json;

use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::middleware::AuthUser;

pub async fn userinfo(user: AuthUser) -> Json<UserResponse> {
    Json(UserResponse {
        username: user.identity().username().to_string(),
    })
}
