/**
 * API Route Configuration
 *
 * Static table mapping (resource, action) to handler. Everything here
 * requires a logged-in user; `router.rs` wraps these routes in the
 * authentication middleware.
 */

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::backend::auth::{logout, userinfo};
use crate::backend::collab::handlers::{
    close_file, delete_file, get_file, list_edits, list_edits_since_save, list_files, list_open,
    list_recent_edits, list_root, put_edits, put_file, reset_all_edits, reset_edits,
};
use crate::backend::server::state::AppState;
use crate::backend::settings::{delete_setting, get_setting, list_settings, save_settings};

pub fn configure_file_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/file/list", get(list_root))
        .route("/file/list/", get(list_root))
        .route("/file/list/{*path}", get(list_files))
        .route("/file/listopen", get(list_open))
        .route("/file/at/{*path}", get(get_file).put(put_file).delete(delete_file))
        .route("/file/close/{*path}", post(close_file))
}

pub fn configure_edit_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/edit/list/{*path}", get(list_edits))
        .route("/edit/recent/{index}/{*path}", get(list_recent_edits))
        .route("/edit/sincesave/{*path}", get(list_edits_since_save))
        .route("/edit/at/{*path}", put(put_edits))
        .route("/edit/reset", post(reset_all_edits))
        .route("/edit/reset/{*path}", post(reset_edits))
}

pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    let router = router
        .route("/register/userinfo", get(userinfo))
        .route("/register/logout", get(logout).post(logout))
        .route("/settings", get(list_settings).post(save_settings))
        .route("/settings/{key}", get(get_setting).delete(delete_setting));
    configure_edit_routes(configure_file_routes(router))
}
