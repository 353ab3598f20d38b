pub mod static_files;

use axum::Router;

use crate::config::FrontendSettings;

/// Mounts static assets and makes the index document the fallback for
/// everything the given router does not handle. Routers nested with their
/// own fallback (such as `/api`) keep it.
pub fn with_frontend(router: Router, settings: &FrontendSettings) -> Router {
    router
        .nest_service("/static", static_files::static_assets(settings))
        .fallback_service(static_files::index_document(settings))
}
