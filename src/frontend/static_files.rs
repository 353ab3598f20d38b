use tower_http::services::{ServeDir, ServeFile};

use crate::config::FrontendSettings;

/// Assets under the configured static directory, mounted at `/static`.
pub fn static_assets(settings: &FrontendSettings) -> ServeDir {
    ServeDir::new(&settings.static_dir)
}

/// The single-page-app entry document served for every non-API path.
pub fn index_document(settings: &FrontendSettings) -> ServeFile {
    ServeFile::new(&settings.index_file)
}
