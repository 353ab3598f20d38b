pub mod settings;
pub mod validation;

pub use settings::{
    Settings,
    ApplicationSettings,
    DaemonSettings,
    FrontendSettings,
};
pub use validation::validate_settings;
