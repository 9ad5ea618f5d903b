pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{http::HttpRecommendationClient, storage::LocalStorage};
pub use config::{toml_config::TomlConfig, Settings};
pub use crate::core::{
    controller::{SubmissionController, SubmissionOutcome, SubmissionState},
    session::{RecommendationSession, SessionReport},
    view::ResultsView,
};
pub use domain::model::{ProfileRequest, ResponseEnvelope, FIELD_IDS};
pub use utils::error::{AppError, Result};
