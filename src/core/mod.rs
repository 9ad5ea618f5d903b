pub mod card;
pub mod controller;
pub mod markup;
pub mod normalizer;
pub mod pagination;
pub mod session;
pub mod view;

pub use crate::domain::model::{ProfileRequest, ResponseEnvelope, RoadmapRecord, Timeline};
pub use crate::domain::ports::{ConfigProvider, RecommendationSource, Storage};
pub use crate::utils::error::Result;
