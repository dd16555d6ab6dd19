pub mod config;
pub mod error;

pub use config::{
    AppConfig, BatchConfig, BoundaryTouchCheck, HoleOverlapCheck, StoreConfig, ValidatorConfig,
};
pub use error::{HazardError, Result};
