//! Configuration module for Vidask.
//!
//! Handles loading and managing application settings.

mod settings;

pub use settings::{
    CollaboratorSettings, Endpoints, GeneralSettings, IngestPolicy, IngestSettings, Settings,
};
