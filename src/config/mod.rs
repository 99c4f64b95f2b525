//! Configuration and path management for the OneDrip CLI

pub mod paths;
pub mod settings;

pub use paths::OneDripPaths;
pub use settings::Settings;
