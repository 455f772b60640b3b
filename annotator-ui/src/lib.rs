pub mod api;
pub mod components;
pub mod config;
pub mod error;
pub mod host;
pub mod markup;
pub mod name_editor;
pub mod page;
pub mod panel;
pub mod services;
pub mod state;
pub mod tracker;

#[cfg(test)]
mod test_support;

pub use api::{ApiCall, Backend, HttpBackend};
pub use components::AnnotatorApp;
pub use config::{ui_config, UiConfig};
pub use error::ActionError;
pub use services::AppServices;
