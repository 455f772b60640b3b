use crate::api::HttpBackend;
use crate::config::UiConfig;
use crate::host::BrowserHost;
use crate::markup::MarkdownRenderer;

/// Collaborators shared by every component, provided once as context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppServices {
    pub config: UiConfig,
    pub backend: HttpBackend,
    pub host: BrowserHost,
    pub renderer: MarkdownRenderer,
}

impl AppServices {
    pub fn new(config: UiConfig) -> Self {
        Self {
            backend: HttpBackend::new(&config),
            host: BrowserHost,
            renderer: MarkdownRenderer::new(config.markdown.clone()),
            config,
        }
    }
}
