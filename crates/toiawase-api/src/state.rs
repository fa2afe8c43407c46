use std::sync::Arc;

use toiawase_export::PdfFont;
use toiawase_persist::MessageStore;

use crate::config::Config;
use crate::views::Views;

/// Shared application state passed to all handlers
///
/// Built once at startup and never mutated afterwards. `pdf_font` is `None`
/// when no usable CJK font was configured; PDF export then fails with 500.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn MessageStore>,
    pub views: Arc<Views>,
    pub pdf_font: Option<PdfFont>,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<dyn MessageStore>,
        views: Views,
        pdf_font: Option<PdfFont>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            store,
            views: Arc::new(views),
            pdf_font,
        }
    }
}
