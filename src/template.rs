//! View-page template loading and placeholder substitution.

use crate::render::RenderedPaste;
use std::fs;
use std::path::Path;

const DEFAULT_TEMPLATE: &str = include_str!("../assets/view.html");

/// The HTML page template for rendered pastes.
///
/// Loaded once at startup; the embedded default keeps the binary
/// self-contained when no template file is deployed alongside it.
pub struct ViewTemplate {
    source: String,
}

impl ViewTemplate {
    /// Load the template from `path`, falling back to the embedded default.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(source) => {
                tracing::info!(path = %path.display(), "loaded view template");
                Self { source }
            }
            Err(err) => {
                tracing::debug!(
                    path = %path.display(),
                    "using embedded view template: {err}"
                );
                Self::embedded()
            }
        }
    }

    /// The built-in template shipped inside the binary.
    pub fn embedded() -> Self {
        Self {
            source: DEFAULT_TEMPLATE.to_string(),
        }
    }

    /// Substitute the four named placeholders and return the full page.
    pub fn render_page(&self, rendered: &RenderedPaste) -> String {
        self.source
            .replace("{paste_id}", &rendered.id)
            .replace("{paste_time}", &rendered.created_at)
            .replace("{file_list}", &rendered.file_list())
            .replace("{file_content}", &rendered.file_content())
    }
}
