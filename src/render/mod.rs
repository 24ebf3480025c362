//! Pure transformation from a stored paste record to displayable HTML
//! fragments.

pub mod redact;


use crate::models::paste::PasteRecord;

/// View-time projection of a paste: one tab and one content pane per file,
/// in stored order, plus the raw serialized record for raw-mode responses.
/// Never persisted; built per request or recomputed from a cached record.
#[derive(Debug, Clone, Default)]
pub struct RenderedPaste {
    pub id: String,
    pub created_at: String,
    pub tabs: Vec<String>,
    pub panes: Vec<String>,
    pub raw: String,
}

impl RenderedPaste {
    /// Sentinel rendering for failed lookups: empty id and time, no tabs
    /// or panes, empty raw body. The view route always has something
    /// renderable, never an error.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Tab fragments joined for the `{file_list}` template slot.
    pub fn file_list(&self) -> String {
        self.tabs.join("\n")
    }

    /// Pane fragments joined for the `{file_content}` template slot.
    pub fn file_content(&self) -> String {
        self.panes.join("\n")
    }
}

/// Render a paste record into tab/pane fragments.
///
/// Per file, in stored order: infer a language tag from the file name,
/// HTML-escape the content, then run the IP redaction pass over the
/// escaped text. The first file's tab and pane are marked active; the
/// template's stylesheet hides the rest until selected.
pub fn render(record: &PasteRecord, raw: &str) -> RenderedPaste {
    let mut tabs = Vec::with_capacity(record.file_names.len());
    let mut panes = Vec::with_capacity(record.file_names.len());

    for (index, name) in record.file_names.iter().enumerate() {
        let content = record
            .files
            .get(name)
            .map(String::as_str)
            .unwrap_or_default();
        let language = infer_language(name);
        let escaped_name = escape_html(name);
        let escaped_content = redact::redact_ip_addresses(&escape_html(content));
        let active = if index == 0 { " active" } else { "" };

        tabs.push(format!(
            r##"<li class="file-tab{active}"><a href="#pane-{index}" data-pane="{index}">{escaped_name}</a></li>"##
        ));
        panes.push(format!(
            r#"<div id="pane-{index}" class="file-pane{active}"><pre><code class="language-{language}">{escaped_content}</code></pre></div>"#
        ));
    }

    RenderedPaste {
        id: record.id.clone(),
        created_at: record.timestamp.display(),
        tabs,
        panes,
        raw: raw.to_string(),
    }
}

/// Infer a syntax-language tag from a file name.
///
/// The lowercased extension is used verbatim except for two remaps
/// (`yml` → `yaml`, `log` → `plaintext`); names without an extension are
/// `plaintext`. Only a tag is produced; highlighting itself is a
/// client-side concern.
pub fn infer_language(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => {
            let ext = ext.to_ascii_lowercase();
            match ext.as_str() {
                "yml" => "yaml".to_string(),
                "log" => "plaintext".to_string(),
                _ => ext,
            }
        }
        _ => "plaintext".to_string(),
    }
}

/// Escape text for embedding in HTML element content and attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}
