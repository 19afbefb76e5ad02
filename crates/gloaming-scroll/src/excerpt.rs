//! Excerpt modal: one fetch, two outcomes, same open state either way.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};

use crate::color::Rgb;

/// Shown in place of content that failed to load.
pub const FALLBACK_BODY: &str = "<div class=\"excerpt-body\"><p>Sorry, this excerpt could not be loaded.</p></div>";

/// Identifiers containing this marker get the dark panel.
pub const DARK_MARKER: &str = "bone-eaters";

pub const DARK_BACKGROUND: Rgb = Rgb::from_hex(0x0d0d14);
pub const LIGHT_BACKGROUND: Rgb = Rgb::from_hex(0xfefdfb);

/// Supplies excerpt markup by identifier.
pub trait ExcerptSource {
    fn load(&self, id: &str) -> anyhow::Result<String>;
}

/// Reads `excerpt-<id>.html` from a directory.
#[derive(Debug, Clone)]
pub struct DirExcerptSource {
    root: PathBuf,
}

impl DirExcerptSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, id: &str) -> PathBuf {
        self.root.join(format!("excerpt-{id}.html"))
    }
}

impl ExcerptSource for DirExcerptSource {
    fn load(&self, id: &str) -> anyhow::Result<String> {
        if id.is_empty() || id.contains(['/', '\\']) || id.contains("..") {
            bail!("invalid excerpt id {id:?}");
        }
        let path = self.path_for(id);
        fs::read_to_string(&path).with_context(|| format!("failed to read excerpt {}", path.display()))
    }
}

/// Content of an open modal.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenExcerpt {
    pub id: String,
    /// Markup to display; [`FALLBACK_BODY`] when loading failed.
    pub body: String,
    pub background: Rgb,
    pub loaded: bool,
}

impl OpenExcerpt {
    /// Body with markup stripped and whitespace collapsed.
    ///
    /// Only good enough to size text for display. It is not an HTML parser
    /// and must not be used to sanitize untrusted markup.
    pub fn plain_text(&self) -> String {
        strip_markup(&self.body)
    }
}

/// Modal state. While open, the document should not scroll.
#[derive(Debug, Default)]
pub struct ExcerptModal {
    open: Option<OpenExcerpt>,
}

impl ExcerptModal {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    #[inline]
    pub fn current(&self) -> Option<&OpenExcerpt> {
        self.open.as_ref()
    }

    /// Loads `id` and opens the modal, on failure with the fallback message.
    pub fn open<S: ExcerptSource + ?Sized>(&mut self, id: &str, source: &S) -> &OpenExcerpt {
        let excerpt = match source.load(id) {
            Ok(body) => {
                log::info!("excerpt {id:?} opened ({} bytes)", body.len());
                OpenExcerpt {
                    id: id.to_owned(),
                    body,
                    background: background_for(id),
                    loaded: true,
                }
            }
            Err(err) => {
                log::error!("failed to load excerpt: {err:#}");
                OpenExcerpt {
                    id: id.to_owned(),
                    body: FALLBACK_BODY.to_owned(),
                    background: LIGHT_BACKGROUND,
                    loaded: false,
                }
            }
        };
        self.open.insert(excerpt)
    }

    /// Closes the modal. Returns `true` if it was open.
    pub fn close(&mut self) -> bool {
        let was_open = self.open.take().is_some();
        if was_open {
            log::debug!("excerpt closed");
        }
        was_open
    }
}

/// Panel background for an excerpt identifier.
pub fn background_for(id: &str) -> Rgb {
    if id.contains(DARK_MARKER) { DARK_BACKGROUND } else { LIGHT_BACKGROUND }
}

/// Drops everything between `<` and `>`. A display approximation, not a
/// parser or sanitizer: entities, comments and `>` inside attributes pass
/// through unhandled.
fn strip_markup(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => {
                in_tag = true;
                out.push(' ');
            }
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    struct MapSource(HashMap<&'static str, &'static str>);

    impl ExcerptSource for MapSource {
        fn load(&self, id: &str) -> anyhow::Result<String> {
            self.0
                .get(id)
                .map(|s| s.to_string())
                .with_context(|| format!("no excerpt {id}"))
        }
    }

    fn source() -> MapSource {
        MapSource(HashMap::from([
            ("the-glade", "<h2>The Glade</h2><p>Light through leaves.</p>"),
            ("bone-eaters-1", "<p>Teeth in the dark.</p>"),
        ]))
    }

    #[test]
    fn opens_with_content_and_theme() {
        let mut modal = ExcerptModal::new();
        let light = modal.open("the-glade", &source()).clone();
        assert!(light.loaded);
        assert_eq!(light.background, LIGHT_BACKGROUND);
        assert_eq!(light.plain_text(), "The Glade Light through leaves.");

        let dark = modal.open("bone-eaters-1", &source());
        assert_eq!(dark.background, DARK_BACKGROUND);
        assert!(modal.is_open());
    }

    #[test]
    fn failure_still_opens_with_fallback() {
        let mut modal = ExcerptModal::new();
        let ex = modal.open("missing", &source());
        assert!(!ex.loaded);
        assert_eq!(ex.plain_text(), "Sorry, this excerpt could not be loaded.");
        assert!(modal.is_open());
    }

    #[test]
    fn close_reports_previous_state() {
        let mut modal = ExcerptModal::new();
        assert!(!modal.close());
        modal.open("the-glade", &source());
        assert!(modal.close());
        assert!(!modal.is_open());
    }

    #[test]
    fn dir_source_reads_named_file() {
        let dir = std::env::temp_dir().join(format!("gloaming-excerpts-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("excerpt-moss.html"), "<p>moss</p>").unwrap();
        let src = DirExcerptSource::new(&dir);
        assert_eq!(src.load("moss").unwrap(), "<p>moss</p>");
        assert!(src.load("nope").is_err());
        assert!(src.load("../moss").is_err());
        fs::remove_dir_all(&dir).unwrap();
    }
}
