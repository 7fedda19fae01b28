use crate::url::stylesheet_url;
use fxhash::FxHashSet;
use rebreak_domain::config::FontsConfig;
use rebreak_kernel::hooks::FilterChain;
use rebreak_kernel::render::Block;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};

const GENERIC_FAMILIES: [&str; 4] = ["serif", "sans-serif", "monospace", "serif-alt"];
const FONT_ATTR_SUFFIX: &str = "fontfamily";

/// Decides per font whether it should be requested; receives the font name.
pub type EnqueuePredicate = FilterChain<bool, str>;

/// True unless `name` is one of the generic CSS families.
#[must_use]
pub fn is_web_font(name: &str) -> bool {
    !GENERIC_FAMILIES.iter().any(|generic| generic.eq_ignore_ascii_case(name.trim()))
}

/// Site-wide font settings shared by every request.
#[derive(Debug)]
pub struct FontRegistry {
    enabled: bool,
    namespaces: Vec<String>,
    locale: Option<String>,
    handle: String,
    predicate: EnqueuePredicate,
}

impl FontRegistry {
    #[must_use]
    pub fn from_config(config: &FontsConfig) -> Self {
        Self {
            enabled: config.enabled,
            namespaces: config.namespaces.clone(),
            locale: config.locale.clone(),
            handle: config.handle.clone(),
            predicate: EnqueuePredicate::new(),
        }
    }

    /// Hooks that may veto individual fonts (e.g. self-hosted families).
    pub const fn predicate_mut(&mut self) -> &mut EnqueuePredicate {
        &mut self.predicate
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// A fresh, empty accumulator for one request.
    #[must_use]
    pub fn collector(&self) -> FontCollector<'_> {
        FontCollector { registry: self, fonts: Vec::new(), seen: FxHashSet::default() }
    }
}

/// The stylesheet to enqueue for the fonts found during a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FontStylesheet {
    pub handle: String,
    pub url: String,
}

/// Per-request set of web fonts referenced by rendered blocks.
///
/// Names are kept in first-seen order and deduplicated on insertion by their trimmed,
/// lowercased form.
#[derive(Debug)]
pub struct FontCollector<'r> {
    registry: &'r FontRegistry,
    fonts: Vec<String>,
    seen: FxHashSet<String>,
}

impl FontCollector<'_> {
    /// Registers every `*fontFamily` attribute of a rendered block.
    ///
    /// Skipped when the content is absent, the block is outside the font namespaces, or
    /// the markup never mentions `family`.
    pub fn gather(&mut self, block: &Block, content: Option<&str>) {
        let Some(content) = content else { return };
        if !self.registry.enabled || !block.in_namespace(self.registry.namespaces.as_slice()) {
            return;
        }
        if !content.to_ascii_lowercase().contains("family") {
            return;
        }

        for (attr, value) in &block.attrs {
            if !is_font_attr(attr) {
                continue;
            }
            if let Value::String(font) = value {
                self.register(font);
            }
        }
    }

    /// Adds one font. Returns whether it was newly accepted.
    pub fn register(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || !is_web_font(name) {
            return false;
        }

        let key = name.to_lowercase();
        if self.seen.contains(&key) {
            return false;
        }

        if !self.registry.predicate.apply(true, name) {
            debug!(font = name, "Font enqueue vetoed");
            return false;
        }

        trace!(font = name, "Registered web font");
        self.seen.insert(key);
        self.fonts.push(name.to_owned());
        true
    }

    #[must_use]
    pub fn fonts(&self) -> &[String] {
        &self.fonts
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// The font stylesheet URL for the configured locale, if any font was found.
    #[must_use]
    pub fn stylesheet_url(&self) -> Option<String> {
        stylesheet_url(&self.fonts, self.registry.locale.as_deref())
    }

    #[must_use]
    pub fn stylesheet(&self) -> Option<FontStylesheet> {
        self.stylesheet_url().map(|url| FontStylesheet { handle: self.registry.handle.clone(), url })
    }
}

fn is_font_attr(attr: &str) -> bool {
    attr.len() >= FONT_ATTR_SUFFIX.len()
        && attr.is_char_boundary(attr.len() - FONT_ATTR_SUFFIX.len())
        && attr[attr.len() - FONT_ATTR_SUFFIX.len()..].eq_ignore_ascii_case(FONT_ATTR_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generic_families_are_not_web_fonts() {
        assert!(!is_web_font("serif"));
        assert!(!is_web_font("Sans-Serif"));
        assert!(!is_web_font(" monospace "));
        assert!(is_web_font("Merriweather"));
    }

    #[test]
    fn font_attribute_suffix_is_case_insensitive() {
        assert!(is_font_attr("titleFontFamily"));
        assert!(is_font_attr("fontfamily"));
        assert!(is_font_attr("BUTTON_FONTFAMILY"));
        assert!(!is_font_attr("fontFamilyType"));
        assert!(!is_font_attr("family"));
    }

    #[test]
    fn register_deduplicates_by_normalized_name() {
        let registry = FontRegistry::from_config(&FontsConfig::default());
        let mut fonts = registry.collector();

        assert!(fonts.register("Open Sans"));
        assert!(!fonts.register(" open sans "));
        assert!(!fonts.register("serif"));
        assert!(!fonts.register(""));
        assert!(fonts.register("Lora"));
        assert_eq!(fonts.fonts(), ["Open Sans", "Lora"]);
    }

    #[test]
    fn predicate_can_veto() {
        let mut registry = FontRegistry::from_config(&FontsConfig::default());
        registry.predicate_mut().add(10, "self-hosted", |keep, font| keep && font != "Inter");

        let mut fonts = registry.collector();
        assert!(!fonts.register("Inter"));
        assert!(fonts.register("Lora"));
        assert!(fonts.stylesheet().is_some());
    }
}
