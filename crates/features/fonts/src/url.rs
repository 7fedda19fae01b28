use std::fmt::Write;

const BASE_URL: &str = "https://fonts.googleapis.com/css";
const WEIGHTS: &str = "100,100italic,200,200italic,300,300italic,400,400italic,500,500italic,600,600italic,700,700italic,800,800italic,900,900italic";
/// `|`, percent-encoded.
const FAMILY_SEPARATOR: &str = "%7C";

/// Extra character subset to request for a site locale.
#[must_use]
pub fn subset_for(locale: &str) -> Option<&'static str> {
    match locale {
        "ru_RU" | "bg_BG" | "uk" => Some("cyrillic"),
        "he_IL" => Some("hebrew"),
        "el" => Some("greek"),
        "vi" => Some("vietnamese"),
        "cs_CZ" | "ro_RO" | "pl_PL" => Some("latin-ext"),
        _ => None,
    }
}

/// Builds one stylesheet URL requesting every weight of every family.
///
/// Returns `None` for an empty list.
///
/// ```rust
/// use rebreak_fonts::stylesheet_url;
///
/// let url = stylesheet_url(["Open Sans"], Some("el")).unwrap();
/// assert!(url.starts_with("https://fonts.googleapis.com/css?family=Open+Sans:100,100italic,"));
/// assert!(url.ends_with("900italic&display=swap&subset=greek"));
/// ```
pub fn stylesheet_url<I, S>(families: I, locale: Option<&str>) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let families: Vec<String> = families
        .into_iter()
        .filter(|family| !family.as_ref().trim().is_empty())
        .map(|family| format!("{}:{WEIGHTS}", family.as_ref().trim().replace(' ', "+")))
        .collect();

    if families.is_empty() {
        return None;
    }

    let mut url = format!("{BASE_URL}?family={}&display=swap", families.join(FAMILY_SEPARATOR));
    if let Some(subset) = locale.and_then(subset_for) {
        let _ = write!(url, "&subset={subset}");
    }
    Some(url)
}
