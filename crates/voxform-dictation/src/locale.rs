//! Short language code to engine locale tag lookup.

/// Short codes and the locale tag the engine expects for each.
const LOCALE_TABLE: &[(&str, &str)] = &[
    ("en", "en-US"),
    ("hi", "hi-IN"),
    ("ta", "ta-IN"),
    ("te", "te-IN"),
    ("kn", "kn-IN"),
    ("ml", "ml-IN"),
    ("mr", "mr-IN"),
    ("bn", "bn-IN"),
    ("gu", "gu-IN"),
    ("pa", "pa-IN"),
    ("ur", "ur-IN"),
    ("or", "or-IN"),
    ("es", "es-ES"),
    ("fr", "fr-FR"),
    ("de", "de-DE"),
    ("ar", "ar-SA"),
    ("zh", "zh-CN"),
    ("ja", "ja-JP"),
    ("ko", "ko-KR"),
    ("pt", "pt-BR"),
];

/// Stateless locale lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocaleMap;

impl LocaleMap {
    /// Returns the locale tag for a known short code, or `code` unchanged.
    ///
    /// Unknown input is passed through so callers can hand in a full tag
    /// such as `en-GB` directly.
    pub fn resolve(code: &str) -> String {
        LOCALE_TABLE
            .iter()
            .find(|(short, _)| *short == code)
            .map(|(_, tag)| (*tag).to_string())
            .unwrap_or_else(|| code.to_string())
    }

    pub fn is_known(code: &str) -> bool {
        LOCALE_TABLE.iter().any(|(short, _)| *short == code)
    }

    /// All short codes in table order.
    pub fn codes() -> impl Iterator<Item = &'static str> {
        LOCALE_TABLE.iter().map(|(short, _)| *short)
    }
}
