//! POSIX locale to language tag conversion

/// Convert a POSIX locale name to a BCP 47 style tag.
///
/// `en_GB.UTF-8@euro` becomes `en-GB`. The `C` and `POSIX` locales carry no
/// language and yield `None`.
pub fn normalize_locale(raw: &str) -> Option<String> {
    let base = raw
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim();

    if base.is_empty() || base == "C" || base == "POSIX" {
        return None;
    }

    Some(base.replace('_', "-"))
}

/// Parse a `LANGUAGE`-style colon list, most preferred first
pub fn parse_language_list(raw: &str) -> Vec<String> {
    raw.split(':').filter_map(normalize_locale).collect()
}

/// First locale variable that names a language
pub fn first_locale<I, S>(values: I) -> Option<String>
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .flatten()
        .find_map(|v| normalize_locale(v.as_ref()))
}
