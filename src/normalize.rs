use url::Url;

/// Canonicalizes a URL for equivalence testing.
///
/// The scheme is forced to `https` and a single trailing `/` is stripped, so
/// `http://example.com/a` and `https://example.com/a/` compare equal. Nothing
/// else is touched: case, query parameter order and explicit ports all stay
/// significant. The result is only ever compared, never fetched or displayed.
pub fn normalize(url: &Url) -> String {
    let mut url = url.clone();
    // Only fails for non-special schemes, which never name a profile.
    let _ = url.set_scheme("https");

    let serialized = url.to_string();
    match serialized.strip_suffix('/') {
        Some(trimmed) => trimmed.to_string(),
        None => serialized,
    }
}
