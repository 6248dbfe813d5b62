use super::error::RelMeError;
use url::Url;

/// Resolves a profile location string into a full HTTPS or HTTP URL.
///
/// It prepends "https://" if no protocol is specified, so bare domains like
/// `example.com/me` are accepted.
///
/// # Errors
/// Returns `Err` if the protocol is not `http` or `https`, or if the URL is
/// invalid.
pub fn resolve_profile_url(location: &str) -> Result<Url, RelMeError> {
    if location.contains("://") {
        let scheme = location.split("://").next().unwrap_or("");
        if scheme == "http" || scheme == "https" {
            Url::parse(location).map_err(RelMeError::from)
        } else {
            Err(RelMeError::UnsupportedProtocol(scheme.to_string()))
        }
    } else {
        let full_url = format!("https://{}", location);
        Url::parse(&full_url).map_err(RelMeError::from)
    }
}
