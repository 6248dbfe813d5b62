use reqwest::blocking::Client;
use reqwest::header::LOCATION;
use tracing::debug;
use url::Url;

/// Hard ceiling on unique hops; well-formed chains never get close.
const MAX_HOPS: usize = 20;

/// Follows the redirect chain starting at `start`, returning every URL
/// visited in order. `client` must be configured to not follow redirects
/// itself, so each 3xx response is observed here.
///
/// The chain ends at the first non-redirect response, and is truncated early
/// on a request error, a missing or unresolvable `Location` header, or a
/// redirect back into the chain (loop). Truncation is not an error: the
/// chain collected so far is still meaningful for comparison. No URL appears
/// twice in the result.
pub(crate) fn follow(client: &Client, start: &Url) -> Vec<Url> {
    let mut chain = vec![start.clone()];
    let mut current = start.clone();

    while chain.len() <= MAX_HOPS {
        let response = match client.get(current.clone()).send() {
            Ok(response) => response,
            Err(err) => {
                debug!(url = %current, error = %err, "request failed, truncating chain");
                break;
            }
        };

        let status = response.status();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        // Drain the body so the connection can be reused for the next hop.
        let _ = response.bytes();

        if !status.is_redirection() {
            break;
        }

        let next = match location.and_then(|loc| current.join(&loc).ok()) {
            Some(next) => next,
            None => {
                debug!(url = %current, "redirect without usable Location, truncating chain");
                break;
            }
        };

        if chain.contains(&next) {
            debug!(url = %next, "redirect loop detected, truncating chain");
            break;
        }

        debug!(from = %current, to = %next, "following redirect");
        chain.push(next.clone());
        current = next;
    }

    chain
}
