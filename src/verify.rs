use crate::extract::{extract_links, Relation};
use crate::follow::follow;
use crate::normalize::normalize;

use super::error::RelMeError;
use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use std::time::Duration;
use tracing::debug;
use url::Url;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// The outcome of checking a single candidate link inside a batch.
///
/// [`Verifier::verify`] only reports the links that verified; this carries
/// the rest of the story for callers that want to know why a candidate was
/// dropped.
#[derive(Debug)]
pub struct CandidateOutcome {
    /// The candidate link as it appeared on the profile page.
    pub url: String,
    /// Whether the candidate links back to the profile.
    pub verified: bool,
    /// The error that prevented verification, if any.
    pub error: Option<RelMeError>,
}

/// Discovers and verifies rel="me" links.
///
/// Holds the two HTTP clients the operations need: one that follows
/// redirects for plain page fetches, and one that surfaces 3xx responses so
/// redirect chains can be walked hop by hop. Construct one per configuration
/// and reuse it freely; it keeps no per-call state.
pub struct Verifier {
    client: Client,
    no_redirect: Client,
}

impl Verifier {
    /// Creates a verifier with the default request timeout.
    ///
    /// # Errors
    /// Returns `Err` if the underlying HTTP clients cannot be constructed.
    pub fn new() -> Result<Self, RelMeError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Creates a verifier whose every request, including each individual
    /// redirect hop, is bounded by `timeout`.
    ///
    /// # Errors
    /// Returns `Err` if the underlying HTTP clients cannot be constructed.
    pub fn with_timeout(timeout: Duration) -> Result<Self, RelMeError> {
        let user_agent = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        let no_redirect = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .redirect(Policy::none())
            .build()?;

        Ok(Self {
            client,
            no_redirect,
        })
    }

    /// Returns all hrefs in rel="me" elements on the page at `profile`, in
    /// document order.
    ///
    /// # Errors
    /// Returns `Err` if the fetch fails, the response status is not a
    /// success, or the page cannot be processed.
    pub fn find_links(&self, profile: &str) -> Result<Vec<String>, RelMeError> {
        let body = self.fetch(profile)?;
        extract_links(&body, &[Relation::Me])
    }

    /// Like [`find_links`](Self::find_links), but prefers links marked
    /// rel="me authn". Plain rel="me" links are only returned when the page
    /// declares no authn links at all.
    ///
    /// # Errors
    /// Returns `Err` if the fetch fails, the response status is not a
    /// success, or the page cannot be processed.
    pub fn find_auth_links(&self, profile: &str) -> Result<Vec<String>, RelMeError> {
        let body = self.fetch(profile)?;
        extract_links(&body, &[Relation::MeAuthn, Relation::Me])
    }

    /// Checks whether the page at `remote` declares a rel="me" link back to
    /// `test`, following redirect chains on both sides and comparing under
    /// [`normalize`](crate::normalize).
    ///
    /// Candidate links that fail to parse as URLs are skipped silently; a
    /// single bad href must not spoil the rest of the page.
    ///
    /// # Errors
    /// Returns `Err` if `test` is not a valid URL, or if `remote` cannot be
    /// fetched or processed.
    pub fn links_to(&self, remote: &str, test: &str) -> Result<bool, RelMeError> {
        let test_url = Url::parse(test)?;
        let test_chain: Vec<String> = follow(&self.no_redirect, &test_url)
            .iter()
            .map(normalize)
            .collect();

        for link in self.find_links(remote)? {
            let link_url = match Url::parse(&link) {
                Ok(link_url) => link_url,
                Err(_) => continue,
            };

            for hop in follow(&self.no_redirect, &link_url) {
                if test_chain.contains(&normalize(&hop)) {
                    debug!(remote, test, via = %hop, "reciprocal link found");
                    return Ok(true);
                }
            }
        }

        Ok(false)
    }

    /// Filters `candidates` down to those that link back to `profile`,
    /// preserving their order. A candidate whose check errors is treated as
    /// unverified rather than aborting the batch; use
    /// [`verify_report`](Self::verify_report) to see those errors.
    ///
    /// # Errors
    /// Currently infallible; the `Result` mirrors the other operations.
    pub fn verify(&self, profile: &str, candidates: &[String]) -> Result<Vec<String>, RelMeError> {
        Ok(self
            .verify_report(profile, candidates)
            .into_iter()
            .filter(|outcome| outcome.verified)
            .map(|outcome| outcome.url)
            .collect())
    }

    /// Like [`verify`](Self::verify), but reports every candidate's outcome
    /// including the error that stopped an unverified one.
    pub fn verify_report(&self, profile: &str, candidates: &[String]) -> Vec<CandidateOutcome> {
        candidates
            .iter()
            .map(|candidate| match self.links_to(candidate, profile) {
                Ok(verified) => CandidateOutcome {
                    url: candidate.clone(),
                    verified,
                    error: None,
                },
                Err(err) => {
                    debug!(candidate, error = %err, "candidate skipped");
                    CandidateOutcome {
                        url: candidate.clone(),
                        verified: false,
                        error: Some(err),
                    }
                }
            })
            .collect()
    }

    /// Returns the rel="me" links on `profile` that also link back to it:
    /// [`find_links`](Self::find_links) composed with
    /// [`verify`](Self::verify).
    ///
    /// # Errors
    /// Returns `Err` if the profile page cannot be fetched or processed.
    pub fn find_verified(&self, profile: &str) -> Result<Vec<String>, RelMeError> {
        let links = self.find_links(profile)?;
        self.verify(profile, &links)
    }

    /// Walks the redirect chain from `start`, returning every URL visited in
    /// order. See the truncation rules on the chain in the crate docs: a
    /// request failure, a missing or unresolvable `Location`, or a loop ends
    /// the chain without error.
    pub fn redirect_chain(&self, start: &Url) -> Vec<Url> {
        follow(&self.no_redirect, start)
    }

    fn fetch(&self, url: &str) -> Result<String, RelMeError> {
        let url = Url::parse(url)?;
        let response = self.client.get(url).send()?.error_for_status()?;
        Ok(response.text()?)
    }
}
