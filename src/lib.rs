//! A library for discovering and verifying profiles marked up with the
//! rel="me" microformat.
//!
//! A profile page declares outbound links to other identities the same
//! person owns by marking them rel="me"; a link is verified when its target
//! page links back, directly or after HTTP redirects. This mutual crawlable
//! cross-linking is what decentralized identity schemes such as IndieAuth
//! establish trust from, and this library provides the tools to work with it.
//!
//! See <http://microformats.org/wiki/rel-me>.

mod error;
mod extract;
mod follow;
mod normalize;
mod resolve;
mod verify;

pub use error::RelMeError;
pub use extract::{extract_links, Relation};
pub use normalize::normalize;
pub use resolve::resolve_profile_url;
pub use verify::{CandidateOutcome, Verifier};
