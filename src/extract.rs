use super::error::RelMeError;
use lol_html::html_content::Element;
use lol_html::{element, HtmlRewriter, Settings};
use std::cell::RefCell;

/// A relation an `<a>` or `<link>` element can declare through its `rel`
/// attribute. Matching is against the whitespace-split tokens of the
/// attribute value, so `rel="what me ok"` carries `me` but `rel="meeting"`
/// does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// The `me` token is present.
    Me,
    /// Both the `me` and `authn` tokens are present.
    MeAuthn,
}

impl Relation {
    fn matches(self, rel: &str) -> bool {
        let has = |token: &str| rel.split_whitespace().any(|t| t == token);
        match self {
            Relation::Me => has("me"),
            Relation::MeAuthn => has("me") && has("authn"),
        }
    }
}

/// Collects the `href` of every `<a>` and `<link>` element matching one of
/// `relations`, preserving document order.
///
/// Relations are tried in priority order: the matches of the first relation
/// that matched anything anywhere in the document are returned, and later
/// relations are only consulted when every earlier one came up empty. A
/// matching element without an `href` attribute contributes an empty string
/// rather than being skipped.
///
/// # Errors
/// Returns `Err` if the markup cannot be processed.
pub fn extract_links(html: &str, relations: &[Relation]) -> Result<Vec<String>, RelMeError> {
    fn collect(el: &Element, relations: &[Relation], buckets: &RefCell<Vec<Vec<String>>>) {
        if let Some(rel) = el.get_attribute("rel") {
            let mut buckets = buckets.borrow_mut();
            for (i, relation) in relations.iter().enumerate() {
                if relation.matches(&rel) {
                    buckets[i].push(el.get_attribute("href").unwrap_or_default());
                }
            }
        }
    }

    let buckets = RefCell::new(vec![Vec::new(); relations.len()]);

    let mut rewriter = HtmlRewriter::new(
        Settings {
            element_content_handlers: vec![
                element!("a", |el| {
                    collect(el, relations, &buckets);
                    Ok(())
                }),
                element!("link", |el| {
                    collect(el, relations, &buckets);
                    Ok(())
                }),
            ],
            ..Settings::default()
        },
        |_: &[u8]| {},
    );
    rewriter
        .write(html.as_bytes())
        .map_err(|e| RelMeError::Html(e.to_string()))?;
    rewriter
        .end()
        .map_err(|e| RelMeError::Html(e.to_string()))?;

    Ok(buckets
        .into_inner()
        .into_iter()
        .find(|links| !links.is_empty())
        .unwrap_or_default())
}
