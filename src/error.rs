use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelMeError {
    #[error("URL parsing failed: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Protocol '{0}' is not supported. Please use https:// or http://.")]
    UnsupportedProtocol(String),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Could not process the page markup: {0}")]
    Html(String),
}
