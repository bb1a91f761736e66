use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use scraper::{Html, Selector};
use thiserror::Error;
use url::Url;

use crate::classifier::{LandedView, RawOutcome};

/// Faults the collaborator can raise while submitting one URL.
/// `Operation` is item-scoped and ends up retried; `Setup` dooms the run.
#[derive(Debug, Error)]
pub enum SubmitFault {
    #[error("{0}")]
    Operation(String),
    #[error("{0}")]
    Setup(String),
}

/// The external operation: hand one URL to the import site and report what
/// it came back with. The batch runner never knows more than this.
pub trait Submitter {
    fn submit(&self, url: &str) -> Result<RawOutcome, SubmitFault>;
}

/// Submits URLs to the import form over plain HTTP, riding on the cookie
/// session the operator established before the run.
#[derive(Debug)]
pub struct HttpSubmitter {
    client: Client,
    endpoint: Url,
}

impl HttpSubmitter {
    pub fn new(endpoint: &str) -> Result<Self, SubmitFault> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| SubmitFault::Setup(format!("invalid import endpoint '{}': {}", endpoint, e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .default_headers(headers)
            .cookie_store(true)
            .build()
            .map_err(|e| SubmitFault::Setup(format!("failed to build HTTP client: {}", e)))?;

        Ok(HttpSubmitter { client, endpoint })
    }
}

impl Submitter for HttpSubmitter {
    fn submit(&self, url: &str) -> Result<RawOutcome, SubmitFault> {
        let resp = self
            .client
            .post(self.endpoint.clone())
            .form(&[("url", url)])
            .send()
            .map_err(|e| SubmitFault::Operation(format!("request failed: {}", e)))?;

        let landed = resp.url().clone();
        let status = resp.status();
        let body = resp
            .text()
            .map_err(|e| SubmitFault::Operation(format!("failed to read response body: {}", e)))?;

        debug!("Submission for {} landed on {} ({})", url, landed, status);

        // A redirect away from the form is the structural success signal;
        // everything else is left to the classifier's text patterns.
        let landed_view = if landed.path() != self.endpoint.path() {
            LandedView::Editor
        } else {
            LandedView::ImportForm
        };

        Ok(RawOutcome {
            landed_view,
            visible_text: visible_text(&body),
        })
    }
}

// Strips the response down to the text an operator would see on screen,
// which is what the classifier's patterns are written against.
fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let selector = Selector::parse("body").unwrap();
    let Some(body) = document.select(&selector).next() else {
        return String::new();
    };
    body.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_endpoint_is_a_setup_fault() {
        let err = HttpSubmitter::new("not a url").unwrap_err();
        assert!(matches!(err, SubmitFault::Setup(_)));
    }

    #[test]
    fn visible_text_drops_markup_and_blank_runs() {
        let html = "<html><body><div>Paste a link</div>\n\n<p>  Import  </p></body></html>";
        assert_eq!(visible_text(html), "Paste a link\nImport");
    }

    #[test]
    fn visible_text_of_empty_document() {
        assert_eq!(visible_text(""), "");
    }
}
