//! Per-language HTML fragments shown next to the map.
//!
//! Every language selection issues a request carrying a fresh token. A
//! response is only applied if its token is still the newest one issued, so a
//! slow answer for an earlier selection can never replace a newer one.

use std::path::PathBuf;

use crate::config::ContentSettings;
use crate::locale::LanguageCode;

pub mod fetch;

pub use fetch::{DirectoryFragmentFetcher, FragmentFetcher, HttpFragmentFetcher};

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{path} answered with status {status}")]
    Status { path: String, status: u16 },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid fragment location: {0}")]
    InvalidLocation(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn raw(&self) -> u64 {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentRequest {
    pub token: RequestToken,
    pub lang: LanguageCode,
    /// Fragment location relative to the content root.
    pub path: String,
}

impl ContentRequest {
    pub async fn resolve<F: FragmentFetcher + ?Sized>(self, fetcher: &F) -> ContentResponse {
        let result = fetcher.fetch(&self.path).await;
        ContentResponse {
            request: self,
            result,
        }
    }
}

#[derive(Debug)]
pub struct ContentResponse {
    pub request: ContentRequest,
    pub result: Result<String, ContentError>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedContent {
    pub lang: LanguageCode,
    pub html: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ContentOutcome {
    Applied,
    /// A newer request was issued after this one.
    Stale,
    Failed,
}

#[derive(Debug)]
pub struct ContentLoader {
    settings: ContentSettings,
    issued: u64,
    current: Option<LoadedContent>,
}

impl ContentLoader {
    pub fn new(settings: ContentSettings) -> Self {
        Self {
            settings,
            issued: 0,
            current: None,
        }
    }

    pub fn request(&mut self, lang: LanguageCode) -> ContentRequest {
        self.issued += 1;
        ContentRequest {
            token: RequestToken(self.issued),
            lang,
            path: self.settings.path_for(lang),
        }
    }

    pub fn latest(&self) -> Option<RequestToken> {
        (self.issued > 0).then_some(RequestToken(self.issued))
    }

    pub fn complete(&mut self, response: ContentResponse) -> ContentOutcome {
        let ContentResponse { request, result } = response;

        if Some(request.token) != self.latest() {
            tracing::debug!(
                token = request.token.raw(),
                lang = %request.lang,
                "dropping stale content response"
            );
            return ContentOutcome::Stale;
        }

        match result {
            Ok(html) => {
                tracing::debug!(lang = %request.lang, bytes = html.len(), "content loaded");
                self.current = Some(LoadedContent {
                    lang: request.lang,
                    html,
                });
                ContentOutcome::Applied
            }
            Err(error) => {
                tracing::warn!(lang = %request.lang, "failed to load content: {error}");
                ContentOutcome::Failed
            }
        }
    }

    pub fn current(&self) -> Option<&LoadedContent> {
        self.current.as_ref()
    }
}
