//! Pluggable fragment fetching.

use std::future::Future;
use std::path::{Component, Path, PathBuf};
use std::pin::Pin;

use reqwest::Url;

use crate::content::ContentError;

/// Fetch a fragment by its path relative to some content root.
pub trait FragmentFetcher: Send + Sync {
    fn fetch<'a>(
        &'a self,
        path: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, ContentError>> + Send + 'a>>;
}

/// Fetches fragments over HTTP relative to a base URL.
#[derive(Clone, Debug)]
pub struct HttpFragmentFetcher {
    client: reqwest::Client,
    base: Url,
}

impl HttpFragmentFetcher {
    pub fn new(base: &str) -> Result<Self, ContentError> {
        // a base without a trailing slash would have its last segment replaced
        let base = if base.ends_with('/') {
            base.to_owned()
        } else {
            format!("{base}/")
        };
        let base = Url::parse(&base).map_err(|e| ContentError::InvalidLocation(e.to_string()))?;

        Ok(Self {
            client: reqwest::Client::new(),
            base,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }
}

impl FragmentFetcher for HttpFragmentFetcher {
    fn fetch<'a>(
        &'a self,
        path: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, ContentError>> + Send + 'a>> {
        Box::pin(async move {
            let url = self
                .base
                .join(path)
                .map_err(|e| ContentError::InvalidLocation(e.to_string()))?;

            let response = self.client.get(url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(ContentError::Status {
                    path: path.to_owned(),
                    status: status.as_u16(),
                });
            }

            Ok(response.text().await?)
        })
    }
}

/// Reads fragments from a directory.
#[derive(Clone, Debug)]
pub struct DirectoryFragmentFetcher {
    root: PathBuf,
}

impl DirectoryFragmentFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves `path` inside the root, refusing anything that could step
    /// outside of it.
    pub fn resolve(&self, path: &str) -> Result<PathBuf, ContentError> {
        let relative = Path::new(path);
        let contained = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));

        if path.is_empty() || !contained {
            return Err(ContentError::InvalidLocation(path.to_owned()));
        }

        Ok(self.root.join(relative))
    }
}

impl FragmentFetcher for DirectoryFragmentFetcher {
    fn fetch<'a>(
        &'a self,
        path: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, ContentError>> + Send + 'a>> {
        Box::pin(async move {
            let file = self.resolve(path)?;
            tokio::fs::read_to_string(&file)
                .await
                .map_err(|source| ContentError::Io { path: file, source })
        })
    }
}
