//! Asset loading bridge.
//!
//! Fetching is done by the host (HTTP on the web, the filesystem natively);
//! this module tracks what was requested, reports progress after each item
//! and turns completions into [`LoadOutcome`] values.

use crate::preset::AssetManifest;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LoadError {
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },
    #[error("failed to parse asset: {0}")]
    Parse(String),
    #[error("model has no child node {0}")]
    MissingNode(usize),
    #[error("failed to decode image: {0}")]
    Image(String),
    #[error("unsupported asset: {0}")]
    Unsupported(String),
}

impl From<gltf::Error> for LoadError {
    fn from(e: gltf::Error) -> Self {
        LoadError::Parse(e.to_string())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetKey {
    Product,
    Case,
    Environment,
    Narration,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AssetRequest {
    pub key: AssetKey,
    /// Every URL belonging to this asset (six for a cube map).
    pub urls: Vec<String>,
}

impl AssetRequest {
    /// Requests that make up a showcase, product first.
    pub fn from_manifest(manifest: &AssetManifest) -> Vec<AssetRequest> {
        let mut out = vec![AssetRequest {
            key: AssetKey::Product,
            urls: vec![manifest.product.url.clone()],
        }];
        if let Some(case) = &manifest.case {
            out.push(AssetRequest {
                key: AssetKey::Case,
                urls: vec![case.url.clone()],
            });
        }
        if let Some(faces) = &manifest.environment {
            out.push(AssetRequest {
                key: AssetKey::Environment,
                urls: faces.to_vec(),
            });
        }
        if let Some(url) = &manifest.narration {
            out.push(AssetRequest {
                key: AssetKey::Narration,
                urls: vec![url.clone()],
            });
        }
        out
    }
}

/// Result of one load; the viewer's completion handlers take this.
#[derive(Debug)]
pub enum LoadOutcome<T> {
    Loaded(T),
    Failed(LoadError),
}

impl<T> From<Result<T, LoadError>> for LoadOutcome<T> {
    fn from(r: Result<T, LoadError>) -> Self {
        match r {
            Ok(v) => LoadOutcome::Loaded(v),
            Err(e) => LoadOutcome::Failed(e),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoadProgress {
    pub loaded: usize,
    pub total: usize,
}

impl LoadProgress {
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.loaded as f32 / self.total as f32
        }
    }

    pub fn percent(&self) -> f32 {
        self.fraction() * 100.0
    }
}

#[derive(Clone, Debug, PartialEq)]
enum ItemState {
    Pending,
    Done,
    Failed(LoadError),
}

/// Counts completions across every URL of every request.
#[derive(Clone, Debug, Default)]
pub struct LoadTracker {
    items: Vec<(String, ItemState)>,
}

impl LoadTracker {
    pub fn new(requests: &[AssetRequest]) -> Self {
        Self {
            items: requests
                .iter()
                .flat_map(|r| r.urls.iter().cloned())
                .map(|u| (u, ItemState::Pending))
                .collect(),
        }
    }

    pub fn progress(&self) -> LoadProgress {
        LoadProgress {
            loaded: self
                .items
                .iter()
                .filter(|(_, s)| *s != ItemState::Pending)
                .count(),
            total: self.items.len(),
        }
    }

    /// Marks `url` done and returns the new progress. Unknown or repeated
    /// URLs leave the counts unchanged.
    pub fn item_loaded(&mut self, url: &str) -> LoadProgress {
        self.settle(url, ItemState::Done)
    }

    pub fn item_failed(&mut self, url: &str, error: LoadError) -> LoadProgress {
        log::error!("[loader] {url}: {error}");
        self.settle(url, ItemState::Failed(error))
    }

    fn settle(&mut self, url: &str, state: ItemState) -> LoadProgress {
        if let Some(slot) = self
            .items
            .iter_mut()
            .find(|(u, s)| u == url && *s == ItemState::Pending)
        {
            slot.1 = state;
        }
        let progress = self.progress();
        log::info!("[loader] {:.0}%", progress.percent());
        progress
    }

    /// Every item has either loaded or failed.
    pub fn is_settled(&self) -> bool {
        self.items.iter().all(|(_, s)| *s != ItemState::Pending)
    }

    pub fn failed(&self) -> Vec<(&str, &LoadError)> {
        self.items
            .iter()
            .filter_map(|(u, s)| match s {
                ItemState::Failed(e) => Some((u.as_str(), e)),
                _ => None,
            })
            .collect()
    }

    /// `url` completed successfully.
    pub fn is_loaded(&self, url: &str) -> bool {
        self.items
            .iter()
            .any(|(u, s)| u == url && *s == ItemState::Done)
    }

    pub fn all_loaded(&self) -> bool {
        self.items.iter().all(|(_, s)| *s == ItemState::Done)
    }
}
