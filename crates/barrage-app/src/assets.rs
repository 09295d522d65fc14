//! Asset manifest and the loading stage.
//!
//! The simulation only refers to assets by key. An `AssetProvider` turns
//! keys into handles; the loading stage walks the whole manifest before the
//! shell tells the engine that assets are ready.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use barrage_core::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Skeleton,
    Sound,
    Image,
}

impl AssetKind {
    fn extension(self) -> &'static str {
        match self {
            AssetKind::Skeleton => "skel",
            AssetKind::Sound => "wav",
            AssetKind::Image => "png",
        }
    }
}

/// A resolved asset. `path` is `None` for providers without a backing
/// directory.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetHandle {
    pub key: String,
    pub kind: AssetKind,
    pub path: Option<PathBuf>,
    pub bytes: u64,
}

/// Every asset the game uses.
pub fn manifest() -> Vec<(&'static str, AssetKind)> {
    let mut entries = vec![
        (VISUAL_CITY, AssetKind::Skeleton),
        (VISUAL_TURRET, AssetKind::Skeleton),
        (VISUAL_MISSILE, AssetKind::Skeleton),
        (VISUAL_PLANE, AssetKind::Skeleton),
        (VISUAL_EXPLOSION, AssetKind::Skeleton),
        (SOUND_MISSILE, AssetKind::Sound),
        (SOUND_EXPLOSION, AssetKind::Sound),
        (SOUND_CITY, AssetKind::Sound),
    ];
    entries.extend(PRODUCE_SPRITES.iter().map(|&key| (key, AssetKind::Image)));
    entries
}

pub trait AssetProvider {
    /// Resolve one manifest key.
    fn load(&mut self, key: &str) -> Result<AssetHandle>;
    /// Fraction of the manifest loaded so far, in [0, 1].
    fn progress(&self) -> f64;
}

/// Resolves the manifest against an optional data directory. Without a
/// directory every key resolves to a virtual handle.
pub struct ManifestAssets {
    data_dir: Option<PathBuf>,
    entries: Vec<(&'static str, AssetKind)>,
    loaded: Vec<AssetHandle>,
}

impl ManifestAssets {
    pub fn new(data_dir: Option<PathBuf>) -> Self {
        Self {
            data_dir,
            entries: manifest(),
            loaded: Vec::new(),
        }
    }

    pub fn loaded(&self) -> &[AssetHandle] {
        &self.loaded
    }

    fn file_for(dir: &Path, key: &str, kind: AssetKind) -> PathBuf {
        let path = dir.join(key);
        if path.extension().is_some() {
            path
        } else {
            path.with_extension(kind.extension())
        }
    }
}

impl AssetProvider for ManifestAssets {
    fn load(&mut self, key: &str) -> Result<AssetHandle> {
        if let Some(handle) = self.loaded.iter().find(|h| h.key == key) {
            return Ok(handle.clone());
        }
        let kind = self
            .entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, kind)| *kind)
            .ok_or_else(|| anyhow!("unknown asset key: {key}"))?;

        let (path, bytes) = match &self.data_dir {
            Some(dir) => {
                let path = Self::file_for(dir, key, kind);
                let meta = std::fs::metadata(&path)
                    .with_context(|| format!("missing asset {key} at {}", path.display()))?;
                (Some(path), meta.len())
            }
            None => (None, 0),
        };

        let handle = AssetHandle {
            key: key.to_string(),
            kind,
            path,
            bytes,
        };
        self.loaded.push(handle.clone());
        Ok(handle)
    }

    fn progress(&self) -> f64 {
        if self.entries.is_empty() {
            1.0
        } else {
            self.loaded.len() as f64 / self.entries.len() as f64
        }
    }
}

/// Load every manifest entry, stopping at the first failure.
pub fn load_all(provider: &mut dyn AssetProvider) -> Result<Vec<AssetHandle>> {
    let mut handles = Vec::new();
    for (key, _) in manifest() {
        let handle = provider
            .load(key)
            .context("asset loading failed")?;
        tracing::debug!(key, progress = provider.progress(), "Asset loaded");
        handles.push(handle);
    }
    tracing::info!(count = handles.len(), "All assets loaded");
    Ok(handles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_virtual_manifest_loads() {
        let mut assets = ManifestAssets::new(None);
        assert_eq!(assets.progress(), 0.0);
        let handles = load_all(&mut assets).unwrap();
        assert_eq!(handles.len(), 14);
        assert_eq!(assets.progress(), 1.0);
        assert!(handles.iter().all(|h| h.path.is_none()));
    }

    #[test]
    fn test_unknown_key_errors() {
        let mut assets = ManifestAssets::new(None);
        let err = assets.load("spine/submarine").unwrap_err();
        assert!(err.to_string().contains("unknown asset key"));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let dir = std::env::temp_dir().join("barrage-assets-missing");
        let mut assets = ManifestAssets::new(Some(dir));
        let err = assets.load(VISUAL_CITY).unwrap_err();
        assert!(format!("{err:#}").contains("missing asset spine/city"));
    }

    #[test]
    fn test_file_extensions() {
        let dir = Path::new("/data");
        assert_eq!(
            ManifestAssets::file_for(dir, "spine/city", AssetKind::Skeleton),
            PathBuf::from("/data/spine/city.skel")
        );
        assert_eq!(
            ManifestAssets::file_for(dir, "sfx/city.wav", AssetKind::Sound),
            PathBuf::from("/data/sfx/city.wav")
        );
    }
}
