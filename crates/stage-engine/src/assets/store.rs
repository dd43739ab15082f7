use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::de::DeserializeOwned;

use crate::core::area::Area2D;
use crate::error::AssetError;

/// Identifies a texture for the graphics collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureId(pub u32);

/// Metadata for a texture decoded by the host. Pixels live with the host.
#[derive(Debug, PartialEq, Eq)]
pub struct Texture {
    pub id: TextureId,
    pub name: String,
    pub size: Area2D,
}

/// Shared, reference-counted texture reference.
///
/// Cloning is cheap. Dropping a handle releases only that reference; the
/// texture stays registered until the [`AssetStore`] releases it too.
#[derive(Debug, Clone)]
pub struct TextureHandle(Rc<Texture>);

impl TextureHandle {
    pub fn id(&self) -> TextureId {
        self.0.id
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn size(&self) -> Area2D {
        self.0.size
    }

    /// Whether both handles point at the same registered texture.
    pub fn same_texture(&self, other: &TextureHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Owner of shared textures and entry point for descriptor loading.
pub struct AssetStore {
    root: PathBuf,
    textures: HashMap<String, TextureHandle>,
    next_id: u32,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            textures: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Register a texture the host has decoded. Registering an existing name
    /// returns the existing handle unchanged.
    pub fn register_texture(&mut self, name: impl Into<String>, size: Area2D) -> TextureHandle {
        let name = name.into();
        if let Some(existing) = self.textures.get(&name) {
            if existing.size() != size {
                log::warn!(
                    "texture `{name}` already registered as {}, ignoring new size {size}",
                    existing.size()
                );
            }
            return existing.clone();
        }
        let id = TextureId(self.next_id);
        self.next_id += 1;
        log::debug!("registered texture `{name}` as {id:?} ({size})");
        let handle = TextureHandle(Rc::new(Texture {
            id,
            name: name.clone(),
            size,
        }));
        self.textures.insert(name, handle.clone());
        handle
    }

    /// Look up a registered texture.
    pub fn texture(&self, name: &str) -> Result<TextureHandle, AssetError> {
        self.textures
            .get(name)
            .cloned()
            .ok_or_else(|| AssetError::TextureNotFound(name.to_string()))
    }

    /// Number of handles held outside the store, or `None` if unregistered.
    pub fn users(&self, name: &str) -> Option<usize> {
        self.textures.get(name).map(|h| Rc::strong_count(&h.0) - 1)
    }

    /// Drop the store's reference. Sprites still holding clones keep the
    /// texture alive until they are dropped.
    pub fn release(&mut self, name: &str) -> bool {
        self.textures.remove(name).is_some()
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Release every texture reference held by the store.
    pub fn unload(&mut self) {
        log::debug!("unloading {} textures", self.textures.len());
        self.textures.clear();
    }

    /// Read a JSON descriptor relative to the content root.
    pub fn load_json<T: DeserializeOwned>(&self, path: impl AsRef<Path>) -> Result<T, AssetError> {
        let path = self.root.join(path);
        let text = fs::read_to_string(&path).map_err(|source| AssetError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| AssetError::Json { path, source })
    }
}

impl Default for AssetStore {
    fn default() -> Self {
        Self::new("Content")
    }
}
