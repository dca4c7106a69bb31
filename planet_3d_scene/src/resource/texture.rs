/// Texture handles and fire-and-forget texture loading.
///
/// Loading never blocks the frame loop: a `TextureLoader` is handed a request
/// and a channel sender, and reports back later with a `TextureEvent`.
/// `TextureBindings` remembers which material channels wait on which file and
/// patches them in place when the event arrives. A failed load leaves the
/// channel empty, so the material keeps rendering as solid color.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use rustc_hash::{FxHashMap, FxHashSet};
use crate::error::{Error, Result};
use crate::engine_bail;
use crate::resource::material::{MaterialKey, TextureChannel};
use crate::scene::Scene;

static NEXT_TEXTURE_ID: AtomicU64 = AtomicU64::new(1);

// ===== TEXTURE DATA =====

/// Decoded RGBA8 pixels
#[derive(Clone, PartialEq)]
pub struct TextureData {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl TextureData {
    /// Wrap RGBA8 pixels; the buffer must hold exactly width * height * 4 bytes
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 || pixels.len() != expected {
            engine_bail!(InvalidResource; "planet3d::TextureData",
                "Expected {}x{} RGBA8 ({} bytes), got {} bytes",
                width, height, expected, pixels.len());
        }
        Ok(Self { width, height, pixels })
    }

    /// 1x1 texture of a single color
    pub fn solid(rgba: [u8; 4]) -> Self {
        Self { width: 1, height: 1, pixels: rgba.to_vec() }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

impl fmt::Debug for TextureData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextureData")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

// ===== TEXTURE HANDLE =====

/// Opaque, cheaply clonable reference to a loaded texture
#[derive(Clone)]
pub struct TextureHandle {
    id: u64,
    path: PathBuf,
    data: Arc<TextureData>,
}

impl TextureHandle {
    pub fn new(path: impl Into<PathBuf>, data: TextureData) -> Self {
        Self {
            id: NEXT_TEXTURE_ID.fetch_add(1, Ordering::Relaxed),
            path: path.into(),
            data: Arc::new(data),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &TextureData {
        &self.data
    }
}

impl PartialEq for TextureHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Debug for TextureHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TextureHandle(#{} {} {}x{})",
            self.id, self.path.display(), self.data.width, self.data.height)
    }
}

// ===== LOADER =====

/// A texture file to resolve
#[derive(Debug, Clone, PartialEq)]
pub struct TextureRequest {
    pub path: PathBuf,
}

/// Completion report from a loader
#[derive(Debug, Clone)]
pub enum TextureEvent {
    Loaded { path: PathBuf, texture: TextureHandle },
    Failed { path: PathBuf, reason: Error },
}

pub type TextureEventSender = Sender<TextureEvent>;

/// Resolves texture files asynchronously.
///
/// `request` must return immediately. The loader sends exactly one
/// `TextureEvent` per request on `sender`, from any thread.
pub trait TextureLoader {
    fn request(&mut self, request: TextureRequest, sender: TextureEventSender);
}

/// Decodes image files with the `image` crate on a worker thread per request
#[derive(Debug, Default)]
pub struct ThreadedTextureLoader;

impl ThreadedTextureLoader {
    pub fn new() -> Self {
        Self
    }

    /// Blocking decode, shared with tests
    pub fn decode_file(path: &Path) -> Result<TextureData> {
        let image = image::open(path).map_err(|e| {
            Error::ResourceLoad(format!("{}: {}", path.display(), e))
        })?;
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        TextureData::from_rgba8(width, height, rgba.into_raw())
    }
}

impl TextureLoader for ThreadedTextureLoader {
    fn request(&mut self, request: TextureRequest, sender: TextureEventSender) {
        std::thread::spawn(move || {
            let event = match Self::decode_file(&request.path) {
                Ok(data) => TextureEvent::Loaded {
                    texture: TextureHandle::new(request.path.clone(), data),
                    path: request.path,
                },
                Err(reason) => TextureEvent::Failed { path: request.path, reason },
            };
            // The receiver is gone only when the scene was dropped
            let _ = sender.send(event);
        });
    }
}

// ===== BINDINGS =====

/// Outcome of draining the event channel once
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextureUpdate {
    /// Material channels that received a texture
    pub bound: usize,
    /// Files that failed to load
    pub failed: usize,
}

/// Pending texture → material channel bindings
pub struct TextureBindings {
    sender: TextureEventSender,
    receiver: Receiver<TextureEvent>,
    waiting: FxHashMap<PathBuf, Vec<(MaterialKey, TextureChannel)>>,
    requested: FxHashSet<PathBuf>,
    failed: Vec<PathBuf>,
}

impl TextureBindings {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            waiting: FxHashMap::default(),
            requested: FxHashSet::default(),
            failed: Vec::new(),
        }
    }

    /// Register a material channel waiting on `path`
    pub fn bind(&mut self, path: impl Into<PathBuf>, material: MaterialKey, channel: TextureChannel) {
        self.waiting.entry(path.into()).or_default().push((material, channel));
    }

    /// Hand every not-yet-requested file to the loader (one request per file)
    pub fn request_all(&mut self, loader: &mut dyn TextureLoader) -> usize {
        let mut paths: Vec<PathBuf> = self.waiting
            .keys()
            .filter(|p| !self.requested.contains(*p))
            .cloned()
            .collect();
        paths.sort();

        for path in &paths {
            crate::engine_debug!("planet3d::Textures", "Requesting texture '{}'", path.display());
            self.requested.insert(path.clone());
            loader.request(TextureRequest { path: path.clone() }, self.sender.clone());
        }
        paths.len()
    }

    /// Sender for loaders that are driven outside `request_all`
    pub fn sender(&self) -> TextureEventSender {
        self.sender.clone()
    }

    /// Apply every completed load without blocking
    pub fn apply_events(&mut self, scene: &mut Scene) -> TextureUpdate {
        let mut update = TextureUpdate::default();
        loop {
            let event = match self.receiver.try_recv() {
                Ok(event) => event,
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            };
            match event {
                TextureEvent::Loaded { path, texture } => {
                    let Some(targets) = self.waiting.remove(&path) else {
                        crate::engine_debug!("planet3d::Textures",
                            "Texture '{}' loaded but nothing waits on it", path.display());
                        continue;
                    };
                    for (material_key, channel) in targets {
                        match scene.material_mut(material_key) {
                            Some(material) => {
                                material.bind_texture(channel, texture.clone());
                                update.bound += 1;
                                crate::engine_info!("planet3d::Textures",
                                    "Bound '{}' to {}.{}",
                                    path.display(), material.name(), channel.param_name());
                            }
                            None => {
                                crate::engine_warn!("planet3d::Textures",
                                    "Material for '{}' no longer exists", path.display());
                            }
                        }
                    }
                }
                TextureEvent::Failed { path, reason } => {
                    crate::engine_warn!("planet3d::Textures",
                        "Texture '{}' unavailable, keeping untextured fallback: {}",
                        path.display(), reason);
                    self.waiting.remove(&path);
                    self.failed.push(path);
                    update.failed += 1;
                }
            }
        }
        update
    }

    /// Files still waiting for a load event
    pub fn pending_count(&self) -> usize {
        self.waiting.len()
    }

    /// Files whose load failed
    pub fn failed(&self) -> &[PathBuf] {
        &self.failed
    }
}

impl Default for TextureBindings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "texture_tests.rs"]
mod tests;
