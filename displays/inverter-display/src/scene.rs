//! Retained window stack and layer tree
//!
//! Windows and layers live in fixed slot tables; handles are slot indices.
//! Each window owns a root layer. Layers form a tree through parent/child
//! links, children drawing after their parent in insertion order.

use heapless::{String, Vec};
use inverter_hal::{Color, HostError, LayerId, Rect, TextStyle, WindowId};

/// Window slots
pub const MAX_WINDOWS: usize = 2;

/// Layer slots, root layers included
pub const MAX_LAYERS: usize = 8;

/// Children per layer
pub const MAX_CHILDREN: usize = 4;

/// Characters a text layer can hold
pub const TEXT_CAPACITY: usize = 16;

/// Kind-specific layer content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerKind {
    /// Window root; draws nothing itself
    Root,
    /// Text label
    Text {
        style: TextStyle,
        text: String<TEXT_CAPACITY>,
    },
    /// Inverts everything drawn beneath it
    Inverter,
}

/// A layer in the tree
#[derive(Debug, Clone)]
pub struct Layer {
    /// Frame relative to the parent
    pub frame: Rect,
    /// Content
    pub kind: LayerKind,
    parent: Option<LayerId>,
    children: Vec<LayerId, MAX_CHILDREN>,
}

impl Layer {
    fn new(frame: Rect, kind: LayerKind) -> Self {
        Self {
            frame,
            kind,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Children in drawing order
    pub fn children(&self) -> &[LayerId] {
        &self.children
    }

    /// Parent layer, if attached
    pub fn parent(&self) -> Option<LayerId> {
        self.parent
    }
}

#[derive(Debug, Clone, Copy)]
struct Window {
    root: LayerId,
    background: Color,
}

/// Window stack plus layer tree
pub struct Scene {
    screen: Rect,
    windows: [Option<Window>; MAX_WINDOWS],
    layers: [Option<Layer>; MAX_LAYERS],
    stack: Vec<WindowId, MAX_WINDOWS>,
    dirty: bool,
}

impl Scene {
    /// Create an empty scene for a screen of the given bounds
    pub fn new(screen: Rect) -> Self {
        Self {
            screen,
            windows: [None; MAX_WINDOWS],
            layers: core::array::from_fn(|_| None),
            stack: Vec::new(),
            dirty: true,
        }
    }

    /// Check if anything visible changed since the last [`Scene::take_dirty`]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Read and clear the dirty flag
    pub fn take_dirty(&mut self) -> bool {
        core::mem::replace(&mut self.dirty, false)
    }

    /// Topmost window and its background, if any window is pushed
    pub fn top(&self) -> Option<(LayerId, Color)> {
        let id = self.stack.last()?;
        let window = self.windows[id.raw() as usize].as_ref()?;
        Some((window.root, window.background))
    }

    // Windows

    pub fn create_window(&mut self) -> Result<WindowId, HostError> {
        let index = self
            .windows
            .iter()
            .position(Option::is_none)
            .ok_or(HostError::OutOfResources)?;
        let root = self.alloc(Layer::new(self.screen, LayerKind::Root))?;
        self.windows[index] = Some(Window {
            root,
            background: Color::Black,
        });
        Ok(WindowId::new(index as u8))
    }

    pub fn push_window(&mut self, window: WindowId) -> Result<(), HostError> {
        self.window(window)?;
        self.stack.retain(|w| *w != window);
        self.stack
            .push(window)
            .map_err(|_| HostError::OutOfResources)?;
        self.dirty = true;
        Ok(())
    }

    pub fn set_background(&mut self, window: WindowId, color: Color) -> Result<(), HostError> {
        self.window_mut(window)?.background = color;
        self.dirty = true;
        Ok(())
    }

    pub fn root_layer(&self, window: WindowId) -> Result<LayerId, HostError> {
        Ok(self.window(window)?.root)
    }

    /// Destroy a window and its root layer
    ///
    /// Layers still attached to the root are detached but stay alive; their
    /// owner destroys them.
    pub fn destroy_window(&mut self, window: WindowId) -> Result<(), HostError> {
        let root = self.window(window)?.root;
        self.free(root)?;
        self.windows[window.raw() as usize] = None;
        self.stack.retain(|w| *w != window);
        self.dirty = true;
        Ok(())
    }

    // Layers

    pub fn create_layer(&mut self, frame: Rect, kind: LayerKind) -> Result<LayerId, HostError> {
        self.alloc(Layer::new(frame, kind))
    }

    pub fn layer(&self, layer: LayerId) -> Result<&Layer, HostError> {
        self.layers
            .get(layer.raw() as usize)
            .and_then(Option::as_ref)
            .ok_or(HostError::InvalidHandle)
    }

    /// Mutable access; marks the scene dirty
    pub fn layer_mut(&mut self, layer: LayerId) -> Result<&mut Layer, HostError> {
        self.dirty = true;
        self.layers
            .get_mut(layer.raw() as usize)
            .and_then(Option::as_mut)
            .ok_or(HostError::InvalidHandle)
    }

    /// Attach `child` on top of `parent`'s children, detaching it first
    pub fn add_child(&mut self, parent: LayerId, child: LayerId) -> Result<(), HostError> {
        if parent == child {
            return Err(HostError::InvalidHandle);
        }
        self.layer(parent)?;
        if self.layer(child)?.kind == LayerKind::Root {
            return Err(HostError::WrongLayerKind);
        }

        self.detach(child);
        self.layer_mut(parent)?
            .children
            .push(child)
            .map_err(|_| HostError::OutOfResources)?;
        self.layer_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Destroy a non-root layer, checking its kind
    pub fn destroy_layer(
        &mut self,
        layer: LayerId,
        matches: fn(&LayerKind) -> bool,
    ) -> Result<(), HostError> {
        if !matches(&self.layer(layer)?.kind) {
            return Err(HostError::WrongLayerKind);
        }
        self.free(layer)
    }

    fn alloc(&mut self, layer: Layer) -> Result<LayerId, HostError> {
        let index = self
            .layers
            .iter()
            .position(Option::is_none)
            .ok_or(HostError::OutOfResources)?;
        self.layers[index] = Some(layer);
        Ok(LayerId::new(index as u8))
    }

    fn free(&mut self, layer: LayerId) -> Result<(), HostError> {
        self.detach(layer);
        let freed = self.layers[layer.raw() as usize]
            .take()
            .ok_or(HostError::InvalidHandle)?;
        for child in freed.children {
            if let Some(Some(c)) = self.layers.get_mut(child.raw() as usize) {
                c.parent = None;
            }
        }
        self.dirty = true;
        Ok(())
    }

    fn detach(&mut self, layer: LayerId) {
        let parent = self
            .layers
            .get(layer.raw() as usize)
            .and_then(Option::as_ref)
            .and_then(|l| l.parent);
        if let Some(parent) = parent {
            if let Some(Some(p)) = self.layers.get_mut(parent.raw() as usize) {
                p.children.retain(|c| *c != layer);
            }
            if let Some(Some(l)) = self.layers.get_mut(layer.raw() as usize) {
                l.parent = None;
            }
        }
    }

    fn window(&self, window: WindowId) -> Result<&Window, HostError> {
        self.windows
            .get(window.raw() as usize)
            .and_then(Option::as_ref)
            .ok_or(HostError::InvalidHandle)
    }

    fn window_mut(&mut self, window: WindowId) -> Result<&mut Window, HostError> {
        self.windows
            .get_mut(window.raw() as usize)
            .and_then(Option::as_mut)
            .ok_or(HostError::InvalidHandle)
    }
}
