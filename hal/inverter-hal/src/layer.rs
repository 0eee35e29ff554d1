//! Retained layer tree abstractions
//!
//! Layers are rectangles in a tree rooted at a window. Children draw after
//! (on top of) their parent, in insertion order. Two concrete layer kinds are
//! exposed: text layers and inverter layers.

use crate::geometry::{Color, Rect};
use crate::HostError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Handle to a host layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LayerId(u8);

impl LayerId {
    /// Wrap a raw host slot number
    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    /// Get the raw host slot number
    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// System fonts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FontKey {
    /// Small regular font
    Gothic14,
    /// Medium bold font
    Gothic24Bold,
    /// Large bold digits (the clock face font)
    #[default]
    RobotoBoldSubset49,
}

/// Horizontal text alignment within a text layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TextAlignment {
    Left,
    #[default]
    Center,
    Right,
}

/// Visual style of a text layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TextStyle {
    /// Glyph color
    pub color: Color,
    /// Fill behind the text (`Clear` for none)
    pub background: Color,
    /// Font
    pub font: FontKey,
    /// Alignment
    pub alignment: TextAlignment,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::Black,
            background: Color::White,
            font: FontKey::Gothic14,
            alignment: TextAlignment::Left,
        }
    }
}

/// Operations common to every layer kind
pub trait LayerService {
    /// Attach `child` as the topmost child of `parent`
    fn layer_add_child(&mut self, parent: LayerId, child: LayerId) -> Result<(), HostError>;

    /// Get the layer frame (relative to its parent)
    fn layer_frame(&self, layer: LayerId) -> Result<Rect, HostError>;

    /// Move or resize a layer
    fn layer_set_frame(&mut self, layer: LayerId, frame: Rect) -> Result<(), HostError>;
}

/// Text label layers
pub trait TextLayerService: LayerService {
    /// Create an empty text layer
    fn text_layer_create(&mut self, frame: Rect) -> Result<LayerId, HostError>;

    /// Apply color, font and alignment
    fn text_layer_set_style(&mut self, layer: LayerId, style: &TextStyle)
        -> Result<(), HostError>;

    /// Replace the displayed text
    ///
    /// The host copies the text; the caller may reuse its buffer.
    fn text_layer_set_text(&mut self, layer: LayerId, text: &str) -> Result<(), HostError>;

    /// Detach and destroy a text layer
    fn text_layer_destroy(&mut self, layer: LayerId) -> Result<(), HostError>;
}

/// Color-inverting overlay layers
///
/// Every pixel drawn beneath an inverter layer's frame is flipped when the
/// layer is composited.
pub trait InverterLayerService: LayerService {
    /// Create an inverter layer
    fn inverter_layer_create(&mut self, frame: Rect) -> Result<LayerId, HostError>;

    /// Detach and destroy an inverter layer
    fn inverter_layer_destroy(&mut self, layer: LayerId) -> Result<(), HostError>;
}
