//! Scene compositor
//!
//! Draws the topmost window into the framebuffer: background first, then the
//! layer tree depth-first with children in insertion order. Text layers are
//! clipped to their frame; inverter layers flip whatever is already drawn
//! under them.

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10, FONT_9X18_BOLD};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use inverter_hal::{Color, FontKey, LayerId, Rect, TextAlignment, TextStyle};

use crate::framebuffer::Framebuffer;
use crate::scene::{LayerKind, Scene};

/// Deepest layer nesting drawn
const MAX_DEPTH: u8 = 4;

/// Monospace stand-in for a system font
pub fn font(key: FontKey) -> &'static MonoFont<'static> {
    match key {
        FontKey::Gothic14 => &FONT_6X10,
        FontKey::Gothic24Bold => &FONT_9X18_BOLD,
        FontKey::RobotoBoldSubset49 => &FONT_10X20,
    }
}

/// Panel color, or `None` for transparent
pub fn binary_color(color: Color) -> Option<BinaryColor> {
    match color {
        Color::Black => Some(BinaryColor::Off),
        Color::White => Some(BinaryColor::On),
        Color::Clear => None,
    }
}

fn to_rectangle(rect: &Rect) -> Rectangle {
    Rectangle::new(
        Point::new(rect.x as i32, rect.y as i32),
        Size::new(rect.w as u32, rect.h as u32),
    )
}

/// Render the topmost window; with no window pushed the screen is blank
pub fn render(scene: &Scene, fb: &mut Framebuffer) {
    let Some((root, background)) = scene.top() else {
        fb.fill(false);
        return;
    };

    fb.fill(binary_color(background) == Some(BinaryColor::On));
    draw_layer(scene, fb, root, 0, 0, 0);
}

fn draw_layer(scene: &Scene, fb: &mut Framebuffer, id: LayerId, dx: i16, dy: i16, depth: u8) {
    let Ok(layer) = scene.layer(id) else {
        return;
    };
    let frame = layer.frame.offset(dx, dy);

    match &layer.kind {
        LayerKind::Root => {}
        LayerKind::Text { style, text } => draw_text(fb, &frame, style, text),
        LayerKind::Inverter => fb.invert_area(&frame),
    }

    if depth >= MAX_DEPTH {
        return;
    }
    for child in layer.children() {
        draw_layer(scene, fb, *child, frame.x, frame.y, depth + 1);
    }
}

fn draw_text(fb: &mut Framebuffer, frame: &Rect, style: &TextStyle, text: &str) {
    if frame.is_empty() {
        return;
    }
    let area = to_rectangle(frame);

    if let Some(fill) = binary_color(style.background) {
        let _ = area.into_styled(PrimitiveStyle::with_fill(fill)).draw(fb);
    }

    let Some(color) = binary_color(style.color) else {
        return;
    };
    if text.is_empty() {
        return;
    }

    let character_style = MonoTextStyleBuilder::new()
        .font(font(style.font))
        .text_color(color)
        .build();
    let (alignment, x) = match style.alignment {
        TextAlignment::Left => (Alignment::Left, frame.x as i32),
        TextAlignment::Center => (Alignment::Center, frame.x as i32 + frame.w as i32 / 2),
        TextAlignment::Right => (Alignment::Right, frame.right()),
    };
    let text_style = TextStyleBuilder::new()
        .alignment(alignment)
        .baseline(Baseline::Top)
        .build();

    let mut clipped = fb.clipped(&area);
    let _ = Text::with_text_style(
        text,
        Point::new(x, frame.y as i32),
        character_style,
        text_style,
    )
    .draw(&mut clipped);
}

#[cfg(test)]
mod tests {
    use super::*;
    use inverter_hal::WindowId;

    const WHITE_TEXT: TextStyle = TextStyle {
        color: Color::White,
        background: Color::Clear,
        font: FontKey::RobotoBoldSubset49,
        alignment: TextAlignment::Center,
    };

    fn window(scene: &mut Scene) -> (WindowId, LayerId) {
        let w = scene.create_window().unwrap();
        scene.push_window(w).unwrap();
        (w, scene.root_layer(w).unwrap())
    }

    fn label(scene: &mut Scene, root: LayerId, frame: Rect, text: &str) -> LayerId {
        let mut s = heapless::String::new();
        s.push_str(text).unwrap();
        let id = scene
            .create_layer(
                frame,
                LayerKind::Text {
                    style: WHITE_TEXT,
                    text: s,
                },
            )
            .unwrap();
        scene.add_child(root, id).unwrap();
        id
    }

    #[test]
    fn test_empty_scene_is_blank() {
        let scene = Scene::new(Framebuffer::bounds());
        let mut fb = Framebuffer::new();
        fb.fill(true);
        render(&scene, &mut fb);
        assert_eq!(fb.lit_pixels(), 0);
    }

    #[test]
    fn test_background_color() {
        let mut scene = Scene::new(Framebuffer::bounds());
        let (w, _) = window(&mut scene);
        let mut fb = Framebuffer::new();

        render(&scene, &mut fb);
        assert_eq!(fb.lit_pixels(), 0);

        scene.set_background(w, Color::White).unwrap();
        render(&scene, &mut fb);
        assert_eq!(fb.lit_pixels(), 128 * 64);
    }

    #[test]
    fn test_text_stays_inside_frame() {
        let mut scene = Scene::new(Framebuffer::bounds());
        let (_, root) = window(&mut scene);
        let frame = Rect::new(0, 16, 128, 32);
        label(&mut scene, root, frame, "09:05");

        let mut fb = Framebuffer::new();
        render(&scene, &mut fb);

        assert!(fb.lit_pixels() > 0);
        for y in 0..64 {
            for x in 0..128 {
                if fb.pixel(x, y) {
                    assert!((16..48).contains(&y), "pixel at ({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn test_inverter_flips_pixels_beneath() {
        let mut scene = Scene::new(Framebuffer::bounds());
        let (_, root) = window(&mut scene);
        label(&mut scene, root, Rect::new(0, 16, 128, 32), "12:00");

        let mut plain = Framebuffer::new();
        render(&scene, &mut plain);

        let inverter = scene
            .create_layer(Framebuffer::bounds(), LayerKind::Inverter)
            .unwrap();
        scene.add_child(root, inverter).unwrap();
        let mut inverted = Framebuffer::new();
        render(&scene, &mut inverted);

        for y in 0..64 {
            for x in 0..128 {
                assert_ne!(plain.pixel(x, y), inverted.pixel(x, y));
            }
        }
    }

    #[test]
    fn test_partial_inverter() {
        let mut scene = Scene::new(Framebuffer::bounds());
        let (_, root) = window(&mut scene);
        let inverter = scene
            .create_layer(Rect::new(0, 63, 128, 64), LayerKind::Inverter)
            .unwrap();
        scene.add_child(root, inverter).unwrap();

        let mut fb = Framebuffer::new();
        render(&scene, &mut fb);
        // Only the top row of the overlay is on screen
        assert_eq!(fb.lit_pixels(), 128);
        assert!(fb.pixel(0, 63));
    }

    #[test]
    fn test_child_frames_are_relative() {
        let mut scene = Scene::new(Framebuffer::bounds());
        let (_, root) = window(&mut scene);
        let outer = scene
            .create_layer(Rect::new(10, 10, 20, 20), LayerKind::Inverter)
            .unwrap();
        let inner = scene
            .create_layer(Rect::new(5, 5, 2, 2), LayerKind::Inverter)
            .unwrap();
        scene.add_child(root, outer).unwrap();
        scene.add_child(outer, inner).unwrap();

        let mut fb = Framebuffer::new();
        render(&scene, &mut fb);
        assert!(fb.pixel(10, 10));
        // Inner overlay flips the outer one back off
        assert!(!fb.pixel(15, 15));
        assert!(!fb.pixel(16, 16));
        assert!(fb.pixel(17, 17));
    }
}
