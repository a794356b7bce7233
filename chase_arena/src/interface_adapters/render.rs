// Software renderer: blits sprites onto an RGBA frame and records text overlays.

use crate::domain::{Entity, GameInfo, Renderer, Vec2};
use image::{Rgba, RgbaImage, imageops};

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Text placed on the frame, centered on `center`. Glyphs are not rasterised.
#[derive(Debug, Clone, PartialEq)]
pub struct TextOverlay {
    pub text: String,
    pub center: Vec2,
}

/// Drawing surface for one frame.
#[derive(Debug)]
pub struct Frame {
    pixels: RgbaImage,
    overlays: Vec<TextOverlay>,
}

impl Frame {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, BACKGROUND),
            overlays: Vec::new(),
        }
    }

    /// Fills the frame with the background and drops last frame's overlays.
    pub fn clear(&mut self) {
        for pixel in self.pixels.pixels_mut() {
            *pixel = BACKGROUND;
        }
        self.overlays.clear();
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn overlays(&self) -> &[TextOverlay] {
        &self.overlays
    }
}

#[derive(Debug, Default)]
pub struct CanvasRenderer;

impl Renderer for CanvasRenderer {
    type Surface = Frame;

    fn render_entity(&mut self, entity: &Entity, frame: &mut Frame) {
        let sprite = entity.sprite.pixels();
        imageops::overlay(
            &mut frame.pixels,
            &*sprite,
            entity.rect.x.round() as i64,
            entity.rect.y.round() as i64,
        );
    }

    fn render_game_info(&mut self, info: &GameInfo, frame: &mut Frame) {
        let width = frame.width() as f32;
        let height = frame.height() as f32;
        if info.game_over {
            frame.overlays.push(TextOverlay {
                text: "SKILL ISSUE".to_string(),
                center: Vec2::new(width / 2.0, height / 2.0),
            });
        }
        frame.overlays.push(TextOverlay {
            text: info.kills.to_string(),
            center: Vec2::new(width - 200.0, 100.0),
        });
    }
}
