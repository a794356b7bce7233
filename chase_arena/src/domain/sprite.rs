// Visual resource handle. Opaque to the simulation; cloning shares the pixels.

use image::{Rgba, RgbaImage};
use std::cell::{Ref, RefCell};
use std::rc::Rc;

#[derive(Debug)]
struct SpriteData {
    label: String,
    pixels: RgbaImage,
}

/// Shared, mutable sprite. Every clone of a `Sprite` points at the same image,
/// so an edit through one handle is visible through all of them.
#[derive(Debug, Clone)]
pub struct Sprite {
    inner: Rc<RefCell<SpriteData>>,
}

impl Sprite {
    pub fn new(label: impl Into<String>, pixels: RgbaImage) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SpriteData {
                label: label.into(),
                pixels,
            })),
        }
    }

    /// Solid-colour sprite, used for tests and when art is missing.
    pub fn solid(label: impl Into<String>, width: u32, height: u32, color: [u8; 4]) -> Self {
        Self::new(label, RgbaImage::from_pixel(width, height, Rgba(color)))
    }

    pub fn label(&self) -> String {
        self.inner.borrow().label.clone()
    }

    pub fn size(&self) -> (u32, u32) {
        self.inner.borrow().pixels.dimensions()
    }

    /// Borrows the pixel buffer for drawing.
    pub fn pixels(&self) -> Ref<'_, RgbaImage> {
        Ref::map(self.inner.borrow(), |data| &data.pixels)
    }

    /// Multiplies every pixel by `color`, channel-wise.
    pub fn tint(&self, color: [u8; 4]) {
        let mut data = self.inner.borrow_mut();
        for pixel in data.pixels.pixels_mut() {
            for (channel, factor) in pixel.0.iter_mut().zip(color) {
                *channel = ((u16::from(*channel) * u16::from(factor)) / 255) as u8;
            }
        }
    }

    /// True when both handles share the same underlying image.
    pub fn shares_pixels_with(&self, other: &Sprite) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}
