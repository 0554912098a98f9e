//! Splits a card image into one vertical strip per reagent.

use hemotype_core::{Reagent, SECTION_COUNT};
use image::{imageops, RgbImage};

use crate::error::VisionError;

/// One vertical strip of a test card.
#[derive(Debug, Clone)]
pub struct Section {
    pub index: usize,
    pub reagent: Reagent,
    /// Left edge in the source image.
    pub x: u32,
    pub image: RgbImage,
}

impl Section {
    pub fn width(&self) -> u32 {
        self.image.width()
    }
}

/// Cuts `image` into three full-height strips.
///
/// The first two strips are `width / 3` wide; the last one runs to the right
/// edge and picks up any remainder.
pub fn split_sections(image: &RgbImage) -> Result<[Section; SECTION_COUNT], VisionError> {
    let (width, height) = image.dimensions();
    if width < SECTION_COUNT as u32 || height == 0 {
        return Err(VisionError::ImageTooSmall { width, height });
    }

    let strip = width / SECTION_COUNT as u32;

    Ok(std::array::from_fn(|i| {
        let x = strip * i as u32;
        let w = if i == SECTION_COUNT - 1 { width - x } else { strip };
        Section {
            index: i,
            reagent: Reagent::ORDER[i],
            x,
            image: imageops::crop_imm(image, x, 0, w, height).to_image(),
        }
    }))
}
