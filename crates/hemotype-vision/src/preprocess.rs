//! Conversion of a card section into the classifier's input tensor.

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage};
use rten_tensor::NdTensor;

/// Side length of the square model input.
pub const MODEL_INPUT_SIZE: u32 = 224;

/// Builds a `[1, 224, 224, 3]` NHWC tensor with values in `[0, 1]`.
///
/// Single-channel images are replicated across the three color channels.
pub fn to_model_input(image: &DynamicImage) -> NdTensor<f32, 4> {
    rgb_to_model_input(&image.to_rgb8())
}

pub(crate) fn rgb_to_model_input(image: &RgbImage) -> NdTensor<f32, 4> {
    let size = MODEL_INPUT_SIZE as usize;
    let resized = imageops::resize(image, MODEL_INPUT_SIZE, MODEL_INPUT_SIZE, FilterType::CatmullRom);

    let mut tensor = NdTensor::zeros([1, size, size, 3]);
    for (x, y, pixel) in resized.enumerate_pixels() {
        for c in 0..3 {
            tensor[[0, y as usize, x as usize, c]] = pixel[c] as f32 / 255.0;
        }
    }
    tensor
}
