//! Training-time image augmentation.
//!
//! Applied to the training split only: random horizontal flip, a small
//! translation, and brightness jitter. Out-of-frame pixels after a
//! translation are left black.

use image::RgbImage;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded augmentation pipeline for one training run.
pub struct Augmenter {
    rng: StdRng,
    max_shift_fraction: f32,
    max_brighten: i32,
}

impl Augmenter {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            max_shift_fraction: 0.1,
            max_brighten: 24,
        }
    }

    /// Apply a random flip, translation, and brightness change.
    /// Dimensions are always preserved.
    pub fn apply(&mut self, image: RgbImage) -> RgbImage {
        let mut out = image;
        if self.rng.random_bool(0.5) {
            out = image::imageops::flip_horizontal(&out);
        }

        let (width, height) = out.dimensions();
        let max_dx = (width as f32 * self.max_shift_fraction) as i32;
        let max_dy = (height as f32 * self.max_shift_fraction) as i32;
        let dx = if max_dx > 0 {
            self.rng.random_range(-max_dx..=max_dx)
        } else {
            0
        };
        let dy = if max_dy > 0 {
            self.rng.random_range(-max_dy..=max_dy)
        } else {
            0
        };
        if dx != 0 || dy != 0 {
            out = translate(&out, dx, dy);
        }

        let delta = self.rng.random_range(-self.max_brighten..=self.max_brighten);
        if delta != 0 {
            out = image::imageops::brighten(&out, delta);
        }
        out
    }
}

fn translate(image: &RgbImage, dx: i32, dy: i32) -> RgbImage {
    let (width, height) = image.dimensions();
    let mut out = RgbImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let sx = x as i32 - dx;
            let sy = y as i32 - dy;
            if (0..width as i32).contains(&sx) && (0..height as i32).contains(&sy) {
                out.put_pixel(x, y, *image.get_pixel(sx as u32, sy as u32));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_image(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x * 8) as u8, (y * 8) as u8, 128])
        })
    }

    #[test]
    fn augmentation_preserves_dimensions() {
        let mut augmenter = Augmenter::new(9);
        for _ in 0..10 {
            let out = augmenter.apply(gradient_image(20, 14));
            assert_eq!(out.dimensions(), (20, 14));
        }
    }

    #[test]
    fn augmentation_is_deterministic_per_seed() {
        let mut first = Augmenter::new(123);
        let mut second = Augmenter::new(123);
        let a = first.apply(gradient_image(16, 16));
        let b = second.apply(gradient_image(16, 16));
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn translate_shifts_content_and_zero_fills() {
        let image = gradient_image(8, 8);
        let shifted = translate(&image, 2, 0);
        assert_eq!(shifted.get_pixel(2, 3), image.get_pixel(0, 3));
        assert_eq!(shifted.get_pixel(0, 0), &image::Rgb([0, 0, 0]));
    }
}
