//! Pixel access for the selector.
//!
//! ## Supported Sources
//!
//! - **Flat RGBA bytes**: `(width * y + x) * 4` addressing, the layout of a
//!   browser `ImageData` buffer
//! - **ndarray images**: shape `(height, width, channels)` with 1, 3, or 4
//!   channels; grayscale is replicated into RGB and missing alpha is opaque

use ndarray::{ArrayBase, Data, Ix3};

use super::color::Color;
use crate::error::{Result, SelectError};

/// Read-only access to a rectangular grid of colors.
pub trait ColorGrid {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Color at `(x, y)`. Callers keep `x < width()` and `y < height()`.
    fn color_at(&self, x: usize, y: usize) -> Color;

    #[inline]
    fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as u64) < self.width() as u64 && (y as u64) < self.height() as u64
    }
}

impl<G: ColorGrid + ?Sized> ColorGrid for &G {
    fn width(&self) -> usize {
        (**self).width()
    }

    fn height(&self) -> usize {
        (**self).height()
    }

    fn color_at(&self, x: usize, y: usize) -> Color {
        (**self).color_at(x, y)
    }
}

/// Row-major RGBA bytes, borrowed (`&[u8]`) or owned (`Vec<u8>`).
#[derive(Clone, Copy, Debug)]
pub struct RgbaBuffer<D> {
    data: D,
    width: usize,
    height: usize,
}

impl<D: AsRef<[u8]>> RgbaBuffer<D> {
    pub fn new(data: D, width: usize, height: usize) -> Result<Self> {
        let expected = width
            .checked_mul(height)
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or(SelectError::ImageTooLarge { width, height })?;
        if data.as_ref().len() != expected {
            return Err(SelectError::BufferSize {
                expected,
                actual: data.as_ref().len(),
                width,
                height,
            });
        }
        Ok(Self { data, width, height })
    }

    pub fn data(&self) -> &[u8] {
        self.data.as_ref()
    }

    pub fn into_inner(self) -> D {
        self.data
    }
}

impl<D: AsRef<[u8]>> ColorGrid for RgbaBuffer<D> {
    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn color_at(&self, x: usize, y: usize) -> Color {
        let offset = (self.width * y + x) * 4;
        let data = self.data.as_ref();
        Color::new(data[offset], data[offset + 1], data[offset + 2], data[offset + 3])
    }
}

/// ndarray image of shape `(height, width, channels)`.
pub struct ArrayGrid<'a, S: Data<Elem = u8>> {
    image: &'a ArrayBase<S, Ix3>,
}

impl<'a, S: Data<Elem = u8>> ArrayGrid<'a, S> {
    pub fn new(image: &'a ArrayBase<S, Ix3>) -> Result<Self> {
        match image.dim().2 {
            1 | 3 | 4 => Ok(Self { image }),
            channels => Err(SelectError::UnsupportedChannels(channels)),
        }
    }
}

impl<S: Data<Elem = u8>> ColorGrid for ArrayGrid<'_, S> {
    #[inline]
    fn width(&self) -> usize {
        self.image.dim().1
    }

    #[inline]
    fn height(&self) -> usize {
        self.image.dim().0
    }

    #[inline]
    fn color_at(&self, x: usize, y: usize) -> Color {
        let image = self.image;
        match image.dim().2 {
            1 => {
                let v = image[[y, x, 0]];
                Color::opaque(v, v, v)
            }
            3 => Color::opaque(image[[y, x, 0]], image[[y, x, 1]], image[[y, x, 2]]),
            _ => Color::new(
                image[[y, x, 0]],
                image[[y, x, 1]],
                image[[y, x, 2]],
                image[[y, x, 3]],
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn test_rgba_buffer_unpacks() {
        #[rustfmt::skip]
        let data: [u8; 16] = [
            1, 2, 3, 4,     5, 6, 7, 8,
            9, 10, 11, 12,  13, 14, 15, 16,
        ];
        let grid = RgbaBuffer::new(&data, 2, 2).unwrap();

        assert_eq!(grid.color_at(0, 0), Color::new(1, 2, 3, 4));
        assert_eq!(grid.color_at(1, 0), Color::new(5, 6, 7, 8));
        assert_eq!(grid.color_at(0, 1), Color::new(9, 10, 11, 12));
        assert_eq!(grid.color_at(1, 1), Color::new(13, 14, 15, 16));
    }

    #[test]
    fn test_rgba_buffer_mixed_dimensions() {
        #[rustfmt::skip]
        let data: [u8; 24] = [
            0, 0, 0, 0,  0, 0, 0, 0,  0, 0, 0, 0,
            1, 1, 1, 1,  0, 0, 0, 0,  0, 0, 0, 0,
        ];
        let grid = RgbaBuffer::new(&data, 3, 2).unwrap();
        assert_eq!(grid.color_at(0, 1), Color::new(1, 1, 1, 1));
    }

    #[test]
    fn test_rgba_buffer_rejects_bad_length() {
        let data = [0u8; 15];
        let err = RgbaBuffer::new(&data, 2, 2).unwrap_err();
        assert_eq!(
            err,
            SelectError::BufferSize {
                expected: 16,
                actual: 15,
                width: 2,
                height: 2
            }
        );
    }

    #[test]
    fn test_rgba_buffer_rejects_overflowing_size() {
        let data: [u8; 0] = [];
        assert_eq!(
            RgbaBuffer::new(&data, 65536, usize::MAX / 65536 + 1).unwrap_err(),
            SelectError::ImageTooLarge {
                width: 65536,
                height: usize::MAX / 65536 + 1
            }
        );
        // Wraps to zero on 32-bit targets without the check.
        assert!(RgbaBuffer::new(&data, 1 << 16, 1 << 14).is_err());
    }

    #[test]
    fn test_array_grid_channels() {
        let mut rgb = Array3::<u8>::zeros((2, 3, 3));
        rgb[[1, 2, 0]] = 200;
        let grid = ArrayGrid::new(&rgb).unwrap();
        assert_eq!((grid.width(), grid.height()), (3, 2));
        assert_eq!(grid.color_at(2, 1), Color::opaque(200, 0, 0));

        let mut gray = Array3::<u8>::zeros((2, 2, 1));
        gray[[0, 1, 0]] = 42;
        let grid = ArrayGrid::new(&gray).unwrap();
        assert_eq!(grid.color_at(1, 0), Color::opaque(42, 42, 42));

        let two = Array3::<u8>::zeros((2, 2, 2));
        assert!(matches!(
            ArrayGrid::new(&two),
            Err(SelectError::UnsupportedChannels(2))
        ));
    }

    #[test]
    fn test_in_bounds() {
        let data = [0u8; 4 * 6];
        let grid = RgbaBuffer::new(&data, 3, 2).unwrap();
        assert!(grid.in_bounds(0, 0));
        assert!(grid.in_bounds(2, 1));
        assert!(!grid.in_bounds(3, 1));
        assert!(!grid.in_bounds(0, 2));
        assert!(!grid.in_bounds(-1, 0));
    }
}
