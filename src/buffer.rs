use std::error;
use std::fmt;
use std::slice;

use crate::pixel::Pixel;

/// A fixed-size grid of pixels stored in row-major order.
///
/// Row 0 is the top of the image. The buffer is created zeroed and its dimensions never change;
/// the only way to mutate it is to overwrite individual pixels with [`PixelBuffer::set`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PixelBuffer {
    width: i32,
    height: i32,
    pixels: Vec<Pixel>,
}

impl PixelBuffer {
    /// Allocates a new buffer of `width * height` pixels, with every channel of every pixel set to
    /// zero. Returns a `DimensionError` if either dimension is not positive, or if the buffer is too
    /// large to allocate.
    pub fn new(width: i32, height: i32) -> Result<Self, DimensionError> {
        if width <= 0 || height <= 0 {
            return Err(DimensionError::new(width, height, DimensionErrorKind::NonPositive));
        }

        let too_large = || DimensionError::new(width, height, DimensionErrorKind::TooLarge);

        let num_pixels = usize::try_from(width)
            .ok()
            .zip(usize::try_from(height).ok())
            .and_then(|(w, h)| w.checked_mul(h))
            .ok_or_else(too_large)?;

        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(num_pixels)
            .map_err(|_| too_large())?;
        pixels.resize(num_pixels, Pixel::ZERO);

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub const fn width(&self) -> i32 {
        self.width
    }

    pub const fn height(&self) -> i32 {
        self.height
    }

    pub const fn dimensions(&self) -> (i32, i32) {
        (self.width(), self.height())
    }

    /// All of the pixels, row by row from the top.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn get(&self, row: i32, column: i32) -> Result<Pixel, BoundsError> {
        self.offset(row, column).map(|i| self.pixels[i])
    }

    pub fn set(&mut self, row: i32, column: i32, pixel: Pixel) -> Result<(), BoundsError> {
        let i = self.offset(row, column)?;
        self.pixels[i] = pixel;
        Ok(())
    }

    /// Returns the pixels of a single row, left to right.
    pub fn row(&self, row: i32) -> Result<&[Pixel], BoundsError> {
        let start = self.offset(row, 0)?;
        Ok(&self.pixels[start..start + self.row_len()])
    }

    /// Iterates over the rows of the buffer from top to bottom. The iterator is double-ended, so
    /// `rows().rev()` visits the rows in the order they are stored in a bottom-up bitmap.
    pub fn rows(&self) -> Rows<'_> {
        Rows {
            inner: self.pixels.chunks_exact(self.row_len()),
        }
    }

    #[inline]
    fn row_len(&self) -> usize {
        // Positive by construction.
        self.width as usize
    }

    #[inline]
    fn offset(&self, row: i32, column: i32) -> Result<usize, BoundsError> {
        if (0..self.height).contains(&row) && (0..self.width).contains(&column) {
            Ok(row as usize * self.row_len() + column as usize)
        } else {
            Err(BoundsError {
                row,
                column,
                width: self.width,
                height: self.height,
            })
        }
    }
}

pub struct Rows<'a> {
    inner: slice::ChunksExact<'a, Pixel>,
}

impl<'a> Iterator for Rows<'a> {
    type Item = &'a [Pixel];

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> DoubleEndedIterator for Rows<'a> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<'a> ExactSizeIterator for Rows<'a> {}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum DimensionErrorKind {
    /// The width or height was zero or negative.
    NonPositive,
    /// The image does not fit in memory or in the fields of a bitmap header.
    TooLarge,
}

#[derive(Debug)]
pub struct DimensionError {
    width: i32,
    height: i32,
    kind: DimensionErrorKind,
}

impl DimensionError {
    pub(crate) fn new(width: i32, height: i32, kind: DimensionErrorKind) -> Self {
        Self {
            width,
            height,
            kind,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn kind(&self) -> DimensionErrorKind {
        self.kind
    }
}

impl fmt::Display for DimensionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DimensionErrorKind::NonPositive => write!(
                f,
                "invalid dimensions {}x{}, width and height must be positive",
                self.width, self.height
            ),
            DimensionErrorKind::TooLarge => {
                write!(f, "image dimensions {}x{} too large", self.width, self.height)
            }
        }
    }
}

impl error::Error for DimensionError {}

#[derive(Debug)]
pub struct BoundsError {
    row: i32,
    column: i32,
    width: i32,
    height: i32,
}

impl BoundsError {
    pub fn row(&self) -> i32 {
        self.row
    }

    pub fn column(&self) -> i32 {
        self.column
    }

    /// The dimensions of the buffer that was accessed.
    pub fn dimensions(&self) -> (i32, i32) {
        (self.width, self.height)
    }
}

impl fmt::Display for BoundsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pixel (row {}, column {}) out of bounds for {}x{} buffer",
            self.row, self.column, self.width, self.height
        )
    }
}

impl error::Error for BoundsError {}

#[cfg(test)]
mod tests {
    use super::{DimensionErrorKind, PixelBuffer};
    use crate::pixel::Pixel;

    #[test]
    fn new_is_zeroed() {
        for &(w, h) in &[(1, 1), (3, 2), (2, 3), (17, 5)] {
            let buf = PixelBuffer::new(w, h).unwrap();
            assert_eq!(buf.dimensions(), (w, h));
            assert_eq!(buf.pixels().len(), (w * h) as usize);
            for row in 0..h {
                for column in 0..w {
                    assert_eq!(buf.get(row, column).unwrap(), Pixel::ZERO);
                }
            }
        }
    }

    #[test]
    fn new_rejects_non_positive() {
        for &(w, h) in &[(0, 4), (4, 0), (-1, 5), (5, -1), (0, 0), (i32::MIN, 1)] {
            let err = PixelBuffer::new(w, h).unwrap_err();
            assert_eq!(err.kind(), DimensionErrorKind::NonPositive);
            assert_eq!((err.width(), err.height()), (w, h));
        }
    }

    #[test]
    fn set_then_get() {
        let mut buf = PixelBuffer::new(4, 3).unwrap();
        let px = Pixel::new(255, 10, 20, 30);
        buf.set(2, 3, px).unwrap();
        buf.set(0, 1, Pixel::BLACK).unwrap();

        assert_eq!(buf.get(2, 3).unwrap(), px);
        assert_eq!(buf.get(0, 1).unwrap(), Pixel::BLACK);
        assert_eq!(buf.get(1, 1).unwrap(), Pixel::ZERO);

        // row * width + column
        assert_eq!(buf.pixels()[2 * 4 + 3], px);
        assert_eq!(buf.pixels()[1], Pixel::BLACK);
    }

    #[test]
    fn out_of_bounds() {
        let mut buf = PixelBuffer::new(4, 3).unwrap();
        for &(row, column) in &[(3, 0), (0, 4), (-1, 0), (0, -1), (3, 4), (i32::MAX, i32::MAX)] {
            let err = buf.get(row, column).unwrap_err();
            assert_eq!((err.row(), err.column()), (row, column));
            assert_eq!(err.dimensions(), (4, 3));
            assert!(buf.set(row, column, Pixel::BLACK).is_err());
        }
        assert!(buf.pixels().iter().all(|&px| px == Pixel::ZERO));
    }

    #[test]
    fn rows_top_to_bottom() {
        let mut buf = PixelBuffer::new(2, 3).unwrap();
        for row in 0..3 {
            buf.set(row, 1, Pixel::new(row as u8, 0, 0, 0)).unwrap();
        }

        let rows: Vec<_> = buf.rows().collect();
        assert_eq!(rows.len(), 3);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), 2);
            assert_eq!(row[1].a, i as u8);
            assert_eq!(*row, buf.row(i as i32).unwrap());
        }

        let last = buf.rows().rev().next().unwrap();
        assert_eq!(last[1].a, 2);
        assert!(buf.row(3).is_err());
    }
}
