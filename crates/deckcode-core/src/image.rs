/// Errors returned when wrapping a raw pixel buffer.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("pixel buffer length {got} does not match {width}x{height} (expected {expected})")]
    BufferLength {
        width: usize,
        height: usize,
        expected: usize,
        got: usize,
    },
}

/// Borrowed 8-bit image, row-major. Rows run in the physical scan direction.
#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h
}

/// Owned 8-bit image.
///
/// The deck decoder consumes binary images (every pixel `0` or `255`);
/// [`GrayImage::threshold`] turns a cropped grayscale capture into one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

/// Pixel value used for white in binary images.
pub const WHITE: u8 = 255;
/// Pixel value used for black in binary images.
pub const BLACK: u8 = 0;

/// `true` if a pixel counts as white (paper) rather than black (ink).
#[inline]
pub fn is_white(v: u8) -> bool {
    v > 127
}

fn check_len(width: usize, height: usize, got: usize) -> Result<(), ImageError> {
    let expected = width * height;
    if expected != got {
        return Err(ImageError::BufferLength {
            width,
            height,
            expected,
            got,
        });
    }
    Ok(())
}

impl<'a> GrayImageView<'a> {
    pub fn new(width: usize, height: usize, data: &'a [u8]) -> Result<Self, ImageError> {
        check_len(width, height, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Pixels of row `y`. Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: usize) -> &'a [u8] {
        &self.data[y * self.width..(y + 1) * self.width]
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &'a [u8]> + 'a {
        let width = self.width.max(1);
        let data: &'a [u8] = if self.width == 0 { &[] } else { self.data };
        data.chunks_exact(width)
    }
}

impl GrayImage {
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, ImageError> {
        check_len(width, height, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Image filled with a single value.
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    #[inline]
    pub fn view(&self) -> GrayImageView<'_> {
        GrayImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    /// Binarize: values `>= level` become [`WHITE`], everything else [`BLACK`].
    pub fn threshold(&self, level: u8) -> GrayImage {
        let data = self
            .data
            .iter()
            .map(|&v| if v >= level { WHITE } else { BLACK })
            .collect();
        GrayImage {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// `true` if every pixel is `0` or `255`.
    pub fn is_binary(&self) -> bool {
        self.data.iter().all(|&v| v == WHITE || v == BLACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_buffer() {
        let err = GrayImage::new(4, 3, vec![0; 11]).unwrap_err();
        assert_eq!(
            err,
            ImageError::BufferLength {
                width: 4,
                height: 3,
                expected: 12,
                got: 11
            }
        );
        assert!(GrayImageView::new(4, 3, &[0; 12]).is_ok());
    }

    #[test]
    fn rows_follow_row_major_layout() {
        let img = GrayImage::new(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let view = img.view();
        let rows: Vec<&[u8]> = view.rows().collect();
        assert_eq!(rows, vec![&[1, 2, 3][..], &[4, 5, 6][..]]);
        assert_eq!(view.row(1), &[4, 5, 6]);

        let empty = GrayImage::new(0, 5, Vec::new()).unwrap();
        assert_eq!(empty.view().rows().count(), 0);
    }

    #[test]
    fn threshold_produces_binary_image() {
        let img = GrayImage::new(4, 1, vec![0, 61, 62, 200]).unwrap();
        let bin = img.threshold(62);
        assert_eq!(bin.data, vec![0, 0, 255, 255]);
        assert!(bin.is_binary());
        assert!(!img.is_binary());
    }
}
