use crate::buffer::{DimensionError, DimensionErrorKind};

/// Byte offset of the pixel data in files written by this crate: the two headers and nothing else.
pub const PIXEL_DATA_OFFSET: u32 = (FileHeader::SIZE + InfoHeader::SIZE) as u32;

/// The BITMAPFILEHEADER which starts every bitmap file.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FileHeader {
    pub(crate) file_size: u32,
    pub(crate) pixel_data_offset: u32,
}

impl FileHeader {
    pub const MAGIC: [u8; 2] = *b"BM";
    pub const SIZE: usize = 14;

    pub const fn new(file_size: u32, pixel_data_offset: u32) -> Self {
        Self {
            file_size,
            pixel_data_offset,
        }
    }

    pub const fn file_size(&self) -> u32 {
        self.file_size
    }

    pub const fn pixel_data_offset(&self) -> u32 {
        self.pixel_data_offset
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut a = [0; Self::SIZE];
        a[0..2].copy_from_slice(&Self::MAGIC);
        a[2..6].copy_from_slice(&self.file_size.to_le_bytes());
        // Two reserved u16s left as zero
        a[10..14].copy_from_slice(&self.pixel_data_offset.to_le_bytes());
        a
    }
}

/// A BITMAPINFOHEADER describing an uncompressed, bottom-up, 32 bits per pixel image.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct InfoHeader {
    pub(crate) width: i32,
    pub(crate) height: i32,
    pub(crate) image_size: u32,
}

impl InfoHeader {
    pub const SIZE: usize = 40;
    pub const PLANES: u16 = 1;
    pub const BITS_PER_PIXEL: u16 = 32;
    pub const BYTES_PER_PIXEL: u32 = Self::BITS_PER_PIXEL as u32 / 8;
    /// BI_RGB
    pub const COMPRESSION_NONE: u32 = 0;

    pub const fn new(width: i32, height: i32, image_size: u32) -> Self {
        Self {
            width,
            height,
            image_size,
        }
    }

    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Positive, so rows are stored bottom-up.
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Size in bytes of the pixel data which follows the headers.
    pub const fn image_size(&self) -> u32 {
        self.image_size
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut a = [0; Self::SIZE];
        a[0..4].copy_from_slice(&(Self::SIZE as u32).to_le_bytes());
        a[4..8].copy_from_slice(&self.width.to_le_bytes());
        a[8..12].copy_from_slice(&self.height.to_le_bytes());
        a[12..14].copy_from_slice(&Self::PLANES.to_le_bytes());
        a[14..16].copy_from_slice(&Self::BITS_PER_PIXEL.to_le_bytes());
        a[16..20].copy_from_slice(&Self::COMPRESSION_NONE.to_le_bytes());
        a[20..24].copy_from_slice(&self.image_size.to_le_bytes());
        // Resolution, colors used and important colors are all left as zero
        a
    }
}

/// Builds the pair of headers for an image with the given dimensions. Fails if the dimensions are
/// not positive, or if the resulting file would be too large for the 32-bit size fields.
pub fn headers_for(width: i32, height: i32) -> Result<(FileHeader, InfoHeader), DimensionError> {
    if width <= 0 || height <= 0 {
        return Err(DimensionError::new(width, height, DimensionErrorKind::NonPositive));
    }

    let image_size = u64::from(width.unsigned_abs())
        * u64::from(height.unsigned_abs())
        * u64::from(InfoHeader::BYTES_PER_PIXEL);

    let file_size = image_size + u64::from(PIXEL_DATA_OFFSET);

    match (u32::try_from(image_size), u32::try_from(file_size)) {
        (Ok(image_size), Ok(file_size)) => Ok((
            FileHeader::new(file_size, PIXEL_DATA_OFFSET),
            InfoHeader::new(width, height, image_size),
        )),
        _ => Err(DimensionError::new(width, height, DimensionErrorKind::TooLarge)),
    }
}

#[cfg(test)]
mod tests {
    use super::{headers_for, FileHeader, InfoHeader, PIXEL_DATA_OFFSET};
    use crate::buffer::DimensionErrorKind;

    #[test]
    fn file_header_layout() {
        let bytes = FileHeader::new(58, PIXEL_DATA_OFFSET).to_bytes();
        assert_eq!(
            bytes,
            [b'B', b'M', 58, 0, 0, 0, 0, 0, 0, 0, 54, 0, 0, 0]
        );
    }

    #[test]
    fn info_header_layout() {
        let bytes = InfoHeader::new(2, 3, 24).to_bytes();
        let expected: [u8; 40] = [
            40, 0, 0, 0, // header size
            2, 0, 0, 0, // width
            3, 0, 0, 0, // height
            1, 0, // planes
            32, 0, // bits per pixel
            0, 0, 0, 0, // compression
            24, 0, 0, 0, // image size
            0, 0, 0, 0, 0, 0, 0, 0, // resolution
            0, 0, 0, 0, 0, 0, 0, 0, // palette
        ];
        assert_eq!(bytes, expected);
    }

    #[test]
    fn sizes() {
        let (file, info) = headers_for(640, 480).unwrap();
        assert_eq!(info.image_size(), 640 * 480 * 4);
        assert_eq!(file.file_size(), 640 * 480 * 4 + 54);
        assert_eq!(file.pixel_data_offset(), 54);
        assert_eq!((info.width(), info.height()), (640, 480));
    }

    #[test]
    fn too_large_for_header() {
        let err = headers_for(i32::MAX, i32::MAX).unwrap_err();
        assert_eq!(err.kind(), DimensionErrorKind::TooLarge);

        // 32768 * 32768 * 4 == 2^32, which leaves no room for the file size
        let err = headers_for(32768, 32768).unwrap_err();
        assert_eq!(err.kind(), DimensionErrorKind::TooLarge);

        let err = headers_for(0, 1).unwrap_err();
        assert_eq!(err.kind(), DimensionErrorKind::NonPositive);
    }
}
