use std::error;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::{debug, trace};

use crate::buffer::{DimensionError, DimensionErrorKind, PixelBuffer};
use crate::header::{self, InfoHeader};

/// Writes `buffer` to a new 32-bit BMP file at `path`, replacing any existing file.
///
/// If an IO error occurs part way through, the file at `path` may be left incomplete. Writing to
/// the same path from several places at once leaves whichever writer finished last, possibly mixed
/// with the others' output.
pub fn write<P>(path: P, buffer: &PixelBuffer) -> Result<(), EncodeError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();

    // Check the dimensions before touching the filesystem
    let (file_header, _) = header::headers_for(buffer.width(), buffer.height())?;

    debug!(
        "writing {}x{} bitmap ({} bytes) to {}",
        buffer.width(),
        buffer.height(),
        file_header.file_size(),
        path.display()
    );

    let file = File::create(path)?;
    let mut encoder = Encoder::new(BufWriter::new(file));
    encoder.encode(buffer)?;

    let file = encoder
        .into_inner()
        .into_inner()
        .map_err(io::IntoInnerError::into_error)?;
    file.sync_all()?;

    Ok(())
}

/// Encodes `buffer` as a complete BMP file held in memory.
pub fn encode_to_vec(buffer: &PixelBuffer) -> Result<Vec<u8>, EncodeError> {
    let (file_header, _) = header::headers_for(buffer.width(), buffer.height())?;

    let too_large =
        || DimensionError::new(buffer.width(), buffer.height(), DimensionErrorKind::TooLarge);

    let len = usize::try_from(file_header.file_size()).map_err(|_| too_large())?;

    let mut bytes = Vec::new();
    bytes.try_reserve_exact(len).map_err(|_| too_large())?;

    Encoder::new(&mut bytes).encode(buffer)?;
    debug_assert_eq!(bytes.len(), len);

    Ok(bytes)
}

/// Serializes pixel buffers as BMP files into an `io::Write` sink.
///
/// The writer is used as-is; wrap unbuffered writers such as `File` in a `BufWriter`.
pub struct Encoder<W> {
    writer: W,
}

impl<W> Encoder<W>
where
    W: Write,
{
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn inner(&self) -> &W {
        &self.writer
    }

    pub fn inner_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Writes the file header, the info header, and then the pixel data one row at a time, starting
    /// from the last row of the buffer. The writer is flushed before returning.
    pub fn encode(&mut self, buffer: &PixelBuffer) -> Result<(), EncodeError> {
        let (file_header, info_header) = header::headers_for(buffer.width(), buffer.height())?;

        self.writer.write_all(&file_header.to_bytes())?;
        self.writer.write_all(&info_header.to_bytes())?;

        trace!(
            "wrote headers, file size {}, pixel data at offset {}",
            file_header.file_size(),
            file_header.pixel_data_offset()
        );

        let row_bytes = buffer.width() as usize * InfoHeader::BYTES_PER_PIXEL as usize;
        let mut scratch = Vec::with_capacity(row_bytes);

        for row in buffer.rows().rev() {
            scratch.clear();
            scratch.extend(row.iter().flat_map(|px| px.bgra()));
            self.writer.write_all(&scratch)?;
        }

        self.writer.flush()?;
        Ok(())
    }
}

#[derive(Debug)]
pub enum EncodeError {
    Dimension(DimensionError),
    Io(io::Error),
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dimension(err) => err.fmt(f),
            Self::Io(err) => err.fmt(f),
        }
    }
}

impl error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Dimension(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<DimensionError> for EncodeError {
    fn from(err: DimensionError) -> Self {
        Self::Dimension(err)
    }
}

impl From<io::Error> for EncodeError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}
