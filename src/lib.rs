//! Build an ARGB pixel grid in memory and write it out as an uncompressed 32-bit BMP file.

pub mod buffer;
pub mod encode;
pub mod header;
pub mod pixel;

pub use buffer::PixelBuffer;
pub use encode::{encode_to_vec, write, Encoder};
pub use header::{FileHeader, InfoHeader};
pub use pixel::Pixel;
