/// A single 32-bit pixel with alpha, red, green and blue channels.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Hash)]
pub struct Pixel {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    pub const ZERO: Self = Self::new(0, 0, 0, 0);
    pub const BLACK: Self = Self::new(u8::MAX, 0, 0, 0);

    #[inline]
    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    #[inline]
    pub const fn argb(self) -> [u8; 4] {
        [self.a, self.r, self.g, self.b]
    }

    #[inline]
    pub const fn rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// The order the channels are stored in within 32-bit BMP pixel data.
    #[inline]
    pub const fn bgra(self) -> [u8; 4] {
        [self.b, self.g, self.r, self.a]
    }
}
