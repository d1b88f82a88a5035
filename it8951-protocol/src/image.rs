//! Image load descriptors
//!
//! A load starts with a header word packing endianness, pixel format and
//! rotation:
//! ```text
//!  15      9   8    7     4   3     0
//! ┌─────────┬─────┬─────────┬─────────┐
//! │ 0       │ END │ PIXFMT  │ ROTATE  │
//! └─────────┴─────┴─────────┴─────────┘
//! ```
//! An area load follows the header with x, y, width and height.

use crate::ProtocolError;

/// Byte order of the pixel words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum EndianType {
    /// Little endian
    #[default]
    Little = 0,
    /// Big endian
    Big = 1,
}

/// Pixel format tag (controller bit depth)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum PixelFormat {
    /// 2 bits per pixel
    Bpp2 = 0,
    /// 3 bits per pixel
    Bpp3 = 1,
    /// 4 bits per pixel
    Bpp4 = 2,
    /// 8 bits per pixel (also carries 1bpp data)
    Bpp8 = 3,
}

impl PixelFormat {
    /// Format tag for a host bit depth
    ///
    /// Monochrome data is loaded with the 8bpp tag, as is any depth the
    /// controller has no tag for.
    pub fn from_bpp(bpp: u8) -> Self {
        match bpp {
            2 => PixelFormat::Bpp2,
            3 => PixelFormat::Bpp3,
            4 => PixelFormat::Bpp4,
            _ => PixelFormat::Bpp8,
        }
    }

    /// Strict variant of [`PixelFormat::from_bpp`]
    pub fn try_from_bpp(bpp: u8) -> Result<Self, ProtocolError> {
        match bpp {
            1 | 2 | 3 | 4 | 8 => Ok(Self::from_bpp(bpp)),
            _ => Err(ProtocolError::UnsupportedBpp(bpp)),
        }
    }

    /// Bits per pixel of the tag
    pub fn bits(self) -> u8 {
        match self {
            PixelFormat::Bpp2 => 2,
            PixelFormat::Bpp3 => 3,
            PixelFormat::Bpp4 => 4,
            PixelFormat::Bpp8 => 8,
        }
    }
}

/// Image rotation applied by the controller while loading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum Rotation {
    /// No rotation
    #[default]
    Rotate0 = 0,
    /// 90 degrees
    Rotate90 = 1,
    /// 180 degrees
    Rotate180 = 2,
    /// 270 degrees
    Rotate270 = 3,
}

/// One pending image transfer
///
/// Borrows the caller's packed pixel words for the duration of the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadImageInfo<'a> {
    /// Byte order of `source`
    pub endian: EndianType,
    /// Pixel format tag
    pub pixel_format: PixelFormat,
    /// Rotation tag
    pub rotation: Rotation,
    /// Packed pixel words
    pub source: &'a [u16],
    /// Controller memory address receiving the image
    pub target_address: u32,
}

impl<'a> LoadImageInfo<'a> {
    /// Little endian, unrotated load of `source` to `target_address`
    pub fn new(pixel_format: PixelFormat, source: &'a [u16], target_address: u32) -> Self {
        Self {
            endian: EndianType::Little,
            pixel_format,
            rotation: Rotation::Rotate0,
            source,
            target_address,
        }
    }

    /// Header word sent with the load-image commands
    pub fn header(&self) -> u16 {
        ((self.endian as u16) << 8) | ((self.pixel_format as u16) << 4) | self.rotation as u16
    }
}

/// Rectangle in controller frame buffer pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AreaImageInfo {
    /// Left edge
    pub x: u16,
    /// Top edge
    pub y: u16,
    /// Width
    pub width: u16,
    /// Height
    pub height: u16,
}

impl AreaImageInfo {
    /// Create an area
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Area starting at the origin
    pub fn full(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Arguments of a load-image-area command
    pub fn load_args(&self, header: u16) -> [u16; 5] {
        [header, self.x, self.y, self.width, self.height]
    }
}

/// 16-bit words occupied by one packed row of `width` pixels at `bpp`
///
/// Rows are padded to a whole word.
pub fn width_in_words(width: u16, bpp: u8) -> usize {
    (width as usize * bpp as usize).div_ceil(16)
}

/// 16-bit words occupied by a packed `width` x `height` image at `bpp`
pub fn image_words(width: u16, height: u16, bpp: u8) -> usize {
    width_in_words(width, bpp) * height as usize
}
