//! Page image encoding: PNG through the `image` crate, BMP written
//! directly in the classic `BITMAPINFOHEADER` layout.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageError};

/// On-disk format for atlas pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    #[default]
    Png,
    Bmp,
}

impl ImageFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Bmp => "bmp",
        }
    }

    /// Parse a format name. Accepts "png" and "bmp", case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "bmp" => Some(Self::Bmp),
            _ => None,
        }
    }
}

/// Encode one page of raw RGBA8 pixels.
///
/// `pixels` must hold exactly `width * height * 4` bytes.
pub fn encode_page(
    pixels: &[u8],
    width: u32,
    height: u32,
    format: ImageFormat,
) -> Result<Vec<u8>, ImageError> {
    match format {
        ImageFormat::Png => {
            let mut bytes = Vec::new();
            PngEncoder::new(&mut bytes).write_image(
                pixels,
                width,
                height,
                ExtendedColorType::Rgba8,
            )?;
            Ok(bytes)
        }
        ImageFormat::Bmp => Ok(encode_bmp(pixels, width, height)),
    }
}

/// 32-bit uncompressed BMP: `BITMAPINFOHEADER`, `BI_RGB`, bottom-up rows,
/// BGRA byte order, 2835 pixels per meter (72 DPI).
fn encode_bmp(pixels: &[u8], width: u32, height: u32) -> Vec<u8> {
    const FILE_HEADER: u32 = 14;
    const INFO_HEADER: u32 = 40;
    // 32bpp rows need no padding to the 4-byte boundary.
    let row = width as usize * 4;
    let image_size = (row * height as usize) as u32;
    let offset = FILE_HEADER + INFO_HEADER;
    let mut out = Vec::with_capacity((offset + image_size) as usize);

    out.extend_from_slice(b"BM");
    out.extend_from_slice(&(offset + image_size).to_le_bytes());
    out.extend_from_slice(&[0; 4]); // reserved
    out.extend_from_slice(&offset.to_le_bytes());

    out.extend_from_slice(&INFO_HEADER.to_le_bytes());
    out.extend_from_slice(&(width as i32).to_le_bytes());
    out.extend_from_slice(&(height as i32).to_le_bytes()); // positive: bottom-up
    out.extend_from_slice(&1_u16.to_le_bytes()); // color planes
    out.extend_from_slice(&32_u16.to_le_bytes()); // bits per pixel
    out.extend_from_slice(&0_u32.to_le_bytes()); // BI_RGB
    out.extend_from_slice(&image_size.to_le_bytes());
    out.extend_from_slice(&2835_i32.to_le_bytes()); // x pixels per meter
    out.extend_from_slice(&2835_i32.to_le_bytes()); // y pixels per meter
    out.extend_from_slice(&0_u32.to_le_bytes()); // palette colors
    out.extend_from_slice(&0_u32.to_le_bytes()); // important colors

    for line in pixels.chunks_exact(row).rev() {
        for px in line.chunks_exact(4) {
            out.extend_from_slice(&[px[2], px[1], px[0], px[3]]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2x2 RGBA: distinct corner colors.
    const PIXELS: [u8; 16] = [
        255, 0, 0, 10, // top-left, red
        0, 255, 0, 20, // top-right, green
        0, 0, 255, 30, // bottom-left, blue
        255, 255, 255, 40, // bottom-right, white
    ];

    #[test]
    fn extension_and_parse() {
        assert_eq!(ImageFormat::Png.extension(), "png");
        assert_eq!(ImageFormat::Bmp.extension(), "bmp");
        assert_eq!(ImageFormat::parse("png"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::parse("BMP"), Some(ImageFormat::Bmp));
        assert_eq!(ImageFormat::parse("jpeg"), None);
        assert_eq!(ImageFormat::default(), ImageFormat::Png);
    }

    #[test]
    fn png_has_signature() {
        let bytes = encode_page(&PIXELS, 2, 2, ImageFormat::Png).expect("encode");
        assert_eq!(&bytes[..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    }

    #[test]
    fn bmp_headers_are_exact() {
        let bytes = encode_page(&PIXELS, 2, 2, ImageFormat::Bmp).expect("encode");
        assert_eq!(bytes.len(), 54 + 16);
        assert_eq!(&bytes[0..2], b"BM");
        // File size, then pixel data offset at byte 10.
        assert_eq!(u32::from_le_bytes(bytes[2..6].try_into().unwrap()), 70);
        assert_eq!(u32::from_le_bytes(bytes[10..14].try_into().unwrap()), 54);
        // BITMAPINFOHEADER: size, dimensions, planes, depth, compression.
        assert_eq!(u32::from_le_bytes(bytes[14..18].try_into().unwrap()), 40);
        assert_eq!(i32::from_le_bytes(bytes[18..22].try_into().unwrap()), 2);
        assert_eq!(i32::from_le_bytes(bytes[22..26].try_into().unwrap()), 2);
        assert_eq!(u16::from_le_bytes(bytes[26..28].try_into().unwrap()), 1);
        assert_eq!(u16::from_le_bytes(bytes[28..30].try_into().unwrap()), 32);
        assert_eq!(u32::from_le_bytes(bytes[30..34].try_into().unwrap()), 0);
        assert_eq!(u32::from_le_bytes(bytes[34..38].try_into().unwrap()), 16);
        // 72 DPI in both axes.
        assert_eq!(i32::from_le_bytes(bytes[38..42].try_into().unwrap()), 2835);
        assert_eq!(i32::from_le_bytes(bytes[42..46].try_into().unwrap()), 2835);
    }

    #[test]
    fn bmp_rows_are_bottom_up_bgra() {
        let bytes = encode_page(&PIXELS, 2, 2, ImageFormat::Bmp).expect("encode");
        let data = &bytes[54..];
        // First stored row is the input's bottom row, swizzled to BGRA.
        assert_eq!(&data[0..4], &[255, 0, 0, 30]); // blue pixel
        assert_eq!(&data[4..8], &[255, 255, 255, 40]); // white pixel
        assert_eq!(&data[8..12], &[0, 0, 255, 10]); // red pixel
        assert_eq!(&data[12..16], &[0, 255, 0, 20]); // green pixel
    }

    #[test]
    fn formats_keep_every_page_byte_deterministic() {
        let a = encode_page(&PIXELS, 2, 2, ImageFormat::Png).expect("encode");
        let b = encode_page(&PIXELS, 2, 2, ImageFormat::Png).expect("encode");
        assert_eq!(a, b);
        let a = encode_page(&PIXELS, 2, 2, ImageFormat::Bmp).expect("encode");
        let b = encode_page(&PIXELS, 2, 2, ImageFormat::Bmp).expect("encode");
        assert_eq!(a, b);
    }
}
