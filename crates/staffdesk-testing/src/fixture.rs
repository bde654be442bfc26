//! Upload payloads for photo validation tests.
//!
//! Only the leading magic bytes matter to format sniffing, so each payload is a
//! signature plus a little filler rather than a decodable picture.

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
const JPEG_SIGNATURE: &[u8] = b"\xFF\xD8\xFF\xE0";
const GIF_SIGNATURE: &[u8] = b"GIF89a";

fn padded(signature: &[u8], len: usize) -> Vec<u8> {
    let mut bytes = signature.to_vec();
    bytes.resize(len.max(signature.len()), 0);
    bytes
}

pub fn png_bytes() -> Vec<u8> {
    padded(PNG_SIGNATURE, 64)
}

pub fn jpeg_bytes() -> Vec<u8> {
    padded(JPEG_SIGNATURE, 64)
}

pub fn gif_bytes() -> Vec<u8> {
    padded(GIF_SIGNATURE, 64)
}

/// A WebP container: an image, but not an accepted format.
pub fn webp_bytes() -> Vec<u8> {
    let mut bytes = b"RIFF".to_vec();
    bytes.extend_from_slice(&56u32.to_le_bytes());
    bytes.extend_from_slice(b"WEBPVP8 ");
    padded(&bytes, 64)
}

/// A BMP header: an image, but not an accepted format.
pub fn bmp_bytes() -> Vec<u8> {
    padded(b"BM", 64)
}

/// Plain text posing as an upload.
pub fn text_bytes() -> Vec<u8> {
    b"this is definitely not a picture".to_vec()
}

/// A PNG one byte over the 2048 KiB limit.
pub fn oversized_png_bytes() -> Vec<u8> {
    padded(PNG_SIGNATURE, 2048 * 1024 + 1)
}
