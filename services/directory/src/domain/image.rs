//! Upload checks for employee photos.

/// Largest accepted upload, 2048 KiB.
pub const MAX_IMAGE_BYTES: usize = 2048 * 1024;

/// Accepted photo encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Gif => "gif",
        }
    }
}

/// Why an upload was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ImageRejection {
    #[error("The file must be an image")]
    NotAnImage,
    #[error("Image format must be jpeg, png, jpg, or gif")]
    UnsupportedFormat,
    #[error("Image size may not exceed 2MB")]
    TooLarge,
}

/// Sniff the content (never the file name or declared type) and check the size.
///
/// Checks run in order: is it an image, is it an allowed format, does it fit.
pub fn inspect(bytes: &[u8]) -> Result<ImageFormat, ImageRejection> {
    let format = match image::guess_format(bytes) {
        Ok(image::ImageFormat::Jpeg) => ImageFormat::Jpeg,
        Ok(image::ImageFormat::Png) => ImageFormat::Png,
        Ok(image::ImageFormat::Gif) => ImageFormat::Gif,
        Ok(_) => return Err(ImageRejection::UnsupportedFormat),
        Err(_) => return Err(ImageRejection::NotAnImage),
    };
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(ImageRejection::TooLarge);
    }
    Ok(format)
}
