//! Loading and fitting of raster images.

use image::{ImageFormat, ImageReader};
use log::debug;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Image formats that can be embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
    Gif,
}

impl ImageKind {
    /// Maps a file extension (any case, `jpg` included) to a supported kind.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_uppercase().as_str() {
            "PNG" => Some(ImageKind::Png),
            "JPG" | "JPEG" => Some(ImageKind::Jpeg),
            "GIF" => Some(ImageKind::Gif),
            _ => None,
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ImageKind::Png => "image/png",
            ImageKind::Jpeg => "image/jpeg",
            ImageKind::Gif => "image/gif",
        }
    }

    fn format(self) -> ImageFormat {
        match self {
            ImageKind::Png => ImageFormat::Png,
            ImageKind::Jpeg => ImageFormat::Jpeg,
            ImageKind::Gif => ImageFormat::Gif,
        }
    }
}

/// An image file read into memory, with its pixel dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedImage {
    pub bytes: Vec<u8>,
    pub kind: ImageKind,
    pub pixel_width: u32,
    pub pixel_height: u32,
}

/// Reasons an image is left out of a slide.
#[derive(Error, Debug)]
pub enum ImageLoadError {
    #[error("image not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("unsupported image format \"{format}\": {}", .path.display())]
    UnsupportedFormat { format: String, path: PathBuf },

    #[error("failed to load image {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load image {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Resolves an image reference against the directory of the presentation.
/// Absolute paths are kept as they are.
pub fn resolve_image_path(base_dir: &Path, url: &str) -> PathBuf {
    let path = Path::new(url);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// Reads an image file and determines its dimensions.
///
/// The format is chosen by file extension; only PNG, JPEG and GIF are accepted.
pub fn load_image(path: &Path) -> Result<EmbeddedImage, ImageLoadError> {
    if !path.exists() {
        return Err(ImageLoadError::NotFound(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    let kind =
        ImageKind::from_extension(extension).ok_or_else(|| ImageLoadError::UnsupportedFormat {
            format: extension.to_ascii_uppercase(),
            path: path.to_path_buf(),
        })?;

    let bytes = std::fs::read(path).map_err(|source| ImageLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let (pixel_width, pixel_height) = ImageReader::with_format(Cursor::new(&bytes), kind.format())
        .into_dimensions()
        .map_err(|source| ImageLoadError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(
        "Loaded {} image {} ({}x{} px)",
        kind.mime_type(),
        path.display(),
        pixel_width,
        pixel_height
    );
    Ok(EmbeddedImage {
        bytes,
        kind,
        pixel_width,
        pixel_height,
    })
}

/// Size and horizontal offset of an image fitted into a box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePlacement {
    pub width: f64,
    pub height: f64,
    /// Offset from the left edge of the box that centres the image.
    pub x_offset: f64,
}

/// Scales an image to fit `max_w` x `max_h`, preserving its aspect ratio, and centres it
/// horizontally.
///
/// An image without positive dimensions gets the degenerate placement
/// `(max_w, 0, 0)`.
pub fn fit_image(native_w: f64, native_h: f64, max_h: f64, max_w: f64) -> ImagePlacement {
    if native_w <= 0.0 || native_h <= 0.0 {
        return ImagePlacement {
            width: max_w,
            height: 0.0,
            x_offset: 0.0,
        };
    }

    let scale = (max_w / native_w).min(max_h / native_h);
    let width = (native_w * scale).min(max_w);
    let height = (native_h * scale).min(max_h);
    ImagePlacement {
        width,
        height,
        x_offset: (max_w - width) / 2.0,
    }
}
