//! # 图像读写模块
//!
//! 将图像文件解码为扁平的像素字节序列，并保留重新编码所需的元数据 (颜色类型与尺寸)。
//! 编解码器本身视载体为不透明的字节流，元数据在写回时原样附加。

use image::ColorType;
use log::info;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageIoError {
    #[error("Unable to decode image {path:?}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("{path:?} is a directory, not an image file")]
    NotAFile { path: PathBuf },

    #[error(
        "Pixel buffer length {actual} does not match {width}x{height} {color:?} (expected {expected} bytes)"
    )]
    LengthMismatch {
        color: ColorType,
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Unable to encode image to {path:?}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// 重新组装图像所需的像素布局信息。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelLayout {
    pub color: ColorType,
    pub width: u32,
    pub height: u32,
}

impl PixelLayout {
    /// 该布局下像素缓冲区应有的字节数。
    pub fn byte_len(&self) -> usize {
        self.width as usize * self.height as usize * usize::from(self.color.bytes_per_pixel())
    }
}

/// 已解码的载体图像：像素字节加上其布局。
#[derive(Debug, Clone)]
pub struct Carrier {
    pub layout: PixelLayout,
    pub bytes: Vec<u8>,
}

/// 读取并解码图像文件。
///
/// # Errors
///
/// * 路径是目录时返回 [`ImageIoError::NotAFile`]。
/// * 文件不存在或格式不受支持时返回 [`ImageIoError::Decode`]。
pub fn read_image(path: impl AsRef<Path>) -> Result<Carrier, ImageIoError> {
    let path = path.as_ref();
    if path.is_dir() {
        return Err(ImageIoError::NotAFile { path: path.into() });
    }

    let image = image::open(path).map_err(|source| ImageIoError::Decode {
        path: path.into(),
        source,
    })?;

    let layout = PixelLayout {
        color: image.color(),
        width: image.width(),
        height: image.height(),
    };
    info!(
        "read {}x{} {:?} image from {}",
        layout.width,
        layout.height,
        layout.color,
        path.display()
    );

    Ok(Carrier {
        layout,
        bytes: image.into_bytes(),
    })
}

/// 按 `layout` 将像素字节重新编码为图像文件，输出格式由扩展名决定。
///
/// # Errors
///
/// * 字节长度与布局不符时返回 [`ImageIoError::LengthMismatch`]。
/// * 编码或写入失败时返回 [`ImageIoError::Encode`]。
pub fn write_image(
    layout: &PixelLayout,
    bytes: &[u8],
    path: impl AsRef<Path>,
) -> Result<(), ImageIoError> {
    let path = path.as_ref();
    let expected = layout.byte_len();
    if bytes.len() != expected {
        return Err(ImageIoError::LengthMismatch {
            color: layout.color,
            width: layout.width,
            height: layout.height,
            expected,
            actual: bytes.len(),
        });
    }

    image::save_buffer(path, bytes, layout.width, layout.height, layout.color).map_err(
        |source| ImageIoError::Encode {
            path: path.into(),
            source,
        },
    )?;
    info!("wrote {} bytes of pixel data to {}", bytes.len(), path.display());

    Ok(())
}
