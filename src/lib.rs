//! # lsb_veil 库
//!
//! 本库包含 LSB 隐写工具的核心逻辑：位提取、LSB 编解码以及图像读写。

// 声明库包含的所有模块。

pub mod bits;
pub mod cli;
pub mod constants;
pub mod handler;
pub mod image_io;
pub mod steganography;
