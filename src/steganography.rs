use crate::bits::bits;
use crate::constants::{BITS_PER_BYTE, LSB_CLEAR_MASK, LSB_MASK, NUL_SENTINEL};
use log::debug;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StegoError {
    #[error(
        "Not enough space in the carrier to hide the message. Required: {required_bits} bits, Available: {available_bits} bits"
    )]
    InsufficientCapacity {
        required_bits: usize,
        available_bits: usize,
    },

    #[error("Requested {requested} hidden bytes but the carrier only holds {available} full windows.")]
    WindowOutOfRange { requested: usize, available: usize },
}

/// 载体最多可容纳的消息字节数。
pub fn capacity(carrier: &[u8]) -> usize {
    carrier.len() / BITS_PER_BYTE
}

/// 嵌入 `message` 所需的载体字节数 (每个消息比特占用一个载体字节)。
pub fn required_bits(message: &[u8]) -> Option<usize> {
    message.len().checked_mul(BITS_PER_BYTE)
}

/// 将 `message` 的比特逐一写入 `carrier` 各字节的最低位，返回新的载体缓冲区。
///
/// 前 `8 * message.len()` 个字节仅最低位可能改变，其余字节原样复制。
///
/// # Errors
///
/// 当 `message.len() * 8 > carrier.len()` 时返回 [`StegoError::InsufficientCapacity`]，
/// 不会截断消息。
pub fn embed(carrier: &[u8], message: &[u8]) -> Result<Vec<u8>, StegoError> {
    let available_bits = carrier.len();
    let required = required_bits(message)
        .filter(|&required| required <= available_bits)
        .ok_or(StegoError::InsufficientCapacity {
            required_bits: message.len().saturating_mul(BITS_PER_BYTE),
            available_bits,
        })?;

    let (head, tail) = carrier.split_at(required);

    let mut output = Vec::with_capacity(carrier.len());
    output.extend(
        head.iter()
            .zip(bits(message))
            .map(|(&byte, bit)| (byte & LSB_CLEAR_MASK) | bit),
    );
    output.extend_from_slice(tail);

    debug!(
        "embedded {required} bits, {} carrier bytes passed through",
        tail.len()
    );

    Ok(output)
}

fn window_to_byte(window: &[u8]) -> u8 {
    window
        .iter()
        .fold(0u8, |acc, &byte| (acc << 1) | (byte & LSB_MASK))
}

/// 按 8 字节窗口重建隐藏的字节，跳过 NUL 字节但继续扫描后续窗口。
///
/// 末尾不足 8 字节的部分窗口会被忽略。
pub fn extract_bytes(carrier: &[u8]) -> Vec<u8> {
    let windows = carrier.chunks_exact(BITS_PER_BYTE);
    debug!(
        "decoding {} windows, ignoring {} trailing bytes",
        windows.len(),
        windows.remainder().len()
    );

    windows
        .map(window_to_byte)
        .filter(|&byte| byte != NUL_SENTINEL)
        .collect()
}

/// [`extract_bytes`] 的结果按 UTF-8 解码，无效序列替换为 U+FFFD。
pub fn extract(carrier: &[u8]) -> String {
    String::from_utf8_lossy(&extract_bytes(carrier)).into_owned()
}

/// 按给定长度精确解码前 `byte_count` 个窗口，保留 NUL 字节。
///
/// # Errors
///
/// 当 `byte_count` 超过载体中完整窗口的数量时返回 [`StegoError::WindowOutOfRange`]。
pub fn extract_exact(carrier: &[u8], byte_count: usize) -> Result<Vec<u8>, StegoError> {
    let available = capacity(carrier);
    if byte_count > available {
        return Err(StegoError::WindowOutOfRange {
            requested: byte_count,
            available,
        });
    }

    Ok(carrier
        .chunks_exact(BITS_PER_BYTE)
        .take(byte_count)
        .map(window_to_byte)
        .collect())
}
