//! # 位提取模块
//!
//! 将字节序列按 MSB 优先的顺序展开为单个比特。
//! 迭代器只保存一个位置索引，任何时刻都可以通过 [`bit_at`] 重新计算同一位置的比特。

use crate::constants::BITS_PER_BYTE;
use std::iter::FusedIterator;

/// 返回 `bytes` 中第 `bit_index` 个比特 (0 或 1)。
///
/// 比特按字节原有顺序排列，每个字节内部从最高位开始。
/// 当 `bit_index >= bytes.len() * 8` 时返回 `None`。
pub fn bit_at(bytes: &[u8], bit_index: usize) -> Option<u8> {
    let byte = bytes.get(bit_index / BITS_PER_BYTE)?;
    let shift = BITS_PER_BYTE - 1 - bit_index % BITS_PER_BYTE;
    Some((byte >> shift) & 1)
}

/// 以 MSB 优先顺序遍历字节序列中所有比特的迭代器。
///
/// 由 [`bits`] 创建，长度恰好为 `8 * bytes.len()`。
#[derive(Debug, Clone)]
pub struct Bits<'a> {
    bytes: &'a [u8],
    index: usize,
}

/// 为 `bytes` 创建一个比特迭代器。
pub fn bits(bytes: &[u8]) -> Bits<'_> {
    Bits { bytes, index: 0 }
}

impl Iterator for Bits<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let bit = bit_at(self.bytes, self.index)?;
        self.index += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.bytes.len() * BITS_PER_BYTE).saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Bits<'_> {}

impl FusedIterator for Bits<'_> {}
