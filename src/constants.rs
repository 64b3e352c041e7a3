/// 每个字节包含的位数。
/// 一个消息字节需要占用 8 个载体字节 (每个载体字节的最低位存储 1 bit)。
pub const BITS_PER_BYTE: usize = 8;

/// 清除最低有效位的掩码。
pub const LSB_CLEAR_MASK: u8 = 0xFE;

/// 取出最低有效位的掩码。
pub const LSB_MASK: u8 = 0x01;

/// 提取时被视为消息结束标记的字节，解码结果中会被跳过。
pub const NUL_SENTINEL: u8 = 0x00;
