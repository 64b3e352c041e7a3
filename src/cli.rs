//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，在图像像素数据中隐藏或揭示文本。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具：每个像素字节的最低位存储消息的一个比特。请使用无损格式 (如 PNG, BMP)。"
)]
pub struct Cli {
    /// 提高日志详细程度 (-v 为 info, -vv 为 debug)。
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：hide (隐藏) 和 reveal (揭示)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 将文本隐藏到图像的像素数据中。
    Hide(HideArgs),

    /// 从经过隐写的图像中揭示隐藏的文本。
    Reveal(RevealArgs),
}

/// 'hide' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct HideArgs {
    /// 作为载体的输入图像文件路径。
    pub input_file: PathBuf,

    /// 隐写完成后，保存结果图像的输出路径。
    pub output_file: PathBuf,

    /// 要隐藏的文本。
    pub secret: String,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'reveal' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct RevealArgs {
    /// 已隐藏文本的图像文件路径。
    pub input_file: PathBuf,

    /// 按固定字节数解码 (旧版格式)，省略时以 NUL 字节作为结束标记。
    pub length: Option<usize>,
}
