//! # 命令处理逻辑模块
//!
//! 包含处理 `hide` 和 `reveal` 子命令的高级业务逻辑。
//! 本模块负责协调图像 I/O、调用核心隐写算法以及向用户报告结果。

use crate::cli::{Cli, Commands, HideArgs, RevealArgs};
use crate::image_io::{read_image, write_image};
use crate::steganography::{embed, extract, extract_exact};
use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use env_logger::Builder;
use log::{LevelFilter, info};
use std::ffi::OsString;
use std::path::Path;

/// 程序的可注入入口点。
///
/// 解析 `args` (第一个元素为程序名)，分派到相应子命令并返回进程退出状态：
/// 成功为 0；参数错误、未知子命令或执行失败为 1。
pub fn run<I, T>(args: I) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                1
            } else {
                0
            };
        }
    };

    init_logger(cli.verbose);

    match dispatch(cli) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            1
        }
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    // 测试中可能多次调用，重复初始化直接忽略
    let _ = Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

/// 根据子命令调用相应的处理函数。
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Hide(args) => handle_hide(args),
        Commands::Reveal(args) => {
            let text = handle_reveal(args)?;
            println!("{text}");
            Ok(())
        }
    }
}

fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取载体图像、将秘密文本嵌入像素字节的最低位，
/// 最后以原有的颜色类型和尺寸写出结果图像。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径与秘密文本的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 输出文件已存在且未指定 `--force`。
/// * 无法读取或解码输入图像。
/// * 图像容量不足以隐藏文本 (此时不会写入任何文件)。
/// * 无法编码或写入目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    ensure_writable(&args.output_file, args.force)?;

    let carrier = read_image(&args.input_file).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.input_file.to_string_lossy().red().bold()
        )
    })?;

    let message = args.secret.as_bytes();
    let hidden = embed(&carrier.bytes, message).with_context(|| {
        format!(
            "Your image is not big enough to hide the message: {}",
            args.input_file.to_string_lossy().red().bold()
        )
    })?;
    info!(
        "hid {} bytes in {} carrier bytes",
        message.len(),
        carrier.bytes.len()
    );

    write_image(&carrier.layout, &hidden, &args.output_file).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            args.output_file.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "{} bytes written successfully to {}",
        message.len().to_string().green().bold(),
        args.output_file.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Reveal' 命令的执行逻辑，返回揭示出的文本。
///
/// 未给出长度时解码所有完整窗口并跳过 NUL 字节；
/// 给出长度时只解码前 `length` 个窗口 (旧版格式)。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取或解码输入图像。
/// * 指定的长度超过图像可容纳的字节数。
pub fn handle_reveal(args: RevealArgs) -> Result<String> {
    let carrier = read_image(&args.input_file).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.input_file.to_string_lossy().red().bold()
        )
    })?;

    let text = match args.length {
        None => extract(&carrier.bytes),
        Some(length) => {
            let bytes = extract_exact(&carrier.bytes, length).with_context(|| {
                format!(
                    "Failed to reveal {} bytes from '{}'.",
                    length.to_string().red().bold(),
                    args.input_file.to_string_lossy().red().bold()
                )
            })?;
            String::from_utf8_lossy(&bytes).into_owned()
        }
    };
    info!(
        "revealed {} characters from {}",
        text.chars().count(),
        args.input_file.display()
    );

    Ok(text)
}
