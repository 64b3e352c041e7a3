use image::{GrayImage, ImageBuffer, Luma, Rgba};
use lsb_veil::{
    cli::{HideArgs, RevealArgs},
    handler::{handle_hide, handle_reveal, run},
    image_io::{read_image, write_image},
};
use rand::RngCore;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// 一个辅助函数，用于创建一个带有随机像素的测试图像
fn create_test_image(path: &Path, width: u32, height: u32) {
    let mut img_buf = ImageBuffer::new(width, height);
    let mut raw_pixels = vec![0u8; (width * height * 4) as usize];
    rand::rng().fill_bytes(&mut raw_pixels);

    img_buf
        .pixels_mut()
        .zip(raw_pixels.chunks_exact(4))
        .for_each(|(pixel, chunk)| {
            *pixel = Rgba([chunk[0], chunk[1], chunk[2], 255]);
        });

    img_buf.save(path).expect("Failed to create test image.");
}

/// 创建一个像素全为偶数的灰度图像，解码时除隐藏消息外不会产生多余字符
fn create_even_gray_image(path: &Path, width: u32, height: u32) {
    let img = GrayImage::from_fn(width, height, |x, y| {
        Luma([((x * 7 + y * 13) as u8) & 0xFE])
    });
    img.save(path).expect("Failed to create test image.");
}

/// 验证从隐藏到揭示的完整流程
#[test]
fn test_handle_hide_and_reveal_integration() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let original_image_path = dir.path().join("original.png");
    let hidden_image_path = dir.path().join("hidden.png");

    create_even_gray_image(&original_image_path, 64, 64);
    let secret = "This is a test message for the handler! 这是一个给处理器的测试信息！";

    handle_hide(HideArgs {
        input_file: original_image_path.clone(),
        output_file: hidden_image_path.clone(),
        secret: secret.to_string(),
        force: false,
    })?;
    assert!(hidden_image_path.exists(), "Hidden image should be created.");

    let revealed = handle_reveal(RevealArgs {
        input_file: hidden_image_path,
        length: None,
    })?;
    assert_eq!(secret, revealed, "Revealed text must match the original.");

    Ok(())
}

/// 验证输出图像保留原有的颜色类型和尺寸，且只有最低位发生变化
#[test]
fn test_hidden_image_preserves_layout() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let original_image_path = dir.path().join("original.png");
    let hidden_image_path = dir.path().join("hidden.png");

    create_test_image(&original_image_path, 40, 30);
    handle_hide(HideArgs {
        input_file: original_image_path.clone(),
        output_file: hidden_image_path.clone(),
        secret: "layout".to_string(),
        force: false,
    })?;

    let original = read_image(&original_image_path)?;
    let hidden = read_image(&hidden_image_path)?;
    assert_eq!(original.layout, hidden.layout);
    assert_eq!(original.bytes.len(), hidden.bytes.len());
    assert!(
        original
            .bytes
            .iter()
            .zip(&hidden.bytes)
            .all(|(a, b)| a & 0xFE == b & 0xFE)
    );
    assert_eq!(&original.bytes[48..], &hidden.bytes[48..]);

    // 按长度揭示时只解码前 6 个窗口
    let revealed = handle_reveal(RevealArgs {
        input_file: hidden_image_path,
        length: Some(6),
    })?;
    assert_eq!(revealed, "layout");

    Ok(())
}

/// 验证容量边界：恰好装满成功，超出则失败且不写出文件
#[test]
fn test_handle_hide_capacity_boundary() -> anyhow::Result<()> {
    let dir = tempdir()?;
    // 4x4 灰度图像共 16 个字节，恰好容纳 2 个字节的消息
    let image_path = dir.path().join("tiny.png");
    create_even_gray_image(&image_path, 4, 4);

    let fits_path = dir.path().join("fits.png");
    handle_hide(HideArgs {
        input_file: image_path.clone(),
        output_file: fits_path.clone(),
        secret: "ok".to_string(),
        force: false,
    })?;
    let revealed = handle_reveal(RevealArgs {
        input_file: fits_path,
        length: None,
    })?;
    assert_eq!(revealed, "ok");

    let overflow_path = dir.path().join("overflow.png");
    let result = handle_hide(HideArgs {
        input_file: image_path,
        output_file: overflow_path.clone(),
        secret: "too".to_string(),
        force: false,
    });
    assert!(result.is_err());
    if let Err(e) = result {
        assert!(format!("{e:#}").contains("Not enough space"));
    }
    assert!(!overflow_path.exists(), "No partial output should be written.");

    Ok(())
}

/// 验证覆盖保护机制以及 `--force` 标志是否按预期工作
#[test]
fn test_overwrite_protection_and_force_flag() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("image.png");
    let dest_path = dir.path().join("dest.png");

    create_test_image(&image_path, 50, 50);
    fs::write(&dest_path, "this is a dummy file to be overwritten")?;

    let result = handle_hide(HideArgs {
        input_file: image_path.clone(),
        output_file: dest_path.clone(),
        secret: "some text".to_string(),
        force: false,
    });
    assert!(result.is_err(), "Execution should fail without --force when file exists.");
    if let Err(e) = result {
        assert!(e.to_string().contains("Output file already exists"));
    }

    let result = handle_hide(HideArgs {
        input_file: image_path,
        output_file: dest_path.clone(),
        secret: "some text".to_string(),
        force: true,
    });
    assert!(result.is_ok(), "Execution should succeed with --force when file exists.");

    let content = fs::read(&dest_path)?;
    assert_ne!(content, b"this is a dummy file to be overwritten");

    Ok(())
}

/// 验证读取失败与长度不符时返回错误
#[test]
fn test_image_io_errors() -> anyhow::Result<()> {
    let dir = tempdir()?;
    assert!(read_image(dir.path().join("missing.png")).is_err());
    assert!(read_image(dir.path()).is_err());

    let not_image = dir.path().join("text.png");
    fs::write(&not_image, "not an image")?;
    assert!(read_image(&not_image).is_err());

    let image_path = dir.path().join("image.png");
    create_even_gray_image(&image_path, 8, 8);
    let carrier = read_image(&image_path)?;
    let result = write_image(
        &carrier.layout,
        &carrier.bytes[1..],
        dir.path().join("bad.png"),
    );
    assert!(result.is_err());
    assert!(!dir.path().join("bad.png").exists());

    Ok(())
}

/// 验证可注入入口点的退出码
#[test]
fn test_run_exit_codes() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("image.png");
    let hidden_path = dir.path().join("hidden.png");
    create_even_gray_image(&image_path, 16, 16);

    let code = run([
        "lsb_veil",
        "hide",
        image_path.to_str().unwrap(),
        hidden_path.to_str().unwrap(),
        "secret",
    ]);
    assert_eq!(code, 0);
    assert!(hidden_path.exists());

    let code = run(["lsb_veil", "reveal", hidden_path.to_str().unwrap()]);
    assert_eq!(code, 0);

    let code = run(["lsb_veil", "reveal", hidden_path.to_str().unwrap(), "six"]);
    assert_eq!(code, 1, "Non-integer length must be rejected.");

    let code = run(["lsb_veil", "scramble", image_path.to_str().unwrap()]);
    assert_eq!(code, 1, "Unknown subcommands must fail.");

    let oversized = "x".repeat(100);
    let code = run([
        "lsb_veil",
        "hide",
        image_path.to_str().unwrap(),
        dir.path().join("big.png").to_str().unwrap(),
        oversized.as_str(),
    ]);
    assert_eq!(code, 1, "Oversized messages must fail.");

    Ok(())
}
