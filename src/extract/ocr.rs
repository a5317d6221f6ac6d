use crate::config::OcrConfig;
use crate::error::ExtractError;
use rayon::prelude::*;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// 整份 PDF 逐页 OCR
///
/// pdftoppm 按 dpi 渲染成 PNG 到临时目录, tesseract 并行识别每一页, 结果按页序用换行拼接。
pub fn ocr_pdf(pdf_path: &Path, config: &OcrConfig) -> Result<String, ExtractError> {
    let temp_dir = tempfile::tempdir()?;
    let prefix = temp_dir.path().join("page");

    tracing::info!(
        "Running OCR on {} (dpi={}, lang={})",
        pdf_path.display(),
        config.dpi,
        config.lang
    );

    let output = run_tool(
        &config.pdftoppm_cmd,
        Command::new(&config.pdftoppm_cmd)
            .arg("-png")
            .arg("-r")
            .arg(config.dpi.to_string())
            .arg(pdf_path)
            .arg(&prefix),
    )?;
    check_status(&config.pdftoppm_cmd, &output)?;

    let pages = list_page_images(temp_dir.path())?;
    if pages.is_empty() {
        return Err(ExtractError::NoPages);
    }
    tracing::info!("pdftoppm rendered {} pages", pages.len());

    let texts = pages
        .par_iter()
        .map(|page| ocr_image(page, config))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(texts.join("\n"))
}

/// 单张图片 OCR (tesseract 输出到 stdout)
pub fn ocr_image(image: &Path, config: &OcrConfig) -> Result<String, ExtractError> {
    let output = run_tool(
        &config.tesseract_cmd,
        Command::new(&config.tesseract_cmd)
            .arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(&config.lang),
    )?;
    check_status(&config.tesseract_cmd, &output)?;

    let text = String::from_utf8_lossy(&output.stdout).into_owned();
    tracing::debug!("OCR {}: {} chars", image.display(), text.len());
    Ok(text)
}

fn run_tool(tool: &str, cmd: &mut Command) -> Result<Output, ExtractError> {
    cmd.output().map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ExtractError::ToolMissing(tool.to_string()),
        _ => ExtractError::Io(e),
    })
}

fn check_status(tool: &str, output: &Output) -> Result<(), ExtractError> {
    if output.status.success() {
        return Ok(());
    }
    Err(ExtractError::ToolFailed {
        tool: tool.to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    })
}

/// pdftoppm 生成的页码等宽补零, 按文件名排序即页序
fn list_page_images(dir: &Path) -> Result<Vec<PathBuf>, ExtractError> {
    let mut pages: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "png"))
        .collect();
    pages.sort();
    Ok(pages)
}
