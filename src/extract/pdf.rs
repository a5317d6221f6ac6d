use crate::config::OcrConfig;
use crate::error::ExtractError;
use crate::extract::{ocr, ExtractedText, TextSource};
use std::path::{Path, PathBuf};

/// PDF 来源: 本地路径或内存字节 (上传文件)
#[derive(Debug, Clone)]
pub enum PdfSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

impl PdfSource {
    /// 以文件路径形式使用 PDF; 内存字节先写入临时文件
    fn with_path<T>(
        &self,
        f: impl FnOnce(&Path) -> Result<T, ExtractError>,
    ) -> Result<T, ExtractError> {
        match self {
            PdfSource::Path(path) => f(path),
            PdfSource::Bytes(bytes) => {
                let dir = tempfile::tempdir()?;
                let path = dir.path().join("upload.pdf");
                std::fs::write(&path, bytes)?;
                f(&path)
            }
        }
    }
}

/// PDF 文本提取器 (文本层 + OCR)
#[derive(Debug, Clone, Default)]
pub struct PdfExtractor {
    ocr: OcrConfig,
}

impl PdfExtractor {
    pub fn new(ocr: OcrConfig) -> Self {
        Self { ocr }
    }

    /// 文本层内容 (去首尾空白), 不做 OCR
    pub fn text_layer(&self, source: &PdfSource) -> Result<String, ExtractError> {
        let text = match source {
            PdfSource::Path(path) => pdf_extract::extract_text(path),
            PdfSource::Bytes(bytes) => pdf_extract::extract_text_from_mem(bytes),
        }
        .map_err(|e| ExtractError::Pdf(e.to_string()))?;

        Ok(text.trim().to_string())
    }

    /// 索引表文本: 文本层为空且开启 ocr_if_empty 时退回 OCR
    pub fn extract_text(&self, source: &PdfSource) -> Result<String, ExtractError> {
        self.extract_text_with(source, || self.extract_diagram_text(source))
    }

    /// 同 `extract_text`, OCR 文本由调用方提供 (可复用已有的识别结果)
    fn extract_text_with(
        &self,
        source: &PdfSource,
        ocr: impl FnOnce() -> Result<String, ExtractError>,
    ) -> Result<String, ExtractError> {
        let text_layer = self.text_layer(source)?;
        self.index_text(text_layer, ocr)
    }

    fn index_text(
        &self,
        text_layer: String,
        ocr: impl FnOnce() -> Result<String, ExtractError>,
    ) -> Result<String, ExtractError> {
        if text_layer.is_empty() && self.ocr.ocr_if_empty {
            tracing::info!("No text layer found, falling back to OCR text");
            return Ok(ocr()?.trim().to_string());
        }
        Ok(text_layer)
    }

    /// 图纸文本: 所有页面渲染后 OCR
    pub fn extract_diagram_text(&self, source: &PdfSource) -> Result<String, ExtractError> {
        source.with_path(|path| ocr::ocr_pdf(path, &self.ocr))
    }
}

impl TextSource for PdfExtractor {
    fn extract(&self, source: &PdfSource) -> Result<ExtractedText, ExtractError> {
        let diagram_text = self.extract_diagram_text(source)?;
        // 无文本层时直接复用 OCR 结果
        let index_text = self.extract_text_with(source, || Ok(diagram_text.clone()))?;

        Ok(ExtractedText {
            index_text,
            diagram_text,
        })
    }
}
