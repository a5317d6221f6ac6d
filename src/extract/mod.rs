pub mod ocr;
pub mod pdf;

pub use pdf::{PdfExtractor, PdfSource};

use crate::error::ExtractError;

/// 一份图纸 PDF 提取出的两类文本
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedText {
    /// 文本层 (索引表)
    pub index_text: String,
    /// 图纸 OCR 文本
    pub diagram_text: String,
}

/// 文本来源: PDF 提取 / OCR 等外部实现
///
/// 阻塞调用, 异步上下文中需放到 `spawn_blocking`。
pub trait TextSource: Send + Sync {
    fn extract(&self, source: &PdfSource) -> Result<ExtractedText, ExtractError>;
}
