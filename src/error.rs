use thiserror::Error;

/// 公式校验错误
///
/// 正则只捕获数字, 正常情况下不会出现; 一旦出现即整体失败, 不返回部分结果。
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("cannot parse {field} `{value}` in claim `{claim}`")]
    Parse {
        field: &'static str,
        value: String,
        claim: String,
    },
}

/// PDF 文本提取 / OCR 错误
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("pdf text extraction failed: {0}")]
    Pdf(String),

    #[error("{0} not found (OCR requires poppler-utils and tesseract-ocr)")]
    ToolMissing(String),

    #[error("{tool} failed: {stderr}")]
    ToolFailed { tool: String, stderr: String },

    #[error("pdftoppm produced no page images")]
    NoPages,

    #[error("extraction task aborted: {0}")]
    Join(String),
}

/// 大模型调用错误
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Error: No '{0}' key returned from LLM.")]
    MissingResponse(&'static str),
}

/// 应用级错误
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Verify(#[from] VerifyError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("session {0} not found")]
    SessionNotFound(u64),
}
