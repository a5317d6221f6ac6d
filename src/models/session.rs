use crate::models::VerificationResult;
use crate::service::report;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// 单个已上传 PDF 的提取上下文
///
/// 由上传接口创建, 之后的问答/对账请求按会话ID读取, 不再使用进程级全局变量。
#[derive(Debug, Clone, Serialize)]
pub struct DocumentSession {
    pub id: u64,
    pub file_name: Option<String>,
    pub index_text: String,
    pub diagram_text: String,
    pub verification: Vec<VerificationResult>,
    pub created_at: DateTime<Utc>,
}

impl DocumentSession {
    pub fn new(
        id: u64,
        file_name: Option<String>,
        index_text: String,
        diagram_text: String,
        verification: Vec<VerificationResult>,
    ) -> Self {
        Self {
            id,
            file_name,
            index_text,
            diagram_text,
            verification,
            created_at: Utc::now(),
        }
    }

    /// 校验报告文本 (每条结果一行)
    pub fn verification_report(&self) -> String {
        report::render_verification(&self.verification)
    }

    /// 拼接问答上下文: 索引表文本 + 图纸识别文本 + 校验报告
    pub fn context(&self) -> String {
        format!(
            "Index Table Text:\n{}\n\nExtracted Measurements from Diagrams:\n{}\n\nVerification Report:\n{}",
            self.index_text,
            self.diagram_text,
            self.verification_report()
        )
    }

    pub fn mismatch_count(&self) -> usize {
        self.verification.iter().filter(|r| !r.is_verified()).count()
    }
}
