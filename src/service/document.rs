use crate::error::{AppError, ExtractError};
use crate::extract::{PdfSource, TextSource};
use crate::models::{DocumentSession, ReconciliationReport};
use crate::service::{reconciler, verifier, SessionStore};
use std::sync::Arc;

/// 图纸处理服务: 提取 -> 公式校验 -> 保存会话
pub struct DocumentService {
    source: Arc<dyn TextSource>,
    sessions: SessionStore,
}

impl DocumentService {
    pub fn new(source: Arc<dyn TextSource>) -> Self {
        Self {
            source,
            sessions: SessionStore::new(),
        }
    }

    /// 处理上传的 PDF, 返回新建的会话
    pub async fn process(
        &self,
        file_name: Option<String>,
        pdf: PdfSource,
    ) -> Result<Arc<DocumentSession>, AppError> {
        let id = self.sessions.next_id();

        // Phase 1: 文本层 + OCR (阻塞)
        let source = Arc::clone(&self.source);
        let extracted = tokio::task::spawn_blocking(move || source.extract(&pdf))
            .await
            .map_err(|e| ExtractError::Join(e.to_string()))??;

        tracing::info!(
            "Session {}: extracted {} index chars, {} diagram chars",
            id,
            extracted.index_text.len(),
            extracted.diagram_text.len()
        );

        // Phase 2: 校验索引表中的公式
        let verification = verifier::verify(&extracted.index_text)?;
        let mismatches = verification.iter().filter(|r| !r.is_verified()).count();
        tracing::info!(
            "Session {}: {} expressions checked, {} mismatches",
            id,
            verification.len(),
            mismatches
        );

        // Phase 3: 保存会话
        let session = DocumentSession::new(
            id,
            file_name,
            extracted.index_text,
            extracted.diagram_text,
            verification,
        );
        Ok(self.sessions.insert(session))
    }

    pub fn session(&self, id: u64) -> Result<Arc<DocumentSession>, AppError> {
        self.sessions.get(id).ok_or(AppError::SessionNotFound(id))
    }

    /// 用会话中的图纸文本对账
    pub fn reconcile(
        &self,
        id: u64,
        authoritative: &[String],
    ) -> Result<ReconciliationReport, AppError> {
        let session = self.session(id)?;
        let report = reconciler::reconcile(authoritative, &session.diagram_text);
        tracing::info!(
            "Session {}: reconciled {} measurements, {} missing",
            id,
            report.total(),
            report.missing.len()
        );
        Ok(report)
    }

    /// 关闭会话, 释放提取文本
    pub fn close(&self, id: u64) -> Result<(), AppError> {
        match self.sessions.remove(id) {
            Some(_) => {
                tracing::info!("Session {} closed", id);
                Ok(())
            }
            None => Err(AppError::SessionNotFound(id)),
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }
}
