pub mod handlers;

pub use handlers::*;

use crate::llm::LlmClient;
use crate::service::DocumentService;
use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;

/// 共享状态: 图纸处理服务 + 大模型客户端
#[derive(Clone)]
pub struct AppState {
    pub documents: Arc<DocumentService>,
    pub llm: Arc<LlmClient>,
}

/// 构建路由
pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    // 纯文本校验/对账, 无状态
    let text_routes = Router::new()
        .route("/api/verify", post(handlers::verify_text))
        .route("/api/reconcile", post(handlers::reconcile_text));

    let document_routes = Router::new()
        .route("/api/documents", post(handlers::upload_document))
        .route("/api/documents/:id", delete(handlers::close_document))
        .route("/api/documents/:id/report", get(handlers::document_report))
        .route("/api/documents/:id/report.csv", get(handlers::document_report_csv))
        .route("/api/documents/:id/reconcile", post(handlers::reconcile_document))
        .route("/api/documents/:id/chat", post(handlers::chat))
        .route("/api/documents/:id/summary", post(handlers::summarize))
        .with_state(state);

    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(text_routes)
        .merge(document_routes)
        .layer(
            ServiceBuilder::new().layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
}
