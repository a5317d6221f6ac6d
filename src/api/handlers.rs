use crate::api::AppState;
use crate::error::AppError;
use crate::extract::PdfSource;
use crate::models::{MeasurementToken, ReconciliationReport, VerificationResult};
use crate::service::{reconciler, report, verifier};
use axum::{
    body::Bytes,
    extract::{Json, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// 统一响应体
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    fn ok(message: impl Into<String>, data: T) -> Response {
        let body = ApiResponse {
            success: true,
            message: message.into(),
            data: Some(data),
        };
        (StatusCode::OK, Json(body)).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::error!("Request failed: {}", self);
        let body: ApiResponse<()> = ApiResponse {
            success: false,
            message: format!("Error: {}", self),
            data: None,
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct VerificationData {
    pub results: Vec<VerificationResult>,
    pub report: String,
}

impl VerificationData {
    fn new(results: Vec<VerificationResult>) -> Self {
        let report = report::render_verification(&results);
        Self { results, report }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReconcileRequest {
    pub authoritative: Vec<String>,
    pub diagram_text: String,
}

#[derive(Debug, Deserialize)]
pub struct DocumentReconcileRequest {
    pub authoritative: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ReconcileData {
    pub matched: IndexSet<MeasurementToken>,
    pub missing: IndexSet<MeasurementToken>,
    pub report: String,
}

#[derive(Debug, Deserialize)]
pub struct UploadParams {
    pub file_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UploadData {
    pub session_id: u64,
    pub verification: VerificationData,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatData {
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct SummaryData {
    pub summary: String,
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// 校验任意文本中的公式
pub async fn verify_text(Json(req): Json<VerifyRequest>) -> Result<Response, AppError> {
    let results = verifier::verify(&req.text)?;
    let message = format!("Checked {} expressions", results.len());
    Ok(ApiResponse::ok(message, VerificationData::new(results)))
}

/// 索引表尺寸与任意图纸文本对账
pub async fn reconcile_text(Json(req): Json<ReconcileRequest>) -> Response {
    let report = reconciler::reconcile(&req.authoritative, &req.diagram_text);
    reconcile_response(report)
}

fn reconcile_response(report: ReconciliationReport) -> Response {
    let message = format!(
        "{} matched, {} missing",
        report.matched.len(),
        report.missing.len()
    );
    let rendered = report::render_reconciliation(&report);
    ApiResponse::ok(
        message,
        ReconcileData {
            matched: report.matched,
            missing: report.missing,
            report: rendered,
        },
    )
}

/// 上传 PDF (请求体为原始字节)
pub async fn upload_document(
    State(state): State<AppState>,
    Query(params): Query<UploadParams>,
    body: Bytes,
) -> Result<Response, AppError> {
    if body.is_empty() {
        let body: ApiResponse<()> = ApiResponse {
            success: false,
            message: "Error: empty upload".to_string(),
            data: None,
        };
        return Ok((StatusCode::BAD_REQUEST, Json(body)).into_response());
    }

    tracing::info!(
        "Upload received: {} bytes ({})",
        body.len(),
        params.file_name.as_deref().unwrap_or("unnamed")
    );

    let session = state
        .documents
        .process(params.file_name, PdfSource::Bytes(body.to_vec()))
        .await?;

    Ok(ApiResponse::ok(
        "PDF processed. You can now ask questions.",
        UploadData {
            session_id: session.id,
            verification: VerificationData::new(session.verification.clone()),
        },
    ))
}

/// 会话的校验报告
pub async fn document_report(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Response, AppError> {
    let session = state.documents.session(id)?;
    let message = format!("{} mismatches", session.mismatch_count());
    Ok(ApiResponse::ok(
        message,
        VerificationData::new(session.verification.clone()),
    ))
}

/// 关闭会话
pub async fn close_document(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Response, AppError> {
    state.documents.close(id)?;
    Ok(ApiResponse::ok(format!("Session {} closed", id), id))
}

/// 会话的校验报告 (CSV)
pub async fn document_report_csv(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Response, AppError> {
    let session = state.documents.session(id)?;
    match report::verification_csv(&session.verification) {
        Ok(csv) => Ok(([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], csv).into_response()),
        Err(e) => {
            tracing::error!("CSV export failed for session {}: {}", id, e);
            let body: ApiResponse<()> = ApiResponse {
                success: false,
                message: format!("Error: {}", e),
                data: None,
            };
            Ok((StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response())
        }
    }
}

/// 用会话中的图纸文本对账
pub async fn reconcile_document(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<DocumentReconcileRequest>,
) -> Result<Response, AppError> {
    let report = state.documents.reconcile(id, &req.authoritative)?;
    Ok(reconcile_response(report))
}

/// 基于会话上下文问答; 模型错误以文本形式返回
pub async fn chat(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<ChatRequest>,
) -> Result<Response, AppError> {
    let session = state.documents.session(id)?;
    let answer = state
        .llm
        .answer_or_error(&req.message, &session.context())
        .await;
    Ok(ApiResponse::ok("OK", ChatData { answer }))
}

/// 索引表文本摘要
pub async fn summarize(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Response, AppError> {
    let session = state.documents.session(id)?;
    let summary = state.llm.summarize(&session.index_text).await?;
    Ok(ApiResponse::ok("OK", SummaryData { summary }))
}
