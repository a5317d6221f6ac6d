use cad_verify::{api, AppConfig, DocumentService, LlmClient, PdfExtractor};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 本地时间格式
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置
    let config = AppConfig::load()?;
    info!("Starting server with config: {:?}", config);

    // 创建服务
    let extractor = Arc::new(PdfExtractor::new(config.ocr.clone()));
    let documents = Arc::new(DocumentService::new(extractor));
    let llm = Arc::new(LlmClient::new(&config.llm)?);
    info!("LLM endpoint: {} (model {})", config.llm.host, llm.model());

    let app = api::router(api::AppState { documents, llm }, config.server.max_upload_bytes);

    // 启动服务器
    let addr = config.bind_addr();
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  POST /api/verify                    - verify measurement expressions");
    info!("  POST /api/reconcile                 - reconcile measurements");
    info!("  POST /api/documents                 - upload CAD PDF");
    info!("  GET  /api/documents/:id/report(.csv)");
    info!("  DELETE /api/documents/:id");
    info!("  POST /api/documents/:id/reconcile");
    info!("  POST /api/documents/:id/chat");
    info!("  POST /api/documents/:id/summary");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
