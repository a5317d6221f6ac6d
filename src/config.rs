use serde::{Deserialize, Serialize};

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub ocr: OcrConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 上传 PDF 的最大字节数
    pub max_upload_bytes: usize,
}

/// Ollama 服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub host: String,
    pub model: String,
    pub timeout_secs: u64,
}

/// OCR 配置 (pdftoppm + tesseract)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrConfig {
    /// PDF 无文本层时是否退回 OCR
    pub ocr_if_empty: bool,
    pub lang: String,
    pub dpi: u32,
    pub pdftoppm_cmd: String,
    pub tesseract_cmd: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            max_upload_bytes: 50 * 1024 * 1024,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost:11434".to_string(),
            model: "llama3".to_string(),
            timeout_secs: 300,
        }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            ocr_if_empty: true,
            lang: "eng".to_string(),
            dpi: 300,
            pdftoppm_cmd: "pdftoppm".to_string(),
            tesseract_cmd: "tesseract".to_string(),
        }
    }
}

impl AppConfig {
    /// 加载配置: 默认值 -> cad-verify.toml (可选) -> CADV__ 前缀环境变量
    ///
    /// 同时兼容 OLLAMA_HOST / LLM_MODEL / SERVER_HOST / SERVER_PORT。
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("cad-verify")
    }

    pub fn load_from(file_stem: &str) -> Result<Self, config::ConfigError> {
        let d = AppConfig::default();

        config::Config::builder()
            .set_default("server.host", d.server.host)?
            .set_default("server.port", i64::from(d.server.port))?
            .set_default("server.max_upload_bytes", d.server.max_upload_bytes as i64)?
            .set_default("llm.host", d.llm.host)?
            .set_default("llm.model", d.llm.model)?
            .set_default("llm.timeout_secs", d.llm.timeout_secs as i64)?
            .set_default("ocr.ocr_if_empty", d.ocr.ocr_if_empty)?
            .set_default("ocr.lang", d.ocr.lang)?
            .set_default("ocr.dpi", i64::from(d.ocr.dpi))?
            .set_default("ocr.pdftoppm_cmd", d.ocr.pdftoppm_cmd)?
            .set_default("ocr.tesseract_cmd", d.ocr.tesseract_cmd)?
            .add_source(config::File::with_name(file_stem).required(false))
            .add_source(
                config::Environment::with_prefix("CADV")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option(
                "server.port",
                std::env::var("SERVER_PORT")
                    .ok()
                    .and_then(|p| p.parse::<u16>().ok())
                    .map(i64::from),
            )?
            .set_override_option("llm.host", std::env::var("OLLAMA_HOST").ok())?
            .set_override_option("llm.model", std::env::var("LLM_MODEL").ok())?
            .build()?
            .try_deserialize()
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_local_ollama_setup() {
        let config = AppConfig::default();
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.llm.host, "http://localhost:11434");
        assert_eq!(config.llm.timeout_secs, 300);
        assert_eq!(config.ocr.dpi, 300);
        assert_eq!(config.ocr.lang, "eng");
        assert!(config.ocr.ocr_if_empty);
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let stem = dir.path().join("cad-verify");
        std::fs::write(
            stem.with_extension("toml"),
            "[ocr]\ndpi = 150\nlang = \"deu\"\n\n[llm]\ntimeout_secs = 30\n",
        )
        .unwrap();

        let config = AppConfig::load_from(stem.to_str().unwrap()).unwrap();
        assert_eq!(config.ocr.dpi, 150);
        assert_eq!(config.ocr.lang, "deu");
        assert_eq!(config.llm.timeout_secs, 30);
        assert_eq!(config.ocr.tesseract_cmd, "tesseract");
    }
}
