use crate::config::LlmConfig;
use crate::error::LlmError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 摘要时送入模型的最大字符数
const SUMMARY_INPUT_CHARS: usize = 3000;

const SUMMARY_INSTRUCTION: &str = "You are a senior mechanical design analyst. Based on the following extracted \
information from a CAD drawing, write a concise summary covering purpose, key \
components, notable dimensions, and any design considerations.\n\n";

/// 创建 HTTP 客户端 (请求超时取自配置)
pub fn create_client(config: &LlmConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: Option<ChatMessage>,
}

/// Ollama 客户端
#[derive(Debug, Clone)]
pub struct LlmClient {
    http: Client,
    host: String,
    model: String,
}

impl LlmClient {
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        Ok(Self {
            http: create_client(config)?,
            host: config.host.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// 基于上下文回答问题 (/api/generate, 非流式)
    pub async fn ask(&self, question: &str, context: &str) -> Result<String, LlmError> {
        let request = GenerateRequest {
            model: &self.model,
            prompt: build_prompt(question, context),
            stream: false,
        };

        tracing::info!(
            "Asking {} ({} context chars)",
            self.model,
            context.len()
        );

        let response: GenerateResponse = self
            .http
            .post(format!("{}/api/generate", self.host))
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response.response.ok_or(LlmError::MissingResponse("response"))
    }

    /// 问答入口: 失败时返回错误文本而不是错误
    pub async fn answer_or_error(&self, question: &str, context: &str) -> String {
        match self.ask(question, context).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!("LLM request failed: {}", e);
                format!("✘ {}", e)
            }
        }
    }

    /// 图纸摘要 (/api/chat), 只取前 3000 个字符
    pub async fn summarize(&self, text: &str) -> Result<String, LlmError> {
        let excerpt: String = text.chars().take(SUMMARY_INPUT_CHARS).collect();
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: "You are a helpful assistant.".to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: format!("{SUMMARY_INSTRUCTION}{excerpt}"),
                },
            ],
            stream: false,
        };

        let response: ChatResponse = self
            .http
            .post(format!("{}/api/chat", self.host))
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response
            .message
            .map(|m| m.content)
            .ok_or(LlmError::MissingResponse("message"))
    }
}

pub fn build_prompt(question: &str, context: &str) -> String {
    format!("{context}\n\nUser: {question}\nAssistant:")
}
