// game-translation-assistant/src/translator.rs

// ============================================================================
// MÓDULO TRANSLATOR - Tradução via chat completion (OpenAI compatível)
// ============================================================================
//
// Cada pedido de tradução roda numa thread própria (sem fila, sem pool, sem
// cancelamento). O resultado volta para a UI como mensagem num canal; a UI
// aplica na ordem de chegada, então a ÚLTIMA resposta a chegar é a que fica.
//
// Payload:
//   POST {api_address}/chat/completions
//   { model, messages: [system, user], temperature, max_tokens: 1024, stream: false }
//
// ============================================================================

use crossbeam_channel::Sender;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use thiserror::Error;

use crate::config::Settings;
use crate::encoding;

/// Limite de tokens da resposta
pub const MAX_TOKENS: u32 = 1024;

/// Prefixo das mensagens de erro mostradas no painel de resultado
pub const ERROR_PREFIX: &str = "❌ Falha na requisição à API: ";

// ============================================================================
// ESTRUTURAS DE DADOS - Chat completion
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    fn new(role: &str, content: String) -> Self {
        ChatMessage {
            role: role.to_string(),
            content,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

// ============================================================================
// ERROS
// ============================================================================

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("erro de rede: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API respondeu {status}: {body}")]
    Api { status: u16, body: String },

    #[error("resposta inválida: {0}")]
    InvalidResponse(String),

    #[error("resposta sem conteúdo")]
    EmptyResponse,

    #[error("falha ao criar runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Texto mostrado no painel de resultado quando a requisição falha
pub fn format_error(error: &TranslateError) -> String {
    format!("{}{}", ERROR_PREFIX, encoding::sanitize(&error.to_string()))
}

// ============================================================================
// CLIENTE
// ============================================================================

/// Algo que responde a um pedido de chat completion (bloqueante).
pub trait ChatClient: Send + Sync {
    fn complete(&self, request: &ChatRequest) -> Result<String, TranslateError>;
}

/// Cliente HTTP real (reqwest + runtime tokio por chamada)
pub struct HttpChatClient {
    endpoint: String,
    api_key: String,
    timeout: Duration,
}

impl HttpChatClient {
    pub fn new(settings: &Settings) -> Self {
        HttpChatClient {
            endpoint: completions_url(&settings.api_address),
            api_key: settings.api_key.clone(),
            timeout: settings.request_timeout,
        }
    }

    async fn send(&self, request: &ChatRequest) -> Result<String, TranslateError> {
        let client = reqwest::Client::builder().timeout(self.timeout).build()?;

        let response = client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        let body = encoding::lossy_utf8(&bytes);

        if !status.is_success() {
            error!("❌ API erro: {} - {}", status, body);
            return Err(TranslateError::Api {
                status: status.as_u16(),
                body: encoding::sanitize(body.trim()).into_owned(),
            });
        }

        parse_response(&body)
    }
}

impl ChatClient for HttpChatClient {
    fn complete(&self, request: &ChatRequest) -> Result<String, TranslateError> {
        // Cada thread de tradução tem seu próprio runtime
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(self.send(request))
    }
}

/// `{api_address}/chat/completions` (sem barra duplicada)
pub fn completions_url(api_address: &str) -> String {
    format!("{}/chat/completions", api_address.trim_end_matches('/'))
}

fn parse_response(body: &str) -> Result<String, TranslateError> {
    let parsed: ChatResponse =
        serde_json::from_str(body).map_err(|e| TranslateError::InvalidResponse(e.to_string()))?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(TranslateError::EmptyResponse)
}

/// Monta o payload: system = system_prompt, user = pre_prompt + "\n" + texto
pub fn build_request(settings: &Settings, text: &str) -> ChatRequest {
    let user = format!("{}\n{}", settings.pre_prompt, text);

    ChatRequest {
        model: settings.model_name.clone(),
        messages: vec![
            ChatMessage::new("system", encoding::sanitize(&settings.system_prompt).into_owned()),
            ChatMessage::new("user", encoding::sanitize(&user).into_owned()),
        ],
        temperature: settings.temperature,
        max_tokens: MAX_TOKENS,
        stream: false,
    }
}

// ============================================================================
// DESPACHO EM THREADS
// ============================================================================

/// Resultado entregue à UI
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationFinished {
    pub request_id: u64,
    /// Ok = texto traduzido, Err = mensagem de erro já formatada
    pub outcome: Result<String, String>,
}

/// Chamado depois de cada envio para acordar a UI
pub type RepaintNotifier = Arc<dyn Fn() + Send + Sync>;

pub struct Translator {
    settings: Arc<Settings>,
    client: Arc<dyn ChatClient>,
    sender: Sender<TranslationFinished>,
    notify: RepaintNotifier,
    next_id: AtomicU64,
}

impl Translator {
    pub fn new(
        settings: Arc<Settings>,
        client: Arc<dyn ChatClient>,
        sender: Sender<TranslationFinished>,
        notify: RepaintNotifier,
    ) -> Self {
        Translator {
            settings,
            client,
            sender,
            notify,
            next_id: AtomicU64::new(1),
        }
    }

    /// Dispara a tradução numa thread nova.
    ///
    /// Texto vazio (depois do trim) não dispara nada e retorna `None`.
    pub fn translate(&self, text: &str) -> Option<u64> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let request_id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = build_request(&self.settings, text);
        let client = Arc::clone(&self.client);
        let sender = self.sender.clone();
        let notify = Arc::clone(&self.notify);

        info!(
            "🌐 [#{}] Traduzindo {} caracteres com {}...",
            request_id,
            text.chars().count(),
            request.model
        );

        thread::spawn(move || {
            let outcome = match client.complete(&request) {
                Ok(translated) => {
                    info!("✅ [#{}] Tradução recebida", request_id);
                    Ok(translated)
                }
                Err(e) => {
                    error!("❌ [#{}] {}", request_id, e);
                    Err(format_error(&e))
                }
            };

            if sender
                .send(TranslationFinished {
                    request_id,
                    outcome,
                })
                .is_err()
            {
                // A UI já fechou
                debug!("   [#{}] Resultado descartado", request_id);
                return;
            }

            notify();
        });

        Some(request_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::{unbounded, Receiver};
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn settings() -> Settings {
        Settings::from_ini_str(
            "[Settings]\n\
             api_key = sk-test\n\
             api_address = https://api.example.com/\n\
             model_name = deepseek-chat\n\
             pre_prompt = Translate to Chinese:\n\
             system_prompt = You are a translator.\n\
             temperature = 0.5\n",
        )
        .unwrap()
    }

    #[test]
    fn prompt_is_pre_prompt_newline_text() {
        let request = build_request(&settings(), "Hello");

        assert_eq!(
            request.messages,
            vec![
                ChatMessage::new("system", "You are a translator.".to_string()),
                ChatMessage::new("user", "Translate to Chinese:\nHello".to_string()),
            ]
        );

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "deepseek-chat");
        assert_eq!(json["max_tokens"], 1024);
        assert_eq!(json["stream"], false);
        assert_eq!(json["temperature"], 0.5);
    }

    #[test]
    fn url_has_no_double_slash() {
        assert_eq!(
            completions_url("https://api.example.com/"),
            "https://api.example.com/chat/completions"
        );
        assert_eq!(
            completions_url("http://localhost:8080/v1"),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn control_characters_do_not_break_payload() {
        let request = build_request(&settings(), "a\u{0}b");
        assert_eq!(request.messages[1].content, "Translate to Chinese:\na\u{FFFD}b");
    }

    #[test]
    fn response_content_is_extracted() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"你好"}}]}"#;
        assert_eq!(parse_response(body).unwrap(), "你好");

        assert!(matches!(
            parse_response(r#"{"choices":[]}"#),
            Err(TranslateError::EmptyResponse)
        ));
        assert!(matches!(
            parse_response("<html>"),
            Err(TranslateError::InvalidResponse(_))
        ));
    }

    #[test]
    fn error_text_has_prefix() {
        let error = TranslateError::Api {
            status: 401,
            body: "unauthorized".to_string(),
        };
        assert_eq!(
            format_error(&error),
            "❌ Falha na requisição à API: API respondeu 401: unauthorized"
        );
    }

    /// Cliente falso: cada texto espera o teste liberar a "porta" dele
    struct GatedClient {
        gates: Mutex<HashMap<String, Receiver<()>>>,
    }

    impl ChatClient for GatedClient {
        fn complete(&self, request: &ChatRequest) -> Result<String, TranslateError> {
            let text = request.messages[1]
                .content
                .lines()
                .last()
                .unwrap_or_default()
                .to_string();
            let gate = self.gates.lock().unwrap().remove(&text);
            if let Some(gate) = gate {
                let _ = gate.recv();
            }
            Ok(format!("translated {}", text))
        }
    }

    #[test]
    fn empty_text_does_not_dispatch() {
        let (tx, rx) = unbounded();
        let client = Arc::new(GatedClient {
            gates: Mutex::new(HashMap::new()),
        });
        let translator = Translator::new(Arc::new(settings()), client, tx, Arc::new(|| {}));

        assert_eq!(translator.translate("   \n "), None);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn last_response_to_arrive_wins() {
        let (first_gate_tx, first_gate_rx) = unbounded();
        let (second_gate_tx, second_gate_rx) = unbounded();

        let mut gates = HashMap::new();
        gates.insert("first".to_string(), first_gate_rx);
        gates.insert("second".to_string(), second_gate_rx);

        let (tx, rx) = unbounded();
        let repaints = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&repaints);
        let translator = Translator::new(
            Arc::new(settings()),
            Arc::new(GatedClient {
                gates: Mutex::new(gates),
            }),
            tx,
            Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        let first_id = translator.translate("first").unwrap();
        let second_id = translator.translate("second").unwrap();
        assert_ne!(first_id, second_id);

        // O segundo pedido responde antes do primeiro
        second_gate_tx.send(()).unwrap();
        let early = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        first_gate_tx.send(()).unwrap();
        let late = rx.recv_timeout(Duration::from_secs(5)).unwrap();

        let mut output = String::new();
        for finished in [early, late] {
            output = finished.outcome.unwrap();
        }

        assert_eq!(output, "translated first");
        // Espera o notify do último envio (roda logo depois do send)
        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        while repaints.load(Ordering::SeqCst) < 2 && std::time::Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(repaints.load(Ordering::SeqCst), 2);
    }
}
