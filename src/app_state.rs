// game-translation-assistant/src/app_state.rs

// ============================================================================
// MÓDULO APP STATE - Estado da janela principal
// ============================================================================
// Contém:
// - AppCommand: comandos vindos da thread de hotkeys
// - status: textos da barra de status
// - AppState: conteúdo dos painéis (entrada, resultado, preview, status)
//
// O AppState só é tocado pela thread da UI. As threads de tradução nunca
// mexem nele: mandam `TranslationFinished` pelo canal e a UI aplica.
// ============================================================================

use image::RgbImage;

use crate::region_selector::CancelReason;
use crate::translator::TranslationFinished;

// ============================================================================
// COMANDOS ENTRE THREADS
// ============================================================================

/// Comandos que a thread de hotkeys envia para a thread da UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// F10: inicia a captura de região
    StartCapture,
    /// F9: esconde/mostra a janela
    ToggleVisibility,
}

// ============================================================================
// TEXTOS DA UI
// ============================================================================

pub mod status {
    pub const READY: &str = "Pronto - pressione F10 para capturar ou digite o texto";
    pub const READY_NO_OCR: &str = "Pronto - OCR não configurado, apenas entrada manual";
    pub const CAPTURE_PROMPT: &str = "Preparando captura... clique e arraste para selecionar";
    pub const TOO_SMALL: &str = "Região muito pequena, selecione novamente";
    pub const CANCELLED: &str = "Captura cancelada";
    pub const OCR_SKIPPED: &str = "Captura concluída, mas sem reconhecimento (OCR não configurado)";
    pub const NOTHING_RECOGNIZED: &str = "Nenhum texto reconhecido";
    pub const EMPTY_INPUT: &str = "Digite o texto a traduzir";
    pub const TRANSLATING: &str = "Traduzindo...";
    pub const TRANSLATED: &str = "✅ Tradução concluída";
    pub const TRANSLATION_FAILED: &str = "❌ Falha na tradução";
    pub const CLEARED: &str = "Limpo";
    pub const HIDDEN: &str = "Janela escondida - pressione F9 para restaurar";
    pub const SHOWN: &str = "Janela visível";

    /// Texto colocado na entrada quando não há OCR
    pub const MANUAL_INPUT_NOTICE: &str = "⚠️ OCR não configurado, digite o texto a traduzir";
    /// Placeholder do painel de resultado enquanto a API responde
    pub const THINKING: &str = "🧠 Pensando...";

    pub fn recognized(method: &str, chars: usize) -> String {
        format!("Reconhecido ({}): {} caracteres", method, chars)
    }

    pub fn nothing_recognized_saved(path: &str) -> String {
        format!("Nenhum texto reconhecido, imagem salva em {}", path)
    }

    pub fn capture_failed(error: &str) -> String {
        format!("❌ Falha na captura: {}", error)
    }

    pub fn settings_applied(family: &str, size: u32) -> String {
        format!("Configurações aplicadas - fonte: {}, tamanho: {}", family, size)
    }
}

// ============================================================================
// ESTADO DOS PAINÉIS
// ============================================================================

pub struct AppState {
    /// Texto de entrada (editável)
    pub input: String,
    /// Painel de resultado (só leitura para o usuário)
    pub output: String,
    pub status: String,
    /// Último recorte capturado (None = "sem captura")
    pub preview: Option<RgbImage>,
    /// Incrementado a cada preview novo (a UI recria a textura)
    pub preview_generation: u64,
    /// Resultado da verificação do Tesseract na inicialização
    pub ocr_available: bool,
}

impl AppState {
    pub fn new(ocr_available: bool) -> Self {
        AppState {
            input: String::new(),
            output: String::new(),
            status: if ocr_available {
                status::READY
            } else {
                status::READY_NO_OCR
            }
            .to_string(),
            preview: None,
            preview_generation: 0,
            ocr_available,
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = text.into();
    }

    pub fn set_preview(&mut self, image: RgbImage) {
        self.preview = Some(image);
        self.preview_generation += 1;
    }

    /// Botão "Limpar"
    pub fn clear(&mut self) {
        self.input.clear();
        self.output.clear();
        self.preview = None;
        self.preview_generation += 1;
        self.set_status(status::CLEARED);
    }

    /// Seleção terminou sem região: entrada e resultado ficam como estavam
    pub fn capture_cancelled(&mut self, reason: CancelReason) {
        match reason {
            CancelReason::TooSmall => {
                info!("⚠️  Região muito pequena");
                self.set_status(status::TOO_SMALL);
            }
            CancelReason::User => self.set_status(status::CANCELLED),
            // O status com o erro já foi definido na falha da captura
            CancelReason::CaptureFailed => {}
        }
    }

    /// Pedido de tradução disparado
    pub fn translation_started(&mut self, request_id: u64) {
        debug!("   Aguardando resposta #{}", request_id);
        self.output = status::THINKING.to_string();
        self.set_status(status::TRANSLATING);
    }

    /// Aplica um resultado vindo do canal. Quem chega por último fica.
    pub fn apply_translation(&mut self, finished: TranslationFinished) {
        debug!("   Aplicando resposta #{}", finished.request_id);

        match finished.outcome {
            Ok(text) => {
                self.output = text;
                self.set_status(status::TRANSLATED);
            }
            Err(message) => {
                self.output = message;
                self.set_status(status::TRANSLATION_FAILED);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_status_reflects_ocr() {
        assert_eq!(AppState::new(true).status, status::READY);
        assert_eq!(AppState::new(false).status, status::READY_NO_OCR);
    }

    #[test]
    fn clear_resets_panes() {
        let mut state = AppState::new(true);
        state.input = "hello".into();
        state.output = "olá".into();
        state.set_preview(RgbImage::new(2, 2));

        state.clear();

        assert!(state.input.is_empty());
        assert!(state.output.is_empty());
        assert!(state.preview.is_none());
        assert_eq!(state.status, status::CLEARED);
    }

    #[test]
    fn cancelled_selection_keeps_panes_untouched() {
        let mut state = AppState::new(true);
        state.input = "texto anterior".into();
        state.output = "tradução anterior".into();

        state.capture_cancelled(CancelReason::TooSmall);
        assert_eq!(state.status, status::TOO_SMALL);
        assert_eq!(state.input, "texto anterior");
        assert_eq!(state.output, "tradução anterior");

        state.capture_cancelled(CancelReason::User);
        assert_eq!(state.status, status::CANCELLED);
        assert_eq!(state.input, "texto anterior");
        assert_eq!(state.output, "tradução anterior");
    }

    #[test]
    fn failed_capture_keeps_error_status() {
        let mut state = AppState::new(true);
        state.set_status(status::capture_failed("sem monitor"));

        state.capture_cancelled(CancelReason::CaptureFailed);
        assert_eq!(state.status, status::capture_failed("sem monitor"));
    }

    #[test]
    fn thinking_placeholder_is_replaced_in_arrival_order() {
        let mut state = AppState::new(true);
        state.translation_started(1);
        state.translation_started(2);
        assert_eq!(state.output, status::THINKING);

        state.apply_translation(TranslationFinished {
            request_id: 2,
            outcome: Ok("segundo".into()),
        });
        state.apply_translation(TranslationFinished {
            request_id: 1,
            outcome: Err("❌ Falha na requisição à API: timeout".into()),
        });

        assert_eq!(state.output, "❌ Falha na requisição à API: timeout");
        assert_eq!(state.status, status::TRANSLATION_FAILED);
    }
}
