// game-translation-assistant/src/processing.rs

// ============================================================================
// MÓDULO PROCESSING - Pipeline depois da seleção
// ============================================================================
// Contém as funções que fazem o pipeline completo:
// recorte capturado → preview → OCR → entrada → tradução
//
// Captura e OCR rodam na thread da UI (bloqueiam); só a tradução vai para
// uma thread separada.
// ============================================================================

use image::RgbImage;

use crate::app_state::{status, AppState};
use crate::config::OcrSettings;
use crate::ocr::{self, OcrEngine};
use crate::screenshot;
use crate::translator::Translator;

/// Onde o recorte é salvo quando o OCR não encontra nada
pub const DEBUG_SCREENSHOT: &str = "debug_screenshot.png";

/// Processa um recorte recém-capturado:
/// 1. Mostra no preview
/// 2. Roda o OCR (se disponível)
/// 3. Coloca o texto na entrada
///
/// Retorna `true` quando há texto novo na entrada e a tradução deve começar.
pub fn process_capture(
    state: &mut AppState,
    image: RgbImage,
    engine: Option<&dyn OcrEngine>,
    settings: &OcrSettings,
    debug_path: &str,
) -> bool {
    info!("🖼️  [1/3] Recorte {}x{} no preview", image.width(), image.height());

    let Some(engine) = engine else {
        // Sem Tesseract: só preview, o usuário digita o texto
        state.set_preview(image);
        state.input = status::MANUAL_INPUT_NOTICE.to_string();
        state.set_status(status::OCR_SKIPPED);
        warn!("⚠️  OCR indisponível, reconhecimento pulado");
        return false;
    };

    info!("🔍 [2/3] Executando OCR...");
    let recognition = ocr::recognize_image(engine, &image, settings);

    match recognition {
        Some(found) => {
            let chars = found.text.chars().count();
            info!("✅ Texto reconhecido ({}, {} caracteres)", found.method, chars);
            info!("   📝 {}", found.text);

            state.set_preview(image);
            state.input = found.text;
            state.set_status(status::recognized(&found.method, chars));
            true
        }
        None => {
            info!("⚠️  Nenhum texto detectado!");

            match screenshot::save_debug(&image, debug_path) {
                Ok(()) => state.set_status(status::nothing_recognized_saved(debug_path)),
                Err(e) => {
                    warn!("⚠️  {:#}", e);
                    state.set_status(status::NOTHING_RECOGNIZED);
                }
            }

            state.set_preview(image);
            false
        }
    }
}

/// Traduz o conteúdo atual da entrada.
///
/// Entrada vazia só muda o status.
pub fn request_translation(state: &mut AppState, translator: &Translator) {
    info!("🌐 [3/3] Enviando para tradução...");

    match translator.translate(&state.input) {
        Some(request_id) => state.translation_started(request_id),
        None => {
            info!("⚠️  Entrada vazia, nada para traduzir");
            state.set_status(status::EMPTY_INPUT);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::translator::{ChatClient, ChatRequest, TranslateError, TranslationFinished};
    use anyhow::Result;
    use crossbeam_channel::unbounded;
    use image::GrayImage;
    use std::sync::Arc;
    use std::time::Duration;

    struct FixedEngine(&'static str);

    impl OcrEngine for FixedEngine {
        fn image_to_text(&self, _image: &GrayImage, _language: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct EchoClient;

    impl ChatClient for EchoClient {
        fn complete(&self, request: &ChatRequest) -> Result<String, TranslateError> {
            Ok(request.messages[1].content.to_uppercase())
        }
    }

    fn crop() -> RgbImage {
        RgbImage::new(40, 20)
    }

    #[test]
    fn recognized_text_goes_to_input() {
        let mut state = AppState::new(true);
        let engine = FixedEngine("  Hello \n world ");

        let start = process_capture(
            &mut state,
            crop(),
            Some(&engine),
            &OcrSettings::default(),
            DEBUG_SCREENSHOT,
        );

        assert!(start);
        assert_eq!(state.input, "Hello world");
        assert_eq!(state.status, "Reconhecido (adaptive_eng): 11 caracteres");
        assert!(state.preview.is_some());
    }

    #[test]
    fn nothing_recognized_saves_debug_image() {
        let path = std::env::temp_dir().join("gta_debug_screenshot_test.png");
        let path = path.to_string_lossy().into_owned();
        let mut state = AppState::new(true);
        state.input = "anterior".into();

        let start = process_capture(
            &mut state,
            crop(),
            Some(&FixedEngine("")),
            &OcrSettings::default(),
            &path,
        );

        assert!(!start);
        assert_eq!(state.input, "anterior");
        assert_eq!(state.status, status::nothing_recognized_saved(&path));
        assert!(std::path::Path::new(&path).exists());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn debug_save_failure_only_changes_status() {
        let mut state = AppState::new(true);

        let start = process_capture(
            &mut state,
            crop(),
            Some(&FixedEngine("")),
            &OcrSettings::default(),
            "no/such/dir/debug_screenshot.png",
        );

        assert!(!start);
        assert_eq!(state.status, status::NOTHING_RECOGNIZED);
        assert!(state.preview.is_some());
    }

    #[test]
    fn without_ocr_user_types_manually() {
        let mut state = AppState::new(false);

        let start = process_capture(
            &mut state,
            crop(),
            None,
            &OcrSettings::default(),
            DEBUG_SCREENSHOT,
        );

        assert!(!start);
        assert_eq!(state.input, status::MANUAL_INPUT_NOTICE);
        assert_eq!(state.status, status::OCR_SKIPPED);
        assert!(state.preview.is_some());
    }

    #[test]
    fn translation_round_trip_through_channel() {
        let settings = Settings::from_ini_str(
            "[Settings]\napi_key = k\npre_prompt = P:\n",
        )
        .unwrap();
        let (tx, rx) = unbounded::<TranslationFinished>();
        let translator = Translator::new(Arc::new(settings), Arc::new(EchoClient), tx, Arc::new(|| {}));

        let mut state = AppState::new(true);
        state.input = "  hi  ".into();
        request_translation(&mut state, &translator);
        assert_eq!(state.output, status::THINKING);

        let finished = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        state.apply_translation(finished);
        assert_eq!(state.output, "P:\nHI");
        assert_eq!(state.status, status::TRANSLATED);
    }

    #[test]
    fn empty_input_only_sets_status() {
        let settings = Settings::from_ini_str("[Settings]\napi_key = k\n").unwrap();
        let (tx, rx) = unbounded();
        let translator = Translator::new(Arc::new(settings), Arc::new(EchoClient), tx, Arc::new(|| {}));

        let mut state = AppState::new(true);
        state.output = "antigo".into();
        request_translation(&mut state, &translator);

        assert_eq!(state.status, status::EMPTY_INPUT);
        assert_eq!(state.output, "antigo");
        assert!(rx.try_recv().is_err());
    }
}
