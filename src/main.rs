// game-translation-assistant/src/main.rs

// ============================================================================
// GAME TRANSLATION ASSISTANT - Captura, OCR e tradução de textos de jogos
// ============================================================================

#[macro_use]
extern crate log;

// ============================================================================
// DECLARAÇÃO DE MÓDULOS
// ============================================================================
mod app_state;
mod config;
mod encoding;
mod geometry;
mod hotkey;
mod ocr;
mod overlay;
mod preprocess;
mod processing;
mod region_selector;
mod runtime;
mod screenshot;
mod theme;
mod translator;

// ============================================================================
// IMPORTS
// ============================================================================
use std::sync::Arc;

use anyhow::Result;
use app_state::AppCommand;
use config::Settings;
use crossbeam_channel::unbounded;
use overlay::{chrome, TranslatorApp};

// ============================================================================
// FUNÇÃO PRINCIPAL
// ============================================================================
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("🎮 ============================================");
    info!("🎮 GAME TRANSLATION ASSISTANT v{}", env!("CARGO_PKG_VERSION"));
    info!("🎮 ============================================");
    info!("");

    // Config inválida: mensagem no stderr e código de saída 1, antes de qualquer janela
    let settings = match Settings::load() {
        Ok(settings) => Arc::new(settings),
        Err(e) => {
            error!("❌ Erro na configuração: {}", e);
            eprintln!("❌ Erro na configuração: {}", e);
            std::process::exit(1);
        }
    };

    info!("📋 Configurações:");
    info!("   🌐 API: {}", settings.api_address);
    info!("   🤖 Modelo: {}", settings.model_name);
    info!("   🌡️  Temperatura: {}", settings.temperature);
    info!("");

    // Antes de qualquer thread: a verificação do OCR mexe em PATH / TESSDATA_PREFIX
    let ocr_available = ocr::check_available(&settings.ocr);

    // Hotkeys -> UI
    let (command_sender, command_receiver) = unbounded::<AppCommand>();

    info!("✅ Sistema pronto!");
    info!("");
    info!("🎯 F10 = capturar região | F9 = esconder/mostrar | ESC = sair");
    info!("");

    // ========================================================================
    // JANELA PRINCIPAL (main thread)
    // ========================================================================
    let position = chrome::initial_position(screenshot::primary_screen_width());

    info!("🖼️  Configurando janela:");
    info!("   Posição: ({}, {})", position.x, position.y);
    info!(
        "   Tamanho: {}x{}",
        chrome::INITIAL_SIZE.x,
        chrome::INITIAL_SIZE.y
    );

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("Assistente de Tradução")
            .with_inner_size(chrome::INITIAL_SIZE)
            .with_min_inner_size(chrome::MIN_SIZE)
            .with_position(position)
            .with_always_on_top()
            .with_decorations(false)
            .with_resizable(true)
            .with_transparent(true),

        ..Default::default()
    };

    eframe::run_native(
        "Assistente de Tradução",
        options,
        Box::new(move |cc| {
            runtime::hotkeys::start_hotkey_thread(
                command_sender,
                overlay::repaint_notifier(&cc.egui_ctx),
            );

            Ok(Box::new(TranslatorApp::new(
                cc,
                settings,
                ocr_available,
                command_receiver,
            )) as Box<dyn eframe::App>)
        }),
    )
    .map_err(|e| anyhow::anyhow!("Falha ao abrir a janela: {}", e))?;

    info!("👋 Até mais!");
    Ok(())
}
