// game-translation-assistant/src/overlay/commands.rs

// ============================================================================
// PROCESSAMENTO DE COMANDOS E RESULTADOS
// ============================================================================
// Tudo que chega de outras threads (hotkeys, traduções) é aplicado aqui,
// sempre na thread da UI.
// ============================================================================

use eframe::egui;

use super::TranslatorApp;
use crate::app_state::{status, AppCommand};

impl TranslatorApp {
    /// Processa comandos pendentes enviados pela thread de hotkeys.
    pub(super) fn process_pending_commands(&mut self, ctx: &egui::Context) {
        while let Ok(command) = self.command_receiver.try_recv() {
            match command {
                AppCommand::StartCapture => self.request_capture(ctx),
                AppCommand::ToggleVisibility => self.toggle_visibility(ctx),
            }
        }
    }

    /// Aplica as traduções que terminaram (a última a chegar vence)
    pub(super) fn drain_translation_results(&mut self) {
        while let Ok(finished) = self.result_receiver.try_recv() {
            debug!("   Resultado #{} recebido", finished.request_id);
            self.state.apply_translation(finished);
        }
    }

    /// F9 / botão "−"
    pub(super) fn toggle_visibility(&mut self, ctx: &egui::Context) {
        if self.session.is_active() {
            debug!("   Captura em andamento, F9 ignorado");
            return;
        }

        if self.hidden.is_some() {
            info!("👁️  Mostrando janela");
            self.show_window(ctx);
            self.state.set_status(status::SHOWN);
        } else {
            info!("🙈 Escondendo janela");
            self.hide_window(ctx);
            self.state.set_status(status::HIDDEN);
        }
        ctx.request_repaint();
    }
}
