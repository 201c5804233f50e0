// game-translation-assistant/src/overlay/capture.rs

// ============================================================================
// FLUXO DE CAPTURA (dirigido frame a frame pela CaptureSession)
// ============================================================================
//
//   Idle ──F10──▶ Capturing ──screenshot──▶ Selecting ──soltar──▶ Committed
//                     │                         │                     │
//                     └── falha ──▶ Cancelled ◀─┴── ESC / < 10px       │
//                                       │                              │
//                                       └──────▶ Idle ◀── OCR + tradução
//
// A janela principal some antes da screenshot e o overlay de seleção some
// antes da captura final, por isso os dois passos esperam HIDE_DELAY.
//
// ============================================================================

use std::time::{Duration, Instant};

use eframe::egui;

use super::selection::{self, SnapshotTexture};
use super::TranslatorApp;
use crate::app_state::status;
use crate::ocr::OcrEngine;
use crate::processing;
use crate::region_selector::CaptureState;
use crate::screenshot::{self, DesktopSnapshot};

/// Tempo para o compositor tirar a janela da tela
const HIDE_DELAY: Duration = Duration::from_millis(150);

fn upload_snapshot(ctx: &egui::Context, desktop: &DesktopSnapshot) -> SnapshotTexture {
    let size = [desktop.image.width() as usize, desktop.image.height() as usize];
    let color = egui::ColorImage::from_rgba_unmultiplied(size, desktop.image.as_raw());

    SnapshotTexture {
        bounds: desktop.bounds,
        monitors: desktop.monitors.clone(),
        texture: ctx.load_texture("desktop_snapshot", color, egui::TextureOptions::LINEAR),
    }
}

impl TranslatorApp {
    /// F10 / comando de captura
    pub(super) fn request_capture(&mut self, ctx: &egui::Context) {
        if self.session.is_active() {
            debug!("   Captura já em andamento, ignorando");
            return;
        }

        if !self.state.ocr_available {
            info!("⚠️  OCR indisponível, pedindo confirmação...");
            self.confirm_without_ocr = true;
            ctx.request_repaint();
            return;
        }

        self.begin_capture(ctx);
    }

    pub(super) fn begin_capture(&mut self, ctx: &egui::Context) {
        info!("");
        info!("🎯 ============================================");
        info!("🎯 INICIANDO CAPTURA DE REGIÃO");
        info!("🎯 ============================================");

        self.state.set_status(status::CAPTURE_PROMPT);
        self.hide_window(ctx);
        self.session.begin();
        self.schedule(ctx);
    }

    fn schedule(&mut self, ctx: &egui::Context) {
        self.ready_at = Some(Instant::now() + HIDE_DELAY);
        ctx.request_repaint_after(HIDE_DELAY);
    }

    /// `true` quando a espera agendada já passou (ou não há espera)
    fn delay_elapsed(&mut self, ctx: &egui::Context) -> bool {
        let Some(at) = self.ready_at else {
            return true;
        };

        let now = Instant::now();
        if now >= at {
            self.ready_at = None;
            true
        } else {
            ctx.request_repaint_after(at - now);
            false
        }
    }

    /// Avança a sessão um passo; chamado em todo frame
    pub(super) fn drive_capture(&mut self, ctx: &egui::Context) {
        match self.session.state().clone() {
            CaptureState::Idle => {}

            CaptureState::Capturing => {
                if !self.delay_elapsed(ctx) {
                    return;
                }

                match screenshot::capture_desktop() {
                    Ok(desktop) => {
                        self.snapshot_texture = Some(upload_snapshot(ctx, &desktop));
                        self.session.snapshot_taken(desktop.bounds);
                        self.desktop = Some(desktop);
                    }
                    Err(e) => {
                        error!("❌ Erro ao capturar desktop: {:#}", e);
                        self.state
                            .set_status(status::capture_failed(&format!("{:#}", e)));
                        self.session.capture_failed();
                    }
                }
                ctx.request_repaint();
            }

            CaptureState::Selecting { .. } => {
                let Some(texture) = self.snapshot_texture.as_ref() else {
                    self.session.cancel();
                    ctx.request_repaint();
                    return;
                };

                // Unidades do desktop -> pontos do egui (só o zoom da UI muda a relação)
                let points_per_unit = 1.0 / ctx.zoom_factor();
                selection::show_overlay(ctx, &mut self.session, texture, points_per_unit);

                if let CaptureState::Committed(rect) = self.session.state() {
                    info!(
                        "✅ Região selecionada: {}x{} na posição ({}, {})",
                        rect.width, rect.height, rect.x, rect.y
                    );
                    self.schedule(ctx);
                } else {
                    ctx.request_repaint();
                }
            }

            CaptureState::Committed(rect) => {
                if !self.delay_elapsed(ctx) {
                    return;
                }

                // Captura nova em resolução nativa; se falhar, recorta a screenshot
                let image = match screenshot::capture_rect(rect) {
                    Ok(image) => Some(image),
                    Err(e) => {
                        warn!("⚠️  {:#}, usando a screenshot do desktop", e);
                        self.desktop.as_ref().and_then(|desktop| desktop.crop(rect))
                    }
                };

                self.finish_capture(ctx);

                let Some(image) = image else {
                    self.state
                        .set_status(status::capture_failed("região fora dos monitores"));
                    return;
                };

                let engine = self.engine.as_ref().map(|e| e as &dyn OcrEngine);
                let translate = processing::process_capture(
                    &mut self.state,
                    image,
                    engine,
                    &self.settings.ocr,
                    processing::DEBUG_SCREENSHOT,
                );
                if translate {
                    processing::request_translation(&mut self.state, &self.translator);
                }
            }

            CaptureState::Cancelled(reason) => {
                self.state.capture_cancelled(reason);
                self.finish_capture(ctx);
            }
        }
    }

    /// Descarta a screenshot, volta a sessão para Idle e restaura a janela
    fn finish_capture(&mut self, ctx: &egui::Context) {
        self.snapshot_texture = None;
        self.desktop = None;
        self.ready_at = None;
        self.session.reset();
        self.show_window(ctx);
        ctx.request_repaint();
    }
}
