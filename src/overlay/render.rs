// game-translation-assistant/src/overlay/render.rs

// ============================================================================
// RENDERIZACAO DO CORPO DA JANELA
// ============================================================================
// De cima para baixo: dica de hotkeys, aviso de OCR, entrada + botões,
// preview da captura e resultado da tradução.
// ============================================================================

use eframe::egui::{self, Color32, RichText, TextEdit, TextureHandle};
use image::imageops::FilterType;

use crate::app_state::AppState;
use crate::geometry;
use crate::theme::Theme;

/// Tamanho máximo do preview
pub const PREVIEW_MAX: (u32, u32) = (300, 150);

const WARNING_BG: Color32 = Color32::from_rgb(0xFF, 0xF3, 0xCD);
const WARNING_FG: Color32 = Color32::from_rgb(0x85, 0x64, 0x04);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyAction {
    None,
    Translate,
    Clear,
}

/// Textura do preview, recriada quando a captura muda
pub struct PreviewTexture {
    generation: u64,
    texture: Option<TextureHandle>,
}

impl PreviewTexture {
    pub fn new() -> Self {
        PreviewTexture {
            generation: 0,
            texture: None,
        }
    }

    fn sync(&mut self, ctx: &egui::Context, state: &AppState) -> Option<&TextureHandle> {
        if self.generation != state.preview_generation {
            self.generation = state.preview_generation;
            self.texture = state.preview.as_ref().map(|image| {
                let (w, h) = geometry::fit_within(
                    image.width(),
                    image.height(),
                    PREVIEW_MAX.0,
                    PREVIEW_MAX.1,
                );
                let resized = image::imageops::resize(image, w, h, FilterType::Lanczos3);
                let color = egui::ColorImage::from_rgb(
                    [resized.width() as usize, resized.height() as usize],
                    resized.as_raw(),
                );
                ctx.load_texture("capture_preview", color, egui::TextureOptions::LINEAR)
            });
        }

        self.texture.as_ref()
    }
}

/// Moldura com título ao estilo "LabelFrame"
fn section(ui: &mut egui::Ui, title: &str, theme: &Theme, add: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::group(ui.style())
        .stroke(egui::Stroke::new(1.0, theme.border))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(title).strong().color(theme.fg));
            add(ui);
        });
}

pub fn render_body(
    ui: &mut egui::Ui,
    state: &mut AppState,
    theme: &Theme,
    preview: &mut PreviewTexture,
) -> BodyAction {
    let mut action = BodyAction::None;

    // ───────────────────────────────────────────────────
    // DICA DE HOTKEYS
    // ───────────────────────────────────────────────────
    ui.label(
        RichText::new("F10: capturar região | F9: esconder/mostrar | ESC: sair")
            .small()
            .color(theme.fg),
    );

    // ───────────────────────────────────────────────────
    // AVISO DE OCR
    // ───────────────────────────────────────────────────
    if !state.ocr_available {
        egui::Frame::none()
            .fill(WARNING_BG)
            .inner_margin(6.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(
                    RichText::new("⚠️ Tesseract OCR não configurado - apenas entrada manual")
                        .color(WARNING_FG),
                );
            });
    }

    ui.add_space(4.0);

    // ───────────────────────────────────────────────────
    // ENTRADA
    // ───────────────────────────────────────────────────
    section(ui, "Texto de entrada", theme, |ui| {
        egui::Frame::none().fill(theme.input_bg).show(ui, |ui| {
            egui::ScrollArea::vertical()
                .id_source("input_scroll")
                .max_height(120.0)
                .show(ui, |ui| {
                    ui.add(
                        TextEdit::multiline(&mut state.input)
                            .desired_rows(5)
                            .desired_width(f32::INFINITY)
                            .frame(false)
                            .text_color(theme.input_fg),
                    );
                });
        });

        ui.horizontal(|ui| {
            if ui.button("🌐 Traduzir").clicked() {
                action = BodyAction::Translate;
            }
            if ui.button("🗑 Limpar").clicked() {
                action = BodyAction::Clear;
            }
        });
    });

    ui.add_space(4.0);

    // ───────────────────────────────────────────────────
    // PREVIEW
    // ───────────────────────────────────────────────────
    section(ui, "Prévia da captura", theme, |ui| {
        ui.vertical_centered(|ui| match preview.sync(ui.ctx(), state) {
            Some(texture) => {
                ui.image((texture.id(), texture.size_vec2()));
            }
            None => {
                ui.label(RichText::new("Sem captura").color(theme.fg));
            }
        });
    });

    ui.add_space(4.0);

    // ───────────────────────────────────────────────────
    // RESULTADO
    // ───────────────────────────────────────────────────
    section(ui, "Resultado da tradução", theme, |ui| {
        egui::Frame::none().fill(theme.text_bg).show(ui, |ui| {
            egui::ScrollArea::vertical()
                .id_source("output_scroll")
                .show(ui, |ui| {
                    // &str: selecionável, mas não editável
                    let mut output = state.output.as_str();
                    ui.add(
                        TextEdit::multiline(&mut output)
                            .desired_rows(10)
                            .desired_width(f32::INFINITY)
                            .frame(false)
                            .text_color(theme.text_fg),
                    );
                });
        });
    });

    action
}
