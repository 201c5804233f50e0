// game-translation-assistant/src/overlay.rs

// ============================================================================
// MÓDULO OVERLAY - Janela principal do assistente
// ============================================================================
//
// Janela sem bordas, sempre no topo e levemente transparente:
//
//   ┌ barra de título (arrasta) ─────── ⚙  −  × ┐
//   │ dica de hotkeys / aviso de OCR             │
//   │ texto de entrada + Traduzir / Limpar       │
//   │ prévia da captura                          │
//   │ resultado da tradução                      │
//   └ status ─────────────────────────────── ◢ ┘
//
// A UI roda na main thread. As hotkeys chegam por canal (AppCommand) e as
// traduções voltam por outro canal (TranslationFinished).
//
// ============================================================================

pub mod capture;
pub mod chrome;
pub mod commands;
pub mod fonts;
pub mod render;
pub mod selection;
pub mod settings_window;

use std::sync::Arc;
use std::time::Instant;

use crossbeam_channel::{unbounded, Receiver};
use eframe::egui::{self, Color32, Frame};

use crate::app_state::{status, AppCommand, AppState};
use crate::config::Settings;
use crate::ocr::TesseractEngine;
use crate::processing;
use crate::region_selector::CaptureSession;
use crate::screenshot::DesktopSnapshot;
use crate::theme::{self, Appearance};
use crate::translator::{HttpChatClient, RepaintNotifier, TranslationFinished, Translator};

use chrome::{SavedGeometry, TitleBarAction};
use fonts::FontLibrary;
use render::{BodyAction, PreviewTexture};
use selection::SnapshotTexture;
use settings_window::{SettingsAction, SettingsDraft};

/// Acorda a UI a partir de outra thread
pub fn repaint_notifier(ctx: &egui::Context) -> RepaintNotifier {
    let ctx = ctx.clone();
    Arc::new(move || ctx.request_repaint())
}

pub struct TranslatorApp {
    settings: Arc<Settings>,
    state: AppState,
    appearance: Appearance,
    fonts: FontLibrary,
    /// None = Tesseract não encontrado na inicialização
    engine: Option<TesseractEngine>,
    translator: Translator,
    command_receiver: Receiver<AppCommand>,
    result_receiver: Receiver<TranslationFinished>,

    // Captura em andamento
    session: CaptureSession,
    desktop: Option<DesktopSnapshot>,
    snapshot_texture: Option<SnapshotTexture>,
    /// Espera para a janela sumir da tela antes de capturar
    ready_at: Option<Instant>,

    preview: PreviewTexture,
    /// Some = janela escondida (1x1), com a geometria para restaurar
    hidden: Option<SavedGeometry>,
    settings_draft: Option<SettingsDraft>,
    confirm_without_ocr: bool,
}

impl TranslatorApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Arc<Settings>,
        ocr_available: bool,
        command_receiver: Receiver<AppCommand>,
    ) -> Self {
        let (result_sender, result_receiver) = unbounded::<TranslationFinished>();
        let client = Arc::new(HttpChatClient::new(&settings));
        let translator = Translator::new(
            Arc::clone(&settings),
            client,
            result_sender,
            repaint_notifier(&cc.egui_ctx),
        );

        let appearance = Appearance::default();
        let mut fonts = FontLibrary::new();
        cc.egui_ctx
            .set_fonts(fonts.definitions(&appearance.font.family, None));
        theme::apply(&cc.egui_ctx, &appearance);

        let engine = ocr_available.then(|| TesseractEngine::new(&settings.ocr));

        TranslatorApp {
            settings,
            state: AppState::new(ocr_available),
            appearance,
            fonts,
            engine,
            translator,
            command_receiver,
            result_receiver,
            session: CaptureSession::new(),
            desktop: None,
            snapshot_texture: None,
            ready_at: None,
            preview: PreviewTexture::new(),
            hidden: None,
            settings_draft: None,
            confirm_without_ocr: false,
        }
    }

    // ========================================================================
    // ESCONDER / MOSTRAR
    // ========================================================================

    fn hide_window(&mut self, ctx: &egui::Context) {
        if self.hidden.is_none() {
            self.hidden = Some(chrome::hide(ctx));
        }
    }

    fn show_window(&mut self, ctx: &egui::Context) {
        if let Some(saved) = self.hidden.take() {
            chrome::restore(ctx, saved);
        }
    }

    // ========================================================================
    // AÇÕES DA UI
    // ========================================================================

    fn handle_title_action(&mut self, ctx: &egui::Context, action: TitleBarAction) {
        match action {
            TitleBarAction::None => {}
            TitleBarAction::OpenSettings => {
                if self.settings_draft.is_none() {
                    info!("⚙️  Abrindo configurações...");
                    self.settings_draft = Some(SettingsDraft::from_appearance(&self.appearance));
                }
            }
            TitleBarAction::Hide => self.toggle_visibility(ctx),
            TitleBarAction::Close => {
                info!("👋 Encerrando...");
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }
    }

    fn handle_body_action(&mut self, action: BodyAction) {
        match action {
            BodyAction::None => {}
            BodyAction::Translate => {
                processing::request_translation(&mut self.state, &self.translator);
            }
            BodyAction::Clear => {
                info!("🗑️  Limpando painéis");
                self.state.clear();
            }
        }
    }

    fn settings_dialog(&mut self, ctx: &egui::Context) {
        let Some(draft) = self.settings_draft.as_mut() else {
            return;
        };

        match settings_window::render_settings_window(ctx, draft) {
            SettingsAction::None => {}
            SettingsAction::PreviewFamilyChanged => {
                let family = draft.family.clone();
                debug!("   Prévia da fonte: {}", family);
                ctx.set_fonts(
                    self.fonts
                        .definitions(&self.appearance.font.family, Some(&family)),
                );
            }
            SettingsAction::Apply => {
                let appearance = draft.to_appearance();
                self.settings_draft = None;

                ctx.set_fonts(self.fonts.definitions(&appearance.font.family, None));
                theme::apply(ctx, &appearance);
                self.state.set_status(status::settings_applied(
                    &appearance.font.family,
                    appearance.font.size,
                ));
                self.appearance = appearance;
            }
            SettingsAction::Cancel => {
                self.settings_draft = None;
                // Volta a prévia para a fonte atual
                ctx.set_fonts(self.fonts.definitions(&self.appearance.font.family, None));
            }
        }
    }

    fn confirm_dialog(&mut self, ctx: &egui::Context) {
        if !self.confirm_without_ocr {
            return;
        }

        let mut answer = None;
        egui::Window::new("⚠️ OCR indisponível")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label("O Tesseract não está configurado.");
                ui.label("A captura só vai mostrar a prévia, sem reconhecer o texto.");
                ui.label("Continuar mesmo assim?");
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    if ui.button("Sim").clicked() {
                        answer = Some(true);
                    }
                    if ui.button("Não").clicked() {
                        answer = Some(false);
                    }
                });
            });

        if let Some(proceed) = answer {
            self.confirm_without_ocr = false;
            if proceed {
                self.begin_capture(ctx);
            } else {
                info!("❌ Captura sem OCR recusada");
            }
        }
    }

    /// ESC fecha o diálogo aberto ou, sem diálogo, encerra o app
    fn handle_escape(&mut self, ctx: &egui::Context) {
        if !ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            return;
        }

        if self.confirm_without_ocr {
            self.confirm_without_ocr = false;
        } else if self.settings_draft.is_some() {
            self.settings_draft = None;
            ctx.set_fonts(self.fonts.definitions(&self.appearance.font.family, None));
        } else {
            info!("👋 ESC pressionado, encerrando...");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}

impl eframe::App for TranslatorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ====================================================================
        // EVENTOS DE OUTRAS THREADS
        // ====================================================================
        self.process_pending_commands(ctx);
        self.drain_translation_results();

        // ====================================================================
        // CAPTURA (pode abrir o overlay de seleção)
        // ====================================================================
        self.drive_capture(ctx);

        if self.hidden.is_some() {
            egui::CentralPanel::default()
                .frame(Frame::none())
                .show(ctx, |_ui| {});
            return;
        }

        self.handle_escape(ctx);

        let theme = self.appearance.theme;

        // ====================================================================
        // BARRA DE TÍTULO
        // ====================================================================
        let title_action = egui::TopBottomPanel::top("title_bar")
            .frame(
                Frame::none()
                    .fill(chrome::translucent(theme.label_bg))
                    .inner_margin(6.0),
            )
            .show(ctx, |ui| chrome::title_bar(ui, &theme))
            .inner;

        // ====================================================================
        // STATUS
        // ====================================================================
        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                Frame::none()
                    .fill(chrome::translucent(theme.label_bg))
                    .inner_margin(egui::Margin::symmetric(6.0, 3.0)),
            )
            .show(ctx, |ui| chrome::status_bar(ui, &self.state.status, &theme));

        // ====================================================================
        // CORPO
        // ====================================================================
        let body_action = egui::CentralPanel::default()
            .frame(
                Frame::none()
                    .fill(chrome::translucent(theme.bg))
                    .inner_margin(8.0),
            )
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_source("body_scroll")
                    .show(ui, |ui| {
                        render::render_body(ui, &mut self.state, &theme, &mut self.preview)
                    })
                    .inner
            })
            .inner;

        chrome::resize_grip(ctx, &theme);

        // ====================================================================
        // DIÁLOGOS
        // ====================================================================
        self.settings_dialog(ctx);
        self.confirm_dialog(ctx);

        self.handle_title_action(ctx, title_action);
        self.handle_body_action(body_action);

        if self.state.output == status::THINKING {
            ui_hint_waiting(ctx);
        }
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        // Fundo transparente: a opacidade vem das cores dos painéis
        Color32::TRANSPARENT.to_normalized_gamma_f32()
    }
}

/// Cursor de espera enquanto a API responde
fn ui_hint_waiting(ctx: &egui::Context) {
    ctx.output_mut(|o| o.cursor_icon = egui::CursorIcon::Progress);
}
