// game-translation-assistant/src/overlay/chrome.rs

// ============================================================================
// MOLDURA DA JANELA (barra de título, redimensionamento, esconder/mostrar)
// ============================================================================
// A janela não tem decoração do sistema: a barra de título é desenhada aqui
// e arrasta a janela; o canto inferior direito redimensiona.
//
// "Esconder" reduz a janela para 1x1 pixel (o loop do egui continua rodando,
// necessário para as hotkeys e para o overlay de seleção) e guarda a geometria
// para restaurar depois.
// ============================================================================

use eframe::egui::{
    self, Align2, Color32, FontId, Pos2, ResizeDirection, Sense, Stroke, Vec2, ViewportCommand,
    WindowLevel,
};

use crate::theme::Theme;

pub const INITIAL_SIZE: Vec2 = Vec2::new(400.0, 600.0);
pub const MIN_SIZE: Vec2 = Vec2::new(300.0, 400.0);
/// Distância da borda direita da tela na posição inicial
pub const INITIAL_RIGHT_MARGIN: f32 = 500.0;
pub const INITIAL_TOP: f32 = 100.0;
/// Opacidade da janela principal
pub const OPACITY: f32 = 0.95;

const GRIP_SIZE: f32 = 14.0;

/// Cor do tema com a opacidade da janela
pub fn translucent(color: Color32) -> Color32 {
    let [r, g, b, _] = color.to_array();
    Color32::from_rgba_unmultiplied(r, g, b, (OPACITY * 255.0).round() as u8)
}

/// Posição inicial: canto superior direito da tela principal
pub fn initial_position(screen_width: Option<f32>) -> Pos2 {
    let x = screen_width
        .map(|w| (w - INITIAL_RIGHT_MARGIN).max(0.0))
        .unwrap_or(100.0);
    Pos2::new(x, INITIAL_TOP)
}

// ============================================================================
// BARRA DE TÍTULO
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleBarAction {
    None,
    OpenSettings,
    Hide,
    Close,
}

pub fn title_bar(ui: &mut egui::Ui, theme: &Theme) -> TitleBarAction {
    let mut action = TitleBarAction::None;

    // Área inteira da barra arrasta a janela
    let bar = ui.max_rect();
    let drag = ui.interact(bar, ui.id().with("title_drag"), Sense::click_and_drag());
    if drag.drag_started() {
        ui.ctx().send_viewport_cmd(ViewportCommand::StartDrag);
    }

    ui.horizontal_centered(|ui| {
        ui.label(
            egui::RichText::new("🎮 Assistente de Tradução")
                .strong()
                .color(theme.fg),
        );

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.small_button("×").on_hover_text("Fechar").clicked() {
                action = TitleBarAction::Close;
            }
            if ui.small_button("−").on_hover_text("Esconder (F9)").clicked() {
                action = TitleBarAction::Hide;
            }
            if ui.small_button("⚙ Configurações").clicked() {
                action = TitleBarAction::OpenSettings;
            }
        });
    });

    action
}

/// Triângulo de redimensionamento no canto inferior direito
pub fn resize_grip(ctx: &egui::Context, theme: &Theme) {
    egui::Area::new(egui::Id::new("resize_grip"))
        .anchor(Align2::RIGHT_BOTTOM, Vec2::ZERO)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            let (rect, response) =
                ui.allocate_exact_size(Vec2::splat(GRIP_SIZE), Sense::drag());

            let stroke = Stroke::new(1.0, theme.border);
            for i in 1..=3 {
                let offset = i as f32 * 4.0;
                ui.painter().line_segment(
                    [
                        Pos2::new(rect.right() - offset, rect.bottom()),
                        Pos2::new(rect.right(), rect.bottom() - offset),
                    ],
                    stroke,
                );
            }

            let response = response.on_hover_cursor(egui::CursorIcon::ResizeSouthEast);
            if response.drag_started() {
                ctx.send_viewport_cmd(ViewportCommand::BeginResize(ResizeDirection::SouthEast));
            }
        });
}

/// Barra de status no rodapé
pub fn status_bar(ui: &mut egui::Ui, status: &str, theme: &Theme) {
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(status)
                .font(FontId::proportional(crate::theme::pt_to_px(9)))
                .color(theme.fg),
        );
    });
}

// ============================================================================
// ESCONDER / MOSTRAR
// ============================================================================

/// Posição e tamanho guardados enquanto a janela está escondida
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavedGeometry {
    pub position: Pos2,
    pub size: Vec2,
}

/// Reduz a janela para 1x1 e devolve a geometria atual
pub fn hide(ctx: &egui::Context) -> SavedGeometry {
    let (outer, inner) = ctx.input(|i| (i.viewport().outer_rect, i.viewport().inner_rect));

    let saved = SavedGeometry {
        position: outer.map(|r| r.min).unwrap_or(Pos2::new(100.0, INITIAL_TOP)),
        size: inner
            .map(|r| r.size())
            .filter(|s| s.x >= MIN_SIZE.x && s.y >= MIN_SIZE.y)
            .unwrap_or(INITIAL_SIZE),
    };

    debug!(
        "   Escondendo janela ({:.0}x{:.0} em {:.0},{:.0})",
        saved.size.x, saved.size.y, saved.position.x, saved.position.y
    );

    ctx.send_viewport_cmd(ViewportCommand::MinInnerSize(Vec2::splat(1.0)));
    ctx.send_viewport_cmd(ViewportCommand::InnerSize(Vec2::splat(1.0)));

    saved
}

/// Restaura a geometria guardada e traz a janela para frente (sempre no topo)
pub fn restore(ctx: &egui::Context, saved: SavedGeometry) {
    ctx.send_viewport_cmd(ViewportCommand::MinInnerSize(MIN_SIZE));
    ctx.send_viewport_cmd(ViewportCommand::InnerSize(saved.size));
    ctx.send_viewport_cmd(ViewportCommand::OuterPosition(saved.position));
    ctx.send_viewport_cmd(ViewportCommand::WindowLevel(WindowLevel::AlwaysOnTop));
    ctx.send_viewport_cmd(ViewportCommand::Focus);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_position_is_500_from_right_edge() {
        assert_eq!(initial_position(Some(1920.0)), Pos2::new(1420.0, 100.0));
        assert_eq!(initial_position(Some(300.0)), Pos2::new(0.0, 100.0));
        assert_eq!(initial_position(None), Pos2::new(100.0, 100.0));
    }

    #[test]
    fn translucent_keeps_color_with_95_percent_alpha() {
        let color = translucent(Color32::from_rgb(255, 255, 255));
        assert_eq!(color.a(), 242);
    }
}
