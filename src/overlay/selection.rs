// game-translation-assistant/src/overlay/selection.rs

// ============================================================================
// OVERLAY DE SELEÇÃO DE REGIÃO
// ============================================================================
// Viewport imediato (sem bordas, sempre no topo) cobrindo a caixa combinada
// de todos os monitores, com a screenshot do desktop escurecida de fundo.
// Os eventos do mouse/teclado viram eventos da CaptureSession.
// ============================================================================

use eframe::egui::{
    self, pos2, Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke, TextureHandle, Vec2,
    ViewportBuilder, ViewportClass, ViewportId,
};

use crate::geometry::{self, Monitor, ScreenRect};
use crate::region_selector::{self, CaptureSession};

const DIM: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 100);
const SELECTION_STROKE: Color32 = Color32::RED;
const LABEL_COLOR: Color32 = Color32::YELLOW;

/// Screenshot do desktop já enviada para a GPU
pub struct SnapshotTexture {
    pub bounds: ScreenRect,
    pub monitors: Vec<Monitor>,
    pub texture: TextureHandle,
}

/// Mostra o overlay por um frame e repassa os eventos para a sessão.
///
/// `points_per_unit` converte as unidades do desktop para pontos do egui
/// (tamanho/posição do viewport).
pub fn show_overlay(
    ctx: &egui::Context,
    session: &mut CaptureSession,
    snapshot: &SnapshotTexture,
    points_per_unit: f32,
) {
    let bounds = snapshot.bounds;

    let builder = ViewportBuilder::default()
        .with_title("Seleção de Região")
        .with_position(pos2(
            bounds.x as f32 * points_per_unit,
            bounds.y as f32 * points_per_unit,
        ))
        .with_inner_size(Vec2::new(
            bounds.width as f32 * points_per_unit,
            bounds.height as f32 * points_per_unit,
        ))
        .with_decorations(false)
        .with_always_on_top()
        .with_resizable(false)
        .with_taskbar(false);

    ctx.show_viewport_immediate(
        ViewportId::from_hash_of("region_selection"),
        builder,
        |ctx, class| {
            if matches!(class, ViewportClass::Embedded) {
                trace!("   Backend sem suporte a múltiplas janelas, overlay embutido");
            }

            egui::CentralPanel::default()
                .frame(egui::Frame::none())
                .show(ctx, |ui| draw_and_handle(ui, session, snapshot));

            // ESC ou fechar pelo sistema cancelam
            let cancel = ctx.input(|i| {
                i.key_pressed(egui::Key::Escape) || i.viewport().close_requested()
            });
            if cancel {
                info!("❌ Seleção cancelada");
                session.cancel();
            }
        },
    );
}

fn draw_and_handle(ui: &mut egui::Ui, session: &mut CaptureSession, snapshot: &SnapshotTexture) {
    let full = ui.max_rect();
    let pixels_per_point = ui.ctx().pixels_per_point();
    let painter = ui.painter();

    // ============================================================
    // FUNDO (Screenshot escurecida)
    // ============================================================
    painter.image(
        snapshot.texture.id(),
        full,
        Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
        Color32::WHITE,
    );
    painter.rect_filled(full, 0.0, DIM);

    // ============================================================
    // INSTRUÇÕES
    // ============================================================
    painter.text(
        pos2(20.0, 30.0),
        Align2::LEFT_TOP,
        "🎯 SELEÇÃO DE REGIÃO",
        FontId::proportional(24.0),
        Color32::WHITE,
    );
    painter.text(
        pos2(20.0, 60.0),
        Align2::LEFT_TOP,
        "Clique e arraste para selecionar o texto | ESC para cancelar",
        FontId::proportional(16.0),
        Color32::LIGHT_GRAY,
    );

    // ============================================================
    // MOUSE -> EVENTOS DA SESSÃO (unidades do desktop, locais ao overlay)
    // ============================================================
    let bounds = &snapshot.bounds;
    let monitors = &snapshot.monitors;
    let to_local = |pos: Pos2| -> (i32, i32) {
        geometry::overlay_to_desktop((pos.x, pos.y), pixels_per_point, bounds, monitors)
    };

    let response = ui.interact(full, egui::Id::new("region_selector"), Sense::drag());

    if response.drag_started() {
        if let Some(pos) = response.interact_pointer_pos() {
            info!("🖱️  Início da seleção: ({:.0}, {:.0})", pos.x, pos.y);
            session.pointer_down(to_local(pos));
        }
    }
    if response.dragged() {
        if let Some(pos) = response.interact_pointer_pos() {
            session.pointer_moved(to_local(pos));
        }
    }
    if response.drag_stopped() {
        let pos = response
            .interact_pointer_pos()
            .or_else(|| ui.ctx().input(|i| i.pointer.latest_pos()));
        if let Some(pos) = pos {
            session.pointer_up(to_local(pos));
        }
    }

    // ============================================================
    // RETÂNGULO + RÓTULO "W x H"
    // ============================================================
    if let Some(local) = session.current_rect() {
        let to_points = |x: i32, y: i32| {
            let (px, py) =
                geometry::desktop_to_overlay((x, y), pixels_per_point, bounds, monitors);
            pos2(px, py)
        };

        let corners = [
            to_points(local.x, local.y),
            to_points(local.right(), local.y),
            to_points(local.right(), local.bottom()),
            to_points(local.x, local.bottom()),
            to_points(local.x, local.y),
        ];
        ui.painter().extend(Shape::dashed_line(
            &corners,
            Stroke::new(2.0, SELECTION_STROKE),
            4.0,
            2.0,
        ));

        let (label_x, label_y) = region_selector::label_position(&local);
        ui.painter().text(
            to_points(label_x.round() as i32, label_y),
            Align2::CENTER_CENTER,
            region_selector::size_label(&local),
            FontId::proportional(14.0),
            LABEL_COLOR,
        );
    }
}
