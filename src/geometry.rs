// game-translation-assistant/src/geometry.rs

// ============================================================================
// MÓDULO GEOMETRY - Retângulos do desktop virtual
// ============================================================================
// Coordenadas do desktop estão nas unidades do sistema (as mesmas de
// `display_info`): num monitor com escala 2, uma unidade = 2 pixels físicos.
// O desktop virtual pode ter origem negativa (monitor à esquerda/acima do
// principal).
// ============================================================================

/// Retângulo em unidades do desktop (origem no canto superior esquerdo)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl ScreenRect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        ScreenRect {
            x,
            y,
            width,
            height,
        }
    }

    /// Monta o retângulo a partir de dois cantos quaisquer (ordem não importa)
    pub fn from_corners(a: (i32, i32), b: (i32, i32)) -> Self {
        let left = a.0.min(b.0);
        let top = a.1.min(b.1);
        let right = a.0.max(b.0);
        let bottom = a.1.max(b.1);

        ScreenRect {
            x: left,
            y: top,
            width: (right - left) as u32,
            height: (bottom - top) as u32,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Desloca o retângulo (local -> absoluto)
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        ScreenRect {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Interseção de dois retângulos (None se não se tocam)
    pub fn intersect(&self, other: &ScreenRect) -> Option<ScreenRect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right <= left || bottom <= top {
            return None;
        }

        Some(ScreenRect::from_corners((left, top), (right, bottom)))
    }
}

/// Calcula a caixa que envolve todos os monitores (desktop virtual).
///
/// Retorna `None` se a lista estiver vazia.
pub fn combined_bounds(displays: &[ScreenRect]) -> Option<ScreenRect> {
    let first = displays.first()?;

    let (mut left, mut top, mut right, mut bottom) =
        (first.x, first.y, first.right(), first.bottom());

    for display in &displays[1..] {
        left = left.min(display.x);
        top = top.min(display.y);
        right = right.max(display.right());
        bottom = bottom.max(display.bottom());
    }

    Some(ScreenRect::from_corners((left, top), (right, bottom)))
}

// ============================================================================
// MONITORES E ESCALA (DPI)
// ============================================================================

/// Um monitor do desktop virtual e sua escala (pixels físicos por unidade)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Monitor {
    pub rect: ScreenRect,
    pub scale: f32,
}

/// Monitor que contém o ponto absoluto (x, y)
pub fn monitor_at(monitors: &[Monitor], x: i32, y: i32) -> Option<&Monitor> {
    monitors.iter().find(|m| m.rect.contains(x, y))
}

/// Converte um ponto do overlay (pontos do egui) para unidades do desktop,
/// relativas à origem de `bounds`.
///
/// Pontos * `pixels_per_point` = pixels físicos; cada monitor divide pela
/// própria escala. Vale a escala do monitor onde o ponto cai.
pub fn overlay_to_desktop(
    point: (f32, f32),
    pixels_per_point: f32,
    bounds: &ScreenRect,
    monitors: &[Monitor],
) -> (i32, i32) {
    let physical = (point.0 * pixels_per_point, point.1 * pixels_per_point);
    let with_scale = |scale: f32| {
        (
            (physical.0 / scale).round() as i32,
            (physical.1 / scale).round() as i32,
        )
    };

    for monitor in monitors {
        let local = with_scale(monitor.scale);
        if monitor.rect.contains(local.0 + bounds.x, local.1 + bounds.y) {
            return local;
        }
    }

    with_scale(monitors.first().map(|m| m.scale).unwrap_or(1.0))
}

/// Inverso de `overlay_to_desktop`: unidades locais -> pontos do overlay
pub fn desktop_to_overlay(
    local: (i32, i32),
    pixels_per_point: f32,
    bounds: &ScreenRect,
    monitors: &[Monitor],
) -> (f32, f32) {
    let scale = monitor_at(monitors, local.0 + bounds.x, local.1 + bounds.y)
        .or_else(|| monitors.first())
        .map(|m| m.scale)
        .unwrap_or(1.0);

    (
        local.0 as f32 * scale / pixels_per_point,
        local.1 as f32 * scale / pixels_per_point,
    )
}

/// Escala (largura, altura) para caber em (max_w, max_h) mantendo a proporção.
/// Usado no preview da captura.
pub fn fit_within(width: u32, height: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let ratio = (max_w as f32 / width as f32).min(max_h as f32 / height as f32);

    (
        ((width as f32 * ratio) as u32).max(1),
        ((height as f32 * ratio) as u32).max(1),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combined_bounds_covers_monitor_left_of_primary() {
        let displays = [
            ScreenRect::new(0, 0, 1920, 1080),
            ScreenRect::new(-1280, 200, 1280, 1024),
        ];

        let bounds = combined_bounds(&displays).unwrap();
        assert_eq!(bounds, ScreenRect::new(-1280, 0, 3200, 1224));
    }

    #[test]
    fn combined_bounds_of_nothing_is_none() {
        assert!(combined_bounds(&[]).is_none());
    }

    #[test]
    fn from_corners_normalizes_drag_direction() {
        let rect = ScreenRect::from_corners((300, 250), (100, 50));
        assert_eq!(rect, ScreenRect::new(100, 50, 200, 200));
    }

    #[test]
    fn intersect_clips_to_overlap() {
        let a = ScreenRect::new(0, 0, 100, 100);
        let b = ScreenRect::new(50, 80, 100, 100);
        assert_eq!(a.intersect(&b), Some(ScreenRect::new(50, 80, 50, 20)));
        assert_eq!(a.intersect(&ScreenRect::new(100, 0, 10, 10)), None);
    }

    #[test]
    fn overlay_points_on_scaled_monitor_map_to_desktop_units() {
        let monitors = [Monitor {
            rect: ScreenRect::new(0, 0, 1920, 1080),
            scale: 2.0,
        }];
        let bounds = monitors[0].rect;

        // Overlay com 2 pixels por ponto: 100pt = 200px físicos = 100 unidades
        let start = overlay_to_desktop((100.0, 100.0), 2.0, &bounds, &monitors);
        let end = overlay_to_desktop((300.0, 200.0), 2.0, &bounds, &monitors);
        assert_eq!(start, (100, 100));

        let rect = ScreenRect::from_corners(start, end).offset(bounds.x, bounds.y);
        assert_eq!(rect, ScreenRect::new(100, 100, 200, 100));

        assert_eq!(desktop_to_overlay(start, 2.0, &bounds, &monitors), (100.0, 100.0));
    }

    #[test]
    fn overlay_points_use_scale_of_monitor_under_pointer() {
        let monitors = [
            Monitor {
                rect: ScreenRect::new(0, 0, 1000, 800),
                scale: 2.0,
            },
            Monitor {
                rect: ScreenRect::new(-1000, 0, 1000, 800),
                scale: 1.0,
            },
        ];
        let bounds = combined_bounds(&[monitors[0].rect, monitors[1].rect]).unwrap();
        assert_eq!(bounds, ScreenRect::new(-1000, 0, 2000, 800));

        // Cai no monitor da esquerda (escala 1)
        assert_eq!(overlay_to_desktop((50.0, 40.0), 1.0, &bounds, &monitors), (50, 40));
        // Com escala 2 o ponto cai no monitor da direita
        assert_eq!(
            overlay_to_desktop((2400.0, 100.0), 1.0, &bounds, &monitors),
            (1200, 50)
        );
    }

    #[test]
    fn fit_within_keeps_aspect_ratio() {
        assert_eq!(fit_within(600, 150, 300, 150), (300, 75));
        assert_eq!(fit_within(100, 300, 300, 150), (50, 150));
        assert_eq!(fit_within(0, 10, 300, 150), (0, 0));
    }
}
