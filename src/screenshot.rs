// game-translation-assistant/src/screenshot.rs

// ============================================================================
// MÓDULO SCREENSHOT - Captura de tela (todos os monitores)
// ============================================================================
//
// Duas capturas acontecem por seleção:
//
// 1. capture_desktop() - o desktop virtual inteiro (união de todos os
//    monitores), usado como fundo escurecido do overlay de seleção
// 2. capture_rect()    - só o retângulo escolhido, em resolução nativa,
//    que vai para o preview e para o OCR
//
// Monitores à esquerda/acima do principal têm origem negativa; cada monitor
// é capturado separadamente e colado na posição certa. Retângulos estão em
// unidades do desktop (display_info); um monitor com escala 2 devolve o dobro
// de pixels, e o recorte mantém esses pixels para o OCR.
//
// ============================================================================

use anyhow::{Context, Result};
use image::{imageops, DynamicImage, ImageBuffer, Rgba, RgbImage, RgbaImage};
use screenshots::Screen;

use crate::geometry::{self, Monitor, ScreenRect};

/// Screenshot do desktop virtual inteiro
pub struct DesktopSnapshot {
    /// Caixa que envolve todos os monitores
    pub bounds: ScreenRect,
    /// Monitores e suas escalas, para converter os pontos do overlay
    pub monitors: Vec<Monitor>,
    /// Uma unidade do desktop = um pixel (reduzida em monitores com escala)
    pub image: RgbaImage,
}

impl DesktopSnapshot {
    /// Recorta um retângulo absoluto da screenshot (None se estiver fora)
    pub fn crop(&self, rect: ScreenRect) -> Option<RgbImage> {
        let inside = self.bounds.intersect(&rect)?;
        let piece = imageops::crop_imm(
            &self.image,
            (inside.x - self.bounds.x) as u32,
            (inside.y - self.bounds.y) as u32,
            inside.width,
            inside.height,
        )
        .to_image();

        Some(DynamicImage::ImageRgba8(piece).to_rgb8())
    }
}

// ============================================================================
// MONITORES
// ============================================================================

fn display_monitor(screen: &Screen) -> Monitor {
    let info = &screen.display_info;
    Monitor {
        rect: ScreenRect::new(info.x, info.y, info.width, info.height),
        scale: if info.scale_factor > 0.0 { info.scale_factor } else { 1.0 },
    }
}

/// Lista todos os monitores com seus retângulos no desktop virtual
fn list_screens() -> Result<Vec<(Screen, Monitor)>> {
    let screens = Screen::all().context("Falha ao listar monitores")?;

    if screens.is_empty() {
        anyhow::bail!("Nenhum monitor encontrado");
    }

    Ok(screens
        .into_iter()
        .map(|screen| {
            let monitor = display_monitor(&screen);
            (screen, monitor)
        })
        .collect())
}

/// Largura do monitor principal (posição inicial da janela)
pub fn primary_screen_width() -> Option<f32> {
    let screens = Screen::all().ok()?;
    let screen = screens.first()?;
    Some(screen.display_info.width as f32)
}

// ============================================================================
// CAPTURA DO DESKTOP INTEIRO
// ============================================================================

/// Captura todos os monitores e monta uma imagem só do tamanho da caixa combinada
pub fn capture_desktop() -> Result<DesktopSnapshot> {
    info!("📸 Capturando desktop virtual...");

    let screens = list_screens()?;
    let monitors: Vec<Monitor> = screens.iter().map(|(_, m)| *m).collect();
    let rects: Vec<ScreenRect> = monitors.iter().map(|m| m.rect).collect();
    let bounds = geometry::combined_bounds(&rects).context("Nenhum monitor encontrado")?;

    info!(
        "   {} monitor(es), caixa combinada {}x{} em ({}, {})",
        screens.len(),
        bounds.width,
        bounds.height,
        bounds.x,
        bounds.y
    );

    let mut pieces = Vec::with_capacity(screens.len());
    for (screen, monitor) in &screens {
        let rect = &monitor.rect;
        let buffer = screen
            .capture()
            .with_context(|| format!("Falha ao capturar monitor em ({}, {})", rect.x, rect.y))?;
        let piece = fit_to_rect(buffer_to_image(&buffer)?, rect);
        pieces.push((*rect, piece));
    }

    let image = composite(bounds, &pieces);
    info!("✅ Desktop capturado!");

    Ok(DesktopSnapshot {
        bounds,
        monitors,
        image,
    })
}

// ============================================================================
// CAPTURA DE UM RETÂNGULO (coordenadas absolutas)
// ============================================================================

/// Captura exatamente o retângulo pedido (pode atravessar monitores), em
/// pixels físicos: sem redimensionar quando cai num monitor só.
pub fn capture_rect(target: ScreenRect) -> Result<RgbImage> {
    info!(
        "📸 Capturando região: {}x{} na posição ({}, {})",
        target.width, target.height, target.x, target.y
    );

    if target.width == 0 || target.height == 0 {
        anyhow::bail!("Região vazia ({}x{})", target.width, target.height);
    }

    let mut pieces = Vec::new();
    for (screen, Monitor { rect, scale }) in list_screens()? {
        let Some(overlap) = rect.intersect(&target) else {
            continue;
        };

        let buffer = screen
            .capture_area(
                overlap.x - rect.x,
                overlap.y - rect.y,
                overlap.width,
                overlap.height,
            )
            .with_context(|| {
                format!(
                    "Falha ao capturar área {}x{} em ({}, {})",
                    overlap.width, overlap.height, overlap.x, overlap.y
                )
            })?;

        pieces.push((overlap, scale, buffer_to_image(&buffer)?));
    }

    if pieces.is_empty() {
        anyhow::bail!(
            "Região ({},{} {}x{}) está fora de todos os monitores",
            target.x,
            target.y,
            target.width,
            target.height
        );
    }

    let image = if pieces.len() == 1 {
        pieces.remove(0).2
    } else {
        composite_native(target, pieces)
    };
    info!("✅ Região capturada! ({}x{} pixels)", image.width(), image.height());

    Ok(DynamicImage::ImageRgba8(image).to_rgb8())
}

// ============================================================================
// FUNÇÕES AUXILIARES
// ============================================================================

/// Cola cada pedaço na sua posição dentro de `bounds` (fundo preto)
pub fn composite(bounds: ScreenRect, pieces: &[(ScreenRect, RgbaImage)]) -> RgbaImage {
    let mut canvas: RgbaImage =
        ImageBuffer::from_pixel(bounds.width, bounds.height, Rgba([0, 0, 0, 255]));

    for (rect, piece) in pieces {
        imageops::replace(
            &mut canvas,
            piece,
            (rect.x - bounds.x) as i64,
            (rect.y - bounds.y) as i64,
        );
    }

    canvas
}

/// Monta um retângulo que atravessa monitores na maior escala entre eles.
/// Pedaços de monitores com escala menor são ampliados para essa escala.
fn composite_native(target: ScreenRect, pieces: Vec<(ScreenRect, f32, RgbaImage)>) -> RgbaImage {
    let scale = pieces
        .iter()
        .map(|(_, scale, _)| *scale)
        .fold(1.0_f32, f32::max);
    let scaled = |v: i32| (v as f32 * scale).round() as i32;

    let canvas_rect = ScreenRect::new(
        0,
        0,
        scaled(target.width as i32) as u32,
        scaled(target.height as i32) as u32,
    );

    let placed: Vec<(ScreenRect, RgbaImage)> = pieces
        .into_iter()
        .map(|(overlap, _, image)| {
            let rect = ScreenRect::new(
                scaled(overlap.x - target.x),
                scaled(overlap.y - target.y),
                scaled(overlap.width as i32) as u32,
                scaled(overlap.height as i32) as u32,
            );
            (rect, fit_to_rect(image, &rect))
        })
        .collect();

    composite(canvas_rect, &placed)
}

/// Monitores com escala (DPI) devolvem mais pixels que o retângulo lógico;
/// redimensiona para o tamanho do retângulo.
fn fit_to_rect(image: RgbaImage, rect: &ScreenRect) -> RgbaImage {
    if image.dimensions() == (rect.width, rect.height) {
        return image;
    }

    debug!(
        "   Ajustando captura {}x{} para {}x{}",
        image.width(),
        image.height(),
        rect.width,
        rect.height
    );
    imageops::resize(&image, rect.width, rect.height, imageops::FilterType::Triangle)
}

/// Converte o buffer da screenshot para RgbaImage
fn buffer_to_image(buffer: &screenshots::Image) -> Result<RgbaImage> {
    let width = buffer.width();
    let height = buffer.height();

    ImageBuffer::from_raw(width as u32, height as u32, buffer.rgba().to_vec())
        .context("Buffer da captura com tamanho inconsistente")
}

/// Salva o recorte para inspeção quando o OCR não encontra nada
pub fn save_debug(image: &RgbImage, path: &str) -> Result<()> {
    image
        .save(path)
        .with_context(|| format!("Falha ao salvar {}", path))?;
    trace!("📸 Imagem de debug salva: {}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_places_monitor_with_negative_origin() {
        let left = ScreenRect::new(-4, 0, 4, 2);
        let right = ScreenRect::new(0, 1, 2, 2);
        let bounds = geometry::combined_bounds(&[left, right]).unwrap();
        assert_eq!(bounds, ScreenRect::new(-4, 0, 6, 3));

        let red = ImageBuffer::from_pixel(4, 2, Rgba([255, 0, 0, 255]));
        let green = ImageBuffer::from_pixel(2, 2, Rgba([0, 255, 0, 255]));

        let canvas = composite(bounds, &[(left, red), (right, green)]);

        assert_eq!(canvas.dimensions(), (6, 3));
        assert_eq!(canvas.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(canvas.get_pixel(4, 1).0, [0, 255, 0, 255]);
        // Área sem monitor fica preta
        assert_eq!(canvas.get_pixel(4, 0).0, [0, 0, 0, 255]);
        assert_eq!(canvas.get_pixel(0, 2).0, [0, 0, 0, 255]);
    }

    #[test]
    fn snapshot_crop_uses_absolute_coordinates() {
        let mut image = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255]));
        image.put_pixel(3, 4, Rgba([200, 100, 50, 255]));
        let snapshot = DesktopSnapshot {
            bounds: ScreenRect::new(-5, -5, 10, 10),
            monitors: Vec::new(),
            image,
        };

        let crop = snapshot.crop(ScreenRect::new(-2, -1, 2, 2)).unwrap();
        assert_eq!(crop.dimensions(), (2, 2));
        assert_eq!(crop.get_pixel(0, 0).0, [200, 100, 50]);

        assert!(snapshot.crop(ScreenRect::new(50, 50, 5, 5)).is_none());
    }

    #[test]
    fn region_across_mixed_scales_keeps_highest_native_resolution() {
        let target = ScreenRect::new(-2, 0, 4, 2);
        // Esquerda escala 1 (2x2 pixels), direita escala 2 (4x4 pixels)
        let left = (
            ScreenRect::new(-2, 0, 2, 2),
            1.0,
            ImageBuffer::from_pixel(2, 2, Rgba([255, 0, 0, 255])),
        );
        let right = (
            ScreenRect::new(0, 0, 2, 2),
            2.0,
            ImageBuffer::from_pixel(4, 4, Rgba([0, 255, 0, 255])),
        );

        let image = composite_native(target, vec![left, right]);

        assert_eq!(image.dimensions(), (8, 4));
        assert_eq!(image.get_pixel(1, 1).0, [255, 0, 0, 255]);
        assert_eq!(image.get_pixel(3, 3).0, [255, 0, 0, 255]);
        assert_eq!(image.get_pixel(4, 0).0, [0, 255, 0, 255]);
        assert_eq!(image.get_pixel(7, 3).0, [0, 255, 0, 255]);
    }

    #[test]
    fn fit_to_rect_scales_hidpi_capture_down() {
        let hidpi = ImageBuffer::from_pixel(8, 4, Rgba([9, 9, 9, 255]));
        let fitted = fit_to_rect(hidpi, &ScreenRect::new(0, 0, 4, 2));
        assert_eq!(fitted.dimensions(), (4, 2));
    }
}
