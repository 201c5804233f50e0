// game-translation-assistant/src/preprocess.rs

// ============================================================================
// MÓDULO PREPROCESS - Variantes binarizadas para o OCR
// ============================================================================
//
// A partir do recorte RGB gera sempre três imagens em escala de cinza:
//
// 1. gray     - escala de cinza original
// 2. adaptive - limiar adaptativo gaussiano (bloco 11, C = 2) + mediana 3x3
// 3. global   - limiar global de Otsu + mediana 3x3
//
// Nenhum parâmetro é configurável. Bordas usam replicação do pixel da borda.
// Otsu, limiar global e mediana vêm do imageproc; o limiar adaptativo é
// próprio porque precisa do blur gaussiano com borda replicada.
//
// ============================================================================

use image::{GrayImage, Luma, RgbImage};
use imageproc::{contrast, filter};

/// Tamanho do bloco do limiar adaptativo
const ADAPTIVE_BLOCK_SIZE: usize = 11;
/// Constante subtraída da média local
const ADAPTIVE_C: i32 = 2;

/// Qual das variantes pré-processadas usar numa tentativa de OCR
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantKind {
    Adaptive,
    Global,
    Gray,
}

impl VariantKind {
    /// Nome curto usado no rótulo do método ("adaptive_eng", ...)
    pub fn label(&self) -> &'static str {
        match self {
            VariantKind::Adaptive => "adaptive",
            VariantKind::Global => "otsu",
            VariantKind::Gray => "original",
        }
    }
}

/// Resultado do pré-processamento
#[derive(Debug, Clone)]
pub struct Variants {
    pub gray: GrayImage,
    pub adaptive: GrayImage,
    pub global: GrayImage,
}

impl Variants {
    pub fn get(&self, kind: VariantKind) -> &GrayImage {
        match kind {
            VariantKind::Adaptive => &self.adaptive,
            VariantKind::Global => &self.global,
            VariantKind::Gray => &self.gray,
        }
    }
}

/// Gera as três variantes a partir do recorte capturado
pub fn preprocess(image: &RgbImage) -> Variants {
    let gray = to_grayscale(image);

    let adaptive = median_3x3(&adaptive_gaussian_threshold(
        &gray,
        ADAPTIVE_BLOCK_SIZE,
        ADAPTIVE_C,
    ));

    let level = contrast::otsu_level(&gray);
    trace!("   Otsu: limiar = {}", level);
    let global = median_3x3(&threshold_binary(&gray, level));

    Variants {
        gray,
        adaptive,
        global,
    }
}

/// Converte RGB para cinza (pesos ITU-R 601, ponto fixo de 14 bits)
pub fn to_grayscale(image: &RgbImage) -> GrayImage {
    const R: u32 = 4899;
    const G: u32 = 9617;
    const B: u32 = 1868;

    let (width, height) = image.dimensions();
    let mut gray = GrayImage::new(width, height);

    for (x, y, pixel) in image.enumerate_pixels() {
        let [r, g, b] = pixel.0;
        let luma = (r as u32 * R + g as u32 * G + b as u32 * B + (1 << 13)) >> 14;
        gray.put_pixel(x, y, Luma([luma.min(255) as u8]));
    }

    gray
}

/// Limiar binário: acima do nível = branco, resto = preto
pub fn threshold_binary(gray: &GrayImage, level: u8) -> GrayImage {
    contrast::threshold(gray, level)
}

/// Limiar adaptativo: pixel vira branco se for maior que a média gaussiana
/// da vizinhança menos `c`.
pub fn adaptive_gaussian_threshold(gray: &GrayImage, block_size: usize, c: i32) -> GrayImage {
    let mean = gaussian_blur_replicate(gray, block_size);
    let mut out = GrayImage::new(gray.width(), gray.height());

    for (x, y, pixel) in gray.enumerate_pixels() {
        let src = pixel.0[0] as i32;
        let local = mean.get_pixel(x, y).0[0] as i32;
        let value = if src - local > -c { 255 } else { 0 };
        out.put_pixel(x, y, Luma([value]));
    }

    out
}

/// Kernel gaussiano 1D normalizado; sigma derivado do tamanho do bloco
fn gaussian_kernel(size: usize) -> Vec<f32> {
    let sigma = 0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8;
    let center = (size as f32 - 1.0) / 2.0;

    let raw: Vec<f32> = (0..size)
        .map(|i| {
            let d = i as f32 - center;
            (-(d * d) / (2.0 * sigma * sigma)).exp()
        })
        .collect();

    let sum: f32 = raw.iter().sum();
    raw.into_iter().map(|k| k / sum).collect()
}

/// Blur gaussiano separável com borda replicada
fn gaussian_blur_replicate(gray: &GrayImage, size: usize) -> GrayImage {
    let (width, height) = gray.dimensions();
    if width == 0 || height == 0 {
        return gray.clone();
    }

    let kernel = gaussian_kernel(size);
    let radius = (size / 2) as i64;
    let (w, h) = (width as i64, height as i64);

    // Passo horizontal
    let mut horizontal = vec![0.0f32; (width * height) as usize];
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0;
            for (k, weight) in kernel.iter().enumerate() {
                let sx = (x + k as i64 - radius).clamp(0, w - 1);
                acc += weight * gray.get_pixel(sx as u32, y as u32).0[0] as f32;
            }
            horizontal[(y * w + x) as usize] = acc;
        }
    }

    // Passo vertical
    let mut out = GrayImage::new(width, height);
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0;
            for (k, weight) in kernel.iter().enumerate() {
                let sy = (y + k as i64 - radius).clamp(0, h - 1);
                acc += weight * horizontal[(sy * w + x) as usize];
            }
            out.put_pixel(x as u32, y as u32, Luma([acc.round().clamp(0.0, 255.0) as u8]));
        }
    }

    out
}

/// Filtro de mediana 3x3 (remove pontos isolados depois da binarização)
pub fn median_3x3(gray: &GrayImage) -> GrayImage {
    filter::median_filter(gray, 1, 1)
}
