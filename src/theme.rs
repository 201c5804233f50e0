// game-translation-assistant/src/theme.rs

// ============================================================================
// MÓDULO THEME - Temas de cores e preferência de fonte
// ============================================================================
//
// Quatro temas fixos (Branco é o padrão), cada um com 10 papéis de cor.
// Aplicar um tema reconstrói o Style do egui a partir do zero, então
// aplicar duas vezes dá o mesmo resultado que aplicar uma.
//
// Tema e fonte são aplicados juntos (nunca um sem o outro).
//
// ============================================================================

use eframe::egui::{self, Color32, FontFamily, FontId, Stroke, TextStyle};

// ============================================================================
// TEMAS
// ============================================================================

/// Papéis de cor usados pela janela
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub bg: Color32,
    pub fg: Color32,
    pub button_bg: Color32,
    pub button_fg: Color32,
    pub input_bg: Color32,
    pub input_fg: Color32,
    pub label_bg: Color32,
    pub text_bg: Color32,
    pub text_fg: Color32,
    pub border: Color32,
}

const fn hex(rgb: u32) -> Color32 {
    Color32::from_rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

pub const WHITE: Theme = Theme {
    name: "Branco",
    bg: hex(0xFFFFFF),
    fg: hex(0x000000),
    button_bg: hex(0xF0F0F0),
    button_fg: hex(0x000000),
    input_bg: hex(0xFFFFFF),
    input_fg: hex(0x000000),
    label_bg: hex(0xF8F8F8),
    text_bg: hex(0xFFFFFF),
    text_fg: hex(0x000000),
    border: hex(0xCCCCCC),
};

pub const BLACK: Theme = Theme {
    name: "Preto",
    bg: hex(0x000000),
    fg: hex(0xFFFFFF),
    button_bg: hex(0x333333),
    button_fg: hex(0xFFFFFF),
    input_bg: hex(0x1A1A1A),
    input_fg: hex(0xFFFFFF),
    label_bg: hex(0x222222),
    text_bg: hex(0x1A1A1A),
    text_fg: hex(0xFFFFFF),
    border: hex(0x444444),
};

pub const KHAKI: Theme = Theme {
    name: "Cáqui",
    bg: hex(0xBDB76B),
    fg: hex(0x2F4F4F),
    button_bg: hex(0xD3D3A6),
    button_fg: hex(0x2F4F4F),
    input_bg: hex(0xFFFFF0),
    input_fg: hex(0x2F4F4F),
    label_bg: hex(0xDCDCDC),
    text_bg: hex(0xFFFFF0),
    text_fg: hex(0x2F4F4F),
    border: hex(0x8B7355),
};

pub const DARK_GRAY: Theme = Theme {
    name: "Cinza escuro",
    bg: hex(0x696969),
    fg: hex(0xFFFFFF),
    button_bg: hex(0x808080),
    button_fg: hex(0xFFFFFF),
    input_bg: hex(0x4F4F4F),
    input_fg: hex(0xFFFFFF),
    label_bg: hex(0x5A5A5A),
    text_bg: hex(0x4F4F4F),
    text_fg: hex(0xFFFFFF),
    border: hex(0x404040),
};

pub const THEMES: [Theme; 4] = [WHITE, BLACK, KHAKI, DARK_GRAY];

impl Default for Theme {
    fn default() -> Self {
        WHITE
    }
}

impl Theme {
    /// Fundo escuro? (decide a base clara/escura do egui)
    pub fn is_dark(&self) -> bool {
        let [r, g, b, _] = self.bg.to_array();
        (r as u32 * 299 + g as u32 * 587 + b as u32 * 114) / 1000 < 128
    }
}

// ============================================================================
// FONTE
// ============================================================================

pub const FONT_FAMILIES: [&str; 10] = [
    "Microsoft YaHei",
    "SimSun",
    "NSimSun",
    "FangSong",
    "KaiTi",
    "SimHei",
    "Arial",
    "Times New Roman",
    "Courier New",
    "Consolas",
];

pub const FONT_SIZES: [u32; 11] = [8, 9, 10, 11, 12, 14, 16, 18, 20, 22, 24];

/// Família + tamanho (em pontos) escolhidos pelo usuário
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontPreference {
    pub family: String,
    pub size: u32,
}

impl Default for FontPreference {
    fn default() -> Self {
        FontPreference {
            family: FONT_FAMILIES[0].to_string(),
            size: 9,
        }
    }
}

impl FontPreference {
    /// Tamanho em pixels lógicos (pontos a 96 dpi)
    pub fn size_px(&self) -> f32 {
        pt_to_px(self.size)
    }
}

pub fn pt_to_px(points: u32) -> f32 {
    points as f32 * 96.0 / 72.0
}

/// Tema + fonte atualmente aplicados
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Appearance {
    pub theme: Theme,
    pub font: FontPreference,
}

// ============================================================================
// APLICAÇÃO NO EGUI
// ============================================================================

/// Reconstrói o Style para o tema + fonte (resultado independe do Style atual)
pub fn build_style(appearance: &Appearance) -> egui::Style {
    let theme = &appearance.theme;
    let mut style = egui::Style {
        visuals: if theme.is_dark() {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        },
        ..egui::Style::default()
    };

    let visuals = &mut style.visuals;
    visuals.override_text_color = Some(theme.fg);
    visuals.panel_fill = theme.bg;
    visuals.window_fill = theme.bg;
    visuals.window_stroke = Stroke::new(1.0, theme.border);
    visuals.extreme_bg_color = theme.input_bg;
    visuals.faint_bg_color = theme.label_bg;

    for widget in [
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.hovered,
        &mut visuals.widgets.active,
        &mut visuals.widgets.open,
    ] {
        widget.bg_fill = theme.button_bg;
        widget.weak_bg_fill = theme.button_bg;
        widget.fg_stroke = Stroke::new(1.0, theme.button_fg);
    }
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, theme.border);
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, theme.fg);
    visuals.widgets.noninteractive.bg_fill = theme.bg;
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, theme.border);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, theme.fg);

    let body = appearance.font.size_px();
    style.text_styles = [
        (TextStyle::Small, FontId::new(pt_to_px(8), FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(body, FontFamily::Proportional)),
        (TextStyle::Button, FontId::new(body, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(body, FontFamily::Monospace)),
        (TextStyle::Heading, FontId::new(pt_to_px(10), FontFamily::Proportional)),
    ]
    .into();

    style
}

/// Aplica tema + fonte no contexto (estilo inteiro de uma vez)
pub fn apply(ctx: &egui::Context, appearance: &Appearance) {
    ctx.set_style(build_style(appearance));
    info!(
        "🎨 Tema '{}' aplicado (fonte {}, {}pt)",
        appearance.theme.name, appearance.font.family, appearance.font.size
    );
}
