// game-translation-assistant/src/overlay/settings_window.rs

// ============================================================================
// DIÁLOGO DE CONFIGURAÇÕES (tema + fonte)
// ============================================================================
// Edita um rascunho; nada muda na janela até o "Aplicar". Tema e fonte são
// aplicados juntos.
// ============================================================================

use eframe::egui::{self, FontFamily, FontId, RichText};

use crate::overlay::fonts::PREVIEW_FAMILY;
use crate::theme::{self, Appearance, FontPreference, Theme, FONT_FAMILIES, FONT_SIZES, THEMES};

/// Texto de exemplo do preview
const PREVIEW_TEXT: &str = "Prévia da fonte: AaBbCc 测试文字";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsDraft {
    pub theme: Theme,
    pub family: String,
    pub size: u32,
}

impl SettingsDraft {
    pub fn from_appearance(appearance: &Appearance) -> Self {
        SettingsDraft {
            theme: appearance.theme,
            family: appearance.font.family.clone(),
            size: appearance.font.size,
        }
    }

    pub fn to_appearance(&self) -> Appearance {
        Appearance {
            theme: self.theme,
            font: FontPreference {
                family: self.family.clone(),
                size: self.size,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsAction {
    None,
    /// A família mudou: o preview precisa da fonte nova carregada
    PreviewFamilyChanged,
    Apply,
    Cancel,
}

pub fn render_settings_window(ctx: &egui::Context, draft: &mut SettingsDraft) -> SettingsAction {
    let mut action = SettingsAction::None;
    let mut open = true;

    egui::Window::new("⚙ Configurações")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            // ================================================================
            // TEMA
            // ================================================================
            ui.label(RichText::new("Tema").strong());
            egui::ComboBox::from_id_source("theme_combo")
                .selected_text(draft.theme.name)
                .show_ui(ui, |ui| {
                    for option in THEMES {
                        ui.selectable_value(&mut draft.theme, option, option.name);
                    }
                });

            ui.add_space(8.0);

            // ================================================================
            // FONTE
            // ================================================================
            ui.label(RichText::new("Fonte").strong());
            egui::Grid::new("font_grid").num_columns(2).show(ui, |ui| {
                ui.label("Família:");
                let before = draft.family.clone();
                egui::ComboBox::from_id_source("font_family_combo")
                    .selected_text(draft.family.as_str())
                    .show_ui(ui, |ui| {
                        for family in FONT_FAMILIES {
                            ui.selectable_value(&mut draft.family, family.to_string(), family);
                        }
                    });
                if draft.family != before {
                    action = SettingsAction::PreviewFamilyChanged;
                }
                ui.end_row();

                ui.label("Tamanho:");
                egui::ComboBox::from_id_source("font_size_combo")
                    .selected_text(draft.size.to_string())
                    .show_ui(ui, |ui| {
                        for size in FONT_SIZES {
                            ui.selectable_value(&mut draft.size, size, size.to_string());
                        }
                    });
                ui.end_row();
            });

            ui.add_space(6.0);
            ui.label(RichText::new(PREVIEW_TEXT).font(FontId::new(
                theme::pt_to_px(draft.size),
                FontFamily::Name(PREVIEW_FAMILY.into()),
            )));

            ui.add_space(10.0);
            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("Aplicar").clicked() {
                    action = SettingsAction::Apply;
                }
                if ui.button("Cancelar").clicked() {
                    action = SettingsAction::Cancel;
                }
            });
        });

    if !open {
        action = SettingsAction::Cancel;
    }

    action
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_round_trips_appearance() {
        let appearance = Appearance {
            theme: theme::KHAKI,
            font: FontPreference {
                family: "KaiTi".into(),
                size: 16,
            },
        };

        let draft = SettingsDraft::from_appearance(&appearance);
        assert_eq!(draft.to_appearance(), appearance);
    }
}
