// game-translation-assistant/src/overlay/fonts.rs

// ============================================================================
// FONTS DA JANELA
// ============================================================================
// O egui não enxerga as fontes do sistema: cada família da lista é procurada
// em caminhos conhecidos e carregada do arquivo. Se nada for encontrado, a
// fonte padrão do egui continua valendo. Uma fonte CJK (se existir) entra
// sempre como fallback para o texto em chinês/japonês.
// ============================================================================

use eframe::egui::{FontData, FontDefinitions, FontFamily};
use std::collections::HashMap;

/// Família usada pelo preview do diálogo de configurações
pub const PREVIEW_FAMILY: &str = "preview";

const SELECTED_KEY: &str = "selected_font";
const PREVIEW_KEY: &str = "preview_font";
const CJK_KEY: &str = "cjk_fallback";

/// Caminhos candidatos para cada família (primeiro que existir vence)
pub fn candidate_paths(family: &str) -> &'static [&'static str] {
    match family {
        "Microsoft YaHei" => &[
            r"C:\Windows\Fonts\msyh.ttc",
            "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        ],
        "SimSun" | "NSimSun" => &[
            r"C:\Windows\Fonts\simsun.ttc",
            "/usr/share/fonts/opentype/noto/NotoSerifCJK-Regular.ttc",
        ],
        "FangSong" => &[
            r"C:\Windows\Fonts\simfang.ttf",
            "/usr/share/fonts/opentype/noto/NotoSerifCJK-Regular.ttc",
        ],
        "KaiTi" => &[
            r"C:\Windows\Fonts\simkai.ttf",
            "/usr/share/fonts/opentype/noto/NotoSerifCJK-Regular.ttc",
        ],
        "SimHei" => &[
            r"C:\Windows\Fonts\simhei.ttf",
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        ],
        "Arial" => &[
            r"C:\Windows\Fonts\arial.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
            "/Library/Fonts/Arial.ttf",
        ],
        "Times New Roman" => &[
            r"C:\Windows\Fonts\times.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSerif-Regular.ttf",
            "/Library/Fonts/Times New Roman.ttf",
        ],
        "Courier New" => &[
            r"C:\Windows\Fonts\cour.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
            "/Library/Fonts/Courier New.ttf",
        ],
        "Consolas" => &[
            r"C:\Windows\Fonts\consola.ttf",
            "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
        ],
        _ => &[],
    }
}

/// Fallback para caracteres CJK
const CJK_FALLBACKS: [&str; 4] = [
    r"C:\Windows\Fonts\msyh.ttc",
    r"C:\Windows\Fonts\simsun.ttc",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
];

/// Lê o primeiro arquivo que existir. Os bytes vivem até o fim do programa
/// (o cache nunca descarta), então cada `FontData` só empresta o slice.
fn read_first(paths: &[&str]) -> Option<&'static [u8]> {
    paths.iter().find_map(|path| match std::fs::read(path) {
        Ok(data) => {
            debug!("   Fonte carregada: {} ({} KB)", path, data.len() / 1024);
            Some(&*Box::leak(data.into_boxed_slice()))
        }
        Err(_) => None,
    })
}

/// Cache dos arquivos de fonte já lidos (cada família é lida uma vez)
pub struct FontLibrary {
    cache: HashMap<String, Option<&'static [u8]>>,
    cjk: Option<&'static [u8]>,
}

impl FontLibrary {
    pub fn new() -> Self {
        let cjk = read_first(&CJK_FALLBACKS);
        if cjk.is_none() {
            warn!("⚠️  Nenhuma fonte CJK encontrada, caracteres chineses podem não aparecer");
        }

        FontLibrary {
            cache: HashMap::new(),
            cjk,
        }
    }

    fn load(&mut self, family: &str) -> Option<FontData> {
        let entry = self.cache.entry(family.to_string()).or_insert_with(|| {
            let data = read_first(candidate_paths(family));
            if data.is_none() {
                warn!("⚠️  Fonte '{}' não encontrada, usando fonte padrão", family);
            }
            data
        });

        (*entry).map(FontData::from_static)
    }

    /// Monta as definições de fonte: `family` na frente do texto normal e,
    /// opcionalmente, outra família só para o preview.
    pub fn definitions(&mut self, family: &str, preview: Option<&str>) -> FontDefinitions {
        let mut fonts = FontDefinitions::default();
        let defaults = fonts
            .families
            .get(&FontFamily::Proportional)
            .cloned()
            .unwrap_or_default();

        if let Some(data) = self.load(family) {
            fonts.font_data.insert(SELECTED_KEY.to_owned(), data);
            for list in [FontFamily::Proportional, FontFamily::Monospace] {
                fonts
                    .families
                    .entry(list)
                    .or_default()
                    .insert(0, SELECTED_KEY.to_owned());
            }
        }

        let mut preview_list = Vec::new();
        match preview {
            Some(name) if name != family => {
                if let Some(data) = self.load(name) {
                    fonts.font_data.insert(PREVIEW_KEY.to_owned(), data);
                    preview_list.push(PREVIEW_KEY.to_owned());
                }
            }
            _ => {
                if fonts.font_data.contains_key(SELECTED_KEY) {
                    preview_list.push(SELECTED_KEY.to_owned());
                }
            }
        }
        preview_list.extend(defaults);

        if let Some(data) = self.cjk {
            fonts
                .font_data
                .insert(CJK_KEY.to_owned(), FontData::from_static(data));
            for list in [FontFamily::Proportional, FontFamily::Monospace] {
                fonts.families.entry(list).or_default().push(CJK_KEY.to_owned());
            }
            preview_list.push(CJK_KEY.to_owned());
        }

        fonts
            .families
            .insert(FontFamily::Name(PREVIEW_FAMILY.into()), preview_list);

        fonts
    }
}
