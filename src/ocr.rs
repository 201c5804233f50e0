// game-translation-assistant/src/ocr.rs

// ============================================================================
// MÓDULO OCR - Reconhecimento de texto com Tesseract
// ============================================================================
//
// O motor é o executável do Tesseract (via rusty-tesseract). Para cada recorte
// são feitas até 5 tentativas, combinando variantes pré-processadas e idiomas:
//
//   adaptive + primário, otsu + primário, original + primário,
//   adaptive + secundário, otsu + secundário
//
// Fica o resultado MAIS LONGO (empate mantém o anterior).
//
// ============================================================================

use anyhow::{Context, Result};
use image::{DynamicImage, GrayImage};
use rusty_tesseract::{Args, Image};
use std::collections::HashMap;
use std::fmt::Display;
use std::path::PathBuf;

use crate::config::OcrSettings;
use crate::encoding;
use crate::preprocess::{self, VariantKind, Variants};

/// Modo de segmentação: bloco uniforme de texto
const PAGE_SEG_MODE: i32 = 6;
/// Motor padrão (LSTM + legado, o que estiver disponível)
const ENGINE_MODE: i32 = 3;

// ============================================================================
// TIPOS
// ============================================================================

/// Texto reconhecido + qual tentativa venceu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recognition {
    pub text: String,
    /// Ex: "adaptive_eng"
    pub method: String,
}

/// Qual idioma da configuração usar numa tentativa
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LanguageSlot {
    Primary,
    Secondary,
}

/// Ordem fixa das tentativas
const ATTEMPTS: [(VariantKind, LanguageSlot); 5] = [
    (VariantKind::Adaptive, LanguageSlot::Primary),
    (VariantKind::Global, LanguageSlot::Primary),
    (VariantKind::Gray, LanguageSlot::Primary),
    (VariantKind::Adaptive, LanguageSlot::Secondary),
    (VariantKind::Global, LanguageSlot::Secondary),
];

/// Qualquer coisa capaz de transformar uma imagem em texto.
///
/// A implementação real chama o Tesseract; os testes usam um motor falso.
pub trait OcrEngine {
    fn image_to_text(&self, image: &GrayImage, language: &str) -> Result<String>;
}

// ============================================================================
// MOTOR TESSERACT
// ============================================================================

pub struct TesseractEngine {
    tessdata_dir: PathBuf,
}

impl TesseractEngine {
    pub fn new(settings: &OcrSettings) -> Self {
        TesseractEngine {
            tessdata_dir: settings.tessdata_dir.clone(),
        }
    }

    /// Equivale a `tesseract --oem 3 --psm 6 -l <idioma>`
    fn args(&self, language: &str) -> Args {
        Args {
            lang: language.to_string(),
            config_variables: HashMap::new(),
            dpi: None,
            psm: Some(PAGE_SEG_MODE),
            oem: Some(ENGINE_MODE),
        }
    }
}

/// O rusty-tesseract grava (e apaga) o arquivo temporário que o CLI lê
fn tesseract_input(image: &GrayImage) -> Result<Image> {
    Image::from_dynamic_image(&DynamicImage::ImageLuma8(image.clone()))
        .map_err(|e| anyhow::anyhow!("{}", e))
        .context("Falha ao preparar a imagem para o Tesseract")
}

impl OcrEngine for TesseractEngine {
    fn image_to_text(&self, image: &GrayImage, language: &str) -> Result<String> {
        let input = tesseract_input(image)?;

        rusty_tesseract::image_to_string(&input, &self.args(language))
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| {
                format!(
                    "Tesseract falhou (lang={}, tessdata={})",
                    language,
                    self.tessdata_dir.display()
                )
            })
    }
}

// ============================================================================
// VERIFICAÇÃO NA INICIALIZAÇÃO
// ============================================================================

/// Verifica se o Tesseract está utilizável.
///
/// Exporta `TESSDATA_PREFIX` e coloca o diretório do executável no `PATH`
/// quando eles existem. Deve rodar antes de qualquer outra thread ser criada.
/// Nunca entra em pânico: qualquer falha vira `false`.
pub fn check_available(settings: &OcrSettings) -> bool {
    check_with_version(settings, rusty_tesseract::get_tesseract_version)
}

/// `check_available` com a consulta de versão injetada
fn check_with_version<E, F>(settings: &OcrSettings, version: F) -> bool
where
    E: Display,
    F: FnOnce() -> std::result::Result<String, E>,
{
    info!("🔍 Verificando Tesseract OCR...");

    let exe_exists = settings.tesseract_path.is_file();
    let tessdata_exists = settings.tessdata_dir.is_dir();
    let traineddata = settings
        .tessdata_dir
        .join(format!("{}.traineddata", settings.primary_language));

    info!(
        "   Executável: {} ({})",
        settings.tesseract_path.display(),
        if exe_exists { "encontrado" } else { "não encontrado" }
    );
    info!(
        "   tessdata: {} ({})",
        settings.tessdata_dir.display(),
        if tessdata_exists { "encontrado" } else { "não encontrado" }
    );
    if tessdata_exists && !traineddata.is_file() {
        warn!("⚠️  {} não existe", traineddata.display());
    }

    if tessdata_exists {
        std::env::set_var("TESSDATA_PREFIX", &settings.tessdata_dir);
    }

    if exe_exists {
        if let Some(dir) = settings.tesseract_path.parent() {
            prepend_to_path(dir.to_path_buf());
        }
    }

    match version() {
        Ok(version) => {
            let version = encoding::sanitize(&version).into_owned();
            info!("✅ Tesseract disponível: {}", version.lines().next().unwrap_or("?"));
            true
        }
        Err(e) => {
            warn!("⚠️  Tesseract indisponível: {}", e);
            warn!("   A captura continua funcionando, mas sem reconhecimento de texto");
            false
        }
    }
}

fn prepend_to_path(dir: PathBuf) {
    let current = std::env::var_os("PATH").unwrap_or_default();
    let mut paths = vec![dir];
    paths.extend(std::env::split_paths(&current));

    match std::env::join_paths(paths) {
        Ok(joined) => std::env::set_var("PATH", joined),
        Err(e) => warn!("⚠️  Não foi possível ajustar o PATH: {}", e),
    }
}

// ============================================================================
// RECONHECIMENTO
// ============================================================================

/// Roda todas as tentativas sobre as variantes e devolve o texto mais longo.
///
/// Retorna `None` quando nenhuma tentativa produziu texto.
pub fn recognize(
    engine: &dyn OcrEngine,
    variants: &Variants,
    settings: &OcrSettings,
) -> Option<Recognition> {
    let mut best: Option<Recognition> = None;

    for (kind, slot) in ATTEMPTS {
        let language = match slot {
            LanguageSlot::Primary => &settings.primary_language,
            LanguageSlot::Secondary => &settings.secondary_language,
        };
        let method = format!("{}_{}", kind.label(), language);

        let text = match engine.image_to_text(variants.get(kind), language) {
            Ok(raw) => normalize_whitespace(&encoding::sanitize(&raw)),
            Err(e) => {
                match slot {
                    LanguageSlot::Primary => warn!("⚠️  OCR {} falhou: {:#}", method, e),
                    // Pacote do idioma secundário costuma não estar instalado
                    LanguageSlot::Secondary => debug!("   OCR {} ignorado: {:#}", method, e),
                }
                continue;
            }
        };

        debug!("   {} -> {} caracteres", method, text.chars().count());

        let current_len = best.as_ref().map_or(0, |b| b.text.chars().count());
        if text.chars().count() > current_len {
            best = Some(Recognition { text, method });
        }
    }

    best
}

/// Preprocessa o recorte e reconhece o texto
pub fn recognize_image(
    engine: &dyn OcrEngine,
    image: &image::RgbImage,
    settings: &OcrSettings,
) -> Option<Recognition> {
    let variants = preprocess::preprocess(image);
    recognize(engine, &variants, settings)
}

/// Junta qualquer sequência de espaços/quebras em um espaço só
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use std::cell::RefCell;

    /// Motor falso: devolve as respostas na ordem das chamadas
    struct ScriptedEngine {
        replies: RefCell<Vec<Result<String>>>,
        calls: RefCell<Vec<String>>,
    }

    impl ScriptedEngine {
        fn new(replies: Vec<Result<String>>) -> Self {
            ScriptedEngine {
                replies: RefCell::new(replies.into_iter().rev().collect()),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl OcrEngine for ScriptedEngine {
        fn image_to_text(&self, _image: &GrayImage, language: &str) -> Result<String> {
            self.calls.borrow_mut().push(language.to_string());
            self.replies
                .borrow_mut()
                .pop()
                .unwrap_or_else(|| Ok(String::new()))
        }
    }

    fn variants() -> Variants {
        preprocess::preprocess(&RgbImage::new(4, 4))
    }

    fn text_of_len(n: usize, fill: char) -> Result<String> {
        Ok(std::iter::repeat(fill).take(n).collect())
    }

    #[test]
    fn longest_result_wins_and_ties_keep_first() {
        let engine = ScriptedEngine::new(vec![
            text_of_len(0, 'a'),
            text_of_len(5, 'b'),
            text_of_len(12, 'c'),
            text_of_len(12, 'd'),
            text_of_len(3, 'e'),
        ]);

        let result = recognize(&engine, &variants(), &OcrSettings::default()).unwrap();
        assert_eq!(result.text, "cccccccccccc");
        assert_eq!(result.method, "original_eng");
    }

    #[test]
    fn attempts_follow_language_order() {
        let engine = ScriptedEngine::new(vec![]);
        let _ = recognize(&engine, &variants(), &OcrSettings::default());

        assert_eq!(
            *engine.calls.borrow(),
            vec!["eng", "eng", "eng", "chi_sim", "chi_sim"]
        );
    }

    #[test]
    fn failed_attempts_are_skipped() {
        let engine = ScriptedEngine::new(vec![
            Err(anyhow::anyhow!("boom")),
            Ok("hello".to_string()),
            Err(anyhow::anyhow!("boom")),
            Err(anyhow::anyhow!("no chi_sim")),
            Err(anyhow::anyhow!("no chi_sim")),
        ]);

        let result = recognize(&engine, &variants(), &OcrSettings::default()).unwrap();
        assert_eq!(result.text, "hello");
        assert_eq!(result.method, "otsu_eng");
    }

    #[test]
    fn nothing_recognized_is_none() {
        let engine = ScriptedEngine::new(vec![Ok("   \n\t ".to_string())]);
        assert!(recognize(&engine, &variants(), &OcrSettings::default()).is_none());
    }

    fn missing_install() -> OcrSettings {
        OcrSettings {
            tesseract_path: PathBuf::from("/nao/existe/tesseract"),
            tessdata_dir: PathBuf::from("/nao/existe/tessdata"),
            ..OcrSettings::default()
        }
    }

    #[test]
    fn gray_variant_converts_to_tesseract_input() {
        assert!(tesseract_input(&GrayImage::new(8, 4)).is_ok());
    }

    #[test]
    fn tesseract_args_are_block_mode_without_extra_variables() {
        let args = TesseractEngine::new(&missing_install()).args("jpn");

        assert_eq!(args.lang, "jpn");
        assert_eq!(args.psm, Some(6));
        assert_eq!(args.oem, Some(3));
        assert!(args.config_variables.is_empty());
        assert_eq!(args.dpi, None);
    }

    #[test]
    fn unavailable_when_version_query_fails() {
        let available = check_with_version(&missing_install(), || {
            Err::<String, _>("tesseract: command not found")
        });
        assert!(!available);
    }

    #[test]
    fn available_when_engine_answers_version() {
        let available = check_with_version(&missing_install(), || {
            Ok::<_, String>("tesseract 5.3.0\n leptonica-1.82.0".to_string())
        });
        assert!(available);
    }

    #[test]
    fn whitespace_is_collapsed() {
        assert_eq!(normalize_whitespace("  hello\n\nworld  \t!"), "hello world !");
        assert_eq!(normalize_whitespace(""), "");
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let engine = ScriptedEngine::new(vec![
            Ok("abcd".to_string()),
            Ok("你好吗".to_string()),
        ]);

        let result = recognize(&engine, &variants(), &OcrSettings::default()).unwrap();
        assert_eq!(result.text, "abcd");
    }
}
