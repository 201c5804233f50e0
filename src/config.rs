// game-translation-assistant/src/config.rs

// ============================================================================
// MÓDULO CONFIG - Configurações estáticas (config.ini)
// ============================================================================
//
// O arquivo é lido UMA vez na inicialização e vira um `Settings` imutável que
// é entregue para cada componente (tradutor, OCR, UI). Nada aqui é recarregado
// nem salvo de volta.
//
// Formato:
//
//   [Settings]
//   api_address = https://api.deepseek.com
//   api_key = sk-...
//   model_name = deepseek-chat
//   pre_prompt = ...
//   system_prompt = ...
//   temperature = 1.0
//   context_num = 5
//
//   [OCR]          (opcional)
//   tesseract_path = ...
//   tessdata_dir = ...
//   primary_language = eng
//   secondary_language = chi_sim
//
//   [Network]      (opcional)
//   timeout_secs = 30
//
// ============================================================================

use ini::{Ini, ParseOption, Properties};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Caminho do arquivo de configuração (diretório de trabalho)
pub const CONFIG_FILE: &str = "config.ini";

const SETTINGS_SECTION: &str = "Settings";
const OCR_SECTION: &str = "OCR";
const NETWORK_SECTION: &str = "Network";

const DEFAULT_API_ADDRESS: &str = "https://api.deepseek.com";
const DEFAULT_MODEL: &str = "deepseek-chat";
const DEFAULT_PRE_PROMPT: &str = "Translate the following text into the target language:";
const DEFAULT_SYSTEM_PROMPT: &str = "You are a translation assistant.";
const DEFAULT_TEMPERATURE: f32 = 1.0;
const DEFAULT_CONTEXT_NUM: u32 = 5;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[cfg(windows)]
const DEFAULT_TESSERACT_PATH: &str = r"C:\Program Files\Tesseract-OCR\tesseract.exe";
#[cfg(windows)]
const DEFAULT_TESSDATA_DIR: &str = r"C:\Program Files\Tesseract-OCR\tessdata";

#[cfg(not(windows))]
const DEFAULT_TESSERACT_PATH: &str = "/usr/bin/tesseract";
#[cfg(not(windows))]
const DEFAULT_TESSDATA_DIR: &str = "/usr/share/tesseract-ocr/5/tessdata";

/// Erros fatais de configuração: o processo encerra antes de abrir a janela
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("não foi possível ler {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config.ini inválido: {0}")]
    Parse(#[from] ini::ParseError),

    #[error("api_key está vazia em config.ini (seção [Settings])")]
    MissingApiKey,

    #[error("valor inválido para '{key}': '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

/// Configuração do motor de OCR
#[derive(Debug, Clone, PartialEq)]
pub struct OcrSettings {
    /// Executável do Tesseract
    pub tesseract_path: PathBuf,
    /// Diretório com os arquivos .traineddata
    pub tessdata_dir: PathBuf,
    /// Idioma principal (tentado primeiro)
    pub primary_language: String,
    /// Idioma secundário
    pub secondary_language: String,
}

impl Default for OcrSettings {
    fn default() -> Self {
        OcrSettings {
            tesseract_path: PathBuf::from(DEFAULT_TESSERACT_PATH),
            tessdata_dir: PathBuf::from(DEFAULT_TESSDATA_DIR),
            primary_language: "eng".to_string(),
            secondary_language: "chi_sim".to_string(),
        }
    }
}

/// Configurações imutáveis da aplicação
#[derive(Clone)]
pub struct Settings {
    pub api_address: String,
    pub api_key: String,
    pub model_name: String,
    pub pre_prompt: String,
    pub system_prompt: String,
    pub temperature: f32,
    /// Reservado: a requisição atual é de turno único
    pub context_num: u32,
    pub request_timeout: Duration,
    pub ocr: OcrSettings,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_address", &self.api_address)
            .field("api_key", &mask_key(&self.api_key))
            .field("model_name", &self.model_name)
            .field("pre_prompt", &self.pre_prompt)
            .field("system_prompt", &self.system_prompt)
            .field("temperature", &self.temperature)
            .field("context_num", &self.context_num)
            .field("request_timeout", &self.request_timeout)
            .field("ocr", &self.ocr)
            .finish()
    }
}

impl Settings {
    /// Carrega o config.ini do diretório de trabalho
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Carrega configurações de um arquivo específico
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        info!("📋 Carregando configurações de {}...", path.display());

        let ini = Ini::load_from_file_opt(path, parse_options()).map_err(|e| match e {
            ini::Error::Io(source) => ConfigError::Read {
                path: path.display().to_string(),
                source,
            },
            ini::Error::Parse(e) => ConfigError::Parse(e),
        })?;

        let settings = Self::from_ini(&ini)?;
        settings.log_summary();

        Ok(settings)
    }

    /// Lê as configurações de um texto INI
    #[cfg(test)]
    pub fn from_ini_str(contents: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str_opt(contents, parse_options())?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let empty = Properties::new();
        let main = ini.section(Some(SETTINGS_SECTION)).unwrap_or(&empty);
        let ocr = ini.section(Some(OCR_SECTION)).unwrap_or(&empty);
        let network = ini.section(Some(NETWORK_SECTION)).unwrap_or(&empty);

        let api_key = main.get("api_key").unwrap_or_default().trim().to_string();
        if api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        let defaults = OcrSettings::default();

        Ok(Settings {
            api_address: text_or(main, "api_address", DEFAULT_API_ADDRESS),
            api_key,
            model_name: text_or(main, "model_name", DEFAULT_MODEL),
            pre_prompt: text_or(main, "pre_prompt", DEFAULT_PRE_PROMPT),
            system_prompt: text_or(main, "system_prompt", DEFAULT_SYSTEM_PROMPT),
            temperature: parse_or(main, "temperature", DEFAULT_TEMPERATURE)?,
            context_num: parse_or(main, "context_num", DEFAULT_CONTEXT_NUM)?,
            request_timeout: Duration::from_secs(parse_or(
                network,
                "timeout_secs",
                DEFAULT_TIMEOUT_SECS,
            )?),
            ocr: OcrSettings {
                tesseract_path: ocr
                    .get("tesseract_path")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.tesseract_path),
                tessdata_dir: ocr
                    .get("tessdata_dir")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.tessdata_dir),
                primary_language: text_or(ocr, "primary_language", &defaults.primary_language),
                secondary_language: text_or(
                    ocr,
                    "secondary_language",
                    &defaults.secondary_language,
                ),
            },
        })
    }

    fn log_summary(&self) {
        info!("✅ Configurações carregadas!");
        info!("   🌐 Endpoint: {}", self.api_address);
        info!("   🔑 API key: {}", mask_key(&self.api_key));
        info!("   🤖 Modelo: {} (temperature {})", self.model_name, self.temperature);
        info!(
            "   🔍 OCR: {} / {} ({} + {})",
            self.ocr.tesseract_path.display(),
            self.ocr.tessdata_dir.display(),
            self.ocr.primary_language,
            self.ocr.secondary_language
        );
        debug!("   context_num = {} (reservado)", self.context_num);
    }
}

/// Barras invertidas são literais (caminhos do Windows)
fn parse_options() -> ParseOption {
    ParseOption {
        enabled_escape: false,
        ..ParseOption::default()
    }
}

/// Valor de texto; o padrão só vale para chave ausente (`pre_prompt =` fica vazio)
fn text_or(section: &Properties, key: &str, default: &str) -> String {
    section
        .get(key)
        .map(str::trim)
        .unwrap_or(default)
        .to_string()
}

/// Valor numérico com fallback; valor presente mas inválido é erro fatal
fn parse_or<T: FromStr>(section: &Properties, key: &'static str, default: T) -> Result<T, ConfigError> {
    match section.get(key).map(str::trim) {
        None | Some("") => Ok(default),
        Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
        }),
    }
}

fn mask_key(key: &str) -> String {
    let prefix: String = key.chars().take(8).collect();
    format!("{}...", prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_api_key_is_fatal() {
        let result = Settings::from_ini_str("[Settings]\nmodel_name = x\n");
        assert!(matches!(result, Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn whitespace_api_key_is_fatal() {
        let result = Settings::from_ini_str("[Settings]\napi_key =    \n");
        assert!(matches!(result, Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn missing_section_is_fatal() {
        assert!(matches!(
            Settings::from_ini_str(""),
            Err(ConfigError::MissingApiKey)
        ));
    }

    #[test]
    fn unreadable_file_is_fatal() {
        let result = Settings::load_from(Path::new("definitely/not/here/config.ini"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn defaults_fill_absent_keys() {
        let settings = Settings::from_ini_str("[Settings]\napi_key = sk-test\n").unwrap();

        assert_eq!(settings.api_key, "sk-test");
        assert_eq!(settings.api_address, DEFAULT_API_ADDRESS);
        assert_eq!(settings.model_name, DEFAULT_MODEL);
        assert_eq!(settings.pre_prompt, DEFAULT_PRE_PROMPT);
        assert_eq!(settings.system_prompt, DEFAULT_SYSTEM_PROMPT);
        assert_eq!(settings.temperature, 1.0);
        assert_eq!(settings.context_num, 5);
        assert_eq!(settings.request_timeout, Duration::from_secs(30));
        assert_eq!(settings.ocr, OcrSettings::default());
    }

    #[test]
    fn empty_text_value_is_kept_instead_of_default() {
        let settings =
            Settings::from_ini_str("[Settings]\napi_key = sk-test\npre_prompt =\n").unwrap();

        assert_eq!(settings.pre_prompt, "");
        assert_eq!(settings.system_prompt, DEFAULT_SYSTEM_PROMPT);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let settings = Settings::from_ini_str(
            "[Settings]\n\
             api_key = sk-abc\n\
             api_address = http://localhost:8080/v1\n\
             model_name = gpt-4o-mini\n\
             pre_prompt = Translate to Chinese:\n\
             system_prompt = You are a translator.\n\
             temperature = 0.3\n\
             context_num = 2\n\
             [OCR]\n\
             tesseract_path = C:\\Tesseract OCR\\tesseract.exe\n\
             secondary_language = jpn\n\
             [Network]\n\
             timeout_secs = 5\n",
        )
        .unwrap();

        assert_eq!(settings.api_address, "http://localhost:8080/v1");
        assert_eq!(settings.model_name, "gpt-4o-mini");
        assert_eq!(settings.pre_prompt, "Translate to Chinese:");
        assert_eq!(settings.system_prompt, "You are a translator.");
        assert!((settings.temperature - 0.3).abs() < f32::EPSILON);
        assert_eq!(settings.context_num, 2);
        assert_eq!(settings.request_timeout, Duration::from_secs(5));
        assert_eq!(settings.ocr.primary_language, "eng");
        assert_eq!(
            settings.ocr.tesseract_path,
            PathBuf::from(r"C:\Tesseract OCR\tesseract.exe")
        );
        assert_eq!(settings.ocr.secondary_language, "jpn");
    }

    #[test]
    fn bad_temperature_is_rejected() {
        let result = Settings::from_ini_str("[Settings]\napi_key = k\ntemperature = hot\n");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { key: "temperature", .. })
        ));
    }

    #[test]
    fn debug_output_masks_key() {
        let settings =
            Settings::from_ini_str("[Settings]\napi_key = sk-0123456789abcdef\n").unwrap();
        let printed = format!("{:?}", settings);
        assert!(printed.contains("sk-01234..."));
        assert!(!printed.contains("sk-0123456789abcdef"));
    }
}
