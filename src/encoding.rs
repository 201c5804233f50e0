// game-translation-assistant/src/encoding.rs

// ============================================================================
// MÓDULO ENCODING - Força todo texto externo para UTF-8 válido
// ============================================================================
//
// Texto que vem de fora (saída do Tesseract, corpo HTTP, mensagens de erro do
// sistema operacional) pode chegar com bytes inválidos. Nada disso pode
// derrubar a requisição nem a atualização da UI: o que não puder ser
// representado vira o marcador de substituição U+FFFD.
//
// ============================================================================

use std::borrow::Cow;

/// Marcador usado no lugar de caracteres não representáveis
pub const REPLACEMENT: char = char::REPLACEMENT_CHARACTER;

/// Decodifica bytes como UTF-8, trocando sequências inválidas por U+FFFD
pub fn lossy_utf8(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

/// Prepara texto para ir no payload / na UI.
///
/// Caracteres de controle (exceto \n, \r e \t) são trocados pelo marcador;
/// o resto do texto passa intacto.
pub fn sanitize(text: &str) -> Cow<'_, str> {
    if !text.chars().any(is_unrepresentable) {
        return Cow::Borrowed(text);
    }

    Cow::Owned(
        text.chars()
            .map(|c| if is_unrepresentable(c) { REPLACEMENT } else { c })
            .collect(),
    )
}

fn is_unrepresentable(c: char) -> bool {
    c.is_control() && !matches!(c, '\n' | '\r' | '\t')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_bytes_become_marker() {
        let text = lossy_utf8(b"caf\xe9 ok");
        assert_eq!(text, "caf\u{FFFD} ok");
    }

    #[test]
    fn control_characters_are_replaced_but_newlines_kept() {
        assert_eq!(sanitize("a\u{0}b\nc\td"), "a\u{FFFD}b\nc\td");
    }

    #[test]
    fn clean_text_is_borrowed() {
        assert!(matches!(sanitize("olá 你好"), Cow::Borrowed(_)));
    }
}
