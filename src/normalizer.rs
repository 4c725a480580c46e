//! Normalização de texto
//!
//! Base de todos os casadores: maiúsculas, remoção de acentos
//! (decomposição NFD) e restrição ao conjunto `[A-Z0-9_ ]`.
//!
//! Duas variantes:
//! - `normalize_text`: preserva espaços (busca em texto livre)
//! - `normalize_code`: espaços viram `_` (comparação com vocabulário)
//!
//! Ambas são idempotentes e totais (entrada vazia → saída vazia).

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Normaliza texto livre preservando espaços.
///
/// Caracteres fora de `[A-Z0-9_ ]` viram separadores; espaços
/// consecutivos são colapsados e as pontas aparadas.
pub fn normalize_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());

    for ch in input.nfd() {
        if is_combining_mark(ch) {
            continue;
        }
        let upper = ch.to_ascii_uppercase();
        if upper.is_ascii_uppercase() || upper.is_ascii_digit() || upper == '_' {
            out.push(upper);
        } else {
            out.push(' ');
        }
    }

    collapse_spaces(&out)
}

/// Variante para comparação com vocabulário: espaços viram `_`
pub fn normalize_code(input: &str) -> String {
    normalize_text(input).replace(' ', "_")
}

fn collapse_spaces(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut last_was_space = true; // apara espaços à esquerda

    for ch in s.chars() {
        if ch == ' ' {
            if !last_was_space {
                out.push(' ');
            }
            last_was_space = true;
        } else {
            out.push(ch);
            last_was_space = false;
        }
    }

    while out.ends_with(' ') {
        out.pop();
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text_diacritics() {
        assert_eq!(normalize_text("Drenagem"), "DRENAGEM");
        assert_eq!(normalize_text("DRENAGEM"), "DRENAGEM");
        assert_eq!(normalize_text("dreñagem"), "DRENAGEM");
        assert_eq!(normalize_text("Serviço de Pavimentação"), "SERVICO DE PAVIMENTACAO");
    }

    #[test]
    fn test_normalize_text_noise() {
        assert_eq!(normalize_text("BSO-02/Drenagem/Sarjeta"), "BSO 02 DRENAGEM SARJETA");
        assert_eq!(normalize_text("  foto -- (3).jpg "), "FOTO 3 JPG");
    }

    #[test]
    fn test_normalize_text_idempotent() {
        for input in ["Drenagem", "BSO-02/Drenagem", "ÁGUA  ç_x", ""] {
            let once = normalize_text(input);
            assert_eq!(normalize_text(&once), once, "não idempotente para {:?}", input);
        }
    }

    #[test]
    fn test_normalize_text_empty() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text("!!! ---"), "");
    }

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code("Sarjeta Concreto"), "SARJETA_CONCRETO");
        assert_eq!(normalize_code("SARJETA_CONCRETO"), "SARJETA_CONCRETO");
        let once = normalize_code("meio-fio de concreto");
        assert_eq!(normalize_code(&once), once);
    }
}
