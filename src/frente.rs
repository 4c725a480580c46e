//! Reconhecimento de frente de obra em caminhos e texto
//!
//! Bateria ordenada de reconhecedores regex sobre o texto normalizado,
//! parando no primeiro casamento. Ordem entre categorias (da mais
//! específica para a mais genérica):
//! 1. zona nomeada + sufixo numérico (`BSO-02` → `BSO_02`)
//! 2. código de zona isolado (`CANTEIRO`)
//! 3. sufixo direcional (`PISTA NORTE` → `PISTA_NORTE`)
//! 4. marcadores quilométricos/numéricos (`KM 15+200` → `KM_015_200`)
//!
//! Dentro de uma categoria todos os reconhecedores são tentados; apenas
//! a prioridade entre categorias encerra a busca.

use crate::normalizer::normalize_text;
use crate::types::Field;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Categoria 1: zona nomeada + número
    static ref ZONE_NUM: Regex =
        Regex::new(r"\b(BSO|SAU|PMV|PT|LOTE|FRENTE)\s*(\d{1,3})\b").unwrap();

    // Categoria 2: zona sem número
    static ref ZONE_BARE: Regex = Regex::new(r"\b(BSO|SAU|CANTEIRO|SEDE)\b").unwrap();

    // Categoria 3: direcional
    static ref DIRECTIONAL: Regex =
        Regex::new(r"\b(PISTA|FAIXA|RAMO)\s+(NORTE|SUL|LESTE|OESTE)\b").unwrap();

    // Categoria 4: quilometragem, estaca e trechos numerados
    static ref KM: Regex = Regex::new(r"\bKM\s*(\d{1,4})(?:\s+(\d{1,3}))?\b").unwrap();
    static ref ESTACA: Regex = Regex::new(r"\bEST(?:ACA)?\s*(\d{1,4})\b").unwrap();
    static ref TRECHO: Regex = Regex::new(r"\b(TRECHO|SEGMENTO)\s*(\d{1,3})\b").unwrap();
}

fn pad2(digits: &str) -> String {
    format!("{:02}", digits.parse::<u32>().unwrap_or(0))
}

fn pad3(digits: &str) -> String {
    format!("{:03}", digits.parse::<u32>().unwrap_or(0))
}

/// Aplica a bateria de reconhecedores a um texto já normalizado
fn extract_frente(normalized: &str) -> Option<String> {
    if normalized.is_empty() {
        return None;
    }

    // Sublinhados contam como separadores para os reconhecedores
    let normalized = &normalized.replace('_', " ");

    if let Some(caps) = ZONE_NUM.captures(normalized) {
        return Some(format!("{}_{}", &caps[1], pad2(&caps[2])));
    }

    if let Some(caps) = ZONE_BARE.captures(normalized) {
        return Some(caps[1].to_string());
    }

    if let Some(caps) = DIRECTIONAL.captures(normalized) {
        return Some(format!("{}_{}", &caps[1], &caps[2]));
    }

    if let Some(caps) = KM.captures(normalized) {
        let mut code = format!("KM_{}", pad3(&caps[1]));
        if let Some(metros) = caps.get(2) {
            code.push('_');
            code.push_str(&pad3(metros.as_str()));
        }
        return Some(code);
    }
    if let Some(caps) = ESTACA.captures(normalized) {
        return Some(format!("ESTACA_{}", pad3(&caps[1])));
    }
    if let Some(caps) = TRECHO.captures(normalized) {
        return Some(format!("{}_{}", &caps[1], pad2(&caps[2])));
    }

    None
}

/// Reconhece a frente na combinação pasta + arquivo.
///
/// `Field::Unknown` significa "explicitamente não resolvido"
/// (sentinela na serialização).
pub fn extract_frente_from_path(folder_path: &str, file_name: &str) -> Field {
    let normalized = normalize_text(&format!("{} {}", folder_path, file_name));
    match extract_frente(&normalized) {
        Some(code) => Field::Known(code),
        None => Field::Unknown,
    }
}

/// Reconhece a frente apenas no texto de OCR.
///
/// `None` distingue "nada encontrado nesta fonte" do sentinela.
pub fn extract_frente_from_ocr(ocr_text: &str) -> Option<String> {
    extract_frente(&normalize_text(ocr_text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_with_number() {
        assert_eq!(
            extract_frente_from_path("BSO-02/Drenagem", "IMG_001.jpg"),
            Field::known("BSO_02")
        );
        assert_eq!(
            extract_frente_from_path("", "frente3_sarjeta.jpg"),
            Field::known("FRENTE_03")
        );
        assert_eq!(extract_frente_from_path("Lote 12", ""), Field::known("LOTE_12"));
    }

    #[test]
    fn test_bare_zone() {
        assert_eq!(
            extract_frente_from_path("Canteiro/Almoxarifado", "foto.jpg"),
            Field::known("CANTEIRO")
        );
    }

    #[test]
    fn test_zone_number_beats_bare_zone() {
        // "BSO 7" casa nas duas categorias; vence a mais específica
        assert_eq!(extract_frente_from_path("BSO 7", "foto.jpg"), Field::known("BSO_07"));
    }

    #[test]
    fn test_directional() {
        assert_eq!(
            extract_frente_from_path("Pista Norte/CBUQ", "foto.jpg"),
            Field::known("PISTA_NORTE")
        );
    }

    #[test]
    fn test_chainage() {
        assert_eq!(extract_frente_from_path("km 15", "foto.jpg"), Field::known("KM_015"));
        assert_eq!(
            extract_frente_from_path("KM 15+200", "foto.jpg"),
            Field::known("KM_015_200")
        );
        assert_eq!(
            extract_frente_from_path("Estaca 12", "foto.jpg"),
            Field::known("ESTACA_012")
        );
        assert_eq!(
            extract_frente_from_path("Trecho 2 - aterro", "foto.jpg"),
            Field::known("TRECHO_02")
        );
    }

    #[test]
    fn test_estaca_does_not_match_estrutura() {
        assert_eq!(extract_frente_from_path("Estruturas", "foto.jpg"), Field::Unknown);
    }

    #[test]
    fn test_nothing_found() {
        assert_eq!(extract_frente_from_path("", "foto.jpg"), Field::Unknown);
        assert_eq!(extract_frente_from_path("Drenagem/Sarjeta", "IMG.jpg"), Field::Unknown);
    }

    #[test]
    fn test_ocr_variant_returns_none() {
        assert_eq!(extract_frente_from_ocr(""), None);
        assert_eq!(extract_frente_from_ocr("sem código aqui"), None);
        assert_eq!(extract_frente_from_ocr("placa BSO-02"), Some("BSO_02".to_string()));
        assert_eq!(extract_frente_from_ocr("km 3+50"), Some("KM_003_050".to_string()));
    }
}
