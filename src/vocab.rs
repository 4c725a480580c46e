//! Vocabulários fechados de disciplinas e serviços
//!
//! As entradas já estão na forma canônica (maiúsculas, sem acento,
//! `_` como separador), a mesma produzida por `normalizer::normalize_code`.
//! A busca normaliza apenas o texto de entrada.

use crate::normalizer::{normalize_code, normalize_text};

/// Disciplinas válidas (categorias de engenharia)
pub const DISCIPLINAS: &[&str] = &[
    "DRENAGEM",
    "TERRAPLENAGEM",
    "PAVIMENTACAO",
    "SINALIZACAO",
    "ESTRUTURAS",
    "OAE",
    "CONTENCAO",
    "ILUMINACAO",
    "PAISAGISMO",
    "EDIFICACOES",
    "MEIO_AMBIENTE",
    "GEOTECNIA",
];

/// Serviços válidos (tarefas dentro de uma disciplina)
pub const SERVICOS: &[&str] = &[
    // Drenagem
    "SARJETA_CONCRETO",
    "MEIO_FIO",
    "BUEIRO_CELULAR",
    "BOCA_DE_LOBO",
    "DRENO_PROFUNDO",
    "DESCIDA_DAGUA",
    "VALETA_PROTECAO",
    // Terraplenagem
    "CORTE",
    "ATERRO",
    "REGULARIZACAO_SUBLEITO",
    "LIMPEZA_TERRENO",
    "DEMOLICAO",
    // Pavimentação
    "SUB_BASE",
    "BASE_BRITA_GRADUADA",
    "IMPRIMACAO",
    "PINTURA_DE_LIGACAO",
    "CBUQ",
    "MICRORREVESTIMENTO",
    "RECAPEAMENTO",
    "FRESAGEM",
    // Sinalização
    "PINTURA_FAIXA",
    "TACHAS",
    "DEFENSA_METALICA",
    "PLACA_SINALIZACAO",
    // Estruturas / contenção
    "FORMA_ARMACAO",
    "CONCRETAGEM",
    "ESTACA_RAIZ",
    "CORTINA_ATIRANTADA",
    "GABIAO",
    "ENROCAMENTO",
    // Complementares
    "CERCA",
    "ALAMBRADO",
    "PLANTIO_GRAMA",
    "HIDROSSEMEADURA",
];

/// Comprimento mínimo de entrada para busca por substring
/// (evita falso positivo em códigos curtos como OAE)
const MIN_SUBSTRING_LEN: usize = 5;

/// Procura uma disciplina do vocabulário no texto.
///
/// Primeiro por token exato (texto dividido em palavras), depois por
/// substring para entradas com 5+ caracteres.
pub fn find_disciplina_in_text(text: &str) -> Option<&'static str> {
    if text.is_empty() {
        return None;
    }

    let normalized = normalize_text(text);
    for entry in DISCIPLINAS {
        if normalized.split(' ').any(|token| token == *entry) {
            return Some(entry);
        }
    }

    let code = normalize_code(text);
    DISCIPLINAS
        .iter()
        .find(|entry| entry.len() >= MIN_SUBSTRING_LEN && code.contains(*entry))
        .copied()
}

/// Procura um serviço do vocabulário no texto (substring apenas;
/// nomes de serviço são compostos por natureza).
pub fn find_servico_in_text(text: &str) -> Option<&'static str> {
    if text.is_empty() {
        return None;
    }

    let code = normalize_code(text);
    SERVICOS
        .iter()
        .find(|entry| entry.len() >= MIN_SUBSTRING_LEN && code.contains(*entry))
        .copied()
}
