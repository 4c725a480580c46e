//! Construção de caminhos de exportação
//!
//! Converte a classificação resolvida + data em um caminho hierárquico
//! seguro para sistema de arquivos e ZIP:
//! `[empresa/] frente / disciplina / serviço / AAAA-MM / DD / arquivo`
//!
//! Função pura: a mesma entrada produz sempre o mesmo caminho byte a
//! byte (evita colisões de caminho duplicado na exportação em massa).

use crate::resolver::{date_iso_from_millis, split_date_iso};
use crate::types::{
    PhotoRecord, DISCIPLINA_NAO_INFORMADA, FRENTE_NAO_INFORMADA, SERVICO_NAO_IDENTIFICADO,
};
use chrono::Local;

/// Comprimento máximo de um segmento
const MAX_SEGMENT_LEN: usize = 80;

/// Entrada do construtor de caminhos
#[derive(Debug, Clone, Default)]
pub struct ExportInput {
    pub empresa: Option<String>,
    pub frente: String,
    /// Disciplina (ou categoria sugerida pela IA)
    pub categoria: String,
    pub servico: String,
    pub date_iso: Option<String>,
    pub last_modified: Option<i64>,
    pub file_name: String,
}

impl ExportInput {
    /// Monta a entrada a partir de um registro classificado
    pub fn from_record(record: &PhotoRecord, empresa: Option<&str>) -> Self {
        Self {
            empresa: empresa.map(str::to_string),
            frente: record.frente.to_wire(FRENTE_NAO_INFORMADA),
            categoria: record.disciplina.to_wire(DISCIPLINA_NAO_INFORMADA),
            servico: record.servico.to_wire(SERVICO_NAO_IDENTIFICADO),
            date_iso: record.date_iso.clone(),
            last_modified: Some(record.last_modified),
            file_name: record.file_name.clone(),
        }
    }
}

/// Caminho completo, com segmento de empresa quando informado
pub fn build_export_path(input: &ExportInput) -> String {
    let mut segments = Vec::with_capacity(7);
    if let Some(empresa) = &input.empresa {
        segments.push(sanitize_segment(empresa, "EMPRESA"));
    }
    push_common_segments(input, &mut segments);
    segments.join("/")
}

/// Variante sem o segmento de empresa
pub fn build_simple_export_path(input: &ExportInput) -> String {
    let mut segments = Vec::with_capacity(6);
    push_common_segments(input, &mut segments);
    segments.join("/")
}

fn push_common_segments(input: &ExportInput, segments: &mut Vec<String>) {
    segments.push(sanitize_segment(&input.frente, FRENTE_NAO_INFORMADA));
    segments.push(sanitize_segment(&input.categoria, DISCIPLINA_NAO_INFORMADA));
    segments.push(sanitize_segment(&input.servico, SERVICO_NAO_IDENTIFICADO));

    let millis = input
        .last_modified
        .unwrap_or_else(|| Local::now().timestamp_millis());
    let (year_month, day) = match &input.date_iso {
        Some(iso) => split_date_iso(iso, millis),
        None => split_date_iso(&date_iso_from_millis(millis), millis),
    };
    segments.push(year_month);
    segments.push(day);

    segments.push(sanitize_segment(&input.file_name, "FOTO_SEM_NOME"));
}

/// Sanitiza um segmento de caminho.
///
/// Apara, troca caracteres ilegais (`\ / : " * ? < > |`) por espaço,
/// colapsa espaços em `_`, remove pontos finais, colapsa `_` repetidos,
/// apara `_` das pontas, trunca em 80 caracteres e cai no token
/// reserva quando o resultado fica vazio.
pub fn sanitize_segment(raw: &str, fallback: &str) -> String {
    let replaced: String = raw
        .trim()
        .chars()
        .map(|c| match c {
            '\\' | '/' | ':' | '"' | '*' | '?' | '<' | '>' | '|' => ' ',
            c => c,
        })
        .collect();

    // Sequências de espaço em branco viram um único `_`
    let mut result = String::with_capacity(replaced.len());
    let mut in_whitespace = false;
    for c in replaced.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                result.push('_');
            }
            in_whitespace = true;
        } else {
            result.push(c);
            in_whitespace = false;
        }
    }

    while result.ends_with('.') {
        result.pop();
    }

    while result.contains("__") {
        result = result.replace("__", "_");
    }

    let result = result.trim_matches('_');
    let truncated: String = result.chars().take(MAX_SEGMENT_LEN).collect();

    if truncated.is_empty() {
        fallback.to_string()
    } else {
        truncated
    }
}
