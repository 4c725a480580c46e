//! Resolvedor de classificação
//!
//! Passo único e determinístico, com prioridade estrita por fonte:
//! 1. data (EXIF sobrepõe a data de modificação do arquivo)
//! 2. frente: caminho + arquivo, depois OCR
//! 3. disciplina: vocabulário na pasta, depois no arquivo
//! 4. serviço: idem
//! 5. regras de apelido (só preenchem campos ainda desconhecidos)
//! 6. vocabulário direto no OCR (última tentativa)
//! 7. derivação de confiança/situação
//!
//! Nenhum passo sobrescreve um campo já resolvido por um passo anterior.
//! Cada transição registra a fonte vencedora.

use crate::alias::{apply_alias_rules, AliasTable};
use crate::frente::{extract_frente_from_ocr, extract_frente_from_path};
use crate::types::{Confidence, Field, PhotoRecord, Source, Status};
use crate::vocab::{find_disciplina_in_text, find_servico_in_text};
use chrono::{Local, TimeZone};
use rayon::prelude::*;

/// Classifica uma foto usando a tabela de regras embutida
pub fn classify_photo(photo: &PhotoRecord) -> PhotoRecord {
    classify_photo_inner(photo, None)
}

/// Classifica uma foto com uma tabela de regras específica
/// (embutidas + regras do usuário)
pub fn classify_photo_with(photo: &PhotoRecord, table: &AliasTable) -> PhotoRecord {
    classify_photo_inner(photo, Some(table))
}

fn classify_photo_inner(photo: &PhotoRecord, table: Option<&AliasTable>) -> PhotoRecord {
    let mut out = photo.clone();

    // 1. Data: lastModified como base; EXIF (já anexado) sobrepõe
    if out.date_iso.is_none() {
        out.date_iso = Some(date_iso_from_millis(out.last_modified));
        out.sources.date = Some(Source::LastModified);
    } else if out.sources.date.is_none() {
        out.sources.date = Some(Source::Exif);
    }
    if let Some(iso) = &out.date_iso {
        let (year_month, day) = split_date_iso(iso, out.last_modified);
        out.year_month = Some(year_month);
        out.day = Some(day);
    }

    // 2. Frente: caminho + arquivo, depois OCR
    if !out.frente.is_known() {
        out.frente = extract_frente_from_path(&out.folder_path, &out.file_name);
        if out.frente.is_known() {
            out.sources.frente = Some(Source::Folder);
        } else if let Some(code) = extract_frente_from_ocr(&out.ocr_text) {
            out.frente = Field::Known(code);
            out.sources.frente = Some(Source::Ocr);
        }
    }

    // 3. Disciplina: pasta, depois arquivo
    if !out.disciplina.is_known() {
        if let Some(d) = find_disciplina_in_text(&out.folder_path) {
            out.disciplina = Field::known(d);
            out.sources.disciplina = Some(Source::Folder);
        } else if let Some(d) = find_disciplina_in_text(&out.file_name) {
            out.disciplina = Field::known(d);
            out.sources.disciplina = Some(Source::Filename);
        }
    }

    // 4. Serviço: pasta, depois arquivo
    if !out.servico.is_known() {
        if let Some(s) = find_servico_in_text(&out.folder_path) {
            out.servico = Field::known(s);
            out.sources.servico = Some(Source::Folder);
        } else if let Some(s) = find_servico_in_text(&out.file_name) {
            out.servico = Field::known(s);
            out.sources.servico = Some(Source::Filename);
        }
    }

    // 5. Regras de apelido: só preenchem o que continua desconhecido
    if !out.frente.is_known() || !out.disciplina.is_known() || !out.servico.is_known() {
        let m = match table {
            Some(t) => t.apply(&out.folder_path, &out.file_name, &out.ocr_text),
            None => apply_alias_rules(&out.folder_path, &out.file_name, &out.ocr_text),
        };
        if m.score > 0 {
            if !out.disciplina.is_known() {
                if let Some(d) = m.disciplina.filter(|d| !d.is_empty()) {
                    out.disciplina = Field::Known(d);
                    out.sources.disciplina = Some(Source::Alias);
                }
            }
            if !out.servico.is_known() {
                if let Some(s) = m.servico.filter(|s| !s.is_empty()) {
                    out.servico = Field::Known(s);
                    out.sources.servico = Some(Source::Alias);
                }
            }
            if !out.frente.is_known() {
                if let Some(f) = m.frente.filter(|f| !f.is_empty()) {
                    out.frente = Field::Known(f);
                    // Regras de frente codificam conhecimento derivado de pasta
                    out.sources.frente = Some(Source::Folder);
                }
            }
        }
    }

    // 6. Última tentativa: vocabulário direto no OCR
    if !out.disciplina.is_known() {
        if let Some(d) = find_disciplina_in_text(&out.ocr_text) {
            out.disciplina = Field::known(d);
            out.sources.disciplina = Some(Source::Ocr);
        }
    }
    if !out.servico.is_known() {
        if let Some(s) = find_servico_in_text(&out.ocr_text) {
            out.servico = Field::known(s);
            out.sources.servico = Some(Source::Ocr);
        }
    }

    // 7. Confiança e situação
    recompute_confidence(&mut out);

    out
}

/// Classifica a coleção inteira em paralelo (fase por foto;
/// a propagação por pasta roda depois, como segunda fase)
pub fn classify_all(photos: &[PhotoRecord], table: &AliasTable) -> Vec<PhotoRecord> {
    photos
        .par_iter()
        .map(|photo| classify_photo_with(photo, table))
        .collect()
}

/// Recalcula confiança/situação a partir dos campos resolvidos.
///
/// 4/4 → high/AUTO_OK, 3/4 → medium/AUTO_OK, 2/4 → low/REVISAR,
/// ≤1/4 → none/MANUAL. Regra canônica única (ver DESIGN.md).
pub fn recompute_confidence(photo: &mut PhotoRecord) {
    let resolved = [
        photo.frente.is_known(),
        photo.disciplina.is_known(),
        photo.servico.is_known(),
        photo.date_iso.is_some(),
    ]
    .iter()
    .filter(|&&r| r)
    .count();

    let (confidence, status) = match resolved {
        4 => (Confidence::High, Status::AutoOk),
        3 => (Confidence::Medium, Status::AutoOk),
        2 => (Confidence::Low, Status::Revisar),
        _ => (Confidence::None, Status::Manual),
    };
    photo.confidence = confidence;
    photo.status = status;
}

/// Converte epoch millis em data ISO local
pub(crate) fn date_iso_from_millis(millis: i64) -> String {
    match Local.timestamp_millis_opt(millis).single() {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => Local::now().format("%Y-%m-%d").to_string(),
    }
}

/// Decompõe `YYYY-MM-DD` em (`YYYY-MM`, `DD`); formato inesperado
/// cai na data derivada do timestamp
pub(crate) fn split_date_iso(date_iso: &str, fallback_millis: i64) -> (String, String) {
    let bytes = date_iso.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && date_iso
            .chars()
            .enumerate()
            .all(|(i, c)| matches!(i, 4 | 7) || c.is_ascii_digit());

    if well_formed {
        (date_iso[..7].to_string(), date_iso[8..].to_string())
    } else {
        let derived = date_iso_from_millis(fallback_millis);
        (derived[..7].to_string(), derived[8..].to_string())
    }
}
