//! Propagação por pasta
//!
//! Segunda fase, em lote, sobre a coleção completa: para cada pasta
//! não vazia, a foto mais bem classificada (10 pontos por campo
//! resolvido; empate decidido pela ordem de iteração) define a
//! classificação canônica da pasta, que preenche os campos ainda
//! desconhecidos das irmãs. Campos já resolvidos nunca são tocados.
//!
//! A passagem repete até estabilizar, garantindo idempotência mesmo
//! quando um preenchimento cria uma nova foto de maior pontuação.

use crate::resolver::recompute_confidence;
use crate::types::{Field, PhotoRecord, Source};
use std::collections::HashMap;

/// Pontuação de classificação: 10 pontos por campo não sentinela
pub fn classification_score(photo: &PhotoRecord) -> u32 {
    [&photo.frente, &photo.disciplina, &photo.servico]
        .iter()
        .filter(|f| f.is_known())
        .count() as u32
        * 10
}

/// Propaga classificações entre fotos da mesma pasta.
///
/// Função pura sobre a coleção completa; deve rodar somente depois
/// da classificação individual de todas as fotos.
pub fn propagate_by_folder(photos: &[PhotoRecord]) -> Vec<PhotoRecord> {
    let mut out: Vec<PhotoRecord> = photos.to_vec();
    while propagate_pass(&mut out) {}
    out
}

fn propagate_pass(photos: &mut [PhotoRecord]) -> bool {
    let mut groups: HashMap<String, Vec<usize>> = HashMap::new();
    for (i, photo) in photos.iter().enumerate() {
        if !photo.folder_path.is_empty() {
            groups.entry(photo.folder_path.clone()).or_default().push(i);
        }
    }

    let mut changed = false;

    for indices in groups.values() {
        // Melhor foto da pasta; empate fica com a primeira
        let mut best_idx = indices[0];
        let mut best_score = classification_score(&photos[best_idx]);
        for &i in &indices[1..] {
            let score = classification_score(&photos[i]);
            if score > best_score {
                best_idx = i;
                best_score = score;
            }
        }

        if best_score == 0 {
            continue;
        }

        let canonical_frente = photos[best_idx].frente.clone();
        let canonical_disciplina = photos[best_idx].disciplina.clone();
        let canonical_servico = photos[best_idx].servico.clone();

        for &i in indices {
            let mut filled = false;
            let photo = &mut photos[i];

            if !photo.frente.is_known() && canonical_frente.is_known() {
                photo.frente = canonical_frente.clone();
                photo.sources.frente = Some(Source::Propagation);
                filled = true;
            }
            if !photo.disciplina.is_known() && canonical_disciplina.is_known() {
                photo.disciplina = canonical_disciplina.clone();
                photo.sources.disciplina = Some(Source::Propagation);
                filled = true;
            }
            if !photo.servico.is_known() && canonical_servico.is_known() {
                photo.servico = canonical_servico.clone();
                photo.sources.servico = Some(Source::Propagation);
                filled = true;
            }

            if filled {
                recompute_confidence(photo);
                changed = true;
            }
        }
    }

    changed
}
