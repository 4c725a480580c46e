//! Revisão manual interativa
//!
//! Percorre as fotos em REVISAR/MANUAL e pede ao usuário os campos
//! ainda desconhecidos. Valores digitados são gravados como origem
//! `manual` e a confiança é recalculada pela regra canônica.

use crate::error::{ObraFotoError, Result};
use crate::resolver::recompute_confidence;
use crate::types::{Field, PhotoRecord, Source};
use dialoguer::Input;
use std::collections::HashSet;
use std::path::Path;

/// Índices das fotos que precisam de revisão
pub fn extract_review_photos(photos: &[PhotoRecord]) -> Vec<usize> {
    photos
        .iter()
        .enumerate()
        .filter(|(_, p)| p.needs_review())
        .map(|(i, _)| i)
        .collect()
}

/// Valores já conhecidos de um campo na coleção (sem repetição)
pub fn collect_known_values<F>(photos: &[PhotoRecord], field: F) -> Vec<String>
where
    F: Fn(&PhotoRecord) -> &Field,
{
    let mut seen = HashSet::new();
    photos
        .iter()
        .filter_map(|p| field(p).as_known())
        .filter_map(|v| {
            if seen.insert(v.to_string()) {
                Some(v.to_string())
            } else {
                None
            }
        })
        .collect()
}

enum ReviewAction {
    /// Valor digitado
    Input(String),
    /// Pula este campo
    Skip,
    /// Pula todas as fotos restantes
    SkipAll,
    /// Salva e sai
    Quit,
}

/// Revisão interativa sobre um JSON de classificação
pub fn run_interactive_review(input_path: &Path, output_path: Option<&Path>) -> Result<()> {
    let content = std::fs::read_to_string(input_path)?;
    let mut photos: Vec<PhotoRecord> = serde_json::from_str(&content)?;

    let pending = extract_review_photos(&photos);

    if pending.is_empty() {
        println!("✓ Nenhuma foto pendente de revisão");
        return Ok(());
    }

    println!("📋 Fotos pendentes de revisão: {}", pending.len());
    println!("---");
    println!("Operações: [Enter]pular campo [S]pular o resto [q]salvar e sair");
    println!("---\n");

    let frentes = collect_known_values(&photos, |p| &p.frente);
    let disciplinas = collect_known_values(&photos, |p| &p.disciplina);
    let servicos = collect_known_values(&photos, |p| &p.servico);

    let mut stop = false;

    'fotos: for (count, &idx) in pending.iter().enumerate() {
        if stop {
            break;
        }

        println!(
            "[{}/{}] {} ({:?})",
            count + 1,
            pending.len(),
            photos[idx].id,
            photos[idx].status
        );

        let prompts: [(&str, fn(&PhotoRecord) -> &Field, &Vec<String>); 3] = [
            ("frente", |p| &p.frente, &frentes),
            ("disciplina", |p| &p.disciplina, &disciplinas),
            ("serviço", |p| &p.servico, &servicos),
        ];

        for (label, accessor, candidates) in prompts {
            if accessor(&photos[idx]).is_known() {
                continue;
            }

            match prompt_field(label, candidates)? {
                ReviewAction::Input(value) => {
                    let field = Field::known(value.clone());
                    match label {
                        "frente" => {
                            photos[idx].frente = field;
                            photos[idx].sources.frente = Some(Source::Manual);
                        }
                        "disciplina" => {
                            photos[idx].disciplina = field;
                            photos[idx].sources.disciplina = Some(Source::Manual);
                        }
                        _ => {
                            photos[idx].servico = field;
                            photos[idx].sources.servico = Some(Source::Manual);
                        }
                    }
                    println!("  → {}\n", value);
                }
                ReviewAction::Skip => {
                    println!("  → campo pulado\n");
                }
                ReviewAction::SkipAll => {
                    println!("  → pulando o restante\n");
                    stop = true;
                    recompute_confidence(&mut photos[idx]);
                    continue 'fotos;
                }
                ReviewAction::Quit => {
                    recompute_confidence(&mut photos[idx]);
                    println!("Salvando e saindo...");
                    break 'fotos;
                }
            }
        }

        recompute_confidence(&mut photos[idx]);
    }

    let output = output_path.unwrap_or(input_path);
    let json = serde_json::to_string_pretty(&photos)?;
    std::fs::write(output, json)?;

    println!("\n✓ Salvo em: {}", output.display());

    Ok(())
}

fn prompt_field(label: &str, candidates: &[String]) -> Result<ReviewAction> {
    if !candidates.is_empty() {
        println!("  candidatos: {}", candidates.join(", "));
    }

    let input: String = Input::new()
        .with_prompt(format!("{} (Enter:pular S:pular resto q:sair)", label))
        .allow_empty(true)
        .interact_text()
        .map_err(|e| ObraFotoError::Config(e.to_string()))?;

    let trimmed = input.trim();

    match trimmed {
        "" => Ok(ReviewAction::Skip),
        "S" => Ok(ReviewAction::SkipAll),
        "q" | "Q" => Ok(ReviewAction::Quit),
        _ => Ok(ReviewAction::Input(trimmed.to_string())),
    }
}
