//! Regras de apelido (palavras-chave → classificação)
//!
//! Cada regra carrega um conjunto de palavras-chave (todas obrigatórias,
//! semântica E) e alvos opcionais de disciplina/serviço/frente, com uma
//! prioridade de 0 a 100. Entre as regras que casam vence a de maior
//! prioridade; empate é decidido pela ordem de declaração (a primeira
//! vence, varredura linear estável — nunca ordenação incidental).
//!
//! Invariante da tabela: regras mais específicas (mais palavras-chave,
//! escopo mais estreito) recebem prioridade maior que regras genéricas
//! de palavra única. Preservar ao estender.

use crate::error::{ObraFotoError, Result};
use crate::normalizer::normalize_text;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

/// Uma regra de apelido
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasRule {
    /// Palavras-chave; todas precisam aparecer no texto normalizado
    #[serde(rename = "match")]
    pub keywords: Vec<String>,

    #[serde(default)]
    pub disciplina: Option<String>,

    #[serde(default)]
    pub servico: Option<String>,

    #[serde(default)]
    pub frente: Option<String>,

    /// Prioridade 0–100; maior vence
    pub priority: u8,
}

/// Resultado da regra vencedora
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasMatch {
    pub disciplina: Option<String>,
    pub servico: Option<String>,
    pub frente: Option<String>,
    /// Prioridade da regra vencedora (0 quando nada casou)
    pub score: u8,
}

/// (palavras-chave, disciplina, serviço, frente, prioridade)
type RuleSpec = (
    &'static [&'static str],
    Option<&'static str>,
    Option<&'static str>,
    Option<&'static str>,
    u8,
);

/// Tabela embutida: dados declarativos, não lógica
const BUILTIN_RULES: &[RuleSpec] = &[
    // Drenagem
    (&["SARJETA", "CONCRETO"], Some("DRENAGEM"), Some("SARJETA_CONCRETO"), None, 70),
    (&["SARJETA"], Some("DRENAGEM"), Some("SARJETA_CONCRETO"), None, 50),
    (&["MEIO FIO"], Some("DRENAGEM"), Some("MEIO_FIO"), None, 55),
    (&["BUEIRO", "CELULAR"], Some("DRENAGEM"), Some("BUEIRO_CELULAR"), None, 70),
    (&["BUEIRO"], Some("DRENAGEM"), Some("BUEIRO_CELULAR"), None, 45),
    (&["BOCA", "LOBO"], Some("DRENAGEM"), Some("BOCA_DE_LOBO"), None, 70),
    (&["DESCIDA", "AGUA"], Some("DRENAGEM"), Some("DESCIDA_DAGUA"), None, 70),
    (&["DRENO"], Some("DRENAGEM"), Some("DRENO_PROFUNDO"), None, 45),
    (&["VALETA"], Some("DRENAGEM"), Some("VALETA_PROTECAO"), None, 50),
    (&["DRENAGEM"], Some("DRENAGEM"), None, None, 40),
    // Terraplenagem
    (&["LIMPEZA", "TERRENO"], Some("TERRAPLENAGEM"), Some("LIMPEZA_TERRENO"), None, 70),
    (&["SUBLEITO"], Some("TERRAPLENAGEM"), Some("REGULARIZACAO_SUBLEITO"), None, 55),
    (&["ATERRO"], Some("TERRAPLENAGEM"), Some("ATERRO"), None, 45),
    (&["CORTE"], Some("TERRAPLENAGEM"), Some("CORTE"), None, 35),
    (&["DEMOLICAO"], Some("TERRAPLENAGEM"), Some("DEMOLICAO"), None, 45),
    (&["TERRAPLENAGEM"], Some("TERRAPLENAGEM"), None, None, 40),
    // Pavimentação
    (&["PINTURA", "LIGACAO"], Some("PAVIMENTACAO"), Some("PINTURA_DE_LIGACAO"), None, 75),
    (&["MASSA", "ASFALTICA"], Some("PAVIMENTACAO"), Some("CBUQ"), None, 70),
    (&["BRITA", "GRADUADA"], Some("PAVIMENTACAO"), Some("BASE_BRITA_GRADUADA"), None, 70),
    (&["SUB BASE"], Some("PAVIMENTACAO"), Some("SUB_BASE"), None, 60),
    (&["MICRORREVESTIMENTO"], Some("PAVIMENTACAO"), Some("MICRORREVESTIMENTO"), None, 60),
    (&["CBUQ"], Some("PAVIMENTACAO"), Some("CBUQ"), None, 55),
    (&["BINDER"], Some("PAVIMENTACAO"), Some("CBUQ"), None, 50),
    (&["IMPRIMACAO"], Some("PAVIMENTACAO"), Some("IMPRIMACAO"), None, 55),
    (&["FRESAGEM"], Some("PAVIMENTACAO"), Some("FRESAGEM"), None, 55),
    (&["RECAPE"], Some("PAVIMENTACAO"), Some("RECAPEAMENTO"), None, 50),
    (&["ASFALTO"], Some("PAVIMENTACAO"), None, None, 35),
    (&["PAVIMENT"], Some("PAVIMENTACAO"), None, None, 40),
    // Sinalização
    (&["PINTURA", "FAIXA"], Some("SINALIZACAO"), Some("PINTURA_FAIXA"), None, 70),
    (&["DEFENSA"], Some("SINALIZACAO"), Some("DEFENSA_METALICA"), None, 50),
    (&["TACHA"], Some("SINALIZACAO"), Some("TACHAS"), None, 50),
    (&["PLACA"], Some("SINALIZACAO"), Some("PLACA_SINALIZACAO"), None, 40),
    (&["SINALIZACAO"], Some("SINALIZACAO"), None, None, 40),
    // Estruturas e contenção
    (&["CORTINA", "ATIRANTADA"], Some("CONTENCAO"), Some("CORTINA_ATIRANTADA"), None, 75),
    (&["ESTACA", "RAIZ"], Some("CONTENCAO"), Some("ESTACA_RAIZ"), None, 70),
    (&["FORMA", "ARMACAO"], Some("ESTRUTURAS"), Some("FORMA_ARMACAO"), None, 70),
    (&["GABIAO"], Some("CONTENCAO"), Some("GABIAO"), None, 55),
    (&["ENROCAMENTO"], Some("CONTENCAO"), Some("ENROCAMENTO"), None, 55),
    (&["CONCRETAGEM"], Some("ESTRUTURAS"), Some("CONCRETAGEM"), None, 50),
    (&["VIADUTO"], Some("OAE"), None, None, 50),
    (&["PONTE"], Some("OAE"), None, None, 45),
    (&["ESTRUTURA"], Some("ESTRUTURAS"), None, None, 35),
    // Complementares
    (&["HIDROSSEMEADURA"], Some("MEIO_AMBIENTE"), Some("HIDROSSEMEADURA"), None, 60),
    (&["PLANTIO", "GRAMA"], Some("PAISAGISMO"), Some("PLANTIO_GRAMA"), None, 70),
    (&["GRAMA"], Some("PAISAGISMO"), Some("PLANTIO_GRAMA"), None, 45),
    (&["ALAMBRADO"], None, Some("ALAMBRADO"), None, 45),
    (&["CERCA"], None, Some("CERCA"), None, 40),
    (&["ILUMINACAO"], Some("ILUMINACAO"), None, None, 40),
    // Frentes (conhecimento derivado de nomes de pasta)
    (&["BASE", "OPERACIONAL"], None, None, Some("BSO"), 65),
    (&["PRACA", "PEDAGIO"], None, None, Some("PT"), 65),
    (&["PEDAGIO"], None, None, Some("PT"), 45),
    (&["CANTEIRO"], None, None, Some("CANTEIRO"), 40),
];

lazy_static! {
    static ref BUILTIN_TABLE: AliasTable = AliasTable::builtin();
}

/// Tabela de regras (embutidas + opcionalmente as do usuário)
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    rules: Vec<AliasRule>,
}

impl AliasTable {
    /// Tabela embutida
    pub fn builtin() -> Self {
        let rules = BUILTIN_RULES
            .iter()
            .map(|(keywords, disciplina, servico, frente, priority)| AliasRule {
                keywords: keywords.iter().map(|k| k.to_string()).collect(),
                disciplina: disciplina.map(str::to_string),
                servico: servico.map(str::to_string),
                frente: frente.map(str::to_string),
                priority: *priority,
            })
            .collect();
        Self { rules }
    }

    /// Carrega regras adicionais de uma string JSON (lista de regras)
    pub fn from_json(json: &str) -> Result<Self> {
        let rules: Vec<AliasRule> = serde_json::from_str(json)?;
        for (i, rule) in rules.iter().enumerate() {
            if rule.keywords.is_empty() {
                return Err(ObraFotoError::InvalidRules(format!(
                    "regra {} sem palavras-chave",
                    i
                )));
            }
        }
        Ok(Self { rules })
    }

    /// Carrega regras adicionais de um arquivo JSON
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Acrescenta regras ao final (as embutidas vencem empates)
    pub fn merge(&mut self, other: AliasTable) {
        self.rules.extend(other.rules);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Avalia todas as regras contra pasta + arquivo + OCR concatenados.
    ///
    /// Retorna os alvos da regra vencedora e sua prioridade como `score`;
    /// resultado vazio com `score = 0` quando nada casa.
    pub fn apply(&self, folder_path: &str, file_name: &str, ocr_text: &str) -> AliasMatch {
        let haystack = normalize_text(&format!("{} {} {}", folder_path, file_name, ocr_text));
        if haystack.is_empty() {
            return AliasMatch::default();
        }

        let mut best: Option<&AliasRule> = None;
        for rule in &self.rules {
            let fires = !rule.keywords.is_empty()
                && rule.keywords.iter().all(|keyword| {
                    let k = normalize_text(keyword);
                    !k.is_empty() && haystack.contains(&k)
                });
            if !fires {
                continue;
            }

            // Estritamente maior: em empate a primeira declarada permanece
            if best.map_or(true, |b| rule.priority > b.priority) {
                best = Some(rule);
            }
        }

        match best {
            Some(rule) => AliasMatch {
                disciplina: rule.disciplina.clone(),
                servico: rule.servico.clone(),
                frente: rule.frente.clone(),
                score: rule.priority,
            },
            None => AliasMatch::default(),
        }
    }
}

/// Avalia a tabela embutida
pub fn apply_alias_rules(folder_path: &str, file_name: &str, ocr_text: &str) -> AliasMatch {
    BUILTIN_TABLE.apply(folder_path, file_name, ocr_text)
}
