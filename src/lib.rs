//! Obra Foto
//!
//! Motor determinístico de classificação de fotos de obra:
//! infere frente, disciplina e serviço a partir de pastas, nomes de
//! arquivo, OCR e regras de apelido, e monta caminhos de exportação.

pub mod alias;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod frente;
pub mod normalizer;
pub mod propagate;
pub mod resolver;
pub mod review;
pub mod scanner;
pub mod types;
pub mod vocab;

pub use alias::{apply_alias_rules, AliasMatch, AliasRule, AliasTable};
pub use error::{ObraFotoError, Result};
pub use export::{build_export_path, build_simple_export_path, ExportInput};
pub use frente::{extract_frente_from_ocr, extract_frente_from_path};
pub use normalizer::{normalize_code, normalize_text};
pub use propagate::{classification_score, propagate_by_folder};
pub use resolver::{classify_all, classify_photo, classify_photo_with};
pub use types::{Confidence, Field, PhotoRecord, Source, Status};
pub use vocab::{find_disciplina_in_text, find_servico_in_text};
