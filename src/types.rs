//! Tipos do registro de foto e da classificação
//!
//! Compartilhados entre o motor de classificação e a CLI:
//! - PhotoRecord: registro de uma foto (proveniência + classificação)
//! - Field: valor conhecido ou desconhecido (sentinela só na serialização)
//! - Confidence / Status: grau de confiança e situação de revisão

use serde::{Deserialize, Serialize};

/// Sentinela: frente de obra não identificada
pub const FRENTE_NAO_INFORMADA: &str = "FRENTE_NAO_INFORMADA";
/// Sentinela: disciplina não identificada
pub const DISCIPLINA_NAO_INFORMADA: &str = "DISCIPLINA_NAO_INFORMADA";
/// Sentinela: serviço não identificado
pub const SERVICO_NAO_IDENTIFICADO: &str = "SERVICO_NAO_IDENTIFICADO";

/// Campo de classificação: conhecido ou desconhecido.
///
/// Internamente nunca se usa a string sentinela; ela só existe na
/// fronteira de serialização (contrato estável com os consumidores).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Unknown,
    Known(String),
}

impl Field {
    pub fn known(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Field::Unknown
        } else {
            Field::Known(value)
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Field::Known(_))
    }

    pub fn as_known(&self) -> Option<&str> {
        match self {
            Field::Known(v) => Some(v.as_str()),
            Field::Unknown => None,
        }
    }

    /// Converte para a representação externa (sentinela quando desconhecido)
    pub fn to_wire(&self, sentinel: &str) -> String {
        match self {
            Field::Known(v) => v.clone(),
            Field::Unknown => sentinel.to_string(),
        }
    }

    /// Interpreta a representação externa (sentinela ou vazio → desconhecido)
    pub fn from_wire(raw: &str, sentinel: &str) -> Self {
        if raw.is_empty() || raw == sentinel {
            Field::Unknown
        } else {
            Field::Known(raw.to_string())
        }
    }
}

pub(crate) mod frente_wire {
    use super::{Field, FRENTE_NAO_INFORMADA};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(field: &Field, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&field.to_wire(FRENTE_NAO_INFORMADA))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Field, D::Error> {
        let raw = String::deserialize(d)?;
        Ok(Field::from_wire(&raw, FRENTE_NAO_INFORMADA))
    }
}

pub(crate) mod disciplina_wire {
    use super::{Field, DISCIPLINA_NAO_INFORMADA};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(field: &Field, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&field.to_wire(DISCIPLINA_NAO_INFORMADA))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Field, D::Error> {
        let raw = String::deserialize(d)?;
        Ok(Field::from_wire(&raw, DISCIPLINA_NAO_INFORMADA))
    }
}

pub(crate) mod servico_wire {
    use super::{Field, SERVICO_NAO_IDENTIFICADO};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(field: &Field, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&field.to_wire(SERVICO_NAO_IDENTIFICADO))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Field, D::Error> {
        let raw = String::deserialize(d)?;
        Ok(Field::from_wire(&raw, SERVICO_NAO_IDENTIFICADO))
    }
}

/// Grau de confiança da classificação automática
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
    #[default]
    None,
}

/// Situação de revisão
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "AUTO_OK")]
    AutoOk,
    #[serde(rename = "REVISAR")]
    Revisar,
    #[default]
    #[serde(rename = "MANUAL")]
    Manual,
}

/// Origem vencedora de cada campo (auditoria)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Source {
    Exif,
    LastModified,
    Folder,
    Filename,
    Ocr,
    Alias,
    Propagation,
    Manual,
}

/// Origem registrada por campo
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldSources {
    pub date: Option<Source>,
    pub frente: Option<Source>,
    pub disciplina: Option<Source>,
    pub servico: Option<Source>,
}

/// Registro de uma foto da obra
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhotoRecord {
    /// Identificador estável (caminho relativo na ingestão)
    pub id: String,

    /// Caminho da pasta de origem (pode ser vazio)
    pub folder_path: String,

    pub file_name: String,

    /// Texto de OCR fornecido pelo colaborador externo
    pub ocr_text: String,

    /// Data de modificação do arquivo (epoch millis)
    pub last_modified: i64,

    pub date_iso: Option<String>,
    pub year_month: Option<String>,
    pub day: Option<String>,

    #[serde(with = "frente_wire")]
    pub frente: Field,

    #[serde(with = "disciplina_wire")]
    pub disciplina: Field,

    #[serde(with = "servico_wire")]
    pub servico: Field,

    pub confidence: Confidence,
    pub status: Status,
    pub sources: FieldSources,
}

impl PhotoRecord {
    /// Regra canônica única: precisa de revisão sempre que não for AUTO_OK
    pub fn needs_review(&self) -> bool {
        self.status != Status::AutoOk
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_known_empty_is_unknown() {
        assert_eq!(Field::known(""), Field::Unknown);
        assert_eq!(Field::known("DRENAGEM"), Field::Known("DRENAGEM".to_string()));
    }

    #[test]
    fn test_field_wire_roundtrip() {
        let f = Field::from_wire("FRENTE_NAO_INFORMADA", FRENTE_NAO_INFORMADA);
        assert_eq!(f, Field::Unknown);
        assert_eq!(f.to_wire(FRENTE_NAO_INFORMADA), "FRENTE_NAO_INFORMADA");

        let f = Field::from_wire("BSO_02", FRENTE_NAO_INFORMADA);
        assert_eq!(f.as_known(), Some("BSO_02"));
    }

    #[test]
    fn test_photo_record_serialize_sentinels() {
        let record = PhotoRecord {
            id: "1".to_string(),
            file_name: "foto.jpg".to_string(),
            ..Default::default()
        };

        let json = serde_json::to_string(&record).expect("falha ao serializar");
        assert!(json.contains("\"frente\":\"FRENTE_NAO_INFORMADA\""));
        assert!(json.contains("\"disciplina\":\"DISCIPLINA_NAO_INFORMADA\""));
        assert!(json.contains("\"servico\":\"SERVICO_NAO_IDENTIFICADO\""));
        assert!(json.contains("\"status\":\"MANUAL\""));
        assert!(json.contains("\"confidence\":\"none\""));
    }

    #[test]
    fn test_photo_record_deserialize_missing_fields() {
        let json = r#"{"id": "x", "fileName": "minimal.jpg"}"#;

        let record: PhotoRecord = serde_json::from_str(json).expect("falha ao desserializar");
        assert_eq!(record.file_name, "minimal.jpg");
        assert_eq!(record.frente, Field::Unknown);
        assert_eq!(record.status, Status::Manual);
    }

    #[test]
    fn test_photo_record_roundtrip() {
        let original = PhotoRecord {
            id: "BSO-02/IMG_001.jpg".to_string(),
            folder_path: "BSO-02/Drenagem".to_string(),
            file_name: "IMG_001.jpg".to_string(),
            date_iso: Some("2024-03-15".to_string()),
            frente: Field::known("BSO_02"),
            disciplina: Field::known("DRENAGEM"),
            servico: Field::known("SARJETA_CONCRETO"),
            confidence: Confidence::High,
            status: Status::AutoOk,
            ..Default::default()
        };

        let json = serde_json::to_string(&original).expect("falha ao serializar");
        assert!(json.contains("\"status\":\"AUTO_OK\""));
        let restored: PhotoRecord = serde_json::from_str(&json).expect("falha ao desserializar");
        assert_eq!(original, restored);
    }

    #[test]
    fn test_needs_review() {
        let mut record = PhotoRecord::default();
        assert!(record.needs_review());

        record.status = Status::Revisar;
        assert!(record.needs_review());

        record.status = Status::AutoOk;
        assert!(!record.needs_review());
    }
}
