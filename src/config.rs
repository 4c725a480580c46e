//! Configuração do usuário

use crate::error::{ObraFotoError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Nome da empresa (segmento opcional do caminho de exportação)
    pub empresa: Option<String>,
    /// Arquivo JSON com regras de apelido adicionais
    pub alias_file: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ObraFotoError::Config("diretório home não encontrado".into()))?;
        Ok(home.join(".config").join("obra-foto").join("config.json"))
    }

    pub fn set_empresa(&mut self, empresa: String) -> Result<()> {
        self.empresa = Some(empresa);
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_ends_with_expected_suffix() {
        let path = Config::config_path().unwrap();
        assert!(path.ends_with(".config/obra-foto/config.json"));
    }

    #[test]
    fn test_config_roundtrip_json() {
        let config = Config {
            empresa: Some("Construtora Alfa".to_string()),
            alias_file: None,
        };
        let json = serde_json::to_string(&config).unwrap();
        let restored: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.empresa.as_deref(), Some("Construtora Alfa"));
    }
}
