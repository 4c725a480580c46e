use thiserror::Error;

#[derive(Error, Debug)]
pub enum ObraFotoError {
    #[error("Erro de configuração: {0}")]
    Config(String),

    #[error("Arquivo não encontrado: {0}")]
    FileNotFound(String),

    #[error("Pasta não encontrada: {0}")]
    FolderNotFound(String),

    #[error("Nenhuma foto encontrada em: {0}")]
    NoPhotosFound(String),

    #[error("Arquivo de regras inválido: {0}")]
    InvalidRules(String),

    #[error("Erro de JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Erro de E/S: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ObraFotoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_config() {
        let error = ObraFotoError::Config("empresa não definida".to_string());
        assert_eq!(format!("{}", error), "Erro de configuração: empresa não definida");
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: ObraFotoError = io_error.into();
        assert!(matches!(error, ObraFotoError::Io(_)));
        assert!(format!("{}", error).contains("E/S"));
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: ObraFotoError = json_error.into();
        assert!(matches!(error, ObraFotoError::JsonParse(_)));
    }
}
