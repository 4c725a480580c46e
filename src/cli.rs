use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "obra-foto")]
#[command(about = "Classificação e organização de fotos de obra", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Saída detalhada
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Varre uma pasta de fotos, classifica e grava o JSON de resultado
    Classify {
        /// Pasta de fotos
        #[arg(required = true)]
        folder: PathBuf,

        /// Arquivo JSON de saída (padrão: pasta/classificacao.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// JSON auxiliar de OCR (nome do arquivo → texto)
        #[arg(long)]
        ocr: Option<PathBuf>,

        /// Arquivo JSON com regras de apelido adicionais
        #[arg(long)]
        alias: Option<PathBuf>,

        /// Não propagar classificações entre fotos da mesma pasta
        #[arg(long)]
        no_propagate: bool,
    },

    /// Gera o plano de exportação (caminho de destino por foto)
    Plan {
        /// JSON de classificação (saída do `classify`)
        #[arg(required = true)]
        input: PathBuf,

        /// Arquivo JSON de saída (padrão: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Nome da empresa (primeiro segmento do caminho)
        #[arg(short, long)]
        empresa: Option<String>,

        /// Omite o segmento de empresa mesmo com empresa configurada
        #[arg(long)]
        simple: bool,
    },

    /// Revisão manual interativa das fotos pendentes
    Review {
        /// JSON de classificação
        #[arg(required = true)]
        input: PathBuf,

        /// Saída (padrão: sobrescreve a entrada)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Mostra/edita a configuração
    Config {
        /// Define o nome da empresa
        #[arg(long)]
        set_empresa: Option<String>,

        /// Mostra a configuração
        #[arg(long)]
        show: bool,
    },
}
