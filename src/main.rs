use clap::Parser;
use indicatif::ProgressBar;
use obra_foto::{alias::AliasTable, cli, config, error, export, propagate, resolver, review, scanner, types};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use serde::Serialize;
use types::Status;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanEntry {
    id: String,
    export_path: String,
    status: Status,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    let config = Config::load()?;

    match cli.command {
        Commands::Classify { folder, output, ocr, alias, no_propagate } => {
            println!("📸 obra-foto - classificação\n");

            // 1. Varredura
            println!("[1/4] Varrendo fotos...");
            let mut photos = scanner::scan_folder(&folder)?;
            println!("✔ {} fotos encontradas\n", photos.len());

            if photos.is_empty() {
                return Err(error::ObraFotoError::NoPhotosFound(
                    folder.display().to_string(),
                ));
            }

            if let Some(ocr_path) = ocr {
                let sidecar = scanner::load_ocr_sidecar(&ocr_path)?;
                scanner::attach_ocr(&mut photos, &sidecar);
                println!("✔ OCR anexado a partir de {}\n", ocr_path.display());
            }

            // 2. Tabela de regras: embutidas + configuração + linha de comando
            println!("[2/4] Carregando regras...");
            let mut table = AliasTable::builtin();
            if let Some(path) = &config.alias_file {
                table.merge(AliasTable::from_file(path)?);
            }
            if let Some(path) = &alias {
                table.merge(AliasTable::from_file(path)?);
            }
            println!("✔ {} regras ativas\n", table.len());

            // 3. Classificação individual (paralela por foto)
            println!("[3/4] Classificando...");
            let spinner = ProgressBar::new_spinner();
            spinner.set_message(format!("{} fotos", photos.len()));
            spinner.enable_steady_tick(std::time::Duration::from_millis(100));
            let mut photos = resolver::classify_all(&photos, &table);
            spinner.finish_and_clear();
            println!("✔ Classificação concluída\n");

            // 4. Propagação por pasta (segunda fase, coleção completa)
            if !no_propagate {
                println!("[4/4] Propagando por pasta...");
                photos = propagate::propagate_by_folder(&photos);
                println!("✔ Propagação concluída\n");
            }

            if verbose {
                for photo in &photos {
                    println!(
                        "  {} → {} | {} | {} [{:?}]",
                        photo.id,
                        photo.frente.to_wire(types::FRENTE_NAO_INFORMADA),
                        photo.disciplina.to_wire(types::DISCIPLINA_NAO_INFORMADA),
                        photo.servico.to_wire(types::SERVICO_NAO_IDENTIFICADO),
                        photo.status
                    );
                }
            }

            let auto_ok = photos.iter().filter(|p| p.status == Status::AutoOk).count();
            let revisar = photos.iter().filter(|p| p.status == Status::Revisar).count();
            let manual = photos.iter().filter(|p| p.status == Status::Manual).count();
            println!("AUTO_OK: {}  REVISAR: {}  MANUAL: {}", auto_ok, revisar, manual);

            let output = output.unwrap_or_else(|| folder.join("classificacao.json"));
            let json = serde_json::to_string_pretty(&photos)?;
            std::fs::write(&output, json)?;
            println!("✔ Resultado salvo: {}", output.display());

            println!("\n✅ Concluído");
        }

        Commands::Plan { input, output, empresa, simple } => {
            println!("🗂 obra-foto - plano de exportação\n");

            let content = std::fs::read_to_string(&input)?;
            let photos: Vec<types::PhotoRecord> = serde_json::from_str(&content)?;

            let empresa = if simple {
                None
            } else {
                empresa.or_else(|| config.empresa.clone())
            };

            let plan: Vec<PlanEntry> = photos
                .iter()
                .map(|photo| {
                    let entry = export::ExportInput::from_record(photo, empresa.as_deref());
                    PlanEntry {
                        id: photo.id.clone(),
                        export_path: export::build_export_path(&entry),
                        status: photo.status,
                    }
                })
                .collect();

            let json = serde_json::to_string_pretty(&plan)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("✔ Plano salvo: {}", path.display());
                }
                None => println!("{}", json),
            }

            println!("\n✅ Concluído");
        }

        Commands::Review { input, output } => {
            println!("📋 obra-foto - revisão manual\n");
            review::run_interactive_review(&input, output.as_deref())?;
        }

        Commands::Config { set_empresa, show } => {
            let mut config = config;

            if let Some(empresa) = set_empresa {
                config.set_empresa(empresa)?;
                println!("✔ Empresa definida");
            }

            if show {
                println!("Configuração:");
                println!("  empresa: {}", config.empresa.as_deref().unwrap_or("(não definida)"));
                match &config.alias_file {
                    Some(path) => println!("  regras extras: {}", path.display()),
                    None => println!("  regras extras: (nenhuma)"),
                }
            }
        }
    }

    Ok(())
}
