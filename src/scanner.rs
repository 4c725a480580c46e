//! Ingestão de fotos
//!
//! Varre a pasta de entrada recursivamente e monta um `PhotoRecord`
//! por imagem: pasta relativa, nome do arquivo, data de modificação e,
//! quando presente, data EXIF. O texto de OCR vem de um arquivo
//! auxiliar JSON (`nome do arquivo → texto`) produzido pelo
//! colaborador externo de OCR; o núcleo nunca lê pixels.

use crate::error::{ObraFotoError, Result};
use crate::types::PhotoRecord;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::UNIX_EPOCH;
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "JPG", "JPEG", "PNG"];

fn is_image_extension(ext: &str) -> bool {
    IMAGE_EXTENSIONS.contains(&ext)
}

/// Varre a pasta e monta os registros (sem classificar)
pub fn scan_folder(folder: &Path) -> Result<Vec<PhotoRecord>> {
    if !folder.exists() {
        return Err(ObraFotoError::FolderNotFound(folder.display().to_string()));
    }

    let mut photos = Vec::new();

    for entry in WalkDir::new(folder).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let ext = match path.extension() {
            Some(ext) => ext.to_string_lossy().to_string(),
            None => continue,
        };
        if !is_image_extension(&ext) {
            continue;
        }

        let relative = path.strip_prefix(folder).unwrap_or(path);
        let id = relative.to_string_lossy().replace('\\', "/");
        let folder_path = relative
            .parent()
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .unwrap_or_default();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let last_modified = std::fs::metadata(path)
            .ok()
            .and_then(|m| m.modified().ok())
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);

        let date_iso = extract_exif_date(path);

        photos.push(PhotoRecord {
            id,
            folder_path,
            file_name,
            last_modified,
            date_iso,
            ..Default::default()
        });
    }

    // Ordem estável por caminho relativo
    photos.sort_by(|a, b| a.id.cmp(&b.id));

    Ok(photos)
}

/// Data EXIF (DateTimeOriginal, depois DateTime) como `AAAA-MM-DD`
fn extract_exif_date(path: &Path) -> Option<String> {
    let file = File::open(path).ok()?;
    let mut bufreader = BufReader::new(file);
    let exif = exif::Reader::new()
        .read_from_container(&mut bufreader)
        .ok()?;

    for tag in [exif::Tag::DateTimeOriginal, exif::Tag::DateTime] {
        if let Some(field) = exif.get_field(tag, exif::In::PRIMARY) {
            if let Some(date) = exif_display_to_iso(&field.display_value().to_string()) {
                return Some(date);
            }
        }
    }

    None
}

/// `2024-03-15 10:30:00` (ou `2024:03:15 ...`) → `2024-03-15`
fn exif_display_to_iso(display: &str) -> Option<String> {
    let date_part: String = display.chars().take(10).collect();
    if date_part.chars().count() != 10 {
        return None;
    }

    let iso: String = date_part
        .chars()
        .enumerate()
        .map(|(i, c)| if matches!(i, 4 | 7) { '-' } else { c })
        .collect();

    let valid = iso
        .chars()
        .enumerate()
        .all(|(i, c)| if matches!(i, 4 | 7) { c == '-' } else { c.is_ascii_digit() });
    valid.then_some(iso)
}

/// Lê o arquivo auxiliar de OCR (`nome do arquivo → texto`)
pub fn load_ocr_sidecar(path: &Path) -> Result<HashMap<String, String>> {
    if !path.exists() {
        return Err(ObraFotoError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    let map: HashMap<String, String> = serde_json::from_str(&content)?;
    Ok(map)
}

/// Anexa o texto de OCR aos registros (entradas ausentes ficam vazias)
pub fn attach_ocr(photos: &mut [PhotoRecord], ocr: &HashMap<String, String>) {
    for photo in photos {
        if let Some(text) = ocr.get(&photo.file_name).or_else(|| ocr.get(&photo.id)) {
            photo.ocr_text = text.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_is_image_extension() {
        assert!(is_image_extension("jpg"));
        assert!(is_image_extension("JPG"));
        assert!(is_image_extension("png"));
        assert!(!is_image_extension("txt"));
        assert!(!is_image_extension("pdf"));
    }

    #[test]
    fn test_scan_folder_not_found() {
        assert!(scan_folder(Path::new("/pasta/inexistente")).is_err());
    }

    #[test]
    fn test_scan_folder_builds_records() {
        let dir = tempdir().expect("tempdir");
        fs::create_dir_all(dir.path().join("BSO-02/Drenagem")).unwrap();
        fs::write(dir.path().join("BSO-02/Drenagem/IMG_001.jpg"), b"x").unwrap();
        fs::write(dir.path().join("solta.png"), b"x").unwrap();
        fs::write(dir.path().join("notas.txt"), b"x").unwrap();

        let photos = scan_folder(dir.path()).unwrap();
        assert_eq!(photos.len(), 2);

        assert_eq!(photos[0].id, "BSO-02/Drenagem/IMG_001.jpg");
        assert_eq!(photos[0].folder_path, "BSO-02/Drenagem");
        assert_eq!(photos[0].file_name, "IMG_001.jpg");
        assert!(photos[0].last_modified > 0);

        assert_eq!(photos[1].id, "solta.png");
        assert_eq!(photos[1].folder_path, "");
    }

    #[test]
    fn test_exif_display_to_iso() {
        assert_eq!(
            exif_display_to_iso("2024-03-15 10:30:00"),
            Some("2024-03-15".to_string())
        );
        assert_eq!(
            exif_display_to_iso("2024:03:15 10:30:00"),
            Some("2024-03-15".to_string())
        );
        assert_eq!(exif_display_to_iso("sem data"), None);
        assert_eq!(exif_display_to_iso(""), None);
    }

    #[test]
    fn test_attach_ocr() {
        let mut photos = vec![PhotoRecord {
            id: "X/a.jpg".to_string(),
            file_name: "a.jpg".to_string(),
            ..Default::default()
        }];

        let mut ocr = HashMap::new();
        ocr.insert("a.jpg".to_string(), "placa BSO-02".to_string());
        attach_ocr(&mut photos, &ocr);

        assert_eq!(photos[0].ocr_text, "placa BSO-02");
    }

    #[test]
    fn test_load_ocr_sidecar_missing_file() {
        assert!(load_ocr_sidecar(Path::new("/nao/existe.json")).is_err());
    }
}
