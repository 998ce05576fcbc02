use std::{fs, io};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub struct ContentFile {
    pub slug: String,
    pub file_path: PathBuf,
    pub raw_content: String,
}

impl ContentFile {
    pub fn from_file(slug: String, file_path: PathBuf) -> io::Result<ContentFile> {
        if !Self::is_content_file(&file_path) {
            return Err(io::Error::new(ErrorKind::Unsupported, format!("Not a markdown content file {}", file_path.display())));
        }

        let raw_content = fs::read_to_string(&file_path)?;

        Ok(ContentFile {
            slug,
            file_path,
            raw_content,
        })
    }

    pub fn is_content_file(file_name: &Path) -> bool {
        match file_name.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => matches!(ext.to_ascii_lowercase().as_str(), "md" | "markdown"),
            None => false,
        }
    }
}
