use std::{fs, io};
use std::path::{Path, PathBuf};

use crate::content::content_file::ContentFile;

/// Content sources of one collection directory.
/// Either `<slug>.md` files or `<slug>/index.md` directories.
pub struct CollectionList {
    pub root_dir: PathBuf,
    pub index_file: String,
}

impl CollectionList {
    pub fn new(root_dir: PathBuf) -> Self {
        CollectionList { root_dir, index_file: "index.md".to_string() }
    }

    /// All sources as (slug, file path), sorted by slug
    pub fn retrieve(&self) -> io::Result<Vec<(String, PathBuf)>> {
        let mut sources = self.retrieve_files()?;
        sources.extend(self.retrieve_dirs()?);
        sources.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(sources)
    }

    pub fn retrieve_files(&self) -> io::Result<Vec<(String, PathBuf)>> {
        let mut files = vec![];
        for entry in fs::read_dir(self.root_dir.as_path())? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let path = entry.path();
            if !ContentFile::is_content_file(&path) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                files.push((stem.to_string(), path.clone()));
            }
        }
        Ok(files)
    }

    pub fn retrieve_dirs(&self) -> io::Result<Vec<(String, PathBuf)>> {
        let dirs = Self::list_dirs(self.root_dir.as_path())?;
        // Filtering only the dirs with an index inside
        let mut sources = vec![];
        for dir in dirs {
            let index = dir.join(&self.index_file);
            if !index.is_file() {
                continue;
            }
            if let Some(name) = dir.file_name().and_then(|s| s.to_str()) {
                sources.push((name.to_string(), index));
            }
        }
        Ok(sources)
    }

    fn list_dirs(root_dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut dirs: Vec<PathBuf> = vec![];
        for entry in fs::read_dir(root_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                dirs.push(entry.path());
            }
        }
        Ok(dirs)
    }
}
