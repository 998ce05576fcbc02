use std::io;
use std::path::{Path, PathBuf};

use spdlog::{debug, error, info, warn};

use crate::content::collection_list::CollectionList;
use crate::content::content_file::ContentFile;
use crate::content::front_matter::{parse_front_matter, split_front_matter};
use crate::content::{CollectionReport, Entry, LoadError};
use crate::reading_time::ReadingTime;
use crate::registry::CollectionRegistry;

pub struct ContentLoader<'a> {
    pub content_dir: PathBuf,
    pub registry: &'a CollectionRegistry,
    pub reading: ReadingTime,
}

impl<'a> ContentLoader<'a> {
    pub fn new(content_dir: PathBuf, registry: &'a CollectionRegistry, reading: ReadingTime) -> Self {
        ContentLoader { content_dir, registry, reading }
    }

    /// Loads every registered collection, in name order
    pub fn load_all(&self) -> io::Result<Vec<CollectionReport>> {
        let mut reports = vec![];
        for name in self.registry.names() {
            reports.push(self.load_collection(name)?);
        }
        Ok(reports)
    }

    /// Validates each source of `<content_dir>/<collection>`.
    /// Failing items are kept in the report, never dropped.
    pub fn load_collection(&self, collection: &str) -> io::Result<CollectionReport> {
        let mut report = CollectionReport {
            collection: collection.to_string(),
            ..Default::default()
        };

        let dir = self.content_dir.join(collection);
        if !dir.is_dir() {
            warn!("Collection {} has no directory at {}", collection, dir.display());
            return Ok(report);
        }

        let sources = CollectionList::new(dir).retrieve()?;
        for (slug, path) in sources {
            match self.load_entry(collection, slug, &path) {
                Ok(entry) => {
                    debug!("Loaded {}/{} ({} min)", collection, entry.slug, entry.reading_time);
                    report.entries.push(entry);
                }
                Err(e) => {
                    error!("Invalid content {}: {}", path.display(), e);
                    report.failures.push((path, e));
                }
            }
        }

        info!("Collection {}: {} valid, {} invalid", collection, report.entries.len(), report.failures.len());
        Ok(report)
    }

    pub fn load_entry(&self, collection: &str, slug: String, path: &Path) -> Result<Entry, LoadError> {
        let content_file = ContentFile::from_file(slug, path.to_path_buf())?;
        parse_entry(collection, content_file, self.registry, &self.reading)
    }
}

pub fn parse_entry(collection: &str, content_file: ContentFile, registry: &CollectionRegistry, reading: &ReadingTime) -> Result<Entry, LoadError> {
    let front_matter = split_front_matter(&content_file.raw_content)?;
    let raw = parse_front_matter(front_matter.format, front_matter.block)?;
    let record = registry.validate(&raw, collection)?;
    let reading_time = reading.of_markdown(front_matter.body)?;
    let body = front_matter.body.to_string();

    Ok(Entry {
        collection: collection.to_string(),
        slug: content_file.slug,
        file_path: content_file.file_path,
        record,
        body,
        reading_time,
    })
}

#[cfg(test)]
mod tests {
    use std::fs::{create_dir_all, write};

    use crate::collections::{collections, BlogRevision, BLOG, COLLECTIONS, PORTFOLIOS};
    use crate::registry::RegistryError;
    use crate::schema::FieldErrorKind;
    use crate::test_data::{BLOG_POST_MD, BLOG_POST_TOML, PORTFOLIO_MD};

    use super::*;

    fn content_file(raw: &str) -> ContentFile {
        ContentFile {
            slug: "what-i-learned".to_string(),
            file_path: PathBuf::from("src/content/blog/what-i-learned.md"),
            raw_content: raw.to_string(),
        }
    }

    #[test]
    fn test_parse_yaml_entry() {
        let entry = parse_entry(BLOG, content_file(BLOG_POST_MD), &COLLECTIONS, &ReadingTime::default()).unwrap();
        assert_eq!(entry.slug, "what-i-learned");
        assert_eq!(entry.record.get_str("title"), Some("What I learned after 20+ years of software development"));
        assert_eq!(entry.record.get_list("tags").unwrap(), ["career", "software"]);
        assert_eq!(entry.reading_time, 1);
        assert!(entry.is_visible());
        assert!(entry.body.starts_with("How to be a great software engineer?"));
    }

    #[test]
    fn test_parse_toml_entry() {
        let entry = parse_entry(BLOG, content_file(BLOG_POST_TOML), &COLLECTIONS, &ReadingTime::default()).unwrap();
        assert_eq!(entry.record.get_bool("show"), Some(false));
        assert!(!entry.is_visible());
        let (date, time) = crate::text_utils::format_date_time(&entry.record.get_date("publishDate").unwrap());
        assert_eq!(date, "2022-04-02");
        assert_eq!(time, "12:05:00");
    }

    #[test]
    fn test_without_show_revision_is_visible() {
        let registry = collections(BlogRevision::WithoutShow);
        let entry = parse_entry(BLOG, content_file(BLOG_POST_TOML), &registry, &ReadingTime::default()).unwrap();
        assert!(entry.is_visible());
    }

    #[test]
    fn test_invalid_entry() {
        let raw = "---\ndescription: no title\npublishDate: not-a-date\n---\nbody\n";
        let err = parse_entry(BLOG, content_file(raw), &COLLECTIONS, &ReadingTime::default()).unwrap_err();
        match err {
            LoadError::Registry(RegistryError::Invalid(err)) => {
                assert_eq!(err.kind_of("title"), Some(&FieldErrorKind::Missing));
                assert!(matches!(err.kind_of("publishDate"), Some(FieldErrorKind::InvalidDate { .. })));
            }
            e => panic!("unexpected error {}", e),
        }
    }

    #[test]
    fn test_unclosed_comment_in_body() {
        let raw = "---\ntitle: Draft\ndescription: Work in progress\npublishDate: Jul 08 2022\n---\nFirst words <!-- notes to self\n\nnever closed\n";
        let entry = parse_entry(BLOG, content_file(raw), &COLLECTIONS, &ReadingTime::default()).unwrap();
        assert_eq!(entry.reading_time, 1);
        assert!(entry.body.contains("never closed"));
    }

    #[test]
    fn test_missing_front_matter() {
        let err = parse_entry(BLOG, content_file("# Title\n\nbody\n"), &COLLECTIONS, &ReadingTime::default()).unwrap_err();
        assert!(matches!(err, LoadError::MissingFrontMatter));
    }

    #[test]
    fn test_load_all() -> io::Result<()> {
        let root = tempfile::tempdir()?;
        let blog = root.path().join(BLOG);
        let portfolios = root.path().join(PORTFOLIOS);
        create_dir_all(blog.join("toml-post"))?;
        create_dir_all(&portfolios)?;
        write(blog.join("yaml-post.md"), BLOG_POST_MD)?;
        write(blog.join("toml-post").join("index.md"), BLOG_POST_TOML)?;
        write(blog.join("broken.md"), "---\ntitle: Broken\n")?;
        write(portfolios.join("inkwell.md"), PORTFOLIO_MD)?;

        let loader = ContentLoader::new(root.path().to_path_buf(), &COLLECTIONS, ReadingTime::default());
        let reports = loader.load_all()?;
        assert_eq!(reports.len(), 2);

        let blog_report = &reports[0];
        assert_eq!(blog_report.collection, BLOG);
        let slugs: Vec<&str> = blog_report.entries.iter().map(|e| e.slug.as_str()).collect();
        assert_eq!(slugs, ["toml-post", "yaml-post"]);
        assert_eq!(blog_report.failures.len(), 1);
        assert_eq!(blog_report.failures[0].0, blog.join("broken.md"));
        assert!(matches!(blog_report.failures[0].1, LoadError::UnterminatedFrontMatter));
        assert!(!blog_report.is_ok());

        let portfolio_report = &reports[1];
        assert!(portfolio_report.is_ok());
        assert_eq!(portfolio_report.entries[0].slug, "inkwell");
        Ok(())
    }

    #[test]
    fn test_missing_collection_dir() -> io::Result<()> {
        let root = tempfile::tempdir()?;
        let loader = ContentLoader::new(root.path().to_path_buf(), &COLLECTIONS, ReadingTime::default());
        let report = loader.load_collection(PORTFOLIOS)?;
        assert!(report.entries.is_empty());
        assert!(report.is_ok());
        Ok(())
    }
}
