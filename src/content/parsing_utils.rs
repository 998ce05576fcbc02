use crate::content::front_matter::split_front_matter;
use crate::content::LoadError;

/// Markdown body of a content file. Files without front matter are all body.
pub fn skip_front_matter(raw: &str) -> Result<&str, LoadError> {
    match split_front_matter(raw) {
        Ok(front_matter) => Ok(front_matter.body),
        Err(LoadError::MissingFrontMatter) => Ok(raw),
        Err(e) => Err(e),
    }
}

/// Drops `<!-- -->` comments. A comment that is never closed runs to the end.
pub fn remove_comments(md_post: &str) -> String {
    let mut res: String = String::new();
    let mut slice = Some(md_post);

    let start_comment = "<!--";
    let end_comment = "-->";

    while let Some(block) = slice {
        let md_buf: &str = match block.find(start_comment) {
            Some(start) => {
                let next: &str = &block[(start + start_comment.len())..];
                slice = next.find(end_comment).map(|end| &next[(end + end_comment.len())..]);
                &block[0..start]
            }
            None => {
                slice = None;
                block
            }
        };
        res.push_str(md_buf);
    }

    res
}
