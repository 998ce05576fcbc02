use lazy_static::lazy_static;
use markdown::Options;
use regex::Regex;
use thiserror::Error;

use crate::content::parsing_utils::remove_comments;
use crate::text_utils::{html_to_text, remove_html_comments};

pub const WORDS_PER_MINUTE: u32 = 225;
pub const ARTICLE_ELEMENT_ID: &str = "article";

#[derive(Debug, Error)]
pub enum ReadingTimeError {
    #[error("no element with id {0} in the document")]
    MissingElement(String),
    #[error("markdown rendering failed: {0}")]
    Render(String),
}

/// Reading speed used to turn a word count into minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingTime {
    pub words_per_minute: u32,
}

impl Default for ReadingTime {
    fn default() -> Self {
        ReadingTime { words_per_minute: WORDS_PER_MINUTE }
    }
}

impl ReadingTime {
    /// Minutes, rounded up. Text without words gives 0.
    pub fn estimate(&self, text: &str) -> u32 {
        let words = count_words(text) as u64;
        let wpm = self.words_per_minute.max(1) as u64;
        words.div_ceil(wpm) as u32
    }

    pub fn of_element(&self, document_html: &str, element_id: &str) -> Result<u32, ReadingTimeError> {
        let inner = element_inner_html(document_html, element_id)
            .ok_or_else(|| ReadingTimeError::MissingElement(element_id.to_string()))?;
        Ok(self.estimate(&html_to_text(&inner)))
    }

    pub fn of_markdown(&self, md_text: &str) -> Result<u32, ReadingTimeError> {
        let md_text = remove_comments(md_text);
        // Raw HTML is passed through so its tags are stripped, not counted
        let mut options = Options::gfm();
        options.compile.allow_dangerous_html = true;
        let html = markdown::to_html_with_options(&md_text, &options)
            .map_err(|e| ReadingTimeError::Render(e.reason))?;
        Ok(self.estimate(&html_to_text(&html)))
    }
}

pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn estimate_reading_time(text: &str) -> u32 {
    ReadingTime::default().estimate(text)
}

/// Reading time of the `article` element of a rendered page
pub fn get_reading_time(document_html: &str) -> Result<u32, ReadingTimeError> {
    ReadingTime::default().of_element(document_html, ARTICLE_ELEMENT_ID)
}

pub fn markdown_reading_time(md_text: &str) -> Result<u32, ReadingTimeError> {
    ReadingTime::default().of_markdown(md_text)
}

const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source", "track", "wbr",
];

lazy_static! {
    static ref OPEN_TAG_REGEX: Regex = Regex::new(
        r#"<(?P<tag>[a-zA-Z][a-zA-Z0-9-]*)(?P<attrs>\s[^>]*)?>"#
    ).unwrap();
    static ref ID_ATTR_REGEX: Regex = Regex::new(
        r#"(?:^|\s)id\s*=\s*(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)'|(?P<bare>[^\s"'>/]+))"#
    ).unwrap();
    static ref ANY_TAG_REGEX: Regex = Regex::new(
        r#"<(?P<close>/?)(?P<tag>[a-zA-Z][a-zA-Z0-9-]*)(?:\s[^>]*)?/?>"#
    ).unwrap();
}

/// Inner HTML of the first element carrying the given id, comments left out.
/// An element that is never closed extends to the end of the document.
fn element_inner_html(html: &str, element_id: &str) -> Option<String> {
    let html = remove_html_comments(html);

    let open = OPEN_TAG_REGEX.captures_iter(&html).find(|cap| {
        let Some(attrs) = cap.name("attrs") else {
            return false;
        };
        ID_ATTR_REGEX.captures_iter(attrs.as_str()).any(|id| {
            let value = id.name("dq").or(id.name("sq")).or(id.name("bare"));
            value.map(|v| v.as_str()) == Some(element_id)
        })
    })?;

    let whole = open.get(0)?;
    let tag = open.name("tag")?.as_str().to_ascii_lowercase();
    let self_closing = whole.as_str().ends_with("/>");
    if self_closing || VOID_ELEMENTS.contains(&tag.as_str()) {
        return Some(String::new());
    }

    let rest = &html[whole.end()..];
    let mut depth = 1;
    for cap in ANY_TAG_REGEX.captures_iter(rest) {
        let (Some(m), Some(name)) = (cap.get(0), cap.name("tag")) else { continue };
        if !name.as_str().eq_ignore_ascii_case(&tag) {
            continue;
        }
        let closing = cap.name("close").is_some_and(|c| !c.as_str().is_empty());
        if closing {
            depth -= 1;
            if depth == 0 {
                return Some(rest[..m.start()].to_string());
            }
        } else if !m.as_str().ends_with("/>") {
            depth += 1;
        }
    }

    Some(rest.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(count: usize) -> String {
        vec!["word"; count].join(" ")
    }

    #[test]
    fn test_estimate() {
        assert_eq!(estimate_reading_time(&words(450)), 2);
        assert_eq!(estimate_reading_time(&words(451)), 3);
        assert_eq!(estimate_reading_time(&words(225)), 1);
        assert_eq!(estimate_reading_time("word"), 1);
        assert_eq!(estimate_reading_time("  \n\t "), 0);
        assert_eq!(estimate_reading_time(""), 0);
    }

    #[test]
    fn test_whitespace_runs() {
        assert_eq!(count_words("  one\n\ntwo\t\tthree   four  "), 4);
        assert_eq!(count_words("non\u{a0}breaking"), 2);
    }

    #[test]
    fn test_custom_speed() {
        let reading = ReadingTime { words_per_minute: 100 };
        assert_eq!(reading.estimate(&words(450)), 5);
    }

    #[test]
    fn test_article_element() {
        let page = format!(
            r#"<html><body><nav>Home About Contact</nav><article id="article" class="post"><div><p>{}</p></div><div>{}</div></article><footer>ignored words</footer></body></html>"#,
            words(300),
            words(150),
        );
        assert_eq!(get_reading_time(&page).unwrap(), 2);
    }

    #[test]
    fn test_article_element_nested_same_tag() {
        let page = r#"<div id='article'><div>one two</div> three <div>four</div></div><div>five six</div>"#;
        let inner = element_inner_html(page, ARTICLE_ELEMENT_ID).unwrap();
        assert_eq!(count_words(&html_to_text(&inner)), 4);
    }

    #[test]
    fn test_similar_ids_do_not_match() {
        let page = r#"<div data-id="article">one</div><div id="articles">two</div>"#;
        assert!(matches!(get_reading_time(page), Err(ReadingTimeError::MissingElement(ref id)) if id == "article"));
    }

    #[test]
    fn test_missing_element() {
        let res = get_reading_time("<html><body><p>No article here</p></body></html>");
        assert!(matches!(res, Err(ReadingTimeError::MissingElement(_))));
    }

    #[test]
    fn test_empty_article() {
        assert_eq!(get_reading_time(r#"<main id=article></main>"#).unwrap(), 0);
        assert_eq!(get_reading_time(r#"<div id="article"/>"#).unwrap(), 0);
    }

    #[test]
    fn test_inline_tags_do_not_split_words() {
        let page = r#"<div id="article">see <code>foo</code>, and <em>bar</em>.</div>"#;
        let inner = element_inner_html(page, ARTICLE_ELEMENT_ID).unwrap();
        assert_eq!(count_words(&html_to_text(&inner)), 4);

        let page = format!(r#"<div id="article">{}</div>"#, "<b>w</b>. ".repeat(200));
        assert_eq!(get_reading_time(&page).unwrap(), 1);

        assert_eq!(markdown_reading_time(&"**w**. ".repeat(200)).unwrap(), 1);
    }

    #[test]
    fn test_commented_out_element_is_skipped() {
        let page = format!(
            r#"<!-- <div id="article">old</div> --><main><div id="article">{}</div></main>"#,
            words(300),
        );
        assert_eq!(element_inner_html(&page, ARTICLE_ELEMENT_ID).unwrap(), words(300));
        assert_eq!(get_reading_time(&page).unwrap(), 2);

        let page = r#"<!-- <div id="article">old</div> -->"#;
        assert!(matches!(get_reading_time(page), Err(ReadingTimeError::MissingElement(_))));
    }

    #[test]
    fn test_markdown_unclosed_comment() {
        assert_eq!(markdown_reading_time("hello <!-- world").unwrap(), 1);
        assert_eq!(markdown_reading_time("<!-- draft notes never closed").unwrap(), 0);
    }

    #[test]
    fn test_markdown_raw_html_tags_not_counted() {
        let md = "one <span>two</span> three\n\n<div class=\"note\">four</div>\n";
        assert_eq!(ReadingTime { words_per_minute: 1 }.of_markdown(md).unwrap(), 4);
    }

    #[test]
    fn test_markdown() {
        let md = format!("# Title\n\n{}\n\n<!-- more -->\n\n- {}\n", words(224), "last");
        // title + 224 words + comment removed + 1 list item
        assert_eq!(markdown_reading_time(&md).unwrap(), 2);
        assert_eq!(markdown_reading_time("").unwrap(), 0);
    }
}
