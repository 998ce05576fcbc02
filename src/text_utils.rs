use std::borrow::Cow;
use std::ops::Index;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use lazy_static::lazy_static;
use regex::{Captures, Regex};

fn to_int<T: std::str::FromStr>(num_str: &str, date_str: &str) -> Result<T, String> {
    match num_str.parse::<T>() {
        Ok(x) => Ok(x),
        Err(_) => Err(format!("Error parsing {} from the date {}", num_str, date_str)),
    }
}

/// Parses the loose `YYYY-M-D H:M:S[.fff]` form, also accepting `T` as separator
pub fn parse_date_time(buf: &str) -> Result<NaiveDateTime, String> {
    lazy_static! {
        static ref DATE_TIME_REGEX: Regex = Regex::new(
            r"^(\d{4})-(\d{1,2})-(\d{1,2})[ T](\d{1,2}):(\d{1,2})(?::(\d{1,2}))?(\.\d{1,9})?$"
        ).unwrap();
    }

    let Some(caps) = DATE_TIME_REGEX.captures(buf) else {
        return Err(format!("Unable to parse date time {}", buf));
    };

    let to_i32 = |num_str: &str| to_int::<i32>(num_str, buf);
    let to_u32 = |num_str: &str| to_int::<u32>(num_str, buf);

    // We are using the regex approach to make it more flexible
    let y: i32 = to_i32(caps.index(1))?;
    let m: u32 = to_u32(caps.index(2))?;
    let d: u32 = to_u32(caps.index(3))?;
    let h: u32 = to_u32(caps.index(4))?;
    let mn: u32 = to_u32(caps.index(5))?;
    let s: u32 = match caps.get(6) {
        Some(sec) => to_u32(sec.as_str())?,
        None => 0,
    };
    let ms: u32 = match caps.get(7) {
        // Keeps milliseconds only, the rest of the fraction is dropped
        Some(frac) => {
            let digits: String = frac.as_str()[1..].chars().chain("000".chars()).take(3).collect();
            to_u32(&digits)?
        }
        None => 0,
    };

    let Some(date) = NaiveDate::from_ymd_opt(y, m, d) else {
        return Err(format!("Invalid calendar date {}", buf));
    };
    let Some(time) = NaiveTime::from_hms_milli_opt(h, mn, s, ms) else {
        return Err(format!("Invalid time of day {}", buf));
    };

    Ok(NaiveDateTime::new(date, time))
}

const OFFSET_DATE_TIME_FORMATS: [&str; 2] = [
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

const TEXT_DATE_FORMATS: [&str; 5] = [
    "%B %d %Y",
    "%B %d, %Y",
    "%a %B %d %Y",
    "%d %B %Y",
    "%Y/%m/%d",
];

/// Coerces a date-like string to a UTC date time.
/// Accepts `YYYY-MM-DD`, RFC 3339, RFC 2822, date times with a numeric offset,
/// month name forms (`Jul 08 2022`, `July 8, 2022`) and the naive forms of [parse_date_time]
pub fn coerce_date_str(buf: &str) -> Result<NaiveDateTime, String> {
    let buf = buf.trim();
    if buf.is_empty() {
        return Err("Empty date".to_string());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(buf) {
        return Ok(dt.naive_utc());
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(buf) {
        return Ok(dt.naive_utc());
    }

    for fmt in OFFSET_DATE_TIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(buf, fmt) {
            return Ok(dt.naive_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(buf, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::default()));
    }

    for fmt in TEXT_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(buf, fmt) {
            return Ok(date.and_time(NaiveTime::default()));
        }
    }

    parse_date_time(buf)
}

/// Milliseconds since the Unix epoch, truncated toward zero
pub fn date_from_millis(millis: f64) -> Result<NaiveDateTime, String> {
    if !millis.is_finite() {
        return Err(format!("Timestamp {} is not a finite number", millis));
    }

    match DateTime::from_timestamp_millis(millis.trunc() as i64) {
        Some(dt) => Ok(dt.naive_utc()),
        None => Err(format!("Timestamp {} is out of range", millis)),
    }
}

pub fn format_date_time(date_time: &NaiveDateTime) -> (String, String) {
    let date = date_time.format("%Y-%m-%d").to_string();
    let time = date_time.format("%H:%M:%S").to_string();
    (date, time)
}

lazy_static! {
    static ref COMMENT_REGEX: Regex = Regex::new(r"(?s)<!--.*?(?:-->|\z)").unwrap();
    static ref SCRIPT_REGEX: Regex = Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)\s*>").unwrap();
    static ref TAG_REGEX: Regex = Regex::new(r"<(/?)(?P<name>[a-zA-Z][a-zA-Z0-9-]*)?[^>]*>").unwrap();
}

/// Elements that break words apart when rendered
const BLOCK_ELEMENTS: [&str; 45] = [
    "address", "article", "aside", "blockquote", "body", "br", "caption", "dd", "details", "dialog",
    "div", "dl", "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2",
    "h3", "h4", "h5", "h6", "head", "header", "hr", "html", "li", "main",
    "nav", "ol", "p", "pre", "section", "summary", "table", "tbody", "td", "tfoot",
    "th", "thead", "title", "tr", "ul",
];

/// Drops HTML comments. A comment that is never closed runs to the end.
pub fn remove_html_comments(html: &str) -> Cow<'_, str> {
    COMMENT_REGEX.replace_all(html, "")
}

/// Plain text of an HTML fragment, close to what a browser shows.
/// Inline tags are removed, block tags and line breaks become whitespace.
pub fn html_to_text(html: &str) -> String {
    let text = remove_html_comments(html);
    let text = SCRIPT_REGEX.replace_all(&text, "");
    let text = TAG_REGEX.replace_all(&text, |cap: &Captures| {
        let is_block = cap.name("name")
            .map(|name| BLOCK_ELEMENTS.contains(&name.as_str().to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        if is_block { " " } else { "" }
    });
    decode_entities(&text)
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}
