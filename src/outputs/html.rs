//! HTML rendering of a [`FetchResult`].
//!
//! The page is a single self-contained document: a filter form, an optional
//! error banner, and one card per article. Articles are opaque upstream
//! objects, so the renderer only picks out the newsdata.io fields it knows
//! how to show (`title`, `link`, `description`, `image_url`, `source_id`,
//! `pubDate`) when they are strings, and ignores everything else.
//!
//! All upstream and user-supplied text is escaped; links and images are only
//! emitted for `http(s)` URLs.

use crate::models::{ALL, Article, FetchResult};
use crate::utils::{is_web_url, upcase};
use chrono::{DateTime, Local};
use html_escape::{encode_double_quoted_attribute as encode_attr, encode_text};
use std::fmt;

/// Country codes offered in the filter form. Display only; any other code
/// the caller supplies is still forwarded upstream.
pub const COUNTRIES: &[(&str, &str)] = &[
    ("all", "All countries"),
    ("us", "United States"),
    ("gb", "United Kingdom"),
    ("ca", "Canada"),
    ("au", "Australia"),
    ("in", "India"),
    ("ie", "Ireland"),
    ("nz", "New Zealand"),
    ("za", "South Africa"),
    ("ng", "Nigeria"),
    ("de", "Germany"),
    ("fr", "France"),
    ("jp", "Japan"),
    ("br", "Brazil"),
];

/// newsdata.io categories offered in the filter form.
pub const CATEGORIES: &[&str] = &[
    "all",
    "top",
    "business",
    "entertainment",
    "environment",
    "food",
    "health",
    "politics",
    "science",
    "sports",
    "technology",
    "tourism",
    "world",
];

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;margin:0;background:#f4f4f5;color:#18181b}\
header{background:#18181b;color:#fafafa;padding:1rem 2rem}\
header h1{margin:0 0 .5rem 0;font-size:1.5rem}\
form{display:flex;gap:1rem;flex-wrap:wrap;align-items:end}\
main{padding:1.5rem 2rem;display:grid;gap:1rem;grid-template-columns:repeat(auto-fill,minmax(18rem,1fr))}\
.article{background:#fff;border-radius:.5rem;padding:1rem;box-shadow:0 1px 2px rgba(0,0,0,.1)}\
.article img{width:100%;border-radius:.25rem}\
.meta{color:#71717a;font-size:.85rem}\
.error{background:#fee2e2;color:#991b1b;padding:1rem 2rem}\
.empty{padding:1.5rem 2rem}\
footer{padding:1rem 2rem;color:#71717a;font-size:.85rem}";

/// A renderable news page. Use `to_string()` to produce the HTML document.
pub struct NewsPage<'a> {
    result: &'a FetchResult,
    generated_at: DateTime<Local>,
}

impl<'a> NewsPage<'a> {
    pub fn new(result: &'a FetchResult, generated_at: DateTime<Local>) -> Self {
        Self {
            result,
            generated_at,
        }
    }

    fn write_form(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let country_options = COUNTRIES
            .iter()
            .map(|(code, label)| (code.to_string(), label.to_string()));
        let category_options = CATEGORIES.iter().map(|code| {
            let label = if *code == ALL {
                "All categories".to_string()
            } else {
                upcase(code)
            };
            (code.to_string(), label)
        });

        writeln!(f, r#"<form method="get" action="/">"#)?;
        write_select(f, "Country", "country", country_options, &self.result.selected_country)?;
        write_select(f, "Category", "category", category_options, &self.result.selected_category)?;
        writeln!(f, r#"<button type="submit">Filter</button>"#)?;
        writeln!(f, "</form>")
    }

    fn write_articles(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(error) = &self.result.error {
            writeln!(
                f,
                r#"<div class="error" role="alert"><strong>Could not load news:</strong> {}</div>"#,
                encode_text(error)
            )?;
        } else if self.result.articles.is_empty() {
            writeln!(f, r#"<p class="empty">No articles found.</p>"#)?;
        }

        if self.result.articles.is_empty() {
            return Ok(());
        }
        writeln!(f, "<main>")?;
        for article in &self.result.articles {
            write_article(f, article)?;
        }
        writeln!(f, "</main>")
    }
}

impl fmt::Display for NewsPage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.result;
        writeln!(f, "<!DOCTYPE html>")?;
        writeln!(f, r#"<html lang="en">"#)?;
        writeln!(f, "<head>")?;
        writeln!(f, r#"<meta charset="utf-8">"#)?;
        writeln!(f, r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#)?;
        writeln!(f, "<title>News</title>")?;
        writeln!(f, "<style>{STYLE}</style>")?;
        writeln!(f, "</head>")?;
        writeln!(f, "<body>")?;

        writeln!(f, "<header>")?;
        writeln!(f, "<h1>Latest News</h1>")?;
        self.write_form(f)?;
        writeln!(f, "</header>")?;

        self.write_articles(f)?;

        let json_href = format!(
            "/api/news?country={}&category={}",
            urlencoding::encode(&result.selected_country),
            urlencoding::encode(&result.selected_category)
        );
        writeln!(
            f,
            r#"<footer>{} article(s) &middot; updated {} &middot; <a href="{}">JSON</a> &middot; data from <a href="https://newsdata.io">newsdata.io</a></footer>"#,
            result.articles.len(),
            self.generated_at.format("%Y-%m-%d %H:%M:%S"),
            encode_attr(&json_href)
        )?;

        writeln!(f, "</body>")?;
        writeln!(f, "</html>")
    }
}

/// Write a `<select>` whose current value is always present and selected.
fn write_select(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    name: &str,
    options: impl Iterator<Item = (String, String)>,
    selected: &str,
) -> fmt::Result {
    let mut options: Vec<(String, String)> = options.collect();
    if !options.iter().any(|(value, _)| value == selected) {
        let label = if selected.is_empty() {
            "Any".to_string()
        } else {
            selected.to_string()
        };
        options.push((selected.to_string(), label));
    }

    writeln!(f, r#"<label>{label} <select name="{name}">"#)?;
    for (value, text) in &options {
        let marker = if value == selected { " selected" } else { "" };
        writeln!(
            f,
            r#"<option value="{}"{}>{}</option>"#,
            encode_attr(value),
            marker,
            encode_text(text)
        )?;
    }
    writeln!(f, "</select></label>")
}

fn write_article(f: &mut fmt::Formatter<'_>, article: &Article) -> fmt::Result {
    let title = str_field(article, "title").unwrap_or("Untitled");
    let link = str_field(article, "link").filter(|l| is_web_url(l));

    writeln!(f, r#"<article class="article">"#)?;
    if let Some(image) = str_field(article, "image_url").filter(|u| is_web_url(u)) {
        writeln!(
            f,
            r#"<img src="{}" alt="" loading="lazy">"#,
            encode_attr(image)
        )?;
    }
    match link {
        Some(link) => writeln!(
            f,
            r#"<h2><a href="{}" target="_blank" rel="noopener noreferrer">{}</a></h2>"#,
            encode_attr(link),
            encode_text(title)
        )?,
        None => writeln!(f, "<h2>{}</h2>", encode_text(title))?,
    }

    let meta: Vec<_> = ["source_id", "pubDate"]
        .iter()
        .filter_map(|key| str_field(article, key))
        .map(|s| encode_text(s))
        .collect();
    if !meta.is_empty() {
        writeln!(f, r#"<p class="meta">{}</p>"#, meta.join(" &middot; "))?;
    }
    if let Some(description) = str_field(article, "description") {
        writeln!(f, "<p>{}</p>", encode_text(description))?;
    }
    writeln!(f, "</article>")
}

/// A non-blank string field of an article, if present.
fn str_field<'a>(article: &'a Article, key: &str) -> Option<&'a str> {
    article
        .get(key)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
