//! HTML -> Markdown. Specific-priority converter: walks the parsed DOM
//! tree and emits a reduced Markdown subset (headings, paragraphs, links,
//! emphasis, lists). Not a full CommonMark round-trip, just enough to
//! preserve textual content and structure.

use std::io::Read;

use scraper::{ElementRef, Html, Selector};
use voidlight_protocol::{McpError, McpResult};
use voidlight_stream::{ConverterResult, StreamInfo};

use crate::registry::Converter;

pub struct HtmlConverter;

impl Converter for HtmlConverter {
    fn name(&self) -> &'static str {
        "html"
    }

    fn accepts(&self, head: &[u8], info: &StreamInfo) -> bool {
        if info.mimetype.as_deref() == Some("text/html") {
            return true;
        }
        let sample = String::from_utf8_lossy(head).to_lowercase();
        sample.contains("<html") || sample.contains("<!doctype html")
    }

    fn convert(&self, stream: &mut dyn Read, _info: &StreamInfo) -> McpResult<ConverterResult> {
        let mut bytes = Vec::new();
        stream
            .read_to_end(&mut bytes)
            .map_err(|e| McpError::FileConversionError(e.to_string()))?;
        let raw = String::from_utf8_lossy(&bytes);
        let document = Html::parse_document(&raw);

        let title = title_selector()
            .map(|sel| document.select(&sel).next())
            .ok()
            .flatten()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty());

        let body_selector = Selector::parse("body").unwrap();
        let markdown = match document.select(&body_selector).next() {
            Some(body) => render_children(body),
            None => render_children(document.root_element()),
        };
        let markdown = collapse_blank_lines(markdown.trim());

        let mut result = ConverterResult::new(markdown);
        if let Some(title) = title {
            result = result.with_title(title);
        }
        Ok(result)
    }
}

fn title_selector() -> Result<Selector, ()> {
    Selector::parse("title").map_err(|_| ())
}

fn render_children(el: ElementRef) -> String {
    let mut out = String::new();
    for child in el.children() {
        if let Some(child_el) = ElementRef::wrap(child) {
            out.push_str(&render_element(child_el));
        } else if let Some(text) = child.value().as_text() {
            out.push_str(text);
        }
    }
    out
}

fn render_element(el: ElementRef) -> String {
    let tag = el.value().name();
    let inner_text = || el.text().collect::<String>().trim().to_string();

    match tag {
        "h1" => format!("# {}\n\n", inner_text()),
        "h2" => format!("## {}\n\n", inner_text()),
        "h3" => format!("### {}\n\n", inner_text()),
        "h4" | "h5" | "h6" => format!("#### {}\n\n", inner_text()),
        "p" => format!("{}\n\n", render_children(el).trim()),
        "br" => "\n".to_string(),
        "strong" | "b" => format!("**{}**", inner_text()),
        "em" | "i" => format!("*{}*", inner_text()),
        "a" => {
            let href = el.value().attr("href").unwrap_or("");
            format!("[{}]({})", inner_text(), href)
        }
        "ul" => render_list(el, "- "),
        "ol" => render_list(el, "1. "),
        "li" => render_children(el),
        "script" | "style" | "head" => String::new(),
        _ => render_children(el),
    }
}

fn render_list(el: ElementRef, marker: &str) -> String {
    let item_selector = Selector::parse("li").unwrap();
    let mut out = String::new();
    for item in el.select(&item_selector) {
        out.push_str(marker);
        out.push_str(item.text().collect::<String>().trim());
        out.push('\n');
    }
    out.push('\n');
    out
}

fn collapse_blank_lines(text: &str) -> String {
    let mut out = String::new();
    let mut blank_run = 0;
    for line in text.lines() {
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_heading_and_paragraph() {
        let converter = HtmlConverter;
        let html = "<html><head><title>Doc</title></head><body><h1>Title</h1><p>Hello world</p></body></html>";
        let mut cursor = std::io::Cursor::new(html.as_bytes().to_vec());
        let result = converter.convert(&mut cursor, &StreamInfo::default()).unwrap();
        assert!(result.markdown.contains("# Title"));
        assert!(result.markdown.contains("Hello world"));
        assert_eq!(result.title.as_deref(), Some("Doc"));
    }

    #[test]
    fn converts_links_and_lists() {
        let converter = HtmlConverter;
        let html =
            "<html><body><ul><li>one</li><li>two</li></ul><a href=\"https://example.com\">link</a></body></html>";
        let mut cursor = std::io::Cursor::new(html.as_bytes().to_vec());
        let result = converter.convert(&mut cursor, &StreamInfo::default()).unwrap();
        assert!(result.markdown.contains("- one"));
        assert!(result.markdown.contains("- two"));
        assert!(result.markdown.contains("[link](https://example.com)"));
    }

    #[test]
    fn accepts_by_sniffed_doctype_even_without_declared_mimetype() {
        let converter = HtmlConverter;
        let head = b"<!DOCTYPE html><html>";
        assert!(converter.accepts(head, &StreamInfo::default()));
    }
}
