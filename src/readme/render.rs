// src/readme/render.rs
// =============================================================================
// Rendering README markdown, either to HTML or to plain terminal text.
//
// Parsing is done by `pulldown-cmark`, which turns markdown into a stream
// of events (start of heading, text, end of heading, ...). Both renderers
// walk that stream:
//
// - render_html rewrites a few events, then lets pulldown-cmark's own HTML
//   writer produce the document:
//     * relative image paths point at raw.githubusercontent.com
//     * images are classified as badges or content images
//     * links leaving the repository open in a new tab
//     * headings get slug ids so #anchors work
//     * soft line breaks become <br />, as on GitHub
//     * <img> tags inside raw HTML blocks get the same path rewriting
//       (parsed with `scraper`)
//
// - render_terminal produces readable text for the "preview" mode of the
//   repo command, styled with the active theme's palette.
// =============================================================================

use pulldown_cmark::escape::{escape_href, escape_html};
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag};
use scraper::{Html, Selector};
use url::Url;

use crate::theme::Palette;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Badge,
    Content,
}

impl ImageKind {
    // Shields, CI badges and "stats" cards are shown inline and small;
    // everything else is a content image.
    pub fn classify(src: &str, alt: &str) -> Self {
        let alt = alt.to_lowercase();
        let badge_src = ["shields.io", "badge", "github-readme-stats"]
            .iter()
            .any(|needle| src.contains(needle));

        if badge_src || alt.contains("badge") || alt.contains("stat") {
            ImageKind::Badge
        } else {
            ImageKind::Content
        }
    }

    fn css_class(&self) -> &'static str {
        match self {
            ImageKind::Badge => "readme-badge",
            ImageKind::Content => "readme-image",
        }
    }
}

// Where the README lives, needed to resolve relative paths
#[derive(Debug, Clone)]
pub struct RenderOptions {
    repository_url: String,
    raw_base: Option<Url>,
}

impl RenderOptions {
    // `repository_url` is the repository's html_url,
    // e.g. https://github.com/rust-lang/rust
    pub fn for_repository(repository_url: &str) -> Self {
        let repository_url = repository_url.trim_end_matches('/').to_string();
        let raw_base = repository_url
            .strip_prefix("https://github.com/")
            .and_then(|path| {
                Url::parse(&format!("https://raw.githubusercontent.com/{}/HEAD/", path)).ok()
            });

        Self {
            repository_url,
            raw_base,
        }
    }

    // Absolute URLs (and data: URIs) are left alone
    pub fn resolve_image(&self, src: &str) -> String {
        if is_absolute(src) {
            return src.to_string();
        }

        match &self.raw_base {
            Some(base) => base
                .join(src.trim_start_matches('/'))
                .map(|url| url.to_string())
                .unwrap_or_else(|_| src.to_string()),
            None => src.to_string(),
        }
    }

    pub fn is_external_link(&self, href: &str) -> bool {
        href.starts_with("http") && !href.contains(&self.repository_url)
    }
}

fn is_absolute(src: &str) -> bool {
    src.starts_with("http://") || src.starts_with("https://") || src.starts_with("data:") || src.starts_with("//")
}

fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
}

// Heading anchor ids: lowercase, each run of non-word characters becomes '-'.
// "Getting Started!" -> "getting-started-"
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut in_gap = false;

    for ch in text.to_lowercase().chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            slug.push(ch);
            in_gap = false;
        } else if !in_gap {
            slug.push('-');
            in_gap = true;
        }
    }

    slug
}

// Attribute text and URLs are escaped the same way pulldown-cmark's own
// HTML writer does. Writing into a String cannot fail.
fn escaped_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let _ = escape_html(&mut out, value);
    out
}

fn escaped_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    let _ = escape_href(&mut out, url);
    out
}

// Concatenated text of the events up to (not including) the first one for
// which `is_end` is true. Returns the text and the index of that end event.
fn inner_text(events: &[Event], is_end: impl Fn(&Event) -> bool) -> (String, usize) {
    let mut text = String::new();
    for (offset, event) in events.iter().enumerate() {
        if is_end(event) {
            return (text, offset);
        }
        if let Event::Text(t) | Event::Code(t) = event {
            text.push_str(t);
        }
    }
    (text, events.len())
}

// A paragraph holding nothing but images (a row of badges, typically)
fn is_image_only(events: &[Event]) -> bool {
    let mut saw_image = false;
    let mut image_depth = 0;

    for event in events {
        match event {
            Event::End(Tag::Paragraph) => break,
            Event::Start(Tag::Image(..)) => {
                saw_image = true;
                image_depth += 1;
            }
            Event::End(Tag::Image(..)) => image_depth -= 1,
            Event::Start(Tag::Link(..)) | Event::End(Tag::Link(..)) => {}
            Event::SoftBreak | Event::HardBreak => {}
            Event::Text(t) if image_depth > 0 || t.trim().is_empty() => {}
            _ if image_depth > 0 => {}
            _ => return false,
        }
    }

    saw_image
}

pub fn render_html(markdown: &str, options: &RenderOptions) -> String {
    let events: Vec<Event> = Parser::new_ext(markdown, markdown_options()).collect();
    let mut rewritten: Vec<Event> = Vec::with_capacity(events.len());

    let mut i = 0;
    while i < events.len() {
        match &events[i] {
            Event::Start(Tag::Heading(level, _, _)) => {
                let (text, _) = inner_text(&events[i + 1..], |e| matches!(e, Event::End(Tag::Heading(..))));
                let open = format!("<h{} id=\"{}\">", *level as usize, escaped_text(&slugify(&text)));
                rewritten.push(Event::Html(CowStr::from(open)));
            }
            Event::End(Tag::Heading(level, _, _)) => {
                rewritten.push(Event::Html(CowStr::from(format!("</h{}>\n", *level as usize))));
            }
            Event::Start(Tag::Paragraph) if is_image_only(&events[i + 1..]) => {
                rewritten.push(Event::Html(CowStr::Borrowed("<p class=\"readme-image-row\">")));
            }
            Event::Start(Tag::Image(_, dest, title)) => {
                let (alt, end) = inner_text(&events[i + 1..], |e| matches!(e, Event::End(Tag::Image(..))));
                let kind = ImageKind::classify(dest, &alt);

                let mut tag = format!(
                    "<img src=\"{}\" alt=\"{}\" class=\"{}\" loading=\"lazy\"",
                    escaped_url(&options.resolve_image(dest)),
                    escaped_text(&alt),
                    kind.css_class()
                );
                if !title.is_empty() {
                    tag.push_str(&format!(" title=\"{}\"", escaped_text(title)));
                }
                tag.push_str(" />");
                rewritten.push(Event::Html(CowStr::from(tag)));

                // Skip the alt text events and the closing image event
                i += end + 2;
                continue;
            }
            Event::Start(Tag::Link(_, dest, title)) => {
                let mut tag = format!("<a href=\"{}\"", escaped_url(dest));
                if !title.is_empty() {
                    tag.push_str(&format!(" title=\"{}\"", escaped_text(title)));
                }
                if options.is_external_link(dest) {
                    tag.push_str(" target=\"_blank\" rel=\"noopener noreferrer\"");
                }
                tag.push('>');
                rewritten.push(Event::Html(CowStr::from(tag)));
            }
            Event::End(Tag::Link(..)) => {
                rewritten.push(Event::Html(CowStr::Borrowed("</a>")));
            }
            Event::SoftBreak => rewritten.push(Event::HardBreak),
            Event::Html(_) => {
                // An HTML block arrives one line per event, so a tag can be
                // split across several of them. Rewrite the joined block.
                let mut block = String::new();
                loop {
                    match events.get(i) {
                        Some(Event::Html(raw)) => block.push_str(raw),
                        Some(Event::SoftBreak) if matches!(events.get(i + 1), Some(Event::Html(_))) => {
                            block.push('\n')
                        }
                        _ => break,
                    }
                    i += 1;
                }
                rewritten.push(Event::Html(CowStr::from(rewrite_embedded_images(&block, options))));
                continue;
            }
            other => rewritten.push(other.clone()),
        }
        i += 1;
    }

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, rewritten.into_iter());
    out
}

// Rewrites relative <img src> values inside a raw HTML fragment, leaving the
// rest of the markup byte-for-byte intact.
//
// scraper decides whether there is anything to rewrite. The rewrite itself
// works on the raw text, because scraper hands back decoded attribute
// values (`&amp;` becomes `&`) that no longer match the source.
fn rewrite_embedded_images(raw: &str, options: &RenderOptions) -> String {
    let Ok(selector) = Selector::parse("img[src]") else {
        return raw.to_string();
    };
    if Html::parse_fragment(raw).select(&selector).next().is_none() {
        return raw.to_string();
    }

    // ASCII lowercasing keeps every byte offset valid for `raw`
    let lower = raw.to_ascii_lowercase();
    let mut output = String::with_capacity(raw.len() + 64);
    let mut cursor = 0;

    while let Some(found) = lower[cursor..].find("<img") {
        let tag_start = cursor + found;
        let tag_end = lower[tag_start..].find('>').map_or(raw.len(), |n| tag_start + n);

        output.push_str(&raw[cursor..tag_start]);
        output.push_str(&rewrite_img_tag(&raw[tag_start..tag_end], options));
        cursor = tag_end;
    }

    output.push_str(&raw[cursor..]);
    output
}

// One `<img ...` tag without its closing '>'
fn rewrite_img_tag(tag: &str, options: &RenderOptions) -> String {
    let Some((start, end)) = src_value_span(tag) else {
        return tag.to_string();
    };

    let value = &tag[start..end];
    if value.is_empty() || is_absolute(value) {
        return tag.to_string();
    }

    format!("{}{}{}", &tag[..start], options.resolve_image(value), &tag[end..])
}

// Byte range of the value of the `src` attribute. The name must follow
// whitespace, so `data-src` and friends never match.
fn src_value_span(tag: &str) -> Option<(usize, usize)> {
    let lower = tag.to_ascii_lowercase();
    let bytes = lower.as_bytes();
    let skip_spaces = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        i
    };

    let mut from = 0;
    while let Some(found) = lower[from..].find("src") {
        let at = from + found;
        from = at + 3;

        if at == 0 || !bytes[at - 1].is_ascii_whitespace() {
            continue;
        }

        let eq = skip_spaces(at + 3);
        if bytes.get(eq) != Some(&b'=') {
            continue;
        }

        let value = skip_spaces(eq + 1);
        return match bytes.get(value) {
            Some(&quote) if quote == b'"' || quote == b'\'' => {
                let start = value + 1;
                let end = lower[start..].find(quote as char).map_or(bytes.len(), |n| start + n);
                Some((start, end))
            }
            Some(_) => {
                let end = lower[value..]
                    .find(|c: char| c.is_ascii_whitespace())
                    .map_or(bytes.len(), |n| value + n);
                Some((value, end))
            }
            None => None,
        };
    }

    None
}

// Visible text of a raw HTML fragment, for the terminal renderer
fn html_text(raw: &str) -> String {
    let fragment = Html::parse_fragment(raw);
    fragment.root_element().text().collect::<String>()
}

pub fn render_terminal(markdown: &str, palette: &Palette) -> String {
    let mut out = String::new();

    // Text is buffered while inside a heading so it can be styled as a whole
    let mut heading: Option<String> = None;
    let mut link_targets: Vec<String> = Vec::new();
    let mut lists: Vec<Option<u64>> = Vec::new();
    let mut in_code_block = false;
    let mut quote_depth = 0usize;

    for event in Parser::new_ext(markdown, markdown_options()) {
        match event {
            Event::Start(Tag::Heading(level, ..)) => {
                ensure_blank_line(&mut out);
                heading = Some("#".repeat(level as usize) + " ");
            }
            Event::End(Tag::Heading(..)) => {
                if let Some(text) = heading.take() {
                    out.push_str(&palette.heading(&text).to_string());
                    out.push_str("\n\n");
                }
            }
            Event::Start(Tag::Paragraph) => {
                if quote_depth > 0 {
                    out.push_str(&palette.muted(&"│ ".repeat(quote_depth)).to_string());
                }
            }
            Event::End(Tag::Paragraph) => {
                out.push_str(if lists.is_empty() { "\n\n" } else { "\n" });
            }
            Event::Start(Tag::BlockQuote) => quote_depth += 1,
            Event::End(Tag::BlockQuote) => quote_depth = quote_depth.saturating_sub(1),
            Event::Start(Tag::CodeBlock(kind)) => {
                in_code_block = true;
                if let CodeBlockKind::Fenced(lang) = kind {
                    if !lang.is_empty() {
                        out.push_str(&palette.muted(&format!("    [{}]", lang)).to_string());
                        out.push('\n');
                    }
                }
            }
            Event::End(Tag::CodeBlock(_)) => {
                in_code_block = false;
                out.push('\n');
            }
            Event::Start(Tag::List(start)) => {
                if lists.is_empty() {
                    ensure_line_start(&mut out);
                }
                lists.push(start);
            }
            Event::End(Tag::List(_)) => {
                lists.pop();
                if lists.is_empty() {
                    out.push('\n');
                }
            }
            Event::Start(Tag::Item) => {
                ensure_line_start(&mut out);
                let indent = "  ".repeat(lists.len().saturating_sub(1));
                let bullet = match lists.last_mut() {
                    Some(Some(n)) => {
                        let bullet = format!("{}. ", n);
                        *n += 1;
                        bullet
                    }
                    _ => "• ".to_string(),
                };
                out.push_str(&indent);
                out.push_str(&bullet);
            }
            Event::End(Tag::Item) => ensure_line_start(&mut out),
            Event::Start(Tag::Link(_, dest, _)) => link_targets.push(dest.to_string()),
            Event::End(Tag::Link(..)) => {
                if let Some(dest) = link_targets.pop() {
                    if !dest.starts_with('#') {
                        let suffix = format!(" <{}>", dest);
                        push_text(&mut out, &mut heading, &palette.link(&suffix).to_string());
                    }
                }
            }
            Event::Start(Tag::Image(..)) => push_text(&mut out, &mut heading, "[image: "),
            Event::End(Tag::Image(..)) => push_text(&mut out, &mut heading, "]"),
            Event::End(Tag::TableCell) => out.push_str(" | "),
            Event::End(Tag::TableHead) | Event::End(Tag::TableRow) => out.push('\n'),
            Event::Text(text) => {
                if in_code_block {
                    for line in text.lines() {
                        out.push_str("    ");
                        out.push_str(&palette.code(line).to_string());
                        out.push('\n');
                    }
                } else {
                    push_text(&mut out, &mut heading, &text);
                }
            }
            Event::Code(code) => {
                let styled = palette.code(&format!("`{}`", code)).to_string();
                push_text(&mut out, &mut heading, &styled);
            }
            Event::Html(raw) => {
                let text = html_text(&raw);
                if !text.trim().is_empty() {
                    push_text(&mut out, &mut heading, text.trim());
                    out.push('\n');
                }
            }
            Event::SoftBreak | Event::HardBreak => push_text(&mut out, &mut heading, "\n"),
            Event::Rule => {
                ensure_line_start(&mut out);
                out.push_str(&palette.muted(&"─".repeat(40)).to_string());
                out.push_str("\n\n");
            }
            Event::TaskListMarker(done) => out.push_str(if done { "[x] " } else { "[ ] " }),
            Event::FootnoteReference(label) => push_text(&mut out, &mut heading, &format!("[^{}]", label)),
            _ => {}
        }
    }

    out.trim_end().to_string() + "\n"
}

fn push_text(out: &mut String, heading: &mut Option<String>, text: &str) {
    match heading {
        Some(buffer) => buffer.push_str(text),
        None => out.push_str(text),
    }
}

fn ensure_line_start(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

fn ensure_blank_line(out: &mut String) {
    ensure_line_start(out);
    if !out.is_empty() && !out.ends_with("\n\n") {
        out.push('\n');
    }
}
