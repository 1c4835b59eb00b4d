//! # Renderer
//!
//! Emits the final structural markup for a transformed document.
//!
//! ## Output Shape
//! ```text
//! <style>                      scoped font rule, optional "hide chords" rule
//! <div class="song">
//!   <h1 class="title">         only when the song has a title
//!   <div class="meta">         author, key, capo, transpose (inserted after </h1>)
//!   <h2 class="subtitle">
//!   <section class="verse">    one per Section, in source order
//!     <div class="line">
//!       <span class="pair"><span class="chord">G</span><span class="lyric">Amazing </span></span>
//! </div>
//! ```
//!
//! Chord visibility only changes the style block: chord nodes are always
//! emitted, so toggling it never changes the lyric markup.

use crate::ast::{Document, Item, Line, Section};
use crate::settings::{RenderSettings, SongMeta, TransposeState};
use quick_xml::escape::escape;

/// Structural marker the metadata block is inserted after.
pub const TITLE_END: &str = "</h1>\n";

const DEFAULT_FONT_FAMILY: &str = "sans-serif";

/// Render a document with its settings and header metadata.
///
/// `display_key` is the already-resolved key label (see [`crate::key::resolve_key`]);
/// `meta` supplies author and capo.
pub fn render(
    doc: &Document,
    settings: &RenderSettings,
    meta: &SongMeta,
    display_key: Option<&str>,
    delta: TransposeState,
) -> String {
    let mut out = String::new();
    out.push_str(&style_block(settings));
    out.push_str("<div class=\"song\">\n");

    let body = render_body(doc);
    match metadata_block(meta, display_key, delta) {
        Some(block) => out.push_str(&inject_metadata(&body, &block)),
        None => out.push_str(&body),
    }

    out.push_str("</div>\n");
    out
}

/// Scoped style rules for font and chord visibility.
pub fn style_block(settings: &RenderSettings) -> String {
    let mut css = String::from("<style>\n");
    css.push_str(&format!(
        ".song {{ font-family: {}; font-size: {}em; }}\n",
        sanitize_font_family(&settings.font_family),
        sanitize_scale(settings.font_scale_em)
    ));
    if !settings.chords_visible {
        css.push_str(".song .chord { display: none; }\n");
    }
    css.push_str("</style>\n");
    css
}

fn sanitize_font_family(family: &str) -> String {
    let cleaned: String = family
        .chars()
        .filter(|c| !matches!(c, ';' | '{' | '}' | '<' | '>' | '"'))
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        DEFAULT_FONT_FAMILY.to_string()
    } else {
        cleaned.to_string()
    }
}

fn sanitize_scale(scale: f32) -> f32 {
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    }
}

/// Metadata block, or `None` when there is nothing to show.
pub fn metadata_block(
    meta: &SongMeta,
    display_key: Option<&str>,
    delta: TransposeState,
) -> Option<String> {
    let mut entries = Vec::new();
    if let Some(author) = meta.author.as_deref().filter(|a| !a.trim().is_empty()) {
        entries.push(format!("<span class=\"author\">{}</span>", escape(author.trim())));
    }
    if let Some(key) = display_key {
        entries.push(format!("<span class=\"key\">Key: {}</span>", escape(key)));
    }
    if let Some(capo) = meta.capo.filter(|c| *c > 0) {
        entries.push(format!("<span class=\"capo\">Capo {}</span>", capo));
    }
    if let Some(label) = delta.label() {
        entries.push(format!("<span class=\"transpose\">Transpose: {}</span>", label));
    }

    if entries.is_empty() {
        return None;
    }
    Some(format!("<div class=\"meta\">{}</div>\n", entries.join("")))
}

/// Insert `block` right after the title element, or prepend it when the body
/// has no title.
pub fn inject_metadata(body: &str, block: &str) -> String {
    match body.find(TITLE_END) {
        Some(pos) => {
            let split = pos + TITLE_END.len();
            let mut out = String::with_capacity(body.len() + block.len());
            out.push_str(&body[..split]);
            out.push_str(block);
            out.push_str(&body[split..]);
            out
        }
        None => format!("{}{}", block, body),
    }
}

fn render_body(doc: &Document) -> String {
    let mut body = String::new();
    if let Some(title) = &doc.header.title {
        body.push_str(&format!("<h1 class=\"title\">{}</h1>\n", escape(title.as_str())));
    }
    if let Some(subtitle) = &doc.header.subtitle {
        body.push_str(&format!(
            "<h2 class=\"subtitle\">{}</h2>\n",
            escape(subtitle.as_str())
        ));
    }
    for section in &doc.sections {
        body.push_str(&section_to_markup(section));
    }
    body
}

fn section_to_markup(section: &Section) -> String {
    let mut markup = match &section.label {
        Some(label) => format!(
            "<section class=\"{}\" data-label=\"{}\">\n",
            section.kind.as_str(),
            escape(label.as_str())
        ),
        None => format!("<section class=\"{}\">\n", section.kind.as_str()),
    };
    for line in &section.lines {
        markup.push_str(&line_to_markup(line));
    }
    markup.push_str("</section>\n");
    markup
}

fn line_to_markup(line: &Line) -> String {
    let mut markup = String::from("<div class=\"line\">");
    for item in &line.items {
        match item {
            Item::ChordLyricPair { chord, lyric } => {
                markup.push_str("<span class=\"pair\">");
                if let Some(chord) = chord {
                    markup.push_str(&format!(
                        "<span class=\"chord\">{}</span>",
                        escape(chord.to_string().as_str())
                    ));
                }
                markup.push_str(&format!("<span class=\"lyric\">{}</span>", escape(lyric.as_str())));
                markup.push_str("</span>");
            }
            Item::CommentText { text, italic } => {
                let class = if *italic { "comment italic" } else { "comment" };
                markup.push_str(&format!(
                    "<span class=\"{}\">{}</span>",
                    class,
                    escape(text.as_str())
                ));
            }
        }
    }
    markup.push_str("</div>\n");
    markup
}
