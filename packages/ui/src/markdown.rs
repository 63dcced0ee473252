//! Markdown preview for document bodies.

use dioxus::prelude::*;
use pulldown_cmark::{Event, Options, Parser};

fn parser_options() -> Options {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_TASKLISTS);
    opts
}

/// Render markdown to HTML. Raw HTML in the source is shown as text, never
/// injected into the page.
pub fn markdown_to_html(source: &str) -> String {
    let parser = Parser::new_ext(source, parser_options()).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut html_out = String::new();
    pulldown_cmark::html::push_html(&mut html_out, parser);
    html_out
}

/// Read-only rendering of a document body.
#[component]
pub fn RenderMarkdown(source: String) -> Element {
    let html = markdown_to_html(&source);
    rsx! {
        div {
            class: "body preview",
            dangerous_inner_html: "{html}",
        }
    }
}
