//! Markdown to HTML for the main content pane.

use pulldown_cmark::{html, CodeBlockKind, Event, Parser, Tag, TagEnd};

use apidocs_mdx::{markdown_options, Slugger};

use crate::highlight::{plain_markup, Highlighter};

/// Render a page body to HTML.
///
/// Headings get the same anchor ids as the parsed table of contents, and
/// fenced code goes through `highlighter`. A block the highlighter rejects
/// is rendered as plain escaped code.
pub fn render_markdown(content: &str, highlighter: &dyn Highlighter) -> String {
    let mut slugger = Slugger::new();
    let mut events: Vec<Event<'_>> = Vec::new();

    let mut code: Option<(String, String)> = None; // (info, source)
    let mut heading: Option<(usize, String)> = None; // (start event index, text)

    for event in Parser::new_ext(content, markdown_options()) {
        if let Some((_, source)) = code.as_mut() {
            if let Event::Text(text) = &event {
                source.push_str(text);
                continue;
            }
        }

        if let (Some((_, text)), Event::Text(t) | Event::Code(t)) = (heading.as_mut(), &event) {
            text.push_str(t);
        }

        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let info = match kind {
                    CodeBlockKind::Fenced(info) => info.to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                code = Some((info, String::new()));
            }

            Event::End(TagEnd::CodeBlock) => {
                if let Some((info, source)) = code.take() {
                    events.push(Event::Html(highlight_block(highlighter, &source, &info).into()));
                }
            }

            Event::Start(Tag::Heading { .. }) => {
                heading = Some((events.len(), String::new()));
                events.push(event);
            }

            Event::End(TagEnd::Heading(_)) => {
                if let Some((start, text)) = heading.take() {
                    let slug = slugger.slug(&text);
                    if let Event::Start(Tag::Heading { id, .. }) = &mut events[start] {
                        id.get_or_insert_with(|| slug.into());
                    }
                }
                events.push(event);
            }

            other => events.push(other),
        }
    }

    let mut html_output = String::new();
    html::push_html(&mut html_output, events.into_iter());

    html_output
}

fn highlight_block(highlighter: &dyn Highlighter, source: &str, info: &str) -> String {
    let language = info.split_whitespace().next().unwrap_or("");

    match highlighter.highlight(source, language) {
        Ok(markup) => markup.into_string(),
        Err(e) => {
            tracing::warn!("{}, rendering code block as plain text", e);
            plain_markup(source).into_string()
        }
    }
}
