//! Raw HTML handling: passthrough policy and re-parsing of block fragments

use lol_html::html_content::{ContentType, EndTag};
use lol_html::{element, rewrite_str, RewriteStrSettings};
use pulldown_cmark::{CowStr, Event};
use std::cell::RefCell;
use std::rc::Rc;

/// Decide what raw HTML nodes become in the HTML tree.
///
/// With `allow_dangerous_html` they stay raw and render as markup.
/// Without it they are demoted to text and escaped on serialization.
pub fn passthrough(events: Vec<Event<'_>>, allow_dangerous_html: bool) -> Vec<Event<'_>> {
    if allow_dangerous_html {
        return events;
    }

    events
        .into_iter()
        .map(|event| match event {
            Event::Html(html) | Event::InlineHtml(html) => Event::Text(html),
            other => other,
        })
        .collect()
}

/// Merge the line-sized raw HTML events of each HTML block into one
/// fragment and run it through an HTML tokenizer, so the block is emitted
/// as a single, balanced piece of markup.
pub fn reintegrate(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let mut out = Vec::with_capacity(events.len());
    let mut fragment: Option<String> = None;

    for event in events {
        match event {
            Event::Html(html) => fragment.get_or_insert_with(String::new).push_str(&html),
            other => {
                if let Some(fragment) = fragment.take() {
                    out.push(Event::Html(CowStr::from(reparse(fragment))));
                }
                out.push(other);
            }
        }
    }
    if let Some(fragment) = fragment.take() {
        out.push(Event::Html(CowStr::from(reparse(fragment))));
    }

    out
}

/// Re-parse a fragment and balance it: an element still open when its
/// ancestor closes, or when the fragment ends, gets its end tag. A fragment
/// the tokenizer rejects is kept verbatim.
fn reparse(fragment: String) -> String {
    let open: Rc<RefCell<Vec<String>>> = Rc::default();
    let tracker = Rc::clone(&open);

    let settings: RewriteStrSettings<'_, '_> = RewriteStrSettings {
        element_content_handlers: vec![element!("*", move |el| {
            let name = el.tag_name();
            // Void and self-closing elements have no end tag to wait for
            let Some(handlers) = el.end_tag_handlers() else {
                return Ok(());
            };
            tracker.borrow_mut().push(name.clone());

            let stack = Rc::clone(&tracker);
            handlers.push(Box::new(move |end: &mut EndTag<'_>| {
                let mut stack = stack.borrow_mut();
                if let Some(pos) = stack.iter().rposition(|tag| *tag == name) {
                    let unclosed = closing_tags(&stack[pos + 1..]);
                    if !unclosed.is_empty() {
                        end.before(&unclosed, ContentType::Html);
                    }
                    stack.truncate(pos);
                }
                Ok(())
            }) as lol_html::EndTagHandler<'static>);
            Ok(())
        })],
        ..RewriteStrSettings::default()
    };

    let html = match rewrite_str(&fragment, settings) {
        Ok(html) => html,
        Err(e) => {
            tracing::debug!("Keeping raw HTML fragment as-is: {}", e);
            return fragment;
        }
    };

    let unclosed = closing_tags(&open.borrow());
    if unclosed.is_empty() {
        return html;
    }
    tracing::debug!("Closing unbalanced raw HTML: {}", unclosed);
    let body = html.trim_end_matches('\n');
    format!("{}{}{}", body, unclosed, &html[body.len()..])
}

/// End tags for `names`, innermost first
fn closing_tags(names: &[String]) -> String {
    names.iter().rev().map(|name| format!("</{}>", name)).collect()
}
