//! GFM autolink literals: bare `http(s)://` and `www.` URLs and email
//! addresses become links

use lazy_static::lazy_static;
use pulldown_cmark::{CowStr, Event, LinkType, Tag, TagEnd};
use regex::Regex;

lazy_static! {
    static ref BARE_URL: Regex = Regex::new(
        r"(?i)\b(?:https?://|www\.)[^\s<>]+|[a-z0-9._+-]+@[a-z0-9_-]+(?:\.[a-z0-9_-]+)+"
    )
    .unwrap();
}

/// Turn bare URLs and email addresses in text into links.
///
/// Text inside links, images, code blocks and raw `<a>` elements is left
/// alone. Adjacent text events are merged first so a URL split by the
/// parser is still seen whole.
pub fn link_bare_urls<'a>(events: Vec<Event<'a>>) -> Vec<Event<'a>> {
    let mut out = Vec::with_capacity(events.len());
    let mut skip_depth = 0usize;
    let mut anchor_depth = 0usize;

    for event in merge_text(events) {
        match &event {
            Event::Start(Tag::Link { .. } | Tag::Image { .. } | Tag::CodeBlock(_)) => {
                skip_depth += 1;
            }
            Event::End(TagEnd::Link | TagEnd::Image | TagEnd::CodeBlock) => {
                skip_depth = skip_depth.saturating_sub(1);
            }
            Event::InlineHtml(html) => {
                let tag = html.trim_start().to_ascii_lowercase();
                if tag.starts_with("<a ") || tag.starts_with("<a>") {
                    anchor_depth += 1;
                } else if tag.starts_with("</a") {
                    anchor_depth = anchor_depth.saturating_sub(1);
                }
            }
            Event::Text(text) if skip_depth == 0 && anchor_depth == 0 => {
                if let Some(linked) = linkify(text) {
                    out.extend(linked);
                    continue;
                }
            }
            _ => {}
        }
        out.push(event);
    }

    out
}

fn merge_text<'a>(events: Vec<Event<'a>>) -> Vec<Event<'a>> {
    let mut out: Vec<Event<'a>> = Vec::with_capacity(events.len());
    for event in events {
        if let Event::Text(text) = &event {
            if let Some(Event::Text(prev)) = out.last_mut() {
                let mut merged = prev.to_string();
                merged.push_str(text);
                *prev = CowStr::from(merged);
                continue;
            }
        }
        out.push(event);
    }
    out
}

/// Split `text` into text and link events, or `None` if it holds no URL
fn linkify<'a>(text: &str) -> Option<Vec<Event<'a>>> {
    let mut events = Vec::new();
    let mut last = 0;

    for found in BARE_URL.find_iter(text) {
        let Some((url, dest_url)) = link_target(found.as_str()) else {
            continue;
        };

        let start = found.start();
        if start > last {
            events.push(Event::Text(CowStr::from(text[last..start].to_string())));
        }

        events.push(Event::Start(Tag::Link {
            link_type: LinkType::Autolink,
            dest_url: CowStr::from(dest_url),
            title: CowStr::Borrowed(""),
            id: CowStr::Borrowed(""),
        }));
        events.push(Event::Text(CowStr::from(url.to_string())));
        events.push(Event::End(TagEnd::Link));

        last = start + url.len();
    }

    if events.is_empty() {
        return None;
    }
    if last < text.len() {
        events.push(Event::Text(CowStr::from(text[last..].to_string())));
    }
    Some(events)
}

/// Visible text and destination for a match, or `None` if it is not a link
fn link_target(found: &str) -> Option<(&str, String)> {
    if found.contains("://") || starts_with_www(found) {
        let url = trim_url(found);
        if !has_domain(url) {
            return None;
        }
        let dest = if starts_with_www(url) {
            format!("http://{}", url)
        } else {
            url.to_string()
        };
        return Some((url, dest));
    }

    let email = found.trim_end_matches('.');
    let has_tld = email
        .rsplit_once('@')
        .is_some_and(|(_, domain)| domain.contains('.'));
    if email.ends_with(['-', '_']) || !has_tld {
        return None;
    }
    Some((email, format!("mailto:{}", email)))
}

fn starts_with_www(url: &str) -> bool {
    url.get(..4)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("www."))
}

/// Something must follow the scheme or `www.` prefix
fn has_domain(url: &str) -> bool {
    let rest = match url.find("://") {
        Some(pos) => &url[pos + 3..],
        None if starts_with_www(url) => &url[4..],
        None => return false,
    };
    rest.chars().next().is_some_and(|c| c.is_alphanumeric())
}

/// Drop trailing punctuation that belongs to the sentence, not the URL
fn trim_url(url: &str) -> &str {
    let mut url = url;
    while let Some(last) = url.chars().last() {
        url = match last {
            '?' | '!' | '.' | ',' | ':' | '*' | '_' | '~' | '\'' | '"' => &url[..url.len() - 1],
            ')' if url.matches(')').count() > url.matches('(').count() => &url[..url.len() - 1],
            ';' => match url.rfind('&') {
                Some(amp)
                    if amp + 1 < url.len() - 1
                        && url[amp + 1..url.len() - 1]
                            .chars()
                            .all(|c| c.is_ascii_alphanumeric()) =>
                {
                    &url[..amp]
                }
                _ => break,
            },
            _ => break,
        };
    }
    url
}
