//! Class-based syntax highlighting for fenced code blocks

use pulldown_cmark::{CodeBlockKind, CowStr, Event, Tag, TagEnd};
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::helpers::escape_html;

/// Annotates code blocks with per-token CSS classes
pub struct Highlighter {
    syntax_set: SyntaxSet,
    line_numbers: bool,
}

/// A fenced block whose language is known, collected until it ends
struct PendingBlock<'s> {
    lang: String,
    syntax: &'s SyntaxReference,
    code: String,
}

impl Highlighter {
    /// Create a highlighter with the default syntax definitions
    pub fn new(line_numbers: bool) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            line_numbers,
        }
    }

    /// Replace every fenced code block in a known language with
    /// highlighted HTML. Blocks without a language, indented blocks and
    /// unknown languages are passed on untouched.
    pub fn highlight<'a>(&self, events: Vec<Event<'a>>) -> Vec<Event<'a>> {
        let mut out = Vec::with_capacity(events.len());
        let mut block: Option<PendingBlock<'_>> = None;

        for event in events {
            if let Some(pending) = block.as_mut() {
                match event {
                    Event::Text(text) => pending.code.push_str(&text),
                    Event::End(TagEnd::CodeBlock) => {
                        if let Some(finished) = block.take() {
                            out.push(Event::Html(CowStr::from(self.render_block(&finished))));
                        }
                    }
                    other => out.push(other),
                }
                continue;
            }

            if let Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) = &event {
                if let Some((lang, syntax)) = self.find_syntax(info) {
                    block = Some(PendingBlock {
                        lang,
                        syntax,
                        code: String::new(),
                    });
                    continue;
                }
            }

            out.push(event);
        }

        out
    }

    /// Language named by a fence info string, e.g. `rust` in `rust,ignore`
    /// or `js {1,3}`. Plain text is not a language worth annotating.
    fn find_syntax(&self, info: &str) -> Option<(String, &SyntaxReference)> {
        let lang = info
            .split(|c: char| c.is_whitespace() || c == ',' || c == '{')
            .next()
            .unwrap_or("")
            .trim();
        if lang.is_empty() {
            return None;
        }

        self.syntax_set
            .find_syntax_by_token(lang)
            .filter(|syntax| syntax.name != "Plain Text")
            .map(|syntax| (lang.to_string(), syntax))
    }

    fn render_block(&self, block: &PendingBlock<'_>) -> String {
        let lang = escape_html(&block.lang);

        let mut generator = ClassedHTMLGenerator::new_with_class_style(
            block.syntax,
            &self.syntax_set,
            ClassStyle::Spaced,
        );
        for line in LinesWithEndings::from(&block.code) {
            if let Err(e) = generator.parse_html_for_line_which_includes_newline(line) {
                tracing::debug!("Highlighting failed for {} block: {}", block.lang, e);
                return format!(
                    "<pre><code class=\"language-{}\">{}</code></pre>\n",
                    lang,
                    escape_html(&block.code)
                );
            }
        }
        let highlighted = generator.finalize();

        if self.line_numbers {
            add_line_numbers(&highlighted, &lang, block.code.lines().count())
        } else {
            format!(
                "<pre class=\"language-{0}\"><code class=\"language-{0}\">{1}</code></pre>\n",
                lang, highlighted
            )
        }
    }
}

/// Put a line-number gutter next to highlighted code
fn add_line_numbers(code: &str, lang: &str, line_count: usize) -> String {
    let gutter = (1..=line_count)
        .map(|n| format!("<span class=\"line-number\">{}</span>", n))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "<figure class=\"highlight language-{0}\"><table><tr><td class=\"gutter\"><pre>{1}</pre></td><td class=\"code\"><pre><code class=\"language-{0}\">{2}</code></pre></td></tr></table></figure>\n",
        lang, gutter, code
    )
}
