//! Markdown to HTML conversion.
//!
//! pulldown-cmark does the parsing; [`HtmlWriter`] turns its event stream
//! into the site's HTML dialect (new-tab links, task-list classes, lazy
//! images) and enforces the nesting limit.

use pulldown_cmark::{Alignment, CodeBlockKind, Event, Options, Parser as MdParser, Tag};
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::config::RenderOptions;
use crate::error::{Error, Result};
use crate::escape::push_escaped;

/// Convert one Markdown fragment to HTML.
///
/// Panics inside the parser or writer are caught and reported as
/// [`Error::Panicked`] so a single bad input can be recovered from. The
/// panic hook is left alone, so the default hook still prints the panic
/// message to stderr before the caller's fallback runs.
pub fn to_html(markdown: &str, options: &RenderOptions) -> Result<String> {
    match catch_unwind(AssertUnwindSafe(|| convert(markdown, options))) {
        Ok(result) => result,
        Err(panic) => {
            let msg = if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else if let Some(s) = panic.downcast_ref::<&str>() {
                s.to_string()
            } else {
                "unknown panic".to_string()
            };
            Err(Error::Panicked(msg))
        }
    }
}

fn convert(markdown: &str, options: &RenderOptions) -> Result<String> {
    let events: Vec<Event> = MdParser::new_ext(markdown, parser_options(options)).collect();
    HtmlWriter::new(options, markdown.len()).run(&events)
}

fn parser_options(options: &RenderOptions) -> Options {
    let mut opts = Options::empty();
    if options.gfm {
        opts.insert(Options::ENABLE_TABLES);
        opts.insert(Options::ENABLE_STRIKETHROUGH);
        opts.insert(Options::ENABLE_TASKLISTS);
        opts.insert(Options::ENABLE_FOOTNOTES);
    }
    opts
}

struct HtmlWriter<'o> {
    options: &'o RenderOptions,
    out: String,
    /// Open containers, innermost last
    stack: Vec<&'static str>,
    table_alignments: Vec<Alignment>,
    table_cell_index: usize,
    in_table_head: bool,
    /// Alt text collected while inside an image
    image_alt: Option<String>,
    image_depth: usize,
    footnotes: HashMap<String, usize>,
}

impl<'o> HtmlWriter<'o> {
    fn new(options: &'o RenderOptions, capacity: usize) -> Self {
        Self {
            options,
            out: String::with_capacity(capacity + capacity / 2),
            stack: Vec::new(),
            table_alignments: Vec::new(),
            table_cell_index: 0,
            in_table_head: false,
            image_alt: None,
            image_depth: 0,
            footnotes: HashMap::new(),
        }
    }

    fn run(mut self, events: &[Event]) -> Result<String> {
        for (index, event) in events.iter().enumerate() {
            match event {
                Event::Start(tag) => self.start(tag, events, index)?,
                Event::End(tag) => self.end(tag)?,
                Event::Text(text) => self.text(text),
                Event::Code(code) => {
                    if let Some(alt) = self.image_alt.as_mut() {
                        alt.push_str(code);
                    } else {
                        self.out.push_str("<code>");
                        push_escaped(&mut self.out, code);
                        self.out.push_str("</code>");
                    }
                }
                Event::Html(html) => {
                    if self.image_alt.is_none() {
                        self.out.push_str(html);
                    }
                }
                Event::FootnoteReference(name) => {
                    let number = self.footnote_number(name);
                    self.out.push_str("<sup class=\"footnote-reference\"><a href=\"#fn-");
                    push_escaped(&mut self.out, name);
                    self.out.push_str(&format!("\">{}</a></sup>", number));
                }
                Event::SoftBreak => {
                    if let Some(alt) = self.image_alt.as_mut() {
                        alt.push(' ');
                    } else if self.options.breaks {
                        self.out.push_str("<br />\n");
                    } else {
                        self.out.push('\n');
                    }
                }
                Event::HardBreak => {
                    if self.image_alt.is_none() {
                        self.out.push_str("<br />\n");
                    }
                }
                Event::Rule => self.out.push_str("<hr />\n"),
                Event::TaskListMarker(checked) => {
                    if *checked {
                        self.out
                            .push_str("<input type=\"checkbox\" disabled checked /> ");
                    } else {
                        self.out.push_str("<input type=\"checkbox\" disabled /> ");
                    }
                }
            }
        }

        if let Some(open) = self.stack.last() {
            return Err(Error::Unbalanced(format!("{} never closed", open)));
        }

        Ok(self.out)
    }

    fn text(&mut self, text: &str) {
        match self.image_alt.as_mut() {
            Some(alt) => alt.push_str(text),
            None => push_escaped(&mut self.out, text),
        }
    }

    fn push_container(&mut self, name: &'static str) -> Result<()> {
        self.stack.push(name);
        if self.stack.len() > self.options.max_nesting {
            return Err(Error::NestingTooDeep {
                depth: self.stack.len(),
                limit: self.options.max_nesting,
            });
        }
        Ok(())
    }

    fn pop_container(&mut self, name: &'static str) -> Result<()> {
        match self.stack.pop() {
            Some(open) if open == name => Ok(()),
            Some(open) => Err(Error::Unbalanced(format!(
                "{} closed while {} is open",
                name, open
            ))),
            None => Err(Error::Unbalanced(format!("{} closed at top level", name))),
        }
    }

    fn start(&mut self, tag: &Tag, events: &[Event], index: usize) -> Result<()> {
        self.push_container(tag_name(tag))?;

        if let Tag::Image(_, _, _) = tag {
            self.image_depth += 1;
            if self.image_depth == 1 {
                self.image_alt = Some(String::new());
            }
            return Ok(());
        }

        // Inside an image everything but text is dropped from the alt attribute
        if self.image_alt.is_some() {
            return Ok(());
        }

        match tag {
            Tag::Paragraph => self.out.push_str("<p>"),
            Tag::Heading(level, _, _) => {
                self.out.push_str(&format!("<h{}>", *level as usize));
            }
            Tag::BlockQuote => self.out.push_str("<blockquote>\n"),
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => info.split_whitespace().next().unwrap_or(""),
                    CodeBlockKind::Indented => "",
                };
                if lang.is_empty() {
                    self.out.push_str("<pre><code>");
                } else {
                    self.out.push_str("<pre><code class=\"language-");
                    push_escaped(&mut self.out, lang);
                    self.out.push_str("\">");
                }
            }
            Tag::List(start) => {
                let element = if start.is_some() { "ol" } else { "ul" };
                self.out.push('<');
                self.out.push_str(element);
                if let Some(n) = *start {
                    if n != 1 {
                        self.out.push_str(&format!(" start=\"{}\"", n));
                    }
                }
                if list_has_tasks(events, index) {
                    self.out.push_str(" class=\"task-list\"");
                }
                self.out.push_str(">\n");
            }
            Tag::Item => match item_task_state(events, index) {
                Some(true) => self.out.push_str("<li class=\"task task-done\">"),
                Some(false) => self.out.push_str("<li class=\"task\">"),
                None => self.out.push_str("<li>"),
            },
            Tag::FootnoteDefinition(name) => {
                let number = self.footnote_number(name);
                self.out
                    .push_str("<div class=\"footnote-definition\" id=\"fn-");
                push_escaped(&mut self.out, name);
                self.out.push_str(&format!(
                    "\"><sup class=\"footnote-definition-label\">{}</sup>",
                    number
                ));
            }
            Tag::Table(alignments) => {
                self.table_alignments = alignments.clone();
                self.out.push_str("<table>");
            }
            Tag::TableHead => {
                self.in_table_head = true;
                self.table_cell_index = 0;
                self.out.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                self.table_cell_index = 0;
                self.out.push_str("<tr>");
            }
            Tag::TableCell => {
                let cell = if self.in_table_head { "th" } else { "td" };
                self.out.push('<');
                self.out.push_str(cell);
                match self.table_alignments.get(self.table_cell_index) {
                    Some(Alignment::Left) => self.out.push_str(" style=\"text-align: left\""),
                    Some(Alignment::Center) => {
                        self.out.push_str(" style=\"text-align: center\"")
                    }
                    Some(Alignment::Right) => self.out.push_str(" style=\"text-align: right\""),
                    _ => {}
                }
                self.out.push('>');
            }
            Tag::Emphasis => self.out.push_str("<em>"),
            Tag::Strong => self.out.push_str("<strong>"),
            Tag::Strikethrough => self.out.push_str("<del>"),
            Tag::Link(_, url, title) => {
                self.out.push_str("<a href=\"");
                push_escaped(&mut self.out, url);
                self.out.push('"');
                if !title.is_empty() {
                    self.out.push_str(" title=\"");
                    push_escaped(&mut self.out, title);
                    self.out.push('"');
                }
                // In-page anchors stay in the current tab
                if !url.starts_with('#') {
                    self.out
                        .push_str(" target=\"_blank\" rel=\"noopener noreferrer\"");
                }
                self.out.push('>');
            }
            Tag::Image(_, _, _) => {}
        }

        Ok(())
    }

    fn end(&mut self, tag: &Tag) -> Result<()> {
        self.pop_container(tag_name(tag))?;

        if let Tag::Image(_, url, title) = tag {
            self.image_depth = self.image_depth.saturating_sub(1);
            // Nested image: its alt text already went to the outer image
            if self.image_depth > 0 {
                return Ok(());
            }
            let alt = self.image_alt.take().unwrap_or_default();
            self.out.push_str("<img src=\"");
            push_escaped(&mut self.out, url);
            self.out.push_str("\" alt=\"");
            push_escaped(&mut self.out, &alt);
            self.out.push('"');
            if !title.is_empty() {
                self.out.push_str(" title=\"");
                push_escaped(&mut self.out, title);
                self.out.push('"');
            }
            self.out.push_str(" loading=\"lazy\" />");
            return Ok(());
        }

        if self.image_alt.is_some() {
            return Ok(());
        }

        match tag {
            Tag::Paragraph => self.out.push_str("</p>\n"),
            Tag::Heading(level, _, _) => {
                self.out.push_str(&format!("</h{}>\n", *level as usize));
            }
            Tag::BlockQuote => self.out.push_str("</blockquote>\n"),
            Tag::CodeBlock(_) => self.out.push_str("</code></pre>\n"),
            Tag::List(Some(_)) => self.out.push_str("</ol>\n"),
            Tag::List(None) => self.out.push_str("</ul>\n"),
            Tag::Item => self.out.push_str("</li>\n"),
            Tag::FootnoteDefinition(_) => self.out.push_str("</div>\n"),
            Tag::Table(_) => self.out.push_str("</tbody></table>\n"),
            Tag::TableHead => {
                self.in_table_head = false;
                self.out.push_str("</tr></thead><tbody>\n");
            }
            Tag::TableRow => self.out.push_str("</tr>\n"),
            Tag::TableCell => {
                self.out
                    .push_str(if self.in_table_head { "</th>" } else { "</td>" });
                self.table_cell_index += 1;
            }
            Tag::Emphasis => self.out.push_str("</em>"),
            Tag::Strong => self.out.push_str("</strong>"),
            Tag::Strikethrough => self.out.push_str("</del>"),
            Tag::Link(_, _, _) => self.out.push_str("</a>"),
            Tag::Image(_, _, _) => {}
        }

        Ok(())
    }

    fn footnote_number(&mut self, name: &str) -> usize {
        let next = self.footnotes.len() + 1;
        *self.footnotes.entry(name.to_string()).or_insert(next)
    }
}

fn tag_name(tag: &Tag) -> &'static str {
    match tag {
        Tag::Paragraph => "paragraph",
        Tag::Heading(_, _, _) => "heading",
        Tag::BlockQuote => "blockquote",
        Tag::CodeBlock(_) => "code block",
        Tag::List(_) => "list",
        Tag::Item => "list item",
        Tag::FootnoteDefinition(_) => "footnote",
        Tag::Table(_) => "table",
        Tag::TableHead => "table head",
        Tag::TableRow => "table row",
        Tag::TableCell => "table cell",
        Tag::Emphasis => "emphasis",
        Tag::Strong => "strong",
        Tag::Strikethrough => "strikethrough",
        Tag::Link(_, _, _) => "link",
        Tag::Image(_, _, _) => "image",
    }
}

/// Task state of the item starting at `index`: `Some(checked)` for task
/// items, `None` for plain ones. Loose items wrap the marker in a paragraph.
fn item_task_state(events: &[Event], index: usize) -> Option<bool> {
    match events.get(index + 1)? {
        Event::TaskListMarker(checked) => Some(*checked),
        Event::Start(Tag::Paragraph) => match events.get(index + 2)? {
            Event::TaskListMarker(checked) => Some(*checked),
            _ => None,
        },
        _ => None,
    }
}

/// Whether any direct item of the list starting at `index` is a task item.
fn list_has_tasks(events: &[Event], index: usize) -> bool {
    let mut depth = 0usize;
    for (offset, event) in events[index + 1..].iter().enumerate() {
        match event {
            Event::Start(Tag::List(_)) => depth += 1,
            Event::End(Tag::List(_)) => {
                if depth == 0 {
                    return false;
                }
                depth -= 1;
            }
            Event::Start(Tag::Item) if depth == 0 => {
                if item_task_state(events, index + 1 + offset).is_some() {
                    return true;
                }
            }
            _ => {}
        }
    }
    false
}
