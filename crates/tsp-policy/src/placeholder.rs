//! Recipient element location and in-place rewrite.
//!
//! The document is walked with a streaming XML reader only to find the byte
//! span of each recipient element's text. The rewrite itself splices the new
//! text into the original string, so whitespace, comments, attribute quoting
//! and everything else outside those spans survive unchanged.

use std::ops::Range;

use quick_xml::escape::{escape, unescape};
use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

/// Result of patching one document's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPatch {
    /// Recipient found in the placeholder element, unescaped
    pub previous: String,
    /// Number of element texts that held `previous` and were rewritten
    pub replacements: usize,
    pub content: String,
    /// False when the document already named the recipient
    pub changed: bool,
}

/// Failure to locate recipient element texts.
#[derive(Debug, Error)]
pub enum PlaceholderError {
    #[error(transparent)]
    Xml(#[from] quick_xml::Error),

    /// A reported element span does not fall on UTF-8 character boundaries.
    #[error("element text span {start}..{end} does not fall on character boundaries")]
    Span { start: usize, end: usize },
}

#[derive(Debug)]
struct ElementText {
    name: String,
    /// Trimmed text span inside the element, as byte offsets into the full content
    span: Range<usize>,
}

const BOM: char = '\u{feff}';

/// Collect the text spans of every element named in `names`, in document order.
///
/// The reader drops a leading byte order mark without counting it, so the
/// document is parsed without the BOM and every span shifted back by its length.
fn element_texts(content: &str, names: &[&str]) -> Result<Vec<ElementText>, PlaceholderError> {
    let (offset, body) = match content.strip_prefix(BOM) {
        Some(rest) => (BOM.len_utf8(), rest),
        None => (0, content),
    };
    let mut reader = Reader::from_str(body);
    let mut found = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let local = start.local_name();
                let Some(name) = names.iter().find(|n| n.as_bytes() == local.as_ref()) else {
                    continue;
                };
                let inner = reader.read_to_end(start.name())?;
                let (begin, end) = (offset + inner.start as usize, offset + inner.end as usize);
                let raw = content
                    .get(begin..end)
                    .ok_or(PlaceholderError::Span { start: begin, end })?;
                let lead = raw.len() - raw.trim_start().len();
                let text_len = raw.trim().len();
                found.push(ElementText {
                    name: (*name).to_string(),
                    span: begin + lead..begin + lead + text_len,
                });
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(found)
}

/// Rewrite the recipient in one policy document.
///
/// The first non-empty `placeholder` element decides the current recipient.
/// Every element listed in `rewrite` whose text equals it is replaced with the
/// XML-escaped `recipient`. Returns `None` when the document has no
/// placeholder value at all.
pub fn patch_content(
    content: &str,
    recipient: &str,
    placeholder: &str,
    rewrite: &[&str],
) -> Result<Option<ContentPatch>, PlaceholderError> {
    let mut names: Vec<&str> = rewrite.to_vec();
    if !names.contains(&placeholder) {
        names.push(placeholder);
    }

    let elements = element_texts(content, &names)?;
    let Some(first) = elements
        .iter()
        .find(|e| e.name == placeholder && !e.span.is_empty())
    else {
        return Ok(None);
    };

    let current = &content[first.span.clone()];
    let replacement = escape(recipient);

    let mut patched = String::with_capacity(content.len() + replacement.len());
    let mut cursor = 0;
    let mut replacements = 0;

    for element in &elements {
        if !rewrite.contains(&element.name.as_str()) && element.name != placeholder {
            continue;
        }
        let text = &content[element.span.clone()];
        if text != current {
            if !text.is_empty() {
                tracing::debug!(
                    element = %element.name,
                    value = text,
                    "recipient element holds a different value, left as is"
                );
            }
            continue;
        }
        patched.push_str(&content[cursor..element.span.start]);
        patched.push_str(&replacement);
        cursor = element.span.end;
        replacements += 1;
    }
    patched.push_str(&content[cursor..]);

    let changed = patched != content;
    Ok(Some(ContentPatch {
        previous: unescape(current)
            .map(|v| v.into_owned())
            .unwrap_or_else(|_| current.to_string()),
        replacements,
        content: patched,
        changed,
    }))
}
