//! Turn result-file bytes into text.
//!
//! Two formats are understood:
//!
//! - plain text, decoded as strict UTF-8
//! - `.docx`, read from the `word/document.xml` part of the zip container
//!
//! For `.docx` only paragraphs that sit directly in the document body count,
//! and only their own runs. Tables, text boxes, headers and footers are
//! ignored. Paragraphs are joined with `\n` in document order.

use std::io::{Cursor, Read};

use quick_xml::Reader;
use quick_xml::events::Event;
use thiserror::Error;
use zip::ZipArchive;

use crate::domain::DocumentFormat;

const DOCUMENT_PART: &str = "word/document.xml";

/// Failure to turn a file's bytes into text.
#[derive(Debug, Error)]
pub enum ReadError {
    /// Text file is not valid UTF-8.
    #[error("not valid UTF-8: {0}")]
    Decode(#[from] std::string::FromUtf8Error),

    /// The bytes are not a readable zip container.
    #[error("not a readable .docx container: {0}")]
    Archive(String),

    /// The container lacks the main document part.
    #[error("missing {0} in .docx container")]
    MissingPart(&'static str),

    /// The document part is not well-formed XML.
    #[error("malformed document XML: {0}")]
    Xml(String),
}

/// Read `bytes` as `format` and return its text content.
pub fn read_document(bytes: &[u8], format: DocumentFormat) -> Result<String, ReadError> {
    match format {
        DocumentFormat::Text => Ok(String::from_utf8(bytes.to_vec())?),
        DocumentFormat::Docx => read_docx(bytes),
    }
}

fn read_docx(bytes: &[u8]) -> Result<String, ReadError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| ReadError::Archive(e.to_string()))?;
    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|_| ReadError::MissingPart(DOCUMENT_PART))?;

    let mut xml = Vec::new();
    part.read_to_end(&mut xml)
        .map_err(|e| ReadError::Archive(e.to_string()))?;

    Ok(body_paragraphs(&xml)?.join("\n"))
}

/// Text of each `w:body/w:p`, in order.
///
/// Only runs directly under the paragraph (or under a `w:hyperlink` directly
/// under it) contribute. Text boxes nest their own paragraphs inside a run and
/// are skipped.
fn body_paragraphs(xml: &[u8]) -> Result<Vec<String>, ReadError> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();

    // Local names of the currently open elements.
    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut paragraphs = Vec::new();
    // Open body paragraph: its depth in `path` and text collected so far.
    let mut current: Option<(usize, String)> = None;
    // Depth of the open run that belongs to `current`.
    let mut run: Option<usize> = None;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf).map_err(xml_error)? {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_vec();
                if name == b"p" && current.is_none() && parent_is(&path, b"body") {
                    current = Some((path.len(), String::new()));
                } else if name == b"r"
                    && run.is_none()
                    && current.as_ref().is_some_and(|(depth, _)| is_paragraph_child(&path, *depth))
                {
                    run = Some(path.len());
                }
                if name == b"t" && in_run(&path, run) {
                    in_text = true;
                }
                path.push(name);
            }
            Event::Empty(e) => {
                let name = e.local_name();
                let run_child = in_run(&path, run);
                match (name.as_ref(), current.as_mut()) {
                    (b"p", None) if parent_is(&path, b"body") => paragraphs.push(String::new()),
                    (b"tab" | b"ptab", Some((_, text))) if run_child => text.push('\t'),
                    (b"br" | b"cr", Some((_, text))) if run_child => text.push('\n'),
                    (b"noBreakHyphen", Some((_, text))) if run_child => text.push('-'),
                    _ => {}
                }
            }
            Event::Text(t) if in_text => {
                if let Some((_, text)) = current.as_mut() {
                    text.push_str(&t.unescape().map_err(xml_error)?);
                }
            }
            Event::End(e) => {
                if e.local_name().as_ref() == b"t" {
                    in_text = false;
                }
                path.pop();
                if run == Some(path.len()) {
                    run = None;
                }
                if current.as_ref().is_some_and(|(depth, _)| *depth == path.len()) {
                    if let Some((_, text)) = current.take() {
                        paragraphs.push(text);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}

fn parent_is(path: &[Vec<u8>], name: &[u8]) -> bool {
    path.last().is_some_and(|last| last.as_slice() == name)
}

/// Whether an element opening now sits directly in the paragraph at `depth`,
/// or in a hyperlink that does.
fn is_paragraph_child(path: &[Vec<u8>], depth: usize) -> bool {
    path.len() == depth + 1 || (path.len() == depth + 2 && parent_is(path, b"hyperlink"))
}

/// Whether an element opening now is a direct child of the open run.
fn in_run(path: &[Vec<u8>], run: Option<usize>) -> bool {
    run.is_some_and(|depth| path.len() == depth + 1)
}

fn xml_error<E: std::fmt::Display>(e: E) -> ReadError {
    ReadError::Xml(e.to_string())
}
