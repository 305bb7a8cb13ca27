//! Body text extraction from `word/document.xml`.

use crate::container::{DocxContainer, ExtractOptions, BODY_XML_PATH};
use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;
use std::path::Path;

/// WordprocessingML namespaces (transitional and strict).
const WORD_NAMESPACES: [&[u8]; 2] = [
    b"http://schemas.openxmlformats.org/wordprocessingml/2006/main",
    b"http://purl.oclc.org/ooxml/wordprocessingml/main",
];

/// Extracts paragraph text from a DOCX package.
#[derive(Debug)]
pub struct DocxParser {
    container: DocxContainer,
}

impl DocxParser {
    /// Open a DOCX file with default limits.
    ///
    /// Fails if the file is not a ZIP archive or any entry name is unsafe.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_options(path, ExtractOptions::default())
    }

    /// Open a DOCX file with explicit limits.
    pub fn open_with_options(path: impl AsRef<Path>, options: ExtractOptions) -> Result<Self> {
        let container = DocxContainer::open_with_options(path, options)?;
        Ok(Self { container })
    }

    /// Create a parser from bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let container = DocxContainer::from_bytes(data)?;
        Ok(Self { container })
    }

    /// Body paragraphs in document order.
    pub fn paragraphs(&mut self) -> Result<Vec<String>> {
        let xml = self.container.read_xml(BODY_XML_PATH)?;
        parse_body_xml(&xml)
    }

    /// Body text with one line per paragraph.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use docstrip::docx::DocxParser;
    ///
    /// let text = DocxParser::open("report.docx")?.body_text()?;
    /// println!("{}", text);
    /// # Ok::<(), docstrip::Error>(())
    /// ```
    pub fn body_text(&mut self) -> Result<String> {
        Ok(self.paragraphs()?.join("\n"))
    }

    /// Get the underlying container.
    pub fn container(&self) -> &DocxContainer {
        &self.container
    }
}

/// What a WordprocessingML element means for text collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Element {
    Paragraph,
    Run,
    Text,
    Tab,
    Break,
    NoBreakHyphen,
    Other,
}

impl Element {
    fn classify(resolved: &ResolveResult<'_>, start: &BytesStart<'_>) -> Self {
        let in_word_ns = matches!(
            resolved,
            ResolveResult::Bound(Namespace(ns)) if WORD_NAMESPACES.contains(ns)
        );
        if !in_word_ns {
            return Element::Other;
        }
        match start.local_name().as_ref() {
            b"p" => Element::Paragraph,
            b"r" => Element::Run,
            b"t" => Element::Text,
            b"tab" => Element::Tab,
            b"br" | b"cr" => Element::Break,
            b"noBreakHyphen" => Element::NoBreakHyphen,
            _ => Element::Other,
        }
    }
}

/// Collection state while walking the body.
#[derive(Debug, Default)]
struct BodyCollector {
    paragraphs: Vec<String>,
    /// Slots of open paragraphs; text boxes nest paragraphs inside runs.
    open: Vec<usize>,
    /// Element stack mirroring the XML nesting.
    stack: Vec<Element>,
    seen_root: bool,
}

impl BodyCollector {
    fn in_run(&self) -> bool {
        self.stack.contains(&Element::Run)
    }

    fn in_text(&self) -> bool {
        self.stack.last() == Some(&Element::Text)
    }

    fn push_str(&mut self, s: &str) {
        if let Some(&slot) = self.open.last() {
            self.paragraphs[slot].push_str(s);
        }
    }

    fn start(&mut self, element: Element) -> Result<()> {
        if self.stack.is_empty() {
            if self.seen_root {
                return Err(Error::XmlParse("multiple root elements".to_string()));
            }
            self.seen_root = true;
        }
        if element == Element::Paragraph {
            // a container precedes its nested paragraphs
            self.open.push(self.paragraphs.len());
            self.paragraphs.push(String::new());
        }
        self.stack.push(element);
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        let element = self
            .stack
            .pop()
            .ok_or_else(|| Error::XmlParse("unexpected closing tag".to_string()))?;
        if element == Element::Paragraph {
            self.open.pop();
        }
        Ok(())
    }

    fn empty(&mut self, element: Element) -> Result<()> {
        if self.stack.is_empty() {
            if self.seen_root {
                return Err(Error::XmlParse("multiple root elements".to_string()));
            }
            self.seen_root = true;
        }
        if !self.in_run() {
            // tab stops and other property elements carry no text
            if element == Element::Paragraph {
                self.paragraphs.push(String::new());
            }
            return Ok(());
        }
        match element {
            Element::Tab => self.push_str("\t"),
            Element::Break => self.push_str("\n"),
            Element::NoBreakHyphen => self.push_str("-"),
            Element::Paragraph => self.paragraphs.push(String::new()),
            _ => {}
        }
        Ok(())
    }

    fn text(&mut self, text: &str) -> Result<()> {
        if self.stack.is_empty() {
            if text.trim().is_empty() {
                return Ok(());
            }
            return Err(Error::XmlParse("text outside the root element".to_string()));
        }
        if self.in_text() {
            self.push_str(text);
        }
        Ok(())
    }

    fn finish(self) -> Result<Vec<String>> {
        if !self.stack.is_empty() {
            return Err(Error::XmlParse("unclosed element at end of document".to_string()));
        }
        if !self.seen_root {
            return Err(Error::XmlParse("no root element".to_string()));
        }
        Ok(self.paragraphs)
    }
}

/// Parse body XML into paragraph strings.
///
/// Any markup error fails the whole parse; so does a DOCTYPE declaration,
/// since entity definitions have no place in a document part.
pub fn parse_body_xml(xml: &str) -> Result<Vec<String>> {
    let mut reader = NsReader::from_str(xml);
    reader.config_mut().trim_text(false);
    reader.config_mut().check_end_names = true;

    let mut collector = BodyCollector::default();

    loop {
        let (resolved, event) = reader.read_resolved_event()?;
        match event {
            Event::Start(ref e) => {
                let element = Element::classify(&resolved, e);
                collector.start(element)?;
            }
            Event::Empty(ref e) => {
                let element = Element::classify(&resolved, e);
                collector.empty(element)?;
            }
            Event::End(_) => collector.end()?,
            Event::Text(ref e) => {
                let text = e.unescape()?;
                collector.text(&text)?;
            }
            Event::CData(ref e) => {
                let text = std::str::from_utf8(e).map_err(|err| Error::Encoding(err.to_string()))?;
                collector.text(text)?;
            }
            Event::DocType(_) => {
                return Err(Error::XmlParse("DOCTYPE declarations are not allowed".to_string()));
            }
            Event::Eof => break,
            Event::Decl(_) | Event::PI(_) | Event::Comment(_) => {}
        }
    }

    collector.finish()
}
