//! DOCX (Word) body text extraction.
//!
//! Only the main document part is read. Styles, numbering, headers,
//! footers and media are out of scope.

mod parser;

pub use parser::{parse_body_xml, DocxParser};
