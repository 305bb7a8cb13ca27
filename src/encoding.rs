//! Byte-to-text decoding shared by the archive loader and the text reader.
//!
//! Only encodings that can be identified with certainty are accepted:
//! UTF-8 (with or without BOM) and UTF-16 LE/BE with a BOM. Anything else
//! is an [`Error::Encoding`].

use crate::error::{Error, Result};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];

/// Decode raw bytes as text.
///
/// A leading BOM selects the encoding and is not part of the result.
pub fn decode_text(bytes: &[u8]) -> Result<String> {
    if let Some(rest) = bytes.strip_prefix(&UTF8_BOM) {
        return decode_utf8(rest);
    }
    if let Some(rest) = bytes.strip_prefix(&UTF16_LE_BOM) {
        return decode_utf16(rest, u16::from_le_bytes);
    }
    if let Some(rest) = bytes.strip_prefix(&UTF16_BE_BOM) {
        return decode_utf16(rest, u16::from_be_bytes);
    }
    decode_utf8(bytes)
}

/// Decode an XML part.
///
/// Same rules as [`decode_text`], plus the `encoding` pseudo-attribute of the
/// XML declaration is rewritten to UTF-8 when the part was UTF-16, so the
/// parser does not try to re-decode an already decoded string.
pub fn decode_xml(bytes: &[u8]) -> Result<String> {
    let utf16 = bytes.starts_with(&UTF16_LE_BOM) || bytes.starts_with(&UTF16_BE_BOM);
    let content = decode_text(bytes)?;
    if utf16 {
        Ok(fix_xml_encoding_declaration(&content))
    } else {
        Ok(content)
    }
}

fn decode_utf8(bytes: &[u8]) -> Result<String> {
    String::from_utf8(bytes.to_vec()).map_err(|e| Error::Encoding(e.to_string()))
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> Result<String> {
    if bytes.len() % 2 != 0 {
        return Err(Error::Encoding("odd number of bytes in UTF-16 data".to_string()));
    }

    let units = bytes.chunks_exact(2).map(|pair| to_unit([pair[0], pair[1]]));

    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(|e| Error::Encoding(e.to_string()))
}

fn fix_xml_encoding_declaration(content: &str) -> String {
    if !content.starts_with("<?xml") {
        return content.to_string();
    }
    let Some(end_decl) = content.find("?>") else {
        return content.to_string();
    };

    let (decl, rest) = content.split_at(end_decl + 2);
    let fixed_decl = decl
        .replace("encoding=\"UTF-16\"", "encoding=\"UTF-8\"")
        .replace("encoding='UTF-16'", "encoding='UTF-8'")
        .replace("encoding=\"utf-16\"", "encoding=\"UTF-8\"")
        .replace("encoding='utf-16'", "encoding='UTF-8'");

    format!("{}{}", fixed_decl, rest)
}
