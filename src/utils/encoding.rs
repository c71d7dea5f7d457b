//! BOM sniffing for env files.
//!
//! Env files are scanned as UTF-8 line by line. Files saved by Windows
//! editors or shells may carry a byte order mark:
//! - UTF-8 BOM: skipped, the rest is read as UTF-8
//! - UTF-16 LE/BE BOM: decoded up front with `encoding_rs`
//!
//! BOM-less bytes that are not valid UTF-8 surface as read errors from the
//! returned reader.

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor, Read};
use std::path::Path;

const UTF8_BOM: &[u8] = &[0xef, 0xbb, 0xbf];
const UTF16_LE_BOM: &[u8] = &[0xff, 0xfe];
const UTF16_BE_BOM: &[u8] = &[0xfe, 0xff];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Utf8Bom,
    Utf16Le,
    Utf16Be,
}

/// Detect the text encoding from the first bytes of a file.
pub fn detect_bom(prefix: &[u8]) -> TextEncoding {
    if prefix.starts_with(UTF8_BOM) {
        TextEncoding::Utf8Bom
    } else if prefix.starts_with(UTF16_LE_BOM) {
        TextEncoding::Utf16Le
    } else if prefix.starts_with(UTF16_BE_BOM) {
        TextEncoding::Utf16Be
    } else {
        TextEncoding::Utf8
    }
}

/// Open `path` as a UTF-8 line reader, handling a leading BOM.
pub fn open_text_reader(path: &Path) -> io::Result<Box<dyn BufRead>> {
    let file = File::open(path)?;
    text_reader(BufReader::new(file))
}

fn text_reader<R: BufRead + 'static>(mut reader: R) -> io::Result<Box<dyn BufRead>> {
    let encoding = detect_bom(reader.fill_buf()?);

    match encoding {
        TextEncoding::Utf8 => Ok(Box::new(reader)),
        TextEncoding::Utf8Bom => {
            reader.consume(UTF8_BOM.len());
            Ok(Box::new(reader))
        }
        TextEncoding::Utf16Le => decode_whole(reader, UTF_16LE),
        TextEncoding::Utf16Be => decode_whole(reader, UTF_16BE),
    }
}

fn decode_whole<R: Read>(mut reader: R, encoding: &'static Encoding) -> io::Result<Box<dyn BufRead>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    let (decoded, had_errors) = encoding.decode_with_bom_removal(&bytes);
    if had_errors {
        tracing::warn!("Replaced malformed {} sequences while decoding env file", encoding.name());
    }

    Ok(Box::new(Cursor::new(decoded.into_owned().into_bytes())))
}
