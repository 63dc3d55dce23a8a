use crate::stage::Style;
use std::io::{self, Write};

/// Elements per line in a generated array.
pub const ELEMENTS_PER_LINE: usize = 20;

pub const HEADER: &str = "\
///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//! \\file
//! \\author Reiex
//! \\copyright The MIT License (MIT)
//! \\date 2023
///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

";

const DECLARATION_PREFIX: &str = "static constexpr char ";

pub fn write_header<W: Write>(out: &mut W) -> io::Result<()> {
    out.write_all(HEADER.as_bytes())
}

/// Writes `static constexpr char <identifier>[] = { ... };` followed by a blank line.
pub fn write_declaration<W: Write>(
    out: &mut W,
    identifier: &str,
    bytes: &[u8],
    style: Style,
) -> io::Result<()> {
    write!(out, "{}{}[] = {{", DECLARATION_PREFIX, identifier)?;

    match style {
        Style::Plain => {
            for (i, byte) in bytes.iter().enumerate() {
                if i % ELEMENTS_PER_LINE == 0 {
                    out.write_all(b"\n\t")?;
                }
                write!(out, "0x{:02x}, ", byte)?;
            }

            out.write_all(b"\n};\n\n")
        }
        Style::Terminated => {
            for (i, byte) in bytes.iter().chain(Some(&0)).enumerate() {
                if i > 0 {
                    out.write_all(b",")?;
                }
                if i % ELEMENTS_PER_LINE == 0 {
                    out.write_all(b"\n\t")?;
                } else {
                    out.write_all(b" ")?;
                }
                write!(out, "0x{:02x}", byte)?;
            }

            out.write_all(b" };\n\n")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub identifier: String,
    pub bytes: Vec<u8>,
}

/// Reads the elements of a single array body back into bytes.
///
/// Accepts anything from the opening `{` to the closing `}`; returns `None`
/// if the braces are missing or an element is not a `0xNN` literal.
pub fn decode_declaration(text: &str) -> Option<Vec<u8>> {
    let open = text.find('{')?;
    let close = open + text[open..].find('}')?;

    text[open + 1..close]
        .split(',')
        .map(str::trim)
        .filter(|element| !element.is_empty())
        .map(|element| {
            let digits = element.strip_prefix("0x")?;
            if digits.len() != 2 {
                return None;
            }
            u8::from_str_radix(digits, 16).ok()
        })
        .collect()
}

/// Splits a generated file into its declarations, in file order.
pub fn parse_declarations(text: &str) -> Option<Vec<Declaration>> {
    text.split(DECLARATION_PREFIX)
        .skip(1)
        .map(|chunk| {
            let identifier = chunk[..chunk.find("[]")?].to_owned();
            let bytes = decode_declaration(chunk)?;
            Some(Declaration { identifier, bytes })
        })
        .collect()
}
