use super::error::ParseError;
use super::format::StructureFormat;
use crate::core::models::builder::AltLocPolicy;
use crate::core::models::structure::Structure;

/// Options that influence how a reader assembles the structure hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    pub alt_loc_policy: AltLocPolicy,
}

impl ParseOptions {
    pub fn new(alt_loc_policy: AltLocPolicy) -> Self {
        Self { alt_loc_policy }
    }
}

/// Defines the interface shared by the structure file readers.
///
/// Readers are stateless: every call takes the complete input and returns either a
/// complete [`Structure`] or a [`ParseError`], never a partially built hierarchy.
pub trait StructureReader {
    /// The format this reader understands.
    const FORMAT: StructureFormat;

    /// Reads a structure from decoded text.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Malformed`] or [`ParseError::Truncated`] when the text does
    /// not follow the format's grammar.
    fn read_str(text: &str, options: &ParseOptions) -> Result<Structure, ParseError>;

    /// Reads a structure from raw bytes, which must be valid UTF-8.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Malformed`] for invalid UTF-8 and any error of
    /// [`read_str`](Self::read_str).
    fn read_bytes(data: &[u8], options: &ParseOptions) -> Result<Structure, ParseError> {
        let text = decode(data, Self::FORMAT)?;
        Self::read_str(text, options)
    }
}

/// Decodes input bytes as UTF-8, dropping a leading byte-order mark.
pub(crate) fn decode(data: &[u8], format: StructureFormat) -> Result<&str, ParseError> {
    let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
    std::str::from_utf8(data).map_err(|e| {
        let valid = &data[..e.valid_up_to()];
        let line = valid.iter().filter(|&&b| b == b'\n').count() + 1;
        ParseError::malformed(format.name(), line, "input is not valid UTF-8")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_strips_byte_order_mark() {
        let text = decode(b"\xEF\xBB\xBFEND\n", StructureFormat::Pdb).unwrap();
        assert_eq!(text, "END\n");
    }

    #[test]
    fn decode_reports_line_of_invalid_utf8() {
        let err = decode(b"REMARK\nREMARK\nATOM \xFF\n", StructureFormat::Pdb).unwrap_err();
        assert_eq!(err.code(), ParseError::MALFORMED);
        assert_eq!(err.line(), Some(3));
    }
}
