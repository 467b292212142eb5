/*!
Routines for rendering raw bytes from format strings and parser input in
error messages.
*/

/// Renders a single byte as ASCII when it's printable, and as a `\xNN`
/// escape otherwise.
#[derive(Clone, Copy)]
pub(crate) struct Byte(pub(crate) u8);

impl core::fmt::Display for Byte {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self.0 {
            b' ' => f.write_str(" "),
            b'\t' => f.write_str("\\t"),
            b'\n' => f.write_str("\\n"),
            b'\r' => f.write_str("\\r"),
            b if b.is_ascii_graphic() => {
                write!(f, "{}", char::from(b))
            }
            b => write!(f, "\\x{b:02X}"),
        }
    }
}

impl core::fmt::Debug for Byte {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "\"{self}\"")
    }
}

/// Renders a byte slice that is presumed to be mostly UTF-8. Invalid bytes
/// are rendered as `\xNN` escapes.
pub(crate) struct Bytes<'a>(pub(crate) &'a [u8]);

impl<'a> core::fmt::Display for Bytes<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut bytes = self.0;
        while !bytes.is_empty() {
            match core::str::from_utf8(bytes) {
                Ok(s) => return write!(f, "{}", s.escape_debug()),
                Err(err) => {
                    let (valid, rest) = bytes.split_at(err.valid_up_to());
                    // OK because `valid_up_to` promises valid UTF-8.
                    let valid = core::str::from_utf8(valid)
                        .map_err(|_| core::fmt::Error)?;
                    write!(f, "{}", valid.escape_debug())?;
                    let bad = err.error_len().unwrap_or(rest.len());
                    for &b in &rest[..bad] {
                        write!(f, "\\x{b:02X}")?;
                    }
                    bytes = &rest[bad..];
                }
            }
        }
        Ok(())
    }
}

impl<'a> core::fmt::Debug for Bytes<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "\"{self}\"")
    }
}
