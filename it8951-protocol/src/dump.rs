//! Hex dump of word buffers for diagnostics

use core::fmt;

/// Formats a word buffer eight words per line, prefixed with the offset
/// of the first word
///
/// ```text
/// 00000000: ffff ffff ffff ffff ffff ffff ffff ffff
/// 00000008: 0000 0001
/// ```
pub struct HexDump<'a>(pub &'a [u16]);

impl fmt::Display for HexDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (line, chunk) in self.0.chunks(8).enumerate() {
            write!(f, "{:08x}:", line * 8)?;
            for word in chunk {
                write!(f, " {:04x}", word)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
