use std::fmt::Write;

const BYTES_PER_LINE: usize = 16;

/// Format bytes as lowercase hex pairs joined by `separator`.
pub fn format_hex(data: &[u8], separator: &str) -> String {
    let mut output = String::with_capacity(data.len() * (2 + separator.len()));
    for (i, byte) in data.iter().enumerate() {
        if i > 0 {
            output.push_str(separator);
        }
        // Writing into a String cannot fail.
        let _ = write!(output, "{byte:02x}");
    }
    output
}

/// Format binary data as hexadecimal dump lines
///
/// Each line follows the `hexdump -C` layout:
/// - 16 bytes per line
/// - Offset in hexadecimal, counted from `base_offset`
/// - Hex bytes with space separator, split into two groups of eight
/// - ASCII representation on the right
pub fn format_hex_dump(data: &[u8], base_offset: usize) -> Vec<String> {
    data.chunks(BYTES_PER_LINE)
        .enumerate()
        .map(|(line, chunk)| {
            let mut output = String::new();
            let _ = write!(output, "{:08x}  ", base_offset + line * BYTES_PER_LINE);

            for (i, byte) in chunk.iter().enumerate() {
                let _ = write!(output, "{byte:02x} ");
                if i == 7 {
                    output.push(' ');
                }
            }

            // Padding for incomplete lines
            for i in chunk.len()..BYTES_PER_LINE {
                output.push_str("   ");
                if i == 7 {
                    output.push(' ');
                }
            }

            output.push_str(" |");
            output.extend(chunk.iter().map(|&byte| {
                if byte.is_ascii_graphic() || byte == b' ' {
                    byte as char
                } else {
                    '.'
                }
            }));
            output.push('|');
            output
        })
        .collect()
}
