//! Raw file to PROGMEM byte array.

/// Symbol used when none is given.
pub const DEFAULT_SYMBOL: &str = "sound000";

/// Bytes per output line.
const BYTES_PER_LINE: usize = 16;

/// Format `data` as `const unsigned char <symbol>[N] PROGMEM = {...};`.
///
/// Bytes are lowercase hex, sixteen per line. The text has no trailing
/// newline.
pub fn bytes_to_progmem(data: &[u8], symbol: &str) -> String {
    let body = data
        .chunks(BYTES_PER_LINE)
        .map(|chunk| chunk.iter().map(|b| format!("0x{:02x}", b)).collect::<Vec<_>>().join(", "))
        .collect::<Vec<_>>()
        .join(",\n");
    format!("const unsigned char {}[{}] PROGMEM = {{\n{}\n}};", symbol, data.len(), body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_input() {
        assert_eq!(
            bytes_to_progmem(&[0x00, 0xAB, 0x10], DEFAULT_SYMBOL),
            "const unsigned char sound000[3] PROGMEM = {\n0x00, 0xab, 0x10\n};"
        );
    }

    #[test]
    fn test_line_breaks_every_sixteen() {
        let data: Vec<u8> = (0..17).collect();
        let text = bytes_to_progmem(&data, "blob");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "const unsigned char blob[17] PROGMEM = {");
        assert!(lines[1].starts_with("0x00, 0x01"));
        assert!(lines[1].ends_with("0x0f,"));
        assert_eq!(lines[2], "0x10");
        assert_eq!(lines[3], "};");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(bytes_to_progmem(&[], "x"), "const unsigned char x[0] PROGMEM = {\n\n};");
    }
}
