//! Embed an arbitrary file as a PROGMEM byte array

use std::path::Path;

use log::info;

use crate::error::{PipelineError, Result};
use crate::export::{bytes_to_progmem, ExportError};
use crate::output::write_text;

/// Read `input` and write it to `output` as `const unsigned char <symbol>[]`.
///
/// Returns the number of bytes embedded.
pub fn run_file2h(input: &Path, output: &Path, symbol: &str) -> Result<usize> {
    if !input.is_file() {
        return Err(PipelineError::InputNotFound(input.to_path_buf()));
    }
    let data = std::fs::read(input).map_err(|source| PipelineError::Read { path: input.to_path_buf(), source })?;

    write_text(output, &bytes_to_progmem(&data, symbol)).map_err(ExportError::from)?;
    info!("Saved: {}", output.display());
    Ok(data.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::binary::DEFAULT_SYMBOL;

    #[test]
    fn test_run_file2h_writes_array() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("chime.wav");
        std::fs::write(&input, [0x52, 0x49, 0xFF]).unwrap();
        let output = dir.path().join("chime.h");

        assert_eq!(run_file2h(&input, &output, DEFAULT_SYMBOL).unwrap(), 3);
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "const unsigned char sound000[3] PROGMEM = {\n0x52, 0x49, 0xff\n};"
        );
    }

    #[test]
    fn test_run_file2h_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.h");
        let err = run_file2h(&dir.path().join("none.bin"), &output, "x").unwrap_err();
        assert!(matches!(err, PipelineError::InputNotFound(_)));
        assert!(!output.exists());
    }
}
