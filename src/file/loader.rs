//! Document loading for the command-line tool.
//!
//! This module reads JSON documents from files or stdin, transparently
//! decompressing gzip input, and builds the accessor the configuration asks for.

use crate::config::Config;
use crate::document::tree::{JPath, SharedJPath};
use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::Path;

/// An accessor built from a loaded document.
#[derive(Debug, Clone)]
pub enum LoadedDocument {
    /// Expands JSON-encoded strings on first descent
    Lazy(JPath),
    /// Fully expanded up front
    Shared(SharedJPath),
}

/// Reads a JSON document from the filesystem.
///
/// Files ending in `.gz` are decompressed first.
///
/// # Examples
///
/// ```no_run
/// use jpath::file::loader::read_source_file;
///
/// let source = read_source_file("event.json.gz").unwrap();
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The file path does not exist
/// - The file cannot be read (permissions, etc.)
/// - A `.gz` file is not valid gzip or does not decompress to UTF-8
pub fn read_source_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path_ref = path.as_ref();

    let is_gzipped = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    if is_gzipped {
        read_gzipped_file(path_ref)
    } else {
        fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read file {}", path_ref.display()))
    }
}

/// Reads a JSON document from standard input.
///
/// Gzip input is recognised by its magic bytes (0x1f 0x8b).
///
/// # Errors
///
/// Returns an error if reading stdin fails or the input is not UTF-8.
pub fn read_source_from_stdin() -> Result<String> {
    read_source_from_reader(std::io::stdin().lock())
}

/// Reads a JSON document from any reader, detecting gzip input.
pub fn read_source_from_reader<R: Read>(mut reader: R) -> Result<String> {
    let mut buffer = Vec::new();
    reader
        .read_to_end(&mut buffer)
        .context("Failed to read input")?;

    if buffer.starts_with(&[0x1f, 0x8b]) {
        decompress_gzip_bytes(&buffer)
    } else {
        String::from_utf8(buffer).context("Invalid UTF-8 in input")
    }
}

/// Builds the accessor selected by `config` over `source`.
///
/// # Errors
///
/// Returns an error if the separator is empty or `source` is not a JSON object.
pub fn build_document(source: &str, config: &Config) -> Result<LoadedDocument> {
    config.validate()?;
    let document = if config.eager {
        LoadedDocument::Shared(
            SharedJPath::with_separator(source, config.separator.as_str())
                .context("Failed to parse JSON")?,
        )
    } else {
        LoadedDocument::Lazy(
            JPath::with_separator(source, config.separator.as_str())
                .context("Failed to parse JSON")?,
        )
    };
    Ok(document)
}

/// Reads and builds an accessor for the file at `path`.
pub fn load_document<P: AsRef<Path>>(path: P, config: &Config) -> Result<LoadedDocument> {
    let source = read_source_file(path)?;
    build_document(&source, config)
}

/// Reads and decompresses a gzipped file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The file is not valid gzip format (corrupted)
/// - The decompressed content is not valid UTF-8
fn read_gzipped_file<P: AsRef<Path>>(path: P) -> Result<String> {
    use flate2::read::GzDecoder;

    let file = fs::File::open(path).context("Failed to open gzipped file")?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped file - file may be corrupted")?;
    Ok(content)
}

/// Decompresses gzip-encoded bytes to a UTF-8 string.
fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    use flate2::read::GzDecoder;

    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped input")?;
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::tree::Lookup;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn gzip(text: &str) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(text.as_bytes()).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_reader_plain_input() {
        let source = read_source_from_reader(&br#"{"a": 1}"#[..]).unwrap();
        assert_eq!(source, r#"{"a": 1}"#);
    }

    #[test]
    fn test_reader_gzip_input() {
        let bytes = gzip(r#"{"a": 1}"#);
        let source = read_source_from_reader(bytes.as_slice()).unwrap();
        assert_eq!(source, r#"{"a": 1}"#);
    }

    #[test]
    fn test_reader_rejects_invalid_utf8() {
        assert!(read_source_from_reader(&b"\xff\xfe\x00"[..]).is_err());
    }

    #[test]
    fn test_build_document_respects_config() {
        let source = r#"{"a": "{\"b\": 2}"}"#;

        let lazy = build_document(source, &Config::default()).unwrap();
        match lazy {
            LoadedDocument::Lazy(jpath) => assert_eq!(jpath.find_i64("a.b"), 2),
            LoadedDocument::Shared(_) => panic!("Expected lazy document"),
        }

        let config = Config {
            eager: true,
            separator: "/".to_string(),
            ..Config::default()
        };
        match build_document(source, &config).unwrap() {
            LoadedDocument::Shared(jpath) => assert_eq!(jpath.find_i64("a/b"), 2),
            LoadedDocument::Lazy(_) => panic!("Expected shared document"),
        }
    }

    #[test]
    fn test_build_document_rejects_empty_separator() {
        let config = Config {
            separator: String::new(),
            ..Config::default()
        };
        assert!(build_document("{}", &config).is_err());
    }
}
