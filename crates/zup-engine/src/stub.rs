//! Stub executable template for platforms without invokable symlinks.
//!
//! On Windows the default pointer is a generated `zig.cmd` whose bytes
//! are a fixed-size template with a single embedded path field. The field
//! reserves `2 * 260` bytes (UTF-16 worst case for `MAX_PATH`); the target
//! directory is written right-aligned and the script strips the
//! leading-space padding before invoking `<target>\zig.exe`.
//!
//! Keeping every rendered stub the same length means a pointer update is
//! a plain file rewrite, and recognizing a stub is a byte comparison
//! outside the field.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;
use zup_core::error::{Error as CoreError, Result};

/// Reserved width of the embedded path field, in bytes.
pub const FIELD_LEN: usize = 520;

const MARKER: &[u8] = b"<ZUP_TARGET_PATH>";

/// Error type for stub template construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StubTemplateError {
    #[error("stub template is missing its target-path marker")]
    MissingMarker,

    #[error("stub template contains more than one target-path marker")]
    DuplicateMarker,

    #[error("stub template has no room for a {FIELD_LEN}-byte path field")]
    TruncatedField,
}

/// A validated stub template: raw bytes plus the path-field offset.
#[derive(Debug, Clone)]
pub struct StubTemplate {
    bytes: Vec<u8>,
    field_offset: usize,
}

impl StubTemplate {
    /// Validate template bytes: exactly one marker occurrence, with a
    /// full field's worth of room behind it.
    pub fn from_bytes(bytes: Vec<u8>) -> std::result::Result<Self, StubTemplateError> {
        let mut occurrences = bytes
            .windows(MARKER.len())
            .enumerate()
            .filter(|(_, window)| *window == MARKER)
            .map(|(offset, _)| offset);

        let field_offset = occurrences.next().ok_or(StubTemplateError::MissingMarker)?;
        if occurrences.next().is_some() {
            return Err(StubTemplateError::DuplicateMarker);
        }
        if bytes.len() < field_offset + FIELD_LEN {
            return Err(StubTemplateError::TruncatedField);
        }

        Ok(Self {
            bytes,
            field_offset,
        })
    }

    /// The built-in `zig.cmd` template, validated once.
    pub fn builtin() -> &'static StubTemplate {
        static BUILTIN: OnceLock<StubTemplate> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            StubTemplate::from_bytes(builtin_bytes()).expect("builtin stub template is well-formed")
        })
    }

    /// Total length of the template and of every rendered stub.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Render stub bytes pointing at `target`.
    ///
    /// The target is written right-aligned in the field so the script's
    /// delimiter handling strips the padding. Fails with `PathTooLong`
    /// when the target does not fit the field.
    pub fn render(&self, target: &Path) -> Result<Vec<u8>> {
        let text = target.to_string_lossy();
        let path_bytes = text.as_bytes();
        if path_bytes.len() > FIELD_LEN {
            return Err(CoreError::PathTooLong {
                path: target.to_path_buf(),
                limit: FIELD_LEN,
            });
        }

        let mut out = self.bytes.clone();
        let field = &mut out[self.field_offset..self.field_offset + FIELD_LEN];
        field.fill(b' ');
        field[FIELD_LEN - path_bytes.len()..].copy_from_slice(path_bytes);
        Ok(out)
    }

    /// Read the target back out of stub bytes.
    ///
    /// Returns `None` when the bytes are not a rendering of this template
    /// (wrong length, or any byte outside the field differs).
    pub fn extract_target(&self, bytes: &[u8]) -> Option<PathBuf> {
        if bytes.len() != self.bytes.len() {
            return None;
        }
        let field_end = self.field_offset + FIELD_LEN;
        if bytes[..self.field_offset] != self.bytes[..self.field_offset]
            || bytes[field_end..] != self.bytes[field_end..]
        {
            return None;
        }

        let field = std::str::from_utf8(&bytes[self.field_offset..field_end]).ok()?;
        let target = field.trim_start_matches(' ');
        if target.is_empty() {
            return None;
        }
        Some(PathBuf::from(target))
    }
}

fn builtin_bytes() -> Vec<u8> {
    let mut t = Vec::with_capacity(256 + FIELD_LEN);
    t.extend_from_slice(b"@echo off\r\n");
    t.extend_from_slice(b"rem zup default compiler stub\r\n");
    t.extend_from_slice(b"setlocal\r\n");
    t.extend_from_slice(b"set \"ZUP_TARGET_DIR=");
    let mut field = vec![b' '; FIELD_LEN];
    field[..MARKER.len()].copy_from_slice(MARKER);
    t.extend_from_slice(&field);
    t.extend_from_slice(b"\"\r\n");
    t.extend_from_slice(
        b"for /f \"tokens=* delims= \" %%I in (\"%ZUP_TARGET_DIR%\") do set \"ZUP_TARGET_DIR=%%I\"\r\n",
    );
    t.extend_from_slice(b"\"%ZUP_TARGET_DIR%\\zig.exe\" %*\r\n");
    t.extend_from_slice(b"exit /b %ERRORLEVEL%\r\n");
    t
}
