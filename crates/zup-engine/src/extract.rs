//! Archive extraction.
//!
//! Dispatches on the archive file name: tar.xz and tar.gz for the Unix
//! distributions, zip for Windows. Extraction targets the staging
//! directory only, so a failure here never leaves partial content at a
//! canonical path.

use flate2::read::GzDecoder;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tar::Archive;
use tracing::debug;
use xz2::read::XzDecoder;
use zup_core::error::{Error, Result};

/// Extract `archive` into `dest`, dispatching by extension.
pub fn extract_archive(archive: &Path, dest: &Path) -> Result<()> {
    let name = archive
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    debug!("Extracting {} to {}", archive.display(), dest.display());

    if name.ends_with(".tar.xz") || name.ends_with(".txz") {
        extract_tar(archive, dest, Compression::Xz)
    } else if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
        extract_tar(archive, dest, Compression::Gz)
    } else if name.ends_with(".zip") {
        extract_zip(archive, dest)
    } else {
        Err(Error::UnsupportedArchive {
            name: name.to_string(),
        })
    }
}

enum Compression {
    Xz,
    Gz,
}

fn extract_tar(archive_path: &Path, dest: &Path, compression: Compression) -> Result<()> {
    let file = File::open(archive_path)
        .map_err(|e| Error::io("failed to open archive", archive_path, e))?;
    let reader = BufReader::new(file);

    match compression {
        Compression::Xz => Archive::new(XzDecoder::new(reader))
            .unpack(dest)
            .map_err(|e| Error::io("failed to extract archive", archive_path, e))?,
        Compression::Gz => Archive::new(GzDecoder::new(reader))
            .unpack(dest)
            .map_err(|e| Error::io("failed to extract archive", archive_path, e))?,
    }
    Ok(())
}

fn extract_zip(archive_path: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive_path)
        .map_err(|e| Error::io("failed to open archive", archive_path, e))?;

    let mut archive = zip::ZipArchive::new(file).map_err(|e| {
        Error::io(
            "failed to read zip archive",
            archive_path,
            std::io::Error::other(e),
        )
    })?;
    archive.extract(dest).map_err(|e| {
        Error::io(
            "failed to extract zip archive",
            archive_path,
            std::io::Error::other(e),
        )
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_unknown_extension_is_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let archive = temp.path().join("zig-linux-x86_64-0.11.0.rar");
        std::fs::write(&archive, b"not an archive").unwrap();

        let err = extract_archive(&archive, temp.path()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedArchive { ref name }
            if name == "zig-linux-x86_64-0.11.0.rar"));
    }

    #[test]
    fn test_tar_xz_roundtrip() {
        let temp = tempfile::tempdir().unwrap();
        let archive = temp.path().join("zig-linux-x86_64-0.11.0.tar.xz");

        // Build a small archive: zig-linux-x86_64-0.11.0/zig
        let file = File::create(&archive).unwrap();
        let xz = xz2::write::XzEncoder::new(file, 6);
        let mut builder = tar::Builder::new(xz);
        let mut header = tar::Header::new_gnu();
        let contents = b"#!/bin/sh\necho zig\n";
        header.set_size(contents.len() as u64);
        header.set_mode(0o755);
        header.set_cksum();
        builder
            .append_data(&mut header, "zig-linux-x86_64-0.11.0/zig", &contents[..])
            .unwrap();
        builder.into_inner().unwrap().finish().unwrap();

        let dest = temp.path().join("out");
        std::fs::create_dir_all(&dest).unwrap();
        extract_archive(&archive, &dest).unwrap();
        assert!(dest.join("zig-linux-x86_64-0.11.0").join("zig").is_file());
    }

    #[test]
    fn test_zip_roundtrip() {
        let temp = tempfile::tempdir().unwrap();
        let archive = temp.path().join("zig-windows-x86_64-0.11.0.zip");

        let file = File::create(&archive).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        writer
            .add_directory("zig-windows-x86_64-0.11.0/", Default::default())
            .unwrap();
        writer
            .start_file("zig-windows-x86_64-0.11.0/zig.exe", Default::default())
            .unwrap();
        writer.write_all(b"MZ fake").unwrap();
        writer.finish().unwrap();

        let dest = temp.path().join("out");
        std::fs::create_dir_all(&dest).unwrap();
        extract_archive(&archive, &dest).unwrap();
        assert!(dest
            .join("zig-windows-x86_64-0.11.0")
            .join("zig.exe")
            .is_file());
    }
}
