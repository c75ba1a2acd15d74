//! End-to-end lifecycle: install several versions, activate one, track
//! master, then clean and verify only unprotected versions disappear.

use std::io::{Read, Write};
use std::net::TcpListener;
use zup_engine::{
    clean_all, clean_one, fetch, install, keep, DefaultPointer, IndexClient, InstallOptions,
    InstallRoot, MasterPointer, PointerMechanism, ProtectReason,
};

const LINUX_X64: zup_engine::Platform = zup_engine::Platform {
    os: zup_engine::Os::Linux,
    arch: zup_engine::Arch::X86_64,
};

fn quiet_options() -> InstallOptions {
    InstallOptions {
        timeout: 10,
        show_progress: false,
    }
}

/// Serve one HTTP 200 response with `body`, then shut down.
fn serve_once(body: Vec<u8>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        if let Ok((mut socket, _)) = listener.accept() {
            let mut request = [0u8; 2048];
            let _ = socket.read(&mut request);
            let header = format!(
                "HTTP/1.1 200 OK\r\ncontent-length: {}\r\nconnection: close\r\n\r\n",
                body.len()
            );
            let _ = socket.write_all(header.as_bytes());
            let _ = socket.write_all(&body);
        }
    });
    format!("http://{addr}")
}

fn fixture_archive(version: &str) -> Vec<u8> {
    let xz = xz2::write::XzEncoder::new(Vec::new(), 6);
    let mut builder = tar::Builder::new(xz);
    let mut header = tar::Header::new_gnu();
    let contents = b"#!/bin/sh\necho zig\n";
    header.set_size(contents.len() as u64);
    header.set_mode(0o755);
    header.set_cksum();
    builder
        .append_data(
            &mut header,
            format!("zig-linux-x86_64-{version}/zig"),
            &contents[..],
        )
        .unwrap();
    builder.into_inner().unwrap().finish().unwrap()
}

async fn install_fixture(root: &InstallRoot, version: &str) {
    let base = serve_once(fixture_archive(version));
    let url = format!("{base}/zig-linux-x86_64-{version}.tar.xz");
    install(root, version, &url, &quiet_options()).await.unwrap();
}

#[tokio::test]
async fn clean_all_spares_default_master_and_kept() {
    let temp = tempfile::tempdir().unwrap();
    let root = InstallRoot::new(temp.path());
    let mechanism = if cfg!(windows) {
        PointerMechanism::Stub
    } else {
        PointerMechanism::Symlink
    };

    // Three installed versions: one stale, one default, one master.
    install_fixture(&root, "0.10.0").await;
    install_fixture(&root, "0.11.0").await;

    let tarball_base = serve_once(fixture_archive("0.12.0-dev.1"));
    let tarball_url = format!("{tarball_base}/zig-linux-x86_64-0.12.0-dev.1.tar.xz");
    let index_body = format!(
        r#"{{"master":{{"version":"0.12.0-dev.1","x86_64-linux":{{"tarball":"{tarball_url}"}}}}}}"#
    );
    let index_url = format!("{}/index.json", serve_once(index_body.into_bytes()));
    let index = IndexClient::new(index_url, 10).unwrap();
    fetch(&root, mechanism, &index, LINUX_X64, "master", &quiet_options())
        .await
        .unwrap();

    let default_pointer = DefaultPointer::at_default_location(&root, mechanism);
    default_pointer.update(&root.files_dir("0.11.0")).unwrap();
    let master = MasterPointer::new(&root, mechanism);

    let report = clean_all(&root, &default_pointer, &master).unwrap();

    assert_eq!(report.removed, vec!["0.10.0".to_string()]);
    assert_eq!(
        report.kept,
        vec![
            ("0.11.0".to_string(), ProtectReason::Default),
            ("0.12.0-dev.1".to_string(), ProtectReason::Master),
        ]
    );
    assert!(!root.is_installed("0.10.0"));
    assert!(root.is_installed("0.11.0"));
    assert!(root.is_installed("0.12.0-dev.1"));

    // Pointers are untouched by the cleanup.
    assert_eq!(
        default_pointer.default_version(&root).unwrap(),
        Some("0.11.0".to_string())
    );
    assert_eq!(
        master.target_version().unwrap(),
        Some("0.12.0-dev.1".to_string())
    );
}

#[tokio::test]
async fn clean_one_refuses_the_default_and_leaves_it_on_disk() {
    let temp = tempfile::tempdir().unwrap();
    let root = InstallRoot::new(temp.path());
    let mechanism = PointerMechanism::Stub;

    install_fixture(&root, "0.11.0").await;
    let default_pointer = DefaultPointer::at_default_location(&root, mechanism);
    default_pointer.update(&root.files_dir("0.11.0")).unwrap();
    let master = MasterPointer::new(&root, mechanism);

    let err = clean_one(&root, &default_pointer, &master, "0.11.0").unwrap_err();
    assert_eq!(
        err.to_string(),
        "refusing to remove '0.11.0' (is default compiler)"
    );
    assert!(root.is_installed("0.11.0"));
    assert!(root.files_dir("0.11.0").join("zig").is_file());
}

#[tokio::test]
async fn kept_versions_survive_repeated_cleans() {
    let temp = tempfile::tempdir().unwrap();
    let root = InstallRoot::new(temp.path());
    let mechanism = PointerMechanism::Stub;

    install_fixture(&root, "0.10.0").await;
    keep(&root, "0.10.0").unwrap();

    let default_pointer = DefaultPointer::at_default_location(&root, mechanism);
    let master = MasterPointer::new(&root, mechanism);

    for _ in 0..2 {
        let report = clean_all(&root, &default_pointer, &master).unwrap();
        assert!(report.removed.is_empty());
        assert_eq!(report.kept, vec![("0.10.0".to_string(), ProtectReason::Keep)]);
    }
    assert!(root.is_installed("0.10.0"));
}
