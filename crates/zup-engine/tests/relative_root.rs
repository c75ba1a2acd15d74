//! A relative install root must still yield pointers the OS can follow:
//! symlink targets are stored absolute, so they resolve the same from any
//! directory. Runs alone in this file because it changes the process cwd.

#![cfg(unix)]

use zup_engine::{DefaultPointer, InstallRoot, MasterPointer, PointerMechanism};

#[test]
fn test_relative_root_pointers_resolve_from_the_invocation_dir() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(temp.path().join("zigroot").join("0.11.0").join("files")).unwrap();
    std::env::set_current_dir(temp.path()).unwrap();

    let root = InstallRoot::new("zigroot");
    let pointer = DefaultPointer::at_default_location(&root, PointerMechanism::Symlink);
    assert!(pointer.update(&root.files_dir("0.11.0")).unwrap());

    let stored = std::fs::read_link(pointer.path()).unwrap();
    assert!(stored.is_absolute());
    // metadata follows the link; a dangling pointer errors here
    assert!(std::fs::metadata(pointer.path()).is_ok());
    assert_eq!(
        pointer.default_version(&root).unwrap(),
        Some("0.11.0".to_string())
    );

    let master = MasterPointer::new(&root, PointerMechanism::Symlink);
    assert!(master.update("0.11.0").unwrap());

    let stored = std::fs::read_link(master.path()).unwrap();
    assert!(stored.is_absolute());
    assert!(std::fs::metadata(master.path()).is_ok());
    assert_eq!(master.target_version().unwrap(), Some("0.11.0".to_string()));
}
