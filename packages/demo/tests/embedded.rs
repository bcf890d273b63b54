use std::io::{self, Read};

use embedfs_core::{walk, FileSystem, WalkControl};

#[test]
fn test_embedded_bytes_match_sources() {
    let vfs = embedfs_demo::assets().unwrap();
    assert_eq!(
        vfs.read_file("/app/index.html").unwrap(),
        include_bytes!("../assets/index.html")
    );

    let mut css = String::new();
    vfs.open("/app/css/site.css")
        .unwrap()
        .read_to_string(&mut css)
        .unwrap();
    assert_eq!(css, include_str!("../assets/css/site.css"));
}

#[test]
fn test_embedded_directory_stat() {
    let vfs = embedfs_demo::assets().unwrap();
    let info = vfs.stat("/app/css").unwrap();
    assert!(info.is_dir);
    assert_eq!(info.name, "css");

    let err = vfs.read_file("/app/css").unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::IsADirectory);
}

#[test]
fn test_excluded_file_is_not_listed() {
    let vfs = embedfs_demo::assets().unwrap();
    let names: Vec<String> = vfs
        .read_dir("/app")
        .unwrap()
        .into_iter()
        .map(|info| info.name)
        .collect();
    assert_eq!(names, vec!["css", "index.html"]);
    assert!(vfs.mount("/app").unwrap().node("/app/notes.tmp").is_none());
}

#[test]
fn test_excluded_file_falls_back_to_disk() {
    let vfs = embedfs_demo::assets().unwrap();
    let bytes = vfs.read_file("/app/notes.tmp").unwrap();
    assert_eq!(bytes, include_bytes!("../assets/notes.tmp"));
}

#[test]
fn test_walk_covers_embedded_tree() {
    let vfs = embedfs_demo::assets().unwrap();
    let mut seen = Vec::new();
    walk(&vfs, "/app", |path, _| {
        seen.push(path.to_string());
        Ok(WalkControl::Continue)
    })
    .unwrap();
    assert_eq!(
        seen,
        vec!["/app", "/app/css", "/app/css/site.css", "/app/index.html"]
    );
}

#[test]
#[should_panic(expected = "not registered")]
fn test_register_without_mount_panics() {
    // A fresh Vfs has no /app mount.
    let mut vfs = embedfs_core::Vfs::new();
    let _ = embedfs_demo::register_into(&mut vfs);
}
