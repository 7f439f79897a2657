use std::fs;
use std::path::Path;

use kpak::{
    EmptyFilePolicy, ErrorKind, PakArchive, PakEntry, PakExtractor, PakImporter, load_archive,
    store_archive,
};
use tempfile::TempDir;

fn write_file(root: &Path, relative: &str, contents: &[u8]) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[tokio::test]
async fn duplicate_names_extract_first_entry_only() {
    let dest = TempDir::new().unwrap();
    let archive = PakArchive::from(vec![
        PakEntry::new("dup.txt", b"first".to_vec()),
        PakEntry::new("dup.txt", b"second".to_vec()),
    ]);

    let summary = PakExtractor::new(dest.path()).extract(&archive).await.unwrap();

    assert_eq!(summary.written, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(fs::read(dest.path().join("dup.txt")).unwrap(), b"first");
    assert_eq!(fs::read_dir(dest.path()).unwrap().count(), 1);
}

#[tokio::test]
async fn extraction_creates_directories_and_keeps_existing_files() {
    let dest = TempDir::new().unwrap();
    write_file(dest.path(), "keep.txt", b"original");

    let archive = PakArchive::from(vec![
        PakEntry::new("keep.txt", b"replacement".to_vec()),
        PakEntry::new("nested/deeper/file.bin", vec![1u8, 2, 3]),
    ]);
    let summary = PakExtractor::new(dest.path()).extract(&archive).await.unwrap();

    assert_eq!(summary.written, 1);
    assert_eq!(fs::read(dest.path().join("keep.txt")).unwrap(), b"original");
    assert_eq!(
        fs::read(dest.path().join("nested/deeper/file.bin")).unwrap(),
        vec![1u8, 2, 3]
    );
}

#[tokio::test]
async fn extraction_rejects_names_outside_root() {
    let dest = TempDir::new().unwrap();
    let archive = PakArchive::from(vec![
        PakEntry::new("first.txt", b"safe".to_vec()),
        PakEntry::new("../escape.txt", b"x".to_vec()),
    ]);

    let err = PakExtractor::new(dest.path()).extract(&archive).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
    assert!(!dest.path().parent().unwrap().join("escape.txt").exists());
    assert!(!dest.path().join("first.txt").exists());
    assert_eq!(fs::read_dir(dest.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn empty_name_is_skipped_like_an_existing_file() {
    let work = TempDir::new().unwrap();
    let out = work.path().join("out");
    let archive = PakArchive::from(vec![
        PakEntry::new("", b"x".to_vec()),
        PakEntry::new("real.txt", b"data".to_vec()),
    ]);

    let summary = PakExtractor::new(&out).extract(&archive).await.unwrap();

    assert_eq!(summary.written, 1);
    assert_eq!(summary.skipped, 1);
    assert!(out.is_dir());
    assert_eq!(fs::read(out.join("real.txt")).unwrap(), b"data");
}

#[tokio::test]
async fn import_builds_sorted_relative_entries() {
    let src = TempDir::new().unwrap();
    write_file(src.path(), "b.txt", b"bee");
    write_file(src.path(), "a/z.bin", &[9, 9]);
    write_file(src.path(), "a/c.txt", b"sea");

    let mut archive = PakArchive::new();
    archive.push(PakEntry::new("existing", b"kept".to_vec()));
    let added = PakImporter::new()
        .import(src.path(), &mut archive)
        .await
        .unwrap();

    assert_eq!(added, 3);
    let names: Vec<_> = archive.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["existing", "a/c.txt", "a/z.bin", "b.txt"]);
    assert_eq!(archive.find("a/z.bin").unwrap().data, vec![9u8, 9]);
}

#[tokio::test]
async fn import_rejects_long_paths() {
    let src = TempDir::new().unwrap();
    let long = format!("dir/{}", "n".repeat(52));
    write_file(src.path(), &long, b"data");

    let err = PakImporter::new()
        .read_entries(src.path())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PathLength);
}

#[tokio::test]
async fn import_accepts_longest_path() {
    let src = TempDir::new().unwrap();
    let longest = format!("dir/{}", "n".repeat(51));
    write_file(src.path(), &longest, b"data");

    let entries = PakImporter::new().read_entries(src.path()).await.unwrap();
    assert_eq!(entries[0].name.len(), 55);
}

#[tokio::test]
async fn empty_files_follow_policy() {
    let src = TempDir::new().unwrap();
    write_file(src.path(), "empty.txt", b"");

    let err = PakImporter::new()
        .read_entries(src.path())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyRead);

    let entries = PakImporter::new()
        .empty_files(EmptyFilePolicy::Include)
        .read_entries(src.path())
        .await
        .unwrap();
    assert_eq!(entries, vec![PakEntry::new("empty.txt", Vec::<u8>::new())]);
}

#[tokio::test]
async fn import_requires_a_directory() {
    let src = TempDir::new().unwrap();
    write_file(src.path(), "file.txt", b"x");

    let err = PakImporter::new()
        .read_entries(&src.path().join("file.txt"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);

    let err = PakImporter::new()
        .read_entries(&src.path().join("missing"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[tokio::test]
async fn pack_then_extract_reproduces_tree() {
    let work = TempDir::new().unwrap();
    let src = work.path().join("assets");
    write_file(&src, "font/DejaVuSans.ttf", b"font bytes");
    write_file(&src, "sfx/click.wav", &[0x52, 0x49, 0x46, 0x46]);

    let mut archive = PakArchive::new();
    PakImporter::new().import(&src, &mut archive).await.unwrap();

    let pak = work.path().join("assets.pak");
    let written = store_archive(&pak, &archive).await.unwrap();
    assert_eq!(written, fs::metadata(&pak).unwrap().len());

    let loaded = load_archive(&pak).await.unwrap();
    assert_eq!(loaded, archive);

    let out = work.path().join("out");
    PakExtractor::new(&out).extract(&loaded).await.unwrap();
    assert_eq!(
        fs::read(out.join("font/DejaVuSans.ttf")).unwrap(),
        b"font bytes"
    );
    assert_eq!(
        fs::read(out.join("sfx/click.wav")).unwrap(),
        vec![0x52u8, 0x49, 0x46, 0x46]
    );
}

#[tokio::test]
async fn empty_archive_file_is_rejected() {
    let work = TempDir::new().unwrap();
    let pak = work.path().join("empty.pak");
    fs::write(&pak, b"").unwrap();

    let err = load_archive(&pak).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[tokio::test]
async fn store_fails_before_touching_disk_on_bad_names() {
    let work = TempDir::new().unwrap();
    let pak = work.path().join("bad.pak");
    let archive = PakArchive::from(vec![PakEntry::new("n".repeat(56), b"x".to_vec())]);

    let err = store_archive(&pak, &archive).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Encoding);
    assert!(!pak.exists());
}
