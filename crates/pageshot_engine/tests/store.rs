use std::fs;

use pageshot_engine::{ensure_images_dir, ArtifactStore, StoreError};
use tempfile::TempDir;
use tokio::io::AsyncReadExt;

fn store_with(files: &[(&str, &[u8])]) -> (TempDir, ArtifactStore) {
    let temp = TempDir::new().unwrap();
    for (name, content) in files {
        fs::write(temp.path().join(name), content).unwrap();
    }
    let store = ArtifactStore::new(temp.path().to_path_buf());
    (temp, store)
}

#[test]
fn creates_missing_images_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("nested").join("images");
    assert!(!new_dir.exists());
    ensure_images_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
    // Idempotent.
    ensure_images_dir(&new_dir).unwrap();
}

#[test]
fn images_dir_must_be_a_directory() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();
    assert!(matches!(
        ensure_images_dir(&file_path),
        Err(StoreError::ImagesDir(_))
    ));
}

#[tokio::test]
async fn list_only_reports_prefixed_files() {
    let (temp, store) = store_with(&[
        ("pageshot-b.png", b"b"),
        ("pageshot-a.jpg", b"a"),
        ("other.png", b"x"),
    ]);
    fs::create_dir(temp.path().join("pageshot-dir")).unwrap();

    assert_eq!(store.list().await.unwrap(), vec!["a.jpg", "b.png"]);
}

#[tokio::test]
async fn list_fails_when_directory_is_gone() {
    let temp = TempDir::new().unwrap();
    let store = ArtifactStore::new(temp.path().join("missing"));
    assert!(matches!(
        store.list().await,
        Err(StoreError::DirectoryRead(_))
    ));
}

#[tokio::test]
async fn open_reports_size_and_content_type() {
    let (_temp, store) = store_with(&[("pageshot-x.jpg", b"jpeg bytes")]);

    let mut artifact = store.open("x.jpg").await.unwrap();
    assert_eq!(artifact.len, 10);
    assert_eq!(artifact.content_type, "image/jpeg");

    let mut content = Vec::new();
    artifact.file.read_to_end(&mut content).await.unwrap();
    assert_eq!(content, b"jpeg bytes");
}

#[tokio::test]
async fn open_and_delete_missing_are_not_found() {
    let (_temp, store) = store_with(&[]);
    assert!(matches!(store.open("xyz").await, Err(StoreError::NotFound(id)) if id == "xyz"));
    assert!(matches!(store.delete("xyz").await, Err(StoreError::NotFound(_))));
}

#[tokio::test]
async fn traversal_ids_are_not_found() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("secret"), "s").unwrap();
    let images = temp.path().join("images");
    fs::create_dir(&images).unwrap();
    let store = ArtifactStore::new(images);

    assert!(matches!(store.open("../secret").await, Err(StoreError::NotFound(_))));
    assert!(matches!(store.delete("../secret").await, Err(StoreError::NotFound(_))));
    assert!(temp.path().join("secret").exists());
}

#[tokio::test]
async fn delete_removes_file() {
    let (temp, store) = store_with(&[("pageshot-x.png", b"png")]);
    store.delete("x.png").await.unwrap();
    assert!(!temp.path().join("pageshot-x.png").exists());
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn promote_moves_matching_files_and_staging_is_hidden() {
    let (temp, store) = store_with(&[]);
    let staging = store.staging_dir().unwrap();
    fs::write(staging.path().join("pageshot-job-1.png"), "1").unwrap();
    fs::write(staging.path().join("pageshot-job-2.png"), "2").unwrap();
    fs::write(staging.path().join("stray.log"), "log").unwrap();

    // Staging directory is never listed.
    assert!(store.list().await.unwrap().is_empty());

    let promoted = store.promote(staging.path(), "pageshot-job").await.unwrap();
    assert_eq!(promoted, vec!["job-1.png", "job-2.png"]);
    assert_eq!(store.list().await.unwrap(), vec!["job-1.png", "job-2.png"]);

    let staging_path = staging.path().to_path_buf();
    drop(staging);
    assert!(!staging_path.exists());
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 2);
}

#[test]
fn stale_staging_directories_are_swept() {
    let (temp, _store) = store_with(&[("pageshot-keep.png", b"png")]);
    let stale = temp.path().join(".staging-crashed");
    fs::create_dir(&stale).unwrap();
    fs::write(stale.join("pageshot-half.png"), "partial").unwrap();
    fs::create_dir(temp.path().join("unrelated")).unwrap();

    ensure_images_dir(temp.path()).unwrap();

    assert!(!stale.exists());
    assert!(temp.path().join("pageshot-keep.png").exists());
    assert!(temp.path().join("unrelated").is_dir());
}

#[cfg(unix)]
#[tokio::test]
async fn failed_promotion_withdraws_moved_files() {
    let (temp, store) = store_with(&[]);
    let staging = store.staging_dir().unwrap();
    fs::write(staging.path().join("pageshot-job-1.png"), "1").unwrap();
    fs::write(staging.path().join("pageshot-job-2.png"), "2").unwrap();
    // A non-empty directory in the way makes the second rename fail.
    let blocker = temp.path().join("pageshot-job-2.png");
    fs::create_dir(&blocker).unwrap();
    fs::write(blocker.join("inside"), "x").unwrap();

    let result = store.promote(staging.path(), "pageshot-job").await;

    assert!(matches!(result, Err(StoreError::Io(_))));
    assert!(!temp.path().join("pageshot-job-1.png").exists());
    assert!(store.list().await.unwrap().is_empty());
    assert!(staging.path().join("pageshot-job-1.png").exists());
}
