use shaper_fs::{Error, NormalizedPath, io};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_write_atomic_creates_file() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("test.txt"));

    io::write_atomic(&path, b"hello world").unwrap();

    let content = fs::read_to_string(path.to_native()).unwrap();
    assert_eq!(content, "hello world");
}

#[test]
fn test_write_atomic_overwrites_existing() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("test.txt");
    fs::write(&file_path, "original").unwrap();

    let path = NormalizedPath::new(&file_path);
    io::write_atomic(&path, b"updated").unwrap();

    let content = fs::read_to_string(&file_path).unwrap();
    assert_eq!(content, "updated");
}

#[test]
fn test_write_atomic_creates_parent_directories() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("svc/conf/app.properties"));

    io::write_atomic(&path, b"port=8080").unwrap();

    assert!(temp.path().join("svc/conf").is_dir());
}

#[test]
fn test_write_atomic_refuses_directory_target() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("app.json")).unwrap();

    let path = NormalizedPath::new(temp.path().join("app.json"));
    let err = io::write_atomic(&path, b"{}").unwrap_err();

    assert!(matches!(err, Error::IsADirectory { .. }));
    assert!(err.is_conflict());
}

#[test]
fn test_write_atomic_blocked_by_file_parent() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("svc"), "i am a file").unwrap();

    let path = NormalizedPath::new(temp.path().join("svc/app.json"));
    let err = io::write_atomic(&path, b"{}").unwrap_err();

    assert!(matches!(err, Error::NotADirectory { .. }));
    assert!(err.is_conflict());
}

#[test]
fn test_read_text_existing_file() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("test.txt");
    fs::write(&file_path, "hello").unwrap();

    let path = NormalizedPath::new(&file_path);
    let content = io::read_text(&path).unwrap();
    assert_eq!(content, "hello");
}

#[test]
fn test_read_text_nonexistent_file() {
    let path = NormalizedPath::new("/nonexistent/file.txt");
    let result = io::read_text(&path);
    assert!(matches!(result, Err(Error::Io { .. })));
}

#[test]
fn test_write_text_creates_file() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("test.txt"));

    io::write_text(&path, "hello world").unwrap();

    let content = fs::read_to_string(path.to_native()).unwrap();
    assert_eq!(content, "hello world");
}
