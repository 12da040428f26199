use std::fs;

use tempfile::tempdir;
use tidysic::adapters::tag_reader::is_readable_audio;
use tidysic::{LoftyTagReader, TagReader};

#[test]
fn test_audio_detection_by_extension() {
    let dir = tempdir().unwrap();
    for name in ["a.mp3", "b.wav", "c.flac", "d.ogg"] {
        let path = dir.path().join(name);
        fs::write(&path, b"data").unwrap();
        assert!(is_readable_audio(&path), "{} should be audio", name);
    }

    for name in ["a.MP3", "b.m4a", "c.txt", "d"] {
        let path = dir.path().join(name);
        fs::write(&path, b"data").unwrap();
        assert!(!is_readable_audio(&path), "{} should be clutter", name);
    }

    // Directories never qualify, whatever they are called.
    let dir_path = dir.path().join("folder.mp3");
    fs::create_dir(&dir_path).unwrap();
    assert!(!is_readable_audio(&dir_path));
}

#[test]
fn test_unparseable_audio_yields_an_empty_bag() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("garbage.mp3");
    fs::write(&path, b"not actually an mp3").unwrap();

    let tags = LoftyTagReader.read_tags(&path).unwrap();
    assert!(tags.is_empty());
}

#[test]
fn test_missing_file_is_a_fatal_read_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.mp3");
    assert!(LoftyTagReader.read_tags(&missing).is_err());
}
