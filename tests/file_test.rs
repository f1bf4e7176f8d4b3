#![allow(missing_docs)]

use fieldwise::{
    deserialize_new, serialize, Archive, ArchiveInspector, ArchiveOptions, EntryKind, Fieldwise,
    FieldwiseError, JsonArchive, Serializable,
};
use std::error::Error;
use tempfile::NamedTempFile;

#[derive(Debug, Default, Clone, PartialEq, Serializable)]
struct SimpleData {
    id: u32,
    message: String,
}

#[derive(Debug, Default, Clone, PartialEq, Serializable)]
struct ComplexData {
    title: String,
    inner: SimpleData,
    ratio: f64,
}

fn create_complex_data() -> ComplexData {
    ComplexData {
        title: "Integration Test".to_string(),
        inner: SimpleData {
            id: 42,
            message: "Hello World".to_string(),
        },
        ratio: 0.5,
    }
}

/// `save_to_file` then `load_from_file` on a fresh archive.
#[test]
fn test_archive_file_round_trip() -> fieldwise::Result<()> {
    let dir = tempfile::tempdir()?;
    let file_path = dir.path().join("complex.json");
    let data = create_complex_data();

    let archive: JsonArchive = serialize(&data)?;
    archive.save_to_file(&file_path)?;

    let mut fresh = JsonArchive::new();
    fresh.load_from_file(&file_path)?;
    assert_eq!(fresh, archive);

    let loaded: ComplexData = deserialize_new(&fresh)?;
    assert_eq!(loaded, data);
    Ok(())
}

/// `Fieldwise::save` / `Fieldwise::load`
#[test]
fn test_facade_file_round_trip() -> fieldwise::Result<()> {
    let file = NamedTempFile::new()?;
    let data = create_complex_data();

    Fieldwise::save(file.path(), &data)?;

    let text = std::fs::read_to_string(file.path())?;
    assert_eq!(
        text,
        r#"{"inner":{"id":42,"message":"Hello World"},"ratio":0.5,"title":"Integration Test"}"#
    );

    let loaded: ComplexData = Fieldwise::load(file.path())?;
    assert_eq!(loaded, data);
    Ok(())
}

#[test]
fn test_pretty_output_still_loads() -> fieldwise::Result<()> {
    let file = NamedTempFile::new()?;
    let data = create_complex_data();

    Fieldwise::save_with(
        file.path(),
        &data,
        ArchiveOptions::builder().pretty(true).build(),
    )?;

    let text = std::fs::read_to_string(file.path())?;
    assert!(text.lines().count() > 1);

    let loaded: ComplexData = Fieldwise::load(file.path())?;
    assert_eq!(loaded, data);
    Ok(())
}

#[test]
fn test_unwritable_path_is_io_error() -> fieldwise::Result<()> {
    let dir = tempfile::tempdir()?;
    let file_path = dir.path().join("missing_dir").join("out.json");

    let err = Fieldwise::save(&file_path, &create_complex_data())
        .err()
        .ok_or_else(|| FieldwiseError::Parse("save unexpectedly succeeded".into()))?;

    assert!(matches!(err, FieldwiseError::Io(_)));
    assert!(err.source().is_some());
    Ok(())
}

#[test]
fn test_unreadable_path_is_io_error() {
    let mut archive = JsonArchive::new();
    let result = archive.load_from_file("definitely/not/here.json");

    assert!(matches!(result, Err(FieldwiseError::Io(_))));
}

#[test]
fn test_garbage_file_is_parse_error() -> fieldwise::Result<()> {
    let file = NamedTempFile::new()?;
    std::fs::write(file.path(), "this is { not json")?;

    let result = Fieldwise::load::<SimpleData, _>(file.path());

    assert!(matches!(result, Err(FieldwiseError::Parse(_))));
    Ok(())
}

#[test]
fn test_inspect_file() -> fieldwise::Result<()> {
    let file = NamedTempFile::new()?;
    Fieldwise::save(file.path(), &create_complex_data())?;

    let report = ArchiveInspector::inspect_file(file.path())?;

    assert_eq!(report.name, "$");
    assert_eq!(report.children.len(), 3);
    assert_eq!(report.find("inner").map(|r| r.kind), Some(EntryKind::Nested));
    assert_eq!(report.find("inner.message").map(|r| r.kind), Some(EntryKind::Leaf));
    Ok(())
}
