#![allow(missing_docs)]

use fieldwise::{deserialize, serialize, Fieldwise, JsonArchive, Serializable};
use serde_json::json;

#[derive(Debug, Default, Clone, PartialEq, Serializable)]
struct Point {
    x: i32,
    y: i32,
}

#[derive(Debug, Default, Clone, PartialEq, Serializable)]
struct Line {
    a: Point,
    b: Point,
}

#[derive(Debug, Default, Clone, PartialEq, Serializable)]
struct Polygon {
    name: String,
    outline: Line,
    closed: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Serializable)]
struct Layer {
    depth: u8,
    shape: Polygon,
}

#[derive(Debug, Default, Clone, PartialEq, Serializable)]
struct Scene {
    title: String,
    top: Layer,
}

#[derive(Debug, Default, Clone, PartialEq, Serializable)]
struct Primitives {
    flag: bool,
    tiny: i8,
    small: i16,
    medium: i32,
    large: i64,
    pointer: isize,
    byte: u8,
    word: u16,
    dword: u32,
    qword: u64,
    size: usize,
    single: f32,
    double: f64,
    text: String,
}

fn sample_line() -> Line {
    Line {
        a: Point { x: 1, y: 2 },
        b: Point { x: 3, y: 4 },
    }
}

fn sample_scene() -> Scene {
    Scene {
        title: "Integration Test".to_string(),
        top: Layer {
            depth: 3,
            shape: Polygon {
                name: "triangle-ish".to_string(),
                outline: Line {
                    a: Point { x: -10, y: 20 },
                    b: Point { x: 30, y: -40 },
                },
                closed: true,
            },
        },
    }
}

// --- TESTS ---

#[test]
fn test_point_serializes_to_flat_object() -> fieldwise::Result<()> {
    let archive: JsonArchive = serialize(&Point { x: 3, y: 4 })?;

    assert_eq!(archive.storage(), &json!({ "x": 3, "y": 4 }));
    assert_eq!(archive.to_json_string()?, r#"{"x":3,"y":4}"#);
    Ok(())
}

#[test]
fn test_line_nests_points_under_field_names() -> fieldwise::Result<()> {
    let text = Fieldwise::to_string(&sample_line())?;

    assert_eq!(text, r#"{"a":{"x":1,"y":2},"b":{"x":3,"y":4}}"#);
    Ok(())
}

#[test]
fn test_line_round_trip() -> fieldwise::Result<()> {
    let line = sample_line();
    let archive: JsonArchive = serialize(&line)?;

    let mut loaded = Line::default();
    deserialize(&archive, &mut loaded)?;

    assert_eq!(loaded, line);
    Ok(())
}

#[test]
fn test_deep_nesting_round_trip() -> fieldwise::Result<()> {
    let scene = sample_scene();
    let archive: JsonArchive = serialize(&scene)?;

    assert_eq!(
        archive.storage()["top"]["shape"]["outline"]["b"]["y"],
        json!(-40)
    );

    let loaded: Scene = fieldwise::deserialize_new(&archive)?;
    assert_eq!(loaded, scene);
    Ok(())
}

#[test]
fn test_every_primitive_round_trips() -> fieldwise::Result<()> {
    let extremes = Primitives {
        flag: true,
        tiny: i8::MIN,
        small: i16::MAX,
        medium: i32::MIN,
        large: i64::MAX,
        pointer: -7,
        byte: u8::MAX,
        word: u16::MAX,
        dword: u32::MAX,
        qword: u64::MAX,
        size: 12_345,
        single: 0.1,
        double: -2.5e-300,
        text: "Grüße, \"quoted\"\n".to_string(),
    };

    let text = Fieldwise::to_string(&extremes)?;
    let loaded: Primitives = Fieldwise::from_str(&text)?;

    assert_eq!(loaded, extremes);
    Ok(())
}

#[test]
fn test_deserialize_overwrites_prior_state() -> fieldwise::Result<()> {
    let archive: JsonArchive = serialize(&sample_line())?;

    let mut target = Line {
        a: Point { x: 99, y: 99 },
        b: Point { x: -99, y: -99 },
    };
    deserialize(&archive, &mut target)?;

    assert_eq!(target, sample_line());
    Ok(())
}

// Same names, opposite declaration order.
#[derive(Debug, Default, PartialEq, Serializable)]
struct Forward {
    first: i32,
    second: String,
}

#[derive(Debug, Default, PartialEq, Serializable)]
struct Backward {
    second: String,
    first: i32,
}

#[test]
fn test_declaration_order_does_not_affect_correctness() -> fieldwise::Result<()> {
    let forward = Forward {
        first: 1,
        second: "two".to_string(),
    };

    let archive: JsonArchive = serialize(&forward)?;
    let backward: Backward = fieldwise::deserialize_new(&archive)?;
    assert_eq!(backward.first, 1);
    assert_eq!(backward.second, "two");

    let again: JsonArchive = serialize(&backward)?;
    assert_eq!(again, archive);
    Ok(())
}
