//! Saves a small drawing, loads it back and prints the archive layout.
//!
//! Run with `RUST_LOG=fieldwise=trace cargo run --example shapes` to see every property
//! the engine visits.

use fieldwise::{ArchiveInspector, ArchiveOptions, Fieldwise, Serializable};
use tracing_subscriber::EnvFilter;

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
struct Drawing {
    #[fieldwise(rename = "name")]
    title: String,
    lines: Vec<Line>,
    #[fieldwise(skip)]
    dirty: bool,
}

fn main() -> fieldwise::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let drawing = Drawing {
        title: "corner".to_string(),
        lines: vec![
            Line {
                a: Point { x: 0, y: 0 },
                b: Point { x: 0, y: 10 },
            },
            Line {
                a: Point { x: 0, y: 10 },
                b: Point { x: 10, y: 10 },
            },
        ],
        dirty: true,
    };

    let path = std::env::temp_dir().join("fieldwise_shapes.json");
    Fieldwise::save_with(&path, &drawing, ArchiveOptions::builder().pretty(true).build())?;
    println!("-> Saved to {}", path.display());
    println!("{}", std::fs::read_to_string(&path)?);

    let loaded: Drawing = Fieldwise::load(&path)?;
    println!("-> Loaded: {loaded:?}");
    assert_eq!(loaded.lines, drawing.lines);
    assert!(!loaded.dirty);

    let report = ArchiveInspector::inspect_file(&path)?;
    println!(
        "-> {} entries, depth {}",
        report.count(),
        report.depth()
    );
    println!(
        "{}",
        serde_json::to_string_pretty(&report).map_err(fieldwise::FieldwiseError::from)?
    );

    std::fs::remove_file(&path)?;
    Ok(())
}
