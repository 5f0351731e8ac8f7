use grind_engine::{EngineError, MapDocument, Position, Size, Trigger, VOID_GLYPH, parse, serialize};

fn checkerboard(width: i32, height: i32) -> MapDocument {
    let mut doc = MapDocument::new(width, height, "Checker");
    for y in 0..height {
        for x in 0..width {
            doc.set_cell((x, y), if (x + y) % 2 == 0 { '#' } else { '.' });
        }
    }
    doc
}

#[test]
fn test_resize_preserves_overlap() {
    let original = checkerboard(8, 6);
    let mut doc = original.clone();

    doc.resize(5, 9);
    assert_eq!(doc.size(), Size::new(5, 9));
    for y in 0..9 {
        for x in 0..5 {
            let expected = if y < 6 { original.get_cell((x, y)) } else { VOID_GLYPH };
            assert_eq!(doc.get_cell((x, y)), expected, "cell ({x}, {y})");
        }
    }

    doc.resize(8, 6);
    for y in 0..6 {
        for x in 0..8 {
            let expected = if x < 5 { original.get_cell((x, y)) } else { VOID_GLYPH };
            assert_eq!(doc.get_cell((x, y)), expected, "cell ({x}, {y})");
        }
    }
}

#[test]
fn test_resize_updates_metadata() {
    let mut doc = MapDocument::default();
    doc.resize(10, 3);
    assert_eq!(doc.get_metadata("width"), Some("10"));
    assert_eq!(doc.get_metadata("height"), Some("3"));
}

#[test]
fn test_shrink_drops_triggers_for_good() {
    let mut doc = MapDocument::new(10, 10, "t");
    doc.place_trigger((8, 8), Trigger::teleport(0, 0)).unwrap();
    doc.place_trigger((1, 1), Trigger::exit("town", 2, 2)).unwrap();

    doc.resize(5, 5);
    assert_eq!(doc.trigger_count(), 1);
    assert!(doc.trigger_at((1, 1)).is_some());

    doc.resize(10, 10);
    assert!(doc.trigger_at((8, 8)).is_none());
    assert_eq!(doc.trigger_count(), 1);
}

#[test]
fn test_out_of_bounds_cells() {
    let mut doc = MapDocument::new(3, 3, "t");
    assert_eq!(doc.get_cell((-1, 0)), VOID_GLYPH);
    assert_eq!(doc.get_cell((3, 0)), VOID_GLYPH);
    assert_eq!(doc.get_cell((0, 3)), VOID_GLYPH);

    let before = doc.clone();
    doc.set_cell((3, 3), '#');
    doc.set_cell((-5, 1), '#');
    assert_eq!(doc, before);
}

#[test]
fn test_non_trigger_glyph_removes_trigger() {
    let mut doc = MapDocument::new(4, 2, "t");
    doc.set_cell((1, 0), 'E');
    doc.place_trigger((1, 0), Trigger::exit("town", 5, 5)).unwrap();
    assert!(serialize(&doc).contains("exit:x=1,y=0"));

    doc.set_cell((1, 0), '#');
    assert!(doc.trigger_at((1, 0)).is_none());
    assert!(!serialize(&doc).contains("exit:"));
}

#[test]
fn test_place_trigger_out_of_bounds() {
    let mut doc = MapDocument::new(4, 2, "t");
    let err = doc.place_trigger((4, 0), Trigger::teleport(0, 0)).unwrap_err();
    assert!(matches!(
        err,
        EngineError::OutOfBounds {
            pos: Position { x: 4, y: 0 },
            width: 4,
            height: 2
        }
    ));
    assert_eq!(doc.trigger_count(), 0);
}

#[test]
fn test_place_trigger_replaces_previous() {
    let mut doc = MapDocument::new(4, 2, "t");
    assert_eq!(doc.place_trigger((0, 0), Trigger::teleport(1, 1)).unwrap(), None);
    let previous = doc.place_trigger((0, 0), Trigger::exit("cave", 0, 0)).unwrap();
    assert_eq!(previous, Some(Trigger::teleport(1, 1)));
    assert_eq!(doc.trigger_count(), 1);
    assert_eq!(doc.trigger_at((0, 0)), Some(&Trigger::exit("cave", 0, 0)));

    assert_eq!(doc.clear_trigger((0, 0)), Some(Trigger::exit("cave", 0, 0)));
    assert_eq!(doc.clear_trigger((0, 0)), None);
}

#[test]
fn test_row_access() {
    let doc = checkerboard(3, 2);
    assert_eq!(doc.row(0).as_deref(), Some("#.#"));
    assert_eq!(doc.row(1).as_deref(), Some(".#."));
    assert_eq!(doc.row(2), None);
    assert_eq!(doc.row(-1), None);
}

#[test]
fn test_line_breaks_cannot_break_the_file() {
    let mut doc = MapDocument::new(3, 1, "Two\nLines");
    assert_eq!(doc.name(), "Two Lines");
    doc.set_name("layer:terrain\r\n#");
    assert_eq!(doc.name(), "layer:terrain  #");

    doc.set_cell((0, 0), '\n');
    doc.set_cell((1, 0), '\r');
    doc.set_cell((2, 0), '#');
    assert_eq!(doc.row(0).as_deref(), Some("  #"));

    assert!(matches!(doc.set_metadata("note", "a\nlayer:terrain"), Err(EngineError::InvalidMetadata { .. })));
    assert!(matches!(doc.set_metadata("a=b", "c"), Err(EngineError::InvalidMetadata { .. })));
    assert_eq!(doc.get_metadata("note"), None);

    let text = serialize(&doc);
    assert_eq!(text.lines().count(), 5);
    assert_eq!(parse(&text), doc);
}
