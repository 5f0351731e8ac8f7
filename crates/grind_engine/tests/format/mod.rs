use grind_engine::{
    FormatWarning, MapDocument, Position, Size, Trigger, formats::TriggerFieldError, parse, parse_with_report, serialize,
};
use pretty_assertions::assert_eq;

const TEST_MAP: &str = "meta:width=4
meta:height=2
meta:name=Test
exit:x=1,y=0,map=town,tx=5,ty=5
layer:terrain
#..#
#.T#
";

#[test]
fn test_load_reference_map() {
    let report = parse_with_report(TEST_MAP);
    assert!(report.warnings.is_empty());

    let doc = report.document;
    assert_eq!(doc.size(), Size::new(4, 2));
    assert_eq!(doc.name(), "Test");
    assert_eq!(doc.rows().collect::<Vec<_>>(), vec!["#..#", "#.T#"]);
    assert_eq!(doc.trigger_count(), 1);
    assert_eq!(doc.trigger_at((1, 0)), Some(&Trigger::exit("town", 5, 5)));
}

#[test]
fn test_reference_map_is_byte_exact() {
    assert_eq!(serialize(&parse(TEST_MAP)), TEST_MAP);
}

#[test]
fn test_roundtrip_edited_document() {
    let mut doc = MapDocument::new(6, 3, "Dungeon");
    doc.set_cell((0, 0), '#');
    doc.set_cell((5, 2), '~');
    doc.set_cell((2, 1), 'T');
    doc.place_trigger((2, 1), Trigger::teleport(0, 2)).unwrap();
    doc.place_trigger(
        (4, 0),
        Trigger::Exit {
            target_map: Some("town".to_string()),
            target_x: None,
            target_y: None,
        },
    )
    .unwrap();

    let loaded = parse(&serialize(&doc));
    assert_eq!(loaded.size(), doc.size());
    assert_eq!(loaded.name(), doc.name());
    assert_eq!(loaded.rows().collect::<Vec<_>>(), doc.rows().collect::<Vec<_>>());
    assert_eq!(loaded.triggers().collect::<Vec<_>>(), doc.triggers().collect::<Vec<_>>());
}

#[test]
fn test_serialize_layout() {
    let mut doc = MapDocument::new(3, 2, "Small");
    doc.set_metadata("author", "someone").unwrap();
    doc.add_extra_header_line("layer:objects");
    doc.set_cell((1, 1), '.');
    doc.place_trigger((0, 0), Trigger::teleport(2, 1)).unwrap();

    let text = serialize(&doc);
    assert_eq!(
        text,
        "meta:width=3\nmeta:height=2\nmeta:name=Small\nmeta:author=someone\nlayer:objects\nteleport:x=0,y=0,tx=2,ty=1\nlayer:terrain\n   \n . \n"
    );
}

#[test]
fn test_extra_header_lines_are_kept_as_block() {
    let text = "custom:first\nmeta:width=2\nmeta:height=1\nsomething else\nmeta:name=X\nlayer:terrain\nab\n";
    let doc = parse(text);
    assert_eq!(doc.extra_header_lines(), &["custom:first".to_string(), "something else".to_string()]);
    assert_eq!(
        serialize(&doc),
        "meta:width=2\nmeta:height=1\nmeta:name=X\ncustom:first\nsomething else\nlayer:terrain\nab\n"
    );
}

#[test]
fn test_comments_and_blank_lines_are_dropped() {
    let text = "% a comment\n\nmeta:width=2\n   \nmeta:height=1\n%another\nlayer:terrain\nxy\n";
    let doc = parse(text);
    assert!(doc.extra_header_lines().is_empty());
    assert_eq!(doc.row(0).as_deref(), Some("xy"));
    assert!(!serialize(&doc).contains('%'));
}

#[test]
fn test_malformed_meta_does_not_abort() {
    let text = "meta:badline\nmeta:width=3\nmeta:height=1\nmeta:name=Ok\nlayer:terrain\nabc\n";
    let report = parse_with_report(text);
    assert_eq!(
        report.warnings,
        vec![FormatWarning::MalformedMeta {
            line: 1,
            text: "meta:badline".to_string()
        }]
    );
    assert_eq!(report.document.size(), Size::new(3, 1));
    assert_eq!(report.document.name(), "Ok");
    assert_eq!(report.document.row(0).as_deref(), Some("abc"));
}

#[test]
fn test_meta_splits_on_first_colon_and_equals() {
    let doc = parse("meta:title=a=b\nmeta:url=http://x\n");
    assert_eq!(doc.get_metadata("title"), Some("a=b"));
    assert_eq!(doc.get_metadata("url"), Some("http://x"));
}

#[test]
fn test_malformed_trigger_lines_are_dropped() {
    let text = "meta:width=4\nmeta:height=2\nexit:x=1,y=oops\nteleport:x=2\nexit:x=0,y=0,broken\nteleport:x=3,y=1,tx=0,ty=0\nlayer:terrain\n";
    let report = parse_with_report(text);
    assert_eq!(report.document.trigger_count(), 1);
    assert_eq!(report.document.trigger_at((3, 1)), Some(&Trigger::teleport(0, 0)));

    let reasons: Vec<_> = report
        .warnings
        .iter()
        .map(|w| match w {
            FormatWarning::MalformedTrigger { line, reason, .. } => (*line, reason.clone()),
            other => panic!("unexpected warning {other}"),
        })
        .collect();
    assert_eq!(
        reasons,
        vec![
            (
                3,
                TriggerFieldError::NotAnInteger {
                    field: "y".to_string(),
                    value: "oops".to_string()
                }
            ),
            (4, TriggerFieldError::MissingField("y")),
            (5, TriggerFieldError::MissingEquals("broken".to_string())),
        ]
    );
}

#[test]
fn test_trigger_outside_parsed_size_is_dropped() {
    let text = "meta:width=2\nmeta:height=2\nexit:x=5,y=0\nlayer:terrain\n";
    let report = parse_with_report(text);
    assert_eq!(report.document.trigger_count(), 0);
    assert_eq!(
        report.warnings,
        vec![FormatWarning::TriggerOutOfBounds {
            line: 3,
            pos: Position::new(5, 0),
            width: 2,
            height: 2
        }]
    );
}

#[test]
fn test_trigger_declared_before_size_is_kept() {
    // the trigger fits the declared size but not the default one
    let text = "exit:x=70,y=20\nmeta:width=80\nmeta:height=25\nlayer:terrain\n";
    let doc = parse(text);
    assert!(doc.trigger_at((70, 20)).is_some());
}

#[test]
fn test_invalid_dimensions_fall_back_to_defaults() {
    let report = parse_with_report("meta:width=abc\nmeta:height=3\nlayer:terrain\n");
    assert_eq!(report.document.size(), Size::new(54, 16));
    assert_eq!(report.warnings.len(), 1);

    let doc = parse("meta:width=0\nmeta:height=3\n");
    assert_eq!(doc.size(), Size::new(54, 16));

    let doc = parse("meta:width=99999\nmeta:height=3\n");
    assert_eq!(doc.size(), Size::new(54, 16));
}

#[test]
fn test_missing_dimension_uses_its_default() {
    let doc = parse("meta:width=10\nlayer:terrain\n");
    assert_eq!(doc.size(), Size::new(10, 16));
    assert_eq!(doc.name(), "Untitled");
}

#[test]
fn test_empty_input_yields_default_document() {
    let doc = parse("");
    assert_eq!(doc, MapDocument::default());
}

#[test]
fn test_rows_are_truncated_and_padded() {
    let text = "meta:width=3\nmeta:height=4\nlayer:terrain\nabcdef\nx\n\n";
    let doc = parse(text);
    assert_eq!(doc.rows().collect::<Vec<_>>(), vec!["abc", "x  ", "   ", "   "]);
}

#[test]
fn test_extra_rows_are_ignored() {
    let doc = parse("meta:width=2\nmeta:height=1\nlayer:terrain\nab\ncd\n");
    assert_eq!(doc.rows().collect::<Vec<_>>(), vec!["ab"]);
}

#[test]
fn test_marker_must_match_exactly() {
    let doc = parse("meta:width=2\nmeta:height=1\nlayer:terrain2\nab\n");
    assert_eq!(doc.extra_header_lines(), &["layer:terrain2".to_string(), "ab".to_string()]);
    assert_eq!(doc.row(0).as_deref(), Some("  "));
}

#[test]
fn test_crlf_input() {
    let doc = parse("meta:width=2\r\nmeta:height=1\r\nlayer:terrain\r\nab\r\n");
    assert_eq!(doc.size(), Size::new(2, 1));
    assert_eq!(doc.row(0).as_deref(), Some("ab"));
}

#[test]
fn test_stale_dimension_metadata_is_rederived() {
    let text = "meta:width=3\nmeta:height=1\nmeta:name=A\nlayer:terrain\nabc\n";
    let mut doc = parse(text);
    doc.resize(2, 2);
    doc.set_name("B");
    assert_eq!(
        serialize(&doc),
        "meta:width=2\nmeta:height=2\nmeta:name=B\nlayer:terrain\nab\n  \n"
    );
}

#[test]
fn test_missing_reserved_keys_are_appended() {
    let doc = parse("meta:author=me\nlayer:terrain\n");
    let first_lines: Vec<_> = serialize(&doc).lines().take(4).map(str::to_string).collect();
    assert_eq!(first_lines, vec!["meta:author=me", "meta:width=54", "meta:height=16", "meta:name=Untitled"]);
}
