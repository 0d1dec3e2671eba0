// GAF import: raw sheets and pre-parsed object lists into the schematic canvas

use schematic_wasm::parse::parse_gaf;
use schematic_wasm::{
    CanvasConfig, GafObject, ImportSummary, PageSize, Schematic, SchematicContext, SchematicError,
};

const DIVIDER: &str = include_str!("fixtures/divider.sch");

fn schematic() -> Schematic {
    let mut context = SchematicContext::default();
    Schematic::new(&mut context, PageSize::new(1280.0, 800.0), false)
}

#[test]
fn test_divider_sheet_counts() {
    let mut s = schematic();
    let summary = s.from_gaf(DIVIDER).expect("divider sheet should import");

    // title block filtered, two resistors and ground kept
    assert_eq!(
        summary,
        ImportSummary { components: 3, wires: 3, title_blocks: 1, ignored: 2 }
    );
    assert_eq!(s.groups_with_class("component").len(), 3);
    assert_eq!(s.groups_with_class("wire").len(), 3);
}

#[test]
fn test_divider_coordinates_are_scaled() {
    let mut s = schematic();
    s.from_gaf(DIVIDER).unwrap();

    let mut positions: Vec<(f64, f64)> = s
        .groups_with_class("component")
        .into_iter()
        .map(|id| s.node(id).unwrap().translation().unwrap())
        .collect();
    positions.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(positions, vec![(438.0, 420.0), (440.0, 430.0), (440.0, 460.0)]);

    // every wire ends where the stored net ends, divided by 100
    let model = parse_gaf(DIVIDER).unwrap();
    let mut expected: Vec<(f64, f64, f64, f64)> = model
        .nets()
        .map(|n| (n.x1.unwrap() / 100.0, n.y1.unwrap() / 100.0, n.x2.unwrap() / 100.0, n.y2.unwrap() / 100.0))
        .collect();
    let mut actual: Vec<(f64, f64, f64, f64)> = s
        .groups_with_class("wire")
        .into_iter()
        .map(|id| {
            let group = s.node(id).unwrap();
            let (tx, ty) = group.translation().unwrap();
            let line = s.node(group.children[0]).unwrap();
            (tx, ty, tx + line.attr_f64("x2").unwrap(), ty + line.attr_f64("y2").unwrap())
        })
        .collect();
    expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
    actual.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(actual, expected);
}

#[test]
fn test_attributes_survive_parsing() {
    let model = parse_gaf(DIVIDER).unwrap();
    let refdes: Vec<&str> = model.components().filter_map(|c| c.attribute("refdes")).collect();
    assert_eq!(refdes, vec!["R1", "R2"]);
    let vin = model.nets().find_map(|n| n.attribute("netname"));
    assert_eq!(vin, Some("VIN"));
}

#[test]
fn test_preparsed_list_matches_text_import() {
    let model = parse_gaf(DIVIDER).unwrap();

    let mut from_text = schematic();
    from_text.from_gaf(DIVIDER).unwrap();
    let mut from_objects = schematic();
    from_objects.from_gaf(&model).unwrap();

    assert_eq!(from_text.to_svg(), from_objects.to_svg());
}

#[test]
fn test_reimport_is_idempotent() {
    let mut s = schematic();
    s.from_gaf(DIVIDER).unwrap();
    let first = s.to_svg();
    s.from_gaf(DIVIDER).unwrap();
    assert_eq!(s.model_groups().len(), 6);
    assert_eq!(s.to_svg().len(), first.len());
}

#[test]
fn test_custom_title_block_and_scale() {
    let config = CanvasConfig {
        title_block_basename: "gnd-1.sym".to_string(),
        import_scale: 0.1,
        ..CanvasConfig::default()
    };
    let mut context = SchematicContext::new(config);
    let mut s = Schematic::new(&mut context, PageSize::new(100.0, 100.0), false);

    let objects = vec![
        GafObject::component(100.0, 200.0, "gnd-1.sym"),
        GafObject::component(100.0, 200.0, "title-B.sym"),
    ];
    let summary = s.from_gaf(objects.as_slice()).unwrap();
    assert_eq!(summary.components, 1);
    assert_eq!(summary.title_blocks, 1);
    let group = s.groups_with_class("component")[0];
    assert_eq!(s.node(group).unwrap().translation(), Some((10.0, 20.0)));
}

#[test]
fn test_malformed_sheet_reports_line() {
    let mut s = schematic();
    let err = s.from_gaf("v 20130925 2\nN 0 0 100\n").unwrap_err();
    assert_eq!(
        err.to_string(),
        "GAF import failed: line 2: malformed N record: expected 4 numeric fields, found 3"
    );
    assert!(matches!(err, SchematicError::Gaf(_)));
}

#[test]
fn test_string_coordinates_from_json_objects() {
    let mut s = schematic();
    let objects: Vec<GafObject> = serde_json::from_str(
        r#"[
            {"type":"C","x":"4500","y":"300","basename":"resistor-1.sym"},
            {"type":"N","x1":"0","y1":0,"x2":"100","y2":false}
        ]"#,
    )
    .unwrap();
    let summary = s.from_gaf(objects.as_slice()).unwrap();
    assert_eq!((summary.components, summary.wires), (1, 1));

    let component = s.groups_with_class("component")[0];
    assert_eq!(s.node(component).unwrap().translation(), Some((45.0, 3.0)));
    let wire = s.groups_with_class("wire")[0];
    let line = s.node(wire).unwrap().children[0];
    assert_eq!(s.node(line).unwrap().attr("x2"), Some("1"));
    assert_eq!(s.node(line).unwrap().attr("y2"), Some("NaN"));
}
