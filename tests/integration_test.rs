extern crate geojson_validate;

use geojson_validate::output::{Output, Report};
use geojson_validate::{
    validate, validate_feature_collection, validate_geometry, ErrorKind, Expect, Options,
    Path, Validator,
};
use serde_json::{json, Value};
use std::fs::read_to_string;

const VALID_FIXTURES: &[&str] = &[
    "point.geojson",
    "polygon_with_hole.geojson",
    "feature_collection.geojson",
    "geometry_collection.geojson",
];

fn load(name: &str) -> Value {
    let string = read_to_string(format!("./tests/data/{}", name)).unwrap();
    serde_json::from_str(&string).unwrap()
}

#[test]
fn valid_fixtures() {
    for name in VALID_FIXTURES {
        let value = load(name);
        assert!(validate(&value).is_ok(), "{} should be valid", name);
    }
}

#[test]
fn valid_fixtures_parse_with_geojson_crate() {
    for name in VALID_FIXTURES {
        let string = read_to_string(format!("./tests/data/{}", name)).unwrap();
        assert!(string.parse::<geojson::GeoJson>().is_ok(), "{}", name);
    }
}

#[test]
fn broken_collection() {
    let value = load("broken_collection.geojson");
    let errors = validate(&value).unwrap_err();

    let found: Vec<(String, ErrorKind)> = errors
        .iter()
        .map(|error| (error.path.to_string(), error.kind))
        .collect();
    let expected: Vec<(String, ErrorKind)> = vec![
        ("features[0].geometry.coordinates[0]", ErrorKind::ClosedLoopViolation),
        ("features[1].geometry", ErrorKind::UnrecognizedTypeTag),
        ("features[2].geometry.coordinates", ErrorKind::ShapeMismatch),
        ("features[2].properties", ErrorKind::MissingRequiredKey),
        ("features[2].id", ErrorKind::UnionExhausted),
        ("features[3].type", ErrorKind::UnrecognizedTypeTag),
        ("features[3].geometry", ErrorKind::MissingRequiredKey),
        ("features[3].properties", ErrorKind::MissingRequiredKey),
    ]
    .into_iter()
    .map(|(path, kind)| (path.to_string(), kind))
    .collect();
    assert_eq!(found, expected);
}

#[test]
fn broken_collection_in_parallel() {
    let value = load("broken_collection.geojson");
    let sequential = validate(&value).unwrap_err();
    let parallel = Validator::with_options(Options {
        parallel_threshold: 1,
    })
    .validate(&value)
    .unwrap_err();
    assert_eq!(sequential, parallel);
}

#[test]
fn subtree_lookup() {
    let value = load("broken_collection.geojson");
    let errors = validate(&value).unwrap_err();

    let third = Path::root().key("features").index(2);
    assert_eq!(errors.under(&third).len(), 3);

    let geometry = Path::root().key("features").index(1).key("geometry");
    let below: Vec<String> = errors
        .under(&geometry)
        .iter()
        .map(|error| error.to_string())
        .collect();
    assert_eq!(below.len(), 1);
    assert!(below[0].starts_with("features[1].geometry: unrecognized type tag"));
}

#[test]
fn expect_narrows_the_report() {
    let value = load("point.geojson");
    assert!(validate_geometry(&value).is_ok());

    let errors = validate_feature_collection(&value).unwrap_err();
    assert!(errors.contains(ErrorKind::UnrecognizedTypeTag, "type"));
    assert!(errors.contains(ErrorKind::MissingRequiredKey, "features"));

    let value = load("geometry_collection.geojson");
    let errors = Validator::new()
        .validate_as(Expect::Geometry, &value)
        .unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors.contains(ErrorKind::UnrecognizedTypeTag, ""));
}

#[test]
fn foreign_members_everywhere() {
    let value = json!({
        "type": "FeatureCollection",
        "name": "collection",
        "features": [{
            "type": "Feature",
            "geometry": {
                "type": "GeometryCollection",
                "geometries": [],
            },
            "properties": null,
        }, {
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [0, 0], "extra": {"type": "Nonsense"}},
            "properties": null,
            "extra": [1, 2, 3],
        }],
    });
    let errors = validate(&value).unwrap_err();
    // only the GeometryCollection inside a Feature is rejected
    assert_eq!(errors.len(), 1);
    assert!(errors.contains(ErrorKind::UnrecognizedTypeTag, "features[0].geometry"));
}

#[test]
fn report_output() {
    let value = load("broken_collection.geojson");
    let report = Report::new("broken_collection.geojson", validate(&value)).limit(3);
    let mut buffer = Vec::new();
    report.write_text(&mut buffer).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines
        .iter()
        .all(|line| line.starts_with("broken_collection.geojson: features[")));
}
