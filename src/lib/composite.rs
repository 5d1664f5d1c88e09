use super::checks::{any, array_of, each, number, string, Context};
use super::error::{ErrorKind, ValidationError};
use super::geometry::{
    geometry, line_string, multi_line_string, multi_point, multi_polygon, point, polygon,
};
use super::object::{Member, ObjectShape, BBOX};
use super::union::{any_of, dispatch, Alternative, Variant};
use rayon::prelude::*;
use serde_json::Value;
use tracing::debug;

fn geometries(value: &Value, ctx: &mut Context) {
    array_of(value, ctx, "Geometry objects", geometry);
}

fn nullable_geometry(value: &Value, ctx: &mut Context) {
    if !value.is_null() {
        geometry(value, ctx);
    }
}

const FEATURE_ID: &[Alternative] = &[
    Alternative {
        name: "string",
        check: string,
    },
    Alternative {
        name: "number",
        check: number,
    },
];

fn feature_id(value: &Value, ctx: &mut Context) {
    any_of(value, ctx, FEATURE_ID);
}

/// Features of large collections are validated in parallel. Errors are merged
/// back in index order, so the report matches a sequential walk.
fn features(value: &Value, ctx: &mut Context) {
    let items = match value.as_array() {
        Some(items) => items,
        None => {
            ctx.fail(ErrorKind::TypeMismatch, "array of Feature objects", value.into());
            return;
        }
    };

    if items.len() < ctx.options().parallel_threshold {
        each(items, ctx, feature);
        return;
    }

    debug!(features = items.len(), "validating features in parallel");
    let parent: &Context = ctx;
    let branches: Vec<Vec<ValidationError>> = items
        .par_iter()
        .enumerate()
        .map(|(index, item)| {
            let mut branch = parent.branch();
            branch.index(index, |branch| feature(item, branch));
            branch.into_errors()
        })
        .collect();
    for errors in branches {
        ctx.extend(errors);
    }
}

const GEOMETRY_COLLECTION: ObjectShape = ObjectShape {
    tag: "GeometryCollection",
    required: &[Member {
        key: "geometries",
        check: geometries,
    }],
    optional: &[BBOX],
};

const FEATURE: ObjectShape = ObjectShape {
    tag: "Feature",
    required: &[
        Member {
            key: "geometry",
            check: nullable_geometry,
        },
        Member {
            key: "properties",
            check: any,
        },
    ],
    optional: &[
        Member {
            key: "id",
            check: feature_id,
        },
        BBOX,
    ],
};

const FEATURE_COLLECTION: ObjectShape = ObjectShape {
    tag: "FeatureCollection",
    required: &[Member {
        key: "features",
        check: features,
    }],
    optional: &[BBOX],
};

pub(crate) fn geometry_collection(value: &Value, ctx: &mut Context) {
    GEOMETRY_COLLECTION.check(value, ctx);
}

pub(crate) fn feature(value: &Value, ctx: &mut Context) {
    FEATURE.check(value, ctx);
}

pub(crate) fn feature_collection(value: &Value, ctx: &mut Context) {
    FEATURE_COLLECTION.check(value, ctx);
}

const GEOJSON: &[Variant] = &[
    Variant {
        tag: "Point",
        check: point,
    },
    Variant {
        tag: "MultiPoint",
        check: multi_point,
    },
    Variant {
        tag: "LineString",
        check: line_string,
    },
    Variant {
        tag: "MultiLineString",
        check: multi_line_string,
    },
    Variant {
        tag: "Polygon",
        check: polygon,
    },
    Variant {
        tag: "MultiPolygon",
        check: multi_polygon,
    },
    Variant {
        tag: "GeometryCollection",
        check: geometry_collection,
    },
    Variant {
        tag: "Feature",
        check: feature,
    },
    Variant {
        tag: "FeatureCollection",
        check: feature_collection,
    },
];

/// Any GeoJSON object.
pub(crate) fn geojson(value: &Value, ctx: &mut Context) {
    dispatch(value, ctx, "GeoJSON", GEOJSON);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JsonKind;
    use crate::Options;
    use serde_json::json;

    fn run(value: Value) -> Vec<ValidationError> {
        let mut ctx = Context::new(Options::default());
        geojson(&value, &mut ctx);
        ctx.into_errors()
    }

    fn kinds_at(errors: &[ValidationError]) -> Vec<(String, ErrorKind)> {
        errors
            .iter()
            .map(|e| (e.path.to_string(), e.kind))
            .collect()
    }

    #[test]
    fn null_feature() {
        assert!(run(json!({"type": "Feature", "geometry": null, "properties": null})).is_empty());
    }

    #[test]
    fn feature_with_everything() {
        let value = json!({
            "type": "Feature",
            "id": "f1",
            "bbox": [0, 0, 1, 1],
            "geometry": {"type": "Point", "coordinates": [0.5, 0.5]},
            "properties": {"name": "Dinagat Islands", "tags": [1, 2]},
            "title": "foreign",
        });
        assert!(run(value).is_empty());
    }

    #[test]
    fn properties_accept_anything() {
        for properties in &[json!(null), json!({}), json!([1]), json!("x"), json!(3)] {
            let value = json!({"type": "Feature", "geometry": null, "properties": properties});
            assert!(run(value).is_empty());
        }
    }

    #[test]
    fn feature_requires_geometry_and_properties() {
        let errors = run(json!({"type": "Feature"}));
        assert_eq!(
            kinds_at(&errors),
            vec![
                ("geometry".to_string(), ErrorKind::MissingRequiredKey),
                ("properties".to_string(), ErrorKind::MissingRequiredKey),
            ]
        );
    }

    #[test]
    fn feature_id_string_or_number() {
        for id in &[json!("a"), json!(1), json!(-2.5)] {
            let value = json!({"type": "Feature", "geometry": null, "properties": null, "id": id});
            assert!(run(value).is_empty());
        }
        for id in &[json!(true), json!([1]), json!({"id": 1}), json!(null)] {
            let value = json!({"type": "Feature", "geometry": null, "properties": null, "id": id});
            let errors = run(value);
            assert_eq!(
                kinds_at(&errors),
                vec![("id".to_string(), ErrorKind::UnionExhausted)]
            );
        }
    }

    #[test]
    fn feature_geometry_must_be_a_geometry() {
        let errors = run(json!({
            "type": "Feature",
            "geometry": {"type": "Feature", "geometry": null, "properties": null},
            "properties": null,
        }));
        assert_eq!(
            kinds_at(&errors),
            vec![("geometry".to_string(), ErrorKind::UnrecognizedTypeTag)]
        );

        let errors = run(json!({"type": "Feature", "geometry": [0, 0], "properties": null}));
        assert_eq!(
            kinds_at(&errors),
            vec![("geometry".to_string(), ErrorKind::TypeMismatch)]
        );
    }

    #[test]
    fn valid_geometry_collection() {
        let value = json!({
            "type": "GeometryCollection",
            "geometries": [
                {"type": "Point", "coordinates": [100.0, 0.0]},
                {"type": "LineString", "coordinates": [[101.0, 0.0], [102.0, 1.0]]},
            ],
        });
        assert!(run(value).is_empty());
    }

    #[test]
    fn nested_geometry_collection() {
        let errors = run(json!({
            "type": "GeometryCollection",
            "geometries": [{"type": "GeometryCollection", "geometries": []}],
        }));
        assert_eq!(
            kinds_at(&errors),
            vec![("geometries[0]".to_string(), ErrorKind::UnrecognizedTypeTag)]
        );
    }

    #[test]
    fn empty_feature_collection() {
        assert!(run(json!({"type": "FeatureCollection", "features": []})).is_empty());
    }

    #[test]
    fn feature_collection_reports_nested_paths() {
        let errors = run(json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "geometry": null, "properties": null},
                {
                    "type": "Feature",
                    "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1]]]},
                    "properties": {},
                },
                {"type": "Point", "coordinates": [0, 0]},
            ],
        }));
        assert_eq!(
            kinds_at(&errors),
            vec![
                (
                    "features[1].geometry.coordinates[0]".to_string(),
                    ErrorKind::ClosedLoopViolation
                ),
                ("features[2].type".to_string(), ErrorKind::UnrecognizedTypeTag),
                ("features[2].geometry".to_string(), ErrorKind::MissingRequiredKey),
                ("features[2].properties".to_string(), ErrorKind::MissingRequiredKey),
            ]
        );
    }

    #[test]
    fn features_must_be_an_array() {
        let errors = run(json!({"type": "FeatureCollection", "features": {}}));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path.to_string(), "features");
        assert_eq!(errors[0].found, JsonKind::Object);
    }

    #[test]
    fn parallel_matches_sequential() {
        let mut features = vec![];
        for i in 0..40 {
            let feature = if i % 7 == 3 {
                json!({"type": "Feature", "geometry": {"type": "LineString", "coordinates": [[i, i]]}})
            } else {
                json!({"type": "Feature", "geometry": {"type": "Point", "coordinates": [i, i]}, "properties": null, "id": i})
            };
            features.push(feature);
        }
        let value = json!({"type": "FeatureCollection", "features": features});

        let mut sequential = Context::new(Options::default());
        geojson(&value, &mut sequential);
        let mut parallel = Context::new(Options {
            parallel_threshold: 2,
        });
        geojson(&value, &mut parallel);

        let sequential = sequential.into_errors();
        assert!(!sequential.is_empty());
        assert_eq!(sequential, parallel.into_errors());
    }

    #[test]
    fn unknown_root_tag() {
        let errors = run(json!({"type": "Topology", "objects": {}}));
        assert_eq!(
            kinds_at(&errors),
            vec![("".to_string(), ErrorKind::UnrecognizedTypeTag)]
        );
        assert!(errors[0].expected.contains("FeatureCollection"));
    }
}
