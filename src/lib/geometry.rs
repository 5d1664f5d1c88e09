//! The six coordinate-bearing geometry objects.
//!
//! Positions are accepted with any number of elements, and `bbox` with any
//! length. RFC 7946 asks for at least two and for `2n` values respectively;
//! both are left unchecked on purpose.

use super::checks::{array_of, is_closed_loop, number_array, tuple_at_least, Context};
use super::error::{ErrorKind, JsonKind};
use super::object::{Member, ObjectShape, BBOX};
use super::union::{dispatch, Variant};
use serde_json::Value;

fn position(value: &Value, ctx: &mut Context) {
    number_array(value, ctx);
}

fn positions(value: &Value, ctx: &mut Context) {
    array_of(value, ctx, "positions", position);
}

fn line_string_coordinates(value: &Value, ctx: &mut Context) {
    tuple_at_least(value, ctx, "positions", &[position, position], position);
}

fn line_strings(value: &Value, ctx: &mut Context) {
    array_of(value, ctx, "LineString coordinates", line_string_coordinates);
}

/// LineString coordinates that also close on themselves. Rings carry no tag
/// of their own.
///
/// Rings shorter than four positions always violate the loop. Longer rings
/// with malformed positions are not compared.
fn linear_ring(value: &Value, ctx: &mut Context) {
    let before = ctx.error_count();
    line_string_coordinates(value, ctx);
    if let Some(ring) = value.as_array() {
        if ring.len() >= 4 && ctx.error_count() > before {
            return;
        }
        if !is_closed_loop(ring) {
            ctx.fail(
                ErrorKind::ClosedLoopViolation,
                format!(
                    "closed ring of at least 4 positions with the last equal to the first, got {}",
                    ring.len()
                ),
                JsonKind::Array,
            );
        }
    }
}

fn polygon_coordinates(value: &Value, ctx: &mut Context) {
    array_of(value, ctx, "linear rings", linear_ring);
}

fn polygons(value: &Value, ctx: &mut Context) {
    array_of(value, ctx, "Polygon coordinates", polygon_coordinates);
}

const POINT: ObjectShape = ObjectShape {
    tag: "Point",
    required: &[Member {
        key: "coordinates",
        check: position,
    }],
    optional: &[BBOX],
};

const MULTI_POINT: ObjectShape = ObjectShape {
    tag: "MultiPoint",
    required: &[Member {
        key: "coordinates",
        check: positions,
    }],
    optional: &[BBOX],
};

const LINE_STRING: ObjectShape = ObjectShape {
    tag: "LineString",
    required: &[Member {
        key: "coordinates",
        check: line_string_coordinates,
    }],
    optional: &[BBOX],
};

const MULTI_LINE_STRING: ObjectShape = ObjectShape {
    tag: "MultiLineString",
    required: &[Member {
        key: "coordinates",
        check: line_strings,
    }],
    optional: &[BBOX],
};

const POLYGON: ObjectShape = ObjectShape {
    tag: "Polygon",
    required: &[Member {
        key: "coordinates",
        check: polygon_coordinates,
    }],
    optional: &[BBOX],
};

const MULTI_POLYGON: ObjectShape = ObjectShape {
    tag: "MultiPolygon",
    required: &[Member {
        key: "coordinates",
        check: polygons,
    }],
    optional: &[BBOX],
};

pub(crate) fn point(value: &Value, ctx: &mut Context) {
    POINT.check(value, ctx);
}

pub(crate) fn multi_point(value: &Value, ctx: &mut Context) {
    MULTI_POINT.check(value, ctx);
}

pub(crate) fn line_string(value: &Value, ctx: &mut Context) {
    LINE_STRING.check(value, ctx);
}

pub(crate) fn multi_line_string(value: &Value, ctx: &mut Context) {
    MULTI_LINE_STRING.check(value, ctx);
}

pub(crate) fn polygon(value: &Value, ctx: &mut Context) {
    POLYGON.check(value, ctx);
}

pub(crate) fn multi_polygon(value: &Value, ctx: &mut Context) {
    MULTI_POLYGON.check(value, ctx);
}

const GEOMETRIES: &[Variant] = &[
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
];

/// Any geometry except GeometryCollection.
pub(crate) fn geometry(value: &Value, ctx: &mut Context) {
    dispatch(value, ctx, "Geometry", GEOMETRIES);
}
