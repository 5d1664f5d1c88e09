//! Structural validation of decoded GeoJSON (RFC 7946) documents.
//!
//! The validator works on a [`serde_json::Value`] and reports every failing
//! member together with its path from the root:
//!
//! ```
//! use geojson_validate::{validate, ErrorKind};
//! use serde_json::json;
//!
//! let value = json!({"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1]]]});
//! let errors = validate(&value).unwrap_err();
//! assert!(errors.contains(ErrorKind::ClosedLoopViolation, "coordinates[0]"));
//! ```
use checks::Context;
use serde_json::Value;
use std::str::FromStr;
use tracing::debug;

mod checks;
mod composite;
pub mod error;
mod geometry;
mod object;
pub mod output;
pub mod path;
mod union;

pub use checks::is_closed_loop;
pub use error::{ErrorKind, ErrorTree, JsonKind, ValidationError};
pub use path::{Path, Segment};

const DEFAULT_PARALLEL_THRESHOLD: usize = 512;

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct Options {
    /// FeatureCollections with at least this many features are validated in parallel.
    pub parallel_threshold: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// The top-level shape a document is expected to have.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Expect {
    GeoJson,
    Geometry,
    GeometryCollection,
    Feature,
    FeatureCollection,
}

impl FromStr for Expect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "geojson" | "any" => Ok(Expect::GeoJson),
            "geometry" => Ok(Expect::Geometry),
            "geometry-collection" => Ok(Expect::GeometryCollection),
            "feature" => Ok(Expect::Feature),
            "feature-collection" => Ok(Expect::FeatureCollection),
            other => Err(format!("unknown document kind: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Validator {
    options: Options,
}

impl Validator {
    pub fn new() -> Self {
        Validator::default()
    }

    pub fn with_options(options: Options) -> Self {
        Validator { options }
    }

    pub fn validate(&self, value: &Value) -> Result<(), ErrorTree> {
        self.validate_as(Expect::GeoJson, value)
    }

    /// Validates `value` as the given kind. Anything but [`Expect::GeoJson`]
    /// skips the top-level union and reports against that kind only.
    pub fn validate_as(&self, expect: Expect, value: &Value) -> Result<(), ErrorTree> {
        let mut ctx = Context::new(self.options);
        match expect {
            Expect::GeoJson => composite::geojson(value, &mut ctx),
            Expect::Geometry => geometry::geometry(value, &mut ctx),
            Expect::GeometryCollection => composite::geometry_collection(value, &mut ctx),
            Expect::Feature => composite::feature(value, &mut ctx),
            Expect::FeatureCollection => composite::feature_collection(value, &mut ctx),
        }
        let errors = ctx.into_errors();
        debug!(?expect, errors = errors.len(), "validated document");
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ErrorTree::new(errors))
        }
    }
}

/// Validates any GeoJSON object: a geometry, a GeometryCollection, a Feature
/// or a FeatureCollection.
pub fn validate(value: &Value) -> Result<(), ErrorTree> {
    Validator::new().validate(value)
}

/// Validates one of the six geometry types. GeometryCollections are rejected.
pub fn validate_geometry(value: &Value) -> Result<(), ErrorTree> {
    Validator::new().validate_as(Expect::Geometry, value)
}

pub fn validate_geometry_collection(value: &Value) -> Result<(), ErrorTree> {
    Validator::new().validate_as(Expect::GeometryCollection, value)
}

pub fn validate_feature(value: &Value) -> Result<(), ErrorTree> {
    Validator::new().validate_as(Expect::Feature, value)
}

pub fn validate_feature_collection(value: &Value) -> Result<(), ErrorTree> {
    Validator::new().validate_as(Expect::FeatureCollection, value)
}
