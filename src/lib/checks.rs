use super::error::{ErrorKind, JsonKind, ValidationError};
use super::path::Path;
use super::Options;
use serde_json::{Number, Value};

/// A structural check; failures go into the context at its current path.
pub(crate) type Check = fn(&Value, &mut Context);

/// Walk state of one validation call.
pub(crate) struct Context {
    path: Path,
    errors: Vec<ValidationError>,
    options: Options,
}

impl Context {
    pub fn new(options: Options) -> Self {
        Context {
            path: Path::root(),
            errors: vec![],
            options,
        }
    }

    /// A fresh context at the same path, for speculative or parallel work.
    pub fn branch(&self) -> Self {
        Context {
            path: self.path.clone(),
            errors: vec![],
            options: self.options,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn key<F: FnOnce(&mut Self)>(&mut self, key: &str, f: F) {
        self.path.push_key(key);
        f(self);
        self.path.pop();
    }

    pub fn index<F: FnOnce(&mut Self)>(&mut self, index: usize, f: F) {
        self.path.push_index(index);
        f(self);
        self.path.pop();
    }

    pub fn fail(&mut self, kind: ErrorKind, expected: impl Into<String>, found: JsonKind) {
        self.errors.push(ValidationError {
            path: self.path.clone(),
            kind,
            expected: expected.into(),
            found,
        });
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn extend(&mut self, errors: Vec<ValidationError>) {
        self.errors.extend(errors);
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }
}

pub(crate) fn literal(value: &Value, ctx: &mut Context, expected: &str) {
    match value {
        Value::String(tag) if tag == expected => {}
        Value::String(tag) => ctx.fail(
            ErrorKind::UnrecognizedTypeTag,
            format!("\"{}\", got \"{}\"", expected, tag),
            JsonKind::String,
        ),
        other => ctx.fail(
            ErrorKind::UnrecognizedTypeTag,
            format!("\"{}\"", expected),
            other.into(),
        ),
    }
}

pub(crate) fn any(_value: &Value, _ctx: &mut Context) {}

pub(crate) fn number(value: &Value, ctx: &mut Context) {
    if !value.is_number() {
        ctx.fail(ErrorKind::TypeMismatch, "number", value.into());
    }
}

pub(crate) fn string(value: &Value, ctx: &mut Context) {
    if !value.is_string() {
        ctx.fail(ErrorKind::TypeMismatch, "string", value.into());
    }
}

/// Every failing element is reported, not only the first.
pub(crate) fn array_of(value: &Value, ctx: &mut Context, element: &str, check: Check) {
    match value.as_array() {
        Some(items) => each(items, ctx, check),
        None => ctx.fail(
            ErrorKind::TypeMismatch,
            format!("array of {}", element),
            value.into(),
        ),
    }
}

pub(crate) fn each(items: &[Value], ctx: &mut Context, check: Check) {
    for (index, item) in items.iter().enumerate() {
        ctx.index(index, |ctx| check(item, ctx));
    }
}

pub(crate) fn number_array(value: &Value, ctx: &mut Context) {
    array_of(value, ctx, "numbers", number);
}

/// Leading `slots` are mandatory, any further elements must satisfy `rest`.
pub(crate) fn tuple_at_least(
    value: &Value,
    ctx: &mut Context,
    element: &str,
    slots: &[Check],
    rest: Check,
) {
    let items = match value.as_array() {
        Some(items) => items,
        None => {
            ctx.fail(
                ErrorKind::TypeMismatch,
                format!("array of {}", element),
                value.into(),
            );
            return;
        }
    };
    if items.len() < slots.len() {
        ctx.fail(
            ErrorKind::ShapeMismatch,
            format!("at least {} {}, got {}", slots.len(), element, items.len()),
            JsonKind::Array,
        );
    }
    for (index, item) in items.iter().enumerate() {
        let check = slots.get(index).copied().unwrap_or(rest);
        ctx.index(index, |ctx| check(item, ctx));
    }
}

/// Integers compare exactly; only pairs involving a float go through `f64`.
fn same_number(a: &Number, b: &Number) -> bool {
    if a.is_f64() || b.is_f64() {
        return match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        };
    }
    a.as_i64() == b.as_i64() && a.as_u64() == b.as_u64()
}

fn same_position(a: &Value, b: &Value) -> bool {
    match (a.as_array(), b.as_array()) {
        (Some(a), Some(b)) => {
            a.len() == b.len()
                && a.iter().zip(b).all(|(x, y)| match (x, y) {
                    (Value::Number(x), Value::Number(y)) => same_number(x, y),
                    _ => false,
                })
        }
        _ => false,
    }
}

/// True for rings of at least four positions whose last position repeats the
/// first. Self-intersection is not considered.
pub fn is_closed_loop(positions: &[Value]) -> bool {
    match (positions.first(), positions.last()) {
        (Some(first), Some(last)) => positions.len() >= 4 && same_position(first, last),
        _ => false,
    }
}
