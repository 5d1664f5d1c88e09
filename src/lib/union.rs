use super::checks::{Check, Context};
use super::error::{ErrorKind, JsonKind};
use itertools::Itertools;
use serde_json::Value;
use tracing::trace;

/// A union member selected by its `type` tag.
pub(crate) struct Variant {
    pub tag: &'static str,
    pub check: Check,
}

/// A union member tried speculatively, named for error messages.
pub(crate) struct Alternative {
    pub name: &'static str,
    pub check: Check,
}

fn tags(variants: &[Variant]) -> String {
    variants.iter().map(|variant| variant.tag).join(", ")
}

/// Reads `type` and runs only the variant it names.
///
/// Objects without a usable tag fail with a single `UnrecognizedTypeTag` at the
/// object itself; no variant is attempted.
pub(crate) fn dispatch(value: &Value, ctx: &mut Context, union: &str, variants: &[Variant]) {
    let object = match value.as_object() {
        Some(object) => object,
        None => {
            ctx.fail(
                ErrorKind::TypeMismatch,
                format!("{} object", union),
                value.into(),
            );
            return;
        }
    };

    let tag = match object.get("type") {
        Some(Value::String(tag)) => tag,
        Some(other) => {
            ctx.fail(
                ErrorKind::UnrecognizedTypeTag,
                format!("{} type tag, one of {}", union, tags(variants)),
                other.into(),
            );
            return;
        }
        None => {
            ctx.fail(
                ErrorKind::UnrecognizedTypeTag,
                format!("{} type tag, one of {}", union, tags(variants)),
                JsonKind::Missing,
            );
            return;
        }
    };

    match variants.iter().find(|variant| variant.tag == tag) {
        Some(variant) => {
            trace!(path = %ctx.path(), tag = variant.tag, "dispatch");
            (variant.check)(value, ctx);
        }
        None => ctx.fail(
            ErrorKind::UnrecognizedTypeTag,
            format!(
                "{} type tag, one of {}; got \"{}\"",
                union,
                tags(variants),
                tag
            ),
            JsonKind::String,
        ),
    }
}

/// Tries each alternative in order and stops at the first full match.
pub(crate) fn any_of(value: &Value, ctx: &mut Context, alternatives: &[Alternative]) {
    for alternative in alternatives {
        let mut scratch = ctx.branch();
        (alternative.check)(value, &mut scratch);
        if scratch.is_clean() {
            return;
        }
    }
    let names = alternatives.iter().map(|alternative| alternative.name).join(" or ");
    ctx.fail(ErrorKind::UnionExhausted, names, value.into());
}
