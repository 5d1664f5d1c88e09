use super::checks::{literal, number_array, Check, Context};
use super::error::{ErrorKind, JsonKind};
use serde_json::Value;

pub(crate) struct Member {
    pub key: &'static str,
    pub check: Check,
}

/// Optional bounding box, allowed on every GeoJSON object.
pub(crate) const BBOX: Member = Member {
    key: "bbox",
    check: number_array,
};

/// A GeoJSON object: a `type` tag plus required and optional members.
///
/// Members not listed are foreign members and pass through unchecked.
pub(crate) struct ObjectShape {
    pub tag: &'static str,
    pub required: &'static [Member],
    pub optional: &'static [Member],
}

impl ObjectShape {
    pub fn check(&self, value: &Value, ctx: &mut Context) {
        let object = match value.as_object() {
            Some(object) => object,
            None => {
                ctx.fail(
                    ErrorKind::TypeMismatch,
                    format!("{} object", self.tag),
                    value.into(),
                );
                return;
            }
        };

        match object.get("type") {
            Some(tag) => ctx.key("type", |ctx| literal(tag, ctx, self.tag)),
            None => ctx.key("type", |ctx| {
                ctx.fail(
                    ErrorKind::UnrecognizedTypeTag,
                    format!("type tag \"{}\"", self.tag),
                    JsonKind::Missing,
                )
            }),
        }

        for member in self.required {
            ctx.key(member.key, |ctx| match object.get(member.key) {
                Some(value) => (member.check)(value, ctx),
                None => ctx.fail(
                    ErrorKind::MissingRequiredKey,
                    format!("member \"{}\"", member.key),
                    JsonKind::Missing,
                ),
            });
        }

        for member in self.optional {
            if let Some(value) = object.get(member.key) {
                ctx.key(member.key, |ctx| (member.check)(value, ctx));
            }
        }
    }
}
