//! Attribute normalization and group folding.
//!
//! The stored attribute list for a record is exactly what a `key=value` text
//! renderer would print for the same `with_attrs`/`with_group` chain, only
//! kept as a tree instead of dotted keys:
//!
//! - without open groups: call-site attributes first, then handler context;
//! - with open groups: handler context first, then one group attribute for
//!   the outermost open group, with call-site attributes at the bottom of the
//!   innermost one.

use crate::attr::{Attr, Value};

/// A group opened by `with_group` together with the attributes added to it
/// while it was the innermost open group.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenGroup {
    pub name: String,
    pub attrs: Vec<Attr>,
}

impl OpenGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
        }
    }
}

/// Drops empty attributes, inlines groups without a key into their parent
/// and drops groups left without members.
pub fn normalize(attrs: impl IntoIterator<Item = Attr>) -> Vec<Attr> {
    let mut out = Vec::new();
    for attr in attrs {
        push_normalized(&mut out, attr);
    }
    out
}

fn push_normalized(out: &mut Vec<Attr>, attr: Attr) {
    if attr.is_empty() {
        return;
    }
    let Attr { key, value } = attr;
    match value {
        Value::Group(nested) if key.is_empty() => {
            for a in nested {
                push_normalized(out, a);
            }
        }
        Value::Group(nested) => {
            let nested = normalize(nested);
            if !nested.is_empty() {
                out.push(Attr::group(key, nested));
            }
        }
        value => out.push(Attr { key, value }),
    }
}

/// Folds the open groups from innermost to outermost into a single group
/// attribute. `own` ends up after the innermost group's attributes.
///
/// Returns `None` when every group is empty.
pub fn fold_groups(groups: &[OpenGroup], own: Vec<Attr>) -> Option<Attr> {
    let mut tail = own;
    for group in groups.iter().rev() {
        let mut attrs = Vec::with_capacity(group.attrs.len() + tail.len());
        attrs.extend_from_slice(&group.attrs);
        attrs.append(&mut tail);
        if !attrs.is_empty() {
            tail.push(Attr::group(group.name.clone(), attrs));
        }
    }
    tail.pop()
}

/// Final attribute list for a record logged through a handler holding
/// `attrs` and `groups`.
pub fn flatten(attrs: &[Attr], groups: &[OpenGroup], own: Vec<Attr>) -> Vec<Attr> {
    let own = normalize(own);
    if groups.is_empty() {
        let mut out = own;
        out.extend_from_slice(attrs);
        return out;
    }

    let mut out = Vec::with_capacity(attrs.len() + 1);
    out.extend_from_slice(attrs);
    out.extend(fold_groups(groups, own));
    out
}
