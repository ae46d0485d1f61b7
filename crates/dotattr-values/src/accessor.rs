//! Typed get/set access to the attributes of graph elements.
//!
//! Setters parse and validate before storing anything; a failed set leaves
//! the element untouched. String setters store the given text unchanged,
//! typed setters store the canonical serialization. Warnings are returned
//! alongside a successful set. Changing `shape` or `colorscheme` is refused
//! when it would invalidate a stored `style` or color that currently passes.

use dotattr_dot::{AttributeMap, DotGraph, EdgeDef, Id, NodeDef, SubgraphDef};
use dotattr_types::{DotAttrError, ElementKind, Result};

use crate::context::{ResolutionContext, COLORSCHEME, SHAPE};
use crate::registry::{descriptor, AttributeDescriptor};
use crate::serialize::serialize;
use crate::validation::{semantic_message, Diagnostic, Severity};
use crate::value::ParsedValue;

/// An element that carries attributes.
pub trait AttributeHolder {
    fn element_kind(&self) -> ElementKind;
    fn attributes(&self) -> &AttributeMap;
    fn attributes_mut(&mut self) -> &mut AttributeMap;
}

impl AttributeHolder for DotGraph {
    fn element_kind(&self) -> ElementKind {
        ElementKind::Graph
    }
    fn attributes(&self) -> &AttributeMap {
        &self.body.attrs
    }
    fn attributes_mut(&mut self) -> &mut AttributeMap {
        &mut self.body.attrs
    }
}

impl AttributeHolder for SubgraphDef {
    fn element_kind(&self) -> ElementKind {
        ElementKind::for_subgraph(self.name.as_ref().map(Id::text))
    }
    fn attributes(&self) -> &AttributeMap {
        &self.body.attrs
    }
    fn attributes_mut(&mut self) -> &mut AttributeMap {
        &mut self.body.attrs
    }
}

impl AttributeHolder for NodeDef {
    fn element_kind(&self) -> ElementKind {
        ElementKind::Node
    }
    fn attributes(&self) -> &AttributeMap {
        &self.attrs
    }
    fn attributes_mut(&mut self) -> &mut AttributeMap {
        &mut self.attrs
    }
}

impl AttributeHolder for EdgeDef {
    fn element_kind(&self) -> ElementKind {
        ElementKind::Edge
    }
    fn attributes(&self) -> &AttributeMap {
        &self.attrs
    }
    fn attributes_mut(&mut self) -> &mut AttributeMap {
        &mut self.attrs
    }
}

// ---------------------------------------------------------------------------
// Getters
// ---------------------------------------------------------------------------

pub fn get_raw<'e, H: AttributeHolder + ?Sized>(el: &'e H, name: &str) -> Option<&'e Id> {
    el.attributes().value(name)
}

pub fn get<'e, H: AttributeHolder + ?Sized>(el: &'e H, name: &str) -> Option<&'e str> {
    el.attributes().text(name)
}

/// Decode the stored value. `None` when the attribute is unset, not
/// registered for the element kind, or does not parse.
pub fn get_parsed<H: AttributeHolder + ?Sized>(el: &H, name: &str) -> Option<ParsedValue> {
    let kind = el.element_kind();
    let desc = descriptor(kind, name)?;
    let raw = get(el, name)?;
    match desc.parse(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!(%kind, name, raw, detail = %e, "Stored attribute value does not parse");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Setters
// ---------------------------------------------------------------------------

/// Parse, validate and store `value` as written, resolving colors and shapes
/// from the element's own attributes.
pub fn set<H: AttributeHolder + ?Sized>(el: &mut H, name: &str, value: &str) -> Result<Vec<Diagnostic>> {
    let ctx = ResolutionContext::for_element(el.element_kind(), el.attributes());
    set_in_context(el, name, value, &ctx)
}

/// Like [`set`], with a caller-built context, e.g. one that knows the
/// enclosing graph's `colorscheme`.
pub fn set_in_context<H: AttributeHolder + ?Sized>(
    el: &mut H,
    name: &str,
    value: &str,
    ctx: &ResolutionContext,
) -> Result<Vec<Diagnostic>> {
    let kind = el.element_kind();
    let warnings = match descriptor(kind, name) {
        Some(desc) => {
            let parsed = desc.parse(value).map_err(|e| DotAttrError::SyntaxError {
                kind,
                name: name.into(),
                value: value.into(),
                grammar: desc.grammar.name().into(),
                detail: e.detail,
            })?;
            let warnings = check(kind, desc, value, &parsed, ctx)?;
            check_dependents(el, desc, value, ctx)?;
            warnings
        }
        None => Vec::new(),
    };
    el.attributes_mut().set(name, Id::infer(value));
    tracing::debug!(%kind, name, value, warnings = warnings.len(), "Set attribute");
    Ok(warnings)
}

/// Validate a typed value and store its canonical text.
///
/// The value must be of the attribute's type. A single color is accepted
/// for a color list, and an int for a double.
pub fn set_parsed<H: AttributeHolder + ?Sized>(
    el: &mut H,
    name: &str,
    value: ParsedValue,
) -> Result<Vec<Diagnostic>> {
    let kind = el.element_kind();
    let ctx = ResolutionContext::for_element(kind, el.attributes());
    let (value, warnings) = match descriptor(kind, name) {
        Some(desc) => {
            let actual = value.type_name();
            let value = desc
                .grammar
                .coerce(value)
                .ok_or_else(|| DotAttrError::ValueMismatch {
                    kind,
                    name: name.into(),
                    expected: desc.grammar.name().into(),
                    actual: actual.into(),
                })?;
            let text = serialize(&value);
            let warnings = check(kind, desc, &text, &value, &ctx)?;
            check_dependents(el, desc, &text, &ctx)?;
            (value, warnings)
        }
        None => (value, Vec::new()),
    };
    let text = serialize(&value);
    tracing::debug!(%kind, name, value = %text, "Set parsed attribute");
    el.attributes_mut().set(name, Id::infer(text));
    Ok(warnings)
}

/// Remove an attribute, returning its previous value.
pub fn unset<H: AttributeHolder + ?Sized>(el: &mut H, name: &str) -> Option<Id> {
    let removed = el.attributes_mut().remove(name).map(|a| a.value);
    if removed.is_some() {
        tracing::debug!(kind = %el.element_kind(), name, "Unset attribute");
    }
    removed
}

/// Run the validators; the first error aborts, warnings are returned.
fn check(
    kind: ElementKind,
    desc: &AttributeDescriptor,
    raw: &str,
    value: &ParsedValue,
    ctx: &ResolutionContext,
) -> Result<Vec<Diagnostic>> {
    let findings = desc.validate(value, ctx);
    if let Some(error) = findings.iter().find(|f| f.is_error()) {
        return Err(DotAttrError::SemanticError {
            kind,
            name: desc.name.into(),
            value: raw.into(),
            value_type: desc.grammar.name().into(),
            detail: error.detail.clone(),
        });
    }
    Ok(findings
        .into_iter()
        .map(|f| Diagnostic {
            rule: "attribute_semantics".into(),
            severity: Severity::Warning,
            kind,
            element: None,
            attribute: desc.name.into(),
            span: None,
            message: semantic_message(desc.grammar.name(), raw, &f.detail),
        })
        .collect())
}

/// Stored attributes that resolve against `name`.
fn dependents(name: &str) -> &'static [&'static str] {
    match name {
        SHAPE => &["style"],
        COLORSCHEME => &[
            "bgcolor",
            "color",
            "fillcolor",
            "fontcolor",
            "labelfontcolor",
            "pencolor",
        ],
        _ => &[],
    }
}

/// Refuse a new `shape` or `colorscheme` that turns a passing stored value
/// into an error. Values that already fail are left to the document pass.
fn check_dependents<H: AttributeHolder + ?Sized>(
    el: &H,
    desc: &AttributeDescriptor,
    value: &str,
    ctx: &ResolutionContext,
) -> Result<()> {
    let kind = el.element_kind();
    let mut next = ctx.clone();
    match desc.name {
        SHAPE if kind == ElementKind::Node => next.own_shape = Some(value.to_string()),
        COLORSCHEME => next.element_scheme = Some(value.to_string()),
        _ => return Ok(()),
    }
    for &dependent in dependents(desc.name) {
        let (Some(dep), Some(stored)) = (descriptor(kind, dependent), get_parsed(el, dependent)) else {
            continue;
        };
        if dep.validate(&stored, ctx).iter().any(|f| f.is_error()) {
            continue;
        }
        if let Some(error) = dep.validate(&stored, &next).into_iter().find(|f| f.is_error()) {
            return Err(DotAttrError::SemanticError {
                kind,
                name: desc.name.into(),
                value: value.into(),
                value_type: desc.grammar.name().into(),
                detail: error.detail,
            });
        }
    }
    Ok(())
}
