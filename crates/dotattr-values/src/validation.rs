//! Document validation: lint rules and diagnostics.
//!
//! Checks every attribute of a parsed [`DotGraph`] against the registry.
//! Call [`validate`] for advisory diagnostics or [`validate_or_raise`] to
//! fail on `Error`-severity issues. Value problems never surface as `Err`
//! from [`validate`]; each one becomes a [`Diagnostic`] anchored at the
//! attribute value in the source.

use dotattr_dot::{AttributeMap, DotGraph, GraphBody};
use dotattr_types::{DotAttrError, ElementKind, Span};
use serde::Serialize;

use crate::config::ValidationConfig;
use crate::context::ResolutionContext;
use crate::registry::{descriptor, AttributeDescriptor};

// ---------------------------------------------------------------------------
// Diagnostic types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub rule: String,
    pub severity: Severity,
    pub kind: ElementKind,
    /// Node id, edge name or graph name; `None` for anonymous graphs.
    pub element: Option<String>,
    pub attribute: String,
    /// Source location of the attribute value, when it came from a document.
    pub span: Option<Span>,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Diagnostic {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

pub(crate) fn syntax_message(value: &str, grammar: &str, detail: &str) -> String {
    format!("The value '{value}' is not a syntactically correct {grammar}: {detail}")
}

pub(crate) fn semantic_message(value_type: &str, value: &str, detail: &str) -> String {
    format!("The {value_type} value '{value}' is not semantically correct: {detail}")
}

// ---------------------------------------------------------------------------
// Scope walking
// ---------------------------------------------------------------------------

/// One attribute block together with the context it is checked in.
struct Site<'g> {
    kind: ElementKind,
    element: Option<String>,
    attrs: &'g AttributeMap,
    ctx: ResolutionContext,
}

/// Enclosing declarations, nearest first.
#[derive(Default)]
struct Scope<'g> {
    graphs: Vec<&'g AttributeMap>,
    node_defaults: Vec<&'g AttributeMap>,
    edge_defaults: Vec<&'g AttributeMap>,
}

impl<'g> Scope<'g> {
    fn enter(&self, body: &'g GraphBody) -> Self {
        let nearest_first = |own: &'g AttributeMap, outer: &[&'g AttributeMap]| {
            std::iter::once(own).chain(outer.iter().copied()).collect()
        };
        Self {
            graphs: nearest_first(&body.attrs, &self.graphs),
            node_defaults: nearest_first(&body.node_defaults, &self.node_defaults),
            edge_defaults: nearest_first(&body.edge_defaults, &self.edge_defaults),
        }
    }
}

fn scope_context(
    kind: ElementKind,
    attrs: &AttributeMap,
    defaults: &[&AttributeMap],
    graphs: &[&AttributeMap],
) -> ResolutionContext {
    let ctx = defaults
        .iter()
        .fold(ResolutionContext::for_element(kind, attrs), |ctx, d| {
            ctx.with_defaults(d)
        });
    graphs.iter().fold(ctx, |ctx, g| ctx.with_graph(g))
}

fn collect_sites(graph: &DotGraph) -> Vec<Site<'_>> {
    let mut sites = Vec::new();
    let name = graph.name.as_ref().map(|n| n.text().to_string());
    walk(graph, &graph.body, ElementKind::Graph, name, &Scope::default(), &mut sites);
    sites
}

fn walk<'g>(
    graph: &'g DotGraph,
    body: &'g GraphBody,
    kind: ElementKind,
    name: Option<String>,
    outer: &Scope<'g>,
    sites: &mut Vec<Site<'g>>,
) {
    let scope = outer.enter(body);

    sites.push(Site {
        kind,
        element: name,
        attrs: &body.attrs,
        ctx: scope_context(kind, &body.attrs, &[], &outer.graphs),
    });
    sites.push(Site {
        kind: ElementKind::Node,
        element: None,
        attrs: &body.node_defaults,
        ctx: scope_context(ElementKind::Node, &body.node_defaults, &outer.node_defaults, &scope.graphs),
    });
    sites.push(Site {
        kind: ElementKind::Edge,
        element: None,
        attrs: &body.edge_defaults,
        ctx: scope_context(ElementKind::Edge, &body.edge_defaults, &outer.edge_defaults, &scope.graphs),
    });
    for node in &body.nodes {
        sites.push(Site {
            kind: ElementKind::Node,
            element: Some(node.id.text().to_string()),
            attrs: &node.attrs,
            ctx: scope_context(ElementKind::Node, &node.attrs, &scope.node_defaults, &scope.graphs),
        });
    }
    for edge in &body.edges {
        sites.push(Site {
            kind: ElementKind::Edge,
            element: Some(graph.edge_name(edge)),
            attrs: &edge.attrs,
            ctx: scope_context(ElementKind::Edge, &edge.attrs, &scope.edge_defaults, &scope.graphs),
        });
    }
    for sub in &body.subgraphs {
        let sub_name = sub.name.as_ref().map(|n| n.text().to_string());
        let sub_kind = ElementKind::for_subgraph(sub_name.as_deref());
        walk(graph, &sub.body, sub_kind, sub_name, &scope, sites);
    }
}

/// Every registered attribute occurrence of the graph with its descriptor and
/// context. Repeated settings of one name are all included.
fn registered_attributes<'g>(
    sites: &'g [Site<'g>],
) -> impl Iterator<Item = (&'g Site<'g>, &'g dotattr_dot::Attribute, &'static AttributeDescriptor)> {
    sites.iter().flat_map(|site| {
        site.attrs
            .occurrences()
            .filter_map(move |a| descriptor(site.kind, &a.name).map(|d| (site, a, d)))
    })
}

fn diagnostic(
    rule: &str,
    severity: Severity,
    site: &Site<'_>,
    attr: &dotattr_dot::Attribute,
    message: String,
) -> Diagnostic {
    Diagnostic {
        rule: rule.into(),
        severity,
        kind: site.kind,
        element: site.element.clone(),
        attribute: attr.name.clone(),
        span: attr.value_span,
        message,
    }
}

// ---------------------------------------------------------------------------
// LintRule trait
// ---------------------------------------------------------------------------

pub trait LintRule: Send + Sync {
    fn name(&self) -> &str;
    fn apply(&self, graph: &DotGraph, config: &ValidationConfig) -> Vec<Diagnostic>;
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

struct AttributeSyntaxRule;
impl LintRule for AttributeSyntaxRule {
    fn name(&self) -> &str { "attribute_syntax" }
    fn apply(&self, graph: &DotGraph, _config: &ValidationConfig) -> Vec<Diagnostic> {
        let sites = collect_sites(graph);
        registered_attributes(&sites)
            .filter_map(|(site, attr, desc)| {
                let raw = attr.value.text();
                desc.parse(raw).err().map(|e| {
                    let message = syntax_message(raw, desc.grammar.name(), &e.detail);
                    diagnostic(self.name(), Severity::Error, site, attr, message)
                })
            })
            .collect()
    }
}

struct AttributeSemanticsRule;
impl LintRule for AttributeSemanticsRule {
    fn name(&self) -> &str { "attribute_semantics" }
    fn apply(&self, graph: &DotGraph, _config: &ValidationConfig) -> Vec<Diagnostic> {
        let sites = collect_sites(graph);
        let mut diagnostics = Vec::new();
        for (site, attr, desc) in registered_attributes(&sites) {
            let raw = attr.value.text();
            let Ok(value) = desc.parse(raw) else {
                continue;
            };
            for finding in desc.validate(&value, &site.ctx) {
                let message = semantic_message(desc.grammar.name(), raw, &finding.detail);
                diagnostics.push(diagnostic(self.name(), finding.severity, site, attr, message));
            }
        }
        diagnostics
    }
}

struct UnknownAttributeRule;
impl LintRule for UnknownAttributeRule {
    fn name(&self) -> &str { "unknown_attribute" }
    fn apply(&self, graph: &DotGraph, config: &ValidationConfig) -> Vec<Diagnostic> {
        if !config.report_unknown_attributes {
            return vec![];
        }
        let sites = collect_sites(graph);
        sites
            .iter()
            .flat_map(|site| site.attrs.occurrences().map(move |a| (site, a)))
            .filter(|(site, attr)| descriptor(site.kind, &attr.name).is_none())
            .map(|(site, attr)| {
                let message = format!("Unknown {} attribute '{}'.", site.kind, attr.name);
                diagnostic(self.name(), Severity::Warning, site, attr, message)
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run all lint rules with the default configuration.
pub fn validate(graph: &DotGraph) -> Vec<Diagnostic> {
    validate_with_config(graph, &ValidationConfig::default())
}

/// Run all lint rules. Diagnostics are ordered by source position.
pub fn validate_with_config(graph: &DotGraph, config: &ValidationConfig) -> Vec<Diagnostic> {
    let rules: Vec<Box<dyn LintRule>> = vec![
        Box::new(AttributeSyntaxRule),
        Box::new(AttributeSemanticsRule),
        Box::new(UnknownAttributeRule),
    ];

    let mut diagnostics = Vec::new();
    for rule in &rules {
        diagnostics.extend(rule.apply(graph, config));
    }

    diagnostics.sort_by_key(|d| d.span.map_or(usize::MAX, |s| s.offset));

    tracing::debug!(
        diagnostics = diagnostics.len(),
        errors = diagnostics.iter().filter(|d| d.is_error()).count(),
        "Validated document"
    );
    diagnostics
}

/// Run all lint rules; return `Err` if any `Error`-severity diagnostic found.
pub fn validate_or_raise(graph: &DotGraph) -> dotattr_types::Result<Vec<Diagnostic>> {
    let diagnostics = validate(graph);
    let errors: Vec<_> = diagnostics.iter().filter(|d| d.is_error()).collect();
    if !errors.is_empty() {
        let messages: Vec<_> = errors.iter().map(|d| d.message.clone()).collect();
        return Err(DotAttrError::ValidationError(messages.join("; ")));
    }
    Ok(diagnostics)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn check(dot: &str) -> Vec<Diagnostic> {
        validate(&dotattr_dot::parse(dot).unwrap())
    }

    fn messages(dot: &str) -> Vec<String> {
        check(dot).into_iter().map(|d| d.message).collect()
    }

    #[test]
    fn valid_document_passes() {
        let diags = check(
            r##"digraph G {
                nodesep=0.5 bgcolor="#ffffff"
                node [shape=box style="filled,striped" fillcolor="red:blue"]
                a [color=navyblue]
                a -> b [arrowhead=onormal penwidth=2]
            }"##,
        );
        assert!(diags.is_empty(), "{diags:?}");
    }

    #[test]
    fn syntax_errors_carry_value_span() {
        let src = "graph { nodesep=abc }";
        let diags = check(src);
        assert_eq!(diags.len(), 1);
        let d = &diags[0];
        assert_eq!(d.rule, "attribute_syntax");
        assert_eq!(d.kind, ElementKind::Graph);
        assert_eq!(d.attribute, "nodesep");
        let span = d.span.unwrap();
        assert_eq!(&src[span.offset..span.end()], "abc");
        assert!(d
            .message
            .starts_with("The value 'abc' is not a syntactically correct double: "));
    }

    #[test]
    fn overridden_values_are_still_checked() {
        let src = "graph { a [sides=-1]; a [sides=2] }";
        let diags = check(src);
        assert_eq!(diags.len(), 1);
        let span = diags[0].span.unwrap();
        assert_eq!(&src[span.offset..span.end()], "-1");
        assert_eq!(diags[0].element.as_deref(), Some("a"));

        let src = "graph { nodesep=0 nodesep=1 node [shape=box, shape=bogus, shape=box] }";
        let diags = check(src);
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].attribute, "nodesep");
        assert_eq!(diags[1].attribute, "shape");
        assert!(diags[0].span.unwrap().offset < diags[1].span.unwrap().offset);

        assert!(check("digraph { a -> b [arrowhead=normal arrowhead=boxnone] }")[0]
            .message
            .ends_with("The shape 'none' may not be the last shape."));
    }

    #[test]
    fn semantic_messages_drop_the_setter_prefix() {
        assert_eq!(
            messages("graph { nodesep=0.0199 }"),
            vec!["The double value '0.0199' is not semantically correct: Value may not be smaller than 0.02."]
        );
    }

    #[test]
    fn colorscheme_resolves_through_scopes() {
        assert_eq!(
            messages("graph { colorscheme=brbg10 bgcolor=blue }"),
            vec!["The colorList value 'blue' is not semantically correct: The 'blue' color is not valid within the 'brbg10' color scheme."]
        );
        assert!(check("graph { colorscheme=brbg10 a [color=3] }").is_empty());
        assert!(check("graph { node [colorscheme=accent3] a [color=2] }").is_empty());
        assert_eq!(check("graph { node [colorscheme=accent3] a [color=red] }").len(), 1);
        assert!(check("graph { colorscheme=blues9 subgraph s { colorscheme=svg a [color=fuchsia] } }").is_empty());
        assert!(check("graph { colorscheme=blues9 subgraph s { a [color=9] } }").is_empty());
    }

    #[test]
    fn node_defaults_shape_applies_to_striped_nodes() {
        assert!(check("graph { node [shape=box] a [style=striped] }").is_empty());
        assert!(check("graph { subgraph s { node [shape=box] } a [style=striped] }").len() == 1);
        assert!(check("graph { node [shape=box] subgraph s { a [style=striped] } }").is_empty());
    }

    #[test]
    fn cluster_and_subgraph_kinds() {
        assert!(check("graph { subgraph cluster_a { style=striped } }").is_empty());
        let diags = check("graph { subgraph a { style=striped } }");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, ElementKind::Subgraph);
        assert_eq!(diags[0].element.as_deref(), Some("a"));
    }

    #[test]
    fn each_arrow_problem_is_reported() {
        let diags = check("digraph { a -> b [arrowhead=ediamondinvempty arrowtail=ldotrdot] }");
        let warnings = diags.iter().filter(|d| d.severity == Severity::Warning).count();
        let errors = diags.iter().filter(|d| d.is_error()).count();
        assert_eq!(warnings, 2);
        assert_eq!(errors, 2);
        assert!(diags.iter().all(|d| d.element.as_deref() == Some("a->b")));
    }

    #[test]
    fn diagnostics_follow_document_order() {
        let diags = check("graph {\n a [sides=-1]\n b -- c [weight=-1]\n nodesep=0\n}");
        let attrs: Vec<_> = diags.iter().map(|d| d.attribute.as_str()).collect();
        assert_eq!(attrs, vec!["sides", "weight", "nodesep"]);
    }

    #[test]
    fn unknown_attributes_only_reported_on_request() {
        let graph = dotattr_dot::parse("graph { a [frobnicate=1] }").unwrap();
        assert!(validate(&graph).is_empty());
        let config = ValidationConfig {
            report_unknown_attributes: true,
            ..Default::default()
        };
        let diags = validate_with_config(&graph, &config);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message, "Unknown node attribute 'frobnicate'.");
        assert_eq!(diags[0].severity, Severity::Warning);
    }

    #[test]
    fn validate_or_raise_joins_error_messages() {
        let graph = dotattr_dot::parse("graph { nodesep=0 ranksep=0 }").unwrap();
        let err = validate_or_raise(&graph).unwrap_err();
        let text = err.to_string();
        assert!(text.contains("smaller than 0.02.; The double value"), "{text}");

        let ok = dotattr_dot::parse("digraph { a -> b [arrowhead=open] }").unwrap();
        assert_eq!(validate_or_raise(&ok).unwrap().len(), 1);
    }

    #[test]
    fn revalidation_is_deterministic() {
        let graph = dotattr_dot::parse("graph { a [style=striped color=5] b [sides=-2] }").unwrap();
        assert_eq!(validate(&graph), validate(&graph));
    }
}
