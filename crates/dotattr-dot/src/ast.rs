use serde::{Deserialize, Serialize};

use dotattr_types::Span;

use crate::id::Id;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DotGraph {
    pub strict: bool,
    pub directed: bool,
    pub name: Option<Id>,
    pub body: GraphBody,
}

/// Statements of a graph or subgraph, merged by kind.
///
/// `attrs` collects both `graph [...]` statements and `key = value`
/// declarations. Defaults are kept apart from the nodes and edges they apply
/// to so that every attribute keeps its own source location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphBody {
    pub attrs: AttributeMap,
    pub node_defaults: AttributeMap,
    pub edge_defaults: AttributeMap,
    pub nodes: Vec<NodeDef>,
    pub edges: Vec<EdgeDef>,
    pub subgraphs: Vec<SubgraphDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDef {
    pub id: Id,
    pub attrs: AttributeMap,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeDef {
    pub from: NodeRef,
    pub to: NodeRef,
    pub attrs: AttributeMap,
}

/// An edge endpoint: `id[:port[:compass]]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRef {
    pub id: Id,
    pub port: Option<Id>,
    pub compass: Option<Id>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubgraphDef {
    pub name: Option<Id>,
    pub body: GraphBody,
}

/// A single `name = value` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: Id,
    pub name_span: Option<Span>,
    pub value_span: Option<Span>,
}

/// Attributes of one element, in insertion order. Setting an existing name
/// replaces its value in place.
///
/// When a source occurrence replaces an earlier source occurrence of the same
/// name, the earlier one is kept aside so that every value written in the
/// document can still be checked. Only the latest one is effective.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeMap {
    entries: Vec<Attribute>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    superseded: Vec<Attribute>,
}

// ---------------------------------------------------------------------------
// DotGraph
// ---------------------------------------------------------------------------

impl DotGraph {
    pub fn new(directed: bool) -> Self {
        Self {
            strict: false,
            directed,
            name: None,
            body: GraphBody::default(),
        }
    }

    /// Switch between `digraph` and `graph`. Edge names follow the change.
    pub fn set_directed(&mut self, directed: bool) {
        self.directed = directed;
    }

    pub fn edge_op(&self) -> &'static str {
        if self.directed {
            "->"
        } else {
            "--"
        }
    }

    /// Display name of an edge of this graph, e.g. `a->b` or `a--b`.
    pub fn edge_name(&self, edge: &EdgeDef) -> String {
        edge.name(self.directed)
    }

    /// All nodes, depth-first through subgraphs.
    pub fn all_nodes(&self) -> Vec<&NodeDef> {
        let mut out = Vec::new();
        self.body.collect_nodes(&mut out);
        out
    }

    /// All edges, depth-first through subgraphs.
    pub fn all_edges(&self) -> Vec<&EdgeDef> {
        let mut out = Vec::new();
        self.body.collect_edges(&mut out);
        out
    }
}

// ---------------------------------------------------------------------------
// GraphBody
// ---------------------------------------------------------------------------

impl GraphBody {
    pub fn node(&self, id: &str) -> Option<&NodeDef> {
        self.nodes.iter().find(|n| n.id.text() == id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut NodeDef> {
        self.nodes.iter_mut().find(|n| n.id.text() == id)
    }

    fn collect_nodes<'a>(&'a self, out: &mut Vec<&'a NodeDef>) {
        out.extend(self.nodes.iter());
        for sg in &self.subgraphs {
            sg.body.collect_nodes(out);
        }
    }

    fn collect_edges<'a>(&'a self, out: &mut Vec<&'a EdgeDef>) {
        out.extend(self.edges.iter());
        for sg in &self.subgraphs {
            sg.body.collect_edges(out);
        }
    }
}

// ---------------------------------------------------------------------------
// Nodes, edges, subgraphs
// ---------------------------------------------------------------------------

impl NodeDef {
    pub fn new(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            attrs: AttributeMap::new(),
        }
    }

    /// The node's identity name.
    pub fn name(&self) -> &Id {
        &self.id
    }

    pub fn set_name(&mut self, id: impl Into<Id>) {
        self.id = id.into();
    }
}

impl EdgeDef {
    pub fn new(from: impl Into<Id>, to: impl Into<Id>) -> Self {
        Self {
            from: NodeRef::new(from),
            to: NodeRef::new(to),
            attrs: AttributeMap::new(),
        }
    }

    /// Derived display name: endpoints joined by `->` or `--`.
    pub fn name(&self, directed: bool) -> String {
        let op = if directed { "->" } else { "--" };
        format!("{}{}{}", self.from, op, self.to)
    }
}

impl NodeRef {
    pub fn new(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            port: None,
            compass: None,
        }
    }
}

impl std::fmt::Display for NodeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)?;
        if let Some(port) = &self.port {
            write!(f, ":{port}")?;
        }
        if let Some(compass) = &self.compass {
            write!(f, ":{compass}")?;
        }
        Ok(())
    }
}

impl SubgraphDef {
    pub fn new(name: Option<Id>) -> Self {
        Self {
            name,
            body: GraphBody::default(),
        }
    }

    /// Whether Graphviz treats this subgraph as a cluster.
    pub fn is_cluster(&self) -> bool {
        self.name
            .as_ref()
            .is_some_and(|n| n.text().starts_with("cluster"))
    }
}

// ---------------------------------------------------------------------------
// AttributeMap
// ---------------------------------------------------------------------------

impl Attribute {
    pub fn new(name: impl Into<String>, value: Id) -> Self {
        Self {
            name: name.into(),
            value,
            name_span: None,
            value_span: None,
        }
    }
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.entries.iter().find(|a| a.name == name)
    }

    /// The raw value of `name`.
    pub fn value(&self, name: &str) -> Option<&Id> {
        self.get(name).map(|a| &a.value)
    }

    /// The decoded text of `name`.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.value(name).map(Id::text)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Insert or replace; returns the previous attribute of that name.
    pub fn insert(&mut self, attr: Attribute) -> Option<Attribute> {
        let from_source = attr.value_span.is_some();
        let previous = match self.entries.iter_mut().find(|a| a.name == attr.name) {
            Some(existing) => Some(std::mem::replace(existing, attr)),
            None => {
                self.entries.push(attr);
                None
            }
        };
        if let Some(prev) = previous.as_ref().filter(|p| from_source && p.value_span.is_some()) {
            self.superseded.push(prev.clone());
        }
        previous
    }

    /// Set a value without source location. Earlier source occurrences of
    /// `name` are forgotten.
    pub fn set(&mut self, name: &str, value: Id) -> Option<Id> {
        self.superseded.retain(|a| a.name != name);
        self.insert(Attribute::new(name, value)).map(|a| a.value)
    }

    pub fn remove(&mut self, name: &str) -> Option<Attribute> {
        self.superseded.retain(|a| a.name != name);
        let pos = self.entries.iter().position(|a| a.name == name)?;
        Some(self.entries.remove(pos))
    }

    /// Every occurrence written in the source, replaced ones included,
    /// followed by the effective attributes.
    pub fn occurrences(&self) -> impl Iterator<Item = &Attribute> {
        self.superseded.iter().chain(&self.entries)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Extend<Attribute> for AttributeMap {
    fn extend<T: IntoIterator<Item = Attribute>>(&mut self, iter: T) {
        for attr in iter {
            self.insert(attr);
        }
    }
}

impl<'a> IntoIterator for &'a AttributeMap {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
