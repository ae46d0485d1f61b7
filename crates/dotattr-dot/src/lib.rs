//! DOT document reader for the dotattr workspace.
//!
//! Parses `strict? (graph|digraph) Name? { ... }` with nodes, edges, subgraphs
//! and attribute statements. Attribute values are kept raw, as [`Id`]s with
//! their quoting and source span, so the value engine can check them later.
//!
//! # Example
//! ```
//! let dot = r#"digraph Flow { start -> process [color=red] }"#;
//! let graph = dotattr_dot::parse(dot).unwrap();
//! assert_eq!(graph.name.as_ref().map(|n| n.text()), Some("Flow"));
//! assert_eq!(graph.body.edges[0].attrs.text("color"), Some("red"));
//! ```

pub mod ast;
pub mod id;
mod parser;

pub use ast::*;
pub use id::{Id, IdKind};
pub use parser::parse;

#[cfg(test)]
mod tests {
    use super::*;
    use dotattr_types::DotAttrError;

    #[test]
    fn parse_simple_linear_chain() {
        let input = "digraph Test { start -> plan -> done }";
        let graph = parse(input).unwrap();
        assert!(graph.directed);
        assert_eq!(graph.name, Some(Id::bare("Test")));
        assert_eq!(graph.body.edges.len(), 2);
        assert_eq!(graph.body.edges[0].from.id.text(), "start");
        assert_eq!(graph.body.edges[0].to.id.text(), "plan");
        assert_eq!(graph.body.edges[1].from.id.text(), "plan");
        assert_eq!(graph.body.edges[1].to.id.text(), "done");
        assert!(graph.body.node("start").is_some());
        assert!(graph.body.node("plan").is_some());
        assert!(graph.body.node("done").is_some());
    }

    #[test]
    fn parse_node_with_attributes() {
        let input = r#"digraph G {
            start [shape="Mdiamond", label=Begin]
        }"#;
        let graph = parse(input).unwrap();
        let node = graph.body.node("start").unwrap();
        assert_eq!(node.attrs.value("shape"), Some(&Id::quoted("Mdiamond")));
        assert_eq!(node.attrs.value("label"), Some(&Id::bare("Begin")));
    }

    #[test]
    fn value_span_points_at_value_token() {
        let input = r##"graph { a [color="#ff0000"] }"##;
        let graph = parse(input).unwrap();
        let attr = graph.body.node("a").unwrap().attrs.get("color").unwrap();
        let span = attr.value_span.unwrap();
        assert_eq!(&input[span.offset..span.end()], "\"#ff0000\"");
        let name_span = attr.name_span.unwrap();
        assert_eq!(&input[name_span.offset..name_span.end()], "color");
    }

    #[test]
    fn chained_edge_expansion_shares_attributes() {
        let input = r#"digraph G {
            A -> B -> C [arrowhead=vee]
        }"#;
        let graph = parse(input).unwrap();
        assert_eq!(graph.body.edges.len(), 2);
        assert_eq!(graph.body.edges[0].attrs.text("arrowhead"), Some("vee"));
        assert_eq!(graph.body.edges[1].attrs.text("arrowhead"), Some("vee"));
        assert_eq!(
            graph.body.edges[0].attrs.get("arrowhead").unwrap().value_span,
            graph.body.edges[1].attrs.get("arrowhead").unwrap().value_span
        );
    }

    #[test]
    fn parse_cluster_subgraph_keeps_defaults_apart() {
        let input = r#"digraph G {
            subgraph cluster_inner {
                node [shape=box]
                A -> B
            }
        }"#;
        let graph = parse(input).unwrap();
        assert_eq!(graph.body.subgraphs.len(), 1);
        let sg = &graph.body.subgraphs[0];
        assert!(sg.is_cluster());
        assert_eq!(sg.name.as_ref().map(Id::text), Some("cluster_inner"));
        assert_eq!(sg.body.node_defaults.text("shape"), Some("box"));
        assert!(!sg.body.node("A").unwrap().attrs.contains("shape"));
        assert_eq!(sg.body.edges.len(), 1);
        assert_eq!(graph.all_nodes().len(), 2);
        assert_eq!(graph.all_edges().len(), 1);
    }

    #[test]
    fn anonymous_subgraph() {
        let graph = parse("graph { { rank=same; a b } }").unwrap();
        let sg = &graph.body.subgraphs[0];
        assert!(sg.name.is_none());
        assert!(!sg.is_cluster());
        assert_eq!(sg.body.attrs.text("rank"), Some("same"));
        assert_eq!(sg.body.nodes.len(), 2);
    }

    #[test]
    fn comment_stripping() {
        let input = r#"
            // This is a comment
            # preprocessor-style line
            digraph G {
                /* block comment */
                A -> B // inline comment
            }
        "#;
        let graph = parse(input).unwrap();
        assert_eq!(graph.body.edges.len(), 1);
        assert_eq!(graph.body.edges[0].from.id.text(), "A");
    }

    #[test]
    fn undirected_graph_and_edge_names() {
        let mut graph = parse("strict graph G { A -- B }").unwrap();
        assert!(graph.strict);
        assert!(!graph.directed);
        let edge = graph.body.edges[0].clone();
        assert_eq!(graph.edge_name(&edge), "A--B");
        graph.set_directed(true);
        assert_eq!(graph.edge_name(&edge), "A->B");
    }

    #[test]
    fn reject_mismatched_edge_operators() {
        let err = parse("digraph G { A -- B }").unwrap_err();
        assert!(err.to_string().contains("'--'"));
        let err = parse("graph G { A -> B }").unwrap_err();
        assert!(err.to_string().contains("'->'"));
    }

    #[test]
    fn parse_graph_attrs() {
        let input = r#"digraph G {
            graph [rankdir=LR]
            label = "My Graph"
        }"#;
        let graph = parse(input).unwrap();
        assert_eq!(graph.body.attrs.text("rankdir"), Some("LR"));
        assert_eq!(graph.body.attrs.text("label"), Some("My Graph"));
    }

    #[test]
    fn parse_node_and_edge_defaults() {
        let input = r#"digraph G {
            node [shape=ellipse]
            edge [style=dashed]
            A -> B
        }"#;
        let graph = parse(input).unwrap();
        assert_eq!(graph.body.node_defaults.text("shape"), Some("ellipse"));
        assert_eq!(graph.body.edge_defaults.text("style"), Some("dashed"));
        assert!(graph.body.edges[0].attrs.is_empty());
    }

    #[test]
    fn later_attributes_replace_earlier_ones() {
        let graph = parse("graph { a [color=red]; a [color=blue, shape=box] }").unwrap();
        let node = graph.body.node("a").unwrap();
        assert_eq!(node.attrs.text("color"), Some("blue"));
        assert_eq!(node.attrs.len(), 2);
    }

    #[test]
    fn ports_and_compass_points() {
        let graph = parse("digraph { a:p1:n -> b:s }").unwrap();
        let edge = &graph.body.edges[0];
        assert_eq!(edge.from.port.as_ref().map(Id::text), Some("p1"));
        assert_eq!(edge.from.compass.as_ref().map(Id::text), Some("n"));
        assert_eq!(edge.to.port.as_ref().map(Id::text), Some("s"));
        assert_eq!(graph.edge_name(edge), "a:p1:n->b:s");
    }

    #[test]
    fn keywords_are_case_insensitive() {
        let graph = parse("DiGraph G { Node [shape=box] }").unwrap();
        assert!(graph.directed);
        assert_eq!(graph.body.node_defaults.text("shape"), Some("box"));
    }

    #[test]
    fn numerals_html_and_concatenation() {
        let input = r#"graph { 1 [label=<<b>x</b>>, tooltip="a" + "b", width=.5] }"#;
        let graph = parse(input).unwrap();
        let node = graph.body.node("1").unwrap();
        assert_eq!(node.id.kind(), IdKind::Numeral);
        assert_eq!(node.attrs.value("label"), Some(&Id::html("<b>x</b>")));
        assert_eq!(node.attrs.text("tooltip"), Some("ab"));
        assert_eq!(node.attrs.value("width"), Some(&Id::numeral(".5")));
    }

    #[test]
    fn quoted_escapes_are_kept_except_quote() {
        let input = r#"digraph G {
            A [label="line1\nline2\"quote"]
        }"#;
        let graph = parse(input).unwrap();
        assert_eq!(
            graph.body.node("A").unwrap().attrs.text("label"),
            Some("line1\\nline2\"quote")
        );
    }

    #[test]
    fn semicolons_optional() {
        let input = r#"digraph G {
            A [label="first"; color=red];
            B [label="second"]
            A -> B;
            B -> C
        }"#;
        let graph = parse(input).unwrap();
        assert_eq!(graph.body.nodes.len(), 3);
        assert_eq!(graph.body.edges.len(), 2);
        assert_eq!(graph.body.node("A").unwrap().attrs.len(), 2);
    }

    #[test]
    fn error_includes_line_and_col() {
        let err = parse("not_a_graph { }").unwrap_err();
        match err {
            DotAttrError::ParseError { line, col, .. } => {
                assert_eq!(line, 1);
                assert!(col >= 1);
            }
            other => panic!("expected ParseError, got {other:?}"),
        }

        let err = parse("digraph G {\n  a ->\n}").unwrap_err();
        match err {
            DotAttrError::ParseError { line, .. } => assert_eq!(line, 3),
            other => panic!("expected ParseError, got {other:?}"),
        }
    }

    #[test]
    fn unterminated_constructs_fail() {
        assert!(parse("graph { a [label=\"open] }").is_err());
        assert!(parse("graph { a [label=<b] }").is_err());
        assert!(parse("graph { /* never closed }").is_err());
        assert!(parse("graph { a [color=red }").is_err());
        assert!(parse("graph { a } trailing").is_err());
    }

    #[test]
    fn repeated_attribute_keeps_every_occurrence() {
        let input = "graph { nodesep=0 nodesep=1; a [sides=-1]; a [sides=2] }";
        let graph = parse(input).unwrap();

        assert_eq!(graph.body.attrs.text("nodesep"), Some("1"));
        let texts: Vec<_> = graph.body.attrs.occurrences().map(|a| a.value.text()).collect();
        assert_eq!(texts, ["0", "1"]);

        let mut node = graph.body.node("a").unwrap().clone();
        assert_eq!(node.attrs.len(), 1);
        assert_eq!(node.attrs.occurrences().count(), 2);
        let first = node.attrs.occurrences().next().unwrap().value_span.unwrap();
        assert_eq!(&input[first.offset..first.end()], "-1");

        node.attrs.set("sides", Id::numeral("3"));
        assert_eq!(node.attrs.occurrences().count(), 1);
    }

    #[test]
    fn keywords_cannot_be_node_ids() {
        assert!(parse("graph { a -- subgraph }").is_err());
        let graph = parse("graph { \"node\" }").unwrap();
        assert!(graph.body.node("node").is_some());
    }

    #[test]
    fn graph_serializes_to_json() {
        let graph = parse("graph { a [color=red] }").unwrap();
        let json = serde_json::to_value(&graph).unwrap();
        assert_eq!(json["directed"], false);
        assert_eq!(json["body"]["nodes"][0]["id"]["kind"], "bare");
    }
}
