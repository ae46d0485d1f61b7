use winnow::ascii::{digit0, digit1, multispace0};
use winnow::combinator::{alt, cut_err, eof, opt, peek, preceded, repeat};
use winnow::error::{ContextError, ErrMode, StrContext, StrContextValue};
use winnow::stream::LocatingSlice;
use winnow::token::{any, literal, one_of, take_till, take_until, take_while};
use winnow::{ModalResult, Parser};

use dotattr_types::{DotAttrError, Span};

use crate::ast::*;
use crate::id::{is_bare_continue, is_bare_start, is_keyword, Id, IdKind};

pub(crate) type Input<'i> = LocatingSlice<&'i str>;

fn expected(desc: &'static str) -> StrContext {
    StrContext::Expected(StrContextValue::Description(desc))
}

fn make_cut_error(desc: &'static str) -> ErrMode<ContextError<StrContext>> {
    let mut e = ContextError::new();
    e.push(expected(desc));
    ErrMode::Cut(e)
}

/// Whitespace consumer, including `//`, `/* */` and `#` comments.
fn ws(input: &mut Input<'_>) -> ModalResult<()> {
    loop {
        let _ = multispace0.parse_next(input)?;
        if opt(alt((literal("//"), literal("#"))))
            .parse_next(input)?
            .is_some()
        {
            let _ = take_till(0.., '\n').parse_next(input)?;
        } else if opt(literal("/*")).parse_next(input)?.is_some() {
            let _ = cut_err(take_until(0.., "*/"))
                .context(expected("end of block comment '*/'"))
                .parse_next(input)?;
            let _ = literal("*/").parse_next(input)?;
        } else {
            return Ok(());
        }
    }
}

// ---------------------------------------------------------------------------
// Lexical primitives
// ---------------------------------------------------------------------------

/// `[A-Za-z_][A-Za-z0-9_]*`, non-ASCII characters allowed anywhere.
fn bare_identifier<'i>(input: &mut Input<'i>) -> ModalResult<&'i str> {
    (one_of(is_bare_start), take_while(0.., is_bare_continue))
        .take()
        .parse_next(input)
}

/// `-?(.[0-9]+|[0-9]+(.[0-9]*)?)`
fn numeral<'i>(input: &mut Input<'i>) -> ModalResult<&'i str> {
    (
        opt('-'),
        alt((('.', digit1).take(), (digit1, opt(('.', digit0))).take())),
    )
        .take()
        .parse_next(input)
}

/// One double-quoted segment. `\"` and `\\` are decoded and line
/// continuations dropped; any other backslash is kept.
fn quoted_segment(input: &mut Input<'_>) -> ModalResult<String> {
    let _ = '"'.parse_next(input)?;
    let mut s = String::new();
    loop {
        let c = cut_err(any)
            .context(expected("closing '\"'"))
            .parse_next(input)?;
        match c {
            '"' => break,
            '\\' => {
                let esc = cut_err(any)
                    .context(expected("closing '\"'"))
                    .parse_next(input)?;
                match esc {
                    '"' => s.push('"'),
                    '\\' => s.push('\\'),
                    '\n' => {}
                    '\r' => {
                        let _ = opt('\n').parse_next(input)?;
                    }
                    other => {
                        s.push('\\');
                        s.push(other);
                    }
                }
            }
            other => s.push(other),
        }
    }
    Ok(s)
}

/// Quoted string, possibly concatenated with `+`.
fn quoted_string(input: &mut Input<'_>) -> ModalResult<String> {
    let mut s = quoted_segment.parse_next(input)?;
    let rest: Vec<String> =
        repeat(0.., preceded((ws, '+', ws), quoted_segment)).parse_next(input)?;
    for part in rest {
        s.push_str(&part);
    }
    Ok(s)
}

/// HTML-like string: `<` ... `>` with balanced angle brackets.
fn html_string(input: &mut Input<'_>) -> ModalResult<String> {
    let _ = '<'.parse_next(input)?;
    let mut depth = 1usize;
    let mut s = String::new();
    loop {
        let c = cut_err(any)
            .context(expected("closing '>' of HTML string"))
            .parse_next(input)?;
        match c {
            '<' => {
                depth += 1;
                s.push(c);
            }
            '>' => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
                s.push(c);
            }
            other => s.push(other),
        }
    }
    Ok(s)
}

/// Any DOT identifier.
pub(crate) fn id(input: &mut Input<'_>) -> ModalResult<Id> {
    alt((
        quoted_string.map(Id::quoted),
        html_string.map(Id::html),
        numeral.map(|s: &str| Id::numeral(s)),
        bare_identifier.map(|s: &str| Id::bare(s)),
    ))
    .parse_next(input)
}

/// A case-insensitive DOT keyword.
fn keyword<'i>(kw: &'static str) -> impl Parser<Input<'i>, &'i str, ErrMode<ContextError>> {
    bare_identifier.verify(move |s: &str| s.eq_ignore_ascii_case(kw))
}

// ---------------------------------------------------------------------------
// Attributes
// ---------------------------------------------------------------------------

/// Parse a single attribute: ID '=' ID.
fn attr(input: &mut Input<'_>) -> ModalResult<Attribute> {
    let (name, name_range) = id.with_span().parse_next(input)?;
    ws.parse_next(input)?;
    let _ = cut_err('=')
        .context(expected("'=' after attribute name"))
        .parse_next(input)?;
    ws.parse_next(input)?;
    let (value, value_range) = cut_err(id)
        .context(expected("attribute value"))
        .with_span()
        .parse_next(input)?;
    Ok(Attribute {
        name: name.into_text(),
        value,
        name_span: Some(name_range.into()),
        value_span: Some(value_range.into()),
    })
}

/// Parse an attribute block: '[' ( attr (','|';')? )* ']'
fn attr_block(input: &mut Input<'_>) -> ModalResult<Vec<Attribute>> {
    let _ = '['.parse_next(input)?;
    let mut attrs = Vec::new();
    loop {
        ws.parse_next(input)?;
        if opt(']').parse_next(input)?.is_some() {
            break;
        }
        let a = cut_err(attr)
            .context(expected("attribute or ']'"))
            .parse_next(input)?;
        attrs.push(a);
        ws.parse_next(input)?;
        let _ = opt(one_of([',', ';'])).parse_next(input)?;
    }
    Ok(attrs)
}

/// One or more consecutive attribute blocks.
fn attr_blocks(input: &mut Input<'_>) -> ModalResult<Vec<Attribute>> {
    let mut attrs = attr_block.parse_next(input)?;
    loop {
        ws.parse_next(input)?;
        match opt(attr_block).parse_next(input)? {
            Some(more) => attrs.extend(more),
            None => break,
        }
    }
    Ok(attrs)
}

// ---------------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------------

/// Intermediate representation of a parsed statement, before we merge them into a GraphBody.
enum Statement {
    GraphAttrs(Vec<Attribute>),
    NodeDefaults(Vec<Attribute>),
    EdgeDefaults(Vec<Attribute>),
    GraphAttrDecl(Attribute),
    Node(NodeRef, Vec<Attribute>),
    Edge {
        chain: Vec<NodeRef>,
        ops: Vec<(bool, Span)>,
        attrs: Vec<Attribute>,
    },
    Subgraph(Option<Id>, Vec<Statement>),
}

#[derive(Clone, Copy)]
enum AttrTarget {
    Graph,
    Node,
    Edge,
}

/// Parse ('graph'|'node'|'edge') attr_block+
fn attr_stmt(input: &mut Input<'_>) -> ModalResult<Statement> {
    let target = alt((
        keyword("graph").value(AttrTarget::Graph),
        keyword("node").value(AttrTarget::Node),
        keyword("edge").value(AttrTarget::Edge),
    ))
    .parse_next(input)?;
    ws.parse_next(input)?;
    let attrs = cut_err(attr_blocks)
        .context(expected("'[' after attribute statement keyword"))
        .parse_next(input)?;
    Ok(match target {
        AttrTarget::Graph => Statement::GraphAttrs(attrs),
        AttrTarget::Node => Statement::NodeDefaults(attrs),
        AttrTarget::Edge => Statement::EdgeDefaults(attrs),
    })
}

/// Parse ('subgraph' ID?)? '{' statement* '}'
fn subgraph_stmt(input: &mut Input<'_>) -> ModalResult<Statement> {
    let header = opt(preceded((keyword("subgraph"), ws), opt(id))).parse_next(input)?;
    ws.parse_next(input)?;
    let name = match header {
        Some(name) => {
            let _ = cut_err('{')
                .context(expected("'{' to open subgraph body"))
                .parse_next(input)?;
            name
        }
        None => {
            let _ = '{'.parse_next(input)?;
            None
        }
    };
    let stmts = statements.parse_next(input)?;
    ws.parse_next(input)?;
    let _ = cut_err('}')
        .context(expected("'}' to close subgraph body"))
        .parse_next(input)?;
    Ok(Statement::Subgraph(name, stmts))
}

/// Parse ID (':' ID (':' ID)?)?
fn node_id(input: &mut Input<'_>) -> ModalResult<NodeRef> {
    let node = id.parse_next(input)?;
    if node.kind() == IdKind::Bare && is_keyword(node.text()) {
        return Err(make_cut_error("node identifier (keywords must be quoted)"));
    }
    let port = opt(preceded((ws, ':', ws), cut_err(id))).parse_next(input)?;
    let compass = if port.is_some() {
        opt(preceded((ws, ':', ws), cut_err(id))).parse_next(input)?
    } else {
        None
    };
    Ok(NodeRef {
        id: node,
        port,
        compass,
    })
}

fn edge_op(input: &mut Input<'_>) -> ModalResult<bool> {
    alt((literal("->").value(true), literal("--").value(false))).parse_next(input)
}

/// Parse a node statement, an edge chain, or a bare `key = value` declaration.
fn node_or_edge_stmt(input: &mut Input<'_>) -> ModalResult<Statement> {
    let (first, first_range) = node_id.with_span().parse_next(input)?;
    ws.parse_next(input)?;

    if first.port.is_none() && opt('=').parse_next(input)?.is_some() {
        ws.parse_next(input)?;
        let (value, value_range) = cut_err(id)
            .context(expected("attribute value"))
            .with_span()
            .parse_next(input)?;
        return Ok(Statement::GraphAttrDecl(Attribute {
            name: first.id.into_text(),
            value,
            name_span: Some(first_range.into()),
            value_span: Some(value_range.into()),
        }));
    }

    let mut chain = vec![first];
    let mut ops = Vec::new();
    while let Some((directed, range)) = opt(edge_op.with_span()).parse_next(input)? {
        ops.push((directed, Span::from(range)));
        ws.parse_next(input)?;
        let target = cut_err(node_id)
            .context(expected("edge target identifier"))
            .parse_next(input)?;
        chain.push(target);
        ws.parse_next(input)?;
    }

    let attrs = opt(attr_blocks).parse_next(input)?.unwrap_or_default();
    if ops.is_empty() {
        Ok(Statement::Node(chain.remove(0), attrs))
    } else {
        Ok(Statement::Edge { chain, ops, attrs })
    }
}

/// Parse a single statement.
fn statement(input: &mut Input<'_>) -> ModalResult<Statement> {
    alt((attr_stmt, subgraph_stmt, node_or_edge_stmt)).parse_next(input)
}

/// Parse zero or more statements, each optionally followed by ';'.
fn statements(input: &mut Input<'_>) -> ModalResult<Vec<Statement>> {
    let mut stmts = Vec::new();
    loop {
        ws.parse_next(input)?;
        if opt(peek('}')).parse_next(input)?.is_some() || opt(peek(eof)).parse_next(input)?.is_some()
        {
            break;
        }
        let stmt = cut_err(statement)
            .context(expected("statement"))
            .parse_next(input)?;
        stmts.push(stmt);
        ws.parse_next(input)?;
        let _ = opt(';').parse_next(input)?;
    }
    Ok(stmts)
}

struct Header {
    strict: bool,
    directed: bool,
    name: Option<Id>,
}

/// Top-level parser: 'strict'? ('graph'|'digraph') ID? '{' statements '}'.
fn parse_graph(input: &mut Input<'_>) -> ModalResult<(Header, Vec<Statement>)> {
    ws.parse_next(input)?;
    let strict = opt(keyword("strict")).parse_next(input)?.is_some();
    ws.parse_next(input)?;
    let directed = cut_err(alt((
        keyword("graph").value(false),
        keyword("digraph").value(true),
    )))
    .context(expected("'graph' or 'digraph' keyword"))
    .parse_next(input)?;
    ws.parse_next(input)?;
    let name = opt(id).parse_next(input)?;
    ws.parse_next(input)?;
    let _ = cut_err('{')
        .context(expected("'{' to open graph body"))
        .parse_next(input)?;
    let stmts = statements.parse_next(input)?;
    ws.parse_next(input)?;
    let _ = cut_err('}')
        .context(expected("'}' to close graph body"))
        .parse_next(input)?;
    ws.parse_next(input)?;
    let _ = cut_err(eof)
        .context(expected("end of input"))
        .parse_next(input)?;
    Ok((
        Header {
            strict,
            directed,
            name,
        },
        stmts,
    ))
}

// ---------------------------------------------------------------------------
// Merging
// ---------------------------------------------------------------------------

struct MergeError {
    span: Span,
    message: String,
}

fn declare_node(body: &mut GraphBody, id: Id) -> &mut NodeDef {
    let pos = match body.nodes.iter().position(|n| n.id.text() == id.text()) {
        Some(pos) => pos,
        None => {
            body.nodes.push(NodeDef {
                id,
                attrs: AttributeMap::new(),
            });
            body.nodes.len() - 1
        }
    };
    &mut body.nodes[pos]
}

/// Merge statements into a GraphBody.
fn merge_statements(stmts: Vec<Statement>, directed: bool) -> Result<GraphBody, MergeError> {
    let mut body = GraphBody::default();

    for stmt in stmts {
        match stmt {
            Statement::GraphAttrs(attrs) => body.attrs.extend(attrs),
            Statement::GraphAttrDecl(attr) => {
                body.attrs.insert(attr);
            }
            Statement::NodeDefaults(attrs) => body.node_defaults.extend(attrs),
            Statement::EdgeDefaults(attrs) => body.edge_defaults.extend(attrs),
            Statement::Node(node, attrs) => {
                declare_node(&mut body, node.id).attrs.extend(attrs);
            }
            Statement::Edge { chain, ops, attrs } => {
                if let Some((_, span)) = ops.iter().find(|(op, _)| *op != directed) {
                    let message = if directed {
                        "undirected edge operator '--' in a digraph"
                    } else {
                        "directed edge operator '->' in an undirected graph"
                    };
                    return Err(MergeError {
                        span: *span,
                        message: message.to_string(),
                    });
                }
                // Ensure nodes referenced in edges exist
                for node in &chain {
                    declare_node(&mut body, node.id.clone());
                }
                // Expand chained edges: A -> B -> C => (A,B), (B,C)
                for pair in chain.windows(2) {
                    let mut edge_attrs = AttributeMap::new();
                    edge_attrs.extend(attrs.iter().cloned());
                    body.edges.push(EdgeDef {
                        from: pair[0].clone(),
                        to: pair[1].clone(),
                        attrs: edge_attrs,
                    });
                }
            }
            Statement::Subgraph(name, inner) => {
                let inner_body = merge_statements(inner, directed)?;
                body.subgraphs.push(SubgraphDef {
                    name,
                    body: inner_body,
                });
            }
        }
    }

    Ok(body)
}

fn parse_error(input: &str, span: Span, message: String) -> DotAttrError {
    let (line, col) = span.line_col(input);
    let offset = span.offset.min(input.len());
    let snippet = input[offset..].chars().take(40).collect::<String>();
    DotAttrError::ParseError {
        line,
        col,
        message: if message.is_empty() {
            "unexpected input".to_string()
        } else {
            message
        },
        source_snippet: if snippet.is_empty() {
            None
        } else {
            Some(snippet)
        },
    }
}

/// Public entry point.
pub fn parse(input: &str) -> dotattr_types::Result<DotGraph> {
    let (header, stmts) = parse_graph
        .parse(LocatingSlice::new(input))
        .map_err(|e| parse_error(input, Span::new(e.offset(), 0), e.inner().to_string()))?;

    let body = merge_statements(stmts, header.directed)
        .map_err(|e| parse_error(input, e.span, e.message))?;

    tracing::debug!(
        directed = header.directed,
        nodes = body.nodes.len(),
        edges = body.edges.len(),
        subgraphs = body.subgraphs.len(),
        "Parsed DOT document"
    );

    Ok(DotGraph {
        strict: header.strict,
        directed: header.directed,
        name: header.name,
        body,
    })
}
