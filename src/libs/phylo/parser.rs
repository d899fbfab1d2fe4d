use super::error::TreeError;
use super::node::NodeId;
use super::tree::Tree;
use nom::{
    branch::alt,
    bytes::complete::{is_not, take_while},
    character::complete::{char, digit1, multispace0},
    combinator::{cut, map, map_res, opt, recognize},
    error::{context, ContextError, ErrorKind, FromExternalError, ParseError},
    multi::separated_list1,
    sequence::{delimited, preceded},
    IResult, Offset, Parser,
};
use std::collections::BTreeMap;

//----------------------------
// Errors
//----------------------------
#[derive(Clone, Debug, PartialEq)]
enum Trace {
    Context(&'static str),
    Nom(ErrorKind),
}

/// nom error that keeps every context frame so the final message can show
/// what was being parsed when the input went wrong.
#[derive(Clone, Debug, PartialEq)]
struct NewickError<'a> {
    frames: Vec<(&'a str, Trace)>,
}

impl<'a> ParseError<&'a str> for NewickError<'a> {
    fn from_error_kind(input: &'a str, kind: ErrorKind) -> Self {
        NewickError {
            frames: vec![(input, Trace::Nom(kind))],
        }
    }

    fn append(input: &'a str, kind: ErrorKind, mut other: Self) -> Self {
        other.frames.push((input, Trace::Nom(kind)));
        other
    }
}

impl<'a> ContextError<&'a str> for NewickError<'a> {
    fn add_context(input: &'a str, ctx: &'static str, mut other: Self) -> Self {
        other.frames.push((input, Trace::Context(ctx)));
        other
    }
}

impl<'a, E> FromExternalError<&'a str, E> for NewickError<'a> {
    fn from_external_error(input: &'a str, kind: ErrorKind, _e: E) -> Self {
        NewickError {
            frames: vec![(input, Trace::Nom(kind))],
        }
    }
}

type PResult<'a, O> = IResult<&'a str, O, NewickError<'a>>;

//----------------------------
// Recursive clade
//----------------------------
/// Recursive form produced by the grammar, flattened into the arena afterwards.
#[derive(Debug, Default)]
struct Clade {
    name: Option<String>,
    length: Option<f64>,
    properties: Option<BTreeMap<String, String>>,
    children: Vec<Clade>,
}

impl Clade {
    fn into_arena(self, tree: &mut Tree) -> Result<NodeId, TreeError> {
        let id = tree.add_node();
        for child in self.children {
            let child_id = child.into_arena(tree)?;
            tree.add_child(id, child_id)?;
        }
        if let Some(node) = tree.get_node_mut(id) {
            node.name = self.name;
            node.length = self.length;
            node.properties = self.properties;
        }
        Ok(id)
    }
}

//----------------------------
// Grammar
//----------------------------
fn ws<'a, F, O, E>(inner: F) -> impl Parser<&'a str, Output = O, Error = E>
where
    F: Parser<&'a str, Output = O, Error = E>,
    E: ParseError<&'a str>,
{
    delimited(multispace0, inner, multispace0)
}

// Unquoted, 'single' or "double" quoted. Doubled quotes escape themselves.
fn label(input: &str) -> PResult<'_, String> {
    let unquoted = map(take_while(|c: char| !"():;,[]".contains(c)), |s: &str| {
        s.trim().to_string()
    });
    let single_quoted = delimited(
        char('\''),
        map(is_not("'"), |s: &str| s.replace("''", "'")),
        char('\''),
    );
    let double_quoted = delimited(
        char('"'),
        map(is_not("\""), |s: &str| s.replace("\"\"", "\"")),
        char('"'),
    );

    context("label", alt((single_quoted, double_quoted, unquoted))).parse(input)
}

fn length(input: &str) -> PResult<'_, f64> {
    context(
        "length",
        preceded(
            ws(char(':')),
            cut(map_res(
                recognize((
                    opt(char('-')),
                    digit1,
                    opt((char('.'), digit1)),
                    opt((
                        alt((char('e'), char('E'))),
                        opt(alt((char('+'), char('-')))),
                        digit1,
                    )),
                )),
                |s: &str| s.parse::<f64>(),
            )),
        ),
    )
    .parse(input)
}

// [&&NHX:S=human:E=1.5] or [S=human]; other comments are dropped
fn comment(input: &str) -> PResult<'_, Option<BTreeMap<String, String>>> {
    let body = delimited(ws(char('[')), is_not("]"), char(']'));

    context(
        "comment",
        map(opt(body), |content: Option<&str>| {
            let content = content?;
            let pairs: BTreeMap<String, String> = match content.strip_prefix("&&NHX") {
                Some(rest) => rest
                    .split(':')
                    .filter_map(|part| part.split_once('='))
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                None => content
                    .split_whitespace()
                    .filter_map(|part| part.split_once('='))
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            };
            if pairs.is_empty() {
                None
            } else {
                Some(pairs)
            }
        }),
    )
    .parse(input)
}

// (child,child,...)Label[comment]:Length[comment]
fn clade(input: &str) -> PResult<'_, Clade> {
    let (input, children) = context(
        "children",
        opt(delimited(
            ws(char('(')),
            separated_list1(ws(char(',')), clade),
            ws(char(')')),
        )),
    )
    .parse(input)?;

    let (input, name) = opt(label).parse(input)?;
    let (input, before) = comment(input)?;
    let (input, length) = opt(length).parse(input)?;
    let (input, after) = comment(input)?;

    let properties = match (before, after) {
        (None, None) => None,
        (before, after) => {
            let mut props = before.unwrap_or_default();
            props.extend(after.unwrap_or_default());
            Some(props)
        }
    };

    Ok((
        input,
        Clade {
            name: name.filter(|s| !s.is_empty()),
            length,
            properties,
            children: children.unwrap_or_default(),
        },
    ))
}

//----------------------------
// Entry points
//----------------------------
/// Parses a single Newick tree terminated by `;`.
pub fn parse_newick(input: &str) -> Result<Tree, TreeError> {
    let mut parser = (ws(clade), ws(char(';')));

    match parser.parse(input) {
        Ok((_, (root, _))) => {
            let mut tree = Tree::new();
            let root_id = root.into_arena(&mut tree)?;
            tree.set_root(root_id);
            Ok(tree)
        }
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(locate(input, e)),
        Err(nom::Err::Incomplete(_)) => Err(TreeError::ParseError {
            message: "Incomplete input".to_string(),
            line: 0,
            column: 0,
            snippet: String::new(),
        }),
    }
}

fn locate(input: &str, e: NewickError) -> TreeError {
    let remaining = e.frames.first().map(|(rest, _)| *rest).unwrap_or(input);
    let offset = input.offset(remaining);

    let prefix = &input[..offset];
    let line = prefix.chars().filter(|&c| c == '\n').count() + 1;
    let last_newline = prefix.rfind('\n').map(|p| p + 1).unwrap_or(0);
    let column = offset - last_newline + 1;

    let mut message = String::new();
    for (_, trace) in e.frames.iter().rev() {
        match trace {
            Trace::Context(ctx) => message.push_str(&format!("while parsing {}:\n", ctx)),
            Trace::Nom(kind) => message.push_str(&format!("  error: {:?}\n", kind)),
        }
    }

    TreeError::ParseError {
        message,
        line,
        column,
        snippet: remaining.chars().take(50).collect(),
    }
}

impl Tree {
    /// Parse a Newick string into a Tree.
    ///
    /// ```
    /// use shoot::libs::phylo::Tree;
    ///
    /// let tree = Tree::from_newick("((A:1,B:1):1,(C:1,D:1):1);").unwrap();
    /// assert_eq!(tree.len(), 7);
    ///
    /// assert!(Tree::from_newick("(A,B:oops);").is_err());
    /// ```
    pub fn from_newick(input: &str) -> Result<Self, TreeError> {
        parse_newick(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_lengths() {
        let tree = Tree::from_newick("(A:0.1, B:0.2e-1)Root:100;").unwrap();
        let root = tree.get_node(tree.get_root().unwrap()).unwrap();
        assert_eq!(root.name.as_deref(), Some("Root"));
        assert_eq!(root.length, Some(100.0));

        let a = tree.get_node(root.children[0]).unwrap();
        assert_eq!(a.name.as_deref(), Some("A"));
        assert_eq!(a.length, Some(0.1));

        let b = tree.get_node(root.children[1]).unwrap();
        assert_eq!(b.length, Some(0.02));
    }

    #[test]
    fn parses_gene_names_with_dots_and_dashes() {
        let tree = Tree::from_newick("(homo_sapiens_ENSP0001.2:0.1,mus_musculus_Q9-X:0.2);")
            .unwrap();
        let names = tree.get_leaf_names();
        assert_eq!(names, vec!["homo_sapiens_ENSP0001.2", "mus_musculus_Q9-X"]);
    }

    #[test]
    fn parses_nhx_comments() {
        let tree = Tree::from_newick("(A:0.1,B:0.2)n1[&&NHX:S=human:E=1.5];").unwrap();
        let root = tree.get_node(tree.get_root().unwrap()).unwrap();
        let props = root.properties.as_ref().unwrap();
        assert_eq!(props.get("S").map(|s| s.as_str()), Some("human"));
        assert_eq!(props.get("E").map(|s| s.as_str()), Some("1.5"));
    }

    #[test]
    fn tolerates_whitespace_and_quotes() {
        let input = "
        (
            'Homo sapiens' : 0.1,
            B : 0.2
        ) Root ;
        ";
        let tree = Tree::from_newick(input).unwrap();
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.get_leaf_names(), vec!["Homo sapiens", "B"]);
    }

    #[test]
    fn reports_error_position() {
        match Tree::from_newick("(A,B)C") {
            Err(TreeError::ParseError { line, column, .. }) => {
                assert_eq!(line, 1);
                assert_eq!(column, 7);
            }
            other => panic!("Expected ParseError, got {:?}", other),
        }

        match Tree::from_newick("(A,B:invalid)C;") {
            Err(TreeError::ParseError { message, .. }) => assert!(message.contains("length")),
            other => panic!("Expected ParseError, got {:?}", other),
        }
    }
}
