//! Python front end.
//!
//! Wraps Tree-sitter with the Python grammar and extracts the structural
//! facts the naming checks need: declarations, their positional parameters
//! and default values, and the plain assignments in each declaration's own
//! body. The rest of the syntax tree is discarded.

use thiserror::Error;
use tree_sitter::{Language, Node, Parser};

/// Errors produced by the front end.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The Python grammar could not be loaded into the parser.
    #[error("failed to load python grammar: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),
    /// The source is not valid Python.
    #[error("invalid syntax")]
    Syntax,
}

/// Kind of declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    /// `class C:`
    Class,
    /// `def f():`, including `async def` and methods.
    Function,
}

/// Classification of a positional default value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultKind {
    /// A literal constant: number, string, `True`/`False`/`None`, `...`.
    Literal,
    /// Anything constructed or computed: containers, calls, names,
    /// unary/binary expressions.
    Computed,
}

/// A plain assignment statement with its simple-name targets.
///
/// Tuple-unpacking targets are dropped; chained assignments contribute one
/// target per link. Augmented (`+=`) and annotated (`x: int = 5`)
/// assignments are not collected at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// Line number of the statement (1-indexed).
    pub line: usize,
    /// Simple-name targets in source order.
    pub targets: Vec<String>,
}

/// A class or function declaration with the facts extracted from its subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Line of the `class`/`def` keyword (1-indexed).
    pub line: usize,
    /// Declaration kind.
    pub kind: DeclKind,
    /// Declared name.
    pub name: String,
    /// Positional parameter names, in order. Empty for classes.
    pub params: Vec<String>,
    /// Positional default values, in order. Empty for classes.
    pub defaults: Vec<DefaultKind>,
    /// Assignments in this declaration's own body, excluding bodies of
    /// nested declarations. Collected for functions only.
    pub assignments: Vec<Assignment>,
    /// Declarations nested directly or indirectly in the body, in source
    /// order, each owning its own subtree facts.
    pub nested: Vec<Declaration>,
}

/// Parses Python source into declaration facts.
pub struct PythonParser {
    language: Language,
}

impl PythonParser {
    /// Creates a parser backed by the Python grammar.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_python::LANGUAGE.into(),
        }
    }

    /// Parses `source` and returns its top-level declarations in source
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Syntax`] when the source does not parse cleanly;
    /// there is no per-construct recovery.
    pub fn parse(&self, source: &str) -> Result<Vec<Declaration>, ParseError> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;

        let tree = parser.parse(source, None).ok_or(ParseError::Syntax)?;
        let root = tree.root_node();
        if root.has_error() {
            return Err(ParseError::Syntax);
        }

        let src = source.as_bytes();
        let mut declarations = Vec::new();
        Self::collect_declarations(&root, src, false, &mut declarations, &mut Vec::new());
        Ok(declarations)
    }

    fn text<'a>(node: &Node<'_>, src: &'a [u8]) -> &'a str {
        std::str::from_utf8(&src[node.start_byte()..node.end_byte()]).unwrap_or("")
    }

    /// Walks `node`'s children in source order, collecting declarations into
    /// `decls` and, when `in_function` is set, plain assignments into
    /// `assignments`. Does not descend into collected declarations; each
    /// owns its own subtree.
    fn collect_declarations(
        node: &Node<'_>,
        src: &[u8],
        in_function: bool,
        decls: &mut Vec<Declaration>,
        assignments: &mut Vec<Assignment>,
    ) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "class_definition" | "function_definition" => {
                    if let Some(decl) = Self::build_declaration(&child, src) {
                        decls.push(decl);
                    }
                }
                "expression_statement" => {
                    // A `;`-joined line holds several assignments in one
                    // statement node.
                    if in_function {
                        let mut stmt_cursor = child.walk();
                        for expr in child.named_children(&mut stmt_cursor) {
                            if expr.kind() == "assignment" {
                                if let Some(assignment) = Self::extract_assignment(&expr, src) {
                                    assignments.push(assignment);
                                }
                            }
                        }
                    }
                }
                _ => {
                    Self::collect_declarations(&child, src, in_function, decls, assignments);
                }
            }
        }
    }

    fn build_declaration(node: &Node<'_>, src: &[u8]) -> Option<Declaration> {
        let kind = match node.kind() {
            "class_definition" => DeclKind::Class,
            "function_definition" => DeclKind::Function,
            _ => return None,
        };

        let name_node = node.child_by_field_name("name")?;
        let name = Self::text(&name_node, src).to_owned();
        let line = node.start_position().row + 1;

        let (params, defaults) = if kind == DeclKind::Function {
            node.child_by_field_name("parameters")
                .map_or((Vec::new(), Vec::new()), |p| Self::extract_params(&p, src))
        } else {
            (Vec::new(), Vec::new())
        };

        let mut nested = Vec::new();
        let mut assignments = Vec::new();
        if let Some(body) = node.child_by_field_name("body") {
            Self::collect_declarations(
                &body,
                src,
                kind == DeclKind::Function,
                &mut nested,
                &mut assignments,
            );
        }

        Some(Declaration {
            line,
            kind,
            name,
            params,
            defaults,
            assignments,
            nested,
        })
    }

    /// Positional parameter names and defaults, stopping at the first `*`
    /// separator (keyword-only parameters and `*args`/`**kwargs` are out of
    /// scope for the naming and default checks).
    fn extract_params(node: &Node<'_>, src: &[u8]) -> (Vec<String>, Vec<DefaultKind>) {
        let mut names = Vec::new();
        let mut defaults = Vec::new();

        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "identifier" => names.push(Self::text(&child, src).to_owned()),
                "typed_parameter" => {
                    match child.named_child(0) {
                        Some(inner) if inner.kind() == "identifier" => {
                            names.push(Self::text(&inner, src).to_owned());
                        }
                        // `*args: T` styled splats end the positional list
                        _ => break,
                    }
                }
                "default_parameter" | "typed_default_parameter" => {
                    if let Some(name_node) = child.child_by_field_name("name") {
                        if name_node.kind() == "identifier" {
                            names.push(Self::text(&name_node, src).to_owned());
                        }
                    }
                    if let Some(value) = child.child_by_field_name("value") {
                        defaults.push(Self::classify_default(&value, src));
                    }
                }
                "positional_separator" => {}
                "list_splat_pattern" | "keyword_separator" | "dictionary_splat_pattern" => break,
                _ => {}
            }
        }

        (names, defaults)
    }

    fn classify_default(node: &Node<'_>, src: &[u8]) -> DefaultKind {
        match node.kind() {
            "integer" | "float" | "true" | "false" | "none" | "ellipsis" => DefaultKind::Literal,
            "string" => {
                if Self::is_format_string(node, src) {
                    DefaultKind::Computed
                } else {
                    DefaultKind::Literal
                }
            }
            "concatenated_string" => {
                let mut cursor = node.walk();
                let has_format_part = node
                    .named_children(&mut cursor)
                    .any(|c| c.kind() == "string" && Self::is_format_string(&c, src));
                if has_format_part {
                    DefaultKind::Computed
                } else {
                    DefaultKind::Literal
                }
            }
            _ => DefaultKind::Computed,
        }
    }

    /// `f`-prefixed strings interpolate when evaluated; they are not
    /// literal constants even without substitution fields.
    fn is_format_string(node: &Node<'_>, src: &[u8]) -> bool {
        let mut cursor = node.walk();
        let is_format = node
            .children(&mut cursor)
            .find(|c| c.kind() == "string_start")
            .is_some_and(|start| {
                Self::text(&start, src)
                    .chars()
                    .any(|c| c == 'f' || c == 'F')
            });
        is_format
    }

    /// Simple-name targets of a plain assignment, following chained links
    /// (`a = b = 1` yields `a` then `b`).
    fn extract_assignment(node: &Node<'_>, src: &[u8]) -> Option<Assignment> {
        // `x: int = 5` carries a type field; it is not a plain assignment.
        if node.child_by_field_name("type").is_some() {
            return None;
        }

        let mut targets = Vec::new();
        let mut current = *node;
        loop {
            if let Some(left) = current.child_by_field_name("left") {
                if left.kind() == "identifier" {
                    targets.push(Self::text(&left, src).to_owned());
                }
            }
            match current.child_by_field_name("right") {
                Some(right) if right.kind() == "assignment" => current = right,
                _ => break,
            }
        }

        if targets.is_empty() {
            return None;
        }
        Some(Assignment {
            line: node.start_position().row + 1,
            targets,
        })
    }
}

impl Default for PythonParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Vec<Declaration> {
        PythonParser::new().parse(src).expect("valid python")
    }

    #[test]
    fn extracts_class() {
        let decls = parse("class User:\n    pass\n");
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].kind, DeclKind::Class);
        assert_eq!(decls[0].name, "User");
        assert_eq!(decls[0].line, 1);
    }

    #[test]
    fn extracts_function_with_params() {
        let decls = parse("def apply(value, callback):\n    pass\n");
        assert_eq!(decls[0].kind, DeclKind::Function);
        assert_eq!(decls[0].name, "apply");
        assert_eq!(decls[0].params, vec!["value", "callback"]);
        assert!(decls[0].defaults.is_empty());
    }

    #[test]
    fn typed_params_keep_their_names() {
        let decls = parse("def f(x: int, y: str = 'a'):\n    pass\n");
        assert_eq!(decls[0].params, vec!["x", "y"]);
        assert_eq!(decls[0].defaults, vec![DefaultKind::Literal]);
    }

    #[test]
    fn splat_params_are_excluded() {
        let decls = parse("def f(a, *args, kw=1, **kwargs):\n    pass\n");
        assert_eq!(decls[0].params, vec!["a"]);
        assert!(decls[0].defaults.is_empty());
    }

    #[test]
    fn literal_defaults_are_literal() {
        let decls = parse("def f(a=1, b='s', c=None, d=True):\n    pass\n");
        assert_eq!(decls[0].defaults, vec![DefaultKind::Literal; 4]);
    }

    #[test]
    fn container_and_call_defaults_are_computed() {
        let decls = parse("def f(a=[], b={}, c=list()):\n    pass\n");
        assert_eq!(decls[0].defaults, vec![DefaultKind::Computed; 3]);
    }

    #[test]
    fn negative_number_default_is_computed() {
        // A unary minus is an expression, not a literal constant.
        let decls = parse("def f(a=-1):\n    pass\n");
        assert_eq!(decls[0].defaults, vec![DefaultKind::Computed]);
    }

    #[test]
    fn fstring_default_is_computed() {
        let decls = parse("def f(x=f'a{x}'):\n    pass\n");
        assert_eq!(decls[0].defaults, vec![DefaultKind::Computed]);
    }

    #[test]
    fn fstring_default_without_fields_is_computed() {
        // CPython treats every f-string as a joined string, never a constant.
        let decls = parse("def f(x=f'abc'):\n    pass\n");
        assert_eq!(decls[0].defaults, vec![DefaultKind::Computed]);
    }

    #[test]
    fn concatenated_default_with_fstring_part_is_computed() {
        let decls = parse("def f(x='a' f'{y}'):\n    pass\n");
        assert_eq!(decls[0].defaults, vec![DefaultKind::Computed]);
    }

    #[test]
    fn bytes_and_raw_string_defaults_stay_literal() {
        let decls = parse("def f(x=b'abc', y=r'a\\d'):\n    pass\n");
        assert_eq!(decls[0].defaults, vec![DefaultKind::Literal; 2]);
    }

    #[test]
    fn methods_are_nested_in_their_class() {
        let decls = parse("class User:\n    def rename(self, name):\n        self.name = name\n");
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].nested.len(), 1);
        assert_eq!(decls[0].nested[0].name, "rename");
        assert_eq!(decls[0].nested[0].params, vec!["self", "name"]);
    }

    #[test]
    fn attribute_targets_are_ignored() {
        let decls = parse("def f(self):\n    self.x = 1\n");
        assert!(decls[0].assignments.is_empty());
    }

    #[test]
    fn simple_assignments_are_collected_in_order() {
        let decls = parse("def f():\n    a = 1\n    if a:\n        b = 2\n    c = 3\n");
        let lines: Vec<usize> = decls[0].assignments.iter().map(|a| a.line).collect();
        assert_eq!(lines, vec![2, 4, 5]);
    }

    #[test]
    fn chained_assignment_yields_each_target() {
        let decls = parse("def f():\n    a = b = 1\n");
        assert_eq!(decls[0].assignments[0].targets, vec!["a", "b"]);
    }

    #[test]
    fn tuple_unpacking_is_ignored() {
        let decls = parse("def f():\n    a, b = 1, 2\n");
        assert!(decls[0].assignments.is_empty());
    }

    #[test]
    fn augmented_and_annotated_assignments_are_ignored() {
        let decls = parse("def f():\n    x = 0\n    x += 1\n    y: int = 2\n");
        assert_eq!(decls[0].assignments.len(), 1);
        assert_eq!(decls[0].assignments[0].targets, vec!["x"]);
    }

    #[test]
    fn nested_function_owns_its_assignments() {
        let decls = parse("def outer():\n    a = 1\n    def inner():\n        b = 2\n    c = 3\n");
        let outer = &decls[0];
        let outer_lines: Vec<usize> = outer.assignments.iter().map(|a| a.line).collect();
        assert_eq!(outer_lines, vec![2, 5]);
        assert_eq!(outer.nested.len(), 1);
        assert_eq!(outer.nested[0].assignments.len(), 1);
        assert_eq!(outer.nested[0].assignments[0].targets, vec!["b"]);
    }

    #[test]
    fn decorated_function_is_found() {
        let decls = parse("@wraps\ndef f():\n    pass\n");
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].name, "f");
        assert_eq!(decls[0].line, 2);
    }

    #[test]
    fn async_function_is_found() {
        let decls = parse("async def fetch():\n    pass\n");
        assert_eq!(decls[0].name, "fetch");
        assert_eq!(decls[0].kind, DeclKind::Function);
    }

    #[test]
    fn invalid_syntax_is_an_error() {
        let result = PythonParser::new().parse("def f(:\n");
        assert!(matches!(result, Err(ParseError::Syntax)));
    }

    #[test]
    fn empty_source_has_no_declarations() {
        assert!(parse("").is_empty());
    }
}
