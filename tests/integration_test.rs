// Integration tests for the front end and the compile pipeline

use minicc::config::{CompileOptions, Standard};
use minicc::diagnostics::{DiagnosticKind, Severity};
use minicc::driver::{compile, Driver, Dumps};
use minicc::error::CompileError;
use minicc::parser::{
    parse, BinOp, ChildSpan, Constant, Lexer, Node, ParseError, Rank, TokenKind, Tree,
};
use minicc::source::SourceLocation;
use pretty_assertions::assert_eq;

fn constant(value: u64, text: &str) -> Node<'_> {
    Node::Constant {
        constant: Constant::int(value),
        text,
    }
}

fn binary(op: BinOp, left: usize, right: usize) -> Node<'static> {
    Node::BinaryOp { op, left, right }
}

#[test]
fn test_program_tree_layout() {
    let source = "int main(void) {\n  return (1 + 2) * 3;\n  return;\n}\n";
    let tokens = Lexer::new(source).tokenize().expect("lexing failed");
    let tree = parse(&tokens).expect("parsing failed");

    assert_eq!(
        tree.nodes(),
        &[
            constant(1, "1"),
            constant(2, "2"),
            binary(BinOp::Add, 0, 1),
            constant(3, "3"),
            binary(BinOp::Mul, 2, 3),
            Node::Return { value: Some(4) },
            Node::Return { value: None },
            Node::Function {
                name: "main",
                statements: ChildSpan::new(0, 2),
            },
            Node::Program {
                functions: ChildSpan::new(2, 1),
            },
        ]
    );
    assert_eq!(tree.child_indices(), &[5, 6, 7]);
    assert_eq!(tree.functions(), Some(&[7][..]));
}

#[test]
fn test_operators_are_left_associative() {
    let tokens = Lexer::new("int f(){return 8 - 4 - 2;}").tokenize().unwrap();
    let tree = parse(&tokens).unwrap();

    // (8 - 4) - 2
    assert_eq!(
        &tree.nodes()[..5],
        &[
            constant(8, "8"),
            constant(4, "4"),
            binary(BinOp::Sub, 0, 1),
            constant(2, "2"),
            binary(BinOp::Sub, 2, 3),
        ]
    );
}

#[test]
fn test_tree_dump() {
    let tokens = Lexer::new("int main(){return 1 || 2 == 3;}").tokenize().unwrap();
    let tree = parse(&tokens).unwrap();
    let expected = "\
Program
  Function main
    Return
      BinaryOp ||
        Constant 1 (int)
        BinaryOp ==
          Constant 2 (int)
          Constant 3 (int)
";
    assert_eq!(tree.to_string(), expected);
}

#[test]
fn test_constant_ranks_reach_the_tree() {
    let tokens = Lexer::new("int main(){return 0xFFFFFFFF + 10000000000 + 1ull;}")
        .tokenize()
        .unwrap();
    let tree = parse(&tokens).unwrap();

    let ranks: Vec<Rank> = tree
        .nodes()
        .iter()
        .filter_map(|node| match node {
            Node::Constant { constant, .. } => Some(constant.rank),
            _ => None,
        })
        .collect();
    assert_eq!(
        ranks,
        vec![Rank::UnsignedInt, Rank::LongLong, Rank::UnsignedLongLong]
    );
}

#[test]
fn test_tokens_and_nodes_borrow_the_source() {
    let source = String::from("int main(void) { return 12 + 'x'; }");
    let range = source.as_bytes().as_ptr_range();

    let tokens = Lexer::new(&source).tokenize().unwrap();
    for token in tokens.iter() {
        let start = token.text.as_ptr();
        assert!(range.contains(&start), "{token}");
        assert_eq!(&source[token.offset..token.end()], token.text);
    }

    let tree = parse(&tokens).unwrap();
    for node in tree.nodes() {
        let text = match *node {
            Node::Function { name, .. } => name,
            Node::Constant { text, .. } => text,
            _ => continue,
        };
        assert!(range.contains(&text.as_ptr()));
    }
}

#[test]
fn test_relexing_node_text_is_stable() {
    let source = "int first(void){return 0x1F + 017 * 'a';} int second(){return 9u;}";
    let tokens = Lexer::new(source).tokenize().unwrap();
    let tree: Tree<'_> = parse(&tokens).unwrap();

    for node in tree.nodes() {
        let (text, kind) = match *node {
            Node::Function { name, .. } => (name, TokenKind::Identifier),
            Node::Constant { text, .. } => (text, TokenKind::Constant),
            _ => continue,
        };
        let relexed = Lexer::new(text).tokenize().unwrap();
        assert_eq!(relexed.kinds(), vec![kind], "{text}");
        if let Node::Constant { constant, .. } = *node {
            assert_eq!(relexed[0].constant, Some(constant));
        }
    }
}

#[test]
fn test_keywords_depend_on_standard() {
    let c89 = CompileOptions::default().with_standard(Standard::C90);
    let tokens = Lexer::with_options("bool inline", &c89).tokenize().unwrap();
    assert_eq!(
        tokens.kinds(),
        vec![TokenKind::Identifier, TokenKind::Identifier]
    );

    let tokens = Lexer::new("bool inline").tokenize().unwrap();
    assert_eq!(tokens.kinds(), vec![TokenKind::Bool, TokenKind::Inline]);
}

#[test]
fn test_compile_reports_warnings_with_locations() {
    let source = "int main(void) {\n\treturn 'ab' + 4294967296;\n}";
    let err = compile(source, &CompileOptions::default()).unwrap_err();
    // The malformed character constant is dropped, leaving `+` without
    // a left operand.
    assert!(matches!(err, CompileError::Parse { .. }));

    let mut driver = Driver::new(CompileOptions::default());
    let _ = driver.compile(source);
    let reports: Vec<_> = driver
        .reports()
        .iter()
        .map(|report| (report.diagnostic.kind, report.location))
        .collect();
    assert_eq!(
        reports,
        vec![
            (DiagnosticKind::MissingNewline, SourceLocation::new(3, 2)),
            (DiagnosticKind::MalformedCharacter, SourceLocation::new(2, 16)),
        ]
    );
    assert_eq!(driver.reports()[1].severity(), Severity::Error);
}

#[test]
fn test_compile_output_shape() {
    let source = "int main(void) { return 6 * 7; }\nint helper() { }\n";
    let output = compile(source, &CompileOptions::default()).unwrap();
    let lines: Vec<&str> = output.assembly.lines().collect();

    assert_eq!(&lines[..3], &["section .text", "global main", "global helper"]);
    assert!(lines.contains(&"main:"));
    assert!(lines.contains(&"helper:"));
    assert!(lines.contains(&"\timul rax, rcx"));
    assert_eq!(lines.last(), Some(&"\tret"));
}

#[test]
fn test_debug_annotations() {
    let options = CompileOptions::default().with_debug(true);
    let output = compile("int main(void) { return 1 + 2; }\n", &options).unwrap();
    assert!(output.assembly.contains("\t; int main(void)\n"));
    assert!(output.assembly.contains("\t; return 1 + 2\n"));
}

#[test]
fn test_duplicate_functions_are_rejected() {
    let source = "int f(void) { return 1; }\nint f(void) { return 2; }\n";
    let err = compile(source, &CompileOptions::default()).unwrap_err();
    assert_eq!(err.to_string(), "function 'f' is defined more than once");
}

#[test]
fn test_fatal_errors() {
    let options = CompileOptions::default();

    let err = compile("int main(){return \"abc;}\n", &options).unwrap_err();
    assert!(matches!(err, CompileError::Lex { .. }));
    assert_eq!(err.location(), Some(SourceLocation::new(1, 19)));

    let err = compile("   \n\n", &options).unwrap_err();
    assert!(matches!(
        err,
        CompileError::Parse {
            error: ParseError::EmptyInput,
            ..
        }
    ));

    let err = compile("int main(){return 1}\n", &options).unwrap_err();
    assert_eq!(err.to_string(), "expected ';' after return statement");
}

#[test]
fn test_trigraph_program_compiles_before_c23() {
    let source = "int main(void) ??< return 5 ??! 2; ??>\n";

    let c11 = CompileOptions::default().with_standard(Standard::C11);
    let output = compile(source, &c11).unwrap();
    assert_eq!(output.reports.len(), 3);
    assert!(output
        .reports
        .iter()
        .all(|report| report.severity() == Severity::Warning));

    assert!(compile(source, &CompileOptions::default()).is_err());
}

#[test]
fn test_driver_dumps() {
    let mut driver = Driver::new(CompileOptions::default()).with_dumps(Dumps {
        tokens: true,
        tree: false,
    });
    driver.compile("int main(){return 0x10;}\n").unwrap();

    let dump = driver.token_dump().unwrap();
    assert_eq!(dump.lines().nth(6), Some("6: constant 0x10 = 16 (int)"));
    assert_eq!(driver.tree_dump(), None);
}
