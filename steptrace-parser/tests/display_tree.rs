use pretty_assertions::assert_eq;
use steptrace_parser::{build_display_tree, parse_program, render_tree, StatementKind};

const SAMPLE: &str = "\
def add(a, b):
    return a + b

total = 0
while total < 10:
    total = add(total, 3)
print('done', total)
";

#[test]
fn test_sample_program_tree() {
    let program = parse_program(SAMPLE).expect("Failed to parse");

    let expected = "\
Module
-function:  add
--arguments
---a
---b
--Return
---BinOp
----a
----+
----b
-=
--total
--0
-While
--Compare
---total
---<
---10
--=
---total
---Call
----add
----total
----3
-Expr
--Call
---print
---Str
---total
";
    assert_eq!(render_tree(&program), expected);
}

#[test]
fn test_tree_statements_feed_the_tracer_in_order() {
    let program = parse_program(SAMPLE).expect("Failed to parse");
    let root = build_display_tree(&program);

    let statements: Vec<_> = root.statements().collect();
    assert_eq!(statements.len(), 4);
    assert!(matches!(statements[0].kind, StatementKind::FunctionDef(_)));
    assert!(matches!(statements[2].kind, StatementKind::While(_)));
    assert_eq!(statements[3].to_string(), "print('done', total)");
}

#[test]
fn test_operators_without_symbols_use_node_names() {
    let program = parse_program("x = -a ** 2 % b >= 1 or not c\n").expect("Failed to parse");

    let expected = "\
Module
-=
--x
--BoolOp
---Or
---Compare
----BinOp
-----UnaryOp
------USub
------BinOp
-------a
-------Pow
-------2
-----Mod
-----b
----GtE
----1
---UnaryOp
----Not
----c
";
    assert_eq!(render_tree(&program), expected);
}

#[test]
fn test_regenerated_source_parses_to_same_tree() {
    let program = parse_program(SAMPLE).expect("Failed to parse");
    let regenerated = program.to_string();
    let reparsed = parse_program(&regenerated).expect("Failed to reparse regenerated source");

    assert_eq!(render_tree(&reparsed), render_tree(&program));
}
