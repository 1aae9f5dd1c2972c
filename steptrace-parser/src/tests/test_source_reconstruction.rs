use crate::*;

#[test]
fn test_expressions_are_fully_parenthesized() {
    let cases = [
        ("a + b * c", "(a + (b * c))"),
        ("i < n", "(i < n)"),
        ("0 <= i < n", "(0 <= i < n)"),
        ("a and b or c", "((a and b) or c)"),
        ("-x", "(- x)"),
        ("not done", "(not done)"),
        ("f(a, 1 + 2)", "f(a, (1 + 2))"),
        ("[1, 'x', None]", "[1, 'x', None]"),
        ("2 ** -1", "(2 ** (- 1))"),
    ];

    for (input, expected) in cases {
        let expr = parse_expression(input).unwrap();
        assert_eq!(
            expr.to_string(),
            expected,
            "Source reconstruction failed for '{}'",
            input
        );
    }
}

#[test]
fn test_literals_use_python_repr() {
    assert_eq!(parse_expression("0xff").unwrap().to_string(), "255");
    assert_eq!(parse_expression("1e20").unwrap().to_string(), "1e+20");
    assert_eq!(parse_expression("2.50").unwrap().to_string(), "2.5");
    assert_eq!(parse_expression("\"hi\"").unwrap().to_string(), "'hi'");
}

#[test]
fn test_statements_reconstruct() {
    let cases = [
        ("x = x + 1", "x = (x + 1)"),
        ("a = b = 0", "a = b = 0"),
        ("x   +=1", "x += 1"),
        ("return", "return"),
        ("pass", "pass"),
    ];

    for (input, expected) in cases {
        let source = if input == "return" {
            format!("def f():\n    {}\n", input)
        } else {
            input.to_string()
        };
        let program = parse_program(&source).unwrap();
        let statement = match &program.body[0].kind {
            StatementKind::FunctionDef(def) => &def.body[0],
            _ => &program.body[0],
        };
        assert_eq!(statement.to_string(), expected);
    }
}

#[test]
fn test_blocks_reconstruct_with_indentation() {
    let input = "def f(a, b):\n  while a < b:\n      a += 1\n  return a\n";
    let program = parse_program(input).unwrap();

    let expected = "\
def f(a, b):
    while (a < b):
        a += 1
    return a";
    assert_eq!(program.to_string(), expected);
}
