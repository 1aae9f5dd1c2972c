use crate::*;

#[test]
fn test_parse_empty_program() {
    let result = parse_program("").unwrap();
    assert!(result.body.is_empty());
}

#[test]
fn test_parse_blank_lines_and_comments() {
    let input = "# leading comment\n\nx = 1  # trailing\n\n   \n# done";
    let result = parse_program(input).unwrap();

    assert_eq!(result.body.len(), 1);
    assert_eq!(result.body[0].type_name(), "Assign");
}

#[test]
fn test_parse_simple_assignment() {
    let result = parse_program("x = 1\n").unwrap();

    assert_eq!(result.body.len(), 1);
    match &result.body[0].kind {
        StatementKind::Assign(assign) => {
            assert_eq!(assign.targets.len(), 1);
            match &assign.targets[0].kind {
                ExpressionKind::Name(name) => {
                    assert_eq!(name.id, "x");
                    assert_eq!(name.ctx, ExprContext::Store);
                }
                _ => panic!("Expected name target"),
            }
            match &assign.value.kind {
                ExpressionKind::Num(num) => assert_eq!(num.value, Number::Integer(1)),
                _ => panic!("Expected number value"),
            }
        }
        _ => panic!("Expected assignment"),
    }
}

#[test]
fn test_parse_chained_assignment() {
    let result = parse_program("a = b = 3").unwrap();

    match &result.body[0].kind {
        StatementKind::Assign(assign) => {
            let targets: Vec<_> = assign.targets.iter().filter_map(|t| t.as_name()).collect();
            assert_eq!(targets, vec!["a", "b"]);
        }
        _ => panic!("Expected assignment"),
    }
}

#[test]
fn test_parse_augmented_assignment() {
    let cases = [
        ("x += 1", BinaryOperator::Add),
        ("x -= 1", BinaryOperator::Sub),
        ("x *= 1", BinaryOperator::Mult),
        ("x /= 1", BinaryOperator::Div),
        ("x //= 1", BinaryOperator::FloorDiv),
        ("x %= 1", BinaryOperator::Mod),
        ("x **= 1", BinaryOperator::Pow),
    ];

    for (input, expected) in cases {
        let result = parse_program(input).unwrap();
        match &result.body[0].kind {
            StatementKind::AugAssign(aug) => {
                assert_eq!(aug.op, expected, "operator for '{}'", input);
                assert_eq!(aug.target.as_name(), Some("x"));
            }
            _ => panic!("Expected augmented assignment for '{}'", input),
        }
    }
}

#[test]
fn test_parse_pass_and_expression_statement() {
    let result = parse_program("pass\nprint(x)\n").unwrap();

    assert_eq!(result.body.len(), 2);
    assert!(matches!(result.body[0].kind, StatementKind::Pass));
    match &result.body[1].kind {
        StatementKind::Expr(expr) => assert_eq!(expr.type_name(), "Call"),
        _ => panic!("Expected expression statement"),
    }
}

#[test]
fn test_statement_spans_resolve_to_line_numbers() {
    let source = "a = 1\n\nb = 2\n";
    let result = parse_program(source).unwrap();

    assert_eq!(result.body[0].span.line_in(source), 1);
    assert_eq!(result.body[1].span.line_in(source), 3);
    assert_eq!(result.body[1].span, Span::new(7, 12));
}

#[test]
fn test_long_program_parses() {
    let source = "x = 1 + 1\n".repeat(20_000);
    let result = parse_program(&source).unwrap();

    assert_eq!(result.body.len(), 20_000);
    let last = &result.body[19_999];
    assert_eq!(last.span.line_in(&source), 20_000);
    assert_eq!(&source[last.span.start..last.span.end], "x = 1 + 1");
}

#[test]
fn test_keywords_are_not_identifiers() {
    assert!(parse_program("while = 1").is_err());
    assert!(parse_program("pass = 1").is_err());
    // Keyword prefixes are fine
    assert!(parse_program("passed = 1").is_ok());
    assert!(parse_program("nothing = notable").is_ok());
}

#[test]
fn test_top_level_indentation_is_rejected() {
    assert!(parse_program("  x = 1").is_err());
}

#[test]
fn test_parse_list_and_constants() {
    let expr = parse_expression("[1, 'a', True, None]").unwrap();

    match &expr.kind {
        ExpressionKind::List(list) => {
            assert_eq!(list.elts.len(), 4);
            assert_eq!(list.ctx, ExprContext::Load);
            assert_eq!(list.elts[2].kind, ExpressionKind::NameConstant(Constant::True));
            assert_eq!(list.elts[3].kind, ExpressionKind::NameConstant(Constant::None));
        }
        _ => panic!("Expected list"),
    }
}

#[test]
fn test_parse_call_arguments() {
    let expr = parse_expression("max(a, 2, [])").unwrap();

    match &expr.kind {
        ExpressionKind::Call(call) => {
            assert_eq!(call.func.as_name(), Some("max"));
            assert_eq!(call.args.len(), 3);
        }
        _ => panic!("Expected call"),
    }
}
