use crate::*;

#[test]
fn test_parse_while_loop() {
    let input = "i = 0\nwhile i < 3:\n    i += 1\n    print(i)\ndone = True\n";
    let result = parse_program(input).unwrap();

    assert_eq!(result.body.len(), 3);
    match &result.body[1].kind {
        StatementKind::While(while_stmt) => {
            assert_eq!(while_stmt.test.type_name(), "Compare");
            assert_eq!(while_stmt.body.len(), 2);
        }
        _ => panic!("Expected while loop"),
    }
}

#[test]
fn test_parse_nested_while_loops() {
    let input = "\
while i < 2:
    j = 0
    while j < 2:
        j += 1

    i += 1
";
    let result = parse_program(input).unwrap();

    match &result.body[0].kind {
        StatementKind::While(outer) => {
            assert_eq!(outer.body.len(), 3);
            match &outer.body[1].kind {
                StatementKind::While(inner) => assert_eq!(inner.body.len(), 1),
                _ => panic!("Expected inner while loop"),
            }
        }
        _ => panic!("Expected while loop"),
    }
}

#[test]
fn test_while_body_at_end_of_input() {
    let result = parse_program("while x:\n    x -= 1").unwrap();

    match &result.body[0].kind {
        StatementKind::While(while_stmt) => {
            assert_eq!(while_stmt.test.as_name(), Some("x"));
            assert_eq!(while_stmt.body.len(), 1);
        }
        _ => panic!("Expected while loop"),
    }
}

#[test]
fn test_while_requires_a_body() {
    assert!(parse_program("while x < 1:\n").is_err());
}
