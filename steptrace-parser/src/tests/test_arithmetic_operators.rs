use crate::{ast::*, parse_expression};

fn binary(expr: &Expression) -> &BinaryOperation {
    match &expr.kind {
        ExpressionKind::BinOp(op) => op,
        _ => panic!("Expected binary operation, got: {:?}", expr.kind),
    }
}

#[test]
fn test_parse_addition() {
    let expr = parse_expression("2 + 3").unwrap();
    let op = binary(&expr);

    assert_eq!(op.op, BinaryOperator::Add);
    match &op.left.kind {
        ExpressionKind::Num(num) => assert_eq!(num.value, Number::Integer(2)),
        _ => panic!("Expected integer on left"),
    }
    match &op.right.kind {
        ExpressionKind::Num(num) => assert_eq!(num.value, Number::Integer(3)),
        _ => panic!("Expected integer on right"),
    }
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    let expr = parse_expression("1 + 2 * 3").unwrap();
    let op = binary(&expr);

    assert_eq!(op.op, BinaryOperator::Add);
    assert_eq!(binary(&op.right).op, BinaryOperator::Mult);
}

#[test]
fn test_subtraction_is_left_associative() {
    let expr = parse_expression("10 - 4 - 3").unwrap();
    let op = binary(&expr);

    assert_eq!(op.op, BinaryOperator::Sub);
    assert_eq!(binary(&op.left).op, BinaryOperator::Sub);
}

#[test]
fn test_power_is_right_associative() {
    let expr = parse_expression("2 ** 3 ** 2").unwrap();
    let op = binary(&expr);

    assert_eq!(op.op, BinaryOperator::Pow);
    assert_eq!(binary(&op.right).op, BinaryOperator::Pow);
}

#[test]
fn test_unary_minus_is_weaker_than_power() {
    let expr = parse_expression("-2 ** 2").unwrap();

    match &expr.kind {
        ExpressionKind::UnaryOp(op) => {
            assert_eq!(op.op, UnaryOperator::USub);
            assert_eq!(binary(&op.operand).op, BinaryOperator::Pow);
        }
        _ => panic!("Expected unary operation"),
    }
}

#[test]
fn test_floor_division_and_modulo() {
    let expr = parse_expression("a // b % c").unwrap();
    let op = binary(&expr);

    assert_eq!(op.op, BinaryOperator::Mod);
    assert_eq!(binary(&op.left).op, BinaryOperator::FloorDiv);
}

#[test]
fn test_parentheses_override_precedence() {
    let expr = parse_expression("(1 + 2) * 3").unwrap();
    let op = binary(&expr);

    assert_eq!(op.op, BinaryOperator::Mult);
    assert_eq!(binary(&op.left).op, BinaryOperator::Add);
}

#[test]
fn test_negative_operand_after_operator() {
    let expr = parse_expression("x * -1").unwrap();
    let op = binary(&expr);

    assert_eq!(op.op, BinaryOperator::Mult);
    assert_eq!(op.right.type_name(), "UnaryOp");
}
