use pretty_assertions::assert_eq;

use super::trace;

#[test]
fn test_single_assignment() {
    assert_eq!(trace("x = 1\n"), "The statement of line 1: x = 1\n\t x=1\n");
}

#[test]
fn test_mapping_accumulates_in_first_assignment_order() {
    let output = trace("b = 1\na = 2.0\nb = b + a\n");

    let expected = "\
The statement of line 1: b = 1
\t b=1
The statement of line 2: a = 2.0
\t b=1  a=2.0
The statement of line 3: b = (b + a)
\t b=3.0  a=2.0
";
    assert_eq!(output, expected);
}

#[test]
fn test_function_definition_prints_nothing_and_keeps_line() {
    let source = "def double(a):\n    return a * 2\ny = double(3)\n";

    assert_eq!(
        trace(source),
        "The statement of line 1: y = double(3)\n\t y=6\n"
    );
}

#[test]
fn test_callables_never_appear_in_mapping() {
    let source = "def f():\n    return len\ng = f()\nn = g('abc')\n";
    let output = trace(source);

    assert_eq!(
        output,
        "The statement of line 1: g = f()\n\t \nThe statement of line 2: n = g('abc')\n\t n=3\n"
    );
}

#[test]
fn test_printed_output_follows_statement_line() {
    let output = trace("x = 2\nprint('x is', x)\n");

    let expected = "\
The statement of line 1: x = 2
\t x=2
The statement of line 2: print('x is', x)
x is 2
\t x=2
";
    assert_eq!(output, expected);
}

#[test]
fn test_values_use_str_formatting() {
    let output = trace("s = 'hi'\nl = [1, 'a', None]\nt = 7 / 2 > 3\n");

    let last_mapping = output.lines().last().unwrap();
    assert_eq!(last_mapping, "\t s=hi  l=[1, 'a', None]  t=True");
}

#[test]
fn test_pass_and_augmented_assignment() {
    let output = trace("n = 10\npass\nn //= 3\n");

    let expected = "\
The statement of line 1: n = 10
\t n=10
The statement of line 2: pass
\t n=10
The statement of line 3: n //= 3
\t n=3
";
    assert_eq!(output, expected);
}

#[test]
fn test_empty_program_prints_nothing() {
    assert_eq!(trace(""), "");
}

#[test]
fn test_unary_sign_is_regenerated_with_space() {
    assert_eq!(
        trace("x = -1\ny = +x\n"),
        "The statement of line 1: x = (- 1)\n\t x=-1\nThe statement of line 2: y = (+ x)\n\t x=-1  y=-1\n"
    );
}
