//! Expression parsing tests.

use crate::test_utils::expr_sexpr;

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_eq!(
        expr_sexpr("1 + 2 * 3"),
        "(PLUS (INTVAL 1) (ASTERISK (INTVAL 2) (INTVAL 3)))"
    );
    assert_eq!(
        expr_sexpr("1 * 2 + 3"),
        "(PLUS (ASTERISK (INTVAL 1) (INTVAL 2)) (INTVAL 3))"
    );
}

#[test]
fn additive_operators_associate_left() {
    assert_eq!(
        expr_sexpr("a & b \\ c"),
        "(SETDIFF (CONCAT (IDENT a) (IDENT b)) (IDENT c))"
    );
    assert_eq!(
        expr_sexpr("a - b - c"),
        "(MINUS (MINUS (IDENT a) (IDENT b)) (IDENT c))"
    );
}

#[test]
fn relational_operators_sit_on_top() {
    assert_eq!(
        expr_sexpr("a + 1 < b * 2"),
        "(LT (PLUS (IDENT a) (INTVAL 1)) (ASTERISK (IDENT b) (INTVAL 2)))"
    );
    assert_eq!(expr_sexpr("a = b"), "(EQ (IDENT a) (IDENT b))");
    assert_eq!(expr_sexpr("a # b"), "(NEQ (IDENT a) (IDENT b))");
    assert_eq!(expr_sexpr("a == b"), "(IDTY (IDENT a) (IDENT b))");
    assert_eq!(expr_sexpr("a <= b"), "(LTEQ (IDENT a) (IDENT b))");
    assert_eq!(expr_sexpr("a >= b"), "(GTEQ (IDENT a) (IDENT b))");
    assert_eq!(expr_sexpr("a > b"), "(GT (IDENT a) (IDENT b))");
}

#[test]
fn membership_operator() {
    assert_eq!(expr_sexpr("a IN s"), "(IN (IDENT a) (IDENT s))");
}

#[test]
fn logical_operators_by_level() {
    assert_eq!(
        expr_sexpr("a OR b AND c"),
        "(OR (IDENT a) (AND (IDENT b) (IDENT c)))"
    );
    assert_eq!(
        expr_sexpr("a DIV b MOD c"),
        "(MOD (DIV (IDENT a) (IDENT b)) (IDENT c))"
    );
    assert_eq!(expr_sexpr("a / b"), "(SOLIDUS (IDENT a) (IDENT b))");
}

#[test]
fn unary_minus_applies_to_the_first_term() {
    assert_eq!(
        expr_sexpr("-1 + 2"),
        "(PLUS (NEG (INTVAL 1)) (INTVAL 2))"
    );
    assert_eq!(
        expr_sexpr("-a * b"),
        "(NEG (ASTERISK (IDENT a) (IDENT b)))"
    );
}

#[test]
fn not_binds_at_factor_level() {
    assert_eq!(
        expr_sexpr("NOT a OR b"),
        "(OR (NOT (IDENT a)) (IDENT b))"
    );
    assert_eq!(expr_sexpr("NOT NOT a"), "(NOT (NOT (IDENT a)))");
}

#[test]
fn parenthesized_subexpressions_are_explicit() {
    assert_eq!(
        expr_sexpr("(1 + 2) * 3"),
        "(ASTERISK (EXPR (PLUS (INTVAL 1) (INTVAL 2))) (INTVAL 3))"
    );
}

#[test]
fn type_conversion() {
    assert_eq!(
        expr_sexpr("x :: Card"),
        "(TYPECONV (IDENT x) (IDENT Card))"
    );
    assert_eq!(
        expr_sexpr("x :: Sys.Word"),
        "(TYPECONV (IDENT x) (QUALIDENT (IDENT Sys) (IDENT Word)))"
    );
}

#[test]
fn designator_chains() {
    assert_eq!(
        expr_sexpr("a.b^.c[1]"),
        "(DESIG (IDENT a) (SELLIST (SELECT (IDENT b)) (DEREF) \
         (SELECT (IDENT c)) (INDEX (INTVAL 1))))"
    );
}

#[test]
fn slices_carry_a_range() {
    assert_eq!(
        expr_sexpr("a[1 .. 2]"),
        "(DESIG (IDENT a) (SELLIST (SLICE (RANGE (INTVAL 1) (INTVAL 2)))))"
    );
}

#[test]
fn function_calls() {
    assert_eq!(expr_sexpr("f()"), "(FCALL (IDENT f) (EMPTY))");
    assert_eq!(
        expr_sexpr("f(x, 1)"),
        "(FCALL (IDENT f) (EXPRLIST (IDENT x) (INTVAL 1)))"
    );
}

#[test]
fn call_results_can_be_selected_into() {
    assert_eq!(
        expr_sexpr("f(x)^"),
        "(DESIG (FCALL (IDENT f) (EXPRLIST (IDENT x))) (SELLIST (DEREF)))"
    );
}

#[test]
fn structured_values() {
    assert_eq!(
        expr_sexpr("{1, 2 .. 3}"),
        "(STRUCT (EXPRLIST (INTVAL 1) (RANGE (INTVAL 2) (INTVAL 3))))"
    );
    assert_eq!(expr_sexpr("{}"), "(STRUCT (EMPTY))");
}

#[test]
fn literal_leaves() {
    assert_eq!(expr_sexpr("\"text\""), "(QUOTEDVAL \"text\")");
    assert_eq!(expr_sexpr("0x1F"), "(INTVAL 31)");
    assert_eq!(expr_sexpr("0u41"), "(CHRVAL 0u41)");
    assert_eq!(expr_sexpr("1.5E2"), "(REALVAL 1.5E2)");
}
