//! Statement parsing tests.

use crate::ast::NodeKind;
use crate::compilation::CompileOptions;
use crate::test_utils::{assert_clean, parse, parse_with, stmt_sexpr};

#[test]
fn assignment() {
    assert_eq!(stmt_sexpr("x := 1"), "(ASSIGN (IDENT x) (INTVAL 1))");
}

#[test]
fn assignment_through_a_designator() {
    assert_eq!(
        stmt_sexpr("p^.next := q"),
        "(ASSIGN (DESIG (IDENT p) (SELLIST (DEREF) (SELECT (IDENT next)))) (IDENT q))"
    );
}

#[test]
fn copy_statement() {
    assert_eq!(stmt_sexpr("COPY s := t"), "(COPY (IDENT s) (IDENT t))");
}

#[test]
fn procedure_call_with_arguments() {
    assert_eq!(
        stmt_sexpr("Log(level, msg)"),
        "(PCALL (IDENT Log) (EXPRLIST (IDENT level) (IDENT msg)))"
    );
}

#[test]
fn bare_procedure_call() {
    assert_eq!(stmt_sexpr("Init"), "(PCALL (IDENT Init) (EMPTY))");
}

#[test]
fn return_statements() {
    assert_eq!(stmt_sexpr("RETURN"), "(RETURN (EMPTY))");
    assert_eq!(stmt_sexpr("RETURN 42"), "(RETURN (INTVAL 42))");
}

#[test]
fn new_statements() {
    assert_eq!(stmt_sexpr("NEW p"), "(NEW (IDENT p))");
    assert_eq!(stmt_sexpr("NEW p OF 8"), "(NEWCAP (IDENT p) (INTVAL 8))");
    assert_eq!(
        stmt_sexpr("NEW p := {1, 2}"),
        "(NEWINIT (IDENT p) (STRUCT (EXPRLIST (INTVAL 1) (INTVAL 2))))"
    );
}

#[test]
fn retain_and_release() {
    assert_eq!(stmt_sexpr("RETAIN p"), "(RETAIN (IDENT p))");
    assert_eq!(stmt_sexpr("RELEASE p"), "(RELEASE (IDENT p))");
}

#[test]
fn if_with_elsif_chain_and_else() {
    assert_eq!(
        stmt_sexpr("IF a THEN NOP ELSIF b THEN EXIT ELSE NOP END"),
        "(IF (IDENT a) (STMTSEQ (NOP)) \
         (ELSIFLIST (ELSIF (IDENT b) (STMTSEQ (EXIT)))) (STMTSEQ (NOP)))"
    );
}

#[test]
fn if_without_else() {
    assert_eq!(
        stmt_sexpr("IF a THEN NOP END"),
        "(IF (IDENT a) (STMTSEQ (NOP)) (EMPTY) (EMPTY))"
    );
}

#[test]
fn case_with_labels_ranges_and_else() {
    assert_eq!(
        stmt_sexpr("CASE x OF | 1, 2 : NOP | 3 .. 5 : EXIT ELSE NOP END"),
        "(SWITCH (IDENT x) (CASELIST \
         (CASE (EXPRLIST (INTVAL 1) (INTVAL 2)) (STMTSEQ (NOP))) \
         (CASE (EXPRLIST (RANGE (INTVAL 3) (INTVAL 5))) (STMTSEQ (EXIT)))) (STMTSEQ (NOP)))"
    );
}

#[test]
fn loop_statement() {
    assert_eq!(stmt_sexpr("LOOP NOP END"), "(LOOP (STMTSEQ (NOP)))");
}

#[test]
fn while_statement() {
    assert_eq!(
        stmt_sexpr("WHILE a < b DO NOP END"),
        "(WHILE (LT (IDENT a) (IDENT b)) (STMTSEQ (NOP)))"
    );
}

#[test]
fn repeat_statement() {
    assert_eq!(
        stmt_sexpr("REPEAT NOP UNTIL done"),
        "(REPEAT (STMTSEQ (NOP)) (IDENT done))"
    );
}

#[test]
fn for_with_iterable() {
    assert_eq!(
        stmt_sexpr("FOR x IN s DO NOP END"),
        "(FOR (IDENTLIST (IDENT x)) (IN (IDENT s) (EMPTY)) (STMTSEQ (NOP)))"
    );
}

#[test]
fn for_with_range_and_value_pair() {
    assert_eq!(
        stmt_sexpr("FOR i, v IN 1 .. 9 DO NOP END"),
        "(FOR (IDENTLIST (IDENT i) (IDENT v)) \
         (IN (RANGE (INTVAL 1) (INTVAL 9)) (EMPTY)) (STMTSEQ (NOP)))"
    );
}

#[test]
fn for_arity_is_three_in_both_forms() {
    for stmt in ["FOR x IN s DO NOP END", "FOR i IN 1 .. 9 DO NOP END"] {
        let source = format!("MODULE T; BEGIN {stmt} END T.");
        let (pool, parsed) = parse(&source);
        assert_clean(&pool, &parsed);
        let unit = parsed.root.child(0).unwrap();
        let stmt = unit.child(2).unwrap().child(1).unwrap().child(0).unwrap();
        assert_eq!(stmt.kind(), NodeKind::For);
        assert_eq!(stmt.len(), 3);
        assert_eq!(stmt.child(1).unwrap().kind(), NodeKind::In);
    }
}

#[test]
fn exit_and_nop() {
    assert_eq!(stmt_sexpr("LOOP EXIT END"), "(LOOP (STMTSEQ (EXIT)))");
    assert_eq!(stmt_sexpr("NOP"), "(NOP)");
}

#[test]
fn read_statement() {
    assert_eq!(
        stmt_sexpr("READ a, b^"),
        "(READ (EXPRLIST (IDENT a) (DESIG (IDENT b) (SELLIST (DEREF)))))"
    );
}

#[test]
fn write_statement_with_formatting() {
    assert_eq!(
        stmt_sexpr("WRITE x, #(\"fmt\", y)"),
        "(WRITE (EXPRLIST (IDENT x) (FMT (QUOTEDVAL \"fmt\") (EXPRLIST (IDENT y)))))"
    );
}

#[test]
fn statement_sequence_collects_in_order() {
    let (pool, parsed) = parse("MODULE T; BEGIN NOP; EXIT; NOP END T.");
    assert_clean(&pool, &parsed);
    let unit = parsed.root.child(0).unwrap();
    assert_eq!(
        unit.child(2).unwrap().to_sexpr(&pool),
        "(BLOCK (EMPTY) (STMTSEQ (NOP) (EXIT) (NOP)))"
    );
}

#[test]
fn errant_semicolon_is_silent_by_default() {
    let (_, parsed) = parse("MODULE T; BEGIN NOP; END T.");
    assert_eq!(parsed.diagnostics.error_count(), 0);
    assert_eq!(parsed.diagnostics.warning_count(), 0);
}

#[test]
fn errant_semicolon_warns_when_enabled() {
    let options = CompileOptions {
        errant_semicolons: true,
        ..CompileOptions::default()
    };
    let (_, parsed) = parse_with("MODULE T; BEGIN NOP; END T.", options);
    assert_eq!(parsed.diagnostics.error_count(), 0);
    assert_eq!(parsed.diagnostics.warning_count(), 1);
}
