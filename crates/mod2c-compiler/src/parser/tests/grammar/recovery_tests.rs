//! Error-recovery tests: reports accumulate, parsing always terminates,
//! and the tree keeps everything after the resync point.

use crate::ast::NodeKind;
use crate::test_utils::parse;

#[test]
fn missing_separator_between_statements() {
    let (pool, parsed) = parse("MODULE T; BEGIN NOP NOP END T.");
    assert_eq!(parsed.diagnostics.error_count(), 1);
    let unit = parsed.root.child(0).unwrap();
    assert_eq!(
        unit.child(2).unwrap().to_sexpr(&pool),
        "(BLOCK (EMPTY) (STMTSEQ (NOP) (NOP)))"
    );
}

#[test]
fn import_garbage_resyncs_to_the_definitions() {
    let (pool, parsed) = parse("DEFINITION MODULE X; IMPORT ; CONST c = 1; END X.");
    assert!(parsed.diagnostics.has_errors());
    let unit = parsed.root.child(0).unwrap();
    assert_eq!(
        unit.child(2).unwrap().to_sexpr(&pool),
        "(DEFLIST (CONSTDEF (IDENT c) (INTVAL 1)))"
    );
}

#[test]
fn malformed_string_recovers_to_the_next_statement() {
    let (pool, parsed) = parse("MODULE T; BEGIN x := \"abc\n; NOP END T.");
    // One lexical error for the string, one syntactic for the lost value.
    assert_eq!(parsed.diagnostics.error_count(), 2);
    let unit = parsed.root.child(0).unwrap();
    let seq = unit.child(2).unwrap().child(1).unwrap();
    assert_eq!(seq.len(), 2);
    assert_eq!(seq.child(0).unwrap().kind(), NodeKind::Assign);
    assert_eq!(seq.child(0).unwrap().to_sexpr(&pool), "(ASSIGN (IDENT x) (EMPTY))");
    assert_eq!(seq.child(1).unwrap().kind(), NodeKind::Nop);
}

#[test]
fn bad_constant_value_yields_an_empty_slot() {
    let (pool, parsed) = parse("DEFINITION MODULE T; CONST c = ); END T.");
    assert!(parsed.diagnostics.has_errors());
    let unit = parsed.root.child(0).unwrap();
    assert_eq!(
        unit.child(2).unwrap().to_sexpr(&pool),
        "(DEFLIST (CONSTDEF (IDENT c) (EMPTY)))"
    );
}

#[test]
fn junk_inside_a_definition_section_skips_to_the_next_definition() {
    let (pool, parsed) =
        parse("DEFINITION MODULE T; CONST c = 1; ] ] TYPE t = Card; END T.");
    assert!(parsed.diagnostics.has_errors());
    let unit = parsed.root.child(0).unwrap();
    assert_eq!(
        unit.child(2).unwrap().to_sexpr(&pool),
        "(DEFLIST (CONSTDEF (IDENT c) (INTVAL 1)) (TYPEDEF (IDENT t) (IDENT Card)))"
    );
}

#[test]
fn missing_module_keyword_is_recovered() {
    let (_, parsed) = parse("DEFINITION A; END A.");
    assert!(parsed.diagnostics.has_errors());
    let unit = parsed.root.child(0).unwrap();
    assert_eq!(unit.kind(), NodeKind::Interface);
}

#[test]
fn trailing_junk_after_the_unit_is_one_error() {
    let (_, parsed) = parse("DEFINITION MODULE A; END A. leftover");
    assert_eq!(parsed.diagnostics.error_count(), 1);
}

#[test]
fn deeply_broken_input_terminates() {
    let (_, parsed) = parse("MODULE ; ; IF THEN END END .");
    assert!(parsed.diagnostics.has_errors());
    assert!(parsed.fatal.is_none());
}

#[test]
fn fatal_comment_eof_surfaces_while_diagnostics_are_kept() {
    let (_, parsed) = parse("MODULE T; BEGIN @ (* open");
    assert!(parsed.fatal.is_some());
    assert!(parsed.diagnostics.has_errors());
}
