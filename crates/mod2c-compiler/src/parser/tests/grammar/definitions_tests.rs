//! Definition, declaration and type-denoter parsing tests.

use crate::test_utils::{assert_clean, parse, type_sexpr, unit_child_sexpr};

#[test]
fn constant_definition() {
    let defs = unit_child_sexpr("DEFINITION MODULE T; CONST n = 1; END T.", 2);
    assert_eq!(defs, "(DEFLIST (CONSTDEF (IDENT n) (INTVAL 1)))");
}

#[test]
fn one_const_section_with_several_definitions() {
    let defs = unit_child_sexpr("DEFINITION MODULE T; CONST a = 1; b = 2; END T.", 2);
    assert_eq!(
        defs,
        "(DEFLIST (CONSTDEF (IDENT a) (INTVAL 1)) (CONSTDEF (IDENT b) (INTVAL 2)))"
    );
}

#[test]
fn subrange_type() {
    assert_eq!(
        type_sexpr("[0 .. 7] OF Card"),
        "(SUBR (INTVAL 0) (INTVAL 7) (IDENT Card))"
    );
}

#[test]
fn enumeration_type() {
    assert_eq!(
        type_sexpr("(red, green, blue)"),
        "(ENUM (EMPTY) (IDENTLIST (IDENT red) (IDENT green) (IDENT blue)))"
    );
}

#[test]
fn enumeration_extension() {
    assert_eq!(
        type_sexpr("(+ Color, ultraviolet)"),
        "(ENUM (IDENT Color) (IDENTLIST (IDENT ultraviolet)))"
    );
}

#[test]
fn set_type() {
    assert_eq!(type_sexpr("SET OF Color"), "(SET (IDENT Color))");
}

#[test]
fn array_type() {
    assert_eq!(
        type_sexpr("ARRAY 10 OF Card"),
        "(ARRAY (INTVAL 10) (IDENT Card))"
    );
}

#[test]
fn record_type() {
    assert_eq!(
        type_sexpr("RECORD x : Card; y : Card END"),
        "(RECORD (EMPTY) (FIELDSEQ \
         (FIELD (IDENTLIST (IDENT x)) (IDENT Card)) \
         (FIELD (IDENTLIST (IDENT y)) (IDENT Card))))"
    );
}

#[test]
fn record_type_with_extension() {
    assert_eq!(
        type_sexpr("RECORD ( Base ) tag : Card END"),
        "(RECORD (IDENT Base) (FIELDSEQ (FIELD (IDENTLIST (IDENT tag)) (IDENT Card))))"
    );
}

#[test]
fn pointer_type() {
    assert_eq!(type_sexpr("POINTER TO Node"), "(POINTER (IDENT Node))");
}

#[test]
fn opaque_types() {
    assert_eq!(type_sexpr("OPAQUE"), "(OPAQUE (EMPTY))");
    assert_eq!(type_sexpr("OPAQUE [16]"), "(OPAQUE (INTVAL 16))");
}

#[test]
fn procedure_type() {
    assert_eq!(
        type_sexpr("PROCEDURE ( Card; VAR Card ) : Bool"),
        "(PROCTYPE (FPARAMLIST (IDENT Card) (VARP (IDENT Card))) (IDENT Bool))"
    );
}

#[test]
fn parameterless_procedure_type() {
    assert_eq!(type_sexpr("PROCEDURE"), "(PROCTYPE (EMPTY) (EMPTY))");
}

#[test]
fn alias_type() {
    assert_eq!(
        type_sexpr("ALIAS OF Other.T"),
        "(ALIAS (QUALIDENT (IDENT Other) (IDENT T)))"
    );
}

#[test]
fn qualified_type_name() {
    assert_eq!(
        type_sexpr("Storage.Handle"),
        "(QUALIDENT (IDENT Storage) (IDENT Handle))"
    );
}

#[test]
fn procedure_header_with_binding() {
    let defs = unit_child_sexpr(
        "DEFINITION MODULE T; PROCEDURE [ALLOC] allocate ( VAR p : Ptr ); END T.",
        2,
    );
    assert_eq!(
        defs,
        "(DEFLIST (PROCDECL (BIND (IDENT ALLOC)) (IDENT allocate) \
         (FPARAMLIST (FPARAMS (IDENTLIST (IDENT p)) (VARP (IDENT Ptr)))) (EMPTY)))"
    );
}

#[test]
fn procedure_header_with_open_array_and_return() {
    let defs = unit_child_sexpr(
        "DEFINITION MODULE T; PROCEDURE sum ( CONST xs : ARRAY OF Card ) : Card; END T.",
        2,
    );
    assert_eq!(
        defs,
        "(DEFLIST (PROCDECL (EMPTY) (IDENT sum) \
         (FPARAMLIST (FPARAMS (IDENTLIST (IDENT xs)) (CONSTP (OPENARRAY (IDENT Card))))) \
         (IDENT Card)))"
    );
}

#[test]
fn casting_formal_types() {
    let defs = unit_child_sexpr(
        "DEFINITION MODULE T; PROCEDURE peek ( raw : OCTETSEQ; at : POINTER ); END T.",
        2,
    );
    assert_eq!(
        defs,
        "(DEFLIST (PROCDECL (EMPTY) (IDENT peek) \
         (FPARAMLIST (FPARAMS (IDENTLIST (IDENT raw)) (CASTOCTSEQ)) \
         (FPARAMS (IDENTLIST (IDENT at)) (CASTADDR))) (EMPTY)))"
    );
}

#[test]
fn arglist_formal_type() {
    let defs = unit_child_sexpr(
        "DEFINITION MODULE T; PROCEDURE fmt ( args : ARGLIST OF Card ); END T.",
        2,
    );
    assert_eq!(
        defs,
        "(DEFLIST (PROCDECL (EMPTY) (IDENT fmt) \
         (FPARAMLIST (FPARAMS (IDENTLIST (IDENT args)) (ARGLIST (IDENT Card)))) (EMPTY)))"
    );
}

#[test]
fn non_bindable_binding_specifier_is_an_error() {
    let (_, parsed) = parse("DEFINITION MODULE T; PROCEDURE [Frobnicate] f; END T.");
    assert_eq!(parsed.diagnostics.error_count(), 1);
}

#[test]
fn unqualified_alias_definition() {
    let defs = unit_child_sexpr(
        "DEFINITION MODULE T; UNQUALIFIED Storage.Alloc, X; END T.",
        2,
    );
    assert_eq!(
        defs,
        "(DEFLIST (UNQ (IDENTLIST (QUALIDENT (IDENT Storage) (IDENT Alloc)) (IDENT X))))"
    );
}

#[test]
fn todo_placeholder() {
    let defs = unit_child_sexpr(
        "DEFINITION MODULE T; TO DO \"fix me\"; \"later\" END; END T.",
        2,
    );
    assert_eq!(
        defs,
        "(DEFLIST (TODO (EMPTY) (TASKLIST (QUOTEDVAL \"fix me\") (QUOTEDVAL \"later\"))))"
    );
}

#[test]
fn todo_with_tracking_reference() {
    let defs = unit_child_sexpr(
        "DEFINITION MODULE T; TO DO (\"#42\", 2) \"port it\" END; END T.",
        2,
    );
    assert_eq!(
        defs,
        "(DEFLIST (TODO (EXPRLIST (QUOTEDVAL \"#42\") (INTVAL 2)) \
         (TASKLIST (QUOTEDVAL \"port it\"))))"
    );
}

#[test]
fn var_declarations_in_a_block() {
    let (pool, parsed) = parse("IMPLEMENTATION MODULE M; VAR a, b : Card; END M.");
    assert_clean(&pool, &parsed);
    let unit = parsed.root.child(0).expect("unit");
    assert_eq!(
        unit.child(2).unwrap().to_sexpr(&pool),
        "(BLOCK (DEFLIST (VARDECL (IDENTLIST (IDENT a) (IDENT b)) (IDENT Card))) (EMPTY))"
    );
}

#[test]
fn procedure_with_body() {
    let (pool, parsed) =
        parse("IMPLEMENTATION MODULE M; PROCEDURE run; BEGIN NOP END run; END M.");
    assert_clean(&pool, &parsed);
    let unit = parsed.root.child(0).expect("unit");
    assert_eq!(
        unit.child(2).unwrap().to_sexpr(&pool),
        "(BLOCK (DEFLIST (PROC (PROCDECL (EMPTY) (IDENT run) (EMPTY) (EMPTY)) \
         (BLOCK (EMPTY) (STMTSEQ (NOP))))) (EMPTY))"
    );
}

#[test]
fn procedure_tail_mismatch_is_a_warning() {
    let (_, parsed) =
        parse("IMPLEMENTATION MODULE M; PROCEDURE run; BEGIN NOP END walk; END M.");
    assert_eq!(parsed.diagnostics.error_count(), 0);
    assert_eq!(parsed.diagnostics.warning_count(), 1);
}
