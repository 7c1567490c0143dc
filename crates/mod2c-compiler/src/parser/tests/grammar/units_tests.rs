//! Compilation unit parsing tests.

use crate::ast::NodeKind;
use crate::test_utils::{assert_clean, parse, unit_child_sexpr};

#[test]
fn minimal_definition_module() {
    let (pool, parsed) = parse("DEFINITION MODULE A; END A.");
    assert_clean(&pool, &parsed);
    assert_eq!(parsed.root.kind(), NodeKind::File);
    let unit = parsed.root.child(0).expect("unit");
    assert_eq!(unit.kind(), NodeKind::Interface);
    assert_eq!(unit.len(), 4);
    assert_eq!(unit.child(0).unwrap().to_sexpr(&pool), "(IDENT A)");
    assert_eq!(unit.child(1).unwrap().to_sexpr(&pool), "(EMPTY)");
    assert_eq!(unit.child(2).unwrap().to_sexpr(&pool), "(EMPTY)");
    assert_eq!(unit.child(3).unwrap().kind(), NodeKind::Key);
}

#[test]
fn import_with_reexport_marker() {
    let imports = unit_child_sexpr("DEFINITION MODULE X; IMPORT A, B+, C; END X.", 1);
    assert_eq!(
        imports,
        "(IMPORT (IMPLIST (IDENT A) (REEXP (IDENT B)) (IDENT C)))"
    );
}

#[test]
fn repeated_import_clauses_share_one_import_node() {
    let imports = unit_child_sexpr("DEFINITION MODULE X; IMPORT A; IMPORT B; END X.", 1);
    assert_eq!(imports, "(IMPORT (IMPLIST (IDENT A) (IDENT B)))");
}

#[test]
fn program_module() {
    let (pool, parsed) = parse("MODULE M; BEGIN NOP END M.");
    assert_clean(&pool, &parsed);
    let unit = parsed.root.child(0).expect("unit");
    assert_eq!(unit.kind(), NodeKind::Program);
    assert_eq!(
        unit.child(2).unwrap().to_sexpr(&pool),
        "(BLOCK (EMPTY) (STMTSEQ (NOP)))"
    );
}

#[test]
fn implementation_module() {
    let (pool, parsed) = parse("IMPLEMENTATION MODULE M; END M.");
    assert_clean(&pool, &parsed);
    let unit = parsed.root.child(0).expect("unit");
    assert_eq!(unit.kind(), NodeKind::Implementation);
    assert_eq!(unit.child(2).unwrap().to_sexpr(&pool), "(BLOCK (EMPTY) (EMPTY))");
}

#[test]
fn private_import_in_program_module() {
    let imports = unit_child_sexpr("MODULE M; IMPORT A, B; BEGIN END M.", 1);
    assert_eq!(imports, "(IMPORT (IMPLIST (IDENT A) (IDENT B)))");
}

#[test]
fn reexport_marker_is_rejected_in_private_imports() {
    let (_, parsed) = parse("MODULE M; IMPORT A+; BEGIN END M.");
    assert_eq!(parsed.diagnostics.error_count(), 1);
}

#[test]
fn module_tail_mismatch_is_a_warning() {
    let (_, parsed) = parse("DEFINITION MODULE A; END B.");
    assert_eq!(parsed.diagnostics.error_count(), 0);
    assert_eq!(parsed.diagnostics.warning_count(), 1);
}

#[test]
fn unit_key_carries_the_source_digest() {
    let text = "DEFINITION MODULE A; END A.";
    let (_, parsed) = parse(text);
    assert_eq!(parsed.digest, Some(crc32fast::hash(text.as_bytes())));
    let unit = parsed.root.child(0).expect("unit");
    let key = unit.child(3).expect("key");
    assert_eq!(
        key.value(),
        Some(&crate::ast::Value::Key(crc32fast::hash(text.as_bytes())))
    );
}

#[test]
fn empty_input_is_a_syntax_error() {
    let (_, parsed) = parse("");
    assert!(parsed.diagnostics.has_errors());
    let unit = parsed.root.child(0).expect("unit slot");
    assert_eq!(unit.kind(), NodeKind::Empty);
}
