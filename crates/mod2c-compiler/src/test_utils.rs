//! Shared helpers for front-end tests.

use mod2c_core::{Colors, Pool};

use crate::compilation::{Compilation, CompileOptions, Parsed};

pub(crate) fn parse(text: &str) -> (Pool, Parsed) {
    parse_with(text, CompileOptions::default())
}

pub(crate) fn parse_with(text: &str, options: CompileOptions) -> (Pool, Parsed) {
    let pool = Pool::new();
    let parsed = Compilation::with_options(&pool, options).parse_text(text);
    (pool, parsed)
}

pub(crate) fn assert_clean(pool: &Pool, parsed: &Parsed) {
    assert!(
        parsed.fatal.is_none(),
        "unexpected fatal error: {:?}",
        parsed.fatal
    );
    assert!(
        !parsed.diagnostics.has_errors(),
        "unexpected parse errors:\n{}",
        parsed.diagnostics.render("test", pool, Colors::OFF)
    );
}

/// S-expression of the n-th child of the unit (the `FILE` root's child).
pub(crate) fn unit_child_sexpr(text: &str, index: usize) -> String {
    let (pool, parsed) = parse(text);
    assert_clean(&pool, &parsed);
    let unit = parsed.root.child(0).expect("FILE owns the unit");
    unit.child(index)
        .expect("unit child in range")
        .to_sexpr(&pool)
}

/// Parse one statement wrapped in a program module; dump the statement.
pub(crate) fn stmt_sexpr(stmt: &str) -> String {
    let source = format!("MODULE T; BEGIN {stmt} END T.");
    let (pool, parsed) = parse(&source);
    assert_clean(&pool, &parsed);
    let unit = parsed.root.child(0).expect("unit");
    let block = unit.child(2).expect("block");
    let seq = block.child(1).expect("statement sequence");
    seq.child(0).expect("statement").to_sexpr(&pool)
}

/// Parse one expression wrapped in a constant definition; dump the value.
pub(crate) fn expr_sexpr(expr: &str) -> String {
    let source = format!("DEFINITION MODULE T; CONST c = {expr}; END T.");
    let (pool, parsed) = parse(&source);
    assert_clean(&pool, &parsed);
    let unit = parsed.root.child(0).expect("unit");
    let defs = unit.child(2).expect("definition list");
    let constdef = defs.child(0).expect("constant definition");
    constdef.child(1).expect("constant value").to_sexpr(&pool)
}

/// Parse one type denoter wrapped in a type definition; dump the denoter.
pub(crate) fn type_sexpr(denoter: &str) -> String {
    let source = format!("DEFINITION MODULE T; TYPE t = {denoter}; END T.");
    let (pool, parsed) = parse(&source);
    assert_clean(&pool, &parsed);
    let unit = parsed.root.child(0).expect("unit");
    let defs = unit.child(2).expect("definition list");
    let typedef = defs.child(0).expect("type definition");
    typedef.child(1).expect("type denoter").to_sexpr(&pool)
}
