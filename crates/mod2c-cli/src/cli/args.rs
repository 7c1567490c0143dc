//! Shared argument builders for the CLI.
//!
//! Each function returns a `clap::Arg`; `build_cli` composes them. Flags
//! reject repeated occurrences, which enforces the at-most-once rule.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Source file (positional).
pub fn source_arg() -> Arg {
    Arg::new("source")
        .value_name("SOURCE")
        .value_parser(value_parser!(PathBuf))
        .help("Modula-2 source file (.def or .mod)")
}

/// Print license information (--license).
pub fn license_arg() -> Arg {
    Arg::new("license")
        .long("license")
        .action(ArgAction::SetTrue)
        .help("Print license information and exit")
}

fn flag(id: &'static str, long: &'static str, help: &'static str) -> Arg {
    Arg::new(id).long(long).action(ArgAction::SetTrue).help(help)
}

// --- single-product options ---------------------------------------------

pub fn syntax_only_arg() -> Arg {
    flag("syntax_only", "syntax-only", "Check syntax only, produce no output files")
}

pub fn ast_only_arg() -> Arg {
    flag("ast_only", "ast-only", "Produce only the AST file")
}

pub fn graph_only_arg() -> Arg {
    flag("graph_only", "graph-only", "Produce only the dependency graph file")
}

pub fn xlat_only_arg() -> Arg {
    flag("xlat_only", "xlat-only", "Produce only the C translation")
}

pub fn obj_only_arg() -> Arg {
    flag("obj_only", "obj-only", "Produce only the object file")
}

// --- multi-product toggles ----------------------------------------------

pub fn ast_arg() -> Arg {
    flag("ast", "ast", "Enable the AST product").conflicts_with_all(["no_ast", "single_product"])
}

pub fn no_ast_arg() -> Arg {
    flag("no_ast", "no-ast", "Disable the AST product").conflicts_with("single_product")
}

pub fn graph_arg() -> Arg {
    flag("graph", "graph", "Enable the dependency graph product")
        .conflicts_with_all(["no_graph", "single_product"])
}

pub fn no_graph_arg() -> Arg {
    flag("no_graph", "no-graph", "Disable the dependency graph product")
        .conflicts_with("single_product")
}

pub fn xlat_arg() -> Arg {
    flag("xlat", "xlat", "Enable the C translation product")
        .conflicts_with_all(["no_xlat", "single_product"])
}

pub fn no_xlat_arg() -> Arg {
    flag("no_xlat", "no-xlat", "Disable the C translation product")
        .conflicts_with("single_product")
}

pub fn obj_arg() -> Arg {
    flag("obj", "obj", "Enable the object-file product")
        .conflicts_with_all(["no_obj", "single_product"])
}

pub fn no_obj_arg() -> Arg {
    flag("no_obj", "no-obj", "Disable the object-file product").conflicts_with("single_product")
}

// --- comment policy (translation only) ----------------------------------

pub fn preserve_comments_arg() -> Arg {
    flag("preserve_comments", "preserve-comments", "Keep comments in the C translation")
        .requires("xlat")
        .conflicts_with("strip_comments")
}

pub fn strip_comments_arg() -> Arg {
    flag("strip_comments", "strip-comments", "Drop comments from the C translation")
        .requires("xlat")
}

// --- capabilities --------------------------------------------------------

pub fn dollar_identifiers_arg() -> Arg {
    flag("dollar_identifiers", "dollar-identifiers", "Allow '$' in identifiers")
        .conflicts_with("no_dollar_identifiers")
}

pub fn no_dollar_identifiers_arg() -> Arg {
    flag("no_dollar_identifiers", "no-dollar-identifiers", "Forbid '$' in identifiers")
}

pub fn lowline_identifiers_arg() -> Arg {
    flag("lowline_identifiers", "lowline-identifiers", "Allow '_' in identifiers")
        .conflicts_with("no_lowline_identifiers")
}

pub fn no_lowline_identifiers_arg() -> Arg {
    flag("no_lowline_identifiers", "no-lowline-identifiers", "Forbid '_' in identifiers")
}

// --- diagnostics ---------------------------------------------------------

pub fn verbose_arg() -> Arg {
    flag("verbose", "verbose", "Print a compilation summary")
}

pub fn lexer_debug_arg() -> Arg {
    flag("lexer_debug", "lexer-debug", "Trace every produced token to stderr")
}

pub fn parser_debug_arg() -> Arg {
    flag("parser_debug", "parser-debug", "Trace entered grammar productions to stderr")
}

pub fn show_settings_arg() -> Arg {
    flag("show_settings", "show-settings", "Print the effective settings as JSON")
}

pub fn errant_semicolons_arg() -> Arg {
    flag("errant_semicolons", "errant-semicolons", "Warn about redundant semicolons")
}
