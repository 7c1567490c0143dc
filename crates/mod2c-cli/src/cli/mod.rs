//! CLI assembly: argument definitions and option resolution.

mod args;


use std::path::PathBuf;

use clap::{ArgGroup, ArgMatches, Command};

pub fn build_cli() -> Command {
    Command::new("mod2c")
        .about("Modula-2 to C translator front-end")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(args::source_arg())
        .arg(args::license_arg())
        .arg(args::syntax_only_arg())
        .arg(args::ast_only_arg())
        .arg(args::graph_only_arg())
        .arg(args::xlat_only_arg())
        .arg(args::obj_only_arg())
        .arg(args::ast_arg())
        .arg(args::no_ast_arg())
        .arg(args::graph_arg())
        .arg(args::no_graph_arg())
        .arg(args::xlat_arg())
        .arg(args::no_xlat_arg())
        .arg(args::obj_arg())
        .arg(args::no_obj_arg())
        .arg(args::preserve_comments_arg())
        .arg(args::strip_comments_arg())
        .arg(args::dollar_identifiers_arg())
        .arg(args::no_dollar_identifiers_arg())
        .arg(args::lowline_identifiers_arg())
        .arg(args::no_lowline_identifiers_arg())
        .arg(args::verbose_arg())
        .arg(args::lexer_debug_arg())
        .arg(args::parser_debug_arg())
        .arg(args::show_settings_arg())
        .arg(args::errant_semicolons_arg())
        .group(
            ArgGroup::new("single_product")
                .args([
                    "syntax_only",
                    "ast_only",
                    "graph_only",
                    "xlat_only",
                    "obj_only",
                ])
                .multiple(false),
        )
}

/// Which output products this run is asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Products {
    pub syntax_only: bool,
    pub ast: bool,
    pub graph: bool,
    pub xlat: bool,
    pub obj: bool,
}

impl Products {
    /// No products at all (the base for the `--*-only` options).
    const NONE: Products = Products {
        syntax_only: false,
        ast: false,
        graph: false,
        xlat: false,
        obj: false,
    };
}

impl Default for Products {
    /// The front-end default: AST on, everything else off.
    fn default() -> Self {
        Self {
            ast: true,
            ..Self::NONE
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum CommentPolicy {
    Preserve,
    Strip,
}

/// Resolved command-line options.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Options {
    pub source: Option<PathBuf>,
    pub license: bool,
    pub products: Products,
    pub comments: Option<CommentPolicy>,
    pub dollar_identifiers: bool,
    pub lowline_identifiers: bool,
    pub verbose: bool,
    pub lexer_debug: bool,
    pub parser_debug: bool,
    pub show_settings: bool,
    pub errant_semicolons: bool,
}

impl Options {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let flag = |id: &str| matches.get_flag(id);

        let products = if flag("syntax_only") {
            Products {
                syntax_only: true,
                ..Products::NONE
            }
        } else if flag("ast_only") {
            Products {
                ast: true,
                ..Products::NONE
            }
        } else if flag("graph_only") {
            Products {
                graph: true,
                ..Products::NONE
            }
        } else if flag("xlat_only") {
            Products {
                xlat: true,
                ..Products::NONE
            }
        } else if flag("obj_only") {
            Products {
                obj: true,
                ..Products::NONE
            }
        } else {
            let defaults = Products::default();
            Products {
                syntax_only: false,
                ast: (defaults.ast || flag("ast")) && !flag("no_ast"),
                graph: (defaults.graph || flag("graph")) && !flag("no_graph"),
                xlat: (defaults.xlat || flag("xlat")) && !flag("no_xlat"),
                obj: (defaults.obj || flag("obj")) && !flag("no_obj"),
            }
        };

        let comments = if flag("preserve_comments") {
            Some(CommentPolicy::Preserve)
        } else if flag("strip_comments") {
            Some(CommentPolicy::Strip)
        } else {
            None
        };

        Self {
            source: matches.get_one::<PathBuf>("source").cloned(),
            license: flag("license"),
            products,
            comments,
            dollar_identifiers: flag("dollar_identifiers"),
            lowline_identifiers: flag("lowline_identifiers"),
            verbose: flag("verbose"),
            lexer_debug: flag("lexer_debug"),
            parser_debug: flag("parser_debug"),
            show_settings: flag("show_settings"),
            errant_semicolons: flag("errant_semicolons"),
        }
    }
}
