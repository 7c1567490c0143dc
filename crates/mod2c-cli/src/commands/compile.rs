//! The compilation driver: runs the front-end over one source file and
//! writes the requested products.

use std::io::IsTerminal;
use std::path::Path;

use mod2c_compiler::{Compilation, CompileOptions, Parsed};
use mod2c_core::{Colors, Pool};

use crate::cli::Options;
use crate::pathnames::{self, Pathname};

/// Run one compilation; the return value is the process exit code
/// (0 on success, otherwise the clamped error count).
pub fn run(options: Options) -> i32 {
    if options.show_settings {
        super::settings::print(&options);
        if options.source.is_none() {
            return 0;
        }
    }

    let Some(source) = options.source.clone() else {
        eprintln!("error: no source file given (see --help)");
        return 1;
    };

    let source_text = source.to_string_lossy();
    let pathname = match pathnames::parse(&source_text) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return 1;
        }
    };
    if pathname.suffix.is_none() {
        eprintln!("error: '{source_text}' is not a Modula-2 source file (.def/.mod)");
        return 1;
    }

    // The pool is process-wide; a second in-process run reuses it.
    let pool = match Pool::init_global().or_else(|_| Pool::global()) {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("error: {e}");
            return 1;
        }
    };

    let compile_options = CompileOptions {
        lowline_identifiers: options.lowline_identifiers,
        dollar_identifiers: options.dollar_identifiers,
        escaped_tab_and_newline: true,
        errant_semicolons: options.errant_semicolons,
        lexer_trace: options.lexer_debug,
        parser_trace: options.parser_debug,
    };
    let compilation = Compilation::with_options(pool, compile_options);
    let colors = Colors::new(std::io::stderr().is_terminal());

    if options.products.xlat || options.products.obj {
        eprintln!(
            "note: the C translation and object stages are not part of this \
             front-end build; running syntax analysis only"
        );
    }

    let mut errors = 0u32;

    if options.products.graph {
        errors += write_graph(&compilation, pool, &source, &pathname, colors);
    }

    let run_parse = options.products.syntax_only
        || options.products.ast
        || options.products.xlat
        || options.products.obj
        || !options.products.graph;
    if run_parse {
        errors += run_front_end(&options, &compilation, pool, &source, &pathname, colors);
    }

    i32::try_from(errors.min(255)).unwrap_or(255)
}

fn run_front_end(
    options: &Options,
    compilation: &Compilation<'_>,
    pool: &Pool,
    source: &Path,
    pathname: &Pathname,
    colors: Colors,
) -> u32 {
    let source_text = source.to_string_lossy();
    let parsed = match compilation.parse_file(source) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("error: {e}");
            return 1;
        }
    };

    eprint!("{}", parsed.diagnostics.render(&source_text, pool, colors));
    let mut errors = parsed.diagnostics.error_count();
    if let Some(fatal) = &parsed.fatal {
        eprintln!("{}error:{} {fatal}", colors.red, colors.reset);
        errors += 1;
    }

    if options.verbose {
        print_summary(&parsed, &source_text);
    }

    if options.products.ast && errors == 0 {
        let out = pathname.sibling("ast");
        if let Err(e) = std::fs::write(&out, parsed.root.to_pretty_sexpr(pool)) {
            eprintln!("error: cannot write '{out}': {e}");
            errors += 1;
        } else if options.verbose {
            eprintln!("mod2c: wrote {out}");
        }
    }

    errors
}

fn write_graph(
    compilation: &Compilation<'_>,
    pool: &Pool,
    source: &Path,
    pathname: &Pathname,
    colors: Colors,
) -> u32 {
    let source_text = source.to_string_lossy();
    let (deps, diagnostics, fatal) = match compilation.dependencies_file(source) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("error: {e}");
            return 1;
        }
    };

    eprint!("{}", diagnostics.render(&source_text, pool, colors));
    let mut errors = diagnostics.error_count();
    if let Some(fatal) = fatal {
        eprintln!("{}error:{} {fatal}", colors.red, colors.reset);
        errors += 1;
    }
    if errors > 0 {
        return errors;
    }

    let module = pool.resolve(deps.module()).unwrap_or_default();
    let mut text = format!("MODULE {module}\n");
    for import in deps.iter() {
        text.push_str(&pool.resolve(import).unwrap_or_default());
        text.push('\n');
    }
    let out = pathname.sibling("dep");
    if let Err(e) = std::fs::write(&out, text) {
        eprintln!("error: cannot write '{out}': {e}");
        return 1;
    }
    0
}

fn print_summary(parsed: &Parsed, source: &str) {
    let key = match parsed.digest {
        Some(key) => format!("0x{key:08X}"),
        None => "n/a".to_owned(),
    };
    eprintln!(
        "mod2c: {source}: {} lines, {} errors, {} warnings, key {key}",
        parsed.lines,
        parsed.diagnostics.error_count(),
        parsed.diagnostics.warning_count(),
    );
}
