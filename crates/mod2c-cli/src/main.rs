mod cli;
mod commands;
mod pathnames;


fn main() {
    let matches = cli::build_cli().get_matches();
    let options = cli::Options::from_matches(&matches);

    if options.license {
        commands::license::run();
        return;
    }

    std::process::exit(commands::compile::run(options));
}
