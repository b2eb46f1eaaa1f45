use clap::Parser;
use miette::Result;
use tracing_subscriber::EnvFilter;

use chy::cli::{Cli, Commands};
use chy::core::Config;

/// Log to stderr; `CHY_LOG` overrides the level picked from `--verbose`
fn init_tracing(verbose: bool) {
    let default = if verbose { "chy=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("CHY_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    init_tracing(global.verbose);

    if !matches!(cli.command, Commands::Guide | Commands::Completions(_)) {
        chy::cli::guide::show_on_first_run(&global, &Config::load());
    }

    match cli.command {
        Commands::New(args) => chy::cli::commands::new::run(args, &global),
        Commands::Add(args) => chy::cli::commands::add::run(args, &global),
        Commands::Set(args) => chy::cli::commands::set::run(args, &global),
        Commands::Calc(args) => chy::cli::commands::calc::run(args, &global),
        Commands::Show(args) => chy::cli::commands::show::run(args, &global),
        Commands::Export(args) => chy::cli::commands::export::run(args, &global),
        Commands::Template(args) => chy::cli::commands::template::run(args),
        Commands::Guide => chy::cli::commands::guide::run(),
        Commands::Completions(args) => chy::cli::commands::completions::run(args),
    }
}
