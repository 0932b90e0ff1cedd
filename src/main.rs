use clap::Parser;
use fec::cli::commands;
use fec::cli::{Cli, Commands};
use fec::core::{Config, Verdict};
use miette::Result;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive
const LOG_ENV: &str = "FEC_LOG";

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
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
    init_logging(cli.global.verbose);

    let config = Config::load();
    let mut global = cli.global;
    global.apply_config(&config);

    match cli.command {
        Commands::List(args) => commands::list::run(args, &global, &config),
        Commands::Show(args) => commands::show::run(args, &global),
        Commands::Pass(args) => commands::mark::run(args, Verdict::Pass, &global),
        Commands::Fail(args) => commands::mark::run(args, Verdict::Fail, &global),
        Commands::Reset(args) => commands::reset::run(args, &global),
        Commands::Convert(args) => commands::convert::run(args, &global),
        Commands::Summary(args) => commands::summary::run(args, &global),
        Commands::Config(cmd) => commands::config::run(cmd, &config),
        Commands::Completions(args) => commands::completions::run(args),
    }
}

/// Log to stderr; `--verbose` forces debug, otherwise `FEC_LOG` or warn
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
