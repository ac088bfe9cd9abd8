use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use gradebook::cli::commands::execute_command;
use gradebook::cli::{output, Cli, CliError, CliResult};
use gradebook::config::Settings;
use gradebook::exitcode;
use gradebook::infrastructure::di::ServiceContainer;

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.debug);

    if let Err(e) = run(&cli) {
        output::error(&e);
        std::process::exit(e.exit_code());
    }
    std::process::exit(exitcode::OK);
}

fn run(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load()
        .map_err(CliError::from)?
        .with_data_file(cli.data.clone());
    tracing::debug!("data_file: {}", settings.data_file.display());

    let container = ServiceContainer::new(settings);
    execute_command(cli, &container)
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -d -d -d");
            LevelFilter::TRACE
        }
    };

    // Create a noisy module filter
    let noisy_modules = ["config"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    // Create a subscriber with formatted output directed to stderr
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    let filtered_layer = fmt_layer.with_filter(filter).with_filter(module_filter);

    tracing_subscriber::registry().with(filtered_layer).init();

    match filter {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::debug!("Debug mode: trace"),
        _ => {}
    }
}
