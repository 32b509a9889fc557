use clap::{CommandFactory, Parser};
use repoviz::cli::{Cli, Command};
use repoviz::{
    cmd_explain, cmd_export, cmd_fetch, cmd_hierarchy, cmd_init, cmd_mermaid, cmd_serve, cmd_tree,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "repoviz=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Some(Command::Serve(args)) => cmd_serve(args),
        Some(Command::Fetch(args)) => cmd_fetch(args),
        Some(Command::Hierarchy(args)) => cmd_hierarchy(args),
        Some(Command::Tree(args)) => cmd_tree(args),
        Some(Command::Mermaid(args)) => cmd_mermaid(args),
        Some(Command::Explain(args)) => cmd_explain(args),
        Some(Command::Export(args)) => cmd_export(args),
        Some(Command::Init(args)) => cmd_init(args),
        None => {
            let _ = Cli::command().print_help();
            2
        }
    };

    std::process::exit(exit_code);
}
