use clap::Parser;
use sealed_params::cli::{init_logging, Cli, Commands};

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Seal { ref pairs, query } => {
            sealed_params::cli::commands::seal::execute(&cli, pairs, query)
        }
        Commands::Encrypt { ref plaintext } => {
            sealed_params::cli::commands::encrypt::execute(&cli, plaintext)
        }
        Commands::Decrypt { ref token } => {
            sealed_params::cli::commands::decrypt::execute(&cli, token)
        }
        Commands::Bind {
            ref input,
            ref fields,
            query,
            ref format,
        } => sealed_params::cli::commands::bind::execute(&cli, input, fields, query, format),
        Commands::Completions { ref shell } => {
            sealed_params::cli::commands::completions::execute(shell)
        }
    };

    if let Err(e) = result {
        sealed_params::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
