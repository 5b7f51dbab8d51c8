use clap::Parser;
use plancraft::cli::{
    extract, generate, handle_completions, handle_config_init, idea, serve, Cli, Commands,
    ConfigCommands,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve(args) => serve::run_serve(args).await,
        Commands::Generate(args) => generate::run_generate(args).await,
        Commands::Extract(args) => extract::handle_extract(&args).map(|output| {
            println!("{}", output);
        }),
        Commands::Idea(args) => idea::handle_idea(&args, &mut rand::thread_rng()).map(|output| {
            println!("{}", output);
        }),
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Init(args) => handle_config_init(&args),
        },
        Commands::Completions(args) => {
            handle_completions(&args);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
