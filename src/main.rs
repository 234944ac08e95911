use clap::Parser;
use hybridops::cli::{
    choose, exit_code, handle_completions, handle_config_init, handle_config_show, replay, Cli,
    Commands, ConfigCommands,
};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Choose(args) => choose::run_choose(&args),
        Commands::Replay(args) => replay::handle_replay(&args),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Init(args) => handle_config_init(&args),
            ConfigCommands::Show(args) => handle_config_show(&args),
        },
        Commands::Completions(args) => {
            handle_completions(&args);
            return;
        }
    };

    match result {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(exit_code(&e));
        }
    }
}
