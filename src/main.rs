use clap::Parser;
use file_navigator::cli::{Cli, Commands};
use file_navigator::error::Result;
use file_navigator::main_lib;
use file_navigator::store::FileStore;

fn main() -> Result<()> {
    // Initialize logger only if FILE_NAVIGATOR_LOG environment variable is set
    if let Ok(log_file) = std::env::var("FILE_NAVIGATOR_LOG") {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)?;
        env_logger::Builder::new()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .filter_level(log::LevelFilter::Debug)
            .init();

        log::info!("file-navigator starting up");
    }

    let cli = Cli::parse();
    let config = main_lib::load_config(cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::Tree) {
        Commands::Tree => {
            let store = FileStore::load_from_file(&cli.files)?;
            print!("{}", main_lib::render_tree(store.snapshot().tree()));
        }
        Commands::List { path, search } => {
            let listing = main_lib::list_folder(&cli.files, &config, &path, search.as_deref())?;
            print!("{}", listing);
        }
        Commands::Find { path } => {
            println!("{}", main_lib::find_node(&cli.files, &path)?);
        }
        Commands::Execute { command, output } => {
            let result = main_lib::execute_command(&cli.files, &config, &command, output.as_deref())?;
            match output {
                Some(path) => println!("Result saved to: {}", path),
                None => println!("{}", result),
            }
        }
    }

    Ok(())
}
