use crate::cli::ConfigCommands;
use crate::commands::Outcome;
use crate::config::ConfigStore;
use crate::error::Result;

pub fn execute(store: &ConfigStore, command: &ConfigCommands) -> Result<Outcome> {
    match command {
        ConfigCommands::Path => {
            println!("{}", store.path().display());
        }
        ConfigCommands::Show => show(store)?,
    }
    Ok(Outcome::Success)
}

fn show(store: &ConfigStore) -> Result<()> {
    let config = store.load()?;

    println!("# {}", store.path().display());
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
