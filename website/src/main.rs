use std::path::PathBuf;

use clap::{Parser, Subcommand};
use solana_home::{
    ServeOptions, config::SiteConfig, generate, route::FullRoute, routes, serve,
};

mod layout;
mod routes;

use routes::Index;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to the site config
    #[arg(long, global = true, default_value = "solana-home.yml")]
    config: PathBuf,

    /// Don't print anything. Picked up by the logger directly
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the homepage once
    Build,
    /// Build the homepage, serve it and regenerate it periodically
    Serve {
        /// Expose the server to the network
        #[arg(long)]
        host: bool,

        #[arg(long, default_value_t = 3000)]
        port: u16,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Cli {
        config,
        command,
        quiet: _,
    } = Cli::parse();

    let config = SiteConfig::load(&config)?;
    let index = Index::new(config.homepage.clone());
    let routes: &[&dyn FullRoute] = routes![index];

    match command.unwrap_or(Commands::Build) {
        Commands::Build => {
            generate(routes, config.content_source(), config.build_options())?;
        }
        Commands::Serve { host, port } => {
            serve(
                routes,
                config.content_source(),
                config.build_options(),
                ServeOptions { host, port },
            )?;
        }
    }

    Ok(())
}
