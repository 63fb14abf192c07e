use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{debug, error};
use menu_core::step::sequence_hash;
use menu_domain::FlowMode;
use menuflow::{preview_steps, render_cart, Action, AppConfig, AppError, Storefront};

#[derive(Parser, Debug)]
#[command(name = "menuflow", version, about = "Motor de personalización de pedidos")]
struct Cli {
    /// Catálogo JSON (por defecto MENUFLOW_CATALOG)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Más detalle en los logs (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Muestra la secuencia de pasos de un producto
    Steps {
        #[arg(long)]
        item: String,
        /// Calcula la secuencia en modo combo
        #[arg(long)]
        combo: bool,
    },
    /// Reproduce un script JSON de acciones y muestra el carrito resultante
    Run {
        #[arg(long)]
        script: PathBuf,
    },
}

fn init_logging(config: &AppConfig, verbose: u8) {
    let filter = match verbose {
        0 => config.log_filter.as_str(),
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_target(verbose >= 2)
                             .init();
}

fn run(cli: Cli, config: &AppConfig) -> Result<(), AppError> {
    let catalog = config.load_catalog()?;
    debug!("catálogo: {} productos, {} grupos", catalog.items.len(), catalog.option_groups.len());
    match cli.command {
        Commands::Steps { item, combo } => {
            let mode = if combo { FlowMode::Combo } else { FlowMode::AlaCarte };
            let steps = preview_steps(&catalog, &item, mode)?;
            for (i, step) in steps.iter().enumerate() {
                println!("{i}: {step}");
            }
            println!("hash: {}", sequence_hash(&steps));
        }
        Commands::Run { script } => {
            let raw = fs::read_to_string(&script)?;
            let actions: Vec<Action> = serde_json::from_str(&raw)?;
            let mut store = Storefront::new(&catalog);
            let results = store.run_script(actions)?;
            debug!("{} acciones procesadas", results.len());
            println!("{}", render_cart(store.cart(), config));
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = AppConfig::from_env().with_catalog(cli.catalog.clone());
    init_logging(&config, cli.verbose);

    match run(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
