use std::{
    path::{Path, PathBuf},
    process,
};

use clap::{Parser, Subcommand};

mod manifest;
mod serve;

use manifest::Manifest;

#[derive(Clone, Debug)]
pub struct Context {
    pub manifest_path: PathBuf,
    pub manifest: Manifest,
}

#[derive(Parser, Debug)]
#[clap(author, version, about = "esmock - Event Store Atom feed simulator", long_about = None)]
struct Opts {
    /// Path to the esmock.yaml manifest file
    #[arg(
        long = "manifest-path",
        short = 'm',
        global = true,
        env = "ESMOCK_MANIFEST",
        default_value = "./esmock.yaml"
    )]
    manifest_path: PathBuf,

    /// Log filter, e.g. "info" or "esmock_core=debug"
    #[arg(long = "log", global = true, env = "RUST_LOG", default_value = "info")]
    log: String,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, PartialEq, Clone, Debug)]
enum Command {
    /// Serve simulated streams over HTTP
    Serve(serve::ServeCommand),
}

#[tokio::main]
async fn main() {
    let opts: Opts = match Opts::try_parse() {
        Ok(opts) => opts,
        Err(e) => {
            let _ = e.print();
            process::exit(e.exit_code());
        }
    };

    let manifest_dir = opts
        .manifest_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();

    load_env_file(&manifest_dir);
    init_tracing(&opts.log);

    let manifest = match Manifest::load(&opts.manifest_path) {
        Ok(manifest) => {
            eprintln!("✓ Loaded manifest from {}", opts.manifest_path.display());
            manifest
        }
        Err(e) => {
            eprintln!("Warning: {}", e);
            Manifest::default()
        }
    };

    let ctx = Context {
        manifest_path: opts.manifest_path.clone(),
        manifest,
    };

    if let Err(e) = handle_command(opts, &ctx).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing(filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_new(filter)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Load environment variables from .env file in the manifest directory
fn load_env_file(manifest_dir: &Path) {
    let env_file_path = manifest_dir.join(".env");

    match dotenvy::from_path(&env_file_path) {
        Ok(_) => {
            eprintln!("✓ Loaded environment from {}", env_file_path.display());
        }
        Err(e) if e.not_found() => {}
        Err(e) => {
            eprintln!(
                "Warning: Failed to load .env file at {}: {}",
                env_file_path.display(),
                e
            );
        }
    }
}

async fn handle_command(opts: Opts, ctx: &Context) -> Result<(), String> {
    match opts.command {
        Command::Serve(cmd) => cmd.execute(ctx).await,
    }
}
