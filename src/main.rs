use anyhow::Result;
use clap::Parser;
use pkgcmd::commands::{Format, generate};
use pkgcmd::domain::model::{Direction, GenerateRequest, NixInstallMethod};
use std::path::PathBuf;

/// pkgcmd - install and uninstall command generator
///
/// Picks one package per app among the sources bound to a distro and prints
/// the shell commands to install or remove them.
///
/// Examples:
///   pkgcmd install --distro ubuntu firefox git
///   pkgcmd uninstall --distro ubuntu --deps --cleanup vlc
#[derive(Parser, Debug)]
#[command(author, version = env!("PKGCMD_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Catalog JSON file (also via PKGCMD_CATALOG)
    #[arg(long = "catalog", short = 'c', value_name = "PATH", global = true)]
    pub catalog: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Generate install commands
    Install(InstallArgs),

    /// Generate uninstall commands
    Uninstall(UninstallArgs),
}

#[derive(clap::Args, Debug)]
pub struct SelectionArgs {
    /// Target distro slug (e.g. ubuntu, fedora, nixos, windows)
    #[arg(long, short = 'd', value_name = "SLUG")]
    pub distro: String,

    /// Prefer packages from this source slug
    #[arg(long, value_name = "SOURCE")]
    pub prefer: Option<String>,

    /// NixOS install method: nix-shell, nix-env or nix-flakes
    #[arg(long = "nix-method", value_name = "METHOD")]
    pub nix_method: Option<NixInstallMethod>,

    /// App ids
    #[arg(value_name = "APP", required = true, num_args = 1..)]
    pub apps: Vec<String>,
}

#[derive(clap::Args, Debug)]
pub struct InstallArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Include source and package setup commands
    #[arg(long)]
    pub setup: bool,
}

#[derive(clap::Args, Debug)]
pub struct UninstallArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Include source and package cleanup commands
    #[arg(long)]
    pub cleanup: bool,

    /// Include dependency cleanup commands
    #[arg(long)]
    pub deps: bool,
}

impl SelectionArgs {
    fn into_request(self) -> GenerateRequest {
        let mut request = GenerateRequest::new(self.distro, self.apps);
        request.options.source_preference = self.prefer;
        request.options.nix_install_method = self.nix_method;
        request
    }
}

impl Cli {
    fn format(&self) -> Format {
        if self.json { Format::Json } else { Format::Text }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = pkgcmd::runtime::RealRuntime;
    let format = cli.format();

    let (direction, request) = match cli.command {
        Commands::Install(args) => (
            Direction::Install,
            args.selection.into_request().setup_cleanup(args.setup),
        ),
        Commands::Uninstall(args) => (
            Direction::Uninstall,
            args.selection
                .into_request()
                .setup_cleanup(args.cleanup)
                .dependency_cleanup(args.deps),
        ),
    };

    let output = generate(&runtime, cli.catalog, direction, &request, format).await?;
    print!("{}", output);
    if format == Format::Json {
        println!();
    }
    Ok(())
}
