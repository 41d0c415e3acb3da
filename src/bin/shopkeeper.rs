use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use shopkeeper::{
    Frontend, ReqwestClient, ResourcePack, Session, ShopkeeperConfig, ShopkeeperResult,
    TextureComposer, VillagerTexture,
};

#[derive(Parser, Debug)]
#[command(name = "shopkeeper", version)]
struct Cli {
    /// JSON config overriding service endpoints and pack settings.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr (`RUST_LOG` takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a villager texture for a player and save it as PNG.
    Preview(PreviewArgs),
    /// Generate a villager texture and save it as a resource pack zip.
    Pack(PackArgs),
    /// Compose a villager texture from a local skin render (no network).
    Compose(ComposeArgs),
    /// Print the placeholder skin URL.
    DefaultSkin,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Minecraft username.
    #[arg(long, short)]
    username: String,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Also print the texture as a `data:` URI on stdout.
    #[arg(long)]
    data_uri: bool,
}

#[derive(Parser, Debug)]
struct PackArgs {
    /// Minecraft username.
    #[arg(long, short)]
    username: String,

    /// Directory the zip is written into.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Also save the generated texture as PNG.
    #[arg(long)]
    texture_out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Input skin render (PNG).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

/// Loading and error messages on stderr, packs written to a directory.
struct Terminal {
    out_dir: PathBuf,
}

impl Frontend for Terminal {
    fn show_loading(&mut self, message: &str) {
        eprintln!("{message}");
    }

    fn hide_loading(&mut self) {}

    fn show_error(&mut self, message: &str) {
        eprintln!("{message}");
    }

    fn show_preview(&mut self, texture: &VillagerTexture) {
        tracing::debug!(w = texture.width(), h = texture.height(), "preview ready");
    }

    fn deliver(&mut self, pack: &ResourcePack) -> ShopkeeperResult<()> {
        let path = pack.save_in(&self.out_dir)?;
        eprintln!("wrote {}", path.display());
        Ok(())
    }

    fn show_skin(&mut self, url: &str) {
        eprintln!("skin: {url}");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => ShopkeeperConfig::load(path)?,
        None => ShopkeeperConfig::default(),
    };

    match cli.cmd {
        Command::Preview(args) => cmd_preview(args, config).await,
        Command::Pack(args) => cmd_pack(args, config).await,
        Command::Compose(args) => cmd_compose(args),
        Command::DefaultSkin => {
            println!("{}", config.default_skin_url);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn new_session(
    config: ShopkeeperConfig,
    out_dir: PathBuf,
) -> anyhow::Result<Session<ReqwestClient, Terminal>> {
    let http = ReqwestClient::with_timeout(config.request_timeout())?;
    Ok(Session::new(http, Terminal { out_dir }, config))
}

async fn cmd_preview(args: PreviewArgs, config: ShopkeeperConfig) -> anyhow::Result<ExitCode> {
    let mut session = new_session(config, PathBuf::from("."))?;
    if session.generate(&args.username).await.is_err() {
        return Ok(ExitCode::FAILURE);
    }

    let generation = session
        .state()
        .generation()
        .context("generate succeeded without a texture (bug)")?;
    write_texture(&generation.texture, &args.out)?;

    if args.data_uri {
        println!("{}", generation.texture.to_data_uri()?);
    }
    Ok(ExitCode::SUCCESS)
}

async fn cmd_pack(args: PackArgs, config: ShopkeeperConfig) -> anyhow::Result<ExitCode> {
    let mut session = new_session(config, args.out_dir)?;
    if session.generate(&args.username).await.is_err() {
        return Ok(ExitCode::FAILURE);
    }

    if let Some(path) = &args.texture_out {
        let generation = session
            .state()
            .generation()
            .context("generate succeeded without a texture (bug)")?;
        write_texture(&generation.texture, path)?;
    }

    if session.download().await.is_err() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<ExitCode> {
    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read skin '{}'", args.in_path.display()))?;
    let skin = shopkeeper::decode_skin(&bytes)
        .with_context(|| format!("decode skin '{}'", args.in_path.display()))?;

    let texture = TextureComposer::villager().compose(&skin);
    write_texture(&texture, &args.out)?;
    Ok(ExitCode::SUCCESS)
}

fn write_texture(texture: &VillagerTexture, path: &Path) -> anyhow::Result<()> {
    let png = texture.to_png()?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, png).with_context(|| format!("write '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}
