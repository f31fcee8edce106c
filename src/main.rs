use anyhow::Result;
use clap::{ArgGroup, Parser, ValueEnum};
use env_logger::Env;
use log::{debug, info};
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use dockviz::notifier::VerbosityLevel;
use dockviz::sources::{self, EngineKind};
use dockviz::{render, Notifier, RenderMode, RenderOptions, VizError};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum Engine {
    Docker,
    Nerdctl,
}

impl From<Engine> for EngineKind {
    fn from(engine: Engine) -> Self {
        match engine {
            Engine::Docker => EngineKind::Docker,
            Engine::Nerdctl => EngineKind::Nerdctl,
        }
    }
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("mode").args(["dot", "tree", "short"]).multiple(false)))]
struct Cli {
    #[arg(short, long, help = "Show image information as Graphviz dot")]
    dot: bool,

    #[arg(short, long, help = "Show image information as tree")]
    tree: bool,

    #[arg(
        short,
        long,
        help = "Show short summary of images (repo name and list of tags)"
    )]
    short: bool,

    #[arg(short = 'n', long = "no-trunc", help = "Don't truncate the image IDs")]
    no_trunc: bool,

    #[arg(
        short,
        long,
        help = "Show each layer's own size instead of the virtual size in the tree"
    )]
    incremental: bool,

    #[arg(
        help = "Image to start the tree from: an id (or id prefix) or a repository[:tag]",
        requires = "tree"
    )]
    root: Option<String>,

    #[arg(
        long,
        value_name = "FILE",
        help = "Read the image list from a JSON snapshot instead of the engine"
    )]
    input: Option<PathBuf>,

    #[arg(
        short,
        long,
        value_enum,
        default_value = "docker",
        help = "Container engine to query when no snapshot is given"
    )]
    engine: Engine,

    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        help = "Verbose mode (-v for info, -vv for debug, -vvv for trace)"
    )]
    verbose: u8,
}

impl Cli {
    fn mode(&self) -> Result<RenderMode, VizError> {
        if self.dot {
            Ok(RenderMode::Dot)
        } else if self.tree {
            Ok(RenderMode::Tree {
                root: self.root.clone(),
            })
        } else if self.short {
            Ok(RenderMode::Short)
        } else {
            Err(VizError::NoRenderMode)
        }
    }

    fn options(&self) -> RenderOptions {
        RenderOptions {
            no_trunc: self.no_trunc,
            incremental: self.incremental,
        }
    }
}

/// Same code clap uses for bad arguments.
const USAGE_EXIT_CODE: u8 = 2;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            match err.downcast_ref::<VizError>() {
                Some(viz_err) if viz_err.is_usage() => ExitCode::from(USAGE_EXIT_CODE),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let verbosity = VerbosityLevel::from(cli.verbose);
    env_logger::Builder::from_env(Env::default())
        .filter_level(verbosity.to_log_level())
        .init();

    // Usage errors come before any input is read
    let mode = cli.mode()?;
    debug!("Render mode: {:?}", mode);
    debug!("Options: {:?}", cli.options());

    let notifier = Notifier::new(cli.verbose);
    let source = sources::select_source(
        cli.input.clone(),
        io::stdin().is_terminal(),
        cli.engine.into(),
    )?;
    info!("Reading images from {} source", source.name());

    let images = source.list_images(&notifier)?;
    notifier.finish();

    let output = render(&mode, &images, cli.options())?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;

    Ok(())
}
