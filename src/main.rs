use numint::manager::manager::IManager;
use std::fs::File;
use std::io::{
    self,
    BufWriter
};
use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;
use structopt::StructOpt;
use tracing::{
    debug,
    info
};

use numint::cli::clierror::CliError;
use numint::cli::pisession::PiSession;
use numint::cli::prompt::Prompter;
use numint::cli::trapezoidsession::TrapezoidSession;
use numint::configuration::Configuration;
use numint::logger;
use numint::render::jsonrenderer::JsonRenderer;
use numint::render::renderer::Renderer;
use numint::render::textrenderer::TextRenderer;

#[derive(Debug, StructOpt)]
#[structopt(name = "numint", about = "Trapezoidal integration and Monte Carlo estimation of π")]
struct CommandlineArgs {
    #[structopt(long, global = true, parse(from_os_str), help = "JSON configuration file")]
    config: Option<PathBuf>,

    #[structopt(long = "log-level", global = true, help = "Log level or filter directive, overrides the configuration")]
    log_level: Option<String>,

    #[structopt(subcommand)]
    command: Command
}

#[derive(Debug, StructOpt)]
enum Command {
    /// Integrate a function with the composite trapezoidal rule.
    Trapezoid {
        #[structopt(long, help = "Solve a named problem from the configuration instead of prompting")]
        problem: Option<String>,

        #[structopt(long, parse(from_os_str), help = "Also write the plot data as JSON to this file")]
        json: Option<PathBuf>
    },

    /// Estimate π by sampling random points in the square [-1, 1]².
    Pi {
        #[structopt(long, conflicts_with = "max-power", help = "Run a single simulation with this many points")]
        points: Option<usize>,

        #[structopt(long = "max-power", help = "Run the convergence analysis up to 10^P points")]
        max_power: Option<u32>
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    let args = CommandlineArgs::from_args();
    let configuration = Configuration::load(args.config.as_deref())?;
    let level = args
        .log_level
        .as_deref()
        .unwrap_or(configuration.settings().log_level.as_str());
    logger::init(level)?;
    match configuration.source() {
        Some(path) => info!(
            path = %path.display(),
            problems = configuration.problem_manager().names().len(),
            "configuration loaded"
        ),
        None => debug!("no configuration file, using defaults")
    }
    debug!(command = ?args.command, "numint started");

    let precision = configuration.settings().output_precision;
    let stdin = io::stdin();
    let prompter = Prompter::new(stdin.lock(), io::stdout());
    let mut renderers: Vec<Box<dyn Renderer>> = vec![Box::new(TextRenderer::new(io::stdout(), precision))];

    match args.command {
        Command::Trapezoid { problem, json } => {
            if let Some(path) = json {
                let file = File::create(&path)?;
                info!(path = %path.display(), "writing plot data");
                renderers.push(Box::new(JsonRenderer::new(BufWriter::new(file))));
            }
            let mut session = TrapezoidSession::new(&configuration, prompter, renderers);
            match problem {
                Some(name) => {
                    let problem = configuration.problem(&name)?;
                    session.run_problem(&problem)
                },
                None => session.run()
            }
        },
        Command::Pi { points, max_power } => {
            let rng = match configuration.settings().seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy()
            };
            let mut session = PiSession::new(prompter, renderers, rng, precision);
            match (points, max_power) {
                (Some(n), _) => session.run_single(n),
                (None, Some(power)) => session.run_convergence(power),
                (None, None) => session.run()
            }
        }
    }
}
