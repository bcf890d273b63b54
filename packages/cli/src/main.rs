use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// embedfs - embed directory trees into Rust binaries
#[derive(Parser, Debug)]
#[command(name = "embedfs")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile one directory into a register function
    Compile {
        /// Virtual root the tree is mounted at, e.g. /app
        #[arg(long)]
        mount: String,

        /// Directory to embed
        #[arg(long)]
        physical: PathBuf,

        /// Base-name glob to leave out; repeatable
        #[arg(long = "exclude", value_name = "GLOB")]
        exclude: Vec<String>,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Compile every mount listed in a JSON config
    Build {
        /// Config file
        #[arg(long)]
        config: PathBuf,

        /// Directory receiving one <name>.rs per mount
        #[arg(long)]
        out_dir: PathBuf,
    },
}

fn main() {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    match args.verbose {
        0 => {}
        1 => {
            logger.filter_level(log::LevelFilter::Debug);
        }
        _ => {
            logger.filter_level(log::LevelFilter::Trace);
        }
    }
    logger.init();

    let result = match args.command {
        Command::Compile {
            mount,
            physical,
            exclude,
            output,
        } => embedfs_cli::compile_to(&mount, &physical, exclude, output.as_deref()),
        Command::Build { config, out_dir } => {
            embedfs_cli::build(&config, &out_dir).map(|written| {
                for path in written {
                    println!("{}", path.display());
                }
            })
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
