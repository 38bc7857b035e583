use builder_gen::cmds;
use builder_gen::cmds::analyze::DeclOutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "builder-gen")]
#[command(about = "Staged builder generator for Java type declarations", long_about = None)]
struct Cli {
    /* Enable verbose output and debug logging */
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /* Synthesize builders and write Java sources */
    Codegen {
        /* Input YAML files containing type declarations */
        #[arg(short = 'f', long = "files", value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /* Output directory for generated code, overrides the config file */
        #[arg(short = 'o', long = "output", value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /* Generator config file, defaults to ./staged-builder.yaml when present */
        #[arg(short = 'c', long = "config", value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /* Show the stages, methods and folded extensions synthesized for each type */
    Analyze {
        /* Input YAML files containing type declarations */
        #[arg(short = 'f', long = "files", value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /* Generator config file, defaults to ./staged-builder.yaml when present */
        #[arg(short = 'c', long = "config", value_name = "FILE")]
        config: Option<PathBuf>,

        /* Print the synthesized declaration tree */
        #[arg(long = "print-decls")]
        print_decls: bool,

        /* Format to use when printing declarations */
        #[arg(long = "format", value_enum, default_value = "json")]
        format: DeclOutputFormat,
    },
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Codegen {
            files,
            output_dir,
            config,
        } => {
            cmds::codegen::run(files, output_dir, config, cli.verbose)?;
        }

        Commands::Analyze {
            files,
            config,
            print_decls,
            format,
        } => {
            cmds::analyze::run(files, config, print_decls, format)?;
        }
    }

    Ok(())
}
