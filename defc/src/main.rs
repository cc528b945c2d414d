use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use deflang::codegen::{CBackend, Define, Generator, Node, Unimplemented};
use log::info;
use std::{fs, path::Path, path::PathBuf};

#[derive(Parser)]
#[command(name = "defc", version, about = "def language front end")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the token stream
    Tokens {
        /// the `.def` source file
        #[arg(short, long)]
        source: PathBuf,
    },
    /// Print the parsed syntax tree
    Ast {
        /// the `.def` source file
        #[arg(short, long)]
        source: PathBuf,
    },
    /// Run a backend over the syntax tree
    Generate {
        /// the `.def` source file
        #[arg(short, long)]
        source: PathBuf,
        #[arg(short, long, value_enum, default_value_t = Backend::C)]
        backend: Backend,
        /// write the output here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Backend {
    /// C functions
    C,
    /// no handlers; fails on every node
    Unimplemented,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Cli::parse();

    match args.command {
        Commands::Tokens { source } => {
            let text = read_source(&source)?;
            let tokens = deflang::lexer::tokenize(&text)
                .with_context(|| format!("failed to lex {}", source.display()))?;
            println!("{tokens:#?}");
        }
        Commands::Ast { source } => {
            let define = parse_file(&source)?;
            println!("{define:#?}");
        }
        Commands::Generate {
            source,
            backend,
            output,
        } => {
            let define = parse_file(&source)?;
            let code = generate(&define, backend)
                .with_context(|| format!("failed to generate {}", source.display()))?;

            match output {
                Some(path) => {
                    fs::write(&path, code)
                        .with_context(|| format!("couldn't write {}", path.display()))?;
                    println!("→ Wrote {}", path.display());
                }
                None => print!("{code}"),
            }
        }
    }
    Ok(())
}

fn read_source(source: &Path) -> Result<String> {
    info!("reading {}", source.display());
    fs::read_to_string(source).with_context(|| format!("couldn't read {}", source.display()))
}

fn parse_file(source: &Path) -> Result<Define> {
    let text = read_source(source)?;
    deflang::parse_source(&text)
        .with_context(|| format!("failed to compile {}", source.display()))
}

fn generate(define: &Define, backend: Backend) -> Result<String> {
    let node = Node::from(define);
    let code = match backend {
        Backend::C => CBackend::new().generate(node)?,
        Backend::Unimplemented => Unimplemented.generate(node).map(|()| String::new())?,
    };
    Ok(code)
}
