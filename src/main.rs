use anyhow::Result;
use bitstore::areas::repository::Repository;
use bitstore::artifacts::core::config::{Config, DEFAULT_GIT_DIR};
use bitstore::artifacts::objects::object_type::ObjectType;
use bitstore::artifacts::objects::tree::DEFAULT_MAX_TREE_ENTRIES;
use bitstore::commands::plumbing::cat_file::CatFileMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "bitstore",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A content-addressable object store and index reader",
    long_about = "Plumbing access to a git-compatible object store: hash and store objects, \
    read them back by abbreviated id, list trees and inspect the binary index file.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(
        long,
        global = true,
        default_value = DEFAULT_GIT_DIR,
        help = "The repository metadata directory"
    )]
    git_dir: PathBuf,
    #[arg(
        long,
        global = true,
        default_value_t = DEFAULT_MAX_TREE_ENTRIES,
        help = "Maximum number of entries decoded from a single tree object"
    )]
    max_tree_entries: usize,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "cat-file",
        about = "Print the content of an object",
        long_about = "This command prints the payload, size or type of an object. \
        The object may be given by an abbreviated SHA of at least two characters."
    )]
    CatFile {
        #[arg(index = 1, value_enum, help = "What to print")]
        mode: CatFileMode,
        #[arg(index = 2, help = "The object SHA or SHA prefix")]
        sha: String,
    },
    #[command(
        name = "hash-object",
        about = "Hash an object and optionally write it to the object database",
        long_about = "This command hashes a file as an object of the given type and can write it \
        to the object database. It requires the path to the file to be specified."
    )]
    HashObject {
        #[arg(short = 't', long = "type", default_value = "blob", help = "The object type")]
        object_type: ObjectType,
        #[arg(short, long, required = false, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: String,
    },
    #[command(
        name = "ls-tree",
        about = "List the contents of a tree object",
        long_about = "This command lists the entries of a tree object, one per line."
    )]
    LsTree {
        #[arg(short, long, help = "Recurse into sub-trees")]
        recursive: bool,
        #[arg(index = 1, help = "The tree SHA or SHA prefix")]
        sha: String,
    },
    #[command(
        name = "ls-files",
        about = "List the paths recorded in the index",
        long_about = "This command decodes the index file and lists its entries in file order."
    )]
    LsFiles {
        #[arg(short, long, help = "Show mode, object SHA and stage of each entry")]
        stage: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("BITSTORE_LOG"))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::default()
        .with_git_dir(cli.git_dir)
        .with_max_tree_entries(cli.max_tree_entries);

    let pwd = std::env::current_dir()?;
    let mut repository =
        Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()), config)?;

    match &cli.command {
        Commands::CatFile { mode, sha } => repository.cat_file(*mode, sha)?,
        Commands::HashObject {
            object_type,
            write,
            file,
        } => repository.hash_object(file, *object_type, *write)?,
        Commands::LsTree { recursive, sha } => repository.ls_tree(sha, *recursive)?,
        Commands::LsFiles { stage } => repository.ls_files(*stage)?,
    }

    Ok(())
}
