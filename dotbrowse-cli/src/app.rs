use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// dotbrowse - browse the declarations of a .NET assembly
#[derive(Debug, Parser)]
#[command(name = "dotbrowse", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared across all subcommands.
#[derive(Debug, Parser)]
pub struct GlobalOptions {
    /// Emit output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the declaration tree: namespaces, types and members.
    Tree {
        /// Path to the .NET assembly file.
        #[arg(value_name = "FILE")]
        path: PathBuf,

        /// Show only this namespace (use "" for types without one).
        #[arg(long)]
        namespace: Option<String>,

        /// Levels below the root to print (1 = namespaces, 2 = types, 3 = members).
        #[arg(long)]
        depth: Option<usize>,
    },

    /// List type declarations with their member counts.
    Types {
        /// Path to the .NET assembly file.
        #[arg(value_name = "FILE")]
        path: PathBuf,

        /// Filter by namespace.
        #[arg(long)]
        namespace: Option<String>,
    },
}
