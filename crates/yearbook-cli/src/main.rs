use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dialoguer::Confirm;
use dotenvy::dotenv;
use yearbook_cli::seeder::{self, SeedConfig};

#[derive(Parser)]
#[command(name = "yearbook-cli")]
#[command(about = "Yearbook CLI - Development tools for the Yearbook API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a fake school year dataset as JSON
    Seed {
        /// Output file (defaults to YEARBOOK_DATASET or storage/dataset.json)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Number of sections per school level
        #[arg(short = 's', long, default_value = "2")]
        sections: usize,

        /// Number of students per section
        #[arg(long, default_value = "20")]
        students: usize,

        /// Number of professors
        #[arg(short = 'p', long, default_value = "8")]
        professors: usize,

        /// Number of evaluations per section
        #[arg(short = 'e', long, default_value = "4")]
        evaluations: usize,

        /// Overwrite an existing file without asking
        #[arg(short = 'f', long)]
        force: bool,
    },
}

fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Seed {
            output,
            sections,
            students,
            professors,
            evaluations,
            force,
        } => handle_seed(output, sections, students, professors, evaluations, force),
    }
}

fn default_output() -> PathBuf {
    std::env::var("YEARBOOK_DATASET")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("storage/dataset.json"))
}

fn handle_seed(
    output: Option<PathBuf>,
    sections: usize,
    students: usize,
    professors: usize,
    evaluations: usize,
    force: bool,
) {
    let output = output.unwrap_or_else(default_output);

    if output.exists() && !force {
        let overwrite = Confirm::new()
            .with_prompt(format!("{} already exists. Overwrite?", output.display()))
            .default(false)
            .interact();
        match overwrite {
            Ok(true) => {}
            Ok(false) => {
                println!("Aborted, nothing written.");
                return;
            }
            Err(e) => {
                eprintln!("\n❌ Error reading confirmation: {}", e);
                std::process::exit(1);
            }
        }
    }

    let config = SeedConfig::new(sections, students)
        .with_professors(professors)
        .with_evaluations(evaluations);
    let dataset = seeder::generate_dataset(&config);

    match seeder::write_dataset(&output, &dataset) {
        Ok(()) => {
            println!("\n✅ Dataset written to {}", output.display());
            println!("   {}", seeder::describe(&dataset));
        }
        Err(e) => {
            eprintln!("\n❌ Error writing dataset: {:#}", e);
            std::process::exit(1);
        }
    }
}
