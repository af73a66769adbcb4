//! Pantry CLI: aggregate tagged recipes into grocery lists and poke at the
//! numeric/unit machinery from the command line.
//!
//! Tokenization and sequence labeling happen upstream; the `grocery-list`
//! and `show` commands consume their output as tagged-recipe JSON documents.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing::warn;

use pantry_core::{biluo, conversion_factor, parse_numeric, GroceryList, Recipe, TaggedLine};

#[derive(Parser)]
#[command(name = "pantry")]
#[command(about = "Recipe quantities and grocery lists", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate tagged recipes into a grocery list
    GroceryList {
        /// Tagged-recipe JSON files from the tagging pipeline
        inputs: Vec<PathBuf>,
        /// List name; the list is written to <name>.txt
        #[arg(long)]
        output: String,
    },
    /// Print the tagged spans of each ingredient line in a recipe
    Show {
        /// Tagged-recipe JSON file
        input: PathBuf,
    },
    /// Parse a numeric literal and print its value
    Parse {
        literal: String,
        /// Decimal places to keep (exact halves round up)
        #[arg(long)]
        precision: Option<u32>,
    },
    /// Print the conversion factor between two units
    Convert {
        from: String,
        to: String,
        /// Ingredient name, for density-based mass/volume conversion
        #[arg(long)]
        ingredient: Option<String>,
    },
}

/// Tagged-recipe document: the handoff format from the external
/// tokenizer/model pipeline.
#[derive(Deserialize)]
struct TaggedRecipeDoc {
    title: String,
    source: String,
    #[serde(default)]
    servings: Option<String>,
    #[serde(default)]
    instructions: Vec<String>,
    lines: Vec<TaggedLine>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::GroceryList { inputs, output } => grocery_list(&inputs, &output),
        Commands::Show { input } => show(&input),
        Commands::Parse { literal, precision } => {
            let value = parse_numeric(&literal, precision)?;
            println!("{value}");
            Ok(())
        }
        Commands::Convert {
            from,
            to,
            ingredient,
        } => {
            let factor = conversion_factor(&from, &to, ingredient.as_deref())?;
            println!("{factor}");
            Ok(())
        }
    }
}

fn load_document(path: &Path) -> Result<TaggedRecipeDoc> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Merge the ingredients of every readable input into one list and write it
/// as newline-separated display lines. A recipe that cannot be read or
/// parsed is skipped with a notice; aggregation continues without it.
fn grocery_list(inputs: &[PathBuf], output: &str) -> Result<()> {
    let mut ingredients = Vec::new();

    for path in inputs {
        match load_document(path) {
            Ok(doc) => {
                let recipe = Recipe::from_tagged_lines(
                    doc.title,
                    doc.source,
                    doc.servings,
                    doc.instructions,
                    &doc.lines,
                );
                ingredients.extend(recipe.ingredients);
            }
            Err(err) => warn!(%err, path = %path.display(), "skipping recipe"),
        }
    }

    let list = GroceryList::merge(ingredients);

    let name = output.strip_suffix(".txt").unwrap_or(output);
    let path = format!("{name}.txt");
    fs::write(&path, list.to_text()).with_context(|| format!("Failed to write {path}"))?;
    println!("Wrote {path}");
    Ok(())
}

/// Debugging view: each line followed by its decoded spans.
fn show(input: &Path) -> Result<()> {
    let doc = load_document(input)?;
    let rule = "-".repeat(40);

    for line in &doc.lines {
        println!("{rule}");
        println!("{}", line.text);
        println!("{rule}");
        for span in biluo::decode(&line.tokens) {
            if let Some(slice) = line.text.get(span.start..span.end) {
                println!("{}: {}", slice, span.label);
            }
        }
        println!();
    }
    Ok(())
}
