//! # Schema Graph Tool
//!
//! Command-line front end for the schema graph engine. The graph is read from
//! a JSON file holding `formats`, `definitions`, `entities` and optionally
//! `analytics`.
//!
//! ## Usage
//!
//! ```bash
//! schema-graph graph.json validate document.json
//! schema-graph graph.json affected format Email
//! schema-graph graph.json convert snake_case > renamed.json
//! schema-graph graph.json describe User
//! schema-graph graph.json check
//! ```
//!
//! `convert` never touches the input file; the renamed graph is printed to
//! standard output.
//!
//! ## Exit Codes
//!
//! - `0`: Success, the document is valid, or the graph has no dangling references
//! - `1`: Violations or dangling references were found, or an operation failed
//! - `2`: Invalid arguments

use schema_graph::schema::GraphDocument;
use schema_graph::storage::InMemoryGraphStore;
use schema_graph::{NamingConvention, SchemaEngine, SchemaError, Selector};
use serde_json::Value;
use std::env;
use std::fs;
use std::process;

#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        print_usage(&args[0]);
        process::exit(2);
    }

    let document: GraphDocument = match read_json(&args[1]) {
        Ok(document) => document,
        Err(e) => {
            eprintln!("❌ Failed to load graph '{}': {}", args[1], e);
            process::exit(1);
        }
    };
    let store = InMemoryGraphStore::from_document(document);
    let engine = SchemaEngine::new(store);

    let command = args[2].as_str();
    let operands = &args[3..];
    let outcome = match (command, operands) {
        ("validate", [path]) => validate(&engine, path).await,
        ("affected", [kind, name]) => affected(&engine, kind, name).await,
        ("convert", [convention]) => convert(&engine, convention).await,
        ("describe", [label]) => describe(&engine, label).await,
        ("check", []) => check(&engine).await,
        _ => {
            print_usage(&args[0]);
            process::exit(2);
        }
    };

    match outcome {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("❌ {}", e);
            process::exit(1);
        }
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <graph.json> <command>", program);
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  validate <document.json>            Validate a document");
    eprintln!("  affected <format|definition|entity> <name>");
    eprintln!("                                      List nodes referencing a node");
    eprintln!("  convert <convention>                Rename the graph and print it");
    eprintln!("  describe <entity>                   Print the field tree of an entity");
    eprintln!("  check                               List dangling references");
    eprintln!();
    eprintln!("Conventions: snake_case, camelCase, PascalCase, kebab-case");
}

fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), SchemaError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn validate(
    engine: &SchemaEngine<InMemoryGraphStore>,
    path: &str,
) -> Result<bool, Box<dyn std::error::Error>> {
    let document: Value = read_json(path)?;
    let violations = engine.validate(&document).await?;

    if violations.is_empty() {
        println!("✓ Document is valid");
        return Ok(true);
    }

    println!("Found {} violations:", violations.len());
    for violation in &violations {
        println!("  {}: {}", violation.path, violation.message);
    }
    Ok(false)
}

async fn affected(
    engine: &SchemaEngine<InMemoryGraphStore>,
    kind: &str,
    name: &str,
) -> Result<bool, Box<dyn std::error::Error>> {
    let selector = match kind {
        "format" => Selector::format(name),
        "definition" => Selector::definition(name),
        "entity" => Selector::entity(name),
        other => return Err(SchemaError::bad_input(format!("unknown node kind '{}'", other)).into()),
    };

    print_json(&engine.affected(&selector).await?)?;
    Ok(true)
}

async fn convert(
    engine: &SchemaEngine<InMemoryGraphStore>,
    convention: &str,
) -> Result<bool, Box<dyn std::error::Error>> {
    let convention: NamingConvention = convention.parse()?;
    let settings = engine.apply_naming_convention(convention).await?;
    eprintln!(
        "✓ Applied {} (schema version {})",
        convention,
        settings.schema_version.as_deref().unwrap_or("-")
    );

    print_json(&engine.store().to_document().await)?;
    Ok(true)
}

async fn describe(
    engine: &SchemaEngine<InMemoryGraphStore>,
    label: &str,
) -> Result<bool, Box<dyn std::error::Error>> {
    print_json(&engine.describe(label).await?)?;
    Ok(true)
}

async fn check(
    engine: &SchemaEngine<InMemoryGraphStore>,
) -> Result<bool, Box<dyn std::error::Error>> {
    let dangling = engine.dangling_references().await?;

    if dangling.is_empty() {
        println!("✓ No dangling references");
        return Ok(true);
    }

    println!("Found {} dangling references:", dangling.len());
    for reference in &dangling {
        println!(
            "  {} -> {} '{}'",
            reference.source, reference.expected, reference.label
        );
    }
    Ok(false)
}
