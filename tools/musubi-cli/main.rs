use clap::Parser;
use musubi::prelude::*;
use std::fs;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Resolves a definition tree against a data set and reports the outcome
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the definition JSON file
    definition_path: String,
    /// Path to the data JSON file (an array of data objects)
    data_path: String,

    /// Map a producer kind onto an engine kind, e.g. `--alias screen=form`
    #[arg(long = "alias", value_name = "PRODUCER=ENGINE")]
    aliases: Vec<String>,

    /// Write a JSON value through a definition, e.g. `--assign name='"Acme"'`
    #[arg(long, value_name = "KEY=JSON")]
    assign: Option<String>,

    /// Print the encoded resolution bundle for the definition with this key
    #[arg(long, value_name = "KEY")]
    bundle: Option<String>,

    /// Run the built-in validators over the visible tree
    #[arg(long)]
    validate: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(cli);
}

fn run(cli: Cli) {
    let total_start = Instant::now();

    // --- 1. File Loading ---
    let definition_json = fs::read_to_string(&cli.definition_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read definition file '{}': {}",
            &cli.definition_path, e
        ))
    });
    let data_json = fs::read_to_string(&cli.data_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read data file '{}': {}",
            &cli.data_path, e
        ))
    });
    let data_value: serde_json::Value = serde_json::from_str(&data_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse data JSON: {}", e)));
    let mut data = JsonObject::slots_from_json(data_value);

    // --- 2. Decoding ---
    let decode_start = Instant::now();
    let decoder = cli
        .aliases
        .iter()
        .fold(Decoder::builder(), |builder, alias| match alias.split_once('=') {
            Some((producer, engine)) => builder.with_kind_alias(producer.trim(), engine.trim()),
            None => exit_with_error(&format!("Invalid alias '{}', expected PRODUCER=ENGINE", alias)),
        })
        .build();
    let mut tree = decoder
        .decode(definition_json.as_str())
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to decode definition: {}", e)));
    let root = tree
        .root()
        .unwrap_or_else(|| exit_with_error("Definition file produced an empty tree"));
    let decode_duration = decode_start.elapsed();
    println!(
        "Decoded {} definitions in {:?}",
        tree.len(),
        decode_duration
    );

    // --- 3. Write-back ---
    if let Some(assignment) = &cli.assign {
        let (key, raw) = assignment.split_once('=').unwrap_or_else(|| {
            exit_with_error(&format!("Invalid assignment '{}', expected KEY=JSON", assignment))
        });
        let target = find_by_identity(&tree, key.trim());
        let value: serde_json::Value = serde_json::from_str(raw)
            .unwrap_or_else(|e| exit_with_error(&format!("Invalid JSON value '{}': {}", raw, e)));
        let outcome = tree.resolve_assign_data(target, &mut data, Value::from(value));
        println!("Assignment to '{}': {:?}", key.trim(), outcome);
    }

    // --- 4. Report ---
    println!("\n{}", ReportFormatter::format(&tree, root, &data));
    println!(
        "\nPending changes: {}",
        if tree.has_data_changes(root) { "yes" } else { "no" }
    );

    // --- 5. Validation ---
    if cli.validate {
        let issues = tree.validate(root, &data, &ValidatorRegistry::default());
        if issues.is_empty() {
            println!("Validation: no issues");
        } else {
            println!("Validation: {} issue(s)", issues.len());
            for issue in issues {
                println!("  - [{}] {}", issue.definition, issue.message);
            }
        }
    }

    // --- 6. Bundle ---
    if let Some(key) = &cli.bundle {
        let target = find_by_identity(&tree, key);
        let bundle = tree.get_resolution_bundle(target).unwrap_or_else(|| {
            let request = tree.resolution_request(target, &data);
            ResolutionBundle::new(request.definition, request.data)
        });
        let encoded = serde_json::to_string_pretty(&bundle.encode())
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to encode bundle: {}", e)));
        println!("\nResolution bundle for '{}':\n{}", key, encoded);
    }

    println!("\nTotal Execution: {:?}", total_start.elapsed());
}

fn find_by_identity(tree: &DefinitionTree, key: &str) -> DefinitionId {
    tree.ids()
        .find(|id| tree.identity(*id) == key)
        .unwrap_or_else(|| exit_with_error(&format!("No definition with identity '{}'", key)))
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
