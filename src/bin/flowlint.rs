use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;
use url::Url;

use flowschema::{
    Diagnostic, FlowSchemaConfig, HttpSchemaSource, SchemaSource, WorkflowClient,
    WorkflowValidator, embedded,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let matches = Command::new("flowlint")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Validate workflow documents against a schema and upload them to a workflow server")
        .arg(
            Arg::new("files")
                .value_name("FILE")
                .help("Workflow document(s) to validate")
                .num_args(1..)
                .required(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("schema")
                .short('s')
                .long("schema")
                .value_name("PATH")
                .help("Schema definition file (JSON); overrides --schema-url")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("schema-url")
                .long("schema-url")
                .value_name("URL")
                .help("Fetch the schema definition from this URL")
                .value_parser(clap::value_parser!(Url)),
        )
        .arg(
            Arg::new("server-url")
                .long("server-url")
                .value_name("URL")
                .help("Workflow server base URL (required for --upload)")
                .value_parser(clap::value_parser!(Url)),
        )
        .arg(
            Arg::new("api-key")
                .long("api-key")
                .value_name("KEY")
                .help("API key sent with upload requests"),
        )
        .arg(
            Arg::new("upload")
                .long("upload")
                .action(ArgAction::SetTrue)
                .help("Upload documents that validate cleanly"),
        )
        .get_matches();

    let mut config = FlowSchemaConfig::default();
    if let Some(url) = matches.get_one::<Url>("server-url") {
        config = config.with_server_url(url.clone());
    }
    if let Some(key) = matches.get_one::<String>("api-key") {
        config = config.with_api_key(key.clone());
    }

    let definition = if let Some(path) = matches.get_one::<PathBuf>("schema") {
        let raw = tokio::fs::read_to_string(path).await?;
        serde_json::from_str(&raw)?
    } else if let Some(url) = matches.get_one::<Url>("schema-url") {
        let source = HttpSchemaSource::new(url.clone());
        source.fetch().await?
    } else {
        embedded::default_schema_definition()
    };

    let mut validator = WorkflowValidator::new(config.clone());
    if let Err(error) = validator.load_schema(&definition) {
        eprintln!("error: schema definition rejected: {error}");
        std::process::exit(2);
    }

    let files: Vec<PathBuf> = matches
        .get_many::<PathBuf>("files")
        .unwrap()
        .cloned()
        .collect();
    let contents = futures::future::join_all(
        files.iter().map(|path| tokio::fs::read_to_string(path)),
    )
    .await;

    let mut clean = Vec::new();
    let mut total_findings = 0usize;

    for (path, content) in files.iter().zip(contents) {
        let text = match content {
            Ok(text) => text,
            Err(error) => {
                eprintln!("error: cannot read {}: {error}", path.display());
                total_findings += 1;
                continue;
            }
        };

        let name = path.display().to_string();
        let diagnostics = validator.validate_document(&name, &text);
        if diagnostics.is_empty() {
            println!("✅ {name}");
            clean.push((name, text));
        } else {
            total_findings += diagnostics.len();
            for diagnostic in diagnostics {
                print_diagnostic(&name, diagnostic);
            }
        }
    }

    if matches.get_flag("upload") {
        let client = WorkflowClient::from_config(&config)?;
        for (name, text) in &clean {
            match client.upload(text).await {
                Ok(outcome) => match outcome.id {
                    Some(id) => println!("🚀 uploaded {name} (workflow id: {id})"),
                    None => println!("🚀 uploaded {name}"),
                },
                Err(error) => {
                    eprintln!("error: upload of {name} failed: {error}");
                    total_findings += 1;
                }
            }
        }
    }

    if total_findings > 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// Print one finding in `file:line:col: severity: message` form, 1-based.
fn print_diagnostic(name: &str, diagnostic: &Diagnostic) {
    println!(
        "{name}:{}:{}: {}: {}",
        diagnostic.range.start.line + 1,
        diagnostic.range.start.column + 1,
        match diagnostic.severity {
            flowschema::Severity::Error => "error",
            flowschema::Severity::Warning => "warning",
        },
        diagnostic.message
    );
}
