//! billtags - legislative action categorizer
//!
//! The main entry point for the `billtags` CLI, handling:
//! - Categorizing action strings for a jurisdiction
//! - Listing registered jurisdictions and dumping their rule tables
//! - Validating rule-table files

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use bt_common::{Error, JurisdictionId, OutputFormat, SCHEMA_VERSION};
use bt_config::{resolve_rules_dir, scan_dir, RuleTableFile, RulesDir};
use bt_core::exit_codes::ExitCode;
use bt_core::logging::{
    event_names, generate_run_id, init_logging, truncate_for_log, LogConfig, LogFormat,
};
use bt_core::CategorizerRegistry;
use bt_rules::Classification;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

/// Categorize legislative action strings into standard action types
#[derive(Parser)]
#[command(name = "billtags")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Directory of rule-table files (default: BILLTAGS_RULES_DIR, then config dirs)
    #[arg(long, global = true)]
    rules_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "json")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (-q, -qq)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    quiet: u8,

    /// Log format on stderr
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Categorize action strings (arguments, or one per stdin line)
    Categorize(CategorizeArgs),

    /// List registered jurisdictions
    Jurisdictions,

    /// Dump a jurisdiction's rule table as a rule-table file
    Rules(RulesArgs),

    /// Validate rule-table files in the rules directory
    Check,
}

#[derive(Args, Debug)]
struct CategorizeArgs {
    /// Jurisdiction code (e.g. ny, wa)
    #[arg(long, short = 'j')]
    jurisdiction: String,

    /// Exit with status 1 if any input produced no tags
    #[arg(long)]
    strict: bool,

    /// Action strings; read from stdin when omitted
    text: Vec<String>,
}

#[derive(Args, Debug)]
struct RulesArgs {
    /// Jurisdiction code (e.g. ny, wa)
    #[arg(long, short = 'j')]
    jurisdiction: String,
}

fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig::from_env(
        cli.global.verbose,
        cli.global.quiet,
        cli.global.log_format,
        !cli.global.no_color,
    );
    init_logging(&log_config);

    let run_id = generate_run_id();
    let span = tracing::info_span!("run", run_id = run_id.as_str());
    let _guard = span.enter();
    tracing::debug!(target: event_names::RUN_STARTED, version = env!("CARGO_PKG_VERSION"), "run started");

    let result = match &cli.command {
        Commands::Categorize(args) => run_categorize(&cli.global, args, &run_id),
        Commands::Jurisdictions => run_jurisdictions(&cli.global),
        Commands::Rules(args) => run_rules(&cli.global, args),
        Commands::Check => run_check(&cli.global),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(err) => output_error(&cli.global, &err),
    };

    tracing::debug!(target: event_names::RUN_FINISHED, exit_code = exit_code.as_i32(), "run finished");
    std::process::exit(exit_code.as_i32());
}

// ============================================================================
// Shared helpers
// ============================================================================

fn rules_dir(global: &GlobalOpts) -> RulesDir {
    resolve_rules_dir(global.rules_dir.as_deref())
}

fn load_registry(global: &GlobalOpts) -> Result<(CategorizerRegistry, RulesDir), Error> {
    let dir = rules_dir(global);
    let registry = CategorizerRegistry::with_rules_dir(&dir)?;
    tracing::info!(
        target: event_names::REGISTRY_LOADED,
        jurisdictions = registry.len(),
        rules_dir = dir.path.as_ref().map(|p| p.display().to_string()),
        source = %dir.source,
        "registry loaded"
    );
    Ok((registry, dir))
}

fn parse_jurisdiction(raw: &str) -> Result<JurisdictionId, Error> {
    JurisdictionId::parse(&raw.to_ascii_lowercase())
        .ok_or_else(|| Error::InvalidJurisdiction(raw.to_string()))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn path_string(path: Option<&Path>) -> Option<String> {
    path.map(|p| p.display().to_string())
}

/// Report an error on stderr in the requested format.
fn output_error(global: &GlobalOpts, err: &Error) -> ExitCode {
    let exit_code = ExitCode::for_error(err);
    tracing::error!(code = err.code(), category = %err.category(), "{err}");

    match global.format {
        OutputFormat::Json | OutputFormat::Jsonl => {
            let response = serde_json::json!({
                "schema_version": SCHEMA_VERSION,
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "status": "error",
                "exit_code": exit_code.code_name(),
                "error": err.to_json(),
            });
            eprintln!("{response}");
        }
        OutputFormat::Summary => {
            eprintln!("error: {err}");
        }
        OutputFormat::Md => {
            eprintln!("# Error");
            eprintln!();
            eprintln!("{err}");
            eprintln!();
            eprintln!("Hint: {}", err.remediation());
        }
    }

    exit_code
}

// ============================================================================
// categorize
// ============================================================================

#[derive(Serialize)]
struct CategorizedAction<'a> {
    text: &'a str,
    #[serde(flatten)]
    classification: &'a Classification,
}

fn read_inputs(args: &CategorizeArgs) -> Result<Vec<String>, Error> {
    if !args.text.is_empty() {
        return Ok(args.text.clone());
    }
    let mut lines = Vec::new();
    for (idx, line) in io::stdin().lock().split(b'\n').enumerate() {
        let mut bytes = line?;
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
        let line = String::from_utf8(bytes).unwrap_or_else(|e| {
            tracing::warn!(
                target: event_names::INPUT_NOT_UTF8,
                line = idx + 1,
                "input line is not valid UTF-8; replacing bad bytes"
            );
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        });
        if !line.trim().is_empty() {
            lines.push(line);
        }
    }
    Ok(lines)
}

fn run_categorize(global: &GlobalOpts, args: &CategorizeArgs, run_id: &str) -> Result<ExitCode, Error> {
    let jurisdiction = parse_jurisdiction(&args.jurisdiction)?;
    let (registry, _) = load_registry(global)?;
    let categorizer = registry
        .get(&jurisdiction)
        .ok_or_else(|| Error::UnknownJurisdiction {
            jurisdiction: jurisdiction.to_string(),
        })?;
    let inputs = read_inputs(args)?;

    let span = tracing::debug_span!("categorize", jurisdiction = %jurisdiction);
    let _guard = span.enter();

    let mut results = Vec::with_capacity(inputs.len());
    for text in &inputs {
        let classification = categorizer.categorize(text);
        if classification.is_uncategorized() {
            tracing::warn!(
                target: event_names::UNCATEGORIZED,
                jurisdiction = %jurisdiction,
                text = %truncate_for_log(text, 120),
                "action matched no tagged rule"
            );
        } else {
            tracing::trace!(
                tags = ?classification.tag_list(),
                rules = ?classification.matched_rules,
                "categorized"
            );
        }
        results.push(classification);
    }

    let uncategorized = results.iter().filter(|c| c.is_uncategorized()).count();
    let actions: Vec<_> = inputs
        .iter()
        .zip(&results)
        .map(|(text, classification)| CategorizedAction {
            text,
            classification,
        })
        .collect();

    match global.format {
        OutputFormat::Json => {
            print_json(&serde_json::json!({
                "schema_version": SCHEMA_VERSION,
                "run_id": run_id,
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "jurisdiction": jurisdiction,
                "total": actions.len(),
                "uncategorized": uncategorized,
                "results": actions,
            }))?;
        }
        OutputFormat::Jsonl => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            for action in &actions {
                writeln!(out, "{}", serde_json::to_string(action)?)?;
            }
        }
        OutputFormat::Summary => {
            for action in &actions {
                let tags = if action.classification.is_uncategorized() {
                    "(uncategorized)".to_string()
                } else {
                    action.classification.tag_list().join(",")
                };
                println!("{}\t{}", tags, action.text);
            }
        }
        OutputFormat::Md => {
            println!("# Categorized actions ({})", jurisdiction);
            println!();
            println!("| Action | Tags | Attributes |");
            println!("|--------|------|------------|");
            for action in &actions {
                let attrs: Vec<String> = action
                    .classification
                    .attrs
                    .iter()
                    .map(|(key, values)| {
                        let values: Vec<&str> = values.iter().map(String::as_str).collect();
                        format!("{}={}", key, values.join("; "))
                    })
                    .collect();
                println!(
                    "| {} | {} | {} |",
                    action.text.replace('|', "\\|"),
                    action.classification.tag_list().join(", "),
                    attrs.join(", ").replace('|', "\\|")
                );
            }
            println!();
            println!("{} of {} uncategorized", uncategorized, actions.len());
        }
    }

    if args.strict && uncategorized > 0 {
        Ok(ExitCode::Uncategorized)
    } else {
        Ok(ExitCode::Clean)
    }
}

// ============================================================================
// jurisdictions
// ============================================================================

fn run_jurisdictions(global: &GlobalOpts) -> Result<ExitCode, Error> {
    let (registry, dir) = load_registry(global)?;

    match global.format {
        OutputFormat::Json | OutputFormat::Jsonl => {
            let entries: Vec<_> = registry
                .jurisdictions()
                .map(|(id, entry)| {
                    serde_json::json!({
                        "jurisdiction": id,
                        "name": entry.name,
                        "rules": entry.categorizer.table().len(),
                        "provenance": entry.provenance,
                    })
                })
                .collect();
            if matches!(global.format, OutputFormat::Jsonl) {
                for entry in &entries {
                    println!("{entry}");
                }
            } else {
                print_json(&serde_json::json!({
                    "schema_version": SCHEMA_VERSION,
                    "rules_dir": path_string(dir.path.as_deref()),
                    "rules_dir_source": dir.source.to_string(),
                    "jurisdictions": entries,
                }))?;
            }
        }
        OutputFormat::Summary => {
            for (id, entry) in registry.jurisdictions() {
                println!(
                    "{}\t{}\t{} rules\t{}",
                    id,
                    entry.name.unwrap_or("-"),
                    entry.categorizer.table().len(),
                    entry.provenance
                );
            }
        }
        OutputFormat::Md => {
            println!("# Jurisdictions");
            println!();
            println!("| Code | Name | Rules | Source |");
            println!("|------|------|-------|--------|");
            for (id, entry) in registry.jurisdictions() {
                println!(
                    "| {} | {} | {} | {} |",
                    id,
                    entry.name.unwrap_or(""),
                    entry.categorizer.table().len(),
                    entry.provenance
                );
            }
        }
    }

    Ok(ExitCode::Clean)
}

// ============================================================================
// rules
// ============================================================================

fn run_rules(global: &GlobalOpts, args: &RulesArgs) -> Result<ExitCode, Error> {
    let jurisdiction = parse_jurisdiction(&args.jurisdiction)?;
    let (registry, _) = load_registry(global)?;
    let entry = registry
        .entry(&jurisdiction)
        .ok_or_else(|| Error::UnknownJurisdiction {
            jurisdiction: jurisdiction.to_string(),
        })?;

    let file = RuleTableFile::from_table(jurisdiction.clone(), entry.categorizer.table());

    match global.format {
        OutputFormat::Json | OutputFormat::Jsonl => {
            let json = file
                .to_json_pretty()
                .map_err(|e| Error::InvalidRuleTable(e.to_string()))?;
            println!("{json}");
        }
        OutputFormat::Summary => {
            for (index, rule) in file.rules.iter().enumerate() {
                println!("{}\t{}\t{}", index, rule.tags.join(","), rule.patterns.join(" | "));
            }
        }
        OutputFormat::Md => {
            println!("# Rules for {} ({})", jurisdiction, entry.provenance);
            println!();
            println!("| # | Tags | Patterns | Stop |");
            println!("|---|------|----------|------|");
            for (index, rule) in file.rules.iter().enumerate() {
                let patterns: Vec<String> =
                    rule.patterns.iter().map(|p| format!("`{}`", p.replace('|', "\\|"))).collect();
                println!(
                    "| {} | {} | {} | {} |",
                    index,
                    rule.tags.join(", "),
                    patterns.join("<br>"),
                    if rule.stop { "yes" } else { "" }
                );
            }
        }
    }

    Ok(ExitCode::Clean)
}

// ============================================================================
// check
// ============================================================================

fn run_check(global: &GlobalOpts) -> Result<ExitCode, Error> {
    let dir = rules_dir(global);
    let mut results: Vec<serde_json::Value> = Vec::new();
    let mut all_ok = true;

    match CategorizerRegistry::builtin() {
        Ok(registry) => results.push(serde_json::json!({
            "check": "builtin",
            "status": "ok",
            "jurisdictions": registry.len(),
        })),
        Err(e) => {
            all_ok = false;
            tracing::error!(target: event_names::CHECK_FAILED, error = %e, "built-in tables failed to compile");
            results.push(serde_json::json!({
                "check": "builtin",
                "status": "error",
                "error": e.to_string(),
            }));
        }
    }

    if let Some(path) = &dir.path {
        for result in scan_dir(path) {
            match result {
                Ok(loaded) => results.push(serde_json::json!({
                    "check": "file",
                    "path": loaded.path.display().to_string(),
                    "status": "ok",
                    "jurisdiction": loaded.jurisdiction(),
                    "rules": loaded.table.len(),
                    "extends_builtin": loaded.file.extends_builtin,
                })),
                Err(e) => {
                    all_ok = false;
                    tracing::error!(
                        target: event_names::CHECK_FAILED,
                        path = %e.path.display(),
                        code = e.source.code(),
                        "{e}"
                    );
                    results.push(serde_json::json!({
                        "check": "file",
                        "path": e.path.display().to_string(),
                        "status": "error",
                        "code": e.source.code(),
                        "error": e.source.to_string(),
                    }));
                }
            }
        }

        // Per-file results can all pass while the directory as a whole fails.
        if all_ok {
            if let Err(e) = CategorizerRegistry::with_rules_dir(&dir) {
                all_ok = false;
                results.push(serde_json::json!({
                    "check": "directory",
                    "path": path.display().to_string(),
                    "status": "error",
                    "error": e.to_string(),
                }));
            }
        }
    }

    match global.format {
        OutputFormat::Json => {
            print_json(&serde_json::json!({
                "schema_version": SCHEMA_VERSION,
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "status": if all_ok { "ok" } else { "error" },
                "rules_dir": path_string(dir.path.as_deref()),
                "rules_dir_source": dir.source.to_string(),
                "checks": results,
            }))?;
        }
        OutputFormat::Jsonl => {
            for result in &results {
                println!("{result}");
            }
        }
        OutputFormat::Summary => {
            let failed = results.iter().filter(|r| r["status"] == "error").count();
            println!(
                "check: {} ({} checks, {} failed, rules dir: {})",
                if all_ok { "OK" } else { "FAILED" },
                results.len(),
                failed,
                dir.source
            );
        }
        OutputFormat::Md => {
            println!("# Rule table check");
            println!();
            match &dir.path {
                Some(path) => println!("Rules dir: {} ({})", path.display(), dir.source),
                None => println!("Rules dir: none (built-in tables only)"),
            }
            println!();
            for result in &results {
                let mark = if result["status"] == "ok" { "✓" } else { "✗" };
                let subject = result["path"].as_str().unwrap_or("built-in tables");
                match result["error"].as_str() {
                    Some(error) => println!("- {mark} {subject}: {error}"),
                    None => println!("- {mark} {subject}"),
                }
            }
        }
    }

    if all_ok {
        Ok(ExitCode::Clean)
    } else {
        Ok(ExitCode::ConfigError)
    }
}
