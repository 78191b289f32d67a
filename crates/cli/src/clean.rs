//! `rowclean clean` / `run` / `validate` — the dedup commands.

use std::path::{Path, PathBuf};

use rowclean_dedup::model::Record;
use rowclean_dedup::report::{self, ReportContext};
use rowclean_dedup::{engine, table, CleanConfig, KeepPolicy, KeySpec};

use crate::exit_codes::{
    EXIT_CLEAN_INVALID_CONFIG, EXIT_CLEAN_PARSE, EXIT_CLEAN_SINK, EXIT_CLEAN_SOURCE, EXIT_ERROR,
    EXIT_USAGE,
};
use crate::CliError;

#[allow(clippy::too_many_arguments)]
pub fn cmd_clean(
    input: PathBuf,
    output: PathBuf,
    keys: Vec<String>,
    normalize: Vec<String>,
    report: Option<PathBuf>,
    dropped: Option<PathBuf>,
    keep: KeepPolicy,
    delimiter: char,
    json: bool,
    quiet: bool,
) -> Result<(), CliError> {
    if !delimiter.is_ascii() {
        return Err(CliError::new(
            EXIT_USAGE,
            format!("delimiter must be a single ASCII character, got '{delimiter}'"),
        ));
    }

    let spec = KeySpec::new(keys, normalize).map_err(|e| {
        CliError::new(EXIT_USAGE, e.to_string())
            .with_hint("--normalize columns must also appear in --key")
    })?;

    execute(
        &spec,
        keep,
        delimiter as u8,
        &input,
        &output,
        dropped.as_deref(),
        report.as_deref(),
        None,
        json,
        quiet,
    )
}

pub fn cmd_run(
    config_path: PathBuf,
    json: bool,
    output: Option<PathBuf>,
) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(&config_path)
        .map_err(|e| CliError::new(EXIT_CLEAN_SOURCE, format!("cannot read config: {e}")))?;
    let config = CleanConfig::from_toml(&config_str)
        .map_err(|e| CliError::new(EXIT_CLEAN_INVALID_CONFIG, e.to_string()))?;
    let spec = config
        .key_spec()
        .map_err(|e| CliError::new(EXIT_CLEAN_INVALID_CONFIG, e.to_string()))?;

    // Resolve data paths relative to the config file's directory
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    let input = base_dir.join(&config.input);
    let cleaned = base_dir.join(&config.output);
    let dropped = config.dropped.as_ref().map(|p| base_dir.join(p));
    let report = config.report.as_ref().map(|p| base_dir.join(p));

    execute(
        &spec,
        config.keep,
        config.delimiter as u8,
        &input,
        &cleaned,
        dropped.as_deref(),
        report.as_deref(),
        output.as_deref(),
        json,
        false,
    )
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(&config_path)
        .map_err(|e| CliError::new(EXIT_CLEAN_SOURCE, format!("cannot read config: {e}")))?;

    match CleanConfig::from_toml(&config_str) {
        Ok(config) => {
            eprintln!(
                "valid: clean job '{}' -> '{}' with {} key column(s), {} normalized, keep={}",
                config.input,
                config.output,
                config.keys.len(),
                config.normalize.len(),
                config.keep,
            );
            Ok(())
        }
        Err(e) => Err(CliError::new(EXIT_CLEAN_INVALID_CONFIG, e.to_string())),
    }
}

/// Shared body of `clean` and `run`: read, dedup, write sinks, emit summary.
#[allow(clippy::too_many_arguments)]
fn execute(
    spec: &KeySpec,
    keep: KeepPolicy,
    delimiter: u8,
    input: &Path,
    output: &Path,
    dropped: Option<&Path>,
    report: Option<&Path>,
    json_file: Option<&Path>,
    json_stdout: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let data = std::fs::read_to_string(input).map_err(|e| {
        CliError::new(EXIT_CLEAN_SOURCE, format!("cannot read {}: {e}", input.display()))
    })?;
    let set = table::read_records(&data, delimiter)
        .map_err(|e| CliError::new(EXIT_CLEAN_PARSE, e.to_string()))?;

    // A key column the header does not carry makes every row unprocessable;
    // the run still completes, but say so up front.
    if !quiet {
        for col in &spec.columns {
            if !set.headers.contains(col) {
                eprintln!("warning: key column '{col}' not found in header");
            }
        }
    }

    let result = engine::run(spec, keep, &set);

    let cleaned = table::write_records(&set.headers, &result.kept, delimiter)
        .map_err(|e| CliError::new(EXIT_ERROR, e.to_string()))?;
    std::fs::write(output, cleaned).map_err(|e| {
        CliError::new(EXIT_CLEAN_SINK, format!("cannot write {}: {e}", output.display()))
    })?;

    if let Some(path) = dropped {
        let rows: Vec<Record> = result.dropped.iter().map(|d| d.record.clone()).collect();
        let text = table::write_records(&set.headers, &rows, delimiter)
            .map_err(|e| CliError::new(EXIT_ERROR, e.to_string()))?;
        std::fs::write(path, text).map_err(|e| {
            CliError::new(EXIT_CLEAN_SINK, format!("cannot write {}: {e}", path.display()))
        })?;
    }

    if let Some(path) = report {
        let input_path = input.display().to_string();
        let output_path = output.display().to_string();
        let ctx = ReportContext {
            input_path: &input_path,
            output_path: &output_path,
            keys: &spec.columns,
            normalize: &spec.normalized,
        };
        std::fs::write(path, report::render(&result, &ctx)).map_err(|e| {
            CliError::new(EXIT_CLEAN_SINK, format!("cannot write {}: {e}", path.display()))
        })?;
    }

    if json_stdout || json_file.is_some() {
        let json_str = serde_json::to_string_pretty(&result)
            .map_err(|e| CliError::new(EXIT_ERROR, format!("JSON serialization error: {e}")))?;

        if let Some(path) = json_file {
            std::fs::write(path, &json_str).map_err(|e| {
                CliError::new(EXIT_CLEAN_SINK, format!("cannot write {}: {e}", path.display()))
            })?;
            eprintln!("wrote {}", path.display());
        }
        if json_stdout {
            println!("{json_str}");
        }
    }

    if !quiet {
        let s = &result.summary;
        eprintln!(
            "clean: {} rows — {} kept, {} duplicates removed, {} unprocessable",
            s.total, s.kept, s.duplicates, s.unprocessable,
        );
    }

    Ok(())
}
