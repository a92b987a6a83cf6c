use crate::cleaner::ConsoleCleaner;
use crate::cli::Cli;
use crate::config::{CleanerConfig, Config};
use crate::constants::VUE_INTEGRATION;
use crate::dialect::{Integrations, PassthroughCompiler, Transformer};
use crate::engine::{ConsoleMethodSet, ExcisionOptions};
use crate::policy::{IgnorePolicy, MatchPolicy};
use anyhow::{bail, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Runs the cleaner with the given arguments.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded, a root does not
/// exist, or writing the report fails.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    run_with_args_to(args, &mut std::io::stdout())
}

/// Run the cleaner with the given arguments, writing output to the specified writer.
///
/// This is the testable version of `run_with_args` that allows output capture.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded, a root does not
/// exist, or writing the report fails.
pub fn run_with_args_to<W: std::io::Write>(args: Vec<String>, writer: &mut W) -> Result<i32> {
    let mut program_args = vec!["console-cleaner".to_owned()];
    program_args.extend(args);
    let cli_var = match Cli::try_parse_from(program_args) {
        Ok(c) => c,
        Err(e) => match e.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                write!(writer, "{e}")?;
                writer.flush()?;
                return Ok(0);
            }
            _ => {
                eprint!("{e}");
                return Ok(1);
            }
        },
    };

    init_logging(&cli_var);

    let roots: Vec<PathBuf> = match &cli_var.paths.root {
        Some(root) => vec![root.clone()],
        None => cli_var.paths.paths.clone(),
    };
    for root in &roots {
        if !root.exists() {
            bail!(
                "The file or directory '{}' does not exist.",
                root.display()
            );
        }
    }

    let config = match &cli_var.config {
        Some(path) => Config::load_file(path)?,
        None => Config::load_from_path(roots.first().map_or(Path::new("."), PathBuf::as_path)),
    };
    if let Some(path) = &config.config_file_path {
        debug!("loaded config from {}", path.display());
    }

    let cleaner = build_cleaner(&cli_var, &config.cleaner);
    info!(
        "console-cleaner v{} using {} thread(s)",
        env!("CARGO_PKG_VERSION"),
        cleaner.jobs.unwrap_or_else(rayon::current_num_threads)
    );

    let show_progress = !cli_var.output.json && !cli_var.output.quiet;
    if show_progress {
        crate::output::print_ignore_list(writer, &cleaner.ignore, cleaner.dry_run)?;
    }
    let progress = show_progress.then(|| Arc::new(crate::output::create_progress_bar()));
    let cleaner = match &progress {
        Some(pb) => cleaner.with_progress_bar(Arc::clone(pb)),
        None => cleaner,
    };

    let start_time = std::time::Instant::now();
    let result = cleaner.process_paths(&roots);
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }
    debug!("finished in {:.2}s", start_time.elapsed().as_secs_f64());

    if cli_var.output.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&result)?)?;
    } else if cli_var.output.quiet {
        crate::output::print_report_quiet(writer, &result)?;
    } else {
        crate::output::print_report(writer, &result)?;
    }

    if cli_var.output.fail_on_error && result.has_failures() {
        return Ok(1);
    }
    Ok(0)
}

/// Install the `tracing` subscriber on stderr.
///
/// `RUST_LOG` wins; otherwise `--verbose` selects `debug` and `--quiet`
/// or `--json` select `error`.
fn init_logging(cli_var: &Cli) {
    let level = if cli_var.output.verbose {
        "debug"
    } else if cli_var.output.quiet || cli_var.output.json {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // A subscriber may already be installed when running in-process more than once.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

/// Merge command-line flags over config file values.
fn build_cleaner(cli_var: &Cli, config: &CleanerConfig) -> ConsoleCleaner {
    let methods = if cli_var.removal.all_methods || config.all_methods.unwrap_or(false) {
        ConsoleMethodSet::all()
    } else if !cli_var.removal.methods.is_empty() {
        ConsoleMethodSet::new(cli_var.removal.methods.iter().map(|m| m.trim().to_owned()))
    } else if let Some(methods) = &config.methods {
        ConsoleMethodSet::new(methods.iter().cloned())
    } else {
        ConsoleMethodSet::default()
    };

    let excision = ExcisionOptions {
        methods,
        granularity: cli_var
            .removal
            .granularity
            .or(config.granularity)
            .unwrap_or_default(),
    };

    let mut integrations = Integrations::new(config.integrations.iter().flatten().cloned());
    for name in &cli_var.dialect.integrations {
        integrations.insert(name);
    }
    let mut transformer = Transformer::new(excision)
        .with_frontmatter_fallback(
            cli_var
                .dialect
                .frontmatter_fallback
                .or(config.frontmatter_fallback)
                .unwrap_or_default(),
        )
        .with_integrations(integrations);
    if transformer.integrations.integration_active(VUE_INTEGRATION) {
        transformer = transformer.with_template_compiler(Arc::new(PassthroughCompiler));
    }

    let use_defaults = !cli_var.filter.no_default_ignore && config.default_ignore.unwrap_or(true);
    let base = if use_defaults {
        IgnorePolicy::default()
    } else {
        IgnorePolicy::new(Vec::<String>::new())
    };
    let ignore = base
        .with_extra(config.exclude.iter().flatten().cloned())
        .with_extra(cli_var.filter.exclude.iter().cloned());

    let patterns = if !cli_var.filter.match_patterns.is_empty() {
        Some(cli_var.filter.match_patterns.clone())
    } else {
        config.match_patterns.clone()
    };
    let matcher = patterns
        .map_or_else(MatchPolicy::default, MatchPolicy::new)
        .with_mode(
            cli_var
                .filter
                .match_mode
                .or(config.match_mode)
                .unwrap_or_default(),
        );

    ConsoleCleaner::new(transformer)
        .with_ignore(ignore)
        .with_matcher(matcher)
        .with_gitignore(cli_var.filter.respect_gitignore || config.respect_gitignore.unwrap_or(false))
        .with_dry_run(cli_var.dry_run)
        .with_jobs(cli_var.jobs.or(config.jobs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Granularity;

    fn parse(args: &[&str]) -> Cli {
        let mut full = vec!["console-cleaner"];
        full.extend_from_slice(args);
        Cli::try_parse_from(full).unwrap()
    }

    #[test]
    fn test_cli_overrides_config() {
        let config = CleanerConfig {
            methods: Some(vec!["info".to_owned()]),
            granularity: Some(Granularity::Line),
            jobs: Some(8),
            ..CleanerConfig::default()
        };
        let cleaner = build_cleaner(
            &parse(&["--methods", "debug", "--granularity", "expression", "-j", "2"]),
            &config,
        );

        let methods = &cleaner.transformer.excision.methods;
        assert!(methods.contains("debug"));
        assert!(!methods.contains("info"));
        assert_eq!(
            cleaner.transformer.excision.granularity,
            Granularity::Expression
        );
        assert_eq!(cleaner.jobs, Some(2));
    }

    #[test]
    fn test_config_used_when_flags_absent() {
        let config = CleanerConfig {
            methods: Some(vec!["info".to_owned()]),
            integrations: Some(vec!["vue".to_owned()]),
            exclude: Some(vec!["fixtures".to_owned()]),
            default_ignore: Some(false),
            ..CleanerConfig::default()
        };
        let cleaner = build_cleaner(&parse(&[]), &config);

        assert_eq!(cleaner.transformer.excision.methods.names(), vec!["info"]);
        assert!(cleaner.transformer.template_compiler.is_some());
        assert_eq!(cleaner.ignore.tokens(), ["fixtures".to_owned()]);
    }

    #[test]
    fn test_defaults() {
        let cleaner = build_cleaner(&parse(&[]), &CleanerConfig::default());
        assert_eq!(cleaner.transformer.excision.methods, ConsoleMethodSet::default());
        assert!(cleaner.transformer.template_compiler.is_none());
        assert!(cleaner.ignore.is_ignored("node_modules"));
        assert!(!cleaner.respect_gitignore);
        assert!(!cleaner.dry_run);
    }

    #[test]
    fn test_all_methods_flag() {
        let cleaner = build_cleaner(&parse(&["--all-methods"]), &CleanerConfig::default());
        assert!(cleaner.transformer.excision.methods.matches_any());
    }

    #[test]
    fn test_help_and_version_exit_zero() {
        let mut buffer = Vec::new();
        let code = run_with_args_to(vec!["--help".to_owned()], &mut buffer).unwrap();
        assert_eq!(code, 0);
        assert!(String::from_utf8(buffer).unwrap().contains("[console-cleaner]"));

        let mut buffer = Vec::new();
        let code = run_with_args_to(vec!["--version".to_owned()], &mut buffer).unwrap();
        assert_eq!(code, 0);
        assert!(String::from_utf8(buffer)
            .unwrap()
            .contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_bad_argument_exit_one() {
        let code = run_with_args_to(
            vec!["--granularity".to_owned(), "paragraph".to_owned()],
            &mut Vec::new(),
        )
        .unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let result = run_with_args_to(
            vec!["/no/such/place/anywhere".to_owned()],
            &mut Vec::new(),
        );
        assert!(result.is_err());
    }
}
