use crate::dialect::FrontmatterFallback;
use crate::engine::Granularity;
use crate::policy::MatchMode;
use clap::{Args, Parser};
use std::path::PathBuf;

/// Help text for configuration file options, shown at the bottom of --help.
const CONFIG_HELP: &str = "\
CONFIGURATION FILE (.console-cleaner.toml or console-cleaner.toml):
  Looked up from the first path upwards. Command-line flags win.

  [console-cleaner]
  methods = [\"log\", \"debug\"]   # Console members to remove
  all_methods = false            # Remove every console.* call
  granularity = \"statement\"      # expression | statement | line
  frontmatter_fallback = \"skip\"  # skip | scan (.astro without ---)
  integrations = [\"vue\"]         # Required for .vue files

  # Path filters
  exclude = [\"fixtures\"]         # Extra path substrings to skip
  default_ignore = true          # Keep node_modules, dist, ... skipped
  match = [\".js\", \".ts\"]         # File-name patterns to accept
  match_mode = \"suffix\"          # suffix | substring
  respect_gitignore = false

  jobs = 4                       # Worker threads
";

/// Shared path arguments (mutually exclusive paths/root).
#[derive(Args, Debug, Default, Clone)]
pub struct PathArgs {
    /// Files or directories to clean.
    /// When no paths are provided, defaults to the current directory.
    /// Cannot be used with --root.
    #[arg(conflicts_with = "root")]
    pub paths: Vec<PathBuf>,

    /// Project root to clean.
    /// Cannot be used together with positional path arguments.
    #[arg(long, conflicts_with = "paths")]
    pub root: Option<PathBuf>,
}

/// Which calls are removed, and how much source goes with them.
#[derive(Args, Debug, Default, Clone)]
pub struct RemovalOptions {
    /// Console members to remove (comma-separated).
    /// Defaults to log, warn, error, info, debug, trace.
    #[arg(long, value_delimiter = ',', conflicts_with = "all_methods")]
    pub methods: Vec<String>,

    /// Remove calls to every console member.
    #[arg(long)]
    pub all_methods: bool,

    /// How much source a removed call takes with it.
    #[arg(long, value_enum)]
    pub granularity: Option<Granularity>,
}

/// Dialect-specific behaviour.
#[derive(Args, Debug, Default, Clone)]
pub struct DialectOptions {
    /// What to do with .astro files that have no `---` frontmatter.
    #[arg(long, value_enum)]
    pub frontmatter_fallback: Option<FrontmatterFallback>,

    /// Declare a framework integration active (repeatable). `vue` is
    /// required to process .vue files.
    #[arg(long = "integration")]
    pub integrations: Vec<String>,
}

/// Options for selecting files during traversal.
#[derive(Args, Debug, Default, Clone)]
pub struct FilterOptions {
    /// Extra path substrings to skip (repeatable).
    #[arg(long, alias = "ignore")]
    pub exclude: Vec<String>,

    /// Do not skip node_modules, dist, build and the other built-in tokens.
    #[arg(long)]
    pub no_default_ignore: bool,

    /// File-name patterns to accept, replacing the defaults (repeatable).
    #[arg(long = "match")]
    pub match_patterns: Vec<String>,

    /// How --match patterns are compared against file names.
    #[arg(long, value_enum)]
    pub match_mode: Option<MatchMode>,

    /// Honour .gitignore and .ignore files.
    #[arg(long)]
    pub respect_gitignore: bool,
}

/// Options for output formatting and verbosity.
#[derive(Args, Debug, Default, Clone)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are legitimately booleans
pub struct OutputOptions {
    /// Output raw JSON.
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output for debugging (logs every file).
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode: show only the summary line.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Exit with code 1 if any file failed.
    #[arg(long)]
    pub fail_on_error: bool,
}

/// Command line interface configuration using `clap`.
/// This struct defines the arguments and flags accepted by the program.
#[derive(Parser, Debug)]
#[command(
    name = "console-cleaner",
    author,
    version,
    about = "Remove console.* calls from JavaScript, TypeScript, Astro, Vue and Svelte sources",
    long_about = None,
    after_help = CONFIG_HELP
)]
pub struct Cli {
    /// Path options (paths vs root).
    #[command(flatten)]
    pub paths: PathArgs,

    /// Removal options.
    #[command(flatten)]
    pub removal: RemovalOptions,

    /// Dialect options.
    #[command(flatten)]
    pub dialect: DialectOptions,

    /// Traversal filters.
    #[command(flatten)]
    pub filter: FilterOptions,

    /// Output formatting options.
    #[command(flatten)]
    pub output: OutputOptions,

    /// Report what would change without writing any file.
    #[arg(long)]
    pub dry_run: bool,

    /// Number of worker threads (defaults to one per core).
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Load this config file instead of searching for one.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["console-cleaner"]).unwrap();
        assert!(cli.paths.paths.is_empty());
        assert!(cli.removal.methods.is_empty());
        assert!(cli.removal.granularity.is_none());
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_parse_full() {
        let cli = Cli::try_parse_from([
            "console-cleaner",
            "src",
            "pages",
            "--methods",
            "log,debug",
            "--granularity",
            "line",
            "--frontmatter-fallback",
            "scan",
            "--integration",
            "vue",
            "--exclude",
            "fixtures",
            "--match",
            ".js",
            "--match-mode",
            "substring",
            "--jobs",
            "2",
            "--dry-run",
            "--json",
        ])
        .unwrap();

        assert_eq!(cli.paths.paths.len(), 2);
        assert_eq!(cli.removal.methods, vec!["log", "debug"]);
        assert_eq!(cli.removal.granularity, Some(Granularity::Line));
        assert_eq!(
            cli.dialect.frontmatter_fallback,
            Some(FrontmatterFallback::ScanWhole)
        );
        assert_eq!(cli.dialect.integrations, vec!["vue"]);
        assert_eq!(cli.filter.exclude, vec!["fixtures"]);
        assert_eq!(cli.filter.match_patterns, vec![".js"]);
        assert_eq!(cli.filter.match_mode, Some(MatchMode::Substring));
        assert_eq!(cli.jobs, Some(2));
        assert!(cli.dry_run);
        assert!(cli.output.json);
    }

    #[test]
    fn test_paths_conflict_with_root() {
        assert!(Cli::try_parse_from(["console-cleaner", "src", "--root", "."]).is_err());
    }

    #[test]
    fn test_methods_conflict_with_all_methods() {
        assert!(
            Cli::try_parse_from(["console-cleaner", "--methods", "log", "--all-methods"]).is_err()
        );
    }
}
