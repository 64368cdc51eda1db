use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cidlookup")]
#[command(
    author,
    version,
    about = "Look up C-ID course equivalencies across community colleges"
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path (default: ./cidlookup.yaml, then the user config dir)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// C-ID table to load
    #[arg(short, long, global = true)]
    pub data: Option<PathBuf>,

    /// Home institution whose rows are listed first
    #[arg(long, global = true)]
    pub home: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Free-text search, e.g. `ACCT 110`, `foothill calculus`, `biol`
    Search {
        /// Query words
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// List the home institution's departments
    Departments,

    /// List a home department's courses
    Courses {
        /// Department, e.g. `ACCT` or `C D`
        department: String,
    },

    /// Show equivalents of a home course, or of a whole department
    Show {
        /// Department, e.g. `BIOL`
        department: String,

        /// Course number, e.g. `6A`; omit for every course in the department
        number: Option<String>,
    },

    /// Read queries from stdin, one per line, until EOF or `:q`
    Interactive,

    /// Time loading and a fixed set of representative queries
    Bench {
        /// Iterations per query
        #[arg(short, long, default_value = "20")]
        iterations: u32,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Aligned text table
    #[default]
    Table,
    /// JSON document per result
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_joins_words() {
        let cli = Cli::parse_from(["cidlookup", "search", "foothill", "calculus"]);
        assert_eq!(
            cli.command,
            Commands::Search {
                query: vec!["foothill".to_string(), "calculus".to_string()]
            }
        );
        assert_eq!(cli.format, OutputFormat::Table);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "cidlookup", "show", "BIOL", "6A", "--format", "json", "--home", "Foothill College",
        ]);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.home.as_deref(), Some("Foothill College"));
        assert_eq!(
            cli.command,
            Commands::Show {
                department: "BIOL".to_string(),
                number: Some("6A".to_string())
            }
        );
    }

    #[test]
    fn test_search_requires_query() {
        assert!(Cli::try_parse_from(["cidlookup", "search"]).is_err());
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
