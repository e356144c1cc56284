use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Student task hub: add, filter, sort and complete academic tasks.
/// Tasks live for the session only; nothing is written to disk.
#[derive(Parser)]
#[command(name = "st", version, about = "Student task hub")]
pub struct Cli {
    /// Write logs to this file (the interactive UI logs nowhere else).
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{SortKey, StatusFilter};

    #[test]
    fn parses_list_with_criteria() {
        let cli = Cli::parse_from([
            "st",
            "list",
            "--status",
            "active",
            "--search",
            "math",
            "--hide-completed",
            "--sort",
            "priority",
            "--json",
        ]);
        let Some(Commands::List { criteria, json }) = cli.command else {
            panic!("expected list command");
        };
        assert!(json);
        let criteria = criteria.to_criteria();
        assert_eq!(criteria.status, StatusFilter::Active);
        assert_eq!(criteria.search_term, "math");
        assert!(!criteria.show_completed);
        assert_eq!(criteria.sort_key, SortKey::Priority);
    }

    #[test]
    fn no_subcommand_means_ui() {
        let cli = Cli::parse_from(["st", "--log-file", "/tmp/st.log"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/st.log")));
    }

    #[test]
    fn criteria_defaults_match_view_defaults() {
        let cli = Cli::parse_from(["st", "ui", "--empty"]);
        let Some(Commands::Ui { criteria }) = cli.command else {
            panic!("expected ui command");
        };
        assert!(criteria.empty);
        assert_eq!(criteria.to_criteria(), crate::view::FilterCriteria::default());
    }
}
