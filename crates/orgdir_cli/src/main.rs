//! Command-line entry point.
//!
//! Runs one directory operation per invocation and prints the JSON result.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use orgdir_core::{init_logging, DirectoryConfig, EmployeeJoin, IdStrategy, Schema, Selection};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "orgdir", version, about = "Query and update the department directory")]
struct Cli {
    /// Operation: departments, employees, AddDepartment, AddEmployee.
    operation: String,

    /// Operation arguments as a JSON object, e.g. '{"name":"Eng"}'.
    #[arg(long)]
    args: Option<String>,

    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// SQLite database file (overrides the configuration).
    #[arg(long)]
    db: Option<PathBuf>,

    #[arg(long, value_enum)]
    id_strategy: Option<IdStrategyArg>,

    #[arg(long, value_enum)]
    employee_join: Option<EmployeeJoinArg>,

    /// Expand `department` on employees and `employees` on departments.
    #[arg(long)]
    with_relations: bool,

    #[arg(long)]
    log_level: Option<String>,

    /// Absolute directory for log files; stderr when absent.
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum IdStrategyArg {
    CountPlusOne,
    Sequence,
}

impl From<IdStrategyArg> for IdStrategy {
    fn from(value: IdStrategyArg) -> Self {
        match value {
            IdStrategyArg::CountPlusOne => Self::CountPlusOne,
            IdStrategyArg::Sequence => Self::Sequence,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EmployeeJoinArg {
    LiteralId,
    DeptId,
}

impl From<EmployeeJoinArg> for EmployeeJoin {
    fn from(value: EmployeeJoinArg) -> Self {
        match value {
            EmployeeJoinArg::LiteralId => Self::LiteralId,
            EmployeeJoinArg::DeptId => Self::DeptId,
        }
    }
}

impl Cli {
    fn resolve_config(&self) -> Result<DirectoryConfig> {
        let mut config = match &self.config {
            Some(path) => DirectoryConfig::load_from_path(path)?,
            None => DirectoryConfig::default(),
        };
        if let Some(db) = &self.db {
            config.database.path = Some(db.clone());
        }
        if let Some(strategy) = self.id_strategy {
            config.id_strategy = strategy.into();
        }
        if let Some(join) = self.employee_join {
            config.employee_join = join.into();
        }
        if let Some(level) = &self.log_level {
            config.logging.level = Some(level.clone());
        }
        if let Some(dir) = &self.log_dir {
            config.logging.dir = Some(dir.clone());
        }
        Ok(config)
    }

    fn selection(&self) -> Selection {
        if self.with_relations {
            Selection::all()
        } else {
            Selection::scalars()
        }
    }

    fn parsed_args(&self) -> Result<Option<Value>> {
        self.args
            .as_deref()
            .map(serde_json::from_str::<Value>)
            .transpose()
            .context("--args must be a JSON object")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    init_logging(
        config.logging.level_or_default(),
        config.logging.dir.as_deref(),
    )?;

    let args = cli.parsed_args()?;
    let schema = Schema::open(&config).await?;
    let result = schema
        .execute_json(&cli.operation, args.as_ref(), cli.selection())
        .await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "orgdir",
            "AddDepartment",
            "--args",
            r#"{"name":"Eng"}"#,
            "--id-strategy",
            "count-plus-one",
            "--employee-join",
            "dept-id",
        ]);
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.id_strategy, IdStrategy::CountPlusOne);
        assert_eq!(config.employee_join, EmployeeJoin::DeptId);
        assert!(config.database.path.is_none());
    }

    #[test]
    fn level_and_selection_resolve_from_flags() {
        let cli = Cli::parse_from([
            "orgdir",
            "employees",
            "--with-relations",
            "--log-level",
            "error",
        ]);
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.logging.level_or_default(), "error");
        assert_eq!(cli.selection(), Selection::all());
        assert_eq!(cli.parsed_args().unwrap(), None);
    }

    #[test]
    fn defaults_select_scalars_only() {
        let cli = Cli::parse_from(["orgdir", "departments"]);
        let config = cli.resolve_config().unwrap();
        assert_eq!(
            config.logging.level_or_default(),
            orgdir_core::default_log_level()
        );
        assert_eq!(cli.selection(), Selection::scalars());
    }

    #[test]
    fn args_must_be_json() {
        let cli = Cli::parse_from(["orgdir", "AddDepartment", "--args", "name=Eng"]);
        let err = cli.parsed_args().unwrap_err();
        assert!(err.to_string().contains("--args"));

        let cli = Cli::parse_from(["orgdir", "AddDepartment", "--args", r#"{"name":"Eng"}"#]);
        assert_eq!(
            cli.parsed_args().unwrap(),
            Some(serde_json::json!({"name": "Eng"}))
        );
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
