mod exec;
mod validate;

use crate::Cli;
use crate::CommandResult;
use crate::graphql_files;
use anyhow::Context;
use exec::ExecCmd;
use gqlengine::Schema;
use gqlengine::SchemaBuilder;
use std::path::Path;
use std::path::PathBuf;
use validate::ValidateCmd;

const SCHEMA_FILE_EXTS: [&str; 2] = ["graphql", "graphqls"];

#[derive(Debug, clap::Parser)]
#[command(name = "gqlengine")]
pub(crate) enum CommandEnum {
    /// Execute one request against a schema and a JSON root value.
    Exec(Box<ExecCmd>),

    /// Parse and validate request documents against a schema.
    Validate(Box<ValidateCmd>),
}
impl CommandEnum {
    pub(crate) async fn run(self, cli: Cli) -> CommandResult {
        match self {
            Self::Exec(cmd) => cmd.run(cli).await,
            Self::Validate(cmd) => cmd.run(cli).await,
        }
    }
}

/// Builds a [`Schema`] from every SDL file at or under `paths`.
pub(crate) fn load_schema(paths: &[PathBuf]) -> anyhow::Result<Schema> {
    let exts = SCHEMA_FILE_EXTS.map(String::from);
    let files = graphql_files::collect(paths, &exts);
    if let Some(err) = files.errors.into_iter().next() {
        return Err(err).context("scanning schema paths");
    }
    anyhow::ensure!(!files.paths.is_empty(), "no schema files found under {paths:?}");

    log::debug!("Building schema from {} files.", files.paths.len());
    let schema = SchemaBuilder::new()
        .load_files(files.paths)?
        .build()?;
    Ok(schema)
}

pub(crate) fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {path:?}"))?;
    serde_json::from_str(&text)
        .with_context(|| format!("parsing JSON in {path:?}"))
}
