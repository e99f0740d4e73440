use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use crate::commands::load_schema;
use crate::graphql_files;
use crate::output_utils;
use gqlengine::QueryError;
use gqlengine::Schema;
use gqlengine::core::validation::DefaultValidator;
use gqlengine::core::validation::Validator;
use gqlengine::parser::parse_executable;
use std::fmt::Write;
use std::path::Path;
use std::path::PathBuf;

#[derive(Debug, clap::Args)]
pub(crate) struct ValidateCmd {
    #[arg(
        help="SDL files, or directories containing them, that make up the \
             schema.",
        long,
        num_args=1..,
        required=true,
    )]
    schema: Vec<PathBuf>,

    #[arg(
        default_values_t=[
            "graphql".to_string(),
            "gql".to_string(),
        ],
        help="Set of file extensions to filter to when searching for request \
             documents within a directory.",
        long,
        value_delimiter = ',',
    )]
    graphql_file_exts: Vec<String>,

    #[arg(
        default_value_t=0,
        help="Maximum selection-set nesting depth. 0 disables the check.",
        long,
    )]
    max_depth: usize,

    #[arg(
        help="Paths to one or more request documents or directories \
             containing them.",
        name="FILE_OR_DIR_PATHS",
        required=true,
    )]
    file_or_dir_paths: Vec<PathBuf>,
}

impl ValidateCmd {
    /// Every error in one document, parse or validation.
    fn check_file(&self, schema: &Schema, path: &Path) -> anyhow::Result<Vec<QueryError>> {
        let source = std::fs::read_to_string(path)?;
        let document = match parse_executable(&source) {
            Ok(document) => document,
            Err(err) => return Ok(vec![QueryError::syntax(&err)]),
        };
        log::trace!("Parsed {path:#?}: {} fields.", document.field_count());
        Ok(DefaultValidator.validate(schema, &document, self.max_depth).errors)
    }
}

#[inherent::inherent]
impl RunnableCommand for ValidateCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let schema = match load_schema(&self.schema) {
            Ok(schema) => schema,
            Err(err) => return err.context("loading the schema").into(),
        };

        let files = graphql_files::collect(&self.file_or_dir_paths, &self.graphql_file_exts);
        let mut report = String::new();
        let mut num_errors = 0;
        for err in &files.errors {
            num_errors += 1;
            let _ = writeln!(report, "{err}");
        }

        for path in &files.paths {
            let errors = match self.check_file(&schema, path) {
                Ok(errors) => errors,
                Err(err) => {
                    num_errors += 1;
                    let _ = writeln!(report, "{}: {err:#}", path.display());
                    continue
                },
            };
            log::debug!("{path:#?}: {} errors.", errors.len());
            num_errors += errors.len();
            for err in errors {
                let (line, column) =
                    err.locations.first()
                        .map_or((0, 0), |loc| (loc.line, loc.column));
                let _ = writeln!(report, "{}:{line}:{column}: {}", path.display(), err.message);
            }
        }

        if num_errors > 0 {
            CommandResult::failed_stdout(format_args!(
                "{report}{} Found {num_errors} errors in {} documents.",
                output_utils::RED_X,
                files.paths.len(),
            ))
        } else {
            CommandResult::stdout(format_args!(
                concat!(
                    "{} All GraphQL validated successfully:\n",
                    "  * Validated {} documents.\n",
                    "  * Skipped {} non-graphql files.",
                ),
                output_utils::GREEN_CHECK,
                files.paths.len(),
                files.num_skipped,
            ))
        }
    }
}
