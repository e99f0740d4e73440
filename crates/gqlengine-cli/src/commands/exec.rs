use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use crate::commands::load_schema;
use crate::commands::read_json;
use anyhow::Context;
use gqlengine::Engine;
use gqlengine::EngineConfig;
use gqlengine::EngineRequest;
use gqlengine::EngineResponse;
use serde_json::Map;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, clap::Args)]
pub(crate) struct ExecCmd {
    #[arg(
        help="SDL files, or directories containing them, that make up the \
             schema.",
        long,
        num_args=1..,
        required=true,
    )]
    schema: Vec<PathBuf>,

    #[arg(help="File containing the request document.", long)]
    query: PathBuf,

    #[arg(help="Operation to run when the document holds more than one.", long)]
    operation_name: Option<String>,

    #[arg(help="JSON file holding the variables object.", long)]
    variables: Option<PathBuf>,

    #[arg(
        help="JSON file holding the root value. Fields resolve by reading \
             members of the JSON object they belong to.",
        long,
    )]
    root: Option<PathBuf>,

    #[arg(help="JSON file holding the engine configuration.", long)]
    config: Option<PathBuf>,

    #[arg(help="Pretty-print the response envelope.", long)]
    pretty: bool,
}

impl ExecCmd {
    async fn execute(&self) -> anyhow::Result<EngineResponse> {
        let schema = load_schema(&self.schema)?;
        let query = std::fs::read_to_string(&self.query)
            .with_context(|| format!("reading query file {:?}", self.query))?;

        let variables = match &self.variables {
            Some(path) => read_json::<Option<Map<String, Value>>>(path)?.unwrap_or_default(),
            None => Map::new(),
        };
        let config = match &self.config {
            Some(path) => read_json::<EngineConfig>(path)?,
            None => EngineConfig::default(),
        };
        log::debug!("Executing with {config:?}.");

        let mut engine = Engine::new(schema).with_config(config);
        if let Some(path) = &self.root {
            engine = engine.with_root_value(Arc::new(read_json::<Value>(path)?));
        }

        let mut request = EngineRequest::new(query).with_variables(variables);
        if let Some(name) = &self.operation_name {
            request = request.with_operation_name(name.as_str());
        }
        Ok(engine.execute(&request, None).await)
    }

    fn render(&self, response: &EngineResponse) -> anyhow::Result<String> {
        let text =
            if self.pretty {
                serde_json::to_string_pretty(response)?
            } else {
                String::from_utf8(response.to_json_bytes()?)?
            };
        Ok(text)
    }
}

#[inherent::inherent]
impl RunnableCommand for ExecCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let response = match self.execute().await {
            Ok(response) => response,
            Err(err) => return err.into(),
        };
        log::info!("Request finished with {} errors.", response.errors.len());

        match self.render(&response) {
            Ok(text) if response.errors.is_empty() => CommandResult::stdout(format_args!("{text}")),
            Ok(text) => CommandResult::failed_stdout(format_args!("{text}")),
            Err(err) => err.context("rendering the response").into(),
        }
    }
}
