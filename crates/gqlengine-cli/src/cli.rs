use clap::CommandFactory;
use crate::commands;

#[derive(clap::Parser, Debug)]
#[command(name = "gqlengine", version, about = "Execute and validate GraphQL requests.")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) cmd: Option<commands::CommandEnum>,

    #[arg(
        action=clap::ArgAction::Count,
        global=true,
        help="Enable verbose output. Repeat for trace-level logging.",
        long,
        short='v',
    )]
    pub verbose: u8,
}
impl Cli {
    pub(crate) async fn run_default(self) -> anyhow::Result<()> {
        Self::command().print_help()?;
        Ok(())
    }
}
