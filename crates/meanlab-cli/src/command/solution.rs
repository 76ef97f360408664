use std::path::PathBuf;

use meanlab_engine::solution_actions;

use crate::util::{LessonArg, Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SolutionArg {
    #[clap(flatten)]
    pub(crate) lesson: LessonArg,
    /// Output file path
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SolutionArg) -> anyhow::Result<()> {
    let definition = arg.lesson.load()?;
    let actions = solution_actions(&definition);
    tracing::info!(actions = actions.len(), "solution script built");
    Output::save_json(&actions, arg.output.clone())
}
