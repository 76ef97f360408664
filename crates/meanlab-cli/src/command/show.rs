use std::path::PathBuf;

use crate::util::{LessonArg, Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ShowArg {
    #[clap(flatten)]
    pub(crate) lesson: LessonArg,
    /// Output file path
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ShowArg) -> anyhow::Result<()> {
    let definition = arg.lesson.load()?;
    Output::save_json(&definition, arg.output.clone())
}
