use std::path::PathBuf;

use meanlab_engine::{Action, LessonState};

use crate::{
    schema::report::SandboxReport,
    util::{LessonArg, Output},
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SandboxArg {
    #[clap(flatten)]
    pub(crate) lesson: LessonArg,
    /// Edited raw values, comma separated (defaults to the lesson's raw data)
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub(crate) values: Option<Vec<f64>>,
    /// Output file path
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SandboxArg) -> anyhow::Result<()> {
    let definition = arg.lesson.load()?;
    let mut state = LessonState::new(definition);
    if let Some(values) = &arg.values {
        state.apply(&Action::RecalculateSandbox {
            values: values.clone(),
        });
    }
    Output::save_json(&SandboxReport::new(state.sandbox()), arg.output.clone())
}
