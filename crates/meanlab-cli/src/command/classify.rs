use std::io::{self, Write as _};

use anyhow::Context as _;
use meanlab_engine::{Grouping, LessonDefinition};

use crate::util::LessonArg;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ClassifyArg {
    #[clap(flatten)]
    pub(crate) lesson: LessonArg,
    /// Values to classify
    #[arg(required = true, allow_negative_numbers = true)]
    pub(crate) values: Vec<f64>,
}

pub(crate) fn run(arg: &ClassifyArg) -> anyhow::Result<()> {
    let definition = arg.lesson.load()?;
    let mut stdout = io::stdout().lock();
    for (value, label) in classify_values(&definition, &arg.values) {
        writeln!(stdout, "{value}\t{}", label.unwrap_or("unmatched"))
            .context("Failed to write to stdout")?;
    }
    Ok(())
}

fn classify_values<'a>(
    definition: &'a LessonDefinition,
    values: &[f64],
) -> Vec<(f64, Option<&'a str>)> {
    let grouping = Grouping::empty(definition);
    values
        .iter()
        .map(|&value| {
            let label = grouping
                .classify(value)
                .map(|index| definition.intervals[index].label.as_str());
            (value, label)
        })
        .collect()
}
