use std::path::PathBuf;

use anyhow::{Context as _, ensure};
use meanlab_engine::{Action, LessonDefinition, LessonState};

use crate::{
    schema::{report::LessonReport, session::SavedSession},
    util::{self, LessonArg, Output},
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ReplayArg {
    /// Action script (JSON array of actions)
    pub(crate) script: PathBuf,
    #[clap(flatten)]
    pub(crate) lesson: LessonArg,
    /// Saved session to continue from
    #[arg(long)]
    pub(crate) resume: Option<PathBuf>,
    /// Save the resulting session to this file
    #[arg(long)]
    pub(crate) save: Option<PathBuf>,
    /// Report output file path
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ReplayArg) -> anyhow::Result<()> {
    let definition = arg.lesson.load()?;
    let mut state = match &arg.resume {
        Some(path) => {
            let session = util::read_json_file("session", path)?;
            resume(definition, session)?
        }
        None => LessonState::new(definition),
    };

    let actions: Vec<Action> = util::read_json_file("action script", &arg.script)?;
    for action in &actions {
        state.apply(action);
    }
    tracing::info!(
        actions = actions.len(),
        step = ?state.current_step(),
        "action script applied"
    );

    if let Some(path) = &arg.save {
        let mut output = Output::open(path.clone())?;
        output.write_json(SavedSession::new(&state))?;
        eprintln!("Saved session to {}", output.display_path());
    }

    Output::save_json(&LessonReport::new(&state), arg.output.clone())
}

fn resume(definition: LessonDefinition, session: SavedSession) -> anyhow::Result<LessonState> {
    ensure!(
        session.lesson == definition.name,
        "Session belongs to lesson `{}`, not `{}`",
        session.lesson,
        definition.name
    );
    let lesson = definition.name.clone();
    LessonState::restore(definition, session.snapshot)
        .with_context(|| format!("Failed to restore session for lesson `{lesson}`"))
}
