use clap::{Parser, Subcommand};

use self::{
    classify::ClassifyArg, replay::ReplayArg, sandbox::SandboxArg, show::ShowArg,
    solution::SolutionArg,
};

mod classify;
mod replay;
mod sandbox;
mod show;
mod solution;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log more (-v: info, -vv: debug). `RUST_LOG` takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// What to do
    #[command(subcommand)]
    mode: Mode,
}

impl CommandArgs {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Print a lesson definition as JSON
    Show(#[clap(flatten)] ShowArg),
    /// Print the interval each value falls into
    Classify(#[clap(flatten)] ClassifyArg),
    /// Regroup edited raw data and compare the means
    Sandbox(#[clap(flatten)] SandboxArg),
    /// Write the action script that solves steps A to C
    Solution(#[clap(flatten)] SolutionArg),
    /// Apply an action script and report the lesson state
    Replay(#[clap(flatten)] ReplayArg),
}

pub fn run(args: CommandArgs) -> anyhow::Result<()> {
    match args.mode {
        Mode::Show(arg) => show::run(&arg)?,
        Mode::Classify(arg) => classify::run(&arg)?,
        Mode::Sandbox(arg) => sandbox::run(&arg)?,
        Mode::Solution(arg) => solution::run(&arg)?,
        Mode::Replay(arg) => replay::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_verbosity_counts_flags() {
        let args = CommandArgs::try_parse_from(["meanlab", "-vv", "show"]).unwrap();
        assert_eq!(args.verbosity(), 2);
        let args = CommandArgs::try_parse_from(["meanlab", "show"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_replay_arguments() {
        let args = CommandArgs::try_parse_from([
            "meanlab",
            "replay",
            "script.json",
            "--lesson",
            "practice",
            "--save",
            "session.json",
        ])
        .unwrap();
        let Mode::Replay(arg) = args.mode else {
            panic!("expected replay");
        };
        assert_eq!(arg.script, PathBuf::from("script.json"));
        assert_eq!(arg.save, Some(PathBuf::from("session.json")));
        assert_eq!(arg.resume, None);
    }

    #[test]
    fn test_lesson_sources_conflict() {
        let result = CommandArgs::try_parse_from([
            "meanlab",
            "show",
            "--lesson",
            "practice",
            "--lesson-file",
            "lesson.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_sandbox_values_are_comma_separated() {
        let args =
            CommandArgs::try_parse_from(["meanlab", "sandbox", "--values", "31,45.5,69"]).unwrap();
        let Mode::Sandbox(arg) = args.mode else {
            panic!("expected sandbox");
        };
        assert_eq!(arg.values, Some(vec![31.0, 45.5, 69.0]));
    }
}
