use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::{Context, bail};
use meanlab_engine::LessonDefinition;

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)
    }

    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, &value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Lesson selection shared by every subcommand.
#[derive(Debug, Clone, Default, clap::Args)]
pub(crate) struct LessonArg {
    /// Built-in lesson name (canonical, practice)
    #[arg(long, conflicts_with = "lesson_file")]
    pub(crate) lesson: Option<String>,
    /// Lesson definition JSON file
    #[arg(long)]
    pub(crate) lesson_file: Option<PathBuf>,
}

impl LessonArg {
    /// Loads and validates the selected lesson; the canonical lesson by default.
    pub fn load(&self) -> anyhow::Result<LessonDefinition> {
        let definition = match (&self.lesson, &self.lesson_file) {
            (_, Some(path)) => read_json_file("lesson", path)?,
            (Some(name), None) => match LessonDefinition::builtin(name) {
                Some(definition) => definition,
                None => bail!(
                    "Unknown lesson `{name}`, expected one of: {}",
                    LessonDefinition::BUILTIN_NAMES.join(", ")
                ),
            },
            (None, None) => LessonDefinition::canonical(),
        };
        definition
            .validate()
            .with_context(|| format!("Invalid lesson definition `{}`", definition.name))?;
        tracing::info!(lesson = %definition.name, "lesson loaded");
        Ok(definition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lesson_is_canonical() {
        let definition = LessonArg::default().load().unwrap();
        assert_eq!(definition, LessonDefinition::canonical());
    }

    #[test]
    fn test_builtin_lesson_by_name() {
        let arg = LessonArg {
            lesson: Some("practice".to_owned()),
            lesson_file: None,
        };
        assert_eq!(arg.load().unwrap().name, "practice");
    }

    #[test]
    fn test_unknown_lesson_is_an_error() {
        let arg = LessonArg {
            lesson: Some("histogram".to_owned()),
            lesson_file: None,
        };
        let message = arg.load().unwrap_err().to_string();
        assert!(message.contains("canonical, practice"), "{message}");
    }

    #[test]
    fn test_lesson_file_is_validated() {
        let mut definition = LessonDefinition::canonical();
        definition.name = "broken".to_owned();
        definition.intervals[0].expected_frequency = 5;
        let path = std::env::temp_dir().join(format!("meanlab-lesson-{}.json", std::process::id()));
        std::fs::write(&path, serde_json::to_string(&definition).unwrap()).unwrap();

        let arg = LessonArg {
            lesson: None,
            lesson_file: Some(path.clone()),
        };
        let err = arg.load().unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(err.to_string().contains("broken"), "{err}");
    }
}
