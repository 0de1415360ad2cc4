use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::operations::OperationKind;
use crate::session::Completion;

/// Writes every engine session into a directory, one JSON file each.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self { num: 1, directory })
    }

    /// Writes `session_000001.json`, `session_000002.json` and so on.
    pub fn write_session_recording(
        &mut self,
        recording: &SessionRecording,
    ) -> anyhow::Result<PathBuf> {
        let filepath = self
            .directory
            .join(format!("session_{:0>6}.json", self.num));
        let mut writer = BufWriter::new(File::create(&filepath)?);
        serde_json::to_writer_pretty(&mut writer, recording)?;
        writer.flush()?;
        self.num += 1;
        Ok(filepath)
    }
}

/// One engine invocation as it happened, enough to parse its output again later.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecording {
    pub operation: OperationKind,
    pub args: Vec<String>,
    /// The record the engine was started with.
    pub record: String,
    pub commands: Vec<String>,
    pub completion: Completion,
    pub output: String,
}

impl SessionRecording {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}
