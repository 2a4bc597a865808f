use std::{cell::RefCell, fs, path::Path};

use kiln_test::list_files;

use crate::converter::{ConversionError, Converter, Invocation};

/// What the [`RecordingConverter`] saw for one invocation.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub invocation: Invocation,
    /// Files in the input directory at the time of the call. Empty for file inputs.
    pub staged_files: Vec<String>,
}

/// Converter that writes a marker file to every requested output and records the calls.
#[derive(Default)]
pub struct RecordingConverter {
    recorded: RefCell<Vec<Recorded>>,
    failing_outputs: Vec<String>,
}

impl RecordingConverter {
    /// Calls whose output file name equals one of `file_names` fail with a non-zero exit.
    pub fn failing_for(file_names: &[&str]) -> Self {
        Self {
            recorded: RefCell::default(),
            failing_outputs: file_names.iter().map(|name| name.to_string()).collect(),
        }
    }

    pub fn recorded(&self) -> Vec<Recorded> {
        self.recorded.borrow().clone()
    }

    pub fn find(&self, output_file_name: &str) -> Recorded {
        self.recorded()
            .into_iter()
            .find(|recorded| output_name(&recorded.invocation.output) == output_file_name)
            .unwrap_or_else(|| panic!("no invocation with output '{output_file_name}'"))
    }
}

fn output_name(path: &Path) -> String {
    path.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default()
}

impl Converter for RecordingConverter {
    fn convert(&self, invocation: &Invocation) -> Result<(), ConversionError> {
        let staged_files = if invocation.input.is_dir() {
            list_files(&invocation.input)
        } else {
            Vec::new()
        };
        self.recorded.borrow_mut().push(Recorded {
            invocation: invocation.clone(),
            staged_files,
        });

        if self.failing_outputs.contains(&output_name(&invocation.output)) {
            return Err(ConversionError::ExitStatus {
                tool: invocation.tool,
                input: invocation.input.clone(),
                status: "exit status: 1".to_owned(),
                stderr: "simulated failure".to_owned(),
            });
        }
        fs::write(&invocation.output, format!("built from {}", invocation.input.display())).expect("failed to write marker output");
        Ok(())
    }
}

pub fn flags(recorded: &Recorded) -> Vec<&str> {
    recorded.invocation.flags.iter().map(String::as_str).collect()
}
