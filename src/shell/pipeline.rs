use std::fmt;

use crate::core::tokenize;
use crate::process::{ProcessError, ProcessExecutor};

#[derive(Debug)]
pub enum PipelineError {
    ParseError(String),
    ProcessError(ProcessError),
    IoError(std::io::Error),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParseError(msg) => write!(f, "Parse error: {}", msg),
            Self::ProcessError(err) => write!(f, "Process error: {}", err),
            Self::IoError(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        PipelineError::IoError(err)
    }
}

impl From<ProcessError> for PipelineError {
    fn from(err: ProcessError) -> Self {
        PipelineError::ProcessError(err)
    }
}

impl std::error::Error for PipelineError {}

/// Two command stages joined at the first `|` of the raw line. The
/// producer's output is held in an owned buffer between the stages, so
/// nothing is left behind on any exit path; stages run strictly one
/// after the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    producer: String,
    consumer: String,
}

impl Pipeline {
    pub fn parse(line: &str) -> Result<Self, PipelineError> {
        let Some((before, after)) = line.split_once('|') else {
            return Err(PipelineError::ParseError("not a pipeline".to_string()));
        };

        let producer = before.trim();
        let consumer = after.trim();

        if producer.is_empty() {
            return Err(PipelineError::ParseError(
                "missing command before |".to_string(),
            ));
        }
        if consumer.is_empty() {
            return Err(PipelineError::ParseError(
                "missing command after |".to_string(),
            ));
        }

        Ok(Self {
            producer: producer.to_string(),
            consumer: consumer.to_string(),
        })
    }

    pub fn producer(&self) -> &str {
        &self.producer
    }

    pub fn consumer(&self) -> &str {
        &self.consumer
    }

    pub fn execute(&self, executor: &ProcessExecutor) -> Result<(), PipelineError> {
        let stage_one = tokenize::split_line(&self.producer);
        let stage_two = tokenize::split_line(&self.consumer);

        let buffered = executor.capture(&stage_one)?;
        executor.run_with_input(&stage_two, &buffered)?;
        Ok(())
    }
}
