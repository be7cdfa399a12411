use crate::config::SubtitleConfig;
use crate::error::SubtitleError;
use crate::pipeline::defaults::{JsonResponseFile, SrtFileSink, TimeBinGrouper};
use crate::pipeline::runtime::{SubtitlePipeline, SubtitlePipelineParts};
use crate::pipeline::traits::{CueGrouper, SubtitleSink, TranscriptSource};

pub struct SubtitlePipelineBuilder {
    config: SubtitleConfig,
    source: Option<Box<dyn TranscriptSource>>,
    grouper: Option<Box<dyn CueGrouper>>,
    sink: Option<Box<dyn SubtitleSink>>,
}

impl SubtitlePipelineBuilder {
    pub fn new(config: SubtitleConfig) -> Self {
        Self {
            config,
            source: None,
            grouper: None,
            sink: None,
        }
    }

    pub fn with_source(mut self, source: Box<dyn TranscriptSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_grouper(mut self, grouper: Box<dyn CueGrouper>) -> Self {
        self.grouper = Some(grouper);
        self
    }

    pub fn with_sink(mut self, sink: Box<dyn SubtitleSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn build(self) -> Result<SubtitlePipeline, SubtitleError> {
        let bin = self.config.bin_duration()?;

        let source = match self.source {
            Some(source) => source,
            None => {
                if self.config.response_path.trim().is_empty() {
                    return Err(SubtitleError::invalid_argument(
                        "response_path is required when no transcript source is supplied",
                    ));
                }
                Box::new(JsonResponseFile::new(&self.config.response_path))
            }
        };
        let sink = match self.sink {
            Some(sink) => sink,
            None => {
                if self.config.output_path.trim().is_empty() {
                    return Err(SubtitleError::invalid_argument(
                        "output_path is required when no subtitle sink is supplied",
                    ));
                }
                Box::new(SrtFileSink::new(&self.config.output_path))
            }
        };

        Ok(SubtitlePipeline::from_parts(SubtitlePipelineParts {
            bin,
            source,
            grouper: self.grouper.unwrap_or_else(|| Box::new(TimeBinGrouper)),
            sink,
        }))
    }
}
