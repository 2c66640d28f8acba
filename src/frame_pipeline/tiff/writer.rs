use std::io::Write;
use crate::frame_pipeline::common::{GrayFrame, Result};
use crate::frame_pipeline::tiff::types::OutputConfig;

pub trait FrameWriter {
    fn write_frame(&self, frame: &GrayFrame, output: &mut dyn Write, config: &OutputConfig) -> Result<()>;
}
