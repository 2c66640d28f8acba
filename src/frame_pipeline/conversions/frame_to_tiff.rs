use tracing::{info, instrument};
use std::io::Write;
use std::path::Path;

use crate::frame_pipeline::{
    common::{GrayFrame, KernelError, Result},
    kernel::{FrameKernel, SharedKernel},
    tiff::{FrameWriter, OutputConfig, StandardTiffWriter},
};

/// Runs a negotiated kernel over raw frame files and writes grayscale TIFFs.
pub struct FramePipeline<K: FrameKernel, W: FrameWriter> {
    kernel: SharedKernel<K>,
    writer: W,
    config: OutputConfig,
}

impl<K: FrameKernel> FramePipeline<K, StandardTiffWriter> {
    pub fn new(kernel: SharedKernel<K>, config: OutputConfig) -> Self {
        Self {
            kernel,
            writer: StandardTiffWriter,
            config,
        }
    }
}

impl<K: FrameKernel, W: FrameWriter> FramePipeline<K, W> {
    pub fn with_custom(kernel: SharedKernel<K>, writer: W, config: OutputConfig) -> Self {
        Self {
            kernel,
            writer,
            config,
        }
    }

    /// Run the kernel over one raw frame and encode the result.
    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn convert(&self, input_data: &[u8], output: &mut dyn Write) -> Result<GrayFrame> {
        info!("Starting frame conversion");

        let geometry = self
            .kernel
            .update(|kernel| kernel.geometry().copied())
            .ok_or(KernelError::NotNegotiated)?;

        {
            let _span = tracing::info_span!("validate_dimensions",
                width = geometry.width,
                height = geometry.height
            ).entered();
            self.config.check_dimensions(geometry.width, geometry.height)?;
        }

        let frame = {
            let _span = tracing::info_span!("run_kernel").entered();
            self.kernel.transform_frame(input_data)?
        };

        {
            let _span = tracing::info_span!("encode_tiff").entered();
            self.writer.write_frame(&frame, output, &self.config)?;
        }

        info!(
            width = frame.width,
            height = frame.height,
            "Conversion complete"
        );
        Ok(frame)
    }

    #[instrument(skip(self, input_path, output_path))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<GrayFrame> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Converting file"
        );

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                KernelError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        let mut output_file = {
            let _span = tracing::info_span!("create_output_file").entered();
            std::fs::File::create(output_path).map_err(|e| {
                KernelError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?
        };

        self.convert(&input_data, &mut output_file)
    }

    pub fn kernel(&self) -> &SharedKernel<K> {
        &self.kernel
    }

    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: OutputConfig) {
        self.config = config;
    }
}
