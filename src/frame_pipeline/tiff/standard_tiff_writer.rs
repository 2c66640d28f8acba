use std::io::{Seek, Write};
use tiff::encoder::{colortype, compression::DeflateLevel, Compression, TiffEncoder};
use tiff::tags::Predictor;
use tracing::debug;
use crate::frame_pipeline::common::{GrayFrame, KernelError, Result, SampleDepth};
use crate::frame_pipeline::tiff::types::{OutputConfig, SamplePredictor, TiffCompression};
use crate::frame_pipeline::tiff::writer::FrameWriter;

pub struct StandardTiffWriter;

fn encode_error(e: impl std::fmt::Display) -> KernelError {
    KernelError::EncodeError(e.to_string())
}

fn make_encoder<W: Write + Seek>(sink: W, config: &OutputConfig) -> Result<TiffEncoder<W>> {
    let compression = match config.compression {
        TiffCompression::Uncompressed => Compression::Uncompressed,
        TiffCompression::Lzw => Compression::Lzw,
        TiffCompression::Deflate => Compression::Deflate(DeflateLevel::Balanced),
    };
    let predictor = match config.predictor {
        SamplePredictor::None => Predictor::None,
        SamplePredictor::Horizontal => Predictor::Horizontal,
    };

    let encoder = TiffEncoder::new(sink)
        .map_err(encode_error)?
        .with_compression(compression)
        .with_predictor(predictor);

    Ok(encoder)
}

impl FrameWriter for StandardTiffWriter {
    fn write_frame(&self, frame: &GrayFrame, output: &mut dyn Write, config: &OutputConfig) -> Result<()> {
        debug!("Encoding TIFF frame: {}x{} {:?}", frame.width, frame.height, frame.depth);

        let mut buffer = Vec::new();
        {
            let mut encoder = make_encoder(std::io::Cursor::new(&mut buffer), config)?;
            let (width, height) = (frame.width as u32, frame.height as u32);

            // Row padding is dropped here; TIFF strips are densely packed.
            match frame.depth {
                SampleDepth::Gray8 => {
                    let samples = frame.to_gray8().unwrap_or_default();
                    encoder
                        .write_image::<colortype::Gray8>(width, height, &samples)
                        .map_err(encode_error)?;
                }
                SampleDepth::Gray16Le => {
                    let samples = frame.to_gray16().unwrap_or_default();
                    encoder
                        .write_image::<colortype::Gray16>(width, height, &samples)
                        .map_err(encode_error)?;
                }
            }
        }

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete");
        Ok(())
    }
}
