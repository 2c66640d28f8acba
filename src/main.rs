use anyhow::{bail, Context, Result};
use frame_kernels_rs::frame_pipeline::{
    Endianness, FrameGeometry, FrameKernel, FramePipeline, LevelParams, LevelTransform, OutputConfig,
    PackedUnpacker, SharedKernel, SourceLayout, TiffCompression,
};
use frame_kernels_rs::logger::{self, error, info};

const USAGE: &str = "usage:
  frame_kernels_rs levels [--be] [--signed] <input.raw> <width> <height> <output.tiff> [low_in upper_in low_out upper_out]
  frame_kernels_rs unpack <v210|uyvy> <input.raw> <width> <height> <output.tiff>";

fn parse<T: std::str::FromStr>(value: &str, what: &str) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.parse().with_context(|| format!("invalid {what}: {value}"))
}

/// Input sample format flags accepted by `levels`, split from the positional arguments.
fn sample_format(args: &[String]) -> Result<(Endianness, bool, Vec<&str>)> {
    let mut endianness = Endianness::Little;
    let mut signed = false;
    let mut positional = Vec::new();
    for arg in args {
        match arg.as_str() {
            "--be" => endianness = Endianness::Big,
            "--signed" => signed = true,
            flag if flag.starts_with("--") => bail!("unknown option {flag}\n{USAGE}"),
            value => positional.push(value),
        }
    }
    Ok((endianness, signed, positional))
}

fn run_levels(args: &[String], config: OutputConfig) -> Result<()> {
    let (endianness, signed, positional) = sample_format(args)?;
    let [input, width, height, output, levels @ ..] = positional.as_slice() else {
        bail!(USAGE);
    };
    let geometry = FrameGeometry::for_levels(
        parse(width, "width")?,
        parse(height, "height")?,
        endianness,
        signed,
    );

    let params = match levels {
        [] => LevelParams::default(),
        [low_in, high_in, low_out, high_out] => LevelParams::builder()
            .low_in(parse(low_in, "low_in")?)
            .high_in(parse(high_in, "upper_in")?)
            .low_out(parse(low_out, "low_out")?)
            .high_out(parse(high_out, "upper_out")?)
            .build(),
        _ => bail!(USAGE),
    };
    info!("Levels: {:?}", params);

    let mut kernel = LevelTransform::with_params(params);
    kernel.set_format(geometry).context("negotiating levels format")?;

    let pipeline = FramePipeline::new(SharedKernel::new(kernel), config);
    pipeline
        .convert_file(input, output)
        .with_context(|| format!("converting {input}"))?;
    Ok(())
}

fn run_unpack(args: &[String], config: OutputConfig) -> Result<()> {
    let [layout, input, width, height, output] = args else {
        bail!(USAGE);
    };
    let layout: SourceLayout = parse(layout, "layout")?;
    let geometry = layout.geometry(parse(width, "width")?, parse(height, "height")?);

    let mut kernel = PackedUnpacker::new();
    kernel.set_format(layout, geometry).context("negotiating unpack format")?;
    info!("Unpacking {} with {:?}", layout, kernel.params());

    let pipeline = FramePipeline::new(SharedKernel::new(kernel), config);
    pipeline
        .convert_file(input, output)
        .with_context(|| format!("converting {input}"))?;
    Ok(())
}

fn main() -> Result<()> {
    logger::init();

    info!("Starting frame_kernels...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = OutputConfig::default().with_compression(TiffCompression::Deflate);

    let result = match args.split_first() {
        Some((command, rest)) if command == "levels" => run_levels(rest, config),
        Some((command, rest)) if command == "unpack" => run_unpack(rest, config),
        _ => bail!(USAGE),
    };

    match &result {
        Ok(()) => info!("Conversion successful!"),
        Err(e) => error!("Conversion failed: {:#}", e),
    }

    result
}
