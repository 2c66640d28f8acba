//! 256-entry level lookup table

use tracing::debug;

use crate::frame_pipeline::levels::params::LevelParams;

/// Maps the high byte of a 16-bit sample to an 8-bit output level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelLut {
    table: [u8; 256],
}

impl Default for LevelLut {
    fn default() -> Self {
        Self::new(&LevelParams::default())
    }
}

/// Truncate a normalized level in `[0, 1]` to a byte.
fn quantize(level: f64) -> u8 {
    // NaN stays NaN, and `as` turns it into 0.
    (level * 255.0) as u8
}

impl LevelLut {
    pub fn new(params: &LevelParams) -> Self {
        let mut lut = Self { table: [0; 256] };
        lut.rebuild(params);
        lut
    }

    /// Recompute every entry from `params`.
    ///
    /// Breakpoints are byte-quantized while the ramp slope keeps the full
    /// precision of the normalized levels.
    pub fn rebuild(&mut self, params: &LevelParams) {
        debug!("Calculating lookup table");

        let [low_in, high_in, low_out, high_out] =
            [params.low_in, params.high_in, params.low_out, params.high_out]
                .map(|level| level.clamp(0.0, 1.0));

        let lo_in = quantize(low_in) as usize;
        let hi_in = quantize(high_in) as usize;
        let lo_out = quantize(low_out);
        let hi_out = quantize(high_out);

        if hi_in == lo_in {
            self.table = [lo_out; 256];
            return;
        }

        let slope = (high_out - low_out) / (high_in - low_in);

        for (i, entry) in self.table.iter_mut().enumerate() {
            *entry = if i >= hi_in {
                hi_out
            } else if i < lo_in {
                lo_out
            } else {
                let ramp = ((i - lo_in) as f64 * slope).floor();
                (lo_out as f64 + ramp).clamp(0.0, 255.0) as u8
            };
        }
    }

    #[inline]
    pub fn lookup(&self, index: u8) -> u8 {
        self.table[index as usize]
    }

    pub fn as_slice(&self) -> &[u8; 256] {
        &self.table
    }
}
