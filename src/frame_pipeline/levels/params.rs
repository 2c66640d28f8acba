//! Level adjustment parameters

/// Normalized input and output levels, each in `[0.0, 1.0]`.
///
/// No ordering is enforced between the four values; equal or inverted input
/// ranges are legal and handled by the LUT builder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelParams {
    /// Input level mapped to `low_out`
    pub low_in: f64,
    /// Input level mapped to `high_out`
    pub high_in: f64,
    pub low_out: f64,
    pub high_out: f64,
}

impl Default for LevelParams {
    fn default() -> Self {
        Self {
            low_in: 0.0,
            high_in: 1.0,
            low_out: 0.0,
            high_out: 1.0,
        }
    }
}

impl LevelParams {
    pub fn builder() -> LevelParamsBuilder {
        LevelParamsBuilder::default()
    }
}

/// Builder for LevelParams
#[derive(Default)]
pub struct LevelParamsBuilder {
    low_in: Option<f64>,
    high_in: Option<f64>,
    low_out: Option<f64>,
    high_out: Option<f64>,
}

impl LevelParamsBuilder {
    pub fn low_in(mut self, value: f64) -> Self {
        self.low_in = Some(value);
        self
    }

    pub fn high_in(mut self, value: f64) -> Self {
        self.high_in = Some(value);
        self
    }

    pub fn low_out(mut self, value: f64) -> Self {
        self.low_out = Some(value);
        self
    }

    pub fn high_out(mut self, value: f64) -> Self {
        self.high_out = Some(value);
        self
    }

    pub fn build(self) -> LevelParams {
        let default = LevelParams::default();
        LevelParams {
            low_in: self.low_in.unwrap_or(default.low_in),
            high_in: self.high_in.unwrap_or(default.high_in),
            low_out: self.low_out.unwrap_or(default.low_out),
            high_out: self.high_out.unwrap_or(default.high_out),
        }
    }
}
