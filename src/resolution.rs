//! Output resolution selection

use clap::ValueEnum;
use serde::Serialize;

use crate::constants::{INFER_2K_MIN_DIMENSION, INFER_4K_MIN_DIMENSION};

/// Output size requested from the model, sent as `image_config.image_size`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, ValueEnum)]
pub enum Resolution {
    /// 512px class
    #[serde(rename = "0.5K")]
    #[value(name = "0.5K")]
    HalfK,
    /// 1024px class
    #[default]
    #[serde(rename = "1K")]
    #[value(name = "1K")]
    OneK,
    /// 2048px class
    #[serde(rename = "2K")]
    #[value(name = "2K")]
    TwoK,
    /// 4096px class
    #[serde(rename = "4K")]
    #[value(name = "4K")]
    FourK,
}

impl Resolution {
    /// The wire/CLI spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HalfK => "0.5K",
            Self::OneK => "1K",
            Self::TwoK => "2K",
            Self::FourK => "4K",
        }
    }

    /// Picks an output size from the longest side of the largest input.
    pub fn infer_from_dimension(max_dimension: u32) -> Self {
        if max_dimension >= INFER_4K_MIN_DIMENSION {
            Self::FourK
        } else if max_dimension >= INFER_2K_MIN_DIMENSION {
            Self::TwoK
        } else {
            Self::OneK
        }
    }

    /// Settles the final resolution for a request.
    ///
    /// A non-default choice always wins. At the default, the size is inferred
    /// from `max_input_dimension` when there were input images. Returns the
    /// resolution and whether it was inferred.
    pub fn resolve(self, max_input_dimension: Option<u32>) -> (Self, bool) {
        match max_input_dimension {
            Some(dimension) if self == Self::default() && dimension > 0 => {
                (Self::infer_from_dimension(dimension), true)
            }
            _ => (self, false),
        }
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
