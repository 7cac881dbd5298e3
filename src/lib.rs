//! Support library for a multi-ROACH spectrometer backend: canonical channel
//! naming, ADC count to millivolt calibration, and input level diagnostics.

mod backend;
mod cal;
mod levels;
mod naming;
pub mod units;

#[derive(Debug)]
pub enum Error {
    UnknownGain { adc: cal::AdcKind, gain: f64 },
    UnknownChannel(String),
    BadTemplate(String),
    EmptySnapBlock,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::UnknownGain { adc, gain } =>
                write!(f, "no {} calibration entry for gain {} dB", adc, gain),
            Self::UnknownChannel(name) =>
                write!(f, "no channel named {:?}", name),
            Self::BadTemplate(template) =>
                write!(f, "naming template {:?} is neither sao nor roach style", template),
            Self::EmptySnapBlock =>
                write!(f, "empty ADC snap block"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> =
    core::result::Result<T, Error>;

pub use cal::{
    AdcKind,
    ADC_REFERENCE_DBUV,
    KATADC_GAIN_MAP,
    IADC_GAIN_MAP,
    adc_count_mv_scale_factor,
    mv_scale_factor,
};

pub use naming::{
    ChannelId,
    ChannelNaming,
    resolve_name,
};

pub use levels::{
    InputLevel,
    RfInputLevel,
    sample_stats,
    samples_from_bytes,
};

pub use backend::{
    Backend,
    ChannelConfig,
};
