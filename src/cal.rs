//! Static calibration for converting raw ADC counts to millivolts.
//!
//! Each sampler board has a table mapping its RF section gain setting to a
//! measured calibration factor. The factor feeds the conversion
//! `dbuv_to_uv(ADC_REFERENCE_DBUV * factor [* fe_gain])`, which yields the
//! millivolts at the board input represented by one ADC count. Lookups are by
//! exact key only; there is no interpolation between calibrated settings.

use std::fmt;

use crate::units::dbuv_to_uv;
use crate::{Error, Result};

/// Fixed reference of the count-to-millivolt conversion, in dB(uV).
pub const ADC_REFERENCE_DBUV: f64 = 2.84;

/// The sampler boards the backend knows how to calibrate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdcKind {
    /// KATADC board; programmable RF section, -11.5 to 20 dB in 0.5 dB steps.
    KatAdc,
    /// iADC board; fixed signal path, calibrated at a few nominal settings.
    IAdc,
}

/// KATADC calibration, measured at representative RF section settings.
/// At 0 dB one count is about 3.92 mV, which puts a 57 count sample standard
/// deviation at 0 dBm into the chip.
pub static KATADC_GAIN_MAP: &[(f64, f64)] = &[
    (-11.5, 8.231),
    (-7.5, 6.818),
    (-3.5, 5.416),
    (0.0, 4.180),
    (0.5, 4.002),
    (4.0, 2.774),
    (4.5, 2.593),
    (8.0, 1.361),
    (12.0, -0.045),
    (15.5, -1.275),
    (20.0, -2.865),
];

/// iADC calibration at its nominal settings.
pub static IADC_GAIN_MAP: &[(f64, f64)] = &[
    (-3.0, 5.133),
    (0.0, 4.074),
    (3.0, 3.015),
    (6.0, 1.964),
];

impl AdcKind {
    /// The board's gain-to-factor calibration table.
    pub fn gain_map(self) -> &'static [(f64, f64)] {
        match self {
            Self::KatAdc => KATADC_GAIN_MAP,
            Self::IAdc => IADC_GAIN_MAP,
        }
    }

    /// Calibration factor for an RF section gain setting.
    ///
    /// The setting must be one of the calibrated keys; anything else fails
    /// with `Error::UnknownGain` rather than interpolating.
    pub fn gain_factor(self, gain: f64) -> Result<f64> {
        self.gain_map()
            .iter()
            .find(|&&(key, _)| key == gain)
            .map(|&(_, factor)| factor)
            .ok_or(Error::UnknownGain { adc: self, gain })
    }
}

impl fmt::Display for AdcKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::KatAdc => "katadc",
            Self::IAdc => "iadc",
        })
    }
}

/// Millivolts per ADC count for a board at the given RF section gain,
/// optionally corrected by a front end gain.
pub fn mv_scale_factor(adc: AdcKind, atten_gain: f64, fe_gain: Option<f64>) -> Result<f64> {
    let factor = adc.gain_factor(atten_gain)?;
    let dbuv = match fe_gain {
        None => ADC_REFERENCE_DBUV * factor,
        Some(fe_gain) => ADC_REFERENCE_DBUV * factor * fe_gain,
    };
    Ok(dbuv_to_uv(dbuv))
}

/// Millivolts per ADC count for a KATADC at the given gains, or `None` when
/// no attenuator gain is available to look up.
pub fn adc_count_mv_scale_factor(
    atten_gain: Option<f64>,
    fe_gain: Option<f64>,
) -> Result<Option<f64>> {
    match atten_gain {
        None => Ok(None),
        Some(atten_gain) => mv_scale_factor(AdcKind::KatAdc, atten_gain, fe_gain).map(Some),
    }
}
