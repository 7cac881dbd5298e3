//! Input level diagnostics computed from ADC snap blocks.

use crate::units;
use crate::{Error, Result};

/// Reinterpret a raw snap block readback as signed ADC counts.
pub fn samples_from_bytes(bytes: &[u8]) -> &[i8] {
    bytemuck::cast_slice(bytes)
}

/// Mean and population standard deviation of a snap block.
pub fn sample_stats(samples: &[i8]) -> Result<(f64, f64)> {
    if samples.is_empty() {
        return Err(Error::EmptySnapBlock);
    }
    let count = samples.len() as f64;
    let mean = samples.iter().map(|&s| s as f64).sum::<f64>() / count;
    let variance = samples
        .iter()
        .map(|&s| {
            let delta = s as f64 - mean;
            delta * delta
        })
        .sum::<f64>()
        / count;
    Ok((mean, variance.sqrt()))
}

/// Signal level into the ADC chip, in the units the operators ask for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLevel {
    pub sample_mean: f64,
    pub sample_std: f64,
    /// RMS voltage in volts.
    pub vrms: f64,
    /// Power into 50 ohm.
    pub watts: f64,
    pub dbm: f64,
}

impl InputLevel {
    /// Level of a snap block given the channel's count-to-millivolt factor.
    pub fn from_samples(samples: &[i8], mv_per_count: f64) -> Result<InputLevel> {
        let (sample_mean, sample_std) = sample_stats(samples)?;
        log::debug!("from_samples: {:5.1} +/- {:5.1} counts", sample_mean, sample_std);
        let vrms = sample_std * mv_per_count / 1000.0;
        Ok(InputLevel {
            sample_mean,
            sample_std,
            vrms,
            watts: units::volts_to_watts(vrms),
            dbm: units::v_to_dbm(vrms),
        })
    }

    /// The same level referred to the RF section input, undoing `rf_gain_db`
    /// of amplification.
    pub fn referred_to_rf_input(&self, rf_gain_db: f64) -> RfInputLevel {
        RfInputLevel {
            adc: *self,
            dbm: self.dbm - rf_gain_db,
            watts: self.watts / units::gain(rf_gain_db),
        }
    }
}

/// Signal level into the RF section, alongside the chip level it was derived
/// from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RfInputLevel {
    pub adc: InputLevel,
    pub dbm: f64,
    pub watts: f64,
}

#[cfg(test)]
mod test {
    use super::*;
    use is_close::is_close;

    // alternating +/-57 counts: mean 0, std exactly 57
    fn snap_block() -> Vec<i8> {
        (0..2048).map(|i| if i % 2 == 0 { 57 } else { -57 }).collect()
    }

    #[test]
    fn empty_snap_block_is_an_error() {
        assert!(matches!(sample_stats(&[]), Err(Error::EmptySnapBlock)));
        assert!(matches!(
            InputLevel::from_samples(&[], 3.92),
            Err(Error::EmptySnapBlock)
        ));
    }

    #[test]
    fn stats_of_a_constant_block() {
        let (mean, std) = sample_stats(&[12, 12, 12, 12]).unwrap();
        assert!(is_close!(mean, 12.0));
        assert!(is_close!(std, 0.0, abs_tol = 1e-12, rel_tol = 0.0));
    }

    #[test]
    fn stats_of_an_alternating_block() {
        let (mean, std) = sample_stats(&snap_block()).unwrap();
        assert!(is_close!(mean, 0.0, abs_tol = 1e-12, rel_tol = 0.0));
        assert!(is_close!(std, 57.0));
    }

    #[test]
    fn level_of_a_zero_dbm_block() {
        // 57 counts RMS at 3.9225 mV per count is 0 dBm into 50 ohm
        let level = InputLevel::from_samples(&snap_block(), 3.9225).unwrap();
        assert!(is_close!(level.vrms, 0.2236, abs_tol = 1e-4, rel_tol = 0.0));
        assert!(is_close!(level.watts, 1e-3, rel_tol = 1e-3));
        assert!(is_close!(level.dbm, 0.0, abs_tol = 0.01, rel_tol = 0.0));
    }

    #[test]
    fn rf_referral_undoes_the_gain() {
        let level = InputLevel::from_samples(&snap_block(), 3.9225).unwrap();
        let rf = level.referred_to_rf_input(10.0);
        assert!(is_close!(rf.dbm, level.dbm - 10.0));
        assert!(is_close!(rf.watts, level.watts / 10.0));
        assert_eq!(rf.adc, level);
    }

    #[test]
    fn byte_readback_reinterprets_as_signed() {
        let bytes = [0x00u8, 0xff, 0x7f, 0x80];
        assert_eq!(samples_from_bytes(&bytes), &[0, -1, 127, -128]);
    }
}
