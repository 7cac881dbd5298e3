//! Registry of the spectrometer's sampler boards and their settings.
//!
//! A `Backend` holds one `ChannelConfig` per board, keyed by canonical name.
//! Every channel-addressed method accepts `impl Into<ChannelId>`, so clients
//! may pass a board index or a name interchangeably; resolution goes through
//! the backend's naming template.

use std::collections::BTreeMap;

use crate::cal::{self, AdcKind};
use crate::levels::{InputLevel, RfInputLevel};
use crate::naming::{resolve_name, ChannelId, ChannelNaming};
use crate::{Error, Result};

pub const DEFAULT_BANDWIDTH_MHZ: f64 = 650.0;
pub const DEFAULT_NUM_CHAN: usize = 32768;

/// Per-board sampler settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelConfig {
    pub adc: AdcKind,
    /// RF section gain in dB; must be one of the board's calibrated settings.
    pub rf_gain: f64,
    pub rf_enabled: bool,
    /// Front end gain correction, when the front end is characterized.
    pub fe_gain: Option<f64>,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        ChannelConfig {
            adc: AdcKind::KatAdc,
            rf_gain: 0.0,
            rf_enabled: true,
            fe_gain: None,
        }
    }
}

/// A multi-board spectrometer backend.
#[derive(Debug)]
pub struct Backend {
    name: String,
    template: String,
    /// Sampled bandwidth in MHz.
    pub bandwidth: f64,
    /// Spectrum points per accumulation.
    pub num_chan: usize,
    channels: BTreeMap<String, ChannelConfig>,
}

impl Backend {
    /// Build a backend of `boards` channels named through `template`.
    pub fn new(name: &str, template: &str, boards: usize) -> Result<Backend> {
        let mut channels = BTreeMap::new();
        for index in 0..boards {
            let channel = resolve_name(template, ChannelId::Index(index))?;
            channels.insert(channel, ChannelConfig::default());
        }
        let backend = Backend {
            name: name.to_owned(),
            template: template.to_owned(),
            bandwidth: DEFAULT_BANDWIDTH_MHZ,
            num_chan: DEFAULT_NUM_CHAN,
            channels,
        };
        log::info!("new: {:?} with channels {:?}", backend.name, backend.channel_names());
        Ok(backend)
    }

    /// Build a backend from an explicit channel list, as when the boards were
    /// discovered by hostname.
    pub fn with_channel_names(name: &str, template: &str, names: &[&str]) -> Backend {
        let channels = names
            .iter()
            .map(|&channel| (channel.to_owned(), ChannelConfig::default()))
            .collect();
        Backend {
            name: name.to_owned(),
            template: template.to_owned(),
            bandwidth: DEFAULT_BANDWIDTH_MHZ,
            num_chan: DEFAULT_NUM_CHAN,
            channels,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Canonical channel names in sorted order.
    pub fn channel_names(&self) -> Vec<&str> {
        self.channels.keys().map(String::as_str).collect()
    }

    fn config(&self, channel: &str) -> Result<&ChannelConfig> {
        self.channels
            .get(channel)
            .ok_or_else(|| Error::UnknownChannel(channel.to_owned()))
    }

    fn config_mut(&mut self, channel: &str) -> Result<&mut ChannelConfig> {
        self.channels
            .get_mut(channel)
            .ok_or_else(|| Error::UnknownChannel(channel.to_owned()))
    }

    /// Gain of the channel's RF section.
    pub fn rf_gain_get(&self, ch: impl Into<ChannelId>) -> Result<f64> {
        let channel = self.channel_name(ch)?;
        let config = self.config(&channel)?;
        log::info!(
            "rf_gain_get: {} {} gain = {:5.1}, enabled = {}",
            self.name, channel, config.rf_gain, config.rf_enabled
        );
        Ok(config.rf_gain)
    }

    /// Configure the channel's RF section gain.
    ///
    /// Settings outside the board's calibration table are rejected, so every
    /// configured channel can always be converted to millivolts.
    pub fn rf_gain_set(&mut self, ch: impl Into<ChannelId>, gain: f64) -> Result<f64> {
        let channel = self.channel_name(ch)?;
        let config = self.config_mut(&channel)?;
        config.adc.gain_factor(gain)?;
        log::debug!("rf_gain_set: setting {} RF gain to {:5.1}", channel, gain);
        config.rf_gain = gain;
        Ok(config.rf_gain)
    }

    /// Whether the channel's RF section is enabled.
    pub fn rf_state(&self, ch: impl Into<ChannelId>) -> Result<bool> {
        let channel = self.channel_name(ch)?;
        Ok(self.config(&channel)?.rf_enabled)
    }

    pub fn rf_enable(&mut self, ch: impl Into<ChannelId>, enabled: bool) -> Result<()> {
        let channel = self.channel_name(ch)?;
        log::info!("rf_enable: {} RF section enabled = {}", channel, enabled);
        self.config_mut(&channel)?.rf_enabled = enabled;
        Ok(())
    }

    pub fn fe_gain_set(&mut self, ch: impl Into<ChannelId>, fe_gain: Option<f64>) -> Result<()> {
        let channel = self.channel_name(ch)?;
        self.config_mut(&channel)?.fe_gain = fe_gain;
        Ok(())
    }

    /// Millivolts per ADC count for the channel at its configured gains.
    pub fn mv_scale_factor(&self, ch: impl Into<ChannelId>) -> Result<f64> {
        let channel = self.channel_name(ch)?;
        let config = self.config(&channel)?;
        cal::mv_scale_factor(config.adc, config.rf_gain, config.fe_gain)
    }

    /// Signal level into the channel's ADC chip for a snap block.
    pub fn adc_input(&self, ch: impl Into<ChannelId>, samples: &[i8]) -> Result<InputLevel> {
        let channel = self.channel_name(ch)?;
        let config = self.config(&channel)?;
        let mv_per_count = cal::mv_scale_factor(config.adc, config.rf_gain, config.fe_gain)?;
        let level = InputLevel::from_samples(samples, mv_per_count)?;
        log::info!("adc_input: {} {}: {:?}", self.name, channel, level);
        Ok(level)
    }

    /// Signal level into the channel's RF section for a snap block.
    pub fn rf_input(&self, ch: impl Into<ChannelId>, samples: &[i8]) -> Result<RfInputLevel> {
        let channel = self.channel_name(ch)?;
        let config = self.config(&channel)?;
        let mv_per_count = cal::mv_scale_factor(config.adc, config.rf_gain, config.fe_gain)?;
        let level = InputLevel::from_samples(samples, mv_per_count)?;
        Ok(level.referred_to_rf_input(config.rf_gain))
    }

    /// Center frequencies in MHz of the spectrum channels.
    pub fn frequencies(&self) -> Vec<f64> {
        let num_chan = self.num_chan as f64;
        (0..self.num_chan)
            .map(|index| index as f64 * self.bandwidth / num_chan)
            .collect()
    }
}

impl ChannelNaming for Backend {
    fn template(&self) -> &str {
        &self.template
    }
}
