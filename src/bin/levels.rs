use saospec::Backend;

fn main() -> saospec::Result<()> {
    env_logger::init();

    let mut backend = Backend::new("SAO spectrometer", "roach", 4)?;
    backend.rf_gain_set("roach1", 4.0)?;
    backend.rf_gain_set("roach2", 8.0)?;

    // a snap block with the statistics of a 0 dBm input is enough to check
    // the conversion chain without boards attached
    let samples = (0..2048)
        .map(|i| if i % 2 == 0 { 57 } else { -57 })
        .collect::<Vec<i8>>();

    for channel in backend.channel_names() {
        let gain = backend.rf_gain_get(channel)?;
        let adc = backend.adc_input(channel, &samples)?;
        let rf = backend.rf_input(channel, &samples)?;
        println!("{}: RF gain {:5.1} dB", channel, gain);
        println!("  into ADC: {:+8.3} dBm ({:.4} Vrms)", adc.dbm, adc.vrms);
        println!("  into RF:  {:+8.3} dBm", rf.dbm);
    }
    Ok(())
}
