use saospec::{mv_scale_factor, AdcKind};

fn main() -> saospec::Result<()> {
    env_logger::init();

    for adc in [AdcKind::KatAdc, AdcKind::IAdc] {
        println!("{} calibration:", adc);
        println!("  {:>8} {:>8} {:>10}", "gain dB", "factor", "mV/count");
        for &(gain, factor) in adc.gain_map() {
            let mv_per_count = mv_scale_factor(adc, gain, None)?;
            println!("  {:8.1} {:8.3} {:10.4}", gain, factor, mv_per_count);
        }
        println!();
    }
    Ok(())
}
