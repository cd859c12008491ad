//! Calibrated, filtered sampling and a spectrum capture on a simulated ATmega328P
//!
//! Prints one CSV record per run: `id,vref,ohms,peak_bin`.

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use env_logger::{Builder, Env};

use avr_adc::filter::ema_filter;
use avr_adc::{Adc, AdcConfig, Device, Prescaler, Reference};
use avr_adc_sim::{SimDelay, SimRegisters};
use avr_fft::radix4_fft;

mod signal;

use signal::Tone;

/// Largest capture the sample buffers hold
const CAPTURE_CAPACITY: usize = 256;

/// Mid-scale count subtracted before the transform
const MID_SCALE: i16 = 512;

/// Per-conversion timeout
const READ_TIMEOUT_US: u32 = 1_000;

type Capture = heapless::Vec<i16, CAPTURE_CAPACITY>;

#[derive(Parser, Debug)]
#[command(author, version, about = "Simulated AVR ADC sampling demo")]
struct Opts {
    /// Record identifier for the CSV line
    #[arg(long, default_value = "node1")]
    id: String,

    /// Channel wired to the resistor divider
    #[arg(long, default_value_t = 0)]
    channel: u8,

    /// Level the divider channel sits at, in counts
    #[arg(long, default_value_t = 384)]
    level: u16,

    /// Ground-side resistor of the divider
    #[arg(long = "balance", default_value_t = 10_000, value_name = "OHMS")]
    balance_ohms: u16,

    /// Bandgap conversion result (225 is a 5 V supply)
    #[arg(long, default_value_t = 225)]
    bandgap: u16,

    /// Divider readings fed through the EMA filter
    #[arg(long, default_value_t = 16)]
    readings: usize,

    /// Channel wired to the audio input
    #[arg(long, default_value_t = 1)]
    tone_channel: u8,

    /// Capture length, log2
    #[arg(long = "log2-len", default_value_t = 6)]
    log2_len: u32,

    /// Tone cycles per capture window
    #[arg(long, default_value_t = 5)]
    cycles: usize,

    /// Print the power of every bin up to Nyquist
    #[arg(long)]
    spectrum: bool,
}

fn main() -> Result<()> {
    Builder::from_env(Env::default().default_filter_or("info")).init();
    let opts = Opts::parse();

    if !(1..=CAPTURE_CAPACITY.trailing_zeros()).contains(&opts.log2_len) {
        bail!(
            "--log2-len must be between 1 and {}",
            CAPTURE_CAPACITY.trailing_zeros()
        );
    }
    let window = 1usize << opts.log2_len;

    let config = AdcConfig::builder()
        .reference(Reference::Avcc)
        .prescaler(Prescaler::Div128)
        .build();
    let mut adc = Adc::<Device, _>::new(SimRegisters::<Device>::new(), config)
        .context("initializing ADC")?;
    let mut delay = SimDelay::new();

    adc.registers_mut().set_bandgap(opts.bandgap);
    adc.registers_mut()
        .set_channel_input(opts.channel, opts.level);

    let vref = adc
        .measure_reference_voltage(&mut delay)
        .context("calibrating reference")?;
    log::info!("reference {:.3} V", vref);

    let mut level = 0u16;
    for _ in 0..opts.readings {
        let raw = adc.read(opts.channel)?;
        level = ema_filter(raw, level);
    }
    let volts = adc.raw_to_voltage(level, vref);
    let ohms = adc.raw_to_resistance(level, opts.balance_ohms);
    log::info!(
        "channel {}: filtered {} counts, {:.3} V, {} ohm",
        opts.channel,
        level,
        volts,
        ohms
    );

    let tone = Tone {
        offset: MID_SCALE as u16,
        amplitude: 400,
        cycles: opts.cycles,
        window,
    };
    let (mut re, mut im) = capture(&mut adc, &mut delay, opts.tone_channel, &tone)?;
    radix4_fft(&mut re, &mut im, opts.log2_len)?;

    let peak = (1..window / 2)
        .max_by_key(|&k| power(re[k], im[k]))
        .unwrap_or(0);
    log::info!(
        "spectrum peak at bin {} of {} ({} us simulated delay)",
        peak,
        window,
        delay.elapsed_us()
    );

    if opts.spectrum {
        for k in 0..=window / 2 {
            println!("# {},{}", k, power(re[k], im[k]));
        }
    }

    println!("{},{:.3},{},{}", opts.id, vref, ohms, peak);
    Ok(())
}

/// Sample `tone` on `channel` into centered real/imaginary buffers
fn capture(
    adc: &mut Adc<Device, SimRegisters<Device>>,
    delay: &mut SimDelay,
    channel: u8,
    tone: &Tone,
) -> Result<(Capture, Capture)> {
    let mut re = Capture::new();
    let mut im = Capture::new();

    adc.select_channel(channel)?;
    for n in 0..tone.window {
        adc.registers_mut().set_channel_input(channel, tone.level(n));
        let raw = adc.read_selected_timeout(delay, READ_TIMEOUT_US)?;
        re.push(i16::try_from(raw)? - MID_SCALE)
            .map_err(|_| anyhow!("capture buffer full"))?;
    }
    im.resize(tone.window, 0)
        .map_err(|_| anyhow!("capture buffer full"))?;

    Ok((re, im))
}

fn power(re: i16, im: i16) -> u32 {
    let (re, im) = (u32::from(re.unsigned_abs()), u32::from(im.unsigned_abs()));
    re * re + im * im
}
