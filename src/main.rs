#[macro_use]
extern crate tracing;

use std::path::PathBuf;

use color_eyre::eyre::WrapErr;
use structopt::StructOpt;

use hypercon::{
    models::{construct, FrameTopology, LedPlacement, SamplingParameters, ToLeds},
    settings::{self, SettingsFile},
};

#[derive(Debug, StructOpt)]
struct Opts {
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u32,
    /// Settings file to load, defaults to the user configuration directory
    #[structopt(short, long = "settings")]
    settings_path: Option<PathBuf>,
    /// Write the effective settings back to the settings file
    #[structopt(long)]
    save: bool,
    #[structopt(flatten)]
    overrides: Overrides,
    #[structopt(subcommand)]
    command: Command,
}

#[derive(Debug, StructOpt)]
struct Overrides {
    /// Number of LEDs on the top edge
    #[structopt(long)]
    top: Option<u32>,
    /// Number of LEDs on the bottom edge
    #[structopt(long)]
    bottom: Option<u32>,
    /// Number of LEDs on the left edge
    #[structopt(long)]
    left: Option<u32>,
    /// Number of LEDs on the right edge
    #[structopt(long)]
    right: Option<u32>,
    /// Clockwise position of the first LED, from the top-left corner
    #[structopt(long, allow_hyphen_values = true)]
    offset: Option<i32>,
    #[structopt(long)]
    counter_clockwise: bool,
    /// Disable all corner LEDs
    #[structopt(long)]
    no_corners: bool,
    /// Integration depth of the top and bottom LEDs
    #[structopt(long)]
    hdepth: Option<f64>,
    /// Integration depth of the left and right LEDs
    #[structopt(long)]
    vdepth: Option<f64>,
    /// Gap between the top and bottom borders and the integration areas
    #[structopt(long)]
    hgap: Option<f64>,
    /// Gap between the left and right borders and the integration areas
    #[structopt(long)]
    vgap: Option<f64>,
    /// Fractional overlap between neighboring LEDs
    #[structopt(long, allow_hyphen_values = true)]
    overlap: Option<f64>,
}

impl Overrides {
    fn apply(&self, topology: &mut FrameTopology, sampling: &mut SamplingParameters) {
        if let Some(top) = self.top {
            topology.top_count = top;
        }
        if let Some(bottom) = self.bottom {
            topology.bottom_count = bottom;
        }
        if let Some(left) = self.left {
            topology.left_count = left;
        }
        if let Some(right) = self.right {
            topology.right_count = right;
        }
        if let Some(offset) = self.offset {
            topology.first_led_offset = offset;
        }
        if self.counter_clockwise {
            topology.clockwise = false;
        }
        if self.no_corners {
            topology.set_corners(false);
        }

        if let Some(hdepth) = self.hdepth {
            sampling.horizontal_depth = hdepth;
        }
        if let Some(vdepth) = self.vdepth {
            sampling.vertical_depth = vdepth;
        }
        if let Some(hgap) = self.hgap {
            sampling.horizontal_gap = hgap;
        }
        if let Some(vgap) = self.vgap {
            sampling.vertical_gap = vgap;
        }
        if let Some(overlap) = self.overlap {
            sampling.overlap_fraction = overlap;
        }
    }
}

#[derive(Debug, StructOpt)]
enum Command {
    /// Print the `leds` section of the daemon configuration
    Leds,
    /// Print one line per LED, in sequence order
    Table,
    /// Print the effective settings
    Settings,
}

fn load_settings(opts: &Opts) -> color_eyre::eyre::Result<(PathBuf, SettingsFile)> {
    match opts.settings_path.as_deref() {
        Some(path) => Ok((
            path.to_owned(),
            SettingsFile::load(path)
                .wrap_err_with(|| format!("failed to load {}", path.display()))?,
        )),
        None => {
            let path = settings::default_path();

            let file = if path.exists() {
                SettingsFile::load(&path)
                    .wrap_err_with(|| format!("failed to load {}", path.display()))?
            } else {
                debug!(path = %path.display(), "no settings file, using defaults");
                SettingsFile::new()
            };

            Ok((path, file))
        }
    }
}

fn print_table(leds: &[LedPlacement]) {
    for led in leds {
        let rect = &led.sample_rect;

        println!(
            "{:>4} {:<12} ({:.4}, {:.4}) x [{:.4}, {:.4}] y [{:.4}, {:.4}]",
            led.sequence_number,
            led.side,
            led.location.x,
            led.location.y,
            rect.x,
            rect.right(),
            rect.y,
            rect.bottom(),
        );
    }
}

fn run(opts: Opts) -> color_eyre::eyre::Result<()> {
    let (path, mut file) = load_settings(&opts)?;

    let mut topology = FrameTopology::default();
    let mut sampling = SamplingParameters::default();
    file.restore(&mut topology)?;
    file.restore(&mut sampling)?;

    opts.overrides.apply(&mut topology, &mut sampling);

    // Reject invalid settings before they get saved
    let leds = construct(&topology, &sampling)?;

    file.store(&topology);
    file.store(&sampling);

    if opts.save {
        file.save(&path)?;
    }

    match opts.command {
        Command::Leds => println!("{}", leds.to_leds().to_json()?),
        Command::Table => print_table(&leds),
        Command::Settings => print!("{}", file.to_toml()?),
    }

    Ok(())
}

fn install_tracing(opts: &Opts) -> Result<(), tracing_subscriber::util::TryInitError> {
    use tracing_error::ErrorLayer;
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // stdout carries the generated configuration
    let fmt_layer = fmt::layer().with_writer(std::io::stderr);

    let filter_layer = EnvFilter::try_from_env("HYPERCON_LOG").unwrap_or_else(|_| {
        EnvFilter::new(match opts.verbose {
            0 => "hypercon=warn",
            1 => "hypercon=info",
            2 => "hypercon=debug",
            _ => "hypercon=trace",
        })
    });

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .try_init()
}

#[paw::main]
fn main(opts: Opts) -> color_eyre::eyre::Result<()> {
    color_eyre::install()?;
    install_tracing(&opts)?;

    run(opts)
}
