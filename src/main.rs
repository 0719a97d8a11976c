use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::Duration;

use clap::Parser;
use rand::Rng;

use clinometer::{Clinometer, ClinometerCommand, ClinometerConfig, DisplayRotation, Orientation};

#[derive(Parser, Debug)]
#[command(name = "clinometer", about = "Clinometer and artificial horizon view")]
struct Cli {
    /// Window title
    #[arg(long, default_value = "Clinometer")]
    title: String,

    /// Window width in logical pixels
    #[arg(long, default_value_t = 600)]
    width: usize,

    /// Window height in logical pixels
    #[arg(long, default_value_t = 600)]
    height: usize,

    /// Frame rate cap
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// TrueType/OpenType font for the labels
    #[arg(long, env = "CLINOMETER_FONT")]
    font: Option<PathBuf>,

    /// Display rotation in degrees (0, 90, 180 or 270)
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    rotation: i32,

    /// Simulate a device lying flat on a table
    #[arg(long)]
    flat: bool,

    /// Simulated sensor update interval in milliseconds
    #[arg(long, default_value_t = 20)]
    sensor_interval_ms: u64,
}

/// Smoothed random walk standing in for the motion sensors.
struct SimulatedSensor {
    pitch: f64,
    roll: f64,
    target: (f64, f64),
    flat: bool,
    rotation: DisplayRotation,
}

impl SimulatedSensor {
    const SPAN: f64 = 25.0;
    const LERP_FACTOR: f64 = 0.05;

    fn new(flat: bool, rotation: DisplayRotation) -> Self {
        Self {
            pitch: 0.0,
            roll: 0.0,
            target: (0.0, 0.0),
            flat,
            rotation,
        }
    }

    fn step(&mut self, rng: &mut impl Rng) -> Orientation {
        if rng.random_range(0.0..1.0) < 0.02 {
            self.target = (
                rng.random_range(-Self::SPAN..Self::SPAN),
                rng.random_range(-Self::SPAN..Self::SPAN),
            );
        }
        self.pitch = lerp(self.pitch, self.target.0);
        self.roll = lerp(self.roll, self.target.1);

        let tilt = self.pitch.hypot(self.roll);
        // Max-gradient direction in the screen plane, 3 o'clock at zero.
        let axis_rotation = if tilt > f64::EPSILON {
            (-self.roll).atan2(self.pitch).to_degrees()
        } else {
            0.0
        };
        Orientation::builder()
            .pitch(self.pitch)
            .roll(self.roll)
            .tilt(tilt)
            .axis_rotation(axis_rotation)
            .spirit_tilt(90.0 - tilt)
            .label_compensation(self.rotation.degrees())
            .is_flat(self.flat)
            .build()
    }
}

fn lerp(current: f64, target: f64) -> f64 {
    current + (target - current) * SimulatedSensor::LERP_FACTOR
}

fn spawn_sensor(sender: Sender<ClinometerCommand>, mut sensor: SimulatedSensor, interval: Duration) {
    thread::spawn(move || {
        let mut rng = rand::rng();
        loop {
            let command = ClinometerCommand::SetOrientation(sensor.step(&mut rng));
            if sender.send(command).is_err() {
                tracing::debug!("view closed, stopping simulated sensor");
                break;
            }
            thread::sleep(interval);
        }
    });
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let rotation = DisplayRotation::from_degrees(cli.rotation);
    let config = ClinometerConfig::builder()
        .title(cli.title)
        .window_width(cli.width)
        .window_height(cli.height)
        .max_framerate(cli.fps)
        .initial_display_rotation(rotation)
        .maybe_font_path(cli.font)
        .build();
    config.validate()?;
    if config.font_path.is_none() {
        tracing::warn!("no --font given (or CLINOMETER_FONT); labels will not be drawn");
    }

    let (sender, receiver) = mpsc::channel();
    spawn_sensor(
        sender,
        SimulatedSensor::new(cli.flat, rotation),
        Duration::from_millis(cli.sensor_interval_ms.max(1)),
    );

    tracing::info!(
        rotation = rotation.degrees(),
        flat = cli.flat,
        "starting clinometer with simulated sensor"
    );
    let mut clinometer = Clinometer::new(config);
    clinometer.show_with_commands(receiver)?;
    Ok(())
}
