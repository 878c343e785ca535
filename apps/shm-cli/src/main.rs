use clap::{Args, Parser, Subcommand};
use shm_cli::output::{emit, summary, sweep_csv, sweep_json, to_json};
use shm_cli::{CliResult, ScenarioFile};
use shm_core::{TimeGrid, Tolerances};
use shm_models::{
    DampedOscillator, ForcedOscillator, ForcingParameters, FrequencySweep, HarmonicOscillator,
    InitialState, Oscillation, OscillatorParameters, Pendulum, PendulumParameters, Scenario,
    Superposition, SweepSpacing, frequency_response,
};
use shm_sim::SimOptions;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "shm-cli")]
#[command(about = "SHM Lab CLI - oscillation models and their derived quantities", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Undamped oscillator in closed form
    Harmonic {
        #[arg(long, default_value_t = 1.0)]
        mass: f64,
        #[arg(long, default_value_t = 10.0)]
        stiffness: f64,
        #[arg(long, default_value_t = 1.0)]
        amplitude: f64,
        #[command(flatten)]
        grid: GridArgs,
    },
    /// Free mass-spring-damper
    Damped {
        #[command(flatten)]
        oscillator: OscillatorArgs,
        /// Initial position (m)
        #[arg(long, default_value_t = 1.0)]
        x0: f64,
        /// Initial velocity (m/s)
        #[arg(long, default_value_t = 0.0)]
        v0: f64,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Damped oscillator driven by F0·cos(ω_f·t)
    Forced {
        #[command(flatten)]
        oscillator: OscillatorArgs,
        /// Force amplitude F0 (N)
        #[arg(long, default_value_t = 1.0)]
        force: f64,
        /// Forcing angular frequency ω_f (rad/s)
        #[arg(long, default_value_t = 3.0)]
        w_force: f64,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Nonlinear pendulum against its small-angle approximation
    Pendulum {
        /// Length (m)
        #[arg(long, default_value_t = 1.0)]
        length: f64,
        /// Gravitational acceleration (m/s²)
        #[arg(long, default_value_t = 9.81)]
        gravity: f64,
        /// Initial angle (degrees)
        #[arg(long, default_value_t = 30.0)]
        angle: f64,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Superposition of two oscillations and beat detection
    Beats {
        #[arg(long, default_value_t = 1.0)]
        a1: f64,
        #[arg(long, default_value_t = 10.0)]
        w1: f64,
        #[arg(long, default_value_t = 1.0)]
        a2: f64,
        #[arg(long, default_value_t = 10.5)]
        w2: f64,
        #[command(flatten)]
        grid: GridArgs,
    },
    /// Steady-state amplitude over a range of forcing frequencies
    Sweep {
        #[command(flatten)]
        oscillator: OscillatorArgs,
        /// Force amplitude F0 (N)
        #[arg(long, default_value_t = 1.0)]
        force: f64,
        #[arg(long, default_value_t = 0.5)]
        w_start: f64,
        #[arg(long, default_value_t = 10.0)]
        w_end: f64,
        #[arg(long, default_value_t = 40)]
        points: usize,
        /// Logarithmic spacing
        #[arg(long)]
        log: bool,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Evaluate a YAML scenario file
    Run {
        scenario_path: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args)]
struct OscillatorArgs {
    /// Mass (kg)
    #[arg(long, default_value_t = 1.0)]
    mass: f64,
    /// Spring stiffness (N/m)
    #[arg(long, default_value_t = 10.0)]
    stiffness: f64,
    /// Damping coefficient (N·s/m)
    #[arg(long, default_value_t = 0.5)]
    damping: f64,
}

impl OscillatorArgs {
    fn params(&self) -> CliResult<OscillatorParameters> {
        Ok(OscillatorParameters::new(self.mass, self.stiffness, self.damping)?)
    }
}

/// Grid and output flags, enough for the closed-form models.
#[derive(Args)]
struct GridArgs {
    /// Simulated time span (s)
    #[arg(long)]
    t_max: Option<f64>,
    /// Number of samples
    #[arg(long, default_value_t = 1000)]
    samples: usize,
    #[command(flatten)]
    output: OutputArgs,
}

impl GridArgs {
    fn time_grid(&self, default_t_max: f64) -> CliResult<TimeGrid> {
        Ok(TimeGrid::linspace(
            self.t_max.unwrap_or(default_t_max),
            self.samples,
        )?)
    }
}

/// Grid, output and solver flags for the integrated models.
#[derive(Args)]
struct CommonArgs {
    #[command(flatten)]
    grid: GridArgs,
    /// Relative tolerance of the adaptive integrator
    #[arg(long)]
    rtol: Option<f64>,
    /// Absolute tolerance of the adaptive integrator
    #[arg(long)]
    atol: Option<f64>,
    /// Use fixed-step RK4 with this maximum step (s)
    #[arg(long, value_name = "DT")]
    rk4: Option<f64>,
}

impl CommonArgs {
    fn time_grid(&self, default_t_max: f64) -> CliResult<TimeGrid> {
        self.grid.time_grid(default_t_max)
    }

    fn output(&self) -> &OutputArgs {
        &self.grid.output
    }

    fn sim_options(&self) -> SimOptions {
        let mut opts = match self.rk4 {
            Some(dt) => SimOptions::rk4(dt),
            None => SimOptions::default(),
        };
        opts.tol = Tolerances {
            abs: self.atol.unwrap_or(opts.tol.abs),
            rel: self.rtol.unwrap_or(opts.tol.rel),
        };
        opts
    }
}

#[derive(Args)]
struct OutputArgs {
    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Write JSON instead of CSV
    #[arg(long)]
    json: bool,
}

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Harmonic {
            mass,
            stiffness,
            amplitude,
            grid,
        } => {
            let model = HarmonicOscillator::new(mass, stiffness, amplitude)?;
            cmd_evaluate(&model, &grid.time_grid(10.0)?, &SimOptions::default(), &grid.output)
        }
        Commands::Damped {
            oscillator,
            x0,
            v0,
            common,
        } => {
            let model = DampedOscillator::new(oscillator.params()?, InitialState::new(x0, v0)?);
            cmd_evaluate(&model, &common.time_grid(20.0)?, &common.sim_options(), common.output())
        }
        Commands::Forced {
            oscillator,
            force,
            w_force,
            common,
        } => {
            let model =
                ForcedOscillator::new(oscillator.params()?, ForcingParameters::new(force, w_force)?);
            cmd_evaluate(&model, &common.time_grid(60.0)?, &common.sim_options(), common.output())
        }
        Commands::Pendulum {
            length,
            gravity,
            angle,
            common,
        } => {
            let model = Pendulum::new(PendulumParameters::new(length, gravity, angle.to_radians())?);
            cmd_evaluate(&model, &common.time_grid(10.0)?, &common.sim_options(), common.output())
        }
        Commands::Beats {
            a1,
            w1,
            a2,
            w2,
            grid,
        } => {
            let model = Superposition::new(Oscillation::new(a1, w1)?, Oscillation::new(a2, w2)?);
            cmd_evaluate(&model, &grid.time_grid(8.0)?, &SimOptions::default(), &grid.output)
        }
        Commands::Sweep {
            oscillator,
            force,
            w_start,
            w_end,
            points,
            log,
            common,
        } => {
            let spacing = if log {
                SweepSpacing::Logarithmic
            } else {
                SweepSpacing::Linear
            };
            let sweep = FrequencySweep::new(w_start, w_end, points, spacing)?;
            cmd_sweep(
                &oscillator.params()?,
                force,
                &sweep,
                &common.time_grid(60.0)?,
                &common.sim_options(),
                common.output(),
            )
        }
        Commands::Run {
            scenario_path,
            output,
        } => cmd_run(&scenario_path, &output),
    }
}

fn cmd_evaluate(
    scenario: &dyn Scenario,
    grid: &TimeGrid,
    opts: &SimOptions,
    output: &OutputArgs,
) -> CliResult<()> {
    let eval = scenario.evaluate(grid, opts)?;
    let text = summary(&eval);
    let content = if output.json {
        to_json(&eval)?
    } else {
        eval.to_csv()
    };
    write_with_summary(&text, &content, output.output.as_deref())
}

fn cmd_sweep(
    params: &OscillatorParameters,
    force: f64,
    sweep: &FrequencySweep,
    grid: &TimeGrid,
    opts: &SimOptions,
    output: &OutputArgs,
) -> CliResult<()> {
    let response = frequency_response(params, force, sweep, grid, opts)?;
    let text = format!(
        "Frequency sweep: {} points, natural frequency {:.4} rad/s\n",
        response.len(),
        params.natural_frequency()
    );
    let content = if output.json {
        sweep_json(&response)?
    } else {
        sweep_csv(&response)
    };
    write_with_summary(&text, &content, output.output.as_deref())
}

fn cmd_run(scenario_path: &Path, output: &OutputArgs) -> CliResult<()> {
    let file = ScenarioFile::load(scenario_path)?;
    tracing::info!(name = %file.name, "loaded scenario");
    let scenario = file.build()?;
    cmd_evaluate(scenario.as_ref(), &file.time_grid()?, &file.sim_options(), output)
}

/// Keep stdout clean for data when no output file is given.
fn write_with_summary(text: &str, content: &str, path: Option<&Path>) -> CliResult<()> {
    if path.is_some() {
        print!("{}", text);
    } else {
        eprint!("{}", text);
    }
    emit(content, path)
}
