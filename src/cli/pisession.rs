use std::f64::consts::PI;
use std::io::{
    BufRead,
    Write
};

use rand::Rng;
use tracing::debug;

use crate::cli::clierror::CliError;
use crate::cli::prompt::Prompter;
use crate::math::montecarlo::piestimator::{
    MAX_POWER,
    analyze_convergence,
    estimate_pi
};
use crate::render::renderer::Renderer;

const DEFAULT_POINTS: usize = 1000;
const DEFAULT_MAX_POWER: u32 = 5;

/// Monte Carlo π 的選單流程。
pub struct PiSession<'a, R, W, G> {
    prompter: Prompter<R, W>,
    renderers: Vec<Box<dyn Renderer + 'a>>,
    rng: G,
    precision: usize
}

impl<'a, R, W, G> PiSession<'a, R, W, G> where
    R: BufRead,
    W: Write,
    G: Rng {
    pub fn new(prompter: Prompter<R, W>,
               renderers: Vec<Box<dyn Renderer + 'a>>,
               rng: G,
               precision: usize) -> PiSession<'a, R, W, G> {
        PiSession { prompter, renderers, rng, precision }
    }

    pub fn into_prompter(self) -> Prompter<R, W> {
        self.prompter
    }

    /// 重複顯示選單直到選擇 3。
    pub fn run(&mut self) -> Result<(), CliError> {
        self.prompter.say("Monte Carlo Simulation for Estimating π")?;
        self.prompter.say("=======================================")?;
        loop {
            self.prompter.say("\nChoose an option:")?;
            self.prompter.say("1. Run a single simulation with N points")?;
            self.prompter.say("2. Analyze convergence with different sample sizes")?;
            self.prompter.say("3. Exit")?;
            match self.prompter.read_line("Enter your choice (1-3): ")?.as_str() {
                "1" => {
                    let n = self.read_points()?;
                    self.simulate(n, true)?;
                },
                "2" => {
                    let max_power = self.read_max_power()?;
                    self.run_convergence(max_power)?;
                },
                "3" => {
                    self.prompter.say("Exiting program. Goodbye!")?;
                    return Ok(());
                },
                _ => self.prompter.say("Invalid choice. Please enter 1, 2, or 3.")?
            }
        }
    }

    /// 無效或非正數時改用預設 1000，不重新提示。
    fn read_points(&mut self) -> Result<usize, CliError> {
        let line = self.prompter.read_line("Enter the number of points to use (e.g., 1000): ")?;
        match line.parse::<i64>() {
            Ok(n) if n > 0 => Ok(n as usize),
            Ok(_) => {
                self.prompter.say(&format!("Number of points must be positive. Using default value of {}.", DEFAULT_POINTS))?;
                Ok(DEFAULT_POINTS)
            },
            Err(_) => {
                self.prompter.say(&format!("Invalid input. Using default value of {}.", DEFAULT_POINTS))?;
                Ok(DEFAULT_POINTS)
            }
        }
    }

    fn read_max_power(&mut self) -> Result<u32, CliError> {
        let line = self.prompter.read_line("Enter the maximum power of 10 for analysis (e.g., 5 for up to 10^5 points): ")?;
        match line.parse::<u32>() {
            Ok(power) if (1..=MAX_POWER).contains(&power) => Ok(power),
            Ok(_) => {
                self.prompter.say(&format!(
                    "Maximum power must be between 1 and {}. Using default value of {}.",
                    MAX_POWER,
                    DEFAULT_MAX_POWER
                ))?;
                Ok(DEFAULT_MAX_POWER)
            },
            Err(_) => {
                self.prompter.say(&format!("Invalid input. Using default value of {}.", DEFAULT_MAX_POWER))?;
                Ok(DEFAULT_MAX_POWER)
            }
        }
    }

    fn simulate(&mut self, n: usize, ask_visualization: bool) -> Result<(), CliError> {
        let p = self.precision;
        self.prompter.say(&format!("\nRunning simulation with {} points...", n))?;
        let estimate = estimate_pi(n, &mut self.rng)?;
        debug!(n, estimate = estimate.estimate(), "pi simulation finished");
        self.prompter.say(&format!("Estimated π: {:.p$}", estimate.estimate()))?;
        self.prompter.say(&format!("Actual π value: {:.p$}", PI))?;
        self.prompter.say(&format!("Absolute error: {:.p$}", estimate.absolute_error()))?;

        let show = !ask_visualization || self.prompter.confirm("Do you want to see the visualization? (y/n): ")?;
        if show {
            for renderer in self.renderers.iter_mut() {
                renderer.render_pi(&estimate)?;
            }
        }
        Ok(())
    }

    /// 非互動：單次模擬並直接輸出。
    pub fn run_single(&mut self, n: usize) -> Result<(), CliError> {
        self.simulate(n, false)
    }

    pub fn run_convergence(&mut self, max_power: u32) -> Result<(), CliError> {
        let rows = analyze_convergence(max_power, &mut self.rng)?;
        for renderer in self.renderers.iter_mut() {
            renderer.render_convergence(&rows)?;
        }
        Ok(())
    }
}
