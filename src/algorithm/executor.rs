use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{error, info};

use crate::algorithm::propagation::{StepOutcome, collapse_step};
use crate::io::configuration::DEFAULT_STEP_DELAY_MS;
use crate::io::error::{Result, WithContext};
use crate::spatial::grid::Grid;
use crate::spatial::tiles::TileCatalog;

/// Pacing parameters for a generation run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DriverConfig {
    /// Pause after every step that left work to do
    pub step_delay: Duration,
    /// Stop after this many steps even if cells remain unresolved
    pub max_steps: Option<usize>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            step_delay: Duration::from_millis(DEFAULT_STEP_DELAY_MS),
            max_steps: None,
        }
    }
}

impl DriverConfig {
    /// Configuration without pauses, for batch runs and tests
    pub const fn unpaced() -> Self {
        Self {
            step_delay: Duration::ZERO,
            max_steps: None,
        }
    }
}

/// Shared flag asking a running driver to stop between two steps
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token that is not cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; takes effect before the next step
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Receives the grid after every step, typically to render it
pub trait StepObserver {
    /// Called after step number `step` (1-based) with the grid's current state
    ///
    /// # Errors
    ///
    /// Returning an error aborts the run with that error
    fn on_step(&mut self, grid: &Grid<'_>, step: usize, outcome: StepOutcome) -> Result<()>;
}

/// Observer that ignores every step
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl StepObserver for NoopObserver {
    fn on_step(&mut self, _grid: &Grid<'_>, _step: usize, _outcome: StepOutcome) -> Result<()> {
        Ok(())
    }
}

impl<A, B> StepObserver for (A, B)
where
    A: StepObserver,
    B: StepObserver,
{
    fn on_step(&mut self, grid: &Grid<'_>, step: usize, outcome: StepOutcome) -> Result<()> {
        self.0.on_step(grid, step, outcome)?;
        self.1.on_step(grid, step, outcome)
    }
}

impl<O> StepObserver for Option<O>
where
    O: StepObserver,
{
    fn on_step(&mut self, grid: &Grid<'_>, step: usize, outcome: StepOutcome) -> Result<()> {
        self.as_mut()
            .map_or(Ok(()), |observer| observer.on_step(grid, step, outcome))
    }
}

/// How a run ended when it did not fail
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every cell was resolved
    Completed,
    /// The cancellation token was triggered
    Cancelled,
    /// The configured step cap was reached
    StepLimitReached,
}

/// Summary of a finished run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunReport {
    /// How the run ended
    pub outcome: RunOutcome,
    /// Steps executed, including rejected attempts and the final empty step
    pub steps: usize,
    /// Steps that committed a tile
    pub committed: usize,
    /// Resolved cells at the end of the run
    pub resolved: usize,
    /// Total number of cells
    pub total: usize,
}

/// Drives a grid step by step until it is resolved, fails, or is cancelled
///
/// Owns the grid and the single random source used for both tie-breaking and
/// weighted sampling. Errors from a step are fatal: the run stops and the
/// grid is left readable in its last committed state.
pub struct Executor<'a, R = StdRng> {
    grid: Grid<'a>,
    rng: R,
    config: DriverConfig,
    cancellation: CancellationToken,
    steps: usize,
    committed: usize,
}

impl<'a> Executor<'a, StdRng> {
    /// Create an executor over a fresh grid with a seeded random source
    ///
    /// # Errors
    ///
    /// Returns an error if the grid dimensions are invalid
    pub fn seeded(
        catalog: &'a TileCatalog,
        width: usize,
        height: usize,
        seed: u64,
        config: DriverConfig,
    ) -> Result<Self> {
        let grid = Grid::new(width, height, catalog)?;
        Ok(Self::new(grid, StdRng::seed_from_u64(seed), config))
    }
}

impl<'a, R> Executor<'a, R>
where
    R: Rng,
{
    /// Create an executor over an existing grid
    pub fn new(grid: Grid<'a>, rng: R, config: DriverConfig) -> Self {
        Self {
            grid,
            rng,
            config,
            cancellation: CancellationToken::new(),
            steps: 0,
            committed: 0,
        }
    }

    /// Replace the cancellation token, e.g. with one shared with a UI
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Token that cancels this run when triggered
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    /// Grid in its current state
    pub const fn grid(&self) -> &Grid<'a> {
        &self.grid
    }

    /// Give up ownership of the grid
    pub fn into_grid(self) -> Grid<'a> {
        self.grid
    }

    /// Steps executed so far
    pub const fn steps(&self) -> usize {
        self.steps
    }

    /// Execute a single step
    ///
    /// # Errors
    ///
    /// Propagates the step's fatal error, tagged with the step number
    pub fn step(&mut self) -> Result<StepOutcome> {
        self.steps += 1;
        let outcome = collapse_step(&mut self.grid, &mut self.rng).with_step(self.steps)?;
        if matches!(outcome, StepOutcome::Committed { .. }) {
            self.committed += 1;
        }
        Ok(outcome)
    }

    /// Run until the grid is resolved, the token is cancelled or the step cap
    /// is reached, notifying `observer` after every step
    ///
    /// # Errors
    ///
    /// Returns the first fatal step error or observer error
    pub fn run<O>(&mut self, observer: &mut O) -> Result<RunReport>
    where
        O: StepObserver + ?Sized,
    {
        let outcome = loop {
            if self.cancellation.is_cancelled() {
                break RunOutcome::Cancelled;
            }
            if self.config.max_steps.is_some_and(|limit| self.steps >= limit) {
                break RunOutcome::StepLimitReached;
            }

            let step_outcome = match self.step() {
                Ok(step_outcome) => step_outcome,
                Err(e) => {
                    error!(
                        "Generation aborted after {} steps ({} of {} cells resolved): {e}",
                        self.steps,
                        self.grid.resolved_count(),
                        self.grid.cells().len()
                    );
                    return Err(e);
                }
            };
            observer.on_step(&self.grid, self.steps, step_outcome)?;

            if step_outcome == StepOutcome::Finished {
                break RunOutcome::Completed;
            }
            if !self.config.step_delay.is_zero() {
                std::thread::sleep(self.config.step_delay);
            }
        };

        let report = self.report(outcome);
        info!(
            "Run {:?} after {} steps: {}/{} cells resolved",
            report.outcome, report.steps, report.resolved, report.total
        );
        Ok(report)
    }

    fn report(&self, outcome: RunOutcome) -> RunReport {
        RunReport {
            outcome,
            steps: self.steps,
            committed: self.committed,
            resolved: self.grid.resolved_count(),
            total: self.grid.cells().len(),
        }
    }
}
