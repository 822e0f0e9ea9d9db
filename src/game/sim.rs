use super::direction::Direction;
use super::food::place_food;
use super::levels::Level;
use super::obstacle::{MovingObstacle, Obstacle};
use super::snake::Snake;
use crate::consts;
use rand::Rng;
use ratatui::layout::Position;

/// The outcome of advancing a [`Simulation`] by one tick
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum TickResult {
    /// Nothing decisive happened; keep ticking
    Continue,

    /// The snake ate enough pellets to clear the level.  Carries the score
    /// earned on the level.
    LevelComplete(u32),

    /// The snake crashed.  Carries the score earned on the level.
    GameOver(u32),
}

impl TickResult {
    pub(crate) fn is_terminal(self) -> bool {
        self != TickResult::Continue
    }
}

/// What the snake crashed into
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Crash {
    Itself,
    StaticObstacle,
    MovingObstacle,
}

/// The complete state of one attempt at one level.
///
/// A fresh `Simulation` is created every time a level is started, including
/// retries; it is discarded when the attempt ends.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Simulation<R = rand::rngs::ThreadRng> {
    rng: R,
    level: Level,
    snake: Snake,

    /// The direction applied on the most recent tick
    direction: Direction,

    /// The direction that will be applied on the next tick
    pending: Direction,

    food: Position,
    statics: Vec<Position>,
    movers: Vec<MovingObstacle>,
    pellets: u32,
    score: u32,
    ticks: u64,

    /// Set once a terminal result has been produced
    outcome: Option<TickResult>,
}

impl<R: Rng> Simulation<R> {
    pub(crate) fn new_with_rng(level: Level, mut rng: R) -> Simulation<R> {
        let cfg = level.config();
        let snake = Snake::new();
        let statics = cfg.static_obstacles.to_vec();
        let movers = cfg.moving_obstacles.to_vec();
        let occupied = statics
            .iter()
            .copied()
            .chain(movers.iter().map(|mo| mo.pos))
            .collect::<Vec<_>>();
        let food = place_food(&mut rng, &snake, &occupied);
        log::info!("Starting {level}");
        Simulation {
            rng,
            level,
            snake,
            direction: Direction::East,
            pending: Direction::East,
            food,
            statics,
            movers,
            pellets: 0,
            score: 0,
            ticks: 0,
            outcome: None,
        }
    }

    /// Advance the simulation by one tick.
    ///
    /// Once a terminal result has been returned, further calls leave the
    /// state untouched and return that same result again.
    pub(crate) fn tick(&mut self) -> TickResult {
        if let Some(outcome) = self.outcome {
            return outcome;
        }
        self.ticks += 1;
        self.direction = self.pending;

        if self.ticks % consts::OBSTACLE_MOVE_PERIOD == 0 {
            for mo in &mut self.movers {
                mo.step(&self.statics, consts::GRID_SIZE);
            }
        }

        let new_head = self.direction.advance(self.snake.head(), consts::GRID_SIZE);

        // The tail hasn't moved out of the way yet, so moving into the cell
        // it currently occupies counts as a collision.
        if self.snake.contains(new_head) {
            return self.crash(Crash::Itself);
        }
        if self.level.has_static_hazards() && self.statics.contains(&new_head) {
            return self.crash(Crash::StaticObstacle);
        }
        if self.level.has_moving_hazards()
            && self
                .movers
                .iter()
                .any(|mo| mo.pos == new_head || self.snake.contains(mo.pos))
        {
            return self.crash(Crash::MovingObstacle);
        }

        if new_head == self.food {
            self.snake.advance(new_head, true);
            self.pellets += 1;
            self.score += self.level.config().pellet_value;
            log::debug!(
                "Pellet {}/{} eaten at ({}, {}); snake length {}, level score {}",
                self.pellets,
                consts::PELLETS_TO_ADVANCE,
                new_head.x,
                new_head.y,
                self.snake.len(),
                self.score
            );
            if self.pellets >= consts::PELLETS_TO_ADVANCE {
                log::info!("Cleared {} with {} points", self.level, self.score);
                return self.finish(TickResult::LevelComplete(self.score));
            }
            let occupied = self.obstacle_positions().collect::<Vec<_>>();
            self.food = place_food(&mut self.rng, &self.snake, &occupied);
        } else {
            self.snake.advance(new_head, false);
        }
        TickResult::Continue
    }
}

impl<R> Simulation<R> {
    /// Queue `direction` to be applied on the next tick.  Requests are
    /// ignored once the simulation has ended or if `direction` would turn
    /// the snake straight back onto itself.
    pub(crate) fn request_direction(&mut self, direction: Direction) {
        if self.is_done() || direction == self.direction.reverse() {
            return;
        }
        self.pending = direction;
    }

    pub(crate) fn is_done(&self) -> bool {
        self.outcome.is_some()
    }

    pub(crate) fn pellets(&self) -> u32 {
        self.pellets
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            level: self.level,
            snake: &self.snake,
            direction: self.direction,
            food: self.food,
            statics: &self.statics,
            movers: &self.movers,
        }
    }

    fn obstacle_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.statics
            .iter()
            .copied()
            .chain(self.movers.iter().map(|mo| mo.pos))
    }

    fn crash(&mut self, crash: Crash) -> TickResult {
        log::info!(
            "Game over on {}: crashed into {crash:?} at tick {} with {} points",
            self.level,
            self.ticks,
            self.score
        );
        self.finish(TickResult::GameOver(self.score))
    }

    fn finish(&mut self, result: TickResult) -> TickResult {
        self.outcome = Some(result);
        result
    }
}

/// A read-only view of a [`Simulation`] for drawing
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Snapshot<'a> {
    pub(crate) level: Level,
    pub(crate) snake: &'a Snake,
    pub(crate) direction: Direction,
    pub(crate) food: Position,
    statics: &'a [Position],
    movers: &'a [MovingObstacle],
}

impl Snapshot<'_> {
    pub(crate) fn obstacles(&self) -> impl Iterator<Item = Obstacle> + '_ {
        self.statics
            .iter()
            .copied()
            .map(Obstacle::Static)
            .chain(self.movers.iter().copied().map(Obstacle::Moving))
    }
}
