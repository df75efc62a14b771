//! The snake simulation: one session on a grid, stepped by two periodic
//! schedules
mod direction;
mod food;
mod geometry;
mod rules;
mod schedule;
mod snake;
pub(crate) use self::direction::Direction;
pub(crate) use self::geometry::{Cell, Grid, Viewport};
pub(crate) use self::rules::{Rules, Walls};
use self::schedule::Schedule;
use self::snake::Snake;
use crate::consts;
use crate::input::InputMapping;
use crate::ranking::Record;
use rand::Rng;
use std::time::Instant;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum Phase {
    /// The grid geometry is not known yet, so nothing moves
    #[default]
    Ready,
    Running,
    /// The session has ended; only a restart brings it back
    Terminal,
}

/// Everything about the current session.  Only the [`TickEngine`] touches
/// this; the outside world sees [`Snapshot`]s.
#[derive(Clone, Debug, Eq, PartialEq)]
struct GameSession {
    snake: Snake,
    food: Cell,
    direction: Direction,
    grid: Option<Grid>,
    score: u32,
    elapsed_seconds: u32,
    phase: Phase,
}

impl GameSession {
    fn new() -> GameSession {
        GameSession {
            snake: Snake::new(),
            food: consts::DEFAULT_FOOD,
            direction: Direction::default(),
            grid: None,
            score: 0,
            elapsed_seconds: 0,
            phase: Phase::Ready,
        }
    }

    fn outcome(&self) -> Record {
        Record::new(self.score, self.elapsed_seconds)
    }
}

/// A copy of the session state for drawing
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snapshot {
    /// Head first
    pub(crate) snake: Vec<Cell>,
    pub(crate) food: Cell,
    pub(crate) direction: Direction,
    pub(crate) score: u32,
    pub(crate) elapsed_seconds: u32,
    pub(crate) phase: Phase,
}

impl Snapshot {
    pub(crate) fn terminal(&self) -> bool {
        self.phase == Phase::Terminal
    }
}

/// Drives a single [`GameSession`].
///
/// The movement schedule fires every [`TICK_PERIOD`][consts::TICK_PERIOD] and
/// the clock schedule every [`CLOCK_PERIOD`][consts::CLOCK_PERIOD]; both are
/// armed when the session starts running and cancelled the moment it ends.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct TickEngine<R = rand::rngs::ThreadRng> {
    rng: R,
    rules: Rules,
    mapping: InputMapping,
    session: GameSession,
    movement: Schedule,
    clock: Schedule,
}

impl TickEngine<rand::rngs::ThreadRng> {
    pub(crate) fn new(rules: Rules, mapping: InputMapping) -> Self {
        TickEngine::new_with_rng(rules, mapping, rand::rng())
    }
}

impl<R: Rng> TickEngine<R> {
    pub(crate) fn new_with_rng(rules: Rules, mapping: InputMapping, rng: R) -> TickEngine<R> {
        TickEngine {
            rng,
            rules,
            mapping,
            session: GameSession::new(),
            movement: Schedule::new(consts::TICK_PERIOD),
            clock: Schedule::new(consts::CLOCK_PERIOD),
        }
    }

    /// Tell the engine how large the playing surface is.  The first valid
    /// geometry places the food and starts the session; later calls only
    /// update the grid.  A viewport too small for a single cell is ignored.
    pub(crate) fn set_viewport(&mut self, viewport: Viewport, now: Instant) {
        let Some(grid) = Grid::from_viewport(viewport) else {
            return;
        };
        if self.session.grid == Some(grid) {
            return;
        }
        self.session.grid = Some(grid);
        if self.session.phase == Phase::Ready {
            self.start(now);
        } else {
            tracing::debug!(cols = grid.cols(), rows = grid.rows(), "Grid resized");
            if !grid.contains(self.session.food) {
                let head = self.session.snake.head();
                self.session.food = food::spawn(Some(grid), head, &mut self.rng);
            }
        }
    }

    /// Reset the session and start it over.  Earlier outcomes already handed
    /// out are unaffected.
    pub(crate) fn restart(&mut self, now: Instant) {
        let session = &mut self.session;
        session.snake.reset();
        session.direction = Direction::default();
        session.score = 0;
        session.elapsed_seconds = 0;
        self.movement.cancel();
        self.clock.cancel();
        if self.session.grid.is_some() {
            self.start(now);
        } else {
            self.session.phase = Phase::Ready;
        }
    }

    fn start(&mut self, now: Instant) {
        let head = self.session.snake.head();
        self.session.food = food::spawn(self.session.grid, head, &mut self.rng);
        self.session.phase = Phase::Running;
        self.movement.arm(now);
        self.clock.arm(now);
        tracing::info!(
            cols = self.session.grid.map(Grid::cols),
            rows = self.session.grid.map(Grid::rows),
            walls = ?self.rules.walls,
            self_collision = self.rules.self_collision,
            "Session started"
        );
    }

    /// Fire every schedule that has come due as of `now`, in deadline order.
    /// Returns the session's outcome if it ended along the way.
    pub(crate) fn advance(&mut self, now: Instant) -> Option<Record> {
        loop {
            let tick_due = self.movement.deadline().filter(|&t| t <= now);
            let clock_due = self.clock.deadline().filter(|&t| t <= now);
            match (tick_due, clock_due) {
                (Some(t), Some(c)) if c < t => {
                    self.clock.fire(now);
                    self.clock_tick();
                }
                (Some(_), _) => {
                    self.movement.fire(now);
                    if let Some(outcome) = self.tick() {
                        return Some(outcome);
                    }
                }
                (None, Some(_)) => {
                    self.clock.fire(now);
                    self.clock_tick();
                }
                (None, None) => return None,
            }
        }
    }

    /// The earliest moment at which [`TickEngine::advance()`] has work to do
    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        match (self.movement.deadline(), self.clock.deadline()) {
            (Some(t), Some(c)) => Some(t.min(c)),
            (t, c) => t.or(c),
        }
    }

    /// Perform one movement step: move the snake, eat any food it reached,
    /// and apply the collision rules.  Does nothing unless the session is
    /// running.
    pub(crate) fn tick(&mut self) -> Option<Record> {
        if self.session.phase != Phase::Running {
            return None;
        }
        let grid = self.session.grid?;
        let session = &mut self.session;
        if !session.snake.step(session.direction, grid, self.rules.walls) {
            return self.terminate("wall");
        }
        let head = session.snake.head();
        if head.touches(session.food) {
            session.score += 1;
            session.food = food::spawn(session.grid, head, &mut self.rng);
            session.snake.grow();
            tracing::debug!(score = session.score, len = session.snake.len(), "Food eaten");
        }
        if self.rules.self_collision && session.snake.bites_itself() {
            return self.terminate("self");
        }
        None
    }

    /// Count one elapsed second if the session is running
    pub(crate) fn clock_tick(&mut self) {
        if self.session.phase == Phase::Running {
            self.session.elapsed_seconds += 1;
        }
    }

    /// End the session, returning its outcome the first time only
    fn terminate(&mut self, cause: &str) -> Option<Record> {
        if self.session.phase == Phase::Terminal {
            return None;
        }
        self.session.phase = Phase::Terminal;
        self.movement.cancel();
        self.clock.cancel();
        let outcome = self.session.outcome();
        tracing::info!(
            cause,
            score = outcome.score,
            duration = outcome.duration,
            "Session over"
        );
        Some(outcome)
    }
}

impl<R> TickEngine<R> {
    /// Ask the snake to head in `direction`.  The request is dropped if the
    /// input mapping forbids it or the session is over.  Returns whether the
    /// direction changed.
    pub(crate) fn set_direction(&mut self, direction: Direction) -> bool {
        if self.session.phase == Phase::Terminal
            || !self.mapping.permits(self.session.direction, direction)
        {
            return false;
        }
        self.session.direction = direction;
        true
    }

    /// Handle a tap at `tap` on a surface of size `area`
    pub(crate) fn tap(&mut self, tap: Cell, area: Viewport) -> bool {
        let direction = self.mapping.resolve_tap(self.session.direction, tap, area);
        self.set_direction(direction)
    }

    pub(crate) fn phase(&self) -> Phase {
        self.session.phase
    }

    pub(crate) fn rules(&self) -> Rules {
        self.rules
    }

    #[cfg(test)]
    pub(crate) fn grid(&self) -> Option<Grid> {
        self.session.grid
    }

    pub(crate) fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.session.snake.cells().to_vec(),
            food: self.session.food,
            direction: self.session.direction,
            score: self.session.score,
            elapsed_seconds: self.session.elapsed_seconds,
            phase: self.session.phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::{MemoryStore, Ranking, RankingItem};
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use std::time::Duration;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    /// 20 columns by 10 rows
    const VIEWPORT: Viewport = Viewport::new(1000, 500);

    fn engine(rules: Rules) -> TickEngine<ChaCha12Rng> {
        TickEngine::new_with_rng(
            rules,
            InputMapping::Turn,
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        )
    }

    fn running(rules: Rules, now: Instant) -> TickEngine<ChaCha12Rng> {
        let mut eng = engine(rules);
        eng.set_viewport(VIEWPORT, now);
        assert_eq!(eng.phase(), Phase::Running);
        eng
    }

    /// Put the food somewhere the tests' snakes never go
    fn park_food<R>(eng: &mut TickEngine<R>) {
        eng.session.food = Cell::new(950, 450);
    }

    fn die_on_walls() -> Rules {
        Rules {
            walls: Walls::Die,
            self_collision: false,
        }
    }

    #[test]
    fn ready_until_geometry_known() {
        let now = Instant::now();
        let mut eng = engine(Rules::default());
        assert_eq!(eng.phase(), Phase::Ready);
        assert_eq!(eng.snapshot().food, consts::DEFAULT_FOOD);
        assert_eq!(eng.next_deadline(), None);
        assert_eq!(eng.tick(), None);
        assert_eq!(eng.snapshot().snake, consts::START_BODY);
        eng.set_viewport(Viewport::new(0, 500), now);
        assert_eq!(eng.phase(), Phase::Ready);
        eng.set_viewport(Viewport::new(40, 40), now);
        assert_eq!(eng.phase(), Phase::Ready);
        assert_eq!(eng.advance(now + Duration::from_secs(5)), None);
        assert_eq!(eng.snapshot().elapsed_seconds, 0);
        eng.set_viewport(VIEWPORT, now);
        assert_eq!(eng.phase(), Phase::Running);
        assert_eq!(eng.next_deadline(), Some(now + consts::TICK_PERIOD));
    }

    #[test]
    fn initial_snapshot() {
        let now = Instant::now();
        let eng = running(Rules::default(), now);
        let snap = eng.snapshot();
        assert_eq!(snap.snake, consts::START_BODY);
        assert_eq!(snap.direction, Direction::Right);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.elapsed_seconds, 0);
        assert!(!snap.terminal());
        assert_ne!(snap.food, snap.snake[0]);
        assert!(eng.grid().is_some_and(|g| g.contains(snap.food)));
    }

    #[test]
    fn body_follows_head() {
        let now = Instant::now();
        let mut eng = running(Rules::default(), now);
        let moves = [
            Direction::Up,
            Direction::Left,
            Direction::Up,
            Direction::Right,
            Direction::Down,
        ];
        for i in 0..200 {
            eng.set_direction(moves[i % moves.len()]);
            let before = eng.snapshot().snake;
            assert_eq!(eng.tick(), None);
            let after = eng.snapshot().snake;
            for j in 1..before.len() {
                assert_eq!(after[j], before[j - 1], "segment {j} on tick {i}");
            }
        }
    }

    #[test]
    fn eating_scores_and_grows() {
        let now = Instant::now();
        let mut eng = running(Rules::default(), now);
        eng.session.food = Cell::new(150, 100);
        assert_eq!(eng.tick(), None);
        let snap = eng.snapshot();
        assert_eq!(snap.score, 1);
        assert_eq!(snap.snake.len(), 5);
        assert_eq!(snap.snake[0], Cell::new(150, 100));
        assert_eq!(snap.snake[3], snap.snake[4]);
        assert_ne!(snap.food, snap.snake[0]);
    }

    #[test]
    fn score_tracks_growth() {
        let now = Instant::now();
        let mut eng = running(Rules::default(), now);
        let turns = [Direction::Down, Direction::Left, Direction::Up, Direction::Right];
        for i in 0..2000 {
            if i % 7 == 0 {
                eng.set_direction(turns[(i / 7) % turns.len()]);
            }
            let before = eng.snapshot();
            assert_eq!(eng.tick(), None);
            let after = eng.snapshot();
            assert_ne!(after.food, after.snake[0], "food spawned on head");
            let ate = after.score - before.score;
            assert!(ate <= 1);
            assert_eq!(
                after.snake.len() - before.snake.len(),
                usize::try_from(ate).unwrap()
            );
        }
        let snap = eng.snapshot();
        assert_eq!(
            snap.snake.len(),
            consts::START_BODY.len() + usize::try_from(snap.score).unwrap()
        );
    }

    #[test]
    fn wall_collision_ends_once() {
        let now = Instant::now();
        let mut eng = running(die_on_walls(), now);
        let mut ranking = Ranking::new(MemoryStore::default());
        park_food(&mut eng);
        eng.session.score = 3;
        eng.session.elapsed_seconds = 17;
        assert!(eng.set_direction(Direction::Up));
        let mut outcomes = Vec::new();
        for _ in 0..5 {
            outcomes.extend(eng.tick());
        }
        assert_eq!(outcomes, vec![Record::new(3, 17)]);
        // Force the wall condition again while already terminal
        eng.session.phase = Phase::Terminal;
        outcomes.extend(eng.terminate("wall"));
        for r in outcomes {
            ranking.record(r).unwrap();
        }
        assert_eq!(ranking.records(), vec![Record::new(3, 17)]);
        assert_eq!(eng.phase(), Phase::Terminal);
        assert_eq!(eng.snapshot().snake[0], Cell::new(100, 0));
    }

    #[test]
    fn terminal_stops_both_schedules() {
        let now = Instant::now();
        let mut eng = running(die_on_walls(), now);
        park_food(&mut eng);
        assert!(eng.set_direction(Direction::Up));
        // Up from y=100 reaches the wall on the third tick, at 600ms
        let outcome = eng.advance(now + Duration::from_secs(10));
        assert_eq!(outcome, Some(Record::new(0, 0)));
        assert_eq!(eng.next_deadline(), None);
        assert_eq!(eng.advance(now + Duration::from_secs(20)), None);
        assert_eq!(eng.snapshot().elapsed_seconds, 0);
        assert!(!eng.set_direction(Direction::Left));
    }

    #[test]
    fn clocks_are_independent() {
        let now = Instant::now();
        let mut eng = running(Rules::default(), now);
        assert_eq!(eng.advance(now + Duration::from_millis(999)), None);
        let snap = eng.snapshot();
        assert_eq!(snap.elapsed_seconds, 0);
        assert_eq!(snap.snake[0], Cell::new(300, 100));
        assert_eq!(eng.advance(now + Duration::from_millis(3100)), None);
        let snap = eng.snapshot();
        assert_eq!(snap.elapsed_seconds, 3);
        // 15 ticks of 50 units each
        assert_eq!(snap.snake[0], Cell::new(850, 100));
        assert_eq!(
            eng.next_deadline(),
            Some(now + Duration::from_millis(3200))
        );
    }

    #[test]
    fn elapsed_time_before_death() {
        let now = Instant::now();
        let mut eng = running(die_on_walls(), now);
        park_food(&mut eng);
        // Heading right from x=100 on a 20-column grid: 18 ticks to reach
        // x=1000, i.e. the wall is hit at 3600ms
        let outcome = eng.advance(now + Duration::from_secs(60));
        assert_eq!(outcome, Some(Record::new(0, 3)));
    }

    #[test]
    fn self_collision_rule() {
        let now = Instant::now();
        let mut eng = running(
            Rules {
                walls: Walls::Wrap,
                self_collision: true,
            },
            now,
        );
        park_food(&mut eng);
        // The starting body lies to the right of the head
        assert_eq!(eng.tick(), Some(Record::new(0, 0)));
        assert_eq!(eng.phase(), Phase::Terminal);
        assert_eq!(eng.tick(), None);

        let mut eng = running(Rules::default(), now);
        park_food(&mut eng);
        assert_eq!(eng.tick(), None);
        assert_eq!(eng.phase(), Phase::Running);
    }

    #[test]
    fn clamp_never_ends() {
        let now = Instant::now();
        let mut eng = running(
            Rules {
                walls: Walls::Clamp,
                self_collision: false,
            },
            now,
        );
        park_food(&mut eng);
        assert!(eng.set_direction(Direction::Up));
        for _ in 0..10 {
            assert_eq!(eng.tick(), None);
        }
        let snap = eng.snapshot();
        assert_eq!(snap.snake[0], Cell::new(100, 0));
        assert_eq!(snap.snake[1], Cell::new(100, 0));
        assert_eq!(snap.phase, Phase::Running);
    }

    #[test]
    fn restart_resets_session() {
        let now = Instant::now();
        let mut eng = running(die_on_walls(), now);
        let mut ranking = Ranking::new(MemoryStore::default());
        ranking.record(Record::new(9, 99)).unwrap();
        park_food(&mut eng);
        eng.session.score = 1;
        assert!(eng.set_direction(Direction::Up));
        let outcome = eng.advance(now + Duration::from_secs(2)).unwrap();
        ranking.record(outcome).unwrap();
        assert_eq!(outcome, Record::new(1, 0));
        assert_eq!(eng.phase(), Phase::Terminal);

        let later = now + Duration::from_secs(2);
        eng.restart(later);
        let snap = eng.snapshot();
        assert_eq!(snap.snake, consts::START_BODY);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.elapsed_seconds, 0);
        assert_eq!(snap.direction, Direction::Right);
        assert_eq!(snap.phase, Phase::Running);
        assert_ne!(snap.food, snap.snake[0]);
        assert_eq!(eng.next_deadline(), Some(later + consts::TICK_PERIOD));
        assert_eq!(
            ranking.load().iter().map(RankingItem::record).collect::<Vec<_>>(),
            vec![Record::new(9, 99), Record::new(1, 0)]
        );
    }

    #[test]
    fn restart_before_geometry_stays_ready() {
        let now = Instant::now();
        let mut eng = engine(Rules::default());
        eng.restart(now);
        assert_eq!(eng.phase(), Phase::Ready);
        assert_eq!(eng.next_deadline(), None);
    }

    #[test]
    fn anti_reversal() {
        let now = Instant::now();
        let mut eng = running(Rules::default(), now);
        assert!(!eng.set_direction(Direction::Left));
        assert!(!eng.set_direction(Direction::Right));
        assert_eq!(eng.snapshot().direction, Direction::Right);
        // Tapping the far left of the screen while heading right
        assert!(eng.tap(Cell::new(10, 100), VIEWPORT));
        assert_eq!(eng.snapshot().direction, Direction::Up);
        assert!(eng.tap(Cell::new(10, 100), VIEWPORT));
        assert_eq!(eng.snapshot().direction, Direction::Left);
    }

    #[test]
    fn quadrant_mapping_allows_reversal() {
        let now = Instant::now();
        let mut eng = TickEngine::new_with_rng(
            Rules::default(),
            InputMapping::Quadrant,
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        );
        eng.set_viewport(VIEWPORT, now);
        assert!(eng.tap(Cell::new(10, 250), VIEWPORT));
        assert_eq!(eng.snapshot().direction, Direction::Left);
    }

    #[test]
    fn resize_keeps_session() {
        let now = Instant::now();
        let mut eng = running(Rules::default(), now);
        assert_eq!(eng.tick(), None);
        let before = eng.snapshot();
        eng.set_viewport(Viewport::new(2000, 2000), now);
        assert_eq!(eng.snapshot(), before);
        assert_eq!(eng.grid().map(Grid::cols), Some(40));
        eng.set_viewport(Viewport::new(0, 0), now);
        assert_eq!(eng.grid().map(Grid::cols), Some(40));
    }

    #[test]
    fn die_after_shrink_stranding_head() {
        let now = Instant::now();
        let mut eng = running(die_on_walls(), now);
        park_food(&mut eng);
        assert_eq!(eng.tick(), None);
        assert_eq!(eng.tick(), None);
        assert_eq!(eng.snapshot().snake[0], Cell::new(200, 100));
        eng.set_viewport(Viewport::new(100, 500), now);
        assert!(eng.set_direction(Direction::Down));
        assert_eq!(eng.tick(), Some(Record::new(0, 0)));
        assert_eq!(eng.phase(), Phase::Terminal);
    }

    #[test]
    fn wrap_after_shrink_returns_head_to_grid() {
        let now = Instant::now();
        let mut eng = running(Rules::default(), now);
        park_food(&mut eng);
        assert_eq!(eng.tick(), None);
        assert_eq!(eng.tick(), None);
        eng.set_viewport(Viewport::new(100, 500), now);
        assert!(eng.set_direction(Direction::Down));
        assert_eq!(eng.tick(), None);
        let head = eng.snapshot().snake[0];
        assert_eq!(head, Cell::new(0, 150));
        assert!(eng.grid().is_some_and(|g| g.contains(head)));
    }

    #[test]
    fn shrinking_moves_stranded_food() {
        let now = Instant::now();
        let mut eng = running(Rules::default(), now);
        let small = Viewport::new(50, 50);
        eng.set_viewport(small, now);
        assert_eq!(eng.snapshot().food, Cell::new(0, 0));
        assert_eq!(eng.snapshot().snake, consts::START_BODY);
    }
}
