use super::snake::Snake;
use crate::consts;
use rand::Rng;
use ratatui::layout::Position;

/// Pick a random cell for a new food pellet that is not occupied by the
/// snake or by any of `obstacles`.
///
/// Cells are sampled uniformly at random up to
/// [`FOOD_PLACEMENT_ATTEMPTS`][consts::FOOD_PLACEMENT_ATTEMPTS] times; if
/// every sample is occupied, the last one is returned anyway.
pub(super) fn place_food<R: Rng>(rng: &mut R, snake: &Snake, obstacles: &[Position]) -> Position {
    let mut pos = random_cell(rng);
    for _ in 1..consts::FOOD_PLACEMENT_ATTEMPTS {
        if !snake.contains(pos) && !obstacles.contains(&pos) {
            return pos;
        }
        pos = random_cell(rng);
    }
    if snake.contains(pos) || obstacles.contains(&pos) {
        log::warn!(
            "No free cell found for food after {} attempts; placing it at ({}, {}) anyway",
            consts::FOOD_PLACEMENT_ATTEMPTS,
            pos.x,
            pos.y
        );
    }
    pos
}

fn random_cell<R: Rng>(rng: &mut R) -> Position {
    Position {
        x: rng.random_range(0..consts::GRID_SIZE),
        y: rng.random_range(0..consts::GRID_SIZE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use ratatui::layout::Rect;
    use std::collections::VecDeque;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    #[test]
    fn avoids_snake_and_obstacles() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let snake = Snake::new();
        let obstacles = [Position::new(0, 0), Position::new(5, 5), Position::new(19, 19)];
        for _ in 0..500 {
            let pos = place_food(&mut rng, &snake, &obstacles);
            assert!(pos.x < consts::GRID_SIZE && pos.y < consts::GRID_SIZE);
            assert!(!snake.contains(pos));
            assert!(!obstacles.contains(&pos));
        }
    }

    #[test]
    fn saturated_grid_still_returns() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let snake = Snake {
            body: Rect::new(0, 0, consts::GRID_SIZE, consts::GRID_SIZE)
                .positions()
                .collect::<VecDeque<_>>(),
        };
        let pos = place_food(&mut rng, &snake, &[]);
        assert!(snake.contains(pos));
    }
}
