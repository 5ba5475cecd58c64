use flappy_boost::bird::{BIRD_HEIGHT, BIRD_WIDTH, Bird, GRAVITY, JUMP_FORCE};
use flappy_boost::pipe::{GAP_HEIGHT, PIPE_WIDTH, Pipe};
use flappy_boost::powerup::{POWER_UP_SIZE, PowerUp, PowerUpKind};
use flappy_boost::score::parse_high_score;
use flappy_boost::{CANVAS_H, CANVAS_W};

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::f64::consts::FRAC_PI_4;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── Bird physics ─────────────────────────────────────────────────────────────

#[test]
fn gravity_integrates_into_velocity_then_position() {
    // Worked example: bird resting at y=0 after a top clamp. One tick adds
    // one unit of gravity to velocity and moves by that velocity.
    let mut bird = Bird::new();
    bird.y = 0.0;
    bird.velocity = 0.0;
    bird.update();
    assert_eq!(bird.velocity, GRAVITY);
    assert_eq!(bird.y, GRAVITY);
}

#[test]
fn bird_clamps_at_top_and_zeroes_velocity() {
    let mut bird = Bird::new();
    bird.y = 1.0;
    bird.velocity = JUMP_FORCE; // heading up fast
    bird.update();
    assert_eq!(bird.y, 0.0);
    assert_eq!(bird.velocity, 0.0);
}

#[test]
fn bird_clamps_at_bottom_and_zeroes_velocity() {
    let mut bird = Bird::new();
    bird.y = CANVAS_H - BIRD_HEIGHT;
    bird.velocity = 5.0;
    bird.update();
    assert_eq!(bird.y, CANVAS_H - BIRD_HEIGHT);
    assert_eq!(bird.velocity, 0.0);
    assert!(bird.on_ground());
}

#[test]
fn jump_replaces_velocity_instead_of_adding() {
    let mut bird = Bird::new();
    bird.velocity = 12.0;
    bird.jump();
    assert_eq!(bird.velocity, JUMP_FORCE);
    // Jumping again while already rising must not stack.
    bird.jump();
    assert_eq!(bird.velocity, JUMP_FORCE);
}

#[test]
fn rotation_is_clamped_to_quarter_pi() {
    let mut bird = Bird::new();
    bird.y = CANVAS_H / 2.0;
    bird.velocity = 20.0;
    bird.update();
    assert_eq!(bird.rotation, FRAC_PI_4);

    let mut bird = Bird::new();
    bird.velocity = -20.0;
    bird.update();
    assert_eq!(bird.rotation, -FRAC_PI_4);
}

// ── Bird vs pipe collision ───────────────────────────────────────────────────

fn pipe_at(x: f64, gap_start: f64) -> Pipe {
    Pipe {
        x,
        speed: 3.0,
        gap_start,
        passed: false,
    }
}

#[test]
fn bird_inside_gap_does_not_collide() {
    let bird = Bird::new(); // y = 300
    let pipe = pipe_at(bird.x, 250.0); // gap 250..450
    assert!(!bird.collides_with(&pipe));
}

#[test]
fn bird_above_gap_collides() {
    let mut bird = Bird::new();
    bird.y = 100.0;
    let pipe = pipe_at(bird.x, 250.0);
    assert!(bird.collides_with(&pipe));
}

#[test]
fn bird_overlapping_gap_edge_collides() {
    let mut bird = Bird::new();
    let pipe = pipe_at(bird.x, 250.0);
    bird.y = 250.0 + GAP_HEIGHT - BIRD_HEIGHT + 1.0; // pokes 1 unit below the gap
    assert!(bird.collides_with(&pipe));
}

#[test]
fn no_collision_without_horizontal_overlap() {
    let bird = Bird::new();
    let pipe = pipe_at(bird.x + BIRD_WIDTH + 1.0, 0.0); // gap nowhere near the bird
    assert!(!bird.collides_with(&pipe));
}

// ── Pipe lifecycle ───────────────────────────────────────────────────────────

#[test]
fn new_pipe_gap_fits_canvas_with_margins() {
    let mut rng = seeded_rng();
    for _ in 0..100 {
        let pipe = Pipe::new(3.0, &mut rng);
        assert!(pipe.gap_start >= 50.0);
        assert!(pipe.gap_end() <= CANVAS_H - 50.0);
        assert_eq!(pipe.x, CANVAS_W);
        assert!(!pipe.passed);
    }
}

#[test]
fn pipe_scrolls_left_by_its_speed() {
    let mut rng = seeded_rng();
    let mut pipe = Pipe::new(3.0, &mut rng);
    pipe.update();
    assert_eq!(pipe.x, CANVAS_W - 3.0);
}

#[test]
fn pipe_offscreen_once_trailing_edge_exits() {
    let mut pipe = pipe_at(-PIPE_WIDTH, 200.0);
    assert!(!pipe.is_offscreen());
    pipe.x = -PIPE_WIDTH - 0.1;
    assert!(pipe.is_offscreen());
}

// ── Power-ups ────────────────────────────────────────────────────────────────

#[test]
fn powerup_scrolls_and_leaves_screen() {
    let mut p = PowerUp::new(PowerUpKind::Shield, 3.0, 300.0);
    assert_eq!(p.x, CANVAS_W);
    p.update();
    assert_eq!(p.x, CANVAS_W - 3.0);
    p.x = -POWER_UP_SIZE - 0.1;
    assert!(p.is_offscreen());
}

#[test]
fn bird_overlap_with_powerup_is_symmetric_aabb() {
    let bird = Bird::new();
    let mut p = PowerUp::new(PowerUpKind::Multiplier, 3.0, bird.y);
    p.x = bird.x;
    assert!(bird.overlaps(&p));
    p.x = bird.x + BIRD_WIDTH + 1.0;
    assert!(!bird.overlaps(&p));
    p.x = bird.x;
    p.y = bird.y + BIRD_HEIGHT + 1.0;
    assert!(!bird.overlaps(&p));
}

// ── High-score parsing ───────────────────────────────────────────────────────

#[test]
fn high_score_parses_plain_number() {
    assert_eq!(parse_high_score("42"), 42);
    assert_eq!(parse_high_score("  17\n"), 17);
}

#[test]
fn malformed_high_score_defaults_to_zero() {
    assert_eq!(parse_high_score(""), 0);
    assert_eq!(parse_high_score("not a number"), 0);
    assert_eq!(parse_high_score("-5"), 0);
    assert_eq!(parse_high_score("12.5"), 0);
}
