//! Stochastic branch growth.
//!
//! Branches are processed as an explicit worklist instead of recursion so
//! depth stays bounded by the task stack, while visiting branches in the same
//! depth-first order recursion would: when a step spawns a child, the parent
//! is suspended with its already-rolled movement, the child runs to
//! completion, then the parent finishes that step and continues.

use rand::Rng;
use tracing::debug;

use crate::buffer::{ScreenBuffer, WindowType};
use crate::colors::ColorType;
use crate::config::{BonsaiConfig, BranchType, Counters};
use crate::error::Result;

/// One branch suspended between growth steps.
struct BranchTask {
    x: f64,
    y: i32,
    branch_type: BranchType,
    life: i32,
    shoot_cooldown: i32,
    /// Movement rolled before a child spawn suspended this step.
    pending_move: Option<(i32, i32)>,
}

impl BranchTask {
    fn child(&self, branch_type: BranchType, life: i32, multiplier: i32) -> Self {
        Self {
            x: self.x,
            y: self.y,
            branch_type,
            life,
            shoot_cooldown: multiplier,
            pending_move: None,
        }
    }
}

/// Grows one tree into a screen buffer and renders the result.
pub struct Bonsai<B: ScreenBuffer> {
    buffer: B,
    counters: Counters,
}

impl<B: ScreenBuffer> Bonsai<B> {
    /// Wrap a buffer and draw the pot into its base window.
    pub fn new(buffer: B) -> Self {
        let mut bonsai = Self {
            buffer,
            counters: Counters::default(),
        };
        bonsai.draw_base();
        bonsai
    }

    fn draw_base(&mut self) {
        let buf = &mut self.buffer;
        buf.write(WindowType::Base, 0, -9, "___________", Some(ColorType::BrightGreen));
        buf.write(WindowType::Base, 0, 0, "./~~~\\.", Some(ColorType::Yellow));
        buf.write(WindowType::Base, 0, 9, "___________", Some(ColorType::BrightGreen));
        buf.write(WindowType::Base, 1, 0, " \\                           / ", Some(ColorType::White));
        buf.write(WindowType::Base, 2, 0, " \\_________________________/ ", Some(ColorType::White));
        buf.write(WindowType::Base, 3, 0, "(_)                   (_)", Some(ColorType::White));
    }

    /// Run one full growth pass and return the final rendered string.
    ///
    /// Validates the configuration up front: an empty leaf set fails here,
    /// before any glyph is written.
    pub fn run<R: Rng>(&mut self, conf: &BonsaiConfig, rng: &mut R) -> Result<String> {
        conf.validate()?;
        self.grow_tree(conf, rng)?;

        debug!(
            branches = self.counters.branches,
            shoots = self.counters.shoots,
            "growth finished"
        );

        self.buffer.export()
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    pub fn into_buffer(self) -> B {
        self.buffer
    }

    fn grow_tree<R: Rng>(&mut self, conf: &BonsaiConfig, rng: &mut R) -> Result<()> {
        let geo = self.buffer.geometry();
        let max_x = geo.width;
        let max_y = geo.max_height(WindowType::Tree);

        self.counters.branches = 0;
        self.counters.shoots = 0;
        self.counters.shoot_counter = rng.gen_range(0..10_000);

        if conf.verbosity > 0 {
            let overlay = format!("maxX: {max_x}, maxY: {max_y}");
            self.buffer.write(WindowType::Tree, 2, 5, &overlay, None);
        }

        let mut stack: Vec<BranchTask> = Vec::with_capacity(64);
        self.counters.branches += 1;
        stack.push(BranchTask {
            // trunk starts centered; the column stays fractional for odd
            // widths and is truncated before every write
            x: max_x as f64 / 2.0,
            y: max_y - 1,
            branch_type: BranchType::Trunk,
            life: conf.life_start as i32,
            shoot_cooldown: conf.multiplier as i32,
            pending_move: None,
        });

        while let Some(mut task) = stack.pop() {
            if let Some((dx, dy)) = task.pending_move.take() {
                self.finish_step(conf, rng, &mut task, dx, dy)?;
            }

            while task.life > 0 {
                task.life -= 1;
                let age = conf.life_start as i32 - task.life;

                let (dx, mut dy) = set_deltas(
                    rng,
                    task.branch_type,
                    task.life,
                    age,
                    conf.multiplier as i32,
                );

                // keep downward growth clear of the base banner
                if dy > 0 && task.y > max_y - 2 {
                    dy -= 1;
                }

                if let Some(child) = self.spawn_child(conf, rng, &mut task) {
                    self.counters.branches += 1;
                    task.pending_move = Some((dx, dy));
                    stack.push(task);
                    stack.push(child);
                    break;
                }

                self.finish_step(conf, rng, &mut task, dx, dy)?;
            }
        }

        Ok(())
    }

    /// Spawn policy for one step, evaluated at the pre-move position.
    /// Only the first matching arm fires.
    fn spawn_child<R: Rng>(
        &mut self,
        conf: &BonsaiConfig,
        rng: &mut R,
        task: &mut BranchTask,
    ) -> Option<BranchTask> {
        let life = task.life;
        let multiplier = conf.multiplier as i32;

        // near-dead branch should branch into a lot of leaves
        if life < 3 {
            return Some(task.child(BranchType::Dead, life, multiplier));
        }

        // dying trunk or shoot should branch into a lot of leaves
        if task.branch_type == BranchType::Trunk && life < multiplier + 2 {
            return Some(task.child(BranchType::Dying, life, multiplier));
        }
        if matches!(task.branch_type, BranchType::ShootLeft | BranchType::ShootRight)
            && life < multiplier + 2
        {
            return Some(task.child(BranchType::Dying, life, multiplier));
        }

        // trunks re-branch randomly or upon every <multiplier> steps
        if task.branch_type == BranchType::Trunk
            && (rng.gen_range(0..3) == 0 || life % multiplier == 0)
        {
            // occasionally fork a sibling trunk with perturbed life
            if rng.gen_range(0..8) == 0 && life > 7 {
                task.shoot_cooldown = multiplier * 2;
                let perturbed = life + rng.gen_range(0..5) - 2;
                return Some(task.child(BranchType::Trunk, perturbed, multiplier));
            }

            // otherwise a shoot, once the cooldown has expired
            if task.shoot_cooldown <= 0 {
                task.shoot_cooldown = multiplier * 2;
                self.counters.shoots += 1;
                self.counters.shoot_counter += 1;

                let shoot_type = if self.counters.shoot_counter % 2 == 0 {
                    BranchType::ShootLeft
                } else {
                    BranchType::ShootRight
                };
                return Some(task.child(shoot_type, life + multiplier, multiplier));
            }
        }

        None
    }

    /// Second half of a growth step: cooldown tick, movement, glyph write,
    /// frame export. Runs after any spawned child has completed.
    fn finish_step<R: Rng>(
        &mut self,
        conf: &BonsaiConfig,
        rng: &mut R,
        task: &mut BranchTask,
        dx: i32,
        dy: i32,
    ) -> Result<()> {
        task.shoot_cooldown -= 1;

        task.x += dx as f64;
        task.y += dy;

        let glyph = choose_string(conf, rng, task.branch_type, task.life, dx, dy);
        let color = choose_color(rng, task.branch_type);

        self.buffer
            .write(WindowType::Tree, task.y, task.x as i32, &glyph, Some(color));
        self.buffer.export()?;

        Ok(())
    }
}

fn roll<R: Rng>(rng: &mut R, sides: i32) -> i32 {
    rng.gen_range(0..sides)
}

/// Movement delta for one growth step of the given branch type.
pub(crate) fn set_deltas<R: Rng>(
    rng: &mut R,
    branch_type: BranchType,
    life: i32,
    age: i32,
    multiplier: i32,
) -> (i32, i32) {
    match branch_type {
        BranchType::Trunk => {
            // new or dying trunk drifts sideways only
            if age <= 2 || life < 4 {
                (rng.gen_range(0..3) - 1, 0)
            // young trunk grows wide
            } else if age < multiplier * 3 {
                let dy = if age % (multiplier / 2).max(1) == 0 { -1 } else { 0 };
                let dx = match roll(rng, 10) {
                    0 => -2,
                    1..=3 => -1,
                    4..=5 => 0,
                    6..=8 => 1,
                    _ => 2,
                };
                (dx, dy)
            // middle-aged trunk climbs
            } else {
                let dy = if roll(rng, 10) > 1 { -1 } else { 0 };
                (rng.gen_range(0..3) - 1, dy)
            }
        }
        BranchType::ShootLeft => {
            let dy = match roll(rng, 10) {
                0..=1 => -1,
                2..=7 => 0,
                _ => 1,
            };
            let dx = match roll(rng, 10) {
                0..=1 => -2,
                2..=5 => -1,
                6..=8 => 0,
                _ => 1,
            };
            (dx, dy)
        }
        BranchType::ShootRight => {
            let dy = match roll(rng, 10) {
                0..=1 => -1,
                2..=7 => 0,
                _ => 1,
            };
            let dx = match roll(rng, 10) {
                0..=1 => 2,
                2..=5 => 1,
                6..=8 => 0,
                _ => -1,
            };
            (dx, dy)
        }
        BranchType::Dying => {
            let dy = match roll(rng, 10) {
                0..=1 => -1,
                2..=8 => 0,
                _ => 1,
            };
            let dx = match roll(rng, 15) {
                0 => -3,
                1..=2 => -2,
                3..=5 => -1,
                6..=8 => 0,
                9..=11 => 1,
                12..=13 => 2,
                _ => 3,
            };
            (dx, dy)
        }
        BranchType::Dead => {
            let dy = match roll(rng, 10) {
                0..=2 => -1,
                3..=6 => 0,
                _ => 1,
            };
            (rng.gen_range(0..3) - 1, dy)
        }
    }
}

/// Glyph string for one step. A branch renders as dying once its remaining
/// life drops below 4, whatever its nominal type.
pub(crate) fn choose_string<R: Rng>(
    conf: &BonsaiConfig,
    rng: &mut R,
    branch_type: BranchType,
    life: i32,
    dx: i32,
    dy: i32,
) -> String {
    let effective = if life < 4 { BranchType::Dying } else { branch_type };

    let pattern = match effective {
        BranchType::Trunk => {
            if dy == 0 {
                "/~"
            } else if dx < 0 {
                "\\|"
            } else if dx == 0 {
                "/|\\"
            } else {
                "|/"
            }
        }
        BranchType::ShootLeft => {
            if dy > 0 {
                "\\"
            } else if dy == 0 {
                "\\_"
            } else if dx < 0 {
                "\\|"
            } else if dx == 0 {
                "/|"
            } else {
                "/"
            }
        }
        BranchType::ShootRight => {
            if dy > 0 {
                "/"
            } else if dy == 0 {
                "_/"
            } else if dx < 0 {
                "\\|"
            } else if dx == 0 {
                "/|"
            } else {
                "/"
            }
        }
        BranchType::Dying | BranchType::Dead => {
            // leaves is validated non-empty before growth starts
            let index = rng.gen_range(0..conf.leaves.len());
            return conf.leaves[index].clone();
        }
    };

    pattern.to_string()
}

/// Color for one step's glyph. The reference splits dying/dead into a
/// bold/normal roll whose arms pick the same color; the roll is kept, the
/// distinction stays a no-op.
pub(crate) fn choose_color<R: Rng>(rng: &mut R, branch_type: BranchType) -> ColorType {
    match branch_type {
        BranchType::Trunk | BranchType::ShootLeft | BranchType::ShootRight => {
            if rng.gen_range(0..2) == 0 {
                ColorType::Yellow
            } else {
                ColorType::Brown
            }
        }
        BranchType::Dying => {
            let _ = rng.gen_range(0..10);
            ColorType::BrightGreen
        }
        BranchType::Dead => {
            let _ = rng.gen_range(0..3);
            ColorType::Green
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn conf() -> BonsaiConfig {
        BonsaiConfig::default()
    }

    #[test]
    fn deltas_stay_in_documented_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let cases = [
            (BranchType::Trunk, -2..=2, -1..=0),
            (BranchType::ShootLeft, -2..=1, -1..=1),
            (BranchType::ShootRight, -1..=2, -1..=1),
            (BranchType::Dying, -3..=3, -1..=1),
            (BranchType::Dead, -1..=1, -1..=1),
        ];
        for (branch_type, dx_range, dy_range) in cases {
            for life in 1..40 {
                let (dx, dy) = set_deltas(&mut rng, branch_type, life, 32 - life, 5);
                assert!(dx_range.contains(&dx), "{branch_type:?} dx {dx}");
                assert!(dy_range.contains(&dy), "{branch_type:?} dy {dy}");
            }
        }
    }

    #[test]
    fn newborn_trunk_moves_sideways_only() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let (dx, dy) = set_deltas(&mut rng, BranchType::Trunk, 31, 1, 5);
            assert_eq!(dy, 0);
            assert!((-1..=1).contains(&dx));
        }
    }

    #[test]
    fn low_life_branch_renders_as_dying_leaf() {
        let mut rng = StdRng::seed_from_u64(1);
        let glyph = choose_string(&conf(), &mut rng, BranchType::Trunk, 3, 1, -1);
        assert_eq!(glyph, "&");
    }

    #[test]
    fn trunk_glyph_table() {
        let mut rng = StdRng::seed_from_u64(1);
        let c = conf();
        assert_eq!(choose_string(&c, &mut rng, BranchType::Trunk, 20, 1, 0), "/~");
        assert_eq!(choose_string(&c, &mut rng, BranchType::Trunk, 20, -1, -1), "\\|");
        assert_eq!(choose_string(&c, &mut rng, BranchType::Trunk, 20, 0, -1), "/|\\");
        assert_eq!(choose_string(&c, &mut rng, BranchType::Trunk, 20, 1, -1), "|/");
    }

    #[test]
    fn shoot_glyph_table() {
        let mut rng = StdRng::seed_from_u64(1);
        let c = conf();
        assert_eq!(choose_string(&c, &mut rng, BranchType::ShootLeft, 20, 0, 1), "\\");
        assert_eq!(choose_string(&c, &mut rng, BranchType::ShootLeft, 20, -2, 0), "\\_");
        assert_eq!(choose_string(&c, &mut rng, BranchType::ShootRight, 20, 2, 0), "_/");
        assert_eq!(choose_string(&c, &mut rng, BranchType::ShootRight, 20, 0, -1), "/|");
    }

    #[test]
    fn bark_alternates_between_two_colors() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..50 {
            seen.insert(choose_color(&mut rng, BranchType::Trunk));
        }
        assert_eq!(
            seen,
            [ColorType::Yellow, ColorType::Brown].into_iter().collect()
        );
    }

    #[test]
    fn foliage_colors_are_fixed_per_type() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            assert_eq!(choose_color(&mut rng, BranchType::Dying), ColorType::BrightGreen);
            assert_eq!(choose_color(&mut rng, BranchType::Dead), ColorType::Green);
        }
    }
}
