//! tsmi-demo: generate a small world and print one frame of it.
//!
//! Usage: `tsmi-demo [seed]`

mod palette;

use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Color as CtColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};
use tsmi_core::{Canvas, Color, Direction, Point, Range};
use tsmi_rl::{Config, Creature, Level, MapGen, TileSet, day_night_factor, render};

use palette::Palette;

const LEVEL_WIDTH: i32 = 120;
const LEVEL_HEIGHT: i32 = 60;

fn to_ct_color(c: Color) -> CtColor {
    CtColor::Rgb {
        r: c.r(),
        g: c.g(),
        b: c.b(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let seed = std::env::args().nth(1).map(|s| s.parse::<u64>()).transpose()?;
    let mut config = Config::new(80, 24)?;
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    let mut tiles = TileSet::new();
    let pal = Palette::register(&mut tiles)?;
    let seed_of = |id| tiles.get(id);

    let mut mg = MapGen::with_level(Level::new(LEVEL_WIDTH, LEVEL_HEIGHT), config.rng());

    // Forest on the west half.
    let forest = Range::new(0, 0, LEVEL_WIDTH / 2, LEVEL_HEIGHT);
    mg.fill_two(forest, seed_of(pal.grass), seed_of(pal.flowers), 15)?;
    mg.scatter_clusters(forest, seed_of(pal.trees), seed_of(pal.bushes), 600, 30)?;
    mg.scatter_avoiding(
        forest,
        seed_of(pal.flowers),
        seed_of(pal.bushes),
        300,
        50,
        seed_of(pal.trees),
    )?;

    // Caves to the north-east.
    let caves = Range::new(LEVEL_WIDTH / 2, 0, LEVEL_WIDTH, LEVEL_HEIGHT / 2);
    mg.fill_two(caves, seed_of(pal.rock), seed_of(pal.stone), 45)?;
    mg.smooth_n(caves, seed_of(pal.rock), seed_of(pal.stone), 4, 5, 4)?;

    // Rooms to the south-east.
    let dungeon = Range::new(LEVEL_WIDTH / 2, LEVEL_HEIGHT / 2, LEVEL_WIDTH, LEVEL_HEIGHT);
    mg.fill(dungeon, seed_of(pal.rock));
    let layout = mg.bsp_dungeon(dungeon, Point::new(8, 6), seed_of(pal.stone), &config)?;

    let mut level = mg.into_level();

    let start = Point::new(LEVEL_WIDTH / 2, LEVEL_HEIGHT / 2);
    let spawn = Range::new(start.x - 10, start.y - 10, start.x + 10, start.y + 10)
        .iter()
        .min_by_key(|&p| {
            let d = p - start;
            (!level.walkable(p), d.x * d.x + d.y * d.y)
        })
        .unwrap_or(start);
    let mut player = Creature::new(
        &config,
        '@',
        spawn,
        Direction::East,
        Color::WHITE,
        Color::BLACK,
        0,
    );
    let camera = player.pos() - config.screen_mid();

    let mut canvas = Canvas::new(config.screen_width, config.screen_height);
    let noon = day_night_factor(0) as f32;
    render(
        &config,
        &mut level,
        &tiles,
        camera,
        &mut player,
        noon,
        true,
        false,
        &mut canvas,
    )?;

    let mut stdout = io::stdout();
    for row in canvas.rows() {
        for cell in row {
            queue!(
                stdout,
                SetForegroundColor(to_ct_color(cell.style.fg)),
                SetBackgroundColor(to_ct_color(cell.style.bg)),
                Print(cell.ch)
            )?;
        }
        queue!(stdout, ResetColor, Print('\n'))?;
    }
    queue!(
        stdout,
        Print(format!(
            "player at {}, {} rooms, {} cells seen\n",
            player.pos(),
            layout.leaves().len(),
            level.iter().filter(|(_, t)| t.seen).count()
        ))
    )?;
    stdout.flush()?;
    Ok(())
}
