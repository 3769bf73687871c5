//! Quarto Arena
//!
//! Plays AI-vs-AI matches from the command line:
//!
//! ```text
//! arena [STRATEGY] [STRATEGY] [--games N] [--custom] [--json]
//! ```
//!
//! Strategies: first, random, normal, hard. Defaults to `normal hard`,
//! one game, standard rules. `--custom` adds a fifth attribute on a 5x5
//! board; `--json` dumps the final position of the last game.

use std::env;
use std::process;
use std::time::Instant;

use quarto_core::{Attribute, Game, GameAi, GameResult, Player};
use quarto_ai::{FirstAi, HardAi, NormalAi, RandomAi};

fn make_ai(name: &str) -> Option<Box<dyn GameAi>> {
    match name {
        "first" => Some(Box::new(FirstAi)),
        "random" => Some(Box::new(RandomAi)),
        "normal" => Some(Box::new(NormalAi)),
        "hard" => Some(Box::new(HardAi::verbose())),
        _ => None,
    }
}

fn render(game: &Game) {
    let n = game.dim();
    for y in 0..n {
        let row: Vec<String> = (0..n)
            .map(|x| match game.piece_at(x, y) {
                Some(p) => format!("{:>2}", p.encoding),
                None => " .".to_string(),
            })
            .collect();
        println!("  {}", row.join(" "));
    }
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let mut names: Vec<String> = Vec::new();
    let mut games: u32 = 1;
    let mut custom = false;
    let mut json = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--games" => {
                i += 1;
                games = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(|| {
                        eprintln!("--games expects a number");
                        process::exit(2);
                    });
            }
            "--custom" => custom = true,
            "--json" => json = true,
            other => names.push(other.to_string()),
        }
        i += 1;
    }
    while names.len() < 2 {
        names.push(if names.is_empty() { "normal".into() } else { "hard".into() });
    }

    println!("Quarto Arena");
    println!("============");
    println!(
        "Players: {} vs {}  ({} game{}, {} rules)",
        names[0],
        names[1],
        games,
        if games == 1 { "" } else { "s" },
        if custom { "custom 5x5" } else { "standard" },
    );
    println!();

    let mut tally = [0u32; 2];
    let mut draws = 0u32;
    let mut last_game: Option<Game> = None;
    let start = Instant::now();

    for g in 0..games {
        let mut game = if custom {
            Game::with_attribute(Attribute::SLASH)
        } else {
            Game::standard()
        };
        let mut ais: Vec<Box<dyn GameAi>> = names
            .iter()
            .map(|n| {
                make_ai(n).unwrap_or_else(|| {
                    eprintln!("Unknown strategy: {} (use first|random|normal|hard)", n);
                    process::exit(2);
                })
            })
            .collect();

        while game.winner() == GameResult::InProgress {
            let idx = game.turn().index();
            let m = ais[idx].gen_move(&mut game);
            game.run_turn(m.x, m.y, m.picked);
        }

        let result = game.winner();
        match result {
            GameResult::Won(Player::One) => tally[0] += 1,
            GameResult::Won(Player::Two) => tally[1] += 1,
            _ => draws += 1,
        }

        println!(
            "Game {}: {:?} after {} moves",
            g + 1,
            result,
            game.history().len()
        );
        render(&game);
        println!();
        last_game = Some(game);
    }

    println!("============");
    println!(
        "{}: {}  {}: {}  draws: {}",
        names[0], tally[0], names[1], tally[1], draws
    );
    println!("Time: {:.2}s", start.elapsed().as_secs_f64());

    if json {
        if let Some(game) = last_game {
            match serde_json::to_string_pretty(&game.snapshot()) {
                Ok(s) => println!("{}", s),
                Err(e) => eprintln!("Failed to serialize final state: {}", e),
            }
        }
    }
}
