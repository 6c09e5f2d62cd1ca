//! Life Engine CLI - Run a timed simulation from JSON configuration.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::path::PathBuf;
use std::time::Instant;

use life_engine::{Engine, EngineConfig, GridStats};

#[tokio::main]
async fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json> [generations]", args[0]);
        eprintln!();
        eprintln!("Run a Game of Life simulation from JSON configuration.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Path to engine configuration file");
        eprintln!("  generations  Number of timed generations to run (default: 10)");
        eprintln!();
        eprintln!("Example configuration is generated with --example flag.");
        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_config();
        return;
    }

    let config_path = PathBuf::from(&args[1]);
    let generations: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(10);

    let config = EngineConfig::load(&config_path).unwrap_or_else(|e| {
        eprintln!("Error loading config: {}", e);
        std::process::exit(1);
    });

    let engine = Engine::from_config(&config).unwrap_or_else(|e| {
        eprintln!("Error creating engine: {}", e);
        std::process::exit(1);
    });

    println!("Life Engine Simulation");
    println!("======================");
    println!("Grid: {}x{}", config.rows, config.cols);
    println!("Interval: {} ms", config.interval_ms);
    println!("Generations: {}", generations);
    println!();

    let initial_stats = engine.stats();
    print_stats("Initial state", &initial_stats);
    println!("{}", engine.current_grid());

    let mut updates = engine.subscribe();
    if let Err(e) = engine.resume() {
        eprintln!("Error starting scheduler: {}", e);
        std::process::exit(1);
    }

    println!("Running simulation...");
    let start = Instant::now();
    let report_every = (generations / 10).max(1);

    while engine.generation() < generations {
        if updates.changed().await.is_err() {
            break;
        }
        let snapshot = updates.borrow_and_update().clone();
        if snapshot.generation > 0 && snapshot.generation % report_every == 0 {
            let stats = snapshot.stats();
            println!(
                "  Generation {}/{}: alive={}, density={:.1}%",
                snapshot.generation,
                generations,
                stats.alive,
                stats.density * 100.0
            );
        }
    }
    engine.stop();

    let elapsed = start.elapsed();
    println!();
    print_stats("Final state", &engine.stats());
    println!("{}", engine.current_grid());
    println!(
        "Time: {:.2}s ({} generations)",
        elapsed.as_secs_f32(),
        engine.generation()
    );
}

fn print_stats(label: &str, stats: &GridStats) {
    println!("{}:", label);
    println!("  Alive cells: {}", stats.alive);
    println!("  Dead cells: {}", stats.dead);
    println!("  Density: {:.1}%", stats.density * 100.0);
}

fn print_example_config() {
    let config = EngineConfig::default();

    println!("Example configuration (config.json):");
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing config: {}", e),
    }
}
