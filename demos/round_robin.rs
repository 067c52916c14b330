//! Round-robin tournament scheduling.
//!
//! `N` teams play over `M` days. On each day every team either plays exactly
//! one match or has a bye, and every pair of teams meets exactly once over the
//! whole tournament.
//!
//! Run with:
//! ```bash
//! cargo run --example round_robin -- --teams 4 --days 3 --strategy greedy
//! ```

use std::time::Instant;

use clap::Parser;
use log::info;

use choice_bdd::aggregate::Strategy;
use choice_bdd::bdd::{Bdd, BddConfig};
use choice_bdd::reference::Ref;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Number of teams.
    #[arg(long, value_name = "INT", default_value_t = 2, value_parser = clap::value_parser!(u8).range(2..=26))]
    teams: u8,

    /// Number of days.
    #[arg(long, value_name = "INT", default_value_t = 3)]
    days: usize,

    /// Aggregation strategy: ordered, greedy or tree.
    #[arg(long, value_name = "STRATEGY", default_value = "greedy")]
    strategy: Strategy,

    /// Abort once the store holds more than this many nodes.
    #[arg(long, value_name = "INT")]
    node_limit: Option<usize>,

    /// Write the resulting diagram in DOT format to this file.
    #[arg(long, value_name = "FILE")]
    dot: Option<std::path::PathBuf>,
}

fn team(i: usize) -> char {
    (b'a' + i as u8) as char
}

/// Variables of one day, in rank order: the matches of each team followed by its bye.
struct Day {
    matches: Vec<((usize, usize), Ref)>,
    byes: Vec<Ref>,
}

fn make_variables(bdd: &Bdd, teams: usize, days: usize) -> color_eyre::Result<Vec<Day>> {
    let mut schedule = Vec::with_capacity(days);
    for d in 0..days {
        let mut day = Day {
            matches: Vec::new(),
            byes: Vec::new(),
        };
        for i in 0..teams {
            for j in i + 1..teams {
                let name = format!("{}{}{}", team(i), team(j), d);
                day.matches.push(((i, j), bdd.new_variable(&name)?));
            }
            let name = format!("{}B{}", team(i), d);
            day.byes.push(bdd.new_variable(&name)?);
        }
        schedule.push(day);
    }
    Ok(schedule)
}

fn make_constraints(bdd: &Bdd, teams: usize, schedule: &[Day]) -> color_eyre::Result<Vec<Ref>> {
    let mut constraints = Vec::new();

    // Each team plays one match or has a bye, every day.
    for day in schedule {
        for t in 0..teams {
            let mut components: Vec<Ref> = day
                .matches
                .iter()
                .filter(|((i, j), _)| *i == t || *j == t)
                .map(|(_, var)| *var)
                .collect();
            components.push(day.byes[t]);
            constraints.push(bdd.exactly(1, &components)?);
        }
    }

    // Each pair meets exactly once.
    for i in 0..teams {
        for j in i + 1..teams {
            let components: Vec<Ref> = schedule
                .iter()
                .flat_map(|day| day.matches.iter())
                .filter(|(pair, _)| *pair == (i, j))
                .map(|(_, var)| *var)
                .collect();
            constraints.push(bdd.exactly(1, &components)?);
        }
    }

    Ok(constraints)
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = Instant::now();

    let args = Cli::parse();
    println!("args = {:?}", args);

    let mut config = BddConfig::default().with_strategy(args.strategy);
    if let Some(limit) = args.node_limit {
        config = config.with_node_limit(limit);
    }
    let bdd = Bdd::with_config(config);

    let teams = args.teams as usize;
    let schedule = make_variables(&bdd, teams, args.days)?;
    println!("Declared {} variables", bdd.num_vars());

    let constraints = make_constraints(&bdd, teams, &schedule)?;
    println!(
        "Total {} constraints of total size {}",
        constraints.len(),
        bdd.descendants(constraints.iter().copied()).len()
    );
    println!("bdd = {:?}", bdd);

    let time_aggregate = Instant::now();
    let res = bdd.aggregate(&constraints)?;
    info!("Aggregated in {:.3} s", time_aggregate.elapsed().as_secs_f64());
    println!("bdd = {:?}", bdd);
    println!("res of size {}", bdd.size(res));

    for (rank, count) in bdd.nodes_per_rank() {
        let name = bdd.var(rank).map(|v| v.name().to_string()).unwrap_or_default();
        println!("  {:>6} {:<8} {}", rank.to_string(), name, count);
    }

    println!("Solutions: {}", bdd.sat_count(res, bdd.num_vars()));
    match bdd.one_sat(res) {
        Some(path) => {
            let chosen: Vec<String> = path
                .iter()
                .filter(|(_, value)| *value)
                .map(|(var, _)| var.to_string())
                .collect();
            println!("One schedule: {}", chosen.join(" "));
        }
        None => println!("No schedule exists"),
    }

    println!("cache hits: {}", bdd.cache_hits());
    println!("cache misses: {}", bdd.cache_misses());

    if let Some(path) = args.dot {
        let dot = bdd.to_dot(&[res])?;
        std::fs::write(&path, dot)?;
        println!("Wrote DOT to {}", path.display());
    }

    println!("\nDone in {:.3} s", time_total.elapsed().as_secs_f64());
    Ok(())
}
