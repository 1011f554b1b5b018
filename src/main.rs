use triplecover::budget::select_budget;
use triplecover::cover::{Mode, run};
use triplecover::sampled::FastConfig;

fn main() {
    let mut pool: Vec<u32> = Vec::new();
    let mut k: usize = 6;
    let mut mode = String::from("classic");
    let mut fast_cfg = FastConfig::default();
    let mut budget: Option<f64> = None;
    let mut ticket_cost: f64 = 1.0;

    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--pool" => {
                let v = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                pool = v
                    .split(',')
                    .map(|s| s.trim().parse().unwrap_or_else(|_| usage_and_exit(2)))
                    .collect();
                i += 2;
            }
            "--k" => {
                let v = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                k = v.parse().unwrap_or_else(|_| usage_and_exit(2));
                i += 2;
            }
            "--mode" => {
                let v = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                mode = v.clone();
                i += 2;
            }
            "--attempts" => {
                let v = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                fast_cfg.attempts = v.parse().unwrap_or_else(|_| usage_and_exit(2));
                i += 2;
            }
            "--sample-size" => {
                let v = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                fast_cfg.sample_size = v.parse().unwrap_or_else(|_| usage_and_exit(2));
                i += 2;
            }
            "--seed" => {
                let v = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                fast_cfg.seed = Some(v.parse().unwrap_or_else(|_| usage_and_exit(2)));
                i += 2;
            }
            "--budget" => {
                let v = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                budget = Some(v.parse().unwrap_or_else(|_| usage_and_exit(2)));
                i += 2;
            }
            "--ticket-cost" => {
                let v = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                ticket_cost = v.parse().unwrap_or_else(|_| usage_and_exit(2));
                i += 2;
            }
            "--help" | "-h" => usage_and_exit(0),
            _ => usage_and_exit(2),
        }
    }

    if pool.is_empty() {
        eprintln!("error: --pool is required");
        usage_and_exit(2);
    }

    let system = if let Some(budget) = budget {
        match select_budget(&pool, k, budget, ticket_cost, None) {
            Ok(sys) => sys,
            Err(e) => {
                eprintln!("budget error: {e}");
                std::process::exit(1);
            }
        }
    } else {
        let mode = match mode.as_str() {
            "classic" => Mode::Classic,
            "fast" => Mode::Fast(fast_cfg),
            "hybrid" => Mode::Hybrid,
            other => {
                eprintln!("unknown mode: {other}");
                usage_and_exit(2)
            }
        };
        run(&pool, k, mode)
    };

    match serde_json::to_string_pretty(&system) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("failed to serialize result: {e}");
            std::process::exit(1);
        }
    }
}

fn usage_and_exit(code: i32) -> ! {
    eprintln!(
        "Usage:\n  triplecover --pool 1,2,3,... [--k K] [--mode classic|fast|hybrid]\n  triplecover --pool 1,2,3,... [--k K] --budget B [--ticket-cost C]\n\nOptions:\n  --pool N1,N2,...   Base numbers (required)\n  --k K              Ticket size (default: 6)\n  --mode MODE        classic | fast | hybrid (default: classic)\n  --attempts N       Fast mode restarts (default: 5)\n  --sample-size N    Fast mode sample size (default: 2000)\n  --seed SEED        Deterministic base seed for fast mode (optional)\n  --budget B         Select by money instead of covering\n  --ticket-cost C    Cost per ticket for --budget (default: 1)\n"
    );
    std::process::exit(code)
}
