// Copyright 2020 TwoCookingMice

use drrcast::core::computation_node::ComputationNode;
use drrcast::core::config_loader::load_config;
use drrcast::math::constants::{Float, Vector3f};

use std::env;

struct Options {
    query: Vector3f,
    use_index: bool,
    threshold: Option<Float>,
    focal_point: Option<Vector3f>,
}

fn parse_vec3_arg(value: &str) -> Option<Vector3f> {
    let parts: Vec<Float> = value
        .split(',')
        .map(|s| s.trim().parse::<Float>())
        .collect::<Result<Vec<Float>, _>>()
        .ok()?;
    if parts.len() == 3 {
        Some(Vector3f::new(parts[0], parts[1], parts[2]))
    } else {
        None
    }
}

// Arguments after the config path: `<x> <y> <z> [--index] [--threshold T] [--focal x,y,z]`.
fn parse_options(args: &[String]) -> Result<Options, String> {
    if args.len() < 3 {
        return Err("expected three query coordinates".to_string());
    }

    let mut coords = [0.0 as Float; 3];
    for (slot, raw) in coords.iter_mut().zip(&args[0..3]) {
        *slot = raw.parse::<Float>().map_err(|_| format!("invalid coordinate: {}", raw))?;
    }

    let mut options = Options {
        query: Vector3f::new(coords[0], coords[1], coords[2]),
        use_index: false,
        threshold: None,
        focal_point: None,
    };

    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "--index" => options.use_index = true,
            "--threshold" => {
                i += 1;
                let raw = args.get(i).ok_or("--threshold needs a value")?;
                let threshold = raw.parse::<Float>().map_err(|_| format!("invalid threshold: {}", raw))?;
                options.threshold = Some(threshold);
            }
            "--focal" => {
                i += 1;
                let raw = args.get(i).ok_or("--focal needs a value")?;
                let focal = parse_vec3_arg(raw).ok_or_else(|| format!("invalid focal point: {}", raw))?;
                options.focal_point = Some(focal);
            }
            other => log::warn!("Ignoring unknown argument '{}'.", other),
        }
        i += 1;
    }

    Ok(options)
}

fn main() {
    env::set_var("RUST_LOG", "info");
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 5 {
        eprintln!("Usage: {} <config.xml> <x> <y> <z> [--index] [--threshold T] [--focal x,y,z]", args[0]);
        std::process::exit(1);
    }

    let config_path = &args[1];
    let options = match parse_options(&args[2..]) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    let query = options.query;

    let load_result = match load_config(config_path) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    let mut interpolator = load_result.interpolator;
    if let Some(threshold) = options.threshold {
        interpolator.set_threshold(threshold);
    }
    if let Some(focal) = options.focal_point {
        interpolator.set_focal_point(focal);
    }
    log::info!("{}", interpolator.describe());

    let result = if options.use_index {
        interpolator.trace_at_continuous_index(&query)
    } else {
        interpolator.trace(&query)
    };

    match result {
        Ok(integral) => println!(
            "{} ({:.4}, {:.4}, {:.4}) -> {:.6} [axis {}, {} planes, {} accepted, {} skipped]",
            if options.use_index { "index" } else { "point" },
            query.x, query.y, query.z, integral.value,
            integral.axis, integral.planes, integral.accepted, integral.skipped
        ),
        Err(e) => {
            eprintln!("evaluation failed: {}", e);
            std::process::exit(2);
        }
    }
}
