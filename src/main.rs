use std::{collections::HashMap, path::PathBuf};

use clap::Command;
use kerntools::filters::FontFilter;

fn main() {
    let command = Command::new("kerntools")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Clean up and transform font kerning")
        .author("Kerntools Developers")
        .arg(
            clap::Arg::new("font_path")
                .help("Path to the input font file")
                .required(true)
                .index(1),
        )
        .arg(
            clap::Arg::new("output")
                .help("Path to the output font file")
                .required(true)
                .index(2),
        )
        .arg(
            clap::Arg::new("verbosity")
                .short('v')
                .long("verbosity")
                .help("Set the level of verbosity")
                .action(clap::ArgAction::Count),
        );

    // Extend with the font filter arguments
    let command = kerntools::filters::filter_group(command);

    let args = command.get_matches();
    env_logger::Builder::new()
        .filter_level(match args.get_count("verbosity") {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        })
        .init();
    let input_name = PathBuf::from(args.get_one::<String>("font_path").expect("required"));
    let output_name = PathBuf::from(args.get_one::<String>("output").expect("required"));
    for name in [&input_name, &output_name] {
        if name.extension().and_then(|e| e.to_str()) != Some("json") {
            log::error!("{} is not a .json font file", name.display());
            std::process::exit(1);
        }
    }

    // Clap stores --foo 1 --bar 2 --foo 3 as "foo": ["1", "3"], "bar": ["2"],
    // losing the order; the raw occurrences of the "filters" group keep it.
    let mut counter = HashMap::new();
    let mut filters: Vec<Box<dyn FontFilter>> = vec![];
    for filter in args.get_raw("filters").into_iter().flatten() {
        let name = filter.to_string_lossy().to_string();
        let count = counter.entry(name.clone()).or_insert(0);
        let value = args
            .get_raw_occurrences(&name)
            .and_then(|mut occurrences| occurrences.nth(*count))
            .map(|values| {
                values
                    .map(|v| v.to_string_lossy().to_string())
                    .collect::<String>()
            })
            .unwrap_or_default();
        *count += 1;
        match kerntools::filters::cli_to_filter(&name, &value) {
            Ok(filter) => filters.push(filter),
            Err(e) => {
                log::error!("--{}: {}", name, e);
                std::process::exit(1);
            }
        }
    }

    log::info!("Loading {}", input_name.display());
    let mut input = match kerntools::load(&input_name) {
        Ok(font) => font,
        Err(e) => {
            log::error!("Failed to load {}: {}", input_name.display(), e);
            std::process::exit(1);
        }
    };
    if !filters.is_empty() {
        log::info!("Applying filters...");
        let before_filters = std::time::Instant::now();
        for filter in filters {
            if let Err(e) = filter.apply(&mut input) {
                log::error!("Failed to apply font filter: {}", e);
                std::process::exit(1);
            }
        }
        log::info!("Applied filters in {:.2?}", before_filters.elapsed());
    }

    log::info!("Saving {}", output_name.display());
    input.save(output_name).expect("Failed to save font");
}
