use std::env;

#[macro_use]
extern crate log;

use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};
use yansi::Paint;

mod app;

use dataplot::config::Config;
use dataplot::read::{self, ExtractorBuilder};
use dataplot::render::{self, RenderOptions};
use dataplot::series::Series;
use dataplot::stats::Totals;

fn disable_color_if_needed(option: &str) {
    match option {
        "no" => Paint::disable(),
        "auto" => match env::var("TERM") {
            Ok(value) if value == "dumb" => Paint::disable(),
            _ => {
                if !atty::is(atty::Stream::Stdout) {
                    Paint::disable();
                }
            }
        },
        _ => (),
    }
}

fn init_logger(verbose: u64) {
    let filter = if verbose > 1 {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let _ = TermLogger::init(
        filter,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

fn get_extractor(config: &Config) -> dataplot::read::Extractor {
    let mut builder = ExtractorBuilder::default();
    builder
        .token_regex(config.token_regex.clone())
        .x_source(config.x_source)
        .x_divisor(config.x_divisor)
        .y_specs(config.y_specs.clone())
        .print_high(config.print_high)
        .verbose(config.verbose);
    if let Some(regex) = &config.filter {
        builder.filter(regex.clone());
    }
    builder.build().unwrap()
}

/// Applies the post-processing transform to one series.  Histogram binning
/// wins over sorting; sorting a pool that is about to be bucketed would not
/// change the bins anyway.
fn transform(series: Series, config: &Config) -> Series {
    if config.histogram_bin > 0.0 {
        series.histogram(config.histogram_bin)
    } else if config.sort {
        let mut series = series;
        series.sort_y();
        series
    } else {
        series
    }
}

fn run(config: &Config) {
    let extractor = get_extractor(config);
    let mut totals = Totals::default();
    let mut all: Vec<Series> = Vec::new();
    for file in &config.files {
        let lines = read::read_lines(file);
        match extractor.read_series(file, &lines, &mut totals) {
            Ok(series) => all.extend(series),
            Err(error) => {
                error!("Bad numeric data in {}: {}", file, error);
                std::process::exit(1);
            }
        }
    }
    let all: Vec<Series> = all
        .into_iter()
        .map(|series| transform(series, config))
        .collect();
    if config.print_stats {
        if totals.records == 0 {
            error!("No records accepted: cannot compute average");
            std::process::exit(1);
        }
        println!("{}", totals);
    }
    if config.verbose > 0 {
        println!("Saving image to '{}'", config.outfile);
    }
    let options = RenderOptions {
        outfile: config.outfile.clone(),
        colors: config.colors.clone(),
        shapes: config.shapes.clone(),
        add_style: config.add_style.clone(),
        x_log: config.x_log,
        y_log: config.y_log,
        y_min: config.y_min,
        y_max: config.y_max,
        legend: config.legend.clone(),
        fig_width: config.fig_width,
        fig_height: config.fig_height,
        bars: config.bars,
        alpha: config.alpha,
    };
    if let Err(error) = render::render(&all, &options) {
        error!("Could not write {}: {}", config.outfile, error);
        std::process::exit(1);
    }
}

fn main() {
    let matches = app::get_app().get_matches();
    if let Some(option) = matches.value_of("color") {
        disable_color_if_needed(option);
    }
    let config = app::config_from(&matches);
    init_logger(config.verbose);
    run(&config);
}
