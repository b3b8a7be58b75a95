use clap::{Arg, ArgMatches, Command};
use regex::Regex;
use yansi::Color::Red;

use dataplot::config::{ColumnSpec, Config, XSource, DEFAULT_TOKEN_PATTERN};

fn add_column_args(app: Command) -> Command {
    app.arg(
        Arg::new("xcol")
            .long("xcol")
            .short('x')
            .help("X column. Use -1 for 'index' (if no X column is present in file)")
            .allow_hyphen_values(true)
            .default_value("-1")
            .takes_value(true),
    )
    .arg(
        Arg::new("ycol")
            .long("ycol")
            .short('y')
            .help("Y column, as N or NAME=N. Repeat for several Y columns")
            .multiple_occurrences(true)
            .default_value("1")
            .takes_value(true),
    )
    .arg(
        Arg::new("xdiv")
            .long("xdiv")
            .help("Divide X values by N (float)")
            .allow_hyphen_values(true)
            .default_value("1.0")
            .takes_value(true),
    )
}

fn add_match_args(app: Command) -> Command {
    app.arg(
        Arg::new("filter")
            .long("filter")
            .short('f')
            .help("Only use lines which match regex RE")
            .takes_value(true),
    )
    .arg(
        Arg::new("token-regex")
            .long("token-regex")
            .help("Regex used to extract numeric tokens from a line")
            .default_value(DEFAULT_TOKEN_PATTERN)
            .takes_value(true),
    )
}

fn add_style_args(app: Command) -> Command {
    app.arg(
        Arg::new("colors")
            .long("colors")
            .short('c')
            .help("Set colors. One character per graph. Try rbyg")
            .default_value("rbyg")
            .takes_value(true),
    )
    .arg(
        Arg::new("shapes")
            .long("shapes")
            .short('s')
            .help("Set dot shapes (try oO.,+x)")
            .default_value("o")
            .takes_value(true),
    )
    .arg(
        Arg::new("addstyle")
            .long("addstyle")
            .short('a')
            .help("Add additional style to all graphs (use -a - to add lines)")
            .allow_hyphen_values(true)
            .default_value("")
            .takes_value(true),
    )
    .arg(
        Arg::new("bars")
            .long("bars")
            .help("Draw bars instead of dots"),
    )
    .arg(
        Arg::new("alpha")
            .long("alpha")
            .help("Transparency level for bars (float, 1.0 is opaque)")
            .default_value("1.0")
            .takes_value(true),
    )
    .arg(
        Arg::new("legend")
            .long("legend")
            .help("Set legend position (default \"upper left\")")
            .default_value("upper left")
            .takes_value(true),
    )
}

fn add_axis_args(app: Command) -> Command {
    app.arg(
        Arg::new("xlog")
            .long("xlog")
            .help("Use logscale for X"),
    )
    .arg(
        Arg::new("ylog")
            .long("ylog")
            .help("Use logscale for Y"),
    )
    .arg(
        Arg::new("ymin")
            .long("ymin")
            .help("Set Y range to MIN (float)")
            .allow_hyphen_values(true)
            .default_value("0")
            .takes_value(true),
    )
    .arg(
        Arg::new("ymax")
            .long("ymax")
            .help("Set Y range to MAX (float)")
            .allow_hyphen_values(true)
            .default_value("0")
            .takes_value(true),
    )
}

fn add_transform_args(app: Command) -> Command {
    app.arg(
        Arg::new("sort")
            .long("sort")
            .help("Sort Y values. Only makes sense without an X column"),
    )
    .arg(
        Arg::new("hist")
            .long("hist")
            .help("Bucket Y values into bins of width N (0 disables)")
            .allow_hyphen_values(true)
            .default_value("0")
            .takes_value(true),
    )
}

fn add_output_args(app: Command) -> Command {
    app.arg(
        Arg::new("outfile")
            .long("outfile")
            .short('o')
            .help("Output image. PNG, JPG, SVG and others are supported")
            .default_value("out.png")
            .takes_value(true),
    )
    .arg(
        Arg::new("fig-width")
            .long("fig-width")
            .help("Width of output image in inch at 100 dpi")
            .default_value("15")
            .takes_value(true),
    )
    .arg(
        Arg::new("fig-height")
            .long("fig-height")
            .help("Height of output image in inch at 100 dpi")
            .default_value("5")
            .takes_value(true),
    )
    .arg(
        Arg::new("print-high")
            .long("print-high")
            .help("Print lines with Y values higher than N")
            .allow_hyphen_values(true)
            .default_value("0")
            .takes_value(true),
    )
    .arg(
        Arg::new("print-stats")
            .long("print-stats")
            .help("Print sum and average of all Y values"),
    )
}

pub fn get_app() -> Command<'static> {
    let app = Command::new("dataplot")
        .version(clap::crate_version!())
        .about(clap::crate_description!())
        .term_width(100)
        .arg(
            Arg::new("files")
                .help("Files to process")
                .required(true)
                .multiple_values(true),
        )
        .arg(
            Arg::new("color")
                .long("color")
                .help("Use colors in the terminal output")
                .possible_values(["auto", "no", "yes"])
                .default_value("auto")
                .takes_value(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Be more verbose")
                .multiple_occurrences(true)
                .takes_value(false),
        );
    add_output_args(add_transform_args(add_axis_args(add_style_args(
        add_match_args(add_column_args(app)),
    ))))
}

/// Builds the run configuration, exiting with an error on malformed options.
pub fn config_from(matches: &ArgMatches) -> Config {
    let filter = matches.value_of("filter").map(|pattern| compile(pattern));
    let token_regex = compile(matches.value_of("token-regex").unwrap());
    let y_specs = matches
        .values_of("ycol")
        .unwrap()
        .map(|spec| match ColumnSpec::parse(spec) {
            Ok(spec) => spec,
            Err(error) => {
                eprintln!("[{}] {}", Red.paint("ERROR"), error);
                std::process::exit(1);
            }
        })
        .collect();
    let histogram_bin = matches.value_of_t_or_exit::<f64>("hist");
    if histogram_bin < 0.0 {
        eprintln!(
            "[{}] Histogram bin width must not be negative",
            Red.paint("ERROR")
        );
        std::process::exit(1);
    }
    Config {
        files: matches.values_of("files").unwrap().map(String::from).collect(),
        outfile: String::from(matches.value_of("outfile").unwrap()),
        x_source: XSource::from_signed(matches.value_of_t_or_exit::<i64>("xcol")),
        y_specs,
        colors: String::from(matches.value_of("colors").unwrap()),
        shapes: String::from(matches.value_of("shapes").unwrap()),
        add_style: String::from(matches.value_of("addstyle").unwrap()),
        filter,
        token_regex,
        x_log: matches.is_present("xlog"),
        x_divisor: matches.value_of_t_or_exit::<f64>("xdiv"),
        y_min: matches.value_of_t_or_exit::<f64>("ymin"),
        y_max: matches.value_of_t_or_exit::<f64>("ymax"),
        y_log: matches.is_present("ylog"),
        sort: matches.is_present("sort"),
        histogram_bin,
        bars: matches.is_present("bars"),
        alpha: matches.value_of_t_or_exit::<f64>("alpha"),
        legend: String::from(matches.value_of("legend").unwrap()),
        fig_width: matches.value_of_t_or_exit::<f64>("fig-width"),
        fig_height: matches.value_of_t_or_exit::<f64>("fig-height"),
        print_high: matches.value_of_t_or_exit::<f64>("print-high"),
        print_stats: matches.is_present("print-stats"),
        verbose: matches.occurrences_of("verbose"),
    }
}

fn compile(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(error) => {
            eprintln!(
                "[{}] Failed to parse regex {}: {}",
                Red.paint("ERROR"),
                pattern,
                error
            );
            std::process::exit(1);
        }
    }
}
