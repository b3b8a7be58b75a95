use regex::Regex;

/// Default pattern for numeric tokens: optional sign, digits and dots.
///
/// The pattern is deliberately permissive; it will happily tokenize things
/// like `1.2.3` or `10.0.0.1` as single tokens that later fail float
/// conversion.  That matches the traditional behavior of this tool.
pub const DEFAULT_TOKEN_PATTERN: &str = "[+-]?[0-9.]+";

/// Where the X value of a record comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XSource {
    /// Use the count of previously accepted records as X.
    RowIndex,
    /// Use the numeric token at this position as X.
    Column(usize),
}

impl XSource {
    /// Maps the command line convention (negative means "no X column in the
    /// input, use the record index") to an explicit source.
    pub fn from_signed(n: i64) -> Self {
        if n < 0 {
            Self::RowIndex
        } else {
            Self::Column(n as usize)
        }
    }
}

/// One Y column to extract: a token position plus an optional display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub index: usize,
    pub name: Option<String>,
}

impl ColumnSpec {
    /// Parses a `N` or `NAME=N` argument.
    pub fn parse(spec: &str) -> Result<Self, String> {
        let (name, index) = match spec.split_once('=') {
            Some((name, index)) => {
                if name.is_empty() {
                    return Err(format!("Empty column name in '{}'", spec));
                }
                (Some(String::from(name)), index)
            }
            None => (None, spec),
        };
        match index.parse::<usize>() {
            Ok(index) => Ok(Self { index, name }),
            Err(_) => Err(format!("'{}' is not a valid column index", index)),
        }
    }

    /// Label for the series of this column within `file`.
    ///
    /// Unnamed columns use the bare file name, unless several Y columns are
    /// plotted (labels would collide); then the column index is appended.
    pub fn label(&self, file: &str, multi: bool) -> String {
        match (&self.name, multi) {
            (Some(name), _) => format!("{}/{}", file, name),
            (None, true) => format!("{}/{}", file, self.index),
            (None, false) => String::from(file),
        }
    }
}

/// Immutable run configuration, built and validated once at startup.
#[derive(Debug)]
pub struct Config {
    pub files: Vec<String>,
    pub outfile: String,
    pub x_source: XSource,
    pub y_specs: Vec<ColumnSpec>,
    pub colors: String,
    pub shapes: String,
    pub add_style: String,
    pub filter: Option<Regex>,
    pub token_regex: Regex,
    pub x_log: bool,
    pub x_divisor: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub y_log: bool,
    pub sort: bool,
    pub histogram_bin: f64,
    pub bars: bool,
    pub alpha: f64,
    pub legend: String,
    pub fig_width: f64,
    pub fig_height: f64,
    pub print_high: f64,
    pub print_stats: bool,
    pub verbose: u64,
}
