use std::num::ParseFloatError;

use regex::Regex;

use crate::config::{ColumnSpec, XSource, DEFAULT_TOKEN_PATTERN};
use crate::series::Series;
use crate::stats::Totals;

/// One accepted line, mapped to numeric values.
#[derive(Debug, PartialEq)]
pub struct Record {
    pub x: f64,
    pub ys: Vec<f64>,
}

/// Turns the lines of one file into one series per configured Y column.
///
/// Lines not matching the filter regex are dropped; the remaining ones are
/// scanned for numeric tokens, and the configured columns are picked by
/// position.  Lines with too few tokens are skipped with a notice.  The
/// `Totals` threaded through `read_series` carries the global record index
/// (the fallback X value) and the running Y sum across all files.
#[derive(Debug, Builder)]
pub struct Extractor {
    #[builder(default = "Regex::new(DEFAULT_TOKEN_PATTERN).unwrap()")]
    token_regex: Regex,
    #[builder(setter(strip_option), default)]
    filter: Option<Regex>,
    #[builder(default = "XSource::RowIndex")]
    x_source: XSource,
    #[builder(default = "1.0")]
    x_divisor: f64,
    #[builder(default = "vec![ColumnSpec { index: 1, name: None }]")]
    y_specs: Vec<ColumnSpec>,
    #[builder(default = "0.0")]
    print_high: f64,
    #[builder(default = "0")]
    verbose: u64,
}

impl Default for Extractor {
    fn default() -> Self {
        ExtractorBuilder::default().build().unwrap()
    }
}

impl Extractor {
    /// True if the line passes the filter (search semantics, any match
    /// anywhere in the line).  Without a filter every line passes.
    fn keep(&self, line: &str) -> bool {
        match &self.filter {
            Some(regex) => regex.is_match(line),
            None => true,
        }
    }

    /// All numeric tokens of a line, left to right.
    ///
    /// Tokens are not validated as numbers here; with the default pattern a
    /// string like `10.0.0.1` comes out as a single token and will only fail
    /// later, at float conversion.
    pub fn tokens(&self, line: &str) -> Vec<String> {
        self.token_regex
            .find_iter(line)
            .map(|m| String::from(m.as_str()))
            .collect()
    }

    /// Maps a token list to numeric values.
    ///
    /// Returns `Ok(None)` when the line has too few tokens for the
    /// configured columns (the record is skipped).  A token that does not
    /// parse as a float is an error the caller treats as fatal.  `row` is
    /// the count of previously accepted records, used as X fallback.
    pub fn map_record(&self, tokens: &[String], row: usize) -> Result<Option<Record>, ParseFloatError> {
        if let XSource::Column(index) = self.x_source {
            if index >= tokens.len() {
                return Ok(None);
            }
        }
        if self.y_specs.iter().any(|spec| spec.index >= tokens.len()) {
            return Ok(None);
        }
        let x = match self.x_source {
            XSource::RowIndex => row as f64,
            XSource::Column(index) => tokens[index].parse::<f64>()?,
        } / self.x_divisor;
        let mut ys = Vec::with_capacity(self.y_specs.len());
        for spec in &self.y_specs {
            ys.push(tokens[spec.index].parse::<f64>()?);
        }
        Ok(Some(Record { x, ys }))
    }

    /// Processes the buffered lines of one file into its series.
    ///
    /// Skipped lines are reported on stdout and do not touch `totals`.
    /// Lines with a Y value at or above the print-high threshold are echoed
    /// to stdout verbatim, once per triggering Y column (a duplication quirk
    /// kept for compatibility with the historic behavior).
    pub fn read_series(
        &self,
        path: &str,
        lines: &[String],
        totals: &mut Totals,
    ) -> Result<Vec<Series>, ParseFloatError> {
        let multi = self.y_specs.len() > 1;
        let mut series: Vec<Series> = self
            .y_specs
            .iter()
            .map(|spec| Series::new(spec.label(path, multi)))
            .collect();
        for line in lines.iter().filter(|line| self.keep(line)) {
            let tokens = self.tokens(line);
            if self.verbose > 0 {
                let dump: Vec<String> = tokens
                    .iter()
                    .enumerate()
                    .map(|(i, token)| format!("[{}]={}", i, token))
                    .collect();
                println!("{}", dump.join(" "));
            }
            match self.map_record(&tokens, totals.records)? {
                None => println!("Ignoring short line: '{}'", line.trim()),
                Some(record) => {
                    debug!("Mapped '{}' to x={} ys={:?}", line.trim(), record.x, record.ys);
                    for (column, y) in series.iter_mut().zip(&record.ys) {
                        column.push(record.x, *y);
                        if self.print_high > 0.0 && *y >= self.print_high {
                            println!("{}", line);
                        }
                    }
                    totals.accept(&record.ys);
                }
            }
        }
        Ok(series)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn strings(text: &[&str]) -> Vec<String> {
        text.iter().map(|line| String::from(*line)).collect()
    }

    fn y_columns(specs: &[&str]) -> Vec<ColumnSpec> {
        specs.iter().map(|spec| ColumnSpec::parse(spec).unwrap()).collect()
    }

    #[test]
    fn tokens_in_line_order() {
        let extractor = Extractor::default();
        let tokens = extractor.tokens("time=23.4 ms seq=3 ttl=-64");
        assert_eq!(tokens, ["23.4", "3", "-64"]);
        // Same line, same tokens
        assert_eq!(extractor.tokens("time=23.4 ms seq=3 ttl=-64"), tokens);
    }

    #[test]
    fn tokens_permissive_pattern() {
        let extractor = Extractor::default();
        // The default pattern does not split dotted values; that is the
        // historic (and documented) behavior.
        assert_eq!(extractor.tokens("host 10.0.0.1 v1.2.3"), ["10.0.0.1", "1.2.3"]);
    }

    #[test]
    fn tokens_custom_pattern() {
        let extractor = ExtractorBuilder::default()
            .token_regex(Regex::new("[0-9]+").unwrap())
            .build()
            .unwrap();
        assert_eq!(extractor.tokens("10.0.0.1"), ["10", "0", "0", "1"]);
    }

    #[test]
    fn filter_lines() {
        let extractor = ExtractorBuilder::default()
            .filter(Regex::new("bytes from").unwrap())
            .y_specs(y_columns(&["0"]))
            .build()
            .unwrap();
        let mut totals = Totals::default();
        let series = extractor
            .read_series(
                "ping.log",
                &strings(&["64 bytes from gw: time=1.1", "ping statistics 4 4"]),
                &mut totals,
            )
            .unwrap();
        assert_eq!(series[0].ys, [64.0]);
        assert_eq!(totals.records, 1);
    }

    #[test]
    fn short_lines_are_skipped_entirely() {
        let extractor = ExtractorBuilder::default()
            .y_specs(y_columns(&["2"]))
            .build()
            .unwrap();
        let mut totals = Totals::default();
        let series = extractor
            .read_series("foo", &strings(&["1 2", "no numbers", "1 2 3"]), &mut totals)
            .unwrap();
        assert_eq!(series[0].xs, [0.0]);
        assert_eq!(series[0].ys, [3.0]);
        assert_eq!(totals.records, 1);
        assert_eq!(totals.sum, 3.0);
    }

    #[test]
    fn x_column_out_of_range_rejects() {
        let extractor = ExtractorBuilder::default()
            .x_source(XSource::Column(5))
            .y_specs(y_columns(&["0"]))
            .build()
            .unwrap();
        let tokens = extractor.tokens("1 2 3");
        assert_eq!(extractor.map_record(&tokens, 0).unwrap(), None);
    }

    #[test]
    fn row_index_fallback_spans_files() {
        let extractor = ExtractorBuilder::default()
            .y_specs(y_columns(&["0"]))
            .build()
            .unwrap();
        let mut totals = Totals::default();
        let first = extractor
            .read_series("a", &strings(&["1", "2"]), &mut totals)
            .unwrap();
        let second = extractor
            .read_series("b", &strings(&["3", "skip me", "4"]), &mut totals)
            .unwrap();
        assert_eq!(first[0].xs, [0.0, 1.0]);
        // The index keeps counting accepted records, not lines
        assert_eq!(second[0].xs, [2.0, 3.0]);
        assert_eq!(totals.records, 4);
    }

    #[test]
    fn x_divisor_applies() {
        let extractor = ExtractorBuilder::default()
            .x_source(XSource::Column(0))
            .x_divisor(2.0)
            .y_specs(y_columns(&["1"]))
            .build()
            .unwrap();
        let record = extractor
            .map_record(&strings(&["200", "7"]), 0)
            .unwrap()
            .unwrap();
        assert_eq!(record.x, 100.0);
        assert_eq!(record.ys, [7.0]);
    }

    #[test]
    fn multi_column_labels_and_shared_x() {
        let extractor = ExtractorBuilder::default()
            .y_specs(y_columns(&["a=2", "b=4"]))
            .build()
            .unwrap();
        let mut totals = Totals::default();
        let series = extractor
            .read_series("data.log", &strings(&["10 11 12 13 14"]), &mut totals)
            .unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].label, "data.log/a");
        assert_eq!(series[1].label, "data.log/b");
        assert_eq!(series[0].xs, series[1].xs);
        assert_eq!(series[0].ys, [12.0]);
        assert_eq!(series[1].ys, [14.0]);
        assert_eq!(totals.records, 1);
        assert_eq!(totals.sum, 26.0);
    }

    #[test]
    fn unparseable_token_is_an_error() {
        let extractor = ExtractorBuilder::default()
            .y_specs(y_columns(&["0"]))
            .build()
            .unwrap();
        let tokens = extractor.tokens("10.0.0.1 foo");
        assert!(extractor.map_record(&tokens, 0).is_err());
    }

    #[test]
    fn empty_input_yields_empty_series() {
        let extractor = Extractor::default();
        let mut totals = Totals::default();
        let series = extractor.read_series("foo", &[], &mut totals).unwrap();
        assert_eq!(series.len(), 1);
        assert!(series[0].is_empty());
        assert_eq!(totals.records, 0);
    }
}
