use std::{path::PathBuf, str::FromStr};

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use fonviz_db::Attribute;

#[derive(Parser, Debug)]
#[command(author, version, about = "Query and chart fund prices", long_about = None)]
pub(crate) struct Cli {
    /// Yaml config with DB_FILE, OLDEST, server_hostname and server_port
    #[arg(short, long, default_value = "config.yaml", global = true)]
    pub(crate) config: PathBuf,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Serve `POST /get_prices`
    Serve,
    /// Draw a price chart for the selected funds
    Plot {
        #[command(flatten)]
        selection: Selection,
        /// Exclusive lower date bound, defaults to the day before OLDEST
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Exclusive upper date bound, defaults to tomorrow
        #[arg(long)]
        end: Option<NaiveDate>,
        /// Rescale every fund so its first price is 1.0
        #[arg(short, long)]
        normalize: bool,
        /// Output file, `.png` or `.svg`
        #[arg(short, long, default_value = "prices.svg")]
        output: PathBuf,
        #[arg(long)]
        title: Option<String>,
    },
    /// Price change of the selected funds over the last days
    Change {
        #[command(flatten)]
        selection: Selection,
        #[arg(short, long, default_value_t = 10)]
        days: u32,
    },
    /// Find funds whose title contains a keyword
    Search { keyword: String },
    /// List funds by an asset attribute threshold
    Filter {
        #[arg(long, value_name = "ATTRIBUTE=VALUE")]
        above: Option<Threshold>,
        #[arg(long, value_name = "ATTRIBUTE=VALUE")]
        below: Option<Threshold>,
    },
    /// Print every stored price of a fund
    Prices {
        code: String,
        /// Only the prices, one per line
        #[arg(long)]
        raw: bool,
    },
}

/// Which funds a command works on. All given selectors are combined.
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct Selection {
    /// Fund codes
    pub(crate) codes: Vec<String>,
    /// Funds with an attribute above a value, e.g. `stock=90`
    #[arg(long, value_name = "ATTRIBUTE=VALUE")]
    pub(crate) above: Option<Threshold>,
    /// Funds with an attribute below a value, e.g. `stock=10`
    #[arg(long, value_name = "ATTRIBUTE=VALUE")]
    pub(crate) below: Option<Threshold>,
    /// Funds whose title contains this keyword
    #[arg(short, long)]
    pub(crate) keyword: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Threshold {
    pub(crate) attribute: Attribute,
    pub(crate) value: f64,
}

impl FromStr for Threshold {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (attribute, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected ATTRIBUTE=VALUE, got {s:?}"))?;
        let attribute = attribute.parse::<Attribute>().map_err(|e| {
            let known: Vec<_> = Attribute::ALL.iter().map(|a| a.column()).collect();
            format!("{e}, expected one of {}", known.join(", "))
        })?;
        let value = value
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("bad threshold {value:?}: {e}"))?;
        if !value.is_finite() {
            return Err(format!("bad threshold {value}"));
        }
        Ok(Threshold { attribute, value })
    }
}

#[cfg(test)]
mod test {
    use clap::Parser;
    use fonviz_db::Attribute;

    use super::{Cli, Command, Threshold};

    #[test]
    fn parse_threshold() {
        assert_eq!(
            "stock=90".parse::<Threshold>().unwrap(),
            Threshold {
                attribute: Attribute::Stock,
                value: 90.0
            }
        );
        assert!("stock".parse::<Threshold>().is_err());
        assert!("price=1".parse::<Threshold>().is_err());
        assert!("stock=lots".parse::<Threshold>().is_err());
        assert!("stock=NaN".parse::<Threshold>().is_err());
    }

    #[test]
    fn parse_plot_command() {
        let cli = Cli::parse_from([
            "fonviz",
            "--config",
            "/etc/fonviz.yaml",
            "plot",
            "MAC",
            "ZDZ",
            "--above",
            "stock=90",
            "--start",
            "2022-10-01",
            "-n",
            "-o",
            "out.png",
        ]);
        assert_eq!(cli.config.to_str(), Some("/etc/fonviz.yaml"));
        let Command::Plot {
            selection,
            start,
            end,
            normalize,
            output,
            ..
        } = cli.command
        else {
            panic!("expected plot");
        };
        assert_eq!(selection.codes, ["MAC", "ZDZ"]);
        assert_eq!(selection.above.unwrap().attribute, Attribute::Stock);
        assert_eq!(start.unwrap().to_string(), "2022-10-01");
        assert!(end.is_none());
        assert!(normalize);
        assert_eq!(output.to_str(), Some("out.png"));
    }
}
