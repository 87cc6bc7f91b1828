use crate::domain::model::ComparisonMode;
use clap::{Subcommand, ValueEnum};

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Root, destiny and directional numbers plus grid numerals
    Calculate {
        #[arg(long, help = "Date of birth, YYYY-MM-DD")]
        dob: String,
        #[arg(long, default_value = "neutral")]
        gender: String,
    },
    /// Destiny, soul urge and personality numbers of a full name
    Name {
        name: String,
    },
    /// Compatibility between two people
    Compat {
        #[arg(long)]
        dob_a: String,
        #[arg(long, default_value = "neutral")]
        gender_a: String,
        #[arg(long)]
        dob_b: String,
        #[arg(long, default_value = "neutral")]
        gender_b: String,
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
    },
    /// Personal year, month and day for a date (today by default)
    Cycle {
        #[arg(long)]
        dob: String,
        #[arg(long)]
        date: Option<String>,
    },
    /// Lo Shu grid with missing and repeated digits and completed patterns
    Grid {
        #[arg(long)]
        dob: String,
        #[arg(long, default_value = "neutral")]
        gender: String,
    },
    /// Win percentage of a team, or a matchup against another team
    Win {
        #[arg(long)]
        team: String,
        #[arg(long)]
        against: Option<String>,
        #[arg(long, help = "Match date, YYYY-MM-DD (today by default)")]
        date: Option<String>,
    },
    /// Full interpretation report
    Report {
        #[arg(long)]
        dob: String,
        #[arg(long, default_value = "neutral")]
        gender: String,
        #[arg(long)]
        name: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Four,
    Bidirectional,
}

impl From<ModeArg> for ComparisonMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Four => ComparisonMode::Four,
            ModeArg::Bidirectional => ComparisonMode::Bidirectional,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use clap::Parser;

    #[test]
    fn test_parse_calculate() {
        let cli = CliConfig::try_parse_from([
            "numerology-engine",
            "calculate",
            "--dob",
            "1990-10-28",
            "--gender",
            "male",
            "--json",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Command::Calculate { dob, gender } => {
                assert_eq!(dob, "1990-10-28");
                assert_eq!(gender, "male");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_compat_mode() {
        let cli = CliConfig::try_parse_from([
            "numerology-engine",
            "compat",
            "--dob-a",
            "1990-10-28",
            "--dob-b",
            "1985-05-15",
            "--mode",
            "four",
        ])
        .unwrap();
        match cli.command {
            Command::Compat { mode, gender_a, .. } => {
                assert_eq!(mode.map(ComparisonMode::from), Some(ComparisonMode::Four));
                assert_eq!(gender_a, "neutral");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_missing_subcommand_is_rejected() {
        assert!(CliConfig::try_parse_from(["numerology-engine", "--verbose"]).is_err());
    }
}
