use clap::Parser;
use numerology_engine::config::cli::Command;
use numerology_engine::domain::model::{DateParts, PersonalCycle, WinPercentage};
use numerology_engine::domain::ports::TextCache;
use numerology_engine::domain::services::{
    analyze_grid, assess_compatibility, calculate_name_numbers, calculate_numerology_data,
    matchup, win_percentage, NumeralGrid,
};
use numerology_engine::utils::error::{ErrorSeverity, NumerologyError, Result};
use numerology_engine::utils::{logger, validation::Validate};
use numerology_engine::{
    AppConfig, Catalogs, CliConfig, LocalStorage, MemoryTextCache, NoCache, ReportService,
};
use std::fmt::Write as _;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let app_config = match &cli.config {
        Some(path) => match AppConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => AppConfig::default(),
    };

    // 初始化日誌
    if cli.log_json || app_config.json_logs() {
        let level = if cli.verbose {
            Some("debug")
        } else {
            app_config.log_level()
        };
        logger::init_json_logger(level);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    if let Err(e) = app_config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    match run(&cli, &app_config).await {
        Ok(output) => println!("{}", output),
        Err(e) => {
            tracing::error!(
                "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }
}

async fn load_catalogs(cli: &CliConfig, config: &AppConfig) -> Result<Catalogs> {
    if cli.config.is_none() {
        return Catalogs::builtin();
    }
    let storage = LocalStorage::new(config.data.dir.clone());
    Catalogs::load(&storage, &config.data).await
}

fn today() -> DateParts {
    DateParts::from_chrono(chrono::Local::now().date_naive())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

async fn run(cli: &CliConfig, config: &AppConfig) -> Result<String> {
    let catalogs = load_catalogs(cli, config).await?;

    match &cli.command {
        Command::Calculate { dob, gender } => {
            let result = calculate_numerology_data(dob, gender)?;
            if cli.json {
                return to_json(&result);
            }
            Ok(format!(
                "Root Number: {}\nDestiny Number: {}\nDirectional Number: {}\nGrid Numerals: {:?}",
                result.root_number,
                result.destiny_number,
                result.directional_number,
                result.grid_numerals
            ))
        }
        Command::Name { name } => {
            let profile = calculate_name_numbers(name)?;
            if cli.json {
                return to_json(&profile);
            }
            Ok(format!(
                "Destiny Number: {}\nSoul Urge Number: {}\nPersonality Number: {}",
                profile.destiny_number, profile.soul_urge_number, profile.personality_number
            ))
        }
        Command::Compat {
            dob_a,
            gender_a,
            dob_b,
            gender_b,
            mode,
        } => {
            let a = calculate_numerology_data(dob_a, gender_a)?;
            let b = calculate_numerology_data(dob_b, gender_b)?;
            let mode = mode.map(Into::into).unwrap_or(config.scoring.comparison_mode);
            let report = assess_compatibility(
                &a,
                &b,
                &catalogs.relations,
                mode,
                &config.scoring.thresholds(),
            );
            if cli.json {
                return to_json(&report);
            }

            let mut out = format!(
                "Compatibility: {}% ({})\n",
                report.score, report.verdict
            );
            for comparison in &report.comparisons {
                let _ = writeln!(
                    out,
                    "  {} -> {}: {:?}",
                    comparison.from, comparison.to, comparison.relation
                );
            }
            Ok(out.trim_end().to_string())
        }
        Command::Cycle { dob, date } => {
            let birth = DateParts::parse(dob).map_err(|e| match e {
                NumerologyError::InvalidInput { message, .. } => {
                    NumerologyError::invalid_input("dob", message)
                }
                other => other,
            })?;
            let target = match date {
                Some(raw) => DateParts::parse(raw)?,
                None => today(),
            };
            let cycle = PersonalCycle::for_date(&birth, &target);
            if cli.json {
                return to_json(&cycle);
            }
            Ok(format!(
                "Cycle for {}\nPersonal Year: {}\nPersonal Month: {}\nPersonal Day: {}",
                target, cycle.year, cycle.month, cycle.day
            ))
        }
        Command::Grid { dob, gender } => {
            let result = calculate_numerology_data(dob, gender)?;
            let grid = NumeralGrid::from_numerals(&result.grid_numerals);
            let patterns = analyze_grid(&result.grid_numerals, &catalogs.patterns);
            if cli.json {
                return to_json(&serde_json::json!({
                    "grid": grid,
                    "missingDigits": grid.missing_digits(),
                    "repeatedDigits": grid.repeated_digits(),
                    "patterns": patterns,
                }));
            }

            let mut out = grid.to_string();
            let _ = writeln!(out, "Missing: {:?}", grid.missing_digits());
            let repeated: Vec<String> = grid
                .repeated_digits()
                .iter()
                .map(|(digit, count)| format!("{}x{}", digit, count))
                .collect();
            let _ = writeln!(out, "Repeated: {}", repeated.join(", "));
            for pattern in &patterns {
                let _ = writeln!(out, "{} ({}): {}", pattern.name, pattern.category, pattern.interpretation);
            }
            Ok(out.trim_end().to_string())
        }
        Command::Win {
            team,
            against,
            date,
        } => {
            let match_date = date.clone().unwrap_or_else(|| today().to_string());
            let weights = config.scoring.weights();
            let results = match against {
                Some(other) => {
                    let (home, away) = matchup(
                        &catalogs.teams,
                        team,
                        other,
                        &match_date,
                        &catalogs.relations,
                        &weights,
                    )?;
                    vec![home, away]
                }
                None => vec![win_percentage(
                    &catalogs.teams,
                    team,
                    &match_date,
                    &catalogs.relations,
                    &weights,
                )?],
            };
            if cli.json {
                return to_json(&results);
            }
            Ok(results
                .iter()
                .map(describe_win)
                .collect::<Vec<_>>()
                .join("\n"))
        }
        Command::Report { dob, gender, name } => {
            let catalogs = Arc::new(catalogs);
            let ttl = config.cache.ttl();
            if config.cache.enabled {
                let service = ReportService::new(catalogs, MemoryTextCache::new(), ttl);
                render_report(&service, cli.json, dob, gender, name.as_deref())
            } else {
                let service = ReportService::new(catalogs, NoCache, ttl);
                render_report(&service, cli.json, dob, gender, name.as_deref())
            }
        }
    }
}

fn describe_win(result: &WinPercentage) -> String {
    format!(
        "{} (captain {}) on {}: {}% [captain {} / team {} / time {}]",
        result.team,
        result.captain,
        result.match_date,
        result.calculated_win_percentage,
        result.captain_compatibility_score,
        result.team_compatibility_score,
        result.time_factor_score
    )
}

fn render_report<C: TextCache>(
    service: &ReportService<C>,
    json: bool,
    dob: &str,
    gender: &str,
    name: Option<&str>,
) -> Result<String> {
    if json {
        return to_json(&service.build(dob, gender, name)?);
    }
    service.render_text(dob, gender, name)
}
