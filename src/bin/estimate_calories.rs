//! Print the estimated daily calorie requirement
//!
//! Usage:
//!   estimate_calories <weight_kg> <height_ft> <age> <sex> [activity level...]
//!   estimate_calories --user <username>

use healthtrack::calories::CalorieInputs;
use healthtrack::config::Config;
use healthtrack::models::UserProfile;

const USAGE: &str = "usage: estimate_calories <weight_kg> <height_ft> <age> <sex> [activity level]\n       estimate_calories --user <username>";

/// Where the inputs come from
#[derive(Debug, PartialEq)]
enum Request {
    Direct(CalorieInputs),
    Profile(String),
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("{} must be a number, got '{}'\n{}", name, value, USAGE))
}

fn parse_args(args: &[String]) -> Result<Request, String> {
    if args.first().map(String::as_str) == Some("--user") {
        return match args.get(1) {
            Some(username) if !username.trim().is_empty() => {
                Ok(Request::Profile(username.trim().to_string()))
            }
            _ => Err(USAGE.to_string()),
        };
    }

    if args.len() < 4 {
        return Err(USAGE.to_string());
    }
    let weight_kg: f64 = parse_number("weight", &args[0])?;
    let height_ft: f64 = parse_number("height", &args[1])?;
    let age: i64 = parse_number("age", &args[2])?;
    // Activity levels are two words, so take the rest of the line
    let activity = if args.len() > 4 {
        args[4..].join(" ")
    } else {
        "sedentary".to_string()
    };

    Ok(Request::Direct(CalorieInputs::from_labels(
        weight_kg, height_ft, age, &args[3], &activity,
    )))
}

fn inputs_from_profile(username: &str) -> Result<CalorieInputs, Box<dyn std::error::Error>> {
    let database = Config::from_env().open_database()?;

    let profile = database
        .with_conn(|conn| UserProfile::get_by_username(conn, username))?
        .ok_or_else(|| format!("no saved profile for '{}'", username))?;
    Ok(profile.calorie_inputs())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let inputs = match parse_args(&args)? {
        Request::Direct(inputs) => inputs,
        Request::Profile(username) => inputs_from_profile(&username)?,
    };

    let breakdown = inputs.breakdown();
    println!("Sex:            {}", inputs.sex);
    println!("Activity level: {}", inputs.activity_level);
    println!("Height:         {:.2} cm", breakdown.height_cm);
    println!("BMR:            {:.2} kcal/day", breakdown.bmr);
    println!("Multiplier:     {}", breakdown.multiplier);
    println!("Daily calories: {:.2} kcal/day", breakdown.kcal_per_day);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use healthtrack::calories::{ActivityLevel, Sex};

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_multi_word_activity_is_joined() {
        let input = args(&["60", "5.5", "25", "Female", "Very", "Active"]);
        let request = parse_args(&input).unwrap();
        match request {
            Request::Direct(inputs) => {
                assert_eq!(inputs.sex, Sex::Female);
                assert_eq!(inputs.activity_level, ActivityLevel::VeryActive);
                assert!((inputs.estimate() - 2438.31).abs() < 0.01);
            }
            other => panic!("expected direct inputs, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_activity_defaults_to_sedentary() {
        let request = parse_args(&args(&["70", "5.9", "30", "male"])).unwrap();
        assert_eq!(
            request,
            Request::Direct(CalorieInputs::new(
                70.0,
                5.9,
                30,
                Sex::Male,
                ActivityLevel::Sedentary
            ))
        );
    }

    #[test]
    fn test_too_few_args_is_usage_error() {
        assert_eq!(parse_args(&args(&["70", "5.9", "30"])), Err(USAGE.to_string()));
        assert_eq!(parse_args(&[]), Err(USAGE.to_string()));
    }

    #[test]
    fn test_non_numeric_weight() {
        let err = parse_args(&args(&["heavy", "5.9", "30", "male"])).unwrap_err();
        assert!(err.starts_with("weight must be a number"));
    }

    #[test]
    fn test_user_flag() {
        assert_eq!(
            parse_args(&args(&["--user", " bob "])),
            Ok(Request::Profile("bob".to_string()))
        );
        assert_eq!(parse_args(&args(&["--user"])), Err(USAGE.to_string()));
    }
}
