use once_cell::sync::Lazy;
use regex::Regex;

static QUARTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Q[1-4]$").expect("Invalid quarter regex"));

const MAX_NAME_LENGTH: usize = 100;
const MIN_YEAR: i32 = 1970;
const MAX_YEAR: i32 = 9999;

pub fn validate_score(score: f64) -> Result<(), &'static str> {
    // 分数必须是 0 ~ 100 的有限数
    if !score.is_finite() {
        return Err("Score must be a finite number");
    }
    if !(0.0..=100.0).contains(&score) {
        return Err("Score must be between 0 and 100");
    }
    Ok(())
}

pub fn validate_weight(weight: f64) -> Result<(), &'static str> {
    if !weight.is_finite() {
        return Err("Weight must be a finite number");
    }
    if !(0.0..=100.0).contains(&weight) {
        return Err("Weight must be between 0 and 100");
    }
    Ok(())
}

pub fn validate_quarter(quarter: &str) -> Result<(), &'static str> {
    if !QUARTER_RE.is_match(quarter) {
        return Err("Quarter must be one of Q1, Q2, Q3, Q4");
    }
    Ok(())
}

pub fn validate_year(year: i32) -> Result<(), &'static str> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err("Year must be between 1970 and 9999");
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Name must not be empty");
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err("Name must be at most 100 characters");
    }
    Ok(())
}
