// jobmart-core/src/domain/posting.rs

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Column names of the source extract. The raw file, the Bronze checkpoint and
/// the pass-through part of the Silver checkpoint all use these names.
pub mod columns {
    pub const JOB_POST_ID: &str = "metadata_jobPostId";
    pub const TITLE: &str = "title";
    pub const CATEGORIES: &str = "categories";
    pub const POSITION_LEVELS: &str = "positionLevels";
    pub const VACANCIES: &str = "numberOfVacancies";
    pub const APPLICATIONS: &str = "metadata_totalNumberJobApplication";
    pub const VIEWS: &str = "metadata_totalNumberOfView";
    pub const REPOST_COUNT: &str = "metadata_repostCount";
    pub const MIN_YEARS_EXPERIENCE: &str = "minimumYearsExperience";
    pub const SALARY_MINIMUM: &str = "salary_minimum";
    pub const SALARY_MAXIMUM: &str = "salary_maximum";
    pub const AVERAGE_SALARY: &str = "average_salary";
    pub const EMPLOYMENT_TYPES: &str = "employmentTypes";
    pub const COMPANY_NAME: &str = "postedCompany_name";
    pub const NEW_POSTING_DATE: &str = "metadata_newPostingDate";
    pub const ORIGINAL_POSTING_DATE: &str = "metadata_originalPostingDate";
    pub const EXPIRY_DATE: &str = "metadata_expiryDate";

    /// Nullable integer columns of the raw extract.
    pub const INTEGER_COLUMNS: [&str; 5] = [
        VACANCIES,
        APPLICATIONS,
        VIEWS,
        REPOST_COUNT,
        MIN_YEARS_EXPERIENCE,
    ];

    /// Floating point columns of the raw extract.
    pub const FLOAT_COLUMNS: [&str; 3] = [SALARY_MINIMUM, SALARY_MAXIMUM, AVERAGE_SALARY];

    /// Columns without which no stage can run.
    pub const REQUIRED_COLUMNS: [&str; 2] = [JOB_POST_ID, TITLE];

    // Silver enrichments
    pub const INDUSTRY_LIST: &str = "industry_list";
    pub const PRIMARY_INDUSTRY: &str = "primary_industry";
    pub const INDUSTRY_COUNT: &str = "industry_count";
    pub const SENIORITY_TIER: &str = "seniority_tier";
    pub const SALARY_MINIMUM_RAW: &str = "salary_minimum_raw";
    pub const SALARY_MAXIMUM_RAW: &str = "salary_maximum_raw";
    pub const SALARY_OUTLIER_IQR: &str = "salary_outlier_iqr";
    pub const SALARY_MINIMUM_CLEAN: &str = "salary_minimum_clean";
    pub const SALARY_MAXIMUM_CLEAN: &str = "salary_maximum_clean";
    pub const AVERAGE_SALARY_CLEAN: &str = "average_salary_clean";
    pub const ANNUAL_SALARY_CLEAN: &str = "annual_salary_clean";
    pub const POSTING_MONTH: &str = "posting_month";
    pub const POSTING_DURATION_DAYS: &str = "posting_duration_days";
    pub const POSTING_YEAR: &str = "posting_year";
    pub const POSTING_MONTH_NUM: &str = "posting_month_num";
    pub const ROLE_FAMILY: &str = "role_family";
    pub const EXPERIENCE_BAND: &str = "experience_band";
    pub const COMPETITION_RATIO: &str = "competition_ratio";
    pub const IS_REPOSTED: &str = "is_reposted";
}

/// One job posting as it leaves Bronze.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobPosting {
    pub job_post_id: Option<String>,
    pub title: Option<String>,
    pub categories: Option<String>,
    pub position_level: Option<String>,
    pub vacancies: Option<i64>,
    pub applications: Option<i64>,
    pub views: Option<i64>,
    pub repost_count: Option<i64>,
    pub min_years_experience: Option<i64>,
    pub salary_minimum: Option<f64>,
    pub salary_maximum: Option<f64>,
    pub employment_type: Option<String>,
    pub company_name: Option<String>,
    pub posted_on: Option<NaiveDate>,
    pub originally_posted_on: Option<NaiveDate>,
    pub expires_on: Option<NaiveDate>,
}

/// Four-tier seniority scale the nine source position levels collapse into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SeniorityTier {
    Entry,
    Mid,
    Senior,
    Management,
    #[default]
    Unknown,
}

impl SeniorityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeniorityTier::Entry => "Entry",
            SeniorityTier::Mid => "Mid",
            SeniorityTier::Senior => "Senior",
            SeniorityTier::Management => "Management",
            SeniorityTier::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for SeniorityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeniorityTier {
    type Err = std::convert::Infallible;

    /// Anything outside the four tiers reads back as `Unknown`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Entry" => SeniorityTier::Entry,
            "Mid" => SeniorityTier::Mid,
            "Senior" => SeniorityTier::Senior,
            "Management" => SeniorityTier::Management,
            _ => SeniorityTier::Unknown,
        })
    }
}

/// Calendar month period, rendered as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| format!("'{}' is not a YYYY-MM period", s))?;
        let year: i32 = year
            .parse()
            .map_err(|_| format!("'{}' has an invalid year", s))?;
        let month: u32 = month
            .parse()
            .map_err(|_| format!("'{}' has an invalid month", s))?;
        if !(1..=12).contains(&month) {
            return Err(format!("'{}' has an invalid month", s));
        }
        Ok(Self { year, month })
    }
}

/// Salary columns produced by the three cleaning stages.
/// `minimum`/`maximum` hold the bounded values, `*_raw` the untouched input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalaryFields {
    pub minimum_raw: Option<f64>,
    pub maximum_raw: Option<f64>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub outlier_iqr: bool,
    pub minimum_clean: Option<f64>,
    pub maximum_clean: Option<f64>,
    pub average_clean: Option<f64>,
    pub annual_clean: Option<f64>,
}

impl SalaryFields {
    /// Mean of the bounded min/max, when both are present.
    pub fn bounded_average(&self) -> Option<f64> {
        match (self.minimum, self.maximum) {
            (Some(min), Some(max)) => Some((min + max) / 2.0),
            _ => None,
        }
    }
}

/// One Silver row: the posting plus every derived feature.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedPosting {
    pub posting: JobPosting,
    pub industry_list: Vec<String>,
    pub primary_industry: String,
    pub industry_count: usize,
    pub seniority_tier: SeniorityTier,
    pub salary: SalaryFields,
    pub posting_month: Option<YearMonth>,
    pub posting_duration_days: Option<i64>,
    pub posting_year: Option<i32>,
    pub posting_month_num: Option<u32>,
    pub role_family: String,
    pub experience_band: String,
    pub competition_ratio: Option<f64>,
    pub is_reposted: bool,
}

pub const UNKNOWN: &str = "Unknown";
pub const OTHER_ROLE: &str = "Other";

impl From<JobPosting> for EnrichedPosting {
    fn from(posting: JobPosting) -> Self {
        Self {
            posting,
            industry_list: Vec::new(),
            primary_industry: UNKNOWN.to_string(),
            industry_count: 0,
            seniority_tier: SeniorityTier::Unknown,
            salary: SalaryFields::default(),
            posting_month: None,
            posting_duration_days: None,
            posting_year: None,
            posting_month_num: None,
            role_family: OTHER_ROLE.to_string(),
            experience_band: UNKNOWN.to_string(),
            competition_ratio: None,
            is_reposted: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_month_round_trip_format() {
        let ym = YearMonth { year: 2023, month: 4 };
        assert_eq!(ym.to_string(), "2023-04");
        assert_eq!("2023-04".parse::<YearMonth>(), Ok(ym));
        assert!("2023-13".parse::<YearMonth>().is_err());
        assert!("april".parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_unknown_tier_strings_read_back_as_unknown() {
        assert_eq!("Mid".parse::<SeniorityTier>(), Ok(SeniorityTier::Mid));
        assert_eq!("Director".parse::<SeniorityTier>(), Ok(SeniorityTier::Unknown));
    }
}
