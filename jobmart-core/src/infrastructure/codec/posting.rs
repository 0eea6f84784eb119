// jobmart-core/src/infrastructure/codec/posting.rs

use datafusion::arrow::error::ArrowError;
use datafusion::arrow::record_batch::RecordBatch;

use crate::domain::posting::{JobPosting, columns};
use crate::infrastructure::codec::columns::{dates, floats, ints, strings};

/// Reads the fixed posting columns of a Bronze (or Silver) batch.
/// Absent optional columns decode as nulls.
pub fn decode_postings(batch: &RecordBatch) -> Result<Vec<JobPosting>, ArrowError> {
    let ids = strings(batch, columns::JOB_POST_ID)?;
    let titles = strings(batch, columns::TITLE)?;
    let categories = strings(batch, columns::CATEGORIES)?;
    let levels = strings(batch, columns::POSITION_LEVELS)?;
    let vacancies = ints(batch, columns::VACANCIES)?;
    let applications = ints(batch, columns::APPLICATIONS)?;
    let views = ints(batch, columns::VIEWS)?;
    let reposts = ints(batch, columns::REPOST_COUNT)?;
    let experience = ints(batch, columns::MIN_YEARS_EXPERIENCE)?;
    let salary_min = floats(batch, columns::SALARY_MINIMUM)?;
    let salary_max = floats(batch, columns::SALARY_MAXIMUM)?;
    let employment = strings(batch, columns::EMPLOYMENT_TYPES)?;
    let companies = strings(batch, columns::COMPANY_NAME)?;
    let posted = dates(batch, columns::NEW_POSTING_DATE)?;
    let originally = dates(batch, columns::ORIGINAL_POSTING_DATE)?;
    let expires = dates(batch, columns::EXPIRY_DATE)?;

    let postings = (0..batch.num_rows())
        .map(|i| JobPosting {
            job_post_id: ids[i].clone(),
            title: titles[i].clone(),
            categories: categories[i].clone(),
            position_level: levels[i].clone(),
            vacancies: vacancies[i],
            applications: applications[i],
            views: views[i],
            repost_count: reposts[i],
            min_years_experience: experience[i],
            salary_minimum: salary_min[i],
            salary_maximum: salary_max[i],
            employment_type: employment[i].clone(),
            company_name: companies[i].clone(),
            posted_on: posted[i],
            originally_posted_on: originally[i],
            expires_on: expires[i],
        })
        .collect();
    Ok(postings)
}
