use crate::error::ApiError;

const MAX_LIMIT: i64 = 100;
const MAX_PAGE: i64 = 1_000;

pub fn validate_pagination(page: i64, limit: i64) -> Result<(i64, i64), ApiError> {
    if !(1..=MAX_PAGE).contains(&page) {
        return Err(ApiError::BadRequest(format!(
            "page must be between 1 and {MAX_PAGE}"
        )));
    }

    if !(1..=MAX_LIMIT).contains(&limit) {
        return Err(ApiError::BadRequest(format!(
            "limit must be between 1 and {MAX_LIMIT}"
        )));
    }

    Ok((page, limit))
}
