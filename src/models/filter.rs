/// Typed filter request for the locus listing endpoint
///
/// Untrusted query parameters are parsed and validated once at the HTTP
/// boundary; the rest of the read path only ever sees this struct.
/// Repeated keys (`id=1&id=2`) accumulate, scalar keys keep the last
/// occurrence, and empty values are skipped entirely.
use crate::error::AppError;

/// Sortable locus columns. Unrecognized `sortBy` values silently fall
/// back to `Id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    Id,
    LocusStart,
    LocusStop,
    MemberCount,
}

impl SortBy {
    pub fn column(self) -> &'static str {
        match self {
            SortBy::Id => "id",
            SortBy::LocusStart => "locus_start",
            SortBy::LocusStop => "locus_stop",
            SortBy::MemberCount => "member_count",
        }
    }

    fn parse(value: &str) -> Self {
        match value {
            "id" => SortBy::Id,
            "locusStart" => SortBy::LocusStart,
            "locusStop" => SortBy::LocusStop,
            "memberCount" => SortBy::MemberCount,
            _ => SortBy::Id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("desc") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }
}

/// Related rows a caller may ask to embed in the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sideload {
    LocusMembers,
}

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_ROWS: i64 = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct LocusFilter {
    pub ids: Option<Vec<i32>>,
    pub assembly_id: Option<String>,
    pub region_ids: Option<Vec<i32>>,
    pub membership_status: Option<String>,
    pub sideload: Option<Sideload>,
    pub page: i64,
    pub rows: i64,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

impl Default for LocusFilter {
    fn default() -> Self {
        Self {
            ids: None,
            assembly_id: None,
            region_ids: None,
            membership_status: None,
            sideload: None,
            page: DEFAULT_PAGE,
            rows: DEFAULT_ROWS,
            sort_by: SortBy::default(),
            sort_order: SortOrder::default(),
        }
    }
}

impl LocusFilter {
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.rows
    }

    /// Parse and validate a raw URL query string.
    pub fn from_query(raw: &str) -> Result<Self, AppError> {
        let mut filter = LocusFilter::default();
        let mut ids: Vec<i32> = Vec::new();
        let mut region_ids: Vec<i32> = Vec::new();

        for pair in raw.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = decode_component(key)?;
            let value = decode_component(value)?;
            if value.is_empty() {
                continue;
            }

            match key.as_str() {
                "id" => ids.push(parse_int("id", &value)?),
                "assemblyId" => filter.assembly_id = Some(value),
                "regionId" => region_ids.push(parse_int("regionId", &value)?),
                "membershipStatus" => filter.membership_status = Some(value),
                "sideload" => {
                    filter.sideload = match value.as_str() {
                        "locusMembers" => Some(Sideload::LocusMembers),
                        _ => None,
                    }
                }
                "page" => {
                    let page = parse_long("page", &value)?;
                    if page < 1 {
                        return Err(AppError::Validation("page must be >= 1".to_string()));
                    }
                    filter.page = page;
                }
                "rows" => {
                    let rows = parse_long("rows", &value)?;
                    if rows < 1 {
                        return Err(AppError::Validation("rows must be >= 1".to_string()));
                    }
                    filter.rows = rows;
                }
                "sortBy" => filter.sort_by = SortBy::parse(&value),
                "sortOrder" => filter.sort_order = SortOrder::parse(&value),
                _ => {}
            }
        }

        if !ids.is_empty() {
            filter.ids = Some(ids);
        }
        if !region_ids.is_empty() {
            filter.region_ids = Some(region_ids);
        }

        Ok(filter)
    }
}

fn decode_component(raw: &str) -> Result<String, AppError> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|cow| cow.into_owned())
        .map_err(|_| AppError::Validation("malformed query string".to_string()))
}

fn parse_int(key: &str, value: &str) -> Result<i32, AppError> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::Validation(format!("{} must be an integer", key)))
}

fn parse_long(key: &str, value: &str) -> Result<i64, AppError> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::Validation(format!("{} must be an integer", key)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_yields_defaults() {
        let filter = LocusFilter::from_query("").unwrap();
        assert_eq!(filter, LocusFilter::default());
        assert_eq!(filter.page, 1);
        assert_eq!(filter.rows, 1000);
        assert_eq!(filter.offset(), 0);
    }

    #[test]
    fn repeated_ids_accumulate() {
        let filter = LocusFilter::from_query("id=1&id=2&id=3").unwrap();
        assert_eq!(filter.ids, Some(vec![1, 2, 3]));
    }

    #[test]
    fn single_id_and_region() {
        let filter = LocusFilter::from_query("id=155095&regionId=86118093").unwrap();
        assert_eq!(filter.ids, Some(vec![155095]));
        assert_eq!(filter.region_ids, Some(vec![86118093]));
    }

    #[test]
    fn empty_values_are_skipped() {
        let filter = LocusFilter::from_query("id=&assemblyId=&page=").unwrap();
        assert_eq!(filter, LocusFilter::default());
    }

    #[test]
    fn non_numeric_id_is_rejected() {
        let err = LocusFilter::from_query("id=abc").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn page_below_one_is_rejected() {
        assert!(LocusFilter::from_query("page=0").is_err());
        assert!(LocusFilter::from_query("rows=-5").is_err());
    }

    #[test]
    fn pagination_offset() {
        let filter = LocusFilter::from_query("page=2&rows=5").unwrap();
        assert_eq!(filter.offset(), 5);
        assert_eq!(filter.rows, 5);
    }

    #[test]
    fn unknown_sort_by_falls_back_to_id() {
        let filter = LocusFilter::from_query("sortBy=chromosome").unwrap();
        assert_eq!(filter.sort_by, SortBy::Id);
    }

    #[test]
    fn sort_fields_parse() {
        let filter = LocusFilter::from_query("sortBy=locusStart&sortOrder=DESC").unwrap();
        assert_eq!(filter.sort_by, SortBy::LocusStart);
        assert_eq!(filter.sort_order, SortOrder::Desc);
    }

    #[test]
    fn sideload_requires_exact_value() {
        let filter = LocusFilter::from_query("sideload=locusMembers").unwrap();
        assert_eq!(filter.sideload, Some(Sideload::LocusMembers));

        let filter = LocusFilter::from_query("sideload=members").unwrap();
        assert_eq!(filter.sideload, None);
    }

    #[test]
    fn percent_encoded_values_decode() {
        let filter = LocusFilter::from_query("assemblyId=WEWSeq_v.1.0&membershipStatus=member%20candidate").unwrap();
        assert_eq!(filter.assembly_id.as_deref(), Some("WEWSeq_v.1.0"));
        assert_eq!(filter.membership_status.as_deref(), Some("member candidate"));
    }

    #[test]
    fn scalar_keys_keep_last_occurrence() {
        let filter = LocusFilter::from_query("assemblyId=a&assemblyId=b").unwrap();
        assert_eq!(filter.assembly_id.as_deref(), Some("b"));
    }
}
