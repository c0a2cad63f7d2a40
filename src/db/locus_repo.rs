/// Locus read queries
///
/// SQL is assembled from the validated filter and the role's query plan:
/// positional binds in a fixed order (locus ids, assembly, region ids,
/// membership status, limit, offset), `= ANY($n)` for id lists, and a
/// secondary `l.id ASC` sort so pagination is deterministic.
use sqlx::PgPool;

use crate::models::{Locus, LocusFilter, LocusMember, SortBy};
use crate::services::visibility::{Join, MemberFilter, QueryPlan};

const LOCUS_COLUMNS: &str = "l.id, l.assembly_id, l.locus_name, l.public_locus_name, \
     l.chromosome, l.strand, l.locus_start, l.locus_stop, l.member_count";

pub async fn list_loci(
    pool: &PgPool,
    filter: &LocusFilter,
    plan: &QueryPlan,
) -> Result<Vec<Locus>, sqlx::Error> {
    let sql = locus_query_sql(filter, plan);

    let mut query = sqlx::query_as::<_, Locus>(&sql);
    if let Some(ids) = &filter.ids {
        query = query.bind(ids.clone());
    }
    if let Some(assembly_id) = &filter.assembly_id {
        query = query.bind(assembly_id.clone());
    }
    if plan.join != Join::None {
        if let Some(region_ids) = &plan.member_filter.region_ids {
            query = query.bind(region_ids.clone());
        }
        if let Some(status) = &plan.member_filter.membership_status {
            query = query.bind(status.clone());
        }
    }

    query
        .bind(filter.rows)
        .bind(filter.offset())
        .fetch_all(pool)
        .await
}

/// Members of the given loci, narrowed by any member-level predicates.
pub async fn list_members(
    pool: &PgPool,
    locus_ids: &[i32],
    member_filter: &MemberFilter,
) -> Result<Vec<LocusMember>, sqlx::Error> {
    let sql = member_query_sql(member_filter);

    let mut query = sqlx::query_as::<_, LocusMember>(&sql).bind(locus_ids.to_vec());
    if let Some(region_ids) = &member_filter.region_ids {
        query = query.bind(region_ids.clone());
    }
    if let Some(status) = &member_filter.membership_status {
        query = query.bind(status.clone());
    }

    query.fetch_all(pool).await
}

fn locus_query_sql(filter: &LocusFilter, plan: &QueryPlan) -> String {
    let mut sql = format!("SELECT {} FROM rnc_locus l", LOCUS_COLUMNS);

    match plan.join {
        Join::None => {}
        Join::Left => sql.push_str(" LEFT JOIN rnc_locus_members m ON m.locus_id = l.id"),
        Join::Inner => sql.push_str(" INNER JOIN rnc_locus_members m ON m.locus_id = l.id"),
    }

    let mut conditions = Vec::new();
    let mut n = 0;
    if filter.ids.is_some() {
        n += 1;
        conditions.push(format!("l.id = ANY(${})", n));
    }
    if filter.assembly_id.is_some() {
        n += 1;
        conditions.push(format!("l.assembly_id = ${}", n));
    }
    if plan.join != Join::None {
        if plan.member_filter.region_ids.is_some() {
            n += 1;
            conditions.push(format!("m.region_id = ANY(${})", n));
        }
        if plan.member_filter.membership_status.is_some() {
            n += 1;
            conditions.push(format!("m.membership_status = ${}", n));
        }
    }

    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }

    let direction = filter.sort_order.sql();
    match filter.sort_by {
        SortBy::Id => sql.push_str(&format!(" ORDER BY l.id {}", direction)),
        other => sql.push_str(&format!(
            " ORDER BY l.{} {}, l.id ASC",
            other.column(),
            direction
        )),
    }

    sql.push_str(&format!(" LIMIT ${} OFFSET ${}", n + 1, n + 2));
    sql
}

fn member_query_sql(member_filter: &MemberFilter) -> String {
    let mut sql = String::from(
        "SELECT m.id, m.region_id, m.locus_id, m.membership_status \
         FROM rnc_locus_members m WHERE m.locus_id = ANY($1)",
    );

    let mut n = 1;
    if member_filter.region_ids.is_some() {
        n += 1;
        sql.push_str(&format!(" AND m.region_id = ANY(${})", n));
    }
    if member_filter.membership_status.is_some() {
        n += 1;
        sql.push_str(&format!(" AND m.membership_status = ${}", n));
    }

    sql
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, SortOrder};
    use crate::services::visibility::{policy_for, LIMITED_REGION_IDS};

    #[test]
    fn bare_listing_has_no_join_or_where() {
        let filter = LocusFilter::default();
        let plan = policy_for(Role::Normal).plan(&filter);
        let sql = locus_query_sql(&filter, &plan);

        assert!(!sql.contains("JOIN"));
        assert!(!sql.contains("WHERE"));
        assert!(sql.ends_with("ORDER BY l.id ASC LIMIT $1 OFFSET $2"));
    }

    #[test]
    fn locus_filters_become_predicates() {
        let filter = LocusFilter {
            ids: Some(vec![1, 2]),
            assembly_id: Some("WEWSeq_v.1.0".to_string()),
            ..LocusFilter::default()
        };
        let plan = policy_for(Role::Normal).plan(&filter);
        let sql = locus_query_sql(&filter, &plan);

        assert!(sql.contains("WHERE l.id = ANY($1) AND l.assembly_id = $2"));
        assert!(sql.contains("LIMIT $3 OFFSET $4"));
    }

    #[test]
    fn member_filters_left_join_for_normal_role() {
        let filter = LocusFilter {
            region_ids: Some(vec![31095388]),
            membership_status: Some("member".to_string()),
            ..LocusFilter::default()
        };
        let plan = policy_for(Role::Normal).plan(&filter);
        let sql = locus_query_sql(&filter, &plan);

        assert!(sql.contains("LEFT JOIN rnc_locus_members m ON m.locus_id = l.id"));
        assert!(sql.contains("m.region_id = ANY($1)"));
        assert!(sql.contains("m.membership_status = $2"));
    }

    #[test]
    fn limited_role_inner_joins_on_allow_list() {
        let filter = LocusFilter::default();
        let plan = policy_for(Role::Limited).plan(&filter);
        let sql = locus_query_sql(&filter, &plan);

        assert!(sql.contains("INNER JOIN rnc_locus_members m ON m.locus_id = l.id"));
        assert!(sql.contains("m.region_id = ANY($1)"));
        assert_eq!(
            plan.member_filter.region_ids,
            Some(LIMITED_REGION_IDS.to_vec())
        );
    }

    #[test]
    fn sideload_plan_keeps_member_predicates_out_of_the_locus_page() {
        let filter = LocusFilter {
            sideload: Some(crate::models::Sideload::LocusMembers),
            region_ids: Some(vec![31095388]),
            ..LocusFilter::default()
        };
        let plan = policy_for(Role::Admin).plan(&filter);
        let sql = locus_query_sql(&filter, &plan);

        assert!(!sql.contains("JOIN"));
        assert!(!sql.contains("m.region_id"));
    }

    #[test]
    fn sort_gets_a_stable_tie_break() {
        let filter = LocusFilter {
            sort_by: SortBy::LocusStart,
            sort_order: SortOrder::Desc,
            ..LocusFilter::default()
        };
        let plan = policy_for(Role::Normal).plan(&filter);
        let sql = locus_query_sql(&filter, &plan);

        assert!(sql.contains("ORDER BY l.locus_start DESC, l.id ASC"));
    }

    #[test]
    fn member_query_narrows_by_supplied_predicates() {
        let sql = member_query_sql(&MemberFilter {
            region_ids: Some(vec![1]),
            membership_status: Some("member".to_string()),
        });

        assert!(sql.contains("m.locus_id = ANY($1)"));
        assert!(sql.contains("m.region_id = ANY($2)"));
        assert!(sql.contains("m.membership_status = $3"));
    }
}
