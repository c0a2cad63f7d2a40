/// Locus listing execution
///
/// Runs the query plan produced by the caller's visibility policy:
/// fetches the locus page, collapses duplicates for the limited role,
/// and batch-fetches members for an admin sideload.
use std::collections::{HashMap, HashSet};

use sqlx::PgPool;

use crate::db::locus_repo;
use crate::error::Result;
use crate::models::{Locus, LocusFilter, LocusMember, LocusWithMembers, Role};
use crate::services::visibility::{self, QueryPlan};

/// Listing shapes: flat locus rows, or loci with members embedded.
pub enum LocusListing {
    Flat(Vec<Locus>),
    Sideloaded(Vec<LocusWithMembers>),
}

pub async fn list(db: &PgPool, filter: &LocusFilter, role: Role) -> Result<LocusListing> {
    let plan = visibility::policy_for(role).plan(filter);
    let loci = locus_repo::list_loci(db, filter, &plan).await?;

    if plan.sideload_members {
        return Ok(LocusListing::Sideloaded(sideload(db, loci, &plan).await?));
    }

    let loci = if plan.dedupe_by_id {
        dedupe_by_id(loci)
    } else {
        loci
    };

    Ok(LocusListing::Flat(loci))
}

/// Keep the first occurrence of each locus id. Runs after pagination, so
/// a page can hold fewer rows than requested.
fn dedupe_by_id(loci: Vec<Locus>) -> Vec<Locus> {
    let mut seen = HashSet::new();
    loci.into_iter().filter(|l| seen.insert(l.id)).collect()
}

async fn sideload(
    db: &PgPool,
    loci: Vec<Locus>,
    plan: &QueryPlan,
) -> Result<Vec<LocusWithMembers>> {
    let locus_ids: Vec<i32> = loci.iter().map(|l| l.id).collect();

    let members = if locus_ids.is_empty() {
        Vec::new()
    } else {
        locus_repo::list_members(db, &locus_ids, &plan.member_filter).await?
    };

    let mut grouped: HashMap<i32, Vec<LocusMember>> = HashMap::new();
    for member in members {
        if let Some(locus_id) = member.locus_id {
            grouped.entry(locus_id).or_default().push(member);
        }
    }

    Ok(loci
        .into_iter()
        .map(|locus| {
            let members = grouped.remove(&locus.id).unwrap_or_default();
            LocusWithMembers::new(locus, members)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locus(id: i32) -> Locus {
        Locus {
            id,
            assembly_id: None,
            locus_name: None,
            public_locus_name: None,
            chromosome: None,
            strand: None,
            locus_start: None,
            locus_stop: None,
            member_count: None,
        }
    }

    #[test]
    fn dedupe_keeps_first_occurrence() {
        let rows = vec![locus(3), locus(1), locus(3), locus(2), locus(1)];
        let deduped = dedupe_by_id(rows);
        let ids: Vec<i32> = deduped.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }
}
