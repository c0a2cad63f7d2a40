/// Per-role visibility policies
///
/// Each role maps a filter request to a query plan: which member
/// predicates apply, whether the member table is joined, whether the
/// result set is deduplicated, and whether sideloading is granted. The
/// three role branches live here and nowhere else.
use crate::models::{LocusFilter, Role, Sideload};

/// Region identifiers the limited role is allowed to see, regardless of
/// what the caller asked for.
pub const LIMITED_REGION_IDS: [i32; 3] = [86118093, 86696489, 88186467];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Join {
    None,
    Left,
    Inner,
}

/// Predicates on the member table. Applied in the locus query when a
/// join is planned, or in the member batch fetch when sideloading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberFilter {
    pub region_ids: Option<Vec<i32>>,
    pub membership_status: Option<String>,
}

impl MemberFilter {
    pub fn is_empty(&self) -> bool {
        self.region_ids.is_none() && self.membership_status.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    pub join: Join,
    pub member_filter: MemberFilter,
    pub dedupe_by_id: bool,
    pub sideload_members: bool,
}

pub trait VisibilityPolicy {
    fn plan(&self, filter: &LocusFilter) -> QueryPlan;
}

pub fn policy_for(role: Role) -> &'static dyn VisibilityPolicy {
    match role {
        Role::Admin => &AdminVisibility,
        Role::Normal => &NormalVisibility,
        Role::Limited => &LimitedVisibility,
    }
}

/// Admin sees everything and may sideload members. The locus page is
/// fixed by locus-level filters alone; member predicates only narrow
/// the sideloaded rows.
struct AdminVisibility;

impl VisibilityPolicy for AdminVisibility {
    fn plan(&self, filter: &LocusFilter) -> QueryPlan {
        if filter.sideload != Some(Sideload::LocusMembers) {
            return NormalVisibility.plan(filter);
        }

        QueryPlan {
            join: Join::None,
            member_filter: caller_member_filter(filter),
            dedupe_by_id: false,
            sideload_members: true,
        }
    }
}

/// Default role: flat results, member predicates via a left join when
/// supplied. Duplicate locus rows from the join are preserved.
struct NormalVisibility;

impl VisibilityPolicy for NormalVisibility {
    fn plan(&self, filter: &LocusFilter) -> QueryPlan {
        let member_filter = caller_member_filter(filter);
        let join = if member_filter.is_empty() {
            Join::None
        } else {
            Join::Left
        };

        QueryPlan {
            join,
            member_filter,
            dedupe_by_id: false,
            sideload_members: false,
        }
    }
}

/// Limited role: visibility is forced onto the fixed region allow-list
/// via an inner join; the caller's regionId and sideload requests are
/// ignored. Matching via multiple members is collapsed to one row per
/// locus.
struct LimitedVisibility;

impl VisibilityPolicy for LimitedVisibility {
    fn plan(&self, filter: &LocusFilter) -> QueryPlan {
        QueryPlan {
            join: Join::Inner,
            member_filter: MemberFilter {
                region_ids: Some(LIMITED_REGION_IDS.to_vec()),
                membership_status: filter.membership_status.clone(),
            },
            dedupe_by_id: true,
            sideload_members: false,
        }
    }
}

fn caller_member_filter(filter: &LocusFilter) -> MemberFilter {
    MemberFilter {
        region_ids: filter.region_ids.clone(),
        membership_status: filter.membership_status.clone(),
    }
}
