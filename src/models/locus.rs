/// Locus and locus-member models
///
/// Both tables are read-only from this service's perspective; rows are
/// populated by an external pipeline. `member_count` is a denormalized
/// cache and is served as stored, never recomputed against member rows.
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Locus {
    pub id: i32,
    pub assembly_id: Option<String>,
    pub locus_name: Option<String>,
    pub public_locus_name: Option<String>,
    pub chromosome: Option<String>,
    pub strand: Option<String>,
    pub locus_start: Option<i32>,
    pub locus_stop: Option<i32>,
    pub member_count: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocusMember {
    pub id: i32,
    pub region_id: Option<i32>,
    pub locus_id: Option<i32>,
    pub membership_status: Option<String>,
}

/// Locus with its members sideloaded (admin only).
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocusWithMembers {
    pub id: i32,
    pub assembly_id: Option<String>,
    pub locus_name: Option<String>,
    pub public_locus_name: Option<String>,
    pub chromosome: Option<String>,
    pub strand: Option<String>,
    pub locus_start: Option<i32>,
    pub locus_stop: Option<i32>,
    pub member_count: Option<i32>,
    pub locus_members: Vec<LocusMember>,
}

impl LocusWithMembers {
    pub fn new(locus: Locus, locus_members: Vec<LocusMember>) -> Self {
        Self {
            id: locus.id,
            assembly_id: locus.assembly_id,
            locus_name: locus.locus_name,
            public_locus_name: locus.public_locus_name,
            chromosome: locus.chromosome,
            strand: locus.strand,
            locus_start: locus.locus_start,
            locus_stop: locus.locus_stop,
            member_count: locus.member_count,
            locus_members,
        }
    }
}
