//! Region list (`area.json`) flattening

use crate::{IngestError, IngestResult};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tenki_core::Region;

/// Name used when an office listed under a center has no entry of its own
pub const UNKNOWN_OFFICE_NAME: &str = "不明";

#[derive(Debug, Deserialize)]
struct AreaIndex {
    #[serde(default)]
    centers: BTreeMap<String, Center>,

    #[serde(default)]
    offices: BTreeMap<String, Office>,
}

#[derive(Debug, Deserialize)]
struct Center {
    name: String,

    #[serde(default)]
    children: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Office {
    name: String,
}

/// Flatten centers and offices into one region per office.
///
/// Centers come out in code order, offices in the order their center lists them.
pub fn flatten_regions(area_json: &Value) -> IngestResult<Vec<Region>> {
    let index = AreaIndex::deserialize(area_json)
        .map_err(|e| IngestError::MalformedPayload(format!("region list: {e}")))?;

    let regions = index
        .centers
        .iter()
        .flat_map(|(center_code, center)| {
            let offices = &index.offices;
            center.children.iter().map(move |office_code| {
                let name = offices
                    .get(office_code)
                    .map(|o| o.name.as_str())
                    .unwrap_or(UNKNOWN_OFFICE_NAME);
                Region::new(office_code, name, center_code, &center.name)
            })
        })
        .collect();

    Ok(regions)
}

/// Look a region up by office code
pub fn find_region<'a>(regions: &'a [Region], code: &str) -> Option<&'a Region> {
    regions.iter().find(|r| r.code == code)
}

/// Regions grouped under their center name, in list order
pub fn group_by_center(regions: &[Region]) -> Vec<(&str, Vec<&Region>)> {
    let mut groups: Vec<(&str, Vec<&Region>)> = Vec::new();
    for region in regions {
        if let Some((center, members)) = groups.last_mut() {
            if *center == region.center_name {
                members.push(region);
                continue;
            }
        }
        groups.push((region.center_name.as_str(), vec![region]));
    }
    groups
}
