//! Region code remapping and area index resolution

use crate::feed::AreaRecord;
use tracing::warn;

/// Sub-regions whose forecast lives in another office's payload file
pub const FETCH_REMAP: &[(&str, &str)] = &[
    // Tokachi is published in the Kushiro/Nemuro/Tokachi file
    ("014030", "014100"),
    // Amami is published in the Kagoshima file
    ("460040", "460100"),
];

/// Office code of the payload file holding `region_code`'s forecast
pub fn fetch_code_for(region_code: &str) -> &str {
    for (from, to) in FETCH_REMAP {
        if *from == region_code {
            return *to;
        }
    }
    region_code
}

/// Index of `region_code` in the weather-code series' area list.
///
/// Falls back to the first area when nothing matches. The same index must
/// be used for every other series of the payload.
pub fn resolve_area_index(areas: &[AreaRecord], region_code: &str) -> usize {
    match areas.iter().position(|a| a.code() == Some(region_code)) {
        Some(index) => index,
        None => {
            warn!(
                "Region {} not found among {} areas, using the first",
                region_code,
                areas.len()
            );
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::AreaRef;

    fn area(code: &str) -> AreaRecord {
        AreaRecord {
            area: Some(AreaRef {
                name: format!("area {code}"),
                code: code.to_string(),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_remap_exceptions() {
        assert_eq!(fetch_code_for("014030"), "014100");
        assert_eq!(fetch_code_for("460040"), "460100");
    }

    #[test]
    fn test_remap_passthrough() {
        assert_eq!(fetch_code_for("130000"), "130000");
        assert_eq!(fetch_code_for("014100"), "014100");
        assert_eq!(fetch_code_for(""), "");
    }

    #[test]
    fn test_resolve_matching_area() {
        let areas = vec![area("A"), area("B"), area("C")];
        assert_eq!(resolve_area_index(&areas, "A"), 0);
        assert_eq!(resolve_area_index(&areas, "B"), 1);
        assert_eq!(resolve_area_index(&areas, "C"), 2);
    }

    #[test]
    fn test_resolve_falls_back_to_first() {
        let areas = vec![area("A"), area("B")];
        assert_eq!(resolve_area_index(&areas, "Z"), 0);
        assert_eq!(resolve_area_index(&[], "Z"), 0);
    }

    #[test]
    fn test_resolve_skips_areas_without_code() {
        let areas = vec![AreaRecord::default(), area("B")];
        assert_eq!(resolve_area_index(&areas, "B"), 1);
    }
}
