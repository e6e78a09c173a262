//! Overpass QL for the hair/beauty search.

/// Builds the Overpass QL query for an administrative area.
///
/// Selects `shop=hairdresser`, `shop=beauty`, `amenity=spa`, and anything
/// whose name mentions salon/saloon/barber, then drops pubs and bars that
/// only matched on "saloon". Ways and relations are reduced to their centroid.
#[must_use]
pub fn build_overpass_query(area_code: &str, timeout_secs: u64) -> String {
    let area_code = area_code.trim().replace('"', "");
    format!(
        r#"[out:json][timeout:{timeout_secs}];
area["ISO3166-2"="{area_code}"]["boundary"="administrative"]->.a;
(
  nwr["shop"="hairdresser"](area.a);
  nwr["shop"="beauty"](area.a);
  nwr["amenity"="spa"](area.a);
  nwr(area.a)["name"~"(salon|saloon|barber)",i];
)->.hits;
(.hits; - nwr.hits["amenity"~"^(pub|bar)$"];);
out center tags;"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_targets_area_and_timeout() {
        let q = build_overpass_query("CA-ON", 600);
        assert!(q.starts_with("[out:json][timeout:600];"));
        assert!(q.contains(r#"area["ISO3166-2"="CA-ON"]"#));
        assert!(q.trim_end().ends_with("out center tags;"));
    }

    #[test]
    fn query_selects_all_categories() {
        let q = build_overpass_query("CA-ON", 60);
        for selector in [
            r#"nwr["shop"="hairdresser"]"#,
            r#"nwr["shop"="beauty"]"#,
            r#"nwr["amenity"="spa"]"#,
            r#"["name"~"(salon|saloon|barber)",i]"#,
        ] {
            assert!(q.contains(selector), "missing selector {selector}");
        }
    }

    #[test]
    fn query_strips_quotes_from_area_code() {
        let q = build_overpass_query(r#" CA-ON"]; out; (" "#, 60);
        assert!(!q.contains(r#"CA-ON""#));
        assert!(q.contains(r#""CA-ON]; out; (""#));
    }
}
