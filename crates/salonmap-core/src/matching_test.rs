use super::*;

fn record(
    name: Option<&str>,
    category: Option<&str>,
    city: Option<&str>,
    address: Option<&str>,
) -> BusinessRecord {
    BusinessRecord {
        element_type: Some("node".to_string()),
        element_id: Some(1),
        name: name.map(str::to_string),
        category: category.map(str::to_string),
        phone: None,
        website: None,
        opening_hours: None,
        address: address.map(str::to_string),
        city: city.map(str::to_string),
        latitude: None,
        longitude: None,
    }
}

fn check(rec: &BusinessRecord, type_choice: TypeChoice, search: &str) -> bool {
    matches(rec, &FilterCriteria::new(type_choice, search), &Region::niagara())
}

// -----------------------------------------------------------------------
// TypeChoice parsing
// -----------------------------------------------------------------------

#[test]
fn parse_lenient_accepts_plain_values_and_labels() {
    assert_eq!(TypeChoice::parse_lenient("hairdresser"), TypeChoice::Hairdresser);
    assert_eq!(TypeChoice::parse_lenient("Beauty (tag)"), TypeChoice::Beauty);
    assert_eq!(TypeChoice::parse_lenient("  SPA "), TypeChoice::Spa);
    assert_eq!(TypeChoice::parse_lenient("barber (name)"), TypeChoice::Barber);
    assert_eq!(TypeChoice::parse_lenient("salon(name)"), TypeChoice::Salon);
    assert_eq!(TypeChoice::parse_lenient("saloon"), TypeChoice::Saloon);
}

#[test]
fn parse_lenient_falls_back_to_all() {
    assert_eq!(TypeChoice::parse_lenient(""), TypeChoice::All);
    assert_eq!(TypeChoice::parse_lenient("All"), TypeChoice::All);
    assert_eq!(TypeChoice::parse_lenient("nail bar"), TypeChoice::All);
}

#[test]
fn labels_round_trip_through_parse() {
    for choice in TypeChoice::ORDERED {
        assert_eq!(TypeChoice::parse_lenient(choice.label()), choice);
    }
}

// -----------------------------------------------------------------------
// Type gate
// -----------------------------------------------------------------------

#[test]
fn all_skips_type_gate() {
    let rec = record(None, None, None, None);
    assert!(check(&rec, TypeChoice::All, ""));
}

#[test]
fn hairdresser_requires_category_ignoring_case() {
    assert!(check(&record(None, Some("Hairdresser"), None, None), TypeChoice::Hairdresser, ""));
    assert!(!check(&record(Some("Hairdresser Joe"), Some("beauty"), None, None), TypeChoice::Hairdresser, ""));
    assert!(!check(&record(None, None, None, None), TypeChoice::Hairdresser, ""));
}

#[test]
fn beauty_requires_category() {
    assert!(check(&record(None, Some("beauty"), None, None), TypeChoice::Beauty, ""));
    assert!(!check(&record(None, Some("hairdresser"), None, None), TypeChoice::Beauty, ""));
}

#[test]
fn spa_passes_on_category() {
    assert!(check(&record(None, Some("spa"), None, None), TypeChoice::Spa, ""));
}

#[test]
fn spa_passes_on_address_substring() {
    let rec = record(None, None, None, Some("42 Spa Lane"));
    assert!(check(&rec, TypeChoice::Spa, ""));
}

#[test]
fn spa_address_heuristic_matches_spadina() {
    let rec = record(Some("Cuts"), Some("hairdresser"), Some("Toronto"), Some("300, Spadina Ave"));
    assert!(check(&rec, TypeChoice::Spa, ""));
}

#[test]
fn spa_rejects_hairdresser() {
    let rec = record(None, Some("hairdresser"), None, Some("10, Main St"));
    assert!(!check(&rec, TypeChoice::Spa, ""));
}

#[test]
fn name_based_types_use_substring() {
    let rec = record(Some("Bob's BARBERSHOP"), Some("hairdresser"), None, None);
    assert!(check(&rec, TypeChoice::Barber, ""));
    assert!(!check(&rec, TypeChoice::Salon, ""));

    let salon = record(Some("Jane's Salon"), None, None, None);
    assert!(check(&salon, TypeChoice::Salon, ""));
    assert!(!check(&salon, TypeChoice::Saloon, ""));

    let saloon = record(Some("Hair Saloon"), None, None, None);
    assert!(check(&saloon, TypeChoice::Saloon, ""));
    // "saloon" does not contain "salon".
    assert!(!check(&saloon, TypeChoice::Salon, ""));
}

#[test]
fn name_based_types_reject_missing_name() {
    let rec = record(None, Some("hairdresser"), None, None);
    assert!(!check(&rec, TypeChoice::Barber, ""));
}

// -----------------------------------------------------------------------
// Text gate
// -----------------------------------------------------------------------

#[test]
fn blank_query_skips_text_gate() {
    let rec = record(None, None, None, None);
    assert!(check(&rec, TypeChoice::All, "   "));
}

#[test]
fn text_gate_uses_and_semantics() {
    let rec = record(Some("Jane's Salon"), None, Some("Welland"), None);
    assert!(check(&rec, TypeChoice::All, "salon welland"));
    assert!(check(&rec, TypeChoice::All, "  SALON   Welland "));
    assert!(!check(&rec, TypeChoice::All, "salon toronto"));
}

#[test]
fn text_gate_searches_address() {
    let rec = record(Some("Cuts"), None, None, Some("10, Main St, Welland"));
    assert!(check(&rec, TypeChoice::All, "main st"));
}

#[test]
fn text_gate_terms_may_hit_different_fields() {
    let rec = record(Some("Studio"), None, Some("Grimsby"), None);
    assert!(check(&rec, TypeChoice::All, "studio grimsby"));
}

#[test]
fn region_keyword_matches_listed_municipality() {
    let rec = record(Some("Jane's Salon"), None, Some("Welland"), None);
    assert!(check(&rec, TypeChoice::All, "niagara"));
    assert!(check(&rec, TypeChoice::All, " Niagara "));
}

#[test]
fn region_keyword_matches_municipality_in_address() {
    let rec = record(Some("Cuts"), None, None, Some("5, Queen St, St. Catharines"));
    assert!(check(&rec, TypeChoice::All, "niagara"));
}

#[test]
fn region_keyword_rejects_outside_city() {
    let rec = record(Some("Jane's Salon"), None, Some("Toronto"), Some("1, King St, Toronto"));
    assert!(!check(&rec, TypeChoice::All, "niagara"));
}

#[test]
fn region_keyword_only_when_exact() {
    // "niagara salon" is an ordinary two-term query.
    let rec = record(Some("Jane's Salon"), None, Some("Welland"), None);
    assert!(!check(&rec, TypeChoice::All, "niagara salon"));
}

#[test]
fn gates_are_anded() {
    let rec = record(Some("Jane's Salon"), Some("beauty"), Some("Welland"), None);
    assert!(check(&rec, TypeChoice::Beauty, "niagara"));
    assert!(!check(&rec, TypeChoice::Hairdresser, "niagara"));
    assert!(!check(&rec, TypeChoice::Beauty, "toronto"));
}

// -----------------------------------------------------------------------
// Region-only refinement
// -----------------------------------------------------------------------

#[test]
fn region_only_checks_city() {
    let region = Region::niagara();
    assert!(in_region_only(&record(None, None, Some("Niagara Falls"), None), &region));
    assert!(in_region_only(&record(None, None, Some("Pelham"), None), &region));
    assert!(!in_region_only(&record(None, None, Some("Hamilton"), None), &region));
}

#[test]
fn region_only_ignores_address() {
    let region = Region::niagara();
    let rec = record(None, None, None, Some("10, Main St, Welland"));
    assert!(!in_region_only(&rec, &region));
}
