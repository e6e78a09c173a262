use salonmap_core::Region;

fn describe(region: &Region, text: &str) -> String {
    let trimmed = text.trim();
    let lowered = trimmed.to_lowercase();

    if lowered == region.keyword() {
        return format!(
            "\"{trimmed}\" is the region keyword; searching for it matches every business in {}",
            region.name()
        );
    }

    if region.contains(trimmed) {
        let via = region
            .municipalities()
            .iter()
            .find(|m| lowered.contains(m.as_str()))
            .map_or_else(|| "region name".to_string(), |m| format!("municipality \"{m}\""));
        format!("\"{trimmed}\" is in {} ({via})", region.name())
    } else {
        format!("\"{trimmed}\" is not in {}", region.name())
    }
}

pub(crate) fn run_region(region: &Region, text: &str) {
    println!("{}", describe(region, text));
}
