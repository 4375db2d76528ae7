//! Summary statistics over the canonical table.
//!
//! Everything here is computed from the final station list only and is
//! read-only; rendering writes to an injected writer so tests can capture it.

use std::collections::HashMap;
use std::io::{self, Write};
use std::path::Path;

use gsdb_core::{Brand, CanonicalStation};

use crate::aggregate::Aggregate;

/// Bucket label for stations without a resolved city.
pub(crate) const UNKNOWN_CITY: &str = "(unknown)";

const RULE: &str = "============================================================";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ReportOptions {
    pub top_cities: usize,
    /// Brand whose missing cities are listed as coverage gaps.
    pub focus_brand: Brand,
}

// ---------------------------------------------------------------------------
// Section types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CompletenessField {
    City,
    FuelTypes,
    Services,
    Phone,
    WorkingHours,
}

impl CompletenessField {
    pub(crate) const ALL: [Self; 5] = [
        Self::City,
        Self::FuelTypes,
        Self::Services,
        Self::Phone,
        Self::WorkingHours,
    ];

    pub(crate) fn column(self) -> &'static str {
        match self {
            Self::City => "city",
            Self::FuelTypes => "fuel_types",
            Self::Services => "services",
            Self::Phone => "phone",
            Self::WorkingHours => "working_hours",
        }
    }

    fn value(self, station: &CanonicalStation) -> &str {
        match self {
            Self::City => &station.city,
            Self::FuelTypes => &station.fuel_types,
            Self::Services => &station.services,
            Self::Phone => &station.phone,
            Self::WorkingHours => &station.working_hours,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Completeness {
    pub field: CompletenessField,
    pub count: usize,
    /// Rounded down; 0 for an empty table.
    pub percent: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MarketShare {
    pub brand: Brand,
    pub count: usize,
    /// Percent of all stations, one decimal.
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CityBreakdown {
    pub city: String,
    pub total: usize,
    /// Non-zero brand counts in pipeline order.
    pub by_brand: Vec<(Brand, usize)>,
}

/// Fuel or service labels tracked per brand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Feature {
    Cng,
    Lpg,
    WayMart,
    Wc,
    Charger,
    ServiceCenter,
}

impl Feature {
    pub(crate) const ALL: [Self; 6] = [
        Self::Cng,
        Self::Lpg,
        Self::WayMart,
        Self::Wc,
        Self::Charger,
        Self::ServiceCenter,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Cng => "CNG",
            Self::Lpg => "LPG",
            Self::WayMart => "Way-Mart",
            Self::Wc => "WC",
            Self::Charger => "Charger",
            Self::ServiceCenter => "Service Center",
        }
    }

    /// Matched against `fuel_types`; everything else against `services`.
    pub(crate) fn is_fuel(self) -> bool {
        matches!(self, Self::Cng | Self::Lpg)
    }

    /// Case-insensitive substring match against the relevant list column.
    fn present_in(self, station: &CanonicalStation) -> bool {
        let haystack = if self.is_fuel() {
            &station.fuel_types
        } else {
            &station.services
        };
        haystack
            .to_lowercase()
            .contains(&self.label().to_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FeaturePresence {
    pub brand: Brand,
    /// Indexed like [`Feature::ALL`].
    pub counts: [usize; 6],
}

impl FeaturePresence {
    pub(crate) fn count(&self, feature: Feature) -> usize {
        Feature::ALL
            .iter()
            .position(|f| *f == feature)
            .map_or(0, |idx| self.counts[idx])
    }
}

/// A fuel the focus brand sells, against the best-placed competitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FuelLead {
    pub feature: Feature,
    pub count: usize,
    pub competitor_max: usize,
}

/// A service as a share of the focus brand's own stations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ServiceShare {
    pub feature: Feature,
    pub count: usize,
    /// Rounded half up; 0 when the brand has no stations.
    pub percent: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FocusInsights {
    pub brand: Brand,
    pub stations: usize,
    /// Share of all stations, one decimal.
    pub share: f64,
    pub fuels: Vec<FuelLead>,
    pub services: Vec<ServiceShare>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GapPriority {
    High,
    Medium,
    Low,
}

impl GapPriority {
    fn from_competitors(count: usize) -> Self {
        if count >= 10 {
            Self::High
        } else if count >= 5 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CoverageGap {
    pub city: String,
    pub competitor_stations: usize,
    pub brands: Vec<Brand>,
    pub priority: GapPriority,
}

/// Minimum competitor presence for a city to count as a gap.
const MIN_GAP_COMPETITORS: usize = 2;

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Report {
    pub total: usize,
    pub top_cities_limit: usize,
    pub focus_brand: Brand,
    /// Alphabetical by brand display name; brands with no stations omitted.
    pub brand_counts: Vec<(Brand, usize)>,
    /// Count descending, ties in first-encounter order.
    pub top_cities: Vec<(String, usize)>,
    pub completeness: Vec<Completeness>,
    pub market_share: Vec<MarketShare>,
    pub city_breakdown: Vec<CityBreakdown>,
    pub features: Vec<FeaturePresence>,
    pub focus: FocusInsights,
    pub coverage_gaps: Vec<CoverageGap>,
}

impl Report {
    #[must_use]
    pub(crate) fn build(stations: &[CanonicalStation], options: ReportOptions) -> Self {
        let known = known_cities(stations);
        let features = feature_presence(stations);
        let focus = focus_insights(stations, &features, options.focus_brand);

        Self {
            total: stations.len(),
            top_cities_limit: options.top_cities,
            focus_brand: options.focus_brand,
            brand_counts: brand_counts(stations),
            top_cities: top_cities(stations, options.top_cities),
            completeness: completeness(stations),
            market_share: market_share(stations),
            city_breakdown: known.iter().take(options.top_cities).cloned().collect(),
            features,
            focus,
            coverage_gaps: coverage_gaps(&known, options.focus_brand),
        }
    }
}

fn brand_index(brand: Brand) -> usize {
    Brand::ALL.iter().position(|b| *b == brand).unwrap_or(0)
}

fn count_by_brand(stations: &[CanonicalStation]) -> [usize; 5] {
    let mut counts = [0; 5];
    for station in stations {
        counts[brand_index(station.brand)] += 1;
    }
    counts
}

pub(crate) fn brand_counts(stations: &[CanonicalStation]) -> Vec<(Brand, usize)> {
    let counts = count_by_brand(stations);
    let mut out: Vec<(Brand, usize)> = Brand::ALL
        .into_iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .collect();
    out.sort_by_key(|(brand, _)| brand.as_str());
    out
}

/// City counts in first-encounter order, `(unknown)` bucket included.
fn city_counts(stations: &[CanonicalStation]) -> Vec<(String, usize)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for station in stations {
        let city = if station.city.is_empty() {
            UNKNOWN_CITY
        } else {
            station.city.as_str()
        };
        if let Some(&idx) = index.get(city) {
            counts[idx].1 += 1;
        } else {
            index.insert(city, counts.len());
            counts.push((city.to_string(), 1));
        }
    }

    counts
}

pub(crate) fn top_cities(stations: &[CanonicalStation], limit: usize) -> Vec<(String, usize)> {
    let mut counts = city_counts(stations);
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(limit);
    counts
}

pub(crate) fn completeness(stations: &[CanonicalStation]) -> Vec<Completeness> {
    let total = stations.len();
    CompletenessField::ALL
        .into_iter()
        .map(|field| {
            let count = stations
                .iter()
                .filter(|s| !field.value(s).is_empty())
                .count();
            let percent = if total == 0 { 0 } else { 100 * count / total };
            Completeness {
                field,
                count,
                percent,
            }
        })
        .collect()
}

/// Percent with one decimal; 0 for an empty total.
#[allow(clippy::cast_precision_loss)]
fn share_percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 / total as f64 * 1000.0).round() / 10.0
}

/// Whole percent rounded half up; 0 for an empty total.
fn rounded_percent(count: usize, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    (count * 200 + total) / (total * 2)
}

pub(crate) fn market_share(stations: &[CanonicalStation]) -> Vec<MarketShare> {
    let total = stations.len();
    if total == 0 {
        return Vec::new();
    }

    let counts = count_by_brand(stations);
    let mut shares: Vec<MarketShare> = Brand::ALL
        .into_iter()
        .zip(counts)
        .map(|(brand, count)| MarketShare {
            brand,
            count,
            percent: share_percent(count, total),
        })
        .collect();
    shares.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.brand.as_str().cmp(b.brand.as_str()))
    });
    shares
}

/// Known cities with per-brand counts, busiest first.
fn known_cities(stations: &[CanonicalStation]) -> Vec<CityBreakdown> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut cities: Vec<(&str, [usize; 5])> = Vec::new();

    for station in stations.iter().filter(|s| !s.city.is_empty()) {
        let slot = match index.get(station.city.as_str()) {
            Some(&idx) => idx,
            None => {
                index.insert(station.city.as_str(), cities.len());
                cities.push((station.city.as_str(), [0; 5]));
                cities.len() - 1
            }
        };
        cities[slot].1[brand_index(station.brand)] += 1;
    }

    let mut breakdown: Vec<CityBreakdown> = cities
        .into_iter()
        .map(|(city, counts)| CityBreakdown {
            city: city.to_string(),
            total: counts.iter().sum(),
            by_brand: Brand::ALL
                .into_iter()
                .zip(counts)
                .filter(|(_, count)| *count > 0)
                .collect(),
        })
        .collect();
    breakdown.sort_by(|a, b| b.total.cmp(&a.total));
    breakdown
}

pub(crate) fn feature_presence(stations: &[CanonicalStation]) -> Vec<FeaturePresence> {
    Brand::ALL
        .into_iter()
        .map(|brand| {
            let mut counts = [0; 6];
            for station in stations.iter().filter(|s| s.brand == brand) {
                for (slot, feature) in counts.iter_mut().zip(Feature::ALL) {
                    if feature.present_in(station) {
                        *slot += 1;
                    }
                }
            }
            FeaturePresence { brand, counts }
        })
        .collect()
}

pub(crate) fn focus_insights(
    stations: &[CanonicalStation],
    features: &[FeaturePresence],
    focus: Brand,
) -> FocusInsights {
    let own = features.iter().find(|p| p.brand == focus);
    let own_count = |feature: Feature| own.map_or(0, |p| p.count(feature));
    let own_stations = stations.iter().filter(|s| s.brand == focus).count();

    let fuels = Feature::ALL
        .into_iter()
        .filter(|f| f.is_fuel())
        .map(|feature| FuelLead {
            feature,
            count: own_count(feature),
            competitor_max: features
                .iter()
                .filter(|p| p.brand != focus)
                .map(|p| p.count(feature))
                .max()
                .unwrap_or(0),
        })
        .collect();

    let services = Feature::ALL
        .into_iter()
        .filter(|f| !f.is_fuel())
        .map(|feature| {
            let count = own_count(feature);
            ServiceShare {
                feature,
                count,
                percent: rounded_percent(count, own_stations),
            }
        })
        .collect();

    FocusInsights {
        brand: focus,
        stations: own_stations,
        share: share_percent(own_stations, stations.len()),
        fuels,
        services,
    }
}

fn coverage_gaps(known: &[CityBreakdown], focus: Brand) -> Vec<CoverageGap> {
    let mut gaps: Vec<CoverageGap> = known
        .iter()
        .filter(|c| c.by_brand.iter().all(|(brand, _)| *brand != focus))
        .filter(|c| c.total >= MIN_GAP_COMPETITORS)
        .map(|c| CoverageGap {
            city: c.city.clone(),
            competitor_stations: c.total,
            brands: c.by_brand.iter().map(|(brand, _)| *brand).collect(),
            priority: GapPriority::from_competitors(c.total),
        })
        .collect();
    gaps.sort_by(|a, b| {
        b.competitor_stations
            .cmp(&a.competitor_stations)
            .then_with(|| a.city.cmp(&b.city))
    });
    gaps
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Banner, per-brand audit and the final totals of a combine run.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub(crate) fn render_run_summary<W: Write>(
    out: &mut W,
    aggregate: &Aggregate,
    output_path: &Path,
) -> io::Result<()> {
    writeln!(out, "{RULE}")?;
    writeln!(out, "Combining Georgia gas station datasets")?;
    writeln!(out, "{RULE}")?;

    for summary in &aggregate.summaries {
        writeln!(out)?;
        writeln!(out, "{}:", summary.brand)?;
        writeln!(out, "  Loaded:   {}", summary.loaded)?;
        writeln!(out, "  Kept:     {}", summary.kept)?;
        writeln!(out, "  Excluded: {}", summary.excluded.len())?;
        for record in &summary.excluded {
            writeln!(
                out,
                "    - ID {} ({}): {}",
                record.source_id, record.display_name, record.reason
            )?;
        }
    }

    writeln!(out)?;
    writeln!(out, "{RULE}")?;
    writeln!(
        out,
        "FINAL: {} gas stations saved to {}",
        aggregate.stations.len(),
        output_path.display()
    )?;
    writeln!(
        out,
        "Excluded: {} non-station entries",
        aggregate.total_excluded()
    )?;
    writeln!(out, "{RULE}")
}

/// All statistics sections, in console order.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub(crate) fn render_report<W: Write>(out: &mut W, report: &Report) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "By brand:")?;
    for (brand, count) in &report.brand_counts {
        writeln!(out, "  {brand}: {count}")?;
    }

    writeln!(out)?;
    writeln!(out, "Top {} cities:", report.top_cities_limit)?;
    for (city, count) in &report.top_cities {
        writeln!(out, "  {city}: {count}")?;
    }

    writeln!(out)?;
    writeln!(out, "Data completeness ({} total):", report.total)?;
    for entry in &report.completeness {
        let label = format!("{}:", entry.field.column());
        writeln!(out, "  {label:<15}{} ({}%)", entry.count, entry.percent)?;
    }

    writeln!(out)?;
    writeln!(out, "Market share:")?;
    for share in &report.market_share {
        writeln!(
            out,
            "  {}: {} ({:.1}%)",
            share.brand, share.count, share.percent
        )?;
    }

    writeln!(out)?;
    writeln!(out, "City breakdown:")?;
    for city in &report.city_breakdown {
        writeln!(
            out,
            "  {} ({}): {}",
            city.city,
            city.total,
            join_counts(&city.by_brand)
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Fuel and service presence:")?;
    for presence in &report.features {
        let counts: Vec<String> = Feature::ALL
            .into_iter()
            .map(|f| format!("{} {}", f.label(), presence.count(f)))
            .collect();
        writeln!(out, "  {}: {}", presence.brand, counts.join(", "))?;
    }

    let focus = &report.focus;
    writeln!(out)?;
    writeln!(
        out,
        "{} insights ({} stations, {:.1}% share):",
        focus.brand, focus.stations, focus.share
    )?;
    for fuel in &focus.fuels {
        writeln!(
            out,
            "  {}: {} (top competitor {})",
            fuel.feature.label(),
            fuel.count,
            fuel.competitor_max
        )?;
    }
    for service in &focus.services {
        writeln!(
            out,
            "  {}: {} ({}%)",
            service.feature.label(),
            service.count,
            service.percent
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Coverage gaps for {}:", report.focus_brand)?;
    if report.coverage_gaps.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for gap in &report.coverage_gaps {
        let brands: Vec<&str> = gap.brands.iter().copied().map(Brand::as_str).collect();
        writeln!(
            out,
            "  {}: {} competitor stations [{}] ({})",
            gap.city,
            gap.competitor_stations,
            gap.priority.as_str(),
            brands.join(", ")
        )?;
    }

    Ok(())
}

fn join_counts(counts: &[(Brand, usize)]) -> String {
    counts
        .iter()
        .map(|(brand, count)| format!("{brand} {count}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
