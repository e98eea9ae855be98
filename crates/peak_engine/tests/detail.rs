mod common;

use common::detail_page;
use peak_core::{
    CandidateItem, CoordinatePair, CoordinateSource, ExtractionRules, ItemOutcome, SkipReason,
};
use peak_engine::{
    document_text, extract_classification, resolve_coordinates, ClassificationMatcher,
    CoordinateResolver, DetailAnalyzer,
};
use scraper::Html;

fn item() -> CandidateItem {
    CandidateItem {
        name: "Foo".to_string(),
        elevation_raw: Some(1234),
        address: "https://peaks.test/item/1".to_string(),
        group: "Test Range".to_string(),
    }
}

fn analyzer() -> DetailAnalyzer {
    DetailAnalyzer::new(&ExtractionRules::default()).unwrap()
}

fn resolver() -> CoordinateResolver {
    CoordinateResolver::new(&ExtractionRules::default()).unwrap()
}

#[test]
fn accepted_page_yields_record_with_strict_coordinates() {
    let html = "<html><body>Vrsta: vrh Širina/Dolžina: 46,12° N 14,5° E</body></html>";

    let outcome = analyzer().analyze(&item(), html);

    let ItemOutcome::Accepted(peak) = outcome else {
        panic!("expected accepted outcome, got {outcome:?}");
    };
    assert_eq!(peak.address, "https://peaks.test/item/1");
    assert_eq!(peak.record.name, "Foo");
    assert_eq!(peak.record.elevation, Some(1234));
    assert_eq!(peak.record.group, "Test Range");
    assert_eq!(peak.record.latitude, Some(46.12));
    assert_eq!(peak.record.longitude, Some(14.5));
    assert_eq!(peak.coordinate_source, Some(CoordinateSource::Strict));
}

#[test]
fn non_matching_classification_is_dropped() {
    let outcome = analyzer().analyze(&item(), "<html><body>Vrsta: planina</body></html>");

    assert_eq!(
        outcome,
        ItemOutcome::skipped(
            "Foo",
            SkipReason::ClassificationMismatch {
                label: "planina".to_string()
            }
        )
    );
}

#[test]
fn missing_classification_is_dropped() {
    let outcome = analyzer().analyze(&item(), "<p>Širina/Dolžina: 46,1° N 14,2° E</p>");

    assert_eq!(
        outcome,
        ItemOutcome::skipped("Foo", SkipReason::MissingClassification)
    );
}

#[test]
fn token_is_matched_as_whole_word_case_insensitively() {
    let accepted = analyzer().analyze(&item(), &detail_page("Vrh, razgledišče", "46,3° N 14,1° E"));
    assert!(matches!(accepted, ItemOutcome::Accepted(_)));

    let rejected = analyzer().analyze(&item(), &detail_page("vrhovi", "46,3° N 14,1° E"));
    assert!(matches!(rejected, ItemOutcome::Skipped { .. }));
}

#[test]
fn classification_in_table_layout_stops_at_next_label() {
    let html = detail_page("vrh", "46,3792° N 13,8366° E");
    let document = Html::parse_document(&html);
    let text = document_text(&document);

    let label = extract_classification(&text, &document, &ExtractionRules::default()).unwrap();

    assert_eq!(label.as_deref(), Some("vrh"));
}

#[test]
fn fallback_reads_parent_block_when_primary_finds_nothing() {
    // Page text without the marker leaves only the DOM route.
    let rules = ExtractionRules::default();
    let matcher = ClassificationMatcher::new(&rules).unwrap();
    let document = Html::parse_document("<div><span>Vrsta:</span> vrh</div>");

    assert_eq!(matcher.primary("no marker here"), None);
    assert_eq!(matcher.fallback(&document).as_deref(), Some("vrh"));
    assert_eq!(
        matcher.extract("no marker here", &document).as_deref(),
        Some("vrh")
    );
}

#[test]
fn fallback_gives_up_without_remainder() {
    let matcher = ClassificationMatcher::new(&ExtractionRules::default()).unwrap();
    let document = Html::parse_document("<div><span>Vrsta:</span></div>");

    assert_eq!(matcher.fallback(&document), None);
}

#[test]
fn plausible_strict_match_is_returned_exactly() {
    // The strict pair lies outside the latitude band; a scan would pick the later pair.
    let html = "<p>Vrsta: vrh</p><p>Širina/Dolžina: 40,5° N 13,83667° E</p><p>45,0° 15,0°</p>";
    let document = Html::parse_document(html);

    let resolved = resolver()
        .resolve_document(&document, &document_text(&document))
        .unwrap();

    assert_eq!(resolved.source, CoordinateSource::Strict);
    assert_eq!(resolved.pair, CoordinatePair::new(40.5, 13.83667));
}

#[test]
fn implausible_strict_longitude_falls_back_to_band_scan() {
    // The strict pattern picks up a value that cannot be a longitude here.
    let text = "Vrsta: vrh Širina/Dolžina: 46,5° N 3,5° E Koordinate: 46,25° 14,75°";

    let resolved = resolve_coordinates(text, &ExtractionRules::default())
        .unwrap()
        .unwrap();

    assert_eq!(resolved.source, CoordinateSource::BandScan);
    assert_eq!(resolved.pair, CoordinatePair::new(46.25, 14.75));
}

#[test]
fn band_scan_uses_whole_page_when_label_node_has_no_numbers() {
    let html = "<p><b>Širina/Dolžina:</b><span>46,2°</span>N <span>15,1°</span>E</p>";
    let document = Html::parse_document(html);

    let resolved = resolver()
        .resolve_document(&document, &document_text(&document))
        .unwrap();

    assert_eq!(resolved.source, CoordinateSource::BandScan);
    assert_eq!(resolved.pair, CoordinatePair::new(46.2, 15.1));
}

#[test]
fn first_two_values_are_a_weak_last_resort() {
    let text = "Lega: 12,5° 3,25° 1,5°";

    let resolved = resolve_coordinates(text, &ExtractionRules::default())
        .unwrap()
        .unwrap();

    assert_eq!(resolved.source, CoordinateSource::FirstPair);
    assert!(resolved.source.is_weak());
    assert_eq!(resolved.pair, CoordinatePair::new(12.5, 3.25));
}

#[test]
fn implausible_strict_match_is_kept_when_nothing_else_exists() {
    let text = "Širina/Dolžina: 46° N 5° E";

    let resolved = resolve_coordinates(text, &ExtractionRules::default())
        .unwrap()
        .unwrap();

    assert_eq!(resolved.source, CoordinateSource::UncheckedStrict);
    assert_eq!(resolved.pair, CoordinatePair::new(46.0, 5.0));
}

#[test]
fn no_degree_values_resolve_to_nothing() {
    let resolved = resolve_coordinates("Vrsta: vrh Širina/Dolžina: ni podatka", &ExtractionRules::default())
        .unwrap();
    assert_eq!(resolved, None);

    let outcome = analyzer().analyze(&item(), "<p>Vrsta: vrh</p>");
    let ItemOutcome::Accepted(peak) = outcome else {
        panic!("expected accepted outcome");
    };
    assert_eq!(peak.record.latitude, None);
    assert_eq!(peak.record.longitude, None);
    assert_eq!(peak.coordinate_source, None);
}

#[test]
fn bands_are_configurable() {
    let rules = ExtractionRules {
        bands: peak_core::PlausibilityBands {
            latitude: 60.0..=70.0,
            longitude: 20.0..=30.0,
        },
        ..ExtractionRules::default()
    };
    let text = "46,1° 14,2° 61,5° 25,5°";

    let resolved = resolve_coordinates(text, &rules).unwrap().unwrap();

    assert_eq!(resolved.source, CoordinateSource::BandScan);
    assert_eq!(resolved.pair, CoordinatePair::new(61.5, 25.5));
}
