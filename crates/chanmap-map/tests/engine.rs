use std::collections::BTreeSet;

use chanmap_map::{
    ClaimSet, Dictionary, MatchEngine, MatchOptions, SimilarityMetric, Variable,
    variables_from_headers,
};
use chanmap_model::{DictionaryEntry, Match, MatchSet, MatchType, ResolutionStatus};

fn rules_only() -> MatchOptions {
    MatchOptions {
        generic_fallback: false,
        ..MatchOptions::default()
    }
}

fn run(sources: &[&str], targets: &[&str], options: MatchOptions) -> MatchSet {
    MatchEngine::new(Dictionary::default())
        .with_options(options)
        .run(&variables_from_headers(sources), &variables_from_headers(targets))
}

fn of_type(matches: &MatchSet, match_type: MatchType) -> Vec<&Match> {
    matches.iter().filter(|m| m.match_type == match_type).collect()
}

#[test]
fn identical_names_match_exactly() {
    let matches = run(&["Steer_SW"], &["Steer_SW"], rules_only());
    assert_eq!(matches.len(), 1);
    let m = &matches.as_slice()[0];
    assert_eq!(m.match_type, MatchType::Exact);
    assert_eq!(m.confidence, 1.0);

    // The generic passes may add their own proposal but never a second exact one.
    let with_fallback = run(&["Steer_SW"], &["Steer_SW"], MatchOptions::default());
    assert_eq!(of_type(&with_fallback, MatchType::Exact).len(), 1);
}

#[test]
fn wheel_speed_maps_to_sim_corner() {
    let matches = run(&["FL Wheel Speed"], &["AVy_L1", "AVy_R1"], rules_only());
    assert_eq!(matches.len(), 1);
    let m = &matches.as_slice()[0];
    assert_eq!(m.target_name, "AVy_L1");
    assert_eq!(m.confidence, 1.0);
    assert_eq!(m.match_type, MatchType::Wheel);
    assert!(m.note.contains("FL=L1"), "note was {:?}", m.note);
}

#[test]
fn suspension_proposes_jounce_and_compression() {
    let matches = run(&["FL Susp Pos"], &["Jnc_L1", "CmpT_L1", "Jnc_R1"], rules_only());
    let pairs: Vec<(&str, f32)> = matches
        .iter()
        .map(|m| (m.target_name.as_str(), m.confidence))
        .collect();
    assert_eq!(pairs, vec![("Jnc_L1", 1.0), ("CmpT_L1", 0.95)]);
}

#[test]
fn resolution_keeps_best_match_per_target() {
    let matches = MatchSet::from(vec![
        Match::new("FL Susp Pos", "Jnc_L1", 0.95, MatchType::Suspension, ""),
        Match::new("Susp Pos FL", "Jnc_L1", 1.0, MatchType::Suspension, ""),
    ]);
    let resolution = matches.resolve(0.9);
    assert_eq!(resolution.kept.len(), 1);
    assert_eq!(resolution.kept[0].confidence, 1.0);
    assert_eq!(resolution.skipped.len(), 1);
    assert_eq!(resolution.skipped[0].matched.confidence, 0.95);
    assert_eq!(resolution.skipped[0].reason.to_string(), "duplicate target");
}

#[test]
fn empty_resolution_is_reported() {
    let matches = run(&["Gear"], &["Gear_OL"], rules_only());
    assert_eq!(matches.len(), 1);
    let resolution = matches.resolve(0.9);
    assert!(matches!(resolution.status(), ResolutionStatus::Empty { .. }));
}

#[test]
fn full_logger_header_against_rules() {
    let sources = [
        "Time",
        "C185 G Force Lat",
        "FL Wheel Speed",
        "FL Susp Pos",
        "Brake Pressure Front",
        "RR Rotor Temp Max",
        "Engine Speed",
        "Gear",
        "GPS Latitude",
        "Ground Speed",
        "Drive Speed",
        "Fuel Flow",
        "Odometer",
        "Steered Angle",
        "Unrelated Channel",
    ];
    let targets = [
        "Time", "Ay_SM", "Ay_Rd", "AVy_L1", "Jnc_L1", "CmpT_L1", "PbkCh_L1", "PbkCh_R1",
        "T_Rtr_R2", "AV_Eng", "GearStat", "Gear_CL", "GPS_Lat", "Vx", "Vx_SM", "Qfuel",
        "Station", "Steer_SW", "Steer_L1",
    ];
    let matches = run(&sources, &targets, rules_only());
    assert_eq!(matches.len(), 20);

    let counts = matches.count_by_type();
    assert_eq!(counts[&MatchType::Exact], 1);
    assert_eq!(counts[&MatchType::Acceleration], 2);
    assert_eq!(counts[&MatchType::Brake], 2);
    assert_eq!(counts[&MatchType::Powertrain], 3);
    assert_eq!(counts[&MatchType::Velocity], 3);
    assert_eq!(counts[&MatchType::Steering], 2);

    let rotor: Vec<&Match> = matches.for_source("RR Rotor Temp Max").collect();
    assert_eq!(rotor.len(), 1);
    assert_eq!(rotor[0].target_name, "T_Rtr_R2");
    assert_eq!(rotor[0].confidence, 1.0);

    let resolution = matches.resolve(0.9);
    assert_eq!(resolution.kept.len(), 19);
    assert_eq!(resolution.skipped.len(), 1);
    assert_eq!(resolution.skipped[0].matched.source_name, "Drive Speed");
    assert!(matches.for_source("Unrelated Channel").next().is_none());

    let confidences: Vec<f32> = resolution.kept.iter().map(|m| m.confidence).collect();
    assert!(confidences.windows(2).all(|pair| pair[0] >= pair[1]));
}

fn rotor_dictionary() -> Dictionary {
    Dictionary::load(vec![
        DictionaryEntry::new("T_Rtr_L1", "Rotor temperature front left"),
        DictionaryEntry::new("T_Rtr_R1", "Rotor temperature front right"),
        DictionaryEntry::new("Vx", "Longitudinal speed"),
    ])
}

#[test]
fn generic_passes_fill_in_behind_rules() {
    let sources = variables_from_headers([
        "front left rotor temperature",
        "left front rotor temperature average",
    ]);
    let targets = variables_from_headers(["T_Rtr_L1", "T_Rtr_R1", "Vx"]);
    let matches = MatchEngine::new(rotor_dictionary()).run(&sources, &targets);

    // The second source only resembles the front-left longhand, whose target
    // is already taken, so it must not drift onto the front-right sibling.
    let summary: Vec<(&str, &str, f32, MatchType)> = matches
        .iter()
        .map(|m| {
            (
                m.source_name.as_str(),
                m.target_name.as_str(),
                m.confidence,
                m.match_type,
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![(
            "front left rotor temperature",
            "T_Rtr_L1",
            1.0,
            MatchType::DictionaryExact
        )]
    );
    assert_eq!(matches.as_slice()[0].description, "Rotor temperature front left");
}

#[test]
fn semantic_expansion_ignores_claimed_targets() {
    let engine = MatchEngine::new(rotor_dictionary());
    let sources = variables_from_headers(["left front rotor temperature average"]);
    let targets = variables_from_headers(["T_Rtr_L1", "T_Rtr_R1", "Vx"]);

    let mut open = ClaimSet::new();
    let found = engine.semantic_pass(&sources, &targets, &mut open);
    let pairs: Vec<(&str, f32)> = found
        .iter()
        .map(|m| (m.target_name.as_str(), m.confidence))
        .collect();
    assert_eq!(pairs, vec![("T_Rtr_L1", 1.0)]);
    assert_eq!(found[0].note, "Semantic match via \"Rotor temperature front left\"");
    assert!(open.is_source_claimed("left front rotor temperature average"));
    assert!(open.is_target_claimed("T_Rtr_L1"));

    let mut taken = ClaimSet::new();
    taken.claim("front left rotor temperature", "T_Rtr_L1");
    assert!(engine.semantic_pass(&sources, &targets, &mut taken).is_empty());
    assert!(!taken.is_target_claimed("T_Rtr_R1"));
}

#[test]
fn semantic_pass_never_reuses_dictionary_claims() {
    let options = MatchOptions {
        metric: SimilarityMetric::Sequence,
        ..MatchOptions::default()
    };
    let sources = variables_from_headers([
        "rotor temperature front left",
        "right front rtr temp",
        "longitudinal speed",
    ]);
    let targets = variables_from_headers(["T_Rtr_L1", "T_Rtr_R1", "Vx"]);
    let matches = MatchEngine::new(rotor_dictionary())
        .with_options(options)
        .run(&sources, &targets);

    let dictionary_matches: Vec<&Match> = matches
        .iter()
        .filter(|m| m.match_type.is_generic() && m.match_type != MatchType::Semantic)
        .collect();
    let claimed_sources: BTreeSet<&str> = dictionary_matches
        .iter()
        .map(|m| m.source_name.as_str())
        .collect();
    let claimed_targets: BTreeSet<&str> = dictionary_matches
        .iter()
        .map(|m| m.target_name.as_str())
        .collect();
    assert_eq!(dictionary_matches.len(), 2);

    // Abbreviated and reordered, the second source is too far from any
    // description by character sequence, but its tokens expand it to the
    // front-right longhand.
    let semantic = of_type(&matches, MatchType::Semantic);
    assert_eq!(semantic.len(), 1);
    assert_eq!(semantic[0].source_name, "right front rtr temp");
    assert_eq!(semantic[0].target_name, "T_Rtr_R1");
    for m in semantic {
        assert!(!claimed_sources.contains(m.source_name.as_str()));
        assert!(!claimed_targets.contains(m.target_name.as_str()));
    }
}

#[test]
fn fallback_can_be_disabled() {
    let sources = variables_from_headers(["front left rotor temperature"]);
    let targets = variables_from_headers(["T_Rtr_L1"]);
    let matches = MatchEngine::new(rotor_dictionary())
        .with_options(rules_only())
        .run(&sources, &targets);
    assert!(matches.is_empty());
}

#[test]
fn sequence_metric_drives_generic_passes() {
    let options = MatchOptions {
        metric: SimilarityMetric::Sequence,
        ..MatchOptions::default()
    };
    let sources = [Variable::new("GPS LatA")];
    let targets = [Variable::new("GPS_Lat"), Variable::new("Vx")];
    let matches = MatchEngine::new(Dictionary::default())
        .with_options(options)
        .run(&sources, &targets);
    assert_eq!(matches.len(), 1);
    let m = &matches.as_slice()[0];
    assert_eq!(m.target_name, "GPS_Lat");
    assert_eq!(m.match_type, MatchType::DictionaryExact);
    assert_eq!(m.confidence, 0.923);
}

#[test]
fn empty_inputs_produce_no_matches() {
    assert!(run(&[], &["Vx"], MatchOptions::default()).is_empty());
    assert!(run(&["Ground Speed"], &[], MatchOptions::default()).is_empty());
}
