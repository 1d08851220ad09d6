// tests/ranking.rs
//
// Ranking rules over hand-built flights, plus a property check over random
// result tables.
use std::collections::HashSet;

use proptest::prelude::*;
use xc_cup_ranker::data::Flight;
use xc_cup_ranker::error::Error;
use xc_cup_ranker::ranking::{Decision, RankingFilter};
use xc_cup_ranker::roster::Roster;

fn flight(pilot: &str, site: &str, points: &str) -> Flight {
    Flight {
        take_off_time: "11:00".into(),
        pilot_name: pilot.into(),
        launch_site: site.into(),
        route_type: "free flight".into(),
        distance: "40.0".into(),
        points: points.into(),
        avg_speed: "20.0 km/h".into(),
        glider: "Advance Iota".into(),
    }
}

#[test]
fn site_must_match_exactly() {
    let roster = Roster::from_names(1, ["Jane Doe"]);
    let mut filter = RankingFilter::new("Fiesch", &roster);

    assert_eq!(filter.offer(flight("Jane Doe", "fiesch", "90")).unwrap(), Decision::WrongSite);
    assert_eq!(filter.offer(flight("Jane Doe", "Fiesch ", "89")).unwrap(), Decision::WrongSite);
    assert_eq!(filter.offer(flight("Jane Doe", "Fiesch", "88")).unwrap(), Decision::Accepted(1));
}

#[test]
fn first_flight_of_a_pilot_wins() {
    let roster = Roster::from_names(1, ["Jane Doe", "Max Muster"]);
    let mut filter = RankingFilter::new("Fiesch", &roster);

    assert_eq!(filter.offer(flight("Jane Doe", "Fiesch", "120")).unwrap(), Decision::Accepted(1));
    assert_eq!(filter.offer(flight("Jane Doe", "Fiesch", "110")).unwrap(), Decision::Duplicate);
    assert_eq!(filter.offer(flight("Max Muster", "Fiesch", "100")).unwrap(), Decision::Accepted(2));

    let results = filter.finish();
    assert_eq!(results.get("Jane Doe").unwrap().flight.points, "120");
    assert_eq!(results.len(), 2);
}

#[test]
fn unregistered_pilots_do_not_consume_ranks() {
    let roster = Roster::from_names(1, ["B"]);
    let mut filter = RankingFilter::new("Fiesch", &roster);

    assert_eq!(filter.offer(flight("A", "Fiesch", "90")).unwrap(), Decision::NotRegistered);
    assert_eq!(filter.offer(flight("B", "Fiesch", "80")).unwrap(), Decision::Accepted(1));
    assert!(!filter.results().contains("A"));
}

#[test]
fn names_are_case_sensitive() {
    let roster = Roster::from_names(1, ["Jane Doe"]);
    let mut filter = RankingFilter::new("Fiesch", &roster);
    assert_eq!(filter.offer(flight("jane doe", "Fiesch", "90")).unwrap(), Decision::NotRegistered);
}

#[test]
fn missing_roster_fails_on_first_candidate() {
    let roster = Roster::missing(4, "data/2024/participants/4.csv");
    let mut filter = RankingFilter::new("Fiesch", &roster);

    assert_eq!(filter.offer(flight("A", "Grindelwald", "90")).unwrap(), Decision::WrongSite);
    let err = filter.offer(flight("A", "Fiesch", "80")).unwrap_err();
    assert!(matches!(err, Error::RosterMissing { event_id: 4, .. }));
}

#[test]
fn rising_points_are_counted_not_rejected() {
    let roster = Roster::from_names(1, ["A", "B", "C"]);
    let mut filter = RankingFilter::new("Fiesch", &roster);

    filter.offer(flight("A", "Fiesch", "50")).unwrap();
    filter.offer(flight("B", "Fiesch", "70")).unwrap();
    filter.offer(flight("C", "Fiesch", "60")).unwrap();

    assert_eq!(filter.order_breaks(), 1);
    assert_eq!(filter.results().len(), 3);
}

const PILOTS: [&str; 6] = ["Ann", "Ben", "Cleo", "Dan", "Eva", "Finn"];
const SITES: [&str; 3] = ["Fiesch", "Grindelwald", "Niesen"];

prop_compose! {
    fn any_row()(pilot in 0..PILOTS.len(), site in 0..SITES.len(), points in 0u32..500) -> Flight {
        flight(PILOTS[pilot], SITES[site], &points.to_string())
    }
}

proptest! {
    #[test]
    fn ranking_invariants_hold(
        rows in prop::collection::vec(any_row(), 0..60),
        registered in prop::collection::hash_set(prop::sample::select(PILOTS.to_vec()), 0..=PILOTS.len()),
    ) {
        let roster = Roster::from_names(1, registered.iter().copied());
        let mut filter = RankingFilter::new("Fiesch", &roster);
        for row in &rows {
            filter.offer(row.clone()).unwrap();
        }
        let results = filter.finish();

        let mut seen = HashSet::new();
        for (i, rec) in results.iter().enumerate() {
            prop_assert_eq!(rec.rank as usize, i + 1);
            prop_assert_eq!(rec.flight.launch_site.as_str(), "Fiesch");
            prop_assert!(registered.contains(rec.flight.pilot_name.as_str()));
            prop_assert!(seen.insert(rec.flight.pilot_name.clone()));

            let first = rows
                .iter()
                .find(|f| f.pilot_name == rec.flight.pilot_name && f.launch_site == "Fiesch")
                .unwrap();
            prop_assert_eq!(first, &rec.flight);
        }

        let expected: HashSet<_> = rows
            .iter()
            .filter(|f| f.launch_site == "Fiesch" && registered.contains(f.pilot_name.as_str()))
            .map(|f| f.pilot_name.clone())
            .collect();
        prop_assert_eq!(seen, expected);
    }
}
