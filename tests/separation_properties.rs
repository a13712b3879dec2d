/// Properties that hold for every target and date
#[cfg(test)]
mod separation_properties {
    use chrono::{Datelike, Days, NaiveDate};
    use sun_avoidance::utils::config::REFERENCE_YEAR;
    use sun_avoidance::utils::time_utils::reference_year_days;
    use sun_avoidance::{LocalCatalog, Mission, SkyPosition, VisibilityChecker};

    fn sample_targets() -> Vec<SkyPosition> {
        let mut targets = Vec::new();
        for dec in [-89.0, -60.0, -23.0, 0.0, 23.0, 45.0, 66.56, 89.0] {
            for ra in [0.0, 47.5, 133.0, 201.3, 270.0, 345.0] {
                targets.push(SkyPosition::new(ra, dec));
            }
        }
        targets
    }

    fn sample_dates() -> Vec<NaiveDate> {
        let start = NaiveDate::from_ymd_opt(2019, 1, 3).unwrap();
        (0..24)
            .map(|n| start.checked_add_days(Days::new(n * 61)).unwrap())
            .collect()
    }

    #[test]
    fn test_both_is_conjunction_of_missions() {
        let checker = VisibilityChecker::offline();
        for target in sample_targets() {
            for date in sample_dates() {
                let a = checker.is_visible(&target, date, Mission::Cheops).unwrap();
                let b = checker.is_visible(&target, date, Mission::Jwst).unwrap();
                let both = checker.is_visible(&target, date, Mission::Both).unwrap();
                assert_eq!(both, a && b, "{target} on {date}");
            }
        }
    }

    #[test]
    fn test_separation_symmetric_and_bounded() {
        let targets = sample_targets();
        for p in &targets {
            for q in &targets {
                let pq = p.separation(q);
                let qp = q.separation(p);
                assert!((0.0..=180.0).contains(&pq));
                assert!((pq - qp).abs() < 1e-12);
            }
        }

        let checker = VisibilityChecker::offline();
        for target in &targets {
            for date in sample_dates() {
                let sep = checker.solar_separation(target, date).unwrap();
                assert!((0.0..=180.0).contains(&sep));
            }
        }
    }

    #[test]
    fn test_ranges_closed_with_valid_labels() {
        let checker = VisibilityChecker::offline();
        let year_days = reference_year_days();
        for target in sample_targets() {
            let track = checker.annual_track(&target).unwrap();
            assert_eq!(track.len(), 365);
            for mission in Mission::ALL {
                for range in track.visibility(mission).ranges() {
                    assert_eq!(range.start.year(), REFERENCE_YEAR);
                    assert_eq!(range.end.year(), REFERENCE_YEAR);
                    assert!(year_days.contains(&range.start));
                    assert!(year_days.contains(&range.end));

                    for label in [range.start_label(), range.end_label()] {
                        let parsed = NaiveDate::parse_from_str(
                            &format!("{REFERENCE_YEAR}{label}"),
                            "%Y%m%d",
                        );
                        assert!(parsed.is_ok(), "bad label {label}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_ranges_agree_with_daily_checks() {
        let checker = VisibilityChecker::offline();
        let catalog = LocalCatalog::builtin();
        let wasp12 = catalog.get("WASP-12").unwrap().position();
        let report = checker.annual_visibility("WASP-12", Mission::Both).unwrap();

        for day in reference_year_days() {
            let in_range = report
                .visibility
                .ranges()
                .iter()
                .any(|r| r.start <= day && day <= r.end);
            assert_eq!(
                checker.is_visible(&wasp12, day, Mission::Both).unwrap(),
                in_range,
                "{day}"
            );
        }
    }
}
